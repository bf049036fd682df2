use futures_util::{SinkExt, StreamExt};
use marquee_core::{PurchaseIntent, RequestId};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use crate::domain::{ChannelError, ChannelState, ClientMessage, PurchaseOutcome, PurchaseReply};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// One-shot WebSocket channel to the matching engine
///
/// A channel carries exactly one purchase intent. Once it reaches `Closed` or
/// `Error` every further call fails with `ChannelError::InvalidState`, so a
/// new purchase needs a new channel. There is no pooling and no reconnect.
pub struct PurchaseChannel {
    url: String,
    state: ChannelState,
}

impl PurchaseChannel {
    pub fn new(url: impl Into<String>) -> Self {
        PurchaseChannel {
            url: url.into(),
            state: ChannelState::Idle,
        }
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fire-and-forget: connect, send the intent, close
    ///
    /// Never reads from the socket, so whatever the engine answers is dropped.
    pub async fn send(&mut self, intent: &PurchaseIntent) -> Result<(), ChannelError> {
        let mut ws = self.open().await?;
        self.write_intent(&mut ws, intent).await?;
        self.close(&mut ws).await
    }

    /// Send the intent and wait up to `ack_timeout` for the correlated reply
    ///
    /// The timeout covers the whole attempt: handshake, write and reply.
    /// Returns `Ok(None)` when it runs out. Frames that are not replies, or
    /// replies to another request id, are skipped. A handshake that never
    /// completes leaves the channel in `Error`.
    pub async fn request(
        &mut self,
        intent: &PurchaseIntent,
        ack_timeout: Duration,
    ) -> Result<Option<PurchaseOutcome>, ChannelError> {
        let mut socket = None;
        let attempt = tokio::time::timeout(ack_timeout, self.exchange(&mut socket, intent)).await;

        let outcome = match attempt {
            Ok(Ok(reply)) => Some(reply.into_outcome()),
            Ok(Err(e)) => {
                self.fail();
                return Err(e);
            }
            Err(_) => {
                tracing::debug!(
                    "No reply to request {} within {:?} (state {:?})",
                    intent.request_id,
                    ack_timeout,
                    self.state
                );
                None
            }
        };

        match socket.as_mut() {
            Some(ws) => self.close(ws).await?,
            None => self.fail(),
        }
        Ok(outcome)
    }

    async fn exchange(
        &mut self,
        socket: &mut Option<WsStream>,
        intent: &PurchaseIntent,
    ) -> Result<PurchaseReply, ChannelError> {
        let ws = socket.insert(self.open().await?);
        self.write_intent(ws, intent).await?;
        await_reply(ws, intent.request_id).await
    }

    async fn open(&mut self) -> Result<WsStream, ChannelError> {
        self.advance(ChannelState::Connecting)?;
        match connect_async(&self.url).await {
            Ok((ws, _)) => {
                self.advance(ChannelState::Open)?;
                tracing::debug!("WebSocket connection established to {}", self.url);
                Ok(ws)
            }
            Err(e) => {
                self.fail();
                Err(ChannelError::Connect(e.to_string()))
            }
        }
    }

    async fn write_intent(
        &mut self,
        ws: &mut WsStream,
        intent: &PurchaseIntent,
    ) -> Result<(), ChannelError> {
        let json = match serde_json::to_string(&ClientMessage::from(intent)) {
            Ok(json) => json,
            Err(e) => {
                self.fail();
                return Err(e.into());
            }
        };

        if let Err(e) = ws.send(Message::Text(json.into())).await {
            self.fail();
            return Err(ChannelError::Send(e.to_string()));
        }

        self.advance(ChannelState::MessageSent)
    }

    async fn close(&mut self, ws: &mut WsStream) -> Result<(), ChannelError> {
        // The engine may already have hung up; either way the channel is done
        if let Err(e) = ws.close(None).await {
            tracing::debug!("Close on {}: {}", self.url, e);
        }
        self.advance(ChannelState::Closed)?;
        tracing::debug!("WebSocket connection closed");
        Ok(())
    }

    fn advance(&mut self, next: ChannelState) -> Result<(), ChannelError> {
        self.state = self.state.transition(next)?;
        Ok(())
    }

    fn fail(&mut self) {
        if self.state.can_transition_to(ChannelState::Error) {
            self.state = ChannelState::Error;
        }
    }
}

async fn await_reply(ws: &mut WsStream, request_id: RequestId) -> Result<PurchaseReply, ChannelError> {
    while let Some(msg) = ws.next().await {
        match msg {
            Ok(Message::Text(text)) => match PurchaseReply::parse(text.as_str()) {
                Some(reply) if reply.request_id == request_id => return Ok(reply),
                Some(reply) => {
                    tracing::trace!("Skipping reply for request {}", reply.request_id);
                }
                None => {
                    tracing::trace!("Skipping non-reply frame: {}", text.as_str());
                }
            },
            Ok(Message::Close(frame)) => {
                tracing::debug!("Engine closed the channel: {:?}", frame);
                return Err(ChannelError::ClosedBeforeReply);
            }
            Ok(_) => {}
            Err(e) => return Err(ChannelError::Receive(e.to_string())),
        }
    }
    Err(ChannelError::ClosedBeforeReply)
}
