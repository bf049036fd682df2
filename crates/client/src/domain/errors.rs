use marquee_core::IntentError;
use thiserror::Error;

use super::ChannelState;

/// Domain error for inventory fetch operations
///
/// Infrastructure implementations convert their client-library errors into
/// this type so the application layer never sees reqwest details.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network unreachable, timed out, or a non-2xx status
    #[error("transport error fetching {resource}: {message}")]
    Transport {
        resource: String,
        status: Option<u16>,
        message: String,
    },
    /// The body could not be parsed into the expected shape
    #[error("decode error for {resource}: {message}")]
    Decode { resource: String, message: String },
}

impl FetchError {
    pub fn transport(resource: impl Into<String>, message: impl Into<String>) -> Self {
        FetchError::Transport {
            resource: resource.into(),
            status: None,
            message: message.into(),
        }
    }

    pub fn status(resource: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        FetchError::Transport {
            resource: resource.into(),
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn decode(resource: impl Into<String>, message: impl Into<String>) -> Self {
        FetchError::Decode {
            resource: resource.into(),
            message: message.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, FetchError::Decode { .. })
    }

    /// HTTP status when the origin answered with a non-2xx code
    pub fn http_status(&self) -> Option<u16> {
        match self {
            FetchError::Transport { status, .. } => *status,
            FetchError::Decode { .. } => None,
        }
    }
}

/// WebSocket-level failure on a purchase channel
#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("Connection error: {0}")]
    Connect(String),
    #[error("Send error: {0}")]
    Send(String),
    #[error("Receive error: {0}")]
    Receive(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid channel transition {from:?} -> {to:?}")]
    InvalidState { from: ChannelState, to: ChannelState },
    #[error("Channel closed before the engine replied")]
    ClosedBeforeReply,
}

impl ChannelError {
    /// Whether another attempt on a fresh channel could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ChannelError::Connect(_)
                | ChannelError::Send(_)
                | ChannelError::Receive(_)
                | ChannelError::ClosedBeforeReply
        )
    }
}

/// Failure of an acknowledged purchase
#[derive(Error, Debug)]
pub enum PurchaseError {
    #[error("Invalid purchase intent: {0}")]
    InvalidIntent(#[from] IntentError),
    #[error("Purchase failed after {attempts} attempt(s): {source}")]
    Channel {
        attempts: u32,
        #[source]
        source: ChannelError,
    },
}
