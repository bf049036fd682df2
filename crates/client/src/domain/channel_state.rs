use super::errors::ChannelError;

/// Observable lifecycle of one purchase channel
///
/// `Idle -> Connecting -> Open -> MessageSent -> Closed`, with `Error`
/// reachable from `Connecting`, `Open` and `MessageSent`. Nothing returns to
/// `Idle`; every purchase action builds a fresh channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelState {
    /// Constructed, no connection attempted yet
    Idle,
    /// WebSocket handshake in progress
    Connecting,
    /// Handshake done, intent not sent yet
    Open,
    /// Intent written to the socket
    MessageSent,
    /// Closed by either side
    Closed,
    /// Transport failure
    Error,
}

impl ChannelState {
    pub fn can_transition_to(&self, next: ChannelState) -> bool {
        use ChannelState::*;
        matches!(
            (self, next),
            (Idle, Connecting)
                | (Connecting, Open)
                | (Connecting, Error)
                | (Open, MessageSent)
                | (Open, Closed)
                | (Open, Error)
                | (MessageSent, Closed)
                | (MessageSent, Error)
        )
    }

    /// Move to `next`, rejecting transitions outside the lifecycle
    pub fn transition(self, next: ChannelState) -> Result<ChannelState, ChannelError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(ChannelError::InvalidState {
                from: self,
                to: next,
            })
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ChannelState::Closed | ChannelState::Error)
    }

    /// Whether the intent reached the socket
    pub fn was_sent(&self) -> bool {
        matches!(self, ChannelState::MessageSent | ChannelState::Closed)
    }
}
