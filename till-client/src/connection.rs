//! Connection state machine
//!
//! Connection lifecycle is a value transitioned by a single function, with
//! the retry counter carried inside the value rather than as ambient
//! client fields. `apply` returns the status to surface (if any), so every
//! observable transition flows through one place.

/// Status surfaced to registered status callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected,
    /// Terminal: reconnection attempts exhausted. The client stays
    /// disconnected until reconnected explicitly.
    Error,
}

/// Lifecycle phase of the control channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    Connecting,
    Connected,
}

/// Lifecycle events fed into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// A connection attempt (initial or retry) is starting.
    AttemptStarted,
    /// The channel is up.
    Established,
    /// The channel closed or the initial attempt failed outright.
    Lost,
    /// A reconnection attempt failed; more remain.
    AttemptFailed,
    /// All reconnection attempts failed.
    RetriesExhausted,
}

/// The connection state value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionState {
    pub phase: Phase,
    /// Attempt number within the current (re)connection cycle.
    pub attempt: u32,
}

impl ConnectionState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Disconnected,
            attempt: 0,
        }
    }

    /// Transition on an event, returning the next state and the status to
    /// surface to callbacks (`None` for transitions that are not
    /// observable on their own, like a single failed retry).
    pub fn apply(self, event: ConnectionEvent) -> (Self, Option<ConnectionStatus>) {
        match event {
            ConnectionEvent::AttemptStarted => (
                Self {
                    phase: Phase::Connecting,
                    attempt: self.attempt + 1,
                },
                Some(ConnectionStatus::Connecting),
            ),
            ConnectionEvent::Established => (
                Self {
                    phase: Phase::Connected,
                    attempt: 0,
                },
                Some(ConnectionStatus::Connected),
            ),
            ConnectionEvent::Lost => (
                Self {
                    phase: Phase::Disconnected,
                    attempt: 0,
                },
                Some(ConnectionStatus::Disconnected),
            ),
            ConnectionEvent::AttemptFailed => (
                Self {
                    phase: Phase::Connecting,
                    attempt: self.attempt,
                },
                None,
            ),
            ConnectionEvent::RetriesExhausted => (
                Self {
                    phase: Phase::Disconnected,
                    attempt: self.attempt,
                },
                Some(ConnectionStatus::Error),
            ),
        }
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self::new()
    }
}
