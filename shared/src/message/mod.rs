//! Wire message types for the device-control channel
//!
//! The channel carries newline-delimited JSON envelopes
//! `{ "type": ..., "request_id": ..., "payload": {...} }` over a persistent
//! local socket. Message types are the six request kinds, their
//! `_response` counterparts, and the unsolicited `devices_cleared`
//! notification.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

pub mod payload;
pub use payload::*;

/// Default local endpoint of the device-control service.
pub const DEFAULT_ENDPOINT: &str = "127.0.0.1:9632";

/// Every message type the channel can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Discover,
    DiscoverResponse,
    Connect,
    ConnectResponse,
    Disconnect,
    DisconnectResponse,
    ListConnected,
    ListConnectedResponse,
    SendData,
    SendDataResponse,
    ClearAll,
    ClearAllResponse,
    /// Unsolicited notification: the service dropped all device
    /// connections.
    DevicesCleared,
}

impl MessageKind {
    pub fn is_response(self) -> bool {
        matches!(
            self,
            MessageKind::DiscoverResponse
                | MessageKind::ConnectResponse
                | MessageKind::DisconnectResponse
                | MessageKind::ListConnectedResponse
                | MessageKind::SendDataResponse
                | MessageKind::ClearAllResponse
        )
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MessageKind::Discover => "discover",
            MessageKind::DiscoverResponse => "discover_response",
            MessageKind::Connect => "connect",
            MessageKind::ConnectResponse => "connect_response",
            MessageKind::Disconnect => "disconnect",
            MessageKind::DisconnectResponse => "disconnect_response",
            MessageKind::ListConnected => "list_connected",
            MessageKind::ListConnectedResponse => "list_connected_response",
            MessageKind::SendData => "send_data",
            MessageKind::SendDataResponse => "send_data_response",
            MessageKind::ClearAll => "clear_all",
            MessageKind::ClearAllResponse => "clear_all_response",
            MessageKind::DevicesCleared => "devices_cleared",
        };
        write!(f, "{s}")
    }
}

/// The six request/response operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Discover,
    Connect,
    Disconnect,
    ListConnected,
    SendData,
    ClearAll,
}

impl Operation {
    pub fn request_kind(self) -> MessageKind {
        match self {
            Operation::Discover => MessageKind::Discover,
            Operation::Connect => MessageKind::Connect,
            Operation::Disconnect => MessageKind::Disconnect,
            Operation::ListConnected => MessageKind::ListConnected,
            Operation::SendData => MessageKind::SendData,
            Operation::ClearAll => MessageKind::ClearAll,
        }
    }

    pub fn response_kind(self) -> MessageKind {
        match self {
            Operation::Discover => MessageKind::DiscoverResponse,
            Operation::Connect => MessageKind::ConnectResponse,
            Operation::Disconnect => MessageKind::DisconnectResponse,
            Operation::ListConnected => MessageKind::ListConnectedResponse,
            Operation::SendData => MessageKind::SendDataResponse,
            Operation::ClearAll => MessageKind::ClearAllResponse,
        }
    }

    /// Per-operation response budget. Discovery scans the bus and gets the
    /// longest window; connect waits for the device handshake.
    pub fn timeout(self) -> Duration {
        match self {
            Operation::Discover => Duration::from_secs(30),
            Operation::Connect => Duration::from_secs(15),
            Operation::Disconnect
            | Operation::ListConnected
            | Operation::SendData
            | Operation::ClearAll => Duration::from_secs(10),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.request_kind().fmt(f)
    }
}

/// One JSON message on the wire.
///
/// Requests carry a freshly generated `request_id`; the service echoes it
/// on the matching response so concurrent same-kind requests can be told
/// apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl Envelope {
    /// Build a request envelope with a new correlation id.
    pub fn request<P: Serialize>(
        operation: Operation,
        payload: &P,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            kind: operation.request_kind(),
            request_id: Some(Uuid::new_v4()),
            payload: serde_json::to_value(payload)?,
        })
    }

    /// Build a response envelope echoing a request's correlation id.
    pub fn response<P: Serialize>(
        operation: Operation,
        request_id: Option<Uuid>,
        payload: &P,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            kind: operation.response_kind(),
            request_id,
            payload: serde_json::to_value(payload)?,
        })
    }

    /// Build the unsolicited `devices_cleared` notification.
    pub fn devices_cleared() -> Self {
        Self {
            kind: MessageKind::DevicesCleared,
            request_id: None,
            payload: serde_json::Value::Null,
        }
    }

    /// Deserialize the payload into its typed form.
    pub fn parse_payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }

    /// Service-reported failure carried in a response payload, if any.
    pub fn fault(&self) -> Option<ServiceFault> {
        self.payload
            .get("error")
            .and_then(|e| serde_json::from_value(e.clone()).ok())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_names() {
        let json = serde_json::to_string(&MessageKind::ListConnected).unwrap();
        assert_eq!(json, "\"list_connected\"");
        let json = serde_json::to_string(&MessageKind::SendDataResponse).unwrap();
        assert_eq!(json, "\"send_data_response\"");
    }

    #[test]
    fn test_operation_kinds_pair_up() {
        for op in [
            Operation::Discover,
            Operation::Connect,
            Operation::Disconnect,
            Operation::ListConnected,
            Operation::SendData,
            Operation::ClearAll,
        ] {
            assert!(!op.request_kind().is_response());
            assert!(op.response_kind().is_response());
        }
        assert!(!MessageKind::DevicesCleared.is_response());
    }

    #[test]
    fn test_timeout_table() {
        assert_eq!(Operation::Discover.timeout(), Duration::from_secs(30));
        assert_eq!(Operation::Connect.timeout(), Duration::from_secs(15));
        assert_eq!(Operation::SendData.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_envelope_round_trip() {
        let env = Envelope::request(
            Operation::Discover,
            &DiscoverRequest {
                ignore_unknown: true,
            },
        )
        .unwrap();
        assert!(env.request_id.is_some());

        let bytes = env.to_bytes().unwrap();
        let back = Envelope::from_slice(&bytes).unwrap();
        assert_eq!(back, env);

        let parsed: DiscoverRequest = back.parse_payload().unwrap();
        assert!(parsed.ignore_unknown);
    }

    #[test]
    fn test_fault_extraction() {
        let env = Envelope {
            kind: MessageKind::ConnectResponse,
            request_id: Some(Uuid::new_v4()),
            payload: serde_json::json!({
                "error": { "device_id": "dev-1", "message": "not found" }
            }),
        };
        let fault = env.fault().unwrap();
        assert_eq!(fault.device_id.as_deref(), Some("dev-1"));
        assert_eq!(fault.message, "not found");

        let ok = Envelope::devices_cleared();
        assert!(ok.fault().is_none());
    }
}
