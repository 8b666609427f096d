//! Typed payloads for the device-control channel

use serde::{Deserialize, Serialize};
use std::fmt;

// ==================== Devices ====================

/// Connection status of a device as reported by the control service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Discovered,
    Connecting,
    Connected,
    Disconnected,
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discovered => write!(f, "discovered"),
            Self::Connecting => write!(f, "connecting"),
            Self::Connected => write!(f, "connected"),
            Self::Disconnected => write!(f, "disconnected"),
        }
    }
}

/// A receipt printer (physical or virtual) known to the control service.
///
/// `device_id` is opaque and stable for the lifetime of a discovery
/// session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub device_id: String,
    pub display_name: String,
    pub status: DeviceStatus,
}

// ==================== Requests ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverRequest {
    pub ignore_unknown: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectRequest {
    pub device_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisconnectRequest {
    pub device_id: String,
}

/// `data` is the base64-encoded command stream bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendDataRequest {
    pub device_id: String,
    pub data: String,
}

// ==================== Responses ====================

/// Service-reported failure for a specific device, carried under the
/// `error` key of a response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceFault {
    #[serde(default)]
    pub device_id: Option<String>,
    pub message: String,
}

/// Response payload for `discover` and `list_connected`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceListResponse {
    #[serde(default)]
    pub devices: Vec<Device>,
}

/// Response payload for `connect`: the resulting state of that device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectResponse {
    pub device: Device,
}

/// Empty request payload (`list_connected`, `clear_all`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Empty {}

/// Bare acknowledgement (`disconnect`, `send_data`, `clear_all`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ack {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_status_wire_names() {
        let json = serde_json::to_string(&DeviceStatus::Connected).unwrap();
        assert_eq!(json, "\"connected\"");
    }

    #[test]
    fn test_device_list_defaults_empty() {
        let resp: DeviceListResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.devices.is_empty());
    }

    #[test]
    fn test_send_data_request_shape() {
        let req = SendDataRequest {
            device_id: "dev-1".to_string(),
            data: "GxtAAA==".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["device_id"], "dev-1");
        assert_eq!(json["data"], "GxtAAA==");
    }
}
