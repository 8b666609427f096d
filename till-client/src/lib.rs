//! # till-client
//!
//! Device control protocol client.
//!
//! Owns a single persistent connection to the local device-control service
//! and exposes the six request/response operations (discover, connect,
//! disconnect, list-connected, send-data, clear-all) plus connection
//! status notifications.
//!
//! ## Request correlation
//!
//! Every request carries a `request_id`; the service echoes it on the
//! matching response, so concurrent requests of the same kind are routed
//! to the caller that issued them. Responses without an echoed id fall
//! back to FIFO delivery per response kind (compatibility mode for
//! services that do not echo).
//!
//! ## Example
//!
//! ```ignore
//! use till_client::{ClientConfig, DeviceClient};
//!
//! let client = DeviceClient::connect(ClientConfig::default()).await?;
//! let devices = client.discover(true).await?;
//! client.connect_device(&devices[0].device_id).await?;
//! client.send_data(&devices[0].device_id, &escpos_bytes).await?;
//! ```

mod client;
mod config;
mod connection;
mod error;
mod transport;

// Re-exports
pub use client::{DeviceClient, Notification};
pub use config::ClientConfig;
pub use connection::{ConnectionEvent, ConnectionState, ConnectionStatus, Phase};
pub use error::{ClientError, ClientResult};

// Shared wire types, for convenient access
pub use shared::message::{Device, DeviceStatus, Envelope, MessageKind, Operation};
