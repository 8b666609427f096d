//! Device control client
//!
//! One shared connection per process. All six operations may be called
//! concurrently; each in-flight request is tracked by its own correlation
//! entry with its own timeout, and message writes are atomic per message.
//! Requests made while the channel is down are rejected fast with
//! [`ClientError::Connection`]; nothing is queued.

use crate::config::ClientConfig;
use crate::connection::{ConnectionEvent, ConnectionState, ConnectionStatus, Phase};
use crate::error::{ClientError, ClientResult};
use crate::transport::TcpTransport;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::message::{
    Ack, ConnectRequest, ConnectResponse, Device, DeviceListResponse, DisconnectRequest,
    DiscoverRequest, Empty, Envelope, MessageKind, Operation, SendDataRequest,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{RwLock, broadcast, oneshot};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Unsolicited service notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// The service dropped all device connections.
    DevicesCleared,
}

type StatusListener = Box<dyn Fn(ConnectionStatus) + Send + Sync>;

/// One waiter for an in-flight request.
struct PendingEntry {
    kind: MessageKind,
    tx: oneshot::Sender<Envelope>,
}

/// Correlation table: id-routed primary index plus a per-kind FIFO index
/// for responses from services that do not echo `request_id`.
#[derive(Default)]
struct PendingTable {
    by_id: HashMap<Uuid, PendingEntry>,
    fifo: HashMap<MessageKind, VecDeque<Uuid>>,
}

impl PendingTable {
    fn insert(&mut self, id: Uuid, kind: MessageKind, tx: oneshot::Sender<Envelope>) {
        self.by_id.insert(id, PendingEntry { kind, tx });
        self.fifo.entry(kind).or_default().push_back(id);
    }

    /// Withdraw one waiter. Other in-flight requests of the same kind are
    /// untouched.
    fn remove(&mut self, id: Uuid) -> Option<PendingEntry> {
        let entry = self.by_id.remove(&id)?;
        if let Some(queue) = self.fifo.get_mut(&entry.kind) {
            queue.retain(|q| *q != id);
        }
        Some(entry)
    }

    /// Find the waiter for a response. An echoed id routes only to its own
    /// waiter: if that waiter is gone (timed out, cancelled), the response
    /// is stale and must be dropped, never handed to another caller of the
    /// same kind. Only responses with no id at all use the per-kind FIFO
    /// fallback.
    fn route(&mut self, envelope: &Envelope) -> Option<PendingEntry> {
        match envelope.request_id {
            Some(id) => self.remove(id),
            None => {
                let id = self.fifo.get_mut(&envelope.kind)?.front().copied()?;
                self.remove(id)
            }
        }
    }

    /// Drop every waiter (connection lost). Receivers observe the closed
    /// channel and fail with a connection error.
    fn clear(&mut self) {
        self.by_id.clear();
        self.fifo.clear();
    }

    fn len(&self) -> usize {
        self.by_id.len()
    }
}

struct Inner {
    config: ClientConfig,
    transport: RwLock<Option<TcpTransport>>,
    pending: Mutex<PendingTable>,
    state: Mutex<ConnectionState>,
    listeners: Mutex<Vec<StatusListener>>,
    notifications: broadcast::Sender<Notification>,
    closed: AtomicBool,
}

impl Inner {
    fn new(config: ClientConfig) -> Self {
        let (notifications, _) = broadcast::channel(64);
        Self {
            config,
            transport: RwLock::new(None),
            pending: Mutex::new(PendingTable::default()),
            state: Mutex::new(ConnectionState::new()),
            listeners: Mutex::new(Vec::new()),
            notifications,
            closed: AtomicBool::new(false),
        }
    }

    fn phase(&self) -> Phase {
        self.state.lock().unwrap().phase
    }

    /// Apply a lifecycle event and surface the resulting status (if any)
    /// to every registered listener.
    fn transition(&self, event: ConnectionEvent) {
        let status = {
            let mut state = self.state.lock().unwrap();
            let (next, status) = state.apply(event);
            *state = next;
            status
        };
        if let Some(status) = status {
            debug!(?event, ?status, "connection transition");
            let listeners = self.listeners.lock().unwrap();
            for listener in listeners.iter() {
                listener(status);
            }
        }
    }

    /// Route one incoming message.
    fn dispatch(&self, envelope: Envelope) {
        if envelope.kind == MessageKind::DevicesCleared {
            info!("devices_cleared notification");
            // No subscribers is fine.
            let _ = self.notifications.send(Notification::DevicesCleared);
            return;
        }
        if !envelope.kind.is_response() {
            debug!(kind = %envelope.kind, "ignoring non-response message");
            return;
        }
        let waiter = self.pending.lock().unwrap().route(&envelope);
        match waiter {
            // Send failure means the caller withdrew (timeout or drop).
            Some(entry) => {
                let _ = entry.tx.send(envelope);
            }
            None => debug!(kind = %envelope.kind, "response without a waiter"),
        }
    }

    /// Fail every in-flight request; their receivers observe the dropped
    /// senders as a connection error.
    fn fail_pending(&self) {
        let mut pending = self.pending.lock().unwrap();
        let n = pending.len();
        if n > 0 {
            warn!(in_flight = n, "failing in-flight requests: connection lost");
        }
        pending.clear();
    }
}

/// Withdraws a waiter when its caller stops waiting (timeout or a dropped
/// request future).
struct PendingGuard {
    inner: Arc<Inner>,
    id: Uuid,
    armed: bool,
}

impl PendingGuard {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if self.armed {
            self.inner.pending.lock().unwrap().remove(self.id);
        }
    }
}

/// Client for the local device-control service.
///
/// Cheap to clone; all clones share the one connection.
#[derive(Clone)]
pub struct DeviceClient {
    inner: Arc<Inner>,
}

impl DeviceClient {
    /// Establish the connection to the device-control service.
    ///
    /// A failed initial attempt returns the error to the caller; automatic
    /// reconnection only covers connections that were established and then
    /// lost.
    pub async fn connect(config: ClientConfig) -> ClientResult<Self> {
        let inner = Arc::new(Inner::new(config));
        inner.transition(ConnectionEvent::AttemptStarted);

        match TcpTransport::connect(&inner.config.endpoint).await {
            Ok(transport) => {
                install_transport(&inner, transport).await;
                info!(endpoint = %inner.config.endpoint, "connected to device-control service");
                Ok(Self { inner })
            }
            Err(e) => {
                inner.transition(ConnectionEvent::Lost);
                Err(e)
            }
        }
    }

    /// Register a callback invoked on every connection status transition.
    pub fn on_status_change(&self, listener: impl Fn(ConnectionStatus) + Send + Sync + 'static) {
        self.inner.listeners.lock().unwrap().push(Box::new(listener));
    }

    /// Subscribe to unsolicited service notifications.
    pub fn subscribe_notifications(&self) -> broadcast::Receiver<Notification> {
        self.inner.notifications.subscribe()
    }

    /// Current lifecycle phase of the control channel.
    pub fn phase(&self) -> Phase {
        self.inner.phase()
    }

    /// Scan for receipt printers on the local bus.
    pub async fn discover(&self, ignore_unknown: bool) -> ClientResult<Vec<Device>> {
        let resp: DeviceListResponse = self
            .request(Operation::Discover, &DiscoverRequest { ignore_unknown })
            .await?;
        Ok(resp.devices)
    }

    /// Connect a discovered device.
    pub async fn connect_device(&self, device_id: &str) -> ClientResult<Device> {
        let resp: ConnectResponse = self
            .request(
                Operation::Connect,
                &ConnectRequest {
                    device_id: device_id.to_string(),
                },
            )
            .await?;
        Ok(resp.device)
    }

    /// Disconnect a connected device.
    pub async fn disconnect_device(&self, device_id: &str) -> ClientResult<()> {
        let _: Ack = self
            .request(
                Operation::Disconnect,
                &DisconnectRequest {
                    device_id: device_id.to_string(),
                },
            )
            .await?;
        Ok(())
    }

    /// List currently connected devices.
    pub async fn list_connected(&self) -> ClientResult<Vec<Device>> {
        let resp: DeviceListResponse = self.request(Operation::ListConnected, &Empty {}).await?;
        Ok(resp.devices)
    }

    /// Deliver raw command-stream bytes to a connected device.
    pub async fn send_data(&self, device_id: &str, data: &[u8]) -> ClientResult<()> {
        let _: Ack = self
            .request(
                Operation::SendData,
                &SendDataRequest {
                    device_id: device_id.to_string(),
                    data: BASE64.encode(data),
                },
            )
            .await?;
        Ok(())
    }

    /// Ask the service to drop all device connections.
    pub async fn clear_all(&self) -> ClientResult<()> {
        let _: Ack = self.request(Operation::ClearAll, &Empty {}).await?;
        Ok(())
    }

    /// Close the connection. In-flight requests fail with a connection
    /// error; no reconnection is attempted.
    pub async fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
        let transport = self.inner.transport.write().await.take();
        if let Some(transport) = transport {
            let _ = transport.close().await;
        }
    }

    /// Send one request and await its correlated response.
    async fn request<Req, Resp>(&self, operation: Operation, payload: &Req) -> ClientResult<Resp>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        // Fail fast while the channel is down; nothing is queued.
        let transport = {
            let guard = self.inner.transport.read().await;
            match (guard.as_ref(), self.inner.phase()) {
                (Some(t), Phase::Connected) => t.clone(),
                _ => {
                    return Err(ClientError::Connection(
                        "not connected to device-control service".to_string(),
                    ));
                }
            }
        };

        let request_id = Uuid::new_v4();
        let envelope = Envelope {
            kind: operation.request_kind(),
            request_id: Some(request_id),
            payload: serde_json::to_value(payload)
                .map_err(|e| ClientError::InvalidMessage(e.to_string()))?,
        };

        let (tx, rx) = oneshot::channel();
        self.inner
            .pending
            .lock()
            .unwrap()
            .insert(request_id, operation.response_kind(), tx);
        let mut guard = PendingGuard {
            inner: Arc::clone(&self.inner),
            id: request_id,
            armed: true,
        };

        // Guard withdraws the waiter if the write fails.
        transport.write_message(&envelope).await?;

        let budget = self
            .inner
            .config
            .request_timeout
            .unwrap_or_else(|| operation.timeout());

        let response = match tokio::time::timeout(budget, rx).await {
            Ok(Ok(envelope)) => {
                guard.disarm();
                envelope
            }
            // Sender dropped: the connection was lost and the table was
            // cleared; nothing left to withdraw.
            Ok(Err(_)) => {
                guard.disarm();
                return Err(ClientError::Connection(
                    "connection lost while awaiting response".to_string(),
                ));
            }
            // Timed out: the guard withdraws this waiter only; a response
            // arriving later will find no entry and is dropped instead of
            // being delivered to a different caller.
            Err(_) => return Err(ClientError::Timeout { operation }),
        };

        if let Some(fault) = response.fault() {
            return Err(ClientError::Device {
                device_id: fault.device_id.unwrap_or_default(),
                message: fault.message,
            });
        }
        response
            .parse_payload()
            .map_err(|e| ClientError::InvalidMessage(e.to_string()))
    }
}

/// Store the transport, mark the channel up and start its read loop.
async fn install_transport(inner: &Arc<Inner>, transport: TcpTransport) {
    *inner.transport.write().await = Some(transport.clone());
    inner.transition(ConnectionEvent::Established);
    spawn_read_loop(Arc::clone(inner), transport);
}

fn spawn_read_loop(inner: Arc<Inner>, transport: TcpTransport) {
    tokio::spawn(async move {
        loop {
            match transport.read_message().await {
                Ok(envelope) => inner.dispatch(envelope),
                Err(e) => {
                    if !inner.closed.load(Ordering::SeqCst) {
                        warn!(error = %e, "control channel read failed");
                    }
                    break;
                }
            }
        }
        handle_disconnect(inner).await;
    });
}

/// Runs after the read loop exits: fail in-flight requests, then try to
/// re-establish the channel. Reconnection replaces the connection, never
/// duplicates it.
async fn handle_disconnect(inner: Arc<Inner>) {
    inner.transport.write().await.take();
    inner.fail_pending();
    inner.transition(ConnectionEvent::Lost);

    if inner.closed.load(Ordering::SeqCst) {
        return;
    }

    for attempt in 1..=inner.config.max_reconnect_attempts {
        inner.transition(ConnectionEvent::AttemptStarted);
        tokio::time::sleep(inner.config.reconnect_delay).await;

        if inner.closed.load(Ordering::SeqCst) {
            inner.transition(ConnectionEvent::Lost);
            return;
        }

        match TcpTransport::connect(&inner.config.endpoint).await {
            Ok(transport) => {
                info!(attempt, "reconnected to device-control service");
                install_transport(&inner, transport).await;
                return;
            }
            Err(e) => {
                warn!(
                    attempt,
                    max = inner.config.max_reconnect_attempts,
                    error = %e,
                    "reconnect attempt failed"
                );
                inner.transition(ConnectionEvent::AttemptFailed);
            }
        }
    }

    inner.transition(ConnectionEvent::RetriesExhausted);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> (oneshot::Sender<Envelope>, oneshot::Receiver<Envelope>) {
        oneshot::channel()
    }

    fn response(kind: MessageKind, request_id: Option<Uuid>) -> Envelope {
        Envelope {
            kind,
            request_id,
            payload: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_route_by_id() {
        let mut table = PendingTable::default();
        let (tx_a, _rx_a) = entry();
        let (tx_b, _rx_b) = entry();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        table.insert(a, MessageKind::DiscoverResponse, tx_a);
        table.insert(b, MessageKind::DiscoverResponse, tx_b);

        // Second request's response arrives first; id routing must not
        // hand it to the first waiter.
        let routed = table
            .route(&response(MessageKind::DiscoverResponse, Some(b)))
            .unwrap();
        assert_eq!(routed.kind, MessageKind::DiscoverResponse);
        assert_eq!(table.len(), 1);
        assert!(table.by_id.contains_key(&a));
    }

    #[test]
    fn test_route_fifo_fallback() {
        let mut table = PendingTable::default();
        let (tx_a, _rx_a) = entry();
        let (tx_b, _rx_b) = entry();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        table.insert(a, MessageKind::DiscoverResponse, tx_a);
        table.insert(b, MessageKind::DiscoverResponse, tx_b);

        // No echoed id: oldest waiter of that kind wins.
        table
            .route(&response(MessageKind::DiscoverResponse, None))
            .unwrap();
        assert!(!table.by_id.contains_key(&a));
        assert!(table.by_id.contains_key(&b));
    }

    #[test]
    fn test_remove_leaves_same_kind_waiters() {
        let mut table = PendingTable::default();
        let (tx_a, _rx_a) = entry();
        let (tx_b, _rx_b) = entry();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        table.insert(a, MessageKind::SendDataResponse, tx_a);
        table.insert(b, MessageKind::SendDataResponse, tx_b);

        table.remove(a).unwrap();

        // FIFO fallback now resolves to the remaining waiter.
        table
            .route(&response(MessageKind::SendDataResponse, None))
            .unwrap();
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_stale_echoed_id_never_falls_back_to_fifo() {
        let mut table = PendingTable::default();
        let (tx_b, _rx_b) = entry();
        let withdrawn = Uuid::new_v4();
        let b = Uuid::new_v4();
        table.insert(b, MessageKind::DiscoverResponse, tx_b);

        // A response echoing an id whose waiter already timed out: dropped,
        // not delivered to the other discover still in flight.
        assert!(
            table
                .route(&response(MessageKind::DiscoverResponse, Some(withdrawn)))
                .is_none()
        );
        assert!(table.by_id.contains_key(&b));
    }

    #[test]
    fn test_route_unknown_kind() {
        let mut table = PendingTable::default();
        assert!(
            table
                .route(&response(MessageKind::ClearAllResponse, None))
                .is_none()
        );
    }
}
