//! Channel transport: newline-delimited JSON over a local TCP socket
//!
//! The read and write halves are locked independently; one message is one
//! line, written under the writer lock so writes stay atomic per message
//! while multiple requests are in flight.

use crate::error::{ClientError, ClientResult};
use shared::message::Envelope;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::Mutex;
use tracing::instrument;

#[derive(Debug, Clone)]
pub(crate) struct TcpTransport {
    reader: Arc<Mutex<BufReader<OwnedReadHalf>>>,
    writer: Arc<Mutex<OwnedWriteHalf>>,
}

impl TcpTransport {
    #[instrument]
    pub async fn connect(addr: &str) -> ClientResult<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| ClientError::Connection(format!("{addr}: {e}")))?;
        let (reader, writer) = stream.into_split();
        Ok(Self {
            reader: Arc::new(Mutex::new(BufReader::new(reader))),
            writer: Arc::new(Mutex::new(writer)),
        })
    }

    pub async fn read_message(&self) -> ClientResult<Envelope> {
        let mut reader = self.reader.lock().await;
        loop {
            let mut line = String::new();
            let n = reader
                .read_line(&mut line)
                .await
                .map_err(ClientError::Io)?;
            if n == 0 {
                return Err(ClientError::Connection("channel closed".to_string()));
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return Envelope::from_slice(trimmed.as_bytes())
                .map_err(|e| ClientError::InvalidMessage(e.to_string()));
        }
    }

    pub async fn write_message(&self, msg: &Envelope) -> ClientResult<()> {
        let mut data = msg
            .to_bytes()
            .map_err(|e| ClientError::InvalidMessage(e.to_string()))?;
        data.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer.write_all(&data).await.map_err(ClientError::Io)?;
        writer.flush().await.map_err(ClientError::Io)?;
        Ok(())
    }

    pub async fn close(&self) -> ClientResult<()> {
        let mut writer = self.writer.lock().await;
        writer.shutdown().await.map_err(ClientError::Io)?;
        Ok(())
    }
}
