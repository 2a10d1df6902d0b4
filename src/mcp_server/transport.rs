use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

use crate::mcp_core::{JsonRpcRequest, JsonRpcResponse, TransportError};

/// Transport trait for handling JSON-RPC communication
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Read the next JSON-RPC request
    async fn read_request(&mut self) -> Result<JsonRpcRequest, TransportError>;

    /// Send a JSON-RPC response
    async fn send_response(&mut self, response: JsonRpcResponse) -> Result<(), TransportError>;
}

/// Line-delimited JSON-RPC transport over any async byte stream
pub struct ByteTransport<R, W> {
    reader: BufReader<R>,
    writer: Arc<Mutex<W>>,
}

impl<R, W> ByteTransport<R, W>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer: Arc::new(Mutex::new(writer)),
        }
    }
}

#[async_trait]
impl<R, W> Transport for ByteTransport<R, W>
where
    R: AsyncRead + Unpin + Send + Sync + 'static,
    W: AsyncWrite + Unpin + Send + Sync + 'static,
{
    async fn read_request(&mut self) -> Result<JsonRpcRequest, TransportError> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).await?;
        if read == 0 {
            return Err(TransportError::IoError(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "reached end of input",
            )));
        }

        let request: JsonRpcRequest =
            serde_json::from_str(&line).map_err(|e| TransportError::ParseError(e.to_string()))?;

        // Validate JSON-RPC version
        if request.jsonrpc != "2.0" {
            return Err(TransportError::InvalidJsonRpc(
                "expected JSON-RPC version 2.0".to_string(),
            ));
        }

        Ok(request)
    }

    async fn send_response(&mut self, response: JsonRpcResponse) -> Result<(), TransportError> {
        let json = serde_json::to_string(&response).map_err(|e| {
            TransportError::ParseError(format!("failed to serialize response: {}", e))
        })?;

        let mut writer = self.writer.lock().await;
        writer.write_all(json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;

        Ok(())
    }
}
