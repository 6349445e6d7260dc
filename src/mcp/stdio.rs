//! MCP stdio transport: one JSON-RPC message per line on stdin, responses on stdout.
//!
//! Logging goes to stderr (env_logger default), so stdout carries protocol traffic only.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::mcp::rpc::{OutboundResponse, RpcRequest};
use crate::mcp::service::McpService;

/// Serve on the process stdin/stdout until stdin closes.
pub async fn serve(service: McpService) -> std::io::Result<()> {
    log::info!("MCP server listening on stdio");
    serve_io(
        &service,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}

/// Serve on an arbitrary line source and sink. Only EOF or an I/O failure ends the loop.
pub async fn serve_io<R, W>(service: &McpService, mut reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => handle_line(service, line).await,
            Err(err) => {
                log::warn!("discarding line that is not valid UTF-8: {}", err);
                Some(OutboundResponse::parse_error(format!("Parse error: {err}")))
            }
        };
        let Some(response) = response else {
            continue;
        };

        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;
        writer.flush().await?;
    }

    log::info!("stdin closed, shutting down");
    Ok(())
}

/// Decode and handle one line. Blank lines and notifications produce nothing.
///
/// Malformed JSON gets `-32700`; well-formed JSON that is not a request gets
/// `-32600`, echoing its `id` when present.
pub async fn handle_line(service: &McpService, line: &str) -> Option<OutboundResponse> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("unparseable JSON-RPC message: {}", err);
            return Some(OutboundResponse::parse_error(format!("Parse error: {err}")));
        }
    };

    let id = value.get("id").cloned();
    match serde_json::from_value::<RpcRequest>(value) {
        Ok(request) => service.handle_request(request).await,
        Err(err) => {
            log::warn!("invalid JSON-RPC request: {}", err);
            Some(OutboundResponse::invalid_request(
                id,
                format!("Invalid request: {err}"),
            ))
        }
    }
}
