//! Shared utilities for integration testing.
//!
//! `MockNode` is a minimal JSON-RPC endpoint over a local TCP listener.
//! It answers each request from a fixed method-to-reply table and counts
//! requests, which lets tests assert that certain failures happen before
//! any network I/O.

use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Canned reply for one JSON-RPC method.
#[derive(Clone)]
pub enum MockReply {
    /// Respond with `{"result": ...}`.
    Result(Value),
    /// Respond with `{"error": {"code": ..., "message": ...}}`.
    Error(i64, &'static str),
    /// Replies served in order; the last entry repeats once exhausted.
    Sequence(Vec<MockReply>),
}

pub struct MockNode {
    pub url: String,
    requests: Arc<AtomicUsize>,
}

impl MockNode {
    /// Bind an ephemeral port and serve the given reply table.
    pub async fn start(replies: HashMap<&'static str, MockReply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(AtomicUsize::new(0));
        let replies = Arc::new(replies);
        let sequence_positions = Arc::new(Mutex::new(HashMap::new()));

        let counter = requests.clone();
        tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((socket, _)) => {
                        let replies = replies.clone();
                        let counter = counter.clone();
                        let positions = sequence_positions.clone();
                        tokio::spawn(async move {
                            handle_connection(socket, replies, counter, positions).await;
                        });
                    }
                    Err(_) => break,
                }
            }
        });

        Self {
            url: format!("http://{}", addr),
            requests,
        }
    }

    /// Number of JSON-RPC requests served so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

async fn handle_connection(
    mut socket: TcpStream,
    replies: Arc<HashMap<&'static str, MockReply>>,
    counter: Arc<AtomicUsize>,
    sequence_positions: Arc<Mutex<HashMap<String, usize>>>,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_crlf_crlf(&buf) {
            break pos + 4;
        }
        if buf.len() > 64 * 1024 {
            return;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);
    }

    let request: Value =
        match serde_json::from_slice(&buf[header_end..header_end + content_length]) {
            Ok(v) => v,
            Err(_) => return,
        };

    counter.fetch_add(1, Ordering::SeqCst);

    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let method = request
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let reply = match replies.get(method) {
        Some(MockReply::Sequence(steps)) => {
            let mut positions = sequence_positions.lock().unwrap();
            let position = positions.entry(method.to_string()).or_insert(0);
            let step = steps.get(*position).or_else(|| steps.last());
            *position += 1;
            step
        }
        other => other,
    };

    let body = match reply {
        Some(MockReply::Result(value)) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": value,
        }),
        Some(MockReply::Error(code, message)) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": code, "message": message },
        }),
        // Nested sequences are not supported; treat them like a miss.
        Some(MockReply::Sequence(_)) | None => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32601, "message": format!("method {} not found", method) },
        }),
    }
    .to_string();

    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

fn find_crlf_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// A complete `eth_getTransactionReceipt` result body.
#[allow(dead_code)]
pub fn receipt_json(tx_hash: &str, status: bool, block_number: u64) -> Value {
    json!({
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": "0x1111111111111111111111111111111111111111111111111111111111111111",
        "blockNumber": format!("0x{:x}", block_number),
        "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        "to": "0x5fbdb2315678afecb367f032d93f642f64180aa3",
        "cumulativeGasUsed": "0x5208",
        "gasUsed": "0x5208",
        "effectiveGasPrice": "0x3b9aca00",
        "contractAddress": null,
        "logs": [],
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "status": if status { "0x1" } else { "0x0" },
        "type": "0x0",
    })
}

/// Hex-encoded 32-byte word holding a small unsigned integer, as an
/// `eth_call` result body.
#[allow(dead_code)]
pub fn uint_word(value: u64) -> Value {
    Value::String(format!("0x{:064x}", value))
}
