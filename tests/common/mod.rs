//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use wax_dispatcher::chain::{ChainClient, ChainError, ChainInfo, ChainResult, Receipt, SignedTransaction, Signer};
use wax_dispatcher::dispatch::{DispatchWindow, Dispatcher, Identity, TransactionRequest};

/// How a mock capability should answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behavior {
    Succeed,
    FailSigning,
    FailNetwork,
    Reject,
}

/// Signer that records every request it is asked to sign.
pub struct RecordingSigner {
    pub behavior: Behavior,
    pub calls: AtomicU32,
    pub requests: Mutex<Vec<TransactionRequest>>,
}

impl RecordingSigner {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<TransactionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Signer for RecordingSigner {
    async fn sign(&self, request: &TransactionRequest) -> ChainResult<SignedTransaction> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if self.behavior == Behavior::FailSigning {
            return Err(ChainError::Signing("signature provider refused".into()));
        }
        Ok(SignedTransaction {
            signatures: vec!["SIG_K1_mock".into()],
            packed_trx: format!("{:02x}", request.actions.len()),
            compression: 0,
        })
    }
}

/// Chain client that records broadcasts and answers per `behavior`.
pub struct RecordingClient {
    pub behavior: Behavior,
    pub calls: AtomicU32,
}

impl RecordingClient {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicU32::new(0),
        })
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainClient for RecordingClient {
    async fn broadcast(&self, tx: &SignedTransaction) -> ChainResult<Receipt> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::FailNetwork => Err(ChainError::Network("connection reset".into())),
            Behavior::Reject => Err(ChainError::Rejected {
                code: 3050003,
                name: "eosio_assert_message_exception".into(),
                message: "assertion failure with message: No template with this id exists".into(),
            }),
            _ => Ok(Receipt {
                transaction_id: format!("tx-{}", tx.packed_trx),
                processed: serde_json::json!({"receipt": {"status": "executed"}}),
            }),
        }
    }

    async fn chain_info(&self) -> ChainResult<ChainInfo> {
        Ok(ChainInfo {
            chain_id: "1064487b3cd1a897ce03ae5b6a865651747e2e152090f99c1d19d44e01aea5a4".into(),
            head_block_num: 100,
            last_irreversible_block_num: 90,
            head_block_id: String::new(),
            head_block_time: String::new(),
            server_version_string: None,
        })
    }
}

/// A dispatcher for `mywallet1234@active` wired to the given mocks.
pub fn dispatcher(signer: Arc<RecordingSigner>, client: Arc<RecordingClient>) -> Dispatcher {
    let identity = Identity::new("mywallet1234", None).unwrap();
    Dispatcher::new(identity, DispatchWindow::default(), signer, client)
}

/// A canned HTTP response for the mock backend.
#[derive(Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

/// Start a mock chain API that answers each connection with the next
/// response in `responses` (the last one repeats) and records request bodies.
pub async fn start_mock_backend(responses: Vec<MockResponse>) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();

    tokio::spawn(async move {
        let mut served = 0usize;
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let response = responses[served.min(responses.len() - 1)].clone();
            served += 1;

            let raw = read_request(&mut socket).await;
            seen.lock().unwrap().push(raw);

            let status_text = match response.status {
                200 => "200 OK",
                202 => "202 Accepted",
                500 => "500 Internal Server Error",
                502 => "502 Bad Gateway",
                _ => "200 OK",
            };
            let reply = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_text,
                response.body.len(),
                response.body
            );
            let _ = socket.write_all(reply.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (addr, requests)
}

/// Read one HTTP request (headers + Content-Length body) as text.
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
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
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
