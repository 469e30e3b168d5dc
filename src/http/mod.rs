//! The HTTP/1.1 subset spoken on the wire.
//!
//! This is not a general HTTP stack. It frames `Content-Length` delimited
//! requests (no chunked encoding, no `Expect`, no trailers), answers each
//! connection exactly once, and then closes it.
//!
//! # Architecture
//!
//! - **`buffer`**: Per-connection append-only byte store
//! - **`parser`**: Stateless grammar checks for the start line and header lines
//! - **`framer`**: Cuts complete requests out of the buffered byte stream
//! - **`request`**: Parsed request types
//! - **`response`**: Status codes and the plain-text `Reply`
//! - **`writer`**: One-shot response sequencer, plus the raw 400 path
//! - **`connection`**: Per-connection state machine tying the above together
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Feed socket bytes to the framer
//!        └──────┬──────┘
//!               │
//!      ┌────────┴──────────┐
//!      │ request           │ framing error
//!      ▼                   ▼
//! ┌─────────────┐   ┌─────────────┐
//! │ Dispatching │   │  Rejecting  │ ← Raw 400
//! └──────┬──────┘   └──────┬──────┘
//!        │ response sent   │
//!        └────────┬────────┘
//!                 ▼
//!          ┌─────────────┐
//!          │   Closed    │
//!          └─────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use htcpcp::config::Config;
//! use htcpcp::http::connection::Connection;
//! use htcpcp::pot::{BrewHandler, PotRegistry};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cfg = Config::default();
//!     let handler = Arc::new(BrewHandler::new(PotRegistry::from_config(&cfg.pots)?));
//!     let listener = TcpListener::bind("127.0.0.1:8000").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let mut conn = Connection::new(socket, handler.clone(), &cfg.server);
//!         tokio::spawn(async move {
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod buffer;
pub mod connection;
pub mod framer;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
