//! htcpcp - a coffee and tea pot server
//!
//! Speaks a small HTTP/1.1 subset directly over TCP: requests are framed by
//! hand, `POST` and `BREW` commands drive registered pots, and every
//! connection is answered once and closed.

pub mod config;
pub mod http;
pub mod pot;
pub mod server;
