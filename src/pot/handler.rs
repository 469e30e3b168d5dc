//! Turns framed requests into pot operations and replies.

use anyhow::Context;
use tokio::io::AsyncWrite;

use crate::http::request::Request;
use crate::http::response::{Reply, StatusCode};
use crate::http::writer::{ResponseWriter, WriterError};
use crate::pot::registry::PotRegistry;
use crate::pot::state::{Brew, COFFEEPOT_MEDIA_TYPES, TEAPOT_MEDIA_TYPE};

/// Body for any request that is not a brew command.
pub const GREETING: &str = "Hello, HTCPCP!\n";

/// Body for a brew command with a missing or foreign `Content-Type`.
pub const UNSUPPORTED_MEDIA_TYPE_TEXT: &str = "The Content-Type header of a POST or BREW request sent to a\npot MUST be \"message/teapot\" or \"message/coffeepot\".\n";

/// A brew command carried in the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
}

impl Command {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "start" => Some(Command::Start),
            "stop" => Some(Command::Stop),
            _ => None,
        }
    }
}

fn is_brew_media_type(media_type: &str) -> bool {
    media_type == TEAPOT_MEDIA_TYPE || COFFEEPOT_MEDIA_TYPES.contains(&media_type)
}

/// Dispatches each framed request against the pot registry.
pub struct BrewHandler {
    registry: PotRegistry,
}

impl BrewHandler {
    pub fn new(registry: PotRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PotRegistry {
        &self.registry
    }

    /// Answers `request` through `writer`.
    ///
    /// Errors are writer misuse or I/O failures; every protocol-level
    /// problem has already been turned into a reply.
    pub async fn handle<W>(
        &self,
        request: &Request,
        writer: ResponseWriter<'_, W>,
    ) -> Result<(), WriterError>
    where
        W: AsyncWrite + Unpin,
    {
        let reply = self.reply(request).await;

        tracing::info!(
            method = %request.line.method,
            uri = %request.line.request_uri,
            status = reply.status.as_u16(),
            "Handled request"
        );

        reply.send(writer).await
    }

    /// Computes the reply without writing it.
    pub async fn reply(&self, request: &Request) -> Reply {
        if !request.method().is_brew_command() {
            return Reply::ok(GREETING);
        }

        match self.brew(request).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "Brew command failed");
                Reply::internal_error(format!("{e:#}"))
            }
        }
    }

    async fn brew(&self, request: &Request) -> anyhow::Result<Reply> {
        let Some(media_type) = request
            .header("content-type")
            .filter(|ct| is_brew_media_type(ct))
        else {
            return Ok(Reply::new(
                StatusCode::UnsupportedMediaType,
                UNSUPPORTED_MEDIA_TYPE_TEXT,
            ));
        };

        let path = request
            .line
            .path()
            .with_context(|| format!("Cannot resolve a path from {:?}", request.line.request_uri))?;

        let Some(pot) = self.registry.get(&path) else {
            return Ok(Reply::not_found(format!("Sorry, no pot found for {path}")));
        };

        let Some(command) = Command::parse(&request.body_text()) else {
            return Ok(Reply::new(StatusCode::UnprocessableEntity, "Invalid command"));
        };

        let mut pot = pot.lock().await;
        let outcome = match command {
            Command::Start => pot.start(media_type, request.accept_additions()),
            Command::Stop => pot.stop(media_type),
        };

        Ok(match outcome {
            Ok(message) => Reply::ok(message),
            Err(e) => Reply::new(e.status(), e.to_string()),
        })
    }
}
