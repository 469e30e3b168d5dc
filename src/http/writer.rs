use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::parser::{has_control, is_token};
use crate::http::response::StatusCode;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Where a [`ResponseWriter`] is in its one-way trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    StatusLine,
    Headers,
    Body,
    Ended,
}

#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    #[error("cannot {action} in state {state:?}")]
    Sequence {
        action: &'static str,
        state: WriterState,
    },

    #[error("invalid status code {0}")]
    InvalidStatusCode(u16),

    #[error("reason phrase contains CR or LF")]
    InvalidReasonPhrase,

    #[error("invalid field name {0:?}")]
    InvalidFieldName(String),

    #[error("invalid value for field {0:?}")]
    InvalidFieldValue(String),

    #[error("content-length header is required")]
    MissingContentLength,

    #[error("body is {actual} bytes but content-length is {declared:?}")]
    BodyLengthMismatch { declared: String, actual: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Serializes one response onto a connection.
///
/// Calls must come in the order status line, headers, body; header fields
/// may be set any time before the header block is written. Anything else
/// fails with [`WriterError::Sequence`]. Writing the body closes the write
/// side of the stream, so a writer is good for exactly one response.
pub struct ResponseWriter<'a, W> {
    stream: &'a mut W,
    headers: Vec<(String, String)>,
    state: WriterState,
}

impl<'a, W> ResponseWriter<'a, W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(stream: &'a mut W) -> Self {
        Self {
            stream,
            headers: Vec::new(),
            state: WriterState::StatusLine,
        }
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    fn expect_state(&self, expected: WriterState, action: &'static str) -> Result<(), WriterError> {
        if self.state != expected {
            return Err(WriterError::Sequence {
                action,
                state: self.state,
            });
        }
        Ok(())
    }

    /// Writes `HTTP/1.1 <code> <reason>`.
    ///
    /// Without an explicit reason the standard phrase is used, or `unknown`
    /// for codes without one.
    pub async fn write_status_line(
        &mut self,
        code: u16,
        reason: Option<&str>,
    ) -> Result<(), WriterError> {
        self.expect_state(WriterState::StatusLine, "write status line")?;

        if !(100..=999).contains(&code) {
            return Err(WriterError::InvalidStatusCode(code));
        }
        if reason.is_some_and(|r| r.contains(['\r', '\n'])) {
            return Err(WriterError::InvalidReasonPhrase);
        }

        let reason = reason
            .filter(|r| !r.is_empty())
            .or_else(|| StatusCode::from_u16(code).map(|s| s.reason_phrase()))
            .unwrap_or("unknown");

        let line = format!("{HTTP_VERSION} {code} {reason}\r\n");
        self.stream.write_all(line.as_bytes()).await?;
        self.state = WriterState::Headers;
        Ok(())
    }

    /// Sets a header field, replacing any earlier value for the same name.
    pub fn set_header(&mut self, name: &str, value: &str) -> Result<(), WriterError> {
        if !matches!(self.state, WriterState::StatusLine | WriterState::Headers) {
            return Err(WriterError::Sequence {
                action: "set header",
                state: self.state,
            });
        }
        if !is_token(name) {
            return Err(WriterError::InvalidFieldName(name.to_string()));
        }
        if has_control(value) {
            return Err(WriterError::InvalidFieldValue(name.to_string()));
        }

        let name = name.to_ascii_lowercase();
        match self.headers.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.headers.push((name, value.to_string())),
        }
        Ok(())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Writes every header field and the blank line after them.
    pub async fn write_headers(&mut self) -> Result<(), WriterError> {
        self.expect_state(WriterState::Headers, "write headers")?;

        if self.header("content-length").is_none_or(str::is_empty) {
            return Err(WriterError::MissingContentLength);
        }

        let mut buf = Vec::new();
        for (name, value) in &self.headers {
            buf.extend_from_slice(name.as_bytes());
            buf.extend_from_slice(b": ");
            buf.extend_from_slice(value.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }
        buf.extend_from_slice(b"\r\n");

        self.stream.write_all(&buf).await?;
        self.state = WriterState::Body;
        Ok(())
    }

    /// Writes the whole body and shuts down the write side.
    ///
    /// `payload` must be exactly as long as the declared `content-length`.
    pub async fn write_body_end(&mut self, payload: &[u8]) -> Result<(), WriterError> {
        self.expect_state(WriterState::Body, "write body")?;

        let declared = self.header("content-length").unwrap_or_default();
        if declared.parse::<usize>().ok() != Some(payload.len()) {
            return Err(WriterError::BodyLengthMismatch {
                declared: declared.to_string(),
                actual: payload.len(),
            });
        }

        self.stream.write_all(payload).await?;
        self.stream.shutdown().await?;
        self.state = WriterState::Ended;
        Ok(())
    }
}

/// Answers a framing failure with `400 Bad Request` and closes.
///
/// Bypasses [`ResponseWriter`]: the head could not be parsed, so there is
/// no request to bind one to.
pub async fn write_raw_bad_request<W>(stream: &mut W, message: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let body = format!("{message}\n");
    let head = format!(
        "{HTTP_VERSION} 400 Bad Request\r\nconnection: close\r\ncontent-type: text/plain\r\ncontent-length: {}\r\n\r\n",
        body.len()
    );

    stream.write_all(head.as_bytes()).await?;
    stream.write_all(body.as_bytes()).await?;
    stream.shutdown().await
}
