use tokio::io::AsyncWrite;

use crate::http::writer::{ResponseWriter, WriterError};

/// HTTP status codes known to the server.
///
/// The brew handler's statuses plus a few common ones. Any other code
/// written through [`ResponseWriter::write_status_line`] gets the reason
/// `unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 204 No Content
    NoContent,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 409 Conflict
    Conflict,
    /// 415 Unsupported Media Type
    UnsupportedMediaType,
    /// 418 I'm a Teapot
    ImATeapot,
    /// 422 Unprocessable Entity
    UnprocessableEntity,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    const ALL: [StatusCode; 10] = [
        StatusCode::Ok,
        StatusCode::NoContent,
        StatusCode::BadRequest,
        StatusCode::NotFound,
        StatusCode::MethodNotAllowed,
        StatusCode::Conflict,
        StatusCode::UnsupportedMediaType,
        StatusCode::ImATeapot,
        StatusCode::UnprocessableEntity,
        StatusCode::InternalServerError,
    ];

    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use htcpcp::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::ImATeapot.as_u16(), 418);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NoContent => 204,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::Conflict => 409,
            StatusCode::UnsupportedMediaType => 415,
            StatusCode::ImATeapot => 418,
            StatusCode::UnprocessableEntity => 422,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Looks up a known status by number.
    pub fn from_u16(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_u16() == code)
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use htcpcp::http::response::StatusCode;
    /// assert_eq!(StatusCode::Conflict.reason_phrase(), "Conflict");
    /// assert_eq!(StatusCode::ImATeapot.reason_phrase(), "I'm a Teapot");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NoContent => "No Content",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::Conflict => "Conflict",
            StatusCode::UnsupportedMediaType => "Unsupported Media Type",
            StatusCode::ImATeapot => "I'm a Teapot",
            StatusCode::UnprocessableEntity => "Unprocessable Entity",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// A plain-text answer to one request.
///
/// Every reply goes out the same way: `connection: close`,
/// `content-type: text/plain`, an exact `content-length`, and a body that
/// ends in a newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    /// Builds a reply, appending a trailing newline if `body` lacks one.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        let mut body = body.into();
        if !body.ends_with('\n') {
            body.push('\n');
        }
        Self { status, body }
    }

    /// Creates a 200 OK reply.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(StatusCode::Ok, body)
    }

    /// Creates a 404 Not Found reply.
    pub fn not_found(body: impl Into<String>) -> Self {
        Self::new(StatusCode::NotFound, body)
    }

    /// Creates a 500 Internal Server Error reply.
    pub fn internal_error(body: impl Into<String>) -> Self {
        Self::new(StatusCode::InternalServerError, body)
    }

    /// Walks `writer` through status line, headers and body.
    pub async fn send<W>(self, mut writer: ResponseWriter<'_, W>) -> Result<(), WriterError>
    where
        W: AsyncWrite + Unpin,
    {
        let payload = self.body.into_bytes();

        writer.write_status_line(self.status.as_u16(), None).await?;
        writer.set_header("connection", "close")?;
        writer.set_header("content-type", "text/plain")?;
        writer.set_header("content-length", &payload.len().to_string())?;
        writer.write_headers().await?;
        writer.write_body_end(&payload).await
    }
}
