use crate::http::buffer::RecvBuffer;
use crate::http::parser::{
    is_fold, parse_header_fold, parse_header_start, parse_request_line, FrameError,
};
use crate::http::request::{HeaderMap, Request, RequestLine};

/// Upper bound on a request head when none is configured.
pub const DEFAULT_MAX_HEADER_BYTES: usize = 64 * 1024;

/// Upper bound on a declared `content-length` when none is configured.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Cuts complete requests out of one connection's byte stream.
///
/// Bytes go in through [`Framer::append`]; requests come out of
/// [`Framer::next_request`] until it returns `Ok(None)`, meaning more bytes
/// are needed. Nothing but the raw buffer survives between attempts, so a
/// request whose body is still arriving has its head parsed again on the
/// next call.
///
/// ```
/// # use htcpcp::http::framer::Framer;
/// let mut framer = Framer::new();
/// framer.append(b"BREW /pot-1 HTTP/1.1\r\nContent-Len");
/// assert!(framer.next_request().unwrap().is_none());
///
/// framer.append(b"gth: 5\r\n\r\nstart");
/// let req = framer.next_request().unwrap().unwrap();
/// assert_eq!(&req.body[..], b"start");
/// ```
#[derive(Debug)]
pub struct Framer {
    buffer: RecvBuffer,
    max_header_bytes: usize,
    max_body_bytes: usize,
}

impl Framer {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_HEADER_BYTES, DEFAULT_MAX_BODY_BYTES)
    }

    /// A framer that rejects heads longer than `max_header_bytes` and any
    /// declared body longer than `max_body_bytes`.
    pub fn with_limits(max_header_bytes: usize, max_body_bytes: usize) -> Self {
        Self {
            buffer: RecvBuffer::new(),
            max_header_bytes,
            max_body_bytes,
        }
    }

    pub fn append(&mut self, chunk: &[u8]) {
        self.buffer.append(chunk);
    }

    /// Number of bytes waiting to be framed.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Frames the next complete request, if the buffer holds one.
    pub fn next_request(&mut self) -> Result<Option<Request>, FrameError> {
        let buf = self.buffer.peek();

        let Some(head_end) = find_headers_end(buf) else {
            if buf.len() > self.max_header_bytes {
                return Err(FrameError::HeaderTooLarge(self.max_header_bytes));
            }
            return Ok(None);
        };

        let (line, headers) = parse_head(&buf[..head_end])?;
        let content_length = content_length(&headers)?;
        if content_length > self.max_body_bytes {
            return Err(FrameError::BodyTooLarge(self.max_body_bytes));
        }

        let body_start = head_end + HEADER_TERMINATOR.len();
        let total = body_start
            .checked_add(content_length)
            .ok_or_else(|| FrameError::InvalidContentLength(content_length.to_string()))?;
        if buf.len() < total {
            tracing::trace!(
                buffered = buf.len(),
                needed = total,
                "Waiting for the rest of the body"
            );
            return Ok(None);
        }

        let mut message = self.buffer.consume_prefix(total);
        let body = message.split_off(body_start);

        tracing::debug!(
            method = %line.method,
            uri = %line.request_uri,
            body_len = body.len(),
            remaining = self.buffer.len(),
            "Framed request"
        );

        Ok(Some(Request {
            line,
            headers,
            body,
        }))
    }

    /// Appends `chunk` and returns every request that is now complete, in
    /// arrival order.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<Request>, FrameError> {
        self.append(chunk);

        let mut requests = Vec::new();
        while let Some(request) = self.next_request()? {
            requests.push(request);
        }
        Ok(requests)
    }
}

impl Default for Framer {
    fn default() -> Self {
        Self::new()
    }
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_TERMINATOR.len())
        .position(|w| w == HEADER_TERMINATOR)
}

/// Parses the start line and header block (terminator excluded).
fn parse_head(head: &[u8]) -> Result<(RequestLine, HeaderMap), FrameError> {
    let text = String::from_utf8_lossy(head);
    let mut lines = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));

    let request_line = parse_request_line(lines.next().unwrap_or_default())?;

    // Kept in order so a fold can reach the header right before it.
    let mut fields: Vec<(String, String)> = Vec::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }

        if is_fold(line) {
            let (_, value) = fields.last_mut().ok_or(FrameError::UnexpectedFold)?;
            let continuation = parse_header_fold(line)?;
            if !continuation.is_empty() {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(&continuation);
            }
        } else {
            fields.push(parse_header_start(line)?);
        }
    }

    // Later duplicates win.
    let headers = fields.into_iter().collect();
    Ok((request_line, headers))
}

fn content_length(headers: &HeaderMap) -> Result<usize, FrameError> {
    let Some(value) = headers.get("content-length") else {
        return Ok(0);
    };

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FrameError::InvalidContentLength(value.clone()));
    }
    value
        .parse::<usize>()
        .map_err(|_| FrameError::InvalidContentLength(value.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_simple_brew() {
        let mut framer = Framer::new();
        let reqs = framer
            .feed(b"BREW /pot-1 HTTP/1.1\r\nContent-Length: 5\r\n\r\nstart")
            .unwrap();

        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].line.request_uri, "/pot-1");
        assert_eq!(&reqs[0].body[..], b"start");
        assert_eq!(framer.buffered(), 0);
    }

    #[test]
    fn oversized_head_is_rejected() {
        let mut framer = Framer::with_limits(16, DEFAULT_MAX_BODY_BYTES);
        let err = framer
            .feed(b"GET / HTTP/1.1\r\nX-Long: aaaaaaaaaaaaaaaa")
            .unwrap_err();
        assert_eq!(err, FrameError::HeaderTooLarge(16));
    }

    #[test]
    fn huge_content_length_does_not_overflow() {
        let mut framer = Framer::with_limits(DEFAULT_MAX_HEADER_BYTES, usize::MAX);
        let err = framer
            .feed(b"BREW /pot-1 HTTP/1.1\r\nContent-Length: 18446744073709551615\r\n\r\nstart")
            .unwrap_err();
        assert!(matches!(err, FrameError::InvalidContentLength(_)));
    }
}
