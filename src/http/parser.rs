//! Grammar checks for the request head.
//!
//! Everything here is stateless: one line in, a validated value or a
//! [`FrameError`] out. The [`framer`](crate::http::framer) decides which
//! function a line goes to.

use crate::http::request::{Method, RequestLine};

/// Characters that may not appear in a token, besides controls.
const DELIMITERS: &[char] = &[
    '(', ')', '<', '>', '@', ',', ';', ':', '\\', '"', '/', '[', ']', '?', '=', '{', '}', ' ',
    '\t',
];

/// Failures that make a connection's byte stream unusable.
///
/// All of them are answered with a raw `400 Bad Request` and the connection
/// is closed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("malformed start line: {0}")]
    MalformedStartLine(&'static str),

    #[error("invalid field name {0:?}")]
    InvalidFieldName(String),

    #[error("invalid field value")]
    InvalidFieldValue,

    #[error("invalid content-length {0:?}")]
    InvalidContentLength(String),

    #[error("unexpected fold in headers")]
    UnexpectedFold,

    #[error("request head exceeds {0} bytes")]
    HeaderTooLarge(usize),

    #[error("request body exceeds {0} bytes")]
    BodyTooLarge(usize),
}

/// True for 0x00-0x1F and 0x7F.
fn is_control(c: char) -> bool {
    matches!(c, '\0'..='\x1f' | '\x7f')
}

pub fn has_control(s: &str) -> bool {
    s.chars().any(is_control)
}

/// A non-empty 7-bit string without controls or delimiters.
pub fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii() && !is_control(c) && !DELIMITERS.contains(&c))
}

/// `*`, an absolute path, or an absolute URI.
pub fn is_request_uri(s: &str) -> bool {
    if s == "*" {
        return true;
    }
    if s.starts_with('/') {
        return url::Url::parse(&format!("coffee:{s}")).is_ok();
    }
    url::Url::parse(s).is_ok()
}

/// `HTTP/<digits>.<digits>`
pub fn is_http_version(s: &str) -> bool {
    let Some(rest) = s.strip_prefix("HTTP/") else {
        return false;
    };
    let Some((major, minor)) = rest.split_once('.') else {
        return false;
    };
    let digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    digits(major) && digits(minor)
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Replaces every run of spaces and tabs with one space and trims both ends.
fn collapse_lws(s: &str) -> String {
    s.split([' ', '\t'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses `METHOD request-uri HTTP/x.y`.
pub fn parse_request_line(line: &str) -> Result<RequestLine, FrameError> {
    let line = strip_line_ending(line);
    let parts: Vec<&str> = line.split(' ').collect();
    let [method, request_uri, http_version] = parts.as_slice() else {
        return Err(FrameError::MalformedStartLine("expected three parts"));
    };

    if !is_token(method) {
        return Err(FrameError::MalformedStartLine("invalid method"));
    }
    if !is_request_uri(request_uri) {
        return Err(FrameError::MalformedStartLine("invalid request uri"));
    }
    if !is_http_version(http_version) {
        return Err(FrameError::MalformedStartLine("invalid http version"));
    }

    Ok(RequestLine {
        method: Method::from_token(method),
        request_uri: request_uri.to_string(),
        http_version: http_version.to_string(),
    })
}

/// Parses `name: value` into a lowercased name and a normalized value.
pub fn parse_header_start(line: &str) -> Result<(String, String), FrameError> {
    let line = strip_line_ending(line);
    let Some((name, value)) = line.split_once(':') else {
        return Err(FrameError::InvalidFieldName(line.to_string()));
    };

    if !is_token(name) {
        return Err(FrameError::InvalidFieldName(name.to_string()));
    }

    let value = collapse_lws(value);
    if has_control(&value) {
        return Err(FrameError::InvalidFieldValue);
    }

    Ok((name.to_ascii_lowercase(), value))
}

/// Parses a continuation line, returning its normalized content.
///
/// The caller joins the result onto the previous header's value.
pub fn parse_header_fold(line: &str) -> Result<String, FrameError> {
    let value = collapse_lws(strip_line_ending(line));
    if has_control(&value) {
        return Err(FrameError::InvalidFieldValue);
    }
    Ok(value)
}

/// Whether a header line continues the previous one.
pub fn is_fold(line: &str) -> bool {
    line.starts_with([' ', '\t'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_rules() {
        assert!(is_token("BREW"));
        assert!(is_token("Accept-Additions"));
        assert!(!is_token(""));
        assert!(!is_token("a b"));
        assert!(!is_token("content:type"));
        assert!(!is_token("caf\u{e9}"));
        assert!(!is_token("x\x7f"));
    }

    #[test]
    fn value_whitespace_is_collapsed() {
        let (name, value) = parse_header_start("X-Milk:  \t whole \t  milk  ").unwrap();
        assert_eq!(name, "x-milk");
        assert_eq!(value, "whole milk");
    }
}
