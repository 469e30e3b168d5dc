use htcpcp::http::parser::{
    has_control, is_http_version, is_request_uri, is_token, parse_header_fold,
    parse_header_start, parse_request_line, FrameError,
};
use htcpcp::http::request::Method;

#[test]
fn test_parse_brew_request_line() {
    let line = parse_request_line("BREW /pot-1 HTTP/1.1").unwrap();

    assert_eq!(line.method, Method::BREW);
    assert_eq!(line.request_uri, "/pot-1");
    assert_eq!(line.http_version, "HTTP/1.1");
}

#[test]
fn test_parse_request_line_strips_line_ending() {
    let line = parse_request_line("POST /pot-0 HTTP/1.0\r\n").unwrap();
    assert_eq!(line.method, Method::POST);
    assert_eq!(line.http_version, "HTTP/1.0");
}

#[test]
fn test_parse_request_line_extension_method() {
    let line = parse_request_line("WHEN /pot-0 HTTP/1.1").unwrap();
    assert_eq!(line.method, Method::Extension("WHEN".to_string()));
}

#[test]
fn test_parse_request_line_absolute_uri_and_asterisk() {
    let line = parse_request_line("BREW coffee://pot-0/ HTTP/1.1").unwrap();
    assert_eq!(line.request_uri, "coffee://pot-0/");

    let line = parse_request_line("OPTIONS * HTTP/1.1").unwrap();
    assert_eq!(line.request_uri, "*");
}

#[test]
fn test_parse_request_line_two_parts() {
    let err = parse_request_line("BREW /pot-1").unwrap_err();
    assert!(matches!(err, FrameError::MalformedStartLine(_)));
}

#[test]
fn test_parse_request_line_double_space() {
    let err = parse_request_line("BREW  /pot-1 HTTP/1.1").unwrap_err();
    assert!(matches!(err, FrameError::MalformedStartLine(_)));
}

#[test]
fn test_parse_request_line_bad_parts() {
    for line in [
        "BR(EW /pot-1 HTTP/1.1",
        "BREW pot-1 HTTP/1.1",
        "BREW /pot-1 HTTP/1",
        "BREW /pot-1 http/1.1",
        "BREW /pot-1 HTTP/x.1",
    ] {
        let result = parse_request_line(line);
        assert!(
            matches!(result, Err(FrameError::MalformedStartLine(_))),
            "{line:?} should be rejected"
        );
    }
}

#[test]
fn test_is_token() {
    assert!(is_token("content-type"));
    assert!(is_token("X_Custom.1~"));
    assert!(!is_token(""));
    for c in "()<>@,;:\\\"/[]?={} \t".chars() {
        assert!(!is_token(&format!("a{c}b")), "{c:?} is a delimiter");
    }
    assert!(!is_token("a\x01b"));
    assert!(!is_token("t\u{e9}a"));
}

#[test]
fn test_has_control() {
    assert!(!has_control("plain text, with punctuation!"));
    assert!(has_control("nul\0"));
    assert!(has_control("tab\there"));
    assert!(has_control("del\x7f"));
    assert!(!has_control("caf\u{e9}"));
}

#[test]
fn test_is_http_version() {
    assert!(is_http_version("HTTP/1.1"));
    assert!(is_http_version("HTTP/10.23"));
    assert!(!is_http_version("HTTP/1."));
    assert!(!is_http_version("HTTP/.1"));
    assert!(!is_http_version("HTCPCP/1.0"));
}

#[test]
fn test_is_request_uri() {
    assert!(is_request_uri("*"));
    assert!(is_request_uri("/"));
    assert!(is_request_uri("/pot-0?milk=yes"));
    assert!(is_request_uri("http://example.com/pot-0"));
    assert!(!is_request_uri("pot-0"));
    assert!(!is_request_uri(""));
}

#[test]
fn test_parse_header_start() {
    let (name, value) = parse_header_start("Content-Type: message/teapot").unwrap();
    assert_eq!(name, "content-type");
    assert_eq!(value, "message/teapot");
}

#[test]
fn test_parse_header_start_empty_value() {
    let (name, value) = parse_header_start("X-Empty:").unwrap();
    assert_eq!(name, "x-empty");
    assert_eq!(value, "");
}

#[test]
fn test_parse_header_start_value_keeps_colons() {
    let (_, value) = parse_header_start("Referer: coffee://pot-0/").unwrap();
    assert_eq!(value, "coffee://pot-0/");
}

#[test]
fn test_parse_header_without_colon() {
    let err = parse_header_start("BrokenHeader").unwrap_err();
    assert!(matches!(err, FrameError::InvalidFieldName(_)));
}

#[test]
fn test_parse_header_invalid_name() {
    let err = parse_header_start("Bad Name: value").unwrap_err();
    assert_eq!(err, FrameError::InvalidFieldName("Bad Name".to_string()));
}

#[test]
fn test_parse_header_control_in_value() {
    let err = parse_header_start("X-Bad: a\x00b").unwrap_err();
    assert_eq!(err, FrameError::InvalidFieldValue);
}

#[test]
fn test_parse_header_fold() {
    assert_eq!(parse_header_fold("   cream,\t sugar  ").unwrap(), "cream, sugar");
    assert_eq!(parse_header_fold("\t").unwrap(), "");
    assert_eq!(
        parse_header_fold("  bad\x07").unwrap_err(),
        FrameError::InvalidFieldValue
    );
}
