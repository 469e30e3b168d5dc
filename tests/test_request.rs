use htcpcp::http::request::{HeaderMap, Method, Request, RequestBuilder, RequestLine};

fn request_with_headers(headers: HeaderMap) -> Request {
    Request {
        line: RequestLine {
            method: Method::BREW,
            request_uri: "/pot-0".to_string(),
            http_version: "HTTP/1.1".to_string(),
        },
        headers,
        body: Default::default(),
    }
}

#[test]
fn test_request_header_retrieval_ignores_case() {
    let mut headers = HeaderMap::new();
    headers.insert("content-type".to_string(), "message/coffeepot".to_string());

    let req = request_with_headers(headers);

    assert_eq!(req.header("Content-Type"), Some("message/coffeepot"));
    assert_eq!(req.header("CONTENT-TYPE"), Some("message/coffeepot"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_accept_additions_split() {
    let mut headers = HeaderMap::new();
    headers.insert("accept-additions".to_string(), "milk, sugar,  Rum ,".to_string());

    let req = request_with_headers(headers);
    assert_eq!(req.accept_additions(), ["milk", "sugar", "Rum "]);
}

#[test]
fn test_accept_additions_missing() {
    let req = request_with_headers(HeaderMap::new());
    assert!(req.accept_additions().is_empty());
}

#[test]
fn test_body_text_is_trimmed() {
    let req = RequestBuilder::new()
        .method(Method::POST)
        .uri("/pot-0")
        .body(&b"\r\n stop \n"[..])
        .build()
        .unwrap();
    assert_eq!(req.body_text(), "stop");
}

#[test]
fn test_request_line_path() {
    let line = |uri: &str| RequestLine {
        method: Method::BREW,
        request_uri: uri.to_string(),
        http_version: "HTTP/1.1".to_string(),
    };

    assert_eq!(line("/pot-0").path().unwrap(), "/pot-0");
    assert_eq!(line("/pot-0?sugar=2#top").path().unwrap(), "/pot-0");
    assert_eq!(line("http://kitchen.local/pot-1").path().unwrap(), "/pot-1");
    assert!(line("*").path().is_err());
}

#[test]
fn test_method_tokens() {
    let methods = vec![
        ("GET", Method::GET),
        ("POST", Method::POST),
        ("BREW", Method::BREW),
        ("PUT", Method::PUT),
        ("DELETE", Method::DELETE),
        ("HEAD", Method::HEAD),
        ("OPTIONS", Method::OPTIONS),
        ("PATCH", Method::PATCH),
        ("PROPFIND", Method::Extension("PROPFIND".to_string())),
    ];

    for (token, expected) in methods {
        let method = Method::from_token(token);
        assert_eq!(method, expected);
        assert_eq!(method.as_str(), token);
    }
}

#[test]
fn test_brew_command_methods() {
    assert!(Method::BREW.is_brew_command());
    assert!(Method::POST.is_brew_command());
    assert!(!Method::GET.is_brew_command());
    assert!(!Method::Extension("brew".to_string()).is_brew_command());
}

#[test]
fn test_request_builder_defaults() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .uri("/")
        .header("X-Pot", "yes")
        .build()
        .unwrap();

    assert_eq!(req.line.http_version, "HTTP/1.1");
    assert_eq!(req.headers.get("x-pot").map(String::as_str), Some("yes"));
    assert!(req.body.is_empty());
}

#[test]
fn test_request_builder_requires_method_and_uri() {
    assert!(RequestBuilder::new().uri("/").build().is_err());
    assert!(RequestBuilder::new().method(Method::GET).build().is_err());
}
