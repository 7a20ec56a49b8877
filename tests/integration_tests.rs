//! Integration tests for tokio_mimetype

use std::io::{self, Write};
use tokio::io::BufReader;
use tokio_mimetype::*;

const WEB_TYPES: &str = "\
# Web types
type=text/html; exts=htm,html
text/plain txt
type=\"text/css; charset=utf-8\" \\
    exts=css
image/svg+xml svg svgz
";

#[test]
fn test_type_map_from_text() {
    let mut map = TypeMap::new();
    map.parse_str(WEB_TYPES).unwrap();

    assert_eq!(map.len(), 6);
    assert_eq!(map.mime_type_string("htm").as_deref(), Some("text/html"));
    assert_eq!(map.mime_type_string("html").as_deref(), Some("text/html"));
    assert_eq!(map.mime_type_string("txt").as_deref(), Some("text/plain"));
    assert_eq!(map.mime_type_string("svgz").as_deref(), Some("image/svg+xml"));
    assert_eq!(map.mime_type("css").unwrap().parameter("charset"), Some("utf-8"));
    assert_eq!(map.mime_type_string("nope"), None);
}

#[test]
fn test_media_type_round_trip() {
    let original = "Multipart/Form-Data; Boundary=\"--a b--\"; charset=utf-8";
    let media_type: MediaType = original.parse().unwrap();
    assert_eq!(media_type.base_type(), "multipart/form-data");
    assert_eq!(media_type.parameter("boundary"), Some("--a b--"));

    let formatted = media_type.to_string();
    assert_eq!(formatted, "multipart/form-data; boundary=\"--a b--\"; charset=utf-8");

    let reparsed: MediaType = formatted.parse().unwrap();
    assert_eq!(reparsed, media_type);
}

#[test]
fn test_wildcard_matching_against_type_map() {
    let mut map = TypeMap::new();
    map.parse_str(WEB_TYPES).unwrap();

    let any_text: MediaType = "text/*".parse().unwrap();
    let text_exts: Vec<&str> = map
        .iter()
        .filter(|(_, mt)| any_text.matches(mt))
        .map(|(ext, _)| ext)
        .collect();
    assert_eq!(text_exts, ["htm", "html", "txt", "css"]);
}

#[test]
fn test_malformed_input_rejected() {
    assert!(matches!(
        MediaType::with_extension("noslash", "x"),
        Err(Error::MissingSubType(_))
    ));
    assert!(matches!(
        "; name novalue".parse::<ParameterList>(),
        Err(Error::MissingSeparator(_))
    ));
    assert!(matches!(
        "; name=\"never closed".parse::<ParameterList>(),
        Err(Error::UnterminatedQuote(_))
    ));
}

#[tokio::test]
async fn test_load_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(WEB_TYPES.as_bytes()).unwrap();
    file.flush().unwrap();

    let mut map = TypeMap::new();
    map.load(file.path()).await.unwrap();
    assert_eq!(map.len(), 6);
    assert_eq!(map.mime_type_string("css").as_deref(), Some("text/css"));
}

#[tokio::test]
async fn test_load_crlf_file_with_continuation() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"text/plain \\\r\ntxt\r\n# done\r\n").unwrap();
    file.flush().unwrap();

    let mut map = TypeMap::new();
    map.load(file.path()).await.unwrap();
    assert_eq!(map.mime_type_string("txt").as_deref(), Some("text/plain"));
}

#[tokio::test]
async fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut map = TypeMap::new();
    let err = map.load(dir.path().join("absent.types")).await.unwrap_err();
    assert!(matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::NotFound));
    assert!(map.is_empty());
}

#[tokio::test]
async fn test_load_reader_reports_bad_line() {
    let data = "text/plain txt\nbogus ext\n";
    let mut map = TypeMap::new();
    let err = map.load_reader(BufReader::new(data.as_bytes())).await.unwrap_err();
    assert!(matches!(err, Error::Entry { line: 2, .. }));
    assert!(err.is_syntax());
    assert!(map.has_mime_type("txt"));
}

#[tokio::test]
async fn test_load_stream_across_chunk_boundaries() {
    let chunks: Vec<io::Result<bytes::Bytes>> = vec![
        Ok(bytes::Bytes::from_static(b"type=appli")),
        Ok(bytes::Bytes::from_static(b"cation/json exts=js")),
        Ok(bytes::Bytes::from_static(b"on\nimage/gif gif")),
    ];

    let mut map = TypeMap::new();
    map.load_stream(futures::stream::iter(chunks)).await.unwrap();
    assert_eq!(map.mime_type_string("json").as_deref(), Some("application/json"));
    assert_eq!(map.mime_type_string("gif").as_deref(), Some("image/gif"));
}

#[tokio::test]
async fn test_load_stream_error_is_surfaced() {
    let chunks: Vec<io::Result<bytes::Bytes>> = vec![
        Ok(bytes::Bytes::from_static(b"text/plain txt\n")),
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
    ];

    let mut map = TypeMap::new();
    let err = map.load_stream(futures::stream::iter(chunks)).await.unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(map.has_mime_type("txt"));
}

#[tokio::test]
async fn test_spawn_load_completion() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"text/markdown md markdown\n").unwrap();
    file.flush().unwrap();

    let map = TypeMap::spawn_load(file.path()).await.unwrap().unwrap();
    assert_eq!(map.mime_type_string("markdown").as_deref(), Some("text/markdown"));

    let missing = TypeMap::spawn_load("/nonexistent/dir/mime.types").await.unwrap();
    assert!(matches!(missing, Err(Error::Io(_))));
}

#[tokio::test]
async fn test_repeated_loads_overwrite() {
    let mut map = TypeMap::new();
    map.load_reader(BufReader::new(&b"text/plain log"[..])).await.unwrap();
    map.load_reader(BufReader::new(&b"text/x-log log"[..])).await.unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.mime_type_string("log").as_deref(), Some("text/x-log"));
}

#[test]
fn test_shared_instance() {
    let mut local = TypeMap::new();
    local.parse_str("application/x-integration itest").unwrap();
    shared().write().unwrap().merge(local);

    assert!(std::ptr::eq(shared(), shared()));
    assert_eq!(
        shared().read().unwrap().mime_type_string("itest").as_deref(),
        Some("application/x-integration")
    );
}

#[test]
fn test_tokenizer_lookahead() {
    let mut tokens = LineTokenizer::new("exts = a,b");
    let name = tokens.next_token().unwrap();
    let peeked = tokens.next_token().unwrap();
    assert_eq!(peeked, "=");
    tokens.push_token(peeked);
    assert_eq!(name, "exts");
    assert_eq!(tokens.next_token().unwrap(), "=");
    assert_eq!(tokens.next_token().unwrap(), "a,b");
}
