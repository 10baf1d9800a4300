//! Decides whether a message body belongs in a dump.

use std::borrow::Cow;

use http::header::{HeaderMap, CONTENT_TYPE};

const DUMPABLE_PREFIXES: &[&str] = &["text/", "application/json", "application/xml"];

/// True for textual content types whose bodies are worth reading in a dump.
pub fn should_dump_body(content_type: &str) -> bool {
    DUMPABLE_PREFIXES
        .iter()
        .any(|prefix| content_type.starts_with(prefix))
}

/// The declared content type of a message.
///
/// When the header is repeated the last value wins. Non-UTF-8 bytes are
/// replaced rather than hiding the whole value.
pub fn declared_content_type(headers: &HeaderMap) -> Option<Cow<'_, str>> {
    headers
        .get_all(CONTENT_TYPE)
        .iter()
        .last()
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
}

pub fn body_included(headers: &HeaderMap) -> bool {
    declared_content_type(headers).is_some_and(|content_type| should_dump_body(&content_type))
}
