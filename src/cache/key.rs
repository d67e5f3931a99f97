use axum::http::{header, HeaderMap};
use url::Url;

/// Cache partition for one upstream resource as seen by one session.
///
/// Responses may be session-specific, so every inbound `Cookie` field is part
/// of the key alongside the resolved upstream URL. Cookie bytes are kept raw;
/// header values may carry obs-text that is not UTF-8.
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub struct CacheKey {
    pub url: String,
    pub cookie: Vec<u8>,
}

impl CacheKey {
    pub fn new(url: &Url, headers: &HeaderMap) -> Self {
        // Split fields (HTTP/2 sends one per cookie) join back the way a
        // single HTTP/1 header would carry them.
        let mut cookie = Vec::new();
        for value in headers.get_all(header::COOKIE) {
            if !cookie.is_empty() {
                cookie.extend_from_slice(b"; ");
            }
            cookie.extend_from_slice(value.as_bytes());
        }

        Self {
            url: url.as_str().to_string(),
            cookie,
        }
    }
}
