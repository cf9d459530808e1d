//! Minimal request/response model used by the offline layer.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
}

/// What the requester intends to do with the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Destination {
    /// Top-level page navigation
    Document,
    Image,
    Font,
    Script,
    Style,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub destination: Destination,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            destination: Destination::Other,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    /// A page navigation to `url`.
    pub fn navigate(url: impl Into<String>) -> Self {
        Self::get(url).with_destination(Destination::Document)
    }

    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }

    pub fn is_navigation(&self) -> bool {
        self.destination == Destination::Document
    }

    /// Lower-cased scheme, if the URL has one.
    pub fn scheme(&self) -> Option<String> {
        self.url
            .split_once("://")
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
    }

    pub fn is_http(&self) -> bool {
        matches!(self.scheme().as_deref(), Some("http") | Some("https"))
    }

    /// Path component without query or fragment. Relative URLs are treated
    /// as paths.
    pub fn path(&self) -> &str {
        let rest = match self.url.split_once("://") {
            Some((_, rest)) => match rest.find('/') {
                Some(i) => &rest[i..],
                None => "/",
            },
            None => self.url.as_str(),
        };
        let end = rest.find(['?', '#']).unwrap_or(rest.len());
        &rest[..end]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    pub fn ok(content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, content_type, body)
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, "text/plain", body.into().into_bytes())
    }

    /// 2xx status.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_strips_origin_and_query() {
        let req = Request::get("https://app.example/js/app.js?v=3#top");
        assert_eq!(req.path(), "/js/app.js");
        assert_eq!(Request::get("https://app.example").path(), "/");
        assert_eq!(Request::get("/api/status").path(), "/api/status");
    }

    #[test]
    fn test_scheme() {
        assert!(Request::get("HTTPS://app.example/").is_http());
        assert!(!Request::get("chrome-extension://abc/x.js").is_http());
        assert!(!Request::get("data:image/png;base64,AAAA").is_http());
    }
}
