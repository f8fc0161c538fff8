//! Transport-ready request descriptors.

use serde_json::Value;

/// HTTP methods used by the Twenty REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// A transport-ready request: method, path under the API base URL, query
/// parameters in emission order, and an optional JSON body.
///
/// Descriptors are plain values. Pagination never mutates one in place; each
/// page derives a fresh descriptor via [`RequestDescriptor::with_after_cursor`].
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Patch,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Returns a copy of this request with the `after` cursor replaced.
    /// Every other parameter (including `first`) is carried over unchanged.
    pub fn with_after_cursor(&self, cursor: &str) -> Self {
        let mut next = self.clone();
        next.query.retain(|(name, _)| name != "after");
        next.query.push(("after".to_string(), cursor.to_string()));
        next
    }
}
