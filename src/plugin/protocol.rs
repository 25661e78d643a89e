//! Request/response shapes for the plugin's HTTP API

use std::borrow::Cow;
use std::fmt;

use serde_json::{Map, Value};

/// Plugin API routes
pub mod routes {
    pub const STATUS: &str = "/status";
    pub const FIND: &str = "/find";
    pub const REFS: &str = "/refs";
    pub const SUPERTYPES: &str = "/supertypes";
    pub const SUBTYPES: &str = "/subtypes";
    pub const RENAME: &str = "/rename";
    pub const OVERVIEW: &str = "/overview";
    pub const REFRESH: &str = "/refresh";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// One outbound request. GET params travel as the query string, POST params
/// as a JSON object body.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginRequest {
    pub method: Method,
    pub path: &'static str,
    pub params: Map<String, Value>,
}

impl PluginRequest {
    pub fn get(path: &'static str) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: &'static str) -> Self {
        Self::new(Method::Post, path)
    }

    fn new(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            params: Map::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn param_opt<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Boolean flags are only sent when set
    pub fn flag(self, key: &str, enabled: bool) -> Self {
        if enabled { self.param(key, true) } else { self }
    }

    /// Params rendered as query pairs; strings go out without JSON quoting
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(k, v)| {
                let v = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), v)
            })
            .collect()
    }
}

impl fmt::Display for PluginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)?;
        if !self.params.is_empty() {
            write!(f, " {}", Value::Object(self.params.clone()))?;
        }
        Ok(())
    }
}

/// Raw reply from the plugin; the body is kept as the bytes received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl PluginResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body as text, for diagnostics
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
