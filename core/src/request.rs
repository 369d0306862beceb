//! Turns a base URL, a relative path and a typed payload into an `HttpRequest`.
//!
//! # Design
//! Every step that can fail runs before the transport is touched, so a bad
//! URL or an unserializable payload never produces network traffic. The path
//! join is textual (`base + path`) and the joined path is then cleaned, which
//! lets callers pass `/v1/users` or `v1//users` against a base with or without
//! a trailing slash.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};
use crate::http::{HttpMethod, HttpRequest};

/// Join `base` and `path`, parse the result, and clean its path component.
pub fn join_url(base: &str, path: &str) -> Result<String> {
    let raw = format!("{base}{path}");
    let mut url = Url::parse(&raw).map_err(|e| Error::InvalidUrl {
        url: raw.clone(),
        message: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidUrl {
            url: raw,
            message: "url has no hierarchical path".to_string(),
        });
    }
    let cleaned = clean_path(url.path());
    url.set_path(&cleaned);
    Ok(url.to_string())
}

/// Lexically clean a rooted path.
///
/// Repeated slashes collapse, `.` segments drop, `..` removes the previous
/// segment (never climbing above the root) and any trailing slash goes away.
/// An empty result is `/`.
pub fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Flatten a payload into query parameters.
///
/// The payload must serialize to a JSON object (or `null`, meaning no
/// parameters). Keys come back sorted so the same payload always yields the
/// same map.
pub fn query_map<P: Serialize + ?Sized>(payload: &P) -> Result<BTreeMap<String, String>> {
    match serde_json::to_value(payload)? {
        Value::Null => Ok(BTreeMap::new()),
        Value::Object(fields) => Ok(fields
            .into_iter()
            .map(|(key, value)| (key, render(&value)))
            .collect()),
        other => Err(Error::InvalidQuery(kind(&other).to_string())),
    }
}

/// Text form of a JSON value as it should appear in a query string.
fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Build a request for `method` without applying any options.
///
/// POST carries the payload as a JSON body; GET and DELETE carry it as query
/// parameters.
pub fn build<P: Serialize + ?Sized>(
    method: HttpMethod,
    base: &str,
    path: &str,
    payload: &P,
) -> Result<HttpRequest> {
    let url = join_url(base, path)?;
    let mut request = HttpRequest::new(method, url);
    match method {
        HttpMethod::Post => {
            request.body = Some(serde_json::to_string(payload)?);
            request.set_header("content-type", "application/json");
        }
        HttpMethod::Get | HttpMethod::Delete => {
            request.query = query_map(payload)?.into_iter().collect();
        }
    }
    Ok(request)
}
