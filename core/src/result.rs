//! The outcome of a single REST call.
//!
//! # Design
//! An `ApiResult` holds either a failure that happened before a response
//! existed, or the response itself. Success is strict: only status 200 counts.
//! The JSON envelope is parsed into a field map on first use of `value` or
//! `values` and cached for the life of the result; the cache sits in a
//! `OnceLock` so concurrent readers never parse twice or observe a torn map.

use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::http::HttpResponse;

#[derive(Debug)]
pub struct ApiResult {
    error: Option<Error>,
    response: Option<HttpResponse>,
    values: OnceLock<Option<Map<String, Value>>>,
}

impl ApiResult {
    pub fn from_response(response: HttpResponse) -> Self {
        Self {
            error: None,
            response: Some(response),
            values: OnceLock::new(),
        }
    }

    pub fn from_error(error: Error) -> Self {
        Self {
            error: Some(error),
            response: None,
            values: OnceLock::new(),
        }
    }

    /// True when no error occurred and the server answered exactly 200.
    pub fn ok(&self) -> bool {
        self.error.is_none() && self.response.as_ref().is_some_and(|r| r.status == 200)
    }

    pub fn fail(&self) -> bool {
        !self.ok()
    }

    /// Why the call failed, or `None` when it succeeded.
    pub fn error(&self) -> Option<Error> {
        if self.ok() {
            return None;
        }
        if let Some(err) = &self.error {
            return Some(err.clone());
        }
        self.response.as_ref().map(|resp| Error::Status {
            status_line: resp.status_line(),
            body: resp.body.clone(),
        })
    }

    /// The raw response, if one was received.
    pub fn response(&self) -> Option<&HttpResponse> {
        self.response.as_ref()
    }

    /// Top-level envelope fields.
    ///
    /// `None` when there is no response; empty when the body is not a JSON
    /// object.
    pub fn values(&self) -> Option<&Map<String, Value>> {
        self.values
            .get_or_init(|| self.response.as_ref().map(|r| extract(&r.body)))
            .as_ref()
    }

    /// Decode the top-level field `key` into `T`.
    pub fn value<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let field = self.values().and_then(|fields| fields.get(key));
        let Some(field) = field else {
            return Err(Error::UnknownField {
                key: key.to_string(),
                body: self.body().to_string(),
            });
        };
        T::deserialize(field).map_err(|e| Error::Decode {
            key: key.to_string(),
            message: e.to_string(),
            fragment: field.to_string(),
        })
    }

    /// Decode `key` into an existing target, leaving it untouched on error.
    pub fn value_into<T: DeserializeOwned>(&self, key: &str, target: &mut T) -> Result<()> {
        *target = self.value(key)?;
        Ok(())
    }

    /// The envelope's numeric `code`, if present.
    pub fn code(&self) -> Option<i64> {
        self.values()?.get("code")?.as_i64()
    }

    /// The envelope's `msg`, if present.
    pub fn msg(&self) -> Option<&str> {
        self.values()?.get("msg")?.as_str()
    }

    fn body(&self) -> &str {
        self.response.as_ref().map_or("", |r| r.body.as_str())
    }
}

fn extract(body: &str) -> Map<String, Value> {
    match serde_json::from_str(body) {
        Ok(Value::Object(fields)) => fields,
        _ => Map::new(),
    }
}
