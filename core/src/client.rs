//! Verb-level REST client over a pluggable transport.
//!
//! # Design
//! `RestClient` holds a base URL, an optional default `Auth`, an optional
//! user agent and a `Transport`, none of which change after construction, so a
//! client can be shared freely across threads. Each verb runs the same
//! pipeline: build the request, apply user agent, default auth and per-call
//! options in that order, send, and wrap the outcome in an `ApiResult`. A
//! failure while building returns early and the transport is never called.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::http::HttpMethod;
use crate::option::{apply_all, Auth, RequestMutator};
use crate::request;
use crate::result::ApiResult;
use crate::transport::{Transport, UreqTransport};

pub struct RestClient<T = UreqTransport> {
    base_url: String,
    auth: Option<Arc<dyn Auth>>,
    user_agent: Option<String>,
    transport: T,
}

impl RestClient<UreqTransport> {
    /// A client with a default `ureq` transport and no timeout.
    ///
    /// The base URL is not validated here; a malformed one makes every call
    /// fail locally.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_transport(base_url, UreqTransport::default())
    }

    pub fn from_config(config: ClientConfig) -> Self {
        let mut client = Self::with_transport(config.base_url, UreqTransport::new(config.timeout));
        client.user_agent = config.user_agent;
        client
    }
}

impl<T: Transport> RestClient<T> {
    pub fn with_transport(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            auth: None,
            user_agent: None,
            transport,
        }
    }

    /// Apply `auth` to every request before per-call options.
    pub fn with_auth(mut self, auth: impl Auth + 'static) -> Self {
        self.auth = Some(Arc::new(auth));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `payload` as a JSON body.
    pub fn post<P: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &P,
        options: &[&dyn RequestMutator],
    ) -> ApiResult {
        self.execute(HttpMethod::Post, path, payload, options)
    }

    /// Send `payload` flattened into query parameters.
    pub fn get<P: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &P,
        options: &[&dyn RequestMutator],
    ) -> ApiResult {
        self.execute(HttpMethod::Get, path, payload, options)
    }

    /// Send `payload` flattened into query parameters.
    pub fn delete<P: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &P,
        options: &[&dyn RequestMutator],
    ) -> ApiResult {
        self.execute(HttpMethod::Delete, path, payload, options)
    }

    fn execute<P: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: &P,
        options: &[&dyn RequestMutator],
    ) -> ApiResult {
        let mut req = match request::build(method, &self.base_url, path, payload) {
            Ok(req) => req,
            Err(e) => {
                warn!(%method, base_url = %self.base_url, path, error = %e, "request not sent");
                return ApiResult::from_error(e);
            }
        };
        if let Some(agent) = &self.user_agent {
            req.set_header("user-agent", agent.clone());
        }
        if let Some(auth) = &self.auth {
            auth.handle(&mut req);
        }
        apply_all(&mut req, options);

        debug!(%method, url = %req.url, params = req.query.len(), "sending request");
        match self.transport.send(&req) {
            Ok(resp) => {
                debug!(%method, url = %req.url, status = resp.status, "received response");
                ApiResult::from_response(resp)
            }
            Err(e) => {
                warn!(%method, url = %req.url, error = %e, "transport failed");
                ApiResult::from_error(e)
            }
        }
    }
}

impl<T> fmt::Debug for RestClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth.is_some())
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}
