//! Request options: small mutations applied to a request before it is sent.
//!
//! # Design
//! An option is anything implementing `RequestMutator`. Plain closures over
//! `&mut HttpRequest` qualify through a blanket impl, and the named helpers
//! (`with_auth`, `with_jwt`, `with_header`) return small structs so they can be
//! stored, cloned, and debugged. Options run in the order given; a later option
//! that writes the same header wins.

use std::fmt;

use crate::http::HttpRequest;

/// A single mutation over an outgoing request.
pub trait RequestMutator {
    fn apply(&self, request: &mut HttpRequest);
}

impl<F> RequestMutator for F
where
    F: Fn(&mut HttpRequest),
{
    fn apply(&self, request: &mut HttpRequest) {
        self(request)
    }
}

/// Applies credentials to a request.
///
/// Only the injection point lives here; how credentials are obtained is up to
/// the implementor.
pub trait Auth: Send + Sync {
    fn handle(&self, request: &mut HttpRequest);
}

/// Option that delegates to an [`Auth`] implementation.
pub struct WithAuth<A>(A);

impl<A: Auth> RequestMutator for WithAuth<A> {
    fn apply(&self, request: &mut HttpRequest) {
        self.0.handle(request);
    }
}

pub fn with_auth<A: Auth>(auth: A) -> WithAuth<A> {
    WithAuth(auth)
}

/// Sets `Authorization: Bearer <token>`.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

// Keep tokens out of logs.
impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

impl Auth for BearerToken {
    fn handle(&self, request: &mut HttpRequest) {
        request.set_header("Authorization", format!("Bearer {}", self.0));
    }
}

impl RequestMutator for BearerToken {
    fn apply(&self, request: &mut HttpRequest) {
        self.handle(request);
    }
}

pub fn with_jwt(token: impl Into<String>) -> BearerToken {
    BearerToken::new(token)
}

/// Sets one header to a fixed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    name: String,
    value: String,
}

impl RequestMutator for Header {
    fn apply(&self, request: &mut HttpRequest) {
        request.set_header(self.name.clone(), self.value.clone());
    }
}

pub fn with_header(name: impl Into<String>, value: impl Into<String>) -> Header {
    Header {
        name: name.into(),
        value: value.into(),
    }
}

/// Apply `options` to `request` in order.
pub fn apply_all(request: &mut HttpRequest, options: &[&dyn RequestMutator]) {
    for option in options {
        option.apply(request);
    }
}
