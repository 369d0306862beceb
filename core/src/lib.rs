//! Blocking REST client for JSON envelope APIs.
//!
//! # Overview
//! Wraps an HTTP transport with POST/GET/DELETE verbs against a base URL.
//! Each call returns an `ApiResult` that classifies the outcome (only HTTP 200
//! is success) and decodes named top-level fields of a response envelope such
//! as `{"code":0,"msg":"ok","user":{...}}` into caller-chosen types.
//!
//! # Design
//! - `request` builds the outgoing `HttpRequest`: the path is joined to the
//!   base URL and cleaned, GET/DELETE payloads become query parameters and
//!   POST payloads become a JSON body.
//! - `option` holds the `RequestMutator` and `Auth` seams; options run in
//!   order after the payload is attached, so the last writer of a header wins.
//! - `transport` is the only place that performs I/O. `UreqTransport` is the
//!   default; tests plug in recorders.
//! - Errors are values. Nothing in the call path panics or retries.
//!
//! ```no_run
//! use rest_client::{with_jwt, RestClient};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: String,
//!     name: String,
//! }
//!
//! let client = RestClient::new("http://localhost:3000/api/");
//! let result = client.get("/v1/users", &(), &[&with_jwt("token")]);
//! if result.ok() {
//!     let users: Vec<User> = result.value("users").unwrap();
//!     println!("{} users", users.len());
//! } else {
//!     eprintln!("{}", result.error().unwrap());
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod option;
pub mod request;
pub mod result;
pub mod transport;

pub use client::RestClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use option::{with_auth, with_header, with_jwt, Auth, BearerToken, RequestMutator};
pub use result::ApiResult;
pub use transport::{Transport, UreqTransport};
