//! End-to-end calls against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every verb through
//! `RestClient` with the real `UreqTransport`, checking request building,
//! option application and envelope extraction over actual HTTP.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use rest_client::{with_auth, with_jwt, Auth, ClientConfig, Error, HttpRequest, RestClient};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct NewUser<'a> {
    name: &'a str,
    age: u32,
}

#[derive(Serialize)]
struct Filter {
    min_age: u32,
}

#[derive(Serialize)]
struct ById {
    id: String,
}

#[derive(Debug, Deserialize, PartialEq)]
struct User {
    id: String,
    name: String,
    age: u32,
}

struct StaticToken(&'static str);

impl Auth for StaticToken {
    fn handle(&self, request: &mut HttpRequest) {
        request.set_header("Authorization", format!("Bearer {}", self.0));
    }
}

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn user_lifecycle() {
    let addr = start_server();
    // Trailing slash plus leading slashes on every path exercise path cleaning.
    let client = RestClient::new(format!("http://{addr}/api/"));

    // Step 1: list — should be empty.
    let result = client.get("/v1/users", &(), &[]);
    assert!(result.ok(), "{:?}", result.error());
    assert_eq!(result.value::<u32>("total").unwrap(), 0);
    assert_eq!(result.code(), Some(0));
    assert_eq!(result.msg(), Some("ok"));

    // Step 2: create two users.
    let result = client.post("/v1//users", &NewUser { name: "ada", age: 36 }, &[]);
    assert!(result.ok(), "{:?}", result.error());
    let ada: User = result.value("user").unwrap();
    assert_eq!(ada.name, "ada");
    assert_eq!(ada.age, 36);

    let result = client.post("/v1/./users", &NewUser { name: "grace", age: 85 }, &[]);
    let grace: User = result.value("user").unwrap();

    // Step 3: filter via query parameters.
    let result = client.get("/v1/users", &Filter { min_age: 50 }, &[]);
    assert_eq!(result.value::<u32>("total").unwrap(), 1);
    let users: Vec<User> = result.value("users").unwrap();
    assert_eq!(users, vec![grace]);

    // Step 4: delete.
    let result = client.delete("/v1/users", &ById { id: ada.id.clone() }, &[]);
    assert!(result.ok(), "{:?}", result.error());
    assert_eq!(result.value::<String>("deleted").unwrap(), ada.id);

    // Step 5: delete again — 404 envelope.
    let result = client.delete("/v1/users", &ById { id: ada.id.clone() }, &[]);
    assert!(result.fail());
    assert_eq!(result.response().unwrap().status, 404);
    assert_eq!(result.code(), Some(404));
    let text = result.error().unwrap().to_string();
    assert!(text.contains("404 Not Found"), "{text}");
    assert!(text.contains("user not found"), "{text}");
}

#[test]
fn validation_failure_reports_status_and_msg() {
    let addr = start_server();
    let client = RestClient::new(format!("http://{addr}"));

    let result = client.post("/api/v1/users", &NewUser { name: "", age: 1 }, &[]);
    assert!(result.fail());
    match result.error() {
        Some(Error::Status { status_line, body }) => {
            assert_eq!(status_line, "400 Bad Request");
            assert!(body.contains("name is required"), "{body}");
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(result.msg(), Some("name is required"));
    assert!(matches!(
        result.value::<User>("user"),
        Err(Error::UnknownField { .. })
    ));
}

#[test]
fn auth_options_reach_the_server() {
    let addr = start_server();
    let client = RestClient::new(format!("http://{addr}/api/v1"));

    let result = client.get("/me", &(), &[]);
    assert_eq!(result.response().unwrap().status, 401);
    assert!(result.fail());

    let result = client.get("/me", &(), &[&with_jwt("jwt-1")]);
    assert_eq!(result.value::<String>("token").unwrap(), "jwt-1");

    let result = client.get("/me", &(), &[&with_auth(StaticToken("custom"))]);
    assert_eq!(result.value::<String>("token").unwrap(), "custom");

    let result = client.get(
        "/me",
        &(),
        &[&with_jwt("first"), &with_auth(StaticToken("second"))],
    );
    assert_eq!(result.value::<String>("token").unwrap(), "second");

    let client = RestClient::new(format!("http://{addr}/api/v1")).with_auth(StaticToken("default"));
    let result = client.get("/me", &(), &[]);
    assert_eq!(result.value::<String>("token").unwrap(), "default");
}

#[test]
fn query_values_and_user_agent_arrive_as_text() {
    let addr = start_server();
    let client = RestClient::from_config(
        ClientConfig::new(format!("http://{addr}")).user_agent("rest-client/integration"),
    );

    let mut params = BTreeMap::new();
    params.insert("page", serde_json::json!(2));
    params.insert("exact", serde_json::json!(true));
    params.insert("q", serde_json::json!("a b&c"));
    let result = client.get("/api/v1/echo", &params, &[]);
    assert!(result.ok(), "{:?}", result.error());

    let query: BTreeMap<String, String> = result.value("query").unwrap();
    assert_eq!(query["page"], "2");
    assert_eq!(query["exact"], "true");
    assert_eq!(query["q"], "a b&c");
    assert_eq!(
        result.value::<String>("user_agent").unwrap(),
        "rest-client/integration"
    );
}

#[test]
fn created_status_is_not_ok() {
    let addr = start_server();
    let client = RestClient::new(format!("http://{addr}"));

    let result = client.post("/api/v1/accepted", &(), &[]);
    assert_eq!(result.response().unwrap().status, 201);
    assert!(result.fail());
    assert!(result.error().unwrap().to_string().contains("201 Created"));
    // The envelope is still readable on failure.
    assert_eq!(result.msg(), Some("accepted"));
}

#[test]
fn unreachable_server_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = RestClient::new(format!("http://{addr}"));

    let result = client.get("/api/v1/users", &(), &[]);
    assert!(result.fail());
    assert!(result.response().is_none());
    assert!(matches!(result.error(), Some(Error::Transport(_))));
}
