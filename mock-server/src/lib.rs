use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub age: u32,
}

#[derive(Deserialize)]
pub struct NewUser {
    pub name: String,
    #[serde(default)]
    pub age: u32,
}

#[derive(Deserialize)]
pub struct UserFilter {
    pub name: Option<String>,
    pub min_age: Option<u32>,
}

#[derive(Deserialize)]
pub struct UserId {
    pub id: Uuid,
}

pub type Db = Arc<RwLock<HashMap<Uuid, User>>>;

type Reply = (StatusCode, Json<Value>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route(
            "/api/v1/users",
            get(list_users).post(create_user).delete(delete_user),
        )
        .route("/api/v1/me", get(me))
        .route("/api/v1/echo", get(echo))
        .route("/api/v1/accepted", post(accepted))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Success envelope: `code` 0, `msg` "ok", plus `fields` at the top level.
fn ok(fields: Value) -> Reply {
    let mut body = Map::new();
    body.insert("code".to_string(), json!(0));
    body.insert("msg".to_string(), json!("ok"));
    if let Value::Object(fields) = fields {
        body.extend(fields);
    }
    (StatusCode::OK, Json(Value::Object(body)))
}

fn fail(status: StatusCode, code: i64, msg: &str) -> Reply {
    (status, Json(json!({ "code": code, "msg": msg })))
}

async fn create_user(State(db): State<Db>, Json(input): Json<NewUser>) -> Reply {
    if input.name.trim().is_empty() {
        return fail(StatusCode::BAD_REQUEST, 1, "name is required");
    }
    let user = User {
        id: Uuid::new_v4(),
        name: input.name,
        age: input.age,
    };
    db.write().await.insert(user.id, user.clone());
    tracing::info!(id = %user.id, "created user");
    ok(json!({ "user": user }))
}

async fn list_users(State(db): State<Db>, Query(filter): Query<UserFilter>) -> Reply {
    let users = db.read().await;
    let mut matched: Vec<User> = users
        .values()
        .filter(|u| filter.name.as_deref().map_or(true, |n| u.name == n))
        .filter(|u| filter.min_age.map_or(true, |min| u.age >= min))
        .cloned()
        .collect();
    matched.sort_by(|a, b| a.name.cmp(&b.name));
    ok(json!({ "total": matched.len(), "users": matched }))
}

async fn delete_user(State(db): State<Db>, Query(UserId { id }): Query<UserId>) -> Reply {
    match db.write().await.remove(&id) {
        Some(_) => ok(json!({ "deleted": id })),
        None => fail(StatusCode::NOT_FOUND, 404, "user not found"),
    }
}

async fn me(headers: HeaderMap) -> Reply {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    match token {
        Some(token) if !token.is_empty() => ok(json!({ "token": token })),
        _ => fail(StatusCode::UNAUTHORIZED, 401, "missing bearer token"),
    }
}

async fn echo(headers: HeaderMap, Query(query): Query<HashMap<String, String>>) -> Reply {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());
    ok(json!({ "query": query, "user_agent": user_agent }))
}

async fn accepted() -> Reply {
    (
        StatusCode::CREATED,
        Json(json!({ "code": 0, "msg": "accepted" })),
    )
}
