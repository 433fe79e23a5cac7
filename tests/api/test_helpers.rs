//! Shared helpers for the HTTP tests.

use std::path::PathBuf;

use actix_web::{App, dev::ServiceResponse, test, web};
use apikey_service_lib::api;
use apikey_service_lib::db::DbPool;
use apikey_service_lib::entity::api_key;
use chrono::{TimeZone, Utc};
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::Value;

/// A mock MySQL database with no queued results.
pub fn mock_db() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::MySql)
}

/// Wrap a prepared mock database in a pool handle.
pub fn mock_pool(db: MockDatabase) -> DbPool {
    DbPool::from_connection(db.into_connection())
}

/// A stored row as the database would return it.
pub fn stored_key(id: i32, username: &str, name: Option<&str>) -> api_key::Model {
    api_key::Model {
        id,
        username: username.to_string(),
        name: name.map(str::to_string),
        key: format!("{:048x}", id),
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, id as u32 % 60).unwrap(),
    }
}

/// Create a test app sharing `pool`.
pub async fn create_test_app(
    pool: &DbPool,
    static_dir: Option<PathBuf>,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> + use<> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .configure(api::configure_app(static_dir)),
    )
    .await
}

/// Send a request and return its status and JSON body.
pub async fn call_json<S>(app: &S, req: actix_http::Request) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// True for a 48-character lowercase hex string.
pub fn is_token(value: &Value) -> bool {
    value.as_str().is_some_and(|s| {
        s.len() == 48 && s.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    })
}

/// Debug rendering of every statement the mock connection executed.
///
/// The test app must be dropped first so the pool is no longer shared.
pub fn executed_statements(pool: DbPool) -> Vec<String> {
    pool.into_connection()
        .expect("pool is still shared with the test app")
        .into_transaction_log()
        .iter()
        .map(|t| format!("{:?}", t))
        .collect()
}
