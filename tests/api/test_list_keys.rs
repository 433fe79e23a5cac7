//! GET /api/apikey.

use actix_web::test;
use apikey_service_lib::entity::api_key;
use sea_orm::DbErr;
use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_list_returns_rows_newest_first() {
    let pool = mock_pool(mock_db().append_query_results([vec![
        stored_key(3, "carol", None),
        stored_key(2, "bob", Some("ci-key")),
        stored_key(1, "alice", Some("")),
    ]]));
    let app = create_test_app(&pool, None).await;

    let req = test::TestRequest::get().uri("/api/apikey").to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    let data = body["data"].as_array().unwrap();
    let ids: Vec<i64> = data.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert_eq!(data[0]["name"], "", "NULL name is returned as empty");
    assert_eq!(data[1]["name"], "ci-key");
    assert!(data.iter().all(|r| is_token(&r["key"])));

    drop(app);
    let statements = executed_statements(pool);
    assert_eq!(statements.len(), 1);
    assert!(statements[0].contains("ORDER BY `api_keys`.`id` DESC"));
}

#[actix_rt::test]
async fn test_list_empty_table() {
    let pool = mock_pool(mock_db().append_query_results([Vec::<api_key::Model>::new()]));
    let app = create_test_app(&pool, None).await;

    let req = test::TestRequest::get().uri("/api/apikey").to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "success": true, "data": [] }));
}

#[actix_rt::test]
async fn test_list_storage_failure_returns_500() {
    let pool = mock_pool(mock_db().append_query_errors([DbErr::Custom("Connection refused".into())]));
    let app = create_test_app(&pool, None).await;

    let req = test::TestRequest::get().uri("/api/apikey").to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, 500);
    assert_eq!(body, json!({ "success": false, "error": "database error" }));
}
