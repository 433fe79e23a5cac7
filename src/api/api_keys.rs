//! API key endpoints.

use actix_web::{Either, HttpResponse, get, post, web};
use tracing::info;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{ApiResponse, CreateApiKeyRequest, USERNAME_REQUIRED_MSG};
use crate::services::api_key;

/// JSON or form-encoded create request; `None` when the body decodes as neither.
type CreateBody = Option<Either<web::Json<CreateApiKeyRequest>, web::Form<CreateApiKeyRequest>>>;

/// Configure API key routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_api_key).service(list_api_keys);
}

/// Create a new API key.
///
/// POST /api/apikey
#[post("/apikey")]
pub async fn create_api_key(body: CreateBody, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let request = match body {
        Some(Either::Left(json)) => json.into_inner(),
        Some(Either::Right(form)) => form.into_inner(),
        None => CreateApiKeyRequest::default(),
    };

    let Some(username) = request.username() else {
        return Err(AppError::InvalidInput(USERNAME_REQUIRED_MSG.to_string()));
    };

    let record = api_key::create_key(pool.get_ref(), username, request.name()).await?;
    info!(id = record.id, username = %record.username, "API key created");

    Ok(HttpResponse::Created().json(ApiResponse::ok(record)))
}

/// List all API keys, newest first.
///
/// GET /api/apikey
#[get("/apikey")]
pub async fn list_api_keys(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let keys = api_key::list_keys(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(keys)))
}
