//! API key service for token generation, creation, and listing.

use chrono::{SubsecRound, Utc};
use rand::RngCore;

use crate::db::{DbPool, api_keys as db};
use crate::error::{AppError, AppResult};
use crate::models::{ApiKeyRecord, NewApiKey};

/// Number of random bytes in a token; hex-encoded it is twice as long.
const TOKEN_BYTES: usize = 24;

/// Generate a random token: 24 bytes from a CSPRNG, lowercase hex.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Create a new API key, store it, and return the stored row.
pub async fn create_key(pool: &DbPool, username: &str, name: &str) -> AppResult<ApiKeyRecord> {
    let new_key = NewApiKey {
        username: username.to_string(),
        name: name.to_string(),
        key: generate_token(),
        // DATETIME keeps whole seconds only
        created_at: Utc::now().trunc_subsecs(0),
    };

    let conn = pool.connection();
    let id = db::insert_api_key(conn, &new_key).await?;

    db::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::Database(format!("api key {} not found after insert", id)))
}

/// List all API keys, newest first.
pub async fn list_keys(pool: &DbPool) -> AppResult<Vec<ApiKeyRecord>> {
    db::list_all(pool.connection()).await
}
