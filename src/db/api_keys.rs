//! Database operations for API keys using SeaORM.

use sea_orm::*;

use crate::entity::api_key;
use crate::error::AppResult;
use crate::models::{ApiKeyRecord, NewApiKey};

/// Insert a new API key and return the id storage assigned to it.
pub async fn insert_api_key(db: &DatabaseConnection, key: &NewApiKey) -> AppResult<i32> {
    let model = api_key::ActiveModel {
        id: NotSet,
        username: Set(key.username.clone()),
        name: Set(Some(key.name.clone())),
        key: Set(key.key.clone()),
        created_at: Set(key.created_at),
    };

    let result = api_key::Entity::insert(model).exec(db).await?;

    Ok(result.last_insert_id)
}

/// Find an API key by ID.
pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> AppResult<Option<ApiKeyRecord>> {
    let result = api_key::Entity::find_by_id(id).one(db).await?;

    Ok(result.map(ApiKeyRecord::from))
}

/// List all API keys, newest first.
pub async fn list_all(db: &DatabaseConnection) -> AppResult<Vec<ApiKeyRecord>> {
    let results = api_key::Entity::find()
        .order_by_desc(api_key::Column::Id)
        .all(db)
        .await?;

    Ok(results.into_iter().map(ApiKeyRecord::from).collect())
}
