//! API key models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::entity::api_key;

/// Returned to callers when `username` is missing.
pub const USERNAME_REQUIRED_MSG: &str = "username is required";

/// API key as stored and returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyRecord {
    /// Auto-assigned by the database
    pub id: i32,
    /// Owner label
    pub username: String,
    /// Free-form label, empty when not given
    pub name: String,
    /// 48 lowercase hex characters
    pub key: String,
    pub created_at: DateTime<Utc>,
}

impl From<api_key::Model> for ApiKeyRecord {
    fn from(m: api_key::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            name: m.name.unwrap_or_default(),
            key: m.key,
            created_at: m.created_at,
        }
    }
}

/// Key data ready for insertion; the id is assigned by storage.
#[derive(Debug, Clone)]
pub struct NewApiKey {
    pub username: String,
    pub name: String,
    pub key: String,
    pub created_at: DateTime<Utc>,
}

/// Request to create a new API key (JSON or form-encoded).
///
/// Scalar values are accepted for either field and kept as their string
/// form; `null`, `false`, `0` and `""` count as not given.
#[derive(Debug, Default, Deserialize)]
pub struct CreateApiKeyRequest {
    #[serde(default, deserialize_with = "scalar_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub name: Option<String>,
}

impl CreateApiKeyRequest {
    /// The username, if present and non-empty.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref().filter(|u| !u.is_empty())
    }

    /// The name, or empty when absent.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ScalarStringVisitor)
}

struct ScalarStringVisitor;

impl<'de> Visitor<'de> for ScalarStringVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()).filter(|s| !s.is_empty()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(v).filter(|s| !s.is_empty()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(v.then(|| "true".to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok((v != 0).then(|| v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok((v != 0).then(|| v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok((v != 0.0 && !v.is_nan()).then(|| v.to_string()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}
