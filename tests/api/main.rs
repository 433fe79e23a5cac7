//! HTTP tests for the API key endpoints.
//!
//! Storage is replaced by SeaORM's MockDatabase, so no MySQL server is needed.
//!
//! Run with: cargo test --test api

mod test_helpers;

mod test_list_keys;
