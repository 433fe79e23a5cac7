//! Business services.

pub mod api_key;
