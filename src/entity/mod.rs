//! SeaORM entity definitions for the MySQL database.

pub mod api_key;
