//! End-to-end tests against a live MySQL server.
//!
//! Uses the same DB_* environment variables as the server and creates the
//! database and table if needed.
//!
//! Run with: cargo test --test mysql_e2e -- --ignored
