//! Command Layer Tests
//!
//! Integration tests for the mongoplug facade:
//! - Template JSON as saved by the editor, through to command documents
//! - Custom template layouts loaded from TOML
//! - Concurrent construction against the shared standard index

mod common;

mod concurrency;
mod custom_layout;
mod template_json;
