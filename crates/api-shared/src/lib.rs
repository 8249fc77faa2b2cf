//! # API Shared
//!
//! Shared wire definitions for the patient management APIs.
//!
//! Contains:
//! - JSON request/response types (`pb` module), also the on-disk record shape
//! - Shared services like `HealthService`
//!
//! Used by `pms-core`, `api-rest` and the CLI.

pub mod health;
pub mod pb;

pub use health::HealthService;
pub use pb::*;
