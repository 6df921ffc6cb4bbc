//! Common test utilities and helpers
//!
//! - In-process application fixture and request helpers
//! - Custom assertion macros

#![allow(dead_code)]

pub mod assertions;
pub mod auth_helpers;

pub use auth_helpers::*;
