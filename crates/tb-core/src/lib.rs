//! tb-core - Core library for Testbed
//!
//! This crate provides the shared types used across all Testbed components:
//! generated schema identifiers, DSN parsing, and the resolved session
//! configuration.

pub mod config;
pub mod dsn;
pub mod error;
pub mod identifier;

pub use config::{ConfigFile, ConfigOverrides, SessionConfig};
pub use dsn::{Dsn, DsnTarget};
pub use error::{CoreError, CoreResult};
pub use identifier::Identifier;
