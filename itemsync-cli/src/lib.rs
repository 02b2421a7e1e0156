//! Library side of the `itemsync` binary: manifest handling, command
//! execution and connection settings.

pub mod commands;
pub mod connection;
pub mod manifest;

pub use commands::{DEFAULT_CONCURRENCY, Summary, run};
pub use connection::ConnectionArgs;
pub use manifest::{Manifest, ManifestItem, Operation, Outcome};
