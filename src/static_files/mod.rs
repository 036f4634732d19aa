//! Static file serving.
//!
//! - **`buffer`**: capacity-doubling byte buffer
//! - **`loader`**: resolves request paths against the document root and reads files

pub mod buffer;
pub mod loader;

pub use loader::{LoadError, StaticFileLoader};
