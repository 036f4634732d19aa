//! minihttpd - a small static file server
//!
//! Accepts connections on the main task, hands each one to a fixed-size
//! worker pool, and answers GET requests for `/`, `/hello` and files under
//! the document root.

pub mod config;
pub mod http;
pub mod server;
pub mod static_files;
