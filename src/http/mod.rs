//! HTTP protocol handling.
//!
//! Only as much HTTP as the server needs: the request line of a GET, and a
//! fixed-shape response with a computed `Content-Length`.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine, run by one worker
//! - **`parser`**: Extracts method and path from the request line
//! - **`request`**: Parsed request representation
//! - **`router`**: Maps a request to a response (`/`, `/hello`, static files)
//! - **`response`**: Status codes and response bodies
//! - **`writer`**: Serializes and writes responses to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read until end of headers or EOF
//!        └──────┬──────┘
//!               ▼
//!        ┌─────────────┐
//!        │   Parsing   │ ── empty ──────────────────┐
//!        └──────┬──────┘ ── malformed ─┐            │
//!               ▼                      │            │
//!        ┌─────────────┐               │            │
//!        │   Routing   │               │            │
//!        └──────┬──────┘               │            │
//!               ▼                      ▼            │
//!        ┌──────────────────────────────────┐       │
//!        │           Responding             │       │
//!        └──────┬───────────────────────────┘       │
//!               ▼                                   │
//!        ┌─────────────┐                            │
//!        │   Closed    │ ◄──────────────────────────┘
//!        └─────────────┘
//! ```
//!
//! There is no keep-alive: every connection ends in `Closed` after at most
//! one response.

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod router;
pub mod writer;
