//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, CORS)
//!     → routing (method + path prefix → Endpoint)
//!     → handlers (parse path/body → use-case call)
//!     → envelope.rs (Reply / ApiError → JSON envelope)
//!     → Send to client
//! ```

pub mod envelope;
pub mod handlers;
pub mod request;
pub mod server;

pub use envelope::{Action, ApiError, Envelope, Reply};
pub use request::X_REQUEST_ID;
pub use server::{build_router, AppState, HttpServer};
