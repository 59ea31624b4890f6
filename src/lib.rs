//! bubble: a small blog backend (entries and authors) over PostgreSQL.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod observability;
pub mod routing;
pub mod store;
pub mod usecase;

pub use config::schema::BubbleConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use usecase::Services;
