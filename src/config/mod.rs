//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! bubble.toml (optional, --config)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (POSTGRES_*, ALLOWED_ORIGIN, BUBBLE_*)
//!     → validation.rs (semantic checks)
//!     → BubbleConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{BubbleConfig, CorsConfig, DatabaseConfig, ObservabilityConfig, ServerConfig, StoreDriver};
pub use validation::ValidationError;
