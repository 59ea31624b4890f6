//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (route lookup)
//!     → matcher.rs (method + exact/prefix path)
//!     → Return: Endpoint + prefix-stripped parameter, 405, or 404
//!
//! Route Compilation (at startup):
//!     static route list
//!     → Sort by specificity
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route
//! - Most specific pattern wins

pub mod matcher;
pub mod router;

pub use matcher::{PathPattern, RouteMatcher};
pub use router::{Endpoint, Resolution, Route, RouteMatch, RouteTable};
