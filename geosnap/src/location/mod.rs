//! Position resolution.
//!
//! # Components
//!
//! - [`GeoFix`] - A single immutable position measurement
//! - [`PositionProvider`] - Capability consumed by the resolver (last known fix,
//!   fresh fix with a max-age hint)
//! - [`LocationResolver`] - Two-tier policy: a last known fix within the
//!   freshness window is returned directly, otherwise a fresh fix is requested
//!
//! Ordinary unavailability resolves to `None`. Permission denial is reported
//! as [`PositionError::PermissionDenied`] so callers can request access.

mod fix;
mod provider;
mod resolver;

pub use fix::GeoFix;
pub use provider::{FixedPositionProvider, PositionError, PositionProvider};
pub use resolver::{LocationResolver, LocationResolverConfig, DEFAULT_FRESHNESS_MS};
