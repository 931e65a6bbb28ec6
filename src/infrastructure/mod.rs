//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and geolocation.
//!
//! # Modules
//!
//! - [`geo`] - IP geolocation provider and its TTL cache
//! - [`persistence`] - PostgreSQL repository implementations

pub mod geo;
pub mod persistence;
