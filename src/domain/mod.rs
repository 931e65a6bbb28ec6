//! Domain layer containing business entities and repository contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business logic lives in [`crate::application::services`].
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! # Redirect Flow
//!
//! 1. HTTP handler extracts the code, client IP, and user agent
//! 2. [`crate::application::services::RedirectService`] looks up the link
//! 3. The click counter is incremented and the client is classified
//! 4. The client IP is geolocated through [`crate::infrastructure::geo::GeoCache`]
//! 5. A [`entities::ClickEvent`] is persisted via [`repositories::AnalyticsRepository`]
//! 6. The handler answers with `301 Moved Permanently`

pub mod entities;
pub mod repositories;
