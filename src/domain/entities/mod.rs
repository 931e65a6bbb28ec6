//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Creation inputs
//! live next to the entity they produce:
//!
//! - [`Link`] / [`NewLink`] - A shortened URL and its click counter
//! - [`ClickEvent`] / [`NewClickEvent`] - One recorded redirect
//! - [`User`] / [`NewUser`] - An account owning links and tokens

pub mod click_event;
pub mod link;
pub mod user;

pub use click_event::{ClickEvent, NewClickEvent};
pub use link::{Link, NewLink};
pub use user::{CallerIdentity, NewUser, User};
