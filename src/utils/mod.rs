//! Utility functions for code generation, validation, and request handling.
//!
//! - [`code_generator`] - Short code generation and custom code validation
//! - [`url_validator`] - Destination URL validation
//! - [`user_agent`] - Device/OS/browser classification
//! - [`client_ip`] - Client IP extraction from HTTP requests

pub mod client_ip;
pub mod code_generator;
pub mod url_validator;
pub mod user_agent;
