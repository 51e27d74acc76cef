//! # Forum Core
//!
//! The domain layer of the forum API.
//! Request authorization, ownership and pagination rules live here, with the
//! persistence boundary and credential handling expressed as ports.

pub mod authorization;
pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod services;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use error::DomainError;
pub use pagination::{Page, PageRequest};
