//! Business logic services.

pub mod auth;
pub mod categories;
pub mod products;
