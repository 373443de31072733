//! Portfolio content domain: entities, the content store port, and the read,
//! admin and catalog services built on it.

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;

pub use entities::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
