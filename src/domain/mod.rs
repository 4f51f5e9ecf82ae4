//! Domain layer: restaurants, lists and the list registry
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod registry;

pub use entities::{Rating, Restaurant, RestaurantList};
pub use error::{DomainError, DomainResult};
pub use registry::ListRegistry;
