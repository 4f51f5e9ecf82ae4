//! Application layer: selection controller and merge service
//!
//! This layer orchestrates domain logic and publishes derived view state.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use services::{
    ActiveView, MergeOutcome, MergeService, SelectionController, SelectionState, SubscriptionId,
    ViewListener,
};
