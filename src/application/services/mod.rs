//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services are plain structs, not traits.

mod merge;
mod selection;

pub use merge::{MergeOutcome, MergeService};
pub use selection::{ActiveView, SelectionController, SelectionState, SubscriptionId, ViewListener};
