//! Domain types and core rules
//!
//! Reference enumerations, client/task/notification records, the onboarding
//! wizard and the dashboard aggregates. Nothing in here knows about HTTP.

pub mod catalog;
pub mod clients;
pub mod notifications;
pub mod onboarding;
pub mod reports;
pub mod tasks;
pub mod wizard;

// Re-export commonly used types
pub use catalog::*;
pub use clients::*;
pub use notifications::*;
pub use tasks::*;

// Onboarding, wizard and report items are accessed via their modules
