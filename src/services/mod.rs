//! Service layer modules.
//!
//! The in-memory record directory, onboarding sessions, notification helpers
//! and the demo data used to seed the directory.

pub mod directory;
pub mod notifications;
pub mod seed;
pub mod sessions;

pub use directory::Directory;
pub use sessions::{SessionError, SessionOutcome, WizardSessions};
