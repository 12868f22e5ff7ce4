//! Application layer owning the onboarding screen state and workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! the screen controller, the submission pipeline, and the entrance animation.

pub mod animation;
pub mod pipeline;
pub mod state;

pub use animation::*;
pub use pipeline::*;
pub use state::*;
