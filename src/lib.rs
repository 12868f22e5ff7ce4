//! EduBridge - Onboarding Screen Library
//!
//! The form-state and tab-navigation core of the EduBridge onboarding screen:
//! registration draft validation, the submit lifecycle, and a terminal front end.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
