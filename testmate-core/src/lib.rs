//! # testmate-core
//!
//! Core types for the testmate test-case generation toolkit.
//!
//! This crate provides the foundational types used throughout the testmate
//! workspace:
//!
//! - **Cases**: [`TestCase`], [`Step`], and [`TestCaseSet`], the structured
//!   records extracted from model output
//! - **Requests**: [`GenerationRequest`] with the requested-count clamp
//! - **Settings**: [`GenerationSettings`] for sampling and timeouts
//! - **History**: the [`HistoryRepository`] trait and its in-memory default
//!
//! ## Example
//!
//! ```rust
//! use testmate_core::{GenerationRequest, Step, TestCase};
//!
//! let request = GenerationRequest::new("Users can log in with email")
//!     .with_count(40); // clamped to 25
//! assert_eq!(request.requested_count, Some(25));
//!
//! let step = Step::parse("1 | Open the login page | Login form is shown").unwrap();
//! assert_eq!(step.to_string(), "1 | Open the login page | Login form is shown");
//!
//! let case = TestCase::new("Login Success").with_step(step);
//! assert_eq!(case.steps.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod case;
pub mod history;
pub mod request;
pub mod settings;

// Re-exports for convenience
pub use case::{Step, TestCase, TestCaseSet};
pub use history::{GenerationRecord, HistoryRepository, InMemoryHistory};
pub use request::{clamp_count, GenerationRequest, MAX_TEST_CASE_COUNT};
pub use settings::GenerationSettings;
