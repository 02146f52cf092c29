//! # testmate-prompts
//!
//! Deterministic prompt assembly for test-case generation.
//!
//! [`build_prompt`] turns a raw requirement into the instruction block sent
//! to a model: it detects an explicit count phrase in the requirement,
//! clamps the effective count, and embeds the exact output template that
//! `testmate-parser` is built to match. [`build_improve_prompt`] is the
//! optional first stage: it asks a model to reword the raw requirement
//! before generation.
//!
//! ## Example
//!
//! ```rust
//! use testmate_prompts::{build_prompt, detect_count};
//!
//! assert_eq!(detect_count("give me 5 test cases for login"), Some(5));
//!
//! let prompt = build_prompt("give me 5 test cases for login", None);
//! assert_eq!(prompt.effective_count, Some(5));
//! assert!(prompt.text.contains("EXACTLY 5"));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

mod builder;
mod improve;

pub use builder::{build_prompt, detect_count, BuiltPrompt};
pub use improve::build_improve_prompt;
