//! Change computer implementations.
//!
//! This module provides concrete implementations of the `ChangeComputer` trait
//! for each type of change: class sets and per-class fields.

mod classes;
mod fields;

pub use classes::ClassChangeComputer;
pub use fields::FieldChangeComputer;
