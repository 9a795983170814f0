//! Presentation metadata for the nine inputs: how each one is entered and
//! how the form groups them.

mod catalog;
mod descriptor;

pub use catalog::{describe, groups};
pub use descriptor::{ChoiceOption, ChoiceSet, FieldDescriptor, FieldGroup, InputKind, NumericEntry};
