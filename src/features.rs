//! The nine clinical inputs: keys, value rules, the validated record, and
//! the validation predicate that turns raw form values into a record.

mod key;
mod record;
mod validation;

pub use key::{FeatureKey, FieldRule, ValueType};
pub use record::FeatureRecord;
pub use validation::{
    FieldError, FieldFailure, RawFeatureInput, RawValue, ValidationErrors, check_field, validate,
};
