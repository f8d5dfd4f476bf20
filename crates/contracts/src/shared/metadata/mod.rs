//! Native field constraints
//!
//! Mirrors the constraint subset a browser enforces on `<input>` elements
//! (`required`, `type`, `minlength`, `maxlength`) so that step validation can
//! run without a DOM.

mod field_type;
mod validation;

pub use field_type::FieldKind;
pub use validation::FieldConstraints;
