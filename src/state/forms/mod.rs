//! Form domain layer
//!
//! Field value objects, the presentation surface for inline errors and the
//! tax form itself. Rendering lives in `ui::forms`.

mod field;
mod form_state;

pub use field::{FieldKind, FieldPresenter, FormField, SelectOption};
pub use form_state::{Form, TaxForm, DISTRICT_PLACEHOLDER};
