//! Form domain layer
//!
//! A [`GroupSpec`] declares fields, nested groups and repeated groups; a
//! [`FormModel`] owns the runtime state built from it and handles
//! validation and submission. Fields are addressed by typed [`FieldPath`]s.

mod error;
mod field;
mod form_state;
mod group;
mod invite_form;
mod path;
mod validators;
mod values;

pub use error::{FormError, ValidationErrors};
pub use field::{ChangeHandler, FieldSpec, FieldState};
pub use form_state::{FormEvent, FormModel, SubscriptionId};
pub use group::{GroupSpec, SpecNode};
pub use invite_form::{invite_form_spec, InviteForm, INVITE_GROUP, INVITE_ROWS};
pub use path::{FieldPath, PathSegment};
pub use validators::{EmailValidator, Validator, INVALID_EMAIL_MESSAGE};
pub use values::FormValues;
