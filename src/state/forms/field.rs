//! Field definitions and runtime field state

use super::validators::Validator;
use std::fmt;
use std::rc::Rc;

/// Callback invoked with the field key whenever a field value is set
pub type ChangeHandler = Rc<dyn Fn(&str)>;

/// Static definition of one input
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    pub placeholder: String,
    validators: Vec<Box<dyn Validator>>,
    on_change: Option<ChangeHandler>,
}

impl FieldSpec {
    /// Create a text field with no validators
    pub fn text(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            placeholder: String::new(),
            validators: Vec::new(),
            on_change: None,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Append a validator; validators run in the order they were added
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn on_change(mut self, handler: ChangeHandler) -> Self {
        self.on_change = Some(handler);
        self
    }

    pub(crate) fn validators(&self) -> &[Box<dyn Validator>] {
        &self.validators
    }

    pub(crate) fn change_handler(&self) -> Option<&ChangeHandler> {
        self.on_change.as_ref()
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("placeholder", &self.placeholder)
            .field("validators", &self.validators.len())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

/// Runtime state of one field instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub error: Option<String>,
    pub dirty: bool,
}

impl FieldState {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Reset to the initial empty, clean state
    pub fn clear(&mut self) {
        self.value.clear();
        self.error = None;
        self.dirty = false;
    }

    /// Get the display value for rendering, falling back to the placeholder
    pub fn display_value<'a>(&'a self, placeholder: &'a str) -> &'a str {
        if self.value.is_empty() {
            placeholder
        } else {
            &self.value
        }
    }
}
