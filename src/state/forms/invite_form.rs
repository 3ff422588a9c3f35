//! The invite form: three `{name, email}` rows

use super::field::{ChangeHandler, FieldSpec};
use super::form_state::FormModel;
use super::group::GroupSpec;
use super::path::FieldPath;
use super::validators::EmailValidator;
use super::values::FormValues;
use crate::invites::Invite;
use crate::messages::{self, MessageResolver};
use std::cell::Cell;
use std::rc::Rc;

/// Key of the repeated invite group
pub const INVITE_GROUP: &str = "invite";
/// Number of invite rows shown
pub const INVITE_ROWS: usize = 3;

/// Declare the invite form. Labels and placeholders are resolved once here.
pub fn invite_form_spec(resolver: &dyn MessageResolver, on_change: ChangeHandler) -> GroupSpec {
    let name_label = resolver.format(messages::NAME_LABEL);
    let email_label = resolver.format(messages::EMAIL_LABEL);
    let invalid_email = resolver.format(messages::INVALID_EMAIL);

    GroupSpec::new().repeated(INVITE_GROUP, INVITE_ROWS, |_| {
        GroupSpec::new()
            .field(
                FieldSpec::text("name", &name_label)
                    .placeholder(name_label.as_str())
                    .on_change(Rc::clone(&on_change)),
            )
            .field(
                FieldSpec::text("email", &email_label)
                    .placeholder(email_label.as_str())
                    .validator(EmailValidator::new(invalid_email.as_str()))
                    .on_change(Rc::clone(&on_change)),
            )
    })
}

/// Invite form model plus the view policy layered on top of it
#[derive(Debug)]
pub struct InviteForm {
    pub model: FormModel,
    show_success_message: Rc<Cell<bool>>,
}

impl InviteForm {
    pub fn new(resolver: &dyn MessageResolver) -> Self {
        let show_success_message = Rc::new(Cell::new(false));
        let flag = Rc::clone(&show_success_message);
        // Any edit hides the success banner of the previous submission.
        let on_change: ChangeHandler = Rc::new(move |_: &str| flag.set(false));

        Self {
            model: FormModel::new(invite_form_spec(resolver, on_change)),
            show_success_message,
        }
    }

    pub fn name_path(row: usize) -> FieldPath {
        FieldPath::repeated(INVITE_GROUP, row, "name")
    }

    pub fn email_path(row: usize) -> FieldPath {
        FieldPath::repeated(INVITE_GROUP, row, "email")
    }

    /// Number of invite rows declared in the model
    pub fn rows(&self) -> usize {
        self.model
            .group_instances(&FieldPath::root().key(INVITE_GROUP))
            .unwrap_or(0)
    }

    /// Submit gate: at least one email is filled in (ignoring whitespace).
    ///
    /// An all-empty form is still valid for the model; this only decides
    /// whether the send action is enabled.
    pub fn at_least_one_email_address(&self) -> bool {
        (0..self.rows()).any(|row| {
            self.model
                .get(&Self::email_path(row))
                .is_ok_and(|state| !state.value.trim().is_empty())
        })
    }

    /// Extract the typed invite rows from a submitted value tree
    pub fn invites(values: &FormValues) -> serde_json::Result<Vec<Invite>> {
        values.section(&FieldPath::root().key(INVITE_GROUP))
    }

    pub fn show_success_message(&self) -> bool {
        self.show_success_message.get()
    }

    pub fn set_show_success_message(&self, show: bool) {
        self.show_success_message.set(show);
    }
}
