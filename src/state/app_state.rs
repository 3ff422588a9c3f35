//! Application state definitions

use super::banner_state::BannerState;
use super::forms::{FieldPath, FormError, FormEvent, InviteForm};
use crate::messages::MessageResolver;
use std::cell::Cell;
use std::rc::Rc;

/// Something on the invite screen that can hold keyboard focus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    Field(FieldPath),
    SubmitButton,
    SkipButton,
}

/// Screen options fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenOptions {
    /// Opaque origin token; the skip action returns here
    pub from: String,
    /// Hide the title banner and the skip action
    pub embed: bool,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            from: crate::config::DEFAULT_FROM.to_string(),
            embed: false,
        }
    }
}

/// Invite screen state
#[derive(Debug)]
pub struct AppState {
    pub form: InviteForm,
    pub options: ScreenOptions,
    /// Index into [`AppState::focus_order`]
    pub focus_index: usize,
    /// Result of the most recent delivery
    pub invite_successful: bool,
    pub banner: Option<BannerState>,
    /// Transient message for the status bar
    pub status_message: Option<String>,
    dirty: Rc<Cell<bool>>,
}

impl AppState {
    pub fn new(resolver: &dyn MessageResolver, options: ScreenOptions) -> Self {
        let mut form = InviteForm::new(resolver);
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        form.model.subscribe(move |event: &FormEvent| {
            tracing::trace!(?event, "form changed");
            flag.set(true);
        });

        Self {
            form,
            options,
            focus_index: 0,
            invite_successful: false,
            banner: None,
            status_message: None,
            dirty,
        }
    }

    /// Fields in declaration order, then the action buttons
    pub fn focus_order(&self) -> Vec<FocusTarget> {
        let mut order: Vec<FocusTarget> = self
            .form
            .model
            .field_paths()
            .into_iter()
            .map(FocusTarget::Field)
            .collect();
        order.push(FocusTarget::SubmitButton);
        if !self.options.embed {
            order.push(FocusTarget::SkipButton);
        }
        order
    }

    pub fn focused(&self) -> FocusTarget {
        let order = self.focus_order();
        let index = self.focus_index.min(order.len().saturating_sub(1));
        order
            .into_iter()
            .nth(index)
            .unwrap_or(FocusTarget::SubmitButton)
    }

    pub fn focused_field(&self) -> Option<FieldPath> {
        match self.focused() {
            FocusTarget::Field(path) => Some(path),
            _ => None,
        }
    }

    pub fn next_focus(&mut self) {
        let count = self.focus_order().len();
        self.focus_index = (self.focus_index + 1) % count;
        self.mark_dirty();
    }

    pub fn prev_focus(&mut self) {
        let count = self.focus_order().len();
        if self.focus_index == 0 {
            self.focus_index = count - 1;
        } else {
            self.focus_index -= 1;
        }
        self.mark_dirty();
    }

    /// Move focus to a declared field
    pub fn focus_field(&mut self, path: &FieldPath) -> Result<(), FormError> {
        let target = FocusTarget::Field(path.clone());
        let index = self
            .focus_order()
            .iter()
            .position(|candidate| *candidate == target)
            .ok_or_else(|| FormError::PathNotFound(path.clone()))?;
        self.focus_index = index;
        self.mark_dirty();
        Ok(())
    }

    /// Append a character to the focused field
    pub fn input_char(&mut self, c: char) -> Result<(), FormError> {
        self.edit_focused(|value| value.push(c))
    }

    /// Remove the last character of the focused field
    pub fn backspace(&mut self) -> Result<(), FormError> {
        self.edit_focused(|value| {
            value.pop();
        })
    }

    /// Insert pasted text (first line only) into the focused field
    pub fn paste(&mut self, text: &str) -> Result<(), FormError> {
        let line = text.lines().next().unwrap_or_default().to_string();
        self.edit_focused(|value| value.push_str(&line))
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) -> Result<(), FormError> {
        let Some(path) = self.focused_field() else {
            return Ok(());
        };
        let mut value = self.form.model.get(&path)?.value.clone();
        edit(&mut value);
        self.form.model.set(&path, value)?;
        self.status_message = None;
        if !self.form.show_success_message() {
            self.banner = None;
        }
        Ok(())
    }

    /// Banner is visible only while the last submission was delivered and
    /// nothing has been edited since
    pub fn is_success_banner_visible(&self) -> bool {
        self.form.show_success_message() && self.invite_successful
    }

    pub fn dismiss_banner(&mut self) {
        self.form.set_show_success_message(false);
        self.banner = None;
        self.mark_dirty();
    }

    pub fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    /// Returns whether a redraw was requested since the last call
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::DefaultMessages;

    fn state(embed: bool) -> AppState {
        AppState::new(
            &DefaultMessages,
            ScreenOptions {
                from: "/".into(),
                embed,
            },
        )
    }

    mod focus {
        use super::*;

        #[test]
        fn test_order_lists_fields_then_buttons() {
            let order = state(false).focus_order();
            assert_eq!(order.len(), 8);
            assert_eq!(order[0], FocusTarget::Field(InviteForm::name_path(0)));
            assert_eq!(order[1], FocusTarget::Field(InviteForm::email_path(0)));
            assert_eq!(order[6], FocusTarget::SubmitButton);
            assert_eq!(order[7], FocusTarget::SkipButton);
        }

        #[test]
        fn test_embed_hides_skip_button() {
            let order = state(true).focus_order();
            assert_eq!(order.len(), 7);
            assert!(!order.contains(&FocusTarget::SkipButton));
        }

        #[test]
        fn test_next_and_prev_wrap() {
            let mut state = state(false);
            state.prev_focus();
            assert_eq!(state.focused(), FocusTarget::SkipButton);
            state.next_focus();
            assert_eq!(state.focused(), FocusTarget::Field(InviteForm::name_path(0)));
        }

        #[test]
        fn test_focus_field_by_path() {
            let mut state = state(false);
            state.focus_field(&InviteForm::email_path(2)).unwrap();
            assert_eq!(state.focus_index, 5);
            assert_eq!(state.focused_field(), Some(InviteForm::email_path(2)));
        }

        #[test]
        fn test_focus_undeclared_field_fails() {
            let mut state = state(false);
            let path = FieldPath::repeated("invite", 9, "name");
            assert_eq!(
                state.focus_field(&path),
                Err(FormError::PathNotFound(path.clone()))
            );
            assert_eq!(state.focus_index, 0);
        }
    }

    mod editing {
        use super::*;

        #[test]
        fn test_typing_goes_through_model() {
            let mut state = state(false);
            state.next_focus();
            for c in "a@b.co".chars() {
                state.input_char(c).unwrap();
            }
            state.backspace().unwrap();
            let field = state.form.model.get(&InviteForm::email_path(0)).unwrap();
            assert_eq!(field.value, "a@b.c");
            assert!(field.dirty);
        }

        #[test]
        fn test_paste_takes_first_line() {
            let mut state = state(false);
            state.paste("Ada Lovelace\nsecond line").unwrap();
            assert_eq!(
                state.form.model.get(&InviteForm::name_path(0)).unwrap().value,
                "Ada Lovelace"
            );
        }

        #[test]
        fn test_typing_on_button_is_ignored() {
            let mut state = state(false);
            state.focus_index = 6;
            state.input_char('x').unwrap();
            assert!(state.form.model.field_paths().iter().all(|path| state
                .form
                .model
                .get(path)
                .unwrap()
                .value
                .is_empty()));
        }

        #[test]
        fn test_edit_clears_status_message() {
            let mut state = state(false);
            state.status_message = Some("Enter at least one email address".into());
            state.input_char('x').unwrap();
            assert!(state.status_message.is_none());
        }

        #[test]
        fn test_edits_request_redraw() {
            let mut state = state(false);
            state.take_dirty();
            assert!(!state.take_dirty());
            state.input_char('x').unwrap();
            assert!(state.take_dirty());
        }
    }

    mod banner {
        use super::*;

        #[test]
        fn test_visible_only_after_successful_delivery() {
            let mut state = state(false);
            state.form.set_show_success_message(true);
            assert!(!state.is_success_banner_visible());
            state.invite_successful = true;
            assert!(state.is_success_banner_visible());
        }

        #[test]
        fn test_edit_hides_banner() {
            let mut state = state(false);
            state.invite_successful = true;
            state.form.set_show_success_message(true);
            state.banner = Some(BannerState::new());

            state.input_char('A').unwrap();
            assert!(!state.is_success_banner_visible());
            assert!(state.banner.is_none());
        }

        #[test]
        fn test_dismiss() {
            let mut state = state(false);
            state.invite_successful = true;
            state.form.set_show_success_message(true);
            state.dismiss_banner();
            assert!(!state.is_success_banner_visible());
        }
    }
}
