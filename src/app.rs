//! Application state and core logic

use crate::invites::{InviteSender, InviteSubmission};
use crate::messages::{MessageResolver, ScreenLabels};
use crate::state::{AppState, BannerState, FocusTarget, InviteForm, ScreenOptions};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Status shown when submit is attempted without any email address
pub const NO_EMAIL_MESSAGE: &str = "Enter at least one email address";

/// Main application struct
pub struct App<S: InviteSender> {
    /// Current application state
    pub state: AppState,
    /// Strings for the screen chrome
    pub labels: ScreenLabels,
    /// Where submitted invites go
    sender: S,
    /// Whether the app should quit
    quit: bool,
    /// Destination chosen by the skip action
    exit_destination: Option<String>,
}

impl<S: InviteSender> App<S> {
    /// Create a new App instance
    pub fn new(resolver: &dyn MessageResolver, options: ScreenOptions, sender: S) -> Self {
        Self {
            state: AppState::new(resolver, options),
            labels: ScreenLabels::resolve(resolver),
            sender,
            quit: false,
            exit_destination: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Origin token to return to, if the user skipped
    pub fn exit_destination(&self) -> Option<&str> {
        self.exit_destination.as_deref()
    }

    /// Submit is enabled only once an email has been entered
    pub fn can_submit(&self) -> bool {
        self.state.form.at_least_one_email_address()
    }

    /// Advance time-based UI state; returns true while an animation runs
    pub fn tick(&mut self) -> bool {
        match self.state.banner.as_mut() {
            Some(banner) if banner.is_animating() => {
                banner.update();
                self.state.mark_dirty();
                true
            }
            _ => false,
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return Ok(());
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.next_focus(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_focus(),
            KeyCode::Esc if self.state.is_success_banner_visible() => {
                self.state.dismiss_banner();
            }
            KeyCode::Esc => self.skip(),
            KeyCode::Enter => match self.state.focused() {
                FocusTarget::SkipButton => self.skip(),
                _ => self.submit().await?,
            },
            KeyCode::Char('v') if key.modifiers.contains(crate::platform::PASTE_MODIFIER) => {
                self.paste_from_clipboard()?;
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER) =>
            {
                self.state.input_char(c)?;
            }
            KeyCode::Backspace => self.state.backspace()?,
            _ => {}
        }
        Ok(())
    }

    /// Validate the form and deliver the invites.
    ///
    /// On success the form is cleared and focus returns to the first name
    /// field; the success banner shows only if delivery succeeded. On
    /// validation failure nothing is sent and focus moves to the first
    /// invalid field.
    pub async fn submit(&mut self) -> Result<()> {
        if !self.can_submit() {
            self.state.status_message = Some(NO_EMAIL_MESSAGE.to_string());
            self.state.mark_dirty();
            return Ok(());
        }

        let values = match self.state.form.model.try_submit() {
            Ok(values) => values,
            Err(errors) => {
                tracing::debug!(error_count = errors.len(), "invite form has errors");
                self.state.status_message = Some(errors.to_string());
                if let Some(first) = errors.paths().next() {
                    self.state.focus_field(first)?;
                }
                return Ok(());
            }
        };

        let submission = InviteSubmission {
            invites: InviteForm::invites(&values)?,
            from: self.state.options.from.clone(),
        };

        let delivered = match self.sender.send(&submission).await {
            Ok(receipt) => {
                tracing::info!(id = %receipt.id, count = receipt.count, "invites sent");
                self.state.status_message = None;
                true
            }
            Err(err) => {
                tracing::warn!("Failed to send invites: {err:#}");
                self.state.status_message = Some(format!("Failed to send invites: {err}"));
                false
            }
        };

        self.state.invite_successful = delivered;
        self.state.form.model.clear();
        self.state.focus_field(&InviteForm::name_path(0))?;
        self.state.form.set_show_success_message(true);
        self.state.banner = delivered.then(BannerState::new);
        Ok(())
    }

    /// Leave the invite screen, returning to the origin
    fn skip(&mut self) {
        if self.state.options.embed {
            self.quit = true;
            return;
        }
        tracing::debug!(from = %self.state.options.from, "invite skipped");
        self.exit_destination = Some(self.state.options.from.clone());
        self.quit = true;
    }

    fn paste_from_clipboard(&mut self) -> Result<()> {
        match read_clipboard() {
            Ok(text) => self.state.paste(&text)?,
            Err(err) => {
                tracing::warn!("Clipboard unavailable: {err:#}");
                self.state.status_message = Some("Clipboard unavailable".to_string());
                self.state.mark_dirty();
            }
        }
        Ok(())
    }
}

fn read_clipboard() -> Result<String> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    Ok(clipboard.get_text()?)
}
