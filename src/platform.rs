//! Platform-specific key conventions

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for clipboard shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const PASTE_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const PASTE_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Label of the control key in help text
#[cfg(target_os = "macos")]
pub const CTRL_KEY: &str = "⌘";

#[cfg(not(target_os = "macos"))]
pub const CTRL_KEY: &str = "Ctrl";

/// Paste shortcut display, e.g. "Ctrl+V"
pub fn paste_shortcut() -> String {
    format!("{CTRL_KEY}+V")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paste_shortcut_uses_ctrl_label() {
        assert!(paste_shortcut().starts_with(CTRL_KEY));
        assert!(paste_shortcut().ends_with("+V"));
    }
}
