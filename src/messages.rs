//! Display strings with translatable ids
//!
//! Every user-facing string has a stable id and a default text. A
//! [`MessageResolver`] turns the pair into the text shown on screen.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A translatable message: stable id plus fallback text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageDescriptor {
    pub id: &'static str,
    pub default_message: &'static str,
}

pub const HEADLINE: MessageDescriptor = MessageDescriptor {
    id: "invite.headline.friends",
    default_message: "Invite 3 of your friends or colleagues",
};

pub const NAME_LABEL: MessageDescriptor = MessageDescriptor {
    id: "invite.name.label",
    default_message: "Name",
};

pub const EMAIL_LABEL: MessageDescriptor = MessageDescriptor {
    id: "invite.email.label",
    default_message: "Email address",
};

pub const SUBMIT_BUTTON_LABEL: MessageDescriptor = MessageDescriptor {
    id: "invite.submit.label",
    default_message: "Send invites",
};

pub const SKIP_BUTTON_LABEL: MessageDescriptor = MessageDescriptor {
    id: "invite.skip.label",
    default_message: "I want to do this later",
};

pub const SUCCESS_MESSAGE: MessageDescriptor = MessageDescriptor {
    id: "invite.successInfo",
    default_message: "Great Success!",
};

pub const INVALID_EMAIL: MessageDescriptor = MessageDescriptor {
    id: "validation.message.email",
    default_message: crate::state::INVALID_EMAIL_MESSAGE,
};

/// Looks up display text for a message id
pub trait MessageResolver {
    fn resolve(&self, id: &str, default_text: &str) -> String;

    fn format(&self, message: MessageDescriptor) -> String {
        self.resolve(message.id, message.default_message)
    }
}

/// Screen strings resolved once when the screen is mounted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLabels {
    pub headline: String,
    pub submit: String,
    pub skip: String,
    pub success: String,
}

impl ScreenLabels {
    pub fn resolve(resolver: &dyn MessageResolver) -> Self {
        Self {
            headline: resolver.format(HEADLINE),
            submit: resolver.format(SUBMIT_BUTTON_LABEL),
            skip: resolver.format(SKIP_BUTTON_LABEL),
            success: resolver.format(SUCCESS_MESSAGE),
        }
    }
}

/// Resolver that always returns the default text
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessages;

impl MessageResolver for DefaultMessages {
    fn resolve(&self, _id: &str, default_text: &str) -> String {
        default_text.to_string()
    }
}

/// Translations loaded from a flat JSON object of `id -> text`
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn from_json(json: &str) -> Result<Self> {
        let messages: HashMap<String, String> =
            serde_json::from_str(json).context("message catalog must be a JSON object of strings")?;
        Ok(Self { messages })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read message catalog {}", path.display()))?;
        let catalog = Self::from_json(&content)?;
        tracing::debug!(path = %path.display(), count = catalog.len(), "loaded message catalog");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl MessageResolver for MessageCatalog {
    fn resolve(&self, id: &str, default_text: &str) -> String {
        self.messages
            .get(id)
            .cloned()
            .unwrap_or_else(|| default_text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_messages_return_default_text() {
        assert_eq!(DefaultMessages.format(NAME_LABEL), "Name");
        assert_eq!(
            DefaultMessages.format(HEADLINE),
            "Invite 3 of your friends or colleagues"
        );
    }

    #[test]
    fn test_catalog_overrides_known_ids() {
        let catalog =
            MessageCatalog::from_json(r#"{"invite.name.label": "Nom", "unused": "x"}"#).unwrap();
        assert_eq!(catalog.format(NAME_LABEL), "Nom");
        assert_eq!(catalog.format(EMAIL_LABEL), "Email address");
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_screen_labels_resolve_through_catalog() {
        let catalog = MessageCatalog::from_json(r#"{"invite.skip.label": "Später"}"#).unwrap();
        let labels = ScreenLabels::resolve(&catalog);
        assert_eq!(labels.skip, "Später");
        assert_eq!(labels.submit, "Send invites");
        assert_eq!(labels.success, "Great Success!");
    }

    #[test]
    fn test_catalog_rejects_non_string_values() {
        assert!(MessageCatalog::from_json(r#"{"invite.name.label": 3}"#).is_err());
        assert!(MessageCatalog::from_json("[]").is_err());
    }

    #[test]
    fn test_catalog_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"invite.submit.label": "Einladen"}}"#).unwrap();
        let catalog = MessageCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.format(SUBMIT_BUTTON_LABEL), "Einladen");
    }

    #[test]
    fn test_catalog_load_missing_file_is_error() {
        let result = MessageCatalog::load(Path::new("/nonexistent/messages.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_message_ids_are_unique() {
        let ids = [
            HEADLINE.id,
            NAME_LABEL.id,
            EMAIL_LABEL.id,
            SUBMIT_BUTTON_LABEL.id,
            SKIP_BUTTON_LABEL.id,
            SUCCESS_MESSAGE.id,
            INVALID_EMAIL.id,
        ];
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }
}
