//! Invite delivery
//!
//! The invite screen hands a validated [`InviteSubmission`] to an
//! [`InviteSender`]; how it reaches the backend is the sender's business.

mod outbox;
mod traits;

pub use outbox::OutboxSender;
pub use traits::InviteSender;

#[cfg(test)]
pub use traits::MockInviteSender;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One invite row as entered in the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invite {
    pub name: String,
    pub email: String,
}

/// Everything the invite screen delivers on a successful submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteSubmission {
    pub invites: Vec<Invite>,
    /// Opaque origin token of the screen that opened the invite form
    pub from: String,
}

/// Acknowledgement returned by a sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteReceipt {
    pub id: Uuid,
    pub queued_at: DateTime<Utc>,
    pub count: usize,
}

impl InviteReceipt {
    pub fn new(count: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            queued_at: Utc::now(),
            count,
        }
    }
}
