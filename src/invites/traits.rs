//! Trait abstraction for invite delivery to enable mocking in tests

use super::{InviteReceipt, InviteSubmission};
use anyhow::Result;
use async_trait::async_trait;

/// Delivers submitted invites
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InviteSender: Send + Sync {
    /// Deliver one submission; called once per successful form submit
    async fn send(&mut self, submission: &InviteSubmission) -> Result<InviteReceipt>;
}
