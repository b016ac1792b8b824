//! Registration tokens for the per frame render callback.
//!
//! A render callback runs once per display refresh for as long as its token is active.
//! Cancelling the token is the only way to stop it, and there is at most one active token.

use bevy::log::{trace, warn};
use derive_more::Display;

/// Identifies one registration of the render callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "frame-token-{}", _0)]
pub struct FrameToken(u64);

#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    active: Option<FrameToken>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start receiving frames. Any previous registration is cancelled first.
    pub fn request_frames(&mut self) -> FrameToken {
        if let Some(previous) = self.active.take() {
            warn!(%previous, "Replacing a frame registration that was never cancelled");
        }
        let token = FrameToken(self.next_id);
        self.next_id += 1;
        self.active = Some(token);
        trace!(%token, "Registered for frames");
        token
    }

    /// Stop the registration. Returns false if the token was not the active one.
    pub fn cancel(&mut self, token: FrameToken) -> bool {
        if self.active == Some(token) {
            self.active = None;
            trace!(%token, "Cancelled frames");
            true
        } else {
            false
        }
    }

    pub fn is_active(&self, token: FrameToken) -> bool {
        self.active == Some(token)
    }

    pub fn active(&self) -> Option<FrameToken> {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique() {
        let mut scheduler = FrameScheduler::new();
        let a = scheduler.request_frames();
        assert!(scheduler.cancel(a));
        let b = scheduler.request_frames();
        assert_ne!(a, b);
        assert_eq!(b.to_string(), "frame-token-1");
    }

    #[test]
    fn test_cancel_stops_only_the_active_token() {
        let mut scheduler = FrameScheduler::new();
        let a = scheduler.request_frames();
        assert!(scheduler.is_active(a));
        assert!(scheduler.cancel(a));
        assert!(!scheduler.is_active(a));
        assert!(!scheduler.cancel(a));
        assert_eq!(scheduler.active(), None);
    }

    #[test]
    fn test_requesting_again_replaces_the_old_token() {
        let mut scheduler = FrameScheduler::new();
        let a = scheduler.request_frames();
        let b = scheduler.request_frames();
        assert!(!scheduler.is_active(a));
        assert!(scheduler.is_active(b));
    }
}
