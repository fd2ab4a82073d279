//! Session context carrying the operator identity and the root
//! cancellation token.

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Context for one dashboard session.
///
/// Every store created for the session receives a child of
/// [`SessionContext::cancel`], so ending the session aborts all in-flight
/// requests at once while a single store can still be torn down alone.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Session identifier used in log fields.
    pub session_id: Uuid,
    /// Operator name, if known.
    pub operator: Option<String>,
    /// When the session started.
    pub started_at: DateTime<Utc>,
    /// Root cancellation token.
    cancel: CancellationToken,
}

impl SessionContext {
    /// Creates a new session context.
    pub fn new(operator: Option<String>) -> Self {
        Self {
            session_id: Uuid::now_v7(),
            operator,
            started_at: Utc::now(),
            cancel: CancellationToken::new(),
        }
    }

    /// The session's root token.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// A token cancelled with the session but cancellable on its own.
    pub fn child_token(&self) -> CancellationToken {
        self.cancel.child_token()
    }

    /// End the session and abort in-flight work.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Whether [`Self::shutdown`] has been called.
    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_cancels_children() {
        let ctx = SessionContext::new(Some("admin".to_string()));
        let child = ctx.child_token();
        let sibling = ctx.child_token();

        child.cancel();
        assert!(!ctx.is_shut_down());
        assert!(!sibling.is_cancelled());

        ctx.shutdown();
        assert!(sibling.is_cancelled());
    }
}
