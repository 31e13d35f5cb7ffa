//! Session lifecycle: token authority, storage, store, and the context
//! object handed to the HTTP client and route guard.

use std::sync::Arc;

pub mod notice;
pub mod storage;
pub mod store;
pub mod token;

pub use notice::{Navigator, Notice, Notifier, TerminalNavigator, TerminalNotifier};
pub use storage::FileStorage;
pub use store::{ActiveSession, SessionStatus, SessionStore};

use crate::router;

/// Why a session is being torn down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The stored token is past its expiry
    Expired,
    /// The stored token could not be decoded
    Malformed,
    /// The API answered 401
    Rejected,
}

impl SessionEnd {
    fn notice(self) -> Notice {
        match self {
            SessionEnd::Expired => Notice::error(
                "Your session has expired",
                "Please sign in again to continue.",
            ),
            SessionEnd::Malformed => Notice::error(
                "Your session is no longer valid",
                "Please sign in again to continue.",
            ),
            SessionEnd::Rejected => Notice::error("Session expired", "Please sign in again."),
        }
    }
}

/// Session store plus the side channels used when a session ends.
///
/// Cloned into every consumer; clones share the same store.
#[derive(Clone)]
pub struct SessionContext {
    store: SessionStore,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl SessionContext {
    pub fn new(
        store: SessionStore,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            store,
            notifier,
            navigator,
        }
    }

    /// Context reporting to the terminal
    pub fn terminal(store: SessionStore) -> Self {
        Self::new(store, Arc::new(TerminalNotifier), Arc::new(TerminalNavigator))
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn notify(&self, notice: &Notice) {
        self.notifier.notify(notice);
    }

    pub fn navigate(&self, location: &str) {
        self.navigator.navigate(location);
    }

    /// Log out, tell the user why, and send them to the login page.
    ///
    /// Concurrent requests failing on the same session report it once.
    pub async fn end_session(&self, reason: SessionEnd) {
        log::debug!("Ending session: {:?}", reason);

        if let Err(e) = self.store.logout().await {
            log::warn!("Failed to clear session storage: {}", e);
        }
        if !self.store.claim_end_notice() {
            return;
        }
        self.notifier.notify(&reason.notice());
        self.navigator.navigate(router::LOGIN_EXPIRED_PATH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::User;
    use crate::session::notice::{NoticeLevel, Recorder};
    use crate::session::token::{TokenPayload, encode};
    use chrono::Utc;

    #[tokio::test]
    async fn test_end_session_logs_out_notifies_and_redirects() {
        let recorder = Recorder::new();
        let ctx = SessionContext::new(
            SessionStore::in_memory(),
            Arc::new(recorder.clone()),
            Arc::new(recorder.clone()),
        );

        let token = encode(&TokenPayload::issue("1", "a@b.com", Utc::now()));
        ctx.store()
            .set_auth(token, User::from_claims(&TokenPayload::issue("1", "a@b.com", Utc::now())))
            .await
            .unwrap();

        ctx.end_session(SessionEnd::Rejected).await;

        assert!(!ctx.store().check_auth().await);
        assert_eq!(recorder.locations(), vec!["/login?expired=true".to_string()]);

        let notices = recorder.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(notices[0].title, "Session expired");
    }

    #[tokio::test]
    async fn test_end_session_reports_once_per_session() {
        let recorder = Recorder::new();
        let ctx = SessionContext::new(
            SessionStore::in_memory(),
            Arc::new(recorder.clone()),
            Arc::new(recorder.clone()),
        );
        let claims = TokenPayload::issue("1", "a@b.com", Utc::now());

        ctx.store()
            .set_auth(encode(&claims), User::from_claims(&claims))
            .await
            .unwrap();
        futures::future::join_all((0..3).map(|_| ctx.end_session(SessionEnd::Rejected))).await;
        assert_eq!(recorder.notices().len(), 1);
        assert_eq!(recorder.locations().len(), 1);

        ctx.store()
            .set_auth(encode(&claims), User::from_claims(&claims))
            .await
            .unwrap();
        ctx.end_session(SessionEnd::Expired).await;
        assert_eq!(recorder.notices().len(), 2);
        assert_eq!(recorder.notices()[1].title, "Your session has expired");
    }

    #[test]
    fn test_end_reasons_have_distinct_titles() {
        let expired = SessionEnd::Expired.notice();
        let malformed = SessionEnd::Malformed.notice();
        assert_ne!(expired.title, malformed.title);
        assert!(expired.description.is_some());
    }
}
