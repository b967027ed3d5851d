//! Single-flight GUS session token renewal (spec.md §5): the session token
//! is a process-wide shared credential, and renewal must be serialized so
//! concurrent tasks observing an expired/absent token converge on one
//! in-flight renewal rather than each re-authenticating (thundering herd).
//!
//! The `Notify` is subscribed to *before* the state-changing guard is
//! dropped, which is what avoids the classic lost-wakeup race: a waiter
//! that loses the race to become the renewer is guaranteed to already be
//! registered before the renewer can call `notify_waiters`.

use std::future::Future;

use tokio::sync::{Mutex, Notify};
use ucr_schemas::TypedError;

#[derive(Debug, Clone)]
enum SessionState {
    Empty,
    Renewing,
    Ready(String),
}

pub struct SessionStore {
    state: Mutex<SessionState>,
    notify: Notify,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SessionState::Empty),
            notify: Notify::new(),
        }
    }

    /// Mark the current token invalid (called on `SessionExpired`).
    pub async fn invalidate(&self) {
        let mut guard = self.state.lock().await;
        *guard = SessionState::Empty;
    }

    /// Return the current ready token without triggering renewal, or
    /// `None` if no session is currently established.
    pub async fn peek(&self) -> Option<String> {
        match &*self.state.lock().await {
            SessionState::Ready(token) => Some(token.clone()),
            _ => None,
        }
    }

    /// Synchronous best-effort peek for callers that can't await (the
    /// `GusClient::current_session_id` trait accessor). A contended lock
    /// just reads as `None`, which is always a safe answer since the caller
    /// falls back to the REGON.
    pub fn try_peek(&self) -> Option<String> {
        match self.state.try_lock().ok()?.clone() {
            SessionState::Ready(token) => Some(token),
            _ => None,
        }
    }

    /// Return a ready token, renewing via `renew` if none exists. Concurrent
    /// callers observing `Renewing` wait on the in-flight renewal instead of
    /// starting their own.
    pub async fn get_or_renew<F, Fut>(&self, renew: F) -> Result<String, TypedError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, TypedError>>,
    {
        let mut renew = Some(renew);
        loop {
            let mut guard = self.state.lock().await;
            match &*guard {
                SessionState::Ready(token) => return Ok(token.clone()),
                SessionState::Renewing => {
                    let notified = self.notify.notified();
                    drop(guard);
                    notified.await;
                    continue;
                }
                SessionState::Empty => {
                    *guard = SessionState::Renewing;
                    drop(guard);
                    let renew = renew.take().expect("renew called at most once per loop entry");
                    let result = renew().await;
                    let mut guard = self.state.lock().await;
                    *guard = match &result {
                        Ok(token) => SessionState::Ready(token.clone()),
                        Err(_) => SessionState::Empty,
                    };
                    drop(guard);
                    self.notify.notify_waiters();
                    return result;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use ucr_schemas::{ErrorKind, UpstreamSource};

    #[tokio::test]
    async fn concurrent_renewals_collapse_into_one_call() {
        let store = Arc::new(SessionStore::new());
        let renew_calls = Arc::new(AtomicU32::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            let renew_calls = renew_calls.clone();
            handles.push(tokio::spawn(async move {
                store
                    .get_or_renew(|| {
                        renew_calls.fetch_add(1, Ordering::SeqCst);
                        async {
                            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                            Ok("token-1".to_string())
                        }
                    })
                    .await
            }));
        }

        for h in handles {
            assert_eq!(h.await.unwrap().unwrap(), "token-1");
        }
        assert_eq!(renew_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_renewal_leaves_store_empty_for_retry() {
        let store = SessionStore::new();
        let result = store
            .get_or_renew(|| async {
                Err(TypedError::new(
                    UpstreamSource::Gus,
                    ErrorKind::Unauthorized,
                    "bad key",
                ))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(store.peek().await, None);
    }

    #[tokio::test]
    async fn invalidate_then_renew_gets_fresh_token() {
        let store = SessionStore::new();
        store
            .get_or_renew(|| async { Ok("old".to_string()) })
            .await
            .unwrap();
        store.invalidate().await;
        assert_eq!(store.peek().await, None);
        let fresh = store
            .get_or_renew(|| async { Ok("new".to_string()) })
            .await
            .unwrap();
        assert_eq!(fresh, "new");
    }
}
