use tokio::sync::watch;

use crate::models::UserProfile;

/// Sink for the process-wide "current user".
pub trait SessionStore: Send + Sync {
    fn set_current_user(&self, user: UserProfile);
}

/// Process-wide current-user state backed by a watch channel, so listeners
/// can follow every update while readers just take the latest value.
pub struct SharedSession {
    current: watch::Sender<Option<UserProfile>>,
}

impl SharedSession {
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self { current }
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.current.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.current.subscribe()
    }
}

impl Default for SharedSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for SharedSession {
    fn set_current_user(&self, user: UserProfile) {
        // send_replace stores the value even when nobody is subscribed.
        self.current.send_replace(Some(user));
    }
}
