use std::sync::Mutex;
use std::sync::mpsc::{Receiver, Sender, channel};

/// An authenticated session. Issuance and validation live with the external
/// auth provider; this layer only carries the identity around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Session),
    SignedOut,
}

/// Explicitly constructed session holder with a change subscription.
///
/// Consumers subscribe and re-read on notification; there is no ambient
/// global. Dead subscribers are dropped on the next publish.
#[derive(Default)]
pub struct SessionHub {
    current: Mutex<Option<Session>>,
    subscribers: Mutex<Vec<Sender<SessionEvent>>>,
}

impl SessionHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        let hub = Self::new();
        *hub.current.lock().unwrap() = Some(session);
        hub
    }

    pub fn get(&self) -> Option<Session> {
        self.current.lock().unwrap().clone()
    }

    pub fn sign_in(&self, session: Session) {
        *self.current.lock().unwrap() = Some(session.clone());
        self.publish(SessionEvent::SignedIn(session));
    }

    pub fn sign_out(&self) {
        *self.current.lock().unwrap() = None;
        self.publish(SessionEvent::SignedOut);
    }

    pub fn subscribe(&self) -> Receiver<SessionEvent> {
        let (tx, rx) = channel();
        self.subscribers.lock().unwrap().push(tx);
        rx
    }

    fn publish(&self, event: SessionEvent) {
        self.subscribers
            .lock()
            .unwrap()
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}
