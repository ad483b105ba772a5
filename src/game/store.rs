use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::session::{SessionState, SubmitOutcome};
use crate::trivia::types::{GameSettings, NormalizedQuestion};

/// In-memory registry of active quiz sessions.
///
/// Each session is an independently owned [`SessionState`]; the pure
/// transition functions compute the next value and the write lock makes the
/// read-transition-swap atomic per call, which keeps duplicate rapid
/// submissions idempotent.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session already on the quiz screen with a fetched batch.
    pub async fn create(
        &self,
        settings: GameSettings,
        questions: Vec<NormalizedQuestion>,
    ) -> (Uuid, SessionState) {
        let state = SessionState::new(settings).with_questions(questions);
        let id = Uuid::new_v4();
        self.sessions.write().await.insert(id, state.clone());
        tracing::debug!(session.id = %id, "Session created");
        (id, state)
    }

    pub async fn snapshot(&self, id: Uuid) -> Option<SessionState> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn submit_answer(
        &self,
        id: Uuid,
        question_index: usize,
        chosen_answer: &str,
    ) -> Option<SubmitOutcome> {
        let mut sessions = self.sessions.write().await;
        let current = sessions.get(&id)?;
        let outcome = current.submit_answer(question_index, chosen_answer);
        if let SubmitOutcome::Scored { state, .. } = &outcome {
            sessions.insert(id, state.clone());
        }
        Some(outcome)
    }

    pub async fn advance(&self, id: Uuid) -> Option<SessionState> {
        let mut sessions = self.sessions.write().await;
        let next = sessions.get(&id)?.advance();
        sessions.insert(id, next.clone());
        Some(next)
    }

    pub async fn restart(&self, id: Uuid) -> Option<SessionState> {
        let mut sessions = self.sessions.write().await;
        let fresh = sessions.get(&id)?.restart();
        sessions.insert(id, fresh.clone());
        tracing::debug!(session.id = %id, "Session restarted");
        Some(fresh)
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            tracing::debug!(session.id = %id, "Session removed");
        }
        removed
    }
}
