use std::sync::Arc;

use crate::game::store::SessionStore;
use crate::trivia::client::TriviaApiClient;

#[derive(Clone)]
pub struct AppState {
    pub trivia: Arc<TriviaApiClient>,
    pub sessions: Arc<SessionStore>,
}
