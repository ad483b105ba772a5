use rand::thread_rng;
use serde::Deserialize;
use thiserror::Error;

use super::normalize::normalize;
use super::types::{GameSettings, NormalizedQuestion, RawQuestion};

#[derive(Debug, Error)]
pub enum TriviaError {
    /// Network failure or a body that could not be read/parsed before an
    /// upstream status was available.
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Upstream answered with a non-zero `response_code`, e.g. no questions
    /// match the requested filters.
    #[error("upstream rejected the request (response_code {code})")]
    UpstreamRejected { code: i64 },
    /// Upstream reported success but the results array was missing or empty.
    /// Never surfaces as an empty-but-successful question list.
    #[error("upstream reported success but returned no usable results")]
    MalformedPayload,
}

#[derive(Debug, Deserialize)]
struct UpstreamEnvelope {
    response_code: i64,
    #[serde(default)]
    results: Option<Vec<RawQuestion>>,
}

/// Gateway to the public trivia-question API.
///
/// Issues exactly one outbound GET per call, with no retry and no timeout;
/// the caller owns surfacing errors and re-triggering a fresh fetch.
pub struct TriviaApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl TriviaApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[tracing::instrument(skip(self, settings), fields(
        trivia.amount = settings.amount,
        trivia.difficulty = ?settings.difficulty,
        trivia.category = %settings.category,
    ))]
    pub async fn fetch_questions(
        &self,
        settings: &GameSettings,
    ) -> Result<Vec<NormalizedQuestion>, TriviaError> {
        let url = format!("{}/api.php", self.base_url);
        let mut params: Vec<(&str, String)> = vec![("amount", settings.amount.to_string())];
        if let Some(difficulty) = settings.difficulty.upstream_param() {
            params.push(("difficulty", difficulty.to_string()));
        }
        if !settings.category.is_empty() {
            params.push(("category", settings.category.clone()));
        }
        if let Some(question_type) = settings.question_type {
            params.push(("type", question_type.upstream_param().to_string()));
        }

        tracing::debug!(upstream.url = %url, "Fetching trivia questions");

        let envelope: UpstreamEnvelope = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await?
            .json()
            .await?;

        if envelope.response_code != 0 {
            tracing::warn!(
                upstream.code = envelope.response_code,
                "Upstream rejected trivia request"
            );
            return Err(TriviaError::UpstreamRejected {
                code: envelope.response_code,
            });
        }

        let results = match envelope.results {
            Some(results) if !results.is_empty() => results,
            _ => {
                tracing::error!("Upstream returned success without results");
                return Err(TriviaError::MalformedPayload);
            }
        };

        let batch_ts = chrono::Utc::now().timestamp_millis();
        let mut rng = thread_rng();
        let questions: Vec<NormalizedQuestion> = results
            .into_iter()
            .enumerate()
            .map(|(ordinal, raw)| normalize(raw, ordinal, batch_ts, &mut rng))
            .collect();

        tracing::info!(questions.count = questions.len(), "Normalized trivia batch");
        Ok(questions)
    }
}
