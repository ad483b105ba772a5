use rand::Rng;
use rand::seq::SliceRandom;

use super::decode::decode_entities;
use super::types::{NormalizedQuestion, RawQuestion};

/// Turns one raw upstream question into its normalized form: decoded text
/// fields and a shuffled `all_answers` list with the correct answer mixed in.
///
/// `batch_ts` and `ordinal` together make the id unique within a fetch batch
/// (`q_<batch_ts>_<ordinal>`); the caller supplies the ordinal from the
/// upstream array position. The rng is injected so tests can seed it.
pub fn normalize(
    raw: RawQuestion,
    ordinal: usize,
    batch_ts: i64,
    rng: &mut impl Rng,
) -> NormalizedQuestion {
    let correct_answer = decode_entities(&raw.correct_answer);
    let incorrect_answers: Vec<String> = raw
        .incorrect_answers
        .iter()
        .map(|answer| decode_entities(answer))
        .collect();

    let mut all_answers = Vec::with_capacity(incorrect_answers.len() + 1);
    all_answers.push(correct_answer.clone());
    all_answers.extend(incorrect_answers.iter().cloned());
    all_answers.shuffle(rng);

    NormalizedQuestion {
        id: format!("q_{batch_ts}_{ordinal}"),
        category: raw.category,
        difficulty: raw.difficulty,
        question_type: raw.question_type,
        question: decode_entities(&raw.question),
        correct_answer,
        incorrect_answers,
        all_answers,
    }
}
