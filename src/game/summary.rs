use serde::Serialize;

use super::session::{SessionState, Tally, has_won};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DifficultyStat {
    pub difficulty: &'static str,
    /// Rounded success percentage for this bucket.
    pub rate: u32,
    pub correct: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStat {
    pub category: String,
    pub rate: u32,
    pub correct: u32,
    pub total: u32,
}

/// Read-only results-screen summary derived from a session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsSummary {
    pub score: u32,
    pub correct_answers: u32,
    pub total_questions: usize,
    /// Rounded overall accuracy; 0 for an empty quiz.
    pub accuracy: u32,
    pub won: bool,
    /// Only difficulties with at least one answered question.
    pub by_difficulty: Vec<DifficultyStat>,
    /// Sorted by success rate, best first.
    pub by_category: Vec<CategoryStat>,
}

fn percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(correct) / f64::from(total) * 100.0).round() as u32
}

impl ResultsSummary {
    pub fn for_session(state: &SessionState) -> Self {
        let buckets: [(&'static str, Tally); 3] = [
            ("easy", state.question_breakdown.easy),
            ("medium", state.question_breakdown.medium),
            ("hard", state.question_breakdown.hard),
        ];
        let by_difficulty = buckets
            .into_iter()
            .filter(|(_, tally)| tally.total > 0)
            .map(|(difficulty, tally)| DifficultyStat {
                difficulty,
                rate: percentage(tally.correct, tally.total),
                correct: tally.correct,
                total: tally.total,
            })
            .collect();

        let mut by_category: Vec<CategoryStat> = state
            .category_breakdown
            .iter()
            .map(|(category, tally)| CategoryStat {
                category: category.clone(),
                rate: percentage(tally.correct, tally.total),
                correct: tally.correct,
                total: tally.total,
            })
            .collect();
        // Rate descending, name as a deterministic tie-break.
        by_category.sort_by(|a, b| b.rate.cmp(&a.rate).then_with(|| a.category.cmp(&b.category)));

        let total_questions = state.questions.len();
        Self {
            score: state.score,
            correct_answers: state.correct_answers,
            total_questions,
            accuracy: percentage(state.correct_answers, total_questions as u32),
            won: has_won(state.correct_answers as usize, total_questions),
            by_difficulty,
            by_category,
        }
    }
}
