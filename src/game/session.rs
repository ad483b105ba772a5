//! Quiz session state machine.
//!
//! All transitions are pure: they take `&self` and return a new value, so a
//! stale reference held by a caller stays observably unchanged. The session
//! registry swaps the returned state in under its lock.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::trivia::types::{Difficulty, GameSettings, NormalizedQuestion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Setup,
    Quiz,
    Results,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub correct: u32,
    pub total: u32,
}

impl Tally {
    fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }
}

/// Per-difficulty counters. All three buckets exist from the moment a quiz
/// starts; questions with an out-of-contract difficulty have no bucket and
/// stay out of these numbers entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBreakdown {
    pub easy: Tally,
    pub medium: Tally,
    pub hard: Tally,
}

impl QuestionBreakdown {
    fn tally_mut(&mut self, difficulty: Difficulty) -> Option<&mut Tally> {
        match difficulty {
            Difficulty::Easy => Some(&mut self.easy),
            Difficulty::Medium => Some(&mut self.medium),
            Difficulty::Hard => Some(&mut self.hard),
            Difficulty::Unknown => None,
        }
    }
}

/// Number of correct answers needed to win a quiz of `total_questions`.
pub fn win_threshold(total_questions: usize) -> usize {
    (total_questions as f64 * 0.7).ceil() as usize
}

/// True once `correct_answers` reaches the 70% ceiling-rounded threshold.
/// An empty quiz trivially satisfies the condition.
pub fn has_won(correct_answers: usize, total_questions: usize) -> bool {
    correct_answers >= win_threshold(total_questions)
}

#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Duplicate or out-of-phase submission; nothing changed, not an error.
    Ignored,
    Scored {
        state: SessionState,
        points: u32,
        is_correct: bool,
        /// True exactly once per session, the first time the win threshold
        /// is reached.
        newly_won: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub screen: Screen,
    pub settings: GameSettings,
    pub questions: Vec<NormalizedQuestion>,
    /// 0-based, monotonically increasing while on the quiz screen.
    pub current_question: usize,
    pub score: u32,
    pub correct_answers: u32,
    pub question_breakdown: QuestionBreakdown,
    /// Keys appear lazily on the first answered question of a category.
    pub category_breakdown: HashMap<String, Tally>,
    pub win_announced: bool,
    /// Question indices already scored; guards against double counting.
    #[serde(skip)]
    answered: HashSet<usize>,
}

impl SessionState {
    pub fn new(settings: GameSettings) -> Self {
        Self {
            screen: Screen::Setup,
            settings,
            questions: Vec::new(),
            current_question: 0,
            score: 0,
            correct_answers: 0,
            question_breakdown: QuestionBreakdown::default(),
            category_breakdown: HashMap::new(),
            win_announced: false,
            answered: HashSet::new(),
        }
    }

    /// Installs a freshly fetched batch and enters the quiz screen.
    /// Counters, breakdowns and the answered-set all start from zero.
    pub fn with_questions(&self, questions: Vec<NormalizedQuestion>) -> Self {
        Self {
            screen: Screen::Quiz,
            settings: self.settings.clone(),
            questions,
            current_question: 0,
            score: 0,
            correct_answers: 0,
            question_breakdown: QuestionBreakdown::default(),
            category_breakdown: HashMap::new(),
            win_announced: false,
            answered: HashSet::new(),
        }
    }

    /// Scores one submitted answer.
    ///
    /// Returns [`SubmitOutcome::Ignored`] when the session is not on the
    /// quiz screen, the index is out of range, or the question was already
    /// scored; a given index can increment the counters at most once.
    pub fn submit_answer(&self, question_index: usize, chosen_answer: &str) -> SubmitOutcome {
        if self.screen != Screen::Quiz || self.is_answered(question_index) {
            return SubmitOutcome::Ignored;
        }
        let Some(question) = self.questions.get(question_index) else {
            return SubmitOutcome::Ignored;
        };

        // Exact post-decode text equality.
        let is_correct = chosen_answer == question.correct_answer;
        let points = question.difficulty.points();

        let mut next = self.clone();
        next.answered.insert(question_index);
        if is_correct {
            next.score += points;
            next.correct_answers += 1;
        }
        if let Some(tally) = next.question_breakdown.tally_mut(question.difficulty) {
            tally.record(is_correct);
        }
        next.category_breakdown
            .entry(question.category.clone())
            .or_default()
            .record(is_correct);

        let newly_won = !next.win_announced
            && has_won(next.correct_answers as usize, next.questions.len());
        if newly_won {
            next.win_announced = true;
        }

        SubmitOutcome::Scored {
            state: next,
            points,
            is_correct,
            newly_won,
        }
    }

    /// Moves to the next question, or to the results screen after the last.
    pub fn advance(&self) -> Self {
        let mut next = self.clone();
        if next.screen != Screen::Quiz {
            return next;
        }
        if next.current_question + 1 < next.questions.len() {
            next.current_question += 1;
        } else {
            next.screen = Screen::Results;
        }
        next
    }

    /// Wholesale replacement: a fresh setup-screen state with default
    /// settings. Nothing from the old session is recycled.
    pub fn restart(&self) -> Self {
        Self::new(GameSettings::default())
    }

    pub fn is_answered(&self, question_index: usize) -> bool {
        self.answered.contains(&question_index)
    }
}
