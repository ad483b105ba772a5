use serde::{Deserialize, Serialize};

/// Default question count when a request does not specify one.
pub const DEFAULT_AMOUNT: u32 = 10;

/// Difficulty of a single question, as reported by the upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    /// Catch-all for values outside the upstream contract. Scores the
    /// easy-tier points and is excluded from the per-difficulty breakdown.
    Unknown,
}

impl From<String> for Difficulty {
    fn from(value: String) -> Self {
        match value.as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Unknown,
        }
    }
}

impl Difficulty {
    pub fn points(self) -> u32 {
        match self {
            Difficulty::Easy | Difficulty::Unknown => 10,
            Difficulty::Medium => 20,
            Difficulty::Hard => 30,
        }
    }
}

/// Difficulty selection in game settings. `Random` is a sentinel meaning
/// "mix all difficulties" and is never sent upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyFilter {
    #[default]
    Easy,
    Medium,
    Hard,
    Random,
}

impl DifficultyFilter {
    pub fn upstream_param(self) -> Option<&'static str> {
        match self {
            DifficultyFilter::Easy => Some("easy"),
            DifficultyFilter::Medium => Some("medium"),
            DifficultyFilter::Hard => Some("hard"),
            DifficultyFilter::Random => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Multiple,
    Boolean,
}

impl QuestionType {
    pub fn upstream_param(self) -> &'static str {
        match self {
            QuestionType::Multiple => "multiple",
            QuestionType::Boolean => "boolean",
        }
    }
}

/// One question exactly as the upstream returns it. Text fields may contain
/// HTML entity references; immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawQuestion {
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub question_type: Option<QuestionType>,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

/// A question after decoding and answer shuffling.
///
/// `all_answers` is a permutation of {correct_answer} ∪ incorrect_answers,
/// so its length is always `incorrect_answers.len() + 1`. `id` is unique
/// within one fetch batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedQuestion {
    pub id: String,
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub question_type: Option<QuestionType>,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    pub all_answers: Vec<String>,
}

/// Settings a player picks on the setup screen. The question slider in the
/// UI covers 5–20; the backend does not enforce that range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub difficulty: DifficultyFilter,
    /// Opaque upstream category id; empty means "any category".
    pub category: String,
    pub amount: u32,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub question_type: Option<QuestionType>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            difficulty: DifficultyFilter::default(),
            category: String::new(),
            amount: DEFAULT_AMOUNT,
            question_type: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
}

/// The upstream's category catalog, offered to setup screens. The empty id
/// selects any category.
pub const CATEGORIES: &[Category] = &[
    Category { id: "", name: "Any Category" },
    Category { id: "9", name: "General Knowledge" },
    Category { id: "10", name: "Entertainment: Books" },
    Category { id: "11", name: "Entertainment: Film" },
    Category { id: "12", name: "Entertainment: Music" },
    Category { id: "13", name: "Entertainment: Musicals & Theatres" },
    Category { id: "14", name: "Entertainment: Television" },
    Category { id: "15", name: "Entertainment: Video Games" },
    Category { id: "16", name: "Entertainment: Board Games" },
    Category { id: "17", name: "Science & Nature" },
    Category { id: "18", name: "Science: Computers" },
    Category { id: "19", name: "Science: Mathematics" },
    Category { id: "20", name: "Mythology" },
    Category { id: "21", name: "Sports" },
    Category { id: "22", name: "Geography" },
    Category { id: "23", name: "History" },
    Category { id: "24", name: "Politics" },
    Category { id: "25", name: "Art" },
    Category { id: "26", name: "Celebrities" },
    Category { id: "27", name: "Animals" },
    Category { id: "28", name: "Vehicles" },
    Category { id: "29", name: "Entertainment: Comics" },
    Category { id: "30", name: "Science: Gadgets" },
    Category { id: "31", name: "Entertainment: Japanese Anime & Manga" },
    Category { id: "32", name: "Entertainment: Cartoon & Animations" },
];
