use std::sync::Arc;

use serde::{Deserialize, Serialize};

use game_core::feedback::FeedbackConfig;
use game_core::model::{
    GameId, GameKind, GameMeta, MatchItem, MatchPair, PairBank, QuestionBank, QuizOption,
    QuizQuestion,
};
use game_core::session::{PassThreshold, TimingConfig};

use crate::error::CatalogError;

//
// ─── FILE FORMAT ───────────────────────────────────────────────────────────────
//

/// One game file as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDefinition {
    pub id: GameId,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub category: String,
    pub index: u32,
    #[serde(default)]
    pub coins: Option<u32>,
    #[serde(default)]
    pub xp: Option<u32>,
    #[serde(default)]
    pub pass_threshold: PassThreshold,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
    #[serde(flatten)]
    pub content: GameContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameContent {
    Quiz {
        questions: Vec<QuestionDef>,
    },
    Matching {
        left: Vec<ItemDef>,
        right: Vec<ItemDef>,
        matches: Vec<PairDef>,
    },
    Reflex {
        questions: Vec<QuestionDef>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDef {
    pub id: u64,
    pub prompt: String,
    pub options: Vec<OptionDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDef {
    pub id: u64,
    pub label: String,
    #[serde(default)]
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: u64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairDef {
    pub left: u64,
    pub right: u64,
}

//
// ─── COMPILED FORM ─────────────────────────────────────────────────────────────
//

/// Validated content ready to seed sessions.
#[derive(Debug, Clone)]
pub enum GameBank {
    Quiz(Arc<QuestionBank>),
    Matching(Arc<PairBank>),
    Reflex(Arc<QuestionBank>),
}

/// A validated catalog entry.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub meta: GameMeta,
    pub bank: GameBank,
    pub timing: TimingConfig,
    pub feedback: FeedbackConfig,
    pub pass_threshold: PassThreshold,
}

impl GameContent {
    #[must_use]
    pub fn kind(&self) -> GameKind {
        match self {
            GameContent::Quiz { .. } => GameKind::Quiz,
            GameContent::Matching { .. } => GameKind::Matching,
            GameContent::Reflex { .. } => GameKind::Reflex,
        }
    }
}

impl GameDefinition {
    /// Parse a single JSON game file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` when the JSON does not match the game format.
    pub fn from_json(file: &str, raw: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(raw).map_err(|source| CatalogError::Parse {
            file: file.to_string(),
            source,
        })
    }

    /// Validate the content and build a catalog entry.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Invalid` if the questions or pairs break their invariants.
    pub fn compile(self) -> Result<CatalogEntry, CatalogError> {
        let id = self.id;
        let invalid = |source: game_core::Error| CatalogError::Invalid { game: id, source };

        let meta = GameMeta {
            id,
            slug: self.slug,
            title: self.title,
            subtitle: self.subtitle,
            category: self.category,
            index: self.index,
            kind: self.content.kind(),
            coins: self.coins,
            xp: self.xp,
        };
        let bank = match self.content {
            GameContent::Quiz { questions } => {
                GameBank::Quiz(Arc::new(question_bank(questions).map_err(invalid)?))
            }
            GameContent::Reflex { questions } => {
                GameBank::Reflex(Arc::new(question_bank(questions).map_err(invalid)?))
            }
            GameContent::Matching {
                left,
                right,
                matches,
            } => {
                let bank = PairBank::new(
                    left.into_iter().map(ItemDef::into_item).collect(),
                    right.into_iter().map(ItemDef::into_item).collect(),
                    matches
                        .into_iter()
                        .map(|pair| MatchPair::new(pair.left, pair.right))
                        .collect(),
                )
                .map_err(|err| invalid(err.into()))?;
                GameBank::Matching(Arc::new(bank))
            }
        };

        Ok(CatalogEntry {
            meta,
            bank,
            timing: self.timing,
            feedback: self.feedback,
            pass_threshold: self.pass_threshold,
        })
    }
}

impl ItemDef {
    fn into_item(self) -> MatchItem {
        MatchItem::new(self.id, self.label)
    }
}

fn question_bank(questions: Vec<QuestionDef>) -> Result<QuestionBank, game_core::Error> {
    let questions = questions
        .into_iter()
        .map(|q| {
            let options = q
                .options
                .into_iter()
                .map(|o| QuizOption::new(o.id, o.label, o.correct))
                .collect();
            QuizQuestion::new(q.id, q.prompt, options)
        })
        .collect();
    Ok(QuestionBank::new(questions)?)
}
