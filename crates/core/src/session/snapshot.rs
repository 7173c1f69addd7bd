use serde::Serialize;

use crate::feedback::FeedbackState;
use crate::model::{GameKind, ItemId, OptionId, QuestionId};

use super::outcome::{SessionResult, Verdict};
use super::progression::Stage;
use super::reflex::ReflexPhase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub id: OptionId,
    pub label: String,
    pub chosen: bool,
    /// Revealed once the question has been answered.
    pub correct: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub id: QuestionId,
    /// 1-based.
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub verdict: Option<Verdict>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub id: ItemId,
    pub label: String,
    pub selected: bool,
    /// Set once the item took part in an attempt.
    pub verdict: Option<Verdict>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub left: Vec<ItemView>,
    /// Right column in display order.
    pub right: Vec<ItemView>,
    pub resolved: usize,
    pub total: usize,
    pub can_confirm: bool,
    pub last_verdict: Option<Verdict>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundView {
    pub phase: ReflexPhase,
    pub seconds_left: u32,
    pub round_secs: u32,
}

/// Everything a view needs to render a session at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub kind: GameKind,
    pub stage: Stage,
    pub score: u32,
    pub max_score: u32,
    pub result: Option<SessionResult>,
    pub question: Option<QuestionView>,
    pub board: Option<BoardView>,
    pub round: Option<RoundView>,
    pub feedback: FeedbackState,
}

impl SessionSnapshot {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    /// 1-based level shown by the shell.
    #[must_use]
    pub fn current_level(&self) -> usize {
        if let Some(question) = &self.question {
            return question.number;
        }
        if let Some(board) = &self.board {
            return (board.resolved + 1).min(board.total);
        }
        1
    }

    #[must_use]
    pub fn total_levels(&self) -> usize {
        self.question
            .as_ref()
            .map(|q| q.total)
            .or_else(|| self.board.as_ref().map(|b| b.total))
            .unwrap_or(1)
    }
}
