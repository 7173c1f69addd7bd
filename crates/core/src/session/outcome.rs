use serde::{Deserialize, Serialize};

use super::progression::AdvanceTicket;

/// Judgement of a single resolution. No partial credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
    /// The round clock ran out. Scored as incorrect.
    TimedOut,
}

impl Verdict {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// Result of judging an answer or a confirmed pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Judgement {
    pub verdict: Verdict,
    pub score: u32,
    /// Ticket the scheduler must present once the feedback delay has elapsed.
    pub ticket: AdvanceTicket,
}

/// Which presentation branch a finished session shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    TryAgain,
}

/// Score needed to see the success branch. Never gates progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassThreshold(Option<u32>);

impl PassThreshold {
    #[must_use]
    pub fn at_least(min_score: u32) -> Self {
        Self(Some(min_score))
    }

    /// 60% of `max_score`, rounded up.
    #[must_use]
    pub fn proportional() -> Self {
        Self(None)
    }

    #[must_use]
    pub fn min_score(self, max_score: u32) -> u32 {
        match self.0 {
            Some(min) => min.min(max_score),
            None => (max_score * 3).div_ceil(5),
        }
    }

    #[must_use]
    pub fn outcome(self, score: u32, max_score: u32) -> Outcome {
        if score >= self.min_score(max_score) {
            Outcome::Success
        } else {
            Outcome::TryAgain
        }
    }
}

/// Frozen result of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionResult {
    pub final_score: u32,
    pub max_score: u32,
    pub outcome: Outcome,
}

impl SessionResult {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

/// Why an action was dropped by an early-return guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    SessionComplete,
    AlreadyAnswered,
    UnknownOption,
    UnknownItem,
    AlreadyResolved,
    IncompleteSelection,
    FeedbackPending,
    NotPlaying,
    AlreadyStarted,
    StaleTicket,
    WrongGameKind,
}

/// What applying an action did to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Judged(Judgement),
    Selected,
    Started,
    Ticked { seconds_left: u32 },
    Advanced,
    Completed(SessionResult),
    Reset,
    Ignored(IgnoreReason),
}

impl ActionOutcome {
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, ActionOutcome::Ignored(_))
    }
}
