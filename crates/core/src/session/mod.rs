mod game;
mod matching;
mod outcome;
mod progression;
mod quiz;
mod reflex;
mod snapshot;

pub use game::{GameAction, GameSession};
pub use matching::{MatchAttempt, MatchingSession};
pub use outcome::{
    ActionOutcome, IgnoreReason, Judgement, Outcome, PassThreshold, SessionResult, Verdict,
};
pub use progression::{AdvanceTicket, PendingAdvance, Progression, Stage, TimingConfig};
pub use quiz::{AnswerRecord, QuizSession};
pub use reflex::{ReflexPhase, ReflexSession, TimerTicket};
pub use snapshot::{BoardView, ItemView, OptionView, QuestionView, RoundView, SessionSnapshot};
