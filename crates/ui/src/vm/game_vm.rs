use game_core::feedback::FeedbackState;
use game_core::model::GameKind;
use game_core::session::{
    ItemView, OptionView, Outcome, ReflexPhase, RoundView, SessionResult, SessionSnapshot, Stage,
    Verdict,
};
use services::ShellConfig;

/// Seconds at or below which the countdown turns urgent.
const LOW_SECONDS: u32 = 3;

#[must_use]
pub fn kind_label(kind: GameKind) -> &'static str {
    match kind {
        GameKind::Quiz => "Quiz",
        GameKind::Matching => "Match",
        GameKind::Reflex => "Speed round",
    }
}

/// CSS classes for a quiz option. Correctness only shows once revealed.
#[must_use]
pub fn option_class(option: &OptionView) -> &'static str {
    match (option.correct, option.chosen) {
        (None, _) => "quiz-option",
        (Some(true), _) => "quiz-option quiz-option--correct",
        (Some(false), true) => "quiz-option quiz-option--wrong",
        (Some(false), false) => "quiz-option quiz-option--muted",
    }
}

#[must_use]
pub fn item_class(item: &ItemView) -> &'static str {
    if item.selected {
        return "match-item match-item--selected";
    }
    match item.verdict {
        None => "match-item",
        Some(Verdict::Correct) => "match-item match-item--matched",
        Some(Verdict::Incorrect | Verdict::TimedOut) => "match-item match-item--missed",
    }
}

#[must_use]
pub fn progress_label(snapshot: &SessionSnapshot) -> String {
    let current = snapshot.current_level();
    let total = snapshot.total_levels();
    match snapshot.kind {
        GameKind::Matching => format!("Pair {current} of {total}"),
        GameKind::Quiz | GameKind::Reflex => format!("Question {current} of {total}"),
    }
}

/// Option buttons only take input while the session waits for an answer.
#[must_use]
pub fn answers_locked(stage: Stage) -> bool {
    stage != Stage::Idle
}

#[must_use]
pub fn score_label(score: u32, max_score: u32) -> String {
    format!("Score: {score} / {max_score}")
}

#[must_use]
pub fn countdown_label(round: &RoundView) -> String {
    match round.phase {
        ReflexPhase::Ready => format!("{}s per question", round.round_secs),
        ReflexPhase::Playing => format!("{}s", round.seconds_left),
        ReflexPhase::Finished => "Done".to_string(),
    }
}

#[must_use]
pub fn countdown_class(round: &RoundView) -> &'static str {
    if round.phase == ReflexPhase::Playing && round.seconds_left <= LOW_SECONDS {
        "countdown countdown--low"
    } else {
        "countdown"
    }
}

#[must_use]
pub fn result_headline(result: &SessionResult) -> &'static str {
    match result.outcome {
        Outcome::Success => "Great job!",
        Outcome::TryAgain => "Nice try! Practice makes perfect.",
    }
}

/// The "+N" flash after an answer.
#[must_use]
pub fn flash_text(feedback: &FeedbackState) -> Option<String> {
    feedback.flash_points.map(|points| format!("+{points}"))
}

#[must_use]
pub fn reward_line(config: &ShellConfig) -> String {
    format!("{} coins · {} XP", config.total_coins, config.total_xp)
}

// ─── TESTS ──────────────────────────────────────────────────────────────────
