use serde::{Deserialize, Serialize};

/// Per-game feedback behaviour, fixed when the session is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Points shown in the flash after a correct answer.
    pub points_per_correct: u32,
    pub confetti_on_correct: bool,
    /// Whether a wrong answer flashes at all (with zero points).
    pub flash_on_incorrect: bool,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            points_per_correct: 1,
            confetti_on_correct: true,
            flash_on_incorrect: true,
        }
    }
}

/// Transient answer feedback rendered by the shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackState {
    pub flash_points: Option<u32>,
    pub flash_correct: bool,
    pub show_answer_confetti: bool,
}

/// Owns the feedback state for one session.
#[derive(Debug, Clone, Default)]
pub struct Feedback {
    config: FeedbackConfig,
    state: FeedbackState,
}

impl Feedback {
    #[must_use]
    pub fn new(config: FeedbackConfig) -> Self {
        Self {
            config,
            state: FeedbackState::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &FeedbackConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> FeedbackState {
        self.state
    }

    pub fn show_correct_answer_feedback(&mut self, points_delta: u32, is_correct: bool) {
        if !is_correct && !self.config.flash_on_incorrect {
            self.state = FeedbackState::default();
            return;
        }
        self.state = FeedbackState {
            flash_points: Some(if is_correct { points_delta } else { 0 }),
            flash_correct: is_correct,
            show_answer_confetti: is_correct && self.config.confetti_on_correct,
        };
    }

    pub fn reset_feedback(&mut self) {
        self.state = FeedbackState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_answer_flashes_points_and_confetti() {
        let mut feedback = Feedback::new(FeedbackConfig::default());
        feedback.show_correct_answer_feedback(1, true);
        let state = feedback.state();
        assert_eq!(state.flash_points, Some(1));
        assert!(state.show_answer_confetti);

        feedback.reset_feedback();
        assert_eq!(feedback.state(), FeedbackState::default());
    }

    #[test]
    fn incorrect_answer_respects_config() {
        let mut feedback = Feedback::new(FeedbackConfig {
            flash_on_incorrect: false,
            ..FeedbackConfig::default()
        });
        feedback.show_correct_answer_feedback(1, false);
        assert_eq!(feedback.state().flash_points, None);

        let mut loud = Feedback::new(FeedbackConfig::default());
        loud.show_correct_answer_feedback(1, false);
        assert_eq!(loud.state().flash_points, Some(0));
        assert!(!loud.state().show_answer_confetti);
    }

    #[test]
    fn struct_update_keeps_remaining_defaults() {
        let config = FeedbackConfig {
            confetti_on_correct: false,
            ..FeedbackConfig::default()
        };
        assert_eq!(config.points_per_correct, 1);
        assert!(config.flash_on_incorrect);
    }
}
