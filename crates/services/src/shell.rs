use serde::Serialize;

use game_core::model::{GameId, GameKind, GameMeta, NextGame, Rewards};
use game_core::session::SessionSnapshot;

/// Everything the presentation shell renders around a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellConfig {
    pub title: String,
    pub subtitle: Option<String>,
    pub score: u32,
    pub current_level: usize,
    pub total_levels: usize,
    pub coins_per_level: u32,
    pub total_coins: u32,
    pub total_xp: u32,
    pub game_id: GameId,
    pub game_type: GameKind,
    pub show_game_over: bool,
    pub show_confetti: bool,
    pub max_score: u32,
    pub next_game: Option<NextGame>,
}

impl ShellConfig {
    #[must_use]
    pub fn build(
        meta: &GameMeta,
        rewards: Rewards,
        snapshot: &SessionSnapshot,
        next_game: Option<NextGame>,
    ) -> Self {
        let total_levels = snapshot.total_levels();
        let levels = u32::try_from(total_levels).unwrap_or(u32::MAX);
        let passed = snapshot.result.is_some_and(|result| result.passed());
        Self {
            title: meta.title.clone(),
            subtitle: meta.subtitle.clone(),
            score: snapshot.score,
            current_level: snapshot.current_level(),
            total_levels,
            coins_per_level: rewards.coins,
            total_coins: rewards.coins.saturating_mul(levels),
            total_xp: rewards.xp,
            game_id: meta.id,
            game_type: meta.kind,
            show_game_over: snapshot.is_complete(),
            show_confetti: passed || snapshot.feedback.show_answer_confetti,
            max_score: snapshot.max_score,
            next_game,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::catalog::GameCatalog;
    use game_core::model::OptionId;
    use game_core::rewards::resolve_rewards;
    use game_core::session::{ActionOutcome, GameAction};

    #[test]
    fn builds_from_live_quiz() {
        let catalog = GameCatalog::bundled().unwrap();
        let meta = catalog.get_game_data_by_id(GameId::new(101)).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = catalog.start_session(meta.id, &mut rng).unwrap();

        let ActionOutcome::Judged(_) = session.apply(GameAction::SelectOption(OptionId::new(1)))
        else {
            panic!("expected a judgement");
        };
        let rewards = resolve_rewards(Some(meta), None);
        let shell = ShellConfig::build(meta, rewards, &session.snapshot(), None);

        assert_eq!(shell.title, "Animal Sounds");
        assert_eq!(shell.score, 1);
        assert_eq!(shell.current_level, 1);
        assert_eq!(shell.total_levels, 5);
        assert_eq!(shell.total_coins, 25);
        assert_eq!(shell.total_xp, 10);
        assert_eq!(shell.game_type, GameKind::Quiz);
        assert!(shell.show_confetti);
        assert!(!shell.show_game_over);
    }
}
