use std::sync::Arc;

use tracing::warn;

use game_core::Clock;
use game_core::model::{GameId, NextGame, RouteState};
use game_core::rewards::resolve_rewards;
use game_core::session::SessionSnapshot;

use crate::catalog::GameCatalog;
use crate::driver::SessionDriver;
use crate::error::CatalogError;
use crate::navigation::resolve_next_game;
use crate::shell::ShellConfig;

/// Starts games from the catalog and derives what the shell shows around them.
#[derive(Clone)]
pub struct PlayService {
    clock: Clock,
    catalog: Arc<GameCatalog>,
}

impl PlayService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<GameCatalog>) -> Self {
        Self { clock, catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<GameCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Start a fresh driven session for `game_id`.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownGame` if the game is not in the catalog.
    pub fn start(&self, game_id: GameId) -> Result<SessionDriver, CatalogError> {
        let session = self.catalog.start_session(game_id, &mut rand::rng())?;
        Ok(SessionDriver::new(game_id, session, self.clock))
    }

    #[must_use]
    pub fn next_game(&self, game_id: GameId, route: Option<&RouteState>) -> Option<NextGame> {
        resolve_next_game(&self.catalog, game_id, route)
    }

    /// Shell props for the current state of a game.
    ///
    /// Returns `None` when `game_id` is unknown.
    #[must_use]
    pub fn shell_config(
        &self,
        game_id: GameId,
        route: Option<&RouteState>,
        snapshot: &SessionSnapshot,
    ) -> Option<ShellConfig> {
        let Some(meta) = self.catalog.get_game_data_by_id(game_id) else {
            warn!(%game_id, "no metadata for game; shell not built");
            return None;
        };
        let rewards = resolve_rewards(Some(meta), route);
        let next_game = self.next_game(game_id, route);
        Some(ShellConfig::build(meta, rewards, snapshot, next_game))
    }
}

#[cfg(test)]
mod tests {
    use game_core::session::GameAction;
    use game_core::model::OptionId;

    use super::*;

    fn service() -> PlayService {
        let catalog = GameCatalog::bundled().expect("bundled catalog");
        PlayService::new(game_core::time::fixed_clock(), Arc::new(catalog))
    }

    #[tokio::test]
    async fn start_returns_driver_for_known_game() {
        let play = service();
        let driver = play.start(GameId::new(101)).expect("start");
        assert_eq!(driver.game_id(), GameId::new(101));
        assert_eq!(driver.started_at(), game_core::time::fixed_now());
        assert_eq!(driver.snapshot().score, 0);
    }

    #[tokio::test]
    async fn start_rejects_unknown_game() {
        let err = service().start(GameId::new(9999)).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownGame(id) if id == GameId::new(9999)));
    }

    #[tokio::test]
    async fn shell_config_uses_catalog_rewards_and_next_game() {
        let play = service();
        let driver = play.start(GameId::new(101)).expect("start");
        driver.dispatch(GameAction::SelectOption(OptionId::new(1)));

        let shell = play
            .shell_config(GameId::new(101), None, &driver.snapshot())
            .expect("shell");
        assert_eq!(shell.title, "Animal Sounds");
        assert_eq!(shell.score, 1);
        assert_eq!(
            shell.next_game.map(|next| next.game_id),
            Some(GameId::new(102))
        );
    }

    #[test]
    fn shell_config_is_none_for_unknown_game() {
        let play = service();
        let catalog = play.catalog();
        let session = catalog
            .start_session(GameId::new(101), &mut rand::rng())
            .expect("session");
        assert!(
            play.shell_config(GameId::new(4242), None, &session.snapshot())
                .is_none()
        );
    }
}
