use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use game_core::model::GameId;

use crate::Clock;
use crate::catalog::GameCatalog;
use crate::error::{AppServicesError, CatalogError};
use crate::play::PlayService;

/// Assembles app-facing services and resolves a usable starting game.
#[derive(Clone)]
pub struct AppServices {
    game_id: GameId,
    catalog: Arc<GameCatalog>,
    play: Arc<PlayService>,
}

impl AppServices {
    /// Build services from the bundled games, extended by `*.json` files in
    /// `catalog_dir` when given.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if a game file fails to load or the catalog is empty.
    pub fn new(
        catalog_dir: Option<&Path>,
        clock: Clock,
        preferred_game_id: Option<GameId>,
    ) -> Result<Self, AppServicesError> {
        let mut catalog = GameCatalog::bundled()?;
        if let Some(dir) = catalog_dir {
            catalog = catalog.merge(GameCatalog::from_dir(dir)?)?;
        }
        Self::from_catalog(catalog, clock, preferred_game_id)
    }

    /// Build services over an already loaded catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the catalog is empty.
    pub fn from_catalog(
        catalog: GameCatalog,
        clock: Clock,
        preferred_game_id: Option<GameId>,
    ) -> Result<Self, AppServicesError> {
        let game_id = ensure_start_game(&catalog, preferred_game_id)?;
        info!(games = catalog.len(), start = %game_id, "catalog ready");

        let catalog = Arc::new(catalog);
        let play = Arc::new(PlayService::new(clock, Arc::clone(&catalog)));
        Ok(Self {
            game_id,
            catalog,
            play,
        })
    }

    #[must_use]
    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<GameCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn play(&self) -> Arc<PlayService> {
        Arc::clone(&self.play)
    }
}

fn ensure_start_game(
    catalog: &GameCatalog,
    preferred_id: Option<GameId>,
) -> Result<GameId, CatalogError> {
    if let Some(id) = preferred_id {
        if catalog.get_game_data_by_id(id).is_some() {
            return Ok(id);
        }
        warn!(game_id = %id, "requested game not in catalog; using first game");
    }
    catalog
        .first_game()
        .map(|meta| meta.id)
        .ok_or(CatalogError::Empty)
}
