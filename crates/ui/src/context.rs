use std::sync::Arc;

use game_core::model::GameId;
use services::{GameCatalog, PlayService};

pub trait UiApp: Send + Sync {
    fn start_game_id(&self) -> GameId;

    fn catalog(&self) -> Arc<GameCatalog>;
    fn play(&self) -> Arc<PlayService>;
}

#[derive(Clone)]
pub struct AppContext {
    start_game_id: GameId,
    catalog: Arc<GameCatalog>,
    play: Arc<PlayService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            start_game_id: app.start_game_id(),
            catalog: app.catalog(),
            play: app.play(),
        }
    }

    /// Game highlighted on the home page.
    #[must_use]
    pub fn start_game_id(&self) -> GameId {
        self.start_game_id
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

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
