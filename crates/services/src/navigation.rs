use tracing::warn;

use game_core::model::{GameId, NextGame, RouteState};

use crate::catalog::GameCatalog;
use crate::error::CatalogError;

/// Router path for a game page.
#[must_use]
pub fn game_route(id: GameId) -> String {
    format!("/play/{id}")
}

/// Where "next game" leads after `current`.
///
/// Route state wins. Otherwise the next entry of the current game's category is
/// used; the last game of a category has none.
#[must_use]
pub fn resolve_next_game(
    catalog: &GameCatalog,
    current: GameId,
    route: Option<&RouteState>,
) -> Option<NextGame> {
    if let Some(next) = route.and_then(|route| route.next_game.clone()) {
        return Some(next);
    }
    match next_in_category(catalog, current) {
        Ok(next) => next,
        Err(err) => {
            warn!(game_id = %current, error = %err, "could not resolve next game");
            None
        }
    }
}

fn next_in_category(
    catalog: &GameCatalog,
    current: GameId,
) -> Result<Option<NextGame>, CatalogError> {
    let meta = catalog
        .get_game_data_by_id(current)
        .ok_or(CatalogError::UnknownGame(current))?;
    let wanted = meta.index.saturating_add(1);
    Ok(catalog
        .games_in_category(&meta.category)
        .into_iter()
        .find(|game| game.index == wanted)
        .map(|game| NextGame {
            game_id: game.id,
            route: game_route(game.id),
        }))
}
