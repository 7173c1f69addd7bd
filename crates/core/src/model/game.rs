use serde::{Deserialize, Serialize};

use crate::model::ids::GameId;

/// Interaction model a game is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    Quiz,
    Matching,
    Reflex,
}

impl GameKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GameKind::Quiz => "quiz",
            GameKind::Matching => "matching",
            GameKind::Reflex => "reflex",
        }
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry for a game. Content lives alongside in the game definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMeta {
    pub id: GameId,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub category: String,
    /// 1-based position within `category`.
    pub index: u32,
    pub kind: GameKind,
    #[serde(default)]
    pub coins: Option<u32>,
    #[serde(default)]
    pub xp: Option<u32>,
}

/// Coins and XP granted per level of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub coins: u32,
    pub xp: u32,
}

impl Rewards {
    pub const DEFAULT: Rewards = Rewards { coins: 5, xp: 10 };
}

impl Default for Rewards {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Where "next game" should lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextGame {
    pub game_id: GameId,
    pub route: String,
}

/// State handed to a game page by whoever navigated to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteState {
    #[serde(default)]
    pub next_game: Option<NextGame>,
    #[serde(default)]
    pub coins: Option<u32>,
    #[serde(default)]
    pub xp: Option<u32>,
}
