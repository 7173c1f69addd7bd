use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use game_core::model::{DisplayOrder, GameId, GameMeta};
use game_core::session::{GameSession, MatchingSession, QuizSession, ReflexSession};

use crate::error::CatalogError;
use super::definition::{CatalogEntry, GameBank, GameDefinition};

/// Game files shipped with the crate.
const BUNDLED: &[(&str, &str)] = &[
    ("animal-sounds.json", include_str!("../../data/animal-sounds.json")),
    ("baby-animals.json", include_str!("../../data/baby-animals.json")),
    ("planets.json", include_str!("../../data/planets.json")),
    ("quick-sums.json", include_str!("../../data/quick-sums.json")),
    ("shapes.json", include_str!("../../data/shapes.json")),
    ("times-tables.json", include_str!("../../data/times-tables.json")),
    ("feelings.json", include_str!("../../data/feelings.json")),
];

/// Validated, read-only set of games keyed by id.
#[derive(Debug, Clone, Default)]
pub struct GameCatalog {
    entries: BTreeMap<GameId, CatalogEntry>,
}

impl GameCatalog {
    /// Load the games bundled with the binary.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if a bundled file fails to parse or validate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json_sources(BUNDLED.iter().copied())
    }

    /// Load every `*.json` file in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` for unreadable paths and parse/validation errors
    /// for bad files.
    pub fn from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let io_err = |source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();

        let mut sources = Vec::with_capacity(files.len());
        for path in files {
            let raw = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;
            sources.push((path.display().to_string(), raw));
        }
        info!(dir = %dir.display(), files = sources.len(), "loading game catalog");
        Self::from_json_sources(sources.iter().map(|(name, raw)| (name.as_str(), raw.as_str())))
    }

    /// Parse `(file name, json)` pairs into a catalog.
    ///
    /// # Errors
    ///
    /// Returns the first parse, validation or uniqueness error encountered.
    pub fn from_json_sources<'a>(
        sources: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, CatalogError> {
        let definitions = sources
            .into_iter()
            .map(|(file, raw)| GameDefinition::from_json(file, raw))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_definitions(definitions)
    }

    /// # Errors
    ///
    /// Returns `CatalogError` if a definition is invalid, an id repeats, or two
    /// games share an index within a category.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = GameDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for definition in definitions {
            catalog.insert(definition.compile()?)?;
        }
        Ok(catalog)
    }

    /// Add the games of `other`, rejecting clashes.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateGame` or `CatalogError::DuplicateIndex` on clashes.
    pub fn merge(mut self, other: GameCatalog) -> Result<Self, CatalogError> {
        for entry in other.entries.into_values() {
            self.insert(entry)?;
        }
        Ok(self)
    }

    fn insert(&mut self, entry: CatalogEntry) -> Result<(), CatalogError> {
        let meta = &entry.meta;
        if self.entries.contains_key(&meta.id) {
            return Err(CatalogError::DuplicateGame(meta.id));
        }
        let clash = self
            .entries
            .values()
            .any(|other| other.meta.category == meta.category && other.meta.index == meta.index);
        if clash {
            return Err(CatalogError::DuplicateIndex {
                category: meta.category.clone(),
                index: meta.index,
            });
        }
        debug!(game_id = %meta.id, slug = %meta.slug, kind = %meta.kind, "catalog entry added");
        self.entries.insert(meta.id, entry);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Metadata lookup by id.
    #[must_use]
    pub fn get_game_data_by_id(&self, id: GameId) -> Option<&GameMeta> {
        self.entries.get(&id).map(|entry| &entry.meta)
    }

    #[must_use]
    pub fn entry(&self, id: GameId) -> Option<&CatalogEntry> {
        self.entries.get(&id)
    }

    pub fn games(&self) -> impl Iterator<Item = &GameMeta> {
        self.entries.values().map(|entry| &entry.meta)
    }

    #[must_use]
    pub fn first_game(&self) -> Option<&GameMeta> {
        self.categories()
            .first()
            .and_then(|category| self.games_in_category(category).into_iter().next())
    }

    /// Games in `category`, ordered by their index.
    #[must_use]
    pub fn games_in_category(&self, category: &str) -> Vec<&GameMeta> {
        let mut games: Vec<_> = self.games().filter(|meta| meta.category == category).collect();
        games.sort_by_key(|meta| meta.index);
        games
    }

    /// Category names, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let unique: HashSet<&str> = self.games().map(|meta| meta.category.as_str()).collect();
        let mut categories: Vec<_> = unique.into_iter().collect();
        categories.sort_unstable();
        categories
    }

    /// Build a fresh session for `id`. Matching boards get a shuffled right column.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownGame` if `id` is not in the catalog.
    pub fn start_session<R: Rng + ?Sized>(
        &self,
        id: GameId,
        rng: &mut R,
    ) -> Result<GameSession, CatalogError> {
        let entry = self.entries.get(&id).ok_or(CatalogError::UnknownGame(id))?;
        let session = match &entry.bank {
            GameBank::Quiz(bank) => GameSession::quiz(
                QuizSession::new(bank.clone(), entry.timing, entry.pass_threshold),
                entry.feedback,
            ),
            GameBank::Reflex(bank) => GameSession::reflex(
                ReflexSession::new(QuizSession::new(
                    bank.clone(),
                    entry.timing,
                    entry.pass_threshold,
                )),
                entry.feedback,
            ),
            GameBank::Matching(bank) => {
                let mut positions: Vec<usize> = (0..bank.right().len()).collect();
                positions.shuffle(rng);
                let order = DisplayOrder::from_permutation(positions).map_err(|err| {
                    CatalogError::Invalid {
                        game: id,
                        source: err.into(),
                    }
                })?;
                let matching =
                    MatchingSession::new(bank.clone(), order, entry.timing, entry.pass_threshold)
                        .map_err(|err| CatalogError::Invalid {
                            game: id,
                            source: err.into(),
                        })?;
                GameSession::matching(matching, entry.feedback)
            }
        };
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use game_core::model::{GameKind, PairBank, QuestionBank};

    fn bundled() -> GameCatalog {
        GameCatalog::bundled().expect("bundled catalog should load")
    }

    #[test]
    fn bundled_games_validate_with_unique_ids() {
        let catalog = bundled();
        assert_eq!(catalog.len(), BUNDLED.len());
        let kinds: HashSet<_> = catalog.games().map(|meta| meta.kind).collect();
        assert!(kinds.contains(&GameKind::Quiz));
        assert!(kinds.contains(&GameKind::Matching));
        assert!(kinds.contains(&GameKind::Reflex));
    }

    #[test]
    fn category_indices_are_contiguous() {
        let catalog = bundled();
        for category in catalog.categories() {
            let indices: Vec<_> = catalog
                .games_in_category(category)
                .iter()
                .map(|meta| meta.index)
                .collect();
            let expected: Vec<u32> = (1..=u32::try_from(indices.len()).unwrap()).collect();
            assert_eq!(indices, expected, "category {category}");
        }
    }

    #[test]
    fn bundled_quizzes_have_one_correct_option_each() {
        let catalog = bundled();
        for meta in catalog.games() {
            let entry = catalog.entry(meta.id).unwrap();
            let bank: Option<&QuestionBank> = match &entry.bank {
                GameBank::Quiz(bank) | GameBank::Reflex(bank) => Some(bank.as_ref()),
                GameBank::Matching(_) => None,
            };
            for question in bank.map(QuestionBank::questions).unwrap_or_default() {
                let correct = question.options.iter().filter(|o| o.is_correct).count();
                assert_eq!(correct, 1, "{} question {}", meta.slug, question.id);
            }
        }
    }

    #[test]
    fn bundled_boards_are_perfect_matchings() {
        let catalog = bundled();
        for meta in catalog.games() {
            let GameBank::Matching(bank) = &catalog.entry(meta.id).unwrap().bank else {
                continue;
            };
            let bank: &PairBank = bank;
            let partners: HashSet<_> =
                bank.left().iter().filter_map(|item| bank.partner_of(item.id)).collect();
            assert_eq!(partners.len(), bank.right().len(), "{}", meta.slug);
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let twice = [BUNDLED[0], BUNDLED[0]];
        let err = GameCatalog::from_json_sources(twice).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateGame(_)));
    }

    #[test]
    fn start_session_builds_matching_board_with_every_item() {
        let catalog = bundled();
        let meta = catalog
            .games()
            .find(|meta| meta.kind == GameKind::Matching)
            .unwrap()
            .clone();
        let mut rng = StdRng::seed_from_u64(7);
        let session = catalog.start_session(meta.id, &mut rng).unwrap();
        let board = session.snapshot().board.unwrap();
        assert_eq!(board.left.len(), board.right.len());
        assert_eq!(board.total, board.left.len());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn unknown_game_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = bundled()
            .start_session(GameId::new(9_999), &mut rng)
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownGame(id) if id == GameId::new(9_999)));
    }
}
