use std::fs;

use game_core::model::GameId;
use game_core::time::fixed_clock;
use services::{AppServices, CatalogError, GameCatalog, resolve_next_game};
use tempfile::TempDir;

const EXTRA_GAME: &str = r#"{
  "id": 401,
  "slug": "colors",
  "title": "Colors",
  "category": "art",
  "index": 1,
  "kind": "quiz",
  "questions": [
    { "id": 1, "prompt": "Color of the sky?", "options": [
      { "id": 1, "label": "Blue", "correct": true },
      { "id": 2, "label": "Green" }
    ] }
  ]
}"#;

#[test]
fn loads_json_files_and_ignores_others() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("colors.json"), EXTRA_GAME).unwrap();
    fs::write(dir.path().join("notes.txt"), "not a game").unwrap();

    let catalog = GameCatalog::from_dir(dir.path()).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.categories(), ["art"]);
    assert!(resolve_next_game(&catalog, GameId::new(401), None).is_none());
}

#[test]
fn app_services_merge_directory_games_with_bundled_ones() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("colors.json"), EXTRA_GAME).unwrap();

    let services =
        AppServices::new(Some(dir.path()), fixed_clock(), Some(GameId::new(401))).unwrap();
    let catalog = services.catalog();
    assert_eq!(services.game_id(), GameId::new(401));
    assert!(catalog.get_game_data_by_id(GameId::new(101)).is_some());
    assert_eq!(catalog.first_game().map(|meta| meta.id), Some(GameId::new(401)));
}

#[test]
fn bad_file_reports_its_name() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.json"), "{ \"id\": ").unwrap();

    let err = GameCatalog::from_dir(dir.path()).unwrap_err();
    match err {
        CatalogError::Parse { file, .. } => assert!(file.ends_with("broken.json"), "{file}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let absent = dir.path().join("absent");
    let err = GameCatalog::from_dir(&absent).unwrap_err();
    assert!(matches!(err, CatalogError::Io { ref path, .. } if *path == absent));
}
