#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog;
pub mod driver;
pub mod error;
pub mod navigation;
pub mod play;
pub mod shell;

pub use game_core::Clock;

pub use app_services::AppServices;
pub use catalog::{CatalogEntry, GameBank, GameCatalog, GameDefinition};
pub use driver::SessionDriver;
pub use error::{AppServicesError, CatalogError};
pub use navigation::{game_route, resolve_next_game};
pub use play::PlayService;
pub use shell::ShellConfig;
