use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use game_core::model::GameId;
use services::{AppServices, Clock, GameCatalog, PlayService};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const LOG_ENV: &str = "ARCADE_LOG";
const CATALOG_DIR_ENV: &str = "ARCADE_CATALOG_DIR";
const GAME_ID_ENV: &str = "ARCADE_GAME_ID";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidGameId { raw: String },
    InvalidCatalogDir { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidGameId { raw } => write!(f, "invalid --game value: {raw}"),
            ArgsError::InvalidCatalogDir { raw } => write!(f, "invalid --catalog value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn start_game_id(&self) -> GameId {
        self.services.game_id()
    }

    fn catalog(&self) -> Arc<GameCatalog> {
        self.services.catalog()
    }

    fn play(&self) -> Arc<PlayService> {
        self.services.play()
    }
}

struct Args {
    catalog_dir: Option<PathBuf>,
    game_id: Option<GameId>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui   [--catalog <dir>] [--game <id>]");
    eprintln!("  cargo run -p app -- list [--catalog <dir>]");
    eprintln!();
    eprintln!("Games from --catalog are added to the bundled ones.");
    eprintln!("Without --game the first game of the first category is highlighted.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {CATALOG_DIR_ENV}, {GAME_ID_ENV}, {LOG_ENV} (e.g. info, services=debug)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    List,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

impl Args {
    fn parse(cmd: Command, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut catalog_dir = std::env::var(CATALOG_DIR_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut game_id = std::env::var(GAME_ID_ENV)
            .ok()
            .and_then(|value| value.parse::<GameId>().ok());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => {
                    let value = require_value(args, "--catalog")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidCatalogDir { raw: value });
                    }
                    catalog_dir = Some(PathBuf::from(value));
                }
                "--game" if cmd == Command::Ui => {
                    let value = require_value(args, "--game")?;
                    let parsed = value
                        .parse::<GameId>()
                        .map_err(|_| ArgsError::InvalidGameId { raw: value.clone() })?;
                    game_id = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            catalog_dir,
            game_id,
        })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}

fn print_catalog(catalog: &GameCatalog) {
    for category in catalog.categories() {
        println!("{category}");
        for game in catalog.games_in_category(category) {
            println!(
                "  {:>2}. [{}] {} ({}, {})",
                game.index,
                game.id,
                game.title,
                game.kind,
                game.slug
            );
        }
    }
}

fn launch_ui(services: AppServices) {
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // Some dev setups default the window to always-on-top.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Arcade")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
}

fn build_services(parsed: &Args) -> Result<AppServices, Box<dyn std::error::Error>> {
    let catalog_dir: Option<&Path> = parsed.catalog_dir.as_deref();
    let services = AppServices::new(catalog_dir, Clock::system(), parsed.game_id)?;
    Ok(services)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();
    let services = build_services(&parsed)?;

    match cmd {
        Command::Ui => {
            info!(start = %services.game_id(), "launching desktop ui");
            launch_ui(services);
            Ok(())
        }
        Command::List => {
            print_catalog(&services.catalog());
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // Binary glue: print once and exit.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
