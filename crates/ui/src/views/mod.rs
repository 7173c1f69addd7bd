mod home;
mod matching;
mod play;
mod quiz;
mod reflex;
mod shell;
mod state;

#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use matching::MatchingBoard;
pub use play::PlayView;
pub use quiz::QuizBoard;
pub use reflex::ReflexBoard;
pub use shell::GameShell;
pub use state::{ViewError, ViewState, view_state_from_resource};
