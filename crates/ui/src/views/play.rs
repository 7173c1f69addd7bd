use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use tokio::sync::watch;
use tracing::{debug, warn};

use game_core::model::{GameId, GameKind, OptionId};
use game_core::session::{GameAction, SessionSnapshot};
use services::{CatalogError, SessionDriver};

use super::{GameShell, MatchingBoard, QuizBoard, ReflexBoard};
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{answers_locked, flash_text, progress_label};

#[component]
pub fn PlayView(game_id: u64) -> Element {
    // Keyed so that moving to another game starts a fresh session.
    rsx! {
        GameScreen { key: "{game_id}", game_id }
    }
}

#[component]
fn GameScreen(game_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let play = ctx.play();
    let resource = use_resource(move || {
        let play = play.clone();
        async move {
            play.start(GameId::new(game_id)).map_err(|err| {
                warn!(game_id, error = %err, "could not start game");
                match err {
                    CatalogError::UnknownGame(_) => ViewError::UnknownGame,
                    _ => ViewError::Unknown,
                }
            })
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page play",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(driver) => rsx! {
                    GameBoard { driver }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    Link { to: Route::Home {}, "Back to all games" }
                },
            }
        }
    }
}

#[component]
fn GameBoard(driver: SessionDriver) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let game_id = driver.game_id();

    let snapshot = use_signal(|| driver.snapshot());
    {
        let driver = driver.clone();
        use_future(move || follow_snapshots(driver.subscribe(), snapshot));
    }

    let on_action = {
        let driver = driver.clone();
        use_callback(move |action: GameAction| {
            let outcome = driver.dispatch(action);
            debug!(%game_id, ?action, ?outcome, "action dispatched");
        })
    };

    let current = snapshot.read().clone();
    let Some(config) = ctx.play().shell_config(game_id, None, &current) else {
        return rsx! {
            p { class: "error", "{ViewError::UnknownGame.message()}" }
        };
    };
    let progress = progress_label(&current);
    let flash = flash_text(&current.feedback);
    let locked = answers_locked(current.stage);

    let board = match current.kind {
        GameKind::Quiz => rsx! {
            if let Some(question) = current.question {
                QuizBoard {
                    question,
                    disabled: locked,
                    on_select: move |id: OptionId| on_action.call(GameAction::SelectOption(id)),
                }
            }
        },
        GameKind::Matching => rsx! {
            if let Some(board) = current.board {
                MatchingBoard { board, on_action }
            }
        },
        GameKind::Reflex => rsx! {
            if let Some(round) = current.round {
                ReflexBoard { round, question: current.question, on_action }
            }
        },
    };

    rsx! {
        GameShell {
            config,
            result: current.result,
            flash,
            on_try_again: move |()| on_action.call(GameAction::Reset),
            on_next: move |next: GameId| {
                debug!(from = %game_id, to = %next, "next game");
                navigator.push(Route::Play { game_id: next.value() });
            },
            p { class: "play-progress", "{progress}" }
            {board}
        }
    }
}

async fn follow_snapshots(
    mut updates: watch::Receiver<SessionSnapshot>,
    mut snapshot: Signal<SessionSnapshot>,
) {
    while updates.changed().await.is_ok() {
        let latest = updates.borrow_and_update().clone();
        snapshot.set(latest);
    }
}
