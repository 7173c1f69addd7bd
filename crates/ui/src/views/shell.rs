use dioxus::prelude::*;

use game_core::model::GameId;
use game_core::session::SessionResult;
use services::ShellConfig;

use crate::vm::{result_headline, reward_line, score_label};

/// Frame around every game: title, level, score, rewards, answer flash and the
/// game-over panel. The game board is passed as children and hidden once the
/// game is over.
#[component]
pub fn GameShell(
    config: ShellConfig,
    result: Option<SessionResult>,
    flash: Option<String>,
    on_try_again: Callback<()>,
    on_next: Callback<GameId>,
    children: Element,
) -> Element {
    let shell_class = if config.show_confetti {
        "shell shell--confetti"
    } else {
        "shell"
    };
    let level = format!("Level {} / {}", config.current_level, config.total_levels);
    let score = score_label(config.score, config.max_score);
    let rewards = reward_line(&config);
    let headline = result.as_ref().map(result_headline);
    let summary = result
        .map(|result| format!("You scored {} out of {}.", result.final_score, result.max_score));
    let next_game = config.next_game.as_ref().map(|next| next.game_id);

    rsx! {
        section { class: shell_class, "data-game-type": "{config.game_type}",
            header { class: "shell-header",
                h2 { class: "shell-title", "{config.title}" }
                if let Some(subtitle) = config.subtitle.as_ref() {
                    p { class: "shell-subtitle", "{subtitle}" }
                }
                div { class: "shell-stats",
                    span { class: "shell-level", "{level}" }
                    span { class: "shell-score", "{score}" }
                    span { class: "shell-rewards", "{rewards}" }
                }
            }
            if let Some(text) = flash {
                div { class: "shell-flash", "{text}" }
            }
            if config.show_game_over {
                div { class: "shell-game-over",
                    if let Some(headline) = headline {
                        h3 { "{headline}" }
                    }
                    if let Some(summary) = summary {
                        p { "{summary}" }
                    }
                    div { class: "shell-actions",
                        button {
                            class: "btn",
                            r#type: "button",
                            onclick: move |_| on_try_again.call(()),
                            "Try again"
                        }
                        if let Some(next_game) = next_game {
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                onclick: move |_| on_next.call(next_game),
                                "Next game"
                            }
                        }
                    }
                }
            } else {
                div { class: "shell-body", {children} }
            }
        }
    }
}
