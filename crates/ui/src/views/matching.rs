use dioxus::prelude::*;

use game_core::session::{BoardView, GameAction, ItemView, Verdict};

use crate::vm::item_class;

#[component]
pub fn MatchingBoard(board: BoardView, on_action: Callback<GameAction>) -> Element {
    let progress = format!("{} of {} matched", board.resolved, board.total);
    let last_verdict = board.last_verdict.map(|verdict| match verdict {
        Verdict::Correct => ("matching-verdict matching-verdict--correct", "It's a match!"),
        Verdict::Incorrect | Verdict::TimedOut => {
            ("matching-verdict matching-verdict--wrong", "Not quite.")
        }
    });

    rsx! {
        div { class: "matching",
            p { class: "matching-progress", "{progress}" }
            if let Some((class, text)) = last_verdict {
                p { class: class, "{text}" }
            }
            div { class: "matching-columns",
                ul { class: "match-column match-column--left",
                    for item in board.left {
                        MatchItemButton {
                            key: "{item.id}",
                            item: item.clone(),
                            on_pick: move |_| on_action.call(GameAction::SelectLeft(item.id)),
                        }
                    }
                }
                ul { class: "match-column match-column--right",
                    for item in board.right {
                        MatchItemButton {
                            key: "{item.id}",
                            item: item.clone(),
                            on_pick: move |_| on_action.call(GameAction::SelectRight(item.id)),
                        }
                    }
                }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: !board.can_confirm,
                onclick: move |_| on_action.call(GameAction::ConfirmMatch),
                "Check match"
            }
        }
    }
}

#[component]
fn MatchItemButton(item: ItemView, on_pick: Callback<()>) -> Element {
    rsx! {
        li {
            button {
                class: item_class(&item),
                r#type: "button",
                disabled: item.verdict.is_some(),
                onclick: move |_| on_pick.call(()),
                "{item.label}"
            }
        }
    }
}
