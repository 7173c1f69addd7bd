use dioxus::prelude::*;

use game_core::model::OptionId;
use game_core::session::{GameAction, QuestionView, ReflexPhase, RoundView};

use super::QuizBoard;
use crate::vm::{countdown_class, countdown_label};

#[component]
pub fn ReflexBoard(
    round: RoundView,
    question: Option<QuestionView>,
    on_action: Callback<GameAction>,
) -> Element {
    let countdown = countdown_label(&round);
    let ready = round.phase == ReflexPhase::Ready;
    let playing = round.phase == ReflexPhase::Playing;
    let question = question.filter(|_| !ready);

    rsx! {
        div { class: "reflex",
            div { class: countdown_class(&round), "{countdown}" }
            if ready {
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_action.call(GameAction::Start),
                    "Start"
                }
            }
            if let Some(question) = question {
                QuizBoard {
                    question,
                    disabled: !playing,
                    on_select: move |id: OptionId| on_action.call(GameAction::SelectOption(id)),
                }
            }
        }
    }
}
