use dioxus::prelude::*;

use game_core::model::OptionId;
use game_core::session::QuestionView;

use crate::vm::option_class;

#[component]
pub fn QuizBoard(question: QuestionView, disabled: bool, on_select: Callback<OptionId>) -> Element {
    let locked = disabled || question.verdict.is_some();

    rsx! {
        div { class: "quiz",
            p { class: "quiz-progress", "Question {question.number} of {question.total}" }
            h3 { class: "quiz-prompt", "{question.prompt}" }
            div { class: "quiz-options",
                for option in question.options {
                    button {
                        key: "{option.id}",
                        class: option_class(&option),
                        r#type: "button",
                        disabled: locked,
                        onclick: move |_| on_select.call(option.id),
                        "{option.label}"
                    }
                }
            }
        }
    }
}
