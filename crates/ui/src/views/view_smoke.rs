use dioxus::prelude::*;

use game_core::model::{GameId, GameKind, NextGame, OptionId, QuestionId};
use game_core::session::{OptionView, Outcome, QuestionView, SessionResult};
use services::{ShellConfig, game_route};

use super::{GameShell, QuizBoard};

#[derive(Props, Clone, PartialEq)]
struct ShellHarnessProps {
    config: ShellConfig,
    result: Option<SessionResult>,
    flash: Option<String>,
}

#[component]
fn ShellHarness(props: ShellHarnessProps) -> Element {
    rsx! {
        GameShell {
            config: props.config,
            result: props.result,
            flash: props.flash,
            on_try_again: move |()| {},
            on_next: move |_: GameId| {},
            p { class: "board", "Which sound does a cow make?" }
        }
    }
}

fn render(config: ShellConfig, result: Option<SessionResult>, flash: Option<String>) -> String {
    let mut dom = VirtualDom::new_with_props(
        ShellHarness,
        ShellHarnessProps {
            config,
            result,
            flash,
        },
    );
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

#[derive(Props, Clone, PartialEq)]
struct QuizHarnessProps {
    question: QuestionView,
    disabled: bool,
}

#[component]
fn QuizHarness(props: QuizHarnessProps) -> Element {
    rsx! {
        QuizBoard {
            question: props.question,
            disabled: props.disabled,
            on_select: move |_: OptionId| {},
        }
    }
}

fn render_quiz(disabled: bool) -> String {
    let question = QuestionView {
        id: QuestionId::new(1),
        number: 1,
        total: 5,
        prompt: "Which sound does a cow make?".into(),
        options: ["Moo", "Woof"]
            .into_iter()
            .zip(1..)
            .map(|(label, id)| OptionView {
                id: OptionId::new(id),
                label: label.into(),
                chosen: false,
                correct: None,
            })
            .collect(),
        verdict: None,
    };
    let mut dom = VirtualDom::new_with_props(QuizHarness, QuizHarnessProps { question, disabled });
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

fn config() -> ShellConfig {
    ShellConfig {
        title: "Animal Sounds".into(),
        subtitle: Some("Who says what?".into()),
        score: 2,
        current_level: 3,
        total_levels: 5,
        coins_per_level: 5,
        total_coins: 25,
        total_xp: 10,
        game_id: GameId::new(101),
        game_type: GameKind::Quiz,
        show_game_over: false,
        show_confetti: false,
        max_score: 5,
        next_game: Some(NextGame {
            game_id: GameId::new(102),
            route: game_route(GameId::new(102)),
        }),
    }
}

#[test]
fn game_shell_renders_header_and_board_while_playing() {
    let html = render(config(), None, Some("+1".into()));
    for expected in [
        "Animal Sounds",
        "Who says what?",
        "Level 3 / 5",
        "Score: 2 / 5",
        "25 coins · 10 XP",
        "+1",
        "Which sound does a cow make?",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(!html.contains("Try again"), "game over panel shown early: {html}");
}

#[test]
fn game_shell_swaps_board_for_game_over_panel() {
    let finished = ShellConfig {
        score: 3,
        current_level: 5,
        show_game_over: true,
        show_confetti: true,
        ..config()
    };
    let result = SessionResult {
        final_score: 3,
        max_score: 5,
        outcome: Outcome::Success,
    };
    let html = render(finished, Some(result), None);
    for expected in [
        "shell--confetti",
        "Great job!",
        "You scored 3 out of 5.",
        "Try again",
        "Next game",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(!html.contains("Which sound does a cow make?"), "board still shown: {html}");
}

#[test]
fn game_shell_omits_next_game_at_end_of_category() {
    let last = ShellConfig {
        show_game_over: true,
        next_game: None,
        ..config()
    };
    let html = render(last, None, None);
    assert!(html.contains("Try again"), "missing retry in {html}");
    assert!(!html.contains("Next game"), "unexpected next game in {html}");
}

#[test]
fn quiz_board_locks_options_when_disabled() {
    let open = render_quiz(false);
    assert!(open.contains("Moo"), "missing option in {open}");
    assert!(!open.contains("disabled"), "options locked while idle: {open}");

    let locked = render_quiz(true);
    assert!(locked.contains("disabled"), "options not locked: {locked}");
}
