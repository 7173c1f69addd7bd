use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::map_catalog;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let categories = map_catalog(&ctx.catalog());
    let start_game = ctx.start_game_id().value();

    rsx! {
        div { class: "page home",
            h2 { "Pick a game" }
            div { class: "home-start",
                Link { class: "btn btn-primary", to: Route::Play { game_id: start_game }, "Play" }
            }
            for category in categories {
                section { key: "{category.name}", class: "category",
                    h3 { "{category.title}" }
                    ul { class: "game-list",
                        for game in category.games {
                            li { key: "{game.id}", class: "game-card",
                                Link { to: Route::Play { game_id: game.id },
                                    span { class: "game-index", "{game.index}" }
                                    span { class: "game-title", "{game.title}" }
                                    if let Some(subtitle) = game.subtitle {
                                        span { class: "game-subtitle", "{subtitle}" }
                                    }
                                    span { class: "game-kind", "{game.kind_label}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
