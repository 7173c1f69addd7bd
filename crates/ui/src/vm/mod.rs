mod catalog_vm;
mod game_vm;

pub use catalog_vm::{CategoryVm, GameCardVm, category_title, map_catalog};
pub use game_vm::{
    answers_locked, countdown_class, countdown_label, flash_text, item_class, kind_label,
    option_class, progress_label, result_headline, reward_line, score_label,
};
