mod definition;
mod service;

pub use definition::{
    CatalogEntry, GameBank, GameContent, GameDefinition, ItemDef, OptionDef, PairDef, QuestionDef,
};
pub use service::GameCatalog;
