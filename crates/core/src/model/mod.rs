mod game;
mod ids;
mod pairs;
mod question;

pub use game::{GameKind, GameMeta, NextGame, Rewards, RouteState};
pub use ids::{GameId, ItemId, OptionId, ParseIdError, QuestionId};
pub use pairs::{DisplayOrder, DisplayOrderError, MatchItem, MatchPair, PairBank, PairError, Side};
pub use question::{QuestionBank, QuestionError, QuizOption, QuizQuestion};
