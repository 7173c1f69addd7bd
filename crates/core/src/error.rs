use thiserror::Error;

use crate::model::{DisplayOrderError, PairError, QuestionError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Questions(#[from] QuestionError),
    #[error(transparent)]
    Pairs(#[from] PairError),
    #[error(transparent)]
    DisplayOrder(#[from] DisplayOrderError),
}
