use peg::{error::ParseError, str::LineCol};
use thiserror::Error;

/// Errors raised while building or rescaling a [`Dice`](crate::Dice).
///
/// Queries (`pdf`, `cdf`, `mean`, ...) never fail; only construction,
/// parsing and division can.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiceError {
    /// A dice group was requested with a negative number of dice or faces.
    #[error("invalid dice: {count}d{faces}")]
    InvalidArgument {
        /// Requested number of dice
        count: isize,
        /// Requested number of faces
        faces: isize,
    },

    /// The notation could not be matched at some position.
    #[error("invalid dice notation: {0}")]
    Notation(#[from] ParseError<LineCol>),

    /// An expression was divided by zero.
    #[error("division of dice by zero")]
    DivisionByZero,
}

pub type Result<T> = std::result::Result<T, DiceError>;
