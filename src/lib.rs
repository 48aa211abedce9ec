//! Exact probabilities for sums of scaled dice.
//!
//! A [`Dice`] is an expression like `2d10*3+d8*3/4-2d6/4+10`: groups of
//! identical dice, each group multiplied by an exact rational factor, plus a
//! constant. Expressions are built from notation or with operators, and
//! answer `pdf`, `cdf` and `ccdf` queries exactly from a distribution table
//! that is computed on first use.
//!
//! ```
//! use dicecalc::{Dice, Rational};
//!
//! let dice: Dice = "3d6".parse().unwrap();
//! let ten = Rational::from_integer(10.into());
//! assert_eq!(dice.pdf(&ten), Rational::new(1.into(), 8.into()));
//! assert_eq!(dice.mean(), Rational::new(21.into(), 2.into()));
//! ```

pub mod defs;
mod dices;
pub mod dist;
mod error;

pub use dices::{ConfigRandom, ConfigSummary, Dice, DiceGroup, IntDice, SampleSummary};
pub use dist::{DistTable, Probabilities};
pub use error::{DiceError, Result};

/// Exact arbitrary precision rational used for factors, totals and
/// probabilities.
pub type Rational = num::BigRational;
