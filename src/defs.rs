//! Shorthands for the common dice, e.g. `d6(3)` is `3d6`.
//!
//! ```
//! use dicecalc::defs::{d6, d20};
//!
//! let dice = d20(1) + d6(2) + 5;
//! assert_eq!(dice.to_string(), "d20+2d6+5");
//! ```

use crate::Dice;

macro_rules! standard_dice {
    ($($name:ident => $faces:expr),* $(,)?) => {$(
        #[doc = concat!("`n` dice with ", stringify!($faces), " faces.")]
        pub fn $name(n: usize) -> Dice {
            Dice::uniform(n, $faces)
        }
    )*};
}

standard_dice! {
    d3 => 3,
    d4 => 4,
    d6 => 6,
    d8 => 8,
    d10 => 10,
    d12 => 12,
    d20 => 20,
    d30 => 30,
    d100 => 100,
    d1000 => 1000,
}
