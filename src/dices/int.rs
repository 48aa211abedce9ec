use std::{
    fmt,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use num::BigInt;
use rand::{Rng, distr::Distribution};

use super::Dice;
use crate::{DiceError, Rational, Result};

/// Dice that only ever produce integers: rolls and bounds of the underlying
/// [`Dice`] are rounded down.
///
/// ```
/// use dicecalc::IntDice;
///
/// let dice: IntDice = "3d6/2".parse().unwrap();
/// assert_eq!(dice.min(), 1.into());
/// assert_eq!(dice.max(), 9.into());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IntDice {
    dice: Dice,
}

impl IntDice {
    /// `count` dice with `faces` faces each.
    pub fn dice(count: isize, faces: isize) -> Result<Self> {
        Dice::dice(count, faces).map(IntDice::from)
    }

    /// `count` dice with `faces` faces each, their sum multiplied by `factor`.
    pub fn scaled_dice(count: isize, faces: isize, factor: i64) -> Result<Self> {
        Dice::scaled_dice(count, faces, Rational::from_integer(factor.into())).map(IntDice::from)
    }

    /// The exact expression behind these dice.
    pub fn as_dice(&self) -> &Dice {
        &self.dice
    }

    pub fn into_dice(self) -> Dice {
        self.dice
    }

    /// Smallest possible roll.
    pub fn min(&self) -> BigInt {
        self.dice.min().floor().to_integer()
    }

    /// Largest possible roll.
    pub fn max(&self) -> BigInt {
        self.dice.max().floor().to_integer()
    }

    /// Divides by `n`, failing on zero.
    pub fn checked_div(&self, n: i64) -> Result<Self> {
        self.dice.checked_div(&Rational::from_integer(n.into())).map(IntDice::from)
    }
}

impl From<Dice> for IntDice {
    fn from(dice: Dice) -> Self {
        IntDice { dice }
    }
}

impl FromStr for IntDice {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<Dice>().map(IntDice::from)
    }
}

impl fmt::Display for IntDice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.dice, f)
    }
}

impl Distribution<BigInt> for IntDice {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BigInt {
        let x: Rational = self.dice.sample(rng);
        x.floor().to_integer()
    }
}

impl Neg for IntDice {
    type Output = IntDice;

    fn neg(self) -> IntDice {
        IntDice { dice: -self.dice }
    }
}

macro_rules! binary_int_ops {
    ($($trait:ident, $method:ident, $assign_trait:ident, $assign:ident);*) => {$(
        impl $assign_trait<&IntDice> for IntDice {
            fn $assign(&mut self, other: &IntDice) {
                self.dice.$assign(&other.dice);
            }
        }

        impl $assign_trait<IntDice> for IntDice {
            fn $assign(&mut self, other: IntDice) {
                self.dice.$assign(&other.dice);
            }
        }

        impl $trait<&IntDice> for IntDice {
            type Output = IntDice;

            fn $method(mut self, other: &IntDice) -> IntDice {
                self.$assign(other);
                self
            }
        }

        impl $trait<IntDice> for IntDice {
            type Output = IntDice;

            fn $method(mut self, other: IntDice) -> IntDice {
                self.$assign(&other);
                self
            }
        }

        impl $trait<&IntDice> for &IntDice {
            type Output = IntDice;

            fn $method(self, other: &IntDice) -> IntDice {
                self.clone().$method(other)
            }
        }

        impl $trait<IntDice> for &IntDice {
            type Output = IntDice;

            fn $method(self, other: IntDice) -> IntDice {
                self.clone().$method(&other)
            }
        }
    )*};
}

binary_int_ops!(Add, add, AddAssign, add_assign; Sub, sub, SubAssign, sub_assign);

macro_rules! int_ops {
    ($($t:ty),*) => {$(
        impl AddAssign<$t> for IntDice {
            fn add_assign(&mut self, n: $t) {
                self.dice += n;
            }
        }

        impl SubAssign<$t> for IntDice {
            fn sub_assign(&mut self, n: $t) {
                self.dice -= n;
            }
        }

        impl MulAssign<$t> for IntDice {
            fn mul_assign(&mut self, n: $t) {
                self.dice *= n;
            }
        }

        /// # Panics
        ///
        /// Panics when dividing by zero, see [`IntDice::checked_div`].
        impl DivAssign<$t> for IntDice {
            fn div_assign(&mut self, n: $t) {
                self.dice /= n;
            }
        }

        impl Add<$t> for IntDice {
            type Output = IntDice;

            fn add(mut self, n: $t) -> IntDice {
                self += n;
                self
            }
        }

        impl Sub<$t> for IntDice {
            type Output = IntDice;

            fn sub(mut self, n: $t) -> IntDice {
                self -= n;
                self
            }
        }

        impl Mul<$t> for IntDice {
            type Output = IntDice;

            fn mul(mut self, n: $t) -> IntDice {
                self *= n;
                self
            }
        }

        impl Div<$t> for IntDice {
            type Output = IntDice;

            fn div(mut self, n: $t) -> IntDice {
                self /= n;
                self
            }
        }

        impl Add<IntDice> for $t {
            type Output = IntDice;

            fn add(self, dice: IntDice) -> IntDice {
                dice + self
            }
        }

        impl Sub<IntDice> for $t {
            type Output = IntDice;

            fn sub(self, dice: IntDice) -> IntDice {
                -dice + self
            }
        }

        impl Mul<IntDice> for $t {
            type Output = IntDice;

            fn mul(self, dice: IntDice) -> IntDice {
                dice * self
            }
        }
    )*};
}

int_ops!(i32);
