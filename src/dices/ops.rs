//! Arithmetic on [`Dice`].
//!
//! Dice combine with other dice, with [`Rational`] and with `i32`, on either
//! side. Integer scalars are `i32` only, so literals like `dice * 3` need no
//! suffix.
//!
//! Dividing by zero with `/` or `/=` panics. [`Dice::checked_div`] returns
//! [`DiceError::DivisionByZero`](crate::DiceError::DivisionByZero) instead.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num::{BigInt, Zero};

use super::Dice;
use crate::Rational;

// Scalars that can be combined with `Dice`.
trait IntoRational {
    fn into_rational(self) -> Rational;
}

impl IntoRational for Rational {
    fn into_rational(self) -> Rational {
        self
    }
}

impl IntoRational for &Rational {
    fn into_rational(self) -> Rational {
        self.clone()
    }
}

impl IntoRational for i32 {
    fn into_rational(self) -> Rational {
        Rational::from_integer(BigInt::from(self))
    }
}

impl Neg for Dice {
    type Output = Dice;

    fn neg(mut self) -> Dice {
        self.negate_inplace();
        self
    }
}

impl Neg for &Dice {
    type Output = Dice;

    fn neg(self) -> Dice {
        -self.clone()
    }
}

impl AddAssign<&Dice> for Dice {
    fn add_assign(&mut self, other: &Dice) {
        self.add_inplace(other);
    }
}

impl AddAssign<Dice> for Dice {
    fn add_assign(&mut self, other: Dice) {
        self.add_inplace(&other);
    }
}

impl SubAssign<&Dice> for Dice {
    fn sub_assign(&mut self, other: &Dice) {
        self.sub_inplace(other);
    }
}

impl SubAssign<Dice> for Dice {
    fn sub_assign(&mut self, other: Dice) {
        self.sub_inplace(&other);
    }
}

macro_rules! binary_dice_ops {
    ($($trait:ident, $method:ident, $assign:ident);*) => {$(
        impl $trait<&Dice> for Dice {
            type Output = Dice;

            fn $method(mut self, other: &Dice) -> Dice {
                self.$assign(other);
                self
            }
        }

        impl $trait<Dice> for Dice {
            type Output = Dice;

            fn $method(mut self, other: Dice) -> Dice {
                self.$assign(&other);
                self
            }
        }

        impl $trait<&Dice> for &Dice {
            type Output = Dice;

            fn $method(self, other: &Dice) -> Dice {
                let mut out = self.clone();
                out.$assign(other);
                out
            }
        }

        impl $trait<Dice> for &Dice {
            type Output = Dice;

            fn $method(self, other: Dice) -> Dice {
                let mut out = self.clone();
                out.$assign(&other);
                out
            }
        }
    )*};
}

binary_dice_ops!(Add, add, add_inplace; Sub, sub, sub_inplace);

macro_rules! scalar_ops {
    ($($t:ty),*) => {$(
        impl AddAssign<$t> for Dice {
            fn add_assign(&mut self, n: $t) {
                self.add_constant_inplace(&n.into_rational());
            }
        }

        impl SubAssign<$t> for Dice {
            fn sub_assign(&mut self, n: $t) {
                self.add_constant_inplace(&-n.into_rational());
            }
        }

        impl MulAssign<$t> for Dice {
            fn mul_assign(&mut self, n: $t) {
                self.scale_inplace(&n.into_rational());
            }
        }

        /// # Panics
        ///
        /// Panics when dividing by zero, see [`Dice::checked_div`].
        impl DivAssign<$t> for Dice {
            fn div_assign(&mut self, n: $t) {
                let n = n.into_rational();
                assert!(!n.is_zero(), "division of dice by zero");
                self.scale_inplace(&n.recip());
            }
        }

        impl Add<$t> for Dice {
            type Output = Dice;

            fn add(mut self, n: $t) -> Dice {
                self += n;
                self
            }
        }

        impl Sub<$t> for Dice {
            type Output = Dice;

            fn sub(mut self, n: $t) -> Dice {
                self -= n;
                self
            }
        }

        impl Mul<$t> for Dice {
            type Output = Dice;

            fn mul(mut self, n: $t) -> Dice {
                self *= n;
                self
            }
        }

        /// # Panics
        ///
        /// Panics when dividing by zero, see [`Dice::checked_div`].
        impl Div<$t> for Dice {
            type Output = Dice;

            fn div(mut self, n: $t) -> Dice {
                self /= n;
                self
            }
        }

        impl Add<$t> for &Dice {
            type Output = Dice;

            fn add(self, n: $t) -> Dice {
                self.clone() + n
            }
        }

        impl Sub<$t> for &Dice {
            type Output = Dice;

            fn sub(self, n: $t) -> Dice {
                self.clone() - n
            }
        }

        impl Mul<$t> for &Dice {
            type Output = Dice;

            fn mul(self, n: $t) -> Dice {
                self.clone() * n
            }
        }

        /// # Panics
        ///
        /// Panics when dividing by zero, see [`Dice::checked_div`].
        impl Div<$t> for &Dice {
            type Output = Dice;

            fn div(self, n: $t) -> Dice {
                self.clone() / n
            }
        }
    )*};
}

scalar_ops!(Rational, &Rational, i32);

// Scalar on the left hand side.
macro_rules! scalar_lhs_ops {
    ($($t:ty),*) => {$(
        impl Add<Dice> for $t {
            type Output = Dice;

            fn add(self, dice: Dice) -> Dice {
                dice + self
            }
        }

        impl Sub<Dice> for $t {
            type Output = Dice;

            fn sub(self, dice: Dice) -> Dice {
                -dice + self
            }
        }

        impl Mul<Dice> for $t {
            type Output = Dice;

            fn mul(self, dice: Dice) -> Dice {
                dice * self
            }
        }

        impl Add<&Dice> for $t {
            type Output = Dice;

            fn add(self, dice: &Dice) -> Dice {
                dice + self
            }
        }

        impl Sub<&Dice> for $t {
            type Output = Dice;

            fn sub(self, dice: &Dice) -> Dice {
                -dice + self
            }
        }

        impl Mul<&Dice> for $t {
            type Output = Dice;

            fn mul(self, dice: &Dice) -> Dice {
                dice * self
            }
        }
    )*};
}

scalar_lhs_ops!(Rational, i32);
