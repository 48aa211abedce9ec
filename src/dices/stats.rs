use num::{BigInt, ToPrimitive};

use super::Dice;
use crate::Rational;

impl Dice {
    /// The expected value of a roll.
    ///
    /// ```
    /// use dicecalc::{Dice, Rational};
    ///
    /// let dice: Dice = "2d10-2d6+10".parse().unwrap();
    /// assert_eq!(dice.mean(), Rational::from_integer(14.into()));
    /// ```
    pub fn mean(&self) -> Rational {
        let mut out = self.modifier.clone();
        for g in &self.groups {
            let sum = BigInt::from(g.count) * (BigInt::from(g.faces) + 1);
            out += Rational::new(sum, BigInt::from(2)) * &g.factor;
        }
        out
    }

    /// The [variance](https://en.wikipedia.org/wiki/Variance) of a roll.
    ///
    /// A single die with `f` faces has variance `(f² - 1) / 12`, the dice of
    /// a group are independent and the factor scales it by its square.
    pub fn variance(&self) -> Rational {
        let mut out = Rational::from_integer(BigInt::from(0));
        for g in &self.groups {
            let faces = BigInt::from(g.faces);
            let sum = BigInt::from(g.count) * (&faces * &faces - 1);
            out += Rational::new(sum, BigInt::from(12)) * &g.factor * &g.factor;
        }
        out
    }

    /// The standard deviation of a roll.
    pub fn sd(&self) -> f64 {
        self.variance().to_f64().map_or(f64::NAN, f64::sqrt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> Rational {
        Rational::new(n.into(), d.into())
    }

    fn check(s: &str, text: &str, min: Rational, max: Rational, mean: Rational, sd: f64) {
        let dice: Dice = s.parse().unwrap();
        assert_eq!(dice.to_string(), text, "{s}");
        assert_eq!(dice.min(), &min, "{s}");
        assert_eq!(dice.max(), &max, "{s}");
        assert_eq!(dice.mean(), mean, "{s}");
        assert!((dice.sd() - sd).abs() < 1e-6, "{s}: {}", dice.sd());
    }

    #[test]
    fn literal_scenarios() {
        check("", "0", q(0, 1), q(0, 1), q(0, 1), 0.0);
        check("5", "5", q(5, 1), q(5, 1), q(5, 1), 0.0);
        check("2d6", "2d6", q(2, 1), q(12, 1), q(7, 1), 2.415229);
        check("2d10+2d6+10", "2d10+2d6+10", q(14, 1), q(42, 1), q(28, 1), 4.725816);
        check("2d10-2d6+10", "2d10-2d6+10", q(0, 1), q(28, 1), q(14, 1), 4.725816);
        check(
            " 3*2d10 - 2d6/4 + d8*6/8 + 10\n",
            "2d10*3+d8*3/4-2d6/4+10",
            q(55, 4),
            q(151, 2),
            q(357, 8),
            12.321433,
        );
    }

    #[test]
    fn exact_variance() {
        let dice: Dice = "2d6".parse().unwrap();
        assert_eq!(dice.variance(), q(35, 6));
        let scaled: Dice = "d4*3/2".parse().unwrap();
        assert_eq!(scaled.variance(), q(15, 12) * q(9, 4));
    }

    #[test]
    fn constant_has_no_spread() {
        let dice = Dice::constant(q(7, 3));
        assert_eq!(dice.variance(), q(0, 1));
        assert_eq!(dice.sd(), 0.0);
        assert_eq!(dice.mean(), q(7, 3));
    }

    #[test]
    fn largest_faces() {
        let dice: Dice = "d18446744073709551615".parse().unwrap();
        let faces = BigInt::from(u64::MAX);
        assert_eq!(dice.mean(), Rational::new(&faces + 1, BigInt::from(2)));
        assert_eq!(dice.variance(), Rational::new(&faces * &faces - 1, BigInt::from(12)));
        assert_eq!(dice.max(), &Rational::from_integer(faces));
        assert!(dice.sd().is_finite());
    }
}
