use std::fmt::{self, Write};

use num::{One, Signed, Zero};

use super::Dice;

/// Displays the canonical form in dice notation, which parses back into an
/// equal expression.
/// ```
/// use dicecalc::Dice;
/// let x: Dice = "d8 x 6/8 + 10 + 3 x 2d10 - 2d6 / 4".parse().unwrap();
/// assert_eq!(x.to_string(), "2d10*3+d8*3/4-2d6/4+10");
/// ```
impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut text = String::new();
        for g in &self.groups {
            text.push(if g.factor.is_negative() { '-' } else { '+' });
            if g.count > 1 {
                write!(text, "{}", g.count)?;
            }
            write!(text, "d{}", g.faces)?;
            let numer = g.factor.numer().abs();
            if !numer.is_one() {
                write!(text, "*{numer}")?;
            }
            if !g.factor.denom().is_one() {
                write!(text, "/{}", g.factor.denom())?;
            }
        }
        if self.modifier.is_positive() {
            text.push('+');
        }
        if !self.modifier.is_zero() {
            write!(text, "{}", self.modifier)?;
        }

        let text = text.strip_prefix('+').unwrap_or(&text);
        if text.is_empty() { f.write_str("0") } else { f.write_str(text) }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Dice {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Dice {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
