//! Dice notation, e.g. `2d6+3` or `3*2d10-2d6/4+10`
//!
//! A term is an optional sign (required after the first term) followed by
//! either a fixed number or dice, and an optional `/divisor`. Dice are
//! written `[mult*][count]d[faces][*mult]`, where `x` may stand in for `*`,
//! the count defaults to 1 and the faces to 6. Whitespace is ignored
//! everywhere; error positions refer to the text with whitespace removed.

use std::str::FromStr;

use num::{BigInt, One, Zero};
use tracing::trace;

use super::Dice;
use crate::{DiceError, Rational};

impl FromStr for Dice {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let dice = notation::dice(&text)?;
        trace!(input = s, dice = %dice, "parsed dice notation");
        Ok(dice)
    }
}

enum Term {
    Dice { count: usize, faces: usize, mult: BigInt },
    Fixed(BigInt),
}

impl Term {
    // Returns `false` if merging the term overflows a dice count.
    fn add_to(self, dice: &mut Dice, negative: bool, divisor: &BigInt) -> bool {
        let signed = |n: BigInt| if negative { -n } else { n };
        match self {
            Term::Dice { count, faces, mult } => {
                dice.try_insert(count, faces, Rational::new(signed(mult), divisor.clone()))
            }
            Term::Fixed(n) => {
                dice.modifier += Rational::new(signed(n), divisor.clone());
                true
            }
        }
    }
}

fn dice_term(left: Option<BigInt>, count: Option<usize>, faces: Option<usize>, right: Option<BigInt>) -> Term {
    Term::Dice {
        count: count.unwrap_or(1),
        faces: faces.unwrap_or(6),
        mult: left.unwrap_or_else(BigInt::one) * right.unwrap_or_else(BigInt::one),
    }
}

peg::parser! {
    grammar notation() for str {
        rule digits() -> &'input str = $(['0'..='9']+)
        // Counts and faces.
        rule number() -> usize = n:digits() {? n.parse::<usize>().or(Err("number")) }
        // Multipliers, constants and divisors.
        rule big() -> BigInt = n:digits() {? n.parse::<BigInt>().or(Err("integer")) }
        rule times() = ['*' | 'x' | 'X']
        rule sign() -> bool = "+" { false } / "-" { true }
        rule divisor() -> BigInt = "/" n:big() {? if n.is_zero() { Err("non-zero divisor") } else { Ok(n) } }

        rule dice_term() -> Term
            = l:(n:big() times() { n })? c:number()? ['d' | 'D'] f:number()? r:(times() n:big() { n })? {
                dice_term(l, c, f, r)
            }
        rule fixed_term() -> Term = n:big() { Term::Fixed(n) }

        rule unsigned_term() -> (Term, BigInt)
            = t:(dice_term() / fixed_term()) d:divisor()? { (t, d.unwrap_or_else(BigInt::one)) }
        rule leading_term() -> (bool, (Term, BigInt))
            = s:sign()? t:unsigned_term() { (s.unwrap_or(false), t) }
        rule signed_term() -> (bool, (Term, BigInt))
            = s:sign() t:unsigned_term() { (s, t) }

        pub rule dice() -> Dice
            = first:leading_term()? rest:signed_term()* {?
                let mut dice = Dice::new();
                let fits = first
                    .into_iter()
                    .chain(rest)
                    .all(|(negative, (term, divisor))| term.add_to(&mut dice, negative, &divisor));
                dice.updated();
                if fits { Ok(dice) } else { Err("dice count that fits usize") }
            }
    }
}
