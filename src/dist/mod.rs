//! Exact discrete probability distributions of dice expressions
//!
//! A [`DistTable`] is built once per [`Dice`] value: every dice group gets
//! its own sub-table of scaled totals, and the sub-tables are combined by
//! walking their Cartesian product.

use std::{cmp::Ordering, collections::BTreeMap};

use num::{BigInt, One, Zero, integer::binomial};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{Dice, Rational, dices::DiceGroup};

mod cache;

pub(crate) use cache::TableCache;

#[cfg(test)]
mod tests;

/// Probability of one total in a [`DistTable`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Probabilities {
    /// Chance of exactly this total
    pub pdf: Rational,
    /// Chance of this total or less
    pub cdf: Rational,
    /// Chance of this total or more
    pub ccdf: Rational,
}

/// Every achievable total of an expression with its probabilities, sorted
/// by total.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct DistTable {
    values: Vec<(Rational, Probabilities)>,
}

impl DistTable {
    fn correct(&self) -> bool {
        self.values.windows(2).all(|w| w[0].0 < w[1].0)
    }

    /// Build the exact distribution of `dice`.
    pub fn build(dice: &Dice) -> Self {
        let subtables: Vec<Vec<(Rational, Rational)>> =
            dice.groups().iter().map(group_table).collect();

        // Odometer over one cursor per sub-table: every combination of
        // outcomes is visited exactly once.
        let mut mass: BTreeMap<Rational, Rational> = BTreeMap::new();
        let mut cursors = vec![0usize; subtables.len()];
        loop {
            let mut total = dice.modifier().clone();
            let mut chance = Rational::one();
            for (sub, &c) in subtables.iter().zip(&cursors) {
                total += &sub[c].0;
                chance *= &sub[c].1;
            }
            *mass.entry(total).or_insert_with(Rational::zero) += chance;

            if !advance(&mut cursors, &subtables) {
                break;
            }
        }

        let table = Self::from_mass(mass);
        debug!(dice = %dice, groups = subtables.len(), outcomes = table.len(), "built distribution table");
        table
    }

    // Fill in the cumulative columns from a sorted map of point masses.
    fn from_mass(mass: BTreeMap<Rational, Rational>) -> Self {
        let mut values: Vec<(Rational, Probabilities)> = mass
            .into_iter()
            .map(|(x, pdf)| (x, Probabilities { pdf, cdf: Rational::zero(), ccdf: Rational::zero() }))
            .collect();

        let mut cdf = Rational::zero();
        for (_, p) in values.iter_mut() {
            cdf += &p.pdf;
            p.cdf = cdf.clone();
        }
        let mut ccdf = Rational::zero();
        for (_, p) in values.iter_mut().rev() {
            ccdf += &p.pdf;
            p.ccdf = ccdf.clone();
        }
        if let Some((_, p)) = values.first_mut() {
            p.ccdf = Rational::one();
        }
        if let Some((_, p)) = values.last_mut() {
            p.cdf = Rational::one();
        }

        let out = DistTable { values };
        debug_assert!(out.correct());
        out
    }

    /// Number of distinct totals.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: even an expression without dice has one total.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate through the totals and their probabilities, smallest total first.
    pub fn iter(&self) -> impl Iterator<Item = (&Rational, &Probabilities)> {
        self.values.iter().map(|(x, p)| (x, p))
    }

    // Index of the first total that is not below `x`.
    fn lower_bound(&self, x: &Rational) -> usize {
        self.values.partition_point(|(k, _)| k < x)
    }

    fn get(&self, x: &Rational) -> Option<&Probabilities> {
        self.values.binary_search_by(|(k, _)| k.cmp(x)).ok().map(|i| &self.values[i].1)
    }

    /// Chance of exactly `x`, zero if `x` can't be rolled.
    pub fn pdf(&self, x: &Rational) -> Rational {
        self.get(x).map_or_else(Rational::zero, |p| p.pdf.clone())
    }

    /// Chance of `x` or less.
    pub fn cdf(&self, x: &Rational) -> Rational {
        let i = self.lower_bound(x);
        match self.values.get(i) {
            None => Rational::one(),
            Some((k, p)) if k == x => p.cdf.clone(),
            Some(_) if i == 0 => Rational::zero(),
            Some(_) => self.values[i - 1].1.cdf.clone(),
        }
    }

    /// Chance of `x` or more.
    pub fn ccdf(&self, x: &Rational) -> Rational {
        let i = self.lower_bound(x);
        self.values.get(i).map_or_else(Rational::zero, |(_, p)| p.ccdf.clone())
    }

    /// Chance of a total in `x..=y`, zero when `y < x`.
    pub fn interval(&self, x: &Rational, y: &Rational) -> Rational {
        match x.cmp(y) {
            Ordering::Greater => Rational::zero(),
            Ordering::Equal => self.pdf(x),
            Ordering::Less => {
                let start = self.lower_bound(x);
                let end = self.values.partition_point(|(k, _)| k <= y);
                let mut total = Rational::zero();
                for (_, p) in &self.values[start..end] {
                    total += &p.pdf;
                }
                total
            }
        }
    }

    /// The most likely totals, in increasing order.
    pub fn modes(&self) -> Vec<Rational> {
        let mut out = Vec::new();
        let mut best: Option<&Rational> = None;
        for (x, p) in &self.values {
            match best {
                Some(b) if *b < p.pdf => {
                    best = Some(&p.pdf);
                    out.clear();
                    out.push(x.clone());
                }
                Some(b) if *b == p.pdf => out.push(x.clone()),
                Some(_) => {}
                None => {
                    best = Some(&p.pdf);
                    out.push(x.clone());
                }
            }
        }
        out
    }

    /// The [median](https://en.wikipedia.org/wiki/Median#Probability_distributions),
    /// the smallest total `m` with `P(X <= m) >= 1/2`.
    pub fn median(&self) -> Rational {
        let half = Rational::new(BigInt::one(), BigInt::from(2));
        self.values
            .iter()
            .find(|(_, p)| p.cdf >= half)
            .map_or_else(Rational::zero, |(x, _)| x.clone())
    }
}

// Step the odometer, rightmost cursor fastest. Returns `false` once every
// combination has been visited.
fn advance(cursors: &mut [usize], subtables: &[Vec<(Rational, Rational)>]) -> bool {
    for (c, sub) in cursors.iter_mut().zip(subtables).rev() {
        *c += 1;
        if *c < sub.len() {
            return true;
        }
        *c = 0;
    }
    false
}

/// Number of ways `n` dice with `f` faces can sum to `i`, by
/// inclusion-exclusion over the dice that exceed `f`.
fn ways(n: usize, f: usize, i: usize) -> BigInt {
    let top = BigInt::from(n - 1);
    let mut out = BigInt::zero();
    for j in 0..n {
        // C(i - f*j - 1, n - 1) is zero once its top goes below n - 1.
        let Some(a) = f.checked_mul(j).and_then(|fj| i.checked_sub(fj)).and_then(|x| x.checked_sub(1))
        else {
            break;
        };
        if a < n - 1 {
            break;
        }
        let term = binomial(BigInt::from(n), BigInt::from(j)) * binomial(BigInt::from(a), top.clone());
        if j % 2 == 0 {
            out += term;
        } else {
            out -= term;
        }
    }
    out
}

// Distribution of the scaled sum of one group, sorted by value.
fn group_table(group: &DiceGroup) -> Vec<(Rational, Rational)> {
    let n = group.count();
    let f = group.faces();
    let denom = num::pow(BigInt::from(f), n);
    // Totals past `usize::MAX` could never be stored anyway.
    let top = n.saturating_mul(f);
    let mut out: Vec<(Rational, Rational)> = (n..=top)
        .map(|i| {
            let x = Rational::from_integer(BigInt::from(i)) * group.factor();
            (x, Rational::new(ways(n, f, i), denom.clone()))
        })
        .collect();
    if group.factor() < &Rational::zero() {
        out.reverse();
    }
    trace!(count = n, faces = f, factor = %group.factor(), outcomes = out.len(), "group table");
    out
}
