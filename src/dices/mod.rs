use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
    sync::Arc,
};

use num::{BigInt, One, Signed, Zero};

use crate::{
    DiceError, Rational, Result,
    dist::{DistTable, TableCache},
};

mod int;
mod ops;
mod parse;
mod print;
mod random;
mod stats;

pub use int::IntDice;
pub use random::{ConfigRandom, ConfigSummary, SampleSummary};

/// A batch of identical dice, each showing `1..=faces`, whose sum is scaled
/// by `factor`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiceGroup {
    count: usize,
    faces: usize,
    factor: Rational,
}

impl DiceGroup {
    /// Number of dice in the group.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of faces on each die.
    pub fn faces(&self) -> usize {
        self.faces
    }

    /// Multiplier applied to the summed roll of the group.
    pub fn factor(&self) -> &Rational {
        &self.factor
    }

    // Bigger dice first, then the smaller factor first.
    fn canonical_cmp(&self, other: &DiceGroup) -> Ordering {
        other.faces.cmp(&self.faces).then_with(|| self.factor.cmp(&other.factor))
    }

    // Smallest and largest value this group can contribute.
    fn bounds(&self) -> (Rational, Rational) {
        let low = Rational::from_integer(BigInt::from(self.count)) * &self.factor;
        let high = Rational::from_integer(BigInt::from(self.count) * BigInt::from(self.faces))
            * &self.factor;
        if self.factor.is_positive() { (low, high) } else { (high, low) }
    }
}

/// A sum of scaled dice groups plus a constant modifier, e.g. `2d10*3-2d6/4+10`.
///
/// The groups are always kept in canonical form: sorted by faces (largest
/// first) and then by factor (smallest first), with groups that share both
/// merged into one. Two `Dice` are equal exactly when their canonical forms
/// are equal.
///
/// ```
/// use dicecalc::Dice;
///
/// let dice: Dice = " 3*2d10 - 2d6/4 + d8*6/8 + 10\n".parse().unwrap();
/// assert_eq!(dice.to_string(), "2d10*3+d8*3/4-2d6/4+10");
/// ```
///
/// The exact probability table behind [`Dice::pdf`], [`Dice::cdf`] and
/// [`Dice::ccdf`] is built on first use and shared by clones until one of
/// them is modified.
#[derive(Debug, Clone)]
pub struct Dice {
    groups: Vec<DiceGroup>,
    modifier: Rational,
    min: Rational,
    max: Rational,
    table: TableCache,
}

impl Default for Dice {
    fn default() -> Self {
        Self::new()
    }
}

impl Dice {
    /// The empty expression, which always rolls 0.
    pub fn new() -> Self {
        Dice {
            groups: Vec::new(),
            modifier: Rational::zero(),
            min: Rational::zero(),
            max: Rational::zero(),
            table: TableCache::default(),
        }
    }

    /// `count` dice with `faces` faces each, e.g. `Dice::dice(2, 6)` is `2d6`.
    ///
    /// A count or face number of zero gives the empty expression.
    pub fn dice(count: isize, faces: isize) -> Result<Self> {
        Self::scaled_dice(count, faces, Rational::one())
    }

    /// `count` dice with `faces` faces each, their sum multiplied by `factor`.
    ///
    /// ```
    /// use dicecalc::{Dice, DiceError, Rational};
    ///
    /// let half = Rational::new(1.into(), 2.into());
    /// assert_eq!(Dice::scaled_dice(3, 8, half).unwrap().to_string(), "3d8/2");
    /// assert_eq!(
    ///     Dice::dice(-1, 6).unwrap_err(),
    ///     DiceError::InvalidArgument { count: -1, faces: 6 }
    /// );
    /// ```
    pub fn scaled_dice(count: isize, faces: isize, factor: Rational) -> Result<Self> {
        if count < 0 || faces < 0 {
            return Err(DiceError::InvalidArgument { count, faces });
        }
        let mut out = Dice::new();
        out.insert(count as usize, faces as usize, factor);
        out.updated();
        Ok(out)
    }

    /// An expression without dice that always rolls `n`.
    pub fn constant(n: Rational) -> Self {
        let mut out = Dice::new();
        out.modifier = n;
        out.updated();
        out
    }

    // Infallible version of `dice` for counts known to be non-negative.
    pub(crate) fn uniform(count: usize, faces: usize) -> Self {
        let mut out = Dice::new();
        out.insert(count, faces, Rational::one());
        out.updated();
        out
    }

    /// The dice groups in canonical order.
    pub fn groups(&self) -> &[DiceGroup] {
        &self.groups
    }

    /// The constant added to every roll.
    pub fn modifier(&self) -> &Rational {
        &self.modifier
    }

    /// Smallest possible roll.
    pub fn min(&self) -> &Rational {
        &self.min
    }

    /// Largest possible roll.
    pub fn max(&self) -> &Rational {
        &self.max
    }

    /// Smallest and largest possible roll.
    pub fn bounds(&self) -> (Rational, Rational) {
        (self.min.clone(), self.max.clone())
    }

    /// `true` if the expression contains no dice.
    pub fn is_constant(&self) -> bool {
        self.groups.is_empty()
    }

    /// The exact distribution of this expression, built on first use.
    pub fn table(&self) -> Arc<DistTable> {
        self.table.get_or_build(|| DistTable::build(self))
    }

    /// The chance of rolling exactly `x`.
    ///
    /// ```
    /// use dicecalc::{Dice, Rational};
    ///
    /// let d6: Dice = "d6".parse().unwrap();
    /// assert_eq!(d6.pdf(&Rational::from_integer(3.into())), Rational::new(1.into(), 6.into()));
    /// assert_eq!(d6.pdf(&Rational::from_integer(7.into())), Rational::from_integer(0.into()));
    /// ```
    pub fn pdf(&self, x: &Rational) -> Rational {
        self.table().pdf(x)
    }

    /// The chance of rolling `x` or less.
    pub fn cdf(&self, x: &Rational) -> Rational {
        self.table().cdf(x)
    }

    /// The chance of rolling `x` or more.
    pub fn ccdf(&self, x: &Rational) -> Rational {
        self.table().ccdf(x)
    }

    /// The chance of rolling something in `x..=y`.
    pub fn interval(&self, x: &Rational, y: &Rational) -> Rational {
        self.table().interval(x, y)
    }

    // Adds a group, merging it into an existing group with the same faces
    // and factor. Does not update bounds, callers finish with `updated`.
    // Returns `false`, leaving `self` unchanged, if the merged count would
    // not fit in `usize`.
    fn try_insert(&mut self, count: usize, faces: usize, factor: Rational) -> bool {
        if count == 0 || faces == 0 || factor.is_zero() {
            return true;
        }
        let group = DiceGroup { count, faces, factor };
        match self.groups.binary_search_by(|g| g.canonical_cmp(&group)) {
            Ok(i) => match self.groups[i].count.checked_add(group.count) {
                Some(n) => self.groups[i].count = n,
                None => return false,
            },
            Err(i) => self.groups.insert(i, group),
        }
        true
    }

    fn insert(&mut self, count: usize, faces: usize, factor: Rational) {
        if !self.try_insert(count, faces, factor) {
            panic!("dice count overflow");
        }
    }

    fn insert_group(&mut self, group: &DiceGroup) {
        self.insert(group.count, group.faces, group.factor.clone());
    }

    // Restores the group order after factors changed sign.
    fn resort(&mut self) {
        self.groups.sort_by(DiceGroup::canonical_cmp);
    }

    // Recomputes the bounds and drops the cached table. Every mutation ends here.
    fn updated(&mut self) {
        let mut min = self.modifier.clone();
        let mut max = self.modifier.clone();
        for g in &self.groups {
            let (low, high) = g.bounds();
            min += low;
            max += high;
        }
        debug_assert!(min <= max);
        self.min = min;
        self.max = max;
        self.table = TableCache::default();
    }

    fn negate_inplace(&mut self) {
        for g in &mut self.groups {
            g.factor = -&g.factor;
        }
        self.modifier = -&self.modifier;
        self.resort();
        self.updated();
    }

    fn add_inplace(&mut self, other: &Dice) {
        for g in &other.groups {
            self.insert_group(g);
        }
        self.modifier += &other.modifier;
        self.updated();
    }

    fn sub_inplace(&mut self, other: &Dice) {
        for g in &other.groups {
            self.insert(g.count, g.faces, -&g.factor);
        }
        self.modifier -= &other.modifier;
        self.updated();
    }

    fn add_constant_inplace(&mut self, n: &Rational) {
        self.modifier += n;
        self.updated();
    }

    fn scale_inplace(&mut self, r: &Rational) {
        if r.is_zero() {
            self.groups.clear();
            self.modifier.set_zero();
        } else {
            for g in &mut self.groups {
                g.factor *= r;
            }
            self.modifier *= r;
            if r.is_negative() {
                self.resort();
            }
        }
        self.updated();
    }

    /// Divides every factor and the modifier by `r`, failing on zero.
    ///
    /// ```
    /// use dicecalc::{Dice, DiceError, Rational};
    ///
    /// let dice: Dice = "2d6".parse().unwrap();
    /// let third = dice.checked_div(&Rational::from_integer(3.into())).unwrap();
    /// assert_eq!(third.to_string(), "2d6/3");
    /// assert_eq!(dice.checked_div(&Rational::from_integer(0.into())), Err(DiceError::DivisionByZero));
    /// ```
    pub fn checked_div(&self, r: &Rational) -> Result<Self> {
        if r.is_zero() {
            return Err(DiceError::DivisionByZero);
        }
        let mut out = self.clone();
        out.scale_inplace(&r.recip());
        Ok(out)
    }
}

impl PartialEq for Dice {
    fn eq(&self, other: &Self) -> bool {
        self.groups == other.groups && self.modifier == other.modifier
    }
}

impl Eq for Dice {}

impl Hash for Dice {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.groups.hash(state);
        self.modifier.hash(state);
    }
}
