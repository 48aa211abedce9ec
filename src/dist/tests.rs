use num::{One, Zero};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::{ConfigRandom, Dice, Rational};

fn r(n: i64) -> Rational {
    Rational::from_integer(n.into())
}

fn q(n: i64, d: i64) -> Rational {
    Rational::new(n.into(), d.into())
}

fn parse(s: &str) -> Dice {
    s.parse().unwrap()
}

#[test]
fn single_die() {
    let d6 = parse("1d6");
    for i in 1..=6 {
        assert_eq!(d6.pdf(&r(i)), q(1, 6));
    }
    assert_eq!(d6.pdf(&r(0)), r(0));
    assert_eq!(d6.pdf(&r(7)), r(0));
    assert_eq!(d6.cdf(&r(3)), q(1, 2));
    assert_eq!(d6.ccdf(&r(4)), q(1, 2));
}

#[test]
fn three_dice() {
    let dice = parse("3d6");
    assert_eq!(dice.pdf(&r(10)), q(27, 216));
    assert_eq!(dice.pdf(&r(11)), q(27, 216));
    assert_eq!(dice.cdf(&r(18)), r(1));
    assert_eq!(dice.pdf(&r(2)), r(0));
    assert_eq!(dice.table().modes(), vec![r(10), r(11)]);
    assert_eq!(dice.table().median(), r(10));
    assert_eq!(dice.table().len(), 16);
}

#[test]
fn between_and_outside_totals() {
    let dice = parse("d4*2");
    assert_eq!(dice.pdf(&r(3)), r(0));
    assert_eq!(dice.cdf(&r(3)), q(1, 4));
    assert_eq!(dice.ccdf(&r(3)), q(3, 4));
    assert_eq!(dice.cdf(&r(1)), r(0));
    assert_eq!(dice.ccdf(&r(1)), r(1));
    assert_eq!(dice.cdf(&r(9)), r(1));
    assert_eq!(dice.ccdf(&r(9)), r(0));
    assert_eq!(dice.cdf(&q(5, 2)), q(1, 4));
}

#[test]
fn interval() {
    let dice = parse("2d6");
    assert_eq!(dice.interval(&r(2), &r(12)), r(1));
    assert_eq!(dice.interval(&r(6), &r(8)), q(16, 36));
    assert_eq!(dice.interval(&r(7), &r(7)), q(6, 36));
    assert_eq!(dice.interval(&r(8), &r(6)), r(0));
    assert_eq!(dice.interval(&r(13), &r(20)), r(0));
}

#[test]
fn constant_table() {
    let dice = parse("");
    let table = dice.table();
    assert_eq!(table.len(), 1);
    assert!(!table.is_empty());
    assert_eq!(dice.pdf(&r(0)), r(1));
    assert_eq!(dice.cdf(&r(0)), r(1));
    assert_eq!(dice.ccdf(&r(0)), r(1));

    let five = parse("5/2");
    assert_eq!(five.pdf(&q(5, 2)), r(1));
    assert_eq!(five.cdf(&r(2)), r(0));
}

#[test]
fn opposite_groups_cancel_into_shared_totals() {
    let dice = parse("d6-d6");
    assert_eq!(dice.pdf(&r(0)), q(6, 36));
    assert_eq!(dice.pdf(&r(5)), q(1, 36));
    assert_eq!(dice.pdf(&r(-5)), q(1, 36));
    assert_eq!(dice.table().modes(), vec![r(0)]);
}

#[test]
fn mixed_factors() {
    let dice = parse("2d10*3+d8*3/4-2d6/4+10");
    let table = dice.table();
    let (first, _) = table.iter().next().unwrap();
    let (last, _) = table.iter().last().unwrap();
    assert_eq!(first, dice.min());
    assert_eq!(last, dice.max());
    let total = table.iter().fold(Rational::zero(), |acc, (_, p)| acc + &p.pdf);
    assert_eq!(total, Rational::one());

    let mean = table.iter().fold(Rational::zero(), |acc, (x, p)| acc + x * &p.pdf);
    assert_eq!(mean, dice.mean());
}

#[test]
fn table_variance_matches_closed_form() {
    for s in ["2d6", "2d10-2d6+10", "d20/3+d4*2-1", "4d3"] {
        let dice = parse(s);
        let table = dice.table();
        let mean = dice.mean();
        let variance = table.iter().fold(Rational::zero(), |acc, (x, p)| {
            let dev = x - &mean;
            acc + &dev * &dev * &p.pdf
        });
        assert_eq!(variance, dice.variance(), "{s}");
    }
}

#[test]
fn random_expressions_sum_to_one() {
    let mut rng = ChaCha20Rng::seed_from_u64(123);
    let config = ConfigRandom::default();
    for _ in 0..30 {
        let dice = Dice::make_random(&mut rng, &config);
        let table = dice.table();
        let total = table.iter().fold(Rational::zero(), |acc, (_, p)| acc + &p.pdf);
        assert_eq!(total, Rational::one(), "{dice}");
        assert_eq!(table.iter().next().unwrap().0, dice.min());
        assert_eq!(table.iter().last().unwrap().0, dice.max());
    }
}

fn small_dice() -> impl Strategy<Value = Dice> {
    let group = (1isize..4, 1isize..9, -3i64..4, 1i64..4);
    (prop::collection::vec(group, 0..3), -5i64..6).prop_map(|(groups, modifier)| {
        let mut dice = Dice::constant(r(modifier));
        for (count, faces, n, d) in groups {
            dice += Dice::scaled_dice(count, faces, q(n, d)).unwrap();
        }
        dice
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn cdf_ccdf_identity(dice in small_dice(), n in -40i64..40, d in 1i64..4) {
        let x = q(n, d);
        prop_assert_eq!(dice.cdf(&x) + dice.ccdf(&x) - dice.pdf(&x), Rational::one());
    }

    #[test]
    fn cdf_monotone(dice in small_dice()) {
        let table = dice.table();
        let mut previous = Rational::zero();
        for (x, p) in table.iter() {
            prop_assert!(p.cdf >= previous);
            prop_assert_eq!(dice.cdf(x), p.cdf.clone());
            previous = p.cdf.clone();
        }
        prop_assert_eq!(dice.cdf(dice.max()), Rational::one());
        prop_assert_eq!(dice.cdf(&(dice.min() - Rational::one())), Rational::zero());
    }

    #[test]
    fn mass_sums_to_one(dice in small_dice()) {
        let total = dice.table().iter().fold(Rational::zero(), |acc, (_, p)| acc + &p.pdf);
        prop_assert_eq!(total, Rational::one());
    }

    #[test]
    fn bounds_ordered(dice in small_dice()) {
        prop_assert!(dice.min() <= dice.max());
        prop_assert!(dice.pdf(dice.min()) > Rational::zero());
        prop_assert!(dice.pdf(dice.max()) > Rational::zero());
    }

    #[test]
    fn notation_is_stable(dice in small_dice()) {
        let text = dice.to_string();
        let again: Dice = text.parse().unwrap();
        prop_assert_eq!(&again, &dice);
        prop_assert_eq!(again.to_string(), text);
    }
}
