// Threshold properties of the progression tables, checked against the tables themselves.

use flower_says::progression::milestones;
use flower_says::{Flower, LengthRange, Milestone, Progression, Rng, Variant};

fn expected_at(variant: Variant, completed: u32) -> (Vec<Flower>, LengthRange) {
    let mut unlocked = vec![Flower::Blossom];
    let mut range = LengthRange::new(1, 1);
    for (threshold, m) in milestones(variant) {
        if *threshold > completed {
            break;
        }
        match m {
            Milestone::Unlock(f) => unlocked.push(*f),
            Milestone::Widen(r) => range = *r,
        }
    }
    (unlocked, range)
}

#[test]
fn state_matches_table_at_every_count() {
    for variant in [Variant::Classic, Variant::Extended] {
        for n in 0..=60 {
            let p = Progression::replayed(variant, n);
            let (unlocked, range) = expected_at(variant, n);
            assert_eq!(p.unlocked(), unlocked.as_slice(), "{variant:?} after {n}");
            assert_eq!(p.range(), range, "{variant:?} after {n}");
        }
    }
}

#[test]
fn each_milestone_fires_exactly_once() {
    for variant in [Variant::Classic, Variant::Extended] {
        let mut p = Progression::new(variant);
        let mut fired = Vec::new();
        for _ in 0..100 {
            if let Some(m) = p.record_completion() {
                fired.push((p.completed(), m));
            }
        }
        assert_eq!(fired.as_slice(), milestones(variant));
    }
}

#[test]
fn classic_thresholds() {
    let at = |n| Progression::replayed(Variant::Classic, n);
    assert_eq!(at(4).unlocked(), &[Flower::Blossom]);
    assert_eq!(at(5).unlocked(), &[Flower::Blossom, Flower::Hyacinth]);
    assert_eq!(at(9).range(), LengthRange::new(1, 1));
    assert_eq!(at(10).range(), LengthRange::new(1, 2));
    assert_eq!(at(14).unlocked().len(), 2);
    assert_eq!(at(15).unlocked().len(), 3);
    assert_eq!(at(24).range(), LengthRange::new(1, 2));
    assert_eq!(at(25).range(), LengthRange::new(1, 3));
}

#[test]
fn generated_patterns_stay_inside_progression() {
    let mut rng = Rng::new(2024);
    for variant in [Variant::Classic, Variant::Extended] {
        for n in [0, 5, 10, 15, 25, 30, 35, 40, 45, 50] {
            let p = Progression::replayed(variant, n);
            for _ in 0..50 {
                let pattern = flower_says::pattern::generate(p.range(), p.unlocked(), &mut rng);
                assert!(p.range().contains(pattern.len()));
                assert!(pattern.iter().all(|f| p.is_unlocked(*f)));
            }
        }
    }
}
