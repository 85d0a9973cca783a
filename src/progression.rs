//! Progression tracker: completion count, unlocked flowers and pattern length range.
//!
//! Progression is a declarative table of `(threshold, milestone)` pairs per
//! variant. Each successful round bumps the completion count by one and fires
//! the milestone whose threshold equals the new count, so every milestone
//! fires exactly once.

use crate::flower::{Flower, Variant};

/// Inclusive bounds on generated pattern length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LengthRange {
    pub min: usize,
    pub max: usize,
}

impl LengthRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, len: usize) -> bool {
        (self.min..=self.max).contains(&len)
    }
}

impl Default for LengthRange {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Effect fired when a threshold is reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Milestone {
    Unlock(Flower),
    Widen(LengthRange),
}

pub static CLASSIC_MILESTONES: [(u32, Milestone); 4] = [
    (5, Milestone::Unlock(Flower::Hyacinth)),
    (10, Milestone::Widen(LengthRange::new(1, 2))),
    (15, Milestone::Unlock(Flower::Daisy)),
    (25, Milestone::Widen(LengthRange::new(1, 3))),
];

// Classic table first, then the late game of the five-flower garden.
pub static EXTENDED_MILESTONES: [(u32, Milestone); 8] = [
    (5, Milestone::Unlock(Flower::Hyacinth)),
    (10, Milestone::Widen(LengthRange::new(1, 2))),
    (15, Milestone::Unlock(Flower::Daisy)),
    (25, Milestone::Widen(LengthRange::new(1, 3))),
    (30, Milestone::Unlock(Flower::Tulip)),
    (35, Milestone::Widen(LengthRange::new(2, 3))),
    (40, Milestone::Unlock(Flower::Sunflower)),
    (45, Milestone::Widen(LengthRange::new(3, 3))),
];

pub fn milestones(variant: Variant) -> &'static [(u32, Milestone)] {
    match variant {
        Variant::Classic => &CLASSIC_MILESTONES,
        Variant::Extended => &EXTENDED_MILESTONES,
    }
}

#[derive(Clone, Debug)]
pub struct Progression {
    variant: Variant,
    completed: u32,
    unlocked: Vec<Flower>,
    range: LengthRange,
}

impl Progression {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            completed: 0,
            unlocked: vec![Flower::Blossom],
            range: LengthRange::default(),
        }
    }

    /// State reached after `completed` successful rounds.
    pub fn replayed(variant: Variant, completed: u32) -> Self {
        let mut p = Self::new(variant);
        for _ in 0..completed {
            p.record_completion();
        }
        p
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn unlocked(&self) -> &[Flower] {
        &self.unlocked
    }

    pub fn is_unlocked(&self, flower: Flower) -> bool {
        self.unlocked.contains(&flower)
    }

    pub fn range(&self) -> LengthRange {
        self.range
    }

    /// Count one more completed round and apply the milestone reached by it, if any.
    pub fn record_completion(&mut self) -> Option<Milestone> {
        self.completed += 1;
        let reached = milestones(self.variant)
            .iter()
            .find(|(threshold, _)| *threshold == self.completed)
            .map(|(_, m)| *m)?;
        match reached {
            Milestone::Unlock(flower) => {
                if !self.unlocked.contains(&flower) {
                    self.unlocked.push(flower);
                }
            }
            Milestone::Widen(range) => {
                self.range = range;
            }
        }
        log::info!("milestone at {} completions: {:?}", self.completed, reached);
        Some(reached)
    }
}
