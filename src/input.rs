//! Input collector: the target pattern for the current round and the player's attempt.

use crate::flower::Flower;

/// Result of submitting the attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Attempt length differs from the target; nothing happened.
    Ignored,
    Correct,
    /// Attempt was cleared; the target stays for another try.
    Incorrect,
}

#[derive(Clone, Debug, Default)]
pub struct Round {
    target: Vec<Flower>,
    attempt: Vec<Flower>,
}

impl Round {
    pub fn new(target: Vec<Flower>) -> Self {
        Self { target, attempt: Vec::new() }
    }

    pub fn target(&self) -> &[Flower] {
        &self.target
    }

    pub fn attempt(&self) -> &[Flower] {
        &self.attempt
    }

    pub fn is_full(&self) -> bool {
        self.attempt.len() >= self.target.len()
    }

    /// Append a flower unless it is locked or the attempt is already full.
    pub fn append(&mut self, flower: Flower, unlocked: &[Flower]) -> bool {
        if !unlocked.contains(&flower) || self.is_full() {
            return false;
        }
        self.attempt.push(flower);
        true
    }

    pub fn undo(&mut self) -> Option<Flower> {
        self.attempt.pop()
    }

    pub fn clear(&mut self) {
        self.attempt.clear();
    }

    pub fn submit(&mut self) -> Verdict {
        if self.attempt.len() != self.target.len() {
            return Verdict::Ignored;
        }
        if self.attempt == self.target {
            Verdict::Correct
        } else {
            self.attempt.clear();
            Verdict::Incorrect
        }
    }
}
