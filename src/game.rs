//! Game controller. Owns the round, the progression, the random source and the
//! playback sequencer, plus the injected audio and timer services.

use crate::config::GameConfig;
use crate::flower::{Flower, Variant, Volume};
use crate::input::{Round, Verdict};
use crate::keys::Command;
use crate::pattern::{self, Rng};
use crate::playback::{CuePlayer, Scheduler, Sequencer, Tick};
use crate::progression::{LengthRange, Milestone, Progression};

/// Feedback for the presenter, drained after every interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Correct,
    Incorrect,
    Unlocked(Flower),
    RangeWidened(LengthRange),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FlowerView {
    pub flower: Flower,
    pub glyph: &'static str,
    pub key: char,
    pub unlocked: bool,
}

/// Everything the presenter needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameView {
    pub started: bool,
    /// Shown as masked placeholders; the flowers themselves stay hidden.
    pub target_len: usize,
    /// One entry per target slot, filled from the attempt.
    pub slots: Vec<Option<Flower>>,
    pub playing: bool,
    pub completed: u32,
    pub volume: u8,
    pub flowers: Vec<FlowerView>,
}

pub struct FlowerGame<A: CuePlayer, S: Scheduler> {
    variant: Variant,
    audio: A,
    timers: S,
    sequencer: Sequencer,
    progression: Progression,
    round: Round,
    rng: Rng,
    volume: Volume,
    started: bool,
    events: Vec<GameEvent>,
}

impl<A: CuePlayer, S: Scheduler> FlowerGame<A, S> {
    pub fn new(config: GameConfig, mut audio: A, timers: S) -> Self {
        let volume = config.volume.map(Volume::new).unwrap_or_default();
        audio.set_gain(volume.gain());
        let rng = match config.seed {
            Some(seed) => Rng::new(seed),
            None => Rng::from_entropy(),
        };
        Self {
            variant: config.variant,
            audio,
            timers,
            sequencer: Sequencer::new(config.timing),
            progression: Progression::new(config.variant),
            round: Round::default(),
            rng,
            volume,
            started: false,
            events: Vec::new(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_playing(&self) -> bool {
        self.sequencer.is_playing()
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Generate the first pattern and play it. Does nothing once started.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        log::info!("game started ({:?})", self.variant);
        self.next_round();
    }

    /// Dispatch a player intent from either keyboard or pointer.
    pub fn apply(&mut self, command: Command) {
        if !self.started && command != Command::Replay {
            return;
        }
        match command {
            Command::Press(flower) => {
                self.press(flower);
            }
            Command::Replay => self.replay(),
            Command::Submit => {
                self.submit();
            }
            Command::Undo => {
                self.round.undo();
            }
            Command::ClearAll => self.round.clear(),
        }
    }

    /// Map a `KeyboardEvent.key` and apply it. Returns the command that was applied.
    pub fn handle_key(&mut self, key: &str) -> Option<Command> {
        let command = Command::from_key(key, self.variant)?;
        self.apply(command);
        Some(command)
    }

    pub fn press(&mut self, flower: Flower) -> bool {
        self.round.append(flower, self.progression.unlocked())
    }

    pub fn replay(&mut self) {
        self.sequencer.replay(self.round.target(), &mut self.audio, &mut self.timers);
    }

    pub fn submit(&mut self) -> Verdict {
        if self.round.attempt().len() != self.round.target().len() {
            return Verdict::Ignored;
        }
        if self.sequencer.is_active() {
            self.sequencer.halt(&mut self.audio, &mut self.timers);
        }
        let verdict = self.round.submit();
        match verdict {
            Verdict::Correct => {
                self.events.push(GameEvent::Correct);
                match self.progression.record_completion() {
                    Some(Milestone::Unlock(flower)) => self.events.push(GameEvent::Unlocked(flower)),
                    Some(Milestone::Widen(range)) => self.events.push(GameEvent::RangeWidened(range)),
                    None => {}
                }
                log::debug!("round complete ({} total)", self.progression.completed());
                self.next_round();
            }
            Verdict::Incorrect => {
                self.events.push(GameEvent::Incorrect);
                log::debug!("attempt rejected; same pattern again");
            }
            Verdict::Ignored => {}
        }
        verdict
    }

    /// Deliver a fired timer back into the sequencer.
    pub fn on_tick(&mut self, tick: Tick) -> bool {
        self.sequencer.on_tick(tick, &mut self.audio, &mut self.timers)
    }

    pub fn set_volume(&mut self, value: u8) {
        self.volume = Volume::new(value);
        self.audio.set_gain(self.volume.gain());
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn view(&self) -> GameView {
        let target = self.round.target();
        let attempt = self.round.attempt();
        GameView {
            started: self.started,
            target_len: target.len(),
            slots: (0..target.len()).map(|i| attempt.get(i).copied()).collect(),
            playing: self.sequencer.is_playing(),
            completed: self.progression.completed(),
            volume: self.volume.value(),
            flowers: self
                .variant
                .flowers()
                .iter()
                .map(|&flower| FlowerView {
                    flower,
                    glyph: flower.glyph(),
                    key: flower.key().to_ascii_uppercase(),
                    unlocked: self.progression.is_unlocked(flower),
                })
                .collect(),
        }
    }

    /// Stop playback and release pending timers.
    pub fn teardown(&mut self) {
        self.sequencer.halt(&mut self.audio, &mut self.timers);
        self.audio.stop_all();
        log::info!("game torn down after {} completions", self.progression.completed());
    }

    fn next_round(&mut self) {
        let target = pattern::generate(self.progression.range(), self.progression.unlocked(), &mut self.rng);
        self.round = Round::new(target);
        self.sequencer.play(self.round.target(), &mut self.audio, &mut self.timers);
    }
}
