//! Playback sequencer: plays a pattern as timed audio cues.
//!
//! A run plays its first cue immediately, then waits `cue_gap_ms` between cues
//! and `tail_ms` after the last one before `is_playing` drops. Waiting is done
//! by handing a [`Tick`] to the [`Scheduler`]; the host feeds fired ticks back
//! through [`Sequencer::on_tick`].
//!
//! Each run owns a [`CancelToken`]. Halting or replaying cancels the token and
//! the pending timer, so a timer that still fires afterwards is ignored.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::Timing;
use crate::error::{AudioError, ScheduleError};
use crate::flower::Flower;

/// Audio playback service, one cue per flower.
pub trait CuePlayer {
    /// Rewind the flower's cue to the start and play it.
    fn play(&mut self, flower: Flower) -> Result<(), AudioError>;
    /// Pause every cue and rewind it to position zero.
    fn stop_all(&mut self);
    fn set_gain(&mut self, gain: f64);
}

/// Opaque timer id handed out by a [`Scheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i32);

/// Timer service: fire `tick` back into the game after `delay_ms`.
pub trait Scheduler {
    fn schedule(&mut self, delay_ms: u32, tick: Tick) -> Result<TimerHandle, ScheduleError>;
    fn cancel(&mut self, handle: TimerHandle);
}

/// Shared cancellation flag for one run.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Start of a replay after the grace delay.
    Begin,
    /// Play the cue at this index.
    Cue(usize),
    /// Trailing delay elapsed.
    Finish,
}

/// A scheduled continuation of a run.
#[derive(Clone, Debug)]
pub struct Tick {
    token: CancelToken,
    step: Step,
}

impl Tick {
    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_stale(&self) -> bool {
        self.token.is_cancelled()
    }
}

struct Run {
    token: CancelToken,
    pattern: Vec<Flower>,
    pending: Option<TimerHandle>,
}

pub struct Sequencer {
    timing: Timing,
    run: Option<Run>,
    playing: bool,
}

impl Sequencer {
    pub fn new(timing: Timing) -> Self {
        Self { timing, run: None, playing: false }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// True while a run exists, including the grace delay before a replay begins.
    pub fn is_active(&self) -> bool {
        self.run.is_some()
    }

    /// Halt whatever is running and start playing `pattern` right away.
    pub fn play(&mut self, pattern: &[Flower], audio: &mut impl CuePlayer, timers: &mut impl Scheduler) {
        self.halt(audio, timers);
        self.run = Some(Run { token: CancelToken::new(), pattern: pattern.to_vec(), pending: None });
        log::debug!("playing pattern of {} cues", pattern.len());
        self.advance(Step::Begin, audio, timers);
    }

    /// Halt whatever is running and start `pattern` after the grace delay.
    pub fn replay(&mut self, pattern: &[Flower], audio: &mut impl CuePlayer, timers: &mut impl Scheduler) {
        self.halt(audio, timers);
        let token = CancelToken::new();
        let tick = Tick { token: token.clone(), step: Step::Begin };
        match timers.schedule(self.timing.grace_ms, tick) {
            Ok(handle) => {
                self.run = Some(Run { token, pattern: pattern.to_vec(), pending: Some(handle) });
                log::debug!("replay scheduled in {}ms", self.timing.grace_ms);
            }
            Err(err) => log::error!("replay not started: {err}"),
        }
    }

    /// Cancel the active run, silence every cue and clear the playing flag.
    pub fn halt(&mut self, audio: &mut impl CuePlayer, timers: &mut impl Scheduler) {
        if let Some(run) = self.run.take() {
            run.token.cancel();
            if let Some(handle) = run.pending {
                timers.cancel(handle);
            }
        }
        if self.playing {
            audio.stop_all();
            self.playing = false;
            log::debug!("playback halted");
        }
    }

    /// Continue the run that scheduled `tick`. Returns false for stale ticks.
    pub fn on_tick(&mut self, tick: Tick, audio: &mut impl CuePlayer, timers: &mut impl Scheduler) -> bool {
        if tick.is_stale() {
            log::trace!("ignoring stale tick {:?}", tick.step);
            return false;
        }
        match &mut self.run {
            Some(run) if Rc::ptr_eq(&run.token.0, &tick.token.0) => run.pending = None,
            _ => return false,
        }
        self.advance(tick.step, audio, timers);
        true
    }

    fn advance(&mut self, step: Step, audio: &mut impl CuePlayer, timers: &mut impl Scheduler) {
        let timing = self.timing;
        let Some(run) = self.run.as_mut() else {
            return;
        };
        let next = match step {
            Step::Begin => {
                self.playing = true;
                match run.pattern.first() {
                    Some(&flower) => {
                        play_cue(audio, 0, flower);
                        Some(after_cue(0, run.pattern.len(), timing))
                    }
                    None => Some((timing.tail_ms, Step::Finish)),
                }
            }
            Step::Cue(i) => {
                if let Some(&flower) = run.pattern.get(i) {
                    play_cue(audio, i, flower);
                }
                Some(after_cue(i, run.pattern.len(), timing))
            }
            Step::Finish => None,
        };
        let scheduled = next.map(|(delay, step)| {
            let tick = Tick { token: run.token.clone(), step };
            timers.schedule(delay, tick).map(|handle| run.pending = Some(handle))
        });
        match scheduled {
            Some(Ok(())) => {}
            Some(Err(err)) => {
                log::error!("playback stopped early: {err}");
                self.finish();
            }
            None => self.finish(),
        }
    }

    fn finish(&mut self) {
        if let Some(run) = self.run.take() {
            run.token.cancel();
        }
        self.playing = false;
    }
}

fn play_cue(audio: &mut impl CuePlayer, index: usize, flower: Flower) {
    if let Err(err) = audio.play(flower) {
        log::warn!("cue {} ({:?}) failed: {err}", index, flower);
    }
}

/// Delay and step that follow the cue at `index` in a pattern of `len` cues.
fn after_cue(index: usize, len: usize, timing: Timing) -> (u32, Step) {
    if index + 1 < len {
        (timing.cue_gap_ms, Step::Cue(index + 1))
    } else {
        (timing.tail_ms, Step::Finish)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Flower::*;

    #[derive(Default)]
    struct Speaker {
        played: Vec<Flower>,
        stops: usize,
        fail_on: Option<Flower>,
    }

    impl CuePlayer for Speaker {
        fn play(&mut self, flower: Flower) -> Result<(), AudioError> {
            self.played.push(flower);
            if self.fail_on == Some(flower) {
                return Err(AudioError::Rejected("autoplay".into()));
            }
            Ok(())
        }
        fn stop_all(&mut self) {
            self.stops += 1;
        }
        fn set_gain(&mut self, _gain: f64) {}
    }

    #[derive(Default)]
    struct Timers {
        next: i32,
        queue: Vec<(TimerHandle, u32, Tick)>,
        cancelled: Vec<TimerHandle>,
    }

    impl Scheduler for Timers {
        fn schedule(&mut self, delay_ms: u32, tick: Tick) -> Result<TimerHandle, ScheduleError> {
            self.next += 1;
            let h = TimerHandle(self.next);
            self.queue.push((h, delay_ms, tick));
            Ok(h)
        }
        fn cancel(&mut self, handle: TimerHandle) {
            self.cancelled.push(handle);
            self.queue.retain(|(h, _, _)| *h != handle);
        }
    }

    impl Timers {
        fn pop(&mut self) -> Option<(u32, Tick)> {
            if self.queue.is_empty() {
                return None;
            }
            let (_, d, t) = self.queue.remove(0);
            Some((d, t))
        }
    }

    fn drive(seq: &mut Sequencer, audio: &mut Speaker, timers: &mut Timers) -> Vec<u32> {
        let mut delays = Vec::new();
        while let Some((d, t)) = timers.pop() {
            delays.push(d);
            seq.on_tick(t, audio, timers);
        }
        delays
    }

    #[test]
    fn plays_in_order_with_gaps_and_tail() {
        let (mut seq, mut audio, mut timers) = (Sequencer::new(Timing::default()), Speaker::default(), Timers::default());
        seq.play(&[Blossom, Daisy, Blossom], &mut audio, &mut timers);
        assert!(seq.is_playing());
        assert_eq!(audio.played, vec![Blossom]);
        let delays = drive(&mut seq, &mut audio, &mut timers);
        assert_eq!(delays, vec![800, 800, 500]);
        assert_eq!(audio.played, vec![Blossom, Daisy, Blossom]);
        assert!(!seq.is_playing());
        assert!(!seq.is_active());
    }

    #[test]
    fn failed_cue_does_not_abort_run() {
        let (mut seq, mut timers) = (Sequencer::new(Timing::default()), Timers::default());
        let mut audio = Speaker { fail_on: Some(Hyacinth), ..Speaker::default() };
        seq.play(&[Hyacinth, Blossom], &mut audio, &mut timers);
        drive(&mut seq, &mut audio, &mut timers);
        assert_eq!(audio.played, vec![Hyacinth, Blossom]);
    }

    #[test]
    fn replay_mid_run_cancels_and_restarts() {
        let (mut seq, mut audio, mut timers) = (Sequencer::new(Timing::default()), Speaker::default(), Timers::default());
        seq.play(&[Blossom, Hyacinth], &mut audio, &mut timers);
        let (first_handle, _, stale) = timers.queue[0].clone();

        seq.replay(&[Blossom, Hyacinth], &mut audio, &mut timers);
        assert!(!seq.is_playing());
        assert_eq!(audio.stops, 1);
        assert_eq!(timers.cancelled, vec![first_handle]);
        assert!(!seq.on_tick(stale, &mut audio, &mut timers));

        let (delay, begin) = timers.pop().unwrap();
        assert_eq!((delay, begin.step()), (50, Step::Begin));
        assert!(seq.on_tick(begin, &mut audio, &mut timers));
        assert!(seq.is_playing());
        assert_eq!(audio.played, vec![Blossom, Blossom]);
    }

    #[test]
    fn empty_pattern_only_waits_tail() {
        let (mut seq, mut audio, mut timers) = (Sequencer::new(Timing::default()), Speaker::default(), Timers::default());
        seq.play(&[], &mut audio, &mut timers);
        assert!(seq.is_playing());
        assert_eq!(drive(&mut seq, &mut audio, &mut timers), vec![500]);
        assert!(audio.played.is_empty());
        assert!(!seq.is_playing());
    }
}
