//! The breathing-cycle state machine.
//!
//! `PhaseController` owns the current phase, both hold counters and the one
//! pending tick. Everything it touches outside itself goes through a [`Host`]:
//! text labels, the vibration motor and the tick scheduler. Ticks are only
//! live while a holding phase is current; leaving any phase cancels the
//! pending tick and entering a holding phase arms a fresh one.

use crate::counter::{HoldCounter, Step};
use crate::phase::{transition, Action, Phase};
use crate::scheduler::{TickScheduler, TimerHandle, FIRST_TICK_MS, TICK_MS};

/// The three independent text labels on screen.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Label {
    Phase,
    Hold1,
    Hold2,
}

pub trait DisplaySink {
    fn set_text(&mut self, label: Label, text: &str);
}

pub trait HapticSink {
    /// Fire and forget.
    fn vibrate_short_pulse(&mut self);
}

pub trait Host: DisplaySink + HapticSink + TickScheduler {}

impl<T: DisplaySink + HapticSink + TickScheduler> Host for T {}

type EntryAction<H> = fn(&mut PhaseController, &mut H);

pub struct PhaseController {
    phase: Phase,
    hold1: HoldCounter,
    hold2: HoldCounter,
    timer: Option<TimerHandle>,
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Undefined,
            hold1: HoldCounter::hold1(),
            hold2: HoldCounter::hold2(),
            timer: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hold1(&self) -> i32 {
        self.hold1.value()
    }

    pub fn hold2(&self) -> i32 {
        self.hold2.value()
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.timer
    }

    /// Enter the first phase on app start.
    pub fn start<H: Host>(&mut self, host: &mut H) {
        self.set_phase(Phase::Breathe0, host);
    }

    /// Drop the pending tick on teardown.
    pub fn shutdown<H: Host>(&mut self, host: &mut H) {
        self.cancel_tick(host);
    }

    pub fn apply<H: Host>(&mut self, action: Action, host: &mut H) {
        let next = transition(self.phase, action);
        self.set_phase(next, host);
    }

    pub fn advance<H: Host>(&mut self, host: &mut H) {
        self.apply(Action::Advance, host);
    }

    pub fn reset<H: Host>(&mut self, host: &mut H) {
        self.apply(Action::Reset, host);
    }

    pub fn set_phase<H: Host>(&mut self, target: Phase, host: &mut H) {
        if target == self.phase {
            return;
        }
        log::debug!("phase {:?} -> {:?}", self.phase, target);

        self.cancel_tick(host);
        self.phase = target;
        host.set_text(Label::Phase, target.label());
        Self::entry_action::<H>(target)(self, host);
    }

    /// Called by the host when `handle` fires.
    pub fn on_tick<H: Host>(&mut self, handle: TimerHandle, host: &mut H) {
        if self.timer != Some(handle) {
            log::trace!("stale tick {:?} ignored", handle);
            return;
        }
        self.timer = None;

        let (counter, label) = match self.phase {
            Phase::Hold1 => (&mut self.hold1, Label::Hold1),
            Phase::Hold2 => (&mut self.hold2, Label::Hold2),
            _ => return,
        };

        match counter.step() {
            Step::Saturated => self.advance(host),
            step => {
                if step == Step::CrossedZero {
                    host.vibrate_short_pulse();
                }
                host.set_text(label, &counter.text());
                self.timer = Some(host.arm(TICK_MS));
            }
        }
    }

    fn entry_action<H: Host>(phase: Phase) -> EntryAction<H> {
        match phase {
            Phase::Breathe0 => Self::enter_breathe::<H>,
            Phase::Hold1 | Phase::Hold2 => Self::enter_hold::<H>,
            Phase::Normal3 | Phase::Undefined => Self::enter_idle::<H>,
        }
    }

    fn enter_breathe<H: Host>(&mut self, host: &mut H) {
        self.hold1.reset();
        host.set_text(Label::Hold1, &self.hold1.text());
        self.hold2.reset();
        host.set_text(Label::Hold2, &self.hold2.text());
    }

    fn enter_hold<H: Host>(&mut self, host: &mut H) {
        self.timer = Some(host.arm(FIRST_TICK_MS));
    }

    fn enter_idle<H: Host>(&mut self, _host: &mut H) {}

    fn cancel_tick<H: Host>(&mut self, host: &mut H) {
        if let Some(handle) = self.timer.take() {
            host.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::{HOLD1_START, HOLD2_START, SEC10TH_MAX};
    use crate::scheduler::TimerSlot;
    use std::collections::HashMap;

    #[derive(Default)]
    struct RecordingHost {
        text: HashMap<Label, String>,
        writes: Vec<Label>,
        pulses: usize,
        slot: TimerSlot,
        armed: Vec<(TimerHandle, u32)>,
        cancelled: Vec<TimerHandle>,
    }

    impl RecordingHost {
        fn writes_to(&self, label: Label) -> usize {
            self.writes.iter().filter(|l| **l == label).count()
        }

        fn shown(&self, label: Label) -> &str {
            self.text.get(&label).map(|s| s.as_str()).unwrap_or("")
        }
    }

    impl DisplaySink for RecordingHost {
        fn set_text(&mut self, label: Label, text: &str) {
            self.text.insert(label, text.to_string());
            self.writes.push(label);
        }
    }

    impl HapticSink for RecordingHost {
        fn vibrate_short_pulse(&mut self) {
            self.pulses += 1;
        }
    }

    impl TickScheduler for RecordingHost {
        fn arm(&mut self, delay_ms: u32) -> TimerHandle {
            let handle = self.slot.arm();
            self.armed.push((handle, delay_ms));
            handle
        }

        fn cancel(&mut self, handle: TimerHandle) {
            self.slot.cancel(handle);
            self.cancelled.push(handle);
        }
    }

    fn started() -> (PhaseController, RecordingHost) {
        let mut ctl = PhaseController::new();
        let mut host = RecordingHost::default();
        ctl.start(&mut host);
        (ctl, host)
    }

    /// Fire whatever tick is pending, like the host event loop would.
    fn tick(ctl: &mut PhaseController, host: &mut RecordingHost) {
        let handle = host.slot.pending().expect("no tick pending");
        assert!(host.slot.fire(handle));
        ctl.on_tick(handle, host);
    }

    #[test]
    fn test_start_renders_defaults() {
        let (ctl, host) = started();
        assert_eq!(ctl.phase(), Phase::Breathe0);
        assert_eq!(host.shown(Label::Phase), "0: Deep breath");
        assert_eq!(host.shown(Label::Hold1), "-30.0");
        assert_eq!(host.shown(Label::Hold2), "-15.0");
        assert_eq!(ctl.pending(), None);
        assert!(host.armed.is_empty());
    }

    #[test]
    fn test_set_phase_twice_is_noop() {
        for p in [Phase::Breathe0, Phase::Hold1, Phase::Hold2, Phase::Normal3] {
            let (mut ctl, mut host) = started();
            ctl.set_phase(p, &mut host);
            let writes = host.writes.len();
            let armed = host.armed.len();
            let pending = ctl.pending();

            ctl.set_phase(p, &mut host);
            assert_eq!(host.writes.len(), writes, "{:?}", p);
            assert_eq!(host.armed.len(), armed, "{:?}", p);
            assert_eq!(ctl.pending(), pending, "{:?}", p);
            assert_eq!(host.pulses, 0);
        }
    }

    #[test]
    fn test_full_cycle_resets_counters_once() {
        let (mut ctl, mut host) = started();
        assert_eq!(host.writes_to(Label::Hold1), 1);

        ctl.advance(&mut host);
        assert_eq!(ctl.phase(), Phase::Hold1);
        ctl.advance(&mut host);
        assert_eq!(ctl.phase(), Phase::Hold2);
        ctl.advance(&mut host);
        assert_eq!(ctl.phase(), Phase::Normal3);
        assert_eq!(host.writes_to(Label::Hold1), 1);
        assert_eq!(host.writes_to(Label::Hold2), 1);

        ctl.advance(&mut host);
        assert_eq!(ctl.phase(), Phase::Breathe0);
        assert_eq!(host.writes_to(Label::Hold1), 2);
        assert_eq!(host.writes_to(Label::Hold2), 2);
        assert_eq!(ctl.hold1(), HOLD1_START);
        assert_eq!(ctl.hold2(), HOLD2_START);
    }

    #[test]
    fn test_hold_entry_arms_first_tick() {
        let (mut ctl, mut host) = started();
        ctl.advance(&mut host);
        assert_eq!(host.armed.len(), 1);
        assert_eq!(host.armed[0].1, FIRST_TICK_MS);
        assert_eq!(ctl.pending(), Some(host.armed[0].0));

        tick(&mut ctl, &mut host);
        assert_eq!(ctl.hold1(), HOLD1_START + 1);
        assert_eq!(host.shown(Label::Hold1), "-29.9");
        assert_eq!(host.armed.last().map(|a| a.1), Some(TICK_MS));
    }

    #[test]
    fn test_single_pulse_at_zero() {
        let (mut ctl, mut host) = started();
        ctl.advance(&mut host);

        for n in 1..=299 {
            tick(&mut ctl, &mut host);
            assert_eq!(host.pulses, 0, "pulse before zero at tick {}", n);
        }
        tick(&mut ctl, &mut host);
        assert_eq!(ctl.hold1(), 0);
        assert_eq!(host.pulses, 1);
        assert_eq!(host.shown(Label::Hold1), "+0.0");

        for _ in 0..50 {
            tick(&mut ctl, &mut host);
        }
        assert_eq!(host.pulses, 1);
    }

    #[test]
    fn test_hold1_saturation_advances() {
        let (mut ctl, mut host) = started();
        ctl.advance(&mut host);

        while ctl.hold1() < SEC10TH_MAX - 1 {
            tick(&mut ctl, &mut host);
        }
        tick(&mut ctl, &mut host);
        assert_eq!(ctl.hold1(), SEC10TH_MAX);
        assert_eq!(ctl.phase(), Phase::Hold1);
        assert_eq!(host.shown(Label::Hold1), "+99.9");
        let stale = ctl.pending().expect("still ticking");

        tick(&mut ctl, &mut host);
        assert_eq!(ctl.phase(), Phase::Hold2);
        assert_eq!(ctl.hold1(), SEC10TH_MAX);
        assert_eq!(host.shown(Label::Phase), "2: Inhale & hold");

        // Hold2 keeps its own tick chain alive.
        assert!(ctl.pending().is_some());
        ctl.on_tick(stale, &mut host);
        assert_eq!(ctl.hold1(), SEC10TH_MAX);
        assert_eq!(ctl.hold2(), HOLD2_START);

        tick(&mut ctl, &mut host);
        assert_eq!(ctl.hold2(), HOLD2_START + 1);
        assert_eq!(ctl.hold1(), SEC10TH_MAX);
    }

    #[test]
    fn test_hold2_saturation_stops_ticking() {
        let (mut ctl, mut host) = started();
        ctl.set_phase(Phase::Hold2, &mut host);

        while ctl.phase() == Phase::Hold2 {
            tick(&mut ctl, &mut host);
        }
        assert_eq!(ctl.phase(), Phase::Normal3);
        assert_eq!(ctl.hold2(), SEC10TH_MAX);
        assert_eq!(ctl.pending(), None);
        assert_eq!(host.slot.pending(), None);
        assert_eq!(host.pulses, 1);
    }

    #[test]
    fn test_user_advance_hands_tick_to_hold2() {
        let (mut ctl, mut host) = started();
        ctl.advance(&mut host);
        tick(&mut ctl, &mut host);
        let hold1_tick = ctl.pending().expect("hold1 ticking");

        ctl.advance(&mut host);
        assert_eq!(ctl.phase(), Phase::Hold2);
        assert!(host.cancelled.contains(&hold1_tick));
        let hold2_tick = ctl.pending().expect("hold2 ticking");
        assert_ne!(hold1_tick, hold2_tick);

        tick(&mut ctl, &mut host);
        assert_eq!(ctl.hold1(), HOLD1_START + 1);
        assert_eq!(ctl.hold2(), HOLD2_START + 1);
    }

    #[test]
    fn test_reset_from_every_phase() {
        for p in [Phase::Breathe0, Phase::Hold1, Phase::Hold2, Phase::Normal3] {
            let (mut ctl, mut host) = started();
            ctl.set_phase(p, &mut host);
            for _ in 0..5 {
                if ctl.pending().is_some() {
                    tick(&mut ctl, &mut host);
                }
            }

            ctl.reset(&mut host);
            assert_eq!(ctl.phase(), Phase::Breathe0, "{:?}", p);
            assert_eq!(ctl.hold1(), HOLD1_START, "{:?}", p);
            assert_eq!(ctl.hold2(), HOLD2_START, "{:?}", p);
            assert_eq!(ctl.pending(), None, "{:?}", p);
            assert_eq!(host.slot.pending(), None, "{:?}", p);
            assert_eq!(host.shown(Label::Hold1), "-30.0");
        }
    }

    #[test]
    fn test_stale_tick_after_reset_ignored() {
        let (mut ctl, mut host) = started();
        ctl.advance(&mut host);
        tick(&mut ctl, &mut host);
        let late = ctl.pending().expect("ticking");

        ctl.reset(&mut host);
        let writes = host.writes.len();
        ctl.on_tick(late, &mut host);
        assert_eq!(ctl.phase(), Phase::Breathe0);
        assert_eq!(ctl.hold1(), HOLD1_START);
        assert_eq!(host.writes.len(), writes);
        assert!(host.slot.pending().is_none());
    }

    #[test]
    fn test_tick_outside_hold_ignored() {
        let (mut ctl, mut host) = started();
        ctl.set_phase(Phase::Normal3, &mut host);
        let stray = host.slot.arm();
        ctl.on_tick(stray, &mut host);
        assert_eq!(ctl.phase(), Phase::Normal3);
        assert_eq!(ctl.hold1(), HOLD1_START);
        assert_eq!(ctl.hold2(), HOLD2_START);
    }

    #[test]
    fn test_shutdown_cancels_pending() {
        let (mut ctl, mut host) = started();
        ctl.advance(&mut host);
        let handle = ctl.pending().expect("ticking");
        ctl.shutdown(&mut host);
        assert_eq!(ctl.pending(), None);
        assert!(host.cancelled.contains(&handle));

        // Teardown with nothing pending is fine too.
        ctl.shutdown(&mut host);
    }

    #[test]
    fn test_advance_before_start_does_nothing() {
        let mut ctl = PhaseController::new();
        let mut host = RecordingHost::default();
        ctl.advance(&mut host);
        assert_eq!(ctl.phase(), Phase::Undefined);
        assert!(host.writes.is_empty());
    }
}
