//! Pomodoro timer state machine
//!
//! `TimerEngine` owns the `TimerState` and is its only mutation surface. Each
//! operation is one synchronous transition that returns the resulting snapshot.
//! Time is driven from outside through a `TickSource`, and interval completion
//! is reported through a `NotificationSink`.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, info, warn};

use super::{Durations, Mode, TimerState, ValidationError};

/// External once-per-second driver of `TimerEngine::tick`
pub trait TickSource: Send {
    /// Start (or restart) emitting ticks at one-second intervals
    fn begin(&mut self);
    /// Stop emitting ticks
    fn cancel(&mut self);
}

/// Receiver of the "interval complete" event. Implementations must not block;
/// playback failures are theirs to swallow. A panic is caught by the engine.
pub trait NotificationSink: Send {
    fn interval_complete(&mut self, completed: Mode);
}

pub struct TimerEngine {
    state: TimerState,
    ticks: Box<dyn TickSource>,
    notifier: Box<dyn NotificationSink>,
}

impl TimerEngine {
    pub fn new(
        durations: Durations,
        ticks: Box<dyn TickSource>,
        notifier: Box<dyn NotificationSink>,
    ) -> Self {
        Self {
            state: TimerState::new(durations),
            ticks,
            notifier,
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> TimerState {
        self.state
    }

    pub fn start(&mut self) -> TimerState {
        if !self.state.running {
            self.state.running = true;
            self.ticks.begin();
            debug!("{} timer started at {}s", self.state.mode, self.state.remaining_seconds);
        }
        self.state
    }

    pub fn pause(&mut self) -> TimerState {
        if self.state.running {
            self.state.running = false;
            self.ticks.cancel();
            debug!("{} timer paused at {}s", self.state.mode, self.state.remaining_seconds);
        }
        self.state
    }

    /// Pause and restore the full duration of the current mode
    pub fn reset(&mut self) -> TimerState {
        self.pause();
        self.state.remaining_seconds = self.state.active_duration();
        self.state
    }

    /// Advance the countdown by one second. Stale ticks delivered after a
    /// pause are ignored.
    pub fn tick(&mut self) -> TimerState {
        if !self.state.running {
            debug!("Ignoring tick while paused");
            return self.state;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.remaining_seconds == 0 {
            self.complete_interval();
        }
        self.state
    }

    /// User-initiated tab switch; never auto-starts
    pub fn set_mode(&mut self, target: Mode) -> TimerState {
        self.reset();
        self.state.mode = target;
        self.state.remaining_seconds = self.state.durations.seconds(target);
        self.state
    }

    /// Change one phase's length. Re-arms the countdown when `target` is the
    /// displayed mode; otherwise only the stored duration changes.
    pub fn set_duration(&mut self, target: Mode, minutes: i64) -> Result<TimerState, ValidationError> {
        let seconds = self.state.durations.set_minutes(target, minutes)?;
        if target == self.state.mode {
            self.pause();
            self.state.remaining_seconds = seconds;
        }
        Ok(self.state)
    }

    fn complete_interval(&mut self) {
        let completed = self.state.mode;
        info!("{} interval #{} complete", completed, self.state.cycles.get(completed));

        let notifier = &mut self.notifier;
        if panic::catch_unwind(AssertUnwindSafe(|| notifier.interval_complete(completed))).is_err() {
            warn!("Completion notification panicked, continuing with {} transition", completed);
        }
        self.state.cycles.increment(completed);
        self.pause();

        let next = completed.next();
        self.state.mode = next;
        self.state.remaining_seconds = self.state.durations.seconds(next);

        // Breaks start on their own; the next work session waits for the user.
        if completed == Mode::Work {
            self.start();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CycleCounters;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Signal {
        Begin,
        Cancel,
    }

    #[derive(Clone, Default)]
    struct RecordingTicks(Arc<Mutex<Vec<Signal>>>);

    impl TickSource for RecordingTicks {
        fn begin(&mut self) {
            self.0.lock().unwrap().push(Signal::Begin);
        }
        fn cancel(&mut self) {
            self.0.lock().unwrap().push(Signal::Cancel);
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink(Arc<Mutex<Vec<Mode>>>);

    impl NotificationSink for RecordingSink {
        fn interval_complete(&mut self, completed: Mode) {
            self.0.lock().unwrap().push(completed);
        }
    }

    struct PanickingSink;

    impl NotificationSink for PanickingSink {
        fn interval_complete(&mut self, _completed: Mode) {
            panic!("audio device vanished");
        }
    }

    fn create_test_engine() -> (TimerEngine, RecordingTicks, RecordingSink) {
        let ticks = RecordingTicks::default();
        let sink = RecordingSink::default();
        let engine = TimerEngine::new(
            Durations::default(),
            Box::new(ticks.clone()),
            Box::new(sink.clone()),
        );
        (engine, ticks, sink)
    }

    fn tick_n(engine: &mut TimerEngine, n: u32) -> TimerState {
        let mut state = engine.snapshot();
        for _ in 0..n {
            state = engine.tick();
        }
        state
    }

    #[test]
    fn test_start_is_idempotent() {
        let (mut engine, ticks, _) = create_test_engine();

        engine.start();
        let state = engine.start();

        assert!(state.running);
        assert_eq!(*ticks.0.lock().unwrap(), vec![Signal::Begin]);
    }

    #[test]
    fn test_pause_keeps_remaining_and_is_idempotent() {
        let (mut engine, ticks, _) = create_test_engine();

        engine.start();
        tick_n(&mut engine, 10);
        engine.pause();
        let state = engine.pause();

        assert!(!state.running);
        assert_eq!(state.remaining_seconds, 1490);
        assert_eq!(*ticks.0.lock().unwrap(), vec![Signal::Begin, Signal::Cancel]);
    }

    #[test]
    fn test_ticks_ignored_while_paused() {
        let (mut engine, _, _) = create_test_engine();

        engine.start();
        tick_n(&mut engine, 3);
        engine.pause();
        let state = tick_n(&mut engine, 50);

        assert_eq!(state.remaining_seconds, 1497);

        // Never started at all
        let (mut fresh, _, sink) = create_test_engine();
        let state = tick_n(&mut fresh, 2000);
        assert_eq!(state.remaining_seconds, 1500);
        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_full_work_interval_auto_starts_break() {
        let (mut engine, ticks, sink) = create_test_engine();

        engine.start();
        let state = tick_n(&mut engine, 1500);

        assert_eq!(state.mode, Mode::Break);
        assert!(state.running);
        assert_eq!(state.remaining_seconds, 300);
        assert_eq!(state.cycles.work_count, 2);
        assert_eq!(state.cycles.break_count, 1);
        assert_eq!(*sink.0.lock().unwrap(), vec![Mode::Work]);
        assert_eq!(
            *ticks.0.lock().unwrap(),
            vec![Signal::Begin, Signal::Cancel, Signal::Begin]
        );
    }

    #[test]
    fn test_break_completion_returns_to_paused_work() {
        let (mut engine, _, sink) = create_test_engine();

        engine.set_mode(Mode::Break);
        engine.start();
        tick_n(&mut engine, 299);
        assert_eq!(engine.snapshot().remaining_seconds, 1);

        let state = engine.tick();

        assert_eq!(state.mode, Mode::Work);
        assert!(!state.running);
        assert_eq!(state.remaining_seconds, 1500);
        assert_eq!(state.cycles.break_count, 2);
        assert_eq!(state.cycles.work_count, 1);
        assert_eq!(*sink.0.lock().unwrap(), vec![Mode::Break]);
    }

    #[test]
    fn test_never_rests_at_zero() {
        let (mut engine, _, _) = create_test_engine();
        engine.set_duration(Mode::Work, 1).unwrap();
        engine.set_duration(Mode::Break, 1).unwrap();

        engine.start();
        for _ in 0..200 {
            let state = engine.tick();
            assert!(state.remaining_seconds > 0);
            assert!(state.remaining_seconds <= state.active_duration());
            if !state.running {
                engine.start();
            }
        }
    }

    #[test]
    fn test_whole_cycle_repeats() {
        let (mut engine, _, sink) = create_test_engine();
        engine.set_duration(Mode::Work, 2).unwrap();
        engine.set_duration(Mode::Break, 1).unwrap();

        for _ in 0..3 {
            engine.start();
            tick_n(&mut engine, 120 + 60);
        }

        let state = engine.snapshot();
        assert_eq!(state.mode, Mode::Work);
        assert_eq!(state.cycles, CycleCounters { work_count: 4, break_count: 4 });
        assert_eq!(sink.0.lock().unwrap().len(), 6);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (mut engine, _, _) = create_test_engine();

        engine.start();
        tick_n(&mut engine, 42);
        let first = engine.reset();
        let second = engine.reset();

        assert_eq!(first, second);
        assert_eq!(first.remaining_seconds, 1500);
        assert!(!first.running);
    }

    #[test]
    fn test_reset_keeps_cycle_counters() {
        let (mut engine, _, _) = create_test_engine();

        engine.start();
        tick_n(&mut engine, 1500 + 10);
        let state = engine.reset();

        assert_eq!(state.mode, Mode::Break);
        assert_eq!(state.remaining_seconds, 300);
        assert_eq!(state.cycles.work_count, 2);
    }

    #[test]
    fn test_set_mode_while_running() {
        let (mut engine, ticks, _) = create_test_engine();

        engine.start();
        tick_n(&mut engine, 600);
        assert_eq!(engine.snapshot().remaining_seconds, 900);

        let state = engine.set_mode(Mode::Break);

        assert_eq!(state.mode, Mode::Break);
        assert_eq!(state.remaining_seconds, 300);
        assert!(!state.running);
        assert_eq!(ticks.0.lock().unwrap().last(), Some(&Signal::Cancel));

        // Switching back shows a fresh work countdown
        let state = engine.set_mode(Mode::Work);
        assert_eq!(state.remaining_seconds, 1500);
    }

    #[test]
    fn test_set_duration_on_active_mode_rearms() {
        let (mut engine, _, _) = create_test_engine();

        engine.start();
        tick_n(&mut engine, 30);
        let state = engine.set_duration(Mode::Work, 50).unwrap();

        assert_eq!(state.durations.work_seconds, 3000);
        assert_eq!(state.remaining_seconds, 3000);
        assert!(!state.running);
    }

    #[test]
    fn test_set_duration_on_inactive_mode_is_silent() {
        let (mut engine, _, _) = create_test_engine();

        engine.start();
        tick_n(&mut engine, 30);
        let state = engine.set_duration(Mode::Break, 10).unwrap();

        assert_eq!(state.durations.break_seconds, 600);
        assert_eq!(state.remaining_seconds, 1470);
        assert!(state.running);

        let state = engine.set_mode(Mode::Break);
        assert_eq!(state.remaining_seconds, 600);
    }

    #[test]
    fn test_set_duration_rejects_out_of_range() {
        let (mut engine, _, _) = create_test_engine();

        engine.start();
        tick_n(&mut engine, 5);
        let before = engine.snapshot();

        for minutes in [0, 61, -1, i64::MAX] {
            let err = engine.set_duration(Mode::Work, minutes).unwrap_err();
            assert!(matches!(err, ValidationError::MinutesOutOfRange { .. }));
            assert_eq!(engine.snapshot(), before);
        }
    }

    #[test]
    fn test_panicking_sink_does_not_stop_transition() {
        let ticks = RecordingTicks::default();
        let mut engine = TimerEngine::new(
            Durations::default(),
            Box::new(ticks.clone()),
            Box::new(PanickingSink),
        );

        engine.start();
        let state = tick_n(&mut engine, 1500);

        assert_eq!(state.mode, Mode::Break);
        assert!(state.running);
        assert_eq!(state.remaining_seconds, 300);
        assert_eq!(state.cycles.work_count, 2);

        // The engine stays usable for the next interval
        let state = tick_n(&mut engine, 300);
        assert_eq!(state.mode, Mode::Work);
        assert!(!state.running);
        assert_eq!(state.cycles.break_count, 2);
    }
}
