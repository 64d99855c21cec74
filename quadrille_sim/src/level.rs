// Game levels — the state machine and the fixed-tick simulation loop.
//
// A level is a plain state machine (Constructed → Initializing → Running →
// Stopped) driven by an explicit worker thread, not a thread subtype.
// `start()` runs the level script's `init` synchronously, spawns the
// simulation thread inside `std::thread::scope`, and blocks the caller until
// the loop exits; `teardown` runs after.
//
// Each tick: stop check, viewport paint, movement phase, overlap phase, then
// sleep for whatever remains of the tick interval (default 100 ms). A tick
// that overruns its budget starts the next one immediately — ticks are
// best-effort, not strictly periodic, and there is no catch-up.
//
// Cancellation: `LevelHandle::end()` (cloneable, usable from any thread and
// from observable listeners) sets the stop flag and sends a wake message.
// The sleep is `Receiver::recv_timeout` on the wake channel, so a stop
// request interrupts it promptly; the loop exits at the next top-of-tick
// check, never mid-tick. A stop request is a normal wake, not a fault.
//
// See also: `game.rs` for the session driver that runs levels in order,
// `data.rs` for the phase wrappers the loop calls.

use crate::data::GameData;
use crate::draw::Viewport;
use log::debug;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Minimum delay between two game cycles unless overridden.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

const STATE_CONSTRUCTED: u8 = 0;
const STATE_INITIALIZING: u8 = 1;
const STATE_RUNNING: u8 = 2;
const STATE_STOPPED: u8 = 3;

/// Lifecycle of a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelState {
    Constructed,
    Initializing,
    Running,
    Stopped,
}

impl LevelState {
    fn from_raw(raw: u8) -> LevelState {
        match raw {
            STATE_CONSTRUCTED => LevelState::Constructed,
            STATE_INITIALIZING => LevelState::Initializing,
            STATE_RUNNING => LevelState::Running,
            _ => LevelState::Stopped,
        }
    }
}

/// Level-specific code: spawning entities on `init`, freeing them on
/// `teardown`.
pub trait LevelScript: Send {
    /// Board setup and entity spawning. Runs synchronously on the caller's
    /// thread before the tick loop starts. The handle lets level code wire
    /// its own stop conditions (observers, timers, ...).
    fn init(&mut self, data: &mut GameData, handle: &LevelHandle);

    /// End-of-level cleanup. Runs after the loop has exited.
    fn teardown(&mut self, data: &mut GameData) {
        data.universe.remove_all_entities();
    }
}

/// Lifecycle misuse errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelError {
    /// `start()` was called on a level that already ran (or is running).
    AlreadyStarted,
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::AlreadyStarted => write!(f, "level was already started"),
        }
    }
}

impl std::error::Error for LevelError {}

/// Cloneable control surface for a level: request a stop, observe the state.
#[derive(Clone)]
pub struct LevelHandle {
    stop: Arc<AtomicBool>,
    wake: Sender<()>,
    state: Arc<AtomicU8>,
}

impl LevelHandle {
    /// Request the level to stop. The loop exits at the next tick boundary;
    /// an in-flight tick always completes. Safe to call from any thread, any
    /// number of times, in any level state.
    pub fn end(&self) {
        self.stop.store(true, Ordering::SeqCst);
        // Wake the loop if it is sleeping. A send can only fail once the
        // level is gone, which is exactly when nobody is listening.
        let _ = self.wake.send(());
    }

    pub fn state(&self) -> LevelState {
        LevelState::from_raw(self.state.load(Ordering::SeqCst))
    }
}

/// A level: script plus tick loop, run on a dedicated simulation thread.
pub struct GameLevel {
    script: Box<dyn LevelScript>,
    tick_interval: Duration,
    stop: Arc<AtomicBool>,
    state: Arc<AtomicU8>,
    wake_tx: Sender<()>,
    wake_rx: Option<Receiver<()>>,
}

impl GameLevel {
    pub fn new(script: Box<dyn LevelScript>) -> Self {
        Self::with_tick_interval(script, DEFAULT_TICK_INTERVAL)
    }

    pub fn with_tick_interval(script: Box<dyn LevelScript>, tick_interval: Duration) -> Self {
        let (wake_tx, wake_rx) = mpsc::channel();
        Self {
            script,
            tick_interval,
            stop: Arc::new(AtomicBool::new(false)),
            state: Arc::new(AtomicU8::new(STATE_CONSTRUCTED)),
            wake_tx,
            wake_rx: Some(wake_rx),
        }
    }

    pub fn handle(&self) -> LevelHandle {
        LevelHandle {
            stop: Arc::clone(&self.stop),
            wake: self.wake_tx.clone(),
            state: Arc::clone(&self.state),
        }
    }

    pub fn state(&self) -> LevelState {
        LevelState::from_raw(self.state.load(Ordering::SeqCst))
    }

    /// Request a stop; identical to `handle().end()`.
    pub fn end(&self) {
        self.handle().end();
    }

    /// Run the level to completion: `init`, then the tick loop on a dedicated
    /// simulation thread, then `teardown`. Blocks the caller until the level
    /// reaches `Stopped`. A level runs at most once.
    pub fn start(
        &mut self,
        data: &mut GameData,
        viewport: &mut dyn Viewport,
    ) -> Result<(), LevelError> {
        let Some(wake_rx) = self.wake_rx.take() else {
            return Err(LevelError::AlreadyStarted);
        };

        self.state.store(STATE_INITIALIZING, Ordering::SeqCst);
        let handle = self.handle();
        self.script.init(data, &handle);

        let stop = Arc::clone(&self.stop);
        let state = Arc::clone(&self.state);
        let tick_interval = self.tick_interval;

        let worker_result = {
            let data_loop = &mut *data;
            let viewport_loop = &mut *viewport;
            thread::scope(|scope| {
                let worker = scope.spawn(move || {
                    state.store(STATE_RUNNING, Ordering::SeqCst);
                    run_tick_loop(data_loop, viewport_loop, tick_interval, &stop, &wake_rx);
                });
                worker.join()
            })
        };

        self.state.store(STATE_STOPPED, Ordering::SeqCst);
        if let Err(payload) = worker_result {
            // A panic in level rules is unrecoverable; surface it to the
            // caller of start().
            std::panic::resume_unwind(payload);
        }

        self.script.teardown(data);
        Ok(())
    }
}

/// The simulation loop: paint, move, resolve overlaps, sleep off the rest of
/// the tick budget.
fn run_tick_loop(
    data: &mut GameData,
    viewport: &mut dyn Viewport,
    tick_interval: Duration,
    stop: &AtomicBool,
    wake: &Receiver<()>,
) {
    while !stop.load(Ordering::SeqCst) {
        let tick_start = Instant::now();

        viewport.paint(&data.universe);
        data.all_one_step_moves();
        data.process_all_overlaps();

        let elapsed = tick_start.elapsed();
        match tick_interval.checked_sub(elapsed) {
            Some(remaining) if !remaining.is_zero() => {
                // A wake message doubles as the stop signal; the flag check
                // at the top of the loop decides. Timeouts just mean the
                // tick budget ran out.
                let _ = wake.recv_timeout(remaining);
            }
            _ => {
                debug!(
                    "tick overran its {:?} budget (took {:?}), starting next tick immediately",
                    tick_interval, elapsed
                );
            }
        }
    }
}
