use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::simulation::Fleet;

/// Background real-time pacing loop.
///
/// While running, a dedicated thread polls the wall clock and, once the
/// elapsed time since the last applied step exceeds `dt · time_scaling`,
/// advances the whole fleet by the fixed simulation step `dt`. Scaling above
/// one plays the simulation in slow motion, below one accelerates it.
///
/// The loop is the sole writer of vehicle state while it runs; callers read
/// and command vehicles concurrently through the per-vehicle locks.
pub struct SimulationClock {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SimulationClock {
    pub fn new() -> Self {
        SimulationClock {
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// Spawns the pacing thread. A no-op if the clock is already running; a
    /// stopped clock is restartable.
    pub fn start(&mut self, fleet: Arc<Fleet>, dt: f64, time_scaling: f64) {
        if self.is_running() {
            return;
        }
        // Reap a previously stopped loop before restarting.
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);

        let handle = thread::spawn(move || {
            let pace = Duration::from_secs_f64(dt * time_scaling);
            let mut last_applied = Instant::now();

            while running.load(Ordering::SeqCst) {
                thread::yield_now();

                let now = Instant::now();
                if now.duration_since(last_applied) > pace {
                    if let Err(error) = fleet.step_all(dt) {
                        // The offending vehicle is now marked diverged and
                        // will be skipped; the loop keeps the rest flying.
                        eprintln!("Simulation clock: {}", error);
                    }
                    last_applied = now;
                }
            }
        });

        self.handle = Some(handle);
    }

    /// Requests graceful termination; does not wait for the thread to exit.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Stops the loop and blocks until the pacing thread has exited.
    pub fn join(&mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some() && self.running.load(Ordering::SeqCst)
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        SimulationClock::new()
    }
}

impl Drop for SimulationClock {
    fn drop(&mut self) {
        self.join();
    }
}
