/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The simulated clock.
//!
//! Time is a monotonic integer tick. Latencies and satellite positions are
//! only defined at ticks; the clock advances strictly between `schedule`
//! calls, never inside the pipeline.

use std::cell::Cell;
use std::collections::BTreeMap;

use tracing::info;

/// An action invoked at a specific tick during the simulation. The argument
/// is the tick at which it fires.
pub type SimulationAction<'a> = Box<dyn FnMut(i64) + 'a>;

/// Manages the simulation clock.
///
/// Shared between the orchestrator client (for cache invalidation) and the
/// scenario driver (for advancing time), hence the interior `Cell`.
#[derive(Debug)]
pub struct SimTimeService {
    curr_time: Cell<i64>,
    sim_duration: i64,
}

impl SimTimeService {
    pub fn new(sim_duration: i64) -> Self {
        Self {
            curr_time: Cell::new(0),
            sim_duration,
        }
    }

    /// The current tick.
    pub fn curr_time(&self) -> i64 {
        self.curr_time.get()
    }

    /// The total (planned) duration of the simulation in ticks.
    pub fn sim_duration(&self) -> i64 {
        self.sim_duration
    }

    /// Advances the clock by one tick and returns the new value, or `-1`
    /// once the simulation duration has been exhausted.
    pub fn increment_clock(&self) -> i64 {
        let next = self.curr_time.get() + 1;
        self.curr_time.set(next);
        if next <= self.sim_duration {
            next
        } else {
            -1
        }
    }

    /// Runs the simulation from tick 0 to the end, invoking each tick's
    /// action (if any) before advancing the clock.
    pub fn run_simulation(&self, mut actions: BTreeMap<i64, SimulationAction<'_>>) {
        let mut curr_time: i64 = 0;
        while curr_time != -1 {
            info!(tick = curr_time, "simulation clock");
            if let Some(action) = actions.get_mut(&curr_time) {
                action(curr_time);
            }
            curr_time = self.increment_clock();
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn clock_starts_at_zero() {
        let svc = SimTimeService::new(10);
        assert_eq!(svc.curr_time(), 0);
        assert_eq!(svc.sim_duration(), 10);
    }

    #[test]
    fn increment_returns_minus_one_after_duration() {
        let svc = SimTimeService::new(2);
        assert_eq!(svc.increment_clock(), 1);
        assert_eq!(svc.increment_clock(), 2);
        assert_eq!(svc.increment_clock(), -1);
    }

    #[test]
    fn run_simulation_fires_actions_at_their_ticks() {
        let svc = SimTimeService::new(5);
        let fired = RefCell::new(Vec::new());

        let mut actions: BTreeMap<i64, SimulationAction> = BTreeMap::new();
        actions.insert(0, Box::new(|t| fired.borrow_mut().push(t)));
        actions.insert(3, Box::new(|t| fired.borrow_mut().push(t)));
        actions.insert(5, Box::new(|t| fired.borrow_mut().push(t)));

        svc.run_simulation(actions);
        assert_eq!(*fired.borrow(), vec![0, 3, 5]);
    }

    #[test]
    fn actions_observe_the_advancing_clock() {
        let svc = SimTimeService::new(4);
        let seen = RefCell::new(Vec::new());

        let mut actions: BTreeMap<i64, SimulationAction> = BTreeMap::new();
        actions.insert(2, Box::new(|_| seen.borrow_mut().push(svc.curr_time())));
        actions.insert(4, Box::new(|_| seen.borrow_mut().push(svc.curr_time())));

        svc.run_simulation(actions);
        assert_eq!(*seen.borrow(), vec![2, 4]);
    }
}
