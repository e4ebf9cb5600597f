//! Heartbeat clock
//!
//! Two-state machine `Attracting <-> Repelling` advanced by elapsed time.
//! The host feeds it frame deltas instead of arming real timers, so the
//! schedule can be driven deterministically in tests.

use std::time::Duration;

use log::debug;

use crate::simulation::params::Settings;

/// Shortest phase the clock will run; keeps `advance` finite
pub const MIN_PHASE: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Attracting,
    Repelling,
}

impl Phase {
    fn flipped(self) -> Self {
        match self {
            Phase::Attracting => Phase::Repelling,
            Phase::Repelling => Phase::Attracting,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeartbeatClock {
    attraction_duration: Duration,
    repulsion_duration: Duration,
    phase: Phase,
    remaining: Duration, // until the next flip
    beats: u64, // flips so far
}

impl HeartbeatClock {
    /// Start attracting; the first flip happens after `start_delay`
    pub fn new(start_delay: Duration, attraction_duration: Duration, repulsion_duration: Duration) -> Self {
        Self {
            attraction_duration: attraction_duration.max(MIN_PHASE),
            repulsion_duration: repulsion_duration.max(MIN_PHASE),
            phase: Phase::Attracting,
            remaining: start_delay,
            beats: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.heartbeat_start_delay,
            settings.attraction_duration,
            settings.repulsion_duration,
        )
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The heartbeat flag: whether repulsion forces apply this tick
    pub fn repulsion_active(&self) -> bool {
        self.phase == Phase::Repelling
    }

    /// Time left in the current phase
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn beats(&self) -> u64 {
        self.beats
    }

    fn phase_duration(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Attracting => self.attraction_duration,
            Phase::Repelling => self.repulsion_duration,
        }
    }

    /// Let `elapsed` pass, firing every expiry it runs past. A phase that
    /// ends exactly at the end of `elapsed` flips on the next advance.
    /// Returns whether the flag now reads differently than before the call
    pub fn advance(&mut self, mut elapsed: Duration) -> bool {
        let before = self.phase;

        while elapsed > self.remaining {
            elapsed -= self.remaining;
            self.phase = self.phase.flipped();
            self.remaining = self.phase_duration(self.phase);
            self.beats += 1;
            debug!("heartbeat {}: {:?} for {:?}", self.beats, self.phase, self.remaining);
        }
        self.remaining -= elapsed;

        self.phase != before
    }
}
