use std::time::{Duration, Instant};

/// Timing and occupancy data for one scene tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct TickProfile {
    pub integrate_time: Duration,
    pub grid_rebuild_time: Duration,
    pub contact_time: Duration,
    pub total_time: Duration,

    pub body_count: usize,
    pub occupied_cells: usize,
    pub pairs_tested: usize,
    pub impulses_applied: usize,
}

impl TickProfile {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn log_summary(&self) {
        let total_us = self.total_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        log::debug!(
            "tick: {} bodies, {} cells, {} pairs, {} impulses, {:.3} ms \
             (integrate {:.1}%, grid {:.1}%, contacts {:.1}%)",
            self.body_count,
            self.occupied_cells,
            self.pairs_tested,
            self.impulses_applied,
            self.total_time.as_secs_f32() * 1000.0,
            Self::share(self.integrate_time, total_us),
            Self::share(self.grid_rebuild_time, total_us),
            Self::share(self.contact_time, total_us),
        );
    }

    fn share(phase: Duration, total_us: f32) -> f32 {
        (phase.as_micros() as f32 / total_us) * 100.0
    }
}

/// Adds the time spent in its scope to `output` when dropped.
pub struct PhaseTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> PhaseTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for PhaseTimer<'a> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}
