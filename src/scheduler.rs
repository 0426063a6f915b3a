use crate::DrawSurface;

/// A callback that is invoked once its tick is due.
///
/// The callback receives the ticked object, the scheduler (to schedule follow up ticks) and
/// the surface to draw on.
pub type TickCallback<T> = Box<dyn FnOnce(&mut T, &mut dyn TickScheduler<T>, &mut dyn DrawSurface)>;

/// Schedules callbacks to be run after a delay.
///
/// This is how animations advance: every tick schedules the next one. A scheduler never runs
/// two callbacks at the same time and never interrupts a running callback. Stopping a scheduler
/// simply means that no further callbacks are run.
pub trait TickScheduler<T> {
    fn schedule(&mut self, delay_ms: u64, callback: TickCallback<T>);
}

struct PendingTick<T> {
    due_ms: u64,
    sequence: u64,
    callback: TickCallback<T>,
}

/// A scheduler driven by explicit calls instead of a clock.
///
/// Time only advances when a tick is run: running a tick moves the scheduler's clock to the
/// tick's due time. Ticks that are due at the same time run in the order they were scheduled.
pub struct ManualScheduler<T> {
    now_ms: u64,
    next_sequence: u64,
    pending: Vec<PendingTick<T>>,
    stopped: bool,
}

impl<T> Default for ManualScheduler<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_sequence: 0,
            pending: Vec::new(),
            stopped: false,
        }
    }
}

impl<T> std::fmt::Debug for ManualScheduler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("now_ms", &self.now_ms)
            .field("pending", &self.pending.len())
            .field("stopped", &self.stopped)
            .finish()
    }
}

impl<T> ManualScheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the due time of the last tick that was run.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn num_pending(&self) -> usize {
        self.pending.len()
    }

    /// Drops all pending ticks and ignores any tick scheduled afterwards.
    pub fn stop(&mut self) {
        self.stopped = true;
        self.pending.clear();
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Runs the next due tick. Returns `false` if no tick was pending.
    pub fn run_next(&mut self, target: &mut T, surface: &mut dyn DrawSurface) -> bool {
        let next = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, tick)| (tick.due_ms, tick.sequence))
            .map(|(index, _)| index);

        match next {
            Some(index) => {
                let tick = self.pending.swap_remove(index);
                self.now_ms = tick.due_ms;
                (tick.callback)(target, self, surface);
                true
            }
            None => false,
        }
    }

    /// Runs up to `max_ticks` ticks and returns how many were run.
    pub fn run(&mut self, target: &mut T, surface: &mut dyn DrawSurface, max_ticks: usize) -> usize {
        let mut count = 0;
        while count < max_ticks && self.run_next(target, surface) {
            count += 1;
        }
        count
    }
}

impl<T> TickScheduler<T> for ManualScheduler<T> {
    fn schedule(&mut self, delay_ms: u64, callback: TickCallback<T>) {
        if self.stopped {
            return;
        }
        self.pending.push(PendingTick {
            due_ms: self.now_ms.saturating_add(delay_ms),
            sequence: self.next_sequence,
            callback,
        });
        self.next_sequence += 1;
    }
}
