//! Frame and timer scheduling
//!
//! Both schedulers are tick-driven: the host owns the real clock and calls
//! `tick` with elapsed seconds (per animation frame, or at whatever cadence
//! it likes). Everything is single-threaded and cooperative.
//!
//! Cancellation contract: every handle is individually cancellable, a handle
//! cancels at most once (the second attempt reports false), and a stopped
//! task is never invoked again. Callbacks receive only the context, not the
//! scheduler, so nothing can re-register during dispatch except through the
//! explicit [`TimerRequests`] queue, which is integrated after dispatch.

/// Per-frame timing passed to update callbacks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Seconds since the previous tick
    pub dt: f32,
    /// Total elapsed seconds
    pub time: f32,
}

/// Handle to a recurring frame task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

struct FrameTask<C> {
    id: u64,
    update: Box<dyn FnMut(&mut C, FrameTick)>,
}

/// Drives recurring per-frame update callbacks
pub struct FrameScheduler<C> {
    tasks: Vec<FrameTask<C>>,
    next_id: u64,
    time: f32,
}

impl<C> Default for FrameScheduler<C> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
            time: 0.0,
        }
    }
}

impl<C> FrameScheduler<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a recurring update callback
    pub fn start(&mut self, update: impl FnMut(&mut C, FrameTick) + 'static) -> FrameHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(FrameTask {
            id,
            update: Box::new(update),
        });
        FrameHandle(id)
    }

    /// Stop a task; after this returns, its callback is never invoked again
    ///
    /// Returns false when the handle was already stopped.
    pub fn stop(&mut self, handle: FrameHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != handle.0);
        self.tasks.len() != before
    }

    /// Whether a handle still has a live task
    pub fn is_active(&self, handle: FrameHandle) -> bool {
        self.tasks.iter().any(|t| t.id == handle.0)
    }

    /// Number of live tasks
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    /// Total elapsed time in seconds
    pub fn elapsed(&self) -> f32 {
        self.time
    }

    /// Advance time and run every live task once
    pub fn tick(&mut self, ctx: &mut C, dt: f32) {
        self.time += dt;
        let tick = FrameTick {
            dt,
            time: self.time,
        };
        for task in &mut self.tasks {
            (task.update)(ctx, tick);
        }
    }
}

/// Handle to a pending one-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Boxed one-shot timer callback
pub type TimerFn<C> = Box<dyn FnOnce(&mut C, &mut TimerRequests<C>)>;

struct Timer<C> {
    id: u64,
    owner: &'static str,
    deadline: f32,
    callback: Option<TimerFn<C>>,
}

/// Follow-up timers requested by a firing callback
///
/// Requests are integrated into the scheduler after the current dispatch
/// completes; a requested timer fires no earlier than the next tick. This is
/// how self-rescheduling chains (shooting-star spawns) are expressed.
pub struct TimerRequests<C> {
    requests: Vec<(&'static str, f32, TimerFn<C>)>,
}

impl<C> TimerRequests<C> {
    fn new() -> Self {
        Self {
            requests: Vec::new(),
        }
    }

    /// Request a follow-up timer under the same ownership rules
    pub fn schedule(
        &mut self,
        owner: &'static str,
        delay: f32,
        callback: impl FnOnce(&mut C, &mut TimerRequests<C>) + 'static,
    ) {
        self.schedule_boxed(owner, delay, Box::new(callback));
    }

    /// Boxed form, for recursive chains
    pub fn schedule_boxed(&mut self, owner: &'static str, delay: f32, callback: TimerFn<C>) {
        self.requests.push((owner, delay.max(0.0), callback));
    }
}

/// One-shot timers keyed by an owning label
///
/// Every timer belongs to an owner (a layer name, or a controller-internal
/// label); `cancel_owner` tears down everything an owner ever scheduled,
/// including follow-ups requested by its own callbacks.
pub struct TimerScheduler<C> {
    timers: Vec<Timer<C>>,
    next_id: u64,
    time: f32,
}

impl<C> Default for TimerScheduler<C> {
    fn default() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 0,
            time: 0.0,
        }
    }
}

impl<C> TimerScheduler<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a one-shot timer `delay` seconds from now
    pub fn schedule(
        &mut self,
        owner: &'static str,
        delay: f32,
        callback: impl FnOnce(&mut C, &mut TimerRequests<C>) + 'static,
    ) -> TimerHandle {
        self.schedule_boxed(owner, delay, Box::new(callback))
    }

    /// Boxed form, for recursive chains
    pub fn schedule_boxed(
        &mut self,
        owner: &'static str,
        delay: f32,
        callback: TimerFn<C>,
    ) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            owner,
            deadline: self.time + delay.max(0.0),
            callback: Some(callback),
        });
        TimerHandle(id)
    }

    /// Cancel a pending timer; false when it already fired or was cancelled
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != handle.0);
        self.timers.len() != before
    }

    /// Cancel every pending timer belonging to an owner
    ///
    /// Returns the number cancelled. Call this when the owning layer is torn
    /// down; it also severs any self-rescheduling chain.
    pub fn cancel_owner(&mut self, owner: &str) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.owner != owner);
        before - self.timers.len()
    }

    /// Pending timers for an owner
    pub fn owner_pending(&self, owner: &str) -> usize {
        self.timers.iter().filter(|t| t.owner == owner).count()
    }

    /// Total pending timers
    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    /// Total elapsed time in seconds
    pub fn elapsed(&self) -> f32 {
        self.time
    }

    /// Advance time and fire every due timer, in deadline order
    pub fn tick(&mut self, ctx: &mut C, dt: f32) {
        self.time += dt;

        let mut due: Vec<Timer<C>> = Vec::new();
        let mut i = 0;
        while i < self.timers.len() {
            if self.timers[i].deadline <= self.time {
                due.push(self.timers.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.deadline.total_cmp(&b.deadline));

        let mut requests = TimerRequests::new();
        for mut timer in due {
            if let Some(callback) = timer.callback.take() {
                callback(ctx, &mut requests);
            }
        }

        for (owner, delay, callback) in requests.requests {
            self.schedule_boxed(owner, delay, callback);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_task_runs_every_tick() {
        let mut frames: FrameScheduler<u32> = FrameScheduler::new();
        frames.start(|count, _tick| *count += 1);

        let mut count = 0;
        frames.tick(&mut count, 0.016);
        frames.tick(&mut count, 0.016);
        frames.tick(&mut count, 0.016);

        assert_eq!(count, 3);
    }

    #[test]
    fn test_stop_prevents_further_invocations() {
        let mut frames: FrameScheduler<u32> = FrameScheduler::new();
        let handle = frames.start(|count, _tick| *count += 1);

        let mut count = 0;
        frames.tick(&mut count, 0.016);
        assert!(frames.stop(handle));
        for _ in 0..10 {
            frames.tick(&mut count, 0.016);
        }

        assert_eq!(count, 1);
        assert!(!frames.is_active(handle));
    }

    #[test]
    fn test_stop_twice_is_rejected() {
        let mut frames: FrameScheduler<u32> = FrameScheduler::new();
        let handle = frames.start(|_, _| {});
        assert!(frames.stop(handle));
        assert!(!frames.stop(handle));
    }

    #[test]
    fn test_frame_tick_carries_elapsed_time() {
        let mut frames: FrameScheduler<Vec<f32>> = FrameScheduler::new();
        frames.start(|times, tick| times.push(tick.time));

        let mut times = Vec::new();
        frames.tick(&mut times, 0.5);
        frames.tick(&mut times, 0.5);

        assert_eq!(times, vec![0.5, 1.0]);
        assert_eq!(frames.elapsed(), 1.0);
    }

    #[test]
    fn test_independent_handles() {
        let mut frames: FrameScheduler<(u32, u32)> = FrameScheduler::new();
        let a = frames.start(|counts, _| counts.0 += 1);
        let _b = frames.start(|counts, _| counts.1 += 1);

        let mut counts = (0, 0);
        frames.tick(&mut counts, 0.016);
        frames.stop(a);
        frames.tick(&mut counts, 0.016);

        assert_eq!(counts, (1, 2));
        assert_eq!(frames.active_count(), 1);
    }

    #[test]
    fn test_timer_fires_once_at_deadline() {
        let mut timers: TimerScheduler<u32> = TimerScheduler::new();
        timers.schedule("test", 1.0, |count, _req| *count += 1);

        let mut count = 0;
        timers.tick(&mut count, 0.5);
        assert_eq!(count, 0);
        timers.tick(&mut count, 0.5);
        assert_eq!(count, 1);
        timers.tick(&mut count, 5.0);
        assert_eq!(count, 1);
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn test_timer_cancel() {
        let mut timers: TimerScheduler<u32> = TimerScheduler::new();
        let handle = timers.schedule("test", 1.0, |count, _req| *count += 1);

        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));

        let mut count = 0;
        timers.tick(&mut count, 2.0);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_cancel_after_fire_reports_false() {
        let mut timers: TimerScheduler<u32> = TimerScheduler::new();
        let handle = timers.schedule("test", 0.1, |_, _| {});

        let mut count = 0;
        timers.tick(&mut count, 1.0);
        assert!(!timers.cancel(handle));
    }

    #[test]
    fn test_cancel_owner_sweeps_all() {
        let mut timers: TimerScheduler<u32> = TimerScheduler::new();
        timers.schedule("stars", 1.0, |c, _| *c += 1);
        timers.schedule("stars", 2.0, |c, _| *c += 1);
        timers.schedule("clouds", 1.0, |c, _| *c += 10);

        assert_eq!(timers.cancel_owner("stars"), 2);
        assert_eq!(timers.owner_pending("stars"), 0);

        let mut count = 0;
        timers.tick(&mut count, 3.0);
        assert_eq!(count, 10);
    }

    #[test]
    fn test_self_rescheduling_chain() {
        fn chain(n: u32) -> Box<dyn FnOnce(&mut Vec<u32>, &mut TimerRequests<Vec<u32>>)> {
            Box::new(move |log, req| {
                log.push(n);
                req.schedule_boxed("chain", 1.0, chain(n + 1));
            })
        }

        let mut timers: TimerScheduler<Vec<u32>> = TimerScheduler::new();
        timers.schedule_boxed("chain", 1.0, chain(0));

        let mut log = Vec::new();
        for _ in 0..4 {
            timers.tick(&mut log, 1.0);
        }
        assert_eq!(log, vec![0, 1, 2]);

        // Severing the chain stops it for good
        assert_eq!(timers.cancel_owner("chain"), 1);
        for _ in 0..4 {
            timers.tick(&mut log, 1.0);
        }
        assert_eq!(log, vec![0, 1, 2]);
    }

    #[test]
    fn test_due_timers_fire_in_deadline_order() {
        let mut timers: TimerScheduler<Vec<&'static str>> = TimerScheduler::new();
        timers.schedule("t", 2.0, |log, _| log.push("second"));
        timers.schedule("t", 1.0, |log, _| log.push("first"));

        let mut log = Vec::new();
        timers.tick(&mut log, 3.0);
        assert_eq!(log, vec!["first", "second"]);
    }

    #[test]
    fn test_requested_timer_waits_for_next_tick() {
        let mut timers: TimerScheduler<u32> = TimerScheduler::new();
        timers.schedule("t", 0.5, |count, req| {
            *count += 1;
            // Even a zero delay must not fire within the same dispatch
            req.schedule("t", 0.0, |count, _| *count += 100);
        });

        let mut count = 0;
        timers.tick(&mut count, 1.0);
        assert_eq!(count, 1);
        timers.tick(&mut count, 0.001);
        assert_eq!(count, 101);
    }
}
