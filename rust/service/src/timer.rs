//! Per-turn countdown.
//!
//! A [`RoundTimer`] counts down on its own tokio task, one tick per second of
//! turn time. Expiry and cancellation race through a single compare-exchange
//! on the timer state, so exactly one of them wins and the expiry callback
//! runs at most once.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

const RUNNING: u8 = 0;
const EXPIRED: u8 = 1;
const CANCELLED: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    Expired,
    Cancelled,
}

#[derive(Debug)]
struct TimerInner {
    state: AtomicU8,
    remaining: AtomicU64,
    cancel: Notify,
    done: watch::Sender<Option<TimerOutcome>>,
}

impl TimerInner {
    fn settle(&self, outcome: TimerOutcome) -> bool {
        let target = match outcome {
            TimerOutcome::Expired => EXPIRED,
            TimerOutcome::Cancelled => CANCELLED,
        };
        self.state
            .compare_exchange(RUNNING, target, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

#[derive(Debug)]
pub struct RoundTimer {
    inner: Arc<TimerInner>,
    task: JoinHandle<()>,
}

impl RoundTimer {
    /// Starts counting `seconds` ticks of length `tick`; `on_expire` runs on
    /// the timer task when the count reaches zero without a cancel.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(seconds: u64, tick: Duration, on_expire: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (done, _) = watch::channel(None);
        let inner = Arc::new(TimerInner {
            state: AtomicU8::new(RUNNING),
            remaining: AtomicU64::new(seconds),
            cancel: Notify::new(),
            done,
        });

        let task_inner = Arc::clone(&inner);
        let first_tick = Instant::now() + tick;
        let task = tokio::spawn(async move {
            let mut ticks = interval_at(first_tick, tick);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                if task_inner.remaining.load(Ordering::Acquire) == 0 {
                    break;
                }
                tokio::select! {
                    _ = task_inner.cancel.notified() => return,
                    _ = ticks.tick() => {
                        task_inner.remaining.fetch_sub(1, Ordering::AcqRel);
                    }
                }
            }
            if task_inner.settle(TimerOutcome::Expired) {
                on_expire();
                task_inner.done.send_replace(Some(TimerOutcome::Expired));
            }
        });

        Self { inner, task }
    }

    pub fn is_running(&self) -> bool {
        self.inner.state.load(Ordering::Acquire) == RUNNING
    }

    /// Whole ticks left before expiry.
    pub fn remaining(&self) -> u64 {
        self.inner.remaining.load(Ordering::Acquire)
    }

    /// Stops the countdown. Returns `true` if this call stopped a running
    /// timer, `false` if it had already expired or been cancelled.
    pub fn cancel(&self) -> bool {
        if !self.inner.settle(TimerOutcome::Cancelled) {
            return false;
        }
        self.inner.cancel.notify_one();
        self.inner.done.send_replace(Some(TimerOutcome::Cancelled));
        true
    }

    /// Resolves once the timer has expired or been cancelled.
    pub async fn wait(&self) -> TimerOutcome {
        let mut rx = self.inner.done.subscribe();
        // the borrowed value must be released before `rx` goes out of scope
        let outcome = match rx.wait_for(Option::is_some).await {
            Ok(outcome) => outcome.unwrap_or(TimerOutcome::Cancelled),
            Err(_) => TimerOutcome::Cancelled,
        };
        outcome
    }
}

impl Drop for RoundTimer {
    fn drop(&mut self) {
        self.inner.settle(TimerOutcome::Cancelled);
        self.task.abort();
    }
}
