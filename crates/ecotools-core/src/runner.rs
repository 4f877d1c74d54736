//! Periodic widget runner
//!
//! Each simulated widget runs in its own tokio task that owns the widget
//! exclusively. Renderers never touch widget state directly; they read the
//! latest published view from a `watch` channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// A timer-driven widget
pub trait Widget: Send + 'static {
    /// Read-only snapshot handed to renderers
    type View: Clone + Send + Sync + 'static;

    /// Advance one period
    fn tick(&mut self);

    /// Snapshot of the current state
    fn view(&self) -> Self::View;
}

/// Handle to a running widget task.
///
/// Dropping the handle stops the task.
pub struct WidgetRunner<V> {
    active: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
    views: watch::Receiver<V>,
    period: Duration,
}

impl<V: Clone + Send + Sync + 'static> WidgetRunner<V> {
    /// Spawn `widget` on the current tokio runtime.
    ///
    /// The first tick fires one full `period` after spawning.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero. [`EcoConfig`](crate::config::EcoConfig)
    /// rejects such periods when it is loaded.
    pub fn spawn<W>(mut widget: W, period: Duration) -> Self
    where
        W: Widget<View = V>,
    {
        assert!(!period.is_zero(), "widget period must be non-zero");

        let (tx, rx) = watch::channel(widget.view());
        let active = Arc::new(AtomicBool::new(true));
        let task_active = active.clone();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                if !task_active.load(Ordering::Acquire) {
                    break;
                }

                widget.tick();
                if tx.send(widget.view()).is_err() {
                    // Every receiver is gone, nobody is watching
                    break;
                }
            }
        });

        tracing::debug!("widget runner started, period {:?}", period);

        Self {
            active,
            task: Some(task),
            views: rx,
            period,
        }
    }

    /// Latest published view
    pub fn current(&self) -> V {
        self.views.borrow().clone()
    }

    /// Receiver notified after every tick
    pub fn subscribe(&self) -> watch::Receiver<V> {
        self.views.clone()
    }

    /// Tick period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// True until stopped or the task ends
    pub fn is_running(&self) -> bool {
        self.active.load(Ordering::Acquire)
            && self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Disarm the timer and cancel the task.
    ///
    /// No new tick starts after this returns. On a multi-threaded runtime a
    /// tick already in progress on another worker may still publish once;
    /// use [`shutdown`](Self::shutdown) to wait for the task to end.
    pub fn stop(&mut self) {
        self.active.store(false, Ordering::Release);
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("widget runner stopped");
        }
    }

    /// Stop the runner and wait until its task has ended.
    ///
    /// Once this resolves the widget has been dropped and nothing is
    /// published any more.
    pub async fn shutdown(mut self) {
        self.active.store(false, Ordering::Release);
        if let Some(task) = self.task.take() {
            task.abort();
            // Cancellation is the expected outcome
            let _ = task.await;
            tracing::debug!("widget runner shut down");
        }
    }
}

impl<V> Drop for WidgetRunner<V> {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(u32);

    impl Widget for Counter {
        type View = u32;

        fn tick(&mut self) {
            self.0 += 1;
        }

        fn view(&self) -> u32 {
            self.0
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_waits_one_period() {
        let runner = WidgetRunner::spawn(Counter(0), Duration::from_millis(2000));
        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert_eq!(runner.current(), 0);
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(runner.current(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_freezes_state() {
        let mut runner = WidgetRunner::spawn(Counter(0), Duration::from_millis(100));
        tokio::time::sleep(Duration::from_millis(550)).await;
        assert_eq!(runner.current(), 5);
        assert!(runner.is_running());

        let rx = runner.subscribe();
        runner.stop();
        assert!(!runner.is_running());

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(*rx.borrow(), 5);
    }

    #[tokio::test]
    #[should_panic(expected = "widget period must be non-zero")]
    async fn test_zero_period_panics_at_spawn() {
        let _ = WidgetRunner::spawn(Counter(0), Duration::ZERO);
    }
}
