//! Periodic snapshot refresh.
//!
//! The controller fetches on a fixed interval (first tick immediately) and on
//! every manual trigger. Each fetch runs in its own task, so a slow fetch
//! never delays the next tick; [`BoardState`] sorts out which completion
//! wins.
//!
//! A fetch is cut off once it exceeds [`fetch_budget`], which stays below the
//! polling interval. Otherwise a source slower than the interval would have
//! every fetch overtaken by the next tick and the board would never update.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::Error;
use crate::source::{SnapshotFetch, FETCH_TIMEOUT};
use crate::state::BoardState;

/// Cloneable handle for requesting an immediate refresh.
#[derive(Debug, Clone, Default)]
pub struct RefreshTrigger(Arc<Notify>);

impl RefreshTrigger {
    /// Request a refresh. Requests made while one is pending coalesce.
    pub fn fire(&self) {
        self.0.notify_one();
    }

    /// Wait for the next request.
    pub async fn fired(&self) {
        self.0.notified().await;
    }
}

/// Longest a single fetch may run: [`FETCH_TIMEOUT`], or 90% of the polling
/// interval if that is shorter.
pub fn fetch_budget(interval: Duration) -> Duration {
    FETCH_TIMEOUT.min(interval - interval / 10)
}

/// Drives periodic fetches into a [`BoardState`].
pub struct RefreshController<S> {
    source: Arc<S>,
    state: Arc<BoardState>,
    interval: Duration,
    budget: Duration,
    trigger: RefreshTrigger,
}

impl<S: SnapshotFetch> RefreshController<S> {
    pub fn new(source: S, state: Arc<BoardState>, interval: Duration) -> Self {
        Self {
            source: Arc::new(source),
            state,
            interval,
            budget: fetch_budget(interval),
            trigger: RefreshTrigger::default(),
        }
    }

    /// Start polling. Polling stops when the returned handle is dropped.
    pub fn spawn(self) -> RefreshHandle {
        let trigger = self.trigger.clone();
        let state = Arc::clone(&self.state);
        tracing::info!(interval_secs = self.interval.as_secs(), "refresh controller started");
        let task = tokio::spawn(self.run());
        RefreshHandle {
            trigger,
            state,
            task,
        }
    }

    async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = self.trigger.fired() => {
                    tracing::debug!("manual refresh requested");
                }
            }
            self.start_fetch();
        }
    }

    fn start_fetch(&self) {
        let seq = self.state.begin();
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let budget = self.budget;
        tokio::spawn(async move {
            let outcome = match tokio::time::timeout(budget, source.fetch()).await {
                Ok(outcome) => outcome,
                Err(_) => Err(Error::Timeout(budget)),
            };
            state.complete(seq, outcome).await;
        });
    }
}

/// Owner of a running refresh loop.
pub struct RefreshHandle {
    trigger: RefreshTrigger,
    state: Arc<BoardState>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Trigger that can be shared with the presentation layer.
    pub fn trigger(&self) -> RefreshTrigger {
        self.trigger.clone()
    }

    /// Request an immediate refresh.
    pub fn refresh_now(&self) {
        self.trigger.fire();
    }

    /// Stop polling.
    pub fn shutdown(self) {}
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
        self.state.close();
        tracing::info!("refresh controller stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::state::DisplayState;
    use rankdown_core::Snapshot;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Answers each fetch with the next scripted outcome after its delay.
    /// Once the script runs out, fetches never complete.
    struct Scripted {
        script: Mutex<VecDeque<(Duration, Result<Snapshot>)>>,
        calls: Arc<AtomicUsize>,
    }

    impl Scripted {
        fn new(script: Vec<(u64, Result<Snapshot>)>) -> Self {
            Self {
                script: Mutex::new(
                    script
                        .into_iter()
                        .map(|(secs, outcome)| (Duration::from_secs(secs), outcome))
                        .collect(),
                ),
                calls: Arc::default(),
            }
        }
    }

    impl SnapshotFetch for Scripted {
        async fn fetch(&self) -> Result<Snapshot> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.script.lock().unwrap().pop_front();
            match next {
                Some((delay, outcome)) => {
                    tokio::time::sleep(delay).await;
                    outcome
                }
                None => std::future::pending().await,
            }
        }
    }

    fn titled(title: &str) -> Result<Snapshot> {
        Ok(Snapshot {
            game_title: Some(title.to_string()),
            ..Snapshot::default()
        })
    }

    fn board_state() -> Arc<BoardState> {
        Arc::new(BoardState::new(Duration::from_secs(20), false))
    }

    async fn shown_title(state: &BoardState) -> Option<String> {
        state.current().await.board().map(|b| b.title.clone())
    }

    #[tokio::test(start_paused = true)]
    async fn first_fetch_is_immediate() {
        let state = board_state();
        let source = Scripted::new(vec![(0, titled("first"))]);
        let _handle = RefreshController::new(source, Arc::clone(&state), Duration::from_secs(20)).spawn();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(shown_title(&state).await.as_deref(), Some("first"));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_older_fetch_never_overwrites_newer() {
        let state = board_state();
        // fetch 1 starts at t=0 and lands at t=10; fetch 2 starts at t=1 and lands at t=2
        let source = Scripted::new(vec![(10, titled("old")), (1, titled("new"))]);
        let handle = RefreshController::new(source, Arc::clone(&state), Duration::from_secs(20)).spawn();

        tokio::time::sleep(Duration::from_secs(1)).await;
        handle.refresh_now();

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(shown_title(&state).await.as_deref(), Some("new"));

        tokio::time::sleep(Duration::from_secs(7)).await;
        assert_eq!(shown_title(&state).await.as_deref(), Some("new"));
        assert_eq!(state.current().await.seq(), 2);
    }

    #[test]
    fn budget_stays_under_interval() {
        assert_eq!(fetch_budget(Duration::from_secs(20)), FETCH_TIMEOUT);
        assert_eq!(fetch_budget(Duration::from_secs(5)), Duration::from_millis(4500));
        assert_eq!(fetch_budget(Duration::from_secs(1)), Duration::from_millis(900));
    }

    #[tokio::test(start_paused = true)]
    async fn source_slower_than_interval_still_reaches_display() {
        let state = board_state();
        let script = (0..80).map(|_| (6, titled("slow"))).collect();
        let source = Scripted::new(script);
        let _handle = RefreshController::new(source, Arc::clone(&state), Duration::from_secs(5)).spawn();

        tokio::time::sleep(Duration::from_secs(300)).await;
        let current = state.current().await;
        match &*current {
            DisplayState::Failed { message, .. } => assert!(message.contains("timed out")),
            other => panic!("expected a timeout failure, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_within_budget_applies_with_short_interval() {
        let state = board_state();
        let source = Scripted::new(vec![(4, titled("made it"))]);
        let _handle = RefreshController::new(source, Arc::clone(&state), Duration::from_secs(5)).spawn();

        tokio::time::sleep(Duration::from_millis(4200)).await;
        assert_eq!(shown_title(&state).await.as_deref(), Some("made it"));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_shows_error_then_recovers() {
        let state = board_state();
        let source = Scripted::new(vec![
            (0, titled("good")),
            (0, Err(Error::Transport("connection reset".to_string()))),
            (0, titled("again")),
        ]);
        let _handle = RefreshController::new(source, Arc::clone(&state), Duration::from_secs(20)).spawn();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(shown_title(&state).await.as_deref(), Some("good"));

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert!(matches!(*state.current().await, DisplayState::Failed { .. }));

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(shown_title(&state).await.as_deref(), Some("again"));
    }

    #[tokio::test(start_paused = true)]
    async fn manual_refresh_fetches_immediately() {
        let state = board_state();
        let source = Scripted::new(vec![(0, titled("first")), (0, titled("second"))]);
        let handle = RefreshController::new(source, Arc::clone(&state), Duration::from_secs(20)).spawn();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(shown_title(&state).await.as_deref(), Some("first"));

        handle.refresh_now();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(shown_title(&state).await.as_deref(), Some("second"));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_polling_and_ignores_in_flight() {
        let state = board_state();
        let source = Scripted::new(vec![(5, titled("late")), (0, titled("never"))]);
        let calls = Arc::clone(&source.calls);
        let handle = RefreshController::new(source, Arc::clone(&state), Duration::from_secs(20)).spawn();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        handle.shutdown();
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(*state.current().await, DisplayState::Loading));
    }
}
