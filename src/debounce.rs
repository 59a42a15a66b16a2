//! Cancelable delayed task used for search-as-you-type.

use std::future::Future;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Holds at most one pending task.
///
/// Every `schedule` aborts the previous task, whether it is still waiting out
/// the delay or already running, so only the last scheduled task survives.
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` on `handle` once the delay elapses, replacing any pending task.
    pub fn schedule<F>(&mut self, handle: &Handle, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Drop the pending task, if any.
    pub fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }

    /// Whether a scheduled task has not finished yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Calls = Arc<Mutex<Vec<String>>>;

    fn record(calls: &Calls, value: &str) -> impl Future<Output = ()> + Send + 'static {
        let calls = calls.clone();
        let value = value.to_string();
        async move {
            calls.lock().unwrap().push(value);
        }
    }

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_after_delay() {
        let calls = Calls::default();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(&Handle::current(), record(&calls, "971"));
        tokio::time::sleep(Duration::from_millis(299)).await;
        settle().await;
        assert!(calls.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(2)).await;
        settle().await;
        assert_eq!(*calls.lock().unwrap(), vec!["971"]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_keystrokes_collapse() {
        let calls = Calls::default();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let typed = "9712345";

        for len in 3..=typed.len() {
            debouncer.schedule(&Handle::current(), record(&calls, &typed[..len]));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        settle().await;
        assert!(calls.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(250)).await;
        settle().await;
        assert_eq!(*calls.lock().unwrap(), vec!["9712345"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pauses_longer_than_delay_fire_each_time() {
        let calls = Calls::default();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(&Handle::current(), record(&calls, "971"));
        tokio::time::sleep(Duration::from_millis(400)).await;
        debouncer.schedule(&Handle::current(), record(&calls, "9712"));
        tokio::time::sleep(Duration::from_millis(400)).await;
        settle().await;

        assert_eq!(*calls.lock().unwrap(), vec!["971", "9712"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_run() {
        let calls = Calls::default();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(&Handle::current(), record(&calls, "971"));
        debouncer.cancel();
        tokio::time::sleep(Duration::from_secs(1)).await;
        settle().await;

        assert!(calls.lock().unwrap().is_empty());
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let calls = Calls::default();
        {
            let mut debouncer = Debouncer::new(Duration::from_millis(300));
            debouncer.schedule(&Handle::current(), record(&calls, "971"));
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
        settle().await;

        assert!(calls.lock().unwrap().is_empty());
    }
}
