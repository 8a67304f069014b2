use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Per-key debouncer for autosave. Scheduling on a key aborts whatever
/// was pending under that key, so only the last write inside the window
/// actually runs. Keys are entity ids (one timer per transaction), never
/// ambient globals.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: HashMap<String, JoinHandle<()>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }

    pub fn schedule<F>(&mut self, key: &str, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(handle) = self.pending.remove(key) {
            handle.abort();
        }

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        });
        self.pending.insert(key.to_string(), handle);
    }

    /// Drops the pending task for `key`, reporting whether one was still
    /// waiting to fire.
    pub fn cancel(&mut self, key: &str) -> bool {
        match self.pending.remove(key) {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }
}
