#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use crate::app::debounce::Debouncer;

    const DELAY: Duration = Duration::from_millis(50);
    const SETTLE: Duration = Duration::from_millis(200);

    fn add(counter: &Arc<AtomicU32>, amount: u32) -> impl Future<Output = ()> + Send + 'static {
        let counter = counter.clone();
        async move {
            counter.fetch_add(amount, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn rescheduling_a_key_drops_the_earlier_write() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut debouncer = Debouncer::new();

        debouncer.schedule("tx-1", DELAY, add(&counter, 1));
        debouncer.schedule("tx-1", DELAY, add(&counter, 10));

        tokio::time::sleep(SETTLE).await;
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn keys_are_debounced_independently() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut debouncer = Debouncer::new();

        debouncer.schedule("tx-1", DELAY, add(&counter, 1));
        debouncer.schedule("tx-2", DELAY, add(&counter, 10));

        tokio::time::sleep(SETTLE).await;
        assert_eq!(counter.load(Ordering::SeqCst), 11);
    }

    #[tokio::test]
    async fn cancel_prevents_the_write() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut debouncer = Debouncer::new();

        debouncer.schedule("tx-1", DELAY, add(&counter, 1));
        assert!(debouncer.cancel("tx-1"));
        assert!(!debouncer.cancel("tx-1"));

        tokio::time::sleep(SETTLE).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cancel_all_clears_every_key() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut debouncer = Debouncer::new();

        debouncer.schedule("tx-1", DELAY, add(&counter, 1));
        debouncer.schedule("tx-2", DELAY, add(&counter, 10));
        debouncer.cancel_all();

        tokio::time::sleep(SETTLE).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert!(!debouncer.is_pending("tx-1"));
    }

    #[tokio::test]
    async fn pending_goes_false_after_the_write_runs() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut debouncer = Debouncer::new();

        debouncer.schedule("tx-1", DELAY, add(&counter, 1));
        assert!(debouncer.is_pending("tx-1"));

        tokio::time::sleep(SETTLE).await;
        assert!(!debouncer.is_pending("tx-1"));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
