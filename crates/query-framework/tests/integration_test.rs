use async_trait::async_trait;
use query_framework::{
    Backoff, CacheStats, QueryActor, QueryClient, QueryError, QueryPolicy, QueryResource,
    QueryState,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

// --- Test Resource ---

#[derive(Default)]
struct Backend {
    calls: AtomicU32,
    failures_left: AtomicU32,
    latency: Duration,
}

impl Backend {
    fn new(failures: u32, latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicU32::new(0),
            failures_left: AtomicU32::new(failures),
            latency,
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

struct Figures;

#[derive(Debug, thiserror::Error)]
#[error("backend unavailable")]
struct BackendDown;

#[async_trait]
impl QueryResource for Figures {
    type Key = String;
    type Data = String;
    type Error = BackendDown;
    type Context = Arc<Backend>;

    async fn fetch(key: &String, backend: &Arc<Backend>) -> Result<String, BackendDown> {
        let call = backend.calls.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(backend.latency).await;
        let failing = backend
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failing {
            Err(BackendDown)
        } else {
            Ok(format!("{key}#{call}"))
        }
    }
}

fn start(backend: Arc<Backend>) -> QueryClient<Figures> {
    let (actor, client) = QueryActor::<Figures>::new(32);
    tokio::spawn(actor.run(backend));
    client
}

fn fast_policy() -> QueryPolicy {
    QueryPolicy::default().with_backoff(Backoff::none())
}

// --- Tests ---

#[tokio::test(start_paused = true)]
async fn test_concurrent_fetches_share_one_request() {
    let backend = Backend::new(0, Duration::from_millis(50));
    let client = start(backend.clone());

    let (a, b) = tokio::join!(
        client.fetch("stats".to_string(), fast_policy()),
        client.fetch("stats".to_string(), fast_policy()),
    );

    assert_eq!(a.unwrap(), "stats#1");
    assert_eq!(b.unwrap(), "stats#1");
    assert_eq!(backend.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_observers_share_one_request() {
    let backend = Backend::new(0, Duration::from_millis(50));
    let client = start(backend.clone());

    let mut first = client
        .observe("team".to_string(), fast_policy())
        .await
        .unwrap();
    let mut second = client
        .observe("team".to_string(), fast_policy())
        .await
        .unwrap();

    assert_eq!(first.settled().await.unwrap(), "team#1");
    assert_eq!(second.settled().await.unwrap(), "team#1");
    assert_eq!(backend.calls(), 1);

    let stats = client.stats().await.unwrap();
    assert_eq!(
        stats,
        CacheStats {
            entries: 1,
            observers: 2,
            in_flight: 0,
            failing: 0
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_retry_exhaustion_settles_into_error_after_four_attempts() {
    let backend = Backend::new(u32::MAX, Duration::ZERO);
    let client = start(backend.clone());

    let mut observer = client
        .observe("legal".to_string(), fast_policy().with_retry(3))
        .await
        .unwrap();

    let error = observer.settled().await.unwrap_err();
    assert_eq!(error.attempts(), Some(4));
    assert!(error.downcast_ref::<BackendDown>().is_some());
    assert_eq!(backend.calls(), 4);

    // No fifth attempt happens later on its own.
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(backend.calls(), 4);
    assert!(matches!(observer.state(), QueryState::Error(_)));
}

#[tokio::test(start_paused = true)]
async fn test_transient_failure_recovers_within_retry_budget() {
    let backend = Backend::new(2, Duration::ZERO);
    let client = start(backend.clone());

    let data = client
        .fetch("hero".to_string(), QueryPolicy::default().with_retry(3))
        .await
        .unwrap();

    assert_eq!(data, "hero#3");
    assert_eq!(backend.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_fresh_data_is_served_without_refetch() {
    let backend = Backend::new(0, Duration::ZERO);
    let client = start(backend.clone());
    let policy = fast_policy().with_stale_time(Duration::from_secs(30));

    client.fetch("settings".to_string(), policy.clone()).await.unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;
    let again = client.fetch("settings".to_string(), policy).await.unwrap();

    assert_eq!(again, "settings#1");
    assert_eq!(backend.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stale_data_is_served_then_refreshed_in_background() {
    let backend = Backend::new(0, Duration::from_millis(10));
    let client = start(backend.clone());
    let policy = fast_policy().with_stale_time(Duration::from_secs(60));

    client.fetch("home".to_string(), policy.clone()).await.unwrap();
    tokio::time::sleep(Duration::from_secs(61)).await;

    let stale = client.fetch("home".to_string(), policy.clone()).await.unwrap();
    assert_eq!(stale, "home#1");

    tokio::time::sleep(Duration::from_millis(50)).await;
    let refreshed = client.fetch("home".to_string(), policy).await.unwrap();
    assert_eq!(refreshed, "home#2");
    assert_eq!(backend.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_unobserved_entries_are_evicted_after_retention_window() {
    let backend = Backend::new(0, Duration::ZERO);
    let client = start(backend.clone());
    let policy = fast_policy().with_gc_time(Duration::from_secs(120));

    let mut observer = client.observe("insights".to_string(), policy).await.unwrap();
    observer.settled().await.unwrap();
    drop(observer);

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(client.stats().await.unwrap().entries, 1);

    tokio::time::sleep(Duration::from_secs(61)).await;
    assert_eq!(client.stats().await.unwrap().entries, 0);
    assert!(client.snapshot("insights".to_string()).await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_reobserving_disarms_eviction() {
    let backend = Backend::new(0, Duration::ZERO);
    let client = start(backend.clone());
    let policy = fast_policy().with_gc_time(Duration::from_secs(120));

    let mut observer = client
        .observe("contact".to_string(), policy.clone())
        .await
        .unwrap();
    observer.settled().await.unwrap();
    drop(observer);

    tokio::time::sleep(Duration::from_secs(100)).await;
    let _again = client.observe("contact".to_string(), policy).await.unwrap();
    tokio::time::sleep(Duration::from_secs(100)).await;

    assert_eq!(client.stats().await.unwrap().entries, 1);
    assert_eq!(backend.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_focus_refetch_respects_opt_out() {
    let backend = Backend::new(0, Duration::ZERO);
    let client = start(backend.clone());
    let stale_quickly = fast_policy().with_stale_time(Duration::from_secs(1));

    let mut reactive = client
        .observe("strategies".to_string(), stale_quickly.clone())
        .await
        .unwrap();
    let mut quiet = client
        .observe(
            "content-new".to_string(),
            stale_quickly.refetch_on_window_focus(false),
        )
        .await
        .unwrap();
    let first = reactive.settled().await.unwrap();
    let untouched = quiet.settled().await.unwrap();

    tokio::time::sleep(Duration::from_secs(5)).await;
    let refetching = client.focus_regained().await.unwrap();
    assert_eq!(refetching, 1);

    let refreshed = reactive.changed().await.unwrap();
    let refreshed = refreshed.data().cloned().unwrap();
    assert!(refreshed.starts_with("strategies#"));
    assert_ne!(refreshed, first);
    assert_eq!(quiet.state().data(), Some(&untouched));
    assert_eq!(backend.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_invalidate_refetches_observed_entry() {
    let backend = Backend::new(0, Duration::ZERO);
    let client = start(backend.clone());

    let mut observer = client.observe("stats".to_string(), fast_policy()).await.unwrap();
    observer.settled().await.unwrap();

    assert!(client.invalidate("stats".to_string()).await.unwrap());
    let next = observer.changed().await.unwrap();
    assert_eq!(next.data().map(String::as_str), Some("stats#2"));
    assert!(!client.invalidate("missing".to_string()).await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_slow_store_times_out() {
    let backend = Backend::new(0, Duration::from_secs(30));
    let client = start(backend.clone());

    let result = client
        .fetch(
            "slow".to_string(),
            fast_policy().with_timeout(Some(Duration::from_secs(10))),
        )
        .await;

    assert!(matches!(result, Err(QueryError::Timeout(limit)) if limit == Duration::from_secs(10)));
}

#[tokio::test(start_paused = true)]
async fn test_dropped_observer_does_not_cancel_shared_fetch() {
    let backend = Backend::new(0, Duration::from_millis(100));
    let client = start(backend.clone());

    let early = client.observe("hero".to_string(), fast_policy()).await.unwrap();
    let mut late = client.observe("hero".to_string(), fast_policy()).await.unwrap();
    drop(early);

    assert_eq!(late.settled().await.unwrap(), "hero#1");
    assert_eq!(backend.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failed_refresh_keeps_cached_data() {
    let backend = Backend::new(0, Duration::ZERO);
    let client = start(backend.clone());
    let policy = fast_policy().with_stale_time(Duration::from_secs(60));

    let mut observer = client.observe("home".to_string(), policy.clone()).await.unwrap();
    assert_eq!(observer.settled().await.unwrap(), "home#1");

    backend.failures_left.store(u32::MAX, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(61)).await;
    let stale = client.fetch("home".to_string(), policy.clone()).await.unwrap();
    assert_eq!(stale, "home#1");
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert!(backend.calls() > 1, "refresh was attempted");
    assert_eq!(observer.state().data().map(String::as_str), Some("home#1"));
    let snapshot = client.snapshot("home".to_string()).await.unwrap();
    assert!(matches!(snapshot, Some(QueryState::Success(ref data)) if data == "home#1"));
    assert_eq!(client.stats().await.unwrap().failing, 1);

    // Still stale, so the next read retries and the error clears.
    backend.failures_left.store(0, Ordering::SeqCst);
    let calls = backend.calls();
    client.fetch("home".to_string(), policy).await.unwrap();
    let refreshed = observer.changed().await.unwrap();
    assert_eq!(refreshed.data(), Some(&format!("home#{}", calls + 1)));
    assert_eq!(client.stats().await.unwrap().failing, 0);
}

#[tokio::test(start_paused = true)]
async fn test_invalidate_supersedes_in_flight_fetch() {
    let backend = Backend::new(0, Duration::from_millis(100));
    let client = start(backend.clone());

    let mut observer = client.observe("team".to_string(), fast_policy()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    // The first fetch is still sleeping; whatever it read predates the edit.
    assert!(client.invalidate("team".to_string()).await.unwrap());

    assert_eq!(observer.settled().await.unwrap(), "team#2");
    assert_eq!(backend.calls(), 2);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(observer.state().data().map(String::as_str), Some("team#2"));
}

#[tokio::test(start_paused = true)]
async fn test_invalidate_supersedes_fetch_awaited_by_plain_reads() {
    let backend = Backend::new(0, Duration::from_millis(100));
    let client = start(backend.clone());

    let pending = tokio::spawn({
        let client = client.clone();
        async move { client.fetch("legal".to_string(), fast_policy()).await }
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(client.invalidate("legal".to_string()).await.unwrap());

    assert_eq!(pending.await.unwrap().unwrap(), "legal#2");
    assert_eq!(backend.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_reads_push_back_eviction() {
    let backend = Backend::new(0, Duration::ZERO);
    let client = start(backend.clone());
    let policy = fast_policy().with_gc_time(Duration::from_secs(120));

    client.fetch("hero".to_string(), policy.clone()).await.unwrap();
    for _ in 0..10 {
        tokio::time::sleep(Duration::from_secs(10)).await;
        client.fetch("hero".to_string(), policy.clone()).await.unwrap();
    }

    // The first timer fires at 120s and re-arms for the last read's deadline.
    tokio::time::sleep(Duration::from_secs(110)).await;
    assert_eq!(client.stats().await.unwrap().entries, 1);
    tokio::time::sleep(Duration::from_secs(11)).await;
    assert_eq!(client.stats().await.unwrap().entries, 0);
    assert_eq!(backend.calls(), 1);
}
