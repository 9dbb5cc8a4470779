use std::collections::HashMap;
use std::path::PathBuf;

use super::*;
use crate::resolve::codepoint::resolve_keys;

struct MapSource(HashMap<String, String>);

#[async_trait]
impl DiagramSource for MapSource {
    async fn fetch(&self, key: &LookupKey) -> FetchOutcome {
        match self.0.get(key.as_str()) {
            Some(m) => FetchOutcome::Found(m.clone()),
            None => FetchOutcome::NotFound,
        }
    }
}

#[tokio::test]
async fn fetch_all_preserves_key_order() {
    let mut map = HashMap::new();
    map.insert("0304d".to_string(), "<svg id=\"ki\"/>".to_string());
    map.insert("03083".to_string(), "<svg id=\"ya\"/>".to_string());
    let source = MapSource(map);

    let out = fetch_all(&source, &resolve_keys("きゃ")).await;
    assert_eq!(
        out,
        vec![
            FetchOutcome::Found("<svg id=\"ki\"/>".to_string()),
            FetchOutcome::Found("<svg id=\"ya\"/>".to_string()),
        ]
    );

    let out = fetch_all(&source, &resolve_keys("きあ")).await;
    assert_eq!(out[1], FetchOutcome::NotFound);
}

#[tokio::test]
async fn fetch_all_of_nothing_is_empty() {
    let source = MapSource(HashMap::new());
    assert!(fetch_all(&source, &[]).await.is_empty());
}

#[tokio::test]
async fn dir_source_reads_key_files_and_misses_quietly() {
    let dir = PathBuf::from("target").join("unit_dir_source");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("03042.svg"), "<svg/>").unwrap();
    let _ = std::fs::remove_file(dir.join("03044.svg"));

    let source = DirDiagramSource::new(&dir);
    assert_eq!(
        source.fetch(&LookupKey::from_char('あ')).await,
        FetchOutcome::Found("<svg/>".to_string())
    );
    assert_eq!(
        source.fetch(&LookupKey::from_char('う')).await,
        FetchOutcome::NotFound
    );
}

#[test]
fn http_url_joins_base_and_key() {
    let source = HttpDiagramSource::new("https://example.invalid/kanji");
    assert_eq!(
        source.url_for(&LookupKey::from_char('字')),
        "https://example.invalid/kanji/05b57.svg"
    );
    let source = HttpDiagramSource::new("https://example.invalid/kanji/");
    assert_eq!(
        source.url_for(&LookupKey::from_char('字')),
        "https://example.invalid/kanji/05b57.svg"
    );
}

#[tokio::test]
async fn shared_source_delegates() {
    let mut map = HashMap::new();
    map.insert("03042".to_string(), "<svg/>".to_string());
    let source = std::sync::Arc::new(MapSource(map));
    assert_eq!(
        source.fetch(&LookupKey::from_char('あ')).await,
        FetchOutcome::Found("<svg/>".to_string())
    );
}

// Each fetch waits until every key's fetch has started.
struct RendezvousSource {
    barrier: tokio::sync::Barrier,
    in_flight: std::sync::atomic::AtomicUsize,
    peak: std::sync::atomic::AtomicUsize,
}

#[async_trait]
impl DiagramSource for RendezvousSource {
    async fn fetch(&self, key: &LookupKey) -> FetchOutcome {
        use std::sync::atomic::Ordering;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.barrier.wait().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        FetchOutcome::Found(key.as_str().to_string())
    }
}

#[tokio::test]
async fn fetch_all_runs_every_key_concurrently() {
    let source = RendezvousSource {
        barrier: tokio::sync::Barrier::new(2),
        in_flight: Default::default(),
        peak: Default::default(),
    };
    let keys = resolve_keys("きゃ");

    let out = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        fetch_all(&source, &keys),
    )
    .await
    .expect("fetches ran one after another");

    assert_eq!(
        out,
        vec![
            FetchOutcome::Found("0304d".to_string()),
            FetchOutcome::Found("03083".to_string()),
        ]
    );
    assert_eq!(source.peak.load(std::sync::atomic::Ordering::SeqCst), 2);
}
