//! End-to-end runs of the demo driver
//!
//! Time is paused so interval ticks fire as fast as the runtime can
//! process them.

use async_trait::async_trait;
use story_cache::{CacheConfig, CacheError, MediaFetcher};
use story_core::{BundleId, StoryBundle, StoryItem, StoryUser};
use story_demo::{run_with_fetcher, DemoConfig, InputAction, ScriptedInput};
use story_playback::{PlaybackState, StoryEvent};
use tempfile::TempDir;

// ===== Test Helpers =====

/// Fetcher for feeds that should never touch the network
struct OfflineFetcher;

#[async_trait]
impl MediaFetcher for OfflineFetcher {
    async fn fetch(&self, url: &str) -> story_cache::Result<Vec<u8>> {
        Err(CacheError::Status {
            status: 503,
            url: url.to_string(),
        })
    }
}

fn bundle(id: &str, items: Vec<StoryItem>) -> StoryBundle {
    StoryBundle::new(BundleId::new(id), StoryUser::new(id, id), items)
}

fn config(cache_dir: &TempDir) -> DemoConfig {
    let mut config = DemoConfig::default();
    config.cache = CacheConfig::new(cache_dir.path());
    config.demo.max_ticks = Some(500);
    config
}

fn count(events: &[StoryEvent], pred: impl Fn(&StoryEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

// ===== Runs =====

#[tokio::test(start_paused = true)]
async fn test_image_feed_runs_to_dismissal() {
    let dir = TempDir::new().unwrap();
    let bundles = vec![
        bundle("a", vec![StoryItem::image("a.jpg", 1.0)]),
        bundle("b", vec![StoryItem::image("b.jpg", 1.0)]),
    ];

    let report = run_with_fetcher(&config(&dir), bundles, OfflineFetcher)
        .await
        .unwrap();

    assert_eq!(report.ticks, 20);
    assert!(report.snapshot.dismissed);
    assert_eq!(report.snapshot.active_bundle, BundleId::new("b"));
    assert_eq!(
        count(&report.events, |e| matches!(e, StoryEvent::BundleSeen { .. })),
        2
    );
    assert_eq!(
        count(&report.events, |e| matches!(e, StoryEvent::SessionDismissed)),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn test_scripted_keyboard_holds_progress() {
    let dir = TempDir::new().unwrap();
    let mut config = config(&dir);
    config.demo.script = vec![
        ScriptedInput {
            at_tick: 8,
            action: InputAction::KeyboardClosed,
        },
        ScriptedInput {
            at_tick: 3,
            action: InputAction::KeyboardOpen,
        },
    ];
    let bundles = vec![bundle("a", vec![StoryItem::image("a.jpg", 1.0)])];

    let report = run_with_fetcher(&config, bundles, OfflineFetcher)
        .await
        .unwrap();

    // Ticks 3 through 7 are swallowed by the keyboard
    assert_eq!(report.ticks, 15);
    assert!(report.snapshot.dismissed);
    assert!(report
        .events
        .contains(&StoryEvent::InterruptionChanged { paused: true }));
}

#[tokio::test(start_paused = true)]
async fn test_local_video_plays_with_simulated_duration() {
    let dir = TempDir::new().unwrap();
    let clip = dir.path().join("clip.mp4");
    std::fs::write(&clip, b"not really a video").unwrap();

    let mut config = config(&dir);
    config.demo.video_duration_secs = 2.0;
    let bundles = vec![bundle(
        "a",
        vec![
            StoryItem::video(clip.to_str().unwrap()),
            StoryItem::image("a.jpg", 1.0),
        ],
    )];

    let report = run_with_fetcher(&config, bundles, OfflineFetcher)
        .await
        .unwrap();

    assert!(report.snapshot.dismissed);
    assert!(report.events.iter().any(|e| matches!(
        e,
        StoryEvent::PlaybackStateChanged {
            state: PlaybackState::Started,
            duration_secs,
        } if (*duration_secs - 2.0).abs() < f64::EPSILON
    )));
    assert!(report
        .events
        .contains(&StoryEvent::LoadingIndicator { visible: false }));
}

#[tokio::test(start_paused = true)]
async fn test_failed_video_is_skipped() {
    let dir = TempDir::new().unwrap();
    let bundles = vec![bundle(
        "a",
        vec![
            StoryItem::video("https://cdn.example.com/broken.mp4"),
            StoryItem::image("a.jpg", 1.0),
        ],
    )];

    let report = run_with_fetcher(&config(&dir), bundles, OfflineFetcher)
        .await
        .unwrap();

    assert!(report.snapshot.dismissed);
    assert_eq!(
        count(&report.events, |e| matches!(e, StoryEvent::LoadFailed { .. })),
        1
    );
    assert!(report.events.contains(&StoryEvent::ItemChanged {
        bundle: BundleId::new("a"),
        index: 1,
    }));
}

#[tokio::test(start_paused = true)]
async fn test_tick_budget_stops_an_open_viewer() {
    let dir = TempDir::new().unwrap();
    let mut config = config(&dir);
    config.demo.max_ticks = Some(5);
    let bundles = vec![bundle("a", vec![StoryItem::image("a.jpg", 5.0)])];

    let report = run_with_fetcher(&config, bundles, OfflineFetcher)
        .await
        .unwrap();

    assert_eq!(report.ticks, 5);
    assert!(!report.snapshot.dismissed);
    assert!(report.snapshot.progress > 0.0);
}
