//! Recompute session behavior: debounce coalescing, staleness
//! rejection, ghost deltas.

use std::sync::Arc;
use std::time::Duration;

use patternkit_core::{BrandStyle, DesignParameters, PatternDocument};
use patternkit_pipeline::{spawn_session, SessionConfig, SessionHandle};

fn fast_config() -> SessionConfig {
    let mut config = SessionConfig::new("Test Jacket", BrandStyle::Atelier);
    config.debounce = Duration::from_millis(20);
    config
}

/// Waits until the published document satisfies the predicate.
async fn wait_for_doc(
    handle: &SessionHandle,
    predicate: impl Fn(&PatternDocument) -> bool,
) -> Arc<PatternDocument> {
    let mut rx = handle.documents();
    let found = tokio::time::timeout(
        Duration::from_secs(5),
        rx.wait_for(|doc| doc.as_ref().map(|d| predicate(d)).unwrap_or(false)),
    )
    .await
    .expect("timed out waiting for a matching document")
    .expect("session closed unexpectedly");
    found.clone().expect("predicate only matches Some")
}

#[tokio::test]
async fn initial_document_appears_without_a_drag() {
    let handle = spawn_session(fast_config());
    let doc = wait_for_doc(&handle, |_| true).await;
    assert_eq!(doc.style_name, "Test Jacket");
    assert_eq!(doc.params, DesignParameters::neutral());
}

#[tokio::test]
async fn rapid_drags_coalesce_to_the_last_value() {
    let handle = spawn_session(fast_config());
    wait_for_doc(&handle, |_| true).await;

    // Three drags inside one debounce window: only the final value is
    // ever committed.
    handle.update_params(DesignParameters::new(10.0, 0.0, 0.0)).unwrap();
    handle.update_params(DesignParameters::new(40.0, 0.0, 0.0)).unwrap();
    let last = DesignParameters::new(90.0, 15.0, 0.0);
    handle.update_params(last).unwrap();

    let doc = wait_for_doc(&handle, |d| d.params == last).await;
    assert_eq!(doc.params, last);
}

#[tokio::test]
async fn superseded_inflight_result_is_discarded() {
    let mut config = fast_config();
    // Make the draft slow enough that B's commit lands while A computes.
    config.compute_delay = Duration::from_millis(150);
    let handle = spawn_session(config);

    let params_a = DesignParameters::new(20.0, 0.0, 0.0);
    let params_b = DesignParameters::new(80.0, 50.0, 0.0);

    handle.update_params(params_a).unwrap();
    // Past the debounce: A is committed and computing.
    tokio::time::sleep(Duration::from_millis(60)).await;
    handle.update_params(params_b).unwrap();

    let doc = wait_for_doc(&handle, |d| d.params == params_b).await;
    assert_eq!(doc.params, params_b);

    // A's result arrives after B was published; it must not overwrite.
    tokio::time::sleep(Duration::from_millis(400)).await;
    let current = handle.current_document().expect("document published");
    assert_eq!(current.params, params_b, "stale result overwrote a newer commit");
}

#[tokio::test]
async fn garment_change_reclassifies() {
    let handle = spawn_session(fast_config());
    let doc = wait_for_doc(&handle, |_| true).await;
    assert_eq!(doc.pieces.len(), 2);

    handle.set_garment("Wide Leg Trouser").unwrap();
    let doc = wait_for_doc(&handle, |d| d.pieces.len() == 1).await;
    assert_eq!(doc.pieces[0].name, "Pant Front");
}

#[tokio::test]
async fn brand_change_switches_synthesis() {
    let handle = spawn_session(fast_config());
    wait_for_doc(&handle, |_| true).await;

    handle.set_brand(BrandStyle::Flux).unwrap();
    let doc = wait_for_doc(&handle, |d| d.brand == BrandStyle::Flux).await;
    assert_eq!(doc.synthesis_method, patternkit_core::SynthesisMethod::Curved);
    assert!(doc.pieces.iter().all(|p| p.path.quad_count() > 0));
}

#[tokio::test]
async fn ghost_tracks_pending_until_commit() {
    let mut config = fast_config();
    config.debounce = Duration::from_millis(200);
    let handle = spawn_session(config);
    wait_for_doc(&handle, |_| true).await;

    assert!(handle.ghost().is_neutral());

    let dragged = DesignParameters::new(100.0, 0.0, 0.0);
    handle.update_params(dragged).unwrap();
    let ghost = handle.ghost();
    assert!((ghost.scale_x - 1.4).abs() < 1e-9, "pending drag should show immediately");

    // After the commit lands, committed == pending again.
    wait_for_doc(&handle, |d| d.params == dragged).await;
    assert!(handle.ghost().is_neutral());
}

#[tokio::test]
async fn shutdown_closes_the_session() {
    let handle = spawn_session(fast_config());
    handle.shutdown().unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(handle.update_params(DesignParameters::neutral()).is_err());
}
