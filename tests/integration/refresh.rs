use curate_tree::{LoadState, TreeController};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::yield_now;
use tokio::time;

use crate::integration::support::{collection, ScriptedFetcher};

const FIVE_MINUTES: Duration = Duration::from_secs(300);

fn changing_archive() -> ScriptedFetcher {
    ScriptedFetcher::new()
        .respond("appraisal/*", vec![collection("f1", "appraisal/Fonds1")])
        .respond(
            "appraisal/*",
            vec![
                collection("f1", "appraisal/Fonds1"),
                collection("f2", "appraisal/Fonds2"),
            ],
        )
}

#[tokio::test(start_paused = true)]
async fn stale_check_loads_when_nothing_loaded_yet() {
    let controller = TreeController::new(changing_archive(), "appraisal/");

    let refreshed = controller.refresh_if_stale(FIVE_MINUTES).await.unwrap();

    assert_eq!(refreshed.unwrap().len(), 1);
    assert_eq!(controller.load_state(), LoadState::Loaded);
}

#[tokio::test(start_paused = true)]
async fn fresh_forest_is_kept_until_it_ages() {
    let controller = TreeController::new(changing_archive(), "appraisal/");
    controller.load_roots().await.unwrap();

    time::advance(Duration::from_secs(299)).await;
    assert!(controller.refresh_if_stale(FIVE_MINUTES).await.unwrap().is_none());
    assert_eq!(controller.fetcher().calls_for("appraisal/*"), 1);

    time::advance(Duration::from_secs(1)).await;
    let refreshed = controller.refresh_if_stale(FIVE_MINUTES).await.unwrap();

    assert_eq!(refreshed.unwrap().len(), 2);
    assert_eq!(controller.snapshot()[1].id, "f2");
    assert_eq!(controller.fetcher().calls_for("appraisal/*"), 2);
}

#[tokio::test(start_paused = true)]
async fn refresh_is_skipped_while_root_listing_in_flight() {
    let gate = Arc::new(Notify::new());
    let fetcher = changing_archive().gate("appraisal/*", gate.clone());
    let controller = TreeController::new(fetcher, "appraisal/");

    let (loaded, refreshed) = tokio::join!(controller.load_roots(), async {
        yield_now().await;
        let refreshed = controller.refresh_if_stale(Duration::ZERO).await;
        gate.notify_one();
        refreshed
    });

    assert!(loaded.is_ok());
    assert!(refreshed.unwrap().is_none());
    assert_eq!(controller.fetcher().calls_for("appraisal/*"), 1);
}

#[tokio::test(start_paused = true)]
async fn scheduled_refresh_reloads_once_per_period() {
    let controller = TreeController::new(changing_archive(), "appraisal/");
    controller.load_roots().await.unwrap();

    tokio::select! {
        _ = controller.refresh_every(FIVE_MINUTES) => unreachable!("refresh loop ended"),
        _ = time::sleep(Duration::from_secs(650)) => {}
    }

    assert_eq!(controller.fetcher().calls_for("appraisal/*"), 3);
    assert_eq!(controller.snapshot().len(), 2);
}
