use curate_tree::{ExpansionState, FetchError, LoadState, ToggleOutcome, TreeController};

use crate::integration::support::{collection, leaf, ScriptedFetcher};

#[tokio::test]
async fn root_listing_with_nested_series_needs_no_fetch_to_expand() {
    let fetcher = ScriptedFetcher::new().respond(
        "appraisal/*",
        vec![
            collection("f1", "appraisal/Fonds1"),
            collection("s1", "appraisal/Fonds1/SeriesA"),
        ],
    );
    let controller = TreeController::new(fetcher, "appraisal/");

    let forest = controller.load_roots().await.unwrap();

    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].title, "Fonds1");
    assert_eq!(forest[0].children.len(), 1);
    assert_eq!(forest[0].children[0].title, "SeriesA");

    let outcome = controller.toggle("appraisal/Fonds1").await.unwrap();

    assert_eq!(outcome, ToggleOutcome::Expanded { fetched: false });
    assert_eq!(controller.expansion("appraisal/Fonds1"), ExpansionState::Expanded);
    assert_eq!(controller.fetcher().calls().len(), 1);
}

#[tokio::test]
async fn expanding_unloaded_series_fetches_and_merges_children() {
    let fetcher = ScriptedFetcher::new()
        .respond(
            "appraisal/*",
            vec![
                collection("f1", "appraisal/Fonds1"),
                collection("s1", "appraisal/Fonds1/SeriesA"),
            ],
        )
        .respond(
            "appraisal/Fonds1/SeriesA/*",
            vec![
                collection("file1", "appraisal/Fonds1/SeriesA/File1"),
                leaf("doc1", "appraisal/Fonds1/SeriesA/scan.tif"),
            ],
        );
    let controller = TreeController::new(fetcher, "appraisal/");
    controller.load_roots().await.unwrap();
    let before = controller.snapshot();

    controller.toggle("appraisal/Fonds1").await.unwrap();
    let outcome = controller.toggle("appraisal/Fonds1/SeriesA").await.unwrap();

    assert_eq!(outcome, ToggleOutcome::Expanded { fetched: true });
    let series = &controller.snapshot()[0].children[0];
    let titles: Vec<_> = series.children.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["File1", "scan.tif"]);
    assert!(series.children[0].needs_fetch());
    assert!(before[0].children[0].children.is_empty());

    let rows = controller.rows();
    let visible: Vec<_> = rows.iter().map(|r| (r.depth, r.title.as_str())).collect();
    assert_eq!(
        visible,
        vec![(0, "Fonds1"), (1, "SeriesA"), (2, "File1"), (2, "scan.tif")]
    );
}

#[tokio::test]
async fn collapse_keeps_children_and_reexpands_without_fetch() {
    let fetcher = ScriptedFetcher::new()
        .respond("appraisal/*", vec![collection("f1", "appraisal/Fonds1")])
        .respond("appraisal/Fonds1/*", vec![leaf("d1", "appraisal/Fonds1/a.pdf")]);
    let controller = TreeController::new(fetcher, "appraisal/");
    controller.load_roots().await.unwrap();

    controller.toggle("appraisal/Fonds1").await.unwrap();
    assert_eq!(
        controller.toggle("appraisal/Fonds1").await.unwrap(),
        ToggleOutcome::Collapsed
    );
    assert_eq!(controller.snapshot()[0].children.len(), 1);
    assert_eq!(controller.rows().len(), 1);

    assert_eq!(
        controller.toggle("appraisal/Fonds1").await.unwrap(),
        ToggleOutcome::Expanded { fetched: false }
    );
    assert_eq!(controller.fetcher().calls_for("appraisal/Fonds1/*"), 1);
}

#[tokio::test]
async fn failed_root_listing_keeps_forest_and_can_be_retried() {
    let fetcher = ScriptedFetcher::new()
        .fail(
            "appraisal/*",
            FetchError::Status {
                status: 503,
                body: "unavailable".to_string(),
            },
        )
        .respond("appraisal/*", vec![collection("f1", "appraisal/Fonds1")]);
    let controller = TreeController::new(fetcher, "appraisal/");

    assert!(controller.load_roots().await.is_err());
    assert!(matches!(controller.load_state(), LoadState::Failed(msg) if msg.contains("503")));
    assert!(controller.snapshot().is_empty());

    controller.load_roots().await.unwrap();
    assert_eq!(controller.load_state(), LoadState::Loaded);
    assert_eq!(controller.snapshot()[0].id, "f1");
}

#[tokio::test]
async fn failed_expansion_merges_nothing_and_retries_from_scratch() {
    let fetcher = ScriptedFetcher::new()
        .respond("appraisal/*", vec![collection("f1", "appraisal/Fonds1")])
        .fail(
            "appraisal/Fonds1/*",
            FetchError::Transport("connection reset".to_string()),
        )
        .respond("appraisal/Fonds1/*", vec![leaf("d1", "appraisal/Fonds1/a.pdf")]);
    let controller = TreeController::new(fetcher, "appraisal/");
    controller.load_roots().await.unwrap();
    let before = controller.snapshot();

    assert!(controller.toggle("appraisal/Fonds1").await.is_err());
    assert_eq!(
        controller.expansion("appraisal/Fonds1"),
        ExpansionState::ExpandFailed
    );
    assert_eq!(*controller.snapshot(), *before);

    let retry = controller.toggle("appraisal/Fonds1").await.unwrap();
    assert_eq!(retry, ToggleOutcome::Expanded { fetched: true });
    assert_eq!(controller.snapshot()[0].children[0].id, "d1");
    assert_eq!(controller.fetcher().calls_for("appraisal/Fonds1/*"), 2);
}

#[tokio::test]
async fn empty_container_is_not_fetched_twice() {
    let fetcher = ScriptedFetcher::new()
        .respond("appraisal/*", vec![collection("f1", "appraisal/Empty")])
        .respond("appraisal/Empty/*", vec![]);
    let controller = TreeController::new(fetcher, "appraisal/");
    controller.load_roots().await.unwrap();

    controller.toggle("appraisal/Empty").await.unwrap();
    controller.toggle("appraisal/Empty").await.unwrap();
    let third = controller.toggle("appraisal/Empty").await.unwrap();

    assert_eq!(third, ToggleOutcome::Expanded { fetched: false });
    assert_eq!(controller.fetcher().calls_for("appraisal/Empty/*"), 1);
}

#[tokio::test]
async fn children_listed_before_their_parent_are_dropped() {
    let fetcher = ScriptedFetcher::new().respond(
        "*",
        vec![leaf("x", "a/x"), leaf("y", "a/y"), collection("a", "a")],
    );
    let controller = TreeController::new(fetcher, "");

    let forest = controller.load_roots().await.unwrap();

    assert_eq!(forest.len(), 1);
    assert!(forest[0].children.is_empty());
    assert!(forest[0].needs_fetch());
}
