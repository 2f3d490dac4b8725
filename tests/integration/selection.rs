use curate_tree::{
    ApiError, FetchError, RecordSelected, SelectionSink, TreeController,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::integration::support::{collection, leaf, ScriptedFetcher};

#[derive(Default)]
struct Recorder {
    ids: Mutex<Vec<String>>,
}

impl SelectionSink for Recorder {
    fn record_selected(&self, event: &RecordSelected) {
        self.ids.lock().push(event.record.id.clone());
    }
}

fn archive() -> ScriptedFetcher {
    ScriptedFetcher::new().respond(
        "appraisal/*",
        vec![
            collection("f1", "appraisal/Fonds1"),
            leaf("r1", "appraisal/readme.txt"),
        ],
    )
}

#[tokio::test]
async fn selecting_loaded_record_emits_one_event_per_sink() {
    let recorder = Arc::new(Recorder::default());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut controller = TreeController::new(archive(), "appraisal/");
    controller.subscribe(recorder.clone());
    controller.subscribe(Arc::new(tx));
    controller.load_roots().await.unwrap();

    let record = controller.select("r1", "appraisal/readme.txt").await.unwrap();

    assert_eq!(record.title, "readme.txt");
    assert_eq!(*recorder.ids.lock(), vec!["r1".to_string()]);
    assert_eq!(rx.try_recv().unwrap().record.id, "r1");
    assert!(rx.try_recv().is_err());
    assert_eq!(controller.fetcher().calls().len(), 1);
}

#[tokio::test]
async fn selecting_unloaded_record_lists_its_path_once() {
    let fetcher = archive().respond(
        "appraisal/Fonds1/SeriesA/minutes.pdf",
        vec![leaf("d1", "appraisal/Fonds1/SeriesA/minutes.pdf")],
    );
    let recorder = Arc::new(Recorder::default());
    let mut controller = TreeController::new(fetcher, "appraisal/");
    controller.subscribe(recorder.clone());
    controller.load_roots().await.unwrap();
    let before = controller.snapshot();

    let record = controller
        .select("d1", "appraisal/Fonds1/SeriesA/minutes.pdf")
        .await
        .unwrap();

    assert_eq!(record.id, "d1");
    assert_eq!(record.path, "appraisal/Fonds1/SeriesA/minutes.pdf");
    assert_eq!(
        controller
            .fetcher()
            .calls_for("appraisal/Fonds1/SeriesA/minutes.pdf"),
        1
    );
    assert_eq!(*controller.snapshot(), *before);
    assert_eq!(controller.selected_id().as_deref(), Some("d1"));
    assert_eq!(*recorder.ids.lock(), vec!["d1".to_string()]);
}

#[tokio::test]
async fn failed_resolution_keeps_previous_selection_silent() {
    let fetcher = archive().fail(
        "appraisal/Fonds1/Gone",
        FetchError::Status {
            status: 404,
            body: "not found".to_string(),
        },
    );
    let recorder = Arc::new(Recorder::default());
    let mut controller = TreeController::new(fetcher, "appraisal/");
    controller.subscribe(recorder.clone());
    controller.load_roots().await.unwrap();
    controller.select("f1", "appraisal/Fonds1").await.unwrap();

    let result = controller.select("zz", "appraisal/Fonds1/Gone").await;

    assert!(matches!(result, Err(ApiError::Fetch(FetchError::Status { status: 404, .. }))));
    assert_eq!(controller.selected_id().as_deref(), Some("f1"));
    assert_eq!(*recorder.ids.lock(), vec!["f1".to_string()]);
}

#[tokio::test]
async fn empty_resolution_reports_record_not_found() {
    let recorder = Arc::new(Recorder::default());
    let mut controller = TreeController::new(archive(), "appraisal/");
    controller.subscribe(recorder.clone());
    controller.load_roots().await.unwrap();

    let result = controller.select("zz", "appraisal/Fonds1/Gone").await;

    assert!(matches!(result, Err(ApiError::RecordNotFound(msg)) if msg.contains("appraisal/Fonds1/Gone")));
    assert!(controller.selected_id().is_none());
    assert!(recorder.ids.lock().is_empty());
}

#[tokio::test]
async fn resolution_rejects_record_with_other_id_at_path() {
    let fetcher = archive().respond(
        "appraisal/Fonds1/doc",
        vec![leaf("real", "appraisal/Fonds1/doc")],
    );
    let recorder = Arc::new(Recorder::default());
    let mut controller = TreeController::new(fetcher, "appraisal/");
    controller.subscribe(recorder.clone());
    controller.load_roots().await.unwrap();
    controller.select("r1", "appraisal/readme.txt").await.unwrap();

    let result = controller.select("wrong", "appraisal/Fonds1/doc").await;

    assert!(matches!(result, Err(ApiError::RecordNotFound(_))));
    assert_eq!(controller.selected_id().as_deref(), Some("r1"));
    assert_eq!(*recorder.ids.lock(), vec!["r1".to_string()]);

    let record = controller.select("real", "appraisal/Fonds1/doc").await.unwrap();
    assert_eq!(record.id, "real");
    assert_eq!(controller.selected_id().as_deref(), Some("real"));
    assert_eq!(*recorder.ids.lock(), vec!["r1".to_string(), "real".to_string()]);
}
