use std::sync::mpsc::{Receiver, channel};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::tempdir;

use super::*;
use crate::classify::{ClassificationResult, InputError, LineClassifier};
use crate::egui_app::state::{BatchOutcome, TagAddOutcome};
use crate::inference::RemoteError;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Call {
    line: String,
    labels: Vec<String>,
    credential: String,
}

#[derive(Default)]
struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    fail_on: Option<String>,
    gate: Option<Mutex<Receiver<()>>>,
}

impl FakeBackend {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

struct FakeClassifier {
    backend: Arc<FakeBackend>,
    credential: String,
}

impl LineClassifier for FakeClassifier {
    fn classify_line(
        &self,
        line: &str,
        labels: &[String],
    ) -> Result<ClassificationResult, RemoteError> {
        if let Some(gate) = &self.backend.gate {
            let _ = gate.lock().unwrap().recv();
        }
        self.backend.calls.lock().unwrap().push(Call {
            line: line.to_string(),
            labels: labels.to_vec(),
            credential: self.credential.clone(),
        });
        if self.backend.fail_on.as_deref() == Some(line) {
            return Err(RemoteError::Server("boom".into()));
        }
        let mut ranked = labels.to_vec();
        ranked.reverse();
        let rest = 0.1 / (ranked.len().max(2) - 1) as f64;
        let scores = (0..ranked.len())
            .map(|idx| if idx == 0 { 0.9 } else { rest })
            .collect();
        Ok(ClassificationResult {
            sequence: line.to_string(),
            labels: ranked,
            scores,
        })
    }
}

fn factory(backend: Arc<FakeBackend>) -> ClassifierFactory {
    Arc::new(move |credential: &str| {
        Box::new(FakeClassifier {
            backend: backend.clone(),
            credential: credential.to_string(),
        }) as Box<dyn LineClassifier + Send>
    })
}

fn controller_with(
    config: AppConfig,
    token: Option<&str>,
    backend: &Arc<FakeBackend>,
) -> EguiController {
    EguiController::new(config, token.map(str::to_string), factory(backend.clone()))
}

fn controller(token: Option<&str>, backend: &Arc<FakeBackend>) -> EguiController {
    controller_with(AppConfig::default(), token, backend)
}

fn run_until_settled(controller: &mut EguiController) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while controller.any_running() {
        assert!(Instant::now() < deadline, "batch did not finish");
        thread::sleep(Duration::from_millis(5));
        controller.drive_frame(false);
    }
}

fn finished_rows(controller: &EguiController) -> Vec<String> {
    match &controller.ui.active().outcome {
        BatchOutcome::Finished { table, .. } => {
            table.rows().iter().map(|row| row.text.clone()).collect()
        }
        other => panic!("expected finished outcome, got {other:?}"),
    }
}

#[test]
fn shared_mode_without_secret_never_calls_remote() {
    let backend = Arc::new(FakeBackend::default());
    let mut controller = controller(None, &backend);
    controller.drive_frame(false);
    assert_eq!(
        controller.ui.active().notice,
        Some(InputError::SharedCredentialMissing)
    );
    controller.drive_frame(true);
    assert_eq!(controller.ui.active().outcome, BatchOutcome::Idle);
    assert!(backend.calls().is_empty());
}

#[test]
fn self_funded_mode_requires_a_key() {
    let backend = Arc::new(FakeBackend::default());
    let mut controller = controller(Some("shared"), &backend);
    controller.select_mode(OperatingMode::SelfFunded);
    controller.ui.self_funded.form.api_key = "   ".into();
    controller.drive_frame(true);
    assert_eq!(
        controller.ui.active().notice,
        Some(InputError::MissingCredential)
    );
    assert!(backend.calls().is_empty());

    controller.ui.self_funded.form.api_key = " hf_user ".into();
    controller.drive_frame(false);
    assert_eq!(controller.ui.active().notice, None);
}

#[test]
fn submission_classifies_distinct_lines_once_and_replays() {
    let backend = Arc::new(FakeBackend::default());
    let mut controller = controller(Some("shared-secret"), &backend);
    controller.ui.shared.form.text = "good\nbad\ngood\n".into();

    controller.drive_frame(true);
    assert!(controller.is_running(OperatingMode::Shared));
    run_until_settled(&mut controller);

    assert_eq!(finished_rows(&controller), ["good", "bad"]);
    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].labels, ["Positive", "Negative"]);
    assert_eq!(calls[0].credential, "shared-secret");
    assert_eq!(controller.ui.status.text, "Classification complete: 2 phrases");

    for _ in 0..5 {
        controller.drive_frame(false);
    }
    assert_eq!(finished_rows(&controller), ["good", "bad"]);
    assert_eq!(backend.calls().len(), 2);
}

#[test]
fn shared_mode_applies_configured_cap() {
    let backend = Arc::new(FakeBackend::default());
    let mut config = AppConfig::default();
    config.inference.shared_max_lines = 2;
    let mut controller = controller_with(config, Some("secret"), &backend);
    controller.ui.shared.form.text = "one\ntwo\nthree".into();
    assert_eq!(
        controller
            .ui
            .shared
            .form
            .live_truncation(controller.max_lines(OperatingMode::Shared))
            .map(|notice| (notice.kept, notice.entered)),
        Some((2, 3))
    );

    controller.drive_frame(true);
    run_until_settled(&mut controller);

    assert_eq!(finished_rows(&controller), ["one", "two"]);
}

#[test]
fn self_funded_mode_is_uncapped_and_uses_typed_key() {
    let backend = Arc::new(FakeBackend::default());
    let mut controller = controller(None, &backend);
    controller.select_mode(OperatingMode::SelfFunded);
    let form = &mut controller.ui.self_funded.form;
    form.api_key = "  hf_user  ".into();
    form.text = (1..=7).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n");

    controller.drive_frame(true);
    run_until_settled(&mut controller);

    assert_eq!(finished_rows(&controller).len(), 7);
    assert!(backend.calls().iter().all(|call| call.credential == "hf_user"));
}

#[test]
fn remote_failure_fails_whole_batch() {
    let backend = Arc::new(FakeBackend {
        fail_on: Some("b".into()),
        ..FakeBackend::default()
    });
    let mut controller = controller(Some("secret"), &backend);
    controller.ui.shared.form.text = "a\nb\nc".into();

    controller.drive_frame(true);
    run_until_settled(&mut controller);

    match &controller.ui.shared.outcome {
        BatchOutcome::Failed { message, .. } => {
            assert!(message.contains("phrase 2 of 3"), "{message}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(backend.calls().len(), 2);
    assert_eq!(controller.ui.status.badge_label(), "Error");
}

#[test]
fn rejected_resubmission_hides_previous_results() {
    let backend = Arc::new(FakeBackend::default());
    let mut controller = controller(Some("secret"), &backend);
    controller.drive_frame(true);
    run_until_settled(&mut controller);
    assert_eq!(finished_rows(&controller).len(), 2);

    controller.ui.shared.form.labels = vec!["Only".into()];
    controller.drive_frame(true);

    assert_eq!(controller.ui.shared.notice, Some(InputError::SingleLabel));
    assert_eq!(controller.ui.shared.outcome, BatchOutcome::Idle);
    assert_eq!(controller.ui.status.text, "Add at least two distinct labels.");

    controller.drive_frame(false);
    assert_eq!(controller.ui.shared.notice, Some(InputError::SingleLabel));
}

#[test]
fn result_for_superseded_submission_is_discarded() {
    let (release_tx, release_rx) = channel();
    let backend = Arc::new(FakeBackend {
        gate: Some(Mutex::new(release_rx)),
        ..FakeBackend::default()
    });
    let mut controller = controller(None, &backend);
    controller.select_mode(OperatingMode::SelfFunded);
    controller.ui.self_funded.form.api_key = "hf_user".into();
    controller.ui.self_funded.form.text = "only line".into();
    controller.drive_frame(true);
    assert!(controller.is_running(OperatingMode::SelfFunded));

    controller.ui.self_funded.form.api_key.clear();
    controller.drive_frame(false);
    assert_eq!(controller.ui.self_funded.outcome, BatchOutcome::Idle);

    release_tx.send(()).unwrap();
    let deadline = Instant::now() + Duration::from_secs(5);
    while backend.calls().is_empty() {
        assert!(Instant::now() < deadline, "worker never ran");
        thread::sleep(Duration::from_millis(5));
    }
    thread::sleep(Duration::from_millis(50));
    controller.poll_jobs();

    assert_eq!(controller.ui.self_funded.outcome, BatchOutcome::Idle);
    assert_ne!(controller.ui.status.badge_label(), "Info");
}

#[test]
fn modes_keep_separate_results() {
    let backend = Arc::new(FakeBackend::default());
    let mut controller = controller(Some("secret"), &backend);
    controller.drive_frame(true);
    run_until_settled(&mut controller);

    controller.select_mode(OperatingMode::SelfFunded);
    controller.ui.self_funded.form.api_key = "hf_user".into();
    controller.drive_frame(false);
    assert_eq!(controller.ui.self_funded.outcome, BatchOutcome::Idle);

    controller.select_mode(OperatingMode::Shared);
    controller.drive_frame(false);
    assert_eq!(finished_rows(&controller).len(), 2);
}

#[test]
fn tag_input_respects_limit_and_duplicates() {
    let backend = Arc::new(FakeBackend::default());
    let mut controller = controller(Some("secret"), &backend);
    controller.ui.shared.form.tag_input = "Neutral".into();
    controller.add_tag_from_input();
    assert_eq!(
        controller.ui.shared.form.labels,
        ["Positive", "Negative", "Neutral"]
    );
    assert!(controller.ui.shared.form.tag_input.is_empty());

    controller.ui.shared.form.tag_input = "Mixed".into();
    controller.add_tag_from_input();
    assert_eq!(controller.ui.shared.form.tag_input, "Mixed");
    assert_eq!(controller.ui.status.text, "At most 3 labels allowed");

    assert_eq!(controller.add_tag("Positive"), TagAddOutcome::Duplicate);
    controller.remove_tag(0);
    assert_eq!(controller.ui.shared.form.labels, ["Negative", "Neutral"]);
}

#[test]
fn export_writes_full_table_in_batch_order() {
    let backend = Arc::new(FakeBackend::default());
    let mut config = AppConfig::default();
    config.export.encoding = "utf-8".into();
    let mut controller = controller_with(config, Some("secret"), &backend);
    controller.ui.shared.form.text = "zeta\nalpha".into();
    controller.drive_frame(true);
    run_until_settled(&mut controller);
    controller.ui.shared.grid.filter = "alpha".into();
    controller
        .ui
        .shared
        .grid
        .cycle_sort(crate::classify::ResultColumn::Text);

    let dir = tempdir().unwrap();
    let path = dir.path().join("results.csv");
    controller.export_results_to(&path);

    let written = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("0,zeta,"));
    assert!(lines[2].starts_with("1,alpha,"));
    assert_eq!(controller.ui.status.badge_label(), "Info");
}

#[test]
fn export_without_results_warns() {
    let backend = Arc::new(FakeBackend::default());
    let mut controller = controller(Some("secret"), &backend);
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.csv");
    controller.export_results_to(&path);
    assert!(!path.exists());
    assert_eq!(controller.ui.status.text, "Nothing to export yet");
}

#[test]
fn unmappable_export_reports_error() {
    let backend = Arc::new(FakeBackend::default());
    let mut controller = controller(Some("secret"), &backend);
    controller.ui.shared.form.text = "party 🎉".into();
    controller.drive_frame(true);
    run_until_settled(&mut controller);

    let dir = tempdir().unwrap();
    let path = dir.path().join("results.csv");
    controller.export_results_to(&path);

    assert!(!path.exists());
    assert_eq!(controller.ui.status.badge_label(), "Error");
    assert!(controller.ui.status.text.starts_with("Export failed"));
}
