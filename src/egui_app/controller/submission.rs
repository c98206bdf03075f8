use super::EguiController;
use super::jobs::{BatchFinished, ClassificationJob, JobMessage};
use super::status_message::StatusMessage;
use crate::classify::{
    AcceptedSubmission, BatchProgress, Gate, InputError, OperatingMode, evaluate,
};
use crate::egui_app::state::{BatchOutcome, GridViewState};

impl EguiController {
    /// Evaluate the active form for this frame and act on the gate.
    ///
    /// `submitted` is true only on the frame the Classify button was pressed.
    pub fn drive_frame(&mut self, submitted: bool) {
        self.poll_jobs();
        let mode = self.ui.mode;
        let submitted = submitted && !self.is_running(mode);
        let profile = self.profile_for(mode);
        let form = self.ui.workspace(mode).form.to_input();
        match evaluate(&form, submitted, &profile, self.session_mut(mode)) {
            Gate::Halt => {
                let workspace = self.ui.workspace_mut(mode);
                workspace.outcome = BatchOutcome::Idle;
                clear_credential_notice(&mut workspace.notice);
            }
            Gate::Replay { .. } => {
                clear_credential_notice(&mut self.ui.workspace_mut(mode).notice);
            }
            Gate::Rejected(err) => self.reject(mode, err, submitted),
            Gate::Classify(accepted) => self.start_classification(accepted),
        }
    }

    /// Drain worker messages; results for superseded submissions are dropped.
    pub fn poll_jobs(&mut self) {
        while let Ok(message) = self.jobs.try_recv_message() {
            match message {
                JobMessage::Progress {
                    mode,
                    submission_id,
                    progress,
                } => self.apply_progress(mode, submission_id, progress),
                JobMessage::Finished(finished) => self.finish_classification(finished),
            }
        }
    }

    fn reject(&mut self, mode: OperatingMode, err: InputError, submitted: bool) {
        let workspace = self.ui.workspace_mut(mode);
        workspace.outcome = BatchOutcome::Idle;
        let changed = workspace.notice != Some(err);
        workspace.notice = Some(err);
        if submitted {
            tracing::info!("Submission rejected: {err}");
            self.set_status_message(StatusMessage::InputRejected(err));
        } else if changed {
            tracing::debug!("Form not ready: {err}");
        }
    }

    fn start_classification(&mut self, accepted: AcceptedSubmission) {
        let AcceptedSubmission {
            id,
            mode,
            batch,
            labels,
            credential,
            truncation,
        } = accepted;
        let total = batch.len();
        if let Some(notice) = truncation {
            tracing::info!("{}", notice.message());
        }
        tracing::info!(
            "Accepted submission {id} in {}: {total} phrases, {} labels",
            mode.display_name(),
            labels.len()
        );
        let workspace = self.ui.workspace_mut(mode);
        workspace.notice = None;
        workspace.grid = GridViewState::default();
        workspace.outcome = BatchOutcome::Running {
            submission_id: id,
            progress: BatchProgress {
                completed: 0,
                total,
            },
        };
        self.set_status_message(StatusMessage::Classifying { count: total });
        self.jobs.begin_classification(
            ClassificationJob {
                mode,
                submission_id: id,
                batch,
                labels,
                credential,
            },
            self.classifier_factory.clone(),
        );
    }

    fn apply_progress(&mut self, mode: OperatingMode, submission_id: u64, progress: BatchProgress) {
        if let BatchOutcome::Running {
            submission_id: running,
            progress: current,
        } = &mut self.ui.workspace_mut(mode).outcome
            && *running == submission_id
        {
            *current = progress;
        }
    }

    fn finish_classification(&mut self, finished: BatchFinished) {
        let BatchFinished {
            mode,
            submission_id,
            result,
        } = finished;
        let running = self.ui.workspace(mode).outcome.is_running()
            && self.ui.workspace(mode).outcome.submission_id() == Some(submission_id);
        if !running || !self.session(mode).is_current(submission_id) {
            tracing::debug!("Discarding stale result for submission {submission_id}");
            return;
        }
        match result {
            Ok(table) => {
                let count = table.len();
                self.ui.workspace_mut(mode).outcome = BatchOutcome::Finished {
                    submission_id,
                    table,
                };
                self.set_status_message(StatusMessage::ClassificationComplete { count });
            }
            Err(err) => {
                let message = err.to_string();
                tracing::error!("{message}");
                self.ui.workspace_mut(mode).outcome = BatchOutcome::Failed {
                    submission_id,
                    message: message.clone(),
                };
                self.set_status_message(StatusMessage::ClassificationFailed { err: message });
            }
        }
    }
}

fn clear_credential_notice(notice: &mut Option<InputError>) {
    if matches!(
        notice,
        Some(InputError::MissingCredential | InputError::SharedCredentialMissing)
    ) {
        *notice = None;
    }
}
