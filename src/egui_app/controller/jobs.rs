use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::thread;

use url::Url;

use crate::classify::{
    BatchProgress, ClassifyError, LabelSet, LineBatch, LineClassifier, OperatingMode,
    ResultTable, classify_batch,
};
use crate::inference::HostedClassifier;

/// Builds a classifier for a credential on the worker thread.
pub type ClassifierFactory =
    Arc<dyn Fn(&str) -> Box<dyn LineClassifier + Send> + Send + Sync>;

/// Factory producing [`HostedClassifier`]s for `endpoint`.
pub fn hosted_classifier_factory(endpoint: Url) -> ClassifierFactory {
    Arc::new(move |credential: &str| {
        Box::new(HostedClassifier::new(endpoint.clone(), credential))
            as Box<dyn LineClassifier + Send>
    })
}

pub(crate) enum JobMessage {
    Progress {
        mode: OperatingMode,
        submission_id: u64,
        progress: BatchProgress,
    },
    Finished(BatchFinished),
}

pub(crate) struct BatchFinished {
    pub(crate) mode: OperatingMode,
    pub(crate) submission_id: u64,
    pub(crate) result: Result<ResultTable, ClassifyError>,
}

pub(crate) struct ClassificationJob {
    pub(crate) mode: OperatingMode,
    pub(crate) submission_id: u64,
    pub(crate) batch: LineBatch,
    pub(crate) labels: LabelSet,
    pub(crate) credential: String,
}

pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
}

impl ControllerJobs {
    pub(crate) fn new() -> Self {
        let (message_tx, message_rx) = channel();
        Self {
            message_tx,
            message_rx,
        }
    }

    pub(crate) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    /// Run one batch on a worker thread, reporting over the job channel.
    pub(crate) fn begin_classification(
        &self,
        job: ClassificationJob,
        factory: ClassifierFactory,
    ) {
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let ClassificationJob {
                mode,
                submission_id,
                batch,
                labels,
                credential,
            } = job;
            let classifier = factory(&credential);
            let result = classify_batch(classifier.as_ref(), &batch, &labels, |progress| {
                let _ = tx.send(JobMessage::Progress {
                    mode,
                    submission_id,
                    progress,
                });
            });
            let _ = tx.send(JobMessage::Finished(BatchFinished {
                mode,
                submission_id,
                result,
            }));
        });
    }
}
