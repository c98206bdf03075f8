use crate::inference::RemoteError;

use super::batch::LineBatch;
use super::table::{ClassificationResult, ResultTable};
use super::validate::LabelSet;

/// Classifies a single phrase against a candidate label set.
pub trait LineClassifier {
    fn classify_line(
        &self,
        line: &str,
        labels: &[String],
    ) -> Result<ClassificationResult, RemoteError>;
}

/// Phrases classified so far in a running batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
}

/// A remote failure that aborted a batch.
#[derive(Debug, thiserror::Error)]
#[error("Classification failed on phrase {line_number} of {total}: {source}")]
pub struct ClassifyError {
    /// 1-based position of the failing phrase.
    pub line_number: usize,
    pub total: usize,
    pub line: String,
    #[source]
    pub source: RemoteError,
}

/// Classify every phrase in order, one remote call each.
///
/// The first failure aborts the batch and results gathered so far are
/// dropped. Nothing is retried.
pub fn classify_batch<C, F>(
    classifier: &C,
    batch: &LineBatch,
    labels: &LabelSet,
    mut on_progress: F,
) -> Result<ResultTable, ClassifyError>
where
    C: LineClassifier + ?Sized,
    F: FnMut(BatchProgress),
{
    let total = batch.len();
    let mut results = Vec::with_capacity(total);
    for (index, line) in batch.iter().enumerate() {
        let result = classifier
            .classify_line(line, labels.as_slice())
            .map_err(|source| {
                tracing::warn!(
                    "Classification aborted at phrase {} of {total}: {source}",
                    index + 1
                );
                ClassifyError {
                    line_number: index + 1,
                    total,
                    line: line.clone(),
                    source,
                }
            })?;
        results.push(result);
        on_progress(BatchProgress {
            completed: index + 1,
            total,
        });
    }
    tracing::info!("Classified {total} phrases");
    Ok(ResultTable::from_results(results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{FormInput, Gate, ModeProfile, SessionState, evaluate};
    use std::cell::RefCell;

    /// Scores the first label highest and records every call.
    #[derive(Default)]
    struct ScriptedClassifier {
        calls: RefCell<Vec<String>>,
        fail_on: Option<usize>,
    }

    impl LineClassifier for ScriptedClassifier {
        fn classify_line(
            &self,
            line: &str,
            labels: &[String],
        ) -> Result<ClassificationResult, RemoteError> {
            let mut calls = self.calls.borrow_mut();
            calls.push(line.to_string());
            if self.fail_on == Some(calls.len()) {
                return Err(RemoteError::ModelLoading("still loading".into()));
            }
            let step = 1.0 / labels.len() as f64;
            Ok(ClassificationResult {
                sequence: line.to_string(),
                labels: labels.to_vec(),
                scores: (0..labels.len()).map(|i| 1.0 - step * i as f64).collect(),
            })
        }
    }

    fn accepted(text: &str, labels: &[&str]) -> crate::classify::AcceptedSubmission {
        let form = FormInput {
            text: text.to_string(),
            labels: labels.iter().map(|label| label.to_string()).collect(),
        };
        let mut session = SessionState::new();
        match evaluate(&form, true, &ModeProfile::shared(Some("k".into()), 5), &mut session) {
            Gate::Classify(accepted) => accepted,
            other => panic!("expected classify, got {other:?}"),
        }
    }

    #[test]
    fn one_call_per_distinct_line_in_order() {
        let submission = accepted(
            "What a wonderful day!\nI lost my packet...So BAD...\nWhat a wonderful day!",
            &["Positive", "Negative"],
        );
        let classifier = ScriptedClassifier::default();
        let mut progress = Vec::new();
        let table = classify_batch(&classifier, &submission.batch, &submission.labels, |p| {
            progress.push(p)
        })
        .unwrap();

        assert_eq!(
            *classifier.calls.borrow(),
            ["What a wonderful day!", "I lost my packet...So BAD..."]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].text, "What a wonderful day!");
        assert_eq!(table.rows()[1].text, "I lost my packet...So BAD...");
        assert_eq!(
            progress,
            [
                BatchProgress { completed: 1, total: 2 },
                BatchProgress { completed: 2, total: 2 }
            ]
        );
    }

    #[test]
    fn first_failure_aborts_the_batch() {
        let submission = accepted("a\nb\nc", &["x", "y"]);
        let classifier = ScriptedClassifier {
            fail_on: Some(2),
            ..Default::default()
        };
        let err = classify_batch(&classifier, &submission.batch, &submission.labels, |_| {})
            .unwrap_err();
        assert_eq!(err.line_number, 2);
        assert_eq!(err.total, 3);
        assert_eq!(err.line, "b");
        assert!(matches!(err.source, RemoteError::ModelLoading(_)));
        assert_eq!(classifier.calls.borrow().len(), 2);
        assert!(err.to_string().contains("phrase 2 of 3"));
    }

    #[test]
    fn empty_batch_makes_no_calls() {
        let submission = accepted("\n", &["x", "y"]);
        let classifier = ScriptedClassifier::default();
        let table =
            classify_batch(&classifier, &submission.batch, &submission.labels, |_| {}).unwrap();
        assert!(table.is_empty());
        assert!(classifier.calls.borrow().is_empty());
    }

    #[test]
    fn row_order_matches_batch_order_for_capped_batches() {
        let submission = accepted("g\nf\ne\nd\nc\nb\na", &["x", "y", "z"]);
        let classifier = ScriptedClassifier::default();
        let table =
            classify_batch(&classifier, &submission.batch, &submission.labels, |_| {}).unwrap();
        let texts: Vec<&str> = table.rows().iter().map(|row| row.text.as_str()).collect();
        assert_eq!(texts, ["g", "f", "e", "d", "c"]);
    }
}
