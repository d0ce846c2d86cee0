use serde::Serialize;

use crate::alignment::split::LocalDiff;
use crate::types::{DiffKind, DiffOp};

/// Per-kind counts of a diff.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DiffSummary {
    pub correct: usize,
    pub wrong: usize,
    pub extra: usize,
    pub missing: usize,
    /// `correct / (correct + wrong + missing)`; 1.0 for an empty reference.
    pub accuracy: f64,
}

impl DiffSummary {
    pub fn from_ops(ops: &[DiffOp]) -> Self {
        let mut summary = DiffSummary::default();
        for op in ops {
            match op.kind {
                DiffKind::Correct => summary.correct += 1,
                DiffKind::Wrong => summary.wrong += 1,
                DiffKind::Extra => summary.extra += 1,
                DiffKind::Missing => summary.missing += 1,
            }
        }
        summary.accuracy = summary.compute_accuracy();
        summary
    }

    pub fn error_count(&self) -> usize {
        self.wrong + self.extra + self.missing
    }

    fn compute_accuracy(&self) -> f64 {
        let denominator = self.correct + self.wrong + self.missing;
        if denominator == 0 {
            1.0
        } else {
            self.correct as f64 / denominator as f64
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageReport {
    pub image_id: u64,
    pub summary: DiffSummary,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskReport {
    pub summary: DiffSummary,
    pub images: Vec<ImageReport>,
}

/// Summaries of a split task. Images without any op are noted, as are images
/// whose ops all come from the reference.
pub fn task_report<'a>(
    global: &[DiffOp],
    locals: impl IntoIterator<Item = &'a LocalDiff>,
) -> TaskReport {
    let images = locals
        .into_iter()
        .map(|local| {
            let summary = DiffSummary::from_ops(&local.ops);
            let mut notes = Vec::new();
            if local.ops.is_empty() {
                notes.push("no_ops".to_string());
            } else if local.ops.iter().all(|op| op.hypothesis_index.is_none()) {
                notes.push("no_hypothesis_words".to_string());
            }
            if summary.error_count() > 0 && summary.correct == 0 {
                notes.push("no_correct_words".to_string());
            }
            ImageReport {
                image_id: local.image_id,
                summary,
                notes,
            }
        })
        .collect();
    TaskReport {
        summary: DiffSummary::from_ops(global),
        images,
    }
}
