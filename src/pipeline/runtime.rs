use serde::Serialize;

use crate::alignment::normalize::split_words;
use crate::alignment::report::{task_report, TaskReport};
use crate::alignment::split::{split_by_segments, LocalDiff};
use crate::alignment::synthesis::synthesize;
use crate::annotation::construct::build_annotations;
use crate::annotation::overlap::{resolve_label_offsets, LabelOffsets};
use crate::annotation::{Annotation, AnnotationIdArena};
use crate::config::LayoutConfig;
use crate::error::DiffError;
use crate::pipeline::traits::{EquivalenceResolver, Normalizer, SequenceAligner};
use crate::types::{DiffOp, ImageSegment, ImageWords};

pub struct WordDiffer {
    dp_cell_warn_threshold: usize,
    normalizer: Box<dyn Normalizer>,
    sequence_aligner: Box<dyn SequenceAligner>,
    equivalence_resolver: Box<dyn EquivalenceResolver>,
}

pub(crate) struct WordDifferParts {
    pub dp_cell_warn_threshold: usize,
    pub normalizer: Box<dyn Normalizer>,
    pub sequence_aligner: Box<dyn SequenceAligner>,
    pub equivalence_resolver: Box<dyn EquivalenceResolver>,
}

/// Ops of one image plus the OCR confidence of each op's hypothesis word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageDiff {
    #[serde(flatten)]
    pub diff: LocalDiff,
    /// Parallel to `diff.ops`; `None` for missing words or unscored OCR.
    pub confidences: Vec<Option<f32>>,
}

/// A whole task diffed once over all images in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskDiff {
    pub global: Vec<DiffOp>,
    pub segments: Vec<ImageSegment>,
    pub images: Vec<ImageDiff>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageAnnotations {
    pub image_id: u64,
    pub annotations: Vec<Annotation>,
    pub label_offsets: LabelOffsets,
}

impl WordDiffer {
    pub(crate) fn from_parts(parts: WordDifferParts) -> Self {
        Self {
            dp_cell_warn_threshold: parts.dp_cell_warn_threshold,
            normalizer: parts.normalizer,
            sequence_aligner: parts.sequence_aligner,
            equivalence_resolver: parts.equivalence_resolver,
        }
    }

    /// Word-level diff of a hypothesis against a reference. Total: empty
    /// inputs give all-Missing, all-Extra or empty results.
    pub fn diff<S: AsRef<str>>(&self, hypothesis: &[S], reference: &[S]) -> Vec<DiffOp> {
        let hyp_keys = self.keys(hypothesis);
        let ref_keys = self.keys(reference);

        let cells = hyp_keys.len().saturating_mul(ref_keys.len());
        if cells > self.dp_cell_warn_threshold {
            tracing::warn!(
                hypothesis_words = hyp_keys.len(),
                reference_words = ref_keys.len(),
                cells,
                threshold = self.dp_cell_warn_threshold,
                "alignment table is large; diff may be slow"
            );
        }

        let opcodes = self.sequence_aligner.opcodes(&hyp_keys, &ref_keys);
        let raw = synthesize(&opcodes, hypothesis, reference);
        let ops = self.equivalence_resolver.resolve(raw, &hyp_keys, &ref_keys);
        tracing::debug!(
            hypothesis_words = hyp_keys.len(),
            reference_words = ref_keys.len(),
            opcodes = opcodes.len(),
            ops = ops.len(),
            "diff complete"
        );
        ops
    }

    /// [`WordDiffer::diff`] over whitespace-split texts.
    pub fn diff_text(&self, hypothesis: &str, reference: &str) -> Vec<DiffOp> {
        self.diff(&split_words(hypothesis), &split_words(reference))
    }

    /// Diff every image of a task at once, then split the result per image.
    ///
    /// Images are ordered by `sort_order`; ties keep input order. Each OCR
    /// word is one hypothesis token.
    pub fn diff_task<S: AsRef<str>>(
        &self,
        images: &[ImageWords],
        reference: &[S],
    ) -> Result<TaskDiff, DiffError> {
        let mut ordered: Vec<&ImageWords> = images.iter().collect();
        ordered.sort_by_key(|image| image.sort_order);

        let hypothesis: Vec<&str> = ordered
            .iter()
            .flat_map(|image| image.words.iter().map(|w| w.text.as_str()))
            .collect();
        let reference: Vec<&str> = reference.iter().map(AsRef::as_ref).collect();
        let global = self.diff(&hypothesis, &reference);

        let segments =
            ImageSegment::contiguous(ordered.iter().map(|image| (image.image_id, image.words.len())));
        let locals = split_by_segments(&global, &segments)?;

        let images: Vec<ImageDiff> = locals
            .into_iter()
            .zip(&ordered)
            .map(|(diff, image)| {
                let confidences = diff
                    .ops
                    .iter()
                    .map(|op| {
                        op.hypothesis_index
                            .and_then(|idx| image.words.get(idx))
                            .and_then(|w| w.confidence)
                    })
                    .collect();
                ImageDiff { diff, confidences }
            })
            .collect();

        tracing::info!(
            images = images.len(),
            hypothesis_words = hypothesis.len(),
            reference_words = reference.len(),
            ops = global.len(),
            "task diff complete"
        );
        Ok(TaskDiff {
            global,
            segments,
            images,
        })
    }

    fn keys<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        words
            .iter()
            .map(|w| self.normalizer.normalize(w.as_ref()))
            .collect()
    }
}

impl TaskDiff {
    pub fn report(&self) -> TaskReport {
        task_report(&self.global, self.images.iter().map(|image| &image.diff))
    }

    /// Annotations and label offsets for every image. `images` must hold the
    /// OCR words the diff was computed from.
    pub fn annotate(
        &self,
        images: &[ImageWords],
        layout: &LayoutConfig,
        ids: &mut AnnotationIdArena,
    ) -> Result<Vec<ImageAnnotations>, DiffError> {
        self.images
            .iter()
            .map(|image_diff| {
                let image_id = image_diff.diff.image_id;
                let words = images
                    .iter()
                    .find(|image| image.image_id == image_id)
                    .map(|image| image.words.as_slice())
                    .ok_or_else(|| {
                        DiffError::invalid_input(
                            "annotating task",
                            format!("no OCR words for image {image_id}"),
                        )
                    })?;
                let annotations = build_annotations(&image_diff.diff.ops, words, ids);
                let label_offsets = resolve_label_offsets(&annotations, layout);
                Ok(ImageAnnotations {
                    image_id,
                    annotations,
                    label_offsets,
                })
            })
            .collect()
    }
}
