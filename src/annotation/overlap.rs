use std::cmp::Ordering;

use serde::Serialize;

use crate::annotation::{Annotation, AnnotationShape};
use crate::config::LayoutConfig;

/// Estimated label box, top-left origin, before any offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelRect {
    /// Position of the owning annotation in the input slice.
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub pinned: bool,
}

impl LabelRect {
    fn overlaps(&self, dy: f64, other: &LabelRect, other_dy: f64) -> bool {
        let (ay, by) = (self.y + dy, other.y + other_dy);
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && ay < by + other.height
            && ay + self.height > by
    }
}

/// Vertical label offset per annotation, in input order. Negative is up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelOffsets {
    offsets: Vec<f64>,
}

impl LabelOffsets {
    pub fn get(&self, index: usize) -> f64 {
        self.offsets.get(index).copied().unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.offsets
    }

    /// `(index, offset)` for every label that moved.
    pub fn moved(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.offsets
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, dy)| dy != 0.0)
    }
}

/// Font size a renderer uses for this annotation's label.
pub fn effective_font_size(annotation: &Annotation, config: &LayoutConfig) -> f64 {
    match annotation.label_font_size {
        Some(size) if size > 0.0 => size,
        _ => config.default_font_size(annotation.bbox.height()),
    }
}

/// Label box of one annotation, or `None` when it draws no label.
pub fn label_rect(index: usize, annotation: &Annotation, config: &LayoutConfig) -> Option<LabelRect> {
    let text = annotation.reference_word.as_deref().filter(|w| !w.is_empty())?;
    if annotation.bbox.is_degenerate() && annotation.label_position.is_none() {
        return None;
    }

    let font_size = effective_font_size(annotation, config);
    let width = text.chars().count() as f64 * font_size * config.width_factor;
    let height = font_size;

    let (center_x, baseline) = match annotation.label_position {
        Some(pin) => (pin.x, pin.y),
        None => {
            let bbox = &annotation.bbox;
            let baseline = match annotation.shape {
                AnnotationShape::Caret => bbox.y2 - config.caret_size - config.caret_label_gap,
                AnnotationShape::Ellipse | AnnotationShape::Underline => {
                    bbox.y1 - config.text_gap
                }
            };
            (bbox.center_x(), baseline)
        }
    };

    Some(LabelRect {
        index,
        x: center_x - width / 2.0,
        y: baseline - height,
        width,
        height,
        pinned: annotation.is_pinned(),
    })
}

/// Offsets that push overlapping labels of one image apart.
pub fn resolve_label_offsets(annotations: &[Annotation], config: &LayoutConfig) -> LabelOffsets {
    let rects: Vec<LabelRect> = annotations
        .iter()
        .enumerate()
        .filter_map(|(index, annotation)| label_rect(index, annotation, config))
        .collect();
    resolve_overlaps(rects, annotations.len(), config)
}

/// Pairwise scan in `(y, x)` order. Of two overlapping labels the later one
/// moves up by its height plus `label_gap`; if it is pinned the earlier one
/// moves instead, and two pinned labels stay put. Stops after a pass with no
/// move or after `max_iterations` passes, keeping any residual overlap.
/// Rects whose index is not below `count` are ignored.
pub(crate) fn resolve_overlaps(
    mut rects: Vec<LabelRect>,
    count: usize,
    config: &LayoutConfig,
) -> LabelOffsets {
    let mut offsets = vec![0.0; count];
    rects.retain(|rect| rect.index < count);
    if rects.len() <= 1 {
        return LabelOffsets { offsets };
    }

    rects.sort_by(|a, b| match a.y.total_cmp(&b.y) {
        Ordering::Equal => a.x.total_cmp(&b.x),
        other => other,
    });

    let mut converged = false;
    for _ in 0..config.max_iterations {
        let mut adjusted = false;
        for i in 0..rects.len() {
            for j in i + 1..rects.len() {
                let (a, b) = (&rects[i], &rects[j]);
                if !a.overlaps(offsets[a.index], b, offsets[b.index]) {
                    continue;
                }
                let mover = if !b.pinned {
                    b
                } else if !a.pinned {
                    a
                } else {
                    continue;
                };
                offsets[mover.index] -= mover.height + config.label_gap;
                adjusted = true;
            }
        }
        if !adjusted {
            converged = true;
            break;
        }
    }

    if !converged {
        tracing::debug!(
            labels = rects.len(),
            max_iterations = config.max_iterations,
            "overlap: layout did not converge, keeping residual overlap"
        );
    }
    LabelOffsets { offsets }
}
