use crate::annotation::{Annotation, AnnotationIdArena, ErrorType};
use crate::types::{BBox, DiffKind, DiffOp, OcrWord};

const MIN_MISSING_WIDTH: f64 = 10.0;
/// Width of a one-sided missing-word box relative to the neighbour's height.
const MISSING_WIDTH_RATIO: f64 = 0.6;
const MISSING_SIDE_GAP: f64 = 2.0;

/// One annotation per non-Correct op of a single image.
///
/// `ops` are local to the image and `words` are its OCR words, indexed by
/// `hypothesis_index`.
pub fn build_annotations(
    ops: &[DiffOp],
    words: &[OcrWord],
    ids: &mut AnnotationIdArena,
) -> Vec<Annotation> {
    let mut annotations = Vec::new();
    for (position, op) in ops.iter().enumerate() {
        let Some(error_type) = ErrorType::from_kind(op.kind) else {
            continue;
        };
        let bbox = match op.hypothesis_index.and_then(|idx| words.get(idx)) {
            Some(word) => word.bbox,
            None if op.kind == DiffKind::Missing => infer_missing_bbox(ops, position, words),
            None => BBox::default(),
        };
        annotations.push(Annotation {
            id: ids.next_id(),
            word_index: op.hypothesis_index,
            hypothesis_word: op.hypothesis_word.clone(),
            reference_word: op.reference_word.clone(),
            error_type,
            shape: error_type.shape(),
            bbox,
            is_auto: true,
            is_user_corrected: false,
            label_position: None,
            label_font_size: None,
        });
    }
    annotations
}

/// Box for a missing word from the OCR words around it.
///
/// Between two neighbours the box spans the horizontal gap (at least
/// `MIN_MISSING_WIDTH`, centred) and both neighbours vertically. Next to a
/// single neighbour it sits `MISSING_SIDE_GAP` px to that side. With no
/// neighbour the box is all zero.
pub(crate) fn infer_missing_bbox(ops: &[DiffOp], position: usize, words: &[OcrWord]) -> BBox {
    let word_of = |op: &DiffOp| op.hypothesis_index.and_then(|idx| words.get(idx));
    let prev = ops
        .get(..position)
        .unwrap_or(ops)
        .iter()
        .rev()
        .find_map(word_of)
        .map(|w| w.bbox);
    let next = ops
        .get(position + 1..)
        .unwrap_or(&[])
        .iter()
        .find_map(word_of)
        .map(|w| w.bbox);

    match (prev, next) {
        (Some(prev), Some(next)) => {
            let (mut x1, mut x2) = (prev.x2, next.x1);
            if x2 - x1 < MIN_MISSING_WIDTH {
                let mid = (x1 + x2) / 2.0;
                x1 = mid - MIN_MISSING_WIDTH / 2.0;
                x2 = mid + MIN_MISSING_WIDTH / 2.0;
            }
            BBox::new(x1, prev.y1.min(next.y1), x2, prev.y2.max(next.y2))
        }
        (Some(prev), None) => {
            let x1 = prev.x2 + MISSING_SIDE_GAP;
            BBox::new(x1, prev.y1, x1 + side_width(&prev), prev.y2)
        }
        (None, Some(next)) => {
            let x2 = next.x1 - MISSING_SIDE_GAP;
            BBox::new(x2 - side_width(&next), next.y1, x2, next.y2)
        }
        (None, None) => BBox::default(),
    }
}

fn side_width(neighbour: &BBox) -> f64 {
    (neighbour.height() * MISSING_WIDTH_RATIO).max(MIN_MISSING_WIDTH)
}
