use serde::Serialize;

use crate::error::DiffError;
use crate::types::{DiffOp, ImageSegment};

/// Ops of one image, hypothesis indices local to the image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalDiff {
    pub image_id: u64,
    pub ops: Vec<DiffOp>,
}

/// Distribute a global diff over the images that produced the hypothesis.
///
/// Hypothesis-bearing ops go to the segment containing their index. A Missing
/// op follows the nearest preceding hypothesis-bearing op, or the nearest
/// following one when it leads the stream, or the first segment when there is
/// no hypothesis at all. Concatenating the results in segment order and
/// rebasing gives back `ops`.
pub fn split_by_segments(
    ops: &[DiffOp],
    segments: &[ImageSegment],
) -> Result<Vec<LocalDiff>, DiffError> {
    let total = validate_segments(segments)?;
    if segments.is_empty() {
        if ops.is_empty() {
            return Ok(Vec::new());
        }
        return Err(DiffError::invalid_input(
            "splitting diff",
            format!("{} diff ops but no image segments", ops.len()),
        ));
    }

    let mut owners: Vec<Option<usize>> = Vec::with_capacity(ops.len());
    for op in ops {
        let owner = match op.hypothesis_index {
            Some(h) if h >= total => {
                return Err(DiffError::invalid_input(
                    "splitting diff",
                    format!("hypothesis index {h} outside segments covering {total} tokens"),
                ));
            }
            Some(h) => Some(segments.partition_point(|s| s.end_offset() <= h)),
            None => None,
        };
        owners.push(owner);
    }

    let mut last = None;
    for owner in owners.iter_mut() {
        match owner {
            Some(_) => last = *owner,
            None => *owner = last,
        }
    }
    let leading = owners.iter().flatten().next().copied().unwrap_or(0);

    let mut locals: Vec<LocalDiff> = segments
        .iter()
        .map(|s| LocalDiff {
            image_id: s.image_id,
            ops: Vec::new(),
        })
        .collect();
    for (op, owner) in ops.iter().zip(owners) {
        let k = owner.unwrap_or(leading);
        locals[k].ops.push(op.localized(segments[k].start_offset));
    }

    tracing::debug!(
        ops = ops.len(),
        images = segments.len(),
        hypothesis_tokens = total,
        "split: distributed diff over images"
    );
    Ok(locals)
}

/// Inverse of [`split_by_segments`].
pub fn merge_segments(
    locals: &[LocalDiff],
    segments: &[ImageSegment],
) -> Result<Vec<DiffOp>, DiffError> {
    validate_segments(segments)?;
    if locals.len() != segments.len() {
        return Err(DiffError::invalid_input(
            "merging diff",
            format!(
                "{} local diffs for {} segments",
                locals.len(),
                segments.len()
            ),
        ));
    }

    let mut ops = Vec::with_capacity(locals.iter().map(|l| l.ops.len()).sum());
    for (local, segment) in locals.iter().zip(segments) {
        if local.image_id != segment.image_id {
            return Err(DiffError::invalid_input(
                "merging diff",
                format!(
                    "local diff for image {} where segment expects image {}",
                    local.image_id, segment.image_id
                ),
            ));
        }
        ops.extend(local.ops.iter().map(|op| op.globalized(segment.start_offset)));
    }
    Ok(ops)
}

/// Segments must tile `[0, total)` in order. Returns `total`.
fn validate_segments(segments: &[ImageSegment]) -> Result<usize, DiffError> {
    let mut expected = 0usize;
    for segment in segments {
        if segment.start_offset != expected {
            return Err(DiffError::invalid_input(
                "validating segments",
                format!(
                    "segment for image {} starts at {} but previous segments end at {expected}",
                    segment.image_id, segment.start_offset
                ),
            ));
        }
        expected = segment.end_offset();
    }
    Ok(expected)
}
