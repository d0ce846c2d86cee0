use handwrite_diff::alignment::lcs::lcs_opcodes;
use handwrite_diff::alignment::normalize::normalize_all;
use handwrite_diff::alignment::synthesis::synthesize;
use handwrite_diff::{
    merge_segments, resolve_label_offsets, split_by_segments, Annotation, AnnotationShape, BBox,
    DiffKind, DiffOp, ErrorType, ImageSegment, LayoutConfig, Point, WordDiffer, WordDifferBuilder,
};
use rand::prelude::SliceRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CASES: usize = 400;
const SEED: u64 = 7;

/// Small vocabulary so random streams share words and hit contractions.
const VOCAB: &[&str] = &[
    "I", "will", "I'll", "it", "is", "has", "it's", "do", "not", "don't", "can", "can't",
    "cannot", "you", "are", "you're", "of", "the", "cat", "sat", "3", "three", "first", "1st",
    "mat,", "Ill",
];

fn random_words(rng: &mut StdRng, max_len: usize) -> Vec<&'static str> {
    let len = rng.gen_range(0..=max_len);
    (0..len)
        .map(|_| *VOCAB.choose(rng).unwrap_or(&"the"))
        .collect()
}

fn differ() -> WordDiffer {
    WordDifferBuilder::default().build()
}

fn assert_monotonic(ops: &[DiffOp], hyp_len: usize, ref_len: usize, context: &str) {
    let mut last_h: Option<usize> = None;
    let mut last_r: Option<usize> = None;
    for op in ops {
        match op.kind {
            DiffKind::Correct | DiffKind::Wrong => {
                assert!(op.hypothesis_index.is_some() && op.reference_index.is_some(), "{context}");
            }
            DiffKind::Extra => {
                assert!(op.hypothesis_index.is_some() && op.reference_index.is_none(), "{context}");
            }
            DiffKind::Missing => {
                assert!(op.hypothesis_index.is_none() && op.reference_index.is_some(), "{context}");
            }
        }
        if let Some(h) = op.hypothesis_index {
            assert!(h < hyp_len, "{context}: hypothesis index {h} out of range");
            assert!(last_h.map_or(true, |prev| h > prev), "{context}: {ops:?}");
            last_h = Some(h);
        }
        if let Some(r) = op.reference_index {
            assert!(r < ref_len, "{context}: reference index {r} out of range");
            assert!(last_r.map_or(true, |prev| r > prev), "{context}: {ops:?}");
            last_r = Some(r);
        }
    }
}

#[test]
fn identity_is_all_correct() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let differ = differ();
    for _ in 0..CASES {
        let words = random_words(&mut rng, 16);
        let ops = differ.diff(&words, &words);
        assert_eq!(ops.len(), words.len());
        assert!(ops.iter().all(DiffOp::is_correct), "{words:?}");
    }
}

#[test]
fn raw_diff_conserves_tokens() {
    let mut rng = StdRng::seed_from_u64(SEED + 1);
    for _ in 0..CASES {
        let hyp = random_words(&mut rng, 12);
        let reference = random_words(&mut rng, 12);
        let opcodes = lcs_opcodes(&normalize_all(&hyp), &normalize_all(&reference));
        let ops = synthesize(&opcodes, &hyp, &reference);

        let with_hyp = ops.iter().filter(|o| o.hypothesis_index.is_some()).count();
        let with_ref = ops.iter().filter(|o| o.reference_index.is_some()).count();
        assert_eq!(with_hyp, hyp.len(), "{hyp:?} vs {reference:?}");
        assert_eq!(with_ref, reference.len(), "{hyp:?} vs {reference:?}");
        assert_monotonic(&ops, hyp.len(), reference.len(), "raw");
    }
}

#[test]
fn resolved_diff_keeps_indices_monotonic() {
    let mut rng = StdRng::seed_from_u64(SEED + 2);
    let differ = differ();
    for _ in 0..CASES {
        let hyp = random_words(&mut rng, 12);
        let reference = random_words(&mut rng, 12);
        let ops = differ.diff(&hyp, &reference);
        let context = format!("{hyp:?} vs {reference:?}");
        assert_monotonic(&ops, hyp.len(), reference.len(), &context);
    }
}

#[test]
fn split_then_merge_restores_global_diff() {
    let mut rng = StdRng::seed_from_u64(SEED + 3);
    let differ = differ();
    for _ in 0..CASES {
        let hyp = random_words(&mut rng, 14);
        let reference = random_words(&mut rng, 14);
        let global = differ.diff(&hyp, &reference);

        let mut lengths = Vec::new();
        let mut remaining = hyp.len();
        let images = rng.gen_range(1..=4u64);
        for image_id in 0..images {
            let length = if image_id + 1 == images {
                remaining
            } else {
                rng.gen_range(0..=remaining)
            };
            remaining -= length;
            lengths.push((image_id, length));
        }
        let segments = ImageSegment::contiguous(lengths);

        let locals = split_by_segments(&global, &segments).expect("split");
        assert_eq!(
            locals.iter().map(|l| l.ops.len()).sum::<usize>(),
            global.len()
        );
        for (local, segment) in locals.iter().zip(&segments) {
            for op in &local.ops {
                if let Some(h) = op.hypothesis_index {
                    assert!(h < segment.length);
                }
            }
        }
        let merged = merge_segments(&locals, &segments).expect("merge");
        assert_eq!(merged, global);
    }
}

#[test]
fn pinned_labels_never_move() {
    let mut rng = StdRng::seed_from_u64(SEED + 4);
    let config = LayoutConfig::default();
    for _ in 0..CASES / 4 {
        let count = rng.gen_range(1..12);
        let annotations: Vec<Annotation> = (0..count)
            .map(|id| {
                let x = rng.gen_range(0.0..120.0);
                let y = rng.gen_range(0.0..60.0);
                let pinned = rng.gen_bool(0.3);
                Annotation {
                    id,
                    word_index: Some(id as usize),
                    hypothesis_word: Some("cot".to_string()),
                    reference_word: Some("cat".to_string()),
                    error_type: ErrorType::Wrong,
                    shape: AnnotationShape::Ellipse,
                    bbox: BBox::new(x, y + 100.0, x + 50.0, y + 140.0),
                    is_auto: !pinned,
                    is_user_corrected: pinned,
                    label_position: pinned.then(|| Point::new(x + 25.0, y + 90.0)),
                    label_font_size: None,
                }
            })
            .collect();

        let offsets = resolve_label_offsets(&annotations, &config);
        assert_eq!(offsets.as_slice().len(), annotations.len());
        for (annotation, dy) in annotations.iter().zip(offsets.as_slice()) {
            assert!(*dy <= 0.0);
            if annotation.is_pinned() {
                assert_eq!(*dy, 0.0);
            }
        }
    }
}
