use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpTag {
    Equal,
    Replace,
    /// Hypothesis-only run.
    Delete,
    /// Reference-only run.
    Insert,
}

/// Alignment instruction over `[h1, h2)` of the hypothesis and `[r1, r2)` of
/// the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Opcode {
    pub tag: OpTag,
    pub h1: usize,
    pub h2: usize,
    pub r1: usize,
    pub r2: usize,
}

/// Diagonal run of matches: `hyp[h..h+len] == reference[r..r+len]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MatchBlock {
    h: usize,
    r: usize,
    len: usize,
}

/// LCS alignment of two key sequences.
///
/// The returned opcodes partition `[0, hyp.len())` and `[0, reference.len())`
/// into contiguous runs, in order. Equal keys compare by value, not by
/// characters. O(m·n) time and memory.
pub fn lcs_opcodes<T: PartialEq>(hyp: &[T], reference: &[T]) -> Vec<Opcode> {
    let blocks = matching_blocks(hyp, reference);

    let mut opcodes = Vec::with_capacity(blocks.len() * 2);
    let mut h = 0usize;
    let mut r = 0usize;
    for block in blocks {
        let tag = match (h < block.h, r < block.r) {
            (true, true) => Some(OpTag::Replace),
            (true, false) => Some(OpTag::Delete),
            (false, true) => Some(OpTag::Insert),
            (false, false) => None,
        };
        if let Some(tag) = tag {
            opcodes.push(Opcode {
                tag,
                h1: h,
                h2: block.h,
                r1: r,
                r2: block.r,
            });
        }
        if block.len > 0 {
            opcodes.push(Opcode {
                tag: OpTag::Equal,
                h1: block.h,
                h2: block.h + block.len,
                r1: block.r,
                r2: block.r + block.len,
            });
        }
        h = block.h + block.len;
        r = block.r + block.len;
    }
    opcodes
}

/// Matched pairs merged into maximal diagonal blocks, terminated by a
/// zero-length sentinel at `(m, n)` so the trailing gap is always emitted.
fn matching_blocks<T: PartialEq>(hyp: &[T], reference: &[T]) -> Vec<MatchBlock> {
    let m = hyp.len();
    let n = reference.len();
    let pairs = backtrack_pairs(hyp, reference);

    let mut blocks: Vec<MatchBlock> = Vec::new();
    for (h, r) in pairs {
        if let Some(last) = blocks.last_mut() {
            if last.h + last.len == h && last.r + last.len == r {
                last.len += 1;
                continue;
            }
        }
        blocks.push(MatchBlock { h, r, len: 1 });
    }
    blocks.push(MatchBlock { h: m, r: n, len: 0 });
    blocks
}

/// Matched `(hyp, reference)` index pairs in ascending order.
///
/// Tie-break while backtracking: on a mismatch, step the hypothesis side when
/// `dp[i-1][j] >= dp[i][j-1]`. Opcode output for a given input depends on it.
fn backtrack_pairs<T: PartialEq>(hyp: &[T], reference: &[T]) -> Vec<(usize, usize)> {
    let m = hyp.len();
    let n = reference.len();
    if m == 0 || n == 0 {
        return Vec::new();
    }

    let width = n + 1;
    let mut dp = vec![0u32; (m + 1) * width];
    for i in 1..=m {
        let row = i * width;
        let prev_row = (i - 1) * width;
        for j in 1..=n {
            dp[row + j] = if hyp[i - 1] == reference[j - 1] {
                dp[prev_row + j - 1] + 1
            } else {
                dp[prev_row + j].max(dp[row + j - 1])
            };
        }
    }

    let mut pairs = Vec::with_capacity(dp[m * width + n] as usize);
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if hyp[i - 1] == reference[j - 1] {
            pairs.push((i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if dp[(i - 1) * width + j] >= dp[i * width + j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    pairs.reverse();
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(words: &str) -> Vec<&str> {
        words.split_whitespace().collect()
    }

    fn assert_partition(opcodes: &[Opcode], m: usize, n: usize) {
        let mut h = 0;
        let mut r = 0;
        for op in opcodes {
            assert_eq!(op.h1, h, "hypothesis gap before {op:?}");
            assert_eq!(op.r1, r, "reference gap before {op:?}");
            match op.tag {
                OpTag::Equal => assert_eq!(op.h2 - op.h1, op.r2 - op.r1),
                OpTag::Replace => assert!(op.h2 > op.h1 && op.r2 > op.r1),
                OpTag::Delete => assert!(op.h2 > op.h1 && op.r2 == op.r1),
                OpTag::Insert => assert!(op.h2 == op.h1 && op.r2 > op.r1),
            }
            h = op.h2;
            r = op.r2;
        }
        assert_eq!((h, r), (m, n));
    }

    fn opcode(tag: OpTag, h1: usize, h2: usize, r1: usize, r2: usize) -> Opcode {
        Opcode {
            tag,
            h1,
            h2,
            r1,
            r2,
        }
    }

    #[test]
    fn identical_sequences_are_one_equal_block() {
        let a = keys("the cat sat");
        let ops = lcs_opcodes(&a, &a);
        assert_eq!(ops, vec![opcode(OpTag::Equal, 0, 3, 0, 3)]);
    }

    #[test]
    fn both_empty_yields_no_opcodes() {
        let empty: Vec<&str> = Vec::new();
        assert!(lcs_opcodes(&empty, &empty).is_empty());
    }

    #[test]
    fn empty_hypothesis_is_single_insert() {
        let empty: Vec<&str> = Vec::new();
        let ops = lcs_opcodes(&empty, &keys("a b"));
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].tag, OpTag::Insert);
        assert_eq!((ops[0].r1, ops[0].r2), (0, 2));
    }

    #[test]
    fn empty_reference_is_single_delete() {
        let empty: Vec<&str> = Vec::new();
        let ops = lcs_opcodes(&keys("a b c"), &empty);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].tag, OpTag::Delete);
        assert_eq!((ops[0].h1, ops[0].h2), (0, 3));
    }

    #[test]
    fn single_substitution_is_replace_between_equals() {
        let ops = lcs_opcodes(&keys("the cat set on"), &keys("the cat sat on"));
        let tags: Vec<OpTag> = ops.iter().map(|o| o.tag).collect();
        assert_eq!(tags, [OpTag::Equal, OpTag::Replace, OpTag::Equal]);
        assert_eq!((ops[1].h1, ops[1].h2, ops[1].r1, ops[1].r2), (2, 3, 2, 3));
        assert_partition(&ops, 4, 4);
    }

    #[test]
    fn extra_and_missing_words() {
        let ops = lcs_opcodes(&keys("the big cat sat"), &keys("the cat sat"));
        let tags: Vec<OpTag> = ops.iter().map(|o| o.tag).collect();
        assert_eq!(tags, [OpTag::Equal, OpTag::Delete, OpTag::Equal]);

        let ops = lcs_opcodes(&keys("the sat"), &keys("the cat sat"));
        let tags: Vec<OpTag> = ops.iter().map(|o| o.tag).collect();
        assert_eq!(tags, [OpTag::Equal, OpTag::Insert, OpTag::Equal]);
    }

    #[test]
    fn tie_break_prefers_consuming_hypothesis() {
        // "a b" vs "b a": both single-element alignments have length 1. The
        // backtrack steps the hypothesis first, so "a" is matched.
        let ops = lcs_opcodes(&keys("a b"), &keys("b a"));
        assert_eq!(
            ops,
            vec![
                opcode(OpTag::Insert, 0, 0, 0, 1),
                opcode(OpTag::Equal, 0, 1, 1, 2),
                opcode(OpTag::Delete, 1, 2, 2, 2),
            ]
        );
    }

    #[test]
    fn gap_before_trailing_match_is_one_replace() {
        let ops = lcs_opcodes(&keys("because of you are in"), &keys("because you're in"));
        assert_eq!(
            ops,
            vec![
                opcode(OpTag::Equal, 0, 1, 0, 1),
                opcode(OpTag::Replace, 1, 4, 1, 2),
                opcode(OpTag::Equal, 4, 5, 2, 3),
            ]
        );
    }

    #[test]
    fn opcodes_partition_both_ranges() {
        let h = keys("x the quick brown fox jumps over y the lazy dog z");
        let r = keys("the quick red fox leaps over the very lazy dog");
        let ops = lcs_opcodes(&h, &r);
        assert_partition(&ops, h.len(), r.len());
    }

    #[test]
    fn works_over_non_string_elements() {
        let ops = lcs_opcodes(&[1, 2, 3], &[1, 3]);
        let tags: Vec<OpTag> = ops.iter().map(|o| o.tag).collect();
        assert_eq!(tags, [OpTag::Equal, OpTag::Delete, OpTag::Equal]);
    }
}
