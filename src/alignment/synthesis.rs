use crate::alignment::lcs::{OpTag, Opcode};
use crate::alignment::normalize::strip_display;
use crate::types::DiffOp;

/// Expand opcodes into one DiffOp per token position.
///
/// `hyp_words` and `ref_words` are the original display tokens; attached words
/// are edge-stripped for presentation. Replace blocks pair positions
/// index-by-index and spill any surplus as Extra or Missing.
pub fn synthesize<S: AsRef<str>>(
    opcodes: &[Opcode],
    hyp_words: &[S],
    ref_words: &[S],
) -> Vec<DiffOp> {
    let hyp = |i: usize| strip_display(hyp_words[i].as_ref());
    let reference = |j: usize| strip_display(ref_words[j].as_ref());

    let mut ops = Vec::new();
    for op in opcodes {
        match op.tag {
            OpTag::Equal => {
                for (h, r) in (op.h1..op.h2).zip(op.r1..op.r2) {
                    ops.push(DiffOp::correct(h, r, hyp(h), reference(r)));
                }
            }
            OpTag::Replace => {
                let h_len = op.h2 - op.h1;
                let r_len = op.r2 - op.r1;
                for k in 0..h_len.max(r_len) {
                    let h = op.h1 + k;
                    let r = op.r1 + k;
                    if k < h_len && k < r_len {
                        ops.push(DiffOp::wrong(h, r, hyp(h), reference(r)));
                    } else if k < h_len {
                        ops.push(DiffOp::extra(h, hyp(h)));
                    } else {
                        ops.push(DiffOp::missing(r, reference(r)));
                    }
                }
            }
            OpTag::Delete => {
                for h in op.h1..op.h2 {
                    ops.push(DiffOp::extra(h, hyp(h)));
                }
            }
            OpTag::Insert => {
                for r in op.r1..op.r2 {
                    ops.push(DiffOp::missing(r, reference(r)));
                }
            }
        }
    }
    ops
}
