use crate::alignment::equivalence::{are_number_equivalent, ContractionTable};
use crate::types::{DiffKind, DiffOp};

/// One side of the alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Hypothesis,
    Reference,
}

impl Side {
    fn other(self) -> Side {
        match self {
            Side::Hypothesis => Side::Reference,
            Side::Reference => Side::Hypothesis,
        }
    }

    fn index(self, op: &DiffOp) -> Option<usize> {
        match self {
            Side::Hypothesis => op.hypothesis_index,
            Side::Reference => op.reference_index,
        }
    }

    fn word(self, op: &DiffOp) -> &str {
        let word = match self {
            Side::Hypothesis => &op.hypothesis_word,
            Side::Reference => &op.reference_word,
        };
        word.as_deref().unwrap_or("")
    }

    fn token(self, op: &DiffOp) -> Option<(usize, String)> {
        self.index(op).map(|idx| (idx, self.word(op).to_string()))
    }

    /// Kind of an op that carries a token of this side only.
    fn orphan_kind(self) -> DiffKind {
        match self {
            Side::Hypothesis => DiffKind::Extra,
            Side::Reference => DiffKind::Missing,
        }
    }

    fn orphan(self, (index, word): (usize, String)) -> DiffOp {
        match self {
            Side::Hypothesis => DiffOp::extra(index, word),
            Side::Reference => DiffOp::missing(index, word),
        }
    }

    /// Correct or Wrong op with `this` on this side and `other` opposite.
    fn paired(self, kind: DiffKind, this: (usize, String), other: (usize, String)) -> DiffOp {
        let (hyp, reference) = match self {
            Side::Hypothesis => (this, other),
            Side::Reference => (other, this),
        };
        match kind {
            DiffKind::Correct => DiffOp::correct(hyp.0, reference.0, hyp.1, reference.1),
            _ => DiffOp::wrong(hyp.0, reference.0, hyp.1, reference.1),
        }
    }
}

/// Normalized comparison keys for both streams.
#[derive(Clone, Copy)]
struct Keys<'a> {
    hyp: &'a [String],
    reference: &'a [String],
}

impl<'a> Keys<'a> {
    fn of(&self, side: Side, op: &DiffOp) -> &'a str {
        let keys = match side {
            Side::Hypothesis => self.hyp,
            Side::Reference => self.reference,
        };
        side.index(op)
            .and_then(|idx| keys.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Rewrite Wrong ops that are linguistically correct.
///
/// For each Wrong op, in order:
/// - the two keys are directly equivalent (same contraction family, or the
///   same number when `number_equivalence` is set): the op becomes Correct;
/// - the hypothesis key is a contraction whose expansion continues into the
///   reference words of the following non-Correct run: the trigger and the
///   consumed ops merge into one Correct op carrying the joined phrase;
/// - the same with the reference key as the contraction, consuming
///   hypothesis words.
///
/// When the phrase only matches without the trigger's own word, that word is
/// re-emitted unpaired and the merge starts at the next op. Tokens freed from
/// consumed Wrong ops pair with the first unused Missing/Extra op of the run,
/// or are re-emitted unpaired. Matching is greedy, first candidate wins, and
/// never looks past a Correct op. Index monotonicity is preserved.
pub fn resolve_contractions(
    ops: Vec<DiffOp>,
    hyp_keys: &[String],
    ref_keys: &[String],
    number_equivalence: bool,
) -> Vec<DiffOp> {
    let table = ContractionTable::get();
    let keys = Keys {
        hyp: hyp_keys,
        reference: ref_keys,
    };

    let mut out = Vec::with_capacity(ops.len());
    let mut i = 0usize;
    while i < ops.len() {
        let op = &ops[i];
        if op.kind != DiffKind::Wrong {
            out.push(op.clone());
            i += 1;
            continue;
        }

        let hyp_key = keys.of(Side::Hypothesis, op);
        let ref_key = keys.of(Side::Reference, op);
        if table.are_equivalent(&[hyp_key], &[ref_key])
            || (number_equivalence && are_number_equivalent(hyp_key, ref_key))
        {
            tracing::debug!(
                hypothesis = hyp_key,
                reference = ref_key,
                "contractions: direct equivalence"
            );
            let mut correct = op.clone();
            correct.kind = DiffKind::Correct;
            out.push(correct);
            i += 1;
            continue;
        }

        let run_end = ops[i + 1..]
            .iter()
            .position(DiffOp::is_correct)
            .map_or(ops.len(), |p| i + 1 + p);
        let run = &ops[i + 1..run_end];

        let rewritten = [Side::Hypothesis, Side::Reference]
            .into_iter()
            .filter(|&side| table.is_contraction(keys.of(side, op)))
            .find_map(|side| merge_run(table, keys, op, run, side));

        match rewritten {
            Some(rewritten) => {
                out.extend(rewritten);
                i = run_end;
            }
            None => {
                out.push(op.clone());
                i += 1;
            }
        }
    }
    out
}

/// Try to absorb the expansion of the trigger's `contraction_side` key from
/// the run. Returns the rewritten trigger + run on success.
fn merge_run(
    table: &ContractionTable,
    keys: Keys<'_>,
    trigger: &DiffOp,
    run: &[DiffOp],
    contraction_side: Side,
) -> Option<Vec<DiffOp>> {
    let spread = contraction_side.other();
    let bearing: Vec<usize> = (0..run.len())
        .filter(|&k| spread.index(&run[k]).is_some())
        .collect();
    if bearing.is_empty() {
        return None;
    }

    let contraction = [keys.of(contraction_side, trigger)];
    let lead = keys.of(spread, trigger);

    for take in 1..=bearing.len() {
        let mut phrase = Vec::with_capacity(take + 1);
        phrase.push(lead);
        phrase.extend(bearing[..take].iter().map(|&k| keys.of(spread, &run[k])));
        if table.are_equivalent(&contraction, &phrase) {
            tracing::debug!(
                contraction = contraction[0],
                phrase = %phrase.join(" "),
                side = ?contraction_side,
                "contractions: merged run"
            );
            return rebuild(trigger, run, &bearing[..take], contraction_side, true);
        }
    }

    for take in 1..=bearing.len() {
        let phrase: Vec<&str> = bearing[..take]
            .iter()
            .map(|&k| keys.of(spread, &run[k]))
            .collect();
        if table.are_equivalent(&contraction, &phrase) {
            tracing::debug!(
                contraction = contraction[0],
                phrase = %phrase.join(" "),
                unpaired = lead,
                side = ?contraction_side,
                "contractions: merged run after unpaired word"
            );
            return rebuild(trigger, run, &bearing[..take], contraction_side, false);
        }
    }

    None
}

/// Emit the merged Correct op, re-pair freed tokens and keep the rest of the
/// run. Ops are ordered by the run slot they came from (0 = trigger).
fn rebuild(
    trigger: &DiffOp,
    run: &[DiffOp],
    taken: &[usize],
    contraction_side: Side,
    include_lead: bool,
) -> Option<Vec<DiffOp>> {
    let spread = contraction_side.other();
    let mut consumed = vec![false; run.len()];
    for &k in taken {
        consumed[k] = true;
    }
    let released: Vec<usize> = taken
        .iter()
        .copied()
        .filter(|&k| run[k].kind == DiffKind::Wrong)
        .collect();

    let mut entries: Vec<(usize, DiffOp)> = Vec::with_capacity(run.len() + 2);
    let taken_words = taken.iter().map(|&k| spread.word(&run[k]));
    let (spread_index, phrase) = if include_lead {
        let phrase = std::iter::once(spread.word(trigger))
            .chain(taken_words)
            .collect::<Vec<_>>()
            .join(" ");
        (spread.index(trigger)?, phrase)
    } else {
        entries.push((0, spread.orphan(spread.token(trigger)?)));
        let phrase = taken_words.collect::<Vec<_>>().join(" ");
        (spread.index(&run[taken[0]])?, phrase)
    };
    entries.push((
        0,
        contraction_side.paired(
            DiffKind::Correct,
            contraction_side.token(trigger)?,
            (spread_index, phrase),
        ),
    ));

    // Slots that still emit an op after the rewrite.
    let mut occupied: Vec<bool> = consumed.iter().map(|c| !c).collect();
    for &k in &released {
        occupied[k] = true;
    }

    let partner_kind = spread.orphan_kind();
    let mut used = vec![false; run.len()];
    for &w in &released {
        let freed = contraction_side.token(&run[w])?;
        let partner = (0..run.len())
            .find(|&p| !consumed[p] && !used[p] && run[p].kind == partner_kind)
            .filter(|&p| nothing_between(&occupied, w, p));
        match partner.and_then(|p| spread.token(&run[p]).map(|token| (p, token))) {
            Some((p, partner_token)) => {
                used[p] = true;
                entries.push((
                    w.max(p) + 1,
                    contraction_side.paired(DiffKind::Wrong, freed, partner_token),
                ));
            }
            None => entries.push((w + 1, contraction_side.orphan(freed))),
        }
    }

    for (k, op) in run.iter().enumerate() {
        if !consumed[k] && !used[k] {
            entries.push((k + 1, op.clone()));
        }
    }

    entries.sort_by_key(|(slot, _)| *slot);
    Some(entries.into_iter().map(|(_, op)| op).collect())
}

fn nothing_between(occupied: &[bool], a: usize, b: usize) -> bool {
    let (lo, hi) = (a.min(b), a.max(b));
    !(lo + 1..hi).any(|k| occupied[k])
}
