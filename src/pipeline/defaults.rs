use crate::alignment::contractions::resolve_contractions;
use crate::alignment::lcs::{lcs_opcodes, Opcode};
use crate::alignment::normalize::normalize_word;
use crate::pipeline::traits::{EquivalenceResolver, Normalizer, SequenceAligner};
use crate::types::DiffOp;

pub struct EdgePunctuationNormalizer;

impl Normalizer for EdgePunctuationNormalizer {
    fn normalize(&self, word: &str) -> String {
        normalize_word(word)
    }
}

pub struct LcsSequenceAligner;

impl SequenceAligner for LcsSequenceAligner {
    fn opcodes(&self, hyp_keys: &[String], ref_keys: &[String]) -> Vec<Opcode> {
        lcs_opcodes(hyp_keys, ref_keys)
    }
}

pub struct ContractionResolver {
    pub number_equivalence: bool,
}

impl EquivalenceResolver for ContractionResolver {
    fn resolve(&self, ops: Vec<DiffOp>, hyp_keys: &[String], ref_keys: &[String]) -> Vec<DiffOp> {
        resolve_contractions(ops, hyp_keys, ref_keys, self.number_equivalence)
    }
}
