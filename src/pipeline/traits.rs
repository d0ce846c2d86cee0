use crate::alignment::lcs::Opcode;
use crate::types::DiffOp;

/// Word → comparison key.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, word: &str) -> String;
}

pub trait SequenceAligner: Send + Sync {
    /// Opcodes partitioning both key sequences, in order.
    fn opcodes(&self, hyp_keys: &[String], ref_keys: &[String]) -> Vec<Opcode>;
}

/// Rewrites a raw diff whose Wrong ops may be linguistically correct.
/// Implementations must keep indices monotonic.
pub trait EquivalenceResolver: Send + Sync {
    fn resolve(&self, ops: Vec<DiffOp>, hyp_keys: &[String], ref_keys: &[String]) -> Vec<DiffOp>;
}
