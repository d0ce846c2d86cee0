use std::path::Path;

use crate::config::DiffConfig;
use crate::error::DiffError;
use crate::pipeline::defaults::{ContractionResolver, EdgePunctuationNormalizer, LcsSequenceAligner};
use crate::pipeline::runtime::{WordDiffer, WordDifferParts};
use crate::pipeline::traits::{EquivalenceResolver, Normalizer, SequenceAligner};

pub struct WordDifferBuilder {
    config: DiffConfig,
    normalizer: Option<Box<dyn Normalizer>>,
    sequence_aligner: Option<Box<dyn SequenceAligner>>,
    equivalence_resolver: Option<Box<dyn EquivalenceResolver>>,
}

impl WordDifferBuilder {
    pub fn new(config: DiffConfig) -> Self {
        Self {
            config,
            normalizer: None,
            sequence_aligner: None,
            equivalence_resolver: None,
        }
    }

    /// Builder over a JSON [`DiffConfig`] file.
    pub fn from_config_path(path: &Path) -> Result<Self, DiffError> {
        Ok(Self::new(DiffConfig::load(path)?))
    }

    pub fn with_normalizer(mut self, normalizer: Box<dyn Normalizer>) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    pub fn with_sequence_aligner(mut self, sequence_aligner: Box<dyn SequenceAligner>) -> Self {
        self.sequence_aligner = Some(sequence_aligner);
        self
    }

    pub fn with_equivalence_resolver(
        mut self,
        equivalence_resolver: Box<dyn EquivalenceResolver>,
    ) -> Self {
        self.equivalence_resolver = Some(equivalence_resolver);
        self
    }

    pub fn build(self) -> WordDiffer {
        let number_equivalence = self.config.number_equivalence;
        WordDiffer::from_parts(WordDifferParts {
            dp_cell_warn_threshold: self.config.dp_cell_warn_threshold,
            normalizer: self
                .normalizer
                .unwrap_or_else(|| Box::new(EdgePunctuationNormalizer)),
            sequence_aligner: self
                .sequence_aligner
                .unwrap_or_else(|| Box::new(LcsSequenceAligner)),
            equivalence_resolver: self.equivalence_resolver.unwrap_or_else(|| {
                Box::new(ContractionResolver { number_equivalence })
            }),
        })
    }
}

impl Default for WordDifferBuilder {
    fn default() -> Self {
        Self::new(DiffConfig::default())
    }
}
