pub mod contractions;
pub mod equivalence;
pub mod lcs;
pub mod normalize;
pub mod report;
pub mod split;
pub mod synthesis;
