pub mod alignment;
pub mod annotation;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

pub use alignment::report::{DiffSummary, TaskReport};
pub use alignment::split::{merge_segments, split_by_segments, LocalDiff};
pub use annotation::overlap::{resolve_label_offsets, LabelOffsets};
pub use annotation::{Annotation, AnnotationIdArena, AnnotationShape, ErrorType};
pub use config::{DiffConfig, LayoutConfig};
pub use error::DiffError;
pub use pipeline::builder::WordDifferBuilder;
pub use pipeline::runtime::{ImageAnnotations, ImageDiff, TaskDiff, WordDiffer};
pub use pipeline::traits::{EquivalenceResolver, Normalizer, SequenceAligner};
pub use types::{BBox, DiffKind, DiffOp, ImageSegment, ImageWords, OcrWord, Point, Token};
