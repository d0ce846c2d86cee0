pub mod construct;
pub mod overlap;

use serde::{Deserialize, Serialize};

use crate::types::{BBox, DiffKind, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorType {
    Wrong = 0,
    Extra = 1,
    Missing = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationShape {
    Ellipse,
    Underline,
    Caret,
}

/// Shape drawn for each error type, indexed by `ErrorType as usize`.
const SHAPE_TABLE: [AnnotationShape; 3] = [
    AnnotationShape::Ellipse,
    AnnotationShape::Underline,
    AnnotationShape::Caret,
];

impl ErrorType {
    /// `None` for Correct ops, which are never annotated.
    pub fn from_kind(kind: DiffKind) -> Option<ErrorType> {
        match kind {
            DiffKind::Correct => None,
            DiffKind::Wrong => Some(ErrorType::Wrong),
            DiffKind::Extra => Some(ErrorType::Extra),
            DiffKind::Missing => Some(ErrorType::Missing),
        }
    }

    pub fn shape(self) -> AnnotationShape {
        SHAPE_TABLE[self as usize]
    }
}

/// A marked error on one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: u64,
    /// Local hypothesis index; `None` for missing words.
    pub word_index: Option<usize>,
    pub hypothesis_word: Option<String>,
    pub reference_word: Option<String>,
    pub error_type: ErrorType,
    pub shape: AnnotationShape,
    pub bbox: BBox,
    pub is_auto: bool,
    pub is_user_corrected: bool,
    /// Label anchor pinned by a human editor: x centre, y baseline.
    pub label_position: Option<Point>,
    pub label_font_size: Option<f64>,
}

impl Annotation {
    pub fn is_pinned(&self) -> bool {
        self.label_position.is_some()
    }
}

/// Mints annotation ids. Owned by whoever persists the annotations, so ids
/// stay unique across every image of a task.
#[derive(Debug, Clone, Default)]
pub struct AnnotationIdArena {
    next: u64,
}

impl AnnotationIdArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue after ids already handed out, e.g. loaded from storage.
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}
