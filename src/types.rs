use serde::{Deserialize, Serialize};

/// One word of the hypothesis (OCR) or reference stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub display: String,
    /// 0-based position in its stream.
    pub index: usize,
}

impl Token {
    pub fn sequence<S: AsRef<str>>(words: &[S]) -> Vec<Token> {
        words
            .iter()
            .enumerate()
            .map(|(index, w)| Token {
                display: w.as_ref().to_string(),
                index,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Correct,
    Wrong,
    /// Present in the hypothesis only.
    Extra,
    /// Present in the reference only.
    Missing,
}

impl DiffKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Wrong => "wrong",
            Self::Extra => "extra",
            Self::Missing => "missing",
        }
    }
}

/// One classified unit of a diff.
///
/// Correct and Wrong carry both indices, Extra only `hypothesis_index`,
/// Missing only `reference_index`. Use the constructors to keep that shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOp {
    pub kind: DiffKind,
    pub hypothesis_index: Option<usize>,
    pub reference_index: Option<usize>,
    pub hypothesis_word: Option<String>,
    pub reference_word: Option<String>,
}

impl DiffOp {
    pub fn correct(
        hypothesis_index: usize,
        reference_index: usize,
        hypothesis_word: impl Into<String>,
        reference_word: impl Into<String>,
    ) -> Self {
        Self::paired(
            DiffKind::Correct,
            hypothesis_index,
            reference_index,
            hypothesis_word.into(),
            reference_word.into(),
        )
    }

    pub fn wrong(
        hypothesis_index: usize,
        reference_index: usize,
        hypothesis_word: impl Into<String>,
        reference_word: impl Into<String>,
    ) -> Self {
        Self::paired(
            DiffKind::Wrong,
            hypothesis_index,
            reference_index,
            hypothesis_word.into(),
            reference_word.into(),
        )
    }

    pub fn extra(hypothesis_index: usize, hypothesis_word: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Extra,
            hypothesis_index: Some(hypothesis_index),
            reference_index: None,
            hypothesis_word: Some(hypothesis_word.into()),
            reference_word: None,
        }
    }

    pub fn missing(reference_index: usize, reference_word: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Missing,
            hypothesis_index: None,
            reference_index: Some(reference_index),
            hypothesis_word: None,
            reference_word: Some(reference_word.into()),
        }
    }

    fn paired(
        kind: DiffKind,
        hypothesis_index: usize,
        reference_index: usize,
        hypothesis_word: String,
        reference_word: String,
    ) -> Self {
        Self {
            kind,
            hypothesis_index: Some(hypothesis_index),
            reference_index: Some(reference_index),
            hypothesis_word: Some(hypothesis_word),
            reference_word: Some(reference_word),
        }
    }

    pub fn is_correct(&self) -> bool {
        self.kind == DiffKind::Correct
    }

    /// Copy rebased into a segment starting at `start` (caller guarantees
    /// `hypothesis_index >= start`).
    pub(crate) fn localized(&self, start: usize) -> Self {
        let mut op = self.clone();
        op.hypothesis_index = self.hypothesis_index.map(|idx| idx - start);
        op
    }

    pub(crate) fn globalized(&self, start: usize) -> Self {
        let mut op = self.clone();
        op.hypothesis_index = self.hypothesis_index.map(|idx| idx + start);
        op
    }
}

/// Contiguous slice of the concatenated hypothesis stream contributed by one
/// image, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSegment {
    pub image_id: u64,
    pub start_offset: usize,
    pub length: usize,
}

impl ImageSegment {
    /// Lay segments end to end starting at offset 0.
    pub fn contiguous(lengths: impl IntoIterator<Item = (u64, usize)>) -> Vec<ImageSegment> {
        let mut offset = 0usize;
        lengths
            .into_iter()
            .map(|(image_id, length)| {
                let segment = ImageSegment {
                    image_id,
                    start_offset: offset,
                    length,
                };
                offset += length;
                segment
            })
            .collect()
    }

    pub fn end_offset(&self) -> usize {
        self.start_offset + self.length
    }

    pub fn contains(&self, global_index: usize) -> bool {
        global_index >= self.start_offset && global_index < self.end_offset()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in image pixel space, `(x1, y1)` top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn center_x(&self) -> f64 {
        (self.x1 + self.x2) / 2.0
    }

    /// Too small to carry a visible annotation.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 1.0 || self.height() <= 1.0
    }
}

/// Word recognised by OCR, with its refined bbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrWord {
    pub text: String,
    pub bbox: BBox,
    #[serde(default)]
    pub confidence: Option<f32>,
}

/// All OCR words of one image plus its position in the task's display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageWords {
    pub image_id: u64,
    pub sort_order: i64,
    pub words: Vec<OcrWord>,
}
