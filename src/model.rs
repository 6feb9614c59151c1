/// One page of the input score: a cropped system treated as an opaque box.
///
/// Geometry is expressed in the unit's own (already scaled) coordinate space:
/// `left`/`top` are the crop box's left and top edges multiplied by `scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Unit {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

impl Unit {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
            scale: 1.0,
        }
    }

    /// Unit of the given size with its crop box at the origin.
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, height, width, height)
    }

    pub fn bottom(&self) -> f32 {
        self.top - self.height
    }

    /// Scale uniformly about the origin, preserving the aspect ratio.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            left: self.left * factor,
            top: self.top * factor,
            width: self.width * factor,
            height: self.height * factor,
            scale: self.scale * factor,
        }
    }
}

/// The block of empty staves placed beneath every system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeparatorAsset {
    pub staves: u8,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Element {
    /// Index into the run's unit list.
    Unit(usize),
    Separator,
}

/// An element's box on an output page, lower-left origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub element: Element,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Placement {
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// True if the vertical spans share more than a boundary.
    pub fn overlaps_vertically(&self, other: &Placement) -> bool {
        self.y < other.top() && other.y < self.top()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OutputPage {
    pub width: f32,
    pub height: f32,
    pub placements: Vec<Placement>,
}

/// Result of the layout pipeline, ready to be written.
#[derive(Clone, Debug)]
pub struct Layout {
    pub separator: SeparatorAsset,
    /// Units after fitting to the printable width.
    pub units: Vec<Unit>,
    pub groups: Vec<usize>,
    pub pages: Vec<OutputPage>,
}
