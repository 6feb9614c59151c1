/// DIN A4 in points, rounded the way most PDF producers write it.
pub const A4_WIDTH: f32 = 595.0;
pub const A4_HEIGHT: f32 = 842.0;

/// Page layout parameters shared by every stage of the pipeline.
///
/// All lengths are in PDF points. `separator_height` is only known once the
/// staves asset has been created, see [`LayoutConfig::with_separator_height`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub top_margin: f32,
    pub bottom_margin: f32,
    /// Space above a system (between the previous staves and the system).
    pub top_padding: f32,
    /// Space beneath a system (between the system and its staves).
    pub bottom_padding: f32,
    pub separator_height: f32,
    pub ragged_bottom: bool,
    pub ragged_bottom_last: bool,
    pub standard_width: f32,
    pub standard_height: f32,
    pub left_margin: f32,
    pub right_margin: f32,
    pub alignment: UnitAlignment,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            top_margin: 30.0,
            bottom_margin: 30.0,
            top_padding: 30.0,
            bottom_padding: 10.0,
            separator_height: 0.0,
            ragged_bottom: false,
            ragged_bottom_last: true,
            standard_width: A4_WIDTH,
            standard_height: A4_HEIGHT,
            left_margin: 30.0,
            right_margin: 30.0,
            alignment: UnitAlignment::Origin,
        }
    }
}

impl LayoutConfig {
    pub fn with_separator_height(self, separator_height: f32) -> Self {
        Self {
            separator_height,
            ..self
        }
    }

    pub fn printable_width(&self) -> f32 {
        self.standard_width - self.left_margin - self.right_margin
    }

    /// Height one unit adds to a page on top of its own height.
    pub fn per_unit_overhead(&self) -> f32 {
        self.separator_height + self.top_padding + self.bottom_padding
    }

    pub fn vertical_margins(&self) -> f32 {
        self.top_margin + self.bottom_margin
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum UnitAlignment {
    /// Units keep their own horizontal coordinates.
    #[default]
    Origin,
    /// Units are centred on the standard page width.
    Center,
}

/// Everything a caller can tune for one run.
#[derive(Clone, Debug)]
pub struct Options {
    pub layout: LayoutConfig,
    /// Number of staves drawn beneath every system (0...6).
    pub staves: u8,
    /// Explicit grouping text as typed by the user, e.g. `"4, 5"` or `"4 5"`.
    pub combining: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            staves: 2,
            combining: None,
        }
    }
}
