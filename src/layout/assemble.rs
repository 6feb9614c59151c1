use crate::config::{LayoutConfig, UnitAlignment};
use crate::model::{Element, OutputPage, Placement, SeparatorAsset, Unit};

use super::spacing::Spacing;

/// Scale every unit wider than the printable width down to it.
pub fn fit_to_width(units: &[Unit], config: &LayoutConfig) -> Vec<Unit> {
    let printable = config.printable_width();
    units
        .iter()
        .enumerate()
        .map(|(i, unit)| {
            if unit.width > printable && printable > 0.0 {
                let factor = printable / unit.width;
                log::debug!("System {}: scaling by {factor:.3} to fit {printable:.1}pt", i + 1);
                unit.scaled(factor)
            } else {
                *unit
            }
        })
        .collect()
}

/// Vertical position while filling a page from the top down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor(pub f32);

impl Cursor {
    pub fn skip(self, amount: f32) -> Self {
        Cursor(self.0 - amount)
    }

    /// Put an element with its top edge at the cursor and move past it.
    pub fn place(self, element: Element, x: f32, width: f32, height: f32) -> (Self, Placement) {
        let placement = Placement {
            element,
            x,
            y: self.0 - height,
            width,
            height,
        };
        (Cursor(placement.y), placement)
    }
}

/// Lay out one group on a fresh page.
///
/// `first_index` is the position of `group[0]` in the whole run; placements
/// refer to units by their run index.
pub fn assemble(
    group: &[Unit],
    first_index: usize,
    separator: &SeparatorAsset,
    config: &LayoutConfig,
    spacing: &Spacing,
) -> OutputPage {
    let width = config.standard_width;
    let separator_x = (width - separator.width) / 2.0;
    let start = Cursor(spacing.canvas_height - config.top_margin);

    let (_, placements) = group.iter().enumerate().fold(
        (start, Vec::with_capacity(group.len() * 2)),
        |(cursor, mut placements), (i, unit)| {
            let x = match config.alignment {
                UnitAlignment::Origin => unit.left,
                UnitAlignment::Center => (width - unit.width) / 2.0,
            };
            let (cursor, system) =
                cursor.place(Element::Unit(first_index + i), x, unit.width, unit.height);
            let cursor = cursor.skip(config.bottom_padding + spacing.extra_bottom);
            let (cursor, staves) = cursor.place(
                Element::Separator,
                separator_x,
                separator.width,
                separator.height,
            );
            let cursor = cursor.skip(config.top_padding + spacing.extra_top);
            placements.push(system);
            placements.push(staves);
            (cursor, placements)
        },
    );

    OutputPage {
        width,
        height: spacing.canvas_height,
        placements,
    }
}
