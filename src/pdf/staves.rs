use pdf_writer::Content;

use crate::error::Error;
use crate::model::SeparatorAsset;

pub const MAX_STAVES: u8 = 6;

const LINES_PER_STAFF: usize = 5;
const LINE_SPACING: f32 = 7.0;
const STAFF_DISTANCE: f32 = 36.0;
pub(super) const LINE_WIDTH: f32 = 0.5;

fn staff_height() -> f32 {
    (LINES_PER_STAFF - 1) as f32 * LINE_SPACING
}

/// Geometry of a block of `staves` empty five-line staves, `width` wide.
pub fn staves_asset(staves: u8, width: f32) -> Result<SeparatorAsset, Error> {
    if staves > MAX_STAVES {
        return Err(Error::InvalidStaffCount(staves));
    }
    let height = match staves {
        0 => 0.0,
        n => n as f32 * staff_height() + (n - 1) as f32 * STAFF_DISTANCE,
    };
    Ok(SeparatorAsset {
        staves,
        width,
        height,
    })
}

/// Content stream drawing the staves, origin at the block's lower-left corner.
pub(super) fn draw(asset: &SeparatorAsset) -> Content {
    let mut content = Content::new();
    if asset.staves == 0 {
        return content;
    }
    content.set_line_width(LINE_WIDTH);
    content.set_stroke_gray(0.0);
    for staff in 0..asset.staves {
        let top = asset.height - staff as f32 * (staff_height() + STAFF_DISTANCE);
        for line in 0..LINES_PER_STAFF {
            let y = top - line as f32 * LINE_SPACING;
            content.move_to(0.0, y);
            content.line_to(asset.width, y);
        }
    }
    content.stroke();
    content
}
