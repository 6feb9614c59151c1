mod assemble;
mod grouping;
mod spacing;

pub use assemble::{Cursor, assemble, fit_to_width};
pub use grouping::{Packer, normalize, pack, parse_groups, resolve};
pub use spacing::{MAX_EXTRA_BOTTOM_PADDING, Spacing, allocate};

use crate::config::LayoutConfig;
use crate::error::Error;
use crate::model::{Layout, Unit};
use crate::pdf::staves_asset;

/// Height needed to fit `units`, their staves and the fixed paddings on one page.
pub fn min_height(units: &[Unit], config: &LayoutConfig) -> f32 {
    let systems: f32 = units.iter().map(|u| u.height).sum();
    systems + config.vertical_margins() + units.len() as f32 * config.per_unit_overhead()
}

/// Turn the score's units into laid-out output pages.
///
/// `combining` is the user's grouping text; malformed text falls back to
/// automatic packing. Fails only for a staff count outside 0...6.
pub fn run(
    units: &[Unit],
    combining: Option<&str>,
    staves: u8,
    config: &LayoutConfig,
) -> Result<Layout, Error> {
    let separator = staves_asset(staves, config.printable_width())?;
    let config = config.with_separator_height(separator.height);
    let units = fit_to_width(units, &config);

    let explicit = combining.and_then(parse_groups);
    let groups = resolve(&units, explicit.as_deref(), &config);
    log::debug!(
        "Grouping {} systems as {:?} ({})",
        units.len(),
        groups,
        if explicit.is_some() { "explicit" } else { "automatic" }
    );

    let last = groups.len().saturating_sub(1);
    let mut pages = Vec::with_capacity(groups.len());
    let mut first = 0;
    for (index, &size) in groups.iter().enumerate() {
        let group = &units[first..first + size];
        let spacing = allocate(group, &config, index == last);
        log::debug!(
            "Page {}: {} systems, min height {:.1}, canvas {:.1}, {}extra top {:.1}, extra bottom {:.1}",
            index + 1,
            size,
            spacing.minimum_height,
            spacing.canvas_height,
            if spacing.dynamic { "dynamic, " } else { "" },
            spacing.extra_top,
            spacing.extra_bottom,
        );
        pages.push(assemble(group, first, &separator, &config, &spacing));
        first += size;
    }

    Ok(Layout {
        separator,
        units,
        groups,
        pages,
    })
}
