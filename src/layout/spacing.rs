use crate::config::LayoutConfig;
use crate::model::Unit;

use super::min_height;

/// Upper bound for the extra space added beneath a single system.
pub const MAX_EXTRA_BOTTOM_PADDING: f32 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spacing {
    pub canvas_height: f32,
    pub minimum_height: f32,
    /// Extra space above each system, on top of `top_padding`.
    pub extra_top: f32,
    /// Extra space beneath each system, on top of `bottom_padding`.
    pub extra_bottom: f32,
    pub dynamic: bool,
}

impl Spacing {
    /// Total slack handed out across the page.
    pub fn distributed(&self, count: usize) -> f32 {
        (self.extra_top + self.extra_bottom) * count as f32
    }
}

/// Decide the canvas height of a page and how its slack is spread.
///
/// A page shorter than the standard height is stretched to it. Unless the
/// page is ragged, the difference is handed out as extra padding: a third
/// beneath every system (at most [`MAX_EXTRA_BOTTOM_PADDING`] each), the rest
/// above.
pub fn allocate(group: &[Unit], config: &LayoutConfig, is_last_page: bool) -> Spacing {
    let minimum_height = min_height(group, config);
    let ragged = if is_last_page {
        config.ragged_bottom_last
    } else {
        config.ragged_bottom
    };
    let dynamic = !group.is_empty() && minimum_height < config.standard_height && !ragged;
    let canvas_height = minimum_height.max(config.standard_height);

    if !dynamic {
        return Spacing {
            canvas_height,
            minimum_height,
            extra_top: 0.0,
            extra_bottom: 0.0,
            dynamic,
        };
    }

    let count = group.len() as f32;
    let leftover = config.standard_height - minimum_height;
    let extra_bottom = (leftover / (3.0 * count)).min(MAX_EXTRA_BOTTOM_PADDING);
    let extra_top = (leftover - extra_bottom * count) / count;

    Spacing {
        canvas_height,
        minimum_height,
        extra_top,
        extra_bottom,
        dynamic,
    }
}
