use crate::config::LayoutConfig;
use crate::model::Unit;

/// Parse the user's grouping text, e.g. `"4,5"`, `"4, 5"` or `"4 5"`.
///
/// Comma separation is tried first, whitespace separation second. Returns
/// `None` when neither parses or when the list mixes zero/negative entries
/// with positive ones; the caller then packs automatically. Empty text and
/// all-zero lists come back as-is and later collapse to a single page.
pub fn parse_groups(input: &str) -> Option<Vec<usize>> {
    let text = input.trim().trim_matches(|c: char| c == '\'' || c == '"').trim();
    if text.is_empty() {
        return Some(Vec::new());
    }

    let parse_all = |pieces: Vec<&str>| -> Option<Vec<i64>> {
        pieces.into_iter().map(|p| p.trim().parse::<i64>().ok()).collect()
    };

    let Some(numbers) = parse_all(text.split(',').collect())
        .or_else(|| parse_all(text.split_whitespace().collect()))
    else {
        log::warn!("Ignoring unparsable grouping {input:?}, packing pages automatically");
        return None;
    };

    if numbers.iter().all(|&n| n == 0) {
        return Some(vec![0; numbers.len()]);
    }
    if numbers.iter().any(|&n| n <= 0) {
        log::warn!("Ignoring grouping {input:?} with non-positive entries, packing pages automatically");
        return None;
    }
    Some(numbers.into_iter().map(|n| n as usize).collect())
}

/// Reconcile a grouping with the real number of units.
///
/// - nothing grouped: everything goes on one page
/// - too few grouped: the rest forms one trailing page
/// - too many grouped: trailing groups are dropped until the sum fits, then
///   whatever is left over forms one trailing page
///
/// The result always sums to `total` and never contains an empty group.
pub fn normalize(mut groups: Vec<usize>, total: usize) -> Vec<usize> {
    if total == 0 {
        return Vec::new();
    }
    groups.retain(|&g| g > 0);

    // Longest prefix that still fits; same as popping from the back while
    // the sum is too large, without overflowing on huge entries.
    let mut sum = 0usize;
    let keep = groups
        .iter()
        .take_while(|&&g| match sum.checked_add(g) {
            Some(next) if next <= total => {
                sum = next;
                true
            }
            _ => false,
        })
        .count();
    groups.truncate(keep);

    if sum < total {
        groups.push(total - sum);
    }
    groups
}

/// State of the greedy packer after consuming a prefix of the units.
#[derive(Clone, Debug, PartialEq)]
pub struct Packer {
    /// Completed groups.
    pub groups: Vec<usize>,
    /// Units accepted into the page being filled.
    pub current: usize,
    /// Height used on the page being filled, margins included.
    pub height: f32,
}

impl Packer {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            groups: Vec::new(),
            current: 0,
            height: config.vertical_margins(),
        }
    }

    /// Consume one unit. A unit that exactly fills the remaining space still
    /// goes on the current page.
    pub fn step(mut self, unit: &Unit, config: &LayoutConfig) -> Self {
        let needed = unit.height + config.per_unit_overhead();

        if self.height + needed <= config.standard_height {
            self.current += 1;
            self.height += needed;
        } else if self.current == 0 {
            // Too tall for an empty page: it gets a page of its own.
            self.groups.push(1);
            self.height = config.vertical_margins();
        } else {
            self.groups.push(self.current);
            self.current = 1;
            self.height = config.vertical_margins() + needed;
        }
        self
    }
}

/// Greedily fill standard-height pages with as many units as fit.
pub fn pack(units: &[Unit], config: &LayoutConfig) -> Vec<usize> {
    let packer = units
        .iter()
        .fold(Packer::new(config), |packer, unit| packer.step(unit, config));
    // The page still being filled is picked up as the trailing remainder.
    normalize(packer.groups, units.len())
}

/// Decide how many consecutive units go on each output page.
pub fn resolve(units: &[Unit], explicit: Option<&[usize]>, config: &LayoutConfig) -> Vec<usize> {
    match explicit {
        Some(groups) => normalize(groups.to_vec(), units.len()),
        None => pack(units, config),
    }
}
