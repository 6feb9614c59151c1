pub mod config;
mod error;
pub mod layout;
pub mod model;
mod pdf;

pub use config::{LayoutConfig, Options, UnitAlignment};
pub use error::Error;
pub use pdf::{MAX_STAVES, Score, load, load_bytes, render, staves_asset};

use std::path::Path;
use std::time::Instant;

pub fn add_staves(input: &Path, output: &Path, options: &Options) -> Result<(), Error> {
    let t0 = Instant::now();

    let score = pdf::load(input)?;
    let t_parse = t0.elapsed();

    write_score(&score, output, options, t0, t_parse)
}

pub fn add_staves_bytes(input: &[u8], output: &Path, options: &Options) -> Result<(), Error> {
    let t0 = Instant::now();

    let score = pdf::load_bytes(input)?;
    let t_parse = t0.elapsed();

    write_score(&score, output, options, t0, t_parse)
}

fn write_score(
    score: &Score,
    output: &Path,
    options: &Options,
    t0: Instant,
    t_parse: std::time::Duration,
) -> Result<(), Error> {
    let layout = layout::run(
        &score.units,
        options.combining.as_deref(),
        options.staves,
        &options.layout,
    )?;
    let t_layout = t0.elapsed();

    let bytes = pdf::render(score, &layout)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Laid out {} systems on {} pages {:?}",
        layout.units.len(),
        layout.pages.len(),
        layout.groups,
    );
    log::info!(
        "Timing: parse={:.1}ms, layout={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_parse.as_secs_f64() * 1000.0,
        (t_layout - t_parse).as_secs_f64() * 1000.0,
        (t_render - t_layout).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}
