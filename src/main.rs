use std::path::{Path, PathBuf};
use std::process::ExitCode;

use add_staves::{LayoutConfig, MAX_STAVES, Options, UnitAlignment};
use clap::Parser;

/// Add analytical staves to a score.
///
/// Every page of SCORE is treated as one system beneath which empty staves
/// are added, so crop the score into single systems first (e.g. with briss).
///
/// By default as many systems as fit are put on one DIN A4 page. Use
/// --combining to keep an explicit grouping instead: for a score whose first
/// page holds 4 systems and whose second holds 5, `--combining "4 5"` keeps
/// the original page breaks. Pages are never smaller than DIN A4.
#[derive(Parser, Debug)]
#[command(name = "add-staves", version, about, long_about)]
struct Cli {
    /// Path to the cropped score.
    #[arg(value_name = "SCORE")]
    score: PathBuf,

    /// Path to the output file [default: <SCORE>-analysis.pdf]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Overwrite the output destination if it exists.
    #[arg(short, long)]
    force: bool,

    /// Groups of systems combined on one page as space- or comma-separated text.
    #[arg(short, long, value_name = "TEXT", help_heading = "Configuration")]
    combining: Option<String>,

    /// Number of staves to add (0...6).
    #[arg(
        short,
        long,
        value_name = "NUMBER",
        default_value_t = 2,
        value_parser = clap::value_parser!(u8).range(0..=MAX_STAVES as i64),
        help_heading = "Configuration"
    )]
    staves: u8,

    /// Margin at the top of the page.
    #[arg(long, value_name = "NUMBER", default_value_t = 30.0, value_parser = non_negative, help_heading = "Page Layout")]
    top_margin: f32,

    /// Margin at the bottom of the page.
    #[arg(long, value_name = "NUMBER", default_value_t = 30.0, value_parser = non_negative, help_heading = "Page Layout")]
    bottom_margin: f32,

    /// Padding above a system.
    #[arg(long, value_name = "NUMBER", default_value_t = 30.0, value_parser = non_negative, help_heading = "Page Layout")]
    top_padding: f32,

    /// Padding beneath a system.
    #[arg(long, value_name = "NUMBER", default_value_t = 10.0, value_parser = non_negative, help_heading = "Page Layout")]
    bottom_padding: f32,

    /// Left margin; wider systems are scaled down to the printable width.
    #[arg(long, value_name = "NUMBER", default_value_t = 30.0, value_parser = non_negative, help_heading = "Page Layout")]
    left_margin: f32,

    /// Right margin; wider systems are scaled down to the printable width.
    #[arg(long, value_name = "NUMBER", default_value_t = 30.0, value_parser = non_negative, help_heading = "Page Layout")]
    right_margin: f32,

    /// Set systems at their natural spacing instead of filling the page.
    #[arg(long, help_heading = "Page Layout")]
    ragged_bottom: bool,

    /// Stretch the systems on the last page to fill it as well.
    #[arg(long, help_heading = "Page Layout")]
    no_ragged_bottom_last: bool,

    /// Centre systems horizontally on the page.
    #[arg(long, help_heading = "Page Layout")]
    center: bool,

    /// Increase logging verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn non_negative(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("'{s}' must be a non-negative number"))
    }
}

fn default_output(score: &Path) -> PathBuf {
    let stem = score
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "score".to_string());
    score.with_file_name(format!("{stem}-analysis.pdf"))
}

impl Cli {
    fn options(&self) -> Options {
        let layout = LayoutConfig {
            top_margin: self.top_margin,
            bottom_margin: self.bottom_margin,
            top_padding: self.top_padding,
            bottom_padding: self.bottom_padding,
            left_margin: self.left_margin,
            right_margin: self.right_margin,
            ragged_bottom: self.ragged_bottom,
            ragged_bottom_last: !self.no_ragged_bottom_last,
            alignment: if self.center {
                UnitAlignment::Center
            } else {
                UnitAlignment::Origin
            },
            ..LayoutConfig::default()
        };
        Options {
            layout,
            staves: self.staves,
            combining: self.combining.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let options = cli.options();
    if options.layout.printable_width() <= 0.0 {
        eprintln!("error: left and right margins leave no printable width");
        return ExitCode::FAILURE;
    }

    let output = match &cli.output {
        Some(path) => path.clone(),
        None => {
            let path = default_output(&cli.score);
            if path.exists() && !cli.force {
                eprintln!(
                    "error: a file at the default path '{}' already exists. Provide an explicit output path with '-o' or force overwriting with '-f'.",
                    path.display()
                );
                return ExitCode::FAILURE;
            }
            path
        }
    };

    match add_staves::add_staves(&cli.score, &output, &options) {
        Ok(()) => {
            println!("{}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
