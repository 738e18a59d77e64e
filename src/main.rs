use std::path::PathBuf;

use box_envelope::envelope::{TabbedCorner, defaults};
use box_envelope::types::Color;
use box_envelope::{BoxDimensions, CornerStyle, EnvelopeConfig, Length, SvgOptions, write_envelope};
use clap::{ArgAction, Parser};
use clap::builder::BoolishValueParser;

#[derive(Parser, Debug)]
#[command(
    name = "box-envelope",
    about = "Generate an SVG envelope pattern that folds around a box",
    version,
    allow_negative_numbers = true
)]
struct Cli {
    /// Box width in mm
    width: f64,

    /// Box height in mm
    height: f64,

    /// Box depth in mm (the border that wraps up the sides)
    depth: f64,

    /// Output SVG file
    #[arg(default_value = defaults::OUTPUT_FILE)]
    output: PathBuf,

    /// Interlocking tabs instead of plain corners (`--tabs`, `--tabs=1`, `--tabs=0`)
    #[arg(
        short,
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    tabs: bool,

    /// How far each tab projects past its fold, in mm
    #[arg(long, default_value_t = defaults::TAB_WIDTH.raw())]
    tab_width: f64,

    /// Tab inset from the neighbouring flap edges, in mm
    #[arg(long, default_value_t = defaults::TAB_OFFSET.raw())]
    tab_offset: f64,

    /// Stroke colour of cut lines (name or #rrggbb)
    #[arg(long, default_value = defaults::CUT_COLOR)]
    cut_color: Color,

    /// Stroke colour of perforation lines (name or #rrggbb)
    #[arg(long, default_value = defaults::PERFORATION_COLOR)]
    perforation_color: Color,
}

impl Cli {
    fn corner_style(&self) -> CornerStyle {
        if self.tabs {
            CornerStyle::Tabbed(TabbedCorner {
                width: Length::mm(self.tab_width),
                offset: Length::mm(self.tab_offset),
            })
        } else {
            CornerStyle::default()
        }
    }
}

#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(not(feature = "tracing"))]
fn init_tracing() {}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let dimensions = BoxDimensions::new(cli.width, cli.height, cli.depth);
    let corner_style = cli.corner_style();
    let options = SvgOptions {
        cut_color: cli.cut_color.clone(),
        perforation_color: cli.perforation_color.clone(),
        ..SvgOptions::default()
    };

    write_envelope(&cli.output, &dimensions, &corner_style, &EnvelopeConfig::default(), options)?;

    let tabs = if corner_style.is_tabbed() { " with tabs" } else { "" };
    println!(
        "Envelope for box with dimensions {dimensions}{tabs} created and stored as {}",
        cli.output.display()
    );
    Ok(())
}
