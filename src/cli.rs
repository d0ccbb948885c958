use crate::config::{Config, load_config, merge_init_config};
use crate::layout::compute_chord_layout;
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_input;
use crate::render::{render_svg_with_title, write_output_svg};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chordwheel", version, about = "Chord diagram renderer")]
pub struct Args {
    /// Input document (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, chord, render)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Gap between ideograms as a fraction of the circle
    #[arg(long = "gapFraction")]
    pub gap_fraction: Option<f64>,

    /// Distance of the ribbon neck control point from the center
    #[arg(long = "neckRadius")]
    pub neck_radius: Option<f64>,

    /// Log more (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    #[cfg(feature = "png")]
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let base_config = load_config(args.config.as_deref())?;
    let input = read_input(args.input.as_deref())?;
    let parsed = parse_input(&input)?;
    info!(entities = parsed.data.len(), "parsed chord document");

    let mut config = base_config;
    if let Some(init_cfg) = parsed.init_config.clone() {
        config = merge_init_config(config, init_cfg)?;
    }
    apply_args(&mut config, &args);

    let colors = match parsed.colors.clone() {
        Some(colors) => colors,
        None => config.theme.entity_colors(parsed.data.len()),
    };
    let layout = compute_chord_layout(&parsed.data, &colors, &config.theme, &config.layout)?;
    debug!(shapes = layout.shapes.len(), "layout computed");

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg_with_title(
                &layout,
                &config.theme,
                &config.render,
                parsed.title.as_deref(),
            );
            write_output_svg(&svg, args.output.as_deref())?;
        }
        #[cfg(feature = "png")]
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg_with_title(
                &layout,
                &config.theme,
                &config.render,
                parsed.title.as_deref(),
            );
            crate::render::write_output_png(&svg, &output, &config.render)?;
        }
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => {
                let file = std::fs::File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                write_layout_dump(io::BufWriter::new(file), &layout, &parsed.data)?;
            }
            None => write_layout_dump(io::stdout().lock(), &layout, &parsed.data)?,
        },
    }

    Ok(())
}

fn init_logging(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "chordwheel=debug",
        _ => "chordwheel=trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn apply_args(config: &mut Config, args: &Args) {
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if let Some(gap) = args.gap_fraction {
        config.layout.chord.gap_fraction = gap;
    }
    if let Some(neck) = args.neck_radius {
        config.layout.chord.neck_radius = neck;
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(feature = "png")]
fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "chordwheel",
            "-w",
            "900",
            "--gapFraction",
            "0.02",
            "--neckRadius",
            "0.4",
            "-vv",
        ]);
        let mut config = Config::default();
        apply_args(&mut config, &args);
        assert_eq!(config.render.width, 900.0);
        assert_eq!(config.render.height, 600.0);
        assert_eq!(config.layout.chord.gap_fraction, 0.02);
        assert_eq!(config.layout.chord.neck_radius, 0.4);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn parses_output_format() {
        let args = Args::parse_from(["chordwheel", "-e", "json", "-o", "out.json"]);
        assert!(matches!(args.output_format, OutputFormat::Json));
        assert_eq!(args.output.as_deref(), Some(Path::new("out.json")));
    }
}
