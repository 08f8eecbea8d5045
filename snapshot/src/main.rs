use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use board_core::{Board, BoardLayout};
use board_svg::{HrefLoader, render_png, render_svg};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Render a chessboard to an SVG or PNG file.
#[derive(Parser, Debug)]
#[command(name = "snapshot", version, about)]
struct Args {
    /// Output file; the extension picks the format (.svg or .png)
    output: PathBuf,

    /// JSON layout describing size, colors and pieces
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Light square color (overrides the layout)
    #[arg(long)]
    light: Option<String>,

    /// Dark square color (overrides the layout)
    #[arg(long)]
    dark: Option<String>,

    /// Edge of the output image in pixels
    #[arg(long)]
    width: Option<f64>,

    /// Grid dimension
    #[arg(long)]
    size: Option<usize>,

    /// Directory holding the piece SVGs
    #[arg(long, default_value = "images")]
    images: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Svg,
    Png,
}

fn output_format(path: &Path) -> Result<Format> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("svg") => Ok(Format::Svg),
        Some("png") => Ok(Format::Png),
        _ => bail!("output must end in .svg or .png: {}", path.display()),
    }
}

// Command-line flags win over the layout file.
fn merged_layout(args: &Args) -> Result<BoardLayout> {
    let mut layout = match &args.layout {
        Some(path) => {
            let txt = fs::read_to_string(path)
                .with_context(|| format!("reading layout {}", path.display()))?;
            BoardLayout::from_json(&txt)
                .with_context(|| format!("parsing layout {}", path.display()))?
        }
        None => BoardLayout::default(),
    };
    if args.light.is_some() {
        layout.light = args.light.clone();
    }
    if args.dark.is_some() {
        layout.dark = args.dark.clone();
    }
    if args.width.is_some() {
        layout.width = args.width;
    }
    if args.size.is_some() {
        layout.size = args.size;
    }
    Ok(layout)
}

// SVG hrefs must resolve wherever the output file ends up, so the image
// directory is written as an absolute path.
fn image_href_base(images: &Path) -> Result<String> {
    let dir = match fs::canonicalize(images) {
        Ok(dir) => dir,
        Err(_) => std::path::absolute(images)
            .with_context(|| format!("resolving {}", images.display()))?,
    };
    Ok(dir.to_string_lossy().into_owned())
}

fn run(args: &Args) -> Result<Board<String>> {
    let format = output_format(&args.output)?;
    let layout = merged_layout(args)?;
    let mut board: Board<String> = layout.build(600.0)?;
    if !args.images.is_dir() {
        warn!(dir = %args.images.display(), "piece image directory missing; pieces will not render");
    }

    let bytes = match format {
        Format::Svg => {
            let base = image_href_base(&args.images)?;
            render_svg(&mut board, &HrefLoader { base }).into_bytes()
        }
        Format::Png => {
            // Rasterizing resolves bare names against the image directory.
            let svg = render_svg(
                &mut board,
                &HrefLoader {
                    base: String::new(),
                },
            );
            render_png(&svg, Some(&args.images))?
        }
    };
    fs::write(&args.output, bytes)
        .with_context(|| format!("writing {}", args.output.display()))?;
    Ok(board)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let board = run(&args)?;
    info!(
        output = %args.output.display(),
        size = board.size(),
        width = board.width(),
        pieces = board.pieces().count(),
        "board rendered"
    );
    Ok(())
}
