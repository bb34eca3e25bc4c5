use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fontsheet_render::{parse_hex_color, GlyphAtlas, Palette, SheetConfig, SheetRenderer};
use image::Rgb;
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a GIF grid template for drawing a bitmap font")]
struct Cli {
    /// First character
    #[arg(short, long, default_value_t = 32)]
    first: u32,
    /// Last character
    #[arg(short, long, default_value_t = 127)]
    last: u32,
    /// Maximum number of columns, set to zero for single row
    #[arg(short, long, default_value_t = 16)]
    columns: u32,
    /// Width of each character cell
    #[arg(short = 'W', long, default_value_t = 10)]
    width: u32,
    /// Height of each character cell
    #[arg(short = 'H', long, default_value_t = 16)]
    height: u32,
    /// Distance of baseline from bottom of character cell
    #[arg(short, long, default_value_t = 4)]
    baseline: u32,
    /// Strip top and left border
    #[arg(short, long)]
    strip: bool,
    /// No placeholder characters
    #[arg(short, long)]
    no_text: bool,
    /// Background color
    #[arg(short = 'B', long, default_value = "ffffff", value_parser = parse_color)]
    background_color: Rgb<u8>,
    /// Color of grid and template characters
    #[arg(short = 'G', long, default_value = "cccccc", value_parser = parse_color)]
    grid_color: Rgb<u8>,
    /// Color reserved for font
    #[arg(short = 'F', long, default_value = "000000", value_parser = parse_color)]
    font_color: Rgb<u8>,
    /// GIF atlas replacing the built-in 6x9 font
    #[arg(long)]
    atlas: Option<PathBuf>,
    /// Log layout details
    #[arg(short, long)]
    verbose: bool,
    /// GIF file to output
    output_file: PathBuf,
}

fn parse_color(text: &str) -> Result<Rgb<u8>, String> {
    parse_hex_color(text).map_err(|err| err.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: &Cli) -> Result<()> {
    let atlas = load_atlas(cli)?;
    let renderer = SheetRenderer::new(&atlas);
    let sheet = renderer
        .render(&cli.to_config(), cli.to_palette())
        .context("failed to lay out font sheet")?;

    sheet
        .save(&cli.output_file)
        .with_context(|| format!("failed to write {:?}", cli.output_file))?;

    let (width, height) = sheet.canvas.dimensions();
    info!("wrote {}x{} font sheet to {:?}", width, height, cli.output_file);
    Ok(())
}

fn load_atlas(cli: &Cli) -> Result<GlyphAtlas> {
    match &cli.atlas {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open atlas {:?}", path))?;
            GlyphAtlas::from_gif(file).with_context(|| format!("failed to load atlas {:?}", path))
        },
        None => GlyphAtlas::builtin().context("built-in glyph atlas is malformed"),
    }
}

impl Cli {
    fn to_config(&self) -> SheetConfig {
        SheetConfig {
            first_char: self.first,
            last_char: self.last,
            columns: self.columns,
            cell_width: self.width,
            cell_height: self.height,
            baseline: self.baseline,
            strip: self.strip,
            draw_glyphs: !self.no_text,
        }
    }

    fn to_palette(&self) -> Palette {
        Palette::new(self.background_color, self.font_color, self.grid_color)
    }
}
