use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::{Parser, ValueEnum};
use colored::Colorize;
use framepick::{SampleDepth, pixmap, preview};
use image::RgbImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Depth {
    /// P5, one sample per pixel.
    Gray,
    /// P6, three samples per pixel.
    Rgb,
}

impl From<Depth> for SampleDepth {
    fn from(depth: Depth) -> Self {
        match depth {
            Depth::Gray => SampleDepth::Gray,
            Depth::Rgb => SampleDepth::Rgb,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "framepick-view",
    version,
    about = "Show a P5/P6 pixel map in the terminal, scaled to a fixed surface"
)]
struct Cli {
    /// Pixel map to display.
    file: PathBuf,

    /// Only accept this variant (default: either).
    #[arg(long, value_enum)]
    depth: Option<Depth>,

    /// Surface width in terminal cells.
    #[arg(long, default_value_t = 80)]
    columns: u32,

    /// Surface height in terminal cells (two pixels per cell).
    #[arg(long, default_value_t = 24)]
    rows: u32,
}

/// Paint two pixel rows per text row using upper half blocks.
fn render(image: &RgbImage) -> String {
    let (width, height) = image.dimensions();
    let mut output = String::new();

    for y in (0..height).step_by(2) {
        for x in 0..width {
            let top = image.get_pixel(x, y);
            let bottom = if y + 1 < height {
                image.get_pixel(x, y + 1)
            } else {
                top
            };
            let cell = "\u{2580}"
                .truecolor(top[0], top[1], top[2])
                .on_truecolor(bottom[0], bottom[1], bottom[2]);
            output.push_str(&cell.to_string());
        }
        output.push('\n');
    }

    output
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let buffer = pixmap::load(&cli.file, cli.depth.map(SampleDepth::from))?;
    let surface = preview::scale_to_surface(&buffer, cli.columns, cli.rows.saturating_mul(2))?;

    let title = format!(
        "{} viewer: {} ({}x{})",
        buffer.depth().magic(),
        cli.file.display(),
        buffer.width(),
        buffer.height()
    );
    let painted = render(&surface);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", title.bold())?;
    stdout.write_all(painted.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::render;

    #[test]
    fn render_emits_one_line_per_two_pixel_rows() {
        let image = RgbImage::from_pixel(3, 5, Rgb([10, 20, 30]));
        let painted = render(&image);
        assert_eq!(painted.lines().count(), 3);
        assert_eq!(painted.matches('\u{2580}').count(), 9);
    }
}
