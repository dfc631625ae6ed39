use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::{Parser, error::ErrorKind};
use colored::Colorize;
use framepick::{
    ChannelWeights, CodecLogLevel, DEFAULT_COLOR_FILE_NAME, DEFAULT_GRAY_FILE_NAME, FramePipeline,
    PipelineOptions, PipelineReport, ProgressCallback, ProgressInfo, ViewerCommand,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  framepick input.mp4 120 0.299 0.587 0.114\n  framepick input.mkv 0 0.33 0.33 0.33 --out-dir frames --no-launch --json\n  framepick input.mp4 500 0.2126 0.7152 0.0722 --viewer framepick-view --progress";

#[derive(Debug, Parser)]
#[command(
    name = "framepick",
    version,
    about = "Extract one video frame as a PPM and a weighted-grayscale PGM, then open both",
    after_help = CLI_AFTER_HELP,
    allow_negative_numbers = true
)]
struct Cli {
    /// Input video path.
    input: PathBuf,

    /// Zero-based index of the frame to extract, in decode order.
    frame_number: i64,

    /// Weight applied to the red channel of the grayscale map.
    x_coeff: f32,

    /// Weight applied to the green channel of the grayscale map.
    y_coeff: f32,

    /// Weight applied to the blue channel of the grayscale map.
    z_coeff: f32,

    /// Directory to write both maps into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// File name of the colour (P6) map.
    #[arg(long, default_value = DEFAULT_COLOR_FILE_NAME)]
    color_name: String,

    /// File name of the grayscale (P5) map.
    #[arg(long, default_value = DEFAULT_GRAY_FILE_NAME)]
    gray_name: String,

    /// Program that opens each written map (defaults to the desktop opener;
    /// `framepick-view` paints it in this terminal).
    #[arg(long, conflicts_with = "no_launch")]
    viewer: Option<String>,

    /// Write the maps but do not open them.
    #[arg(long)]
    no_launch: bool,

    /// Show decode progress.
    #[arg(long)]
    progress: bool,

    /// Print a JSON report on stdout.
    #[arg(long)]
    json: bool,

    /// Show additional logging output.
    #[arg(long)]
    verbose: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long)]
    log_level: Option<CodecLogLevel>,
}

struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    fn new(target: u64) -> Self {
        let bar = ProgressBar::new(target.saturating_add(1));
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} decoding {bar:30.cyan/blue} {pos}/{len} frames [{elapsed_precise}]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.bar.set_position(info.current);
        if info.finished {
            self.bar.finish_and_clear();
        }
    }
}

fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let code = match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = error.print();
            std::process::exit(code);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "error" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn build_options(cli: &Cli, frame_number: u64) -> PipelineOptions {
    let mut options = PipelineOptions::new()
        .with_output_dir(&cli.out_dir)
        .with_color_file_name(cli.color_name.clone())
        .with_gray_file_name(cli.gray_name.clone());

    options = match (&cli.viewer, cli.no_launch) {
        (_, true) => options.without_viewer(),
        (Some(program), false) => options.with_viewer(ViewerCommand::new(program)),
        (None, false) => options.with_viewer(ViewerCommand::system_default()),
    };

    if cli.progress {
        options = options
            .with_progress(Arc::new(TerminalProgress::new(frame_number)))
            .with_batch_size(10);
    }

    options
}

fn print_report(report: &PipelineReport) {
    println!(
        "{} frame {} ({}x{})",
        "extracted".green().bold(),
        report.frame_number,
        report.width,
        report.height
    );
    for map in &report.written {
        println!(
            "{} {} -> {}",
            "saved".green().bold(),
            map.depth.magic(),
            map.path.display()
        );
    }
    for skip in &report.skipped {
        eprintln!("{} {}", "warning:".yellow().bold(), skip.error.to_string().yellow());
    }
    for launch in &report.launches {
        match &launch.result {
            Ok(pid) => println!(
                "{} viewer for {} (pid {pid})",
                "launched".cyan().bold(),
                launch.path.display()
            ),
            Err(error) => {
                eprintln!("{} {}", "warning:".yellow().bold(), error.to_string().yellow())
            }
        }
    }
}

fn print_json_report(report: &PipelineReport) -> Result<(), Box<dyn std::error::Error>> {
    let payload = json!({
        "frame_number": report.frame_number,
        "width": report.width,
        "height": report.height,
        "weights": [report.weights.red, report.weights.green, report.weights.blue],
        "video": {
            "codec": report.video.codec,
            "container": report.video.container,
            "stream_index": report.video.stream_index,
            "frames_per_second": report.video.frames_per_second,
            "pixel_format": report.video.pixel_format_name,
        },
        "written": report.written.iter().map(|map| json!({
            "path": map.path.display().to_string(),
            "magic": map.depth.magic(),
        })).collect::<Vec<_>>(),
        "skipped": report.skipped.iter().map(|skip| json!({
            "path": skip.path.display().to_string(),
            "magic": skip.depth.magic(),
            "error": skip.error.to_string(),
        })).collect::<Vec<_>>(),
        "launches": report.launches.iter().map(|launch| json!({
            "path": launch.path.display().to_string(),
            "pid": launch.result.as_ref().ok(),
            "error": launch.result.as_ref().err().map(ToString::to_string),
        })).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(cli.verbose);

    if let Some(level) = cli.log_level {
        framepick::set_codec_log_level(level);
    }

    let frame_number =
        u64::try_from(cli.frame_number).map_err(|_| "frame number cannot be negative")?;

    let weights = ChannelWeights::new(cli.x_coeff, cli.y_coeff, cli.z_coeff);
    if !weights.is_in_range() {
        eprintln!(
            "{} {}",
            "warning:".yellow().bold(),
            format!("weights ({weights}) can leave 0..=255; grayscale samples will saturate")
                .yellow()
        );
    }

    let pipeline = FramePipeline::new(build_options(&cli, frame_number));
    let report = pipeline.run(&cli.input, frame_number, weights)?;

    if cli.json {
        print_json_report(&report)?;
    } else {
        print_report(&report);
    }

    Ok(())
}

fn main() {
    let cli = parse_cli();
    if let Err(error) = run(cli) {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Cli;

    #[test]
    fn parses_positional_arguments() {
        let cli = Cli::try_parse_from(["framepick", "in.mp4", "12", "0.299", "0.587", "0.114"])
            .unwrap();
        assert_eq!(cli.frame_number, 12);
        assert_eq!(cli.x_coeff, 0.299);
        assert_eq!(cli.color_name, "input.ppm");
        assert_eq!(cli.gray_name, "input.pgm");
        assert!(!cli.no_launch);
    }

    #[test]
    fn accepts_negative_numbers_as_values() {
        let cli = Cli::try_parse_from(["framepick", "in.mp4", "-3", "-0.5", "1", "0.5"]).unwrap();
        assert_eq!(cli.frame_number, -3);
        assert_eq!(cli.x_coeff, -0.5);
    }

    #[test]
    fn viewer_help_mentions_the_terminal_viewer() {
        use clap::CommandFactory;

        let command = Cli::command();
        let help = command
            .get_arguments()
            .find(|argument| argument.get_id() == "viewer")
            .and_then(|argument| argument.get_help())
            .map(ToString::to_string)
            .unwrap_or_default();
        assert!(help.contains("framepick-view"), "{help}");
    }

    #[test]
    fn rejects_missing_arguments() {
        assert!(Cli::try_parse_from(["framepick", "in.mp4", "1", "0.3", "0.3"]).is_err());
    }

    #[test]
    fn viewer_conflicts_with_no_launch() {
        let result = Cli::try_parse_from([
            "framepick",
            "in.mp4",
            "0",
            "1",
            "0",
            "0",
            "--viewer",
            "feh",
            "--no-launch",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_log_level() {
        let cli = Cli::try_parse_from([
            "framepick",
            "in.mp4",
            "0",
            "1",
            "0",
            "0",
            "--log-level",
            "WARN",
        ])
        .unwrap();
        assert_eq!(cli.log_level, Some(framepick::CodecLogLevel::Warning));
    }
}
