use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use colfind::export;
use colfind::models::{AppConfig, ScrollCommand, Viewport};
use colfind::rendering::encode_frame;
use colfind::services::{ingest, FileDecoder, Session};

#[derive(Parser)]
#[command(name = "colfind")]
#[command(about = "Find column boundaries in scanned documents and render annotated thumbnails")]
struct Cli {
    /// Config file (YAML). Falls back to $CONFIG_FILE, then built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the thumbnail canvas for a set of images to a PNG file
    Render {
        /// Images to ingest, in display order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Zoom factor, clamped to the configured bounds
        #[arg(short, long, value_parser = parse_zoom)]
        zoom: Option<f32>,

        /// Vertical scroll offset in canvas pixels
        #[arg(short, long, default_value_t = 0)]
        scroll: i32,

        /// Viewport width
        #[arg(long, default_value_t = 800)]
        width: u32,

        /// Viewport height
        #[arg(long, default_value_t = 600)]
        height: u32,

        /// Re-compress the PNG with oxipng
        #[arg(long)]
        optimize: bool,
    },
    /// Print detected column boundaries for each image
    Detect {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write one image's boundaries as a column export document
    Export {
        file: PathBuf,

        /// Output XML file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            files,
            output,
            zoom,
            scroll,
            width,
            height,
            optimize,
        }) => {
            init_logging();
            let config = load_config(cli.config);
            run_render_command(
                config,
                &files,
                &output,
                zoom,
                scroll,
                Viewport::new(width, height),
                optimize,
            )
        }
        Some(Commands::Detect { files, json }) => {
            init_logging();
            let config = load_config(cli.config);
            run_detect_command(&config, &files, json)
        }
        Some(Commands::Export { file, output }) => {
            init_logging();
            let config = load_config(cli.config);
            run_export_command(&config, &file, &output)
        }
        None => {
            run_status_command(cli.config);
            Ok(())
        }
    }
}

fn parse_zoom(s: &str) -> Result<f32, String> {
    let zoom: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if !zoom.is_finite() || zoom <= 0.0 {
        return Err(format!("zoom must be a positive number, got {s}"));
    }
    Ok(zoom)
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "colfind=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn config_path(cli_path: Option<PathBuf>) -> Option<PathBuf> {
    cli_path.or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from))
}

fn load_config(cli_path: Option<PathBuf>) -> AppConfig {
    AppConfig::load(config_path(cli_path).as_deref())
}

fn run_render_command(
    config: AppConfig,
    files: &[PathBuf],
    output: &Path,
    zoom: Option<f32>,
    scroll: i32,
    viewport: Viewport,
    optimize: bool,
) -> anyhow::Result<()> {
    let mut session = Session::new(config, viewport);

    let report = session.open_files(files);
    if report.added.is_empty() {
        anyhow::bail!("No images could be loaded ({} skipped)", report.skipped.len());
    }

    if let Some(zoom) = zoom {
        session.set_zoom(zoom);
    }
    session.scroll(ScrollCommand::To(scroll));

    let frame = session.render()?;
    let png_bytes = encode_frame(&frame.image, optimize)?;
    std::fs::write(output, &png_bytes)?;

    let info = session.scroll_info();
    println!(
        "Rendered {} image(s) to {} ({}x{}, {} bytes)",
        report.added.len(),
        output.display(),
        frame.image.width(),
        frame.image.height(),
        png_bytes.len()
    );
    println!(
        "  zoom {:.2}, scroll {} of {} (canvas {}px)",
        session.view().zoom(),
        info.position,
        info.range.saturating_sub(info.page),
        info.range
    );
    for skipped in &report.skipped {
        println!("  skipped {}: {}", skipped.path.display(), skipped.error);
    }

    Ok(())
}

#[derive(Serialize)]
struct DetectOutput {
    file: String,
    width: u32,
    height: u32,
    boundaries: Vec<u32>,
}

fn run_detect_command(config: &AppConfig, files: &[PathBuf], json: bool) -> anyhow::Result<()> {
    let pipeline = config.pipeline();
    let mut results = Vec::new();

    for path in files {
        match ingest::load(&FileDecoder, &pipeline, path) {
            Ok(content) => results.push(DetectOutput {
                file: path.display().to_string(),
                width: content.original.width(),
                height: content.original.height(),
                boundaries: content.boundaries,
            }),
            Err(e) => tracing::warn!(path = %path.display(), %e, "Skipping file"),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for result in &results {
        println!(
            "{} ({}x{}): {} boundaries",
            result.file,
            result.width,
            result.height,
            result.boundaries.len()
        );
        if !result.boundaries.is_empty() {
            let line: Vec<String> = result.boundaries.iter().map(u32::to_string).collect();
            println!("  {}", line.join(" "));
        }
    }
    Ok(())
}

fn run_export_command(config: &AppConfig, file: &Path, output: &Path) -> anyhow::Result<()> {
    let content = ingest::load(&FileDecoder, &config.pipeline(), file)?;
    export::save_columns(output, &content.boundaries)?;
    println!(
        "Exported {} column(s) from {} to {}",
        content.boundaries.len(),
        file.display(),
        output.display()
    );
    Ok(())
}

/// Print version and effective configuration
fn run_status_command(cli_path: Option<PathBuf>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Colfind v{VERSION}");
    println!("Column boundary finder for scanned documents\n");

    let path = config_path(cli_path);
    let source = match &path {
        Some(p) if p.exists() => p.display().to_string(),
        Some(p) => format!("{} (file not found, using defaults)", p.display()),
        None => "built-in defaults".to_string(),
    };
    println!("Config:  {source}");

    let config = AppConfig::load(path.as_deref());
    let detection = &config.detection;
    let display = &config.display;

    println!("\nDetection:");
    println!("  threshold     = {}", detection.threshold);
    println!("  max_lookback  = {}", detection.max_lookback);

    println!("\nDisplay:");
    println!("  thumbnail     = {}px", display.thumbnail_size);
    println!("  spacing       = {}px", display.spacing);
    println!(
        "  zoom          = {} .. {} (step {})",
        display.min_zoom, display.max_zoom, display.zoom_step
    );
    println!("  background    = {}", display.background);
    println!(
        "  annotation    = {:?} ({})",
        display.annotation, display.annotation_color
    );
    println!(
        "  debug cross   = {}",
        if display.debug_cross { "on" } else { "off" }
    );

    println!("\nUsage:");
    println!("  colfind render <FILES>... -o canvas.png");
    println!("  colfind detect <FILES>... [--json]");
    println!("  colfind export <FILE> -o columns.xml");
}
