use clap::{Parser, Subcommand, ValueEnum};
use qrkit::detector::finder::FinderDetector;
use qrkit::tools::{dark_ratio, grayscale_stats, load_pixels};
use qrkit::utils::binarization::{adaptive_binarize, adaptive_window};
use qrkit::utils::grayscale::to_grayscale;
use qrkit::{ECLevel, EncodeOptions, OutputFormat, QRCode, RenderOptions, encode_text, pipeline, render};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "qrkit CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode text and print (or write) the rendered symbol
    Encode {
        text: String,
        #[arg(long, value_enum, default_value_t = Level::M)]
        ec: Level,
        #[arg(long, value_enum, default_value_t = Format::Utf8)]
        format: Format,
        /// Target size in pixels (SVG and PNG)
        #[arg(long, default_value_t = 256)]
        size: u32,
        /// Light border in modules
        #[arg(long, default_value_t = 4)]
        quiet_zone: usize,
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Decode every QR code in an image
    Decode {
        #[arg(long)]
        image: PathBuf,
    },
    /// Print grayscale/binary stats and finder patterns for an image
    Inspect {
        #[arg(long)]
        image: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    L,
    M,
    Q,
    H,
}

impl From<Level> for ECLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::L => ECLevel::L,
            Level::M => ECLevel::M,
            Level::Q => ECLevel::Q,
            Level::H => ECLevel::H,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Svg,
    DataUrl,
    Utf8,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Svg => OutputFormat::Svg,
            Format::DataUrl => OutputFormat::DataUrl,
            Format::Utf8 => OutputFormat::Utf8,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Encode {
            text,
            ec,
            format,
            size,
            quiet_zone,
            output,
        } => encode_cmd(
            &text,
            ec.into(),
            &RenderOptions {
                format: format.into(),
                size,
                quiet_zone,
            },
            output.as_deref(),
        ),
        Command::Decode { image } => decode_cmd(&image),
        Command::Inspect { image } => inspect_cmd(&image),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn encode_cmd(
    text: &str,
    ec_level: ECLevel,
    options: &RenderOptions,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let symbol = encode_text(text, &EncodeOptions::with_ec_level(ec_level))?;
    let rendered = render(&symbol, options)?;
    match output {
        Some(path) => std::fs::write(path, rendered)?,
        None => println!("{rendered}"),
    }
    eprintln!(
        "version={} ec={:?} mask={}",
        symbol.version().number(),
        symbol.ec_level(),
        symbol.mask().id()
    );
    Ok(())
}

fn decode_cmd(image: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let pixels = load_pixels(image)?;
    let gray = to_grayscale(&pixels);
    let start = Instant::now();
    let codes = pipeline::decode_grayscale(&gray, pixels.width(), pixels.height())?;
    println!(
        "Image: {} ({}x{}) decoded in {:.2?}",
        image.display(),
        pixels.width(),
        pixels.height(),
        start.elapsed()
    );
    for (i, qr) in codes.iter().enumerate() {
        print_code(i, qr);
    }
    Ok(())
}

fn inspect_cmd(image: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let pixels = load_pixels(image)?;
    let (width, height) = (pixels.width(), pixels.height());
    println!("Image: {} ({}x{})", image.display(), width, height);

    let gray = to_grayscale(&pixels);
    let stats = grayscale_stats(&gray);
    println!(
        "Grayscale range: {}-{}, average: {}",
        stats.min, stats.max, stats.avg
    );

    let window = adaptive_window(width, height, 0);
    let binary = adaptive_binarize(&gray, width, height, window);
    println!(
        "Adaptive binarization: window={} dark_ratio={:.2}%",
        window,
        dark_ratio(&binary) * 100.0
    );

    let patterns = FinderDetector::detect(&binary);
    println!("Found {} finder patterns", patterns.len());
    for (i, pattern) in patterns.iter().take(10).enumerate() {
        println!(
            "  Pattern {}: center=({:.1}, {:.1}) module_size={:.2} count={}",
            i, pattern.center.x, pattern.center.y, pattern.module_size, pattern.count
        );
    }

    match pipeline::decode_grayscale(&gray, width, height) {
        Ok(codes) => {
            println!("Full decode found {} QR codes", codes.len());
            for (i, qr) in codes.iter().enumerate() {
                print_code(i, qr);
            }
        }
        Err(err) => println!("Full decode failed: {err}"),
    }
    Ok(())
}

fn print_code(index: usize, qr: &QRCode) {
    println!(
        "  QR {}: version={}, error_correction={:?}, mask={}, corrected={}, content={}",
        index,
        qr.version.number(),
        qr.error_correction,
        qr.mask_pattern.id(),
        qr.corrected_codewords,
        qr.content
    );
}
