use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{error, info};

use camframe_rs::image_pipeline::{
    CodecConfig, Frame, GoldenConfig, RawLayout, RoundTripPipeline, StandardTiffWriter,
    TiffCompression, TiffWriter, flip, rotate, scale_to_full_range,
};
use camframe_rs::logger;

/// Frame mirroring applied before compression.
#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Copy)]
enum MirrorSetting {
    None,
    /// Flip left-right
    Horizontal,
    /// Flip top-bottom
    Vertical,
    Both,
}

#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Copy)]
enum GoldenCompression {
    None,
    Lzw,
    Deflate,
}

impl From<GoldenCompression> for TiffCompression {
    fn from(value: GoldenCompression) -> Self {
        match value {
            GoldenCompression::None => TiffCompression::None,
            GoldenCompression::Lzw => TiffCompression::Lzw,
            GoldenCompression::Deflate => TiffCompression::Deflate,
        }
    }
}

/// Compresses a raw sensor dump and reports how faithfully it decodes.
///
/// The input holds width x height x channels samples with no row padding;
/// 16-bit samples are in native byte order.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Raw sample file to compress
    input: PathBuf,

    /// Frame width in pixels
    #[arg(long)]
    width: u32,

    /// Frame height in pixels
    #[arg(long)]
    height: u32,

    /// Samples per pixel (1 = gray, 3 = RGB)
    #[arg(long, default_value_t = 1)]
    channels: u32,

    /// Bits per stored sample (8 or 16)
    #[arg(long, default_value_t = 8)]
    bit_depth: u32,

    /// Sensor resolution inside a 16-bit container (e.g. 12), scaled to
    /// full range before compression
    #[arg(long)]
    significant_bits: Option<u32>,

    /// Compression quality, 1-100
    #[arg(short, long, env = "QUALITY", default_value_t = 75)]
    quality: u8,

    /// Clockwise rotation in degrees (0, 90, 180, 270)
    #[arg(long, default_value_t = 0)]
    rotate: u32,

    #[arg(long, default_value = "none", value_enum)]
    mirror: MirrorSetting,

    /// Compressed output file
    #[arg(short, long, default_value = "output.jpg")]
    output: PathBuf,

    /// Write the decoded frame as raw samples at the input bit depth
    #[arg(long)]
    decoded: Option<PathBuf>,

    /// Write the input frame, at its own bit depth, as a lossless TIFF
    /// golden file
    #[arg(long)]
    golden: Option<PathBuf>,

    #[arg(long, default_value = "lzw", value_enum)]
    golden_compression: GoldenCompression,

    /// Debug logging with span timings
    #[arg(short, long)]
    verbose: bool,
}

fn load_frame(args: &Args) -> Result<Frame> {
    let layout = RawLayout::new(args.width, args.height, args.channels, args.bit_depth);
    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let mut frame = Frame::from_raw(&layout, &bytes)?;

    if let Some(bits) = args.significant_bits {
        frame = scale_to_full_range(&frame.with_significant_bits(bits)?)?;
    }
    if args.rotate != 0 {
        frame = rotate(&frame, args.rotate)?;
    }
    frame = match args.mirror {
        MirrorSetting::None => frame,
        MirrorSetting::Horizontal => flip(&frame, true, false)?,
        MirrorSetting::Vertical => flip(&frame, false, true)?,
        MirrorSetting::Both => flip(&frame, true, true)?,
    };
    Ok(frame)
}

/// Exports `frame` unchanged, so 16-bit input keeps its full precision.
fn write_golden(frame: &Frame, path: &Path, compression: TiffCompression) -> Result<()> {
    let config = GoldenConfig::builder().compression(compression).build();
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    StandardTiffWriter.write_tiff(frame, &mut writer, &config)?;
    writer.flush()?;
    Ok(())
}

fn run(args: &Args) -> Result<bool> {
    let frame = load_frame(args)?;
    info!(
        "Loaded {}x{}x{} frame at {} bits",
        frame.width(),
        frame.height(),
        frame.channels(),
        frame.bit_depth()
    );

    let config = CodecConfig::builder().quality(args.quality).build();
    let pipeline = RoundTripPipeline::new(config);

    let report = pipeline.round_trip(&frame)?;
    std::fs::write(&args.output, report.encoded.as_bytes())
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!("Wrote {} bytes to {}", report.encoded_len(), args.output.display());

    if let Some(path) = &args.decoded {
        let decoded = pipeline.decompress(&report.encoded, frame.bit_depth())?;
        std::fs::write(path, decoded.to_raw_bytes())
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Wrote decoded frame to {}", path.display());
    }

    if let Some(path) = &args.golden {
        write_golden(&frame, path, args.golden_compression.into())?;
        info!("Wrote golden TIFF to {}", path.display());
    }

    println!(
        "{} -> {} bytes (ratio {:.2}), {} of {} samples off by more than {} (max {})",
        report.canonical_len,
        report.encoded_len(),
        report.compression_ratio(),
        report.stats.exceeding,
        report.stats.samples,
        report.stats.threshold,
        report.stats.max_abs_diff
    );
    print!("{}", report.timings);

    Ok(report.passed)
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose);

    info!("Starting camframe...");

    match run(&args) {
        Ok(true) => {
            info!("Round trip within tolerance");
            Ok(())
        }
        Ok(false) => bail!("round trip exceeds tolerance"),
        Err(e) => {
            error!("Compression failed: {:#}", e);
            Err(e)
        }
    }
}
