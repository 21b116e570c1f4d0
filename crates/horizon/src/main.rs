//! Extract the dominant foreground boundary from a photo.
//!
//! Reads an image, runs the extraction pipeline, writes the boundary
//! points to a text file, and prints a JSON report to stdout. Every
//! failure is folded into the report (`success: false` plus a message)
//! so callers can always parse stdout; diagnostics go to stderr.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use horizon_pipeline::{
    CaptureMetadata, Extraction, ExtractionReport, FocalLength, PipelineConfig, SourceContext,
};

/// Extract the boundary of the dominant foreground object from a photo.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Input image path (PNG, JPEG, BMP, WebP, TIFF).
    input: PathBuf,

    /// Output path for the points file.
    ///
    /// Defaults to `<input stem>_horizon_points.txt` next to the input.
    #[arg(short, long)]
    points: Option<PathBuf>,

    /// Also render an overlay PNG marking each extracted point.
    #[arg(long, value_name = "PATH")]
    overlay: Option<PathBuf>,

    /// Camera manufacturer, as an external EXIF reader reported it.
    #[arg(long)]
    make: Option<String>,

    /// Camera model, as an external EXIF reader reported it.
    #[arg(long)]
    model: Option<String>,

    /// Focal length in millimeters, as a decimal ("4.25") or an
    /// EXIF-style rational ("17/4").
    #[arg(long, value_name = "MM", value_parser = parse_focal_length)]
    focal_length: Option<FocalLength>,

    /// 35mm-equivalent focal length, same formats as --focal-length.
    #[arg(long, value_name = "MM", value_parser = parse_focal_length)]
    focal_length_35mm: Option<FocalLength>,

    /// The capture carries GPS tags.
    #[arg(long)]
    gps: bool,

    /// Maximum working dimension; larger images are downscaled for
    /// extraction and points are mapped back. 0 disables the bound.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_MAX_DIMENSION)]
    max_dimension: u32,

    /// Gaussian blur sigma before gradient edge detection.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_BLUR_SIGMA)]
    blur_sigma: f32,

    /// Hysteresis low threshold for the gradient edge map.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_CANNY_LOW)]
    canny_low: f32,

    /// Hysteresis high threshold for the gradient edge map.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_CANNY_HIGH)]
    canny_high: f32,

    /// Blur sigma for softening the color-segmentation mask.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_MASK_BLUR_SIGMA)]
    mask_blur_sigma: f32,

    /// Structuring element radius for mask cleanup (2 gives 5x5).
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_MORPH_RADIUS)]
    morph_radius: u8,
}

impl Args {
    fn config(&self) -> PipelineConfig {
        PipelineConfig {
            max_dimension: self.max_dimension,
            blur_sigma: self.blur_sigma,
            canny_low: self.canny_low,
            canny_high: self.canny_high,
            mask_blur_sigma: self.mask_blur_sigma,
            morph_radius: self.morph_radius,
        }
    }

    fn metadata(&self) -> Option<CaptureMetadata> {
        if self.make.is_none()
            && self.model.is_none()
            && self.focal_length.is_none()
            && self.focal_length_35mm.is_none()
            && !self.gps
        {
            return None;
        }
        Some(CaptureMetadata {
            make: self.make.clone(),
            model: self.model.clone(),
            focal_length: self.focal_length,
            focal_length_35mm: self.focal_length_35mm,
            has_gps: self.gps,
        })
    }
}

/// Parse a focal length given as a decimal or an EXIF-style rational.
fn parse_focal_length(s: &str) -> Result<FocalLength, String> {
    if let Some((num_str, den_str)) = s.split_once('/') {
        let numerator: u32 = num_str
            .trim()
            .parse()
            .map_err(|e| format!("invalid rational numerator '{num_str}': {e}"))?;
        let denominator: u32 = den_str
            .trim()
            .parse()
            .map_err(|e| format!("invalid rational denominator '{den_str}': {e}"))?;
        return Ok(FocalLength::Rational {
            numerator,
            denominator,
        });
    }

    let mm: f64 = s
        .trim()
        .parse()
        .map_err(|e| format!("invalid focal length '{s}': {e}"))?;
    Ok(FocalLength::Millimeters(mm))
}

/// Default points path: `<stem>_horizon_points.txt` next to the input.
fn default_points_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "image".to_string(), |s| s.to_string_lossy().into_owned());
    input.with_file_name(format!("{stem}_horizon_points.txt"))
}

/// Run extraction end to end, turning every failure into a message.
fn run(args: &Args) -> Result<(Extraction, PathBuf), String> {
    eprintln!("Reading image from {}", args.input.display());
    let bytes = std::fs::read(&args.input)
        .map_err(|e| format!("failed to read {}: {e}", args.input.display()))?;

    let context = SourceContext {
        file_name: args
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned()),
        metadata: args.metadata(),
    };

    let extraction = horizon_pipeline::process(&bytes, &context, &args.config())
        .map_err(|e| e.to_string())?;
    eprintln!(
        "Classified as {:?} ({:?}); extracted {} boundary points via the {} algorithm",
        extraction.classification.source,
        extraction.classification.evidence,
        extraction.points.len(),
        extraction.algorithm,
    );
    eprintln!(
        "Foreground regions in working mask: {}",
        extraction.foreground_components,
    );

    let points_path = args
        .points
        .clone()
        .unwrap_or_else(|| default_points_path(&args.input));
    let text = horizon_export::to_points_text(&extraction.points);
    std::fs::write(&points_path, text)
        .map_err(|e| format!("failed to write {}: {e}", points_path.display()))?;
    eprintln!("Wrote points to {}", points_path.display());

    if let Some(overlay_path) = &args.overlay {
        let png = horizon_export::overlay_png(&extraction.original, &extraction.points)
            .map_err(|e| e.to_string())?;
        std::fs::write(overlay_path, png)
            .map_err(|e| format!("failed to write {}: {e}", overlay_path.display()))?;
        eprintln!("Wrote overlay to {}", overlay_path.display());
    }

    Ok((extraction, points_path))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let report = match run(&args) {
        Ok((extraction, points_path)) => ExtractionReport {
            edge_points_file: Some(points_path.to_string_lossy().into_owned()),
            ..ExtractionReport::from_extraction(&extraction)
        },
        Err(message) => {
            eprintln!("Error: {message}");
            ExtractionReport::failure(message)
        }
    };

    match serde_json::to_string(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: failed to serialize report: {e}");
            return ExitCode::FAILURE;
        }
    }

    if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
