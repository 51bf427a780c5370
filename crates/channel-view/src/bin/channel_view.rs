use std::path::PathBuf;
use std::process::ExitCode;

use channel_view::{
    DisplaySurface, GrayMapping, ImageChannelViewer, PngSurface, ViewerConfig, ViewerError,
};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] channel_view::ConfigError),

    #[error(transparent)]
    Display(#[from] channel_view::DisplayError),

    #[error(transparent)]
    Viewer(#[from] ViewerError),

    #[cfg(not(feature = "display"))]
    #[error("built without the `display` feature; pass --output <png> to render to a file")]
    NoWindow,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MappingArg {
    /// Stretch the crop's min..max to black..white.
    MinMax,
    /// Show sample values as-is.
    Identity,
}

/// Load a BMP image, print its shape, and show one channel as grayscale.
#[derive(Parser, Debug)]
#[command(name = "channel-view", version, about)]
struct Cli {
    /// JSON viewer config; command-line flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// BMP file to load [default: Img.bmp].
    #[arg(long)]
    image: Option<String>,

    /// Crop width in pixels [default: 160].
    #[arg(long)]
    width: Option<usize>,

    /// Crop height in pixels [default: 120].
    #[arg(long)]
    height: Option<usize>,

    /// Channel index to show [default: 0].
    #[arg(long)]
    channel: Option<usize>,

    /// Gray mapping [default: min-max].
    #[arg(long, value_enum, conflicts_with_all = ["vmin", "vmax"])]
    mapping: Option<MappingArg>,

    /// Lower bound of a fixed gray range.
    #[arg(long, requires = "vmax")]
    vmin: Option<u8>,

    /// Upper bound of a fixed gray range.
    #[arg(long, requires = "vmin")]
    vmax: Option<u8>,

    /// Write the rendered channel to this PNG instead of opening a window.
    #[arg(long)]
    output: Option<String>,

    /// Window magnification (1, 2, 4 or 8) [default: 4].
    #[arg(long)]
    scale: Option<u32>,

    /// Log verbosity on stderr (off, error, warn, info, debug, trace).
    /// `RUST_LOG` takes precedence in `tracing` builds.
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    fn apply(&self, cfg: &mut ViewerConfig) {
        if let Some(image) = &self.image {
            cfg.image_path = image.clone();
        }
        if let Some(width) = self.width {
            cfg.crop.width = width;
        }
        if let Some(height) = self.height {
            cfg.crop.height = height;
        }
        if let Some(channel) = self.channel {
            cfg.crop.channel = channel;
        }
        match (self.mapping, self.vmin.zip(self.vmax)) {
            (Some(MappingArg::MinMax), _) => cfg.mapping = GrayMapping::MinMax,
            (Some(MappingArg::Identity), _) => cfg.mapping = GrayMapping::Identity,
            (None, Some((vmin, vmax))) => cfg.mapping = GrayMapping::Fixed { vmin, vmax },
            (None, None) => {}
        }
        if let Some(output) = &self.output {
            cfg.output_path = Some(output.clone());
        }
        if let Some(scale) = self.scale {
            cfg.scale = scale;
        }
    }
}

fn init_logging(level: LevelFilter) {
    #[cfg(feature = "tracing")]
    {
        channel_view::core::init_tracing(level);
        let _ = tracing_log::LogTracer::init();
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = channel_view::core::init_with_level(level);
    }
}

fn surface_for(cfg: &ViewerConfig) -> Result<Box<dyn DisplaySurface>, CliError> {
    if let Some(path) = &cfg.output_path {
        return Ok(Box::new(PngSurface::new(path)));
    }
    #[cfg(feature = "display")]
    {
        let scale = channel_view::WindowScale::try_from(cfg.scale)?;
        Ok(Box::new(channel_view::WindowSurface::new(
            cfg.image_path.clone(),
            scale,
        )))
    }
    #[cfg(not(feature = "display"))]
    {
        Err(CliError::NoWindow)
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut cfg = match &cli.config {
        Some(path) => ViewerConfig::load_json(path)?,
        None => ViewerConfig::default(),
    };
    cli.apply(&mut cfg);
    log::debug!("viewer config: {cfg:?}");

    let mut surface = surface_for(&cfg)?;
    let viewer = ImageChannelViewer::new(cfg);
    let stdout = std::io::stdout();
    viewer.run(surface.as_mut(), &mut stdout.lock())?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
