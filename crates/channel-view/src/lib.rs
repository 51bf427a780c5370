//! Load a BMP image, report its shape, and show one color channel as a
//! grayscale raster.
//!
//! This crate provides:
//! - re-exports of the image-type-agnostic model in `channel-view-core`
//! - BMP decoding into a [`PixelGrid`] through the `image` crate
//! - display surfaces: a `minifb` window (feature `display`) and a PNG file
//! - the [`ImageChannelViewer`] pipeline and its JSON [`ViewerConfig`]
//!
//! ## Quickstart
//!
//! ```no_run
//! use channel_view::{ImageChannelViewer, PngSurface, ViewerConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let viewer = ImageChannelViewer::new(ViewerConfig::default());
//! let mut surface = PngSurface::new("channel0.png");
//! let view = viewer.run(&mut surface, &mut std::io::stdout())?;
//! println!("rendered {:?}", view.shape());
//! # Ok(())
//! # }
//! ```

pub use channel_view_core as core;

pub use channel_view_core::{
    extract_channel, ChannelView, CropRegion, GrayFrame, GrayMapping, PixelGrid,
};

mod config;
mod decode;
mod display;
mod viewer;

pub use config::{ConfigError, ViewerConfig, DEFAULT_IMAGE_PATH};
pub use decode::{decode_bmp, pixel_grid_from_dynamic, DecodeError};
pub use display::{write_gray_png, DisplayError, DisplaySurface, PngSurface};
pub use viewer::{ImageChannelViewer, ViewerError};

#[cfg(feature = "display")]
pub use display::{WindowScale, WindowSurface};
