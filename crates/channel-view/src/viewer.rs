use std::io::Write;

use channel_view_core::{extract_channel, ChannelView, MappingError, SliceError};

use crate::{decode_bmp, DecodeError, DisplayError, DisplaySurface, ViewerConfig};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by [`ImageChannelViewer::run`].
#[derive(thiserror::Error, Debug)]
pub enum ViewerError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Slice(#[from] SliceError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Display(#[from] DisplayError),

    #[error("failed to write viewer report: {0}")]
    Report(#[from] std::io::Error),
}

/// Decode -> report shape -> slice one channel -> render as grayscale.
#[derive(Clone, Debug, Default)]
pub struct ImageChannelViewer {
    config: ViewerConfig,
}

impl ImageChannelViewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Run the pipeline once.
    ///
    /// `Loading image...` is written to `out` first, then
    /// `Shape of image is (H, W, C)` once decoding succeeds. The surface is
    /// only reached when decoding, slicing and mapping all succeed.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, surface, out),
            fields(
                image = %self.config.image_path,
                width = self.config.crop.width,
                height = self.config.crop.height,
                channel = self.config.crop.channel
            )
        )
    )]
    pub fn run<W: Write>(
        &self,
        surface: &mut dyn DisplaySurface,
        out: &mut W,
    ) -> Result<ChannelView, ViewerError> {
        writeln!(out, "Loading image...")?;
        out.flush()?;
        let grid = decode_bmp(&self.config.image_path)?;

        let (h, w, c) = grid.shape();
        writeln!(out, "Shape of image is ({h}, {w}, {c})")?;
        out.flush()?;

        let view = extract_channel(&grid, self.config.crop)?;
        log::debug!(
            "cropped channel {} to {}x{}",
            self.config.crop.channel,
            view.height,
            view.width
        );

        let frame = self.config.mapping.render(&view)?;
        surface.present(&frame)?;
        Ok(view)
    }
}
