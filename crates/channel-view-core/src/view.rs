use serde::{Deserialize, Serialize};

use crate::PixelGrid;

/// Errors raised when a crop does not fit inside the decoded grid.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SliceError {
    #[error(
        "crop {requested_height}x{requested_width} exceeds image bounds {height}x{width} (height x width)"
    )]
    CropOutOfBounds {
        requested_height: usize,
        requested_width: usize,
        height: usize,
        width: usize,
    },

    #[error("channel index {channel} out of bounds for image with {channels} channel(s)")]
    ChannelOutOfBounds { channel: usize, channels: usize },

    #[error("crop region must be non-empty (height={height}, width={width})")]
    EmptyRegion { height: usize, width: usize },
}

fn default_width() -> usize {
    160
}

fn default_height() -> usize {
    120
}

/// Top-left crop plus the channel to keep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default)]
    pub channel: usize,
}

impl Default for CropRegion {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            channel: 0,
        }
    }
}

/// Single channel of a [`PixelGrid`], `height x width`, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelView {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl ChannelView {
    /// `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.data[row * self.width + col])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.width.max(1))
    }
}

/// Slice `grid[0..height, 0..width, channel]`.
///
/// Regions larger than the grid fail instead of being clamped, so the
/// returned view always has exactly the requested shape.
pub fn extract_channel(grid: &PixelGrid, region: CropRegion) -> Result<ChannelView, SliceError> {
    let (height, width, channels) = grid.shape();
    if region.width == 0 || region.height == 0 {
        return Err(SliceError::EmptyRegion {
            height: region.height,
            width: region.width,
        });
    }
    if region.height > height || region.width > width {
        return Err(SliceError::CropOutOfBounds {
            requested_height: region.height,
            requested_width: region.width,
            height,
            width,
        });
    }
    if region.channel >= channels {
        return Err(SliceError::ChannelOutOfBounds {
            channel: region.channel,
            channels,
        });
    }

    let raw = grid.as_raw();
    let row_stride = width * channels;
    let mut data = Vec::with_capacity(region.width * region.height);
    for row in raw.chunks_exact(row_stride).take(region.height) {
        data.extend(
            row.chunks_exact(channels)
                .take(region.width)
                .map(|px| px[region.channel]),
        );
    }

    Ok(ChannelView {
        width: region.width,
        height: region.height,
        data,
    })
}
