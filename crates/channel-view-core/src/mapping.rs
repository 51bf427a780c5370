//! Grayscale mapping from channel samples to display intensities.

use serde::{Deserialize, Serialize};

use crate::ChannelView;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("invalid gray range (vmin={vmin} must be below vmax={vmax})")]
    InvalidRange { vmin: u8, vmax: u8 },
}

/// How sample values become gray levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrayMapping {
    /// Stretch `[min, max]` of the view to `[0, 255]`. A constant view is black.
    #[default]
    MinMax,
    /// Sample `v` is shown as gray level `v`.
    Identity,
    /// Stretch `[vmin, vmax]` to `[0, 255]`, clamping values outside.
    Fixed { vmin: u8, vmax: u8 },
}

/// Rendered grayscale raster, row-major, one byte per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayFrame {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayFrame {
    /// Pack each gray level as `0x00RRGGBB` for framebuffer windows.
    pub fn to_rgb32(&self) -> Vec<u32> {
        self.data
            .iter()
            .map(|&g| {
                let g = g as u32;
                (g << 16) | (g << 8) | g
            })
            .collect()
    }
}

#[inline]
fn stretch(v: u8, lo: u8, hi: u8) -> u8 {
    let range = (hi - lo) as u32;
    let v = v.clamp(lo, hi);
    // Round half up.
    (((v - lo) as u32 * 255 + range / 2) / range) as u8
}

impl GrayMapping {
    pub fn render(&self, view: &ChannelView) -> Result<GrayFrame, MappingError> {
        let data = match *self {
            GrayMapping::Identity => view.data.clone(),
            GrayMapping::MinMax => {
                let lo = view.data.iter().copied().min().unwrap_or(0);
                let hi = view.data.iter().copied().max().unwrap_or(0);
                if lo == hi {
                    vec![0; view.data.len()]
                } else {
                    view.data.iter().map(|&v| stretch(v, lo, hi)).collect()
                }
            }
            GrayMapping::Fixed { vmin, vmax } => {
                if vmin >= vmax {
                    return Err(MappingError::InvalidRange { vmin, vmax });
                }
                view.data.iter().map(|&v| stretch(v, vmin, vmax)).collect()
            }
        };
        Ok(GrayFrame {
            width: view.width,
            height: view.height,
            data,
        })
    }
}
