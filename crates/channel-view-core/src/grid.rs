/// Errors raised when building a [`PixelGrid`] from a raw buffer.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid pixel buffer length (expected {expected} bytes, got {got})")]
    InvalidBuffer { expected: usize, got: usize },

    #[error("invalid pixel grid dimensions (height={height}, width={width}, channels={channels})")]
    InvalidDimensions {
        height: usize,
        width: usize,
        channels: usize,
    },
}

/// Decoded image as a `height x width x channels` array of `u8`.
///
/// Samples are row-major and channel-interleaved:
/// `data[(row * width + col) * channels + channel]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    height: usize,
    width: usize,
    channels: usize,
    data: Vec<u8>,
}

impl PixelGrid {
    pub fn from_raw(
        height: usize,
        width: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, GridError> {
        if channels == 0 {
            return Err(GridError::InvalidDimensions {
                height,
                width,
                channels,
            });
        }
        let Some(expected) = height
            .checked_mul(width)
            .and_then(|n| n.checked_mul(channels))
        else {
            return Err(GridError::InvalidDimensions {
                height,
                width,
                channels,
            });
        };
        if data.len() != expected {
            return Err(GridError::InvalidBuffer {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            height,
            width,
            channels,
            data,
        })
    }

    /// `(height, width, channels)`, in that order.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, self.channels)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<u8> {
        if row >= self.height || col >= self.width || channel >= self.channels {
            return None;
        }
        Some(self.data[(row * self.width + col) * self.channels + channel])
    }

    /// All samples of one pixel, `channels` long.
    pub fn pixel(&self, row: usize, col: usize) -> Option<&[u8]> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let start = (row * self.width + col) * self.channels;
        Some(&self.data[start..start + self.channels])
    }
}
