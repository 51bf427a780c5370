use std::path::{Path, PathBuf};

use channel_view_core::GrayFrame;
use image::{GrayImage, ImageFormat};

#[derive(thiserror::Error, Debug)]
pub enum DisplayError {
    #[error("window error: {0}")]
    Window(String),

    #[error("unsupported window scale {0} (expected 1, 2, 4 or 8)")]
    Scale(u32),

    #[error("frame buffer does not match its dimensions ({width}x{height}, {len} bytes)")]
    FrameSize {
        width: usize,
        height: usize,
        len: usize,
    },

    #[error("failed to write {path}: {source}")]
    Png {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Somewhere a rendered grayscale frame can be shown.
pub trait DisplaySurface {
    fn present(&mut self, frame: &GrayFrame) -> Result<(), DisplayError>;
}

/// Writes the frame to disk as an 8-bit grayscale PNG.
#[derive(Clone, Debug)]
pub struct PngSurface {
    path: PathBuf,
}

impl PngSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DisplaySurface for PngSurface {
    fn present(&mut self, frame: &GrayFrame) -> Result<(), DisplayError> {
        write_gray_png(frame, &self.path)?;
        log::info!("wrote grayscale PNG to {}", self.path.display());
        Ok(())
    }
}

pub fn write_gray_png(frame: &GrayFrame, path: impl AsRef<Path>) -> Result<(), DisplayError> {
    let path = path.as_ref();
    let size_err = || DisplayError::FrameSize {
        width: frame.width,
        height: frame.height,
        len: frame.data.len(),
    };
    let width = u32::try_from(frame.width).map_err(|_| size_err())?;
    let height = u32::try_from(frame.height).map_err(|_| size_err())?;
    let img = GrayImage::from_raw(width, height, frame.data.clone()).ok_or_else(size_err)?;
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|source| DisplayError::Png {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(feature = "display")]
pub use window::{WindowScale, WindowSurface};

#[cfg(feature = "display")]
mod window {
    use std::time::Duration;

    use channel_view_core::GrayFrame;
    use minifb::{Key, Scale, Window, WindowOptions};

    use super::{DisplayError, DisplaySurface};

    /// Integer magnification applied to the window.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct WindowScale(u32);

    impl WindowScale {
        fn to_minifb(self) -> Scale {
            match self.0 {
                1 => Scale::X1,
                2 => Scale::X2,
                8 => Scale::X8,
                _ => Scale::X4,
            }
        }
    }

    impl TryFrom<u32> for WindowScale {
        type Error = DisplayError;

        fn try_from(value: u32) -> Result<Self, Self::Error> {
            match value {
                1 | 2 | 4 | 8 => Ok(Self(value)),
                other => Err(DisplayError::Scale(other)),
            }
        }
    }

    /// Native window showing the frame until it is closed or Escape is pressed.
    pub struct WindowSurface {
        title: String,
        scale: WindowScale,
    }

    impl WindowSurface {
        pub fn new(title: impl Into<String>, scale: WindowScale) -> Self {
            Self {
                title: title.into(),
                scale,
            }
        }
    }

    impl DisplaySurface for WindowSurface {
        fn present(&mut self, frame: &GrayFrame) -> Result<(), DisplayError> {
            let options = WindowOptions {
                scale: self.scale.to_minifb(),
                ..WindowOptions::default()
            };
            let mut window = Window::new(&self.title, frame.width, frame.height, options)
                .map_err(|e| DisplayError::Window(e.to_string()))?;
            // ~60 fps
            window.limit_update_rate(Some(Duration::from_micros(16_600)));

            let buffer = frame.to_rgb32();
            log::info!(
                "showing {}x{} frame, press Escape or close the window to exit",
                frame.width,
                frame.height
            );
            while window.is_open() && !window.is_key_down(Key::Escape) {
                window
                    .update_with_buffer(&buffer, frame.width, frame.height)
                    .map_err(|e| DisplayError::Window(e.to_string()))?;
            }
            Ok(())
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_surface_round_trips_gray_levels() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("frame.png");
        let frame = GrayFrame {
            width: 3,
            height: 2,
            data: vec![0, 64, 128, 192, 255, 1],
        };

        PngSurface::new(&path).present(&frame).expect("present");

        let back = image::open(&path).expect("open png").to_luma8();
        assert_eq!(back.dimensions(), (3, 2));
        assert_eq!(back.into_raw(), frame.data);
    }

    #[test]
    fn mismatched_frame_buffer_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let frame = GrayFrame {
            width: 4,
            height: 4,
            data: vec![0; 3],
        };
        let err = write_gray_png(&frame, dir.path().join("bad.png")).unwrap_err();
        assert!(matches!(err, DisplayError::FrameSize { len: 3, .. }));
    }
}
