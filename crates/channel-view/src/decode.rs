use std::path::{Path, PathBuf};

use channel_view_core::{GridError, PixelGrid};
use image::{DynamicImage, ImageFormat, ImageReader};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced while turning a file into a [`PixelGrid`].
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path} as BMP: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Decode a BMP file into a `height x width x channels` grid.
///
/// The format is fixed to BMP; neither the extension nor the file magic is
/// used to pick a decoder. The file handle lives inside the reader and is
/// closed when decoding returns.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip_all))]
pub fn decode_bmp(path: impl AsRef<Path>) -> Result<PixelGrid, DecodeError> {
    let path = path.as_ref();
    let mut reader = ImageReader::open(path).map_err(|source| DecodeError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    reader.set_format(ImageFormat::Bmp);
    let img = reader.decode().map_err(|source| DecodeError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    pixel_grid_from_dynamic(img)
}

/// Convert a decoded `image::DynamicImage` into the core grid type.
///
/// 8-bit layouts keep their channel count (L8 = 1, La8 = 2, Rgb8 = 3,
/// Rgba8 = 4). Wider sample types are converted to 8-bit RGB, or RGBA when
/// they carry alpha.
pub fn pixel_grid_from_dynamic(img: DynamicImage) -> Result<PixelGrid, DecodeError> {
    let height = img.height() as usize;
    let width = img.width() as usize;
    let (channels, data) = match img {
        DynamicImage::ImageLuma8(buf) => (1, buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => (2, buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => (3, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => (4, buf.into_raw()),
        other if other.color().has_alpha() => (4, other.to_rgba8().into_raw()),
        other => (3, other.to_rgb8().into_raw()),
    };
    Ok(PixelGrid::from_raw(height, width, channels, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, ImageBuffer, Rgb};

    #[test]
    fn eight_bit_layouts_keep_channel_count() {
        let la = GrayAlphaImage::from_pixel(3, 2, image::LumaA([9, 200]));
        let grid = pixel_grid_from_dynamic(DynamicImage::ImageLumaA8(la)).expect("grid");
        assert_eq!(grid.shape(), (2, 3, 2));
        assert_eq!(grid.pixel(1, 2), Some(&[9u8, 200][..]));
    }

    #[test]
    fn sixteen_bit_rgb_is_narrowed_to_eight_bit() {
        let buf: ImageBuffer<Rgb<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(2, 2, Rgb([0xffff, 0x0000, 0x8080]));
        let grid = pixel_grid_from_dynamic(DynamicImage::ImageRgb16(buf)).expect("grid");
        assert_eq!(grid.shape(), (2, 2, 3));
        assert_eq!(grid.pixel(0, 0), Some(&[0xffu8, 0x00, 0x80][..]));
    }

    #[test]
    fn missing_file_reports_open_error() {
        let err = decode_bmp("definitely/not/here.bmp").unwrap_err();
        assert!(matches!(err, DecodeError::Open { .. }), "{err:?}");
        assert!(err.to_string().contains("not/here.bmp"));
    }
}
