//! Core types for the `channel-view` workspace.
//!
//! This crate is intentionally small. It does *not* depend on any concrete
//! image decoder or display backend: a decoder produces a [`PixelGrid`], the
//! grid is sliced into a [`ChannelView`], and a [`GrayMapping`] turns the view
//! into a [`GrayFrame`] that any surface can present.

mod grid;
mod logger;
mod mapping;
mod view;

pub use grid::{GridError, PixelGrid};
pub use mapping::{GrayFrame, GrayMapping, MappingError};
pub use view::{extract_channel, ChannelView, CropRegion, SliceError};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
