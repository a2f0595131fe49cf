//! Glaze renders a glossy, beveled look onto text or an alpha-masked image from a single base
//! color picked out of a style catalog.
//!
//! Everything is CPU compositing over premultiplied RGBA8 buffers:
//!
//! - Parse a [`Catalog`] and resolve a style's color with [`resolve_color`]
//! - Render a preview with [`render_style`] (or drive a long-lived [`Session`])
//! - Export the surface with [`encode_png`]
//!
//! Text goes through the [`GlyphRasterizer`] capability; [`ParleyRasterizer`] is the shipped
//! implementation.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod effects;
mod foundation;
mod render;
mod session;
mod style;

pub use crate::foundation::core::{Canvas, Color, PixelRect, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{GlazeError, GlazeResult};

pub use crate::assets::decode::{DecodedImage, decode_image, load_image_file};
pub use crate::assets::encode::{DEFAULT_EXPORT_NAME, encode_png, write_png};
pub use crate::config::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE_PX, DEFAULT_SAMPLE_TEXT, EffectParams, MAX_FONT_SIZE_PX,
    RenderConfig, RenderMode, parse_font_size,
};
pub use crate::effects::composite::CompositeOp;
pub use crate::effects::ramp::{ColorRamp, RampAmounts, brighten, darken, ramp};
pub use crate::render::bevel::{Bevel, BevelLayerParams, BevelParams, bevel_size, synthesize_bevel};
pub use crate::render::compositor::{GradientSpan, compose_base};
pub use crate::render::pipeline::{
    PLAIN_BACKGROUND, render_plain_preview, render_plain_preview_into, render_preview_into,
    render_style,
};
pub use crate::render::silhouette::{
    ImageSilhouette, build_image_silhouette, build_text_silhouette, fit_size,
};
pub use crate::render::specular::{
    GlareParams, SpecularParams, SpecularTarget, TextSpecularParams, add_outline, add_specular,
    band_rows, outline_width,
};
pub use crate::render::surface::{Silhouette, Surface};
pub use crate::render::text::{GlyphRasterizer, ParleyRasterizer, TextExtent, outline_band};
pub use crate::render::thumbnail::{ThumbnailParams, render_thumbnail};
pub use crate::session::Session;
pub use crate::session::state::{Command, Event, SessionState, reduce};
pub use crate::style::catalog::{
    Catalog, ColorSite, DEFAULT_CATALOG_FILE, HexRef, Style, resolve_color, resolve_hex,
};
pub use crate::style::grid::{EMPTY_GRID_MESSAGE, SheetLayout, StyleGrid, StyleTile, build_grid};
