//! Render inputs: per-pass [`RenderConfig`] and the tunable [`EffectParams`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use crate::assets::decode::DecodedImage;
use crate::effects::ramp::RampAmounts;
use crate::foundation::error::{GlazeError, GlazeResult};
use crate::render::bevel::BevelParams;
use crate::render::specular::SpecularParams;
use crate::render::thumbnail::ThumbnailParams;

/// Sample text shown when the user leaves the text field empty.
pub const DEFAULT_SAMPLE_TEXT: &str = "النص التجريبي";

/// Font size used when the input is missing or unusable.
pub const DEFAULT_FONT_SIZE_PX: f32 = 140.0;

/// Largest font size a render pass will use; bigger requests are clamped to it.
pub const MAX_FONT_SIZE_PX: f32 = 1024.0;

/// Family requested when the caller names none.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Parse a user-entered font size; anything not a positive finite number yields the default.
/// Sizes above [`MAX_FONT_SIZE_PX`] are clamped.
pub fn parse_font_size(raw: &str) -> f32 {
    match raw.trim().parse::<f32>() {
        Ok(v) if v.is_finite() && v > 0.0 => v.min(MAX_FONT_SIZE_PX),
        _ => DEFAULT_FONT_SIZE_PX,
    }
}

/// What the preview is drawn from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Rendered text.
    #[default]
    Text,
    /// Alpha of a supplied image.
    Image,
}

/// Immutable input to one render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Requested mode.
    pub mode: RenderMode,
    /// Text to draw; empty means [`DEFAULT_SAMPLE_TEXT`].
    pub text: String,
    /// Font family name.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size_px: f32,
    /// Image used in [`RenderMode::Image`].
    pub source_image: Option<Arc<DecodedImage>>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Text,
            text: String::new(),
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            font_size_px: DEFAULT_FONT_SIZE_PX,
            source_image: None,
        }
    }
}

impl RenderConfig {
    /// Text actually drawn.
    pub fn effective_text(&self) -> &str {
        if self.text.trim().is_empty() {
            DEFAULT_SAMPLE_TEXT
        } else {
            &self.text
        }
    }

    /// Font size actually used.
    pub fn effective_font_size(&self) -> f32 {
        if self.font_size_px.is_finite() && self.font_size_px > 0.0 {
            self.font_size_px.min(MAX_FONT_SIZE_PX)
        } else {
            DEFAULT_FONT_SIZE_PX
        }
    }

    /// Image mode without an image renders as text.
    pub fn effective_mode(&self) -> RenderMode {
        match (self.mode, &self.source_image) {
            (RenderMode::Image, Some(_)) => RenderMode::Image,
            _ => RenderMode::Text,
        }
    }
}

/// Every tunable constant of the effect passes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectParams {
    /// Ramp for text mode.
    pub text_ramp: RampAmounts,
    /// Ramp for image mode.
    pub image_ramp: RampAmounts,
    /// Emboss layers.
    pub bevel: BevelParams,
    /// Gloss band, outline and glare.
    pub specular: SpecularParams,
    /// Catalog tiles.
    pub thumbnail: ThumbnailParams,
    /// Text gradient reaches this many font sizes above and below the text center.
    pub text_span_ratio: f32,
    /// Image box as a fraction of the canvas.
    pub image_box_ratio: f32,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            text_ramp: RampAmounts::TEXT,
            image_ramp: RampAmounts::IMAGE,
            bevel: BevelParams::default(),
            specular: SpecularParams::default(),
            thumbnail: ThumbnailParams::default(),
            text_span_ratio: 1.05,
            image_box_ratio: 0.9,
        }
    }
}

impl EffectParams {
    /// Parse params from a JSON reader; missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> GlazeResult<Self> {
        let params: Self = serde_json::from_reader(r)
            .map_err(|e| GlazeError::serde(format!("parse effect params JSON: {e}")))?;
        params.validate()?;
        Ok(params)
    }

    /// Parse params from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> GlazeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GlazeError::validation(format!("open effect params '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every section.
    pub fn validate(&self) -> GlazeResult<()> {
        for r in [self.text_ramp, self.image_ramp, self.thumbnail.ramp] {
            let finite = r.lighten.is_finite() && r.darken.is_finite() && r.mid_stop.is_finite();
            if !finite || !(0.0..=1.0).contains(&r.mid_stop) {
                return Err(GlazeError::validation(
                    "ramp amounts must be finite with mid_stop in [0, 1]",
                ));
            }
        }
        if !(self.text_span_ratio.is_finite() && self.text_span_ratio > 0.0) {
            return Err(GlazeError::validation("text_span_ratio must be finite and > 0"));
        }
        if !(self.image_box_ratio > 0.0 && self.image_box_ratio <= 1.0) {
            return Err(GlazeError::validation("image_box_ratio must be in (0, 1]"));
        }
        self.bevel.validate()?;
        self.specular.validate()?;
        self.thumbnail.validate()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
