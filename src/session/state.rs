//! Session state and its pure transition function.
//!
//! Every change goes through [`reduce`]; rendering happens afterwards, driven by the returned
//! [`Command`].

use std::sync::Arc;

use crate::assets::decode::DecodedImage;
use crate::config::{RenderConfig, RenderMode, parse_font_size};
use crate::style::catalog::{Catalog, ColorSite, Style, resolve_hex};
use crate::style::grid::{StyleGrid, build_grid};

/// Everything the preview depends on.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    /// Last catalog that parsed.
    pub catalog: Option<Catalog>,
    /// Grid built from `catalog`.
    pub grid: Option<StyleGrid>,
    /// Style the preview is drawn with; kept when a new catalog loads.
    pub selected: Option<Style>,
    /// Inputs of the next render pass.
    pub config: RenderConfig,
    /// Short human-readable status line.
    pub status: String,
}

/// Inputs to the session.
#[derive(Clone, Debug)]
pub enum Event {
    /// Raw catalog JSON was supplied.
    LoadCatalogJson(String),
    /// The default catalog was fetched and parsed.
    DefaultCatalogLoaded(Catalog),
    /// The default catalog could not be fetched.
    CatalogUnavailable {
        /// Underlying cause, for logs.
        reason: String,
    },
    /// A grid tile was picked.
    SelectStyle(usize),
    /// Text inputs were applied. `font_size` is the raw field value.
    ApplyText {
        /// Text field; empty means the sample text.
        text: String,
        /// Font family.
        font_family: String,
        /// Font size as typed.
        font_size: String,
    },
    /// An image decoded successfully.
    LoadImage(Arc<DecodedImage>),
    /// An image failed to load; the previous one is kept.
    ImageUnavailable {
        /// Underlying cause, for logs.
        reason: String,
    },
    /// The image was removed.
    ClearImage,
    /// The render mode changed.
    SetMode(RenderMode),
}

impl Event {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadCatalogJson(_) => "load_catalog_json",
            Self::DefaultCatalogLoaded(_) => "default_catalog_loaded",
            Self::CatalogUnavailable { .. } => "catalog_unavailable",
            Self::SelectStyle(_) => "select_style",
            Self::ApplyText { .. } => "apply_text",
            Self::LoadImage(_) => "load_image",
            Self::ImageUnavailable { .. } => "image_unavailable",
            Self::ClearImage => "clear_image",
            Self::SetMode(_) => "set_mode",
        }
    }
}

/// What the session must do after a transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Command {
    /// Nothing to redraw.
    #[default]
    None,
    /// Redraw the glossy preview of the selected style.
    RenderStyled,
    /// Redraw the un-styled preview.
    RenderPlain,
}

impl SessionState {
    /// Redraw matching the current selection.
    pub fn redraw_command(&self) -> Command {
        if self.selected.is_some() {
            Command::RenderStyled
        } else {
            Command::RenderPlain
        }
    }
}

/// Apply `event` to `state`.
pub fn reduce(mut state: SessionState, event: Event) -> (SessionState, Command) {
    let cmd = match event {
        Event::LoadCatalogJson(json) => match Catalog::from_json_str(&json) {
            Ok(catalog) => {
                state.status = format!("loaded catalog: {} styles", catalog.len());
                accept_catalog(&mut state, catalog);
                Command::None
            }
            Err(err) => {
                tracing::warn!(%err, "catalog JSON rejected");
                state.status = err.status_message();
                Command::None
            }
        },
        Event::DefaultCatalogLoaded(catalog) => {
            state.status = format!("using default catalog: {} styles", catalog.len());
            accept_catalog(&mut state, catalog);
            Command::None
        }
        Event::CatalogUnavailable { reason } => {
            tracing::warn!(%reason, "default catalog unavailable");
            state.status = "no default catalog available".to_owned();
            Command::None
        }
        Event::SelectStyle(index) => {
            let picked = state.catalog.as_ref().and_then(|c| c.styles.get(index)).cloned();
            match picked {
                Some(style) => {
                    state.status = format!(
                        "applied style: {} ({})",
                        style.label(),
                        resolve_hex(&style, ColorSite::Preview)
                    );
                    state.selected = Some(style);
                    Command::RenderStyled
                }
                None => {
                    state.status = format!("no style at index {index}");
                    Command::None
                }
            }
        }
        Event::ApplyText {
            text,
            font_family,
            font_size,
        } => {
            state.config.text = text;
            state.config.font_family = font_family;
            state.config.font_size_px = parse_font_size(&font_size);
            state.redraw_command()
        }
        Event::LoadImage(image) => {
            state.config.source_image = Some(image);
            state.redraw_command()
        }
        Event::ImageUnavailable { reason } => {
            tracing::warn!(%reason, "image rejected");
            state.status = "failed to load image".to_owned();
            Command::None
        }
        Event::ClearImage => {
            state.config.source_image = None;
            Command::RenderPlain
        }
        Event::SetMode(mode) => {
            state.config.mode = mode;
            state.redraw_command()
        }
    };
    (state, cmd)
}

fn accept_catalog(state: &mut SessionState, catalog: Catalog) {
    state.grid = Some(build_grid(&catalog, ColorSite::GridThumbnail));
    state.catalog = Some(catalog);
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
