//! A long-lived preview: one output surface redrawn after every state transition.

pub(crate) mod state;

use std::path::Path;
use std::sync::Arc;

use crate::assets::decode::{decode_image, load_image_file};
use crate::assets::encode::encode_png;
use crate::config::EffectParams;
use crate::foundation::core::Canvas;
use crate::foundation::error::{GlazeError, GlazeResult};
use crate::render::pipeline::{render_plain_preview_into, render_preview_into};
use crate::render::surface::Surface;
use crate::render::text::GlyphRasterizer;
use crate::style::catalog::{Catalog, ColorSite, resolve_color};
use state::{Command, Event, SessionState, reduce};

/// Owns the output surface, the glyph engine and the state; the only writer of the surface.
pub struct Session<G: GlyphRasterizer> {
    state: SessionState,
    output: Surface,
    glyphs: G,
    params: EffectParams,
}

impl<G: GlyphRasterizer> Session<G> {
    /// New session with a transparent output surface.
    pub fn new(canvas: Canvas, glyphs: G, params: EffectParams) -> GlazeResult<Self> {
        params.validate()?;
        Ok(Self {
            state: SessionState::default(),
            output: Surface::new(Canvas::new(canvas.width, canvas.height)?),
            glyphs,
            params,
        })
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The preview surface.
    pub fn output(&self) -> &Surface {
        &self.output
    }

    /// Effect tuning in use.
    pub fn params(&self) -> &EffectParams {
        &self.params
    }

    /// Glyph engine, e.g. for registering more fonts.
    pub fn glyphs_mut(&mut self) -> &mut G {
        &mut self.glyphs
    }

    /// Apply `event`, then run the resulting command.
    ///
    /// A failed redraw leaves its status message in the state and is also returned.
    #[tracing::instrument(level = "debug", skip_all, fields(event = event.name()))]
    pub fn dispatch(&mut self, event: Event) -> GlazeResult<Command> {
        let cmd = self.update(event);
        self.execute(cmd)?;
        Ok(cmd)
    }

    /// Apply `event` without drawing; the returned command is left to the caller.
    pub fn update(&mut self, event: Event) -> Command {
        let (next, cmd) = reduce(std::mem::take(&mut self.state), event);
        self.state = next;
        cmd
    }

    /// Redraw for the current selection without changing state.
    pub fn redraw(&mut self) -> GlazeResult<()> {
        self.execute(self.state.redraw_command())
    }

    fn execute(&mut self, cmd: Command) -> GlazeResult<()> {
        let res = match cmd {
            Command::None => return Ok(()),
            Command::RenderStyled => match &self.state.selected {
                Some(style) => render_preview_into(
                    &mut self.output,
                    resolve_color(style, ColorSite::Preview),
                    &self.state.config,
                    &mut self.glyphs,
                    &self.params,
                ),
                None => render_plain_preview_into(
                    &mut self.output,
                    &self.state.config,
                    &mut self.glyphs,
                ),
            },
            Command::RenderPlain => {
                render_plain_preview_into(&mut self.output, &self.state.config, &mut self.glyphs)
            }
        };
        if let Err(err) = &res {
            tracing::warn!(%err, ?cmd, "render failed");
            self.state.status = err.status_message();
        }
        res
    }

    /// Parse catalog JSON text.
    pub fn load_catalog_json(&mut self, json: impl Into<String>) -> GlazeResult<Command> {
        self.dispatch(Event::LoadCatalogJson(json.into()))
    }

    /// Load a catalog file. An unreadable file is an error and leaves the state untouched.
    pub fn load_catalog_file(&mut self, path: &Path) -> GlazeResult<Command> {
        let txt = std::fs::read_to_string(path).map_err(|e| {
            GlazeError::catalog_fetch(format!("read catalog '{}': {e}", path.display()))
        })?;
        self.load_catalog_json(txt)
    }

    /// Load the default catalog from `dir`.
    pub fn load_default_catalog(&mut self, dir: &Path) -> GlazeResult<Command> {
        match Catalog::fetch_default(dir) {
            Ok(catalog) => self.dispatch(Event::DefaultCatalogLoaded(catalog)),
            Err(err) => self.dispatch(Event::CatalogUnavailable {
                reason: err.to_string(),
            }),
        }
    }

    /// Decode image bytes; on failure the previous image stays.
    pub fn load_image_bytes(&mut self, bytes: &[u8]) -> GlazeResult<Command> {
        match decode_image(bytes) {
            Ok(img) => self.dispatch(Event::LoadImage(Arc::new(img))),
            Err(err) => self.dispatch(Event::ImageUnavailable {
                reason: err.to_string(),
            }),
        }
    }

    /// Decode an image file; on failure the previous image stays.
    pub fn load_image_file(&mut self, path: &Path) -> GlazeResult<Command> {
        match load_image_file(path) {
            Ok(img) => self.dispatch(Event::LoadImage(Arc::new(img))),
            Err(err) => self.dispatch(Event::ImageUnavailable {
                reason: err.to_string(),
            }),
        }
    }

    /// PNG of the current preview.
    pub fn export_png(&self) -> GlazeResult<Vec<u8>> {
        encode_png(&self.output)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/session.rs"]
mod tests;
