//! The style picker: one glossy tile per catalog entry, or an explicit empty state.

use crate::foundation::core::{Canvas, Color, Rgba8Premul};
use crate::foundation::error::{GlazeError, GlazeResult};
use crate::render::surface::Surface;
use crate::render::thumbnail::{ThumbnailParams, render_thumbnail};
use crate::style::catalog::{Catalog, ColorSite, resolve_color, resolve_hex};

/// Shown in place of tiles when the catalog has no styles.
pub const EMPTY_GRID_MESSAGE: &str = "no styles in catalog";

/// One entry of the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleTile {
    /// Position in the catalog.
    pub index: usize,
    /// Display label.
    pub label: String,
    /// Resolved hex, verbatim.
    pub hex: String,
    /// Color the tile renders with.
    pub color: Color,
}

/// Grid contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StyleGrid {
    /// The catalog had no styles.
    Empty,
    /// One tile per style, in catalog order.
    Tiles(Vec<StyleTile>),
}

/// Layout of a contact sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetLayout {
    /// Tiles per row.
    pub columns: u32,
    /// Size of one tile.
    pub tile: Canvas,
    /// Space between tiles and around the sheet.
    pub gap: u32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            columns: 4,
            tile: Canvas::THUMBNAIL,
            gap: 8,
        }
    }
}

/// Build the grid for `catalog`, resolving colors for `site`.
pub fn build_grid(catalog: &Catalog, site: ColorSite) -> StyleGrid {
    if catalog.is_empty() {
        return StyleGrid::Empty;
    }
    StyleGrid::Tiles(
        catalog
            .styles
            .iter()
            .enumerate()
            .map(|(index, style)| StyleTile {
                index,
                label: style.label().to_owned(),
                hex: resolve_hex(style, site).to_owned(),
                color: resolve_color(style, site),
            })
            .collect(),
    )
}

impl StyleGrid {
    /// Tiles, empty for [`StyleGrid::Empty`].
    pub fn tiles(&self) -> &[StyleTile] {
        match self {
            Self::Empty => &[],
            Self::Tiles(t) => t,
        }
    }

    /// `true` for the empty indicator.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Render every tile.
    #[tracing::instrument(level = "debug", skip_all, fields(tiles = self.tiles().len()))]
    pub fn render_tiles(
        &self,
        tile: Canvas,
        params: &ThumbnailParams,
    ) -> GlazeResult<Vec<Surface>> {
        self.tiles()
            .iter()
            .map(|t| render_thumbnail(t.color, tile, params))
            .collect()
    }

    /// All tiles on one sheet, row-major. `None` for an empty grid.
    pub fn contact_sheet(
        &self,
        layout: SheetLayout,
        background: Rgba8Premul,
        params: &ThumbnailParams,
    ) -> GlazeResult<Option<Surface>> {
        let tiles = self.tiles();
        if tiles.is_empty() {
            return Ok(None);
        }
        if layout.columns == 0 {
            return Err(GlazeError::validation("contact sheet needs at least one column"));
        }
        let count = u32::try_from(tiles.len())
            .map_err(|_| GlazeError::validation("too many tiles for one sheet"))?;
        let cols = layout.columns.min(count);
        let rows = count.div_ceil(cols);
        let span = |n: u32, side: u32| -> Option<u32> {
            side.checked_add(layout.gap)?.checked_mul(n)?.checked_add(layout.gap)
        };
        let (Some(w), Some(h)) = (span(cols, layout.tile.width), span(rows, layout.tile.height))
        else {
            return Err(GlazeError::validation("contact sheet size overflow"));
        };
        let mut sheet = Surface::filled(Canvas::new(w, h)?, background);

        for (i, surface) in self.render_tiles(layout.tile, params)?.iter().enumerate() {
            let (col, row) = (i as u32 % cols, i as u32 / cols);
            let x = layout.gap + col * (layout.tile.width + layout.gap);
            let y = layout.gap + row * (layout.tile.height + layout.gap);
            sheet.blit(surface, x, y);
        }
        Ok(Some(sheet))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/grid.rs"]
mod tests;
