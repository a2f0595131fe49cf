//! Style catalog JSON and color resolution.

use std::path::Path;

use serde::Deserialize as _;

use crate::foundation::core::Color;
use crate::foundation::error::{GlazeError, GlazeResult};

/// Default catalog file name, looked up in the working directory.
pub const DEFAULT_CATALOG_FILE: &str = "droos-style-parsed-colors.json";

/// `{ "hex": "#rrggbb" }` as found in `avg_color` and `candidates`.
///
/// A `hex` that is not a string reads as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HexRef {
    /// Hex string, used verbatim.
    #[serde(default, deserialize_with = "string_only")]
    pub hex: Option<String>,
}

impl HexRef {
    fn from_value(v: serde_json::Value) -> Option<Self> {
        match v {
            serde_json::Value::Object(mut map) => Some(Self {
                hex: match map.remove("hex") {
                    Some(serde_json::Value::String(s)) => Some(s),
                    _ => None,
                },
            }),
            _ => None,
        }
    }
}

/// One catalog entry. Unknown fields are ignored, and fields of an unexpected type read as
/// absent instead of failing the whole catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Style {
    /// Display name.
    #[serde(default, deserialize_with = "string_or_number")]
    pub name: Option<String>,
    /// Identifier; numbers are accepted and kept as text.
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    /// Source file the style was extracted from.
    #[serde(default, deserialize_with = "string_only")]
    pub file: Option<String>,
    /// Average color of the style.
    #[serde(default, deserialize_with = "lenient_hex_ref")]
    pub avg_color: Option<HexRef>,
    /// Candidate colors, most relevant first. Entries that are not objects read as empty.
    #[serde(default, deserialize_with = "lenient_candidates")]
    pub candidates: Option<Vec<HexRef>>,
}

fn string_only<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(d)? {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_hex_ref<'de, D>(d: D) -> Result<Option<HexRef>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<serde_json::Value>::deserialize(d)?.and_then(HexRef::from_value))
}

fn lenient_candidates<'de, D>(d: D) -> Result<Option<Vec<HexRef>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(d)? {
        Some(serde_json::Value::Array(items)) => Some(
            items
                .into_iter()
                .map(|v| HexRef::from_value(v).unwrap_or_default())
                .collect(),
        ),
        _ => None,
    })
}

fn string_or_number<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(d)? {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn null_as_empty<'de, D>(d: D) -> Result<Vec<Style>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let items = Option::<Vec<serde_json::Value>>::deserialize(d)?.unwrap_or_default();
    Ok(items
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap_or_default())
        .collect())
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

impl Style {
    /// `name`, else `id`, else `file`, else `"unnamed"`.
    pub fn label(&self) -> &str {
        non_empty(&self.name)
            .or_else(|| non_empty(&self.id))
            .or_else(|| non_empty(&self.file))
            .unwrap_or("unnamed")
    }
}

/// Where a style color is being resolved; each site has its own fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorSite {
    /// Catalog listing, before a grid is built.
    CatalogThumbnail,
    /// The main preview.
    Preview,
    /// Tile rendered by the style grid.
    GridThumbnail,
}

impl ColorSite {
    /// Fallback hex for this site.
    pub const fn fallback_hex(self) -> &'static str {
        match self {
            Self::CatalogThumbnail => "#7ab7ff",
            Self::Preview => "#4fb3ff",
            Self::GridThumbnail => "#3aa0ff",
        }
    }

    /// Fallback as a parsed color.
    pub const fn fallback(self) -> Color {
        match self {
            Self::CatalogThumbnail => Color::rgb(0x7a, 0xb7, 0xff),
            Self::Preview => Color::rgb(0x4f, 0xb3, 0xff),
            Self::GridThumbnail => Color::rgb(0x3a, 0xa0, 0xff),
        }
    }
}

/// The hex string a style renders with: `avg_color.hex`, else the first candidate's hex, else
/// the site fallback. The string is returned as stored.
pub fn resolve_hex(style: &Style, site: ColorSite) -> &str {
    if let Some(hex) = style.avg_color.as_ref().and_then(|c| non_empty(&c.hex)) {
        return hex;
    }
    if let Some(hex) = style
        .candidates
        .as_ref()
        .and_then(|c| c.first())
        .and_then(|c| non_empty(&c.hex))
    {
        return hex;
    }
    site.fallback_hex()
}

/// Parsed form of [`resolve_hex`]; unparseable hex renders with the site fallback.
pub fn resolve_color(style: &Style, site: ColorSite) -> Color {
    let hex = resolve_hex(style, site);
    match Color::from_hex(hex) {
        Ok(c) => c,
        Err(err) => {
            tracing::warn!(
                style = style.label(),
                hex,
                %err,
                "unparseable style color, using fallback"
            );
            site.fallback()
        }
    }
}

/// A parsed catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Catalog {
    /// Styles in file order; missing or `null` means none. Entries that are not objects become
    /// empty styles.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub styles: Vec<Style>,
}

impl Catalog {
    /// Parse catalog JSON.
    pub fn from_json_str(json: &str) -> GlazeResult<Self> {
        serde_json::from_str(json).map_err(|e| GlazeError::catalog_parse(e.to_string()))
    }

    /// Read and parse a catalog file. Read failures are fetch errors, bad JSON is a parse error.
    pub fn from_path(path: impl AsRef<Path>) -> GlazeResult<Self> {
        let path = path.as_ref();
        let txt = std::fs::read_to_string(path).map_err(|e| {
            GlazeError::catalog_fetch(format!("read catalog '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&txt)
    }

    /// Load [`DEFAULT_CATALOG_FILE`] from `dir`; any failure is a fetch error.
    pub fn fetch_default(dir: impl AsRef<Path>) -> GlazeResult<Self> {
        let path = dir.as_ref().join(DEFAULT_CATALOG_FILE);
        Self::from_path(&path).map_err(|e| match e {
            GlazeError::CatalogParse(msg) => {
                GlazeError::catalog_fetch(format!("default catalog '{}': {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Number of styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// `true` when there are no styles.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Look a style up by label (exact, then case-insensitive) or by zero-based index.
    pub fn find(&self, key: &str) -> Option<(usize, &Style)> {
        let by_label = self
            .styles
            .iter()
            .position(|s| s.label() == key)
            .or_else(|| {
                self.styles
                    .iter()
                    .position(|s| s.label().eq_ignore_ascii_case(key))
            });
        let idx = by_label
            .or_else(|| key.trim().parse::<usize>().ok().filter(|&i| i < self.len()))?;
        Some((idx, &self.styles[idx]))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/catalog.rs"]
mod tests;
