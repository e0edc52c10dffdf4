//! quiz-text: font loading, text measurement and glyph rasterization.
//!
//! [`TextEngine`] wraps a single `fontdue` font. The same pen-advance loop
//! backs both [`MeasureText::text_width`] and [`TextEngine::rasterize_line`],
//! so the layout pass measures exactly what the canvas later draws.
//!
//! # Example
//! ```no_run
//! use quiz_core::MeasureText;
//! use quiz_text::TextEngine;
//!
//! let engine = TextEngine::from_system_fonts().expect("Failed to load fonts");
//! let width = engine.text_width("Hello, world!", 24.0);
//! let glyphs = engine.rasterize_line("Hello, world!", 24.0);
//! assert!(width > 0.0 && !glyphs.is_empty());
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use quiz_core::MeasureText;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextError {
    #[error("failed to read font {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse font: {0}")]
    Parse(String),
    #[error("no suitable system font found")]
    NoSystemFont,
}

/// Simplified line metrics, all positive magnitudes in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub line_gap: f32,
}

/// 8-bit coverage mask of one rasterized glyph, row-major.
#[derive(Clone, Debug)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
}

/// A glyph positioned relative to the run origin on the baseline (y-down).
#[derive(Clone, Debug)]
pub struct RasterizedGlyph {
    /// Top-left of the mask relative to the pen origin.
    pub offset: [f32; 2],
    pub mask: Arc<GlyphMask>,
}

/// Glyph masks keyed by (glyph index, pixel size bits).
struct GlyphCache {
    map: Mutex<HashMap<(u16, u32), Arc<GlyphMask>>>,
    max_entries: usize,
}

impl GlyphCache {
    fn new(max_entries: usize) -> Self {
        Self {
            map: Mutex::new(HashMap::new()),
            max_entries: max_entries.max(1),
        }
    }

    fn get_or_insert_with(&self, key: (u16, u32), rasterize: impl FnOnce() -> GlyphMask) -> Arc<GlyphMask> {
        let mut map = self.map.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(hit) = map.get(&key) {
            return hit.clone();
        }
        // Sizes follow the window, so every resize brings a new generation of
        // keys; drop everything once the map has doubled.
        if map.len() >= self.max_entries * 2 {
            map.clear();
        }
        let mask = Arc::new(rasterize());
        map.insert(key, mask.clone());
        mask
    }
}

/// Single-font text engine.
pub struct TextEngine {
    font: fontdue::Font,
    glyphs: GlyphCache,
}

impl TextEngine {
    pub fn from_bytes(bytes: &[u8], collection_index: u32) -> Result<Self, TextError> {
        let settings = fontdue::FontSettings {
            collection_index,
            ..fontdue::FontSettings::default()
        };
        let font = fontdue::Font::from_bytes(bytes, settings).map_err(|e| TextError::Parse(e.to_string()))?;
        Ok(Self {
            font,
            glyphs: GlyphCache::new(1024),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, TextError> {
        let bytes = std::fs::read(path).map_err(|source| TextError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes, 0)
    }

    /// Construct from a reasonable system sans-serif font using `fontdb`.
    pub fn from_system_fonts() -> Result<Self, TextError> {
        use fontdb::{Database, Family, Query, Stretch, Style, Weight};

        let mut db = Database::new();
        db.load_system_fonts();

        let id = db
            .query(&Query {
                families: &[
                    Family::Name("Noto Sans"),
                    Family::Name("DejaVu Sans"),
                    Family::Name("Segoe UI"),
                    Family::Name("SF Pro Text"),
                    Family::Name("Arial"),
                    Family::SansSerif,
                ],
                weight: Weight::NORMAL,
                stretch: Stretch::Normal,
                style: Style::Normal,
                ..Query::default()
            })
            .ok_or(TextError::NoSystemFont)?;

        if let Some(face) = db.face(id) {
            log::info!("using system font {:?}", face.post_script_name);
        }

        db.with_face_data(id, |data, index| Self::from_bytes(data, index))
            .ok_or(TextError::NoSystemFont)?
    }

    /// Load the configured font file, or the system sans-serif when unset.
    pub fn load(font: Option<&Path>) -> Result<Self, TextError> {
        match font {
            Some(path) => {
                log::info!("loading font {}", path.display());
                Self::from_file(path)
            }
            None => Self::from_system_fonts(),
        }
    }

    pub fn line_metrics(&self, px: f32) -> LineMetrics {
        self.font
            .horizontal_line_metrics(px)
            .map(|lm| LineMetrics {
                ascent: lm.ascent,
                // Fontdue reports descent as a negative number; normalize to positive magnitude.
                descent: lm.descent.abs(),
                line_gap: lm.line_gap.max(0.0),
            })
            .unwrap_or(LineMetrics {
                ascent: px * 0.8,
                descent: px * 0.2,
                line_gap: 0.0,
            })
    }

    /// Walk `text` with kerning, calling `f(glyph_index, pen_x)` per char.
    /// Returns the total advance.
    fn walk(&self, text: &str, px: f32, mut f: impl FnMut(u16, f32)) -> f32 {
        let mut pen = 0.0;
        let mut prev: Option<char> = None;
        for ch in text.chars() {
            if let Some(kern) = prev.and_then(|p| self.font.horizontal_kern(p, ch, px)) {
                pen += kern;
            }
            let index = self.font.lookup_glyph_index(ch);
            f(index, pen);
            pen += self.font.metrics_indexed(index, px).advance_width;
            prev = Some(ch);
        }
        pen
    }

    /// Rasterize a single line of text. Offsets are relative to the pen origin
    /// on the baseline; whitespace produces no glyphs.
    pub fn rasterize_line(&self, text: &str, px: f32) -> Vec<RasterizedGlyph> {
        let px = px.max(1.0);
        let mut out = Vec::with_capacity(text.len());
        self.walk(text, px, |index, pen| {
            let metrics = self.font.metrics_indexed(index, px);
            if metrics.width == 0 || metrics.height == 0 {
                return;
            }
            let mask = self.glyphs.get_or_insert_with((index, px.to_bits()), || {
                let (metrics, coverage) = self.font.rasterize_indexed(index, px);
                GlyphMask {
                    width: metrics.width as u32,
                    height: metrics.height as u32,
                    coverage,
                }
            });
            out.push(RasterizedGlyph {
                offset: [
                    pen + metrics.xmin as f32,
                    -(metrics.ymin as f32 + metrics.height as f32),
                ],
                mask,
            });
        });
        out
    }
}

impl MeasureText for TextEngine {
    fn text_width(&self, text: &str, size_px: f32) -> f32 {
        self.walk(text, size_px.max(1.0), |_, _| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        let result = TextEngine::from_bytes(b"definitely not a font", 0);
        assert!(matches!(result, Err(TextError::Parse(_))));
    }

    #[test]
    fn missing_font_file_is_a_read_error() {
        let result = TextEngine::from_file(Path::new("/nonexistent/quiz-font.ttf"));
        assert!(matches!(result, Err(TextError::Read { .. })));
    }

    #[test]
    fn cache_reuses_masks_and_stays_bounded() {
        let cache = GlyphCache::new(2);
        let mask = || GlyphMask { width: 1, height: 1, coverage: vec![255] };
        let a = cache.get_or_insert_with((1, 10), mask);
        let b = cache.get_or_insert_with((1, 10), || unreachable!("cached"));
        assert!(Arc::ptr_eq(&a, &b));
        for i in 2..10 {
            cache.get_or_insert_with((i, 10), mask);
        }
        let len = cache.map.lock().unwrap().len();
        assert!(len <= 4, "cache grew to {len}");
    }
}
