//! Theme loading: btop-style `theme[key]="value"` and hex → ratatui Color.
//! Tiles are coloured by their exponent, cycling through six colours.

use crate::Palette;
use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

const GREEN: Color = Color::Rgb(0x98, 0xC3, 0x79);
const YELLOW: Color = Color::Rgb(0xE5, 0xC0, 0x7B);
const RED: Color = Color::Rgb(0xE0, 0x6C, 0x75);
const BLUE: Color = Color::Rgb(0x61, 0xAF, 0xEF);
const MAGENTA: Color = Color::Rgb(0xC6, 0x78, 0xDD);
const CYAN: Color = Color::Rgb(0x56, 0xB6, 0xC2);

/// One Dark palette and UI colours loaded from a theme file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Tile colours, indexed by (exponent - 1) % 6.
    pub tiles: [Color; 6],
    /// Board background.
    pub bg: Color,
    /// Borders.
    pub div_line: Color,
    /// Text (score, stats).
    pub main_fg: Color,
    /// Titles and the banner.
    pub title: Color,
    /// Blank cells and help text.
    pub inactive_fg: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl Default for Theme {
    fn default() -> Self {
        Self::onedark_default()
    }
}

impl Theme {
    pub const fn onedark_default() -> Self {
        Self {
            tiles: [GREEN, YELLOW, RED, BLUE, MAGENTA, CYAN],
            bg: Color::Rgb(0x31, 0x35, 0x3F),
            div_line: Color::Rgb(0x3F, 0x44, 0x4F),
            main_fg: Color::Rgb(0xAB, 0xB2, 0xBF),
            title: YELLOW,
            inactive_fg: Color::Rgb(0x5C, 0x63, 0x70),
        }
    }

    /// Load theme from a btop-style file: `theme[key]="value"` or `theme[key]='value'`.
    /// No path (or a missing file) gives the One Dark defaults.
    pub fn load(path: Option<&Path>, palette: Palette) -> Result<Self, ThemeError> {
        let path = match path {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::default_for_palette(palette)),
        };
        let s = std::fs::read_to_string(path)?;
        let map = parse_theme_file(&s);
        let mut theme = Self::from_map(&map);
        theme.apply_palette(palette);
        Ok(theme)
    }

    pub(crate) fn default_for_palette(palette: Palette) -> Self {
        let mut t = Self::onedark_default();
        t.apply_palette(palette);
        t
    }

    /// Override tile colours for high-contrast or colorblind palettes.
    pub fn apply_palette(&mut self, palette: Palette) {
        match palette {
            Palette::Normal => {}
            Palette::HighContrast => {
                self.tiles = [
                    Color::Rgb(0x00, 0xFF, 0x00),
                    Color::Rgb(0xFF, 0xFF, 0x00),
                    Color::Rgb(0xFF, 0x00, 0x00),
                    Color::Rgb(0x00, 0x88, 0xFF),
                    Color::Rgb(0xFF, 0x00, 0xFF),
                    Color::Rgb(0x00, 0xFF, 0xFF),
                ];
            }
            Palette::Colorblind => {
                // Paul Tol's bright scheme
                self.tiles = [
                    Color::Rgb(0x00, 0x77, 0xBB),
                    Color::Rgb(0xEE, 0x77, 0x33),
                    Color::Rgb(0x00, 0x99, 0x88),
                    Color::Rgb(0xCC, 0x33, 0x11),
                    Color::Rgb(0xEE, 0x33, 0x77),
                    Color::Rgb(0xBB, 0xBB, 0x00),
                ];
            }
        }
    }

    fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).and_then(|v| parse_hex(v).ok());
        let d = Self::onedark_default();
        Self {
            tiles: [
                get("mem_box").or_else(|| get("cpu_start")).unwrap_or(d.tiles[0]),
                get("cpu_mid").unwrap_or(d.tiles[1]),
                get("cpu_end").or_else(|| get("temp_end")).unwrap_or(d.tiles[2]),
                get("cpu_box").unwrap_or(d.tiles[3]),
                get("net_box").unwrap_or(d.tiles[4]),
                get("hi_fg").or_else(|| get("proc_misc")).unwrap_or(d.tiles[5]),
            ],
            bg: get("meter_bg").unwrap_or(d.bg),
            div_line: get("div_line").unwrap_or(d.div_line),
            main_fg: get("main_fg").unwrap_or(d.main_fg),
            title: get("title").unwrap_or(d.title),
            inactive_fg: get("inactive_fg").unwrap_or(d.inactive_fg),
        }
    }

    /// Colour for a tile value; blanks use `inactive_fg`.
    pub fn tile_color(&self, value: u64, base: u64) -> Color {
        if value == 0 {
            return self.inactive_fg;
        }
        let exponent = exponent_of(value, base);
        self.tiles[exponent.saturating_sub(1) % self.tiles.len()]
    }
}

/// k such that base^k == value (rounded down for values that aren't exact powers).
fn exponent_of(mut value: u64, base: u64) -> usize {
    let mut k = 0;
    while base > 1 && value >= base {
        value /= base;
        k += 1;
    }
    k
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(stripped) = line.strip_prefix("theme[") else {
            continue;
        };
        let Some(end) = stripped.find(']') else {
            continue;
        };
        let key = stripped[..end].trim();
        let rest = stripped[end + 1..].trim();
        if let Some(value) = rest.strip_prefix('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if !value.is_empty() {
                map.insert(key.to_string(), value.to_string());
            }
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    let invalid = || ThemeError::InvalidHex(s.to_string());
    let channel = |range: std::ops::Range<usize>| {
        s.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .ok_or_else(invalid)
    };
    match s.len() {
        6 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        3 => Ok(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => Err(invalid()),
    }
}
