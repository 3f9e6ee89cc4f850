//! Flat string-keyed encoding of theme parameters.
//!
//! The same record backs share-link query strings and the persisted state
//! file. Keys are short to keep URLs compact. Decoding is total: absent or
//! malformed fields fall back to caller-supplied defaults, so a hand-edited
//! link never breaks rendering.

use crate::color::format_number;
use crate::params::{Mode, ThemeParameters};
use std::collections::BTreeMap;

pub const KEY_HUE: &str = "h";
pub const KEY_SATURATION: &str = "sa";
pub const KEY_GLOW: &str = "g";
pub const KEY_ACCENT_OFFSET: &str = "as";
pub const KEY_GRAIN: &str = "gr";
pub const KEY_MOTION: &str = "m";
pub const KEY_RADIUS: &str = "r";
pub const KEY_CONTRAST: &str = "c";
pub const KEY_MODE: &str = "md";

/// Ordered list of `key=value` string pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatRecord {
    pairs: Vec<(String, String)>,
}

impl FlatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        self.pairs.push((key.to_string(), value.into()));
    }

    /// First value stored under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `k=v&k=v` in insertion order. Encoded values never need escaping
    /// (numbers and single-letter tags); anything else is percent-encoded.
    pub fn to_query_string(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Parse a query string. A leading `?` is ignored, `+` means space and
    /// `%XX` escapes are decoded; a pair without `=` has an empty value.
    pub fn parse_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let (k, v) = part.split_once('=').unwrap_or((part, ""));
                (percent_decode(k), percent_decode(v))
            })
            .collect();
        Self { pairs }
    }

    /// String map for the persisted JSON form
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for (k, v) in self.iter() {
            map.entry(k.to_string()).or_insert_with(|| v.to_string());
        }
        map
    }

    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self {
            pairs: map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        }
    }
}

fn percent_encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'*' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(decoded) => {
                        out.push(decoded);
                        i += 3;
                        continue;
                    }
                    None => out.push(b'%'),
                }
            }
            other => out.push(other),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Encode parameters into the flat record.
pub fn encode(params: &ThemeParameters) -> FlatRecord {
    let flag = |on: bool| if on { "1" } else { "0" };
    let mode = match params.mode {
        Mode::Dark => "d",
        Mode::Light => "l",
    };

    let mut record = FlatRecord::new();
    record.push(KEY_HUE, format_number(params.hue));
    record.push(KEY_SATURATION, format_number(params.saturation));
    record.push(KEY_GLOW, format_number(params.glow_intensity));
    record.push(KEY_ACCENT_OFFSET, params.accent_offset.to_string());
    record.push(KEY_GRAIN, flag(params.grain));
    record.push(KEY_MOTION, flag(params.motion));
    record.push(KEY_RADIUS, format_number(params.corner_radius));
    record.push(KEY_CONTRAST, format_number(params.contrast));
    record.push(KEY_MODE, mode);
    record
}

/// Decode a flat record, filling gaps from `defaults`. Never fails.
pub fn decode(record: &FlatRecord, defaults: &ThemeParameters) -> ThemeParameters {
    let number = |key: &str, fallback: f64| {
        record
            .get(key)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .unwrap_or(fallback)
    };
    // Present flags are true only when they read as the number 1
    let flag = |key: &str, fallback: bool| match record.get(key) {
        Some(raw) => raw.trim().parse::<f64>().map(|v| v == 1.0).unwrap_or(false),
        None => fallback,
    };
    let mode = match record.get(KEY_MODE) {
        Some("l") => Mode::Light,
        Some(_) => Mode::Dark,
        None => defaults.mode,
    };

    ThemeParameters {
        hue: number(KEY_HUE, defaults.hue),
        saturation: number(KEY_SATURATION, defaults.saturation),
        glow_intensity: number(KEY_GLOW, defaults.glow_intensity),
        // Saturating cast keeps absurd offsets in range
        accent_offset: number(KEY_ACCENT_OFFSET, f64::from(defaults.accent_offset)).round()
            as i32,
        grain: flag(KEY_GRAIN, defaults.grain),
        motion: flag(KEY_MOTION, defaults.motion),
        corner_radius: number(KEY_RADIUS, defaults.corner_radius),
        contrast: number(KEY_CONTRAST, defaults.contrast),
        mode,
    }
}

/// Shareable link: `base_path?query`
pub fn share_link(base_path: &str, params: &ThemeParameters) -> String {
    format!("{}?{}", base_path, encode(params).to_query_string())
}
