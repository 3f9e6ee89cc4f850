//! Design tokens and the ordered property map the compiler produces.

use crate::params::ThemeParameters;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Every custom property a compiled theme defines, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
    Background,
    Surface,
    Elevated,
    Text,
    Muted,
    Primary,
    PrimaryContrast,
    Accent,
    Ring,
    Glow,
    Radius,
    GlowIntensity,
    Contrast,
    GrainOpacity,
}

impl Token {
    pub const ALL: [Token; 14] = [
        Token::Background,
        Token::Surface,
        Token::Elevated,
        Token::Text,
        Token::Muted,
        Token::Primary,
        Token::PrimaryContrast,
        Token::Accent,
        Token::Ring,
        Token::Glow,
        Token::Radius,
        Token::GlowIntensity,
        Token::Contrast,
        Token::GrainOpacity,
    ];

    /// CSS custom property name, including the leading `--`
    pub fn css_name(&self) -> &'static str {
        match self {
            Token::Background => "--bg",
            Token::Surface => "--surface",
            Token::Elevated => "--elevated",
            Token::Text => "--text",
            Token::Muted => "--muted",
            Token::Primary => "--primary",
            Token::PrimaryContrast => "--primary-contrast",
            Token::Accent => "--accent",
            Token::Ring => "--ring",
            Token::Glow => "--glow",
            Token::Radius => "--radius",
            Token::GlowIntensity => "--glow-i",
            Token::Contrast => "--contrast",
            Token::GrainOpacity => "--grid-opacity",
        }
    }

    /// Look up a token from its CSS name (with or without the `--` prefix)
    pub fn from_css_name(name: &str) -> Option<Token> {
        let name = name.strip_prefix("--").unwrap_or(name);
        Token::ALL
            .into_iter()
            .find(|token| &token.css_name()[2..] == name)
    }
}

/// Ordered token → CSS literal mapping. Built once by the compiler and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMap {
    entries: Vec<(Token, String)>,
}

impl PropertyMap {
    pub(crate) fn from_entries(entries: Vec<(Token, String)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, token: Token) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate `(css name, value)` pairs in emission order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries
            .iter()
            .map(|(token, value)| (token.css_name(), value.as_str()))
    }

    /// `--name: value;` lines, one per entry
    pub fn to_declarations(&self, indent: &str) -> String {
        self.iter()
            .map(|(name, value)| format!("{}{}: {};", indent, name, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Serialize for PropertyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Flags a renderer applies as attributes on the root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootAttributes {
    pub mode: &'static str,
    pub grain: &'static str,
    pub motion: &'static str,
}

impl RootAttributes {
    pub fn from_params(params: &ThemeParameters) -> Self {
        let on_off = |flag: bool| if flag { "on" } else { "off" };
        Self {
            mode: params.mode.name(),
            grain: on_off(params.grain),
            motion: on_off(params.motion),
        }
    }

    /// `data-*` attribute pairs in a stable order
    pub fn pairs(&self) -> [(&'static str, &'static str); 3] {
        [
            ("data-mode", self.mode),
            ("data-grain", self.grain),
            ("data-motion", self.motion),
        ]
    }
}
