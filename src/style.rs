//! `StyleString`: the free-form whitespace-separated style token language, and
//! its resolution into the structured attributes an [`crate::output::Output`]
//! backend actually emits.

use crate::color::Color;

/// Immutable, free-form whitespace-separated style intent.
///
/// Recognised token forms (resolved by [`StyleString::resolve`], never interpreted
/// during composition): `class:NAME`, `fg:COLOR`, `bg:COLOR`, `bold`, `italic`,
/// `underline`, `strike`, `dim`, `blink`, `reverse`, `hidden`, and the `[Transparent]`
/// sentinel meaning "inherit from whatever is beneath". An empty string means no
/// styling at all.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StyleString(String);

/// Sentinel token meaning "inherit the enclosing style".
pub const TRANSPARENT: &str = "[Transparent]";

impl StyleString {
    /// Wraps a raw token string as-is (tokens are whitespace-separated; no
    /// normalisation is performed here — composition is purely textual).
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The empty style (no styling).
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// `true` if this style carries no tokens.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The raw token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates the whitespace-separated tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }

    /// `true` if a `class:NAME` token with this exact name is present.
    pub fn has_class(&self, name: &str) -> bool {
        let wanted = format!("class:{name}");
        self.tokens().any(|t| t == wanted)
    }

    /// `true` if the `[Transparent]` sentinel is present.
    pub fn is_transparent(&self) -> bool {
        self.tokens().any(|t| t == TRANSPARENT)
    }

    /// Composes `self` applied *after* `existing` — i.e. `self` wins on conflicts.
    /// Used by `Screen::fill_area` when `after=false`: `"{new} {existing}"`.
    /// A no-op (returns `existing` unchanged) when `self` is empty.
    pub fn compose_over(&self, existing: &StyleString) -> StyleString {
        if self.is_empty() {
            return existing.clone();
        }
        if existing.is_empty() {
            return self.clone();
        }
        StyleString(format!("{} {}", self.0, existing.0))
    }

    /// Composes `self` applied *before* `existing` — i.e. `existing` wins on
    /// conflicts. Used by `Screen::fill_area` when `after=true` and by
    /// `Screen::append_style_to_content`: `"{existing} {new}"`.
    /// A no-op (returns `existing` unchanged) when `self` is empty.
    pub fn compose_under(&self, existing: &StyleString) -> StyleString {
        if self.is_empty() {
            return existing.clone();
        }
        if existing.is_empty() {
            return self.clone();
        }
        StyleString(format!("{} {}", existing.0, self.0))
    }

    /// Resolves the token string into structured attributes an output backend can
    /// render. Last writer for a given attribute wins (tokens are read in order);
    /// unrecognised tokens are ignored (downstream class-based styling is a
    /// consumer's concern — only colour/attribute tokens resolve here).
    pub fn resolve(&self) -> ResolvedStyle {
        let mut resolved = ResolvedStyle::default();
        for token in self.tokens() {
            if token == TRANSPARENT {
                resolved.transparent = true;
            } else if let Some(rest) = token.strip_prefix("fg:") {
                resolved.fg = parse_color_token(rest);
            } else if let Some(rest) = token.strip_prefix("bg:") {
                resolved.bg = parse_color_token(rest);
            } else {
                match token {
                    "bold" => resolved.bold = true,
                    "italic" => resolved.italic = true,
                    "underline" => resolved.underline = true,
                    "strike" => resolved.strike = true,
                    "dim" => resolved.dim = true,
                    "blink" => resolved.blink = true,
                    "reverse" => resolved.reverse = true,
                    "hidden" => resolved.hidden = true,
                    _ => {}
                }
            }
        }
        resolved
    }
}

fn parse_color_token(token: &str) -> Option<Color> {
    if let Some(hex) = Color::from_hex(token) {
        return Some(hex);
    }
    if (token.len() == 6 || token.len() == 3) && token.chars().all(|c| c.is_ascii_hexdigit()) {
        return Color::from_hex(&format!("#{token}"));
    }
    if let Ok(idx) = token.parse::<u8>() {
        return Some(Color::Indexed(idx));
    }
    None
}

/// Structured, resolved style attributes — what an [`crate::output::Output`]
/// backend actually needs to choose an SGR sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ResolvedStyle {
    /// Foreground colour, if set.
    pub fg: Option<Color>,
    /// Background colour, if set.
    pub bg: Option<Color>,
    /// Bold attribute.
    pub bold: bool,
    /// Italic attribute.
    pub italic: bool,
    /// Underline attribute.
    pub underline: bool,
    /// Strikethrough attribute.
    pub strike: bool,
    /// Dim/faint attribute.
    pub dim: bool,
    /// Blink attribute.
    pub blink: bool,
    /// Reverse-video attribute.
    pub reverse: bool,
    /// Hidden/concealed attribute.
    pub hidden: bool,
    /// Whether the `[Transparent]` sentinel was present.
    pub transparent: bool,
}

impl ResolvedStyle {
    /// `true` if no attribute differs from the default (no styling at all).
    pub fn is_plain(&self) -> bool {
        *self == ResolvedStyle::default()
    }
}
