//! `Char`: an immutable, interned, styled single-cell display atom, and the
//! frozen control-character display-mapping table it folds through.

use crate::interner::CharInterner;
use crate::style::StyleString;
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

/// The 66-entry frozen table folding control bytes to their caret/hex/space
/// display forms: 32 C0 bytes, DEL, 32 C1 bytes, and NBSP.
///
/// Read-only and process-wide; has no lifecycle (no init/teardown call needed).
pub struct CharacterDisplayMappings;

impl CharacterDisplayMappings {
    /// Looks up the display form and style class for a raw byte, if it needs
    /// folding. Returns `None` for any byte that displays as itself.
    pub fn fold(byte: u32) -> Option<(String, &'static str)> {
        match byte {
            0x00..=0x1F => {
                let caret = (byte as u8 + 0x40) as char;
                Some((format!("^{caret}"), "control-character"))
            }
            0x7F => Some(("^?".to_string(), "control-character")),
            0x80..=0x9F => Some((format!("<{byte:02X}>"), "control-character")),
            0xA0 => Some((" ".to_string(), "nbsp")),
            _ => None,
        }
    }

    /// The number of entries in the table: 32 C0 + 1 DEL + 32 C1 + 1 NBSP.
    pub const ENTRY_COUNT: usize = 32 + 1 + 32 + 1;
}

/// An immutable, interned `(display_text, style, width)` triple.
///
/// Equality is by `(character, style)` only — width is derived and therefore
/// never distinguishes two otherwise-equal chars. Instances are produced through
/// a bounded [`CharInterner`]; two chars built from the same arguments *may* be
/// identity-equal (`Arc::ptr_eq`), but nothing in this crate relies on that.
#[derive(Clone, Debug)]
pub struct Char {
    character: Arc<str>,
    style: StyleString,
    width: u8,
}

impl Char {
    /// Builds a `Char` directly, applying control-character folding.
    /// Does not intern; see [`CharInterner::get_or_insert`] for the interned path.
    pub fn new(raw: &str, style: StyleString) -> Self {
        let (display, folded_class) = fold_display(raw);
        let style = match folded_class {
            Some(class) => StyleString::new(format!("class:{class} {}", style.as_str()))
                .compose_trim(),
            None => style,
        };
        let width = UnicodeWidthStr::width(display.as_str()).min(u8::MAX as usize) as u8;
        Self {
            character: Arc::from(display),
            style,
            width,
        }
    }

    /// The display text (possibly a caret/hex/space fold of a control byte).
    pub fn character(&self) -> &str {
        &self.character
    }

    /// The style tokens attached to this char.
    pub fn style(&self) -> &StyleString {
        &self.style
    }

    /// Display width in terminal columns: 0, 1, or 2.
    pub fn width(&self) -> u8 {
        self.width
    }
}

impl PartialEq for Char {
    fn eq(&self, other: &Self) -> bool {
        self.character.as_ref() == other.character.as_ref() && self.style == other.style
    }
}
impl Eq for Char {}

impl std::hash::Hash for Char {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.character.as_ref().hash(state);
        self.style.hash(state);
    }
}

/// Folds `raw` through [`CharacterDisplayMappings`] when it is a single control
/// byte; returns the text unchanged (and `None`) otherwise.
fn fold_display(raw: &str) -> (String, Option<&'static str>) {
    let mut chars = raw.chars();
    if let (Some(c), None) = (chars.next(), chars.next())
        && let Some((folded, class)) = CharacterDisplayMappings::fold(c as u32)
    {
        return (folded, Some(class));
    }
    (raw.to_string(), None)
}

impl StyleString {
    /// Collapses accidental doubled whitespace introduced by folding-prefix
    /// composition; a purely cosmetic normalisation, not a semantic one.
    fn compose_trim(self) -> StyleString {
        StyleString::new(self.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
    }
}
