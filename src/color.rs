//! Terminal colour representation and the palette used to resolve it at a
//! declared colour depth.

/// One of the 16 standard ANSI colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum NamedColor {
    /// ANSI black.
    Black,
    /// ANSI red.
    Red,
    /// ANSI green.
    Green,
    /// ANSI yellow.
    Yellow,
    /// ANSI blue.
    Blue,
    /// ANSI magenta.
    Magenta,
    /// ANSI cyan.
    Cyan,
    /// ANSI white.
    White,
    /// Bright black (often rendered as grey).
    BrightBlack,
    /// Bright red.
    BrightRed,
    /// Bright green.
    BrightGreen,
    /// Bright yellow.
    BrightYellow,
    /// Bright blue.
    BrightBlue,
    /// Bright magenta.
    BrightMagenta,
    /// Bright cyan.
    BrightCyan,
    /// Bright white.
    BrightWhite,
}

impl NamedColor {
    /// The base SGR parameter (30-37) for this colour as a foreground colour.
    pub const fn ansi_index(self) -> u8 {
        match self {
            NamedColor::Black => 0,
            NamedColor::Red => 1,
            NamedColor::Green => 2,
            NamedColor::Yellow => 3,
            NamedColor::Blue => 4,
            NamedColor::Magenta => 5,
            NamedColor::Cyan => 6,
            NamedColor::White => 7,
            NamedColor::BrightBlack => 8,
            NamedColor::BrightRed => 9,
            NamedColor::BrightGreen => 10,
            NamedColor::BrightYellow => 11,
            NamedColor::BrightBlue => 12,
            NamedColor::BrightMagenta => 13,
            NamedColor::BrightCyan => 14,
            NamedColor::BrightWhite => 15,
        }
    }
}

/// A resolved colour value, at any depth; [`crate::output`] backends downgrade
/// this to the colour depth they declare support for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Color {
    /// 24-bit truecolour.
    Rgb(u8, u8, u8),
    /// 256-colour palette index.
    Indexed(u8),
    /// One of the 16 standard ANSI colours.
    Named(NamedColor),
    /// Explicit "use the terminal's default colour" (SGR 39/49).
    Reset,
}

impl Color {
    /// Parses a `#rrggbb` or `#rgb` hex string into an RGB colour.
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#')?;
        let (r, g, b) = match s.len() {
            6 => (
                u8::from_str_radix(&s[0..2], 16).ok()?,
                u8::from_str_radix(&s[2..4], 16).ok()?,
                u8::from_str_radix(&s[4..6], 16).ok()?,
            ),
            3 => {
                let r = u8::from_str_radix(&s[0..1], 16).ok()?;
                let g = u8::from_str_radix(&s[1..2], 16).ok()?;
                let b = u8::from_str_radix(&s[2..3], 16).ok()?;
                (r * 17, g * 17, b * 17)
            }
            _ => return None,
        };
        Some(Color::Rgb(r, g, b))
    }
}

/// The colour depth a terminal (or output backend) declares support for.
/// `Color`s are downgraded to the nearest representable form at this depth
/// when emitting SGR sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ColorDepth {
    /// No colour support at all; colour tokens are dropped.
    NoColor,
    /// The 16 standard ANSI colours.
    Basic16,
    /// The 256-colour palette.
    Extended256,
    /// 24-bit truecolour.
    TrueColor,
}

const BASIC16_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

pub(crate) fn nearest_basic16(r: u8, g: u8, b: u8) -> u8 {
    BASIC16_RGB
        .iter()
        .enumerate()
        .min_by_key(|(_, &(cr, cg, cb))| {
            let dr = i32::from(r) - i32::from(cr);
            let dg = i32::from(g) - i32::from(cg);
            let db = i32::from(b) - i32::from(cb);
            dr * dr + dg * dg + db * db
        })
        .map(|(i, _)| i as u8)
        .unwrap_or(7)
}

fn quantize_channel(c: u8) -> u8 {
    // Maps an 8-bit channel onto the 6-step cube the 256-colour palette uses.
    if c < 48 {
        0
    } else {
        ((u16::from(c) - 35) / 40).min(5) as u8
    }
}

fn nearest_256(r: u8, g: u8, b: u8) -> u8 {
    let (qr, qg, qb) = (quantize_channel(r), quantize_channel(g), quantize_channel(b));
    16 + 36 * qr + 6 * qg + qb
}

impl Color {
    /// Resolves this colour to SGR parameter bytes at `depth`, as either a
    /// foreground (`is_fg`) or background colour. Returns an empty vector for
    /// `NoColor` depth or a fully-defaulted `Reset` (no parameters needed).
    pub fn to_sgr_params(self, depth: ColorDepth, is_fg: bool) -> Vec<u8> {
        if matches!(depth, ColorDepth::NoColor) {
            return Vec::new();
        }
        match self {
            Color::Reset => vec![if is_fg { 39 } else { 49 }],
            Color::Named(named) => named_sgr_params(named, is_fg),
            Color::Indexed(idx) => match depth {
                ColorDepth::Basic16 => named_index_sgr(idx.min(15), is_fg),
                _ => vec![if is_fg { 38 } else { 48 }, 5, idx],
            },
            Color::Rgb(r, g, b) => match depth {
                ColorDepth::TrueColor => vec![if is_fg { 38 } else { 48 }, 2, r, g, b],
                ColorDepth::Extended256 => {
                    vec![if is_fg { 38 } else { 48 }, 5, nearest_256(r, g, b)]
                }
                ColorDepth::Basic16 => named_index_sgr(nearest_basic16(r, g, b), is_fg),
                ColorDepth::NoColor => Vec::new(),
            },
        }
    }
}

fn named_sgr_params(named: NamedColor, is_fg: bool) -> Vec<u8> {
    named_index_sgr(named.ansi_index(), is_fg)
}

fn named_index_sgr(index: u8, is_fg: bool) -> Vec<u8> {
    if index < 8 {
        vec![(if is_fg { 30 } else { 40 }) + index]
    } else {
        vec![(if is_fg { 90 } else { 100 }) + (index - 8)]
    }
}
