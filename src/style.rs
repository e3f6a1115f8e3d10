//! Colors, attributes, and composable style rules.
//!
//! Styling flows down the layout tree as [`StyleRule`] values and is
//! folded into a [`ComputedStyle`] at the leaves. Rules compose: adds and
//! removes union componentwise, later colors win when set.

// =============================================================================
// Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for cheap storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attr: u8 {
        const BOLD = 1 << 0;
        const REVERSE = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const STRIKE_THROUGH = 1 << 4;
        const DIM = 1 << 5;
    }
}

// =============================================================================
// Color
// =============================================================================

/// The 16-value indexed terminal palette, plus the distinguished reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Palette {
    /// Terminal default (SGR 39/49).
    #[default]
    Reset,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Palette {
    /// SGR foreground code: 30-37 for the dark half, 90-97 for the bright
    /// half, 39 for reset. Background is this plus 10.
    pub const fn fg_code(self) -> u8 {
        match self {
            Self::Reset => 39,
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
            Self::BrightBlack => 90,
            Self::BrightRed => 91,
            Self::BrightGreen => 92,
            Self::BrightYellow => 93,
            Self::BrightBlue => 94,
            Self::BrightMagenta => 95,
            Self::BrightCyan => 96,
            Self::BrightWhite => 97,
        }
    }

    /// Index into the xterm-256 table (0-15). None for reset.
    pub const fn xterm_index(self) -> Option<u8> {
        match self {
            Self::Reset => None,
            Self::Black => Some(0),
            Self::Red => Some(1),
            Self::Green => Some(2),
            Self::Yellow => Some(3),
            Self::Blue => Some(4),
            Self::Magenta => Some(5),
            Self::Cyan => Some(6),
            Self::White => Some(7),
            Self::BrightBlack => Some(8),
            Self::BrightRed => Some(9),
            Self::BrightGreen => Some(10),
            Self::BrightYellow => Some(11),
            Self::BrightBlue => Some(12),
            Self::BrightMagenta => Some(13),
            Self::BrightCyan => Some(14),
            Self::BrightWhite => Some(15),
        }
    }
}

/// A terminal color: indexed palette, 8-bit xterm index, or 24-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// One of the 16 indexed palette entries (or the reset value).
    Palette16(Palette),
    /// xterm-256 palette index (0-255).
    Xterm(u8),
    /// 24-bit truecolor.
    Rgb(u8, u8, u8),
}

// #[default] only works on unit variants; reset is the default by hand.
impl Default for Color {
    fn default() -> Self {
        Self::RESET
    }
}

impl Color {
    pub const RESET: Self = Self::Palette16(Palette::Reset);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(r, g, b)
    }

    /// True for the distinguished reset color.
    pub const fn is_reset(&self) -> bool {
        matches!(self, Self::Palette16(Palette::Reset))
    }

    /// Parse a `#rrggbb` hex string into an RGB color.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::Rgb(r, g, b))
    }

    /// `#rrggbb` form for RGB colors, None otherwise.
    pub fn hex(&self) -> Option<String> {
        match self {
            Self::Rgb(r, g, b) => Some(format!("#{r:02x}{g:02x}{b:02x}")),
            _ => None,
        }
    }
}

// Named constants are the usual way to reach the indexed palette.
macro_rules! palette_consts {
    ($($name:ident => $variant:ident),* $(,)?) => {
        impl Color {
            $(pub const $name: Self = Self::Palette16(Palette::$variant);)*
        }
    };
}

palette_consts! {
    BLACK => Black,
    RED => Red,
    GREEN => Green,
    YELLOW => Yellow,
    BLUE => Blue,
    MAGENTA => Magenta,
    CYAN => Cyan,
    WHITE => White,
    BRIGHT_BLACK => BrightBlack,
    BRIGHT_RED => BrightRed,
    BRIGHT_GREEN => BrightGreen,
    BRIGHT_YELLOW => BrightYellow,
    BRIGHT_BLUE => BrightBlue,
    BRIGHT_MAGENTA => BrightMagenta,
    BRIGHT_CYAN => BrightCyan,
    BRIGHT_WHITE => BrightWhite,
}

// =============================================================================
// StyleRule
// =============================================================================

/// A composable style delta pushed down the layout tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StyleRule {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub add: Attr,
    pub remove: Attr,
}

impl StyleRule {
    pub const EMPTY: Self = Self {
        fg: None,
        bg: None,
        add: Attr::empty(),
        remove: Attr::empty(),
    };

    pub const fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            ..Self::EMPTY
        }
    }

    pub const fn bg(color: Color) -> Self {
        Self {
            bg: Some(color),
            ..Self::EMPTY
        }
    }

    pub const fn adding(attrs: Attr) -> Self {
        Self {
            add: attrs,
            ..Self::EMPTY
        }
    }

    pub const fn removing(attrs: Attr) -> Self {
        Self {
            remove: attrs,
            ..Self::EMPTY
        }
    }

    /// Compose `self` then `other`: adds and removes union componentwise,
    /// `other`'s colors win when set. Associative.
    pub fn then(self, other: Self) -> Self {
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            add: self.add | other.add,
            remove: self.remove | other.remove,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

// =============================================================================
// ComputedStyle
// =============================================================================

/// The folded style a leaf actually renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ComputedStyle {
    pub fg: Color,
    pub bg: Color,
    pub attrs: Attr,
}

impl ComputedStyle {
    pub const fn new(fg: Color, bg: Color, attrs: Attr) -> Self {
        Self { fg, bg, attrs }
    }

    /// Fold one rule into this style.
    pub fn apply(self, rule: StyleRule) -> Self {
        Self {
            fg: rule.fg.unwrap_or(self.fg),
            bg: rule.bg.unwrap_or(self.bg),
            attrs: (self.attrs | rule.add) & !rule.remove,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_composition_prefers_later_colors() {
        let a = StyleRule::fg(Color::RED).then(StyleRule::adding(Attr::BOLD));
        let b = StyleRule::fg(Color::BLUE);
        let ab = a.then(b);
        assert_eq!(ab.fg, Some(Color::BLUE));
        assert_eq!(ab.add, Attr::BOLD);

        // a's color survives when b leaves it unset
        let ba = b.then(StyleRule::adding(Attr::DIM));
        assert_eq!(ba.fg, Some(Color::BLUE));
        assert_eq!(ba.add, Attr::DIM);
    }

    #[test]
    fn test_rule_composition_is_associative() {
        let rules = [
            StyleRule::fg(Color::RED),
            StyleRule::bg(Color::Xterm(42)).then(StyleRule::adding(Attr::ITALIC)),
            StyleRule::removing(Attr::ITALIC | Attr::BOLD),
            StyleRule::fg(Color::rgb(1, 2, 3)).then(StyleRule::adding(Attr::UNDERLINE)),
        ];
        for a in rules {
            for b in rules {
                for c in rules {
                    assert_eq!(a.then(b).then(c), a.then(b.then(c)));
                }
            }
        }
    }

    #[test]
    fn test_apply_adds_then_removes() {
        let base = ComputedStyle::default();
        let rule = StyleRule {
            fg: Some(Color::GREEN),
            bg: None,
            add: Attr::BOLD | Attr::DIM,
            remove: Attr::DIM,
        };
        let applied = base.apply(rule);
        assert_eq!(applied.fg, Color::GREEN);
        assert_eq!(applied.bg, Color::RESET);
        assert_eq!(applied.attrs, Attr::BOLD);
    }

    #[test]
    fn test_nested_pushes_accumulate_left_to_right() {
        let base = ComputedStyle::default();
        let outer = StyleRule::fg(Color::RED).then(StyleRule::adding(Attr::BOLD));
        let inner = StyleRule::fg(Color::BLUE);
        // Applying outer then inner equals applying the composed rule.
        assert_eq!(base.apply(outer).apply(inner), base.apply(outer.then(inner)));
    }

    #[test]
    fn test_hex_round_trip() {
        let c = Color::from_hex("#1a2b3c").unwrap();
        assert_eq!(c, Color::Rgb(0x1a, 0x2b, 0x3c));
        assert_eq!(c.hex().unwrap(), "#1a2b3c");

        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#gg0000").is_none());
        assert!(Color::RESET.hex().is_none());
    }

    #[test]
    fn test_default_color_is_reset() {
        assert_eq!(Color::default(), Color::RESET);
        assert!(Color::default().is_reset());
        let style = ComputedStyle::default();
        assert_eq!(style.fg, Color::RESET);
        assert_eq!(style.bg, Color::RESET);
    }

    #[test]
    fn test_palette_sgr_codes() {
        assert_eq!(Palette::Black.fg_code(), 30);
        assert_eq!(Palette::White.fg_code(), 37);
        assert_eq!(Palette::BrightBlack.fg_code(), 90);
        assert_eq!(Palette::BrightWhite.fg_code(), 97);
        assert_eq!(Palette::Reset.fg_code(), 39);
    }
}
