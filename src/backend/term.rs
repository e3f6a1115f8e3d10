//! Direct terminal drawing through crossterm.

use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color as CtColor, Colors, Print, SetAttribute, SetColors};

use crate::draw::{PixelKind, RenderResult};
use crate::raster::PixelGrid;
use crate::style::{Attr, Color, ComputedStyle, Palette};

use super::EncodeError;

/// Queue the whole grid onto `out` and flush.
///
/// The caller owns terminal modes (raw mode, alternate screen, mouse
/// capture); this only paints cells.
pub fn draw<W: Write>(
    out: &mut W,
    result: &RenderResult,
    default_style: ComputedStyle,
) -> Result<(), EncodeError> {
    let created = super::created_with(result)?;
    let grid = PixelGrid::rasterise(result, created.screen, default_style);

    let mut current: Option<ComputedStyle> = None;
    for (y, row) in grid.rows().iter().enumerate() {
        queue!(out, MoveTo(0, y as u16))?;
        for pixel in row {
            if pixel.kind == PixelKind::WideTail {
                continue;
            }
            if current != Some(pixel.style) {
                apply_style(out, pixel.style)?;
                current = Some(pixel.style);
            }
            queue!(out, Print(&pixel.glyph))?;
        }
    }
    queue!(out, SetAttribute(Attribute::Reset))?;
    out.flush()?;
    Ok(())
}

fn apply_style<W: Write>(out: &mut W, style: ComputedStyle) -> Result<(), EncodeError> {
    queue!(out, SetAttribute(Attribute::Reset))?;
    for (attr, ct) in [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::ITALIC, Attribute::Italic),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::REVERSE, Attribute::Reverse),
        (Attr::STRIKE_THROUGH, Attribute::CrossedOut),
    ] {
        if style.attrs.contains(attr) {
            queue!(out, SetAttribute(ct))?;
        }
    }
    queue!(
        out,
        SetColors(Colors::new(to_crossterm(style.fg), to_crossterm(style.bg)))
    )?;
    Ok(())
}

fn to_crossterm(color: Color) -> CtColor {
    match color {
        Color::Palette16(palette) => match palette {
            Palette::Reset => CtColor::Reset,
            Palette::Black => CtColor::Black,
            Palette::Red => CtColor::DarkRed,
            Palette::Green => CtColor::DarkGreen,
            Palette::Yellow => CtColor::DarkYellow,
            Palette::Blue => CtColor::DarkBlue,
            Palette::Magenta => CtColor::DarkMagenta,
            Palette::Cyan => CtColor::DarkCyan,
            Palette::White => CtColor::Grey,
            Palette::BrightBlack => CtColor::DarkGrey,
            Palette::BrightRed => CtColor::Red,
            Palette::BrightGreen => CtColor::Green,
            Palette::BrightYellow => CtColor::Yellow,
            Palette::BrightBlue => CtColor::Blue,
            Palette::BrightMagenta => CtColor::Magenta,
            Palette::BrightCyan => CtColor::Cyan,
            Palette::BrightWhite => CtColor::White,
        },
        Color::Xterm(n) => CtColor::AnsiValue(n),
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
    }
}

// =============================================================================
// Tests
// =============================================================================
