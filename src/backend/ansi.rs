//! ANSI/SGR encoding of a rendered result.

use crate::draw::PixelKind;
use crate::raster::PixelGrid;
use crate::style::{Attr, Color, ComputedStyle};

use super::EncodeError;
use crate::draw::RenderResult;

// Additive attribute codes in emission order.
const ATTR_CODES: [(Attr, u8); 6] = [
    (Attr::BOLD, 1),
    (Attr::DIM, 2),
    (Attr::ITALIC, 3),
    (Attr::UNDERLINE, 4),
    (Attr::REVERSE, 7),
    (Attr::STRIKE_THROUGH, 9),
];

/// Encode the result as ANSI text: lines joined by `\n`, no trailing
/// newline, SGR sequences only where the style changes.
pub fn encode(result: &RenderResult, default_style: ComputedStyle) -> Result<String, EncodeError> {
    let created = super::created_with(result)?;
    let grid = PixelGrid::rasterise(result, created.screen, default_style);

    let mut out = String::new();
    let mut current = ComputedStyle::default();
    for (y, row) in grid.rows().iter().enumerate() {
        if y > 0 {
            out.push('\n');
        }
        for pixel in row {
            if pixel.kind == PixelKind::WideTail {
                // The head glyph already covers this cell.
                continue;
            }
            if pixel.style != current {
                out.push_str(&transition(current, pixel.style));
                current = pixel.style;
            }
            out.push_str(&pixel.glyph);
        }
    }
    if current != ComputedStyle::default() {
        out.push_str("\x1b[0m");
    }
    Ok(out)
}

/// The SGR sequence moving from `from` to `to`.
///
/// Attribute bits cannot be cleared individually, so losing any bit
/// forces a full reset followed by the complete target style; otherwise
/// only the additions and color changes are emitted.
fn transition(from: ComputedStyle, to: ComputedStyle) -> String {
    let removed = from.attrs & !to.attrs;
    let mut codes: Vec<String> = Vec::new();

    if !removed.is_empty() {
        // A reset re-establishes default colors, so only non-reset
        // colors need re-stating.
        codes.push("0".to_string());
        push_attrs(&mut codes, to.attrs);
        if !to.fg.is_reset() {
            push_fg(&mut codes, to.fg);
        }
        if !to.bg.is_reset() {
            push_bg(&mut codes, to.bg);
        }
    } else {
        push_attrs(&mut codes, to.attrs & !from.attrs);
        if to.fg != from.fg {
            push_fg(&mut codes, to.fg);
        }
        if to.bg != from.bg {
            push_bg(&mut codes, to.bg);
        }
    }

    if codes.is_empty() {
        String::new()
    } else {
        format!("\x1b[{}m", codes.join(";"))
    }
}

fn push_attrs(codes: &mut Vec<String>, attrs: Attr) {
    for (attr, code) in ATTR_CODES {
        if attrs.contains(attr) {
            codes.push(code.to_string());
        }
    }
}

fn push_fg(codes: &mut Vec<String>, color: Color) {
    match color {
        Color::Palette16(p) => codes.push(p.fg_code().to_string()),
        Color::Xterm(n) => codes.push(format!("38;5;{n}")),
        Color::Rgb(r, g, b) => codes.push(format!("38;2;{r};{g};{b}")),
    }
}

fn push_bg(codes: &mut Vec<String>, color: Color) {
    match color {
        Color::Palette16(p) => codes.push((p.fg_code() + 10).to_string()),
        Color::Xterm(n) => codes.push(format!("48;5;{n}")),
        Color::Rgb(r, g, b) => codes.push(format!("48;2;{r};{g};{b}")),
    }
}

// =============================================================================
// Tests
// =============================================================================
