//! HTML encoding of a rendered result.

use crate::draw::PixelKind;
use crate::raster::PixelGrid;
use crate::style::{Attr, Color, ComputedStyle};

use super::EncodeError;
use crate::draw::RenderResult;

/// Encode the result as a `<pre>` block with inline style tags.
pub fn encode(result: &RenderResult, default_style: ComputedStyle) -> Result<String, EncodeError> {
    let created = super::created_with(result)?;
    let grid = PixelGrid::rasterise(result, created.screen, default_style);

    let mut out = String::from("<pre style=\"font-family:monospace\">");
    let mut open: Vec<&'static str> = Vec::new();
    let mut current = ComputedStyle::default();

    for (y, row) in grid.rows().iter().enumerate() {
        if y > 0 {
            out.push('\n');
        }
        for pixel in row {
            if pixel.kind == PixelKind::WideTail {
                continue;
            }
            if pixel.style != current {
                close_tags(&mut out, &mut open);
                open_tags(&mut out, &mut open, pixel.style);
                current = pixel.style;
            }
            push_escaped(&mut out, &pixel.glyph);
        }
    }
    close_tags(&mut out, &mut open);
    out.push_str("</pre>");
    Ok(out)
}

fn close_tags(out: &mut String, open: &mut Vec<&'static str>) {
    for tag in open.drain(..).rev() {
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

fn open_tags(out: &mut String, open: &mut Vec<&'static str>, style: ComputedStyle) {
    for (attr, tag) in [
        (Attr::BOLD, "b"),
        (Attr::ITALIC, "i"),
        (Attr::UNDERLINE, "u"),
        (Attr::STRIKE_THROUGH, "strike"),
    ] {
        if style.attrs.contains(attr) {
            out.push('<');
            out.push_str(tag);
            out.push('>');
            open.push(tag);
        }
    }

    // Reverse swaps the color pair instead of getting its own tag.
    let (fg, bg) = if style.attrs.contains(Attr::REVERSE) {
        (style.bg, style.fg)
    } else {
        (style.fg, style.bg)
    };
    let mut css = String::new();
    if let Some(hex) = color_hex(fg) {
        css.push_str(&format!("color:{hex}"));
    }
    if let Some(hex) = color_hex(bg) {
        if !css.is_empty() {
            css.push(';');
        }
        css.push_str(&format!("background-color:{hex}"));
    }
    if !css.is_empty() {
        out.push_str(&format!("<span style=\"{css}\">"));
        open.push("span");
    }
}

fn push_escaped(out: &mut String, glyph: &str) {
    for c in glyph.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

// =============================================================================
// Colors
// =============================================================================

// The canonical first 16 xterm palette entries.
const XTERM_BASE: [(u8, u8, u8); 16] = [
    (0x00, 0x00, 0x00),
    (0x80, 0x00, 0x00),
    (0x00, 0x80, 0x00),
    (0x80, 0x80, 0x00),
    (0x00, 0x00, 0x80),
    (0x80, 0x00, 0x80),
    (0x00, 0x80, 0x80),
    (0xc0, 0xc0, 0xc0),
    (0x80, 0x80, 0x80),
    (0xff, 0x00, 0x00),
    (0x00, 0xff, 0x00),
    (0xff, 0xff, 0x00),
    (0x00, 0x00, 0xff),
    (0xff, 0x00, 0xff),
    (0x00, 0xff, 0xff),
    (0xff, 0xff, 0xff),
];

/// Canonical hex for an xterm-256 index.
pub fn xterm_hex(index: u8) -> String {
    let (r, g, b) = match index {
        0..=15 => XTERM_BASE[index as usize],
        16..=231 => {
            let n = index - 16;
            let level = |v: u8| if v == 0 { 0 } else { 55 + 40 * v };
            (level(n / 36), level((n / 6) % 6), level(n % 6))
        }
        232..=255 => {
            let v = 8 + 10 * (index - 232);
            (v, v, v)
        }
    };
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn color_hex(color: Color) -> Option<String> {
    match color {
        Color::Palette16(p) => p.xterm_index().map(xterm_hex),
        Color::Xterm(n) => Some(xterm_hex(n)),
        Color::Rgb(..) => color.hex(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::layout::{hbox, text};
    use crate::render_to_result;

    #[test]
    fn test_plain_text_is_escaped() {
        let result = render_to_result(Size::new(5, 1), &text("a<b&c"));
        let encoded = encode(&result, ComputedStyle::default()).unwrap();
        assert_eq!(
            encoded,
            "<pre style=\"font-family:monospace\">a&lt;b&amp;c</pre>"
        );
    }

    #[test]
    fn test_missing_metadata_is_an_error() {
        assert!(matches!(
            encode(&RenderResult::new(), ComputedStyle::default()),
            Err(EncodeError::MissingCreatedWith)
        ));
    }

    #[test]
    fn test_styled_runs_open_and_close_tags() {
        let layout = hbox([text("a").bold(), text("b").fg(Color::RED)]);
        let result = render_to_result(Size::new(2, 1), &layout);
        let encoded = encode(&result, ComputedStyle::default()).unwrap();
        assert_eq!(
            encoded,
            "<pre style=\"font-family:monospace\"><b>a</b><span style=\"color:#800000\">b</span></pre>"
        );
    }

    #[test]
    fn test_xterm_hex_table() {
        assert_eq!(xterm_hex(0), "#000000");
        assert_eq!(xterm_hex(9), "#ff0000");
        assert_eq!(xterm_hex(15), "#ffffff");
        // Cube: 16 is black, 231 is white.
        assert_eq!(xterm_hex(16), "#000000");
        assert_eq!(xterm_hex(231), "#ffffff");
        // 42 = 16 + 0*36 + 4*6 + 2 -> (0, 215, 135).
        assert_eq!(xterm_hex(42), "#00d787");
        // Grays.
        assert_eq!(xterm_hex(232), "#080808");
        assert_eq!(xterm_hex(255), "#eeeeee");
    }

    #[test]
    fn test_rgb_colors_use_exact_hex() {
        let layout = text("x").fg(Color::rgb(0x12, 0x34, 0x56));
        let result = render_to_result(Size::new(1, 1), &layout);
        let encoded = encode(&result, ComputedStyle::default()).unwrap();
        assert!(encoded.contains("color:#123456"));
    }
}
