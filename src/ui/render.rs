//! Render adapter - turns navigation and workflow state into draw calls.
//!
//! Everything draws against the [`Panel`] trait so host tests can capture
//! output on a mock; the embedded build supplies the SSD1306 behind it.

use core::fmt::Write as _;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle, Triangle};
use embedded_graphics::text::Text;

use crate::config::{MENU_VISIBLE_ROWS, TEXT_COLS, TEXT_ROWS};
use crate::menu::{MenuTree, NavState};
use crate::nfc::ndef::NdefRecordSet;
use crate::ui::layout::wrap_text;

/// A monochrome panel the badge can draw on: an `embedded-graphics` draw
/// target plus a way to push the buffer to the glass.
pub trait Panel: DrawTarget<Color = BinaryColor> + OriginDimensions {
    /// Flush the buffer to the physical panel.
    fn commit(&mut self);
}

/// Vertical pitch of a text row (FONT_6X10 plus spacing).
const ROW_PITCH: i32 = 10;

/// Baseline of the first text row.
const FIRST_ROW_Y: i32 = 10;

/// Baseline of the animated "Scanning..." line.
const ANIM_ROW_Y: i32 = 40;

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

fn inverted_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::Off)
        .build()
}

/// Clear the panel and draw one line of text per slice entry.
pub fn draw_lines<P: Panel>(panel: &mut P, lines: &[&str]) {
    let _ = panel.clear(BinaryColor::Off);
    for (i, line) in lines.iter().enumerate() {
        let y = FIRST_ROW_Y + i as i32 * ROW_PITCH;
        let _ = Text::new(line, Point::new(0, y), text_style()).draw(panel);
    }
    panel.commit();
}

/// Clear the panel and draw free text through the layout engine.
pub fn draw_wrapped<P: Panel>(panel: &mut P, text: &str) {
    let rows = wrap_text::<TEXT_COLS, TEXT_ROWS>(text);
    let _ = panel.clear(BinaryColor::Off);
    for (i, row) in rows.iter().enumerate() {
        let y = FIRST_ROW_Y + i as i32 * ROW_PITCH;
        let _ = Text::new(row.as_str(), Point::new(0, y), text_style()).draw(panel);
    }
    panel.commit();
}

/// Render the current menu: title, separator rule, the visible item window
/// with the selection highlighted, a `>` marker on submenu items and scroll
/// arrows when the window clips the list.
pub fn draw_menu<P: Panel>(panel: &mut P, tree: &MenuTree, nav: &NavState) {
    let menu = tree.menu(nav.current());
    let width = panel.size().width;
    let w = width as i32;

    let _ = panel.clear(BinaryColor::Off);

    // Title + separator rule.
    let _ = Text::new(menu.title, Point::new(0, FIRST_ROW_Y), text_style()).draw(panel);
    let _ = Line::new(Point::new(0, 14), Point::new(w - 1, 14))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(panel);

    // Visible item window.
    let scroll = nav.scroll();
    for row in 0..MENU_VISIBLE_ROWS {
        let idx = scroll + row;
        let Some(item) = menu.items.get(idx) else {
            break;
        };
        let y = 24 + row as i32 * 12;

        let style = if idx == nav.cursor() {
            let _ = Rectangle::new(Point::new(0, y - 9), Size::new(width, 12))
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                .draw(panel);
            inverted_style()
        } else {
            text_style()
        };

        let _ = Text::new(item.label, Point::new(2, y), style).draw(panel);

        if item.is_submenu() {
            let _ = Text::new(">", Point::new(w - 7, y), style).draw(panel);
        }
    }

    // Scroll indicators.
    if scroll > 0 {
        let _ = Triangle::new(
            Point::new(w - 5, 18),
            Point::new(w - 8, 21),
            Point::new(w - 2, 21),
        )
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(panel);
    }
    if scroll + MENU_VISIBLE_ROWS < menu.items.len() {
        let _ = Triangle::new(
            Point::new(w - 5, 58),
            Point::new(w - 8, 55),
            Point::new(w - 2, 55),
        )
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(panel);
    }

    panel.commit();
}

/// Redraw only the animated "Scanning" line, leaving the rest of the
/// screen untouched.
pub fn draw_scanning_dots<P: Panel>(panel: &mut P, dots: u8) {
    let width = panel.size().width;
    let _ = Rectangle::new(Point::new(0, ANIM_ROW_Y - 8), Size::new(width, 10))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
        .draw(panel);

    // Animated dots: "" / "." / ".." / "..."
    let dot_str = match dots % 4 {
        0 => "Scanning",
        1 => "Scanning.",
        2 => "Scanning..",
        _ => "Scanning...",
    };
    let _ = Text::new(dot_str, Point::new(0, ANIM_ROW_Y), text_style()).draw(panel);

    panel.commit();
}

/// Render one NDEF record page: `Record i/total` header, separator, the
/// record's type heading and its one-line summary truncated to the column
/// budget, plus the navigation hint.
pub fn draw_record<P: Panel>(panel: &mut P, set: &NdefRecordSet) {
    let w = panel.size().width as i32;
    let _ = panel.clear(BinaryColor::Off);

    let mut header: heapless::String<TEXT_COLS> = heapless::String::new();
    let _ = write!(header, "Record {}/{}", set.cursor() + 1, set.count());
    let _ = Text::new(header.as_str(), Point::new(0, FIRST_ROW_Y), text_style()).draw(panel);
    let _ = Line::new(Point::new(0, 14), Point::new(w - 1, 14))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(panel);

    if let Some(record) = set.current() {
        let _ = Text::new(record.kind().heading(), Point::new(0, 26), text_style()).draw(panel);

        let mut summary: heapless::String<TEXT_COLS> = heapless::String::new();
        for ch in record.content().chars().take(TEXT_COLS) {
            let _ = summary.push(ch);
        }
        let _ = Text::new(summary.as_str(), Point::new(0, 38), text_style()).draw(panel);
    }

    let hint = if set.count() > 1 {
        "UP/DOWN:Nav BACK:Exit"
    } else {
        "BACK: Return to menu"
    };
    let _ = Text::new(hint, Point::new(0, 60), text_style()).draw(panel);

    panel.commit();
}
