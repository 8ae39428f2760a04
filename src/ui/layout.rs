//! Text layout for a fixed character grid.
//!
//! Pure logic, no display types involved: callers hand the wrapped rows to
//! the render adapter. The truncation policy is deliberate - rows past the
//! budget are dropped with no ellipsis, matching what the panel can show.

use heapless::{String, Vec};

/// Wrap `text` into rows of at most `W` characters, `H` rows total.
///
/// Explicit `\n` breaks are honored first; any segment longer than `W` is
/// hard-wrapped at exactly `W` characters. Rows beyond `H` are silently
/// dropped.
pub fn wrap_text<const W: usize, const H: usize>(text: &str) -> Vec<String<W>, H> {
    let mut rows: Vec<String<W>, H> = Vec::new();

    for segment in text.split('\n') {
        let mut row: String<W> = String::new();
        let mut cols = 0;

        for ch in segment.chars() {
            if cols == W {
                if rows.push(row).is_err() {
                    return rows;
                }
                row = String::new();
                cols = 0;
            }
            if row.push(ch).is_err() {
                // Byte capacity reached before the column budget (wide
                // characters); wrap early rather than lose the char.
                if rows.push(row).is_err() {
                    return rows;
                }
                row = String::new();
                cols = 0;
                let _ = row.push(ch);
            }
            cols += 1;
        }

        if rows.push(row).is_err() {
            return rows;
        }
    }

    rows
}
