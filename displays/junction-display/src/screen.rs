//! Screen buffer types
//!
//! Provides a character-based screen buffer for the 16x2 status display.

use heapless::String;

use crate::backend::{DisplayBackend, DisplayError};

/// Number of character rows on the status display
pub const SCREEN_ROWS: usize = 2;

/// Number of character columns on the status display
pub const SCREEN_COLS: usize = 16;

/// Maximum characters per line
pub const LINE_LEN: usize = SCREEN_COLS;

/// Screen buffer for the status display
///
/// Lines are stored padded to the full width so a redraw always
/// overwrites stale characters. Only rows whose content changed are
/// pushed to the backend.
#[derive(Clone)]
pub struct Screen {
    /// Current display content
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    /// Rows that need to be redrawn
    dirty: [bool; SCREEN_ROWS],
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new blank screen, fully dirty
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| padded("")),
            dirty: [true; SCREEN_ROWS],
        }
    }

    /// Blank every row
    pub fn clear(&mut self) {
        for row in 0..SCREEN_ROWS {
            self.set_line(row, "");
        }
    }

    /// Set the content of a specific row
    ///
    /// Text is truncated to the screen width and padded with spaces. The
    /// row is only marked dirty if its content changes.
    pub fn set_line(&mut self, row: usize, text: &str) {
        if row >= SCREEN_ROWS {
            return;
        }
        let line = padded(text);
        if self.lines[row] != line {
            self.lines[row] = line;
            self.dirty[row] = true;
        }
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Check if any row needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty.iter().any(|&d| d)
    }

    /// Mark every row as needing a redraw
    pub fn mark_dirty(&mut self) {
        self.dirty = [true; SCREEN_ROWS];
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Push changed rows to a display
    ///
    /// A row stays dirty if its write fails, so it is retried on the next
    /// render.
    pub fn render_to<D: DisplayBackend>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        for row in 0..SCREEN_ROWS {
            if self.dirty[row] {
                display.draw_text(row as u8, 0, self.lines[row].as_str())?;
                self.dirty[row] = false;
            }
        }
        display.flush()
    }
}

/// Build a full-width line from `text`, replacing non-ASCII characters
fn padded(text: &str) -> String<LINE_LEN> {
    let mut line = String::new();
    for c in text.chars().take(LINE_LEN) {
        let _ = line.push(if c.is_ascii() { c } else { '?' });
    }
    while line.len() < LINE_LEN {
        let _ = line.push(' ');
    }
    line
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    #[derive(Default)]
    struct MockDisplay {
        writes: Vec<(u8, String<LINE_LEN>), 8>,
        flushes: u8,
        fail: bool,
    }

    impl DisplayBackend for MockDisplay {
        fn clear(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }

        fn draw_text(&mut self, row: u8, _col: u8, text: &str) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Communication);
            }
            let mut line = String::new();
            let _ = line.push_str(text);
            let _ = self.writes.push((row, line));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            self.flushes += 1;
            Ok(())
        }

        fn dimensions(&self) -> (u8, u8) {
            (SCREEN_COLS as u8, SCREEN_ROWS as u8)
        }

        fn is_ready(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_lines_padded_and_truncated() {
        let mut screen = Screen::new();
        screen.set_line(0, "HI");
        screen.set_line(1, "0123456789ABCDEFGHIJ");
        assert_eq!(screen.get_line(0), Some("HI              "));
        assert_eq!(screen.get_line(1), Some("0123456789ABCDEF"));
        assert_eq!(screen.get_line(2), None);
    }

    #[test]
    fn test_only_changed_rows_rendered() {
        let mut screen = Screen::new();
        let mut display = MockDisplay::default();

        screen.set_line(0, "first");
        screen.render_to(&mut display).unwrap();
        assert_eq!(display.writes.len(), 2);
        assert!(!screen.is_dirty());

        screen.set_line(0, "first");
        screen.set_line(1, "second");
        screen.render_to(&mut display).unwrap();
        assert_eq!(display.writes.len(), 3);
        assert_eq!(display.writes[2].0, 1);
        assert_eq!(display.flushes, 2);
    }

    #[test]
    fn test_failed_row_retried() {
        let mut screen = Screen::new();
        let mut display = MockDisplay {
            fail: true,
            ..Default::default()
        };

        assert_eq!(
            screen.render_to(&mut display),
            Err(DisplayError::Communication)
        );
        assert!(screen.is_dirty());

        display.fail = false;
        screen.render_to(&mut display).unwrap();
        assert_eq!(display.writes.len(), 2);
    }
}
