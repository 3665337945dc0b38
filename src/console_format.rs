//! Console formatting module - Pure rendering concerns
//!
//! This module handles all console output formatting including:
//! - Table layout and borders
//! - Color terminal output
//! - Text truncation, wrapping and padding
//!
//! It accepts pre-formatted cells from the report module and renders them.
//!
//! ## Output Flexibility
//!
//! `TableWriter` writes to any `std::io::Write` destination:
//! - Console (stdout) with optional colors
//! - String buffers (for tests)
//! - Files

use std::io::{self, Write};
use std::sync::OnceLock;
use term::color::Color;
use terminal_size::{Width, terminal_size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// One table cell, optionally coloured
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub color: Option<Color>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), color: None }
    }

    pub fn colored(text: impl Into<String>, color: Color) -> Self {
        Self { text: text.into(), color: Some(color) }
    }
}

/// How a column claims horizontal space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Exactly this many content characters
    Fixed(usize),
    /// Share of whatever is left, never below the minimum
    Flex(usize),
}

/// Resolved content widths for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    pub widths: Vec<usize>,
}

impl TableLayout {
    /// Fit columns into `total_width` terminal columns
    pub fn new(total_width: usize, columns: &[ColumnWidth]) -> Self {
        // "│ " before each cell, " " after it, and the closing "│"
        let chrome = 1 + 3 * columns.len();
        let available = total_width.saturating_sub(chrome);

        let fixed_total: usize = columns
            .iter()
            .map(|c| match c {
                ColumnWidth::Fixed(w) => *w,
                ColumnWidth::Flex(_) => 0,
            })
            .sum();
        let flex_count = columns.iter().filter(|c| matches!(c, ColumnWidth::Flex(_))).count();
        let flex_share = if flex_count > 0 { available.saturating_sub(fixed_total) / flex_count } else { 0 };

        let widths = columns
            .iter()
            .map(|c| match c {
                ColumnWidth::Fixed(w) => *w,
                ColumnWidth::Flex(min) => flex_share.max(*min),
            })
            .collect();

        TableLayout { widths }
    }

    /// Total rendered width including borders
    #[cfg(test)]
    pub fn total_width(&self) -> usize {
        1 + self.widths.iter().map(|w| w + 3).sum::<usize>()
    }
}

/// Writer for table output - configurable for color/plain text
pub struct TableWriter<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> TableWriter<W> {
    /// Create a new table writer
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write formatted text, optionally with color
    fn write_colored(&mut self, text: &str, color: Option<Color>) -> io::Result<()> {
        match color {
            Some(color) if self.use_colors => {
                // RGB for bright yellow reads better on Windows Terminal
                if color == term::color::BRIGHT_YELLOW {
                    write!(self.writer, "\x1b[38;2;255;255;102m{}\x1b[0m", text)
                } else {
                    write!(self.writer, "\x1b[{}m{}\x1b[0m", ansi_code(color), text)
                }
            }
            _ => write!(self.writer, "{}", text),
        }
    }

    /// Write a plain line
    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", text)
    }

    /// Write a line in colour
    pub fn write_colored_line(&mut self, text: &str, color: Color) -> io::Result<()> {
        self.write_colored(text, Some(color))?;
        writeln!(self.writer)
    }

    /// Write a prompt without a newline and flush it
    pub fn write_prompt(&mut self, prompt: &str) -> io::Result<()> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()
    }

    /// Write a blank line
    pub fn writeln(&mut self) -> io::Result<()> {
        writeln!(self.writer)
    }

    /// Write `text` word-wrapped to `width`, each line prefixed with `indent`
    pub fn write_wrapped(&mut self, text: &str, indent: &str, width: usize) -> io::Result<()> {
        let usable = width.saturating_sub(display_width(indent)).max(10);
        for line in wrap_text(text, usable) {
            writeln!(self.writer, "{}{}", indent, line)?;
        }
        Ok(())
    }

    /// Write a section heading underlined to `width`
    pub fn write_heading(&mut self, title: &str, width: usize) -> io::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", title)?;
        writeln!(self.writer, "{}", "━".repeat(width.max(display_width(title))))
    }

    /// Write top border
    pub fn write_top_border(&mut self, layout: &TableLayout) -> io::Result<()> {
        self.write_border(layout, '┌', '┬', '┐')
    }

    /// Write separator between header and body
    pub fn write_separator(&mut self, layout: &TableLayout) -> io::Result<()> {
        self.write_border(layout, '├', '┼', '┤')
    }

    /// Write bottom border
    pub fn write_bottom_border(&mut self, layout: &TableLayout) -> io::Result<()> {
        self.write_border(layout, '└', '┴', '┘')
    }

    fn write_border(&mut self, layout: &TableLayout, left: char, mid: char, right: char) -> io::Result<()> {
        let segments: Vec<String> = layout.widths.iter().map(|w| "─".repeat(w + 2)).collect();
        writeln!(self.writer, "{}{}{}", left, segments.join(&mid.to_string()), right)
    }

    /// Write a header row (centered titles)
    pub fn write_header_row(&mut self, layout: &TableLayout, titles: &[&str]) -> io::Result<()> {
        write!(self.writer, "│")?;
        for (title, width) in titles.iter().zip(layout.widths.iter()) {
            let title = truncate_with_padding(title, *width);
            write!(self.writer, " {:^width$} │", title.trim_end(), width = width)?;
        }
        writeln!(self.writer)
    }

    /// Write one logical row; long cells wrap onto continuation lines
    pub fn write_row(&mut self, layout: &TableLayout, cells: &[Cell]) -> io::Result<()> {
        let wrapped: Vec<Vec<String>> =
            cells.iter().zip(layout.widths.iter()).map(|(cell, width)| wrap_text(&cell.text, *width)).collect();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);

        for line_idx in 0..height {
            write!(self.writer, "│")?;
            for ((lines, cell), width) in wrapped.iter().zip(cells.iter()).zip(layout.widths.iter()) {
                let text = lines.get(line_idx).map(String::as_str).unwrap_or("");
                let padded = truncate_with_padding(text, *width);
                write!(self.writer, " ")?;
                self.write_colored(&padded, cell.color)?;
                write!(self.writer, " │")?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    /// Write a complete table: borders, header and rows
    pub fn write_table(&mut self, layout: &TableLayout, titles: &[&str], rows: &[Vec<Cell>]) -> io::Result<()> {
        self.write_top_border(layout)?;
        self.write_header_row(layout, titles)?;
        self.write_separator(layout)?;
        for row in rows {
            self.write_row(layout, row)?;
        }
        self.write_bottom_border(layout)
    }
}

/// ANSI SGR foreground code for a `term` colour
fn ansi_code(color: Color) -> u32 {
    if color < 8 { 30 + color } else { 90 + (color - 8) }
}

//
// Console width
//

static CONSOLE_WIDTH: OnceLock<usize> = OnceLock::new();

/// Get terminal width or default to 120
fn get_terminal_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() { w as usize } else { 120 }
}

/// Override the detected width (used by `--console-width` and tests)
pub fn set_console_width(width: usize) {
    let _ = CONSOLE_WIDTH.set(width); // Ignore error if already initialized
}

/// Width tables should be laid out for
pub fn console_width() -> usize {
    *CONSOLE_WIDTH.get_or_init(get_terminal_width)
}

//
// Text Formatting Utilities
//

/// Count the display width of a string, accounting for wide Unicode characters
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate and pad string to exact width
pub fn truncate_with_padding(s: &str, width: usize) -> String {
    let display_w = display_width(s);

    if display_w > width {
        let mut result = String::new();
        let mut current_width = 0;

        // Reserve space for "..."
        let target_width = if width >= 3 { width - 3 } else { width };

        for c in s.chars() {
            let c_width = UnicodeWidthChar::width(c).unwrap_or(1);
            if current_width + c_width > target_width {
                break;
            }
            result.push(c);
            current_width += c_width;
        }

        if width >= 3 {
            result.push_str("...");
            current_width += 3;
        }

        if current_width < width {
            result.push_str(&" ".repeat(width - current_width));
        }

        result
    } else {
        format!("{}{}", s, " ".repeat(width - display_w))
    }
}

/// Greedy word wrap to `width` display columns
///
/// Explicit newlines are kept. Words longer than `width` are split.
/// Always returns at least one (possibly empty) line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = display_width(word);

            if word_width > width {
                // Flush, then hard-split the long word
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                for c in word.chars() {
                    let c_width = UnicodeWidthChar::width(c).unwrap_or(1);
                    if line_width + c_width > width {
                        lines.push(std::mem::take(&mut line));
                        line_width = 0;
                    }
                    line.push(c);
                    line_width += c_width;
                }
                continue;
            }

            let needed = if line.is_empty() { word_width } else { line_width + 1 + word_width };
            if needed > width {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            if !line.is_empty() {
                line.push(' ');
                line_width += 1;
            }
            line.push_str(word);
            line_width += word_width;
        }

        lines.push(line);
    }

    lines
}

#[cfg(test)]
#[path = "console_format_test.rs"]
mod console_format_test;
