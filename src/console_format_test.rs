/// Tests for console formatting module
///
/// These tests pin down table layout and text fitting so rendered
/// views stay stable.

#[cfg(test)]
mod tests {
    use crate::console_format::*;

    /// Standard width for tests to ensure reproducible output
    const TEST_CONSOLE_WIDTH: usize = 100;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut TableWriter<&mut Vec<u8>>) -> std::io::Result<()>,
    {
        let mut buf = Vec::new();
        {
            let mut writer = TableWriter::new(&mut buf, false);
            f(&mut writer).unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_display_width_ascii() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn test_display_width_unicode() {
        assert_eq!(display_width("│"), 1);
        assert_eq!(display_width("📦"), 2);
        assert_eq!(display_width("✓✓✓"), 3);
    }

    #[test]
    fn test_truncate_with_padding_exact_fit() {
        let result = truncate_with_padding("hello", 5);
        assert_eq!(result, "hello");
    }

    #[test]
    fn test_truncate_with_padding_needs_padding() {
        let result = truncate_with_padding("hi", 5);
        assert_eq!(result, "hi   ");
    }

    #[test]
    fn test_truncate_with_padding_needs_truncation() {
        let result = truncate_with_padding("hello world", 8);
        assert_eq!(result, "hello...");
        assert_eq!(display_width(&result), 8);
    }

    #[test]
    fn test_wrap_text_words() {
        let lines = wrap_text("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
        assert!(lines.iter().all(|l| display_width(l) <= 10));
    }

    #[test]
    fn test_wrap_text_splits_long_words_and_keeps_newlines() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("one\ntwo", 20), vec!["one", "two"]);
        assert_eq!(wrap_text("", 5), vec![""]);
    }

    #[test]
    fn test_layout_fills_width() {
        let layout = TableLayout::new(TEST_CONSOLE_WIDTH, &[ColumnWidth::Fixed(12), ColumnWidth::Flex(10), ColumnWidth::Flex(10)]);
        assert_eq!(layout.widths[0], 12);
        assert_eq!(layout.widths[1], layout.widths[2]);
        assert!(layout.total_width() <= TEST_CONSOLE_WIDTH);
        assert!(layout.total_width() >= TEST_CONSOLE_WIDTH - 1);
    }

    #[test]
    fn test_layout_respects_flex_minimum_on_narrow_terminal() {
        let layout = TableLayout::new(20, &[ColumnWidth::Fixed(12), ColumnWidth::Flex(15)]);
        assert_eq!(layout.widths, vec![12, 15]);
    }

    #[test]
    fn test_table_lines_have_equal_width() {
        let layout = TableLayout::new(60, &[ColumnWidth::Fixed(6), ColumnWidth::Flex(10)]);
        let output = render(|w| {
            w.write_table(
                &layout,
                &["ID", "Text"],
                &[
                    vec![Cell::plain("A1"), Cell::plain("short")],
                    vec![Cell::plain("B2"), Cell::plain("a much longer piece of text that has to wrap over lines")],
                ],
            )
        });

        let widths: Vec<usize> = output.lines().map(display_width).collect();
        assert!(widths.iter().all(|w| *w == layout.total_width()), "ragged table:\n{}", output);
        assert!(output.starts_with('┌'));
        assert!(output.trim_end().ends_with('┘'));
        // Wrapped row occupies more than one line
        assert!(output.lines().count() > 6);
    }

    #[test]
    fn test_colors_only_when_enabled() {
        let layout = TableLayout::new(40, &[ColumnWidth::Fixed(8)]);
        let row = vec![Cell::colored("high", term::color::BRIGHT_GREEN)];

        let plain = render(|w| w.write_row(&layout, &row));
        assert!(!plain.contains('\x1b'));

        let mut buf = Vec::new();
        TableWriter::new(&mut buf, true).write_row(&layout, &row).unwrap();
        let colored = String::from_utf8(buf).unwrap();
        assert!(colored.contains("\x1b[92m"));
    }
}
