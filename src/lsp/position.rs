//! Byte offset and LSP position conversions
//!
//! Columns count characters, matching how the server advertises positions.

use tower_lsp::lsp_types::{Position, Range};

/// Convert a byte offset to LSP Position (0-based line and character)
pub fn offset_to_position(source: &str, offset: usize) -> Position {
    let offset = offset.min(source.len());
    let mut line = 0u32;
    let mut col = 0u32;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }

    Position::new(line, col)
}

/// Convert an LSP Position to a byte offset.
///
/// A column past the end of its line clamps to the line end; a line past the end of the source
/// clamps to the source length.
pub fn position_to_offset(source: &str, position: Position) -> usize {
    let mut line_start = 0usize;
    for _ in 0..position.line {
        match source[line_start..].find('\n') {
            Some(newline) => line_start += newline + 1,
            None => return source.len(),
        }
    }
    let line = &source[line_start..];
    let line_len = line.find('\n').unwrap_or(line.len());
    let column = line[..line_len]
        .char_indices()
        .nth(position.character as usize)
        .map_or(line_len, |(i, _)| i);
    line_start + column
}

/// Convert a span to LSP Range
pub fn span_to_range(source: &str, start: usize, end: usize) -> Range {
    let start_pos = offset_to_position(source, start);
    let end_pos = offset_to_position(source, end.max(start + 1));
    Range::new(start_pos, end_pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_to_position() {
        let source = "line 1\nline 2\nline 3";

        let pos = offset_to_position(source, 0);
        assert_eq!(pos.line, 0);
        assert_eq!(pos.character, 0);

        let pos = offset_to_position(source, 7); // Start of "line 2"
        assert_eq!(pos.line, 1);
        assert_eq!(pos.character, 0);

        let pos = offset_to_position(source, 10); // "e 2"
        assert_eq!(pos.line, 1);
        assert_eq!(pos.character, 3);
    }

    #[test]
    fn test_position_to_offset() {
        let source = "line 1\nline 2\nline 3";
        assert_eq!(position_to_offset(source, Position::new(0, 0)), 0);
        assert_eq!(position_to_offset(source, Position::new(1, 3)), 10);
        assert_eq!(position_to_offset(source, Position::new(1, 99)), 13);
        assert_eq!(position_to_offset(source, Position::new(9, 0)), source.len());
    }

    #[test]
    fn test_position_round_trip_with_multibyte() {
        let source = "// é\nScalar s;";
        let offset = source.find('s').unwrap();
        let position = offset_to_position(source, offset);
        assert_eq!(position, Position::new(1, 7));
        assert_eq!(position_to_offset(source, position), offset);
    }

    #[test]
    fn test_span_to_range() {
        let range = span_to_range("ab\ncd", 3, 3);
        assert_eq!(range, Range::new(Position::new(1, 0), Position::new(1, 1)));
    }
}
