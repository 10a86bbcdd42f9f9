//! GridReference: the player-facing `D6-7` notation.
//!
//! A reference names one of 13×13 grid squares (column letter A–M, row 1–13
//! from the north edge) and a keypad sub-cell inside it, numbered like a
//! telephone keypad:
//!
//! ```text
//! 7 8 9
//! 4 5 6
//! 1 2 3
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use mortar_core::constants::{GRID_COLUMNS, GRID_SQUARES};

use crate::error::GridError;

/// NATO code words accepted in place of a column letter.
const NATO_COLUMN_WORDS: [(&str, char); 13] = [
    ("alpha", 'A'),
    ("bravo", 'B'),
    ("charlie", 'C'),
    ("delta", 'D'),
    ("echo", 'E'),
    ("foxtrot", 'F'),
    ("golf", 'G'),
    ("hotel", 'H'),
    ("india", 'I'),
    ("juliet", 'J'),
    ("kilo", 'K'),
    ("lima", 'L'),
    ("mike", 'M'),
];

/// Literal token that may precede the keypad digit (`D6-kpad7`).
const KEYPAD_PREFIX: &str = "kpad";

/// A validated grid square plus keypad position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridReference {
    /// Column letter, `'A'..='M'`.
    pub column: char,
    /// Row number, 1 (north) to 13 (south).
    pub row: u8,
    /// Keypad digit, 1–9.
    pub keypad: u8,
}

impl GridReference {
    /// Build a reference, rejecting out-of-range components.
    /// Lowercase column letters are accepted.
    pub fn new(column: char, row: u8, keypad: u8) -> Result<Self, GridError> {
        let column = column.to_ascii_uppercase();
        column_index(column)?;
        if !(1..=GRID_SQUARES).contains(&row) {
            return Err(GridError::InvalidRow(row));
        }
        if !(1..=9).contains(&keypad) {
            return Err(GridError::InvalidKeypad(keypad));
        }
        Ok(Self {
            column,
            row,
            keypad,
        })
    }

    /// Zero-based column index (A = 0 … M = 12).
    pub fn column_index(&self) -> usize {
        // Construction guarantees a valid column.
        column_index(self.column).unwrap_or_default()
    }

    /// Zero-based row index (row 1 = 0).
    pub fn row_index(&self) -> usize {
        self.row as usize - 1
    }
}

impl fmt::Display for GridReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_grid_reference(self.column, self.row, self.keypad))
    }
}

impl FromStr for GridReference {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_grid_reference(s)
    }
}

/// Zero-based index of a column letter.
pub(crate) fn column_index(column: char) -> Result<usize, GridError> {
    GRID_COLUMNS
        .iter()
        .position(|&c| c == column)
        .ok_or(GridError::InvalidColumn(column))
}

/// Parse a grid reference such as `D6-7`, `d6 kpad 7` or `Delta 6-7`.
///
/// Grammar (case-insensitive, surrounding whitespace ignored):
/// column letter A–M or NATO word, optional spaces, 1–2 digit row,
/// a separator of hyphens/spaces and/or `kpad`, one keypad digit.
/// Returns `None` for anything else; never panics.
pub fn parse_grid_reference(text: &str) -> Option<GridReference> {
    let lower = text.trim().to_ascii_lowercase();

    let (column, rest) = split_column(&lower)?;
    let rest = rest.trim_start();

    let row_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if !(1..=2).contains(&row_len) {
        return None;
    }
    let row: u8 = rest[..row_len].parse().ok()?;

    // A separator is mandatory: "D67" is rejected, not read as D6-7, since
    // row and keypad digits would otherwise run together.
    let (separated, rest) = skip_separator(&rest[row_len..]);
    if !separated {
        return None;
    }

    let mut chars = rest.chars();
    let keypad = chars.next()?.to_digit(10)? as u8;
    if chars.next().is_some() {
        return None;
    }

    GridReference::new(column, row, keypad).ok()
}

/// Like [`parse_grid_reference`], but explains why the text was rejected.
pub fn validate_grid_reference(text: &str) -> Result<GridReference, GridError> {
    if text.trim().is_empty() {
        return Err(GridError::EmptyReference);
    }
    parse_grid_reference(text).ok_or_else(|| GridError::InvalidFormat(text.to_string()))
}

/// Canonical short form, e.g. `D6-7`. Components are not validated.
pub fn format_grid_reference(column: char, row: u8, keypad: u8) -> String {
    format!("{column}{row}-{keypad}")
}

/// Split the leading column (NATO word or single letter) off lowercase text.
fn split_column(text: &str) -> Option<(char, &str)> {
    // Words first, so "delta6-7" is not read as column D followed by "elta".
    for (word, letter) in NATO_COLUMN_WORDS {
        if let Some(rest) = text.strip_prefix(word) {
            return Some((letter, rest));
        }
    }

    let first = text.chars().next()?;
    if ('a'..='m').contains(&first) {
        Some((first.to_ascii_uppercase(), &text[1..]))
    } else {
        None
    }
}

/// Skip the row/keypad separator. Returns whether any separator was present.
fn skip_separator(text: &str) -> (bool, &str) {
    let rest = text.trim_start_matches(|c: char| c == '-' || c.is_whitespace());
    let mut separated = rest.len() < text.len();

    let rest = match rest.strip_prefix(KEYPAD_PREFIX) {
        Some(after) => {
            separated = true;
            after.trim_start()
        }
        None => rest,
    };

    (separated, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gr(column: char, row: u8, keypad: u8) -> GridReference {
        GridReference::new(column, row, keypad).unwrap()
    }

    #[test]
    fn test_parse_canonical() {
        assert_eq!(parse_grid_reference("D6-7"), Some(gr('D', 6, 7)));
        assert_eq!(parse_grid_reference("A1-1"), Some(gr('A', 1, 1)));
        assert_eq!(parse_grid_reference("M13-9"), Some(gr('M', 13, 9)));
    }

    #[test]
    fn test_parse_dialects() {
        let expected = Some(gr('D', 6, 7));
        assert_eq!(parse_grid_reference("d6-7"), expected);
        assert_eq!(parse_grid_reference("D6 7"), expected);
        assert_eq!(parse_grid_reference("D6-kpad7"), expected);
        assert_eq!(parse_grid_reference("D6kpad7"), expected);
        assert_eq!(parse_grid_reference("D6 KPAD 7"), expected);
        assert_eq!(parse_grid_reference("D 6-7"), expected);
        assert_eq!(parse_grid_reference("  D6-7  "), expected);
        assert_eq!(parse_grid_reference("Delta 6-7"), expected);
        assert_eq!(parse_grid_reference("DELTA6-7"), expected);
        assert_eq!(parse_grid_reference("delta 6 kpad 7"), expected);
    }

    #[test]
    fn test_parse_all_nato_words() {
        for (word, letter) in NATO_COLUMN_WORDS {
            let text = format!("{word} 3-5");
            assert_eq!(
                parse_grid_reference(&text),
                Some(gr(letter, 3, 5)),
                "NATO word {word} should map to {letter}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_bad_components() {
        assert_eq!(parse_grid_reference("N6-7"), None, "column past M");
        assert_eq!(parse_grid_reference("Z6-7"), None);
        assert_eq!(parse_grid_reference("D0-7"), None, "row 0");
        assert_eq!(parse_grid_reference("D14-7"), None, "row 14");
        assert_eq!(parse_grid_reference("D6-0"), None, "keypad 0");
        assert_eq!(parse_grid_reference("November 6-7"), None);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_grid_reference(""), None);
        assert_eq!(parse_grid_reference("   "), None);
        assert_eq!(parse_grid_reference("D"), None);
        assert_eq!(parse_grid_reference("D6"), None, "missing keypad");
        assert_eq!(parse_grid_reference("D6-"), None);
        assert_eq!(parse_grid_reference("D67"), None, "missing separator");
        assert_eq!(parse_grid_reference("D123-4"), None, "three-digit row");
        assert_eq!(parse_grid_reference("D6-77"), None, "two-digit keypad");
        assert_eq!(parse_grid_reference("D6_7"), None);
        assert_eq!(parse_grid_reference("D6-kpad-7"), None);
        assert_eq!(parse_grid_reference("6D-7"), None);
        assert_eq!(parse_grid_reference("D6-7x"), None);
        assert_eq!(parse_grid_reference("Dé6-7"), None);
    }

    #[test]
    fn test_validate_messages() {
        assert_eq!(validate_grid_reference(""), Err(GridError::EmptyReference));
        assert_eq!(
            validate_grid_reference("Q1-1"),
            Err(GridError::InvalidFormat("Q1-1".to_string()))
        );
        assert_eq!(validate_grid_reference("E8-5"), Ok(gr('E', 8, 5)));
        assert_eq!("kilo 12 kpad 3".parse(), Ok(gr('K', 12, 3)));
    }

    #[test]
    fn test_new_validates() {
        assert_eq!(GridReference::new('n', 1, 1), Err(GridError::InvalidColumn('N')));
        assert_eq!(GridReference::new('A', 14, 1), Err(GridError::InvalidRow(14)));
        assert_eq!(GridReference::new('A', 1, 10), Err(GridError::InvalidKeypad(10)));
        assert_eq!(GridReference::new('c', 2, 3).map(|g| g.column), Ok('C'));
    }

    #[test]
    fn test_format_and_display() {
        assert_eq!(format_grid_reference('D', 6, 7), "D6-7");
        assert_eq!(format_grid_reference('M', 13, 9), "M13-9");
        assert_eq!(gr('B', 10, 2).to_string(), "B10-2");
        assert_eq!(gr('M', 13, 9).column_index(), 12);
        assert_eq!(gr('M', 13, 9).row_index(), 12);
    }
}
