//! Spreadsheet column-letter codec and A1-notation range composition

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SheetsError};

/// Convert a 1-based column index to its column letters (1 -> "A", 27 -> "AA")
///
/// Uses bijective base-26 numeration: every position contributes a value in
/// 1..=26, so the mapping between positive integers and letter strings is a
/// bijection. An index of 0 is rejected.
pub fn column_letters(index: u32) -> Result<String> {
    if index == 0 {
        return Err(SheetsError::InvalidArgument(
            "column index must be >= 1".to_string(),
        ));
    }

    let mut letters = String::new();
    let mut n = index;
    while n > 0 {
        let remainder = (n - 1) % 26;
        letters.insert(0, (b'A' + remainder as u8) as char);
        n = (n - 1) / 26;
    }
    Ok(letters)
}

/// Convert column letters back to the 1-based column index ("A" -> 1, "AA" -> 27)
///
/// Inverse of [`column_letters`]; rejects empty input and characters outside
/// A-Z (lowercase is accepted and normalized).
pub fn column_index(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(SheetsError::InvalidArgument(
            "column letters must be non-empty".to_string(),
        ));
    }

    let mut index: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(SheetsError::InvalidArgument(format!(
                "invalid character '{}' in column letters \"{}\"",
                c, letters
            )));
        }
        let value = (c.to_ascii_uppercase() as u8 - b'A' + 1) as u32;
        index = index
            .checked_mul(26)
            .and_then(|i| i.checked_add(value))
            .ok_or_else(|| {
                SheetsError::InvalidArgument(format!(
                    "column letters \"{}\" exceed the supported column range",
                    letters
                ))
            })?;
    }
    Ok(index)
}

/// A parsed A1-notation cell reference ("B3" -> column 2, row 3)
///
/// Both coordinates are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub column: u32,
    pub row: u32,
}

impl CellRef {
    pub fn new(column: u32, row: u32) -> Result<Self> {
        if column == 0 || row == 0 {
            return Err(SheetsError::InvalidArgument(
                "cell coordinates are 1-based".to_string(),
            ));
        }
        Ok(Self { column, row })
    }
}

impl FromStr for CellRef {
    type Err = SheetsError;

    fn from_str(s: &str) -> Result<Self> {
        let split = s.find(|c: char| c.is_ascii_digit()).ok_or_else(|| {
            SheetsError::InvalidArgument(format!("cell reference \"{}\" has no row number", s))
        })?;
        let (letters, digits) = s.split_at(split);

        let column = column_index(letters)?;
        let row: u32 = digits.parse().map_err(|_| {
            SheetsError::InvalidArgument(format!("invalid row number in cell reference \"{}\"", s))
        })?;
        if row == 0 {
            return Err(SheetsError::InvalidArgument(
                "row numbers are 1-based".to_string(),
            ));
        }

        Ok(Self { column, row })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // column is never 0 by construction
        let letters = column_letters(self.column).map_err(|_| fmt::Error)?;
        write!(f, "{}{}", letters, self.row)
    }
}

/// Build an A1-notation range covering a rectangular block of data
///
/// The block starts at `start` and spans `row_count` rows by `column_count`
/// columns, giving `"{sheet}!{start}:{end_letters}{end_row}"`.
pub fn build_range(
    sheet: &str,
    start: &str,
    row_count: u32,
    column_count: u32,
) -> Result<String> {
    if sheet.is_empty() {
        return Err(SheetsError::InvalidArgument(
            "sheet name must be non-empty".to_string(),
        ));
    }
    if row_count == 0 || column_count == 0 {
        return Err(SheetsError::InvalidArgument(
            "a range needs at least one row and one column".to_string(),
        ));
    }

    let start_cell: CellRef = start.parse()?;
    let end_column = start_cell
        .column
        .checked_add(column_count - 1)
        .ok_or_else(|| {
            SheetsError::InvalidArgument("end column exceeds the supported range".to_string())
        })?;
    let end_letters = column_letters(end_column)?;
    let end_row = start_cell.row.checked_add(row_count - 1).ok_or_else(|| {
        SheetsError::InvalidArgument("end row exceeds the supported range".to_string())
    })?;

    Ok(format!("{}!{}:{}{}", sheet, start_cell, end_letters, end_row))
}

/// Build a range for a block anchored at A1
pub fn build_range_from_a1(sheet: &str, row_count: u32, column_count: u32) -> Result<String> {
    build_range(sheet, "A1", row_count, column_count)
}

/// Where the header width for a header-preserving clear comes from
///
/// The width can be the caller's known column count or a count measured from
/// the sheet's current first row by the spreadsheet collaborator. Both modes
/// produce the same range for the same width; the distinction records which
/// source the caller chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderWidth {
    /// Caller's known column count
    Declared(u32),
    /// Column count read from the sheet's live first row
    Measured(u32),
}

impl HeaderWidth {
    fn columns(self) -> u32 {
        match self {
            HeaderWidth::Declared(n) | HeaderWidth::Measured(n) => n,
        }
    }
}

/// What a clear operation should cover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearScope {
    /// The whole sheet, header included
    EntireSheet,
    /// Everything below the first row, across the header's columns
    BelowHeader(HeaderWidth),
}

/// Build the range string a clear request should target
///
/// `EntireSheet` is just the sheet name (the remote API treats a bare sheet
/// name as the whole sheet). `BelowHeader` yields an open-ended column range
/// `"{sheet}!A2:{letters}"` so rows below the header are cleared no matter how
/// many there are.
pub fn clear_range(sheet: &str, scope: ClearScope) -> Result<String> {
    if sheet.is_empty() {
        return Err(SheetsError::InvalidArgument(
            "sheet name must be non-empty".to_string(),
        ));
    }

    match scope {
        ClearScope::EntireSheet => Ok(sheet.to_string()),
        ClearScope::BelowHeader(width) => {
            let letters = column_letters(width.columns())?;
            Ok(format!("{}!A2:{}", sheet, letters))
        }
    }
}
