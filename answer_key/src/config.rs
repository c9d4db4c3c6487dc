// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The content of one spreadsheet cell, as handed over by the decoder.
///
/// Cells are compared and used as mapping keys through their text form, see
/// [`Cell::as_text`].
#[derive(PartialEq, Debug, Clone)]
pub enum Cell {
    /// A blank cell, or a cell past the end of a short row.
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// The text form of the cell.
    ///
    /// Numbers are written without grouping separators and without a trailing `.0`
    /// when they are integral. Blank cells are the empty string, never a placeholder.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => "".to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Cell {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Cell {
        Cell::Number(n)
    }
}

pub type Row = Vec<Cell>;

/// Row 0 is the header (answer key), the other rows are the respondents.
pub type Table = Vec<Row>;

/// Number of leading identity columns (name, class) that are never remapped.
pub const IDENTITY_COLUMNS: usize = 2;

/// One of the five answer codes.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Code {
    A,
    B,
    C,
    D,
    E,
}

impl Code {
    pub const ALL: [Code; 5] = [Code::A, Code::B, Code::C, Code::D, Code::E];

    pub fn as_char(&self) -> char {
        match self {
            Code::A => 'A',
            Code::B => 'B',
            Code::C => 'C',
            Code::D => 'D',
            Code::E => 'E',
        }
    }

    pub fn from_char(c: char) -> Option<Code> {
        Code::ALL.iter().copied().find(|code| code.as_char() == c)
    }

    /// The four codes left once `self` is taken, in A..E order.
    pub fn others(&self) -> [Code; 4] {
        let mut res = [Code::A; 4];
        for (slot, code) in res
            .iter_mut()
            .zip(Code::ALL.iter().filter(|c| *c != self))
        {
            *slot = *code;
        }
        res
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// ******** Errors *********

/// Errors that prevent the remapping from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RemapErrors {
    /// The table does not even have a header row.
    EmptyTable,
    /// A question column has more distinct answers than there are codes left, and the
    /// rules forbid reusing a code.
    CodeCollision { column: usize, distinct: usize },
}

impl Error for RemapErrors {}

impl Display for RemapErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemapErrors::EmptyTable => write!(f, "the table has no header row"),
            RemapErrors::CodeCollision { column, distinct } => write!(
                f,
                "column {} has {} distinct answers, more than the available codes",
                column, distinct
            ),
        }
    }
}

// ********* Configuration **********

/// What to do when a column has more distinct answers than free codes.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum CodeOverflow {
    /// Cycle through the free codes again. Two different answers then share a code.
    Wrap,
    /// Fail the whole transform.
    Reject,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RemapRules {
    pub code_overflow: CodeOverflow,
    /// Writes the concatenated answer key codes in the header row, above the combined
    /// answer column.
    pub include_key_column: bool,
    /// Header label of the score column.
    pub score_label: String,
}

impl RemapRules {
    pub const DEFAULT_SCORE_LABEL: &'static str = "NILAI";

    pub fn default_rules() -> RemapRules {
        RemapRules {
            code_overflow: CodeOverflow::Wrap,
            include_key_column: true,
            score_label: RemapRules::DEFAULT_SCORE_LABEL.to_string(),
        }
    }
}

impl Default for RemapRules {
    fn default() -> Self {
        RemapRules::default_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_text_form() {
        assert_eq!(Cell::Empty.as_text(), "");
        assert_eq!(Cell::Number(5.0).as_text(), "5");
        assert_eq!(Cell::Number(2.5).as_text(), "2.5");
        assert_eq!(Cell::Number(12345678.0).as_text(), "12345678");
        assert_eq!(Cell::Bool(true).as_text(), "true");
        assert_eq!(Cell::text("Paris").as_text(), "Paris");
    }

    #[test]
    fn others_keeps_order() {
        assert_eq!(Code::C.others(), [Code::A, Code::B, Code::D, Code::E]);
        assert_eq!(Code::A.others(), [Code::B, Code::C, Code::D, Code::E]);
        assert_eq!(Code::E.others(), [Code::A, Code::B, Code::C, Code::D]);
    }

    #[test]
    fn code_chars() {
        for c in Code::ALL {
            assert_eq!(Code::from_char(c.as_char()), Some(c));
        }
        assert_eq!(Code::from_char('F'), None);
    }
}
