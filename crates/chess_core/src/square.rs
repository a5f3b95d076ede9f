use std::fmt;

/// A board coordinate. Rows and columns are zero-indexed 0–7 with row 0 as
/// the eighth rank (black's back rank) and column 0 as the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if row <= 7 && col <= 7 {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// The square `dr` rows and `dc` columns away, if it is on the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// File letter, `a` through `h`.
    pub fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    /// Rank digit, `1` through `8`.
    pub fn rank_char(self) -> char {
        (b'8' - self.row) as char
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_out_of_range() {
        assert!(Square::new(0, 0).is_some());
        assert!(Square::new(7, 7).is_some());
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
    }

    #[test]
    fn offset_stays_on_board() {
        let sq = Square::new(0, 0).unwrap();
        assert!(sq.offset(-1, 0).is_none());
        assert!(sq.offset(0, -1).is_none());
        assert_eq!(sq.offset(1, 1), Square::new(1, 1));
    }

    #[test]
    fn algebraic_display() {
        // Row 6 col 4 is e2, row 0 col 0 is a8.
        assert_eq!(Square::new(6, 4).unwrap().to_string(), "e2");
        assert_eq!(Square::new(0, 0).unwrap().to_string(), "a8");
        assert_eq!(Square::new(7, 7).unwrap().to_string(), "h1");
    }
}
