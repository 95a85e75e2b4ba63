/// Single coordinate axis used for the board side length and positions.
pub type Coord = u8;

/// Count type used for pair counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Identifier shared by the two cards of a pair, starting at 1.
pub type PairId = u16;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Iterates every coordinate of a `size`×`size` grid in row-major order.
pub fn iter_cells(size: Coord) -> impl Iterator<Item = Coord2> {
    (0..size).flat_map(move |row| (0..size).map(move |col| (row, col)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn iter_cells_is_row_major() {
        let cells: Vec<_> = iter_cells(2).collect();
        assert_eq!(cells, [(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn mult_saturates() {
        assert_eq!(mult(4, 4), 16);
        assert_eq!(mult(Coord::MAX, Coord::MAX), 65025);
    }
}
