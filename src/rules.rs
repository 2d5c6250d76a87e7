//! B3/S23 transition rule.

use crate::Grid;

/// Moore neighbourhood without the centre cell.
pub const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Number of alive cells among the 8 toroidal neighbours of (x, y).
#[inline]
pub fn live_neighbors(grid: &Grid, x: i64, y: i64) -> u8 {
    // reduce first so adding an offset cannot overflow
    let (x, y) = grid.wrap(x, y);
    NEIGHBOR_OFFSETS
        .iter()
        .map(|&(dx, dy)| grid.alive(x + dx, y + dy) as u8)
        .sum()
}

/// Rule applied to a cell with a known neighbour count.
#[inline]
pub fn survives(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (_, 3) => true,
        (true, 2) => true,
        _ => false,
    }
}

/// State of (x, y) in the next generation of `grid`.
#[inline]
pub fn next_state(grid: &Grid, x: i64, y: i64) -> bool {
    survives(grid.alive(x, y), live_neighbors(grid, x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fills the first `n` neighbours of the centre of a 3x3 field.
    fn field_with(n: usize, centre: bool) -> Grid {
        let mut grid = Grid::empty(3, 3).unwrap();
        for &(dx, dy) in &NEIGHBOR_OFFSETS[..n] {
            grid.set(1 + dx, 1 + dy, true);
        }
        grid.set(1, 1, centre);
        grid
    }

    #[test]
    fn rule_table() {
        for n in 0..=8u8 {
            for s in [false, true] {
                let expected = n == 3 || (n == 2 && s);
                assert_eq!(survives(s, n), expected, "n={} s={}", n, s);

                let grid = field_with(n as usize, s);
                assert_eq!(live_neighbors(&grid, 1, 1), n);
                assert_eq!(next_state(&grid, 1, 1), expected, "n={} s={}", n, s);
            }
        }
    }

    #[test]
    fn neighbours_wrap_across_corners() {
        let mut grid = Grid::empty(5, 4).unwrap();
        grid.set(4, 3, true);
        grid.set(0, 3, true);
        grid.set(4, 0, true);
        assert_eq!(live_neighbors(&grid, 0, 0), 3);
        assert!(next_state(&grid, 0, 0));
        assert!(!next_state(&grid, 2, 2));
    }

    #[test]
    fn extreme_coordinates_match_reduced_ones() {
        let grid = Grid::random(5, 7, Some(42), 0.5).unwrap();
        for (x, y) in [
            (i64::MAX, i64::MIN),
            (i64::MIN, i64::MAX),
            (i64::MAX, i64::MAX),
            (i64::MIN, i64::MIN),
        ] {
            let (rx, ry) = (x.rem_euclid(5), y.rem_euclid(7));
            assert_eq!(grid.wrap(x, y), (rx, ry));
            assert_eq!(
                live_neighbors(&grid, x, y),
                live_neighbors(&grid, rx, ry),
                "x={} y={}",
                x,
                y
            );
            assert_eq!(next_state(&grid, x, y), next_state(&grid, rx, ry));
        }

        // i64::MAX is column 2 of a 5-wide field; only its right neighbour is alive
        let mut grid = Grid::empty(5, 5).unwrap();
        grid.set(3, 0, true);
        assert_eq!(live_neighbors(&grid, i64::MAX, 0), 1);
        assert_eq!(live_neighbors(&grid, 2, 0), 1);
    }

    #[test]
    fn tiny_torus_counts_cells_repeatedly() {
        // on a 1x1 torus every neighbour is the cell itself
        let mut grid = Grid::empty(1, 1).unwrap();
        grid.set(0, 0, true);
        assert_eq!(live_neighbors(&grid, 0, 0), 8);
        assert!(!next_state(&grid, 0, 0));
    }
}
