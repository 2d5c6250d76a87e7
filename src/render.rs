use std::fmt::{self, Display, Write};

use crate::Grid;

/// Draws a field as a bordered block of text, one line per row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Renderer {
    pub alive: char,
    pub dead: char,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            alive: '*',
            dead: ' ',
        }
    }
}

impl Renderer {
    pub fn new(alive: char, dead: char) -> Self {
        Self { alive, dead }
    }

    /// Lazily formatted frame of `grid`.
    pub fn frame<'a>(&self, grid: &'a Grid) -> Frame<'a> {
        Frame {
            renderer: *self,
            grid,
        }
    }

    pub fn render(&self, grid: &Grid) -> String {
        self.frame(grid).to_string()
    }
}

/// A field paired with the glyphs to draw it with.
pub struct Frame<'a> {
    renderer: Renderer,
    grid: &'a Grid,
}

impl Display for Frame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.grid.size();
        let border = "-".repeat(w + 2);
        writeln!(f, "{border}")?;
        for row in self.grid.cells().chunks_exact(w).take(h) {
            f.write_char('|')?;
            for &cell in row {
                f.write_char(if cell {
                    self.renderer.alive
                } else {
                    self.renderer.dead
                })?;
            }
            f.write_str("|\n")?;
        }
        writeln!(f, "{border}")
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Renderer::default().frame(self).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bordered_rows_follow_y() {
        let mut grid = Grid::empty(4, 2).unwrap();
        grid.set(0, 0, true);
        grid.set(3, 1, true);
        assert_eq!(grid.to_string(), "------\n|*   |\n|   *|\n------\n");
    }

    #[test]
    fn custom_glyphs() {
        let mut grid = Grid::empty(3, 1).unwrap();
        grid.set(1, 0, true);
        let renderer = Renderer::new('#', '.');
        assert_eq!(renderer.render(&grid), "-----\n|.#.|\n-----\n");
        assert_eq!(format!("{}", renderer.frame(&grid)), renderer.render(&grid));
    }
}
