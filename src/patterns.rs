use crate::{Grid, LifeError, Result};

/// A finite set of alive cells, stored as offsets from the pattern's centre.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: String,
    cells: Vec<(i64, i64)>,
}

impl Pattern {
    pub fn new(name: impl Into<String>, cells: Vec<(i64, i64)>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn glider() -> Self {
        Self::new("Glider", vec![(0, -1), (1, 0), (-1, 1), (0, 1), (1, 1)])
    }

    pub fn blinker() -> Self {
        Self::new("Blinker", vec![(-1, 0), (0, 0), (1, 0)])
    }

    pub fn block() -> Self {
        Self::new("Block", vec![(0, 0), (1, 0), (0, 1), (1, 1)])
    }

    pub fn r_pentomino() -> Self {
        Self::new("R-pentomino", vec![(0, -1), (1, -1), (-1, 0), (0, 0), (0, 1)])
    }

    /// Parse RLE format; the pattern is re-centred on its bounding box.
    pub fn from_rle(data: &[u8]) -> Result<Self> {
        let (name, width, height, cells) = parse_rle(data)?;
        let (cx, cy) = ((width / 2) as i64, (height / 2) as i64);
        let cells = cells
            .into_iter()
            .map(|(x, y)| (x as i64 - cx, y as i64 - cy))
            .collect();
        Ok(Self::new(name.unwrap_or_else(|| "RLE".to_owned()), cells))
    }

    pub fn cells(&self) -> &[(i64, i64)] {
        &self.cells
    }

    /// Side lengths of the bounding box.
    pub fn extent(&self) -> (u64, u64) {
        if self.cells.is_empty() {
            return (0, 0);
        }
        let (mut x1, mut y1, mut x2, mut y2) = (i64::MAX, i64::MAX, i64::MIN, i64::MIN);
        for &(x, y) in &self.cells {
            (x1, x2) = (x1.min(x), x2.max(x));
            (y1, y2) = (y1.min(y), y2.max(y));
        }
        ((x2 - x1) as u64 + 1, (y2 - y1) as u64 + 1)
    }

    /// Sets the pattern's cells alive around `(cx, cy)`, wrapping at the edges.
    pub fn place(&self, grid: &mut Grid, cx: i64, cy: i64) {
        let (cx, cy) = grid.wrap(cx, cy);
        for &(dx, dy) in &self.cells {
            grid.set(cx + dx, cy + dy, true);
        }
    }

    /// Builds a `width x height` field with the pattern in the middle.
    ///
    /// The pattern needs a dead margin of at least one cell on every side,
    /// otherwise it would interact with itself across the seam.
    pub fn centered(&self, width: usize, height: usize) -> Result<Grid> {
        let mut grid = Grid::empty(width, height)?;
        let (w, h) = self.extent();
        if w + 2 > width as u64 || h + 2 > height as u64 {
            return Err(LifeError::Pattern(format!(
                "{} ({}x{}) does not fit into a {}x{} field",
                self.name, w, h, width, height
            )));
        }
        self.place(&mut grid, (width / 2) as i64, (height / 2) as i64);
        Ok(grid)
    }
}

/// Returns the `#N` name, header sizes and alive cells of an RLE pattern.
fn parse_rle(data: &[u8]) -> Result<(Option<String>, usize, usize, Vec<(usize, usize)>)> {
    let bad = |msg: &str| LifeError::Pattern(format!("RLE: {msg}"));
    let text = std::str::from_utf8(data).map_err(|_| bad("not valid UTF-8"))?;

    let mut name = None;
    let mut lines = text.lines();
    // comment lines, then the header
    let header = loop {
        let line = lines.next().ok_or_else(|| bad("missing header"))?.trim();
        if let Some(comment) = line.strip_prefix('#') {
            if let Some(n) = comment.strip_prefix('N') {
                name = Some(n.trim().to_owned());
            }
        } else if !line.is_empty() {
            break line;
        }
    };

    let (mut width, mut height) = (None, None);
    for field in header.split(',') {
        let (key, value) = field.split_once('=').ok_or_else(|| bad("malformed header"))?;
        let value = value.trim();
        match key.trim() {
            "x" => width = value.parse::<usize>().ok(),
            "y" => height = value.parse::<usize>().ok(),
            "rule" => {
                let rule = value.to_ascii_uppercase();
                if rule != "B3/S23" && rule != "23/3" {
                    return Err(bad(&format!("unsupported rule {value}")));
                }
            }
            _ => {}
        }
    }
    let (width, height) = match (width, height) {
        (Some(w), Some(h)) => (w, h),
        _ => return Err(bad("header must define x and y")),
    };

    // run-length encoded pattern data
    let mut cells = vec![];
    let (mut x, mut y, mut cnt) = (0usize, 0usize, None::<usize>);
    'outer: for line in lines {
        for c in line.trim().bytes() {
            match c {
                b'0'..=b'9' => {
                    let digit = (c - b'0') as usize;
                    cnt = Some(
                        cnt.unwrap_or(0)
                            .checked_mul(10)
                            .and_then(|v| v.checked_add(digit))
                            .ok_or_else(|| bad("run length overflow"))?,
                    );
                }
                b'o' | b'b' => {
                    let n = cnt.take().unwrap_or(1);
                    let end = x
                        .checked_add(n)
                        .filter(|&end| end <= width)
                        .ok_or_else(|| bad("row is wider than the header says"))?;
                    if y >= height {
                        return Err(bad("pattern is taller than the header says"));
                    }
                    if c == b'o' {
                        cells.extend((x..end).map(|xx| (xx, y)));
                    }
                    x = end;
                }
                b'$' => {
                    if y >= height {
                        return Err(bad("pattern is taller than the header says"));
                    }
                    let n = cnt.take().unwrap_or(1);
                    y = y
                        .checked_add(n)
                        .ok_or_else(|| bad("pattern is taller than the header says"))?;
                    x = 0;
                }
                b'!' => break 'outer,
                b' ' | b'\t' => {}
                other => return Err(bad(&format!("unexpected symbol {:?}", other as char))),
            }
        }
    }
    if cells.iter().any(|&(_, cy)| cy >= height) {
        return Err(bad("pattern is taller than the header says"));
    }
    Ok((name, width, height, cells))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GLIDER_RLE: &[u8] = b"#N Glider\n#C a comment\nx = 3, y = 3, rule = B3/S23\nbob$2bo$3o!\n";

    #[test]
    fn glider_in_the_middle() {
        let grid = Pattern::glider().centered(25, 25).unwrap();
        assert_eq!(
            grid.live_cells().collect::<Vec<_>>(),
            vec![(12, 11), (13, 12), (11, 13), (12, 13), (13, 13)]
        );
    }

    #[test]
    fn too_small_field_is_rejected() {
        assert!(Pattern::glider().centered(5, 5).is_ok());
        assert!(matches!(
            Pattern::glider().centered(4, 25),
            Err(LifeError::Pattern(_))
        ));
        assert!(matches!(
            Pattern::glider().centered(0, 25),
            Err(LifeError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn rle_matches_builtin_glider() {
        let parsed = Pattern::from_rle(GLIDER_RLE).unwrap();
        assert_eq!(parsed.name, "Glider");
        assert_eq!(parsed.extent(), (3, 3));
        assert_eq!(
            parsed.centered(9, 9).unwrap(),
            Pattern::glider().centered(9, 9).unwrap()
        );
    }

    #[test]
    fn rle_errors() {
        assert!(Pattern::from_rle(b"bo$ob!").is_err());
        assert!(Pattern::from_rle(b"x = 2, y = 2, rule = B36/S23\nob!").is_err());
        assert!(Pattern::from_rle(b"x = 2, y = 1\n3o!").is_err());
        assert!(Pattern::from_rle(b"x = 2, y = 1\no$o!").is_err());
        assert!(Pattern::from_rle(b"x = 2, y = 2\noq!").is_err());
    }

    #[test]
    fn huge_run_counts_are_errors() {
        let inputs: [&[u8]; 4] = [
            b"x = 5, y = 1\no18446744073709551615o!",
            b"x = 5, y = 1\no$18446744073709551615$o!",
            b"x = 5, y = 1\n99999999999999999999999o!",
            b"x = 5, y = 2\no$$$o!",
        ];
        for data in inputs {
            assert!(
                matches!(Pattern::from_rle(data), Err(LifeError::Pattern(_))),
                "{}",
                String::from_utf8_lossy(data)
            );
        }
        // trailing row breaks past the last row are harmless
        assert!(Pattern::from_rle(b"x = 1, y = 1\no$!").is_ok());
    }

    #[test]
    fn rle_multiline_runs() {
        let pattern = Pattern::from_rle(b"x = 12, y = 2\n10b\n2o$\n12o!").unwrap();
        assert_eq!(pattern.cells().len(), 14);
        assert_eq!(pattern.extent(), (12, 2));
    }
}
