//! Console Grid
//!
//! Dense row-major storage for console cells. A slot is `None` until a cell
//! is written there. The grid only moves cells around; releasing visual
//! handles of cells it hands back is the caller's job.

use super::cell::Cell;
use super::cursor::Dimensions;

/// Row-major grid of optional cells, indexed by `row * cols + col`
#[derive(Debug)]
pub struct Grid<H> {
    cells: Vec<Option<Cell<H>>>,
    dims: Dimensions,
}

impl<H> Grid<H> {
    pub fn new(dims: Dimensions) -> Self {
        Self {
            cells: (0..dims.area()).map(|_| None).collect(),
            dims,
        }
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        self.dims
            .contains(row, col)
            .then(|| row * self.dims.cols + col)
    }

    /// Get a reference to a cell
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell<H>> {
        self.index(row, col)
            .and_then(|i| self.cells[i].as_ref())
    }

    /// Get a mutable reference to a cell
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell<H>> {
        self.index(row, col)
            .and_then(|i| self.cells[i].as_mut())
    }

    /// Install `cell` at (row, col), returning the cell it replaced.
    ///
    /// Out-of-range coordinates hand the new cell back as `Err`.
    pub fn replace(
        &mut self,
        row: usize,
        col: usize,
        cell: Cell<H>,
    ) -> Result<Option<Cell<H>>, Cell<H>> {
        match self.index(row, col) {
            Some(i) => Ok(self.cells[i].replace(cell)),
            None => Err(cell),
        }
    }

    /// Remove and return the cell at (row, col)
    pub fn take(&mut self, row: usize, col: usize) -> Option<Cell<H>> {
        self.index(row, col).and_then(|i| self.cells[i].take())
    }

    /// Shift every row up by one. The old top row is returned; the bottom
    /// row becomes empty.
    pub fn shift_up(&mut self) -> Vec<Cell<H>> {
        let cols = self.dims.cols;
        let evicted: Vec<Cell<H>> = self.cells.drain(..cols).flatten().collect();
        self.cells.extend((0..cols).map(|_| None));
        evicted
    }

    /// Change the dimensions, keeping every cell that still fits at its
    /// coordinates. Cells that fall outside the new bounds are returned.
    pub fn resize(&mut self, dims: Dimensions) -> Vec<Cell<H>> {
        let old_cols = self.dims.cols;
        let mut kept: Vec<Option<Cell<H>>> = (0..dims.area()).map(|_| None).collect();
        let mut evicted = Vec::new();

        for (i, slot) in self.cells.drain(..).enumerate() {
            let Some(cell) = slot else { continue };
            let (row, col) = (i / old_cols, i % old_cols);
            if dims.contains(row, col) {
                kept[row * dims.cols + col] = Some(cell);
            } else {
                evicted.push(cell);
            }
        }

        self.cells = kept;
        self.dims = dims;
        evicted
    }

    /// Iterate over written cells as ((row, col), cell)
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Cell<H>)> + '_ {
        let cols = self.dims.cols;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, slot)| slot.as_ref().map(|cell| ((i / cols, i % cols), cell)))
    }

    /// Iterate over the written cells of one row as (col, cell)
    pub fn row_cells(&self, row: usize) -> impl Iterator<Item = (usize, &Cell<H>)> + '_ {
        let cols = self.dims.cols;
        let start = (row.min(self.dims.rows)) * cols;
        let end = if row < self.dims.rows { start + cols } else { start };
        self.cells[start..end]
            .iter()
            .enumerate()
            .filter_map(|(col, slot)| slot.as_ref().map(|cell| (col, cell)))
    }

    /// Remove every cell, returning them
    pub fn drain(&mut self) -> Vec<Cell<H>> {
        self.cells.iter_mut().filter_map(Option::take).collect()
    }

    /// Number of written cells
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rgba;

    fn cell(ch: char) -> Cell<u32> {
        Cell::visible(ch, Rgba::WHITE, ch as u32)
    }

    #[test]
    fn test_grid_new() {
        let grid: Grid<u32> = Grid::new(Dimensions::new(10, 20));
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.cols(), 20);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_grid_replace_and_take() {
        let mut grid = Grid::new(Dimensions::new(10, 20));
        assert!(matches!(grid.replace(3, 4, cell('A')), Ok(None)));
        assert_eq!(grid.get(3, 4).unwrap().ch, 'A');

        let old = grid.replace(3, 4, cell('B')).unwrap().unwrap();
        assert_eq!(old.ch, 'A');
        assert_eq!(grid.take(3, 4).unwrap().ch, 'B');
        assert!(grid.get(3, 4).is_none());
    }

    #[test]
    fn test_grid_out_of_range() {
        let mut grid = Grid::new(Dimensions::new(10, 20));
        let rejected = grid.replace(10, 0, cell('X')).unwrap_err();
        assert_eq!(rejected.ch, 'X');
        assert!(grid.get(0, 20).is_none());
        assert!(grid.take(99, 99).is_none());
    }

    #[test]
    fn test_grid_shift_up() {
        let mut grid = Grid::new(Dimensions::new(10, 10));
        grid.replace(0, 0, cell('T')).unwrap();
        grid.replace(1, 5, cell('M')).unwrap();
        grid.replace(9, 9, cell('B')).unwrap();

        let evicted = grid.shift_up();
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].ch, 'T');
        assert_eq!(grid.get(0, 5).unwrap().ch, 'M');
        assert_eq!(grid.get(8, 9).unwrap().ch, 'B');
        assert_eq!(grid.row_cells(9).count(), 0);
    }

    #[test]
    fn test_grid_resize_clips() {
        let mut grid = Grid::new(Dimensions::new(20, 20));
        grid.replace(2, 3, cell('K')).unwrap();
        grid.replace(15, 0, cell('R')).unwrap();
        grid.replace(0, 18, cell('C')).unwrap();

        let evicted = grid.resize(Dimensions::new(10, 15));
        let mut chars: Vec<char> = evicted.iter().map(|c| c.ch).collect();
        chars.sort();
        assert_eq!(chars, vec!['C', 'R']);
        assert_eq!(grid.get(2, 3).unwrap().ch, 'K');
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_grid_resize_grows() {
        let mut grid = Grid::new(Dimensions::new(10, 10));
        grid.replace(9, 9, cell('Z')).unwrap();
        assert!(grid.resize(Dimensions::new(12, 30)).is_empty());
        assert_eq!(grid.get(9, 9).unwrap().ch, 'Z');
        assert!(grid.replace(11, 29, cell('Y')).is_ok());
    }

    #[test]
    fn test_grid_iter_and_drain() {
        let mut grid = Grid::new(Dimensions::new(10, 10));
        grid.replace(1, 2, cell('a')).unwrap();
        grid.replace(3, 4, cell('b')).unwrap();
        let positions: Vec<(usize, usize)> = grid.iter().map(|(pos, _)| pos).collect();
        assert_eq!(positions, vec![(1, 2), (3, 4)]);

        assert_eq!(grid.drain().len(), 2);
        assert!(grid.is_empty());
    }
}
