use indexmap::IndexMap;

use super::board::Grid;

/// Bijection between grid coordinates and dense variable ids.
///
/// Ids start at 1 and follow row-major order, so the id of `(row, col)` is
/// its insertion index plus one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarMap {
    by_coord: IndexMap<(usize, usize), u32>,
}

impl VarMap {
    pub fn for_grid(grid: &Grid) -> Self {
        let mut by_coord = IndexMap::with_capacity(grid.len());
        for (coord, _) in grid.cells() {
            let id = by_coord.len() as u32 + 1;
            by_coord.insert(coord, id);
        }
        Self { by_coord }
    }

    pub fn var(&self, row: usize, col: usize) -> Option<u32> {
        self.by_coord.get(&(row, col)).copied()
    }

    pub fn coord(&self, var: u32) -> Option<(usize, usize)> {
        let idx = (var as usize).checked_sub(1)?;
        self.by_coord.get_index(idx).map(|(&coord, _)| coord)
    }

    pub fn len(&self) -> usize {
        self.by_coord.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_coord.is_empty()
    }

    /// All variables in ascending id order.
    pub fn ordered_vars(&self) -> Vec<u32> {
        self.by_coord.values().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), u32)> + '_ {
        self.by_coord.iter().map(|(&coord, &var)| (coord, var))
    }
}
