// Logical grid dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridConfig {
    pub columns: usize,
    pub rows: usize,
}

impl GridConfig {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    /// True when both dimensions are usable for a render pass
    pub fn is_valid(&self) -> bool {
        self.columns > 0 && self.rows > 0
    }
}
