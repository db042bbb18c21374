//! Notebook document model
//!
//! An ordered sequence of cells plus the notebook-level fields needed to
//! round-trip nbformat 4.x JSON. The grading logic only ever reads a
//! notebook; nothing here mutates one.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::cell::Cell;
use super::group;
use super::segment::TaskOutline;

fn default_nbformat() -> u32 {
    4
}

fn default_nbformat_minor() -> u32 {
    5
}

/// A notebook document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    /// Ordered cells
    pub cells: Vec<Cell>,

    /// Notebook-level metadata, preserved as-is
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,

    /// nbformat major version
    #[serde(default = "default_nbformat")]
    pub nbformat: u32,

    /// nbformat minor version
    #[serde(default = "default_nbformat_minor")]
    pub nbformat_minor: u32,
}

impl Notebook {
    /// Creates a notebook from cells, with empty notebook metadata
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            metadata: HashMap::new(),
            nbformat: default_nbformat(),
            nbformat_minor: default_nbformat_minor(),
        }
    }

    /// Returns the number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the notebook has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Segments the notebook into its task outline
    pub fn outline(&self) -> TaskOutline {
        TaskOutline::from_cells(&self.cells)
    }

    /// Identifiers of all solution cells in document order
    pub fn solution_ids(&self) -> Vec<String> {
        group::solution_ids(&self.cells)
    }

    /// Groups of cell indices that belong to one logical task
    pub fn task_groups(&self) -> Vec<Vec<usize>> {
        group::task_groups(&self.cells)
    }

    /// Sum of the points of all graded cells
    pub fn total_points(&self) -> f64 {
        self.cells.iter().map(Cell::points).sum()
    }
}
