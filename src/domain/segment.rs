//! Task segmentation
//!
//! Splits a document's cells into contiguous runs of indices, each run
//! ending at a graded cell. The first run may start with a description
//! cell that becomes the task header; cells after the last graded cell
//! form the trailing `other` run.

use serde::Serialize;

use super::cell::Cell;

/// Segmentation of a document into grading subtasks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskOutline {
    /// Index of the leading description cell, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<usize>,

    /// Completed runs of cell indices; each run ends at a graded cell
    pub subtasks: Vec<Vec<usize>>,

    /// Trailing cells with no terminating graded cell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<Vec<usize>>,
}

impl TaskOutline {
    /// Segments `cells` with a single left-to-right scan
    ///
    /// Any input is valid: a document without graded cells produces no
    /// subtasks and lands entirely in `other`.
    pub fn from_cells(cells: &[Cell]) -> Self {
        let mut subtasks: Vec<Vec<usize>> = Vec::new();
        let mut current: Vec<usize> = Vec::new();

        for (idx, cell) in cells.iter().enumerate() {
            current.push(idx);
            if cell.is_graded() {
                subtasks.push(std::mem::take(&mut current));
            }
        }

        // A description cell at the front of the first completed subtask
        // is the task header, not part of the subtask.
        let mut header = None;
        if let Some(first) = subtasks.first_mut() {
            let leads_with_description = first
                .first()
                .map(|&idx| cells[idx].is_description())
                .unwrap_or(false);
            if leads_with_description {
                header = Some(first.remove(0));
            }
        }

        let other = if current.is_empty() {
            None
        } else {
            Some(current)
        };

        TaskOutline {
            header,
            subtasks,
            other,
        }
    }
}
