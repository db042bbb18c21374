//! nbtask - task segmentation and grouping for nbgrader notebooks
//!
//! nbtask reads Jupyter notebooks whose cells carry nbgrader metadata and
//! derives their grading structure: an outline of graded subtasks and
//! groups of cells that belong to one logical task, discovered through
//! identifier substring association.

pub mod domain;
pub mod storage;

pub use domain::{Cell, CellType, GradingMetadata, Notebook, TaskOutline};
