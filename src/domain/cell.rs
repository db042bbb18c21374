//! Cell domain model
//!
//! Cells are the elements of a notebook document. A cell may carry an
//! nbgrader metadata record; cells without one are plain cells, invisible
//! to the grading logic.

use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CellError {
    #[error("{0} is not a supported cell type")]
    UnsupportedCellType(String),
}

/// Kind of a notebook cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    Markdown,
    Code,
    Raw,
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellType::Markdown => write!(f, "markdown"),
            CellType::Code => write!(f, "code"),
            CellType::Raw => write!(f, "raw"),
        }
    }
}

impl std::str::FromStr for CellType {
    type Err = CellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(CellType::Markdown),
            "code" => Ok(CellType::Code),
            "raw" => Ok(CellType::Raw),
            _ => Err(CellError::UnsupportedCellType(s.to_string())),
        }
    }
}

fn default_schema_version() -> u32 {
    3
}

/// The nbgrader record attached to managed cells
///
/// Field defaults mirror what nbgrader omits on the wire: ungraded cells
/// carry no `points`, and older notebooks may omit `schema_version` and
/// `task`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingMetadata {
    /// Whether this cell contributes to the grade
    pub grade: bool,

    /// Identifier naming the cell within its notebook
    pub grade_id: String,

    /// Whether the cell is read-only during authoring
    pub locked: bool,

    /// Points awarded when the cell is graded
    #[serde(default)]
    pub points: f64,

    /// Metadata schema version written by nbgrader
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Whether this cell holds a model answer
    pub solution: bool,

    /// Whether this is a task-style (manually graded) cell
    #[serde(default)]
    pub task: bool,
}

impl GradingMetadata {
    /// Creates the record for a locked, ungraded cell
    pub fn read_only(grade_id: impl Into<String>) -> Self {
        Self {
            grade: false,
            grade_id: grade_id.into(),
            locked: true,
            points: 0.0,
            schema_version: 3,
            solution: false,
            task: false,
        }
    }

    /// Creates the record for a model-answer cell
    pub fn solution(grade_id: impl Into<String>) -> Self {
        Self {
            grade: false,
            grade_id: grade_id.into(),
            locked: false,
            points: 0.0,
            schema_version: 3,
            solution: true,
            task: false,
        }
    }

    /// Creates the record for a graded cell worth `points`
    pub fn graded(grade_id: impl Into<String>, points: f64) -> Self {
        Self {
            grade: true,
            grade_id: grade_id.into(),
            locked: false,
            points,
            schema_version: 3,
            solution: false,
            task: false,
        }
    }
}

/// Cell-level metadata
///
/// Only the nbgrader record is modeled; every other key round-trips
/// opaquely through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellMetadata {
    /// The nbgrader record, present only on managed cells
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbgrader: Option<GradingMetadata>,

    /// All remaining metadata keys, preserved as-is
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Cell source text
///
/// nbformat stores source either as a single string or as a list of line
/// strings. Both forms deserialize to one in-memory string.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Source(String);

impl Source {
    /// Creates a source from text
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the source text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the source is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Source {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SourceVisitor;

        impl<'de> Visitor<'de> for SourceVisitor {
            type Value = Source;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or a sequence of line strings")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Source(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Source(value))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut text = String::new();
                while let Some(line) = seq.next_element::<String>()? {
                    text.push_str(&line);
                }
                Ok(Source(text))
            }
        }

        deserializer.deserialize_any(SourceVisitor)
    }
}

/// A notebook cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Kind of cell
    pub cell_type: CellType,

    /// Cell metadata, including the optional nbgrader record
    #[serde(default)]
    pub metadata: CellMetadata,

    /// Cell text
    #[serde(default)]
    pub source: Source,
}

impl Cell {
    /// Creates a plain markdown cell
    pub fn markdown(source: &str) -> Self {
        Self {
            cell_type: CellType::Markdown,
            metadata: CellMetadata::default(),
            source: source.into(),
        }
    }

    /// Creates a plain code cell
    pub fn code(source: &str) -> Self {
        Self {
            cell_type: CellType::Code,
            metadata: CellMetadata::default(),
            source: source.into(),
        }
    }

    /// Attaches an nbgrader record to the cell
    pub fn with_grading(mut self, grading: GradingMetadata) -> Self {
        self.metadata.nbgrader = Some(grading);
        self
    }

    /// Builds a locked, ungraded cell of the given kind
    ///
    /// Only "markdown" and "code" cells can be created this way; any other
    /// kind is rejected.
    pub fn read_only(cell_type: &str, grade_id: &str, source: &str) -> Result<Self, CellError> {
        let cell = match cell_type {
            "markdown" => Self::markdown(source),
            "code" => Self::code(source),
            other => return Err(CellError::UnsupportedCellType(other.to_string())),
        };
        Ok(cell.with_grading(GradingMetadata::read_only(grade_id)))
    }

    fn grading(&self) -> Option<&GradingMetadata> {
        self.metadata.nbgrader.as_ref()
    }

    /// Returns true if the cell carries an nbgrader record
    pub fn is_managed(&self) -> bool {
        self.grading().is_some()
    }

    /// Returns true if the cell contributes to the grade
    pub fn is_graded(&self) -> bool {
        self.grading().map(|g| g.grade).unwrap_or(false)
    }

    /// Returns true if the cell holds a model answer
    pub fn is_solution(&self) -> bool {
        self.grading().map(|g| g.solution).unwrap_or(false)
    }

    /// Returns true if the cell is read-only during authoring
    pub fn is_locked(&self) -> bool {
        self.grading().map(|g| g.locked).unwrap_or(false)
    }

    /// Returns true if the cell is a description: locked, not graded
    pub fn is_description(&self) -> bool {
        self.grading().map(|g| g.locked && !g.grade).unwrap_or(false)
    }

    /// Returns the cell's identifier, absent on plain cells
    pub fn grade_id(&self) -> Option<&str> {
        self.grading().map(|g| g.grade_id.as_str())
    }

    /// Returns the cell's points; 0 for any cell that is not graded
    pub fn points(&self) -> f64 {
        match self.grading() {
            Some(g) if g.grade => g.points,
            _ => 0.0,
        }
    }
}
