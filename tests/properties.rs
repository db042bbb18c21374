//! Property tests for segmentation and grouping
//!
//! Cells are generated over a tiny identifier alphabet so substring
//! overlaps (and therefore merges) actually happen.

use proptest::prelude::*;

use nbtask::domain::{
    associate_ids, group_ids, solution_ids, valid_name, Cell, GradingMetadata, TaskOutline,
};

fn arb_id() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ab]{1,3}").unwrap()
}

fn arb_managed_cell() -> impl Strategy<Value = Cell> {
    (
        arb_id(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        0.0..10.0f64,
    )
        .prop_map(|(grade_id, grade, solution, locked, points)| {
            Cell::code("").with_grading(GradingMetadata {
                grade,
                grade_id,
                locked,
                points,
                schema_version: 3,
                solution,
                task: false,
            })
        })
}

fn arb_cell() -> impl Strategy<Value = Cell> {
    prop_oneof![
        Just(Cell::markdown("plain")),
        arb_managed_cell(),
    ]
}

fn arb_cells() -> impl Strategy<Value = Vec<Cell>> {
    proptest::collection::vec(arb_cell(), 0..12)
}

fn arb_ungraded_cell() -> impl Strategy<Value = Cell> {
    arb_cell().prop_map(|mut cell| {
        if let Some(grading) = cell.metadata.nbgrader.as_mut() {
            grading.grade = false;
        }
        cell
    })
}

proptest! {
    #[test]
    fn ungraded_documents_land_entirely_in_other(
        cells in proptest::collection::vec(arb_ungraded_cell(), 0..10)
    ) {
        let outline = TaskOutline::from_cells(&cells);

        prop_assert!(outline.subtasks.is_empty());
        prop_assert_eq!(outline.header, None);
        if cells.is_empty() {
            prop_assert_eq!(outline.other, None);
        } else {
            prop_assert_eq!(outline.other, Some((0..cells.len()).collect::<Vec<_>>()));
        }
    }

    #[test]
    fn segmentation_is_idempotent(cells in arb_cells()) {
        prop_assert_eq!(
            TaskOutline::from_cells(&cells),
            TaskOutline::from_cells(&cells)
        );
    }

    #[test]
    fn outline_partitions_the_document(cells in arb_cells()) {
        let outline = TaskOutline::from_cells(&cells);

        let mut seen: Vec<usize> = outline.header.into_iter().collect();
        seen.extend(outline.subtasks.iter().flatten().copied());
        seen.extend(outline.other.iter().flatten().copied());
        seen.sort_unstable();

        prop_assert_eq!(seen, (0..cells.len()).collect::<Vec<_>>());
    }

    #[test]
    fn leading_description_becomes_the_header(mut cells in arb_cells()) {
        cells.insert(0, Cell::read_only("markdown", "intro", "").unwrap());
        cells.push(Cell::code("").with_grading(GradingMetadata::graded("final", 1.0)));

        let outline = TaskOutline::from_cells(&cells);

        prop_assert_eq!(outline.header, Some(0));
        prop_assert!(!outline.subtasks[0].contains(&0));
    }

    #[test]
    fn association_is_reflexive(cells in arb_cells()) {
        let ids = solution_ids(&cells);
        let associated = associate_ids(&cells, &ids);

        for id in &ids {
            let list = associated.get(id).expect("every id has a slot");
            prop_assert!(list.iter().any(|t| t == id));
        }
    }

    #[test]
    fn grouping_drops_no_identifier(cells in arb_cells()) {
        let ids = solution_ids(&cells);
        let associated = associate_ids(&cells, &ids);
        let groups = group_ids(&ids, &associated);

        let grouped: std::collections::HashSet<&String> = groups.iter().flatten().collect();
        let reachable: std::collections::HashSet<&String> =
            associated.values().flatten().collect();

        prop_assert_eq!(grouped, reachable);
    }

    #[test]
    fn group_count_never_exceeds_distinct_ids(cells in arb_cells()) {
        let ids = solution_ids(&cells);
        let associated = associate_ids(&cells, &ids);
        let groups = group_ids(&ids, &associated);

        prop_assert!(groups.len() <= associated.len());
    }

    #[test]
    fn points_are_zero_for_ungraded_cells(cells in arb_cells()) {
        for cell in &cells {
            if !cell.is_graded() {
                prop_assert_eq!(cell.points(), 0.0);
            }
        }
    }

    #[test]
    fn valid_names_are_filename_safe(name in ".{0,24}") {
        let safe = valid_name(&name);

        prop_assert!(safe
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        prop_assert!(safe.chars().any(|c| c.is_ascii_alphabetic()));
    }
}
