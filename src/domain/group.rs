//! Task association and grouping
//!
//! Solution-cell identifiers are associated with every managed cell whose
//! identifier contains them as a substring. Association sets that share a
//! member are then merged into identifier groups with a single
//! left-to-right sweep, and each group is resolved back to the cell
//! indices it touches.

use indexmap::{IndexMap, IndexSet};

use super::cell::Cell;

/// Identifiers of all solution cells in document order
///
/// Duplicates are preserved; plain cells never appear.
pub fn solution_ids(cells: &[Cell]) -> Vec<String> {
    cells
        .iter()
        .filter(|cell| cell.is_solution())
        .filter_map(|cell| cell.grade_id())
        .map(str::to_string)
        .collect()
}

/// Resolves the associated identifiers of each identifier in `ids`
///
/// An identifier is associated with every managed cell whose own
/// identifier contains it as a substring, in document order; a cell whose
/// identifier equals it exactly is always included. The returned map is
/// keyed by first appearance in `ids`. A duplicated id revisits its slot,
/// so its association list repeats accordingly.
pub fn associate_ids(cells: &[Cell], ids: &[String]) -> IndexMap<String, Vec<String>> {
    let mut associated: IndexMap<String, Vec<String>> = IndexMap::new();
    for id in ids {
        associated.entry(id.clone()).or_default();
    }

    for id in ids {
        for cell in cells {
            let contains_id = cell
                .grade_id()
                .map(|cell_id| cell_id.contains(id.as_str()))
                .unwrap_or(false);
            if contains_id {
                if let (Some(list), Some(cell_id)) = (associated.get_mut(id), cell.grade_id()) {
                    list.push(cell_id.to_string());
                }
            }
        }
    }

    associated
}

/// Merges association sets into identifier groups
///
/// A single forward sweep over `ids`: each unvisited id seeds a group
/// with its association set, and every later unvisited id whose
/// associations share a member with the seed's ORIGINAL association list
/// is absorbed and marked visited. Absorbed members never widen the
/// intersection test, so ids that only connect through a member absorbed
/// mid-sweep stay in separate groups. Groups come out in the order their
/// seed first appears.
///
/// The visited bookkeeping is allocated inside this call; nothing is
/// shared with the caller or retained across calls.
// TODO: decide whether identifier chains that only connect through an
// absorbed member should collapse into one group (a full transitive
// closure); graders currently rely on the sweep boundaries as they are.
pub fn group_ids(
    ids: &[String],
    associated: &IndexMap<String, Vec<String>>,
) -> Vec<IndexSet<String>> {
    let mut checked: IndexMap<&str, bool> = ids.iter().map(|id| (id.as_str(), false)).collect();
    let mut groups: Vec<IndexSet<String>> = Vec::new();

    for (i, id) in ids.iter().enumerate() {
        if checked.get(id.as_str()).copied().unwrap_or(false) {
            continue;
        }
        let seed = match associated.get(id) {
            Some(seed) => seed,
            None => continue,
        };
        let mut group: IndexSet<String> = seed.iter().cloned().collect();

        for idj in &ids[i + 1..] {
            if checked.get(idj.as_str()).copied().unwrap_or(false) {
                continue;
            }
            let assoc_j = match associated.get(idj) {
                Some(assoc_j) => assoc_j,
                None => continue,
            };
            // Intersection against the seed's original association list,
            // not the growing group.
            if assoc_j.iter().any(|t| seed.contains(t)) {
                group.extend(assoc_j.iter().cloned());
                if let Some(flag) = checked.get_mut(idj.as_str()) {
                    *flag = true;
                }
            }
        }

        groups.push(group);
    }

    groups
}

/// Maps identifier groups to document-ordered cell-index groups
///
/// Group order is preserved; within a group, indices follow document
/// order.
pub fn map_groups_to_cells(cells: &[Cell], groups: &[IndexSet<String>]) -> Vec<Vec<usize>> {
    groups
        .iter()
        .map(|group| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, cell)| {
                    cell.grade_id()
                        .map(|id| group.contains(id))
                        .unwrap_or(false)
                })
                .map(|(idx, _)| idx)
                .collect()
        })
        .collect()
}

/// Computes the cell-index groups of a document
///
/// Collects solution identifiers in document order, resolves their
/// associations, merges them into identifier groups and maps each group
/// back to cell indices. Every call allocates fresh working state, so
/// concurrent calls on different documents are safe.
pub fn task_groups(cells: &[Cell]) -> Vec<Vec<usize>> {
    let ids = solution_ids(cells);
    let associated = associate_ids(cells, &ids);
    let groups = group_ids(&ids, &associated);
    map_groups_to_cells(cells, &groups)
}
