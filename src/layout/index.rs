//! Phase 1: head detection and layout-index assignment (spec §4.1).

/// Assign a layout index to every row.
///
/// `parent_rows[row]` holds the row's parent rows, in declared order, with
/// duplicates collapsed and dangling parents already dropped (anything not
/// present in the input never reaches this function — see
/// `layout::edges::resolve_parent_rows`).
///
/// Heads (rows nobody names as a parent) seed a DFS in ascending row order;
/// any row left unvisited afterwards (a disconnected component with no head
/// of its own, e.g. a cycle) seeds one more DFS pass in row order. Both
/// passes share the same explicit-stack walk and the same `next_li` counter,
/// so the only free choice is *which* row starts a new chain — fixing that
/// to row order is what makes the assignment deterministic.
pub fn assign(row_count: usize, parent_rows: &[Vec<usize>]) -> Vec<u32> {
    let mut layout_index = vec![0u32; row_count];
    let mut visited = vec![false; row_count];
    let mut next_li: u32 = 1;

    let mut is_parent = vec![false; row_count];
    for parents in parent_rows {
        for &p in parents {
            is_parent[p] = true;
        }
    }

    // Explicit stack of (row, next parent slot to scan). Recursion is
    // avoided deliberately: real histories routinely exceed default stack
    // depth (DESIGN NOTES §9).
    let mut stack: Vec<(usize, usize)> = Vec::new();

    let walk_from = |start: usize,
                         visited: &mut Vec<bool>,
                         layout_index: &mut Vec<u32>,
                         next_li: &mut u32,
                         stack: &mut Vec<(usize, usize)>| {
        if visited[start] {
            return;
        }
        stack.push((start, 0));
        while let Some(&mut (cur, ref mut parent_slot)) = stack.last_mut() {
            // `first_visit` is true only on the turn that stamps `cur`; a
            // node can be the top of the stack again later (once a pushed
            // parent's subtree has fully resolved) to resume scanning its
            // remaining parents, and that resumed turn must not re-trigger
            // the "chain terminates" increment below.
            let first_visit = !visited[cur];
            if first_visit {
                layout_index[cur] = *next_li;
                visited[cur] = true;
            }

            let parents = &parent_rows[cur];
            let mut found_down = None;
            while *parent_slot < parents.len() {
                let candidate = parents[*parent_slot];
                *parent_slot += 1;
                if !visited[candidate] {
                    found_down = Some(candidate);
                    break;
                }
            }

            match found_down {
                Some(down) => stack.push((down, 0)),
                None => {
                    stack.pop();
                    if first_visit {
                        *next_li += 1;
                    }
                }
            }
        }
    };

    for row in 0..row_count {
        if !is_parent[row] && !visited[row] {
            walk_from(row, &mut visited, &mut layout_index, &mut next_li, &mut stack);
        }
    }
    for row in 0..row_count {
        if !visited[row] {
            walk_from(row, &mut visited, &mut layout_index, &mut next_li, &mut stack);
        }
    }

    layout_index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert!(assign(0, &[]).is_empty());
    }

    #[test]
    fn linear_chain_shares_one_layout_index() {
        // A -> B -> C, rows 0,1,2
        let parent_rows = vec![vec![1], vec![2], vec![]];
        let li = assign(3, &parent_rows);
        assert_eq!(li[0], li[1]);
        assert_eq!(li[1], li[2]);
    }

    #[test]
    fn side_branch_gets_distinct_layout_index() {
        // A(0) -> [B(2), S(1)], S(1) -> B(2), B(2) -> C(3)
        let parent_rows = vec![vec![2, 1], vec![2], vec![3], vec![]];
        let li = assign(4, &parent_rows);
        assert_eq!(li[0], li[2]); // A and B share the main chain's LI
        assert_eq!(li[2], li[3]);
        assert_ne!(li[1], li[0]); // S is a distinct chain
    }

    #[test]
    fn disconnected_component_gets_its_own_layout_index() {
        let parent_rows = vec![vec![], vec![]];
        let li = assign(2, &parent_rows);
        assert_ne!(li[0], li[1]);
    }

    #[test]
    fn deep_side_branch_sorts_left_of_shallow_one() {
        // Main: 0 -> 1 -> 2 -> 3 (parents [1],[2],[3],[]).
        // A deep side branch spawned at row 2 (parent 4), and a shallow one
        // spawned at row 0 via an extra parent (parent 5). DFS visits the
        // deep branch (from row 2) before finishing back up to row 0's
        // second parent, so the deep branch must get the lower LI.
        let parent_rows = vec![
            vec![1, 5], // row 0: main parent 1, shallow branch head 5
            vec![2],
            vec![3, 4], // row 2: main parent 3, deep branch head 4
            vec![],
            vec![],
            vec![],
        ];
        let li = assign(6, &parent_rows);
        assert!(li[4] < li[5], "deep branch (li={}) should precede shallow branch (li={})", li[4], li[5]);
    }
}
