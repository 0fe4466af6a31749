use crate::frontier::FifoFrontier;
use crate::node::Node;
use crate::search::Search;
use crate::traits::Strategy;

/// Breadth-first exploration: nodes are expanded in discovery order.
///
/// Edge costs are never consulted, so the returned path has the minimum
/// number of edges, not necessarily the minimum total cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreadthFirst;

impl Strategy for BreadthFirst {
    type Frontier = FifoFrontier;

    fn name(&self) -> &'static str {
        "BFS"
    }

    #[inline]
    fn priority(&self, _candidate: &Node, _goal: &Node) -> f32 {
        0.0
    }
}

/// Breadth-first search pathfinder.
pub type Bfs = Search<BreadthFirst>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::StepStatus;
    use crate::square::SquareGrid;
    use crate::traits::{Grid, Pathfinder};
    use gridpath_core::Rect;

    fn grid(columns: usize, rows: usize) -> SquareGrid {
        SquareGrid::with_tiles(
            Rect::from_size(columns as f32 * 10.0, rows as f32 * 10.0),
            columns,
            rows,
        )
        .unwrap()
    }

    fn assert_connected(g: &SquareGrid, path: &[usize]) {
        for w in path.windows(2) {
            assert!(g.node(w[0]).unwrap().is_neighbor(w[1]), "{w:?} not linked");
        }
    }

    #[test]
    fn corner_to_corner_on_5x5() {
        let g = grid(5, 5);
        let mut bfs = Bfs::default();
        let path = bfs.find_path(&g, 0, 24).unwrap().unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(path, vec![0, 1, 2, 3, 4, 9, 14, 19, 24]);
        assert_connected(&g, &path);
    }

    #[test]
    fn path_length_is_manhattan_distance() {
        let g = grid(6, 4);
        let mut bfs = Bfs::default();
        for start in 0..g.len() {
            for goal in 0..g.len() {
                let path = bfs.find_path(&g, start, goal).unwrap().unwrap();
                let a = g.coord_of(start).unwrap();
                let b = g.coord_of(goal).unwrap();
                let manhattan = a.column.abs_diff(b.column) + a.row.abs_diff(b.row);
                assert_eq!(path.len() - 1, manhattan, "{start} -> {goal}");
                assert_eq!(path.first(), Some(&start));
                assert_eq!(path.last(), Some(&goal));
            }
        }
    }

    #[test]
    fn same_start_and_goal() {
        let g = grid(4, 4);
        let mut bfs = Bfs::default();
        for id in 0..g.len() {
            assert_eq!(bfs.find_path(&g, id, id).unwrap(), Some(vec![id]));
            assert_eq!(bfs.state().expansions(), 1);
        }
    }

    #[test]
    fn edge_costs_are_ignored() {
        // Tiles are 20 wide and 2 high.
        let g = SquareGrid::with_tiles(Rect::from_size(100.0, 10.0), 5, 5).unwrap();
        let mut bfs = Bfs::default();
        let path = bfs.find_path(&g, 0, 24).unwrap().unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(bfs.state().path_cost(&g), Some(4.0 * 20.0 + 4.0 * 2.0));
    }

    #[test]
    fn wall_makes_goal_unreachable() {
        let mut g = grid(5, 5);
        for row in 0..5 {
            let id = g.id_at(2, row).unwrap();
            g.set_blocked(id, true).unwrap();
        }
        let mut bfs = Bfs::default();
        assert_eq!(bfs.find_path(&g, 0, 4).unwrap(), None);
        assert_eq!(bfs.state().status(), Some(StepStatus::Exhausted));
        assert_eq!(bfs.state().expansions(), 10);
        assert!(bfs.state().path().is_empty());
        assert_eq!(bfs.state().path_cost(&g), None);
    }

    #[test]
    fn blocked_goal_is_unreachable() {
        let mut g = grid(3, 3);
        g.set_blocked(8, true).unwrap();
        let mut bfs = Bfs::default();
        assert_eq!(bfs.find_path(&g, 0, 8).unwrap(), None);
    }

    #[test]
    fn detours_around_obstacles() {
        // S . . . .
        // . # # # .
        // . . G . .
        let mut g = grid(5, 3);
        for id in [6, 7, 8] {
            g.set_blocked(id, true).unwrap();
        }
        let mut bfs = Bfs::default();
        let path = bfs.find_path(&g, 0, 12).unwrap().unwrap();
        assert_eq!(path, vec![0, 5, 10, 11, 12]);
        assert_connected(&g, &path);
    }

    #[test]
    fn deterministic_visitation() {
        let g = grid(7, 5);
        let mut a = Bfs::default();
        let mut b = Bfs::default();
        let pa = a.find_path(&g, 3, 31).unwrap();
        let order = a.state().visit_order().to_vec();
        let pb = b.find_path(&g, 3, 31).unwrap();
        assert_eq!(pa, pb);
        assert_eq!(order, b.state().visit_order());

        // Reusing the same instance gives the same run again.
        let again = a.find_path(&g, 3, 31).unwrap();
        assert_eq!(again, pa);
        assert_eq!(a.state().visit_order(), order.as_slice());
    }

    #[test]
    fn no_node_is_expanded_twice() {
        let g = grid(8, 8);
        let mut bfs = Bfs::default();
        bfs.find_path(&g, 0, 63).unwrap();
        let mut seen = vec![false; g.len()];
        for &id in bfs.state().visit_order() {
            assert!(!seen[id], "{id} expanded twice");
            seen[id] = true;
        }
    }

    #[test]
    fn reusable_across_grids() {
        let small = grid(2, 2);
        let large = grid(9, 9);
        let mut bfs = Bfs::default();
        assert_eq!(bfs.find_path(&large, 0, 80).unwrap().map(|p| p.len()), Some(17));
        assert_eq!(bfs.find_path(&small, 0, 3).unwrap().map(|p| p.len()), Some(3));
        assert_eq!(bfs.state().node_state(80), crate::NodeState::Unvisited);
    }
}
