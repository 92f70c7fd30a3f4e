//! Path search over the shop graph: depth-first, breadth-first, and a
//! comparison of the two.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{Error, Result};
use crate::graph::ShopGraph;
use crate::shop::ShopId;

/// Number of edges on a path. A one-node path has length 0.
pub fn path_len(path: &[ShopId]) -> usize {
    path.len().saturating_sub(1)
}

/// Which search produced the shorter path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathWinner {
    Dfs,
    Bfs,
    Tie,
}

/// Paths found by DFS and BFS between the same endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathComparison {
    pub dfs: Option<Vec<ShopId>>,
    pub bfs: Option<Vec<ShopId>>,
}

impl PathComparison {
    /// Compare lengths. `None` unless both searches found a path.
    pub fn winner(&self) -> Option<PathWinner> {
        let (dfs, bfs) = (self.dfs.as_deref()?, self.bfs.as_deref()?);
        Some(match dfs.len().cmp(&bfs.len()) {
            std::cmp::Ordering::Less => PathWinner::Dfs,
            std::cmp::Ordering::Greater => PathWinner::Bfs,
            std::cmp::Ordering::Equal => PathWinner::Tie,
        })
    }

    /// The shorter of the two candidates. The DFS path wins ties.
    ///
    /// This only picks between the two paths found; BFS alone carries the
    /// minimum-edge guarantee.
    pub fn shortest(&self) -> Option<&[ShopId]> {
        match (self.dfs.as_deref(), self.bfs.as_deref()) {
            (Some(dfs), Some(bfs)) if bfs.len() < dfs.len() => Some(bfs),
            (Some(dfs), _) => Some(dfs),
            (None, bfs) => bfs,
        }
    }

    pub fn into_shortest(self) -> Option<Vec<ShopId>> {
        match (self.dfs, self.bfs) {
            (Some(dfs), Some(bfs)) if bfs.len() < dfs.len() => Some(bfs),
            (Some(dfs), _) => Some(dfs),
            (None, bfs) => bfs,
        }
    }
}

/// Resolve both endpoints to the graph's own keys.
fn endpoints<'g>(graph: &'g ShopGraph, start: &str, end: &str) -> Result<(&'g str, &'g str)> {
    let s = graph
        .node_key(start)
        .ok_or_else(|| Error::MissingNode(start.to_string()))?;
    let e = graph
        .node_key(end)
        .ok_or_else(|| Error::MissingNode(end.to_string()))?;
    Ok((s, e))
}

/// Depth-first path from `start` to `end`.
///
/// Visits each node at most once and explores neighbors in stored order,
/// returning the first path discovered. Not necessarily the shortest.
/// Uses an explicit stack of `(node, next neighbor index)` frames, so deep
/// graphs do not grow the call stack; the frames on the stack are the path.
pub fn dfs_path(graph: &ShopGraph, start: &str, end: &str) -> Result<Option<Vec<ShopId>>> {
    let (start, end) = endpoints(graph, start, end)?;
    if start == end {
        return Ok(Some(vec![start.to_string()]));
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<(&str, usize)> = vec![(start, 0)];
    visited.insert(start);

    while let Some(frame) = stack.last_mut() {
        let node = frame.0;
        let Some(next) = graph.neighbors(node).get(frame.1) else {
            stack.pop();
            continue;
        };
        frame.1 += 1;

        let next = next.as_str();
        if !visited.insert(next) {
            continue;
        }
        if next == end {
            let mut path: Vec<ShopId> = stack.iter().map(|(n, _)| n.to_string()).collect();
            path.push(next.to_string());
            return Ok(Some(path));
        }
        stack.push((next, 0));
    }

    Ok(None)
}

/// Breadth-first path from `start` to `end`: the minimum-edge path.
///
/// Nodes are marked visited when enqueued. Stores parent pointers instead of
/// cloning partial paths; the path is rebuilt once `end` is discovered.
pub fn bfs_path(graph: &ShopGraph, start: &str, end: &str) -> Result<Option<Vec<ShopId>>> {
    let (start, end) = endpoints(graph, start, end)?;
    if start == end {
        return Ok(Some(vec![start.to_string()]));
    }

    // node → parent. Sentinel: start is its own parent.
    let mut parents: HashMap<&str, &str> = HashMap::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    parents.insert(start, start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for next in graph.neighbors(current) {
            let next = next.as_str();
            if parents.contains_key(next) {
                continue;
            }
            parents.insert(next, current);
            if next == end {
                return Ok(Some(reconstruct_path(&parents, start, end)));
            }
            queue.push_back(next);
        }
    }

    Ok(None)
}

fn reconstruct_path(parents: &HashMap<&str, &str>, start: &str, end: &str) -> Vec<ShopId> {
    let mut path = vec![end.to_string()];
    let mut current = end;
    while current != start {
        current = parents[current];
        path.push(current.to_string());
    }
    path.reverse();
    path
}

/// Run both searches between the same endpoints.
pub fn compare_paths(graph: &ShopGraph, start: &str, end: &str) -> Result<PathComparison> {
    Ok(PathComparison {
        dfs: dfs_path(graph, start, end)?,
        bfs: bfs_path(graph, start, end)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> String {
        n.to_string()
    }

    fn make_graph(n: u64, edges: &[(u64, u64)]) -> ShopGraph {
        let mut g = ShopGraph::with_capacity(n as usize);
        for i in 0..n {
            g.add_node(&id(i)).unwrap();
        }
        for (a, b) in edges {
            g.add_edge(&id(*a), &id(*b)).unwrap();
        }
        g
    }

    fn make_chain(n: u64) -> ShopGraph {
        let edges: Vec<(u64, u64)> = (0..n - 1).map(|i| (i, i + 1)).collect();
        make_graph(n, &edges)
    }

    fn make_cycle(n: u64) -> ShopGraph {
        let edges: Vec<(u64, u64)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        make_graph(n, &edges)
    }

    fn make_star(leaves: u64) -> ShopGraph {
        let edges: Vec<(u64, u64)> = (1..=leaves).map(|i| (0, i)).collect();
        make_graph(leaves + 1, &edges)
    }

    fn ids(path: &[u64]) -> Vec<ShopId> {
        path.iter().map(|n| id(*n)).collect()
    }

    // --- DFS tests ---

    #[test]
    fn test_dfs_chain() {
        let g = make_chain(5);
        let path = dfs_path(&g, "0", "4").unwrap().unwrap();
        assert_eq!(path, ids(&[0, 1, 2, 3, 4]));
        assert_eq!(path_len(&path), 4);
    }

    #[test]
    fn test_dfs_follows_stored_order() {
        // 0-1, 0-2, 1-3, 2-3: DFS takes 0's first neighbor first
        let g = make_graph(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        assert_eq!(dfs_path(&g, "0", "3").unwrap(), Some(ids(&[0, 1, 3])));
    }

    #[test]
    fn test_dfs_not_shortest_on_cycle() {
        // Cycle 0..6: 0's first neighbor is 1, so DFS walks the long way to 5
        let g = make_cycle(6);
        let path = dfs_path(&g, "0", "5").unwrap().unwrap();
        assert_eq!(path, ids(&[0, 1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_dfs_backtracks() {
        // Dead-end branch 0-1-2 explored before 0-3-4
        let g = make_graph(5, &[(0, 1), (1, 2), (0, 3), (3, 4)]);
        assert_eq!(dfs_path(&g, "0", "4").unwrap(), Some(ids(&[0, 3, 4])));
    }

    #[test]
    fn test_dfs_deep_chain_no_stack_overflow() {
        let g = make_chain(100_000);
        let path = dfs_path(&g, "0", "99999").unwrap().unwrap();
        assert_eq!(path.len(), 100_000);
    }

    #[test]
    fn test_dfs_no_path() {
        let g = make_graph(4, &[(0, 1), (2, 3)]);
        assert_eq!(dfs_path(&g, "0", "3").unwrap(), None);
    }

    #[test]
    fn test_dfs_self() {
        let g = make_chain(3);
        assert_eq!(dfs_path(&g, "1", "1").unwrap(), Some(ids(&[1])));
    }

    // --- BFS tests ---

    #[test]
    fn test_bfs_chain() {
        let g = make_chain(6);
        assert_eq!(bfs_path(&g, "0", "5").unwrap(), Some(ids(&[0, 1, 2, 3, 4, 5])));
    }

    #[test]
    fn test_bfs_shortest_on_cycle() {
        let g = make_cycle(6);
        assert_eq!(bfs_path(&g, "0", "5").unwrap(), Some(ids(&[0, 5])));
        let path = bfs_path(&g, "0", "3").unwrap().unwrap();
        assert_eq!(path_len(&path), 3);
    }

    #[test]
    fn test_bfs_star() {
        let g = make_star(50);
        let path = bfs_path(&g, "17", "42").unwrap().unwrap();
        assert_eq!(path, ids(&[17, 0, 42]));
    }

    #[test]
    fn test_bfs_no_path() {
        let g = make_graph(4, &[(0, 1), (2, 3)]);
        assert_eq!(bfs_path(&g, "1", "2").unwrap(), None);
    }

    #[test]
    fn test_bfs_self() {
        let g = make_chain(3);
        assert_eq!(bfs_path(&g, "2", "2").unwrap(), Some(ids(&[2])));
    }

    #[test]
    fn test_missing_endpoints() {
        let g = make_chain(3);
        assert_eq!(bfs_path(&g, "9", "0"), Err(Error::MissingNode("9".into())));
        assert_eq!(dfs_path(&g, "0", "9"), Err(Error::MissingNode("9".into())));
        assert_eq!(compare_paths(&g, "9", "0"), Err(Error::MissingNode("9".into())));
    }

    // --- Comparison tests ---

    #[test]
    fn test_compare_bfs_wins_on_cycle() {
        let g = make_cycle(6);
        let cmp = compare_paths(&g, "0", "5").unwrap();
        assert_eq!(cmp.winner(), Some(PathWinner::Bfs));
        assert_eq!(cmp.shortest(), Some(ids(&[0, 5]).as_slice()));
    }

    #[test]
    fn test_compare_tie_prefers_dfs() {
        // 0-1-3 and 0-2-3: same length, DFS path returned
        let g = make_graph(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        let cmp = compare_paths(&g, "0", "3").unwrap();
        assert_eq!(cmp.winner(), Some(PathWinner::Tie));
        assert_eq!(cmp.clone().into_shortest(), cmp.dfs);
    }

    #[test]
    fn test_compare_no_path() {
        let g = make_graph(3, &[(0, 1)]);
        let cmp = compare_paths(&g, "0", "2").unwrap();
        assert_eq!(cmp.winner(), None);
        assert_eq!(cmp.shortest(), None);
        assert_eq!(cmp.into_shortest(), None);
    }

    #[test]
    fn test_path_len_empty() {
        assert_eq!(path_len(&[]), 0);
    }
}
