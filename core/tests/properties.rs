use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use shopnav_core::{
    bfs_path, dfs_path, path_len, Directory, Error, MaxHeap, ProbeTable, Shop, ShopGraph,
};

fn make_graph(n: u8, edges: &[(u8, u8)]) -> ShopGraph {
    let mut g = ShopGraph::new();
    for i in 0..n {
        g.add_node(&i.to_string()).unwrap();
    }
    for (a, b) in edges {
        // Repeats and self-loops are expected from the generator.
        let _ = g.add_edge(&a.to_string(), &b.to_string());
    }
    g
}

fn check_symmetric(g: &ShopGraph) -> Result<(), TestCaseError> {
    for (id, neighbors) in g.iter() {
        let unique: HashSet<&String> = neighbors.iter().collect();
        prop_assert_eq!(unique.len(), neighbors.len(), "duplicate neighbor of {}", id);
        for n in neighbors {
            prop_assert!(g.has_edge(n, id), "{} -> {} not mirrored", id, n);
        }
    }
    Ok(())
}

fn check_valid_path(g: &ShopGraph, path: &[String], start: &str, end: &str) -> Result<(), TestCaseError> {
    prop_assert_eq!(path.first().map(String::as_str), Some(start));
    prop_assert_eq!(path.last().map(String::as_str), Some(end));
    let unique: HashSet<&String> = path.iter().collect();
    prop_assert_eq!(unique.len(), path.len(), "path repeats a node: {:?}", path);
    for pair in path.windows(2) {
        prop_assert!(g.has_edge(&pair[0], &pair[1]), "{:?} uses a missing edge", path);
    }
    Ok(())
}

/// Lengths of every simple path from `node` to `end`, by exhaustive search.
fn simple_path_lengths(g: &ShopGraph, node: &str, end: &str, seen: &mut Vec<String>, out: &mut Vec<usize>) {
    if node == end {
        out.push(seen.len());
        return;
    }
    seen.push(node.to_string());
    for next in g.neighbors(node) {
        if !seen.contains(next) {
            simple_path_lengths(g, next, end, seen, out);
        }
    }
    seen.pop();
}

#[derive(Debug, Clone)]
enum HeapOp {
    Push(i32),
    Pop,
}

fn heap_op() -> impl Strategy<Value = HeapOp> {
    prop_oneof![
        3 => any::<i32>().prop_map(HeapOp::Push),
        1 => Just(HeapOp::Pop),
    ]
}

#[derive(Debug, Clone)]
enum TableOp {
    Insert(u8, u32),
    Remove(u8),
}

fn table_op() -> impl Strategy<Value = TableOp> {
    prop_oneof![
        3 => (0u8..12, any::<u32>()).prop_map(|(k, v)| TableOp::Insert(k, v)),
        1 => (0u8..12).prop_map(TableOp::Remove),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn identities_stay_unique(raw in prop::collection::vec(0u8..10, 0..30)) {
        let mut d = Directory::new();
        let mut distinct = HashSet::new();
        for id in &raw {
            let id = id.to_string();
            let result = d.add_shop(Shop::new(&id, "S", "Bakery", "L", 3.0).unwrap());
            if distinct.insert(id.clone()) {
                prop_assert_eq!(result, Ok(()));
            } else {
                prop_assert_eq!(result, Err(Error::DuplicateId(id)));
            }
        }
        prop_assert_eq!(d.len(), distinct.len());
        prop_assert_eq!(d.category_members("Bakery").len(), distinct.len());
    }

    #[test]
    fn edges_stay_symmetric(
        edges in prop::collection::vec((0u8..8, 0u8..8), 0..30),
        removals in prop::collection::vec((0u8..8, 0u8..8), 0..10),
        dropped in prop::option::of(0u8..8),
    ) {
        let mut g = make_graph(8, &edges);
        check_symmetric(&g)?;
        for (a, b) in &removals {
            let _ = g.remove_edge(&a.to_string(), &b.to_string());
            check_symmetric(&g)?;
        }
        if let Some(n) = dropped {
            g.remove_node(&n.to_string()).unwrap();
            check_symmetric(&g)?;
            prop_assert!(g.iter().all(|(_, ns)| !ns.contains(&n.to_string())));
        }
    }

    #[test]
    fn heap_root_is_max(ops in prop::collection::vec(heap_op(), 0..60)) {
        let mut heap = MaxHeap::new();
        let mut model: Vec<i32> = Vec::new();
        for op in ops {
            match op {
                HeapOp::Push(p) => {
                    heap.push(p, ());
                    model.push(p);
                }
                HeapOp::Pop => {
                    let expected = model.iter().copied().max();
                    match expected {
                        Some(max) => {
                            prop_assert_eq!(heap.pop().map(|(p, _)| p), Ok(max));
                            let pos = model.iter().position(|&p| p == max).unwrap();
                            model.swap_remove(pos);
                        }
                        None => prop_assert_eq!(heap.pop(), Err(Error::EmptyHeap)),
                    }
                }
            }
            prop_assert_eq!(heap.peek().map(|(p, _)| *p), model.iter().copied().max());
            prop_assert_eq!(heap.len(), model.len());
        }
    }

    #[test]
    fn bfs_is_minimal(edges in prop::collection::vec((0u8..7, 0u8..7), 0..14)) {
        let g = make_graph(7, &edges);
        for a in 0..7u8 {
            for b in 0..7u8 {
                let (start, end) = (a.to_string(), b.to_string());
                let mut lengths = Vec::new();
                simple_path_lengths(&g, &start, &end, &mut Vec::new(), &mut lengths);

                let bfs = bfs_path(&g, &start, &end).unwrap();
                let dfs = dfs_path(&g, &start, &end).unwrap();
                match lengths.iter().min() {
                    None => {
                        prop_assert_eq!(bfs, None);
                        prop_assert_eq!(dfs, None);
                    }
                    Some(&min) => {
                        let bfs = bfs.unwrap();
                        let dfs = dfs.unwrap();
                        check_valid_path(&g, &bfs, &start, &end)?;
                        check_valid_path(&g, &dfs, &start, &end)?;
                        prop_assert_eq!(path_len(&bfs), min);
                        prop_assert!(path_len(&dfs) >= min);
                    }
                }
            }
        }
    }

    #[test]
    fn table_matches_last_write(ops in prop::collection::vec(table_op(), 0..80)) {
        // 13 slots, 12 keys: never full, and probe chains overlap heavily.
        let mut table = ProbeTable::new(13, 5).unwrap();
        let mut model: HashMap<String, u32> = HashMap::new();
        for op in ops {
            match op {
                TableOp::Insert(k, v) => {
                    let key = format!("Key{}", k);
                    let previous = table.insert(&key, v).unwrap();
                    prop_assert_eq!(previous, model.insert(key, v));
                }
                TableOp::Remove(k) => {
                    let key = format!("Key{}", k);
                    prop_assert_eq!(table.remove(&key), model.remove(&key));
                }
            }
            prop_assert_eq!(table.len(), model.len());
        }
        for (key, value) in &model {
            prop_assert_eq!(table.get(key), Some(value));
        }
        prop_assert_eq!(table.keys().count(), model.len());
    }
}
