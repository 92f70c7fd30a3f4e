use shopnav_core::{path_len, Directory, Error, Shop};

fn ids(shops: &[&Shop]) -> Vec<String> {
    shops.iter().map(|s| s.id().to_string()).collect()
}

fn mall() -> Directory {
    let mut d = Directory::new();
    d.add_shop(Shop::new("1", "Crumbs", "Bakery", "Level 1", 4.2).unwrap())
        .unwrap();
    d.add_shop(Shop::new("2", "Beans & Buns", "Bakery,Cafe", "Level 1", 3.9).unwrap())
        .unwrap();
    d.add_shop(Shop::new("3", "Leaf", "Cafe", "Level 2", 4.7).unwrap())
        .unwrap();
    d.add_edge("1", "2").unwrap();
    d.add_edge("2", "3").unwrap();
    d
}

#[test]
fn test_scenario_before_removal() {
    let d = mall();

    let path = d.bfs_path("1", "3").unwrap().unwrap();
    assert_eq!(path, vec!["1", "2", "3"]);
    assert_eq!(path_len(&path), 2);

    assert_eq!(ids(&d.find_by_category("Bakery")), vec!["1", "2"]);
    assert_eq!(ids(&d.find_by_category("Cafe")), vec!["2", "3"]);
}

#[test]
fn test_scenario_after_removal() {
    let mut d = mall();
    d.remove_shop("2").unwrap();

    assert_eq!(ids(&d.find_by_category("Bakery")), vec!["1"]);
    assert_eq!(ids(&d.find_by_category("Cafe")), vec!["3"]);
    assert!(!d.graph().has_edge("1", "2"));
    assert!(!d.graph().has_edge("2", "3"));
    assert_eq!(d.edge_count(), 0);
    assert_eq!(d.bfs_path("1", "3").unwrap(), None);
    assert_eq!(d.dfs_path("1", "3").unwrap(), None);
    assert_eq!(d.shortest_path("1", "3").unwrap(), None);
    assert_eq!(d.bfs_path("1", "2"), Err(Error::MissingNode("2".into())));
}

#[test]
fn test_membership_round_trip() {
    let mut d = Directory::new();
    d.add_shop(Shop::new("x", "X", "Bakery, Cafe", "L", 3.0).unwrap())
        .unwrap();
    assert_eq!(d.category_members("Bakery"), ["x"]);
    assert_eq!(d.category_members("Cafe"), ["x"]);

    d.remove_shop("x").unwrap();
    assert!(d.find_by_category("Bakery").is_empty());
    assert!(d.find_by_category("Cafe").is_empty());
    assert!(d.list_categories().is_empty());
}

#[test]
fn test_compare_and_shortest() {
    let mut d = mall();
    d.add_shop(Shop::new("4", "Tome", "Books", "Level 2", 4.0).unwrap())
        .unwrap();
    // 1-2-3 plus a detour 1-4, 4-3 and a direct 1-3 added last
    d.add_edge("1", "4").unwrap();
    d.add_edge("4", "3").unwrap();
    d.add_edge("1", "3").unwrap();

    let cmp = d.compare_paths("1", "3").unwrap();
    assert_eq!(cmp.dfs, Some(vec!["1".into(), "2".into(), "3".into()]));
    assert_eq!(cmp.bfs, Some(vec!["1".into(), "3".into()]));
    assert_eq!(d.shortest_path("1", "3").unwrap(), cmp.bfs);
}
