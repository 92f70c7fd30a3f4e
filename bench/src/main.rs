use shopnav_core::{path_len, Directory, DirectoryConfig, Error, Shop, ShopId, SortOrder};
use std::collections::VecDeque;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let shop_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: shopnav-bench [mode] [shop_count] [config.toml]");
        println!();
        println!("Modes:");
        println!("  all         Run all layouts and benchmark each (default)");
        println!("  corridor    One long corridor of shops (deep paths)");
        println!("  scalefree   Preferential attachment (hub shops)");
        println!("  smallworld  Ring of neighbors + shortcuts");
        println!("  random      Uniform random connections");
        println!("  barbell     Two dense wings joined by a thin walkway");
        println!();
        println!("Default shop_count: 200000");
        return;
    }

    let config = match args.get(3) {
        Some(path) => match std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|s| DirectoryConfig::from_toml_str(&s).map_err(|e| e.to_string()))
        {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Invalid config {}: {}", path, e);
                return;
            }
        },
        None => DirectoryConfig::default(),
    };

    println!("shopnav-bench");
    println!("=============");
    println!(
        "category table: {} slots, probe step {}",
        config.table_capacity, config.probe_step
    );
    println!();

    let layouts: Vec<(&str, Layout)> = match mode {
        "corridor" => vec![("Corridor", gen_corridor)],
        "scalefree" => vec![("Scale-free", gen_scale_free)],
        "smallworld" => vec![("Small-world", gen_small_world)],
        "random" => vec![("Random", gen_random)],
        "barbell" => vec![("Barbell (wing-walkway-wing)", gen_barbell)],
        "all" => vec![
            ("Corridor", gen_corridor as Layout),
            ("Scale-free", gen_scale_free),
            ("Small-world", gen_small_world),
            ("Random", gen_random),
            ("Barbell (wing-walkway-wing)", gen_barbell),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, layout) in layouts {
        run_benchmark(name, layout, shop_count, config);
    }
}

type Layout = fn(&mut Directory, &mut FastRng, u64);

type PathSearch = fn(&Directory, &str, &str) -> shopnav_core::Result<Option<Vec<ShopId>>>;

fn ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn run_benchmark(name: &str, layout: Layout, shop_count: u64, config: DirectoryConfig) {
    println!("--- {} ---", name);
    println!("Target: {} shops", shop_count);

    let mut directory = match Directory::with_config(config) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Invalid config: {}", e);
            return;
        }
    };
    let mut rng = FastRng::new(42);

    let t = Instant::now();
    let added = populate(&mut directory, &mut rng, shop_count);
    let shop_time = ms(t);

    let t = Instant::now();
    layout(&mut directory, &mut rng, added);
    let edge_time = ms(t);

    println!(
        "Built in {:.1}ms (shops) + {:.1}ms (connections): {} shops, {} connections, {} categories",
        shop_time,
        edge_time,
        directory.len(),
        directory.edge_count(),
        directory.list_categories().len()
    );
    if added == 0 {
        println!();
        return;
    }

    // Paths: first shop to last shop
    let from = "0".to_string();
    let to = (added - 1).to_string();
    println!();
    println!("{:>8} {:>10} {:>10}", "search", "hops", "time");
    println!("{:->8} {:->10} {:->10}", "", "", "");
    for (label, search) in [
        ("dfs", Directory::dfs_path as PathSearch),
        ("bfs", Directory::bfs_path),
        ("shortest", Directory::shortest_path),
    ] {
        let t = Instant::now();
        let result = search(&directory, &from, &to);
        let elapsed = ms(t);
        match result {
            Ok(Some(path)) => println!("{:>8} {:>10} {:>8.1}ms", label, path_len(&path), elapsed),
            Ok(None) => println!("{:>8} {:>10} {:>8.1}ms", label, "none", elapsed),
            Err(e) => println!("{:>8} error: {}", label, e),
        }
    }

    // Category queries
    println!();
    println!("{:>12} {:>8} {:>10} {:>10}", "category", "shops", "sorted", "top 10");
    println!("{:->12} {:->8} {:->10} {:->10}", "", "", "", "");
    for category in CATEGORIES {
        let t = Instant::now();
        let members = directory
            .find_by_category_sorted(category, SortOrder::Descending)
            .len();
        let sort_time = ms(t);

        let t = Instant::now();
        let top = directory.top_rated(category, 10);
        let top_time = ms(t);
        debug_assert!(top.len() <= 10);

        println!(
            "{:>12} {:>8} {:>8.2}ms {:>8.2}ms",
            category, members, sort_time, top_time
        );
    }

    // Removal cascades through edges and categories
    let removals = (added / 100).max(1);
    let t = Instant::now();
    let mut removed = 0u64;
    for i in 0..removals {
        let id = rng.next(added).to_string();
        if directory.remove_shop(&id).is_ok() {
            removed += 1;
        }
        if i % 1000 == 0 {
            tracing::debug!(removed, "removal progress");
        }
    }
    println!();
    println!(
        "Removed {} shops in {:.1}ms; {} shops and {} connections remain",
        removed,
        ms(t),
        directory.len(),
        directory.edge_count()
    );
    println!();
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

const CATEGORIES: [&str; 12] = [
    "Bakery", "Cafe", "Books", "Shoes", "Toys", "Grocery", "Pharmacy", "Florist", "Tailor",
    "Jeweller", "Optician", "Electronics",
];

/// Add shops "0".."n-1", each in one to three random categories with a
/// rating in [1, 5]. Returns the number added.
fn populate(directory: &mut Directory, rng: &mut FastRng, n: u64) -> u64 {
    let mut added = 0;
    for i in 0..n {
        let picks = 1 + rng.next(3);
        let categories: Vec<&str> = (0..picks)
            .map(|_| CATEGORIES[rng.next(CATEGORIES.len() as u64) as usize])
            .collect();
        let rating = 1.0 + 4.0 * rng.next_f64();
        let floor = 1 + rng.next(4);
        let shop = Shop::new(
            &i.to_string(),
            format!("Shop {}", i),
            &categories.join(","),
            format!("Floor {}", floor),
            (rating * 10.0).round() / 10.0,
        );
        match shop.and_then(|s| directory.add_shop(s)) {
            Ok(()) => added += 1,
            Err(e) => {
                tracing::warn!(shop = i, error = %e, "shop not added");
                break;
            }
        }
    }
    added
}

/// Connect two shops, ignoring repeats and self-connections from the generators.
fn connect(directory: &mut Directory, a: u64, b: u64) {
    match directory.add_edge(&a.to_string(), &b.to_string()) {
        Ok(()) | Err(Error::DuplicateEdge(..)) | Err(Error::SelfLoop(_)) => {}
        Err(e) => tracing::warn!(a, b, error = %e, "connection not added"),
    }
}

/// A single corridor: every shop next to the one before it.
///
/// Longest possible paths. Exercises the explicit DFS stack.
fn gen_corridor(directory: &mut Directory, _rng: &mut FastRng, n: u64) {
    for i in 1..n {
        connect(directory, i - 1, i);
    }
}

/// Preferential attachment via endpoint sampling: new shops link to shops
/// that already have many connections.
fn gen_scale_free(directory: &mut Directory, rng: &mut FastRng, n: u64) {
    let links_per_shop = 4u64;
    let seed = 5u64.min(n);
    let mut endpoints: Vec<u64> = Vec::with_capacity((n * links_per_shop * 2) as usize);

    for i in 0..seed {
        for j in (i + 1)..seed {
            connect(directory, i, j);
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_shop in seed..n {
        for _ in 0..links_per_shop.min(new_shop) {
            let target = if endpoints.is_empty() {
                rng.next(new_shop)
            } else {
                endpoints[rng.next(endpoints.len() as u64) as usize]
            };
            connect(directory, new_shop, target);
            endpoints.push(new_shop);
            endpoints.push(target);
        }
    }
}

/// Ring lattice (each shop linked to its K nearest on each side) with a
/// small chance of rewiring each link to a random shop.
fn gen_small_world(directory: &mut Directory, rng: &mut FastRng, n: u64) {
    let k = 3u64;
    let p = 0.05f64;
    for i in 0..n {
        for j in 1..=k {
            let neighbor = if rng.next_f64() < p {
                rng.next(n)
            } else {
                (i + j) % n
            };
            connect(directory, i, neighbor);
        }
    }
}

/// Uniform random connections, about four per shop.
fn gen_random(directory: &mut Directory, rng: &mut FastRng, n: u64) {
    for _ in 0..n * 2 {
        let a = rng.next(n);
        let b = rng.next(n);
        connect(directory, a, b);
    }
}

/// Two densely connected wings joined by a walkway of ten shops.
///
/// The first and last shops sit at opposite ends, so every path crosses
/// the walkway.
fn gen_barbell(directory: &mut Directory, rng: &mut FastRng, n: u64) {
    let walkway = 10u64.min(n);
    let wing = (n - walkway) / 2;

    let mut dense = |directory: &mut Directory, start: u64, size: u64| {
        for i in 0..size {
            for _ in 0..8u64.min(size.saturating_sub(1)) {
                connect(directory, start + i, start + rng.next(size));
            }
        }
    };
    dense(directory, 0, wing);
    dense(directory, wing + walkway, n - wing - walkway);

    // Walkway chain from the last shop of wing A to the first of wing B
    let mut chain: VecDeque<u64> = (wing..wing + walkway).collect();
    if wing > 0 {
        chain.push_front(wing - 1);
    }
    if wing + walkway < n {
        chain.push_back(wing + walkway);
    }
    for pair in chain.make_contiguous().windows(2) {
        connect(directory, pair[0], pair[1]);
    }
}
