//! shopnav-core: shop directory and navigation engine.
//!
//! Indexes shops by identity, by category, and by connectivity. Category
//! membership lives in a fixed-capacity double-hashed table, ratings can be
//! ranked with a binary max-heap, and shop-to-shop connections form an
//! undirected graph with depth-first and breadth-first path search.
//!
//! Single-threaded: wrap a [`Directory`] in a mutex to share it.

mod config;
mod directory;
mod error;
mod graph;
mod heap;
mod ingest;
mod shop;
mod table;
mod traversal;

pub use config::{DirectoryConfig, DEFAULT_PROBE_STEP, DEFAULT_TABLE_CAPACITY, MAX_TABLE_CAPACITY};
pub use directory::{Directory, SortOrder};
pub use error::{ConfigError, Error, IngestError, Result};
pub use graph::ShopGraph;
pub use heap::MaxHeap;
pub use ingest::{Dataset, EdgeRecord, LoadReport, Rejected, ShopRecord};
pub use shop::{canonical_category, parse_categories, Rating, Shop, ShopId, ShopUpdate};
pub use table::ProbeTable;
pub use traversal::{bfs_path, compare_paths, dfs_path, path_len, PathComparison, PathWinner};
