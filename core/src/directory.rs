//! The shop directory: owns the shop store, the category table, and the
//! connectivity graph, and keeps them consistent.
//!
//! Invariants maintained across every public operation:
//! - a graph node exists iff the shop exists;
//! - a category key is present iff at least one shop lists it;
//! - a shop's identity appears at most once under each category.

use indexmap::IndexMap;
use tracing::debug;

use crate::config::DirectoryConfig;
use crate::error::{Error, Result};
use crate::graph::ShopGraph;
use crate::heap::MaxHeap;
use crate::shop::{canonical_category, Rating, Shop, ShopId, ShopUpdate};
use crate::table::ProbeTable;
use crate::traversal::{self, PathComparison};

/// Rating order for category listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone)]
pub struct Directory {
    config: DirectoryConfig,
    shops: IndexMap<ShopId, Shop>,
    categories: ProbeTable<Vec<ShopId>>,
    graph: ShopGraph,
}

impl Directory {
    pub fn new() -> Self {
        Self::build(DirectoryConfig::default())
    }

    pub fn with_config(config: DirectoryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: DirectoryConfig) -> Self {
        Self {
            config,
            shops: IndexMap::new(),
            categories: ProbeTable::from_shape(config.table_capacity, config.probe_step),
            graph: ShopGraph::new(),
        }
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.shops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.shops.contains_key(id)
    }

    /// Fail with `TableFull` if the labels not yet in the category table
    /// outnumber its free slots plus the `vacated` keys about to be removed.
    fn check_category_room<'a>(
        &self,
        labels: impl Iterator<Item = &'a String>,
        vacated: usize,
    ) -> Result<()> {
        let room = self.categories.free_slots() + vacated;
        let mut new_keys = 0;
        for label in labels {
            if !self.categories.contains_key(label) {
                new_keys += 1;
                if new_keys > room {
                    return Err(Error::TableFull {
                        key: label.clone(),
                        probes: self.categories.capacity(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Register a shop, add it to the graph as an isolated node, and list it
    /// under each of its categories.
    ///
    /// Nothing changes if the identity is taken or the category table has no
    /// room for the shop's new labels.
    pub fn add_shop(&mut self, shop: Shop) -> Result<()> {
        if self.shops.contains_key(shop.id()) {
            return Err(Error::DuplicateId(shop.id().to_string()));
        }
        self.check_category_room(shop.categories().iter(), 0)?;

        self.graph.add_node(shop.id())?;
        for category in shop.categories() {
            self.categories.insert_value(category, shop.id().to_string())?;
        }
        debug!(shop_id = shop.id(), categories = ?shop.categories(), "shop added");
        self.shops.insert(shop.id().to_string(), shop);
        Ok(())
    }

    /// Remove a shop, its edges, and its category memberships. Categories
    /// left without shops disappear.
    pub fn remove_shop(&mut self, id: &str) -> Result<Shop> {
        let shop = self
            .shops
            .shift_remove(id)
            .ok_or_else(|| Error::MissingId(id.to_string()))?;
        let former = self.graph.remove_node(id)?;
        for category in shop.categories() {
            self.categories.remove_value(category, &shop.id().to_string());
        }
        debug!(shop_id = id, edges_dropped = former.len(), "shop removed");
        Ok(shop)
    }

    /// Apply field changes to a shop. When categories change, the shop leaves
    /// categories it no longer lists and joins new ones.
    pub fn update_shop(&mut self, id: &str, update: ShopUpdate) -> Result<&Shop> {
        let current = self
            .shops
            .get(id)
            .ok_or_else(|| Error::MissingId(id.to_string()))?;

        if let Some(new_categories) = &update.categories {
            let old_categories = current.categories().to_vec();
            let added: Vec<&String> = new_categories
                .iter()
                .filter(|c| !old_categories.contains(c))
                .collect();
            let dropped: Vec<&String> = old_categories
                .iter()
                .filter(|c| !new_categories.contains(c))
                .collect();
            // Categories this shop is the sole member of free their slot on leaving.
            let vacated = dropped
                .iter()
                .filter(|c| self.category_members(c) == [id])
                .count();
            self.check_category_room(added.iter().copied(), vacated)?;

            let owned_id = id.to_string();
            for old in dropped {
                self.categories.remove_value(old, &owned_id);
            }
            for new in added {
                self.categories.insert_value(new, owned_id.clone())?;
            }
        }

        let shop = self
            .shops
            .get_mut(id)
            .ok_or_else(|| Error::MissingId(id.to_string()))?;
        shop.apply(update);
        debug!(shop_id = id, categories = ?shop.categories(), "shop updated");
        Ok(shop)
    }

    pub fn get_shop(&self, id: &str) -> Result<&Shop> {
        self.shops
            .get(id)
            .ok_or_else(|| Error::MissingId(id.to_string()))
    }

    /// All shops in insertion order.
    pub fn shops(&self) -> impl Iterator<Item = &Shop> {
        self.shops.values()
    }

    pub fn add_edge(&mut self, a: &str, b: &str) -> Result<()> {
        self.graph.add_edge(a, b)?;
        debug!(from = a, to = b, "edge added");
        Ok(())
    }

    pub fn remove_edge(&mut self, a: &str, b: &str) -> Result<()> {
        self.graph.remove_edge(a, b)?;
        debug!(from = a, to = b, "edge removed");
        Ok(())
    }

    pub fn neighbors(&self, id: &str) -> Result<&[ShopId]> {
        if !self.graph.contains(id) {
            return Err(Error::MissingId(id.to_string()));
        }
        Ok(self.graph.neighbors(id))
    }

    /// Adjacency listing in shop insertion order.
    pub fn adjacency(&self) -> impl Iterator<Item = (&str, &[ShopId])> {
        self.graph.iter()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn graph(&self) -> &ShopGraph {
        &self.graph
    }

    /// Category labels in table slot order.
    pub fn list_categories(&self) -> Vec<String> {
        self.categories.keys().map(str::to_string).collect()
    }

    /// Identities listed under a category, in the order they joined it.
    pub fn category_members(&self, category: &str) -> &[ShopId] {
        self.categories
            .get(&canonical_category(category))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Shops in a category, in the order they joined it. Empty for unknown
    /// categories. The label is canonicalized first.
    pub fn find_by_category(&self, category: &str) -> Vec<&Shop> {
        self.category_members(category)
            .iter()
            .filter_map(|id| self.shops.get(id))
            .collect()
    }

    /// Shops in a category ordered by rating. Equal ratings keep join order.
    pub fn find_by_category_sorted(&self, category: &str, order: SortOrder) -> Vec<&Shop> {
        let mut shops = self.find_by_category(category);
        match order {
            SortOrder::Ascending => shops.sort_by(|a, b| a.rating.cmp(&b.rating)),
            SortOrder::Descending => shops.sort_by(|a, b| b.rating.cmp(&a.rating)),
        }
        shops
    }

    /// Up to `k` highest-rated shops in a category, best first.
    ///
    /// The heap is built from the current members on each call. Order among
    /// equal ratings is unspecified.
    pub fn top_rated(&self, category: &str, k: usize) -> Vec<&Shop> {
        let mut heap: MaxHeap<Rating, &Shop> = self
            .find_by_category(category)
            .into_iter()
            .map(|shop| (shop.rating, shop))
            .collect();
        let mut out = Vec::with_capacity(k.min(heap.len()));
        while out.len() < k {
            match heap.pop() {
                Ok((_, shop)) => out.push(shop),
                Err(_) => break,
            }
        }
        out
    }

    pub fn dfs_path(&self, from: &str, to: &str) -> Result<Option<Vec<ShopId>>> {
        traversal::dfs_path(&self.graph, from, to)
    }

    pub fn bfs_path(&self, from: &str, to: &str) -> Result<Option<Vec<ShopId>>> {
        traversal::bfs_path(&self.graph, from, to)
    }

    /// Any connecting path; the first one depth-first search finds.
    pub fn any_path(&self, from: &str, to: &str) -> Result<Option<Vec<ShopId>>> {
        self.dfs_path(from, to)
    }

    pub fn compare_paths(&self, from: &str, to: &str) -> Result<PathComparison> {
        traversal::compare_paths(&self.graph, from, to)
    }

    /// The shorter of the DFS and BFS paths (DFS on ties).
    pub fn shortest_path(&self, from: &str, to: &str) -> Result<Option<Vec<ShopId>>> {
        Ok(self.compare_paths(from, to)?.into_shortest())
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}
