//! Undirected shop connectivity.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::shop::ShopId;

/// Undirected connectivity graph over shop identities.
///
/// Adjacency is symmetric: `b` is in `a`'s neighbor list iff `a` is in
/// `b`'s. Neighbor lists are duplicate-free and keep edge-insertion order;
/// nodes keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct ShopGraph {
    adjacency: IndexMap<ShopId, Vec<ShopId>>,
}

impl ShopGraph {
    pub fn new() -> Self {
        Self {
            adjacency: IndexMap::new(),
        }
    }

    /// Pre-allocate for a known node count.
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            adjacency: IndexMap::with_capacity(node_count),
        }
    }

    /// Register an isolated node. Adding an existing node is an error, never a merge.
    pub fn add_node(&mut self, id: &str) -> Result<()> {
        if self.adjacency.contains_key(id) {
            return Err(Error::DuplicateId(id.to_string()));
        }
        self.adjacency.insert(id.to_string(), Vec::new());
        Ok(())
    }

    /// Remove a node and every edge touching it. Returns its former neighbors.
    pub fn remove_node(&mut self, id: &str) -> Result<Vec<ShopId>> {
        let neighbors = self
            .adjacency
            .shift_remove(id)
            .ok_or_else(|| Error::MissingNode(id.to_string()))?;
        for neighbor in &neighbors {
            if let Some(list) = self.adjacency.get_mut(neighbor) {
                list.retain(|n| n != id);
            }
        }
        Ok(neighbors)
    }

    fn require(&self, id: &str) -> Result<()> {
        if self.adjacency.contains_key(id) {
            Ok(())
        } else {
            Err(Error::MissingNode(id.to_string()))
        }
    }

    /// Connect `a` and `b`.
    pub fn add_edge(&mut self, a: &str, b: &str) -> Result<()> {
        self.require(a)?;
        self.require(b)?;
        if a == b {
            return Err(Error::SelfLoop(a.to_string()));
        }
        if self.has_edge(a, b) {
            return Err(Error::DuplicateEdge(a.to_string(), b.to_string()));
        }
        if let Some(list) = self.adjacency.get_mut(a) {
            list.push(b.to_string());
        }
        if let Some(list) = self.adjacency.get_mut(b) {
            list.push(a.to_string());
        }
        Ok(())
    }

    /// Disconnect `a` and `b`.
    pub fn remove_edge(&mut self, a: &str, b: &str) -> Result<()> {
        self.require(a)?;
        self.require(b)?;
        if !self.has_edge(a, b) {
            return Err(Error::MissingEdge(a.to_string(), b.to_string()));
        }
        if let Some(list) = self.adjacency.get_mut(a) {
            list.retain(|n| n != b);
        }
        if let Some(list) = self.adjacency.get_mut(b) {
            list.retain(|n| n != a);
        }
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.neighbors(a).iter().any(|n| n == b)
    }

    /// Neighbors of a node in edge-insertion order. Empty for unknown nodes.
    pub fn neighbors(&self, id: &str) -> &[ShopId] {
        self.adjacency.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// The graph's own copy of a node identity.
    pub(crate) fn node_key(&self, id: &str) -> Option<&str> {
        self.adjacency.get_key_value(id).map(|(k, _)| k.as_str())
    }

    /// Adjacency listing in node insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ShopId])> {
        self.adjacency
            .iter()
            .map(|(id, list)| (id.as_str(), list.as_slice()))
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Undirected edges; each is stored twice.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|v| v.len()).sum::<usize>() / 2
    }
}
