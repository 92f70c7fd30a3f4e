//! Bulk loading from an external tabular source.
//!
//! Records mirror the two sheets of the source workbook: one row per shop,
//! one row per connection. Field aliases accept the sheet's column headers,
//! and identities may arrive as text or as integers.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use crate::directory::Directory;
use crate::error::{Error, IngestError, Result};
use crate::shop::Shop;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

/// One shop row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopRecord {
    #[serde(alias = "Shop Number", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(alias = "Shop Name", default)]
    pub name: String,
    /// Comma-joined category labels.
    #[serde(alias = "Category", default)]
    pub categories: String,
    #[serde(alias = "Location", default)]
    pub location: String,
    #[serde(alias = "Rating")]
    pub rating: f64,
}

impl ShopRecord {
    pub fn into_shop(self) -> Result<Shop> {
        Shop::new(&self.id, self.name, &self.categories, self.location, self.rating)
    }
}

/// One connection row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    #[serde(alias = "Source shop", deserialize_with = "deserialize_id")]
    pub source: String,
    #[serde(alias = "Destination shop", deserialize_with = "deserialize_id")]
    pub destination: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub shops: Vec<ShopRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl Dataset {
    pub fn from_json_str(s: &str) -> Result<Self, IngestError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IngestError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

/// A record the directory refused.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    /// "shop <id>" or "edge <a>-<b>".
    pub record: String,
    pub error: Error,
}

/// Outcome of a bulk load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub shops_added: usize,
    pub edges_added: usize,
    pub rejected: Vec<Rejected>,
}

impl Directory {
    /// Load shops, then edges. Each record is attempted once; a rejected
    /// record is logged and reported, and loading continues.
    pub fn load(&mut self, dataset: Dataset) -> LoadReport {
        let mut report = LoadReport::default();

        for record in dataset.shops {
            let label = format!("shop {}", record.id);
            match record.into_shop().and_then(|shop| self.add_shop(shop)) {
                Ok(()) => report.shops_added += 1,
                Err(error) => {
                    warn!(record = %label, %error, "rejected shop record");
                    report.rejected.push(Rejected { record: label, error });
                }
            }
        }

        for record in dataset.edges {
            match self.add_edge(&record.source, &record.destination) {
                Ok(()) => report.edges_added += 1,
                Err(error) => {
                    let label = format!("edge {}-{}", record.source, record.destination);
                    warn!(record = %label, %error, "rejected edge record");
                    report.rejected.push(Rejected { record: label, error });
                }
            }
        }

        info!(
            shops = report.shops_added,
            edges = report.edges_added,
            rejected = report.rejected.len(),
            "dataset loaded"
        );
        report
    }
}
