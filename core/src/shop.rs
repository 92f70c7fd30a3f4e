//! Shop records, ratings, and category label normalization.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// Shop identity. Unique within a directory, immutable once created.
pub type ShopId = String;

/// A shop rating. Nominally 1 to 5, but any finite or non-finite `f64` is
/// accepted; ordering uses the IEEE total order so ratings can key a heap.
#[derive(Debug, Clone, Copy)]
pub struct Rating(pub f64);

impl Rating {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Rating {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Rating {}

impl PartialOrd for Rating {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rating {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for Rating {
    fn from(value: f64) -> Self {
        Rating(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalize a category label: trim, upper-case the first character,
/// lower-case the rest.
pub fn canonical_category(label: &str) -> String {
    let mut chars = label.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Split a comma-joined category string into canonical labels.
///
/// Empty labels are dropped, and a label repeated under different spellings
/// ("cafe, Cafe ") is kept once, at its first position.
pub fn parse_categories(joined: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for label in joined.split(',').map(canonical_category) {
        if !label.is_empty() && !out.contains(&label) {
            out.push(label);
        }
    }
    out
}

fn validate_identity(id: &str) -> Result<ShopId> {
    let id = id.trim();
    if id.is_empty() {
        return Err(Error::InvalidIdentity);
    }
    Ok(id.to_string())
}

/// A shop record.
#[derive(Debug, Clone, PartialEq)]
pub struct Shop {
    id: ShopId,
    pub name: String,
    categories: Vec<String>,
    pub location: String,
    pub rating: Rating,
}

impl Shop {
    /// Build a shop from boundary fields. `categories` is comma-joined.
    pub fn new(
        id: &str,
        name: impl Into<String>,
        categories: &str,
        location: impl Into<String>,
        rating: f64,
    ) -> Result<Self> {
        Ok(Self {
            id: validate_identity(id)?,
            name: name.into(),
            categories: parse_categories(categories),
            location: location.into(),
            rating: Rating(rating),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Canonical category labels in the order they were given.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn in_category(&self, label: &str) -> bool {
        let label = canonical_category(label);
        self.categories.iter().any(|c| *c == label)
    }

    /// Overwrite the mutable fields named in `update`. Category membership in
    /// the directory's table is the caller's concern.
    pub(crate) fn apply(&mut self, update: ShopUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(categories) = update.categories {
            self.categories = categories;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
    }
}

impl fmt::Display for Shop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] ({}) at {}, rated {}",
            self.name,
            self.id,
            self.categories.join(", "),
            self.location,
            self.rating
        )
    }
}

/// Field changes for an existing shop. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShopUpdate {
    pub(crate) name: Option<String>,
    pub(crate) categories: Option<Vec<String>>,
    pub(crate) location: Option<String>,
    pub(crate) rating: Option<Rating>,
}

impl ShopUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the category list with the labels in a comma-joined string.
    pub fn categories(mut self, joined: &str) -> Self {
        self.categories = Some(parse_categories(joined));
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = Some(Rating(rating));
        self
    }
}
