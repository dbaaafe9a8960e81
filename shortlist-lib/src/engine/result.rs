use serde::Serialize;

use crate::catalog::CatalogEntry;

/// How much of each recommended entry a surface wants to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Projection {
    /// `name` and `url` only
    #[default]
    Summary,
    /// Every catalog field
    Full,
}

/// One recommended entry, borrowed from the engine's catalog.
#[derive(Debug, Clone, Copy)]
pub struct Recommendation<'a> {
    /// 1-based position in the result
    pub rank: usize,
    /// Relevance score in [0, 1]
    pub score: f32,
    /// The recommended catalog entry
    pub entry: &'a CatalogEntry,
}

impl<'a> Recommendation<'a> {
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.entry.name
    }

    #[must_use]
    pub fn url(&self) -> &'a str {
        &self.entry.url
    }

    #[must_use]
    pub fn project(&self, projection: Projection) -> Projected<'a> {
        match projection {
            Projection::Summary => Projected::Summary {
                name: self.name(),
                url: self.url(),
            },
            Projection::Full => Projected::Full(self.entry),
        }
    }
}

/// Serializable view of a [`Recommendation`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Projected<'a> {
    Summary { name: &'a str, url: &'a str },
    Full(&'a CatalogEntry),
}

/// Ranked recommendations for a single query, best first.
///
/// Holds at most `top_k` items and never repeats a `url`.
#[derive(Debug, Clone, Default)]
pub struct RecommendationResult<'a> {
    items: Vec<Recommendation<'a>>,
}

impl<'a> RecommendationResult<'a> {
    pub(crate) fn new(items: Vec<Recommendation<'a>>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Recommendation<'a>> {
        self.items.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recommendation<'a>> {
        self.items.iter()
    }

    #[must_use]
    pub fn items(&self) -> &[Recommendation<'a>] {
        &self.items
    }

    /// Recommended urls, best first.
    #[must_use]
    pub fn urls(&self) -> Vec<&'a str> {
        self.items.iter().map(|r| r.url()).collect()
    }

    /// Project every item for serialization.
    #[must_use]
    pub fn project(&self, projection: Projection) -> Vec<Projected<'a>> {
        self.items.iter().map(|r| r.project(projection)).collect()
    }
}

impl<'a> IntoIterator for RecommendationResult<'a> {
    type Item = Recommendation<'a>;
    type IntoIter = std::vec::IntoIter<Recommendation<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'r, 'a> IntoIterator for &'r RecommendationResult<'a> {
    type Item = &'r Recommendation<'a>;
    type IntoIter = std::slice::Iter<'r, Recommendation<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
