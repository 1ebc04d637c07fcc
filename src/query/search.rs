//! Running planned queries against an index reader.

use crate::compute::distance::DistanceUnit;
use crate::error::Result;
use crate::index::store::{DocId, IndexReader};
use crate::query::planner::SpatialQuery;
use crate::query::predicate::DistanceFn;
use serde::{Deserialize, Serialize};

/// Output options for a search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Attach the distance to the center to each hit.
    pub project_distance: bool,
    /// Order hits by ascending distance instead of document id.
    pub sort_by_distance: bool,
    /// Keep at most this many hits, applied after sorting.
    pub limit: Option<usize>,
    /// Unit of projected distances.
    pub unit: DistanceUnit,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            project_distance: false,
            sort_by_distance: false,
            limit: None,
            unit: DistanceUnit::Kilometers,
        }
    }
}

impl SearchOptions {
    pub fn with_distance(mut self, unit: DistanceUnit) -> Self {
        self.project_distance = true;
        self.unit = unit;
        self
    }

    pub fn sorted_by_distance(mut self) -> Self {
        self.sort_by_distance = true;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// One matching document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc: DocId,
    /// Distance to the query center, when projected.
    pub distance: Option<f64>,
}

/// Counters collected while running a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryStats {
    pub level: u8,
    pub rectangles: usize,
    pub candidate_cells: usize,
    /// Documents accepted by the coarse predicate.
    pub coarse_matches: usize,
    /// Documents left after exact refinement.
    pub exact_matches: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
    pub stats: QueryStats,
}

impl SearchResults {
    pub fn docs(&self) -> Vec<DocId> {
        self.hits.iter().map(|hit| hit.doc).collect()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Executes spatial queries through an [`IndexReader`].
///
/// # Examples
///
/// ```rust
/// use spatio_grid::index::{index_document, CoordinateField, MemoryIndex, SpatialDocument};
/// use spatio_grid::query::{plan_query, SearchDisc, SearchOptions, SpatialSearch};
///
/// let field = CoordinateField::new("location");
/// let index = MemoryIndex::new();
/// index_document(&index, 1, &SpatialDocument::new().with_field(field.clone(), (24.0, 31.5)))?;
/// index_document(&index, 2, &SpatialDocument::new().with_field(field.clone(), (24.5, 40.0)))?;
///
/// let query = plan_query(&SearchDisc::from_degrees(24.0, 32.0, 51.0)?, &field)?;
/// let results = SpatialSearch::new(&index).execute(&query, &SearchOptions::default())?;
/// assert_eq!(results.docs(), vec![1]);
/// # Ok::<(), spatio_grid::SpatialError>(())
/// ```
pub struct SpatialSearch<'a, R: IndexReader + ?Sized> {
    reader: &'a R,
}

impl<'a, R: IndexReader + ?Sized> SpatialSearch<'a, R> {
    pub fn new(reader: &'a R) -> Self {
        Self { reader }
    }

    /// Coarse match, exact refinement, then projection and ordering.
    pub fn execute(&self, query: &SpatialQuery, options: &SearchOptions) -> Result<SearchResults> {
        let candidates = query.coarse().evaluate(self.reader)?;
        let coarse_matches = candidates.len();

        let mut docs = Vec::with_capacity(coarse_matches);
        for doc in candidates {
            if query.exact().matches_document(self.reader, doc)? {
                docs.push(doc);
            }
        }
        docs.sort_unstable();

        let stats = QueryStats {
            level: query.level(),
            rectangles: query.rectangles().len(),
            candidate_cells: query.candidate_cell_count(),
            coarse_matches,
            exact_matches: docs.len(),
        };
        log::debug!(
            "Spatial query on {}: {} candidate(s), {} match(es)",
            query.field(),
            stats.coarse_matches,
            stats.exact_matches
        );

        let hits = self.hits(query.distance(), docs, options)?;
        Ok(SearchResults { hits, stats })
    }

    /// Distance projection over arbitrary documents, without a spatial
    /// filter.
    ///
    /// Documents without coordinates are measured from `(0, 0)`.
    pub fn project_distances(
        &self,
        distance: &DistanceFn,
        docs: &[DocId],
        options: &SearchOptions,
    ) -> Result<Vec<SearchHit>> {
        self.hits(distance, docs.to_vec(), options)
    }

    fn hits(
        &self,
        distance: &DistanceFn,
        docs: Vec<DocId>,
        options: &SearchOptions,
    ) -> Result<Vec<SearchHit>> {
        let needs_distance = options.project_distance || options.sort_by_distance;
        let mut scored = Vec::with_capacity(docs.len());
        for doc in docs {
            let km = if needs_distance {
                Some(distance.distance_for(self.reader, doc)?)
            } else {
                None
            };
            scored.push((doc, km));
        }

        if options.sort_by_distance {
            scored.sort_by(|(a_doc, a), (b_doc, b)| {
                let a = a.unwrap_or(f64::INFINITY);
                let b = b.unwrap_or(f64::INFINITY);
                a.total_cmp(&b).then(a_doc.cmp(b_doc))
            });
        }
        if let Some(limit) = options.limit {
            scored.truncate(limit);
        }

        Ok(scored
            .into_iter()
            .map(|(doc, km)| SearchHit {
                doc,
                distance: if options.project_distance {
                    km.map(|km| options.unit.from_kilometers(km))
                } else {
                    None
                },
            })
            .collect())
    }
}
