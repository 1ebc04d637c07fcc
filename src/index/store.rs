//! Contracts with the document index, and an in-memory implementation.
//!
//! The spatial layer never owns documents. It asks an [`IndexWriter`] to
//! store field values and an [`IndexReader`] to answer term-membership
//! queries and return stored values. [`MemoryIndex`] implements both over
//! hash maps and is enough for tests, benchmarks, and small embedded uses.

use crate::error::Result;
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of a document in the external index.
pub type DocId = u64;

/// Kind of value stored in an index field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldValueKind {
    String,
    Numeric,
}

/// A stored field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    String(String),
    Numeric(f64),
}

impl FieldValue {
    pub fn kind(&self) -> FieldValueKind {
        match self {
            FieldValue::String(_) => FieldValueKind::String,
            FieldValue::Numeric(_) => FieldValueKind::Numeric,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            FieldValue::Numeric(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Numeric(v) => Some(*v),
            FieldValue::String(_) => None,
        }
    }

    /// Term used for membership queries.
    fn term(&self) -> String {
        match self {
            FieldValue::String(s) => s.clone(),
            FieldValue::Numeric(v) => v.to_string(),
        }
    }
}

/// Write side of the document index.
pub trait IndexWriter {
    /// Store `value` under `key` on document `doc`, replacing any previous value.
    fn store_field(&self, doc: DocId, key: &str, value: FieldValue) -> Result<()>;

    /// Drop every stored field of a document.
    fn delete_document(&self, doc: DocId) -> Result<()>;

    /// Replace all stored fields of a document with `fields`.
    ///
    /// The default deletes then stores field by field, so a failure part way
    /// leaves the document with only some of its new fields. Writers that
    /// can apply a batch atomically should override it.
    fn replace_document(&self, doc: DocId, fields: BTreeMap<String, FieldValue>) -> Result<()> {
        self.delete_document(doc)?;
        for (key, value) in fields {
            self.store_field(doc, &key, value)?;
        }
        Ok(())
    }
}

/// Read side of the document index.
pub trait IndexReader {
    /// Documents whose `key` field equals one of `values`.
    fn match_any(&self, key: &str, values: &FxHashSet<String>) -> Result<FxHashSet<DocId>>;

    /// Stored value of `key` on `doc`.
    fn field_value(&self, doc: DocId, key: &str) -> Result<Option<FieldValue>>;

    /// Every document in the index.
    fn documents(&self) -> Result<Vec<DocId>>;
}

/// Index statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of documents with at least one stored field
    pub document_count: usize,
    /// Number of stored (document, field) values
    pub field_count: usize,
    /// Number of distinct (field, term) postings
    pub term_count: usize,
}

#[derive(Default)]
struct MemoryIndexInner {
    documents: FxHashMap<DocId, BTreeMap<String, FieldValue>>,
    postings: FxHashMap<String, FxHashMap<String, FxHashSet<DocId>>>,
}

impl MemoryIndexInner {
    fn insert(&mut self, doc: DocId, key: &str, value: FieldValue) {
        let term = value.term();
        let previous = self
            .documents
            .entry(doc)
            .or_default()
            .insert(key.to_string(), value);
        if let Some(previous) = previous {
            self.unpost(doc, key, &previous);
        }
        self.postings
            .entry(key.to_string())
            .or_default()
            .entry(term)
            .or_default()
            .insert(doc);
    }

    fn remove(&mut self, doc: DocId) {
        if let Some(fields) = self.documents.remove(&doc) {
            for (key, value) in &fields {
                self.unpost(doc, key, value);
            }
        }
    }

    fn unpost(&mut self, doc: DocId, key: &str, value: &FieldValue) {
        if let Some(terms) = self.postings.get_mut(key) {
            let term = value.term();
            if let Some(docs) = terms.get_mut(&term) {
                docs.remove(&doc);
                if docs.is_empty() {
                    terms.remove(&term);
                }
            }
            if terms.is_empty() {
                self.postings.remove(key);
            }
        }
    }
}

/// In-memory document index.
///
/// Safe to share between threads: reads take a shared lock, writes an
/// exclusive one.
///
/// # Examples
///
/// ```rust
/// use spatio_grid::index::{FieldValue, IndexReader, IndexWriter, MemoryIndex};
/// use rustc_hash::FxHashSet;
///
/// let index = MemoryIndex::new();
/// index.store_field(1, "color", FieldValue::String("red".into()))?;
/// index.store_field(2, "color", FieldValue::String("blue".into()))?;
///
/// let wanted: FxHashSet<String> = ["red".to_string()].into_iter().collect();
/// let hits = index.match_any("color", &wanted)?;
/// assert!(hits.contains(&1) && !hits.contains(&2));
/// # Ok::<(), spatio_grid::SpatialError>(())
/// ```
#[derive(Default)]
pub struct MemoryIndex {
    inner: RwLock<MemoryIndexInner>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> IndexStats {
        let inner = self.inner.read();
        IndexStats {
            document_count: inner.documents.len(),
            field_count: inner.documents.values().map(BTreeMap::len).sum(),
            term_count: inner.postings.values().map(FxHashMap::len).sum(),
        }
    }

    /// Stored fields of a document, in key order.
    pub fn document_fields(&self, doc: DocId) -> BTreeMap<String, FieldValue> {
        self.inner
            .read()
            .documents
            .get(&doc)
            .cloned()
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for MemoryIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryIndex")
            .field("stats", &self.stats())
            .finish()
    }
}

impl IndexWriter for MemoryIndex {
    fn store_field(&self, doc: DocId, key: &str, value: FieldValue) -> Result<()> {
        self.inner.write().insert(doc, key, value);
        Ok(())
    }

    fn delete_document(&self, doc: DocId) -> Result<()> {
        self.inner.write().remove(doc);
        Ok(())
    }

    /// Applied under one write lock: readers see the old fields or the new
    /// ones, never a mix.
    fn replace_document(&self, doc: DocId, fields: BTreeMap<String, FieldValue>) -> Result<()> {
        let mut inner = self.inner.write();
        inner.remove(doc);
        for (key, value) in fields {
            inner.insert(doc, &key, value);
        }
        Ok(())
    }
}

impl IndexReader for MemoryIndex {
    fn match_any(&self, key: &str, values: &FxHashSet<String>) -> Result<FxHashSet<DocId>> {
        let inner = self.inner.read();
        let mut matched = FxHashSet::default();
        if let Some(terms) = inner.postings.get(key) {
            for value in values {
                if let Some(docs) = terms.get(value) {
                    matched.extend(docs.iter().copied());
                }
            }
        }
        Ok(matched)
    }

    fn field_value(&self, doc: DocId, key: &str) -> Result<Option<FieldValue>> {
        Ok(self
            .inner
            .read()
            .documents
            .get(&doc)
            .and_then(|fields| fields.get(key))
            .cloned())
    }

    fn documents(&self) -> Result<Vec<DocId>> {
        let mut docs: Vec<DocId> = self.inner.read().documents.keys().copied().collect();
        docs.sort_unstable();
        Ok(docs)
    }
}
