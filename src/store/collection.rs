//! In-memory record collection with insertion-ordered listing

use indexmap::IndexMap;
use tokio::sync::RwLock;

/// A record type that can live in a [`Collection`].
pub trait Record: Clone + Send + Sync + 'static {
    /// Plural name of the collection, e.g. `shows`
    const COLLECTION: &'static str;
    /// Singular name of one record, e.g. `show`
    const ENTITY: &'static str;

    /// Fields supplied on creation (everything except the id)
    type Draft: Send;
    /// Partial update; absent fields leave the record untouched
    type Patch: Send;

    fn from_draft(id: u64, draft: Self::Draft) -> Self;
    fn id(&self) -> u64;
    fn apply(&mut self, patch: Self::Patch);
}

struct Inner<R> {
    records: IndexMap<u64, R>,
    next_id: u64,
}

impl<R: Record> Inner<R> {
    fn insert(&mut self, draft: R::Draft) -> R {
        let id = self.next_id;
        self.next_id += 1;

        let record = R::from_draft(id, draft);
        self.records.insert(id, record.clone());
        record
    }
}

/// Records keyed by a store-assigned integer id.
///
/// Ids come from a counter that only moves forward, so an id is never handed
/// out twice even after its record is deleted. Each operation takes the lock
/// once and is atomic with respect to concurrent requests.
pub struct Collection<R: Record> {
    inner: RwLock<Inner<R>>,
}

impl<R: Record> Default for Collection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Collection<R> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: IndexMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Build a collection pre-populated with the given drafts, in order
    pub fn seeded(drafts: impl IntoIterator<Item = R::Draft>) -> Self {
        let mut inner = Inner {
            records: IndexMap::new(),
            next_id: 1,
        };
        for draft in drafts {
            inner.insert(draft);
        }

        tracing::debug!(
            collection = R::COLLECTION,
            count = inner.records.len(),
            "Seeded collection"
        );

        Self {
            inner: RwLock::new(inner),
        }
    }

    /// All records in creation order
    pub async fn list(&self) -> Vec<R> {
        let inner = self.inner.read().await;
        inner.records.values().cloned().collect()
    }

    /// Records matching `predicate`, in creation order
    pub async fn list_where<F>(&self, predicate: F) -> Vec<R>
    where
        F: Fn(&R) -> bool,
    {
        let inner = self.inner.read().await;
        inner
            .records
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: u64) -> Option<R> {
        let inner = self.inner.read().await;
        inner.records.get(&id).cloned()
    }

    pub async fn create(&self, draft: R::Draft) -> R {
        let mut inner = self.inner.write().await;
        let record = inner.insert(draft);
        tracing::debug!(collection = R::COLLECTION, id = record.id(), "Created record");
        record
    }

    /// Apply a partial update. Returns `None` if no record has this id.
    pub async fn update(&self, id: u64, patch: R::Patch) -> Option<R> {
        let mut inner = self.inner.write().await;
        let record = inner.records.get_mut(&id)?;
        record.apply(patch);
        tracing::debug!(collection = R::COLLECTION, id, "Updated record");
        Some(record.clone())
    }

    /// Remove a record. Returns `false` if no record has this id.
    pub async fn delete(&self, id: u64) -> bool {
        let mut inner = self.inner.write().await;
        // shift_remove keeps the remaining records in creation order
        let removed = inner.records.shift_remove(&id).is_some();
        if removed {
            tracing::debug!(collection = R::COLLECTION, id, "Deleted record");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }
}
