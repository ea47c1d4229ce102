use atomicwrites::{AllowOverwrite, AtomicFile};
use catgraph_core::{CatalogSnapshot, Edge, Error, Node, NodeId, Result};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CATALOG_FILE: &str = "catalog.json";

#[derive(Debug, Default, Clone)]
struct Catalog {
    categories: BTreeMap<NodeId, Node>,
    similarities: BTreeSet<Edge>,
}

impl Catalog {
    fn from_snapshot(snapshot: CatalogSnapshot) -> Result<Self> {
        snapshot.validate()?;
        let mut catalog = Catalog::default();
        for node in snapshot.nodes {
            catalog.categories.insert(node.id, node);
        }
        for edge in snapshot.edges {
            for id in [edge.a(), edge.b()] {
                if !catalog.categories.contains_key(&id) {
                    return Err(Error::CategoryNotFound(id));
                }
            }
            catalog.similarities.insert(edge);
        }
        Ok(catalog)
    }

    fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot::new(
            self.categories.values().cloned().collect(),
            self.similarities.iter().copied().collect(),
        )
    }

    fn next_id(&self) -> NodeId {
        self.categories.keys().next_back().map_or(1, |id| id + 1)
    }

    fn require(&self, id: NodeId) -> Result<&Node> {
        self.categories.get(&id).ok_or(Error::CategoryNotFound(id))
    }
}

/// In-memory category catalog with an optional JSON file behind it.
///
/// This is the boundary that produces analysis snapshots: self-similar
/// pairs and pairs naming unknown categories are rejected here, pairs are
/// stored once regardless of orientation, and [`CatalogStore::snapshot`]
/// reads categories and similarities under a single lock.
pub struct CatalogStore {
    inner: RwLock<Catalog>,
    path: Option<PathBuf>,
}

impl CatalogStore {
    /// A catalog that lives only in memory.
    pub fn in_memory() -> Self {
        Self {
            inner: RwLock::new(Catalog::default()),
            path: None,
        }
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Result<Self> {
        Ok(Self {
            inner: RwLock::new(Catalog::from_snapshot(snapshot)?),
            path: None,
        })
    }

    /// Open the catalog file in `data_dir`, creating the directory if needed.
    ///
    /// Every later mutation is written back to the file.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir)?;
        let path = data_dir.join(CATALOG_FILE);

        let catalog = if path.exists() {
            let snapshot = CatalogSnapshot::from_reader(BufReader::new(File::open(&path)?))?;
            let catalog = Catalog::from_snapshot(snapshot)?;
            info!(
                categories = catalog.categories.len(),
                similarities = catalog.similarities.len(),
                "catalog loaded from {:?}",
                path
            );
            catalog
        } else {
            Catalog::default()
        };

        Ok(Self {
            inner: RwLock::new(catalog),
            path: Some(path),
        })
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn persist(&self, catalog: &Catalog) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let data = serde_json::to_vec_pretty(&catalog.snapshot())?;
        AtomicFile::new(path, AllowOverwrite)
            .write(|file| std::io::Write::write_all(file, &data))
            .map_err(|e| match e {
                atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => Error::Io(e),
            })?;
        debug!(path = ?path, "catalog saved");
        Ok(())
    }

    /// Write the catalog file now; a no-op for in-memory catalogs.
    pub fn save(&self) -> Result<()> {
        let catalog = self.inner.read();
        self.persist(&catalog)
    }

    /// Every category and every similarity, read together.
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.inner.read().snapshot()
    }

    /// Apply a change to a copy of the catalog and keep it only once saved.
    ///
    /// The closure reports whether it changed anything; unchanged catalogs
    /// are not rewritten.
    fn update<T, F>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&mut Catalog) -> Result<(T, bool)>,
    {
        let mut catalog = self.inner.write();
        let mut next = catalog.clone();
        let (out, changed) = change(&mut next)?;
        if changed {
            self.persist(&next)?;
            *catalog = next;
        }
        Ok(out)
    }

    /// Create a category with the next free id.
    pub fn add_category(&self, name: impl Into<String>) -> Result<Node> {
        self.update(|catalog| {
            let node = Node::new(catalog.next_id(), name);
            catalog.categories.insert(node.id, node.clone());
            Ok((node, true))
        })
    }

    /// Insert a category with a caller-chosen id, replacing any previous one.
    pub fn insert_category(&self, node: Node) -> Result<Option<Node>> {
        self.update(|catalog| Ok((catalog.categories.insert(node.id, node), true)))
    }

    pub fn rename_category(&self, id: NodeId, name: impl Into<String>) -> Result<Node> {
        self.update(|catalog| {
            let node = catalog
                .categories
                .get_mut(&id)
                .ok_or(Error::CategoryNotFound(id))?;
            node.name = name.into();
            Ok((node.clone(), true))
        })
    }

    pub fn get_category(&self, id: NodeId) -> Option<Node> {
        self.inner.read().categories.get(&id).cloned()
    }

    /// All categories ordered by name, then id.
    pub fn list_categories(&self) -> Vec<Node> {
        let mut nodes: Vec<Node> = self.inner.read().categories.values().cloned().collect();
        nodes.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        nodes
    }

    /// Remove a category together with every similarity it takes part in.
    pub fn remove_category(&self, id: NodeId) -> Result<Node> {
        self.update(|catalog| {
            let node = catalog
                .categories
                .remove(&id)
                .ok_or(Error::CategoryNotFound(id))?;
            let before = catalog.similarities.len();
            catalog.similarities.retain(|edge| !edge.touches(id));
            debug!(
                id,
                dropped = before - catalog.similarities.len(),
                "category removed"
            );
            Ok((node, true))
        })
    }

    /// Mark two categories as similar.
    ///
    /// Returns `false` if the pair was already present in either order.
    pub fn add_similarity(&self, a: NodeId, b: NodeId) -> Result<bool> {
        let edge = Edge::new(a, b)?;
        self.update(|catalog| {
            catalog.require(a)?;
            catalog.require(b)?;
            let added = catalog.similarities.insert(edge);
            Ok((added, added))
        })
    }

    pub fn remove_similarity(&self, a: NodeId, b: NodeId) -> Result<bool> {
        let edge = Edge::new(a, b)?;
        self.update(|catalog| {
            let removed = catalog.similarities.remove(&edge);
            Ok((removed, removed))
        })
    }

    /// Merge a snapshot into the catalog as one change.
    ///
    /// Categories are upserted by id and pairs are added idempotently. Every
    /// pair must name a category that is either already stored or part of
    /// the snapshot; otherwise nothing is imported. Returns the number of
    /// new similarity pairs.
    pub fn import(&self, snapshot: CatalogSnapshot) -> Result<usize> {
        snapshot.validate()?;
        self.update(|catalog| {
            for node in snapshot.nodes {
                catalog.categories.insert(node.id, node);
            }
            let mut added = 0;
            for edge in snapshot.edges {
                catalog.require(edge.a())?;
                catalog.require(edge.b())?;
                if catalog.similarities.insert(edge) {
                    added += 1;
                }
            }
            info!(
                categories = catalog.categories.len(),
                similarities = catalog.similarities.len(),
                added,
                "snapshot imported"
            );
            Ok((added, true))
        })
    }

    pub fn list_similarities(&self) -> Vec<Edge> {
        self.inner.read().similarities.iter().copied().collect()
    }

    /// Names of the categories similar to `id`, sorted.
    pub fn similar_to(&self, id: NodeId) -> Result<Vec<String>> {
        let catalog = self.inner.read();
        catalog.require(id)?;
        let others: BTreeSet<NodeId> = catalog
            .similarities
            .iter()
            .filter_map(|edge| edge.other(id))
            .collect();
        let mut names: Vec<String> = others
            .into_iter()
            .filter_map(|other| catalog.categories.get(&other).map(|n| n.name.clone()))
            .collect();
        names.sort();
        Ok(names)
    }

    pub fn category_count(&self) -> usize {
        self.inner.read().categories.len()
    }

    pub fn similarity_count(&self) -> usize {
        self.inner.read().similarities.len()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::in_memory()
    }
}
