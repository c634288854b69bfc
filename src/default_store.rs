use crate::{
    error::{Error, Result},
    fr::Fr,
    node::Preimage,
    traits::{Hasher, NodeStore},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, marker::PhantomData};
use vsdb::Mapx;

/// Disk-persistent node store, the backing of a long-lived incremental tree.
///
/// Grows monotonically through [`NodeStore::put`]; nothing is ever removed,
/// so every root the tree has ever committed stays walkable after restart.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(bound = "")]
pub struct DefaultStore<H> {
    nodes: Mapx<Fr, Preimage>,
    phantom: PhantomData<H>,
}

impl<H> DefaultStore<H> {
    #[inline(always)]
    pub fn new() -> Self {
        DefaultStore {
            nodes: Mapx::new(),
            phantom: PhantomData,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<H> Default for DefaultStore<H> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Hasher> NodeStore for DefaultStore<H> {
    fn put(&mut self, preimage: Preimage) -> Result<Fr> {
        let hash = preimage.hash::<H>();
        if !self.nodes.contains_key(&hash) {
            self.nodes.insert(&hash, &preimage);
        }
        Ok(hash)
    }

    fn get(&self, hash: &Fr) -> Result<Preimage> {
        self.nodes.get(hash).ok_or(Error::NodeNotFound(*hash))
    }
}

/// In-memory node store.
///
/// The generic reverse-hash registry: populated with batches of preimages by
/// a relayer that built the tree elsewhere, then walked read-only. Also the
/// test workhorse.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(bound = "")]
pub struct MemStore<H> {
    nodes: BTreeMap<Fr, Preimage>,
    phantom: PhantomData<H>,
}

impl<H> MemStore<H> {
    #[inline(always)]
    pub fn new() -> Self {
        MemStore {
            nodes: BTreeMap::new(),
            phantom: PhantomData,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<H> Default for MemStore<H> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Hasher> NodeStore for MemStore<H> {
    fn put(&mut self, preimage: Preimage) -> Result<Fr> {
        let hash = preimage.hash::<H>();
        self.nodes.entry(hash).or_insert(preimage);
        Ok(hash)
    }

    fn get(&self, hash: &Fr) -> Result<Preimage> {
        self.nodes.get(hash).copied().ok_or(Error::NodeNotFound(*hash))
    }
}
