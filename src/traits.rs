use crate::{error::Result, fr::Fr, node::Preimage};

/// Trait for customize hash function.
///
/// Arity-specific hash oracle over field elements: 2-ary for combining
/// children, 3-ary for leaf and state encoding. Must be deterministic; the
/// tree's security additionally assumes collision resistance.
pub trait Hasher {
    fn hash2(l: &Fr, r: &Fr) -> Fr;
    fn hash3(a: &Fr, b: &Fr, c: &Fr) -> Fr;
}

/// Trait for customize backend storage.
///
/// An append-only, content-addressed map from a node's hash to its preimage.
/// The key is always recomputed from the preimage on write, never accepted
/// from the caller, so a stored binding cannot be forged. Entries are never
/// deleted or overwritten, which is what keeps every historical root provable
/// without snapshots.
pub trait NodeStore {
    /// Hash `preimage` and store the association, returning the hash.
    /// Re-submitting an identical preimage is a no-op, not an error.
    fn put(&mut self, preimage: Preimage) -> Result<Fr>;

    /// Fetch the preimage stored under `hash`, or `Error::NodeNotFound`.
    fn get(&self, hash: &Fr) -> Result<Preimage>;

    /// Batch ingestion of externally built nodes.
    fn put_many(&mut self, preimages: Vec<Preimage>) -> Result<Vec<Fr>> {
        preimages.into_iter().map(|p| self.put(p)).collect()
    }
}

impl<S: NodeStore> NodeStore for &mut S {
    fn put(&mut self, preimage: Preimage) -> Result<Fr> {
        (**self).put(preimage)
    }

    fn get(&self, hash: &Fr) -> Result<Preimage> {
        (**self).get(hash)
    }
}
