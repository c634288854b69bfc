use crate::{
    error::{Error, Result},
    fr::Fr,
    merkle_proof::{MerkleProof, FNC_INCLUSION, FNC_NON_INCLUSION},
    node::{Node, Preimage},
    traits::NodeStore,
};

/// Hard cap on the configurable depth of any tree instance.
pub const MAX_DEPTH_HARD_CAP: usize = 256;

/// Sparse merkle tree over a content-addressed node store.
///
/// Copy-on-write: a mutation re-creates the nodes from the mutation point up
/// to the root and shares everything else, so every past root stays a valid
/// entry point for proofs. The store only ever grows; the tree itself holds
/// just the ordered list of committed roots and the fixed maximum depth.
#[derive(Debug, Clone)]
pub struct SparseMerkleTree<S> {
    store: S,
    roots: Vec<Fr>,
    max_depth: usize,
}

enum Terminal {
    Empty,
    Leaf(Fr, Fr),
}

impl<S: NodeStore> SparseMerkleTree<S> {
    /// Build a tree over `store` with a fixed maximum depth.
    ///
    /// # Panics
    ///
    /// When `max_depth` is zero or greater than [`MAX_DEPTH_HARD_CAP`].
    pub fn new(store: S, max_depth: usize) -> SparseMerkleTree<S> {
        assert!(max_depth > 0, "max depth must be greater than zero");
        assert!(
            max_depth <= MAX_DEPTH_HARD_CAP,
            "max depth is greater than hard cap"
        );
        SparseMerkleTree {
            store,
            roots: vec![Fr::zero()],
            max_depth,
        }
    }

    /// Current merkle root.
    #[inline(always)]
    pub fn root(&self) -> Fr {
        self.roots.last().copied().unwrap_or_else(Fr::zero)
    }

    #[inline(always)]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Check empty of the tree.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.root().is_zero()
    }

    /// Get backend store.
    #[inline(always)]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[inline(always)]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Every root ever committed, oldest first, starting with the genesis 0.
    /// A value re-committed by later writes appears once per commit.
    #[inline(always)]
    pub fn root_history(&self) -> &[Fr] {
        &self.roots
    }

    pub fn root_exists(&self, root: &Fr) -> bool {
        self.roots.contains(root)
    }

    /// Insert or update a leaf, returning the new merkle root.
    ///
    /// The key's bits are consumed LSB first. When the descent lands on a
    /// leaf with a different key, that leaf is pushed deeper along the shared
    /// bit prefix until the two keys diverge, and both leaves end up as
    /// siblings below the divergent bit. A collision that would place the
    /// leaves beyond the maximum depth fails with `Error::MaxDepthReached`.
    pub fn add(&mut self, key: Fr, value: Fr) -> Result<Fr> {
        // Read-only descent first; nothing is written until the whole path
        // is known, so a failed insertion leaves the store and the current
        // root untouched.
        let mut siblings: Vec<Fr> = Vec::new();
        let mut cursor = self.root();
        let terminal = loop {
            let depth = siblings.len();
            if cursor.is_zero() {
                break Terminal::Empty;
            }
            match Node::from(self.store.get(&cursor)?) {
                Node::Leaf { key, value } => break Terminal::Leaf(key, value),
                Node::Middle { left, right } => {
                    if depth >= self.max_depth {
                        return Err(Error::MaxDepthReached);
                    }
                    if key.bit(depth) {
                        siblings.push(left);
                        cursor = right;
                    } else {
                        siblings.push(right);
                        cursor = left;
                    }
                }
                Node::Empty => unreachable!(),
            }
        };

        let depth = siblings.len();
        let mut hash = match terminal {
            Terminal::Empty => self.store.put(Preimage::leaf(key, value))?,
            Terminal::Leaf(old_key, _) if old_key == key => {
                self.store.put(Preimage::leaf(key, value))?
            }
            Terminal::Leaf(old_key, old_value) => {
                // Both keys share the bit prefix down to `depth`; the leaves
                // become siblings right below the first divergent bit.
                let mut fork = depth;
                while fork < MAX_DEPTH_HARD_CAP && key.bit(fork) == old_key.bit(fork) {
                    fork += 1;
                }
                if fork >= self.max_depth {
                    return Err(Error::MaxDepthReached);
                }

                let new_leaf = self.store.put(Preimage::leaf(key, value))?;
                let old_leaf = self.store.put(Preimage::leaf(old_key, old_value))?;
                let mut node = if key.bit(fork) {
                    self.store.put(Preimage::middle(old_leaf, new_leaf))?
                } else {
                    self.store.put(Preimage::middle(new_leaf, old_leaf))?
                };
                for d in (depth..fork).rev() {
                    node = if key.bit(d) {
                        self.store.put(Preimage::middle(Fr::zero(), node))?
                    } else {
                        self.store.put(Preimage::middle(node, Fr::zero()))?
                    };
                }
                node
            }
        };

        for d in (0..depth).rev() {
            hash = if key.bit(d) {
                self.store.put(Preimage::middle(siblings[d], hash))?
            } else {
                self.store.put(Preimage::middle(hash, siblings[d]))?
            };
        }

        self.roots.push(hash);
        Ok(hash)
    }

    /// Current value of a key, `None` when absent.
    pub fn get(&self, key: &Fr) -> Result<Option<Fr>> {
        let proof = self.proof(key)?;
        Ok(proof.existence().then_some(proof.value))
    }

    /// Generate a proof against the current root.
    #[inline(always)]
    pub fn proof(&self, key: &Fr) -> Result<MerkleProof> {
        prove(&self.store, &self.root(), key, self.max_depth)
    }

    /// Generate a proof against any previously committed root.
    ///
    /// Same walk as [`Self::proof`]; nothing is ever deleted from the store,
    /// so every ancestor of every past root remains retrievable.
    #[inline(always)]
    pub fn historical_proof(&self, key: &Fr, root: &Fr) -> Result<MerkleProof> {
        prove(&self.store, root, key, self.max_depth)
    }
}

/// Walk `store` from `root` and assemble the proof for `key`.
///
/// Works identically over a tree's own store and over a reverse-hash registry
/// populated by someone else. A missing preimage under a non-zero cursor is
/// `Error::NodeNotFound`: the node set is incomplete, which is an error and
/// not a proof of anything.
pub fn prove<S: NodeStore>(
    store: &S,
    root: &Fr,
    key: &Fr,
    max_depth: usize,
) -> Result<MerkleProof> {
    let mut proof = MerkleProof {
        root: *root,
        siblings: vec![Fr::zero(); max_depth],
        old_key: Fr::zero(),
        old_value: Fr::zero(),
        is_old0: false,
        key: *key,
        value: Fr::zero(),
        fnc: FNC_NON_INCLUSION,
    };

    let mut cursor = *root;
    for depth in 0..=max_depth {
        if cursor.is_zero() {
            proof.is_old0 = true;
            return Ok(proof);
        }
        match Node::from(store.get(&cursor)?) {
            Node::Leaf {
                key: leaf_key,
                value: leaf_value,
            } => {
                if leaf_key == *key {
                    proof.fnc = FNC_INCLUSION;
                } else {
                    // auxiliary leaf: shares the path prefix, differs in key
                    proof.old_key = leaf_key;
                    proof.old_value = leaf_value;
                }
                proof.value = leaf_value;
                return Ok(proof);
            }
            Node::Middle { left, right } => {
                if depth == max_depth {
                    return Err(Error::MaxDepthReached);
                }
                if key.bit(depth) {
                    proof.siblings[depth] = left;
                    cursor = right;
                } else {
                    proof.siblings[depth] = right;
                    cursor = left;
                }
            }
            Node::Empty => unreachable!(),
        }
    }

    Err(Error::MaxDepthReached)
}
