use crate::{
    error::{Error, Result},
    fr::Fr,
    merkle_proof::MerkleProof,
    node::Preimage,
    traits::{Hasher, NodeStore},
    tree::prove,
};
use serde::{Deserialize, Serialize};

/// Depth of the revocation trees published by issuers.
pub const REVOCATION_TREE_DEPTH: usize = 40;

/// The 3-element commitment identifying an issuer's full identity state.
///
/// Hashed with the same 3-ary function as a leaf but never walked as a tree
/// node; it is the entry point selecting which sub-root to descend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct IdentityState {
    pub claims_root: Fr,
    pub revocation_root: Fr,
    pub root_of_roots: Fr,
}

impl IdentityState {
    pub fn from_roots(roots: &[Fr]) -> Result<IdentityState> {
        match roots {
            [claims_root, revocation_root, root_of_roots] => Ok(IdentityState {
                claims_root: *claims_root,
                revocation_root: *revocation_root,
                root_of_roots: *root_of_roots,
            }),
            _ => Err(Error::InvalidRootsLength {
                expected: 3,
                actual: roots.len(),
            }),
        }
    }

    /// The state hash an issuer publishes for this tuple.
    pub fn hash<H: Hasher>(&self) -> Fr {
        H::hash3(&self.claims_root, &self.revocation_root, &self.root_of_roots)
    }
}

/// Revocation status of a claim nonce under a given issuer state.
///
/// Callers can check `mtp.root == issuer.revocation_root` and recompute the
/// state hash from `issuer` independently.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RevocationStatus {
    pub issuer: IdentityState,
    pub mtp: MerkleProof,
}

/// Reverse-hash registry with revocation status resolution on top.
///
/// The trees behind the roots are built elsewhere; a relayer publishes their
/// node preimages here in bulk, and statuses are resolved purely by walking
/// the registry. No tree state of its own, no mutation on the read path.
#[derive(Debug, Clone)]
pub struct IdentityTreeStore<S> {
    store: S,
    max_depth: usize,
}

impl<S: NodeStore> IdentityTreeStore<S> {
    pub fn new(store: S) -> IdentityTreeStore<S> {
        Self::with_max_depth(store, REVOCATION_TREE_DEPTH)
    }

    /// # Panics
    ///
    /// When `max_depth` is zero or greater than
    /// [`crate::tree::MAX_DEPTH_HARD_CAP`].
    pub fn with_max_depth(store: S, max_depth: usize) -> IdentityTreeStore<S> {
        assert!(max_depth > 0, "max depth must be greater than zero");
        assert!(
            max_depth <= crate::tree::MAX_DEPTH_HARD_CAP,
            "max depth is greater than hard cap"
        );
        IdentityTreeStore { store, max_depth }
    }

    #[inline(always)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ingest a batch of node preimages published by a relayer.
    pub fn save_nodes(&mut self, preimages: Vec<Preimage>) -> Result<Vec<Fr>> {
        self.store.put_many(preimages)
    }

    /// Resolve the status of `nonce` against an explicit state tuple
    /// `(claims_root, revocation_root, root_of_roots)`.
    pub fn revocation_status(&self, roots: &[Fr], nonce: Fr) -> Result<RevocationStatus> {
        let issuer = IdentityState::from_roots(roots)?;
        let mtp = prove(&self.store, &issuer.revocation_root, &nonce, self.max_depth)?;
        Ok(RevocationStatus { issuer, mtp })
    }

    /// Resolve the status of `nonce` from a bare state hash whose preimage
    /// was published to this registry.
    pub fn revocation_status_by_state(&self, state: &Fr, nonce: Fr) -> Result<RevocationStatus> {
        match self.store.get(state)? {
            Preimage::Three(roots) => self.revocation_status(&roots, nonce),
            Preimage::Two(_) => Err(Error::InvalidRootsLength {
                expected: 3,
                actual: 2,
            }),
        }
    }
}
