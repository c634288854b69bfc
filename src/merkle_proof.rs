use crate::{fr::Fr, node::Node, traits::Hasher};
use serde::{Deserialize, Serialize};

/// `fnc` value of an inclusion proof.
pub const FNC_INCLUSION: u8 = 0;
/// `fnc` value of a non-inclusion proof.
pub const FNC_NON_INCLUSION: u8 = 1;

/// Merkle tree proof of inclusion or non-inclusion of a key.
///
/// `siblings` always has exactly `max_depth` entries, zero-padded past the
/// levels actually used, so the proof shape is fixed regardless of how full
/// the tree is. A non-inclusion proof ends either at an empty slot
/// (`is_old0`, with `old_key`/`old_value` zero) or at an auxiliary leaf that
/// shares the key's path prefix; in the latter case `value` carries the
/// auxiliary leaf's value, matching the on-chain wire behavior.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MerkleProof {
    pub root: Fr,
    pub siblings: Vec<Fr>,
    pub old_key: Fr,
    pub old_value: Fr,
    pub is_old0: bool,
    pub key: Fr,
    pub value: Fr,
    pub fnc: u8,
}

impl MerkleProof {
    #[inline(always)]
    pub fn existence(&self) -> bool {
        self.fnc == FNC_INCLUSION
    }

    // Levels actually used by the path; everything past the deepest non-zero
    // sibling is padding. The leaf's direct sibling is never zero in a tree
    // built through `add`, so this is exact.
    fn path_len(&self) -> usize {
        self.siblings
            .iter()
            .rposition(|s| !s.is_zero())
            .map_or(0, |i| i + 1)
    }

    /// Recompute the root this proof commits to.
    pub fn compute_root<H: Hasher>(&self) -> Fr {
        let terminal = if self.existence() {
            Node::Leaf {
                key: self.key,
                value: self.value,
            }
        } else if self.is_old0 {
            Node::Empty
        } else {
            Node::Leaf {
                key: self.old_key,
                value: self.old_value,
            }
        };

        let mut acc = terminal.hash::<H>();
        for depth in (0..self.path_len()).rev() {
            let sibling = self.siblings[depth];
            acc = if self.key.bit(depth) {
                Node::Middle {
                    left: sibling,
                    right: acc,
                }
            } else {
                Node::Middle {
                    left: acc,
                    right: sibling,
                }
            }
            .hash::<H>();
        }
        acc
    }

    /// Check the proof against its own `root`.
    pub fn verify<H: Hasher>(&self) -> bool {
        if !self.existence() && !self.is_old0 && self.old_key == self.key {
            return false;
        }
        self.compute_root::<H>() == self.root
    }
}
