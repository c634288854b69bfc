use crate::{fr::Fr, traits::Hasher};

/// Blake3 reduced into the field.
///
/// A fast, non-circuit instantiation: arity is written first as a domain tag,
/// then the big-endian element bytes, and the digest is reduced modulo the
/// field order. Proofs built with it are not consumable by Poseidon-based
/// circuits; use [`crate::poseidon_hasher::PoseidonHasher`] for those.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

impl Blake3Hasher {
    fn hash_elems(elems: &[&Fr]) -> Fr {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&[elems.len() as u8]);
        for e in elems {
            hasher.update(&e.to_be_bytes());
        }
        let mut digest = [0u8; 32];
        digest.copy_from_slice(hasher.finalize().as_bytes());
        Fr::from_be_bytes_mod(digest)
    }
}

impl Hasher for Blake3Hasher {
    #[inline(always)]
    fn hash2(l: &Fr, r: &Fr) -> Fr {
        Self::hash_elems(&[l, r])
    }

    #[inline(always)]
    fn hash3(a: &Fr, b: &Fr, c: &Fr) -> Fr {
        Self::hash_elems(&[a, b, c])
    }
}
