use crate::{fr::Fr, traits::Hasher};
use ark_bn254::Fr as ArkFr;
use ark_ff::{BigInteger, PrimeField};
use light_poseidon::{Poseidon, PoseidonHasher as _};

/// Circom-parameter Poseidon over the BN254 scalar field.
///
/// Matches the hash used by the deployed identity circuits, so commitments
/// and proofs interoperate with them value-for-value.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseidonHasher;

impl PoseidonHasher {
    fn hash_elems(elems: &[&Fr]) -> Fr {
        let inputs: Vec<ArkFr> = elems
            .iter()
            .map(|e| ArkFr::from_be_bytes_mod_order(&e.to_be_bytes()))
            .collect();
        // arities 2 and 3 always have circom parameters
        let mut poseidon = Poseidon::<ArkFr>::new_circom(inputs.len()).expect("circom parameters");
        let digest = poseidon.hash(&inputs).expect("input count matches arity");

        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest.into_bigint().to_bytes_be());
        Fr::from_be_bytes_mod(bytes)
    }
}

impl Hasher for PoseidonHasher {
    #[inline(always)]
    fn hash2(l: &Fr, r: &Fr) -> Fr {
        Self::hash_elems(&[l, r])
    }

    #[inline(always)]
    fn hash3(a: &Fr, b: &Fr, c: &Fr) -> Fr {
        Self::hash_elems(&[a, b, c])
    }
}
