use serde::{Deserialize, Serialize};
use std::fmt;

pub use pt11::U256;

/// Order of the BN254 scalar field; every `Fr` is strictly below it.
pub const MODULUS: U256 = U256([
    0x43e1_f593_f000_0001,
    0x2833_e848_79b9_7091,
    0xb850_45b6_8181_585d,
    0x3064_4e72_e131_a029,
]);

/// Field element, the uniform key / value / hash domain of the tree.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct Fr(U256);

impl Fr {
    #[inline(always)]
    pub fn zero() -> Fr {
        Fr(U256::zero())
    }

    #[inline(always)]
    pub fn one() -> Fr {
        Fr(U256::one())
    }

    /// `None` when `n` is not below the field order.
    pub fn new(n: U256) -> Option<Fr> {
        (n < MODULUS).then_some(Fr(n))
    }

    /// Reduce an arbitrary 256-bit integer into the field.
    pub fn from_mod(n: U256) -> Fr {
        Fr(n % MODULUS)
    }

    pub fn from_be_bytes_mod(bytes: [u8; 32]) -> Fr {
        Fr::from_mod(U256::from_big_endian(&bytes))
    }

    pub fn from_dec_str(s: &str) -> Option<Fr> {
        U256::from_dec_str(s).ok().and_then(Fr::new)
    }

    #[inline(always)]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Bit `i` of the key path, LSB first: bit 0 selects the child of the root.
    #[inline(always)]
    pub fn bit(&self, i: usize) -> bool {
        self.0.bit(i)
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        self.0.to_big_endian(&mut bytes);
        bytes
    }

    #[inline(always)]
    pub fn into_inner(self) -> U256 {
        self.0
    }
}

impl Default for Fr {
    #[inline(always)]
    fn default() -> Self {
        Fr::zero()
    }
}

impl From<u64> for Fr {
    fn from(n: u64) -> Fr {
        Fr(U256::from(n))
    }
}

/// Interop with the older `primitive-types` line, reduced into the field.
impl From<pt10::U256> for Fr {
    fn from(n: pt10::U256) -> Fr {
        Fr::from_mod(U256(n.0))
    }
}

impl fmt::Display for Fr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Fr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fr({})", self.0)
    }
}
