use crate::{fr::Fr, traits::Hasher};
use serde::{Deserialize, Serialize};

/// A node of the tree, reconstructed from its stored preimage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Node {
    Empty,
    Leaf { key: Fr, value: Fr },
    Middle { left: Fr, right: Fr },
}

impl Node {
    /// Canonical hashing rule.
    ///
    /// The literal `1` in the leaf preimage is a domain tag keeping leaves
    /// apart from other 3-ary-hashed objects.
    pub fn hash<H: Hasher>(&self) -> Fr {
        match self {
            Node::Empty => Fr::zero(),
            Node::Leaf { key, value } => H::hash3(key, value, &Fr::one()),
            Node::Middle { left, right } => H::hash2(left, right),
        }
    }
}

/// What the store persists: the node's constituent field elements, untagged.
///
/// Arity is the only role marker. A 2-element preimage reads back as a middle
/// node and a 3-element one as a leaf, which lets leaves and state tuples
/// share one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Preimage {
    Two([Fr; 2]),
    Three([Fr; 3]),
}

impl Preimage {
    pub fn leaf(key: Fr, value: Fr) -> Preimage {
        Preimage::Three([key, value, Fr::one()])
    }

    pub fn middle(left: Fr, right: Fr) -> Preimage {
        Preimage::Two([left, right])
    }

    pub fn arity(&self) -> usize {
        match self {
            Preimage::Two(_) => 2,
            Preimage::Three(_) => 3,
        }
    }

    pub fn hash<H: Hasher>(&self) -> Fr {
        match self {
            Preimage::Two([left, right]) => H::hash2(left, right),
            Preimage::Three([a, b, c]) => H::hash3(a, b, c),
        }
    }
}

impl From<Preimage> for Node {
    fn from(preimage: Preimage) -> Node {
        match preimage {
            Preimage::Two([left, right]) => Node::Middle { left, right },
            // the third element is the leaf domain tag, dropped on decode
            Preimage::Three([key, value, _]) => Node::Leaf { key, value },
        }
    }
}
