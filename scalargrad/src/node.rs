use crate::{add::Add, mul::Mul, pow::Pow, relu::ReLU, value::Value};

/// Provenance of a value: which primitive produced it, together with the
/// operand handles needed to push gradient back through it. Dispatch during
/// the backward pass happens on this tag.
#[derive(Debug, Clone)]
pub(crate) enum Node {
    Leaf,
    Add { inner: Add },
    Mul { inner: Mul },
    Pow { inner: Pow },
    ReLU { inner: ReLU },
}

impl Node {
    pub(crate) fn tag(&self) -> &'static str {
        match self {
            Node::Leaf => "leaf",
            Node::Add { .. } => "+",
            Node::Mul { .. } => "*",
            Node::Pow { .. } => "pow",
            Node::ReLU { .. } => "relu",
        }
    }

    pub(crate) fn operands(&self) -> Vec<Value> {
        match self {
            Node::Leaf => vec![],
            Node::Add { inner } => vec![inner.left.clone(), inner.right.clone()],
            Node::Mul { inner } => vec![inner.left.clone(), inner.right.clone()],
            Node::Pow { inner } => vec![inner.left.clone()],
            Node::ReLU { inner } => vec![inner.left.clone()],
        }
    }
}
