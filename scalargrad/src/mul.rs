use crate::{function::Function, node::Node, value::Value};

#[derive(Debug, Clone)]
pub(crate) struct Mul {
    pub(crate) left: Value,
    pub(crate) right: Value,
}

impl Mul {
    pub(crate) fn apply(self) -> Value {
        let data = self.forward();
        Value::from_op(data, Node::Mul { inner: self })
    }
}

impl Function for Mul {
    fn forward(&self) -> f64 {
        self.left.data() * self.right.data()
    }

    fn backward(&self, grad_output: f64) {
        let (a, b) = (self.left.data(), self.right.data());
        self.left.accumulate_grad(grad_output * b);
        self.right.accumulate_grad(grad_output * a);
    }
}
