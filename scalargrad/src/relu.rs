use crate::{function::Function, node::Node, value::Value};

#[derive(Debug, Clone)]
pub(crate) struct ReLU {
    pub(crate) left: Value,
}

impl ReLU {
    pub(crate) fn apply(self) -> Value {
        let data = self.forward();
        Value::from_op(data, Node::ReLU { inner: self })
    }
}

impl Function for ReLU {
    fn forward(&self) -> f64 {
        self.left.data().max(0.0)
    }

    fn backward(&self, grad_output: f64) {
        // Gradient gated on the operand's data, zero at and below the kink.
        if self.left.data() > 0.0 {
            self.left.accumulate_grad(grad_output);
        }
    }
}
