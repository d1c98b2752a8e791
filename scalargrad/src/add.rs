use crate::{function::Function, node::Node, value::Value};

#[derive(Debug, Clone)]
pub(crate) struct Add {
    pub(crate) left: Value,
    pub(crate) right: Value,
}

impl Add {
    pub(crate) fn apply(self) -> Value {
        let data = self.forward();
        Value::from_op(data, Node::Add { inner: self })
    }
}

impl Function for Add {
    fn forward(&self) -> f64 {
        self.left.data() + self.right.data()
    }

    fn backward(&self, grad_output: f64) {
        self.left.accumulate_grad(grad_output);
        self.right.accumulate_grad(grad_output);
    }
}

#[cfg(test)]
mod tests {
    use crate::value::Value;

    #[test]
    fn test_add_forward() {
        let a = Value::from(2.0);
        let b = Value::from(3.0);
        let c = &a + &b;
        assert_eq!(c.data(), 5.0);
        assert_eq!(c.op(), "+");
    }

    #[test]
    fn test_add_backward() {
        let a = Value::from(2.0);
        let b = Value::from(3.0);
        let c = &a + &b;
        c.backward();
        assert_eq!(a.grad(), 1.0);
        assert_eq!(b.grad(), 1.0);
        assert_eq!(c.grad(), 1.0);
    }

    #[test]
    fn test_add_same_operand_twice() {
        // y = x + x must accumulate both contributions into the one node.
        let x = Value::from(3.0);
        let y = &x + &x;
        assert_eq!(y.data(), 6.0);
        y.backward();
        assert_eq!(x.grad(), 2.0);
    }
}
