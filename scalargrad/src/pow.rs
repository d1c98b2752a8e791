use crate::{function::Function, node::Node, value::Value};

/// Raises a value to a constant exponent. The exponent is a plain `f64`, not
/// a graph node, so no gradient flows into it.
#[derive(Debug, Clone)]
pub(crate) struct Pow {
    pub(crate) left: Value,
    pub(crate) n: f64,
}

impl Pow {
    pub(crate) fn apply(self) -> Value {
        let data = self.forward();
        Value::from_op(data, Node::Pow { inner: self })
    }
}

impl Function for Pow {
    fn forward(&self) -> f64 {
        self.left.data().powf(self.n)
    }

    fn backward(&self, grad_output: f64) {
        let a = self.left.data();
        self.left.accumulate_grad(grad_output * self.n * a.powf(self.n - 1.0));
    }
}

#[cfg(test)]
mod tests {
    use all_asserts::assert_near;

    use crate::value::Value;

    #[test]
    fn test_pow_forward() {
        let a = Value::from(2.0);
        let b = a.powf(3.0);
        assert_eq!(b.data(), 8.0);
        assert_eq!(b.op(), "pow");
    }

    #[test]
    fn test_pow_backward() {
        // d/dx x^3 = 3x^2 = 12 at x = 2.
        let a = Value::from(2.0);
        let b = a.powf(3.0);
        b.backward();
        assert_near!(a.grad(), 12.0, 1e-12);
    }

    #[test]
    fn test_pow_negative_exponent() {
        // d/dx x^-1 = -x^-2 = -0.25 at x = 2.
        let a = Value::from(2.0);
        let b = a.powf(-1.0);
        assert_near!(b.data(), 0.5, 1e-12);
        b.backward();
        assert_near!(a.grad(), -0.25, 1e-12);
    }

    #[test]
    fn test_square() {
        let a = Value::from(3.0);
        let b = a.square();
        assert_eq!(b.data(), 9.0);
        b.backward();
        assert_near!(a.grad(), 6.0, 1e-12);
    }
}
