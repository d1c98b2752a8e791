use std::{cell::RefCell, collections::HashSet, rc::Rc};

use crate::function::Function;
use crate::node::Node;
use crate::value::{RawValue, Value};

/// Fills in `grad` for every value reachable from `output` through operand
/// edges, leaving `output.grad` at 1.0 and each ancestor's `grad` holding
/// d(output)/d(ancestor), summed over every path that reaches it.
///
/// Values are collected depth-first, operands before the value that uses
/// them, each at most once. Replaying that sequence in reverse means a
/// value's gradient is complete before its own rule fires, which is what
/// makes diamond-shaped sharing come out right.
pub fn backward(output: &Value) {
    let mut topo = Vec::new();
    let mut visited = HashSet::new();
    build_topo(output, &mut visited, &mut topo);

    output.set_grad(1.0);
    for value in topo.iter().rev() {
        let grad_output = value.grad();
        let raw = value.0.borrow();
        match &raw.node {
            Node::Leaf => {}
            Node::Add { inner } => inner.backward(grad_output),
            Node::Mul { inner } => inner.backward(grad_output),
            Node::Pow { inner } => inner.backward(grad_output),
            Node::ReLU { inner } => inner.backward(grad_output),
        }
    }
}

fn build_topo(
    value: &Value,
    visited: &mut HashSet<*const RefCell<RawValue>>,
    topo: &mut Vec<Value>,
) {
    if !visited.insert(Rc::as_ptr(&value.0)) {
        return;
    }
    for operand in value.operands() {
        build_topo(&operand, visited, topo);
    }
    topo.push(value.clone());
}

#[cfg(test)]
mod tests {
    use all_asserts::assert_near;
    use rand::{distributions::Uniform, rngs::StdRng, Rng, SeedableRng};

    use crate::value::Value;

    #[test]
    fn test_backward_on_a_leaf() {
        let a = Value::from(7.0);
        a.backward();
        assert_eq!(a.grad(), 1.0);
        assert_eq!(a.data(), 7.0);
    }

    #[test]
    fn test_shared_chain_doubles_at_each_level() {
        let x = Value::from(1.0);
        let y = &x + &x;
        let z = &y + &y;
        z.backward();
        assert_eq!(y.grad(), 2.0);
        assert_eq!(x.grad(), 4.0);
    }

    #[test]
    fn test_repeated_backward_accumulates() {
        let x = Value::from(3.0);
        let y = &x + &x;
        y.backward();
        assert_eq!(x.grad(), 2.0);
        // A second pass without zero_grad adds on top of the first.
        y.backward();
        assert_eq!(x.grad(), 4.0);
        x.zero_grad();
        y.zero_grad();
        y.backward();
        assert_eq!(x.grad(), 2.0);
    }

    #[test]
    fn test_unreached_nodes_keep_zero_grad() {
        let a = Value::from(2.0);
        let b = Value::from(3.0);
        let c = &a * 5.0;
        let _unrelated = &b * 7.0;
        c.backward();
        assert_eq!(a.grad(), 5.0);
        assert_eq!(b.grad(), 0.0);
    }

    // The expression under test. Operand ranges below keep the relu inputs
    // away from the kink and the divisor away from zero, so central
    // differences are well behaved.
    fn build(leaves: &[Value; 4]) -> Value {
        let [a, b, c, d] = leaves;
        let num = (a * b + c).relu() + (a - d).powf(3.0);
        let den = b * b + 1.5;
        num / den + (-d).relu() + a.square() * 0.5
    }

    #[test]
    fn test_gradients_match_finite_differences() {
        let mut rng = StdRng::seed_from_u64(0xACC);
        let dist = Uniform::new(0.5, 1.5);
        let eps = 1e-6;
        for _ in 0..100 {
            let data: [f64; 4] = [
                rng.sample(dist),
                rng.sample(dist),
                rng.sample(dist),
                rng.sample(dist),
            ];
            let leaves = data.map(Value::from);
            let out = build(&leaves);
            out.backward();

            for i in 0..4 {
                let mut lo = data;
                let mut hi = data;
                lo[i] -= eps;
                hi[i] += eps;
                let f_lo = build(&lo.map(Value::from)).data();
                let f_hi = build(&hi.map(Value::from)).data();
                let numeric = (f_hi - f_lo) / (2.0 * eps);
                assert_near!(leaves[i].grad(), numeric, 1e-5);
            }
        }
    }
}
