use std::{cell::RefCell, rc::Rc};

use num_traits::Inv;

use crate::add::Add;
use crate::backward::backward;
use crate::mul::Mul;
use crate::node::Node;
use crate::pow::Pow;
use crate::relu::ReLU;
use crate::Cell;

/// A scalar in the expression graph.
///
/// `Value` is a shared handle: cloning it yields another handle to the same
/// node, so an expression that uses a value twice references one node, not
/// two copies. `data` is fixed at construction; `grad` starts at 0.0 and is
/// only ever added to by backward passes, until a caller resets it with
/// [`Value::zero_grad`].
///
/// Arithmetic never signals errors: division by zero and similar edge cases
/// produce IEEE-754 infinities or NaNs that flow through `data` and `grad`
/// like any other number. Callers that need validation should check
/// `is_finite` on the results themselves.
#[derive(Clone)]
pub struct Value(pub(crate) Cell<RawValue>);

#[derive(Debug)]
pub(crate) struct RawValue {
    pub(crate) data: f64,
    pub(crate) grad: f64,
    pub(crate) node: Node,
}

impl Value {
    pub fn from(data: f64) -> Self {
        Value(Rc::new(RefCell::new(RawValue {
            data,
            grad: 0.0,
            node: Node::Leaf,
        })))
    }

    pub(crate) fn from_op(data: f64, node: Node) -> Self {
        Value(Rc::new(RefCell::new(RawValue {
            data,
            grad: 0.0,
            node,
        })))
    }

    pub fn data(&self) -> f64 {
        self.0.borrow().data
    }

    pub fn grad(&self) -> f64 {
        self.0.borrow().grad
    }

    /// Name of the primitive that produced this value, `"leaf"` for inputs.
    pub fn op(&self) -> &'static str {
        self.0.borrow().node.tag()
    }

    /// Resets this node's gradient to 0.0. Consumers that reuse a graph's
    /// leaves across backward passes call this between passes; nothing does
    /// it automatically.
    pub fn zero_grad(&self) {
        self.0.borrow_mut().grad = 0.0;
    }

    pub(crate) fn accumulate_grad(&self, grad: f64) {
        self.0.borrow_mut().grad += grad;
    }

    pub(crate) fn set_grad(&self, grad: f64) {
        self.0.borrow_mut().grad = grad;
    }

    pub(crate) fn operands(&self) -> Vec<Value> {
        self.0.borrow().node.operands()
    }

    pub fn relu(&self) -> Value {
        let relu = ReLU { left: self.clone() };
        relu.apply()
    }

    /// Raises to a constant exponent. Only constant exponents exist; an
    /// exponent that should itself carry gradient has no representation
    /// here.
    pub fn powf(&self, n: f64) -> Value {
        let pow = Pow {
            left: self.clone(),
            n,
        };
        pow.apply()
    }

    pub fn square(&self) -> Value {
        self.powf(2.0)
    }

    /// Fills in `grad` for every value this one was computed from. See
    /// [`backward::backward`](crate::backward::backward).
    pub fn backward(&self) {
        backward(self)
    }

    /// Descends `data` along the stored gradient. An optimizer convenience
    /// for consumers that treat this value as a trainable parameter; the
    /// engine itself never moves `data`.
    pub fn grad_step(&self, k: f64) {
        let mut raw = self.0.borrow_mut();
        raw.data -= k * raw.grad;
    }
}

// Node identity, not numeric equality: two handles are equal when they
// point at the same node.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Value {}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.0).hash(state);
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let raw = self.0.borrow();
        f.debug_struct("Value")
            .field("data", &raw.data)
            .field("grad", &raw.grad)
            .field("op", &raw.node.tag())
            .finish()
    }
}

impl std::ops::Add for Value {
    type Output = Value;

    fn add(self, rhs: Self) -> Self::Output {
        let add = Add {
            left: self,
            right: rhs,
        };
        add.apply()
    }
}

impl std::ops::Add for &Value {
    type Output = Value;

    fn add(self, rhs: Self) -> Self::Output {
        let add = Add {
            left: self.clone(),
            right: rhs.clone(),
        };
        add.apply()
    }
}

impl std::ops::Add<&Value> for Value {
    type Output = Value;

    fn add(self, rhs: &Value) -> Self::Output {
        let add = Add {
            left: self,
            right: rhs.clone(),
        };
        add.apply()
    }
}

impl std::ops::Add<f64> for Value {
    type Output = Value;

    fn add(self, rhs: f64) -> Self::Output {
        self + Value::from(rhs)
    }
}

impl std::ops::Add<f64> for &Value {
    type Output = Value;

    fn add(self, rhs: f64) -> Self::Output {
        self + &Value::from(rhs)
    }
}

impl std::ops::Add<Value> for f64 {
    type Output = Value;

    fn add(self, rhs: Value) -> Self::Output {
        Value::from(self) + rhs
    }
}

impl std::ops::Mul for Value {
    type Output = Value;

    fn mul(self, rhs: Self) -> Self::Output {
        let mul = Mul {
            left: self,
            right: rhs,
        };
        mul.apply()
    }
}

impl std::ops::Mul for &Value {
    type Output = Value;

    fn mul(self, rhs: Self) -> Self::Output {
        let mul = Mul {
            left: self.clone(),
            right: rhs.clone(),
        };
        mul.apply()
    }
}

impl std::ops::Mul<&Value> for Value {
    type Output = Value;

    fn mul(self, rhs: &Value) -> Self::Output {
        let mul = Mul {
            left: self,
            right: rhs.clone(),
        };
        mul.apply()
    }
}

impl std::ops::Mul<f64> for Value {
    type Output = Value;

    fn mul(self, rhs: f64) -> Self::Output {
        self * Value::from(rhs)
    }
}

impl std::ops::Mul<f64> for &Value {
    type Output = Value;

    fn mul(self, rhs: f64) -> Self::Output {
        self * &Value::from(rhs)
    }
}

impl std::ops::Mul<Value> for f64 {
    type Output = Value;

    fn mul(self, rhs: Value) -> Self::Output {
        rhs * self
    }
}

// Negation is multiplication by a -1.0 leaf; it carries no rule of its own.
impl std::ops::Neg for Value {
    type Output = Value;

    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

impl std::ops::Neg for &Value {
    type Output = Value;

    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

impl std::ops::Sub for Value {
    type Output = Value;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl std::ops::Sub for &Value {
    type Output = Value;

    fn sub(self, rhs: Self) -> Self::Output {
        self + &(-rhs)
    }
}

impl std::ops::Sub<f64> for Value {
    type Output = Value;

    fn sub(self, rhs: f64) -> Self::Output {
        self + Value::from(-rhs)
    }
}

impl std::ops::Sub<Value> for f64 {
    type Output = Value;

    fn sub(self, rhs: Value) -> Self::Output {
        Value::from(self) + (-rhs)
    }
}

// a / b is a * b^-1, so a zero divisor yields an infinite or NaN result
// rather than a fault.
impl std::ops::Div for Value {
    type Output = Value;

    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.powf(-1.0)
    }
}

impl std::ops::Div for &Value {
    type Output = Value;

    fn div(self, rhs: Self) -> Self::Output {
        self * &rhs.powf(-1.0)
    }
}

impl std::ops::Div<f64> for Value {
    type Output = Value;

    fn div(self, rhs: f64) -> Self::Output {
        self * rhs.inv()
    }
}

impl std::ops::Div<Value> for f64 {
    type Output = Value;

    fn div(self, rhs: Value) -> Self::Output {
        Value::from(self) * rhs.powf(-1.0)
    }
}
