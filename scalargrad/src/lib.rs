mod add;
mod function;
mod mul;
mod node;
mod pow;
mod relu;
pub mod backward;
pub mod value;

use std::{cell::RefCell, rc::Rc};

pub(crate) type Cell<T> = Rc<RefCell<T>>;

pub use value::Value;
