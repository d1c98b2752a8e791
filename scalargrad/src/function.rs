pub(crate) trait Function {
    ///Computes the operation's result from its operands' data.
    fn forward(&self) -> f64;
    ///Adds the local partial derivative, scaled by the upstream gradient,
    ///into each operand's accumulated gradient.
    fn backward(&self, grad_output: f64);
}
