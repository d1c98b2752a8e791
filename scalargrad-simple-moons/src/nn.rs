use rand::{distributions::Uniform, Rng};
use scalargrad::Value;

/// Anything holding trainable values.
pub trait Module {
    fn parameters(&self) -> Vec<Value>;

    fn zero_grad(&self) {
        for p in self.parameters() {
            p.zero_grad();
        }
    }
}

/// One unit: dot(weights, inputs) + bias, optionally through ReLU.
pub struct Neuron {
    weights: Vec<Value>,
    bias: Value,
    nonlin: bool,
}

impl Neuron {
    /// Weights start uniform in (-1, 1) from the caller's generator, the
    /// bias at zero. Passing the generator in keeps initialization
    /// reproducible from a seed.
    pub fn new<R: Rng>(rng: &mut R, nin: usize, nonlin: bool) -> Self {
        let dist = Uniform::new(-1.0, 1.0);
        Neuron {
            weights: (0..nin).map(|_| Value::from(rng.sample(dist))).collect(),
            bias: Value::from(0.0),
            nonlin,
        }
    }

    pub fn forward(&self, inputs: &[Value]) -> Value {
        let mut act = self.bias.clone();
        for (w, x) in self.weights.iter().zip(inputs) {
            act = act + w * x;
        }
        if self.nonlin {
            act.relu()
        } else {
            act
        }
    }
}

impl Module for Neuron {
    fn parameters(&self) -> Vec<Value> {
        let mut params = self.weights.clone();
        params.push(self.bias.clone());
        params
    }
}

pub struct Layer {
    neurons: Vec<Neuron>,
}

impl Layer {
    pub fn new<R: Rng>(rng: &mut R, nin: usize, nout: usize, nonlin: bool) -> Self {
        Layer {
            neurons: (0..nout).map(|_| Neuron::new(rng, nin, nonlin)).collect(),
        }
    }

    pub fn forward(&self, inputs: &[Value]) -> Vec<Value> {
        self.neurons.iter().map(|n| n.forward(inputs)).collect()
    }
}

impl Module for Layer {
    fn parameters(&self) -> Vec<Value> {
        self.neurons.iter().flat_map(|n| n.parameters()).collect()
    }
}

/// Fully connected stack. `sizes` gives the width of every layer including
/// the input, e.g. `[2, 16, 16, 1]`; all layers but the last are ReLU.
pub struct Mlp {
    layers: Vec<Layer>,
}

impl Mlp {
    pub fn new<R: Rng>(rng: &mut R, sizes: &[usize]) -> Self {
        let last = sizes.len() - 2;
        Mlp {
            layers: sizes
                .windows(2)
                .enumerate()
                .map(|(i, w)| Layer::new(rng, w[0], w[1], i != last))
                .collect(),
        }
    }

    pub fn forward(&self, inputs: &[Value]) -> Vec<Value> {
        let mut activations = inputs.to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }
        activations
    }
}

impl Module for Mlp {
    fn parameters(&self) -> Vec<Value> {
        self.layers.iter().flat_map(|l| l.parameters()).collect()
    }
}
