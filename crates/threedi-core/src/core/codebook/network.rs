use super::error::CodebookError;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Softplus,
    Sigmoid,
    Tanh,
    HardSigmoid,
}

impl Activation {
    /// Decodes the activation identifiers used by the Kerasify format.
    pub fn from_kerasify_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Activation::Linear),
            2 => Some(Activation::Relu),
            3 => Some(Activation::Softplus),
            4 => Some(Activation::Sigmoid),
            5 => Some(Activation::Tanh),
            6 => Some(Activation::HardSigmoid),
            _ => None,
        }
    }

    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Linear => x,
            Activation::Relu => x.max(0.0),
            Activation::Softplus => x.exp().ln_1p(),
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Tanh => x.tanh(),
            Activation::HardSigmoid => (0.2 * x + 0.5).clamp(0.0, 1.0),
        }
    }
}

/// A fully connected layer computing `activation(x · W + b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer {
    inputs: usize,
    outputs: usize,
    weights: Vec<f64>, // input-major: weights[i * outputs + o]
    biases: Vec<f64>,
    activation: Activation,
}

impl DenseLayer {
    /// Builds a layer from an input-major weight matrix (`weights[input][output]`).
    pub fn new(
        weights: Vec<Vec<f64>>,
        biases: Vec<f64>,
        activation: Activation,
    ) -> Result<Self, CodebookError> {
        let inputs = weights.len();
        let outputs = biases.len();
        if inputs == 0 || outputs == 0 {
            return Err(CodebookError::InvalidNetwork(
                "dense layer must have at least one input and one output".to_string(),
            ));
        }
        if let Some(row) = weights.iter().position(|row| row.len() != outputs) {
            return Err(CodebookError::InvalidNetwork(format!(
                "weight row {} has {} columns, expected {}",
                row,
                weights[row].len(),
                outputs
            )));
        }
        Ok(Self::from_flat(
            inputs,
            outputs,
            weights.into_iter().flatten().collect(),
            biases,
            activation,
        ))
    }

    pub(crate) fn from_flat(
        inputs: usize,
        outputs: usize,
        weights: Vec<f64>,
        biases: Vec<f64>,
        activation: Activation,
    ) -> Self {
        debug_assert_eq!(weights.len(), inputs * outputs);
        debug_assert_eq!(biases.len(), outputs);
        Self {
            inputs,
            outputs,
            weights,
            biases,
            activation,
        }
    }

    pub fn inputs(&self) -> usize {
        self.inputs
    }

    pub fn outputs(&self) -> usize {
        self.outputs
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut out = self.biases.clone();
        for (i, &x) in input.iter().enumerate() {
            let row = &self.weights[i * self.outputs..(i + 1) * self.outputs];
            for (acc, &w) in out.iter_mut().zip(row) {
                *acc += x * w;
            }
        }
        for v in &mut out {
            *v = self.activation.apply(*v);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Dense(DenseLayer),
    /// Standalone activation applied element-wise to the previous output.
    Activation(Activation),
}

/// The fixed feed-forward network mapping descriptors to the embedding space.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingNetwork {
    layers: Vec<Layer>,
    input_dim: usize,
    output_dim: usize,
}

impl EmbeddingNetwork {
    /// Assembles a network, checking that consecutive dense layers agree in width.
    ///
    /// # Errors
    ///
    /// Returns [`CodebookError::InvalidNetwork`] if there is no dense layer or
    /// if the output width of one dense layer differs from the input width of
    /// the next.
    pub fn new(layers: Vec<Layer>) -> Result<Self, CodebookError> {
        let mut input_dim = None;
        let mut width: Option<usize> = None;
        for (index, layer) in layers.iter().enumerate() {
            if let Layer::Dense(dense) = layer {
                match width {
                    None => input_dim = Some(dense.inputs),
                    Some(w) if w != dense.inputs => {
                        return Err(CodebookError::InvalidNetwork(format!(
                            "layer {} expects {} inputs but receives {}",
                            index, dense.inputs, w
                        )));
                    }
                    Some(_) => {}
                }
                width = Some(dense.outputs);
            }
        }
        match (input_dim, width) {
            (Some(input_dim), Some(output_dim)) => Ok(Self {
                layers,
                input_dim,
                output_dim,
            }),
            _ => Err(CodebookError::InvalidNetwork(
                "network has no dense layer".to_string(),
            )),
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    /// Runs the network on one input vector of length [`Self::input_dim`].
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        debug_assert_eq!(input.len(), self.input_dim);
        let mut x = input.to_vec();
        for layer in &self.layers {
            match layer {
                Layer::Dense(dense) => x = dense.forward(&x),
                Layer::Activation(activation) => {
                    for v in &mut x {
                        *v = activation.apply(*v);
                    }
                }
            }
        }
        x
    }
}
