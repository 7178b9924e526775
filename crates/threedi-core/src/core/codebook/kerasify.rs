//! Reader for networks exported with Kerasify.
//!
//! The format is a flat little-endian stream: a `u32` layer count followed by
//! one record per layer. Only the layer kinds needed by a dense feed-forward
//! encoder are supported.

use super::error::KerasifyError;
use super::network::{Activation, DenseLayer, EmbeddingNetwork, Layer};
use std::io::Read;

const LAYER_DENSE: u32 = 1;
const LAYER_ACTIVATION: u32 = 5;

// Guards against allocating from a corrupt header.
const MAX_LAYER_ELEMENTS: usize = 1 << 24;

fn read_u32(reader: &mut impl Read) -> Result<u32, KerasifyError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_f32s(reader: &mut impl Read, count: usize) -> Result<Vec<f64>, KerasifyError> {
    let mut buf = [0u8; 4];
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        reader.read_exact(&mut buf)?;
        values.push(f32::from_le_bytes(buf) as f64);
    }
    Ok(values)
}

fn read_activation(reader: &mut impl Read, index: usize) -> Result<Activation, KerasifyError> {
    let code = read_u32(reader)?;
    Activation::from_kerasify_code(code).ok_or(KerasifyError::UnknownActivation { index, code })
}

/// Decodes the raw layer records of a Kerasify stream.
pub fn read_layers(reader: &mut impl Read) -> Result<Vec<Layer>, KerasifyError> {
    let count = read_u32(reader)? as usize;
    if count == 0 {
        return Err(KerasifyError::Empty);
    }

    let mut layers = Vec::with_capacity(count.min(64));
    for index in 0..count {
        match read_u32(reader)? {
            LAYER_DENSE => {
                let rows = read_u32(reader)? as usize;
                let cols = read_u32(reader)? as usize;
                let bias_len = read_u32(reader)? as usize;
                if rows == 0 || cols == 0 || rows.saturating_mul(cols) > MAX_LAYER_ELEMENTS {
                    return Err(KerasifyError::ImplausibleShape { index, rows, cols });
                }
                if bias_len != cols {
                    return Err(KerasifyError::BiasMismatch {
                        index,
                        declared: bias_len,
                        outputs: cols,
                    });
                }
                let weights = read_f32s(reader, rows * cols)?;
                let biases = read_f32s(reader, bias_len)?;
                let activation = read_activation(reader, index)?;
                layers.push(Layer::Dense(DenseLayer::from_flat(
                    rows, cols, weights, biases, activation,
                )));
            }
            LAYER_ACTIVATION => {
                layers.push(Layer::Activation(read_activation(reader, index)?));
            }
            code => return Err(KerasifyError::UnsupportedLayer { index, code }),
        }
    }
    Ok(layers)
}

impl EmbeddingNetwork {
    /// Reads a network from a Kerasify stream.
    pub fn from_kerasify(reader: &mut impl Read) -> Result<Self, KerasifyError> {
        let layers = read_layers(reader)?;
        Self::new(layers).map_err(|e| KerasifyError::Inconsistent(e.to_string()))
    }
}
