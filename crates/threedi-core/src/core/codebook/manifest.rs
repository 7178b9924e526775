use super::alphabet::Alphabet;
use super::error::CodebookError;
use super::network::{Activation, DenseLayer, EmbeddingNetwork, Layer};
use super::{Codebook, Normalization};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayerSpec {
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
    #[serde(default)]
    activation: Activation,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct CodebookManifest {
    version: Option<String>,
    alphabet: String,
    unknown: char,
    centroids: Vec<Vec<f64>>,
    normalization: Option<Normalization>,
    weights: Option<PathBuf>,
    #[serde(default)]
    layers: Vec<LayerSpec>,
}

impl Codebook {
    /// Loads a codebook from a TOML manifest.
    ///
    /// A relative `weights` path is resolved against the manifest's directory.
    ///
    /// # Errors
    ///
    /// Any I/O, parse or validation problem is returned as a [`CodebookError`];
    /// there is no partially loaded codebook.
    pub fn load(path: &Path) -> Result<Self, CodebookError> {
        debug!("Loading codebook manifest from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CodebookError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_manifest_str(&content, path.parent(), &path.to_string_lossy())
    }

    /// Parses a manifest held in memory. `base_dir` anchors a relative weights path.
    pub fn from_toml_str(content: &str, base_dir: Option<&Path>) -> Result<Self, CodebookError> {
        Self::from_manifest_str(content, base_dir, "<memory>")
    }

    fn from_manifest_str(
        content: &str,
        base_dir: Option<&Path>,
        origin: &str,
    ) -> Result<Self, CodebookError> {
        let manifest: CodebookManifest =
            toml::from_str(content).map_err(|e| CodebookError::Toml {
                path: origin.to_string(),
                source: e,
            })?;

        let network = match (&manifest.weights, manifest.layers.is_empty()) {
            (Some(weights), true) => {
                let weights_path = match base_dir {
                    Some(dir) if weights.is_relative() => dir.join(weights),
                    _ => weights.clone(),
                };
                load_weights(&weights_path)?
            }
            (None, false) => build_inline_network(manifest.layers)?,
            (Some(_), false) => return Err(CodebookError::WeightsSource("both")),
            (None, true) => return Err(CodebookError::WeightsSource("neither")),
        };

        let alphabet = Alphabet::new(&manifest.alphabet, manifest.unknown)?;
        let codebook = Codebook::new(
            alphabet,
            manifest.normalization.unwrap_or_default(),
            network,
            manifest.centroids,
        )?;
        Ok(match manifest.version {
            Some(version) => codebook.with_version(version),
            None => codebook,
        })
    }
}

fn load_weights(path: &Path) -> Result<EmbeddingNetwork, CodebookError> {
    debug!("Reading network weights from {:?}", path);
    let file = File::open(path).map_err(|e| CodebookError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    let mut reader = BufReader::new(file);
    EmbeddingNetwork::from_kerasify(&mut reader).map_err(|e| CodebookError::Kerasify {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

fn build_inline_network(specs: Vec<LayerSpec>) -> Result<EmbeddingNetwork, CodebookError> {
    let layers = specs
        .into_iter()
        .map(|spec| DenseLayer::new(spec.weights, spec.biases, spec.activation).map(Layer::Dense))
        .collect::<Result<Vec<_>, _>>()?;
    EmbeddingNetwork::new(layers)
}
