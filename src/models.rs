use crate::core::activations::softmax;
use crate::core::layers::{Dense, DenseCache};
use crate::prelude::*;
use log::info;
use rand::Rng;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// A chain of [`Dense`] layers trained one example at a time with plain
/// stochastic gradient descent.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Dense>,
    learning_rate: f64,
}

/// On-disk model record: layer sizes, per-layer parameters, learning rate.
#[derive(Serialize, Deserialize, Debug)]
struct NetworkRecord {
    layer_sizes: Vec<usize>,
    weights: Vec<Array2<f64>>,
    biases: Vec<Array1<f64>>,
    learning_rate: f64,
}

impl Network {
    /// Builds `layer_sizes.len() - 1` layers; adjacent sizes are each
    /// layer's input and output widths.
    pub fn new<R: Rng + ?Sized>(
        layer_sizes: &[usize],
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<Self> {
        if layer_sizes.len() < 2 {
            return Err(NNError::InvalidNetworkConfiguration(
                "network needs at least an input and an output size".to_string(),
            ));
        }
        let mut layers = Vec::with_capacity(layer_sizes.len() - 1);
        for pair in layer_sizes.windows(2) {
            layers.push(Dense::new(pair[0], pair[1], rng)?);
        }
        Ok(Self {
            layers,
            learning_rate,
        })
    }

    fn forward(&self, input: &Array1<f64>) -> Result<(Array1<f64>, Vec<DenseCache>)> {
        let mut caches = Vec::with_capacity(self.layers.len());
        let mut activation = input.clone();
        for layer in &self.layers {
            let (next, cache) = layer.forward(&activation)?;
            caches.push(cache);
            activation = next;
        }
        Ok((activation, caches))
    }

    /// Class distribution for `input`: softmax over the last layer's
    /// activations. The last layer's ReLU is not bypassed, so the
    /// normalized values come from already-clamped activations.
    pub fn predict(&self, input: &Array1<f64>) -> Result<Array1<f64>> {
        let (output, _) = self.forward(input)?;
        Ok(softmax(&output))
    }

    /// One gradient-descent step on a single example. `target` is expected
    /// to be a one-hot encoding of the true class.
    pub fn train(&mut self, input: &Array1<f64>, target: &Array1<f64>) -> Result<()> {
        let (output, caches) = self.forward(input)?;
        if target.len() != output.len() {
            return Err(NNError::DimensionMismatch(format!(
                "expected target of length {}, got {}",
                output.len(),
                target.len()
            )));
        }
        // The error is seeded from the raw post-ReLU output, not from the
        // softmax distribution predict returns.
        let mut error = &output - target;
        for (layer, cache) in self.layers.iter_mut().zip(caches.iter()).rev() {
            error = layer.backward(cache, &error, self.learning_rate)?;
        }
        Ok(())
    }

    pub fn layers(&self) -> &[Dense] {
        &self.layers
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// The construction-time size list: input width followed by every
    /// layer's output width.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![self.layers[0].input_size];
        sizes.extend(self.layers.iter().map(|layer| layer.output_size));
        sizes
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let record = NetworkRecord {
            layer_sizes: self.layer_sizes(),
            weights: self.layers.iter().map(|layer| layer.w.clone()).collect(),
            biases: self.layers.iter().map(|layer| layer.b.clone()).collect(),
            learning_rate: self.learning_rate,
        };
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &record)?;
        info!("model saved to {}", path.display());
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Network> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let record: NetworkRecord = serde_json::from_reader(BufReader::new(file))?;
        let NetworkRecord {
            layer_sizes,
            weights,
            biases,
            learning_rate,
        } = record;
        if layer_sizes.len() < 2
            || weights.len() != layer_sizes.len() - 1
            || biases.len() != weights.len()
        {
            return Err(NNError::ModelLoadError(format!(
                "record with {} layer sizes, {} weight matrices and {} bias vectors is inconsistent",
                layer_sizes.len(),
                weights.len(),
                biases.len()
            )));
        }
        let mut layers = Vec::with_capacity(weights.len());
        for (i, (w, b)) in weights.into_iter().zip(biases).enumerate() {
            let (input_size, output_size) = (layer_sizes[i], layer_sizes[i + 1]);
            if w.dim() != (output_size, input_size) || b.len() != output_size {
                return Err(NNError::ModelLoadError(format!(
                    "layer {} parameters have shape {:?}/{}, record declares {}x{}",
                    i,
                    w.dim(),
                    b.len(),
                    output_size,
                    input_size
                )));
            }
            layers.push(Dense {
                input_size,
                output_size,
                w,
                b,
            });
        }
        info!("model loaded from {}", path.display());
        Ok(Network {
            layers,
            learning_rate,
        })
    }
}

/// Number of persisted model snapshots in `dir`; 0 if the directory does
/// not exist yet.
pub fn saved_model_count<P: AsRef<Path>>(dir: P) -> usize {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().map_or(false, |ext| ext == "json"))
            .count(),
        Err(_) => 0,
    }
}
