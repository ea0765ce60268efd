//! The inference boundary: an upright image goes in, one probability per breed comes out.

use std::path::Path;

use image::imageops::FilterType;
use image::DynamicImage;
use tract_onnx::prelude::*;

use crate::{dc_err, dc_try, error::ClassifierError};

pub trait Classifier {
    /// Breed names, in the order the model reports probabilities
    fn vocab(&self) -> &[String];

    /// Returns one probability per entry of [`Classifier::vocab`], summing to roughly 1.
    fn predict(&self, image: &DynamicImage) -> Result<Vec<f32>, ClassifierError>;
}

/// Side of the square input the ResNet-50 model was trained on
pub const INPUT_SIZE: u32 = 224;

// ImageNet statistics, which the pretrained backbone expects inputs normalized with
const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// ONNX export of the breed classifier, run on the CPU with `tract`.
pub struct OnnxClassifier {
    model: TypedRunnableModel<TypedModel>,
    vocab: Vec<String>,
}

impl OnnxClassifier {
    pub fn load(model_path: &Path, labels_path: &Path) -> Result<Self, ClassifierError> {
        let labels = std::fs::read_to_string(labels_path).map_err(|error| {
            dc_err!("unable to read labels '{}': {error}", labels_path.display())
        })?;
        let vocab = parse_labels(&labels);
        if vocab.is_empty() {
            return Err(dc_err!("no labels in '{}'", labels_path.display()));
        }

        let model = dc_try!(tract_onnx::onnx().model_for_path(model_path));
        let classifier = Self::from_model(model, vocab)?;
        tracing::debug!(
            "loaded {} with {} labels",
            model_path.display(),
            classifier.vocab.len()
        );
        Ok(classifier)
    }

    /// Fixes the input to a single NCHW image of [`INPUT_SIZE`] and optimizes the graph for it.
    pub fn from_model(model: InferenceModel, vocab: Vec<String>) -> Result<Self, ClassifierError> {
        let side = INPUT_SIZE as usize;
        let model = dc_try!(model
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, 3, side, side)),
            )
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable()));
        Ok(Self { model, vocab })
    }
}

impl Classifier for OnnxClassifier {
    fn vocab(&self) -> &[String] {
        &self.vocab
    }

    fn predict(&self, image: &DynamicImage) -> Result<Vec<f32>, ClassifierError> {
        let input = preprocess(image);
        let outputs = dc_try!(self.model.run(tvec!(input.into_tensor().into())));
        let output = outputs
            .first()
            .ok_or_else(|| dc_err!("model produced no outputs"))?;
        let scores: Vec<f32> = dc_try!(output.to_array_view::<f32>())
            .iter()
            .copied()
            .collect();
        if scores.len() != self.vocab.len() {
            return Err(dc_err!(
                "model produced {} scores for {} labels",
                scores.len(),
                self.vocab.len()
            ));
        }
        Ok(to_probabilities(scores))
    }
}

/// One label per line; surrounding whitespace and blank lines are ignored.
pub fn parse_labels(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Squashes the image to the model's input size and lays it out as a normalized NCHW tensor.
pub fn preprocess(image: &DynamicImage) -> tract_ndarray::Array4<f32> {
    let side = INPUT_SIZE as usize;
    let rgb = image
        .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle)
        .to_rgb8();
    tract_ndarray::Array4::from_shape_fn((1, 3, side, side), |(_, channel, y, x)| {
        let value = rgb.get_pixel(x as u32, y as u32)[channel] as f32 / 255.0;
        (value - MEAN[channel]) / STD[channel]
    })
}

/// Models exported with their softmax layer already produce probabilities; raw logits are softmaxed here.
pub fn to_probabilities(scores: Vec<f32>) -> Vec<f32> {
    let sum: f32 = scores.iter().sum();
    let in_range = scores.iter().all(|score| (0.0..=1.0).contains(score));
    if in_range && (sum - 1.0).abs() <= 1e-3 {
        return scores;
    }

    // subtract the maximum so that exp() cannot overflow
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|score| (score - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
