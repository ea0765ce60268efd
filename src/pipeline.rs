use crate::{
    classifier::Classifier,
    error::ClassifierError,
    orientation::{normalize, Normalized},
    rank::{top_n, Prediction},
};

#[derive(Debug, Clone)]
pub struct Classification {
    pub image: Normalized,
    pub predictions: Vec<Prediction>,
}

/// Upload bytes to the `n` most likely breeds: normalize orientation, run the model, rank.
pub fn classify_bytes(
    bytes: &[u8],
    classifier: &dyn Classifier,
    n: usize,
) -> Result<Classification, ClassifierError> {
    let image = normalize(bytes)?;
    if image.rotation.degrees() != 0 {
        tracing::info!(
            "Rotating image {} degrees (you're probably on iOS)...",
            image.rotation.degrees()
        );
    }
    let probabilities = classifier.predict(&image.image.pixels)?;
    let predictions = top_n(classifier.vocab(), &probabilities, n)?;
    Ok(Classification { image, predictions })
}
