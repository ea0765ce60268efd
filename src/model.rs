//! Where the model comes from and the process-wide handle to it.

use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

use crate::{
    classifier::OnnxClassifier, dc_err, download::download_file, error::ClassifierError,
};

/// Repository the model, its labels and the example breed photos are published in
pub const REPO_URL: &str = "https://github.com/willjobs/dog-classifier/raw/main";
pub const MODEL_FILE: &str = "dogs_online_resnet50_cpu.onnx";
pub const LABELS_FILE: &str = "dogs_online_resnet50_cpu.labels.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSource {
    pub model_url: String,
    pub labels_url: String,
    /// Downloaded artifacts are stored here under the last segment of their URL
    pub cache_dir: PathBuf,
}

impl Default for ModelSource {
    fn default() -> Self {
        Self {
            model_url: format!("{REPO_URL}/models/{MODEL_FILE}"),
            labels_url: format!("{REPO_URL}/models/{LABELS_FILE}"),
            cache_dir: PathBuf::from("."),
        }
    }
}

/// The cache is keyed only by file name, so the name has to be a plain path segment.
pub fn local_path(url: &str, cache_dir: &Path) -> Result<PathBuf, ClassifierError> {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let filename = without_query.rsplit('/').next().unwrap_or_default();
    if filename.is_empty() || filename == "." || filename == ".." || filename.contains('\\') {
        return Err(dc_err!("cannot derive a file name from '{url}'"));
    }
    Ok(cache_dir.join(filename))
}

/// Returns the local copy of `url`, downloading it first if it isn't on disk yet.
pub fn ensure_local(url: &str, cache_dir: &Path) -> Result<PathBuf, ClassifierError> {
    let path = local_path(url, cache_dir)?;
    if path.is_file() {
        tracing::debug!("using cached {}", path.display());
    } else {
        download_file(url, &path)?;
    }
    Ok(path)
}

static CLASSIFIER: OnceLock<OnnxClassifier> = OnceLock::new();

/// The classifier shared by the whole process.
///
/// The first call downloads whatever is missing and loads the model; every later call
/// returns that same instance, whatever `source` it is given. It is never reloaded.
pub fn classifier(source: &ModelSource) -> Result<&'static OnnxClassifier, ClassifierError> {
    if let Some(classifier) = CLASSIFIER.get() {
        return Ok(classifier);
    }
    let model_path = ensure_local(&source.model_url, &source.cache_dir)?;
    let labels_path = ensure_local(&source.labels_url, &source.cache_dir)?;
    let loaded = OnnxClassifier::load(&model_path, &labels_path)?;
    Ok(CLASSIFIER.get_or_init(|| loaded))
}
