//! Semantic similarity between resume and job description

use crate::config::Config;
use crate::error::{Result, ScorerError};
use crate::processing::document::NormalizedText;
use async_trait::async_trait;
use log::{debug, info};
use model2vec_rs::model::StaticModel;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Embeds two texts and compares them, returning a score in [-1, 1].
///
/// Implementations are injected into the engine and shared between
/// requests, so they must tolerate concurrent calls.
#[async_trait]
pub trait SimilarityProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn similarity(&self, resume: &NormalizedText, job: &NormalizedText) -> Result<f32>;
}

/// Similarity of two normalized texts, or `None` when either is empty and
/// there is nothing to compare. Provider output is returned unscaled.
pub async fn score_similarity(
    resume: &NormalizedText,
    job: &NormalizedText,
    provider: &dyn SimilarityProvider,
) -> Result<Option<f32>> {
    if resume.is_empty() || job.is_empty() {
        return Ok(None);
    }

    provider
        .similarity(resume, job)
        .await
        .map(Some)
        .map_err(|e| match e {
            ScorerError::ProviderFailure(_) => e,
            other => ScorerError::ProviderFailure(other.to_string()),
        })
}

/// Cosine similarity between two embeddings
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(ScorerError::ProviderFailure(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    if a.is_empty() {
        return Ok(0.0);
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot_product / (norm_a * norm_b))
    }
}

/// Static Model2Vec embeddings compared by cosine similarity.
///
/// The model is immutable once loaded; encoding runs on the blocking pool
/// and concurrent calls share the same weights.
pub struct Model2VecProvider {
    model: Arc<StaticModel>,
    model_name: String,
    resume_prefix: String,
    job_prefix: String,
}

impl Model2VecProvider {
    /// Load from a local model folder or a HuggingFace repo id
    pub fn load(model_path: &Path, model_name: &str) -> Result<Self> {
        let start_time = Instant::now();
        info!("Loading Model2Vec embedding model from: {}", model_path.display());

        let model = StaticModel::from_pretrained(
            model_path,
            None, // token
            None, // normalize
            None, // subfolder
        )
        .map_err(|e| ScorerError::ProviderFailure(format!("Failed to load model: {}", e)))?;

        info!("Model loaded in {:.2?}", start_time.elapsed());

        Ok(Self {
            model: Arc::new(model),
            model_name: model_name.to_string(),
            resume_prefix: String::new(),
            job_prefix: String::new(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = Self::load(&config.similarity_model_path(), &config.similarity.model)?;
        Ok(provider.with_prefixes(&config.similarity.resume_prefix, &config.similarity.job_prefix))
    }

    pub fn with_prefixes(mut self, resume_prefix: &str, job_prefix: &str) -> Self {
        self.resume_prefix = resume_prefix.to_string();
        self.job_prefix = job_prefix.to_string();
        self
    }
}

#[async_trait]
impl SimilarityProvider for Model2VecProvider {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn similarity(&self, resume: &NormalizedText, job: &NormalizedText) -> Result<f32> {
        let model = Arc::clone(&self.model);
        let texts = vec![
            resume.with_prefix(&self.resume_prefix),
            job.with_prefix(&self.job_prefix),
        ];

        let start_time = Instant::now();
        let embeddings = tokio::task::spawn_blocking(move || model.encode(&texts))
            .await
            .map_err(|e| ScorerError::ProviderFailure(format!("Embedding task failed: {}", e)))?;
        debug!("Encoded resume and job in {:.2?}", start_time.elapsed());

        match embeddings.as_slice() {
            [resume_embedding, job_embedding] => cosine_similarity(resume_embedding, job_embedding),
            other => Err(ScorerError::ProviderFailure(format!(
                "Expected 2 embeddings, model returned {}",
                other.len()
            ))),
        }
    }
}
