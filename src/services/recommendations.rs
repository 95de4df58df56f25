use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;

use crate::{
    error::AppResult,
    models::{CatalogToken, PreferenceRequest, Recommendation},
    services::{
        catalog::CatalogProvider, interpreter::ResponseInterpreter, llm::LlmClient,
        prompt::build_prompt,
    },
};

/// Upper bound on catalog searches in flight for one request
pub const MAX_CONCURRENT_LOOKUPS: usize = 8;

/// Runs the recommendation pipeline for one request
///
/// prompt → LLM → interpreter → catalog enrichment. Only an LLM failure is
/// surfaced as an error; unusable model output and catalog problems degrade
/// to the fallback list and unenriched entries respectively.
#[derive(Clone)]
pub struct RecommendationService {
    llm: Arc<dyn LlmClient>,
    catalog: Arc<dyn CatalogProvider>,
    interpreter: Arc<dyn ResponseInterpreter>,
}

impl RecommendationService {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        catalog: Arc<dyn CatalogProvider>,
        interpreter: Arc<dyn ResponseInterpreter>,
    ) -> Self {
        Self {
            llm,
            catalog,
            interpreter,
        }
    }

    pub async fn recommend(&self, preferences: &PreferenceRequest) -> AppResult<Vec<Recommendation>> {
        let start = Instant::now();

        let prompt = build_prompt(preferences);
        let raw = self.llm.complete(&prompt).await?;
        let recommendations = self.interpreter.interpret(&raw);

        tracing::info!(
            count = recommendations.len(),
            llm = self.llm.name(),
            "Interpreted model output"
        );

        let token = self.catalog.authenticate().await;
        let enriched = self.enrich(recommendations, token).await;

        tracing::info!(
            count = enriched.len(),
            enriched = enriched.iter().filter(|r| r.is_enriched()).count(),
            processing_time_ms = start.elapsed().as_millis(),
            "Recommendations ready"
        );

        Ok(enriched)
    }

    /// Looks up every recommendation in the catalog, one task per entry
    ///
    /// At most `MAX_CONCURRENT_LOOKUPS` searches run at once. Results are
    /// merged back by index so the output order always matches the input,
    /// whatever order lookups complete in. Entries whose lookup finds nothing
    /// (or whose task fails) are returned unchanged.
    pub async fn enrich(
        &self,
        mut recommendations: Vec<Recommendation>,
        token: Option<CatalogToken>,
    ) -> Vec<Recommendation> {
        let Some(token) = token else {
            return recommendations;
        };

        let permits = Arc::new(Semaphore::new(MAX_CONCURRENT_LOOKUPS));
        let tasks: Vec<_> = recommendations
            .iter()
            .map(|rec| {
                let catalog = Arc::clone(&self.catalog);
                let permits = Arc::clone(&permits);
                let token = token.clone();
                let song = rec.song.clone();
                let artist = rec.artist.clone();
                tokio::spawn(async move {
                    let _permit = permits.acquire_owned().await.ok()?;
                    catalog.lookup(&song, &artist, Some(&token)).await
                })
            })
            .collect();

        for (rec, task) in recommendations.iter_mut().zip(tasks) {
            match task.await {
                Ok(Some(track)) => rec.apply_match(track),
                Ok(None) => {
                    tracing::debug!(
                        artist = %rec.artist,
                        song = %rec.song,
                        catalog = self.catalog.name(),
                        "No catalog match"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        artist = %rec.artist,
                        song = %rec.song,
                        "Catalog lookup task failed"
                    );
                }
            }
        }

        recommendations
    }
}
