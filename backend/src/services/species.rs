//! Featured species enrichment

use std::sync::Arc;

use shared::{GeoPoint, SpeciesHighlight, SpeciesSummary};

use crate::external::SpeciesDescriber;

const SPECIES_DETAILS_UNAVAILABLE: &str = "Species details unavailable";
const REGIONAL_COMMON_NAME: &str = "Regional Flowering Plants";
const REGIONAL_FALLBACK_COMMON_NAME: &str = "Regional Plants";
const REGIONAL_FALLBACK_DETAILS: &str = "Various flowering plants native to this region";

/// Picks and describes the species shown on the insights card
#[derive(Clone)]
pub struct SpeciesService {
    describer: Arc<dyn SpeciesDescriber>,
}

impl SpeciesService {
    pub fn new(describer: Arc<dyn SpeciesDescriber>) -> Self {
        Self { describer }
    }

    /// Describe the most observed species, or the region in general when
    /// nothing was observed. Never fails; description errors become
    /// placeholder text.
    pub async fn featured(
        &self,
        top_species: &[SpeciesSummary],
        point: &GeoPoint,
    ) -> SpeciesHighlight {
        match top_species.first() {
            Some(summary) => {
                let details = match self.describer.describe_species(&summary.common_name).await {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::warn!(
                            "Species description failed for {}: {}",
                            summary.common_name,
                            e
                        );
                        SPECIES_DETAILS_UNAVAILABLE.to_string()
                    }
                };
                SpeciesHighlight::from_summary(summary, details)
            }
            None => match self.describer.describe_region(point).await {
                Ok(text) => SpeciesHighlight::regional(REGIONAL_COMMON_NAME, text),
                Err(e) => {
                    tracing::warn!("Regional flora description failed: {}", e);
                    SpeciesHighlight::regional(
                        REGIONAL_FALLBACK_COMMON_NAME,
                        REGIONAL_FALLBACK_DETAILS.to_string(),
                    )
                }
            },
        }
    }
}
