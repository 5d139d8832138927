//! iNaturalist observations API client

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use shared::{DateRange, GeoPoint, ObservationRecord, SpeciesRef};

use super::fetch::{fetch_json, FetchError, FetchPolicy};
use super::ObservationProvider;

/// iNaturalist API client
#[derive(Clone)]
pub struct INaturalistClient {
    client: Client,
    base_url: String,
    per_page: u32,
    policy: FetchPolicy,
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    #[serde(default)]
    results: Vec<INatObservation>,
}

#[derive(Debug, Deserialize)]
struct INatObservation {
    observed_on: Option<String>,
    #[serde(default)]
    quality_grade: String,
    taxon: Option<INatTaxon>,
    /// `"lat,lng"`, absent for obscured observations
    location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct INatTaxon {
    id: i64,
    name: String,
    preferred_common_name: Option<String>,
    default_photo: Option<INatPhoto>,
}

#[derive(Debug, Deserialize)]
struct INatPhoto {
    medium_url: Option<String>,
}

impl INaturalistClient {
    pub fn new(client: Client, base_url: String, per_page: u32, policy: FetchPolicy) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            per_page,
            policy,
        }
    }

    /// Confidence attached to an observation by its community quality grade
    fn grade_confidence(quality_grade: &str) -> f64 {
        match quality_grade {
            "research" => 0.9,
            "needs_id" => 0.6,
            _ => 0.3,
        }
    }

    fn convert_observation(obs: INatObservation) -> Option<ObservationRecord> {
        let date = NaiveDate::parse_from_str(obs.observed_on.as_deref()?, "%Y-%m-%d").ok()?;
        let species = obs.taxon.map(|taxon| SpeciesRef {
            id: taxon.id,
            name: taxon.name,
            common_name: taxon.preferred_common_name,
            photo_url: taxon.default_photo.and_then(|p| p.medium_url),
        });

        Some(ObservationRecord {
            date,
            species,
            confidence: Self::grade_confidence(&obs.quality_grade),
            flowering: None,
            point: obs.location.as_deref().and_then(parse_location),
        })
    }
}

fn parse_location(location: &str) -> Option<GeoPoint> {
    let (lat, lng) = location.split_once(',')?;
    Some(GeoPoint::new(lat.trim().parse().ok()?, lng.trim().parse().ok()?))
}

#[async_trait]
impl ObservationProvider for INaturalistClient {
    async fn observations(
        &self,
        location: &GeoPoint,
        radius_km: f64,
        range: &DateRange,
    ) -> Result<Vec<ObservationRecord>, FetchError> {
        let url = format!(
            "{}/v1/observations?lat={}&lng={}&radius={}&d1={}&d2={}\
             &per_page={}&order_by=observed_on",
            self.base_url,
            location.latitude,
            location.longitude,
            radius_km,
            range.start,
            range.end,
            self.per_page
        );

        let data: ObservationsResponse =
            fetch_json(&self.client, "iNaturalist", &url, &self.policy).await?;

        Ok(data
            .results
            .into_iter()
            .filter_map(Self::convert_observation)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_grade_confidence() {
        assert_eq!(INaturalistClient::grade_confidence("research"), 0.9);
        assert_eq!(INaturalistClient::grade_confidence("needs_id"), 0.6);
        assert_eq!(INaturalistClient::grade_confidence("casual"), 0.3);
    }

    #[tokio::test]
    async fn test_converts_observations() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/observations"))
            .and(query_param("radius", "10"))
            .and(query_param("d1", "2024-04-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_results": 3,
                "results": [
                    {
                        "observed_on": "2024-04-03",
                        "quality_grade": "research",
                        "location": "35.0116,135.7681",
                        "taxon": {
                            "id": 47125,
                            "name": "Prunus serrulata",
                            "preferred_common_name": "Japanese Cherry",
                            "default_photo": {"medium_url": "https://example.org/cherry.jpg"}
                        }
                    },
                    {"observed_on": null, "quality_grade": "casual", "taxon": null},
                    {"observed_on": "2024-04-05", "quality_grade": "needs_id", "taxon": null}
                ]
            })))
            .mount(&server)
            .await;

        let client =
            INaturalistClient::new(Client::new(), server.uri(), 50, FetchPolicy::new(5, 1, 1));
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
        );
        let records = client
            .observations(&GeoPoint::new(35.0, 135.0), 10.0, &range)
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        let cherry = records[0].species.as_ref().unwrap();
        assert_eq!(cherry.common_name.as_deref(), Some("Japanese Cherry"));
        assert_eq!(cherry.photo_url.as_deref(), Some("https://example.org/cherry.jpg"));
        assert_eq!(records[0].confidence, 0.9);
        assert_eq!(records[0].point, Some(GeoPoint::new(35.0116, 135.7681)));
        assert!(records[1].species.is_none());
        assert!(records[1].point.is_none());
    }
}
