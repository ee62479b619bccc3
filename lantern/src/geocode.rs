use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::GeocoderConfig;
use crate::error::{LanternError, Result};
use crate::geo::GeoPoint;

/// Forward geocoder (Geoapify-compatible GeoJSON API). Used by news
/// ingestion for items that arrive with a place name but no coordinates.
#[derive(Clone, Debug)]
pub struct GeocodeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodeFeature {
    properties: GeocodeProperties,
}

#[derive(Debug, Deserialize)]
struct GeocodeProperties {
    lat: f64,
    lon: f64,
}

impl GeocodeClient {
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                LanternError::Geocode(format!("Failed to create geocoder HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        })
    }

    /// Resolve a place name to coordinates. `Ok(None)` means the geocoder
    /// answered but knows no such place.
    pub async fn geocode(&self, location_name: &str) -> Result<Option<GeoPoint>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("text", location_name),
                ("limit", "1"),
                ("format", "geojson"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(LanternError::Geocode(format!(
                "Geocoder returned status {status} for '{location_name}'"
            )));
        }

        let parsed: GeocodeResponse = response.json().await?;
        Ok(parsed
            .features
            .first()
            .map(|f| GeoPoint::new(f.properties.lat, f.properties.lon)))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(base_url: String) -> GeocodeClient {
        GeocodeClient::new(&GeocoderConfig {
            api_key: "test-key".to_string(),
            base_url,
            timeout_secs: 5,
        })
        .expect("failed to create test geocode client")
    }

    #[tokio::test]
    async fn geocode_returns_first_feature() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/geocode/search"))
            .and(query_param("text", "Berlin"))
            .and(query_param("apiKey", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "features": [
                    { "properties": { "lat": 52.52, "lon": 13.405, "formatted": "Berlin, Germany" } }
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(format!("{}/v1/geocode/search", server.uri()));
        let point = client.geocode("Berlin").await.unwrap().unwrap();
        assert_eq!(point.latitude, 52.52);
        assert_eq!(point.longitude, 13.405);
    }

    #[tokio::test]
    async fn geocode_empty_features_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let point = client.geocode("Nowhereville").await.unwrap();
        assert!(point.is_none());
    }

    #[tokio::test]
    async fn geocode_upstream_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let result = client.geocode("Berlin").await;
        assert!(matches!(result, Err(LanternError::Geocode(_))));
    }
}
