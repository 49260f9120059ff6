use crate::models::{Offering, ServiceType};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when querying the hosted catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API key or project")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Hosted catalog API client
///
/// Reads package documents from the backend's document API. The catalog is
/// queried by service type only; budget and ranking are applied by the
/// matcher so the service-type-only set is available for the fallback path.
pub struct CatalogClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    collection_id: String,
    page_size: usize,
    client: Client,
}

impl CatalogClient {
    /// Create a new catalog client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collection_id: String,
        page_size: usize,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            collection_id,
            page_size,
            client,
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collection_id
        )
    }

    /// Build the query array for a service type
    ///
    /// Every alias the matcher accepts is requested, so documents stored
    /// under "DJ" are fetched for DJ Services. Labels are JSON-encoded.
    fn build_queries(&self, service_type: &ServiceType) -> Result<String, CatalogError> {
        let labels = serde_json::to_string(&service_type.aliases())
            .map_err(|e| CatalogError::InvalidResponse(format!("Failed to encode query: {}", e)))?;

        let queries = vec![
            format!("equal(\"serviceType\", {})", labels),
            format!("limit({})", self.page_size),
        ];

        serde_json::to_string(&queries)
            .map_err(|e| CatalogError::InvalidResponse(format!("Failed to encode query: {}", e)))
    }

    /// Query offerings for a service type, in catalog order
    pub async fn query_offerings(
        &self,
        service_type: &ServiceType,
    ) -> Result<Vec<Offering>, CatalogError> {
        let full_url = format!(
            "{}?query={}",
            self.documents_url(),
            urlencoding::encode(&self.build_queries(service_type)?)
        );

        tracing::debug!("Querying catalog for {} packages", service_type);

        let response = self
            .client
            .get(&full_url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(CatalogError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Catalog query for {} failed: {} - {}", service_type, status, body);
            return Err(CatalogError::ApiError(format!(
                "Failed to query offerings: {}",
                status
            )));
        }

        let json: Value = response.json().await?;
        let offerings = parse_documents(&json)?;

        if let Some(missing) = unfetched_count(&json) {
            tracing::warn!(
                "Catalog holds {} more {} packages than one page of {} returned",
                missing,
                service_type,
                self.page_size
            );
        }

        tracing::debug!("Queried {} {} packages from catalog", offerings.len(), service_type);

        Ok(offerings)
    }
}

/// Documents the backend reports in `total` but did not return
fn unfetched_count(json: &Value) -> Option<u64> {
    let total = json.get("total").and_then(|t| t.as_u64())?;
    let returned = json.get("documents").and_then(|d| d.as_array())?.len() as u64;

    (total > returned).then(|| total - returned)
}

/// Extract offerings from a document list response
///
/// Documents that do not parse as offerings, or that carry a non-positive
/// duration, are skipped.
fn parse_documents(json: &Value) -> Result<Vec<Offering>, CatalogError> {
    let documents = json
        .get("documents")
        .and_then(|d| d.as_array())
        .ok_or_else(|| CatalogError::InvalidResponse("Missing documents array".into()))?;

    let offerings = documents
        .iter()
        .filter_map(|doc| {
            let data = doc.get("data").unwrap_or(doc);
            match serde_json::from_value::<Offering>(data.clone()) {
                Ok(offering) if has_valid_duration(&offering) => Some(offering),
                Ok(offering) => {
                    tracing::warn!(
                        "Skipping catalog package {} with non-positive duration {:?}",
                        offering.id,
                        offering.duration_hours
                    );
                    None
                }
                Err(e) => {
                    tracing::warn!(
                        "Skipping malformed catalog document {:?}: {}",
                        doc.get("$id").or_else(|| doc.get("id")),
                        e
                    );
                    None
                }
            }
        })
        .collect();

    Ok(offerings)
}

#[inline]
fn has_valid_duration(offering: &Offering) -> bool {
    offering
        .duration_hours
        .map_or(true, |hours| hours.is_finite() && hours > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_client(base_url: String) -> CatalogClient {
        CatalogClient::new(
            base_url,
            "test_key".to_string(),
            "test_project".to_string(),
            "test_db".to_string(),
            "packages".to_string(),
            100,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_catalog_client_creation() {
        let client = create_client("https://catalog.test/v1/".to_string());

        assert_eq!(
            client.documents_url(),
            "https://catalog.test/v1/databases/test_db/collections/packages/documents"
        );
        assert_eq!(client.api_key, "test_key");
    }

    #[test]
    fn test_parse_documents_skips_malformed() {
        let body = json!({
            "total": 3,
            "documents": [
                {"$id": "a", "id": "a", "serviceType": "Photography", "priceCents": 100000},
                {"$id": "b", "serviceType": "Photography"},
                {"data": {"id": "c", "serviceType": "DJ", "priceCents": 50000, "durationHours": 4}}
            ]
        });

        let offerings = parse_documents(&body).unwrap();

        assert_eq!(offerings.len(), 2);
        assert_eq!(offerings[0].id, "a");
        assert_eq!(offerings[1].service_type, ServiceType::DjServices);
        assert_eq!(offerings[1].duration_hours, Some(4.0));
    }

    #[test]
    fn test_parse_documents_requires_array() {
        let result = parse_documents(&json!({"total": 0}));
        assert!(matches!(result, Err(CatalogError::InvalidResponse(_))));
    }

    fn service_type_filter(queries_json: &str) -> Vec<String> {
        let queries: Vec<String> = serde_json::from_str(queries_json).unwrap();
        let labels = queries[0]
            .strip_prefix("equal(\"serviceType\", ")
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap();
        serde_json::from_str(labels).unwrap()
    }

    #[test]
    fn test_queries_request_every_alias() {
        let client = create_client("https://catalog.test/v1".to_string());

        let queries = client.build_queries(&ServiceType::from("DJ")).unwrap();
        let labels = service_type_filter(&queries);

        assert_eq!(labels, ServiceType::DjServices.aliases());
        assert!(labels.contains(&"DJ".to_string()));
        assert!(labels.contains(&"DJ Services".to_string()));
    }

    #[test]
    fn test_queries_escape_quotes_in_custom_label() {
        let client = create_client("https://catalog.test/v1".to_string());
        let label = "Foo\", \"Bar";

        let queries = client.build_queries(&ServiceType::from(label)).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&queries).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1], "limit(100)");
        assert_eq!(service_type_filter(&queries), vec![label.to_string()]);
    }

    #[test]
    fn test_parse_documents_skips_non_positive_duration() {
        let body = json!({
            "documents": [
                {"id": "zero", "serviceType": "DJ", "priceCents": 1000, "durationHours": 0},
                {"id": "negative", "serviceType": "DJ", "priceCents": 1000, "durationHours": -2.5},
                {"id": "flat", "serviceType": "DJ", "priceCents": 1000},
                {"id": "ok", "serviceType": "DJ", "priceCents": 1000, "durationHours": 0.5}
            ]
        });

        let offerings = parse_documents(&body).unwrap();
        let ids: Vec<&str> = offerings.iter().map(|o| o.id.as_str()).collect();

        assert_eq!(ids, vec!["flat", "ok"]);
    }

    #[test]
    fn test_unfetched_count() {
        let partial = json!({"total": 750, "documents": [{"id": "a"}, {"id": "b"}]});
        let complete = json!({"total": 2, "documents": [{"id": "a"}, {"id": "b"}]});
        let no_total = json!({"documents": []});

        assert_eq!(unfetched_count(&partial), Some(748));
        assert_eq!(unfetched_count(&complete), None);
        assert_eq!(unfetched_count(&no_total), None);
    }

    #[tokio::test]
    async fn test_query_offerings_sends_alias_labels() {
        let mut server = mockito::Server::new_async().await;
        let expected = r#"["equal(\"serviceType\", [\"DJ Services\",\"DJ\",\"DJ Service\",\"dj services\",\"dj\",\"dj service\"])","limit(100)"]"#;
        let mock = server
            .mock("GET", "/databases/test_db/collections/packages/documents")
            .match_query(mockito::Matcher::UrlEncoded("query".into(), expected.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "total": 2,
                    "documents": [
                        {"id": "d1", "serviceType": "DJ", "priceCents": 90000, "durationHours": 4},
                        {"id": "d2", "serviceType": "DJ Services", "priceCents": 120000, "durationHours": 5}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = create_client(server.url());
        let offerings = client.query_offerings(&ServiceType::DjServices).await.unwrap();

        mock.assert_async().await;
        assert_eq!(offerings.len(), 2);
        assert!(offerings.iter().all(|o| o.service_type == ServiceType::DjServices));
    }

    #[tokio::test]
    async fn test_query_offerings() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/databases/test_db/collections/packages/documents")
            .match_query(mockito::Matcher::Any)
            .match_header("X-Appwrite-Project", "test_project")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "total": 2,
                    "documents": [
                        {"id": "p1", "serviceType": "Photography", "priceCents": 150000, "durationHours": 6},
                        {"id": "p2", "serviceType": "Photography", "priceCents": 300000, "durationHours": 8}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = create_client(server.url());
        let offerings = client.query_offerings(&ServiceType::Photography).await.unwrap();

        mock.assert_async().await;
        assert_eq!(offerings.len(), 2);
        assert_eq!(offerings[0].id, "p1");
    }

    #[tokio::test]
    async fn test_query_offerings_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/databases/test_db/collections/packages/documents")
            .match_query(mockito::Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let client = create_client(server.url());
        let result = client.query_offerings(&ServiceType::Photography).await;

        assert!(matches!(result, Err(CatalogError::Unauthorized)));
    }
}
