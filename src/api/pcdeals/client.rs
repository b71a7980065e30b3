use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::{
    parse_price_history, ApiError, AuthResponse, CredentialsRequest, FavoriteRequest, ParsedHistory,
};
use crate::models::{
    Favorite, FavoriteResult, Listing, MarketSnapshot, Outlier, PriceAlert, PriceAnalysis,
};
use crate::utils::{extract_clean_error, Session};

const APP_HEADER: &str = "x-pc-deals-app";

/// Client for the GPU price API
pub struct PcDealsClient {
    http_client: HttpClient,
    base_url: String,
}

impl PcDealsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Headers sent on every request; `session` adds the bearer token
    fn create_headers(&self, session: Option<&Session>) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static(APP_HEADER), HeaderValue::from_static("true"));

        if let Some(session) = session {
            let auth_value = HeaderValue::from_str(&session.bearer()).map_err(|e| {
                ApiError::RequestError(format!("Failed to create auth header: {}", e))
            })?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        Ok(headers)
    }

    /// Map a non-success status to an [`ApiError`]
    async fn handle_error_response(response: reqwest::Response) -> ApiError {
        let status_code = response.status().as_u16();
        let body_text = extract_clean_error(&response.text().await.unwrap_or_default());

        match status_code {
            400 => ApiError::BadRequest(body_text),
            401 => ApiError::Unauthorized(body_text),
            403 => ApiError::Forbidden(body_text),
            404 => ApiError::NotFound(body_text),
            429 => {
                warn!("Rate limited by price API: {}", body_text);
                let message = if body_text.is_empty() {
                    "Rate limit exceeded. Please try again later.".to_string()
                } else {
                    body_text
                };
                ApiError::RateLimited(message)
            }
            500..=599 => {
                warn!("Server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }

    /// Send a prepared request and return the body of a successful response
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        response
            .text()
            .await
            .map_err(|e| ApiError::RequestError(format!("Failed to read response: {}", e)))
    }

    fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
        serde_json::from_str(body)
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// GET /api/gpus/price-history?model=
    ///
    /// Raw per-period price rows for a model, validated into observations.
    pub async fn fetch_price_history(&self, model: &str) -> Result<ParsedHistory, ApiError> {
        let url = format!("{}/api/gpus/price-history", self.base_url);
        let request = self
            .http_client
            .get(&url)
            .headers(self.create_headers(None)?)
            .query(&[("model", model)]);

        let body = self.send(request).await?;
        let parsed = parse_price_history(&body)?;
        debug!(
            "Price history for {}: {} observations, {} rejected",
            model,
            parsed.observations.len(),
            parsed.rejected
        );
        Ok(parsed)
    }

    /// GET /api/gpus/price-analysis?model=&price=
    ///
    /// Compares a candidate price against the recent market average.
    pub async fn analyze_price(&self, model: &str, price: i64) -> Result<PriceAnalysis, ApiError> {
        let url = format!("{}/api/gpus/price-analysis", self.base_url);
        let request = self
            .http_client
            .get(&url)
            .headers(self.create_headers(None)?)
            .query(&[("model", model.to_string()), ("price", price.to_string())]);

        let body = self.send(request).await?;
        Self::decode(&body)
    }

    /// GET /api/gpus/listings[?model=]
    pub async fn fetch_listings(&self, model: Option<&str>) -> Result<Vec<Listing>, ApiError> {
        let url = format!("{}/api/gpus/listings", self.base_url);
        let mut request = self
            .http_client
            .get(&url)
            .headers(self.create_headers(None)?);
        if let Some(model) = model {
            request = request.query(&[("model", model)]);
        }

        let body = self.send(request).await?;
        Self::decode(&body)
    }

    /// GET /api/gpus/market-snapshot
    pub async fn fetch_market_snapshot(&self) -> Result<MarketSnapshot, ApiError> {
        let url = format!("{}/api/gpus/market-snapshot", self.base_url);
        let request = self.http_client.get(&url).headers(self.create_headers(None)?);

        let body = self.send(request).await?;
        Self::decode(&body)
    }

    /// POST /api/users/login
    ///
    /// Exchanges credentials for a session. The caller decides where it is kept.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        self.authenticate("login", email, password).await
    }

    /// POST /api/users/register
    ///
    /// A new account is logged in straight away.
    pub async fn register(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        self.authenticate("register", email, password).await
    }

    async fn authenticate(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, ApiError> {
        let url = format!("{}/api/users/{}", self.base_url, endpoint);
        let request = self
            .http_client
            .post(&url)
            .headers(self.create_headers(None)?)
            .json(&CredentialsRequest::new(email, password));

        let body = self.send(request).await?;
        let response: AuthResponse = Self::decode(&body)?;
        session_from_auth(response)
    }

    /// GET /api/users/favorites?user_id=
    pub async fn fetch_favorites(&self, session: &Session) -> Result<Vec<Favorite>, ApiError> {
        let url = format!("{}/api/users/favorites", self.base_url);
        let request = self
            .http_client
            .get(&url)
            .headers(self.create_headers(Some(session))?)
            .query(&[("user_id", session.user_id)]);

        let body = self.send(request).await?;
        Self::decode(&body)
    }

    /// POST /api/users/favorites
    pub async fn add_favorite(
        &self,
        session: &Session,
        model: &str,
    ) -> Result<FavoriteResult, ApiError> {
        let url = format!("{}/api/users/favorites", self.base_url);
        let body = FavoriteRequest {
            user_id: session.user_id,
            model,
        };
        let request = self
            .http_client
            .post(&url)
            .headers(self.create_headers(Some(session))?)
            .json(&body);

        let body = self.send(request).await?;
        Self::decode(&body)
    }

    /// DELETE /api/users/favorites?user_id=&model=
    pub async fn remove_favorite(
        &self,
        session: &Session,
        model: &str,
    ) -> Result<FavoriteResult, ApiError> {
        let url = format!("{}/api/users/favorites", self.base_url);
        let request = self
            .http_client
            .delete(&url)
            .headers(self.create_headers(Some(session))?)
            .query(&[("user_id", session.user_id.to_string()), ("model", model.to_string())]);

        let body = self.send(request).await?;
        Self::decode(&body)
    }

    /// POST /api/notifications/preferences?userId=&gpuModel=&priceThreshold=
    ///
    /// Asks the API to notify the user once the model drops below `threshold`.
    pub async fn set_price_alert(
        &self,
        session: &Session,
        model: &str,
        threshold: i64,
    ) -> Result<PriceAlert, ApiError> {
        let url = format!("{}/api/notifications/preferences", self.base_url);
        let request = self
            .http_client
            .post(&url)
            .headers(self.create_headers(Some(session))?)
            .query(&[
                ("userId", session.user_id.to_string()),
                ("gpuModel", model.to_string()),
                ("priceThreshold", threshold.to_string()),
            ]);

        let body = self.send(request).await?;
        Self::decode(&body)
    }

    /// GET /api/notifications/preferences/{user_id}
    pub async fn fetch_price_alerts(&self, session: &Session) -> Result<Vec<PriceAlert>, ApiError> {
        let url = format!("{}/api/notifications/preferences/{}", self.base_url, session.user_id);
        let request = self.http_client.get(&url).headers(self.create_headers(Some(session))?);

        let body = self.send(request).await?;
        Self::decode(&body)
    }

    /// DELETE /api/notifications/preferences/{id}
    pub async fn delete_price_alert(
        &self,
        session: &Session,
        alert_id: i64,
    ) -> Result<(), ApiError> {
        let url = format!("{}/api/notifications/preferences/{}", self.base_url, alert_id);
        let request = self.http_client.delete(&url).headers(self.create_headers(Some(session))?);

        self.send(request).await?;
        Ok(())
    }

    /// GET /api/gpus/outliers?threshold=
    ///
    /// Admin only. Listings priced above `average * threshold` or below
    /// `average / threshold`.
    pub async fn fetch_outliers(
        &self,
        session: &Session,
        threshold: f64,
    ) -> Result<Vec<Outlier>, ApiError> {
        let url = format!("{}/api/gpus/outliers", self.base_url);
        let request = self
            .http_client
            .get(&url)
            .headers(self.create_headers(Some(session))?)
            .query(&[("threshold", threshold)]);

        let body = self.send(request).await?;
        Self::decode(&body)
    }

    /// DELETE /api/gpus/delete-outliers?threshold=
    ///
    /// Admin only. The API answers with an empty body.
    pub async fn delete_outliers(&self, session: &Session, threshold: f64) -> Result<(), ApiError> {
        let url = format!("{}/api/gpus/delete-outliers", self.base_url);
        let request = self
            .http_client
            .delete(&url)
            .headers(self.create_headers(Some(session))?)
            .query(&[("threshold", threshold)]);

        self.send(request).await?;
        Ok(())
    }

    /// GET /api/reddit/fetch-save-new
    ///
    /// Asks the backend to scrape and store new posts; returns what it saved.
    pub async fn fetch_new_listings(&self, session: &Session) -> Result<Vec<Listing>, ApiError> {
        let url = format!("{}/api/reddit/fetch-save-new", self.base_url);
        let request = self.http_client.get(&url).headers(self.create_headers(Some(session))?);

        let body = self.send(request).await?;
        Self::decode(&body)
    }
}

fn session_from_auth(response: AuthResponse) -> Result<Session, ApiError> {
    match (response.success, response.user_id, response.token) {
        (true, Some(user_id), Some(token)) => Ok(Session::new(user_id, token)),
        _ => Err(ApiError::Unauthorized(
            response
                .message
                .unwrap_or_else(|| "Login failed".to_string()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalised() {
        let client = PcDealsClient::new("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_headers() {
        let client = PcDealsClient::new("http://localhost:8080");

        let anonymous = client.create_headers(None).unwrap();
        assert_eq!(anonymous.get(APP_HEADER).unwrap(), "true");
        assert!(anonymous.get(AUTHORIZATION).is_none());

        let session = Session::new(3, "jwt");
        let authed = client.create_headers(Some(&session)).unwrap();
        assert_eq!(authed.get(AUTHORIZATION).unwrap(), "Bearer jwt");
    }

    #[test]
    fn test_bad_token_is_a_request_error() {
        let client = PcDealsClient::new("http://localhost:8080");
        let session = Session::new(3, "bad\ntoken");
        assert!(matches!(
            client.create_headers(Some(&session)),
            Err(ApiError::RequestError(_))
        ));
    }

    #[test]
    fn test_decode_analysis() {
        let body = r#"{"model":"RTX 3080","average_price":480,"your_price":400,
            "price_rating":"✅ Good price","percent_vs_market":16.7,
            "market_direction":"below","deal_score":7}"#;
        let analysis: PriceAnalysis = PcDealsClient::decode(body).unwrap();
        assert_eq!(analysis.deal_score, Some(7));
        assert_eq!(analysis.average_price, Some(480.0));
    }

    #[test]
    fn test_decode_listing_column_names() {
        let body = r#"[{"id":1,"model":"RTX 3080","price":450,"reddit_url":"https://r/x",
            "reddit_posted_at":"2024-01-01T10:00:00"}]"#;
        let listings: Vec<Listing> = PcDealsClient::decode(body).unwrap();
        assert_eq!(listings[0].url.as_deref(), Some("https://r/x"));
        assert_eq!(listings[0].timestamp.as_deref(), Some("2024-01-01T10:00:00"));
    }

    #[test]
    fn test_auth_response_to_session() {
        let ok: AuthResponse = PcDealsClient::decode(
            r#"{"success":true,"token":"jwt","user_id":12,"email":"a@b.c"}"#,
        )
        .unwrap();
        assert_eq!(session_from_auth(ok).unwrap(), Session::new(12, "jwt"));

        let failed: AuthResponse =
            PcDealsClient::decode(r#"{"success":false,"message":"Invalid credentials"}"#).unwrap();
        assert!(matches!(
            session_from_auth(failed),
            Err(ApiError::Unauthorized(msg)) if msg == "Invalid credentials"
        ));
    }

    #[test]
    fn test_decode_alert() {
        let body = r#"{"id":9,"userId":3,"gpuModel":"RTX 3080","priceThreshold":400,
            "createdAt":"2024-01-01T10:00:00"}"#;
        let alert: PriceAlert = PcDealsClient::decode(body).unwrap();
        assert_eq!(alert.gpu_model, "RTX 3080");
        assert_eq!(alert.price_threshold, 400.0);
    }

    #[test]
    fn test_decode_account_lists() {
        let favorites: Vec<Favorite> = PcDealsClient::decode(
            r#"[{"model":"RTX 3080","created_at":"2024-01-01T10:00:00"},{"model":"RX 6800"}]"#,
        )
        .unwrap();
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[1].model, "RX 6800");

        let alerts: Vec<PriceAlert> = PcDealsClient::decode(
            r#"[{"id":1,"userId":3,"gpuModel":"RTX 3080","priceThreshold":400}]"#,
        )
        .unwrap();
        assert_eq!(alerts[0].id, 1);
    }
}
