//! Transport-agnostic request dispatcher.

use crate::params::{parse_query, raw_search_query, recommendation_params};
use crate::response::{
    AutocompleteResponse, ErrorResponse, FiltersResponse, PopularResponse,
    RecommendationResponse, SearchResponse, TrackBody,
};
use glow_catalog::product::current_timestamp;
use glow_recommend::{
    Interaction, InteractionKind, InteractionTracker, RecommendationEngine, RecommendationType,
};
use glow_search::SearchService;
use serde::Serialize;
use std::fmt::Display;
use tracing::{debug, warn};

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

/// A request as handed over by the hosting HTTP layer.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Build a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: String::new(),
            body: None,
        }
    }

    /// Build a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: String::new(),
            body: None,
        }
    }

    /// Attach a query string.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Attach a body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }
}

/// A JSON response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    fn json<T: Serialize>(status: u16, body: &T) -> Self {
        match serde_json::to_vec(body) {
            Ok(bytes) => Self {
                status,
                body: bytes,
            },
            Err(err) => {
                warn!(error = %err, "response serialization failed");
                Self {
                    status: 500,
                    body: br#"{"error":"serialization failure"}"#.to_vec(),
                }
            }
        }
    }

    fn not_found() -> Self {
        Self::json(
            404,
            &ErrorResponse {
                error: "not found".to_string(),
            },
        )
    }

    /// Distinguishable upstream failure: never conflated with an empty
    /// result.
    fn unavailable(err: impl Display) -> Self {
        warn!(error = %err, "upstream store unavailable");
        Self::json(
            503,
            &ErrorResponse {
                error: err.to_string(),
            },
        )
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the response body as JSON.
    pub fn json_body(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Routes storefront requests to the search and recommendation services.
pub struct CommerceApi {
    search: SearchService,
    engine: RecommendationEngine,
    tracker: InteractionTracker,
}

impl CommerceApi {
    pub fn new(
        search: SearchService,
        engine: RecommendationEngine,
        tracker: InteractionTracker,
    ) -> Self {
        Self {
            search,
            engine,
            tracker,
        }
    }

    /// Dispatch one request.
    pub async fn handle(&self, req: ApiRequest) -> ApiResponse {
        let path = req.path.trim_end_matches('/');
        debug!(path, query = %req.query, "api request");
        match (req.method, path) {
            (Method::Get, "/search") => self.search_route(&req.query).await,
            (Method::Get, "/search/autocomplete") => self.autocomplete_route(&req.query).await,
            (Method::Get, "/search/popular") => self.popular_route(&req.query).await,
            (Method::Get, "/search/filters") => self.filters_route().await,
            (Method::Post, "/recommendations/track")
            | (Method::Post, "/recommendations/track-interaction") => {
                self.track_route(req.body.as_deref()).await
            }
            (Method::Get, p) if p.starts_with("/recommendations/") => {
                self.recommend_route(p, &req.query).await
            }
            _ => ApiResponse::not_found(),
        }
    }

    async fn search_route(&self, query: &str) -> ApiResponse {
        let params = parse_query(query);
        let raw = raw_search_query(&params);
        match self.search.search(raw).await {
            Ok(envelope) => ApiResponse::json(200, &SearchResponse::from(envelope)),
            Err(err) => ApiResponse::unavailable(err),
        }
    }

    async fn autocomplete_route(&self, query: &str) -> ApiResponse {
        let params = parse_query(query);
        let q = params.get("q").map(String::as_str).unwrap_or("");
        let limit = parse_limit(&params, 10);
        match self.search.autocomplete(q, limit).await {
            Ok(suggestions) => ApiResponse::json(200, &AutocompleteResponse { suggestions }),
            Err(err) => ApiResponse::unavailable(err),
        }
    }

    async fn popular_route(&self, query: &str) -> ApiResponse {
        let params = parse_query(query);
        let limit = parse_limit(&params, 10);
        match self.search.popular(limit).await {
            Ok(popular) => ApiResponse::json(200, &PopularResponse::from(popular)),
            Err(err) => ApiResponse::unavailable(err),
        }
    }

    async fn filters_route(&self) -> ApiResponse {
        match self.search.facet_defaults().await {
            Ok(facets) => ApiResponse::json(
                200,
                &FiltersResponse {
                    filters: facets.into(),
                },
            ),
            Err(err) => ApiResponse::unavailable(err),
        }
    }

    async fn recommend_route(&self, path: &str, query: &str) -> ApiResponse {
        let type_str = path.strip_prefix("/recommendations/").unwrap_or("");
        let Some(rec_type) = RecommendationType::from_str(type_str) else {
            return ApiResponse::not_found();
        };
        let params = parse_query(query);
        let request = recommendation_params(rec_type, &params);
        match self.engine.recommend(&request).await {
            Ok(recs) => ApiResponse::json(200, &RecommendationResponse::from(recs)),
            Err(err) => ApiResponse::unavailable(err),
        }
    }

    /// Tracking is best-effort: the caller is always acknowledged, and
    /// malformed payloads or store failures are logged and swallowed.
    async fn track_route(&self, body: Option<&[u8]>) -> ApiResponse {
        match body.map(serde_json::from_slice::<TrackBody>) {
            Some(Ok(track)) => {
                let kind = track
                    .kind
                    .as_deref()
                    .and_then(InteractionKind::from_str)
                    .unwrap_or(InteractionKind::View);
                let at = track.timestamp.unwrap_or_else(current_timestamp);
                let mut interaction = Interaction::new(kind, track.product_id.as_str(), at);
                if let Some(user) = track.user_id {
                    interaction = interaction.by_user(user);
                }
                self.tracker.track(interaction).await;
            }
            Some(Err(err)) => warn!(error = %err, "unparseable tracking payload"),
            None => warn!("empty tracking payload"),
        }
        ApiResponse::json(202, &serde_json::json!({ "accepted": true }))
    }
}

fn parse_limit(params: &std::collections::HashMap<String, String>, default: usize) -> usize {
    params
        .get("limit")
        .and_then(|l| l.trim().parse::<usize>().ok())
        .unwrap_or(default)
}
