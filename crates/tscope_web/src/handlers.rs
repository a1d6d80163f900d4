use std::sync::Arc;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tscope_core::{round_to, Article, ArticleSink, BiasReport, SentimentReport};
use tscope_scrapers::scrape_website;
use tscope_storage::{create_sink, StorageMode};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Deserialize)]
pub struct TextInput {
    pub text: String,
}

fn default_mode() -> String {
    StorageMode::Json.to_string()
}

#[derive(Debug, Deserialize)]
pub struct UrlInput {
    pub url: String,
    #[serde(default = "default_mode")]
    pub mode: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub url: String,
    pub summary: String,
    pub keywords: Vec<String>,
    /// `None` when the page text is too short to score
    pub credibility: Option<f64>,
    pub bias: BiasReport,
    pub sentiment: SentimentReport,
}

/// Rejects requests whose `x-api-key` does not equal the configured key.
/// A server without a key lets everything through.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    if let Some(expected) = &state.api_key {
        let provided = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
        if provided != Some(expected.as_str()) {
            return ApiError::Forbidden.into_response();
        }
    }
    next.run(request).await
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "TechScope": "Summarization and Credibility API",
        "status": "Running",
    }))
}

pub async fn list_articles(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let articles = tscope_storage::load_records(&state.storage.db_path()).await?;
    Ok(Json(json!({ "articles": articles })))
}

/// Stored summaries with their count, newest first.
pub async fn list_records(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let articles = tscope_storage::load_records(&state.storage.db_path()).await?;
    Ok(Json(json!({ "count": articles.len(), "articles": articles })))
}

pub async fn dashboard(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let records = tscope_storage::load_records(&state.storage.db_path()).await?;
    Ok(Html(crate::dashboard::render_dashboard(&records)))
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(input): Json<TextInput>,
) -> ApiResult<Json<Value>> {
    let summary = state.analyzer.summarize(&input.text).await?;
    Ok(Json(json!({ "summary": summary })))
}

/// `credibility_score` is `null` when the text is too short to score.
pub async fn credibility(
    State(state): State<Arc<AppState>>,
    Json(input): Json<TextInput>,
) -> Json<Value> {
    Json(json!({ "credibility_score": state.analyzer.credibility(&input.text) }))
}

pub async fn keywords(
    State(state): State<Arc<AppState>>,
    Json(input): Json<TextInput>,
) -> Json<Value> {
    Json(json!({ "keywords": state.analyzer.keywords(&input.text).await }))
}

pub async fn sentiment(
    State(state): State<Arc<AppState>>,
    Json(input): Json<TextInput>,
) -> Json<SentimentReport> {
    Json(state.analyzer.sentiment(&input.text))
}

pub async fn bias(
    State(state): State<Arc<AppState>>,
    Json(input): Json<TextInput>,
) -> Json<BiasReport> {
    Json(state.analyzer.bias(&input.text))
}

/// Scrape a page, analyze it and persist the result with the requested sink.
/// An unknown storage mode is logged and the result is returned unsaved.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(input): Json<UrlInput>,
) -> ApiResult<Json<AnalyzeResponse>> {
    tracing::info!("Received request for URL: {}", input.url);

    let content = scrape_website(state.fetcher.as_ref(), &input.url).await?;
    if content.is_empty() {
        return Err(ApiError::NotFound("Content could not be scraped.".to_string()));
    }

    let analyzer = &state.analyzer;
    let result = AnalyzeResponse {
        url: input.url.clone(),
        summary: analyzer.summarize(&content).await?,
        keywords: analyzer.keywords(&content).await,
        credibility: analyzer.credibility(&content).map(|c| round_to(c, 2)),
        bias: analyzer.bias(&content),
        sentiment: analyzer.sentiment(&content),
    };

    match input.mode.parse::<StorageMode>() {
        Ok(mode) => {
            let sink = create_sink(mode, &state.storage)?;
            sink.write(&to_article(&result, content)).await?;
        }
        Err(_) => tracing::warn!("Unknown storage mode: {}", input.mode),
    }

    tracing::info!("Processed URL successfully: {}", input.url);
    Ok(Json(result))
}

fn to_article(result: &AnalyzeResponse, content: String) -> Article {
    let source = url::Url::parse(&result.url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default();
    let mut article = Article::new(&result.url, "", source).with_content(content);
    article.summary = Some(result.summary.clone());
    article.keywords = Some(result.keywords.clone());
    article.credibility = result.credibility;
    article.bias = Some(result.bias.clone());
    article.sentiment = Some(result.sentiment.clone());
    article
}
