use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::guard::cache::ResultCache;
use crate::guard::limits::enforce_size_limit;
use crate::guard::timeout::run_blocking_with_deadline;
use crate::guard::{GuardError, STATUS_OK, ServiceConfig};
use crate::input::VariantRecord;
use crate::input::validate::{to_records, validated_items};
use crate::model::scores::ScoredVariant;
use crate::pipeline::{Pipeline, SuggestionReport};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    pub fn is_cached(&self) -> bool {
        self.body.get("cached").and_then(Value::as_bool) == Some(true)
    }
}

pub struct Service {
    pipeline: Arc<Pipeline>,
    config: ServiceConfig,
    score_cache: ResultCache<Arc<Vec<ScoredVariant>>>,
    suggestion_cache: ResultCache<Arc<SuggestionReport>>,
}

impl Service {
    pub fn new(pipeline: Arc<Pipeline>, config: ServiceConfig) -> Self {
        let score_cache = ResultCache::new(config.cache_ttl);
        let suggestion_cache = ResultCache::new(config.cache_ttl);
        Self {
            pipeline,
            config,
            score_cache,
            suggestion_cache,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub async fn infer(&self, body: &Value) -> ApiResponse {
        match self.try_infer(body).await {
            Ok((results, cached)) => success("results", results.as_ref(), cached),
            Err(e) => failure("infer", e),
        }
    }

    pub async fn suggestions(&self, body: &Value) -> ApiResponse {
        match self.try_suggestions(body).await {
            Ok((report, cached)) => success("suggestions", report.as_ref(), cached),
            Err(e) => failure("suggestions", e),
        }
    }

    async fn try_infer(
        &self,
        body: &Value,
    ) -> Result<(Arc<Vec<ScoredVariant>>, bool), GuardError> {
        let variants = self.admit(body)?;
        let key = cache_key(&variants)?;
        if let Some(hit) = self.score_cache.get(&key) {
            tracing::debug!(n_variants = variants.len(), "score cache hit");
            return Ok((hit, true));
        }

        let pipeline = Arc::clone(&self.pipeline);
        let results = run_blocking_with_deadline(
            move || pipeline.score_variants(&variants),
            self.config.score_timeout,
        )
        .await??;

        let results = Arc::new(results);
        self.score_cache.insert(key, Arc::clone(&results));
        Ok((results, false))
    }

    async fn try_suggestions(
        &self,
        body: &Value,
    ) -> Result<(Arc<SuggestionReport>, bool), GuardError> {
        let variants = self.admit(body)?;
        let key = cache_key(&variants)?;
        if let Some(hit) = self.suggestion_cache.get(&key) {
            tracing::debug!(n_variants = variants.len(), "suggestion cache hit");
            return Ok((hit, true));
        }

        let pipeline = Arc::clone(&self.pipeline);
        let report = run_blocking_with_deadline(
            move || pipeline.get_suggestions(&variants),
            self.config.suggestion_timeout,
        )
        .await??;

        let report = Arc::new(report);
        self.suggestion_cache.insert(key, Arc::clone(&report));
        Ok((report, false))
    }

    fn admit(&self, body: &Value) -> Result<Vec<VariantRecord>, GuardError> {
        let items = validated_items(body).map_err(GuardError::Validation)?;
        enforce_size_limit(items.len(), self.config.max_variants)?;
        Ok(to_records(items))
    }
}

fn cache_key(variants: &[VariantRecord]) -> Result<String, GuardError> {
    serde_json::to_string(variants)
        .map_err(|e| GuardError::Unexpected(format!("cache key serialization failed: {e}")))
}

fn success<T: Serialize>(field: &str, payload: &T, cached: bool) -> ApiResponse {
    let payload = match serde_json::to_value(payload) {
        Ok(v) => v,
        Err(e) => return failure("serialize", GuardError::Unexpected(e.to_string())),
    };
    let mut body = Map::new();
    body.insert("ok".to_string(), Value::Bool(true));
    body.insert(field.to_string(), payload);
    if cached {
        body.insert("cached".to_string(), Value::Bool(true));
    }
    ApiResponse {
        status: STATUS_OK,
        body: Value::Object(body),
    }
}

fn failure(endpoint: &str, err: GuardError) -> ApiResponse {
    let status = err.status();
    match &err {
        GuardError::Validation(_) | GuardError::LimitExceeded { .. } => {
            tracing::info!(endpoint, status, error = %err, "request rejected");
        }
        GuardError::Timeout(_) => {
            tracing::warn!(endpoint, status, error = %err, "request timed out");
        }
        GuardError::Scoring(_) | GuardError::Unexpected(_) => {
            tracing::error!(endpoint, status, error = %err, "request failed");
        }
    }

    let body = match err {
        GuardError::Validation(issues) => json!({
            "ok": false,
            "error": "Invalid variants",
            "details": issues,
        }),
        other => json!({
            "ok": false,
            "error": other.public_message(),
        }),
    };
    ApiResponse { status, body }
}

#[cfg(test)]
#[path = "../tests/src_inline/service.rs"]
mod tests;
