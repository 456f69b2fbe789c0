//! Health endpoints
//!
//! `/health` answers without touching the database. `/health/ready` pings it
//! and reports 503 when the ping fails or times out.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use inv_db::Database;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub response_time_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: Vec<ComponentHealth>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    pub fn http_status(&self) -> StatusCode {
        match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

pub struct HealthChecker {
    db: Database,
    check_timeout: Duration,
    start_time: Instant,
}

impl HealthChecker {
    pub fn new(db: Database, check_timeout: Duration) -> Self {
        Self {
            db,
            check_timeout,
            start_time: Instant::now(),
        }
    }

    pub async fn check(&self) -> HealthReport {
        let database = self.check_database().await;

        HealthReport {
            status: database.status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            components: vec![database],
            timestamp: chrono::Utc::now(),
        }
    }

    async fn check_database(&self) -> ComponentHealth {
        let start = Instant::now();

        let (status, message) = match tokio::time::timeout(self.check_timeout, self.db.ping()).await {
            Ok(Ok(())) => (HealthStatus::Healthy, None),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "database ping failed");
                (HealthStatus::Unhealthy, Some(e.to_string()))
            }
            Err(_) => {
                tracing::warn!("database ping timed out");
                (HealthStatus::Unhealthy, Some("ping timed out".to_string()))
            }
        };

        ComponentHealth {
            name: "database".to_string(),
            status,
            message,
            response_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Liveness
pub async fn liveness() -> &'static str {
    "OK"
}

/// Readiness, including a database round trip
pub async fn readiness(State(checker): State<Arc<HealthChecker>>) -> (StatusCode, Json<HealthReport>) {
    let report = checker.check().await;
    (report.http_status(), Json(report))
}
