//! Service health endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Health report: service identity plus database reachability
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

impl HealthResponse {
    fn new(database_ok: bool) -> Self {
        HealthResponse {
            service: "stock-control",
            version: env!("CARGO_PKG_VERSION"),
            database: if database_ok { "connected" } else { "unreachable" },
        }
    }
}

/// Report service health, probing database connectivity
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_ok = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();
    Json(HealthResponse::new(database_ok))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_database_reachability() {
        let up = HealthResponse::new(true);
        assert_eq!(up.service, "stock-control");
        assert_eq!(up.database, "connected");

        let down = HealthResponse::new(false);
        assert_eq!(down.database, "unreachable");
    }
}
