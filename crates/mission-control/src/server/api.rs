//! Handlers for the `/api/*` endpoints.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::Uri;
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use super::response::pretty_json;
use super::AppState;
use crate::error::{Error, Result};
use crate::state::now_iso;

/// The canned reading served by `/api/weather`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    /// Display location.
    pub location: &'static str,
    /// Temperature in `unit`.
    pub temperature: i32,
    /// Temperature unit.
    pub unit: &'static str,
    /// Short condition text.
    pub condition: &'static str,
    /// Relative humidity, percent.
    pub humidity: u8,
    /// Wind speed in mph.
    pub wind_speed: u8,
    /// Where the reading came from.
    pub source: &'static str,
    /// When the reading was produced.
    pub timestamp: String,
}

impl WeatherReading {
    /// The fixed reading, stamped with the current time.
    #[must_use]
    pub fn current() -> Self {
        Self {
            location: "Home",
            temperature: 72,
            unit: "F",
            condition: "Partly Cloudy",
            humidity: 45,
            wind_speed: 8,
            source: "static",
            timestamp: now_iso(),
        }
    }
}

/// `/api/status`: uptime and counters.
pub async fn status(State(app): State<AppState>) -> Response {
    pretty_json(&app.server.snapshot())
}

/// `GET /api/data`: the projects document.
pub async fn get_data(State(app): State<AppState>) -> Result<Response> {
    let doc = app.store.load_projects().await?;
    if doc.is_stored() {
        app.server.mark_data_refresh(Utc::now());
    }
    Ok(pretty_json(&doc.into_value()))
}

/// `POST /api/data`: overwrite the saved data file.
pub async fn post_data(State(app): State<AppState>, body: Bytes) -> Result<Json<Value>> {
    let data: Value = serde_json::from_slice(&body)?;
    app.store.save_data(&data).await?;
    info!(bytes = body.len(), "dashboard data saved");
    Ok(Json(json!({
        "success": true,
        "message": "Data saved successfully",
    })))
}

/// `/api/weather`: the fixed reading.
pub async fn weather() -> Response {
    pretty_json(&WeatherReading::current())
}

/// `GET /api/activity`: the activity log.
pub async fn get_activity(State(app): State<AppState>) -> Result<Response> {
    let log = app.store.load_activity().await?;
    Ok(pretty_json(&log))
}

/// `POST /api/activity`: record one entry.
pub async fn post_activity(State(app): State<AppState>, body: Bytes) -> Result<Json<Value>> {
    let Value::Object(fields) = serde_json::from_slice::<Value>(&body)? else {
        return Err(Error::invalid_payload("activity must be a JSON object"));
    };
    let id = app.store.record_activity(fields).await?;
    Ok(Json(json!({ "success": true, "id": id })))
}

/// Anything else under `/api/`, or an unsupported method.
pub async fn not_found(uri: Uri) -> Response {
    Error::not_found(uri.path()).into_response()
}
