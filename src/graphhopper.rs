use crate::route::{Place, Route, RouteInstruction, VehicleMode};
use crate::{DirectionsError, Result};
use serde::Deserialize;
use std::time::Duration;

const BASE_URL: &str = "https://graphhopper.com/api/1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    hits: Vec<GeocodeHit>,
}

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    name: String,
    point: GeoPoint,
    country: Option<String>,
    state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeoPoint {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    paths: Vec<RoutePath>,
}

#[derive(Debug, Deserialize)]
struct RoutePath {
    distance: f64,
    time: u64,
    #[serde(default)]
    instructions: Vec<RouteInstruction>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

/// Geocoding and routing against the GraphHopper web API.
pub struct GraphHopper {
    api_key: String,
    client: reqwest::blocking::Client,
}

impl GraphHopper {
    pub fn new(api_key: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("directions/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DirectionsError::HttpClient(e.to_string()))?;

        Ok(Self { api_key, client })
    }

    /// Resolve a free-text place name to its best match.
    pub fn geocode(&self, query: &str) -> Result<Place> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DirectionsError::LocationNotFound(query.to_string()));
        }
        log::debug!("Geocoding {:?}", query);

        let response_text = self
            .client
            .get(format!("{}/geocode", BASE_URL))
            .query(&[("q", query), ("limit", "1"), ("key", self.api_key.as_str())])
            .send()
            .map_err(|e| DirectionsError::Request(e.without_url().to_string()))?
            .text()
            .map_err(|e| DirectionsError::Request(e.without_url().to_string()))?;

        parse_geocode(query, &response_text)
    }

    /// Route through `points` in order: origin, any waypoints, destination.
    pub fn route(&self, points: &[Place], vehicle_mode: VehicleMode) -> Result<Route> {
        let params = route_params(points, vehicle_mode, &self.api_key);
        log::debug!(
            "Routing {} points by {}",
            points.len(),
            vehicle_mode.profile()
        );

        let response = self
            .client
            .get(format!("{}/route", BASE_URL))
            .query(&params)
            .send()
            .map_err(|e| DirectionsError::Request(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| DirectionsError::Request(e.without_url().to_string()))?;
        log::info!("Routing API status: {}", status);

        parse_route(status, &body)
    }
}

/// Query parameters for a route request: one `point` per place, in order.
fn route_params(points: &[Place], vehicle_mode: VehicleMode, api_key: &str) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("key", api_key.to_string()),
        ("vehicle", vehicle_mode.profile().to_string()),
    ];
    params.extend(points.iter().map(|p| ("point", p.point_param())));
    params
}

fn parse_geocode(query: &str, body: &str) -> Result<Place> {
    if body.is_empty() {
        return Err(DirectionsError::EmptyResponse);
    }

    let response: GeocodeResponse = serde_json::from_str(body)
        .map_err(|e| DirectionsError::InvalidJson(format!("{}: {}", e, body)))?;

    let hit = response
        .hits
        .into_iter()
        .next()
        .ok_or_else(|| DirectionsError::LocationNotFound(query.to_string()))?;

    log::debug!(
        "{:?} resolved to {} ({}, {})",
        query,
        hit.name,
        hit.state.as_deref().unwrap_or("-"),
        hit.country.as_deref().unwrap_or("-")
    );
    Ok(Place::new(hit.name, hit.point.lat, hit.point.lng))
}

fn parse_route(status: u16, body: &str) -> Result<Route> {
    if status != 200 {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(DirectionsError::Routing { status, message });
    }

    let response: RouteResponse = serde_json::from_str(body)
        .map_err(|e| DirectionsError::InvalidJson(format!("{}: {}", e, body)))?;

    let path = response.paths.into_iter().next().ok_or(DirectionsError::NoRoute)?;

    Ok(Route {
        instructions: path.instructions,
        total_distance_metres: path.distance,
        total_time_millis: path.time,
    })
}
