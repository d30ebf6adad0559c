use std::fmt;

mod abbreviations;
pub mod config;
pub mod enrich;
pub mod graphhopper;
pub mod interactive;
pub mod llm;
pub mod logging;
pub mod narration;
pub mod route;
pub mod tips;
pub mod trip;
pub mod tts;
pub mod turns;
pub mod units;

pub use abbreviations::expand_abbreviations;
pub use enrich::InstructionEnricher;
pub use narration::{NarrationAssembler, NarrationLine};
pub use route::{Place, Route, RouteInstruction, VehicleMode};
pub use tips::{Clock, SystemClock, TripContext, TripTipGenerator};
pub use trip::{PlannedTrip, TripRequest, plan_trip};

#[derive(Debug)]
pub enum DirectionsError {
    HttpClient(String),
    Request(String),
    EmptyResponse,
    InvalidJson(String),
    LocationNotFound(String),
    Routing { status: u16, message: String },
    NoRoute,
    NoTripEntered,
    MissingApiKey(&'static str),
}

impl fmt::Display for DirectionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionsError::HttpClient(msg) => write!(f, "HTTP client error: {}", msg),
            DirectionsError::Request(msg) => write!(f, "Request failed: {}", msg),
            DirectionsError::EmptyResponse => write!(f, "Empty response from GraphHopper"),
            DirectionsError::InvalidJson(msg) => write!(f, "Failed to parse JSON response: {}", msg),
            DirectionsError::LocationNotFound(query) => write!(
                f,
                "Location '{}' could not be found. Try a more specific name (e.g., 'Springfield, Illinois')",
                query
            ),
            DirectionsError::Routing { status, message } => write!(
                f,
                "GraphHopper Routing API failed (status {}).\nMessage: {}",
                status, message
            ),
            DirectionsError::NoRoute => write!(f, "GraphHopper returned no route between these points"),
            DirectionsError::NoTripEntered => write!(f, "No trip entered"),
            DirectionsError::MissingApiKey(var) => write!(
                f,
                "{} environment variable not set.\nPlease set it in your environment or a .env file:\nexport {}=your_api_key_here",
                var, var
            ),
        }
    }
}

impl std::error::Error for DirectionsError {}

impl DirectionsError {
    /// Errors the interactive loop recovers from by asking again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DirectionsError::LocationNotFound(_)
                | DirectionsError::Routing { .. }
                | DirectionsError::NoRoute
        )
    }
}

pub type Result<T> = std::result::Result<T, DirectionsError>;

const RULE: &str = "=================================================";
const STEP_RULE: &str = "=============================================";

pub fn display_trip_header(context: &TripContext) {
    println!(
        "{} Trip: {} → {} by {}",
        context.vehicle_mode.emoji(),
        context.origin.name,
        context.destination.name,
        context.vehicle_mode
    );
    if !context.waypoints.is_empty() {
        let names: Vec<&str> = context.waypoints.iter().map(|p| p.name.as_str()).collect();
        println!("🧭 Via: {}", names.join(" → "));
    }
    println!(
        "⏱ {} | 📏 {:.1} km / {:.1} miles",
        context.duration_hms(),
        context.distance_km,
        context.distance_miles
    );
    println!("{}", "━".repeat(40));
}

pub fn display_narration_line(line: &NarrationLine) {
    println!("{}", line);
    println!("{}", STEP_RULE);
}

pub fn display_trip_summary(context: &TripContext) {
    println!("{}", RULE);
    println!(
        "Distance Traveled: {:.1} miles / {:.1} km",
        context.distance_miles, context.distance_km
    );
    println!("Trip Duration: {}", context.duration_hms());
    println!("{}", RULE);
}

pub fn display_tip(tip: &str) {
    println!("{}", "━".repeat(40));
    println!("💡 Smart Tip:");
    println!("{}", tip);
    println!("{}", "━".repeat(40));
}

/// Plain listing used when no narration is wanted: canned phrase per sign
/// plus the step length in both units.
pub fn display_plain_directions(route: &Route) {
    for step in &route.instructions {
        let (km, miles) = units::to_km_miles(step.distance);
        println!("{} and go for {:.1} km ({:.1} miles).", step.phrase(), km, miles);
        println!("{}", STEP_RULE);
    }
}
