use crate::llm::TextRewriteService;
use crate::route::{Place, Route, VehicleMode};
use crate::units::{to_hms, to_km_miles};
use chrono::{DateTime, Datelike, Local, Weekday};

pub const TIP_NOT_AVAILABLE: &str = "Smart tips are not available.";
pub const NO_TIP_GENERATED: &str = "No smart tip generated.";

pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Trip-level aggregates, derived once per trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripContext {
    pub origin: Place,
    pub destination: Place,
    pub waypoints: Vec<Place>,
    pub vehicle_mode: VehicleMode,
    pub distance_km: f64,
    pub distance_miles: f64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TripContext {
    pub fn new(
        origin: Place,
        destination: Place,
        waypoints: Vec<Place>,
        vehicle_mode: VehicleMode,
        route: &Route,
    ) -> Self {
        let (distance_km, distance_miles) = to_km_miles(route.total_distance_metres);
        let (hours, minutes, seconds) = to_hms(route.total_time_millis);
        Self {
            origin,
            destination,
            waypoints,
            vehicle_mode,
            distance_km,
            distance_miles,
            hours,
            minutes,
            seconds,
        }
    }

    pub fn duration_hms(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

pub struct TripTipGenerator<'a> {
    service: Option<&'a dyn TextRewriteService>,
    clock: &'a dyn Clock,
}

impl<'a> TripTipGenerator<'a> {
    pub fn new(service: Option<&'a dyn TextRewriteService>, clock: &'a dyn Clock) -> Self {
        Self { service, clock }
    }

    /// One short advisory for the whole trip. Never fails: a missing backend
    /// or a failed call yields one of the fixed sentinel strings.
    pub fn generate_tip(&self, context: &TripContext) -> String {
        let Some(service) = self.service else {
            return TIP_NOT_AVAILABLE.to_string();
        };

        let prompt = tip_prompt(context, self.clock.now());
        match service.rewrite(&prompt) {
            Ok(text) => {
                let tip = text.trim().trim_matches('"').trim();
                if tip.is_empty() {
                    NO_TIP_GENERATED.to_string()
                } else {
                    tip.to_string()
                }
            }
            Err(e) => {
                log::warn!("Smart tip failed: {}", e);
                NO_TIP_GENERATED.to_string()
            }
        }
    }
}

fn tip_prompt(context: &TripContext, now: DateTime<Local>) -> String {
    let via = if context.waypoints.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = context.waypoints.iter().map(|p| p.name.as_str()).collect();
        format!("\n    via: {}", names.join(", "))
    };

    format!(
        "Generate ONE practical tip for this trip in under 15 words:
    from: {}
    to: {}{}
    distance_km: {:.1}
    distance_miles: {:.1}
    duration: {}h {}m
    vehicle: {}
    time_of_day: {}
    is_weekend: {}
    Format: \"[Emoji] [Tip]\"
    Examples:
    \"⛽ Fuel up before rural stretch\"
    \"🚦 Avoid downtown until 19:00\"
    \"⚠️ 2 sharp turns next 5km\"",
        context.origin.name,
        context.destination.name,
        via,
        context.distance_km,
        context.distance_miles,
        context.hours,
        context.minutes,
        context.vehicle_mode,
        now.format("%H:%M"),
        is_weekend(now.weekday()),
    )
}
