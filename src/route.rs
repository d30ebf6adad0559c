use serde::Deserialize;
use std::fmt;

/// A resolved location: origin, destination or waypoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// `lat,lng` as GraphHopper expects for a `point` parameter.
    pub fn point_param(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// One step of a route as returned by the routing service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteInstruction {
    pub text: String,
    /// Metres, never negative.
    pub distance: f64,
    #[serde(default)]
    pub sign: Option<i32>,
}

impl RouteInstruction {
    pub fn new(text: impl Into<String>, distance: f64) -> Self {
        Self {
            text: text.into(),
            distance,
            sign: None,
        }
    }

    pub fn with_sign(mut self, sign: i32) -> Self {
        self.sign = Some(sign);
        self
    }

    /// Canned phrase for the turn sign, falling back to the routing text
    /// for signs outside `-3..=3` (roundabouts, waypoints, arrival).
    pub fn phrase(&self) -> &str {
        match self.sign {
            Some(-3) => "Make a sharp left",
            Some(-2) => "Turn left",
            Some(-1) => "Bear left",
            Some(0) => "Continue straight",
            Some(1) => "Bear right",
            Some(2) => "Turn right",
            Some(3) => "Make a sharp right",
            _ => self.text.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub instructions: Vec<RouteInstruction>,
    pub total_distance_metres: f64,
    pub total_time_millis: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum VehicleMode {
    /// Driving
    #[default]
    Car,
    /// Walking
    Foot,
    /// Cycling
    Bike,
    /// Hiking trails
    Hike,
}

impl VehicleMode {
    /// Routing profile name.
    pub fn profile(&self) -> &'static str {
        match self {
            VehicleMode::Car => "car",
            VehicleMode::Foot => "foot",
            VehicleMode::Bike => "bike",
            VehicleMode::Hike => "hike",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            VehicleMode::Car => "🚗",
            VehicleMode::Foot => "🚶",
            VehicleMode::Bike => "🚲",
            VehicleMode::Hike => "🥾",
        }
    }

    /// Parse free-form user input; `None` for anything unrecognised.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "car" => Some(VehicleMode::Car),
            "foot" => Some(VehicleMode::Foot),
            "bike" => Some(VehicleMode::Bike),
            "hike" => Some(VehicleMode::Hike),
            _ => None,
        }
    }
}

impl fmt::Display for VehicleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_maps_to_phrase() {
        let step = RouteInstruction::new("Turn slight left onto Main St", 120.0);
        assert_eq!(step.clone().with_sign(-3).phrase(), "Make a sharp left");
        assert_eq!(step.clone().with_sign(0).phrase(), "Continue straight");
        assert_eq!(step.clone().with_sign(2).phrase(), "Turn right");
    }

    #[test]
    fn unknown_or_missing_sign_uses_text() {
        let step = RouteInstruction::new("Enter roundabout", 10.0);
        assert_eq!(step.phrase(), "Enter roundabout");
        assert_eq!(step.clone().with_sign(6).phrase(), "Enter roundabout");
        assert_eq!(step.with_sign(-98).phrase(), "Enter roundabout");
    }

    #[test]
    fn instruction_deserializes_without_sign() {
        let step: RouteInstruction =
            serde_json::from_str(r#"{"text":"Arrive at destination","distance":0.0}"#).unwrap();
        assert_eq!(step.sign, None);
        let step: RouteInstruction = serde_json::from_str(
            r#"{"text":"Turn left","distance":42.5,"sign":-2,"time":3000,"street_name":""}"#,
        )
        .unwrap();
        assert_eq!(step.sign, Some(-2));
        assert_eq!(step.distance, 42.5);
    }

    #[test]
    fn vehicle_mode_parsing() {
        assert_eq!(VehicleMode::parse(" Bike "), Some(VehicleMode::Bike));
        assert_eq!(VehicleMode::parse("HIKE"), Some(VehicleMode::Hike));
        assert_eq!(VehicleMode::parse(""), None);
        assert_eq!(VehicleMode::parse("plane"), None);
        assert_eq!(VehicleMode::Foot.to_string(), "foot");
    }

    #[test]
    fn point_param_is_lat_then_lng() {
        let place = Place::new("Berlin", 52.52, 13.405);
        assert_eq!(place.point_param(), "52.52,13.405");
    }
}
