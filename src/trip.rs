use crate::graphhopper::GraphHopper;
use crate::route::{Place, Route, VehicleMode};
use crate::tips::TripContext;
use crate::Result;

/// What the user asked for, before any geocoding.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    pub vehicle_mode: VehicleMode,
    pub start: String,
    pub destination: String,
    pub waypoints: Vec<String>,
}

/// A routed trip ready for narration.
#[derive(Debug, Clone)]
pub struct PlannedTrip {
    pub context: TripContext,
    pub route: Route,
}

/// Origin, then each waypoint in the order given, then destination.
fn route_points(origin: &Place, waypoints: &[Place], destination: &Place) -> Vec<Place> {
    let mut points = Vec::with_capacity(waypoints.len() + 2);
    points.push(origin.clone());
    points.extend(waypoints.iter().cloned());
    points.push(destination.clone());
    points
}

/// Geocode every stop, then route through them in order. Any stop that
/// cannot be resolved stops the whole trip before routing.
pub fn plan_trip(graphhopper: &GraphHopper, request: &TripRequest) -> Result<PlannedTrip> {
    let origin = graphhopper.geocode(&request.start)?;
    let waypoints = request
        .waypoints
        .iter()
        .map(|w| graphhopper.geocode(w))
        .collect::<Result<Vec<_>>>()?;
    let destination = graphhopper.geocode(&request.destination)?;

    let points = route_points(&origin, &waypoints, &destination);
    let route = graphhopper.route(&points, request.vehicle_mode)?;
    let context = TripContext::new(origin, destination, waypoints, request.vehicle_mode, &route);

    Ok(PlannedTrip { context, route })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waypoints_sit_between_origin_and_destination() {
        let origin = Place::new("Manila", 14.5995, 120.9842);
        let waypoints = vec![
            Place::new("Tarlac", 15.4755, 120.5963),
            Place::new("Pampanga", 15.0794, 120.62),
        ];
        let destination = Place::new("Baguio", 16.4023, 120.596);

        let names: Vec<String> = route_points(&origin, &waypoints, &destination)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Manila", "Tarlac", "Pampanga", "Baguio"]);

        assert_eq!(route_points(&origin, &[], &destination), vec![origin, destination]);
    }
}
