use crate::narration::{NarrationLine, StepMarker};
use crate::{TripContext, expand_abbreviations};

/// Drop emoji and other pictographs that speech engines read out literally.
fn strip_symbols(text: &str) -> String {
    let kept: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || c.is_ascii_punctuation() {
                c
            } else {
                ' '
            }
        })
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

/// Spoken form of one narration step: sharp turns get a verbal warning,
/// direction emoji are dropped.
pub fn spoken_step(line: &NarrationLine) -> String {
    let text = strip_symbols(&expand_abbreviations(&line.text));
    match line.marker {
        StepMarker::Sharp(turn) => format!("{} {}", turn.spoken(), text),
        StepMarker::Direction(_) => text,
    }
}

pub fn spoken_trip_intro(context: &TripContext) -> String {
    let mut announcement = format!(
        "Trip from {} to {} by {}... ",
        expand_abbreviations(&context.origin.name),
        expand_abbreviations(&context.destination.name),
        context.vehicle_mode
    );

    if !context.waypoints.is_empty() {
        let names: Vec<String> = context
            .waypoints
            .iter()
            .map(|p| expand_abbreviations(&p.name))
            .collect();
        announcement.push_str(&format!("Via {}... ", names.join(", then ")));
    }

    announcement.push_str(&format!("{:.1} kilometers... ", context.distance_km));
    if context.hours > 0 {
        announcement.push_str(&format!(
            "About {} {}...",
            plural(context.hours, "hour"),
            plural(context.minutes, "minute")
        ));
    } else {
        announcement.push_str(&format!("About {}...", plural(context.minutes.max(1), "minute")));
    }

    strip_symbols(&announcement)
}

pub fn spoken_tip(tip: &str) -> String {
    format!("Smart tip... {}", strip_symbols(tip))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narration::DirectionEmoji;
    use crate::route::{Place, Route, VehicleMode};
    use crate::turns::SharpTurn;

    #[test]
    fn sharp_step_gets_verbal_warning() {
        let line = NarrationLine::new(
            StepMarker::Sharp(SharpTurn::Left),
            "Turn sharp left onto Oak St (0.1 km)".to_string(),
        );
        assert_eq!(
            spoken_step(&line),
            "Warning, sharp left. Turn sharp left onto Oak Street (0.1 kilometers)"
        );
    }

    #[test]
    fn direction_emoji_is_not_spoken() {
        let line = NarrationLine::new(
            StepMarker::Direction(DirectionEmoji::Finish),
            "Arrive at destination 🏁 (0.0 km)".to_string(),
        );
        assert_eq!(spoken_step(&line), "Arrive at destination (0.0 kilometers)");
    }

    #[test]
    fn intro_mentions_waypoints_and_duration() {
        let route = Route {
            instructions: vec![],
            total_distance_metres: 12_345.0,
            total_time_millis: 3_960_000,
        };
        let context = TripContext::new(
            Place::new("Union Sq", 0.0, 0.0),
            Place::new("Golden Gate Park", 0.0, 0.0),
            vec![Place::new("Market St", 0.0, 0.0)],
            VehicleMode::Bike,
            &route,
        );
        assert_eq!(
            spoken_trip_intro(&context),
            "Trip from Union Square to Golden Gate Park by bike... Via Market Street... 12.3 kilometers... About 1 hour 6 minutes..."
        );
    }

    #[test]
    fn short_trip_rounds_up_to_a_minute() {
        let route = Route {
            instructions: vec![],
            total_distance_metres: 200.0,
            total_time_millis: 20_000,
        };
        let context = TripContext::new(
            Place::new("A", 0.0, 0.0),
            Place::new("B", 0.0, 0.0),
            vec![],
            VehicleMode::Foot,
            &route,
        );
        assert!(spoken_trip_intro(&context).ends_with("0.2 kilometers... About 1 minute..."));
    }

    #[test]
    fn tip_emoji_is_dropped() {
        assert_eq!(spoken_tip("⛽ Fuel up before rural stretch"), "Smart tip... Fuel up before rural stretch");
    }
}
