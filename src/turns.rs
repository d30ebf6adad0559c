use crate::route::RouteInstruction;
use std::fmt;

/// Segments shorter than this followed by a long one count as a sharp turn.
const SHORT_SEGMENT_METRES: f64 = 30.0;
const LONG_SEGMENT_METRES: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharpTurn {
    Left,
    Right,
    Turn,
}

impl SharpTurn {
    pub fn label(&self) -> &'static str {
        match self {
            SharpTurn::Left => "⚠️↙️ SHARP LEFT",
            SharpTurn::Right => "⚠️↘️ SHARP RIGHT",
            SharpTurn::Turn => "⚠️↗️ SHARP TURN",
        }
    }

    /// Label without emoji, for speech.
    pub fn spoken(&self) -> &'static str {
        match self {
            SharpTurn::Left => "Warning, sharp left.",
            SharpTurn::Right => "Warning, sharp right.",
            SharpTurn::Turn => "Warning, sharp turn.",
        }
    }
}

impl fmt::Display for SharpTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Flag `current` as a sharp turn when its text says so, or when a very short
/// segment leads into a long one.
///
/// Direction comes from a plain substring search with "left" checked first, so
/// text mentioning both sides ("keep left, then sharp right") reports
/// [`SharpTurn::Left`]. This is a heuristic limitation.
pub fn classify(current: &RouteInstruction, next: Option<&RouteInstruction>) -> Option<SharpTurn> {
    let text = current.text.to_lowercase();
    let next_distance = next.map_or(0.0, |n| n.distance);

    let is_sharp = text.contains("sharp")
        || (current.distance < SHORT_SEGMENT_METRES && next_distance > LONG_SEGMENT_METRES);
    if !is_sharp {
        return None;
    }

    if text.contains("left") {
        Some(SharpTurn::Left)
    } else if text.contains("right") {
        Some(SharpTurn::Right)
    } else {
        Some(SharpTurn::Turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(text: &str, distance: f64) -> RouteInstruction {
        RouteInstruction::new(text, distance)
    }

    #[test]
    fn sharp_keyword_without_successor() {
        assert_eq!(classify(&step("Turn sharp left", 50.0), None), Some(SharpTurn::Left));
        assert_eq!(
            classify(&step("Make a SHARP RIGHT onto Elm", 400.0), None),
            Some(SharpTurn::Right)
        );
    }

    #[test]
    fn short_then_long_segment_is_generic_sharp_turn() {
        let next = step("x", 150.0);
        assert_eq!(classify(&step("Continue", 20.0), Some(&next)), Some(SharpTurn::Turn));
    }

    #[test]
    fn long_segment_is_not_sharp() {
        let next = step("x", 10.0);
        assert_eq!(classify(&step("Continue", 200.0), Some(&next)), None);
    }

    #[test]
    fn short_segment_at_end_of_route_is_not_sharp() {
        assert_eq!(classify(&step("Turn left", 5.0), None), None);
    }

    #[test]
    fn thresholds_are_strict() {
        let long = step("x", 150.0);
        assert_eq!(classify(&step("Turn left", 30.0), Some(&long)), None);
        let exactly_hundred = step("x", 100.0);
        assert_eq!(classify(&step("Turn left", 10.0), Some(&exactly_hundred)), None);
        assert_eq!(classify(&step("Turn left", 29.9), Some(&long)), Some(SharpTurn::Left));
    }

    #[test]
    fn both_directions_resolve_to_left() {
        assert_eq!(
            classify(&step("Keep right, then sharp left", 80.0), None),
            Some(SharpTurn::Left)
        );
    }

    #[test]
    fn label_text() {
        assert_eq!(SharpTurn::Left.to_string(), "⚠️↙️ SHARP LEFT");
        assert_eq!(SharpTurn::Turn.label(), "⚠️↗️ SHARP TURN");
    }
}
