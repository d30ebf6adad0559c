use crate::enrich::InstructionEnricher;
use crate::route::{Route, VehicleMode};
use crate::turns::{self, SharpTurn};
use std::fmt;

/// Emoji shown in front of a step that is not a sharp turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionEmoji {
    Finish,
    Left,
    Right,
    Straight,
    Forward,
}

impl DirectionEmoji {
    /// Pick an emoji from the routing text. Arrival wins over direction words.
    pub fn for_text(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("arrive") || text.contains("destination") {
            DirectionEmoji::Finish
        } else if text.contains("left") {
            DirectionEmoji::Left
        } else if text.contains("right") {
            DirectionEmoji::Right
        } else if text.contains("straight") || text.contains("continue") {
            DirectionEmoji::Straight
        } else {
            DirectionEmoji::Forward
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            DirectionEmoji::Finish => "🏁",
            DirectionEmoji::Left => "⬅️",
            DirectionEmoji::Right => "➡️",
            DirectionEmoji::Straight => "⬆️",
            DirectionEmoji::Forward => "↗️",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMarker {
    Sharp(SharpTurn),
    Direction(DirectionEmoji),
}

impl StepMarker {
    /// Display prefix including its trailing separator.
    pub fn prefix(&self) -> String {
        match self {
            StepMarker::Sharp(turn) => format!("{}: ", turn.label()),
            StepMarker::Direction(emoji) => format!("{} ", emoji.emoji()),
        }
    }
}

/// One display line per route step.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrationLine {
    pub marker: StepMarker,
    pub prefix_label: String,
    pub text: String,
}

impl NarrationLine {
    pub fn new(marker: StepMarker, text: String) -> Self {
        Self {
            prefix_label: marker.prefix(),
            marker,
            text,
        }
    }

    pub fn sharp_turn(&self) -> Option<SharpTurn> {
        match self.marker {
            StepMarker::Sharp(turn) => Some(turn),
            StepMarker::Direction(_) => None,
        }
    }
}

impl fmt::Display for NarrationLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix_label, self.text)
    }
}

/// Composes turn classification, enrichment and emoji choice into the final
/// narration, one line per instruction in route order.
pub struct NarrationAssembler<'a> {
    enricher: InstructionEnricher<'a>,
}

impl<'a> NarrationAssembler<'a> {
    pub fn new(enricher: InstructionEnricher<'a>) -> Self {
        Self { enricher }
    }

    pub fn assemble(&self, route: &Route, vehicle_mode: VehicleMode) -> Vec<NarrationLine> {
        log::debug!(
            "Assembling {} steps for {} trip",
            route.instructions.len(),
            vehicle_mode
        );

        let mut lines = Vec::with_capacity(route.instructions.len());
        for (idx, step) in route.instructions.iter().enumerate() {
            let next = route.instructions.get(idx + 1);
            let marker = match turns::classify(step, next) {
                Some(turn) => StepMarker::Sharp(turn),
                None => StepMarker::Direction(DirectionEmoji::for_text(&step.text)),
            };
            let text = self.enricher.enrich(&step.text, step.distance);
            lines.push(NarrationLine::new(marker, text));
        }
        lines
    }
}

/// Number of steps flagged as sharp turns.
pub fn count_sharp_turns(lines: &[NarrationLine]) -> usize {
    lines.iter().filter(|l| l.sharp_turn().is_some()).count()
}
