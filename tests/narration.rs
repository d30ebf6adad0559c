use directions::{
    InstructionEnricher, NarrationAssembler, Place, Route, RouteInstruction, SystemClock,
    TripContext, TripTipGenerator, VehicleMode,
    narration::{DirectionEmoji, StepMarker},
    tips::TIP_NOT_AVAILABLE,
    turns::SharpTurn,
};

fn bike_route() -> Route {
    Route {
        instructions: vec![
            RouteInstruction::new("Turn sharp left", 50.0).with_sign(-2),
            RouteInstruction::new("Continue straight", 3000.0),
        ],
        total_distance_metres: 3050.0,
        total_time_millis: 732_000,
    }
}

#[test]
fn offline_bike_trip_narration() {
    let assembler = NarrationAssembler::new(InstructionEnricher::new(None));
    let lines = assembler.assemble(&bike_route(), VehicleMode::Bike);

    assert_eq!(lines.len(), 2);

    assert_eq!(lines[0].marker, StepMarker::Sharp(SharpTurn::Left));
    assert_eq!(lines[0].prefix_label, "⚠️↙️ SHARP LEFT: ");
    assert_eq!(lines[0].text, "Turn sharp left (0.1 km)");

    assert_eq!(lines[1].marker, StepMarker::Direction(DirectionEmoji::Straight));
    assert_eq!(lines[1].prefix_label, "⬆️ ");
    assert_eq!(lines[1].text, "Continue straight (3.0 km)");
}

#[test]
fn offline_tip_is_sentinel() {
    let route = bike_route();
    let context = TripContext::new(
        Place::new("Amsterdam", 52.37, 4.89),
        Place::new("Haarlem", 52.38, 4.64),
        vec![],
        VehicleMode::Bike,
        &route,
    );
    assert_eq!(context.duration_hms(), "00:12:12");

    let clock = SystemClock;
    let tip = TripTipGenerator::new(None, &clock).generate_tip(&context);
    assert_eq!(tip, TIP_NOT_AVAILABLE);
}
