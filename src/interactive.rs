use crate::route::VehicleMode;
use crate::trip::TripRequest;
use std::io::{self, BufRead, Write};

/// Print `label` and read one trimmed line. `None` on end of input.
pub fn prompt_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<Option<String>> {
    write!(output, "{}", label)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask for a travel mode, defaulting to car on empty or unknown input.
pub fn prompt_vehicle_mode<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Option<VehicleMode>> {
    let Some(answer) = prompt_line(input, output, "Enter mode of transport (car, foot, bike, hike): ")? else {
        return Ok(None);
    };

    match VehicleMode::parse(&answer) {
        Some(mode) => Ok(Some(mode)),
        None => {
            writeln!(output, "Invalid or empty input. Defaulting to 'car'.")?;
            Ok(Some(VehicleMode::Car))
        }
    }
}

/// Comma-separated waypoint names; blank entries are dropped.
pub fn parse_waypoints(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ask for a whole trip. `mode` skips the mode question when already known.
/// Returns `None` once input is exhausted.
pub fn prompt_trip_request<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    mode: Option<VehicleMode>,
    ask_waypoints: bool,
) -> io::Result<Option<TripRequest>> {
    let vehicle_mode = match mode {
        Some(mode) => mode,
        None => match prompt_vehicle_mode(input, output)? {
            Some(mode) => mode,
            None => return Ok(None),
        },
    };

    let Some(start) = prompt_line(input, output, "Starting Location: ")? else {
        return Ok(None);
    };
    let waypoints = if ask_waypoints {
        match prompt_line(input, output, "Stops along the way (comma-separated, blank for none): ")? {
            Some(answer) => parse_waypoints(&answer),
            None => return Ok(None),
        }
    } else {
        Vec::new()
    };
    let Some(destination) = prompt_line(input, output, "Destination: ")? else {
        return Ok(None);
    };

    Ok(Some(TripRequest {
        vehicle_mode,
        start,
        destination,
        waypoints,
    }))
}
