use clap::Parser;
use directions::{
    DirectionsError, TripRequest, VehicleMode, config::Config, display_plain_directions, display_trip_summary,
    graphhopper::GraphHopper, interactive::prompt_trip_request, logging::init_logging, plan_trip,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Print turn-by-turn directions between two places", long_about = None)]
struct Args {
    /// Starting location (prompted for when omitted)
    #[arg(value_name = "START")]
    start: Option<String>,

    /// Destination (prompted for when omitted)
    #[arg(value_name = "DESTINATION")]
    destination: Option<String>,

    /// Mode of transport
    #[arg(short, long, value_enum)]
    mode: Option<VehicleMode>,
}

fn main() {
    init_logging();
    let args = Args::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let graphhopper = match GraphHopper::new(config.graphhopper_api_key) {
        Ok(gh) => gh,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let one_shot = match (&args.start, &args.destination) {
        (Some(start), Some(destination)) => Some(TripRequest {
            vehicle_mode: args.mode.unwrap_or_default(),
            start: start.clone(),
            destination: destination.clone(),
            waypoints: Vec::new(),
        }),
        _ => None,
    };

    loop {
        let request = match &one_shot {
            Some(request) => request.clone(),
            None => {
                let stdin = std::io::stdin();
                match prompt_trip_request(&mut stdin.lock(), &mut std::io::stdout(), args.mode, false) {
                    Ok(Some(request)) => request,
                    Ok(None) => {
                        eprintln!("Error: {}", DirectionsError::NoTripEntered);
                        std::process::exit(1);
                    }
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                }
            }
        };

        match plan_trip(&graphhopper, &request) {
            Ok(trip) => {
                println!("=================================================");
                println!(
                    "Directions from {} to {} by {}",
                    trip.context.origin.name, trip.context.destination.name, trip.context.vehicle_mode
                );
                println!("=================================================");
                display_plain_directions(&trip.route);
                display_trip_summary(&trip.context);
                break;
            }
            Err(e) if e.is_retryable() && one_shot.is_none() => {
                println!("*************************************************");
                println!("{}", e);
                println!("*************************************************");
                println!("Please enter valid locations again.\n");
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
