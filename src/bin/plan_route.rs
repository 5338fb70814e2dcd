use runroute::config::Config;
use runroute::models::{Location, RouteRequest, RunPlan};
use runroute::AppState;
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        "\
Usage: plan_route --start=LOCATION [OPTIONS]

LOCATION is an address or \"lat,lng\".

Options:
  --start=LOCATION      Where the run starts (required)
  --end=LOCATION        Finish somewhere else (point-to-point)
  --distance=KM         Target distance for loop and out-and-back routes
  --loop                Return to the start via synthesized waypoints
  --bearing=DEG         Out-and-back turnaround direction (0 = north)
  --no-elevation        Skip terrain analysis
  --json                Output the plan as JSON
  --help                Show this help message"
    );
}

fn print_plan(plan: &RunPlan) {
    let route = &plan.route;
    println!("{} route: {} -> {}", route.kind, route.origin, route.destination);
    println!(
        "  Distance: {:.2} km ({})",
        route.distance_km, route.directions.summary
    );
    for waypoint in &route.waypoints {
        println!("  Via: {}", waypoint);
    }
    for estimate in &route.pace_estimates {
        println!("  {:?}: {}", estimate.level, estimate);
    }

    if let Some(ref profile) = plan.elevation {
        println!(
            "  Elevation: +{:.0}m / -{:.0}m (range {:.0}-{:.0}m, grade {:.2}%)",
            profile.elevation_gain_m,
            profile.elevation_loss_m,
            profile.min_elevation_m,
            profile.max_elevation_m,
            profile.average_grade_pct
        );
        println!("  {}", profile.recommendation());
    }
    if let Some(ref error) = plan.elevation_error {
        println!("  Elevation unavailable: {}", error);
    }

    println!("  Map: {}", route.maps_url);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (quiet unless RUST_LOG says otherwise)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "runroute=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help") {
        print_help();
        return Ok(());
    }

    let Some(start) = args.iter().find_map(|a| a.strip_prefix("--start=")) else {
        print_help();
        std::process::exit(2);
    };
    let end = args.iter().find_map(|a| a.strip_prefix("--end="));
    let distance_km: Option<f64> = args
        .iter()
        .find_map(|a| a.strip_prefix("--distance="))
        .map(|s| s.parse::<f64>().map_err(|_| format!("Invalid --distance: {}", s)))
        .transpose()?;
    let bearing_deg: Option<f64> = args
        .iter()
        .find_map(|a| a.strip_prefix("--bearing="))
        .map(|s| s.parse::<f64>().map_err(|_| format!("Invalid --bearing: {}", s)))
        .transpose()?;
    let is_loop = args.iter().any(|a| a == "--loop");
    let analyze_elevation = !args.iter().any(|a| a == "--no-elevation");
    let json_output = args.iter().any(|a| a == "--json");

    let request = RouteRequest {
        start_location: Location::parse(start),
        end_location: end.map(Location::parse),
        target_distance_km: distance_km,
        is_loop,
        out_and_back_bearing_deg: bearing_deg,
        loop_waypoints: None,
        avoid_highways: true,
    };

    let config = Config::from_env().map_err(|e| format!("Config error: {}", e))?;
    let state = AppState::new(&config.google_maps, config.planner)?;

    let plan = state.run_planner.plan(&request, analyze_elevation).await?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }

    Ok(())
}
