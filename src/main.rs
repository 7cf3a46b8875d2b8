// main.rs

use std::process::ExitCode;

use dense_matrix::config::JobConfig;
use dense_matrix::csv_io;

static DEFAULT_JOB: &str = "./data/job.json";

fn main() -> ExitCode {
    let job_location = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_JOB.to_string());

    let config = match JobConfig::from_json(&job_location) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading job {}: {}", job_location, e);
            return ExitCode::FAILURE;
        }
    };

    // RUST_LOG wins over the level in the job file
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let result = match config.run() {
        Ok(result) => result,
        Err(e) => {
            log::error!("{:?} failed: {}", config.operation, e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(location) = &config.output_csv {
        if let Err(e) = csv_io::write_csv(&result, location) {
            log::error!("Error writing {}: {}", location, e);
            return ExitCode::FAILURE;
        }
        log::info!("wrote {}x{} result to {}", result.rows(), result.cols(), location);
    }

    match serde_json::to_string(&result) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Error serializing result: {}", e);
            ExitCode::FAILURE
        }
    }
}
