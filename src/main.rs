//! Content Monetization Modeler - Demo entry point
//!
//! Loads the fitted pipeline, predicts revenue for the default form values
//! and prints the top revenue drivers.

use std::process::ExitCode;

use monetization_core::api::commands;
use monetization_core::constants;
use monetization_core::{ModelConfig, ModelService, RawInput};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}...", constants::APP_NAME, constants::APP_VERSION);

    let config = ModelConfig::from_env();
    let model_path = constants::get_model_path();
    let service = ModelService::from_path(&model_path, config);

    if let Err(e) = commands::load_model(&service) {
        log::error!("Cannot start without a model: {}", e);
        return ExitCode::FAILURE;
    }

    let raw = RawInput::default();
    match commands::predict_revenue(&service, &raw) {
        Ok(prediction) => println!("Estimated Ad Revenue: {}", prediction.formatted),
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    }

    match commands::top_revenue_drivers(&service) {
        Ok(chart) => {
            println!("{}:", chart.title);
            for (label, value) in chart.labels.iter().zip(&chart.values) {
                println!("  {:<28} {:>12.4}", label, value);
            }
        }
        Err(e) => log::warn!("Insights unavailable: {}", e),
    }

    let status = commands::engine_status(&service);
    log::info!(
        "Layout v{} (hash: {:08x}), {} predictions, avg {:.3}ms",
        status.layout.version,
        status.layout.hash,
        status.prediction_count,
        status.avg_latency_ms
    );

    ExitCode::SUCCESS
}
