use std::path::Path;

use anyhow::{Context, Result};
use gridsense_advisor::{assess, AcLevel, Assessment, EnergyPrediction, UserInput};
use gridsense_climate::ClimateResolver;
use gridsense_core::{AppError, ClimateConfig, Config};
use gridsense_services::PredictionClient;
use serde::de::DeserializeOwned;

use crate::cli::{AdviseArgs, AnalyzeArgs, ClimateArgs};

pub(crate) async fn climate(config_path: Option<&Path>, args: ClimateArgs) -> Result<()> {
    let (config, _) = Config::load_validated(config_path)?;
    let resolver = build_resolver(&config.climate)?;

    let resolution = resolver.resolve_detailed(&args.postal_code).await;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        let how = if resolution.is_fallback() {
            "postal prefix fallback"
        } else {
            "live weather"
        };
        println!("{} ({})", resolution.category.label(), how);
    }
    Ok(())
}

pub(crate) async fn analyze(config_path: Option<&Path>, args: AnalyzeArgs) -> Result<()> {
    let (config, _) = Config::load_validated(config_path)?;
    let mut input: UserInput = read_json(&args.input)?;
    if let Some(hours) = args.ac_hours {
        input.ac_level = AcLevel::from_hours(hours);
    }

    input
        .validate()
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

    let postal = args.postal.unwrap_or_else(|| input.location.clone());
    let resolver = build_resolver(&config.climate)?;
    if let Some(category) = resolver.detect(&postal).await {
        input.climate = category;
        input.location = postal;
    }

    let client = PredictionClient::new(
        &config.prediction.api_url,
        config.prediction.request_timeout(),
    )
    .map_err(AppError::from)?;
    let prediction = client.predict(&input).await.map_err(AppError::from)?;

    print_assessment(&assess(prediction, &input))
}

pub(crate) fn advise(args: AdviseArgs) -> Result<()> {
    let input: UserInput = read_json(&args.input)?;
    let prediction: EnergyPrediction = read_json(&args.prediction)?;
    print_assessment(&assess(prediction, &input))
}

pub(crate) async fn health(config_path: Option<&Path>) -> Result<()> {
    let (config, _) = Config::load_validated(config_path)?;
    let client = PredictionClient::new(
        &config.prediction.api_url,
        config.prediction.request_timeout(),
    )
    .map_err(AppError::from)?;

    let healthy = client.health().await.map_err(AppError::from)?;
    println!(
        "{}: {}",
        client.base_url(),
        if healthy { "ok" } else { "unhealthy" }
    );
    if !healthy {
        anyhow::bail!("Prediction service at {} is not healthy", client.base_url());
    }
    Ok(())
}

fn build_resolver(config: &ClimateConfig) -> Result<ClimateResolver> {
    ClimateResolver::from_config(config).context("Failed to create climate lookup clients")
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .map_err(AppError::Io)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_json::from_str(&contents)
        .map_err(|e| AppError::InvalidInput(format!("{}: {}", path.display(), e)))?;
    Ok(value)
}

fn print_assessment(assessment: &Assessment) -> Result<()> {
    tracing::info!(
        bill = assessment.prediction.predicted_bill_usd,
        recommendations = assessment.recommendations.len(),
        goal_met = assessment.goal_met(),
        "Assessment ready"
    );
    println!("{}", serde_json::to_string_pretty(assessment)?);
    Ok(())
}
