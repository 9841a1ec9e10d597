use anyhow::Context;
use tracing_subscriber::EnvFilter;

use breatheasy::{BreatheEasy, BreatheEasyConfig, Secrets};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = BreatheEasyConfig::load().context("loading configuration")?;
    let secrets = Secrets::from_env();
    let app = BreatheEasy::new(&config, &secrets).context("building clients")?;

    let city = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Delhi, India".to_string());

    let aqi = app.current_aqi(&city);
    println!("{}", serde_json::to_string_pretty(&aqi)?);

    let risks = app.pollutant_risks(&city);
    println!("{}", serde_json::to_string_pretty(&risks)?);

    let weather = app.current_weather(&city);
    println!("{}", serde_json::to_string_pretty(&weather)?);

    let forecast = app.weather_forecast(&city, 3);
    println!("{}", serde_json::to_string_pretty(&forecast)?);

    Ok(())
}
