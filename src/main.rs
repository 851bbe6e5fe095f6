use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use stride::Service;

fn data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("STRIDE_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|dir| dir.join("stride"))
        .context("could not determine a data directory; set STRIDE_DATA_DIR")
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let base_dir = data_dir()?;
    std::fs::create_dir_all(&base_dir)
        .with_context(|| format!("failed to create {}", base_dir.display()))?;
    info!("Opening training log in {}", base_dir.display());

    let service = Service::open(&base_dir).await?;

    let activities = service.list_activities().await?;
    info!("{} activities stored", activities.len());

    for best in service.list_records().await? {
        if best.time_s.is_finite() {
            info!(
                "Personal best {} {:.0} m: {:.1} s",
                best.sport.as_str(),
                best.distance_m,
                best.time_s
            );
        }
    }

    Ok(())
}
