use serde::Serialize;
use site_content::config::SiteConfig;
use site_content::lifecycle::{setup_tracing, SiteSystem};
use site_content::pages::Page;
use site_content::store::seed::seeded_store;
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

const CONFIG_ENV: &str = "SITE_CONFIG";

fn print_json(label: &str, value: &impl Serialize) -> Result<(), Box<dyn Error>> {
    println!("--- {label} ---\n{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_page(page: &impl Page, config: &SiteConfig) -> Result<(), Box<dyn Error>> {
    print_json(&page.path(), page)?;
    print_json("metadata", &page.metadata(config))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing();

    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => SiteConfig::load(Path::new(&path))?,
        Err(_) => SiteConfig::default(),
    };
    info!(base_url = %config.base_url, "Starting content layer");

    let system = SiteSystem::new(config.clone(), Arc::new(seeded_store()))?;

    print_json("layout", &system.layout().await)?;
    print_page(&system.home().await, &config)?;
    print_page(&system.team().await, &config)?;
    print_page(&system.strategies().await, &config)?;
    print_page(&system.insights().await, &config)?;
    print_page(&system.contact().await, &config)?;
    print_page(&system.legal("privacy-policy").await?, &config)?;

    for kind in ["cookie-policy", "made-up-type"] {
        match system.legal(kind).await {
            Ok(page) => print_page(&page, &config)?,
            Err(e) => println!("--- /legal/{kind} ---\n{e}"),
        }
    }

    let stats = system.hooks.client().stats().await?;
    info!(?stats, "Cache after first render");

    system.shutdown().await?;
    Ok(())
}
