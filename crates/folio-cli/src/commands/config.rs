//! View and update persisted settings.

use anyhow::Result;
use clap::Args;
use console::style;

use folio_core::Settings;
use folio_core::settings::{API_TOKEN_ENV, API_URL_ENV};

#[derive(Args)]
pub struct ConfigArgs {
    /// Set the content API base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Set the API bearer token
    #[arg(long)]
    pub api_token: Option<String>,

    /// Set the preferred input device (see `folio devices`)
    #[arg(long)]
    pub input_device: Option<String>,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    let mut settings = Settings::load();

    let mut changed = false;
    if let Some(url) = args.api_url {
        settings.api_base_url = Some(url);
        changed = true;
    }
    if let Some(token) = args.api_token {
        settings.api_token = Some(token);
        changed = true;
    }
    if let Some(device) = args.input_device {
        settings.input_device = Some(device);
        changed = true;
    }

    if changed {
        settings.save()?;
        println!("{} settings saved", style("✓").green());
        return Ok(());
    }

    println!("API base URL: {}", display(&settings.api_base_url));
    println!("API token:    {}", mask(&settings.api_token));
    println!("Input device: {}", display(&settings.input_device));
    println!(
        "\nEnvironment overrides: {API_URL_ENV}, {API_TOKEN_ENV}."
    );
    if let Some(path) = Settings::config_path() {
        println!("Settings file: {}", path.display());
    }

    Ok(())
}

fn display(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("(not set)")
}

fn mask(value: &Option<String>) -> String {
    match value {
        Some(token) if token.len() > 4 => format!("...{}", &token[token.len() - 4..]),
        Some(_) => "(set)".to_string(),
        None => "(not set)".to_string(),
    }
}
