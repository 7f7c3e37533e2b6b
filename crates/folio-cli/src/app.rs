use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::io::Write;
use std::sync::Arc;

use folio_core::settings::API_URL_ENV;
use folio_core::{HttpContentApi, Settings, SettingsToken};

/// Build the content API client from persisted settings and environment
/// overrides, with actionable messages when configuration is missing.
pub fn build_api(settings: &Settings) -> Result<HttpContentApi> {
    let base_url = match settings.effective_api_base_url() {
        Some(url) => url,
        None => anyhow::bail!(
            "No API base URL configured.\n\
             Set one with: folio config --api-url https://api.example.com/v1\n\
             Or set the {API_URL_ENV} environment variable."
        ),
    };

    let token = Arc::new(SettingsToken::from_settings(settings));
    let api = HttpContentApi::new(&base_url, token)?;
    Ok(api)
}

/// Block until the user presses Enter, without echoing input.
pub fn wait_for_enter() -> Result<()> {
    std::io::stdout().flush()?;

    enable_raw_mode()?;
    loop {
        if let Event::Key(key_event) = event::read()? {
            if key_event.code == KeyCode::Enter {
                break;
            }
        }
    }
    disable_raw_mode()?;

    Ok(())
}
