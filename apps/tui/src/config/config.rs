use dotenv::dotenv;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Credentials for the remote worksheet service. When present and parseable
/// the service becomes the authoritative backend; otherwise the tool runs in
/// local CSV mode with no user-visible difference beyond the status caption.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetConfig {
    #[serde(rename = "sheet_service_url")]
    pub base_url: String,
    #[serde(rename = "sheet_service_token")]
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub csv_path: PathBuf,
    pub photos_dir: PathBuf,
    pub sheet: Option<SheetConfig>,
}

/// Initializes the application configuration from `.env` and the process
/// environment.
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let csv_path = env::var("SURVEY_CSV")
        .map_or_else(|_| PathBuf::from("survey_data.csv"), PathBuf::from);
    let photos_dir =
        env::var("PHOTOS_DIR").map_or_else(|_| PathBuf::from("photos"), PathBuf::from);

    Ok(AppConfig {
        csv_path,
        photos_dir,
        sheet: load_sheet_config(),
    })
}

/// Resolves worksheet credentials: environment variables first, then the
/// secrets file. Any missing or malformed source means local mode; startup
/// never fails because the remote is unavailable.
fn load_sheet_config() -> Option<SheetConfig> {
    if let (Ok(base_url), Ok(token)) = (
        env::var("SHEET_SERVICE_URL"),
        env::var("SHEET_SERVICE_TOKEN"),
    ) {
        if !base_url.trim().is_empty() {
            return Some(SheetConfig { base_url, token });
        }
    }

    let secrets_path = env::var("SECRETS_FILE").unwrap_or_else(|_| ".secrets.json".to_string());
    let raw = match std::fs::read_to_string(&secrets_path) {
        Ok(raw) => raw,
        Err(_) => return None,
    };

    match serde_json::from_str::<SheetConfig>(&raw) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("ignoring malformed secrets file {secrets_path}: {e}");
            None
        }
    }
}
