use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "spectrum-logger", version, about = "Field survey logger TUI")]
pub struct CliArgs {
    /// Print survey stats and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless stats as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override backup CSV path
    #[arg(long, value_name = "PATH")]
    pub csv: Option<String>,

    /// Override photo storage directory
    #[arg(long = "photos-dir", value_name = "PATH")]
    pub photos_dir: Option<String>,

    /// Override worksheet secrets file
    #[arg(long, value_name = "PATH")]
    pub secrets: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(path) = &self.csv {
            std::env::set_var("SURVEY_CSV", path);
        }
        if let Some(dir) = &self.photos_dir {
            std::env::set_var("PHOTOS_DIR", dir);
        }
        if let Some(path) = &self.secrets {
            std::env::set_var("SECRETS_FILE", path);
        }
        if self.debug {
            std::env::set_var("RUST_LOG", "debug");
        }
    }
}
