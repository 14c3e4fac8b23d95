use anyhow::Context;
use serde::Serialize;

use cancionero_config::config_backend;
use cancionero_http::{API_URL_ENV, ApiConfig};

use crate::cli::ConfigAction;
use crate::infrastructure::terminal::Terminal;

/// Effective configuration as shown to the user.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ConfigDto {
  pub config_file: String,
  pub base_url: String,
  pub api_root: String,
  pub timeout_secs: u64,
  pub portable: bool,
  pub env_override: Option<String>,
}

impl ConfigDto {
  pub fn new(cfg: &ApiConfig, config_file: String, portable: bool, env_override: Option<String>) -> Self {
    ConfigDto {
      config_file,
      base_url: cfg.base_url.clone(),
      api_root: cfg.api_root(),
      timeout_secs: cfg.timeout_secs,
      portable,
      env_override,
    }
  }

  pub fn render(&self) -> String {
    let mut lines = vec![
      format!("config file:  {}{}", self.config_file, if self.portable { " (portable)" } else { "" }),
      format!("base_url:     {}", self.base_url),
      format!("api root:     {}", self.api_root),
      format!("timeout_secs: {}", self.timeout_secs),
    ];
    if let Some(url) = &self.env_override {
      lines.push(format!("({API_URL_ENV}={url} overrides the file)"));
    }
    lines.join("\n")
  }
}

/// File `[api]` section, then `CANCIONERO_API_URL`, then `--api-url`.
///
/// An unusable config file only costs the file layer; the other two still apply.
pub fn resolve_api_config(cli_url: Option<String>) -> ApiConfig {
  with_cli_override(ApiConfig::load_or_default(), cli_url)
}

fn with_cli_override(cfg: ApiConfig, cli_url: Option<String>) -> ApiConfig {
  match cli_url.filter(|url| !url.trim().is_empty()) {
    Some(url) => cfg.with_base_url(url),
    None => cfg,
  }
}

pub fn handle<R, W>(
  action: ConfigAction,
  cli_url: Option<String>,
  term: &mut Terminal<R, W>,
) -> anyhow::Result<()>
where
  R: std::io::BufRead,
  W: std::io::Write,
{
  match action {
    ConfigAction::Show { json } => {
      let cfg = resolve_api_config(cli_url);
      let env_override = std::env::var(API_URL_ENV).ok().filter(|v| !v.trim().is_empty());
      let (config_file, portable) = match config_backend() {
        Ok(backend) => (backend.config_path().display().to_string(), backend.paths().is_portable()),
        Err(e) => (format!("(no disponible: {e})"), false),
      };
      let dto = ConfigDto::new(&cfg, config_file, portable, env_override);
      let text = if json { serde_json::to_string_pretty(&dto)? } else { dto.render() };
      term.print(&text)?;
    }
    ConfigAction::Set { base_url, timeout_secs } => {
      // The env override is never persisted, so start from the file alone.
      let backend = config_backend().context("could not open the config directory")?;
      let mut cfg = ApiConfig::load_from(backend).context("could not load configuration")?;
      if let Some(url) = base_url {
        cfg.base_url = url;
      }
      if let Some(secs) = timeout_secs {
        cfg.timeout_secs = secs;
      }
      cfg.save_to(backend).context("could not save configuration")?;
      tracing::info!(base_url = %cfg.base_url, "api configuration saved");
      term.print(&format!("Configuración guardada en {}", backend.config_path().display()))?;
    }
  }
  Ok(())
}
