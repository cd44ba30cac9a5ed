use {anyhow::Result, clap::Subcommand, tgpanel_config::TgPanelConfig};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration (token redacted).
    Show,
    /// Print the path of the config file in use.
    Path,
}

pub fn handle_config(config: &TgPanelConfig, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", render(config)?);
            if !config.telegram.has_token() {
                eprintln!("warning: telegram.token is empty");
            }
        },
        ConfigAction::Path => match tgpanel_config::find_config_file() {
            Some(path) => println!("{}", path.display()),
            None => eprintln!("No config file found; using defaults."),
        },
    }
    Ok(())
}

/// TOML rendering of `config` with the bot token masked.
fn render(config: &TgPanelConfig) -> Result<String> {
    let mut value = toml::Value::try_from(config)?;
    if let Some(token) = value
        .get_mut("telegram")
        .and_then(|t| t.get_mut("token"))
        .filter(|t| t.as_str().is_some_and(|s| !s.is_empty()))
    {
        *token = toml::Value::String("[REDACTED]".into());
    }
    Ok(toml::to_string_pretty(&value)?)
}
