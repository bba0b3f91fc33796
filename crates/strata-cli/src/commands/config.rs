//! `strata config`: read and write configuration values.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Keys `get` and `set` understand.
const KEYS: [&str; 4] = [
    "defaults.roles",
    "output.no_color",
    "output.format",
    "templates.local_path",
];

/// Dispatch to the correct config subcommand.
///
/// `config_file` is the `--config` path, if one was given; it is also the
/// file `init` and `set` write to.
pub fn execute(
    cmd: ConfigCommands,
    config: &AppConfig,
    config_file: Option<&PathBuf>,
    output: &OutputManager,
) -> CliResult<()> {
    let path = config_file
        .cloned()
        .unwrap_or_else(AppConfig::config_path);

    match cmd {
        ConfigCommands::Init { force } => init(&path, force, output)?,

        ConfigCommands::Get { key } => {
            let value = get_config_value(config, &key)?;
            output.print(&format!("{key} = {value}"))?;
        }

        ConfigCommands::Set { key, value } => {
            set_config_value(&path, &key, &value)?;
            output.success(&format!("Set {key} = {value} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                return output.json(config);
            }
            output.header("Current Configuration:")?;
            output.print(&to_toml(config)?)?;
        }

        ConfigCommands::Path => {
            output.print(&path.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn init(path: &Path, force: bool, output: &OutputManager) -> CliResult<()> {
    if path.exists() && !force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            path.display(),
        ))?;
        return Ok(());
    }

    write_file(path, &to_toml(&AppConfig::default())?)?;
    output.success(&format!("Configuration created at {}", path.display()))?;
    Ok(())
}

fn to_toml(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

fn write_file(path: &Path, contents: &str) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CliError::IoError {
            message: format!("Failed to create config directory '{}'", parent.display()),
            source: e,
        })?;
    }

    fs::write(path, contents).map_err(|e| CliError::IoError {
        message: format!("Failed to write config to '{}'", path.display()),
        source: e,
    })
}

fn unknown_key(key: &str) -> CliError {
    CliError::InvalidInput {
        message: format!("Unknown config key '{key}' (known: {})", KEYS.join(", ")),
    }
}

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "defaults.roles" => Ok(config.defaults.roles.join(",")),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        "templates.local_path" => Ok(config
            .templates
            .local_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()),
        _ => Err(unknown_key(key)),
    }
}

/// Parse `raw` into the TOML value `key` expects.
fn parse_value(key: &str, raw: &str) -> CliResult<toml::Value> {
    match key {
        "defaults.roles" => Ok(toml::Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| toml::Value::String(s.to_string()))
                .collect(),
        )),
        "output.no_color" => raw.parse::<bool>().map(toml::Value::Boolean).map_err(|_| {
            CliError::InvalidInput {
                message: format!("'{raw}' is not true or false"),
            }
        }),
        "output.format" | "templates.local_path" => Ok(toml::Value::String(raw.to_string())),
        _ => Err(unknown_key(key)),
    }
}

/// Update one key in the TOML file at `path`, creating the file if needed.
fn set_config_value(path: &Path, key: &str, raw: &str) -> CliResult<()> {
    let value = parse_value(key, raw)?;
    let Some((section, field)) = key.split_once('.') else {
        return Err(unknown_key(key));
    };

    let mut document: toml::Table = if path.exists() {
        let text = fs::read_to_string(path).map_err(|e| CliError::IoError {
            message: format!("Failed to read config '{}'", path.display()),
            source: e,
        })?;
        toml::from_str(&text).map_err(|e: toml::de::Error| CliError::ConfigError {
            message: format!("{} is not valid TOML", path.display()),
            source: Some(Box::new(e)),
        })?
    } else {
        toml::Table::new()
    };

    let table = document
        .entry(section)
        .or_insert(toml::Value::Table(toml::Table::new()));
    let toml::Value::Table(table) = table else {
        return Err(CliError::ConfigError {
            message: format!("'{section}' in {} is not a table", path.display()),
            source: None,
        });
    };
    table.insert(field.to_string(), value);

    let text = toml::to_string_pretty(&document).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;
    write_file(path, &text)
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "defaults.roles").unwrap(), "php,test");
        assert_eq!(get_config_value(&cfg, "output.no_color").unwrap(), "false");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::InvalidInput { .. })
        ));
    }

    #[test]
    fn set_creates_file_and_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        set_config_value(&path, "defaults.roles", "php, bin").unwrap();
        set_config_value(&path, "output.no_color", "true").unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.roles, vec!["php", "bin"]);
        assert!(cfg.output.no_color);
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn set_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[output]\nformat = \"plain\"\n").unwrap();

        set_config_value(&path, "output.no_color", "true").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("format = \"plain\""));
        assert!(text.contains("no_color = true"));
    }

    #[test]
    fn set_rejects_bad_bool() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        assert!(matches!(
            set_config_value(&path, "output.no_color", "maybe"),
            Err(CliError::InvalidInput { .. })
        ));
        assert!(!path.exists());
    }
}
