//! Config command handler

use crate::commands::ConfigArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::FileConfig;

/// Execute the config command
pub fn execute_config(config: &CliConfig, args: &ConfigArgs) -> CliResult<()> {
    let shown = if args.defaults {
        CliConfig::new()
    } else {
        config.clone()
    };
    print!("{}", render_config(&shown, args.yaml)?);
    Ok(())
}

/// Render a configuration as text or as a YAML config file
pub fn render_config(config: &CliConfig, yaml: bool) -> CliResult<String> {
    if yaml {
        let file = FileConfig {
            record: Some(config.record.clone()),
            root: Some(config.root.clone()),
            color: Some(config.color),
        };
        return serde_yaml_ng::to_string(&file).map_err(|e| CliError::config(e.to_string()));
    }

    Ok(format!(
        "Current configuration:\n  Verbosity: {:?}\n  Color: {:?}\n  Root: {}\n  Record: {}\n",
        config.verbosity,
        config.color,
        config.root.display(),
        config.record_path().display(),
    ))
}
