use crate::commands::{CmdMessage, CmdResult};
use crate::config::FolioConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Show or change `config.json` in `data_dir`. Unknown keys and bad values are
/// reported as error messages; nothing is written for them.
pub fn run(data_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = FolioConfig::load(data_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => return Ok(result.with_config(config)),
        ConfigAction::ShowKey(key) => match config.get(&key) {
            Some(value) => result.add_message(CmdMessage::info(value)),
            None => result.add_message(unknown_key(&key)),
        },
        ConfigAction::Set(key, value) => match config.set(&key, &value) {
            Ok(()) => {
                config.save(data_dir)?;
                let shown = config.get(&key).unwrap_or(value);
                result.add_message(CmdMessage::success(format!("{} set to {}", key, shown)));
                return Ok(result.with_config(config));
            }
            Err(reason) => result.add_message(CmdMessage::error(reason)),
        },
    }
    Ok(result)
}

fn unknown_key(key: &str) -> CmdMessage {
    CmdMessage::error(format!(
        "Unknown config key: {} (known: {})",
        key,
        FolioConfig::KEYS.join(", ")
    ))
}
