// src/config/validate.rs

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{DuelistError, Result};
use crate::logging::parse_level_str;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::DuelistError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_storage(cfg)?;
    validate_picker(cfg)?;
    validate_date_format(cfg)?;
    validate_open(cfg)?;
    validate_logging(cfg)?;
    Ok(())
}

fn validate_storage(cfg: &RawConfigFile) -> Result<()> {
    if let Some(path) = &cfg.storage.path {
        if path.as_os_str().is_empty() {
            return Err(DuelistError::ConfigError(
                "[storage].path must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_picker(cfg: &RawConfigFile) -> Result<()> {
    if let Some(program) = cfg.picker.command.first() {
        if program.trim().is_empty() {
            return Err(DuelistError::ConfigError(
                "[picker].command must start with a program name".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_date_format(cfg: &RawConfigFile) -> Result<()> {
    let fmt = &cfg.display.date_format;
    if fmt.is_empty() {
        return Err(DuelistError::ConfigError(
            "[display].date_format must not be empty".to_string(),
        ));
    }
    if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        return Err(DuelistError::ConfigError(format!(
            "[display].date_format '{fmt}' is not a valid strftime pattern"
        )));
    }
    // Time-of-day and offset fields parse fine but cannot render a bare date.
    let sample = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap_or_default();
    let mut rendered = String::new();
    if write!(rendered, "{}", sample.format(fmt)).is_err() {
        return Err(DuelistError::ConfigError(format!(
            "[display].date_format '{fmt}' uses time or offset fields; only date fields are allowed"
        )));
    }
    Ok(())
}

fn validate_open(cfg: &RawConfigFile) -> Result<()> {
    if cfg.open.command.trim().is_empty() {
        return Err(DuelistError::ConfigError(
            "[open].command must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_logging(cfg: &RawConfigFile) -> Result<()> {
    if let Some(level) = &cfg.logging.level {
        if parse_level_str(level).is_none() {
            return Err(DuelistError::ConfigError(format!(
                "[logging].level '{level}' is not one of error, warn, info, debug, trace"
            )));
        }
    }
    Ok(())
}
