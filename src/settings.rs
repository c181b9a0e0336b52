//! # Settings Module
//!
//! ## Purpose
//! Typed configuration of a run. The command line passes optional settings as
//! `key=value` tokens after the positional arguments; every key maps to one
//! validated field of [`AnalysisOptions`] and unknown keys are rejected.
//!
//! ## Recognised keys
//! | Key | Field | Value |
//! |-----|-------|-------|
//! | `drop_rev` | `drop_reversible` | `True`/`False` |
//! | `title_page_text` | `title_page_text` | free text |
//! | `remove_l_reactions` | `remove_loss_reactions` | `A+B=C,D=E+F` or `['A+B=C']` |
//! | `remove_p_reactions` | `remove_production_reactions` | list |
//! | `exclusive_l_reactions` | `exclusive_loss_reactions` | list |
//! | `exclusive_p_reactions` | `exclusive_production_reactions` | list |
//! | `lump_l_reactions` | `lump_loss_reactions` | `{'NO2':{'NOx':['NO2+O3=NO3']}}` |
//! | `lump_p_reactions` | `lump_production_reactions` | mapping |
//! | `report_path` | `report_path` | output file prefix |
//! | `log_level` | `log_level` | `error`, `warn`, `info`, `debug`, `trace`, `off` |
//! | `save_logs` | `save_logs` | log file path |
//! | `options_file` | - | JSON document with any of the fields, read first |
//!
//! ## Usage Pattern
//! ```rust
//! use rates_analysis::settings::AnalysisOptions;
//!
//! let tokens = vec!["drop_rev=False".to_string(), "remove_l_reactions=NO3=NO2+O3".to_string()];
//! let options = AnalysisOptions::from_tokens(&tokens).unwrap();
//! assert!(!options.drop_reversible);
//! assert_eq!(options.remove_loss_reactions, vec!["NO3=NO2+O3".to_string()]);
//! ```
use crate::Rates::analysis::ReactionRestriction;
use crate::Rates::errors::{RateError, RateResult};
use crate::Rates::lumping::LumpSpec;
use log::{LevelFilter, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisOptions {
    /// ignore reactions whose reverse is in the same file (plots only)
    pub drop_reversible: bool,
    /// extra text for the title page of the plot report
    pub title_page_text: String,
    pub remove_loss_reactions: Vec<String>,
    pub remove_production_reactions: Vec<String>,
    pub exclusive_loss_reactions: Vec<String>,
    pub exclusive_production_reactions: Vec<String>,
    pub lump_loss_reactions: LumpSpec,
    pub lump_production_reactions: LumpSpec,
    /// prefix of the files written by the plot and summed modes
    pub report_path: Option<String>,
    pub log_level: String,
    /// log file; no file logging when `None`
    pub save_logs: Option<String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            drop_reversible: true,
            title_page_text: String::new(),
            remove_loss_reactions: Vec::new(),
            remove_production_reactions: Vec::new(),
            exclusive_loss_reactions: Vec::new(),
            exclusive_production_reactions: Vec::new(),
            lump_loss_reactions: LumpSpec::new(),
            lump_production_reactions: LumpSpec::new(),
            report_path: None,
            log_level: "info".to_string(),
            save_logs: None,
        }
    }
}

/// `True`/`False` as written on the command line
pub fn parse_bool(key: &str, value: &str) -> RateResult<bool> {
    match value.trim() {
        "True" | "true" | "1" => Ok(true),
        "False" | "false" | "0" => Ok(false),
        other => Err(RateError::Usage(format!(
            "{} must be True or False, got '{}'",
            key, other
        ))),
    }
}

/// Rewrites a literal with single quoted strings into JSON.
pub fn literal_to_json(literal: &str) -> RateResult<String> {
    let quoted = Regex::new(r"'([^']*)'").map_err(|e| RateError::Usage(e.to_string()))?;
    Ok(quoted.replace_all(literal.trim(), "\"$1\"").into_owned())
}

/// `a,b,c`, `[a,b,c]` or `['a','b']`
pub fn parse_list(value: &str) -> RateResult<Vec<String>> {
    let value = value.trim();
    if value.starts_with('[') && (value.contains('\'') || value.contains('"')) {
        let json = literal_to_json(value)?;
        return serde_json::from_str(&json).map_err(|e| {
            RateError::Usage(format!("cannot parse list '{}': {}", value, e))
        });
    }
    Ok(value
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

/// `{'species': {'category': ['A+B=C', ...] or 'A+B=C'}}`
pub fn parse_lumps(value: &str) -> RateResult<LumpSpec> {
    let json = literal_to_json(value)?;
    serde_json::from_str(&json)
        .map_err(|e| RateError::Usage(format!("cannot parse lump mapping '{}': {}", value, e)))
}

impl AnalysisOptions {
    pub fn from_json_file(file_name: &str) -> RateResult<Self> {
        if !Path::new(file_name).exists() {
            return Err(RateError::NotFound(file_name.to_string()));
        }
        let content = fs::read_to_string(file_name)?;
        let options: AnalysisOptions = serde_json::from_str(&content)?;
        info!("Loaded options from '{}'", file_name);
        Ok(options)
    }

    /// Builds options from `key=value` tokens. An `options_file` token is applied
    /// first wherever it appears; the other tokens override it in order.
    pub fn from_tokens(tokens: &[String]) -> RateResult<Self> {
        let pattern = Regex::new(r"^(?P<key>[A-Za-z_]+)=(?P<value>.*)$")
            .map_err(|e| RateError::Usage(e.to_string()))?;
        let mut pairs = Vec::with_capacity(tokens.len());
        for token in tokens {
            let caps = pattern.captures(token).ok_or_else(|| {
                RateError::Usage(format!("expected key=value, got '{}'", token))
            })?;
            pairs.push((caps["key"].to_string(), caps["value"].to_string()));
        }

        let mut options = match pairs.iter().find(|(key, _)| key == "options_file") {
            Some((_, file)) => Self::from_json_file(file)?,
            None => Self::default(),
        };
        for (key, value) in &pairs {
            options.set(key, value)?;
        }
        options.validate()?;
        Ok(options)
    }

    /// sets one field from its command line key
    pub fn set(&mut self, key: &str, value: &str) -> RateResult<()> {
        match key {
            "drop_rev" => self.drop_reversible = parse_bool(key, value)?,
            "title_page_text" => {
                self.title_page_text = value.trim_matches(|c: char| c == '"' || c == '\'').to_string()
            }
            "remove_l_reactions" => self.remove_loss_reactions = parse_list(value)?,
            "remove_p_reactions" => self.remove_production_reactions = parse_list(value)?,
            "exclusive_l_reactions" => self.exclusive_loss_reactions = parse_list(value)?,
            "exclusive_p_reactions" => self.exclusive_production_reactions = parse_list(value)?,
            "lump_l_reactions" => self.lump_loss_reactions = parse_lumps(value)?,
            "lump_p_reactions" => self.lump_production_reactions = parse_lumps(value)?,
            "report_path" => self.report_path = Some(value.to_string()),
            "log_level" => self.log_level = value.to_string(),
            "save_logs" => self.save_logs = Some(value.to_string()),
            "options_file" => {}
            _ => {
                return Err(RateError::Usage(format!("unknown option '{}'", key)));
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> RateResult<()> {
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> RateResult<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| RateError::Usage(format!("unknown log level '{}'", self.log_level)))
    }

    pub fn production_restriction(&self) -> ReactionRestriction {
        ReactionRestriction {
            exclusive: self.exclusive_production_reactions.clone(),
            remove: self.remove_production_reactions.clone(),
        }
    }

    pub fn loss_restriction(&self) -> ReactionRestriction {
        ReactionRestriction {
            exclusive: self.exclusive_loss_reactions.clone(),
            remove: self.remove_loss_reactions.clone(),
        }
    }
}
