use crate::common::CommonParams;
use crate::config::Config;
use crate::llm_providers::gemini_metadata;
use crate::log_debug;
use crate::ui;
use crate::ui::rgb::{ACCENT_CYAN, AMBER, BRIGHT_CYAN, DIM_SEPARATOR, DIM_WHITE, EMERALD};
use anyhow::Result;
use colored::Colorize;
use std::collections::HashMap;

/// Values passed to `twin-track config`; model and temperature arrive via `CommonParams`
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub api_key: Option<String>,
    pub search: Option<bool>,
    pub timeout: Option<u64>,
    pub param: Option<Vec<String>>,
}

/// Apply requested changes to `config`; true if anything changed
fn apply_config_changes(config: &mut Config, common: &CommonParams, update: ConfigUpdate) -> bool {
    let common_changes = common.apply_to_config(config);

    let changes_made = config.update(
        update.api_key,
        None,
        None,
        update.search,
        update.timeout,
        update.param.map(|params| parse_additional_params(&params)),
    );

    common_changes || changes_made
}

pub fn handle_config_command(common: &CommonParams, update: ConfigUpdate, print: bool) -> Result<()> {
    log_debug!(
        "Starting 'config' command with common: {:?}, search: {:?}, timeout: {:?}, param: {:?}",
        common,
        update.search,
        update.timeout,
        update.param
    );

    let mut config = Config::load()?;

    if apply_config_changes(&mut config, common, update) {
        config.save()?;
        ui::print_success("Configuration updated successfully.");
        ui::print_newline();
    }

    if print {
        println!("{}", masked_toml(&config)?);
    } else {
        print_configuration(&config);
    }

    Ok(())
}

/// The configuration as TOML with the API key masked
fn masked_toml(config: &Config) -> Result<String> {
    let mut masked = config.clone();
    if !masked.provider.api_key.is_empty() {
        masked.provider.api_key = mask_key(&masked.provider.api_key);
    }
    Ok(toml::to_string_pretty(&masked)?)
}

fn mask_key(key: &str) -> String {
    let tail: String = key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if key.chars().count() <= 8 {
        "••••".to_string()
    } else {
        format!("••••{tail}")
    }
}

fn print_configuration(config: &Config) {
    println!();
    println!(
        "{}  {}  {}",
        "━━━".truecolor(ACCENT_CYAN.0, ACCENT_CYAN.1, ACCENT_CYAN.2),
        "TWIN-TRACK CONFIGURATION"
            .truecolor(BRIGHT_CYAN.0, BRIGHT_CYAN.1, BRIGHT_CYAN.2)
            .bold(),
        "━━━".truecolor(ACCENT_CYAN.0, ACCENT_CYAN.1, ACCENT_CYAN.2)
    );
    println!();

    print_section_header(&gemini_metadata().name.to_uppercase());
    print_config_row("Model", &config.provider.model, BRIGHT_CYAN, true);

    let key_status = match (config.provider.api_key.is_empty(), config.effective_api_key()) {
        (false, _) => mask_key(&config.provider.api_key),
        (true, Some(_)) => "(from environment)".to_string(),
        (true, None) => "(not set)".to_string(),
    };
    let key_color = if config.effective_api_key().is_some() { EMERALD } else { AMBER };
    print_config_row("API Key", &key_status, key_color, false);

    let base_url = if config.provider.base_url.is_empty() {
        gemini_metadata().default_base_url
    } else {
        config.provider.base_url.as_str()
    };
    print_config_row("Endpoint", base_url, DIM_WHITE, false);

    if !config.provider.additional_params.is_empty() {
        println!(
            "  {} {}",
            "Params".truecolor(DIM_WHITE.0, DIM_WHITE.1, DIM_WHITE.2),
            "─".truecolor(DIM_SEPARATOR.0, DIM_SEPARATOR.1, DIM_SEPARATOR.2)
        );
        let mut params: Vec<_> = config.provider.additional_params.iter().collect();
        params.sort();
        for (key, value) in params {
            println!(
                "    {} {} {}",
                key.truecolor(BRIGHT_CYAN.0, BRIGHT_CYAN.1, BRIGHT_CYAN.2),
                "→".truecolor(DIM_SEPARATOR.0, DIM_SEPARATOR.1, DIM_SEPARATOR.2),
                value.truecolor(DIM_WHITE.0, DIM_WHITE.1, DIM_WHITE.2)
            );
        }
    }

    println!();
    print_section_header("GENERATION");
    print_config_row(
        "Temperature",
        &config.generation.temperature.to_string(),
        AMBER,
        false,
    );
    let (search, search_color) = if config.generation.search_grounding {
        ("enabled", EMERALD)
    } else {
        ("disabled", DIM_WHITE)
    };
    print_config_row("Search", search, search_color, false);

    println!();
    print_section_header("PERFORMANCE");
    print_config_row(
        "Timeout",
        &format!("{}s", config.performance.timeout_seconds),
        DIM_WHITE,
        false,
    );
    print_config_row(
        "Verbose Log",
        if config.performance.verbose_logging { "enabled" } else { "disabled" },
        DIM_WHITE,
        false,
    );

    println!();
    println!(
        "{}",
        "─"
            .repeat(40)
            .truecolor(DIM_SEPARATOR.0, DIM_SEPARATOR.1, DIM_SEPARATOR.2)
    );
    println!();
}

fn print_section_header(name: &str) {
    println!(
        "{} {} {}",
        "─".truecolor(ACCENT_CYAN.0, ACCENT_CYAN.1, ACCENT_CYAN.2),
        name.truecolor(ACCENT_CYAN.0, ACCENT_CYAN.1, ACCENT_CYAN.2).bold(),
        "─"
            .repeat(30 - name.len().min(28))
            .truecolor(DIM_SEPARATOR.0, DIM_SEPARATOR.1, DIM_SEPARATOR.2)
    );
}

fn print_config_row(label: &str, value: &str, value_color: (u8, u8, u8), highlight: bool) {
    let label_styled = format!("{label:>12}").truecolor(DIM_WHITE.0, DIM_WHITE.1, DIM_WHITE.2);

    let value_styled = if highlight {
        value
            .truecolor(value_color.0, value_color.1, value_color.2)
            .bold()
    } else {
        value.truecolor(value_color.0, value_color.1, value_color.2)
    };

    println!("{label_styled}  {value_styled}");
}

/// Parse `key=value` pairs from the command line; malformed entries are skipped
fn parse_additional_params(params: &[String]) -> HashMap<String, String> {
    params
        .iter()
        .filter_map(|param| {
            param
                .split_once('=')
                .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        })
        .filter(|(key, _)| !key.is_empty())
        .collect()
}
