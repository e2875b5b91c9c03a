use super::error::ComparisonError;
use super::prompt::create_comparison_prompt;
use super::render::{format_json, format_report};
use super::service::{ComparisonService, build_result};
use super::session::ComparisonSession;
use super::types::{ComparisonRequest, RawResponse};
use crate::common::CommonParams;
use crate::config::Config;
use crate::log_warn;
use crate::messages;
use crate::ui;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

const DEFAULT_MODEL_A: &str = "Model 1";
const DEFAULT_MODEL_B: &str = "Model 2";

/// Options for the `compare` command
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    pub model_a: String,
    pub model_b: String,
    pub csv: Option<PathBuf>,
    pub json: bool,
    pub show_prompt: bool,
}

/// Read a supplemental CSV file; an empty file counts as no data
async fn read_supplemental(path: Option<&Path>) -> Result<Option<String>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read supplemental data from {}", path.display()))?;

    Ok(Some(text).filter(|t| !t.trim().is_empty()))
}

pub async fn handle_compare_command(common: CommonParams, options: CompareOptions) -> Result<()> {
    let supplemental = read_supplemental(options.csv.as_deref()).await?;
    let request = ComparisonRequest::new(options.model_a, options.model_b, supplemental)?;

    let mut config = Config::load()?;
    common.apply_to_config(&mut config);

    if options.show_prompt {
        ui::print_message(&create_comparison_prompt(&request).dimmed().to_string());
        ui::print_newline();
    }

    let service = ComparisonService::from_config(&config).inspect_err(|_| {
        ui::print_info("Set up your API key with 'twin-track config --api-key <KEY>'");
    })?;

    let session = ComparisonSession::new();
    let spinner = ui::create_spinner("");
    let waiting = messages::get_waiting_message();
    spinner.set_message(
        waiting
            .text
            .truecolor(waiting.color.0, waiting.color.1, waiting.color.2)
            .to_string(),
    );

    let outcome = session.run(&service, &request).await;
    spinner.finish_and_clear();

    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            report_failure(&e);
            return Err(e.into());
        }
    };

    if options.json {
        println!("{}", format_json(&result)?);
    } else {
        println!("{}", format_report(&result));
    }

    Ok(())
}

/// Log the failure and print a hint under it; `main` prints the error itself
fn report_failure(error: &ComparisonError) {
    log_warn!("Comparison failed: {}", error);
    if matches!(error, ComparisonError::RemoteValidation { .. }) {
        ui::print_info("Check the model names for typos or try the full manufacturer name.");
    }
}

/// Print the prompt a comparison would send, without calling the provider
pub async fn handle_prompt_command(
    model_a: String,
    model_b: String,
    csv: Option<PathBuf>,
) -> Result<()> {
    let supplemental = read_supplemental(csv.as_deref()).await?;
    let request = ComparisonRequest::new(model_a, model_b, supplemental)?;
    println!("{}", create_comparison_prompt(&request));
    Ok(())
}

/// Parse a saved response (file or stdin) and render it
pub async fn handle_parse_command(
    file: Option<PathBuf>,
    model_a: Option<String>,
    model_b: Option<String>,
    json: bool,
) -> Result<()> {
    let text = match &file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read response from {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("Failed to read response from stdin")?;
            buffer
        }
    };

    let model_a = model_a.unwrap_or_else(|| DEFAULT_MODEL_A.to_string());
    let model_b = model_b.unwrap_or_else(|| DEFAULT_MODEL_B.to_string());

    let result = build_result(&model_a, &model_b, RawResponse::new(Some(text), Vec::new()))
        .inspect_err(report_failure)?;

    if result.sections.is_degraded() {
        ui::print_warning("No section labels found; the whole response landed in GENERAL.");
    }

    if json {
        println!("{}", format_json(&result)?);
    } else {
        println!("{}", format_report(&result));
    }

    Ok(())
}
