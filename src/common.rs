use crate::config::Config;
use clap::Args;

#[derive(Args, Clone, Default, Debug)]
pub struct CommonParams {
    /// Override the configured model
    #[arg(long, help = "Override the configured Gemini model")]
    pub model: Option<String>,

    /// Override the configured sampling temperature
    #[arg(long, help = "Override the sampling temperature (0.0 - 2.0)", value_parser = temperature_parser)]
    pub temperature: Option<f32>,

    /// Disable web-search grounding for this run
    #[arg(long, help = "Disable web-search grounding and citations for this run")]
    pub no_search: bool,
}

impl CommonParams {
    /// Apply per-invocation overrides; returns true if anything changed
    pub fn apply_to_config(&self, config: &mut Config) -> bool {
        let mut changes_made = false;

        if let Some(model) = &self.model
            && config.provider.model != *model
        {
            config.provider.model.clone_from(model);
            changes_made = true;
        }

        if let Some(temperature) = self.temperature {
            config.generation.temperature = temperature;
            changes_made = true;
        }

        if self.no_search && config.generation.search_grounding {
            config.generation.search_grounding = false;
            changes_made = true;
        }

        changes_made
    }
}

/// Validates a temperature value
pub fn temperature_parser(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("Invalid temperature '{s}': expected a number"))?;
    if (0.0..=2.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("Invalid temperature '{s}': must be between 0.0 and 2.0"))
    }
}
