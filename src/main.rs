// src/main.rs

use anyhow::Context;
use clap::Parser;
use coda_pages::api::CodaHttpClient;
use coda_pages::formulas::{FormulaRegistry, FormulaValue, ParamValue};
use coda_pages::operations::connection::{describe_connection, list_selectable_documents};
use coda_pages::search::{search_icons, search_pages};
use coda_pages::{AppError, Command, CommandLineInput, PackConfig, PackContext};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::sync::Arc;

/// Placeholder for an omitted positional formula argument.
const OMITTED_ARGUMENT: &str = "_";

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("coda_pages.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}"
    } else {
        "{m}{n}"
    };

    // Results go to stdout, so log lines stay on stderr
    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs one subcommand against the configured connection.
struct PackRunner {
    ctx: PackContext,
    registry: FormulaRegistry,
}

impl PackRunner {
    fn new(config: &PackConfig) -> Result<Self, AppError> {
        let client = CodaHttpClient::new(&config.api_token, config.api_base.as_url())?;
        Ok(Self {
            ctx: PackContext::from_config(Arc::new(client), config),
            registry: FormulaRegistry::standard()?,
        })
    }

    async fn run(&self, command: Command) -> Result<FormulaValue, AppError> {
        match command {
            Command::ListPages { limit } => {
                let values = vec![limit.map(|n| ParamValue::Number(f64::from(n)))];
                self.registry.invoke(&self.ctx, "ListPages", values).await
            }
            Command::AddPage {
                name,
                parent,
                subtitle,
                icon_name,
                cover_image,
                content,
            } => {
                let values = vec![
                    name.map(ParamValue::String),
                    parent.map(ParamValue::String),
                    subtitle.map(ParamValue::String),
                    icon_name.map(ParamValue::String),
                    cover_image.map(ParamValue::Image),
                    content.map(ParamValue::String),
                ];
                self.registry.invoke(&self.ctx, "AddPage", values).await
            }
            Command::RenamePage {
                page,
                name,
                subtitle,
                icon_name,
                cover_image,
            } => {
                let values = vec![
                    Some(ParamValue::String(page)),
                    name.map(ParamValue::String),
                    subtitle.map(ParamValue::String),
                    icon_name.map(ParamValue::String),
                    cover_image.map(ParamValue::Image),
                ];
                self.registry.invoke(&self.ctx, "RenamePage", values).await
            }
            Command::CopyPage {
                source,
                new_name,
                parent,
            } => {
                let values = vec![
                    Some(ParamValue::String(source)),
                    Some(ParamValue::String(new_name)),
                    parent.map(ParamValue::String),
                ];
                self.registry.invoke(&self.ctx, "CopyPage", values).await
            }
            Command::SearchPages { query } => {
                Ok(FormulaValue::Options(search_pages(&self.ctx, &query).await?))
            }
            Command::SearchIcons { query, limit } => {
                Ok(FormulaValue::Options(search_icons(&self.ctx, &query, limit).await?))
            }
            Command::DescribeConnection => {
                Ok(FormulaValue::Text(describe_connection(&self.ctx).await?))
            }
            Command::SelectDocument => Ok(FormulaValue::Options(
                list_selectable_documents(&self.ctx).await?,
            )),
            Command::Formulas => {
                let listing = serde_json::to_string_pretty(&self.registry.iter().collect::<Vec<_>>())?;
                Ok(FormulaValue::Text(listing))
            }
            Command::Invoke { formula, args } => {
                let values = self.parse_arguments(&formula, &args)?;
                self.registry.invoke(&self.ctx, &formula, values).await
            }
        }
    }

    /// Reads positional CLI arguments using the formula's parameter kinds.
    fn parse_arguments(
        &self,
        formula: &str,
        args: &[String],
    ) -> Result<Vec<Option<ParamValue>>, AppError> {
        let spec = self
            .registry
            .get(formula)
            .ok_or_else(|| AppError::UnknownFormula(formula.to_string()))?;

        args.iter()
            .enumerate()
            .map(|(index, raw)| {
                if raw == OMITTED_ARGUMENT {
                    return Ok(None);
                }
                // Extra arguments are reported by the registry's arity check
                let Some(param) = spec.params.get(index) else {
                    return Ok(Some(ParamValue::String(raw.clone())));
                };
                ParamValue::parse(param.kind, raw)
                    .map(Some)
                    .map_err(|reason| AppError::InvalidArgument {
                        formula: spec.name.to_string(),
                        reason: format!("{}: {}", param.name, reason),
                    })
            })
            .collect()
    }
}

fn print_value(value: &FormulaValue) -> anyhow::Result<()> {
    match value {
        FormulaValue::Text(text) => println!("{}", text),
        other => println!("{}", serde_json::to_string_pretty(other)?),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = PackConfig::resolve(&cli).context("Failed to resolve configuration")?;
    let runner = PackRunner::new(&config)?;

    let value = runner.run(cli.command).await?;
    print_value(&value)?;

    Ok(())
}
