// src/config.rs
use crate::api::{EndpointResolver, PollPolicy};
use crate::constants::{
    CODA_API_BASE, EXPORT_POLL_INTERVAL, EXPORT_POLL_MAX_ATTEMPTS, EXPORT_POLL_MAX_INTERVAL,
    ICON_SEARCH_DEFAULT_LIMIT,
};
use crate::error::AppError;
use crate::model::ExportFormat;
use crate::types::{ApiToken, DocId, ValidatedUrl};
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

/// Environment variable holding the Coda API token.
pub const API_TOKEN_ENV: &str = "CODA_API_TOKEN";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Doc to work on, as an ID or a browser URL (system-token mode)
    #[arg(long, global = true, env = "CODA_DOC_ID", conflicts_with = "endpoint")]
    pub doc: Option<String>,

    /// Stored connection endpoint, e.g. https://coda.io/apis/v1/docs/<docId>
    #[arg(long, global = true, env = "CODA_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Versioned API root
    #[arg(long, global = true, default_value = CODA_API_BASE)]
    pub api_base: String,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(flatten)]
    pub polling: PollingArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Export polling settings used by copy-page.
#[derive(Args, Debug, Clone)]
pub struct PollingArgs {
    /// Delay between export status checks, in milliseconds
    #[arg(long, global = true, default_value_t = EXPORT_POLL_INTERVAL.as_millis() as u64)]
    pub poll_interval_ms: u64,

    /// Status checks before giving up on an export
    #[arg(long, global = true, default_value_t = EXPORT_POLL_MAX_ATTEMPTS)]
    pub poll_max_attempts: u32,

    /// Delay multiplier after each pending check (1.0 keeps it fixed)
    #[arg(long, global = true, default_value_t = 1.0)]
    pub poll_backoff: f64,

    /// Format requested from the export API
    #[arg(long, global = true, value_enum, default_value_t = ExportFormat::Html)]
    pub export_format: ExportFormat,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List pages as [ID, name] pairs
    ListPages {
        /// Maximum number of pages to return (default: 100)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Add a page and print its ID
    AddPage {
        #[arg(long)]
        name: Option<String>,
        /// Parent page ID
        #[arg(long)]
        parent: Option<String>,
        #[arg(long)]
        subtitle: Option<String>,
        #[arg(long)]
        icon_name: Option<String>,
        /// Cover image URL
        #[arg(long)]
        cover_image: Option<String>,
        /// Page content in Markdown
        #[arg(long)]
        content: Option<String>,
    },
    /// Rename a page or change its subtitle, icon or cover image
    RenamePage {
        /// ID or name of the page; IDs are unambiguous, names may not be
        page: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        subtitle: Option<String>,
        #[arg(long)]
        icon_name: Option<String>,
        #[arg(long)]
        cover_image: Option<String>,
    },
    /// Copy a page with its content and print the new page's ID
    CopyPage {
        /// ID or name of the page to copy
        source: String,
        /// Name of the copy
        new_name: String,
        /// Parent page ID of the copy
        #[arg(long)]
        parent: Option<String>,
    },
    /// Search pages by name
    SearchPages {
        #[arg(default_value = "")]
        query: String,
    },
    /// Search the icon catalog
    SearchIcons {
        #[arg(default_value = "")]
        query: String,
        #[arg(long, default_value_t = ICON_SEARCH_DEFAULT_LIMIT)]
        limit: u32,
    },
    /// Show who is connected and to which doc
    DescribeConnection,
    /// List docs this connection may be bound to
    SelectDocument,
    /// List the registered formulas
    Formulas,
    /// Invoke a formula with positional arguments ("_" leaves one out)
    Invoke {
        formula: String,
        args: Vec<String>,
    },
}

/// Resolved configuration, validated and ready to build a context.
#[derive(Debug, Clone)]
pub struct PackConfig {
    pub api_token: ApiToken,
    pub api_base: ValidatedUrl,
    pub endpoint: EndpointResolver,
    pub poll_policy: PollPolicy,
    pub export_format: ExportFormat,
    pub verbose: bool,
}

impl PackConfig {
    /// Resolves the configuration from CLI input and environment.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, AppError> {
        let token = std::env::var(API_TOKEN_ENV).map_err(|_| {
            AppError::MissingConfiguration(format!(
                "{} environment variable not set",
                API_TOKEN_ENV
            ))
        })?;

        Ok(PackConfig {
            api_token: ApiToken::new(token)?,
            api_base: ValidatedUrl::parse(&cli.api_base)?,
            endpoint: resolve_endpoint(cli.doc.as_deref(), cli.endpoint.as_deref())?,
            poll_policy: cli.polling.to_policy()?,
            export_format: cli.polling.export_format,
            verbose: cli.verbose,
        })
    }
}

impl PollingArgs {
    fn to_policy(&self) -> Result<PollPolicy, AppError> {
        if self.poll_max_attempts == 0 {
            return Err(AppError::MissingConfiguration(
                "--poll-max-attempts must be at least 1".to_string(),
            ));
        }
        if !self.poll_backoff.is_finite() || self.poll_backoff < 1.0 {
            return Err(AppError::MissingConfiguration(
                "--poll-backoff must be 1.0 or greater".to_string(),
            ));
        }

        let interval = Duration::from_millis(self.poll_interval_ms);
        Ok(PollPolicy::fixed(interval, self.poll_max_attempts)
            .with_backoff(self.poll_backoff, EXPORT_POLL_MAX_INTERVAL.max(interval)))
    }
}

/// Picks the endpoint mode from whichever binding was given.
pub fn resolve_endpoint(
    doc: Option<&str>,
    endpoint: Option<&str>,
) -> Result<EndpointResolver, AppError> {
    match (doc, endpoint) {
        (Some(_), Some(_)) => Err(AppError::MissingConfiguration(
            "use either a doc or an endpoint, not both".to_string(),
        )),
        (Some(doc), None) => Ok(EndpointResolver::Fixed {
            doc_id: DocId::from_input(doc)?,
        }),
        (None, Some(endpoint)) => Ok(EndpointResolver::Connection {
            endpoint: ValidatedUrl::parse(endpoint)?,
        }),
        (None, None) => Ok(EndpointResolver::Unbound),
    }
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            api_token: ApiToken::new("test-token-for-defaults")
                .expect("Default API token should be valid"),
            api_base: ValidatedUrl::parse(CODA_API_BASE).expect("API base should be valid"),
            endpoint: EndpointResolver::Unbound,
            poll_policy: PollPolicy::default(),
            export_format: ExportFormat::default(),
            verbose: false,
        }
    }
}
