mod relay;

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use intake::{FieldDescriptor, FieldKind, IntakeError, IntakeForm, Notice, ServiceCategory, UnknownCategory};

use crate::relay::HttpRelay;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
    #[error("invalid assignment `{0}`; expected key=value")]
    InvalidAssignment(String),
    #[error("{0}")]
    Intake(#[from] IntakeError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("stdin read failed: {0}")]
    Io(#[from] io::Error),
    #[error("health check failed: HTTP {0}")]
    Unhealthy(u16),
    #[error("{0}")]
    NotDelivered(&'static str),
}

#[derive(Parser, Debug)]
#[command(name = "kimtas-cli", about = "KİMTAŞ Sigorta service-request intake")]
struct Cli {
    #[arg(long, env = "KIMTAS_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the relay server is up.
    Ping,
    /// List service categories.
    Categories,
    /// Show the form fields of a category.
    Fields { category: String },
    /// Fill a category form and submit it once.
    Submit {
        category: String,

        /// Field value as `key=value`; composite parts as `plaka.il=34`.
        #[arg(long = "set", value_name = "KEY=VALUE")]
        values: Vec<String>,

        /// Destination inbox override.
        #[arg(long)]
        to: Option<String>,

        /// Prompt on stdin for every field left empty.
        #[arg(long, default_value_t = false)]
        interactive: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Ping => run_ping(&cli.base_url).await,
        Command::Categories => {
            for category in ServiceCategory::ALL {
                println!("{:<8} {}", category.slug(), category.name());
            }
            Ok(())
        }
        Command::Fields { category } => {
            let category = category.parse::<ServiceCategory>()?;
            for line in describe_fields(category.fields()) {
                println!("{line}");
            }
            Ok(())
        }
        Command::Submit { category, values, to, interactive } => {
            run_submit(&cli.base_url, &category, &values, to, interactive).await
        }
    }
}

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let url = relay::endpoint_url(base_url, "/healthz");
    let status = reqwest::Client::new().get(url).send().await?.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

async fn run_submit(
    base_url: &str,
    category: &str,
    values: &[String],
    to: Option<String>,
    interactive: bool,
) -> Result<(), CliError> {
    let category = category.parse::<ServiceCategory>()?;
    let mut form = IntakeForm::new();
    form.select_category(category);
    form.set_destination(to);

    for assignment in values {
        let (key, value) = parse_assignment(assignment)?;
        form.update_field(key, value)?;
    }

    if interactive {
        let stdin = io::stdin();
        prompt_missing(&mut form, &mut stdin.lock())?;
    }

    let transport = HttpRelay::new(base_url)?;
    let notice = form.submit(&transport).await?;
    println!("{}", notice.text());

    match notice {
        Notice::Submitted => Ok(()),
        Notice::RetryLater => Err(CliError::NotDelivered("relay did not accept the request")),
    }
}

fn parse_assignment(raw: &str) -> Result<(&str, &str), CliError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(CliError::InvalidAssignment(raw.to_owned())),
    }
}

/// Editable keys of a schema in display order, with their prompt labels.
fn editable_keys(fields: &[FieldDescriptor]) -> Vec<(String, String)> {
    let mut keys = Vec::new();
    for field in fields {
        match field.kind {
            FieldKind::Composite(rule) => {
                for part in rule.parts {
                    keys.push((format!("{}.{}", field.key, part.key), format!("{} / {}", field.label, part.label)));
                }
            }
            _ => keys.push((field.key.to_owned(), field.label.to_owned())),
        }
    }
    keys
}

fn prompt_missing(form: &mut IntakeForm, input: &mut impl BufRead) -> Result<(), CliError> {
    let mut stderr = io::stderr();
    for (key, label) in editable_keys(form.fields()) {
        if form.value(&key).is_some_and(|v| !v.trim().is_empty()) {
            continue;
        }
        write!(stderr, "{label}: ")?;
        stderr.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        form.update_field(&key, line.trim_end_matches(['\r', '\n']))?;
    }
    Ok(())
}

fn describe_fields(fields: &[FieldDescriptor]) -> Vec<String> {
    let mut lines = Vec::new();
    for field in fields {
        let required = if field.required { "required" } else { "optional" };
        lines.push(format!("{:<14} {:<20} {:<12} {required}", field.key, field.label, field.kind.tag()));
        if let FieldKind::Composite(rule) = field.kind {
            for part in rule.parts {
                let key = format!("{}.{}", field.key, part.key);
                let len = if part.min_len == part.max_len {
                    part.min_len.to_string()
                } else {
                    format!("{}-{}", part.min_len, part.max_len)
                };
                lines.push(format!("  {key:<12} {:<20} {len} {:?}", part.label, part.charset));
            }
        }
    }
    lines
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
