//! fillcli — fill DOCX templates from the command line

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use docx_fill::{FillOptions, PartsSelection};
use extract_text::{ExtractorService, ServiceConfig};
use requisites::{validate_values, CompanyDetails};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Command::Fill {
            template,
            output,
            values,
            details,
            check_formats,
            policy,
            all_xml,
            field_instr,
            no_sanitize,
            no_preserve_space,
        } => {
            let values = load_values(&values, details)?;

            if check_formats {
                let issues = validate_values(&values);
                if !issues.is_empty() {
                    for issue in &issues {
                        eprintln!("{}: {}", issue.key, issue.message);
                    }
                    bail!("{} value(s) failed format validation", issues.len());
                }
            }

            // warnings fall through to tracing::warn! by default
            let mut options = FillOptions::default().with_policy(policy.into());
            if all_xml {
                options.selection = PartsSelection::AllXml;
            }
            options.include_field_instruction_text = field_instr;
            options.sanitize_values = !no_sanitize;
            options.preserve_whitespace_when_needed = !no_preserve_space;

            let report = docx_fill::fill(&template, &output, &values, &options)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Scan {
            template,
            all_xml,
            field_instr,
        } => {
            let mut options = FillOptions::default();
            if all_xml {
                options.selection = PartsSelection::AllXml;
            }
            options.include_field_instruction_text = field_instr;

            let report = docx_fill::scan(&template, &options)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Validate { values, details } => {
            let values = load_values(&values, details)?;
            let issues = validate_values(&values);
            if issues.is_empty() {
                println!("ok");
            } else {
                for issue in &issues {
                    println!("{}: {}", issue.key, issue.message);
                }
                bail!("{} value(s) failed format validation", issues.len());
            }
        }
        Command::Extract { input, max_chars } => {
            let config = ServiceConfig {
                max_chars,
                ..ServiceConfig::default()
            };
            let extraction = ExtractorService::new(config).extract(&input)?;
            for note in &extraction.notes {
                tracing::warn!("{note}");
            }
            println!("{}", extraction.text);
        }
    }

    Ok(())
}

fn load_values(path: &Path, details: bool) -> Result<HashMap<String, String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("cannot read values file {}", path.display()))?;
    if details {
        let details: CompanyDetails =
            serde_json::from_str(&raw).context("values file is not a company-details record")?;
        Ok(details.to_values())
    } else {
        serde_json::from_str(&raw).context("values file is not a flat string map")
    }
}
