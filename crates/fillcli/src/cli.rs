//! Command-line definitions

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fillcli", version, about = "Fill <!key!> placeholders in DOCX templates")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fill a template with values from a JSON file
    Fill {
        template: PathBuf,
        output: PathBuf,
        /// JSON file: either a flat key→value map, or company details
        /// with --details
        #[arg(long)]
        values: PathBuf,
        /// Treat the values file as a company-details record
        #[arg(long, action = ArgAction::SetTrue)]
        details: bool,
        /// Check requisite formats (INN/OGRN/KPP/email) before filling
        #[arg(long, action = ArgAction::SetTrue)]
        check_formats: bool,
        #[arg(long, value_enum, default_value_t = PolicyArg::Keep)]
        policy: PolicyArg,
        /// Process every XML part under word/, not just body and
        /// headers/footers
        #[arg(long, action = ArgAction::SetTrue)]
        all_xml: bool,
        /// Also replace inside field instruction text
        #[arg(long, action = ArgAction::SetTrue)]
        field_instr: bool,
        /// Do not escape placeholder markers inside values
        #[arg(long, action = ArgAction::SetTrue)]
        no_sanitize: bool,
        /// Do not manage xml:space="preserve" on edited runs
        #[arg(long, action = ArgAction::SetTrue)]
        no_preserve_space: bool,
    },
    /// List the placeholders a template contains, without writing anything
    Scan {
        template: PathBuf,
        #[arg(long, action = ArgAction::SetTrue)]
        all_xml: bool,
        #[arg(long, action = ArgAction::SetTrue)]
        field_instr: bool,
    },
    /// Check a values file against requisite format rules
    Validate {
        values: PathBuf,
        #[arg(long, action = ArgAction::SetTrue)]
        details: bool,
    },
    /// Extract and normalize text from a plain-text source document
    Extract {
        input: PathBuf,
        #[arg(long, default_value_t = 60_000)]
        max_chars: usize,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum PolicyArg {
    /// Leave unresolved placeholders as-is
    Keep,
    /// Replace unresolved placeholders with an empty string
    Blank,
    /// Fail if any placeholder has no value
    Error,
}

impl From<PolicyArg> for docx_fill::MissingKeyPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Keep => docx_fill::MissingKeyPolicy::Keep,
            PolicyArg::Blank => docx_fill::MissingKeyPolicy::Blank,
            PolicyArg::Error => docx_fill::MissingKeyPolicy::Error,
        }
    }
}
