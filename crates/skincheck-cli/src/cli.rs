use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use skincheck_core::models::Gender;
use skincheck_core::DiagnosisCategory;

#[derive(Parser)]
#[command(name = "skincheck")]
#[command(about = "Every skin is unique; skincare advice from a photo")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CLI profile name for identity and mail configuration
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show diagnosis categories and their recommended products
    Catalog {
        /// Category to show (e.g. dryness, oily-skin); all when omitted
        category: Option<DiagnosisCategory>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sign in, analyse a photo and show the recommended products
    Analyze(AnalyzeArgs),
    /// Submit your own product for promotion
    Promote(PromoteArgs),
    /// Account commands against the identity provider
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Photo to analyse
    #[arg(long, value_name = "PATH")]
    pub image: PathBuf,
    /// Account email
    #[arg(long, value_name = "EMAIL")]
    pub email: String,
    /// Account password
    #[arg(long, value_name = "PASSWORD")]
    pub password: String,
    /// Seed for a reproducible outcome
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct PromoteArgs {
    /// Your email address
    #[arg(long, value_name = "EMAIL")]
    pub email: String,
    /// Product name
    #[arg(long, value_name = "NAME")]
    pub name: String,
    /// Product content (ingredients)
    #[arg(long, value_name = "TEXT")]
    pub content: String,
    /// What the product does
    #[arg(long, value_name = "TEXT")]
    pub functionality: String,
    /// Optional product photo to attach
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,
    /// Directory the mail is written to (profile outbox when omitted)
    #[arg(long, value_name = "DIR")]
    pub outbox: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum GenderArg {
    #[default]
    Male,
    Female,
    Other,
}

impl From<GenderArg> for Gender {
    fn from(value: GenderArg) -> Self {
        match value {
            GenderArg::Male => Self::Male,
            GenderArg::Female => Self::Female,
            GenderArg::Other => Self::Other,
        }
    }
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Firebase web API key
        #[arg(long, value_name = "KEY")]
        firebase_api_key: Option<String>,
        /// Identity Toolkit base URL (e.g. an Auth emulator)
        #[arg(long, value_name = "URL")]
        identity_url: Option<String>,
        /// Secure Token base URL
        #[arg(long, value_name = "URL")]
        secure_token_url: Option<String>,
        /// Promotion mail recipients, comma-separated
        #[arg(long, value_name = "EMAILS", value_delimiter = ',')]
        recipients: Vec<String>,
        /// Directory promotion mails are written to
        #[arg(long, value_name = "DIR")]
        outbox_dir: Option<String>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Show the resolved configuration for a profile
    Show {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in with email and password
    SignIn {
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Create an account and send the verification email
    Register {
        #[arg(long, value_name = "NAME")]
        first_name: String,
        #[arg(long, value_name = "NAME")]
        last_name: String,
        #[arg(long, value_enum, default_value_t = GenderArg::Male)]
        gender: GenderArg,
        /// Birth date as YYYY-MM-DD (today when omitted)
        #[arg(long, value_name = "DATE")]
        birth_date: Option<NaiveDate>,
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Check whether the account's email address has been verified
    Verify {
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Send a password reset email
    ResetPassword {
        #[arg(long, value_name = "EMAIL", default_value = "")]
        email: String,
    },
    /// Sign in with a Google ID token
    Google {
        /// ID token from Google Sign-In
        #[arg(long, value_name = "TOKEN")]
        id_token: String,
        /// Optional Google access token
        #[arg(long, value_name = "TOKEN")]
        access_token: Option<String>,
    },
}
