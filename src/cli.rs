use clap::Parser;

use crate::config::{DEFAULT_DECOY_PASSWORD, DEFAULT_FUNCTION, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

#[derive(Parser, Debug)]
#[command(name = "rust-email-oracle")]
#[command(author = "Jules")]
#[command(version = "1.0.0")]
#[command(about = "Enumerates valid email addresses against a verbose login oracle.", long_about = None)]
#[command(after_help = "Example: rust-email-oracle usernames_gmail.com.txt 'http://enum.thm/labs/verbose_login/functions.php'")]
pub struct Args {
    /// Text file with one candidate email per line.
    #[arg(value_name = "EMAIL_LIST_FILE")]
    pub email_file: String,

    /// Login endpoint that answers with verbose JSON errors.
    #[arg(value_name = "TARGET_URL")]
    pub target_url: String,

    /// Seconds to wait for each probe before giving up.
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Decoy password sent with every probe.
    #[arg(long, default_value = DEFAULT_DECOY_PASSWORD)]
    pub password: String,

    /// Value of the `function` form field.
    #[arg(long, default_value = DEFAULT_FUNCTION)]
    pub function: String,

    /// User-Agent header.
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Referer header (defaults to the directory of TARGET_URL).
    #[arg(long)]
    pub referer: Option<String>,

    /// Explicit Host header, for targets reached by IP.
    #[arg(long)]
    pub host: Option<String>,
}
