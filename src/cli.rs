//! Command-line surface. Parsing only, the work happens in `commands`.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::generators::parse_word_list;
use crate::password::GenerationConfig;

#[derive(Parser, Debug)]
#[command(
    name = "oktogen",
    version,
    about = "Generate random passwords and keep the ones you name"
)]
pub struct Cli {
    /// Config file, defaults to <config dir>/oktogen/config.json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a password
    ///
    /// Not suitable for credentials that need cryptographic strength.
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Save a password under a label, replacing any previous one
    Save { label: String, password: String },

    /// List saved passwords
    List,

    /// Print a saved password
    Get {
        label: String,

        /// Copy to the clipboard instead of printing
        #[arg(short, long)]
        copy: bool,
    },

    /// Delete a saved password
    Remove { label: String },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Password length
    #[arg(short = 'L', long, value_parser = clap::value_parser!(u8).range(8..=32))]
    pub length: Option<u8>,

    #[arg(short = 'u', long)]
    pub no_uppercase: bool,

    #[arg(short = 'l', long)]
    pub no_lowercase: bool,

    /// Leave out digits (needs --digits-optional if digits are forced)
    #[arg(short = 'n', long)]
    pub no_numbers: bool,

    #[arg(short = 's', long)]
    pub no_specials: bool,

    /// Let --no-numbers drop digits even when they are always included
    #[arg(long)]
    pub digits_optional: bool,

    /// Alternate words and separators instead of random characters
    #[arg(short, long)]
    pub readable: bool,

    /// Comma separated words for the readable pattern
    #[arg(short, long)]
    pub words: Option<String>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Copy the result to the clipboard
    #[arg(short, long)]
    pub copy: bool,

    /// Save the result under this label
    #[arg(short = 'N', long)]
    pub name: Option<String>,
}

impl GenerateArgs {
    /// Applies the flags on top of the configured defaults.
    pub fn to_config(&self, defaults: &GenerationConfig) -> GenerationConfig {
        let mut config = defaults.clone();

        if let Some(length) = self.length {
            config.length = usize::from(length);
        }
        if self.no_uppercase {
            config.include_uppercase = false;
        }
        if self.no_lowercase {
            config.include_lowercase = false;
        }
        if self.no_numbers {
            config.include_numbers = false;
        }
        if self.no_specials {
            config.include_symbols = false;
        }
        if self.digits_optional {
            config.always_include_numbers = false;
        }
        if self.readable {
            config.use_readable_pattern = true;
        }
        if let Some(words) = &self.words {
            config.use_readable_pattern = true;
            config.custom_word_list = parse_word_list(words);
        }

        config
    }
}
