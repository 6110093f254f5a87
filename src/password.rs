use crate::errors::ConfigError;
use crate::generators::{
    CharsetSpec, DEFAULT_WORDS, build_charset, mix_case, pick_char, pick_separator,
};
use crate::random::RandomSource;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything that shapes one generated password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub length: usize,
    pub include_uppercase: bool,
    pub include_lowercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
    /// Digits are part of the charset even when `include_numbers` is off.
    pub always_include_numbers: bool,
    pub use_readable_pattern: bool,
    /// Readable mode only. Empty falls back to the built-in words.
    pub custom_word_list: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            length: 12,
            include_uppercase: true,
            include_lowercase: true,
            include_numbers: true,
            include_symbols: true,
            always_include_numbers: true,
            use_readable_pattern: false,
            custom_word_list: Vec::new(),
        }
    }
}

impl GenerationConfig {
    pub const MIN_LENGTH: usize = 8;
    pub const MAX_LENGTH: usize = 32;

    /// Checks the length bounds. `generate` itself accepts any length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&self.length) {
            return Err(ConfigError::LengthOutOfRange {
                length: self.length,
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
            });
        }

        Ok(())
    }

    pub fn charset_spec(&self) -> CharsetSpec {
        CharsetSpec {
            digits: self.always_include_numbers || self.include_numbers,
            uppercase: self.include_uppercase,
            lowercase: self.include_lowercase,
            symbols: self.include_symbols,
        }
    }
}

/// Generates a password for `config`, drawing from `rng`.
///
/// Never fails: an empty charset yields an empty string and an out of range
/// length is used as is.
pub fn generate<R: RandomSource + ?Sized>(config: &GenerationConfig, rng: &mut R) -> String {
    if config.use_readable_pattern {
        generate_readable(config, rng)
    } else {
        generate_from_charset(config, rng)
    }
}

fn generate_from_charset<R: RandomSource + ?Sized>(
    config: &GenerationConfig,
    rng: &mut R,
) -> String {
    let charset = build_charset(config.charset_spec());
    debug!(charset_len = charset.len(), length = config.length, "charset generation");

    if charset.is_empty() {
        return String::new();
    }

    (0..config.length).map(|_| pick_char(rng, &charset)).collect()
}

fn generate_readable<R: RandomSource + ?Sized>(config: &GenerationConfig, rng: &mut R) -> String {
    let custom: Vec<&str> = config.custom_word_list.iter().map(String::as_str).collect();
    let words: &[&str] = if custom.is_empty() { &DEFAULT_WORDS } else { &custom };
    debug!(
        words = words.len(),
        custom = !custom.is_empty(),
        length = config.length,
        "readable generation"
    );

    let mut password = String::new();
    for i in 0..config.length {
        if i % 2 == 0 {
            let word = words[rng.pick_index(words.len())];
            password.push_str(&mix_case(rng, word));
        } else {
            password.push(pick_separator(rng));
        }
    }

    password
        .chars()
        .take(config.length)
        .filter(|c| !c.is_whitespace())
        .collect()
}
