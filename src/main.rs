// This file is part of Syllab.
//
// Copyright (c) 2025  René Coignard <contact@renecoignard.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

mod ui;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use syllab::{
    Error, Estimate, FormattingStyle, GenerationConfig, PassphraseGenerator, SecretGenerator,
    Strength,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "syllab",
    version,
    author,
    about = "Pronounceable passphrase generator"
)]
struct Cli {
    /// How many passphrases to generate
    #[arg(default_value_t = 1)]
    count: u32,

    /// Passphrase strength
    #[arg(short, long, value_enum, ignore_case = true, default_value = "normal")]
    strength: StrengthLevel,

    /// Word beginning in upper case
    #[arg(short = 'u', long = "uppercase")]
    word_beginning_upper_case: bool,

    /// Add a digit
    #[arg(short = 'd', long = "digit")]
    add_digit: bool,

    /// Add a special char
    #[arg(short = 'S', long = "special")]
    add_special_char: bool,

    /// Use extended special chars
    #[arg(short = 'e', long = "extended")]
    use_extended_special_chars: bool,

    /// Output grouping
    #[arg(short, long, value_enum, default_value = "in-words")]
    format: Format,

    /// Print entropy and brute-force estimates
    #[arg(long)]
    stats: bool,

    /// Print passphrases only
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StrengthLevel {
    OneWord,
    TwoWords,
    Easy,
    Normal,
    Strong,
    Ultra,
    Extreme,
    Hyper,
}

impl From<StrengthLevel> for Strength {
    fn from(level: StrengthLevel) -> Self {
        match level {
            StrengthLevel::OneWord => Strength::OneWord,
            StrengthLevel::TwoWords => Strength::TwoWords,
            StrengthLevel::Easy => Strength::Easy,
            StrengthLevel::Normal => Strength::Normal,
            StrengthLevel::Strong => Strength::Strong,
            StrengthLevel::Ultra => Strength::Ultra,
            StrengthLevel::Extreme => Strength::Extreme,
            StrengthLevel::Hyper => Strength::Hyper,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    InWords,
    InWordsMultiLine,
    Raw,
}

impl From<Format> for FormattingStyle {
    fn from(format: Format) -> Self {
        match format {
            Format::InWords => FormattingStyle::InWords,
            Format::InWordsMultiLine => FormattingStyle::InWordsMultiLine,
            Format::Raw => FormattingStyle::Raw,
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    if cli.count == 0 {
        return Err(Error::invalid_configuration("count must be positive").into());
    }

    let config = GenerationConfig {
        strength: cli.strength.into(),
        word_beginning_upper_case: cli.word_beginning_upper_case,
        add_digit: cli.add_digit,
        add_special_char: cli.add_special_char,
        use_extended_special_chars: cli.use_extended_special_chars,
    };

    let options = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
        quiet: cli.quiet,
        style: cli.format.into(),
    };

    let mut generator =
        PassphraseGenerator::new().context("Failed to set up passphrase generator")?;

    debug!(count = cli.count, "generating passphrases");

    for i in 0..cli.count {
        let mut passphrase = generator
            .generate(&config)
            .with_context(|| format!("Failed to generate passphrase {}", i + 1))?;
        ui::display_passphrase(&mut passphrase, &options);
    }

    if ui::shows_stats(cli.stats, &options) {
        let combinations = generator.calc_combination_count(&config);
        let estimate = Estimate::from_combinations(combinations);
        ui::display_stats(&config, &estimate, &options);
    }

    Ok(())
}
