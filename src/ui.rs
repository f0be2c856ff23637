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

use console::Style;
use syllab::entropy::{
    BRUTE_FORCE_ATTEMPTS_PENTIUM, BRUTE_FORCE_ATTEMPTS_SUPERCOMP, SECONDS_PER_DAY,
    SECONDS_PER_HOUR, SECONDS_PER_MINUTE, SECONDS_PER_YEAR,
};
use syllab::{Clearable, Estimate, FormattingStyle, GenerationConfig, Passphrase};

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
    pub style: FormattingStyle,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

fn get_tree_branches(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("├─", "└─")
    } else {
        ("|-", "`-")
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

pub fn format_duration(seconds: f64) -> String {
    if seconds < 1.0 {
        "less than a second".to_string()
    } else if seconds < SECONDS_PER_MINUTE {
        format!("{:.1} seconds", seconds)
    } else if seconds < SECONDS_PER_HOUR {
        format!("{:.1} minutes", seconds / SECONDS_PER_MINUTE)
    } else if seconds < SECONDS_PER_DAY {
        format!("{:.1} hours", seconds / SECONDS_PER_HOUR)
    } else if seconds < SECONDS_PER_YEAR {
        format!("{:.1} days", seconds / SECONDS_PER_DAY)
    } else {
        let years = syllab::seconds_to_years(seconds);
        if years < 1e6 {
            format!("{:.1} years", years)
        } else {
            format!("{:.2e} years", years)
        }
    }
}

/// Prints one passphrase, then wipes both it and its display copy.
pub fn display_passphrase(passphrase: &mut Passphrase, options: &DisplayOptions) {
    let mut formatted = passphrase.to_formatted_with(options.style);
    println!("{}", formatted);

    formatted.clear();
    passphrase.clear();
}

/// Stats are printed only when asked for, and never in quiet mode.
pub fn shows_stats(requested: bool, options: &DisplayOptions) -> bool {
    requested && !options.quiet
}

pub fn display_stats(config: &GenerationConfig, estimate: &Estimate, options: &DisplayOptions) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let (branch, last) = get_tree_branches(options.unicode_support);

    let rating = estimate.rating();
    let status_icon = if rating.is_safe() { check_ok } else { check_warn };

    let entropy_style = if options.color_support {
        if rating.is_safe() {
            Style::new().green()
        } else {
            Style::new().yellow()
        }
    } else {
        Style::new()
    };

    let word_count = config.strength.word_count();
    let length = config.output_length();

    println!();
    println!("Stats:");

    println!(
        "  {} Entropy    {} {} bits ({})",
        branch,
        entropy_style.apply_to(format!("[{}]", status_icon)),
        entropy_style.apply_to(format!("{:.1}", estimate.entropy_bits)),
        entropy_style.apply_to(rating.label())
    );
    println!(
        "  {} Space      {:.0} combinations",
        branch, estimate.combinations
    );
    println!(
        "  {} Length     {} {}, {} {}",
        branch,
        length,
        plural(length, "char", "chars"),
        word_count,
        plural(word_count, "word", "words")
    );

    println!(
        "  {} Pentium    {} ({}/s)",
        branch,
        format_duration(estimate.pentium_seconds),
        BRUTE_FORCE_ATTEMPTS_PENTIUM
    );
    println!(
        "  {} Supercomp  {} ({}/s)",
        last,
        format_duration(estimate.supercomp_seconds),
        BRUTE_FORCE_ATTEMPTS_SUPERCOMP
    );

    println!(
        "\n{} Security: {}",
        entropy_style.apply_to(format!("[{}]", status_icon)),
        entropy_style.apply_to(rating.label())
    );
}
