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

pub const BRUTE_FORCE_ATTEMPTS_PENTIUM: u64 = 100_000;
pub const BRUTE_FORCE_ATTEMPTS_SUPERCOMP: u64 = 1_000_000_000;

pub const MIN_SAFE_ENTROPY: f64 = 64.0;
pub const PARANOID_ENTROPY: f64 = 128.0;

pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = 60.0 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: f64 = 24.0 * SECONDS_PER_HOUR;
pub const SECONDS_PER_YEAR: f64 = 365.0 * SECONDS_PER_DAY;

pub fn entropy_bits(combinations: f64) -> f64 {
    combinations.log2()
}

pub fn brute_force_seconds(combinations: f64, attempts_per_second: u64) -> f64 {
    combinations / attempts_per_second as f64
}

pub fn seconds_to_years(seconds: f64) -> f64 {
    seconds / SECONDS_PER_YEAR
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Weak,
    Strong,
    Paranoid,
}

impl Rating {
    pub fn from_entropy(bits: f64) -> Self {
        if bits >= PARANOID_ENTROPY {
            Rating::Paranoid
        } else if bits >= MIN_SAFE_ENTROPY {
            Rating::Strong
        } else {
            Rating::Weak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::Weak => "Weak",
            Rating::Strong => "Strong",
            Rating::Paranoid => "Paranoid",
        }
    }

    pub fn is_safe(self) -> bool {
        self != Rating::Weak
    }
}

/// Everything reported about a combination count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub combinations: f64,
    pub entropy_bits: f64,
    pub pentium_seconds: f64,
    pub supercomp_seconds: f64,
}

impl Estimate {
    pub fn from_combinations(combinations: f64) -> Self {
        Self {
            combinations,
            entropy_bits: entropy_bits(combinations),
            pentium_seconds: brute_force_seconds(combinations, BRUTE_FORCE_ATTEMPTS_PENTIUM),
            supercomp_seconds: brute_force_seconds(combinations, BRUTE_FORCE_ATTEMPTS_SUPERCOMP),
        }
    }

    pub fn pentium_years(&self) -> f64 {
        seconds_to_years(self.pentium_seconds)
    }

    pub fn supercomp_years(&self) -> f64 {
        seconds_to_years(self.supercomp_seconds)
    }

    pub fn rating(&self) -> Rating {
        Rating::from_entropy(self.entropy_bits)
    }
}
