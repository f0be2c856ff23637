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

pub mod entropy;
pub mod error;
pub mod generator;
pub mod passphrase;
pub mod secret;
pub mod syllable;

pub use entropy::{Estimate, Rating, brute_force_seconds, entropy_bits, seconds_to_years};
pub use error::{Error, Result};
pub use generator::{GenerationConfig, PassphraseGenerator, SecretGenerator, Strength};
pub use passphrase::{FormattedPassphrase, FormattingStyle, Passphrase};
pub use secret::{Clearable, Secret, SecureBuffer};
pub use syllable::{Charset, SyllableGenerator};
