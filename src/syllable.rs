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

use crate::error::{Error, Result};
use crate::secret::Secret;
use rand::rngs::ThreadRng;
use rand::{CryptoRng, Rng};
use tracing::debug;
use zeroize::Zeroizing;

/// A non-empty set of ASCII characters to draw from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    chars: Vec<u8>,
}

impl Charset {
    pub fn new(name: &'static str, chars: &str) -> Result<Self> {
        if chars.is_empty() {
            return Err(Error::EmptyAlphabet(name));
        }
        if !chars.is_ascii() {
            return Err(Error::invalid_configuration(format!(
                "character set '{}' must be ASCII",
                name
            )));
        }
        Ok(Self {
            chars: chars.as_bytes().to_vec(),
        })
    }

    /// `self` followed by `other`. Duplicates are kept.
    pub fn concat(&self, other: &Charset) -> Self {
        let mut chars = Vec::with_capacity(self.chars.len() + other.chars.len());
        chars.extend_from_slice(&self.chars);
        chars.extend_from_slice(&other.chars);
        Self { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.chars
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.chars.iter().any(|c| c.eq_ignore_ascii_case(&byte))
    }
}

pub(crate) fn draw<R: Rng + ?Sized>(rng: &mut R, set: &[u8]) -> Result<u8> {
    if set.is_empty() {
        return Err(Error::EmptyAlphabet("draw source"));
    }
    Ok(set[rng.random_range(0..set.len())])
}

/// Produces pronounceable two-letter tuples and four-letter words.
///
/// The second letter of a tuple depends on the first: after a vowel any
/// letter may follow, after a consonant only a vowel. The one exception is
/// a doubled consonant, which is allowed when the previous tuple ended in a
/// vowel.
pub struct SyllableGenerator<R = ThreadRng> {
    vowels: Charset,
    consonants: Charset,
    alphabet: Charset,
    rng: R,
}

impl SyllableGenerator<ThreadRng> {
    pub fn new(vowels: &str, consonants: &str) -> Result<Self> {
        Self::with_rng(vowels, consonants, rand::rng())
    }
}

impl<R: CryptoRng> SyllableGenerator<R> {
    pub fn with_rng(vowels: &str, consonants: &str, rng: R) -> Result<Self> {
        let vowels = Charset::new("vowels", vowels)?;
        let consonants = Charset::new("consonants", consonants)?;
        let alphabet = vowels.concat(&consonants);

        debug!(
            vowels = vowels.len(),
            consonants = consonants.len(),
            "syllable generator ready"
        );

        Ok(Self {
            vowels,
            consonants,
            alphabet,
            rng,
        })
    }

    pub fn vowels(&self) -> &Charset {
        &self.vowels
    }

    pub fn consonants(&self) -> &Charset {
        &self.consonants
    }

    /// Vowels followed by consonants.
    pub fn alphabet(&self) -> &Charset {
        &self.alphabet
    }

    pub fn is_vowel(&self, byte: u8) -> bool {
        self.vowels.contains(byte)
    }

    pub fn is_consonant(&self, byte: u8) -> bool {
        self.consonants.contains(byte)
    }

    pub fn draw_char(&mut self, set: &[u8]) -> Result<u8> {
        draw(&mut self.rng, set)
    }

    pub fn generate_tuple(&mut self, prev_ended_in_vowel: bool) -> Result<Secret> {
        let mut tuple = Zeroizing::new([0u8; 2]);
        tuple[0] = draw(&mut self.rng, self.alphabet.as_bytes())?;

        tuple[1] = if self.is_vowel(tuple[0]) {
            draw(&mut self.rng, self.alphabet.as_bytes())?
        } else if prev_ended_in_vowel && self.is_consonant(tuple[0]) {
            // Vowels plus the first letter itself, one slot each.
            let vowels = self.vowels.as_bytes();
            let index = self.rng.random_range(0..=vowels.len());
            vowels.get(index).copied().unwrap_or(tuple[0])
        } else {
            draw(&mut self.rng, self.vowels.as_bytes())?
        };

        Ok(Secret::from_slice(&tuple[..]))
    }

    pub fn generate_word(&mut self) -> Result<Secret> {
        let mut word = self.generate_tuple(false)?;
        let ends_in_vowel = word.last().is_some_and(|b| self.is_vowel(b));

        let mut next = self.generate_tuple(ends_in_vowel)?;
        word.append_and_clear_source(&mut next);

        Ok(word)
    }
}
