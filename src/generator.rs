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

use crate::entropy;
use crate::error::Result;
use crate::passphrase::Passphrase;
use crate::secret::Secret;
use crate::syllable::{Charset, SyllableGenerator};
use rand::CryptoRng;
use rand::rngs::ThreadRng;
use tracing::{debug, trace};

pub const DEFAULT_VOWELS: &str = "aeiouy";
pub const DEFAULT_CONSONANTS: &str = "bcdfghjklmnpqrstvwxz";
pub const DEFAULT_DIGITS: &str = "0123456789";
pub const DEFAULT_SPECIAL_CHARS: &str = "!?-,.:/$&@#_;+*";
pub const EXTENDED_SPECIAL_CHARS: &str = "()[]{}<>\"'=%\\~|";

pub const CHARS_PER_WORD: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Strength {
    OneWord,
    TwoWords,
    Easy,
    #[default]
    Normal,
    Strong,
    Ultra,
    Extreme,
    Hyper,
}

impl Strength {
    pub const ALL: [Strength; 8] = [
        Strength::OneWord,
        Strength::TwoWords,
        Strength::Easy,
        Strength::Normal,
        Strength::Strong,
        Strength::Ultra,
        Strength::Extreme,
        Strength::Hyper,
    ];

    /// Target phrase length in characters, before any digit or special char.
    pub const fn phrase_length(self) -> usize {
        match self {
            Strength::OneWord => 4,
            Strength::TwoWords => 8,
            Strength::Easy => 12,
            Strength::Normal => 16,
            Strength::Strong => 20,
            Strength::Ultra => 24,
            Strength::Extreme => 28,
            Strength::Hyper => 32,
        }
    }

    pub const fn word_count(self) -> usize {
        self.phrase_length() / CHARS_PER_WORD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationConfig {
    pub strength: Strength,
    pub word_beginning_upper_case: bool,
    pub add_digit: bool,
    pub add_special_char: bool,
    pub use_extended_special_chars: bool,
}

impl GenerationConfig {
    pub fn new(strength: Strength) -> Self {
        Self {
            strength,
            ..Self::default()
        }
    }

    /// Raw length of a passphrase generated with this config.
    pub fn output_length(&self) -> usize {
        CHARS_PER_WORD * self.strength.word_count()
            + usize::from(self.add_digit)
            + usize::from(self.add_special_char)
    }
}

/// A generator of some kind of secret, described by a spec value.
pub trait SecretGenerator {
    type Spec;
    type Secret;

    fn generate(&mut self, spec: &Self::Spec) -> Result<Self::Secret>;

    /// Exact number of distinct secrets `generate` can produce for `spec`.
    fn calc_combination_count(&self, spec: &Self::Spec) -> f64;

    fn calc_entropy(&self, combinations: f64) -> f64 {
        entropy::entropy_bits(combinations)
    }

    fn calc_brute_force_waiting_seconds(&self, combinations: f64, attempts_per_second: u64) -> f64 {
        entropy::brute_force_seconds(combinations, attempts_per_second)
    }
}

pub struct PassphraseGenerator<R = ThreadRng> {
    syllables: SyllableGenerator<R>,
    digits: Charset,
    special_chars: Charset,
    all_special_chars: Charset,
}

impl PassphraseGenerator<ThreadRng> {
    pub fn new() -> Result<Self> {
        Self::with_rng(rand::rng())
    }

    pub fn builder() -> PassphraseGeneratorBuilder {
        PassphraseGeneratorBuilder::default()
    }
}

impl<R: CryptoRng> PassphraseGenerator<R> {
    pub fn with_rng(rng: R) -> Result<Self> {
        PassphraseGeneratorBuilder::default().build(rng)
    }

    pub fn syllables(&self) -> &SyllableGenerator<R> {
        &self.syllables
    }

    pub fn digits(&self) -> &Charset {
        &self.digits
    }

    pub fn special_chars(&self, extended: bool) -> &Charset {
        if extended {
            &self.all_special_chars
        } else {
            &self.special_chars
        }
    }
}

impl<R: CryptoRng> SecretGenerator for PassphraseGenerator<R> {
    type Spec = GenerationConfig;
    type Secret = Passphrase;

    fn generate(&mut self, spec: &GenerationConfig) -> Result<Passphrase> {
        let word_count = spec.strength.word_count();
        debug!(
            strength = ?spec.strength,
            word_count,
            upper_case = spec.word_beginning_upper_case,
            digit = spec.add_digit,
            special = spec.add_special_char,
            extended = spec.use_extended_special_chars,
            "generating passphrase"
        );

        let mut words = Secret::new();
        for _ in 0..word_count {
            let mut word = self.syllables.generate_word()?;
            words.append_and_clear_source(&mut word);
        }
        let mut passphrase = Passphrase::from_secret(words);

        if spec.word_beginning_upper_case {
            if let Some(&first) = passphrase.as_bytes().first() {
                passphrase.replace_at(0, first.to_ascii_uppercase())?;
            }
        }

        if spec.add_digit {
            let digit = self.syllables.draw_char(self.digits.as_bytes())?;
            passphrase.push_char(digit as char);
        }

        if spec.add_special_char {
            let set = if spec.use_extended_special_chars {
                &self.all_special_chars
            } else {
                &self.special_chars
            };
            let special = self.syllables.draw_char(set.as_bytes())?;
            passphrase.push_char(special as char);
        }

        Ok(passphrase)
    }

    fn calc_combination_count(&self, spec: &GenerationConfig) -> f64 {
        let vowels = self.syllables.vowels().len() as f64;
        let consonants = self.syllables.consonants().len() as f64;
        let alphabet = self.syllables.alphabet().len() as f64;

        // A·((V/A)·A + (C/A)·V) with the fractions cancelled out, so every
        // step stays an exact integer in f64.
        let tuple_combinations = vowels * alphabet + consonants * vowels;
        // Tuples ending in a vowel, after which a doubled consonant may follow.
        let tuple_combinations_with_vowel_last = vowels * alphabet;

        let word_combinations = (tuple_combinations * tuple_combinations
            + tuple_combinations_with_vowel_last * consonants)
            .floor();
        let word_count = spec.strength.word_count();
        let mut total = word_combinations.powf(word_count as f64).ceil();

        trace!(
            tuple_combinations,
            tuple_combinations_with_vowel_last,
            word_combinations,
            word_count,
            "combination count"
        );

        if spec.add_digit {
            total *= self.digits.len() as f64;
        }
        if spec.add_special_char {
            total *= self.special_chars(spec.use_extended_special_chars).len() as f64;
        }

        total
    }
}

/// Character sets for a [`PassphraseGenerator`], validated on `build`.
#[derive(Debug, Clone)]
pub struct PassphraseGeneratorBuilder {
    vowels: String,
    consonants: String,
    digits: String,
    special_chars: String,
    extended_special_chars: String,
}

impl Default for PassphraseGeneratorBuilder {
    fn default() -> Self {
        Self {
            vowels: DEFAULT_VOWELS.to_string(),
            consonants: DEFAULT_CONSONANTS.to_string(),
            digits: DEFAULT_DIGITS.to_string(),
            special_chars: DEFAULT_SPECIAL_CHARS.to_string(),
            extended_special_chars: EXTENDED_SPECIAL_CHARS.to_string(),
        }
    }
}

impl PassphraseGeneratorBuilder {
    pub fn vowels(mut self, vowels: impl Into<String>) -> Self {
        self.vowels = vowels.into();
        self
    }

    pub fn consonants(mut self, consonants: impl Into<String>) -> Self {
        self.consonants = consonants.into();
        self
    }

    pub fn digits(mut self, digits: impl Into<String>) -> Self {
        self.digits = digits.into();
        self
    }

    pub fn special_chars(mut self, special_chars: impl Into<String>) -> Self {
        self.special_chars = special_chars.into();
        self
    }

    pub fn extended_special_chars(mut self, extended: impl Into<String>) -> Self {
        self.extended_special_chars = extended.into();
        self
    }

    pub fn build<R: CryptoRng>(self, rng: R) -> Result<PassphraseGenerator<R>> {
        let syllables = SyllableGenerator::with_rng(&self.vowels, &self.consonants, rng)?;
        let digits = Charset::new("digits", &self.digits)?;
        let special_chars = Charset::new("special chars", &self.special_chars)?;
        let extended = Charset::new("extended special chars", &self.extended_special_chars)?;
        let all_special_chars = special_chars.concat(&extended);

        Ok(PassphraseGenerator {
            syllables,
            digits,
            special_chars,
            all_special_chars,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::secret::Clearable;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded() -> PassphraseGenerator<StdRng> {
        PassphraseGenerator::with_rng(StdRng::seed_from_u64(42)).unwrap()
    }

    fn strength_strategy() -> impl Strategy<Value = Strength> {
        proptest::sample::select(Strength::ALL.to_vec())
    }

    fn config_strategy() -> impl Strategy<Value = GenerationConfig> {
        (
            strength_strategy(),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(strength, upper, digit, special, extended)| GenerationConfig {
                strength,
                word_beginning_upper_case: upper,
                add_digit: digit,
                add_special_char: special,
                use_extended_special_chars: extended,
            })
    }

    #[test]
    fn test_strength_table() {
        let expected = [
            (Strength::OneWord, 4, 1),
            (Strength::TwoWords, 8, 2),
            (Strength::Easy, 12, 3),
            (Strength::Normal, 16, 4),
            (Strength::Strong, 20, 5),
            (Strength::Ultra, 24, 6),
            (Strength::Extreme, 28, 7),
            (Strength::Hyper, 32, 8),
        ];
        for (strength, length, words) in expected {
            assert_eq!(strength.phrase_length(), length);
            assert_eq!(strength.word_count(), words);
        }
        assert_eq!(Strength::default(), Strength::Normal);
    }

    #[test]
    fn test_default_config() {
        let config = GenerationConfig::default();
        assert_eq!(config.strength, Strength::Normal);
        assert!(!config.word_beginning_upper_case);
        assert!(!config.add_digit);
        assert!(!config.add_special_char);
        assert!(!config.use_extended_special_chars);
        assert_eq!(config.output_length(), 16);
    }

    #[test]
    fn test_combination_count_default_one_word() {
        let generator = seeded();
        let count = generator.calc_combination_count(&GenerationConfig::new(Strength::OneWord));
        assert_eq!(count, 79296.0);
    }

    #[test]
    fn test_combination_count_small_alphabet() {
        let generator = PassphraseGenerator::builder()
            .vowels("ai")
            .consonants("hst")
            .build(StdRng::seed_from_u64(1))
            .unwrap();

        let plain = GenerationConfig::new(Strength::OneWord);
        assert_eq!(generator.calc_combination_count(&plain), 286.0);

        let special = GenerationConfig {
            add_special_char: true,
            ..plain
        };
        assert_eq!(generator.calc_combination_count(&special), 286.0 * 15.0);

        let extended = GenerationConfig {
            use_extended_special_chars: true,
            ..special
        };
        assert_eq!(generator.calc_combination_count(&extended), 286.0 * 30.0);

        let digit = GenerationConfig {
            add_digit: true,
            ..plain
        };
        assert_eq!(generator.calc_combination_count(&digit), 2860.0);
    }

    #[test]
    fn test_combination_count_ignores_extended_without_special() {
        let generator = seeded();
        let config = GenerationConfig {
            use_extended_special_chars: true,
            ..GenerationConfig::new(Strength::TwoWords)
        };
        assert_eq!(generator.calc_combination_count(&config), 79296.0 * 79296.0);
    }

    #[test]
    fn test_combination_count_raises_word_combinations_to_word_count() {
        let generator = seeded();
        for strength in Strength::ALL {
            let expected = 79296f64.powf(strength.word_count() as f64).ceil();
            assert_eq!(
                generator.calc_combination_count(&GenerationConfig::new(strength)),
                expected
            );
        }
    }

    #[test]
    fn test_combination_count_deterministic() {
        let generator = seeded();
        let config = GenerationConfig {
            add_digit: true,
            add_special_char: true,
            ..GenerationConfig::new(Strength::Hyper)
        };
        assert_eq!(
            generator.calc_combination_count(&config),
            generator.calc_combination_count(&config)
        );
    }

    #[test]
    fn test_combination_count_monotonic_in_words() {
        let generator = seeded();
        let counts: Vec<f64> = Strength::ALL
            .iter()
            .map(|&s| generator.calc_combination_count(&GenerationConfig::new(s)))
            .collect();
        for pair in counts.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(generator.calc_entropy(pair[0]) < generator.calc_entropy(pair[1]));
        }
    }

    #[test]
    fn test_generate_upper_case_first() {
        let mut generator = seeded();
        let config = GenerationConfig {
            word_beginning_upper_case: true,
            ..GenerationConfig::new(Strength::Strong)
        };
        for _ in 0..100 {
            let mut passphrase = generator.generate(&config).unwrap();
            let first = passphrase.as_bytes()[0];
            assert!(first.is_ascii_uppercase());
            assert!(generator.syllables().alphabet().contains(first));
            assert!(passphrase.as_bytes()[1..].iter().all(|b| !b.is_ascii_uppercase()));
            passphrase.clear();
        }
    }

    #[test]
    fn test_generate_suffixes() {
        let mut generator = seeded();
        let config = GenerationConfig {
            add_digit: true,
            add_special_char: true,
            use_extended_special_chars: true,
            ..GenerationConfig::new(Strength::Easy)
        };
        for _ in 0..100 {
            let passphrase = generator.generate(&config).unwrap();
            let bytes = passphrase.as_bytes();
            assert_eq!(bytes.len(), 14);
            assert!(bytes[12].is_ascii_digit());
            assert!(generator.special_chars(true).as_bytes().contains(&bytes[13]));
        }
    }

    #[test]
    fn test_generate_special_not_extended() {
        let mut generator = seeded();
        let config = GenerationConfig {
            add_special_char: true,
            ..GenerationConfig::new(Strength::OneWord)
        };
        for _ in 0..200 {
            let passphrase = generator.generate(&config).unwrap();
            let last = passphrase.as_bytes()[4];
            assert!(DEFAULT_SPECIAL_CHARS.as_bytes().contains(&last));
        }
    }

    #[test]
    fn test_builder_rejects_empty_sets() {
        let result = PassphraseGenerator::builder()
            .digits("")
            .build(StdRng::seed_from_u64(0));
        assert_eq!(result.err(), Some(Error::EmptyAlphabet("digits")));

        let result = PassphraseGenerator::builder()
            .extended_special_chars("")
            .build(StdRng::seed_from_u64(0));
        assert_eq!(
            result.err(),
            Some(Error::EmptyAlphabet("extended special chars"))
        );
    }

    #[test]
    fn test_default_generator_uses_thread_rng() {
        let mut generator = PassphraseGenerator::new().unwrap();
        let mut passphrase = generator.generate(&GenerationConfig::default()).unwrap();
        assert_eq!(passphrase.len(), 16);
        passphrase.clear();
        assert!(passphrase.is_empty());
    }

    proptest! {
        #[test]
        fn generated_length_matches_config(config in config_strategy(), seed in any::<u64>()) {
            let mut generator = PassphraseGenerator::with_rng(StdRng::seed_from_u64(seed)).unwrap();
            let mut passphrase = generator.generate(&config).unwrap();

            prop_assert_eq!(passphrase.len(), config.output_length());
            prop_assert_eq!(
                passphrase.len(),
                4 * config.strength.word_count()
                    + usize::from(config.add_digit)
                    + usize::from(config.add_special_char)
            );
            if config.word_beginning_upper_case {
                prop_assert!(passphrase.as_bytes()[0].is_ascii_uppercase());
            }

            passphrase.clear();
            prop_assert_eq!(passphrase.len(), 0);
        }
    }
}
