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

//! Passphrases as character-oriented secrets, and their display form.
//!
//! A [`Passphrase`] stores raw bytes and never hands out a `String`. When it
//! has to be shown, it is turned into a [`FormattedPassphrase`], a separately
//! owned char buffer that the caller clears once it has been printed.

use crate::error::Result;
use crate::secret::{Clearable, Secret};
use std::fmt::{self, Write};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

const GROUP_SIZE: usize = 4;
const BLOCK_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormattingStyle {
    #[default]
    InWords,
    InWordsMultiLine,
    Raw,
}

impl FormattingStyle {
    pub const ALL: [FormattingStyle; 3] = [
        FormattingStyle::InWords,
        FormattingStyle::InWordsMultiLine,
        FormattingStyle::Raw,
    ];

    /// The style after this one, wrapping around at the end of [`Self::ALL`].
    pub fn next(self) -> Self {
        let index = Self::ALL
            .iter()
            .position(|style| *style == self)
            .unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn is_multi_line(self) -> bool {
        self == FormattingStyle::InWordsMultiLine
    }

    pub fn is_raw(self) -> bool {
        self == FormattingStyle::Raw
    }
}

/// A generated passphrase.
///
/// The raw byte length is authoritative. Generated passphrases are ASCII,
/// so one byte is one character; use [`Passphrase::decode_to_chars`] when
/// the content may hold anything else.
#[derive(Debug, Default)]
pub struct Passphrase {
    secret: Secret,
}

impl Passphrase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_secret(secret: Secret) -> Self {
        Self { secret }
    }

    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            secret: Secret::from_slice(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.secret.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    /// The byte at `index` read as a char, without decoding.
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.as_bytes().get(index).map(|&b| b as char)
    }

    pub fn push_char(&mut self, ch: char) {
        let mut encoded = Zeroizing::new([0u8; 4]);
        let len = ch.encode_utf8(&mut encoded[..]).len();
        self.secret.append(&encoded[..len]);
    }

    pub fn append_and_clear_source(&mut self, other: &mut Secret) {
        self.secret.append_and_clear_source(other);
    }

    pub fn replace_at(&mut self, index: usize, byte: u8) -> Result<()> {
        self.secret.replace_at(index, byte)
    }

    /// Decodes the stored UTF-8 into chars, substituting U+FFFD for invalid
    /// sequences. The result is wiped when dropped.
    pub fn decode_to_chars(&self) -> Zeroizing<Vec<char>> {
        let mut chars = Zeroizing::new(Vec::with_capacity(self.len()));
        for chunk in self.as_bytes().utf8_chunks() {
            chars.extend(chunk.valid().chars());
            if !chunk.invalid().is_empty() {
                chars.push(char::REPLACEMENT_CHARACTER);
            }
        }
        chars
    }

    pub fn to_formatted(&self) -> FormattedPassphrase {
        self.to_formatted_with(FormattingStyle::default())
    }

    pub fn to_formatted_with(&self, style: FormattingStyle) -> FormattedPassphrase {
        FormattedPassphrase::create(style, self)
    }
}

impl Clearable for Passphrase {
    fn clear(&mut self) {
        self.secret.clear();
    }
}

/// Display-only rendering of a [`Passphrase`], grouped for readability.
#[derive(Default, Zeroize, ZeroizeOnDrop)]
pub struct FormattedPassphrase {
    chars: Vec<char>,
}

impl FormattedPassphrase {
    fn create(style: FormattingStyle, passphrase: &Passphrase) -> Self {
        let decoded = passphrase.decode_to_chars();

        // Room for the separators up front, so pushing never reallocates.
        let mut chars = Vec::with_capacity(decoded.len() * 2);

        for (i, &ch) in decoded.iter().enumerate() {
            if !style.is_raw() && i != 0 && i % GROUP_SIZE == 0 {
                if i % BLOCK_SIZE == 0 {
                    if style.is_multi_line() {
                        chars.push('\n');
                    } else {
                        chars.extend_from_slice(&[' ', ' ']);
                    }
                } else {
                    chars.push(' ');
                }
            }
            chars.push(ch);
        }

        Self { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }
}

impl Clearable for FormattedPassphrase {
    fn clear(&mut self) {
        self.chars.zeroize();
    }
}

impl fmt::Display for FormattedPassphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &ch in &self.chars {
            f.write_char(ch)?;
        }
        Ok(())
    }
}

impl fmt::Debug for FormattedPassphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FormattedPassphrase([REDACTED; {} chars])", self.chars.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatted(raw: &str, style: FormattingStyle) -> String {
        Passphrase::from_slice(raw.as_bytes())
            .to_formatted_with(style)
            .to_string()
    }

    #[test]
    fn test_style_cycle() {
        assert_eq!(
            FormattingStyle::InWords.next(),
            FormattingStyle::InWordsMultiLine
        );
        assert_eq!(FormattingStyle::InWordsMultiLine.next(), FormattingStyle::Raw);
        assert_eq!(FormattingStyle::Raw.next(), FormattingStyle::InWords);
        assert_eq!(FormattingStyle::default(), FormattingStyle::InWords);
    }

    #[test]
    fn test_grouping_sixteen_chars() {
        let out = formatted("abcdefghijklmnop", FormattingStyle::InWords);
        assert_eq!(out, "abcd efgh  ijkl mnop");

        let chars: Vec<char> = out.chars().collect();
        assert_eq!(chars[4], ' ');
        assert_eq!(chars[9], ' ');
        assert_eq!(chars[10], ' ');
        assert_eq!(chars[15], ' ');
    }

    #[test]
    fn test_grouping_with_suffix() {
        assert_eq!(
            formatted("bakehuto7!", FormattingStyle::InWords),
            "bake huto  7!"
        );
        assert_eq!(formatted("abc", FormattingStyle::InWords), "abc");
        assert_eq!(formatted("abcd", FormattingStyle::InWords), "abcd");
        assert_eq!(formatted("", FormattingStyle::InWords), "");
    }

    #[test]
    fn test_grouping_multi_line() {
        assert_eq!(
            formatted("abcdefghijklmnopq", FormattingStyle::InWordsMultiLine),
            "abcd efgh\nijkl mnop\nq"
        );
    }

    #[test]
    fn test_raw_disables_grouping() {
        assert_eq!(
            formatted("abcdefghijklmnop", FormattingStyle::Raw),
            "abcdefghijklmnop"
        );
    }

    #[test]
    fn test_grouping_counts_decoded_chars() {
        let passphrase = Passphrase::from_slice("äöüßabcd".as_bytes());
        assert_eq!(passphrase.len(), 12);
        assert_eq!(passphrase.decode_to_chars().len(), 8);
        assert_eq!(passphrase.to_formatted().to_string(), "äöüß abcd");
    }

    #[test]
    fn test_decode_replaces_invalid_bytes() {
        let passphrase = Passphrase::from_slice(&[b'a', 0xff, b'b']);
        let decoded = passphrase.decode_to_chars();
        assert_eq!(decoded.as_slice(), &['a', char::REPLACEMENT_CHARACTER, 'b']);
    }

    #[test]
    fn test_push_char_and_replace() {
        let mut passphrase = Passphrase::new();
        passphrase.push_char('a');
        passphrase.push_char('b');
        passphrase.replace_at(0, b'A').unwrap();
        assert_eq!(passphrase.as_bytes(), b"Ab");
        assert_eq!(passphrase.char_at(0), Some('A'));
        assert_eq!(passphrase.char_at(2), None);
        assert!(passphrase.replace_at(2, b'x').is_err());

        passphrase.push_char('é');
        assert_eq!(passphrase.len(), 4);
    }

    #[test]
    fn test_from_secret_keeps_bytes() {
        let passphrase = Passphrase::from_secret(Secret::from_slice(b"bakehuto"));
        assert_eq!(passphrase.len(), 8);
        assert_eq!(passphrase.to_formatted().to_string(), "bake huto");
    }

    #[test]
    fn test_append_and_clear_source() {
        let mut passphrase = Passphrase::from_slice(b"ba");
        let mut word = Secret::from_slice(b"ke");
        passphrase.append_and_clear_source(&mut word);
        assert_eq!(passphrase.as_bytes(), b"bake");
        assert!(word.is_empty());
    }

    #[test]
    fn test_clear_formatted_and_passphrase() {
        let mut passphrase = Passphrase::from_slice(b"abcdefgh");
        let mut formatted = passphrase.to_formatted();
        assert_eq!(formatted.len(), 9);
        assert_eq!(formatted.get(4), Some(' '));

        formatted.clear();
        formatted.clear();
        passphrase.clear();
        passphrase.clear();

        assert!(formatted.is_empty());
        assert!(passphrase.is_empty());
        assert_eq!(formatted.to_string(), "");
    }

    #[test]
    fn test_formatted_debug_is_redacted() {
        let formatted = Passphrase::from_slice(b"secret").to_formatted();
        assert!(!format!("{:?}", formatted).contains("secret"));
    }
}
