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
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Anything holding secret material that can be wiped on demand.
pub trait Clearable {
    /// Overwrites the held material with zeros. Calling it again is a no-op.
    fn clear(&mut self);
}

/// Growable byte storage that is zeroed on `clear()` and on drop.
#[derive(Default, Zeroize, ZeroizeOnDrop)]
pub struct SecureBuffer {
    data: Vec<u8>,
}

impl SecureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `data` without copying it.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn append(&mut self, bytes: &[u8]) {
        // Growing in place may reallocate and leave a stale copy behind,
        // so build the new storage first and wipe the old one ourselves.
        let mut buffer = Vec::with_capacity(self.data.len() + bytes.len());
        buffer.extend_from_slice(&self.data);
        buffer.extend_from_slice(bytes);

        self.data.zeroize();
        self.data = buffer;
    }

    pub fn push(&mut self, byte: u8) {
        self.append(&[byte]);
    }

    pub fn replace_at(&mut self, index: usize, byte: u8) -> Result<()> {
        let len = self.data.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        *slot = byte;
        Ok(())
    }
}

impl Clearable for SecureBuffer {
    fn clear(&mut self) {
        self.data.zeroize();
    }
}

impl fmt::Debug for SecureBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureBuffer([REDACTED; {} bytes])", self.data.len())
    }
}

/// A piece of secret material backed by a [`SecureBuffer`].
#[derive(Default, Debug)]
pub struct Secret {
    buffer: SecureBuffer,
}

impl Secret {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            buffer: SecureBuffer::from_slice(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    pub fn last(&self) -> Option<u8> {
        self.buffer.as_bytes().last().copied()
    }

    pub fn append(&mut self, bytes: &[u8]) {
        self.buffer.append(bytes);
    }

    pub fn push(&mut self, byte: u8) {
        self.buffer.push(byte);
    }

    /// Moves the bytes of `other` onto the end of `self`.
    ///
    /// `other` is zeroed and empty when this returns.
    pub fn append_and_clear_source(&mut self, other: &mut Secret) {
        self.buffer.append(other.as_bytes());
        other.clear();
    }

    pub fn replace_at(&mut self, index: usize, byte: u8) -> Result<()> {
        self.buffer.replace_at(index, byte)
    }
}

impl Clearable for Secret {
    fn clear(&mut self) {
        self.buffer.clear();
    }
}
