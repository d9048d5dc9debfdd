//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Growable command buffer and the `%d` template renderer used to build
//! escape sequences.

use crate::consts::{INITIAL_COMMAND_CAPACITY, PLACEHOLDER_MARKER};
use crate::{AnsiError, AnsiResult};

/// An owned byte buffer with an explicit logical length.
///
/// The buffer never truncates: when a write does not fit, the capacity is
/// doubled until it does. `len() <= capacity()` holds after every operation and
/// bytes past `len()` are unspecified.
#[derive(Clone)]
pub struct CommandBuffer {
    storage: Box<[u8]>,
    len: usize,
}

impl CommandBuffer {
    /// Creates an empty buffer with [`INITIAL_COMMAND_CAPACITY`] bytes of storage.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_COMMAND_CAPACITY)
    }

    /// Creates an empty buffer with exactly `capacity` bytes of storage.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: vec![0; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bytes the buffer can hold before it has to grow.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// The written bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// Discards the contents, keeping the storage.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Appends a single byte.
    pub fn push(&mut self, byte: u8) {
        self.reserve(1);
        self.storage[self.len] = byte;
        self.len += 1;
    }

    /// Appends a byte slice.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.reserve(bytes.len());
        self.storage[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
    }

    /// Appends the decimal form of `value`: a leading `-` for negatives, no
    /// leading zeros.
    pub fn push_decimal(&mut self, value: i64) {
        let width = decimal_len(value);
        self.reserve(width);
        let slot = &mut self.storage[self.len..self.len + width];
        let mut remaining = value.unsigned_abs();
        for byte in slot.iter_mut().rev() {
            *byte = b'0' + (remaining % 10) as u8;
            remaining /= 10;
        }
        if value < 0 {
            slot[0] = b'-';
        }
        self.len += width;
    }

    /// Consumes the buffer, returning the written bytes.
    pub fn into_vec(self) -> Vec<u8> {
        let mut bytes = self.storage.into_vec();
        bytes.truncate(self.len);
        bytes
    }

    fn reserve(&mut self, additional: usize) {
        let required = self.len + additional;
        if required <= self.storage.len() {
            return;
        }
        let mut capacity = self.storage.len().max(1);
        while capacity < required {
            capacity *= 2;
        }
        let mut grown = vec![0; capacity].into_boxed_slice();
        grown[..self.len].copy_from_slice(&self.storage[..self.len]);
        self.storage = grown;
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<[u8]> for CommandBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl std::fmt::Debug for CommandBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandBuffer")
            .field("len", &self.len)
            .field("capacity", &self.storage.len())
            .field("bytes", &self.as_slice().escape_ascii().to_string())
            .finish()
    }
}

/// Number of bytes in the decimal form of `value`, sign included.
fn decimal_len(value: i64) -> usize {
    let mut remaining = value.unsigned_abs();
    let mut digits = 1;
    while remaining >= 10 {
        remaining /= 10;
        digits += 1;
    }
    digits + usize::from(value < 0)
}

/// A byte-string template with `%d` numeric placeholders.
///
/// `%%` renders a single `%`; any other byte following `%` is copied through
/// unchanged together with the marker.
///
/// ```text
/// CommandTemplate::new(b"\x1b[%d;%dH").render(&[3, 5])  =>  b"\x1b[3;5H"
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CommandTemplate<'a> {
    source: &'a [u8],
    placeholders: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Piece<'a> {
    Literal(&'a [u8]),
    Placeholder,
}

struct Pieces<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Pieces<'a> {
    type Item = Piece<'a>;

    fn next(&mut self) -> Option<Piece<'a>> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.iter().position(|&b| b == PLACEHOLDER_MARKER) {
            None => {
                let literal = self.rest;
                self.rest = &[];
                Some(Piece::Literal(literal))
            }
            Some(0) => match self.rest.get(1) {
                Some(&b'd') => {
                    self.rest = &self.rest[2..];
                    Some(Piece::Placeholder)
                }
                Some(&PLACEHOLDER_MARKER) => {
                    let literal = &self.rest[..1];
                    self.rest = &self.rest[2..];
                    Some(Piece::Literal(literal))
                }
                Some(_) => {
                    let literal = &self.rest[..2];
                    self.rest = &self.rest[2..];
                    Some(Piece::Literal(literal))
                }
                None => {
                    let literal = self.rest;
                    self.rest = &[];
                    Some(Piece::Literal(literal))
                }
            },
            Some(position) => {
                let literal = &self.rest[..position];
                self.rest = &self.rest[position..];
                Some(Piece::Literal(literal))
            }
        }
    }
}

impl<'a> CommandTemplate<'a> {
    /// Creates a template, counting its placeholders.
    pub fn new(source: &'a [u8]) -> Self {
        let placeholders = Pieces { rest: source }
            .filter(|piece| *piece == Piece::Placeholder)
            .count();
        Self {
            source,
            placeholders,
        }
    }

    /// Number of `%d` placeholders, which is the number of arguments `render` expects.
    pub fn placeholders(&self) -> usize {
        self.placeholders
    }

    /// The unrendered template bytes.
    pub fn source(&self) -> &'a [u8] {
        self.source
    }

    /// Exact length of the rendered output for `args`.
    pub fn rendered_len(&self, args: &[i64]) -> AnsiResult<usize> {
        self.check_arity(args)?;
        let mut args = args.iter();
        Ok(self
            .pieces()
            .map(|piece| match piece {
                Piece::Literal(bytes) => bytes.len(),
                Piece::Placeholder => args.next().map_or(0, |&value| decimal_len(value)),
            })
            .sum())
    }

    /// Renders the template into a newly allocated, exact-fit byte vector.
    pub fn render(&self, args: &[i64]) -> AnsiResult<Vec<u8>> {
        let mut buffer = CommandBuffer::with_capacity(self.rendered_len(args)?);
        self.write_pieces(args, &mut buffer);
        debug_assert_eq!(buffer.len(), buffer.capacity());
        Ok(buffer.into_vec())
    }

    /// Renders the template onto the end of `buffer`, returning the number of
    /// bytes appended.
    pub fn render_into(&self, args: &[i64], buffer: &mut CommandBuffer) -> AnsiResult<usize> {
        self.check_arity(args)?;
        let start = buffer.len();
        self.write_pieces(args, buffer);
        Ok(buffer.len() - start)
    }

    fn pieces(&self) -> Pieces<'a> {
        Pieces { rest: self.source }
    }

    fn check_arity(&self, args: &[i64]) -> AnsiResult<()> {
        if args.len() != self.placeholders {
            return Err(AnsiError::TemplateArity {
                expected: self.placeholders,
                actual: args.len(),
            });
        }
        Ok(())
    }

    fn write_pieces(&self, args: &[i64], buffer: &mut CommandBuffer) {
        let mut args = args.iter();
        for piece in self.pieces() {
            match piece {
                Piece::Literal(bytes) => buffer.extend_from_slice(bytes),
                Piece::Placeholder => {
                    if let Some(&value) = args.next() {
                        buffer.push_decimal(value);
                    }
                }
            }
        }
    }
}

/// Renders `template` with `args` in one call.
pub fn render(template: &[u8], args: &[i64]) -> AnsiResult<Vec<u8>> {
    CommandTemplate::new(template).render(args)
}
