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

use crate::RawKeyEvent;
use crate::consts::{ESC, MAX_SEQUENCE_LENGTH, QUIT_KEY};
use tracing::debug;

/// States of the key decoder.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DecoderState {
    /// Between events; the next byte starts a new event.
    Idle,

    /// `ESC` has been read.
    ///
    /// `[` continues a control sequence, anything else ends it as unrecognized.
    SawEscape,

    /// `ESC [` has been read.
    ///
    /// `A`, `B`, `C` and `D` complete an arrow key, anything else ends the
    /// sequence as unrecognized.
    SawBracket,

    /// The byte source failed while a sequence may have been in progress.
    ///
    /// The partial sequence is dropped and the next byte is handled as in `Idle`.
    Error,
}

/// A byte-at-a-time decoder for VT100 arrow keys and the quit key.
///
/// Each call to [`next`](KeyDecoder::next) consumes exactly one byte and either
/// completes an event or advances the partial-sequence state. After every
/// emitted event the decoder is back in [`DecoderState::Idle`]; nothing but the
/// bytes of the current partial sequence is kept between calls.
#[derive(Clone, Debug)]
pub struct KeyDecoder {
    state: DecoderState,
    pending: [u8; MAX_SEQUENCE_LENGTH],
    pending_len: usize,
    quit_key: u8,
    unrecognized: u64,
}

impl KeyDecoder {
    /// Creates a decoder using Ctrl+Q as the quit key.
    pub fn new() -> Self {
        Self::with_quit_key(QUIT_KEY)
    }

    /// Creates a decoder with a custom quit key.
    pub fn with_quit_key(quit_key: u8) -> Self {
        Self {
            state: DecoderState::Idle,
            pending: [0; MAX_SEQUENCE_LENGTH],
            pending_len: 0,
            quit_key,
            unrecognized: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Returns `true` when no partial sequence is pending.
    ///
    /// The `Error` state left by [`fail`](Self::fail) holds nothing either, so
    /// it counts as idle.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, DecoderState::Idle | DecoderState::Error)
    }

    /// The byte decoded as [`RawKeyEvent::Quit`].
    pub fn quit_key(&self) -> u8 {
        self.quit_key
    }

    /// Bytes of the sequence currently being decoded.
    pub fn pending(&self) -> &[u8] {
        &self.pending[..self.pending_len]
    }

    /// Number of unrecognized escape sequences seen so far.
    pub fn unrecognized_count(&self) -> u64 {
        self.unrecognized
    }

    /// Drops any partial sequence and returns to `Idle`.
    pub fn reset(&mut self) {
        self.pending_len = 0;
        self.state = DecoderState::Idle;
    }

    /// Marks the byte source as failed.
    ///
    /// The partial sequence is discarded; decoding resumes from scratch with the
    /// next byte.
    pub fn fail(&mut self) {
        self.pending_len = 0;
        self.state = DecoderState::Error;
    }

    /// Process the next byte.
    ///
    /// Returns `None` while a sequence is incomplete and `Some(event)` once a
    /// byte completes one.
    pub fn next(&mut self, byte: u8) -> Option<RawKeyEvent> {
        match self.state {
            DecoderState::Idle | DecoderState::Error => self.process_idle(byte),
            DecoderState::SawEscape => self.process_escape(byte),
            DecoderState::SawBracket => self.process_bracket(byte),
        }
    }

    fn process_idle(&mut self, byte: u8) -> Option<RawKeyEvent> {
        self.reset();
        match byte {
            ESC => {
                self.push(byte);
                self.state = DecoderState::SawEscape;
                None
            }
            _ if byte == self.quit_key => Some(RawKeyEvent::Quit),
            _ => Some(RawKeyEvent::Plain(byte)),
        }
    }

    fn process_escape(&mut self, byte: u8) -> Option<RawKeyEvent> {
        self.push(byte);
        if byte == b'[' {
            self.state = DecoderState::SawBracket;
            return None;
        }
        Some(self.unrecognized())
    }

    fn process_bracket(&mut self, byte: u8) -> Option<RawKeyEvent> {
        self.push(byte);
        let event = match byte {
            b'A' => RawKeyEvent::ArrowUp,
            b'B' => RawKeyEvent::ArrowDown,
            b'C' => RawKeyEvent::ArrowRight,
            b'D' => RawKeyEvent::ArrowLeft,
            _ => return Some(self.unrecognized()),
        };
        self.reset();
        Some(event)
    }

    fn push(&mut self, byte: u8) {
        // Sequences end at MAX_SEQUENCE_LENGTH bytes, so this never overflows.
        self.pending[self.pending_len] = byte;
        self.pending_len += 1;
    }

    fn unrecognized(&mut self) -> RawKeyEvent {
        self.unrecognized += 1;
        let sequence = self.pending().to_vec();
        debug!(
            sequence = %sequence.escape_ascii(),
            total = self.unrecognized,
            "Ignoring unrecognized escape sequence"
        );
        self.reset();
        RawKeyEvent::UnrecognizedSequence(sequence)
    }
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self::new()
    }
}
