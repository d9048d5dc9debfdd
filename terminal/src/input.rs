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

//! Key event input

use crate::{TerminalConfig, TerminalError, TerminalPort, TerminalResult};
use bytes::{BufMut, BytesMut};
use hari_ansicodec::{AnsiCodec, DecoderState, KeyDecoder, RawKeyEvent};
use std::time::Duration;
use tokio_util::codec::Decoder;
use tracing::{instrument, trace};

/// Pulls bytes from a port one at a time and decodes them into key events.
///
/// A timeout in the middle of an escape sequence keeps the partial sequence,
/// so the next byte continues where decoding stopped.
#[derive(Debug)]
pub struct InputReader {
    codec: AnsiCodec,
    pending: BytesMut,
    timeout: Duration,
}

impl InputReader {
    pub fn new(config: &TerminalConfig) -> Self {
        Self {
            codec: AnsiCodec::with_decoder(KeyDecoder::with_quit_key(config.quit_key)),
            pending: BytesMut::with_capacity(1),
            timeout: config.read_timeout,
        }
    }

    pub fn decoder(&self) -> &KeyDecoder {
        self.codec.decoder()
    }

    pub fn state(&self) -> DecoderState {
        self.codec.decoder().state()
    }

    /// Reads at most one byte and returns the event it completes, if any.
    ///
    /// Returns `Ok(None)` when the read timed out or the byte only extended an
    /// escape sequence.
    #[instrument(skip_all)]
    pub fn poll_event<P: TerminalPort + ?Sized>(
        &mut self,
        port: &mut P,
    ) -> TerminalResult<Option<RawKeyEvent>> {
        let byte = match port.read_byte(self.timeout) {
            Ok(Some(byte)) => byte,
            Ok(None) => return Ok(None),
            Err(error) => {
                self.codec.decoder_mut().fail();
                return Err(TerminalError::InputRead(error));
            }
        };
        trace!(byte, "Read input byte");
        self.pending.put_u8(byte);
        Ok(self.codec.decode(&mut self.pending)?)
    }

    /// Blocks, polling with the configured timeout, until an event arrives.
    pub fn next_event<P: TerminalPort + ?Sized>(&mut self, port: &mut P) -> TerminalResult<RawKeyEvent> {
        loop {
            if let Some(event) = self.poll_event(port)? {
                return Ok(event);
            }
        }
    }
}
