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

use crate::{AnsiError, AnsiResult, CursorCommand, KeyDecoder, RawKeyEvent};
use tokio_util::bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{instrument, trace};

/// Codec pairing the key decoder with cursor command encoding.
///
/// Decoding consumes bytes from the source buffer one at a time and yields a
/// [`RawKeyEvent`] as soon as one completes; a partial escape sequence stays
/// inside the decoder across calls, so bytes may arrive in any chunking.
/// Encoding writes [`CursorCommand`] escape sequences or raw bytes.
#[derive(Clone, Debug, Default)]
pub struct AnsiCodec {
    decoder: KeyDecoder,
}

impl AnsiCodec {
    /// Creates a codec with a default [`KeyDecoder`].
    pub fn new() -> Self {
        Self::with_decoder(KeyDecoder::new())
    }

    /// Creates a codec around an existing decoder.
    pub fn with_decoder(decoder: KeyDecoder) -> Self {
        Self { decoder }
    }

    /// Get a reference to the key decoder
    pub fn decoder(&self) -> &KeyDecoder {
        &self.decoder
    }

    /// Get a mutable reference to the key decoder
    pub fn decoder_mut(&mut self) -> &mut KeyDecoder {
        &mut self.decoder
    }
}

impl Decoder for AnsiCodec {
    type Item = RawKeyEvent;
    type Error = AnsiError;

    #[instrument(skip_all)]
    fn decode(&mut self, src: &mut BytesMut) -> AnsiResult<Option<Self::Item>> {
        while src.has_remaining() {
            let byte = src.get_u8();
            if let Some(event) = self.decoder.next(byte) {
                trace!(kind = ?event.kind(), "Decoded key event");
                return Ok(Some(event));
            }
        }
        Ok(None)
    }
}

impl Encoder<CursorCommand> for AnsiCodec {
    type Error = AnsiError;

    fn encode(&mut self, item: CursorCommand, dst: &mut BytesMut) -> AnsiResult<()> {
        item.encode(dst)?;
        Ok(())
    }
}

impl Encoder<&[u8]> for AnsiCodec {
    type Error = AnsiError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> AnsiResult<()> {
        dst.extend_from_slice(item);
        Ok(())
    }
}

impl Encoder<&str> for AnsiCodec {
    type Error = AnsiError;

    fn encode(&mut self, item: &str, dst: &mut BytesMut) -> AnsiResult<()> {
        dst.extend_from_slice(item.as_bytes());
        Ok(())
    }
}
