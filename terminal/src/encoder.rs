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

//! Cursor position emission

use crate::{CursorPosition, PositioningMode, TerminalError, TerminalPort, TerminalResult};
use bytes::BytesMut;
use hari_ansicodec::{AnsiCodec, Axis, CursorCommand};
use tokio_util::codec::Encoder;
use tracing::{instrument, trace};

/// Writes `bytes` with a single port write.
///
/// A short write is reported as [`TerminalError::PartialWrite`] instead of
/// being silently retried.
pub fn write_exact<P: TerminalPort + ?Sized>(port: &mut P, bytes: &[u8]) -> TerminalResult<()> {
    if bytes.is_empty() {
        return Ok(());
    }
    let written = port.write_bytes(bytes).map_err(TerminalError::Output)?;
    if written != bytes.len() {
        return Err(TerminalError::PartialWrite {
            written,
            expected: bytes.len(),
        });
    }
    Ok(())
}

/// Turns logical cursor positions into escape sequences on a port.
///
/// In [`PositioningMode::Relative`] the encoder remembers the last position it
/// successfully wrote and sends only the per-axis moves needed to reach the
/// next one. Without a remembered position it falls back to an absolute move.
#[derive(Debug, Default)]
pub struct EscapeEncoder {
    mode: PositioningMode,
    last: Option<CursorPosition>,
    buffer: BytesMut,
    codec: AnsiCodec,
}

impl EscapeEncoder {
    pub fn new(mode: PositioningMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> PositioningMode {
        self.mode
    }

    /// Last position known to be on screen.
    pub fn last_emitted(&self) -> Option<CursorPosition> {
        self.last
    }

    /// Forgets the last emitted position so the next emission is absolute.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Moves the terminal cursor to `position`.
    ///
    /// Returns the number of bytes written, zero when the cursor is already
    /// there.
    #[instrument(skip_all, fields(row = position.row, col = position.col))]
    pub fn emit<P: TerminalPort + ?Sized>(
        &mut self,
        port: &mut P,
        position: CursorPosition,
    ) -> TerminalResult<usize> {
        if self.last == Some(position) {
            return Ok(0);
        }

        self.buffer.clear();
        match (self.mode, self.last) {
            (PositioningMode::Relative, Some(last)) => {
                let drow = position.row as isize - last.row as isize;
                let dcol = position.col as isize - last.col as isize;
                for command in [
                    CursorCommand::relative(Axis::Vertical, drow),
                    CursorCommand::relative(Axis::Horizontal, dcol),
                ]
                .into_iter()
                .flatten()
                {
                    self.codec.encode(command, &mut self.buffer)?;
                }
            }
            _ => {
                self.codec.encode(
                    CursorCommand::MoveTo {
                        row: position.row,
                        col: position.col,
                    },
                    &mut self.buffer,
                )?;
            }
        }

        self.flush_buffer(port)?;
        self.last = Some(position);
        trace!(bytes = self.buffer.len(), "Emitted cursor position");
        Ok(self.buffer.len())
    }

    /// Writes a single command. Any command other than a cursor report request
    /// may move the cursor, so the remembered position is dropped.
    pub fn emit_command<P: TerminalPort + ?Sized>(
        &mut self,
        port: &mut P,
        command: CursorCommand,
    ) -> TerminalResult<usize> {
        if command != CursorCommand::RequestPosition {
            self.last = None;
        }
        self.buffer.clear();
        self.codec.encode(command, &mut self.buffer)?;
        self.flush_buffer(port)?;
        Ok(self.buffer.len())
    }

    fn flush_buffer<P: TerminalPort + ?Sized>(&mut self, port: &mut P) -> TerminalResult<()> {
        let result = write_exact(port, &self.buffer)
            .and_then(|()| port.flush().map_err(TerminalError::Output));
        if result.is_err() {
            self.last = None;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryPort;

    #[test]
    fn test_absolute_emission() {
        let mut port = MemoryPort::new();
        let mut encoder = EscapeEncoder::new(PositioningMode::Absolute);
        let written = encoder.emit(&mut port, CursorPosition::new(3, 7)).unwrap();
        assert_eq!(written, 6);
        assert_eq!(port.output(), b"\x1b[3;7H");
        assert_eq!(encoder.last_emitted(), Some(CursorPosition::new(3, 7)));
    }

    #[test]
    fn test_absolute_mode_always_sends_full_position() {
        let mut port = MemoryPort::new();
        let mut encoder = EscapeEncoder::new(PositioningMode::Absolute);
        encoder.emit(&mut port, CursorPosition::new(1, 1)).unwrap();
        encoder.emit(&mut port, CursorPosition::new(2, 1)).unwrap();
        assert_eq!(port.output(), b"\x1b[1;1H\x1b[2;1H");
    }

    #[test]
    fn test_unchanged_position_writes_nothing() {
        let mut port = MemoryPort::new();
        let mut encoder = EscapeEncoder::new(PositioningMode::Absolute);
        encoder.emit(&mut port, CursorPosition::new(4, 4)).unwrap();
        port.take_output();
        assert_eq!(encoder.emit(&mut port, CursorPosition::new(4, 4)).unwrap(), 0);
        assert!(port.output().is_empty());
    }

    #[test]
    fn test_relative_first_emission_is_absolute() {
        let mut port = MemoryPort::new();
        let mut encoder = EscapeEncoder::new(PositioningMode::Relative);
        encoder.emit(&mut port, CursorPosition::new(3, 4)).unwrap();
        assert_eq!(port.output(), b"\x1b[3;4H");
    }

    #[test]
    fn test_relative_moves() {
        let mut port = MemoryPort::new();
        let mut encoder = EscapeEncoder::new(PositioningMode::Relative);
        encoder.emit(&mut port, CursorPosition::new(3, 4)).unwrap();
        port.take_output();

        encoder.emit(&mut port, CursorPosition::new(5, 4)).unwrap();
        assert_eq!(port.take_output(), b"\x1b[2B".to_vec());

        encoder.emit(&mut port, CursorPosition::new(5, 1)).unwrap();
        assert_eq!(port.take_output(), b"\x1b[3D".to_vec());

        encoder.emit(&mut port, CursorPosition::new(4, 12)).unwrap();
        assert_eq!(port.take_output(), b"\x1b[1A\x1b[11C".to_vec());
    }

    #[test]
    fn test_invalidate_forces_absolute() {
        let mut port = MemoryPort::new();
        let mut encoder = EscapeEncoder::new(PositioningMode::Relative);
        encoder.emit(&mut port, CursorPosition::new(3, 4)).unwrap();
        encoder.invalidate();
        port.take_output();
        encoder.emit(&mut port, CursorPosition::new(3, 5)).unwrap();
        assert_eq!(port.output(), b"\x1b[3;5H");
    }

    #[test]
    fn test_partial_write_is_reported() {
        let mut port = MemoryPort::new().with_write_limit(3);
        let mut encoder = EscapeEncoder::new(PositioningMode::Absolute);
        let result = encoder.emit(&mut port, CursorPosition::new(10, 20));
        assert!(matches!(
            result,
            Err(TerminalError::PartialWrite {
                written: 3,
                expected: 8
            })
        ));
        assert_eq!(encoder.last_emitted(), None);
    }

    #[test]
    fn test_emit_command_invalidates_position() {
        let mut port = MemoryPort::new();
        let mut encoder = EscapeEncoder::new(PositioningMode::Relative);
        encoder.emit(&mut port, CursorPosition::new(2, 2)).unwrap();
        encoder.emit_command(&mut port, CursorCommand::ClearScreen).unwrap();
        assert_eq!(encoder.last_emitted(), None);
    }

    #[test]
    fn test_request_position_keeps_position() {
        let mut port = MemoryPort::new();
        let mut encoder = EscapeEncoder::new(PositioningMode::Relative);
        encoder.emit(&mut port, CursorPosition::new(2, 2)).unwrap();
        encoder
            .emit_command(&mut port, CursorCommand::RequestPosition)
            .unwrap();
        assert_eq!(encoder.last_emitted(), Some(CursorPosition::new(2, 2)));
        assert!(port.output().ends_with(b"\x1b[6n"));
    }

    #[test]
    fn test_write_exact() {
        let mut port = MemoryPort::new();
        write_exact(&mut port, b"hello").unwrap();
        write_exact(&mut port, b"").unwrap();
        assert_eq!(port.output(), b"hello");
    }
}
