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

use crate::consts::{
    CLEAR_SCREEN, CURSOR_BACK, CURSOR_DOWN, CURSOR_FORWARD, CURSOR_HOME, CURSOR_POSITION,
    CURSOR_UP, DEVICE_STATUS_REPORT,
};
use crate::{AnsiResult, CommandBuffer, CommandTemplate};
use bytes::BufMut;

/// Screen axis for relative cursor movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Rows; negative is up.
    Vertical,
    /// Columns; negative is left.
    Horizontal,
}

/// Cursor and screen control commands the engine emits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CursorCommand {
    /// CUP - Cursor Position
    /// ESC[{row};{col}H - moves the cursor to a 1-based row and column
    MoveTo {
        /// Cursor Row
        row: usize,
        /// Cursor Column
        col: usize,
    },

    /// CUU - Cursor Up
    /// ESC[#A - moves cursor up # lines
    Up(usize),

    /// CUD - Cursor Down
    /// ESC[#B - moves cursor down # lines
    Down(usize),

    /// CUF - Cursor Forward
    /// ESC[#C - moves cursor right # columns
    Forward(usize),

    /// CUB - Cursor Back
    /// ESC[#D - moves cursor left # columns
    Back(usize),

    /// ED - Erase in Display
    /// ESC[2J - erase entire screen
    ClearScreen,

    /// ESC[H - moves the cursor to the top left corner
    Home,

    /// DSR - Device Status Report
    /// ESC[6n - request cursor position (reported as ESC[#;#R)
    RequestPosition,
}

impl CursorCommand {
    /// Relative movement of `n` cells along `axis`.
    ///
    /// The direction comes from the sign of `n` and the count from its
    /// magnitude. Returns `None` when `n` is zero, since no movement needs no
    /// bytes.
    pub fn relative(axis: Axis, n: isize) -> Option<Self> {
        let count = n.unsigned_abs();
        match (axis, n.signum()) {
            (_, 0) => None,
            (Axis::Vertical, -1) => Some(CursorCommand::Up(count)),
            (Axis::Vertical, _) => Some(CursorCommand::Down(count)),
            (Axis::Horizontal, -1) => Some(CursorCommand::Back(count)),
            (Axis::Horizontal, _) => Some(CursorCommand::Forward(count)),
        }
    }

    /// Appends the escape sequence to `buffer`, returning the number of bytes written.
    pub fn render_into(&self, buffer: &mut CommandBuffer) -> AnsiResult<usize> {
        match *self {
            CursorCommand::MoveTo { row, col } => CommandTemplate::new(CURSOR_POSITION)
                .render_into(&[argument(row), argument(col)], buffer),
            CursorCommand::Up(n) => CommandTemplate::new(CURSOR_UP).render_into(&[argument(n)], buffer),
            CursorCommand::Down(n) => {
                CommandTemplate::new(CURSOR_DOWN).render_into(&[argument(n)], buffer)
            }
            CursorCommand::Forward(n) => {
                CommandTemplate::new(CURSOR_FORWARD).render_into(&[argument(n)], buffer)
            }
            CursorCommand::Back(n) => {
                CommandTemplate::new(CURSOR_BACK).render_into(&[argument(n)], buffer)
            }
            CursorCommand::ClearScreen => CommandTemplate::new(CLEAR_SCREEN).render_into(&[], buffer),
            CursorCommand::Home => CommandTemplate::new(CURSOR_HOME).render_into(&[], buffer),
            CursorCommand::RequestPosition => {
                CommandTemplate::new(DEVICE_STATUS_REPORT).render_into(&[], buffer)
            }
        }
    }

    /// Length in bytes of the encoded sequence.
    pub fn len(&self) -> usize {
        let mut buffer = CommandBuffer::new();
        self.render_into(&mut buffer).unwrap_or_default()
    }

    /// Check if the encoded sequence is empty. Never true.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The escape sequence as an exact-fit byte vector.
    pub fn to_bytes(&self) -> AnsiResult<Vec<u8>> {
        let mut buffer = CommandBuffer::new();
        self.render_into(&mut buffer)?;
        Ok(buffer.into_vec())
    }

    /// Encode this command to a `BufMut` buffer.
    ///
    /// Returns the number of bytes written.
    pub fn encode<T: BufMut>(&self, dst: &mut T) -> AnsiResult<usize> {
        let mut buffer = CommandBuffer::new();
        let written = self.render_into(&mut buffer)?;
        dst.put_slice(buffer.as_slice());
        Ok(written)
    }
}

fn argument(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn test_relative_direction_by_sign() {
        assert_eq!(
            CursorCommand::relative(Axis::Vertical, -3),
            Some(CursorCommand::Up(3))
        );
        assert_eq!(
            CursorCommand::relative(Axis::Vertical, 2),
            Some(CursorCommand::Down(2))
        );
        assert_eq!(
            CursorCommand::relative(Axis::Horizontal, 7),
            Some(CursorCommand::Forward(7))
        );
        assert_eq!(
            CursorCommand::relative(Axis::Horizontal, -1),
            Some(CursorCommand::Back(1))
        );
    }

    #[test]
    fn test_relative_zero_is_nothing() {
        assert_eq!(CursorCommand::relative(Axis::Vertical, 0), None);
        assert_eq!(CursorCommand::relative(Axis::Horizontal, 0), None);
    }

    #[test]
    fn test_len_matches_encoding() {
        for command in [
            CursorCommand::MoveTo { row: 12, col: 345 },
            CursorCommand::Up(1),
            CursorCommand::Back(1000),
            CursorCommand::ClearScreen,
            CursorCommand::RequestPosition,
        ] {
            assert_eq!(command.len(), command.to_bytes().unwrap().len());
            assert!(!command.is_empty());
        }
    }

    #[test]
    fn test_move_to_bytes() {
        let bytes = CursorCommand::MoveTo { row: 3, col: 5 }.to_bytes().unwrap();
        assert_eq!(bytes, b"\x1b[3;5H");
    }

    #[test]
    fn test_relative_bytes() {
        assert_eq!(CursorCommand::Up(1).to_bytes().unwrap(), b"\x1b[1A");
        assert_eq!(CursorCommand::Down(12).to_bytes().unwrap(), b"\x1b[12B");
        assert_eq!(CursorCommand::Forward(999).to_bytes().unwrap(), b"\x1b[999C");
        assert_eq!(CursorCommand::Back(4).to_bytes().unwrap(), b"\x1b[4D");
    }

    #[test]
    fn test_fixed_sequences() {
        assert_eq!(CursorCommand::ClearScreen.to_bytes().unwrap(), b"\x1b[2J");
        assert_eq!(CursorCommand::Home.to_bytes().unwrap(), b"\x1b[H");
        assert_eq!(
            CursorCommand::RequestPosition.to_bytes().unwrap(),
            b"\x1b[6n"
        );
    }

    #[test]
    fn test_large_position_is_not_truncated() {
        let bytes = CursorCommand::MoveTo {
            row: 1_234_567,
            col: 89_012_345,
        }
        .to_bytes()
        .unwrap();
        assert_eq!(bytes, b"\x1b[1234567;89012345H");
    }

    #[test]
    fn test_encode_into_bytes_mut() {
        let mut buffer = BytesMut::new();
        let written = CursorCommand::MoveTo { row: 10, col: 20 }
            .encode(&mut buffer)
            .unwrap();
        assert_eq!(written, 8);
        assert_eq!(&buffer[..], b"\x1b[10;20H");
    }

    #[test]
    fn test_render_into_shared_buffer() {
        let mut buffer = CommandBuffer::new();
        CursorCommand::ClearScreen.render_into(&mut buffer).unwrap();
        CursorCommand::Home.render_into(&mut buffer).unwrap();
        assert_eq!(buffer.as_slice(), b"\x1b[2J\x1b[H");
    }
}
