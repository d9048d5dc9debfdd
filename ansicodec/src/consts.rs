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

/// Escape (`ESC`, 0x1B), the first byte of every control sequence.
pub const ESC: u8 = 0x1B;

/// Maps a letter to the byte its Ctrl chord produces.
pub const fn ctrl_key(key: u8) -> u8 {
    key & 0x1F
}

/// Ctrl+Q, the key that ends the session.
pub const QUIT_KEY: u8 = ctrl_key(b'q');

/// Longest input sequence the key decoder recognizes (`ESC [ <final>`).
///
/// The decoder never holds more than this many bytes of a partial sequence.
pub const MAX_SEQUENCE_LENGTH: usize = 3;

/// Marker byte that introduces a template placeholder (`%d`).
pub const PLACEHOLDER_MARKER: u8 = b'%';

/// Starting capacity of a [`CommandBuffer`](crate::CommandBuffer) created with `new`.
pub const INITIAL_COMMAND_CAPACITY: usize = 16;

/// CUP - Cursor Position, `ESC [ row ; col H`.
pub const CURSOR_POSITION: &[u8] = b"\x1b[%d;%dH";

/// CUU - Cursor Up, `ESC [ n A`.
pub const CURSOR_UP: &[u8] = b"\x1b[%dA";

/// CUD - Cursor Down, `ESC [ n B`.
pub const CURSOR_DOWN: &[u8] = b"\x1b[%dB";

/// CUF - Cursor Forward, `ESC [ n C`.
pub const CURSOR_FORWARD: &[u8] = b"\x1b[%dC";

/// CUB - Cursor Back, `ESC [ n D`.
pub const CURSOR_BACK: &[u8] = b"\x1b[%dD";

/// ED - Erase entire display.
pub const CLEAR_SCREEN: &[u8] = b"\x1b[2J";

/// CUP without parameters, moves the cursor to row 1 column 1.
pub const CURSOR_HOME: &[u8] = b"\x1b[H";

/// DSR - Device Status Report, asks the terminal to report the cursor position.
pub const DEVICE_STATUS_REPORT: &[u8] = b"\x1b[6n";
