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

//! Byte-level ANSI handling for a raw-mode terminal.
//!
//! Input side: [`KeyDecoder`] classifies bytes read from the terminal into
//! [`RawKeyEvent`]s (plain keys, the quit key, arrow keys and unrecognized
//! escape sequences). Output side: [`CursorCommand`] serializes cursor intents
//! into CSI sequences through the [`CommandTemplate`] renderer. [`AnsiCodec`]
//! ties both directions to `tokio_util`'s `Decoder`/`Encoder` traits.

mod codec;
mod consts;
mod decoder;
mod event;
mod report;
mod result;
mod sequence;
mod template;

pub use self::codec::AnsiCodec;
pub use self::consts::{
    CLEAR_SCREEN, CURSOR_BACK, CURSOR_DOWN, CURSOR_FORWARD, CURSOR_HOME, CURSOR_POSITION,
    CURSOR_UP, DEVICE_STATUS_REPORT, ESC, INITIAL_COMMAND_CAPACITY, MAX_SEQUENCE_LENGTH,
    PLACEHOLDER_MARKER, QUIT_KEY, ctrl_key,
};
pub use self::decoder::{DecoderState, KeyDecoder};
pub use self::event::{RawKeyEvent, RawKeyEventKind};
pub use self::report::{CursorReport, parse_cursor_report};
pub use self::result::{AnsiError, AnsiResult};
pub use self::sequence::{Axis, CursorCommand};
pub use self::template::{CommandBuffer, CommandTemplate, render};
