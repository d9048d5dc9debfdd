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

use enum_kinds::EnumKind;

/// Logical key event decoded from raw terminal input.
#[derive(Clone, Debug, PartialEq, Eq, EnumKind)]
#[enum_kind(RawKeyEventKind, derive(Hash))]
pub enum RawKeyEvent {
    /// Any byte that does not start an escape sequence and is not the quit key
    Plain(u8),
    /// The quit key (Ctrl+Q by default)
    Quit,
    /// `ESC [ A`
    ArrowUp,
    /// `ESC [ B`
    ArrowDown,
    /// `ESC [ C`
    ArrowRight,
    /// `ESC [ D`
    ArrowLeft,
    /// An escape sequence the decoder does not understand, with the bytes it consumed
    UnrecognizedSequence(Vec<u8>),
}

impl RawKeyEvent {
    /// Cursor displacement `(drow, dcol)` requested by an arrow key.
    pub fn cursor_delta(&self) -> Option<(isize, isize)> {
        match self {
            RawKeyEvent::ArrowUp => Some((-1, 0)),
            RawKeyEvent::ArrowDown => Some((1, 0)),
            RawKeyEvent::ArrowRight => Some((0, 1)),
            RawKeyEvent::ArrowLeft => Some((0, -1)),
            _ => None,
        }
    }

    /// Returns `true` for the four arrow keys.
    pub fn is_arrow(&self) -> bool {
        self.cursor_delta().is_some()
    }

    /// The fieldless kind of this event, suitable for logging and counting.
    pub fn kind(&self) -> RawKeyEventKind {
        RawKeyEventKind::from(self)
    }
}
