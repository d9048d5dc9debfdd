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

//! Raw-mode terminal control.
//!
//! [`RawModeSession`] owns the switch into raw mode and guarantees the original
//! attributes come back exactly once. [`CursorModel`] tracks the logical cursor,
//! [`InputReader`] turns port bytes into key events and [`EscapeEncoder`]
//! writes cursor positions back out. All byte traffic goes through a
//! [`TerminalPort`], so everything above the OS layer runs against the
//! scripted `MemoryPort` that the `test-util` feature exposes.

mod config;
mod cursor;
mod encoder;
mod input;
mod port;
mod result;
mod session;
mod types;
mod window;

pub use self::config::{DEFAULT_READ_TIMEOUT, DEFAULT_REPORT_LIMIT, PositioningMode, TerminalConfig};
pub use self::cursor::CursorModel;
pub use self::encoder::{EscapeEncoder, write_exact};
pub use self::input::InputReader;
#[cfg(unix)]
pub use self::port::StdioPort;
pub use self::port::TerminalPort;
#[cfg(any(test, feature = "test-util"))]
pub use self::port::{MemoryPort, ReadStep};
pub use self::result::{TerminalError, TerminalResult};
#[cfg(unix)]
pub use self::session::Tty;
pub use self::session::{RawModeSession, TerminalDevice};
pub use self::types::{CursorOffset, CursorOrigin, CursorPosition, TerminalSize};
pub use self::window::{SizeSource, WindowSize, WindowSizer, query_window_size};

pub use hari_ansicodec::{CursorCommand, DecoderState, RawKeyEvent, RawKeyEventKind};
