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

//! Terminal window size discovery

use crate::{
    CursorCommand, TerminalConfig, TerminalError, TerminalPort, TerminalResult, TerminalSize,
    write_exact,
};
use bytes::BytesMut;
use hari_ansicodec::{AnsiCodec, AnsiError, parse_cursor_report};
use std::io;
use tokio_util::codec::Encoder;
use tracing::{debug, instrument};

/// Moves far past the bottom-right corner; terminals clamp to the last cell.
const MOVE_TO_CORNER: [CursorCommand; 2] = [CursorCommand::Forward(999), CursorCommand::Down(999)];

#[cfg(unix)]
impl crate::Tty {
    /// Window size from the `TIOCGWINSZ` ioctl on standard output.
    pub fn window_size(&self) -> Option<TerminalSize> {
        // SAFETY: winsize is plain data filled in by the ioctl.
        let mut size: libc::winsize = unsafe { std::mem::zeroed() };
        // SAFETY: TIOCGWINSZ writes one winsize into the pointed-to value.
        let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };
        if result == -1 || size.ws_col == 0 {
            return None;
        }
        Some(TerminalSize::new(size.ws_col as usize, size.ws_row as usize))
    }
}

/// Finds the window size by parking the cursor in the bottom-right corner and
/// asking the terminal where it ended up.
///
/// Bytes of the reply are read raw until the terminating `R`, the first read
/// that times out, or `config.report_limit` bytes, whichever comes first. A
/// terminal that never answers yields an empty, malformed report.
#[instrument(skip_all)]
pub fn query_window_size<P: TerminalPort + ?Sized>(
    port: &mut P,
    config: &TerminalConfig,
) -> TerminalResult<TerminalSize> {
    let mut codec = AnsiCodec::new();
    let mut request = BytesMut::new();
    for command in MOVE_TO_CORNER {
        codec.encode(command, &mut request)?;
    }
    codec.encode(CursorCommand::RequestPosition, &mut request)?;
    write_exact(port, &request)?;
    port.flush().map_err(TerminalError::Output)?;

    let mut reply = Vec::with_capacity(config.report_limit);
    while reply.len() < config.report_limit {
        match port.read_byte(config.read_timeout) {
            Ok(Some(b'R')) => break,
            Ok(Some(byte)) => reply.push(byte),
            Ok(None) => {
                debug!(received = reply.len(), "Cursor report read timed out");
                break;
            }
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(TerminalError::InputRead(error)),
        }
    }
    if reply.len() >= config.report_limit {
        return Err(AnsiError::MalformedReport {
            description: format!("no terminator within {} bytes", config.report_limit),
        }
        .into());
    }

    let report = parse_cursor_report(&reply)?;
    debug!(rows = report.row, cols = report.col, "Window size from cursor report");
    Ok(TerminalSize::new(report.col, report.row))
}

/// Where a [`WindowSize`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeSource {
    /// The `TIOCGWINSZ` ioctl. No terminal output.
    Ioctl,
    /// A size measured earlier. No terminal output.
    Cached,
    /// The cursor report query, which leaves the cursor in the bottom-right corner.
    CursorReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub size: TerminalSize,
    pub source: SizeSource,
}

impl WindowSize {
    pub fn new(size: TerminalSize, source: SizeSource) -> Self {
        Self { size, source }
    }

    /// Check if measuring moved the terminal cursor.
    pub fn moved_cursor(&self) -> bool {
        self.source == SizeSource::CursorReport
    }
}

impl From<TerminalSize> for WindowSize {
    fn from(size: TerminalSize) -> Self {
        Self::new(size, SizeSource::Cached)
    }
}

/// Measures the window, preferring the ioctl.
///
/// The cursor report query runs at most once; its answer is reused while the
/// ioctl stays unavailable, so the query never competes with key input after
/// start-up.
#[derive(Debug, Clone, Default)]
pub struct WindowSizer {
    cached: Option<TerminalSize>,
}

impl WindowSizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached(&self) -> Option<TerminalSize> {
        self.cached
    }

    /// `ioctl` is the result of [`Tty::window_size`](crate::Tty) or its equivalent.
    pub fn measure<P: TerminalPort + ?Sized>(
        &mut self,
        ioctl: Option<TerminalSize>,
        port: &mut P,
        config: &TerminalConfig,
    ) -> TerminalResult<WindowSize> {
        if let Some(size) = ioctl {
            self.cached = Some(size);
            return Ok(WindowSize::new(size, SizeSource::Ioctl));
        }
        if let Some(size) = self.cached {
            return Ok(WindowSize::new(size, SizeSource::Cached));
        }
        let size = query_window_size(port, config)?;
        self.cached = Some(size);
        Ok(WindowSize::new(size, SizeSource::CursorReport))
    }
}
