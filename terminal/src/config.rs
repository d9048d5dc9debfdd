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

//! Session configuration

use hari_ansicodec::QUIT_KEY;
use std::time::Duration;

/// Default wait for a single input byte.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Default number of bytes read while waiting for a cursor position report.
pub const DEFAULT_REPORT_LIMIT: usize = 32;

/// How the escape encoder expresses cursor moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PositioningMode {
    /// Always send a full `ESC [ row ; col H`.
    #[default]
    Absolute,
    /// Send per-axis relative moves from the last emitted position.
    Relative,
}

/// Tunables for a terminal session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Maximum wait for one input byte before a read reports a timeout.
    pub read_timeout: Duration,
    /// Byte that ends the session.
    pub quit_key: u8,
    /// Cursor encoding strategy.
    pub positioning: PositioningMode,
    /// Upper bound on bytes consumed while reading a position report.
    pub report_limit: usize,
}

impl TerminalConfig {
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub fn with_quit_key(mut self, quit_key: u8) -> Self {
        self.quit_key = quit_key;
        self
    }

    pub fn with_positioning(mut self, positioning: PositioningMode) -> Self {
        self.positioning = positioning;
        self
    }

    pub fn with_report_limit(mut self, report_limit: usize) -> Self {
        self.report_limit = report_limit;
        self
    }

    /// Read timeout in deciseconds, clamped to what `VTIME` can hold.
    pub fn vtime(&self) -> u8 {
        let deciseconds = self.read_timeout.as_millis().div_ceil(100);
        deciseconds.clamp(1, u8::MAX as u128) as u8
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            read_timeout: DEFAULT_READ_TIMEOUT,
            quit_key: QUIT_KEY,
            positioning: PositioningMode::default(),
            report_limit: DEFAULT_REPORT_LIMIT,
        }
    }
}
