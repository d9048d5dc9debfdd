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

//! `hari`: a raw-mode full-screen terminal session.
//!
//! Arrow keys move the cursor inside the gutter frame; Ctrl+Q quits.

mod editor;
mod logging;

use crate::editor::Editor;
use hari_terminal::{
    RawModeSession, TerminalConfig, TerminalDevice, TerminalPort, TerminalResult, WindowSize,
};
use std::process::ExitCode;
use tracing::error;

/// Runs the editor inside a raw-mode session.
///
/// The screen is cleared and the terminal restored on every path; the first
/// error wins.
fn run_session<D, P, F>(device: D, port: P, config: &TerminalConfig, size_of: F) -> TerminalResult<()>
where
    D: TerminalDevice,
    P: TerminalPort,
    F: FnMut(&mut P) -> TerminalResult<WindowSize>,
{
    let mut session = RawModeSession::enter(device, config)?;
    let mut editor = Editor::new(port, config);
    let outcome = editor.run(size_of);
    let cleared = editor.clear_screen();
    let restored = session.exit();
    outcome.and(cleared).and(restored)
}

#[cfg(unix)]
fn main() -> ExitCode {
    use hari_terminal::{StdioPort, Tty, WindowSizer};

    logging::init();
    let config = TerminalConfig::default();
    let tty = Tty::stdin();
    if !tty.is_terminal() {
        eprintln!("hari: standard input is not a terminal");
        return ExitCode::FAILURE;
    }
    let mut sizer = WindowSizer::new();
    let result = run_session(tty, StdioPort::new(), &config, |port| {
        sizer.measure(tty.window_size(), port, &config)
    });
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("Session failed: {}", error);
            eprintln!("hari: {}", error);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(unix))]
fn main() -> ExitCode {
    eprintln!("hari: only Unix terminals are supported");
    ExitCode::FAILURE
}
