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

//! Full-screen frame: banner, numbered-row gutter and a movable cursor.

use bytes::BytesMut;
use hari_terminal::{
    CursorCommand, CursorModel, EscapeEncoder, InputReader, RawKeyEvent, TerminalConfig,
    TerminalError, TerminalPort, TerminalResult, TerminalSize, WindowSize, write_exact,
};
use tracing::{debug, instrument, trace};

/// Rows taken by the banner and the rule under it.
pub const HEADER_HEIGHT: usize = 2;

/// Number shown on the first gutter row.
const FIRST_ROW: usize = 1;

const BANNER: &[u8] = b"[Ctrl+Q] Quit";
const RULE: &[u8] = b"\r\n______________________________________________\r\n";

/// What the loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Columns reserved for row numbers, separator included.
pub fn gutter_width(rows: usize) -> usize {
    let mut last = FIRST_ROW + rows.saturating_sub(HEADER_HEIGHT);
    let mut digits = 1;
    while last >= 10 {
        last /= 10;
        digits += 1;
    }
    digits
}

#[derive(Debug)]
pub struct Editor<P: TerminalPort> {
    port: P,
    cursor: CursorModel,
    encoder: EscapeEncoder,
    reader: InputReader,
    frame: BytesMut,
    size: Option<TerminalSize>,
}

impl<P: TerminalPort> Editor<P> {
    pub fn new(port: P, config: &TerminalConfig) -> Self {
        Self {
            port,
            cursor: CursorModel::default(),
            encoder: EscapeEncoder::new(config.positioning),
            reader: InputReader::new(config),
            frame: BytesMut::new(),
            size: None,
        }
    }

    pub fn cursor(&self) -> &CursorModel {
        &self.cursor
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Redraws the whole screen for `size` and puts the cursor back.
    #[instrument(skip_all, fields(cols = size.cols, rows = size.rows))]
    pub fn refresh_screen(&mut self, size: TerminalSize) -> TerminalResult<()> {
        let width = gutter_width(size.rows);

        self.frame.clear();
        CursorCommand::ClearScreen.encode(&mut self.frame)?;
        CursorCommand::Home.encode(&mut self.frame)?;
        self.frame.extend_from_slice(BANNER);
        self.frame.extend_from_slice(RULE);
        for _ in 0..size.rows.saturating_sub(HEADER_HEIGHT + 1) {
            for _ in 1..width {
                self.frame.extend_from_slice(b"-");
            }
            self.frame.extend_from_slice(b"|\r\n");
        }
        write_exact(&mut self.port, &self.frame)?;

        self.cursor.reset_origin(HEADER_HEIGHT + 1, width + 1);
        self.encoder.invalidate();
        self.encoder
            .emit(&mut self.port, self.cursor.absolute_position())?;
        self.size = Some(size);
        debug!(width, "Refreshed screen");
        Ok(())
    }

    /// Applies one key event to the editor state.
    pub fn process_key(&mut self, event: &RawKeyEvent) -> Flow {
        match event {
            RawKeyEvent::Quit => Flow::Quit,
            _ => {
                if !self.cursor.apply(event) {
                    trace!(kind = ?event.kind(), "Ignoring key");
                }
                Flow::Continue
            }
        }
    }

    /// One loop iteration: redraw if the size changed, put the cursor back if
    /// its on-screen position is unknown, then wait for a key.
    pub fn step(&mut self, size: TerminalSize) -> TerminalResult<Flow> {
        if self.size != Some(size) {
            self.refresh_screen(size)?;
        } else if self.encoder.last_emitted().is_none() {
            self.encoder
                .emit(&mut self.port, self.cursor.absolute_position())?;
        }
        let Some(event) = self.reader.poll_event(&mut self.port)? else {
            return Ok(Flow::Continue);
        };
        let flow = self.process_key(&event);
        if flow == Flow::Continue && event.is_arrow() {
            self.encoder
                .emit(&mut self.port, self.cursor.absolute_position())?;
        }
        Ok(flow)
    }

    /// Runs until the quit key, asking `size_of` for the window size on every
    /// iteration.
    pub fn run<F>(&mut self, mut size_of: F) -> TerminalResult<()>
    where
        F: FnMut(&mut P) -> TerminalResult<WindowSize>,
    {
        loop {
            let measured = size_of(&mut self.port)?;
            if measured.moved_cursor() {
                self.encoder.invalidate();
            }
            if self.step(measured.size)? == Flow::Quit {
                debug!("Quit requested");
                return Ok(());
            }
        }
    }

    /// Blanks the screen and homes the cursor.
    pub fn clear_screen(&mut self) -> TerminalResult<()> {
        self.encoder
            .emit_command(&mut self.port, CursorCommand::ClearScreen)?;
        self.encoder.emit_command(&mut self.port, CursorCommand::Home)?;
        self.port.flush().map_err(TerminalError::Output)
    }
}
