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

//! Logical cursor tracking

use crate::{CursorOffset, CursorOrigin, CursorPosition};
use hari_ansicodec::RawKeyEvent;
use tracing::trace;

/// Logical cursor as an origin plus a non-negative offset.
///
/// The absolute position is always `origin + offset` and is derived on demand.
/// Moves that would take an axis below zero stop at zero; there is no upper
/// bound, so the terminal is left to clip positions past its edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorModel {
    origin: CursorOrigin,
    offset: CursorOffset,
}

impl CursorModel {
    /// Creates a cursor at the given origin with a zero offset.
    pub fn new(origin: CursorOrigin) -> Self {
        Self {
            origin,
            offset: CursorOffset::default(),
        }
    }

    pub fn origin(&self) -> CursorOrigin {
        self.origin
    }

    pub fn offset(&self) -> CursorOffset {
        self.offset
    }

    /// Applies a signed displacement, flooring each axis at zero.
    pub fn move_by(&mut self, drow: isize, dcol: isize) {
        self.offset.drow = self.offset.drow.saturating_add_signed(drow);
        self.offset.dcol = self.offset.dcol.saturating_add_signed(dcol);
        trace!(
            drow = self.offset.drow,
            dcol = self.offset.dcol,
            "Cursor moved"
        );
    }

    /// Replaces the origin. The offset is kept.
    pub fn reset_origin(&mut self, row0: usize, col0: usize) {
        self.origin = CursorOrigin::new(row0, col0);
    }

    /// Clears the offset so the cursor sits on the origin.
    pub fn home(&mut self) {
        self.offset = CursorOffset::default();
    }

    pub fn absolute_position(&self) -> CursorPosition {
        CursorPosition::new(
            self.origin.row0.saturating_add(self.offset.drow),
            self.origin.col0.saturating_add(self.offset.dcol),
        )
    }

    /// Applies an arrow key event. Returns `true` if the event was an arrow.
    pub fn apply(&mut self, event: &RawKeyEvent) -> bool {
        match event.cursor_delta() {
            Some((drow, dcol)) => {
                self.move_by(drow, dcol);
                true
            }
            None => false,
        }
    }
}
