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

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TerminalSize {
    pub cols: usize,
    pub rows: usize,
}

impl TerminalSize {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }
}

/// Absolute cursor position, 1-based like the terminal's own coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CursorPosition {
    pub row: usize,
    pub col: usize,
}

impl CursorPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Layout anchor the cursor offset is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorOrigin {
    pub row0: usize,
    pub col0: usize,
}

impl CursorOrigin {
    pub fn new(row0: usize, col0: usize) -> Self {
        Self { row0, col0 }
    }
}

impl Default for CursorOrigin {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Accumulated displacement from the origin. Never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CursorOffset {
    pub drow: usize,
    pub dcol: usize,
}

impl CursorOffset {
    pub fn new(drow: usize, dcol: usize) -> Self {
        Self { drow, dcol }
    }
}
