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

//! Error types for the terminal crate

use hari_ansicodec::AnsiError;
use std::io;
use thiserror::Error;

/// Result type for the terminal
pub type TerminalResult<T> = Result<T, TerminalError>;

/// Terminal control error types
#[derive(Debug, Error)]
pub enum TerminalError {
    /// Reading the current terminal attributes failed
    #[error("failed to query terminal attributes: {0}")]
    TerminalQuery(#[source] io::Error),

    /// Applying raw-mode attributes failed
    #[error("failed to configure terminal attributes: {0}")]
    TerminalConfigure(#[source] io::Error),

    /// Re-applying the original attributes failed
    #[error("failed to restore terminal attributes: {0}")]
    TerminalRestore(#[source] io::Error),

    /// Reading input failed for a reason other than a timeout
    #[error("failed to read terminal input: {0}")]
    InputRead(#[source] io::Error),

    /// The output port accepted fewer bytes than requested
    #[error("partial write: {written} of {expected} bytes written")]
    PartialWrite {
        /// Bytes the port accepted
        written: usize,
        /// Bytes that were requested
        expected: usize,
    },

    /// Writing output failed
    #[error("failed to write terminal output: {0}")]
    Output(#[source] io::Error),

    /// Encoding or decoding error from the ANSI layer
    #[error("ANSI error: {0}")]
    Ansi(#[from] AnsiError),
}

impl TerminalError {
    /// Check if the error should end the session.
    ///
    /// Only a partial write leaves the decision to the caller, which may retry
    /// the remaining bytes.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, TerminalError::PartialWrite { .. })
    }

    /// Check if the error came from reading or writing terminal attributes
    pub fn is_attribute_error(&self) -> bool {
        matches!(
            self,
            TerminalError::TerminalQuery(_)
                | TerminalError::TerminalConfigure(_)
                | TerminalError::TerminalRestore(_)
        )
    }
}
