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

//! Error types for the ansicodec crate.

use thiserror::Error;

/// Result type alias for operations that may fail with an [`AnsiError`].
pub type AnsiResult<T> = Result<T, AnsiError>;

/// Errors raised while encoding or decoding terminal byte streams.
#[derive(Debug, Error)]
pub enum AnsiError {
    /// I/O error surfaced through the codec traits.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A command template was rendered with the wrong number of arguments.
    ///
    /// This is a programming error in the caller, never a runtime condition.
    #[error("template expects {expected} argument(s) but {actual} were supplied")]
    TemplateArity {
        /// Number of placeholders in the template
        expected: usize,
        /// Number of arguments supplied
        actual: usize,
    },

    /// A cursor position report (`ESC [ row ; col R`) could not be parsed.
    #[error("malformed cursor position report: {description}")]
    MalformedReport {
        /// What was wrong with the report
        description: String,
    },
}

impl AnsiError {
    pub(crate) fn malformed_report(description: impl Into<String>) -> Self {
        AnsiError::MalformedReport {
            description: description.into(),
        }
    }
}
