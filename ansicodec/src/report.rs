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

use crate::consts::ESC;
use crate::{AnsiError, AnsiResult};

/// Cursor position reported by the terminal in reply to `ESC [ 6 n`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CursorReport {
    /// 1-based row
    pub row: usize,
    /// 1-based column
    pub col: usize,
}

/// Parses a cursor position report, `ESC [ row ; col R`.
///
/// The trailing `R` is optional so callers can pass the bytes read up to, but
/// not including, the terminator.
pub fn parse_cursor_report(bytes: &[u8]) -> AnsiResult<CursorReport> {
    let body = match bytes {
        [ESC, b'[', body @ ..] => body,
        [] => return Err(AnsiError::malformed_report("empty report")),
        _ => return Err(AnsiError::malformed_report("missing ESC [ introducer")),
    };
    let body = body.strip_suffix(b"R").unwrap_or(body);

    let separator = body
        .iter()
        .position(|&b| b == b';')
        .ok_or_else(|| AnsiError::malformed_report("missing ';' separator"))?;
    let row = parse_number(&body[..separator], "row")?;
    let col = parse_number(&body[separator + 1..], "column")?;
    Ok(CursorReport { row, col })
}

fn parse_number(digits: &[u8], name: &str) -> AnsiResult<usize> {
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(AnsiError::malformed_report(format!(
            "{} is not a number: {:?}",
            name,
            digits.escape_ascii().to_string()
        )));
    }
    digits.iter().try_fold(0usize, |acc, &digit| {
        acc.checked_mul(10)
            .and_then(|acc| acc.checked_add(usize::from(digit - b'0')))
            .ok_or_else(|| AnsiError::malformed_report(format!("{} out of range", name)))
    })
}
