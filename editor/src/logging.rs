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

//! File-backed tracing setup. Standard output is the screen while raw mode is
//! on, so logs only ever go to a file.

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Path of the log file. Logging is off when unset.
pub const LOG_FILE_VAR: &str = "HARI_LOG_FILE";

/// Maximum level, as a `tracing::Level` name.
pub const LOG_LEVEL_VAR: &str = "HARI_LOG";

pub const DEFAULT_LEVEL: Level = Level::WARN;

pub fn parse_level(value: Option<&str>) -> Level {
    value
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_LEVEL)
}

/// Installs the global subscriber from the environment.
pub fn init() {
    let Some(path) = std::env::var_os(LOG_FILE_VAR) else {
        return;
    };
    let level = parse_level(std::env::var(LOG_LEVEL_VAR).ok().as_deref());
    init_with(path, level);
}

fn init_with(path: OsString, level: Level) {
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(error) => {
            eprintln!("hari: cannot open log file {:?}: {}", path, error);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
