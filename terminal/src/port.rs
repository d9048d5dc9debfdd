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

//! Byte-level terminal input and output

use std::io;
use std::time::Duration;

/// Byte-oriented access to the terminal.
///
/// `read_byte` waits at most `timeout` for a single byte and reports a timeout
/// as `Ok(None)`. `write_bytes` may accept fewer bytes than requested; callers
/// that need every byte written check the returned count.
pub trait TerminalPort {
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>>;

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<usize>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<P: TerminalPort + ?Sized> TerminalPort for &mut P {
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        (**self).read_byte(timeout)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<usize> {
        (**self).write_bytes(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Port over the process's standard input and output descriptors.
#[cfg(unix)]
#[derive(Debug, Clone, Copy)]
pub struct StdioPort {
    input: libc::c_int,
    output: libc::c_int,
}

#[cfg(unix)]
impl StdioPort {
    pub fn new() -> Self {
        Self {
            input: libc::STDIN_FILENO,
            output: libc::STDOUT_FILENO,
        }
    }
}

#[cfg(unix)]
impl Default for StdioPort {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
impl TerminalPort for StdioPort {
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        let mut fds = libc::pollfd {
            fd: self.input,
            events: libc::POLLIN,
            revents: 0,
        };
        let millis = timeout.as_millis().min(libc::c_int::MAX as u128) as libc::c_int;
        // SAFETY: `fds` is a single valid pollfd for the duration of the call.
        let ready = unsafe { libc::poll(&mut fds, 1, millis) };
        if ready < 0 {
            let error = io::Error::last_os_error();
            return match error.kind() {
                io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock => Ok(None),
                _ => Err(error),
            };
        }
        if ready == 0 {
            return Ok(None);
        }

        let mut byte = 0u8;
        // SAFETY: reading at most one byte into a live stack location.
        let read = unsafe { libc::read(self.input, (&mut byte as *mut u8).cast(), 1) };
        match read {
            1 => Ok(Some(byte)),
            0 => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "terminal input closed",
            )),
            _ => {
                let error = io::Error::last_os_error();
                match error.kind() {
                    io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock => Ok(None),
                    _ => Err(error),
                }
            }
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<usize> {
        if bytes.is_empty() {
            return Ok(0);
        }
        // SAFETY: `bytes` is a valid slice for `bytes.len()` bytes.
        let written = unsafe { libc::write(self.output, bytes.as_ptr().cast(), bytes.len()) };
        if written < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(written as usize)
        }
    }
}

/// One scripted outcome of [`MemoryPort::read_byte`].
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadStep {
    Byte(u8),
    Timeout,
    Error(io::ErrorKind),
}

/// In-memory port that replays scripted input and records output.
///
/// Once the script runs out every read fails with `UnexpectedEof`, so a
/// session driven by a finished script always terminates.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct MemoryPort {
    input: std::collections::VecDeque<ReadStep>,
    output: Vec<u8>,
    write_limit: Option<usize>,
    flushes: usize,
}

#[cfg(any(test, feature = "test-util"))]
impl MemoryPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a port whose input is the given bytes.
    pub fn with_input(bytes: &[u8]) -> Self {
        let mut port = Self::new();
        port.push_input(bytes);
        port
    }

    /// Caps how many bytes a single write accepts.
    pub fn with_write_limit(mut self, limit: usize) -> Self {
        self.write_limit = Some(limit);
        self
    }

    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied().map(ReadStep::Byte));
    }

    pub fn push_step(&mut self, step: ReadStep) {
        self.input.push_back(step);
    }

    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Returns and clears the recorded output.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

#[cfg(any(test, feature = "test-util"))]
impl TerminalPort for MemoryPort {
    fn read_byte(&mut self, _timeout: Duration) -> io::Result<Option<u8>> {
        match self.input.pop_front() {
            Some(ReadStep::Byte(byte)) => Ok(Some(byte)),
            Some(ReadStep::Timeout) => Ok(None),
            Some(ReadStep::Error(kind)) => Err(io::Error::new(kind, "scripted read failure")),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "scripted input exhausted",
            )),
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let accepted = match self.write_limit {
            Some(limit) => bytes.len().min(limit),
            None => bytes.len(),
        };
        self.output.extend_from_slice(&bytes[..accepted]);
        Ok(accepted)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_millis(10);

    #[test]
    fn test_memory_port_replays_script() {
        let mut port = MemoryPort::with_input(b"ab");
        port.push_step(ReadStep::Timeout);
        assert_eq!(port.read_byte(TIMEOUT).unwrap(), Some(b'a'));
        assert_eq!(port.read_byte(TIMEOUT).unwrap(), Some(b'b'));
        assert_eq!(port.read_byte(TIMEOUT).unwrap(), None);
        assert_eq!(port.remaining_input(), 0);
    }

    #[test]
    fn test_memory_port_exhausted_is_eof() {
        let mut port = MemoryPort::new();
        let error = port.read_byte(TIMEOUT).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_memory_port_scripted_error() {
        let mut port = MemoryPort::new();
        port.push_step(ReadStep::Error(io::ErrorKind::BrokenPipe));
        let error = port.read_byte(TIMEOUT).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_memory_port_records_output() {
        let mut port = MemoryPort::new();
        assert_eq!(port.write_bytes(b"\x1b[H").unwrap(), 3);
        assert_eq!(port.write_bytes(b"x").unwrap(), 1);
        assert_eq!(port.output(), b"\x1b[Hx");
        assert_eq!(port.take_output(), b"\x1b[Hx".to_vec());
        assert!(port.output().is_empty());
    }

    #[test]
    fn test_memory_port_write_limit() {
        let mut port = MemoryPort::new().with_write_limit(2);
        assert_eq!(port.write_bytes(b"\x1b[2J").unwrap(), 2);
        assert_eq!(port.output(), b"\x1b[");
    }

    #[test]
    fn test_port_through_mutable_reference() {
        fn drive<P: TerminalPort>(mut port: P) -> io::Result<()> {
            port.write_bytes(b"ok")?;
            port.flush()
        }

        let mut port = MemoryPort::new();
        drive(&mut port).unwrap();
        assert_eq!(port.output(), b"ok");
        assert_eq!(port.flush_count(), 1);
    }
}
