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

//! Raw-mode session management

use crate::{TerminalConfig, TerminalError, TerminalResult};
use std::io;
use tracing::{debug, error, instrument};

/// Terminal line discipline that can be read, transformed and rewritten.
///
/// `make_raw` is pure: it derives raw-mode attributes from a snapshot without
/// touching the device.
pub trait TerminalDevice {
    type Attributes: Clone;

    fn get_attributes(&self) -> io::Result<Self::Attributes>;

    fn set_attributes(&mut self, attributes: &Self::Attributes) -> io::Result<()>;

    fn make_raw(&self, original: &Self::Attributes, config: &TerminalConfig) -> Self::Attributes;
}

/// Controlling terminal on standard input, driven through termios.
#[cfg(unix)]
#[derive(Debug, Clone, Copy)]
pub struct Tty {
    fd: libc::c_int,
}

#[cfg(unix)]
impl Tty {
    pub fn stdin() -> Self {
        Self {
            fd: libc::STDIN_FILENO,
        }
    }

    /// Check whether the descriptor refers to a terminal.
    pub fn is_terminal(&self) -> bool {
        // SAFETY: isatty only inspects the descriptor.
        unsafe { libc::isatty(self.fd) == 1 }
    }
}

#[cfg(unix)]
impl Default for Tty {
    fn default() -> Self {
        Self::stdin()
    }
}

#[cfg(unix)]
impl TerminalDevice for Tty {
    type Attributes = libc::termios;

    fn get_attributes(&self) -> io::Result<libc::termios> {
        // SAFETY: termios is plain data; tcgetattr fills it completely on success.
        let mut attributes: libc::termios = unsafe { std::mem::zeroed() };
        // SAFETY: `attributes` is a valid, writable termios.
        if unsafe { libc::tcgetattr(self.fd, &mut attributes) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(attributes)
    }

    fn set_attributes(&mut self, attributes: &libc::termios) -> io::Result<()> {
        // SAFETY: `attributes` points to a fully initialized termios.
        if unsafe { libc::tcsetattr(self.fd, libc::TCSAFLUSH, attributes) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn make_raw(&self, original: &libc::termios, config: &TerminalConfig) -> libc::termios {
        let mut raw = *original;
        raw.c_iflag &= !(libc::ICRNL | libc::IXON);
        raw.c_oflag &= !libc::OPOST;
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
        raw.c_cc[libc::VMIN] = 0;
        raw.c_cc[libc::VTIME] = config.vtime();
        raw
    }
}

/// Scoped raw mode.
///
/// Entering snapshots the current attributes and applies the raw variant;
/// dropping or calling [`RawModeSession::exit`] writes the snapshot back.
/// Restoration happens at most once.
pub struct RawModeSession<D: TerminalDevice> {
    device: D,
    original: D::Attributes,
    active: bool,
}

impl<D: TerminalDevice> std::fmt::Debug for RawModeSession<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawModeSession")
            .field("active", &self.active)
            .finish()
    }
}

impl<D: TerminalDevice> RawModeSession<D> {
    #[instrument(skip_all)]
    pub fn enter(device: D, config: &TerminalConfig) -> TerminalResult<Self> {
        let original = device
            .get_attributes()
            .map_err(TerminalError::TerminalQuery)?;
        let raw = device.make_raw(&original, config);
        // Armed before applying: a failed apply may leave the device half
        // configured, and dropping the session puts the snapshot back.
        let mut session = Self {
            device,
            original,
            active: true,
        };
        session
            .device
            .set_attributes(&raw)
            .map_err(TerminalError::TerminalConfigure)?;
        debug!("Entered raw mode");
        Ok(session)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn original(&self) -> &D::Attributes {
        &self.original
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Restores the original attributes.
    ///
    /// Once a restore succeeds further calls are no-ops. A failed restore
    /// leaves the session active, so a later call or the drop tries again.
    #[instrument(skip_all)]
    pub fn exit(&mut self) -> TerminalResult<()> {
        if !self.active {
            return Ok(());
        }
        self.device
            .set_attributes(&self.original)
            .map_err(TerminalError::TerminalRestore)?;
        self.active = false;
        debug!("Restored terminal attributes");
        Ok(())
    }
}

impl<D: TerminalDevice> Drop for RawModeSession<D> {
    fn drop(&mut self) {
        if let Err(error) = self.exit() {
            error!("Failed to restore terminal on drop: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tracing_test::traced_test;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Mode {
        raw: bool,
        vtime: u8,
    }

    #[derive(Debug, Default)]
    struct Log {
        current: Option<Mode>,
        applied: Vec<Mode>,
    }

    #[derive(Debug)]
    struct FakeDevice {
        log: Rc<RefCell<Log>>,
        fail_get: bool,
        fail_set_after: Option<usize>,
        failures_left: Option<usize>,
        set_calls: usize,
    }

    impl FakeDevice {
        fn new() -> (Self, Rc<RefCell<Log>>) {
            let log = Rc::new(RefCell::new(Log {
                current: Some(Mode {
                    raw: false,
                    vtime: 0,
                }),
                applied: Vec::new(),
            }));
            (
                Self {
                    log: Rc::clone(&log),
                    fail_get: false,
                    fail_set_after: None,
                    failures_left: None,
                    set_calls: 0,
                },
                log,
            )
        }
    }

    impl TerminalDevice for FakeDevice {
        type Attributes = Mode;

        fn get_attributes(&self) -> io::Result<Mode> {
            if self.fail_get {
                return Err(io::Error::new(io::ErrorKind::Other, "not a tty"));
            }
            self.log
                .borrow()
                .current
                .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "no attributes"))
        }

        fn set_attributes(&mut self, attributes: &Mode) -> io::Result<()> {
            self.set_calls += 1;
            let mut log = self.log.borrow_mut();
            if let Some(limit) = self.fail_set_after
                && log.applied.len() >= limit
            {
                match self.failures_left.as_mut() {
                    Some(0) => {}
                    Some(left) => {
                        *left -= 1;
                        return Err(io::Error::from(io::ErrorKind::Interrupted));
                    }
                    None => {
                        return Err(io::Error::new(io::ErrorKind::Other, "tcsetattr failed"));
                    }
                }
            }
            log.applied.push(*attributes);
            log.current = Some(*attributes);
            Ok(())
        }

        fn make_raw(&self, original: &Mode, config: &TerminalConfig) -> Mode {
            Mode {
                raw: true,
                vtime: config.vtime().max(original.vtime),
            }
        }
    }

    fn cooked() -> Mode {
        Mode {
            raw: false,
            vtime: 0,
        }
    }

    #[test]
    fn test_enter_applies_raw_mode() {
        let (device, log) = FakeDevice::new();
        let session = RawModeSession::enter(device, &TerminalConfig::default()).unwrap();
        assert!(session.is_active());
        assert_eq!(*session.original(), cooked());
        assert_eq!(
            log.borrow().current,
            Some(Mode {
                raw: true,
                vtime: 1
            })
        );
    }

    #[test]
    fn test_exit_restores_original() {
        let (device, log) = FakeDevice::new();
        let mut session = RawModeSession::enter(device, &TerminalConfig::default()).unwrap();
        session.exit().unwrap();
        assert!(!session.is_active());
        assert_eq!(log.borrow().current, Some(cooked()));
    }

    #[test]
    fn test_exit_is_idempotent() {
        let (device, log) = FakeDevice::new();
        let mut session = RawModeSession::enter(device, &TerminalConfig::default()).unwrap();
        session.exit().unwrap();
        session.exit().unwrap();
        drop(session);
        // One raw apply plus exactly one restore.
        assert_eq!(log.borrow().applied.len(), 2);
    }

    #[test]
    fn test_drop_restores_original() {
        let (device, log) = FakeDevice::new();
        {
            let _session = RawModeSession::enter(device, &TerminalConfig::default()).unwrap();
        }
        assert_eq!(log.borrow().current, Some(cooked()));
    }

    #[test]
    #[traced_test]
    fn test_failed_drop_restore_is_logged() {
        let (mut device, _log) = FakeDevice::new();
        device.fail_set_after = Some(1);
        let session = RawModeSession::enter(device, &TerminalConfig::default()).unwrap();
        drop(session);
        assert!(logs_contain("Failed to restore terminal on drop"));
    }

    #[test]
    fn test_restore_on_early_return() {
        fn body(device: FakeDevice) -> TerminalResult<()> {
            let _session = RawModeSession::enter(device, &TerminalConfig::default())?;
            Err(TerminalError::InputRead(io::Error::new(
                io::ErrorKind::Other,
                "read failed",
            )))
        }

        let (device, log) = FakeDevice::new();
        assert!(matches!(body(device), Err(TerminalError::InputRead(_))));
        assert_eq!(log.borrow().current, Some(cooked()));
    }

    #[test]
    fn test_restore_on_panic() {
        let (device, log) = FakeDevice::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _session = RawModeSession::enter(device, &TerminalConfig::default()).unwrap();
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(log.borrow().current, Some(cooked()));
    }

    #[test]
    fn test_query_failure() {
        let (mut device, log) = FakeDevice::new();
        device.fail_get = true;
        let result = RawModeSession::enter(device, &TerminalConfig::default());
        assert!(matches!(result, Err(TerminalError::TerminalQuery(_))));
        assert!(log.borrow().applied.is_empty());
    }

    #[test]
    fn test_configure_failure() {
        let (mut device, log) = FakeDevice::new();
        device.fail_set_after = Some(0);
        let result = RawModeSession::enter(device, &TerminalConfig::default());
        assert!(matches!(result, Err(TerminalError::TerminalConfigure(_))));
        assert_eq!(log.borrow().current, Some(cooked()));
    }

    #[test]
    fn test_restore_failure_is_reported() {
        let (mut device, log) = FakeDevice::new();
        device.fail_set_after = Some(1);
        let mut session = RawModeSession::enter(device, &TerminalConfig::default()).unwrap();
        assert!(matches!(session.exit(), Err(TerminalError::TerminalRestore(_))));
        assert!(session.is_active());
        assert!(matches!(session.exit(), Err(TerminalError::TerminalRestore(_))));
        assert_eq!(log.borrow().current, Some(Mode { raw: true, vtime: 1 }));
    }

    #[test]
    fn test_exit_retries_after_failed_restore() {
        let (mut device, log) = FakeDevice::new();
        device.fail_set_after = Some(1);
        device.failures_left = Some(1);
        let mut session = RawModeSession::enter(device, &TerminalConfig::default()).unwrap();

        assert!(matches!(session.exit(), Err(TerminalError::TerminalRestore(_))));
        assert!(session.is_active());

        session.exit().unwrap();
        assert!(!session.is_active());
        assert_eq!(log.borrow().current, Some(cooked()));

        session.exit().unwrap();
        assert_eq!(session.device().set_calls, 3);
    }

    #[test]
    fn test_drop_retries_after_failed_restore() {
        let (mut device, log) = FakeDevice::new();
        device.fail_set_after = Some(1);
        device.failures_left = Some(1);
        let mut session = RawModeSession::enter(device, &TerminalConfig::default()).unwrap();
        assert!(session.exit().is_err());
        drop(session);
        assert_eq!(log.borrow().current, Some(cooked()));
    }

    #[cfg(unix)]
    #[test]
    fn test_tty_make_raw_clears_flags() {
        let tty = Tty::stdin();
        // SAFETY: an all-zero termios is a valid value to transform.
        let mut original: libc::termios = unsafe { std::mem::zeroed() };
        original.c_lflag = libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG;
        original.c_iflag = libc::ICRNL | libc::IXON;
        original.c_oflag = libc::OPOST;
        let raw = tty.make_raw(&original, &TerminalConfig::default());
        assert_eq!(raw.c_lflag & (libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG), 0);
        assert_eq!(raw.c_iflag & (libc::ICRNL | libc::IXON), 0);
        assert_eq!(raw.c_oflag & libc::OPOST, 0);
        assert_eq!(raw.c_cc[libc::VMIN], 0);
        assert_eq!(raw.c_cc[libc::VTIME], 1);
    }
}
