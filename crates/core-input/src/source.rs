//! Byte sources feeding the key decoder.
//!
//! The decoder needs two primitives: a blocking single-byte read and a
//! bounded poll used to disambiguate a lone ESC from the start of a cursor
//! key sequence. `StdinSource` implements both on the process's standard
//! input; `ScriptedSource` replays an in-memory script with explicit pauses
//! so decoder and controller behavior can be exercised without a terminal.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

/// Raw input byte provider.
pub trait ByteSource {
    /// Block until one byte is available. `Ok(None)` signals end of input.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Wait at most `timeout` for one byte. `Ok(None)` means nothing arrived
    /// (or input is exhausted); the caller cannot tell the two apart and does
    /// not need to.
    fn poll_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }

    fn poll_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        (**self).poll_byte(timeout)
    }
}

/// Standard input read one byte at a time, bypassing std's buffering so the
/// poll reflects what the kernel actually has queued.
#[derive(Debug)]
pub struct StdinSource {
    #[cfg(unix)]
    fd: std::os::unix::io::RawFd,
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
impl StdinSource {
    pub fn new() -> Self {
        use std::os::unix::io::AsRawFd;
        Self {
            fd: io::stdin().as_raw_fd(),
        }
    }
}

#[cfg(unix)]
impl ByteSource for StdinSource {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = 0u8;
        loop {
            // SAFETY: reading at most one byte into a valid, exclusively borrowed u8.
            let n = unsafe { libc::read(self.fd, (&raw mut byte).cast(), 1) };
            match n {
                1 => return Ok(Some(byte)),
                0 => return Ok(None),
                _ => {
                    let err = io::Error::last_os_error();
                    if err.kind() == io::ErrorKind::Interrupted {
                        continue;
                    }
                    return Err(err);
                }
            }
        }
    }

    fn poll_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        let timeout_ms = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);
        let mut pfd = libc::pollfd {
            fd: self.fd,
            events: libc::POLLIN,
            revents: 0,
        };
        // SAFETY: a single valid pollfd on the stack.
        let ready = unsafe { libc::poll(&raw mut pfd, 1, timeout_ms) };
        if ready < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(None);
            }
            return Err(err);
        }
        if ready == 0 {
            return Ok(None);
        }
        self.read_byte()
    }
}

#[cfg(not(unix))]
impl StdinSource {
    pub fn new() -> Self {
        Self {}
    }
}

/// Without a poll primitive every ESC decodes as a plain Escape.
#[cfg(not(unix))]
impl ByteSource for StdinSource {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        use std::io::Read;
        let mut buf = [0u8; 1];
        match io::stdin().lock().read(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }

    fn poll_byte(&mut self, _timeout: Duration) -> io::Result<Option<u8>> {
        Ok(None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Byte(u8),
    /// Nothing is immediately available at this point of the script.
    Pause,
    Fail,
}

/// In-memory input script.
///
/// Bytes pushed back to back are "immediately available" to `poll_byte`;
/// a `pause()` between them makes the next poll report nothing, modelling a
/// slow producer. Blocking reads skip pauses.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    steps: VecDeque<Step>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new().bytes(bytes)
    }

    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.steps.extend(bytes.iter().copied().map(Step::Byte));
        self
    }

    /// Separate keystrokes so that none of them runs into the next.
    pub fn keys(mut self, keys: &[&[u8]]) -> Self {
        for key in keys {
            self = self.bytes(key).pause();
        }
        self
    }

    pub fn pause(mut self) -> Self {
        self.steps.push_back(Step::Pause);
        self
    }

    /// Inject a read error at this point of the script.
    pub fn fail(mut self) -> Self {
        self.steps.push_back(Step::Fail);
        self
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, Step::Byte(_)))
            .count()
    }

    fn failure() -> io::Error {
        io::Error::other("scripted input failure")
    }
}

impl ByteSource for ScriptedSource {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        while let Some(step) = self.steps.pop_front() {
            match step {
                Step::Byte(b) => return Ok(Some(b)),
                Step::Pause => continue,
                Step::Fail => return Err(Self::failure()),
            }
        }
        Ok(None)
    }

    fn poll_byte(&mut self, _timeout: Duration) -> io::Result<Option<u8>> {
        match self.steps.pop_front() {
            Some(Step::Byte(b)) => Ok(Some(b)),
            Some(Step::Pause) | None => Ok(None),
            Some(Step::Fail) => Err(Self::failure()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_WAIT: Duration = Duration::ZERO;

    #[test]
    fn blocking_read_skips_pauses() {
        let mut src = ScriptedSource::new().bytes(b"a").pause().pause().bytes(b"b");
        assert_eq!(src.read_byte().unwrap(), Some(b'a'));
        assert_eq!(src.read_byte().unwrap(), Some(b'b'));
        assert_eq!(src.read_byte().unwrap(), None);
    }

    #[test]
    fn poll_stops_at_pause() {
        let mut src = ScriptedSource::new().bytes(b"a").pause().bytes(b"b");
        assert_eq!(src.poll_byte(NO_WAIT).unwrap(), Some(b'a'));
        assert_eq!(src.poll_byte(NO_WAIT).unwrap(), None);
        assert_eq!(src.poll_byte(NO_WAIT).unwrap(), Some(b'b'));
        assert_eq!(src.poll_byte(NO_WAIT).unwrap(), None);
    }

    #[test]
    fn keys_are_separated() {
        let src = ScriptedSource::new().keys(&[b"x", b"\x1b[A"]);
        assert_eq!(src.remaining(), 4);
    }

    #[test]
    fn injected_failure_surfaces_as_error() {
        let mut src = ScriptedSource::new().fail();
        assert!(src.read_byte().is_err());
        assert_eq!(src.read_byte().unwrap(), None);
    }
}
