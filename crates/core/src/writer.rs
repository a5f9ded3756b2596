//! Writers for multiplexing subprocess output
//!
//! [`LineWriter`] turns raw output chunks into styled log lines. Two writers
//! bound to the same [`OutputLock`] (typically the stdout and stderr of one
//! subprocess) never interleave the lines of two `write` calls.
//!
//! [`PrefixingWriter`] decorates any writer so that a prefix and a payload
//! reach the downstream in a single `write` call.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::logger::Logger;
use crate::style::Stream;

/// Lock shared by the writers of one subprocess invocation
///
/// Create one per invocation and drop it afterwards. Sharing a lock between
/// unrelated invocations only serializes them.
#[derive(Debug, Clone, Default)]
pub struct OutputLock(Arc<Mutex<()>>);

impl OutputLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stdout and stderr writers bound to this lock
    pub fn writers(&self, logger: &Logger) -> (LineWriter, LineWriter) {
        (
            LineWriter::new(Stream::Stdout, self, logger.clone()),
            LineWriter::new(Stream::Stderr, self, logger.clone()),
        )
    }
}

/// Splits raw chunks into lines and logs each one
///
/// Stdout-bound writers log through [`Logger::verbose_quiet`], stderr-bound
/// writers through [`Logger::verbose_stderr_quiet`].
///
/// Chunks are split on `\n` independently: a line that spans two `write`
/// calls is logged as two lines.
#[derive(Debug, Clone)]
pub struct LineWriter {
    stream: Stream,
    lock: OutputLock,
    logger: Logger,
}

impl LineWriter {
    pub fn new(stream: Stream, lock: &OutputLock, logger: Logger) -> Self {
        Self {
            stream,
            lock: lock.clone(),
            logger,
        }
    }

    pub fn stream(&self) -> Stream {
        self.stream
    }
}

impl Write for LineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let _guard = self.lock.0.lock().unwrap_or_else(PoisonError::into_inner);

        let text = String::from_utf8_lossy(buf);
        for line in text.split('\n').filter(|line| !line.is_empty()) {
            match self.stream {
                Stream::Stdout => self.logger.verbose_quiet(line),
                Stream::Stderr => self.logger.verbose_stderr_quiet(line),
            }
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes a fixed prefix and each payload as one downstream write
#[derive(Debug)]
pub struct PrefixingWriter<W> {
    prefix: Box<[u8]>,
    inner: W,
}

impl<W: Write> PrefixingWriter<W> {
    pub fn new(prefix: impl Into<Vec<u8>>, inner: W) -> Self {
        Self {
            prefix: prefix.into().into_boxed_slice(),
            inner,
        }
    }

    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for PrefixingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let mut combined = Vec::with_capacity(self.prefix.len() + buf.len());
        combined.extend_from_slice(&self.prefix);
        combined.extend_from_slice(buf);

        // The count may include prefix bytes; callers only see payload bytes.
        let written = self.inner.write(&combined)?;
        Ok(written.min(buf.len()))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Cloneable handle to a writer where each `write` call holds the lock
#[derive(Debug, Default)]
pub struct SharedWriter<W>(Arc<Mutex<W>>);

impl<W> Clone for SharedWriter<W> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<W: Write> SharedWriter<W> {
    pub fn new(inner: W) -> Self {
        Self(Arc::new(Mutex::new(inner)))
    }

    /// Run `f` with exclusive access to the wrapped writer
    pub fn with_inner<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl<W: Write> Write for SharedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_inner(|inner| inner.write_all(buf).map(|()| buf.len()))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_inner(|inner| inner.flush())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogConfig;
    use crate::console::MemoryConsole;
    use mockall::mock;
    use std::thread;

    mock! {
        pub Sink {}

        impl Write for Sink {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
            fn flush(&mut self) -> io::Result<()>;
        }
    }

    fn capture(config: LogConfig) -> (Logger, Arc<MemoryConsole>) {
        let console = Arc::new(MemoryConsole::new());
        let logger = Logger::with_console(config, console.clone());
        (logger, console)
    }

    #[test]
    fn test_line_writer_single_line_without_newline() {
        let (logger, console) = capture(LogConfig::default());
        let (mut stdout, _) = OutputLock::new().writers(&logger);

        let n = stdout.write(b"no newline here").unwrap();

        assert_eq!(n, 15);
        assert_eq!(console.stream_lines(Stream::Stdout), vec!["       no newline here"]);
    }

    #[test]
    fn test_line_writer_only_separators() {
        let (logger, console) = capture(LogConfig::default());
        let (mut stdout, mut stderr) = OutputLock::new().writers(&logger);

        assert_eq!(stdout.write(b"").unwrap(), 0);
        assert_eq!(stdout.write(b"\n").unwrap(), 1);
        assert_eq!(stderr.write(b"\n\n\n").unwrap(), 3);

        assert!(console.is_empty());
    }

    #[test]
    fn test_line_writer_lines_in_order() {
        let (logger, console) = capture(LogConfig::default());
        let (mut stdout, _) = OutputLock::new().writers(&logger);

        let input = b"building...\napp started\n";
        assert_eq!(stdout.write(input).unwrap(), input.len());

        assert_eq!(
            console.stream_lines(Stream::Stdout),
            vec!["       building...", "       app started"]
        );
    }

    #[test]
    fn test_line_writer_skips_empty_segments() {
        let (logger, console) = capture(LogConfig::default());
        let (_, mut stderr) = OutputLock::new().writers(&logger);

        stderr.write_all(b"\nfirst\n\n\nsecond\nthird").unwrap();

        assert_eq!(
            console.stream_lines(Stream::Stderr),
            vec![" !     first", " !     second", " !     third"]
        );
    }

    #[test]
    fn test_line_writer_does_not_reassemble_split_lines() {
        let (logger, console) = capture(LogConfig::default());
        let (mut stdout, _) = OutputLock::new().writers(&logger);

        stdout.write_all(b"hello wo").unwrap();
        stdout.write_all(b"rld\n").unwrap();

        assert_eq!(
            console.stream_lines(Stream::Stdout),
            vec!["       hello wo", "       rld"]
        );
    }

    #[test]
    fn test_line_writer_quiet_consumes_everything() {
        let (logger, console) = capture(LogConfig::default().with_quiet(true));
        let (mut stdout, mut stderr) = OutputLock::new().writers(&logger);

        assert_eq!(stdout.write(b"one\ntwo\n").unwrap(), 8);
        assert_eq!(stderr.write(b"three\n").unwrap(), 6);

        assert!(console.is_empty());
    }

    #[test]
    fn test_line_writer_invalid_utf8_is_replaced() {
        let (logger, console) = capture(LogConfig::default());
        let (mut stdout, _) = OutputLock::new().writers(&logger);

        let input = b"ok\n\xff\xfe\n";
        assert_eq!(stdout.write(input).unwrap(), input.len());

        assert_eq!(
            console.stream_lines(Stream::Stdout),
            vec!["       ok", "       \u{FFFD}\u{FFFD}"]
        );
    }

    #[test]
    fn test_line_writer_recovers_poisoned_lock() {
        let (logger, console) = capture(LogConfig::default());
        let lock = OutputLock::new();
        let (mut stdout, _) = lock.writers(&logger);

        let poisoner = lock.clone();
        let outcome = thread::spawn(move || {
            let _guard = poisoner.0.lock().unwrap();
            panic!("panicked while holding the output lock");
        })
        .join();
        assert!(outcome.is_err());
        assert!(lock.0.is_poisoned());

        assert_eq!(stdout.write(b"still here\n").unwrap(), 11);
        assert_eq!(console.stream_lines(Stream::Stdout), vec!["       still here"]);
    }

    #[test]
    fn test_line_writer_concurrent_groups_stay_contiguous() {
        const CALLS: usize = 200;
        const LINES_PER_CALL: usize = 5;

        let (logger, console) = capture(LogConfig::default());
        let lock = OutputLock::new();
        let (stdout, stderr) = lock.writers(&logger);

        let handles: Vec<_> = [(stdout, "out"), (stderr, "err")]
            .into_iter()
            .map(|(mut writer, tag)| {
                thread::spawn(move || {
                    for call in 0..CALLS {
                        let chunk: String = (0..LINES_PER_CALL)
                            .map(|line| format!("{tag}-{call}-{line}\n"))
                            .collect();
                        writer.write_all(chunk.as_bytes()).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = console.lines();
        assert_eq!(lines.len(), 2 * CALLS * LINES_PER_CALL);

        for group in lines.chunks(LINES_PER_CALL) {
            let (stream, first) = &group[0];
            let first = first.trim_start_matches([' ', '!']);
            let call_id = first.rsplit_once('-').unwrap().0;
            for (line_no, (s, line)) in group.iter().enumerate() {
                assert_eq!(s, stream);
                assert!(
                    line.ends_with(&format!("{call_id}-{line_no}")),
                    "line {line:?} interleaved into group of {call_id}"
                );
            }
        }
    }

    #[test]
    fn test_prefixing_writer_empty_payload_skips_downstream() {
        let mut sink = MockSink::new();
        sink.expect_write().times(0);

        let mut writer = PrefixingWriter::new("app: ", sink);
        assert_eq!(writer.write(b"").unwrap(), 0);
    }

    #[test]
    fn test_prefixing_writer_single_combined_write() {
        let mut sink = MockSink::new();
        sink.expect_write()
            .withf(|buf: &[u8]| buf == b"web.1: hello\n")
            .times(1)
            .returning(|buf| Ok(buf.len()));

        let mut writer = PrefixingWriter::new("web.1: ", sink);
        assert_eq!(writer.write(b"hello\n").unwrap(), 6);
    }

    #[test]
    fn test_prefixing_writer_clamps_partial_count() {
        let mut sink = MockSink::new();
        sink.expect_write().times(1).returning(|_| Ok(9));

        let mut writer = PrefixingWriter::new("web.1: ", sink);
        assert_eq!(writer.write(b"hello\n").unwrap(), 6);
    }

    #[test]
    fn test_prefixing_writer_reports_short_count() {
        let mut sink = MockSink::new();
        sink.expect_write().times(1).returning(|_| Ok(3));

        let mut writer = PrefixingWriter::new("web.1: ", sink);
        assert_eq!(writer.write(b"hello\n").unwrap(), 3);
    }

    #[test]
    fn test_prefixing_writer_propagates_errors() {
        let mut sink = MockSink::new();
        sink.expect_write()
            .times(1)
            .returning(|_| Err(io::Error::from(io::ErrorKind::BrokenPipe)));

        let mut writer = PrefixingWriter::new("web.1: ", sink);
        let err = writer.write(b"hello").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_prefixing_writer_flush_delegates() {
        let mut sink = MockSink::new();
        sink.expect_flush().times(1).returning(|| Ok(()));

        let mut writer = PrefixingWriter::new("web.1: ", sink);
        writer.flush().unwrap();
    }

    #[test]
    fn test_prefixing_writers_share_sink_without_splitting() {
        let sink = SharedWriter::new(Vec::new());

        let handles: Vec<_> = ["a: ", "b: "]
            .into_iter()
            .map(|prefix| {
                let mut writer = PrefixingWriter::new(prefix, sink.clone());
                thread::spawn(move || {
                    for i in 0..100 {
                        writer.write_all(format!("line {i}\n").as_bytes()).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let output = sink.with_inner(|buf| String::from_utf8(buf.clone()).unwrap());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 200);
        for line in lines {
            let (prefix, rest) = line.split_at(3);
            assert!(prefix == "a: " || prefix == "b: ", "bad line {line:?}");
            assert!(rest.starts_with("line "), "bad line {line:?}");
        }
    }
}
