//! External command execution
//!
//! Runs a command with piped stdout and stderr and pushes its output into the
//! caller's writers, reading both streams concurrently. Output is delivered
//! either as raw chunks or one complete line per write.

use std::io::Write;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::process::Command;

use crate::error::{Error, Result};
use crate::logger::Logger;
use crate::writer::OutputLock;

/// Size of the read buffer for each output stream
const CHUNK_SIZE: usize = 8 * 1024;

/// Exit code reported when the child was terminated by a signal
const SIGNALED_EXIT_CODE: i32 = -1;

/// How child output is cut into writes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Framing {
    /// Each read from the pipe becomes one write
    #[default]
    Chunks,
    /// Each newline-terminated line becomes one write
    Lines,
}

/// A command invocation and the sinks for its output
pub struct ExecCommandInput<O, E> {
    pub command: String,
    pub args: Vec<String>,
    pub stdout: O,
    pub stderr: E,
    pub framing: Framing,
}

impl<O, E> ExecCommandInput<O, E> {
    pub fn new(command: impl Into<String>, args: Vec<String>, stdout: O, stderr: E) -> Self {
        Self {
            command: command.into(),
            args,
            stdout,
            stderr,
            framing: Framing::Chunks,
        }
    }

    /// Deliver output one line per write
    pub fn line_framed(mut self) -> Self {
        self.framing = Framing::Lines;
        self
    }
}

/// Outcome of a finished command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    /// Child exit status, `-1` when killed by a signal
    pub exit_code: i32,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run a command, streaming its output into the given writers
///
/// Returns once the child has exited and both streams are drained.
///
/// The sinks are plain blocking writers called from the async task; they
/// must not block for long (a stalled stdout pipe stalls a runtime worker).
pub async fn run_external<O, E>(input: ExecCommandInput<O, E>) -> Result<ExecResult>
where
    O: Write + Send,
    E: Write + Send,
{
    let ExecCommandInput {
        command,
        args,
        mut stdout,
        mut stderr,
        framing,
    } = input;

    tracing::debug!(%command, ?args, "spawning command");
    let mut child = Command::new(&command)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| Error::Spawn {
            command: command.clone(),
            source,
        })?;

    let child_stdout = child.stdout.take();
    let child_stderr = child.stderr.take();

    let (out, err) = tokio::join!(
        pump(child_stdout, &mut stdout, framing),
        pump(child_stderr, &mut stderr, framing),
    );
    out?;
    err?;

    let status = child.wait().await?;
    let exit_code = status.code().unwrap_or(SIGNALED_EXIT_CODE);
    tracing::debug!(%command, exit_code, "command finished");

    Ok(ExecResult { exit_code })
}

/// Run a command, logging its stdout and stderr line by line
///
/// A fresh [`OutputLock`] is used for the invocation.
pub async fn run_logged(logger: &Logger, command: &str, args: Vec<String>) -> Result<ExecResult> {
    let (stdout, stderr) = OutputLock::new().writers(logger);
    run_external(ExecCommandInput::new(command, args, stdout, stderr)).await
}

/// Copy output from `reader` into `writer` until EOF
async fn pump<R, W>(reader: Option<R>, writer: &mut W, framing: Framing) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: Write,
{
    let Some(reader) = reader else {
        return Ok(());
    };

    match framing {
        Framing::Chunks => pump_chunks(reader, writer).await?,
        Framing::Lines => pump_lines(reader, writer).await?,
    }
    writer.flush()?;
    Ok(())
}

async fn pump_chunks<R, W>(mut reader: R, writer: &mut W) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: Write,
{
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            return Ok(());
        }
        writer.write_all(&buf[..n])?;
    }
}

/// A trailing line without newline is written as is at EOF.
async fn pump_lines<R, W>(reader: R, writer: &mut W) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: Write,
{
    let mut reader = BufReader::with_capacity(CHUNK_SIZE, reader);
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            return Ok(());
        }
        writer.write_all(&line)?;
    }
}
