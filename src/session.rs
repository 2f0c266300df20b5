//! One validation run against the Java helper.
//!
//! A session owns a single spawned helper process. Three independent tasks
//! drive it:
//! - the **input feeder** writes (or pipes) the document into stdin and closes it
//! - the **output consumer** parses merged stdout/stderr lines
//! - the **exit watcher** reaps the process and reports its exit code
//!
//! Whichever event completes the picture first resolves the session through
//! a one-shot channel. The sender is taken out of [`SessionState`] on
//! resolution, so later events (a late `result=` line, a broken pipe after
//! exit) find nothing to resolve and are dropped.
//!
//! No timeout is applied: if the caller stops awaiting, the helper keeps
//! running until it exits on its own.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::SplitStream;
use tracing::{debug, warn};

use crate::error::{Result, ValidatorError};
use crate::input::XmlInput;
use crate::outcome::{self, ValidationOutcome};
use crate::protocol::ProtocolLine;
use crate::provision::HELPER_ENTRY_POINT;

/// How long output may keep draining after the helper has been reaped
pub const EXIT_DRAIN_GRACE: Duration = Duration::from_millis(250);

#[cfg(windows)]
const CLASSPATH_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const CLASSPATH_SEPARATOR: &str = ":";

/// Everything needed to validate one document
#[derive(Debug)]
pub struct ValidationRequest {
    pub input: XmlInput,
    pub schema_path: PathBuf,
    pub insecure: bool,
    pub working_dir: PathBuf,
    pub debug: bool,
}

type Resolver = oneshot::Sender<Result<ValidationOutcome>>;

/// Protocol state accumulated while the helper runs
#[derive(Debug)]
pub(crate) struct SessionState {
    status: Option<String>,
    exit_code: Option<i32>,
    messages: Vec<String>,
    resolver: Option<Resolver>,
    debug: bool,
}

impl SessionState {
    pub(crate) fn new(resolver: Resolver, debug: bool) -> Self {
        Self {
            status: None,
            exit_code: None,
            messages: Vec::new(),
            resolver: Some(resolver),
            debug,
        }
    }

    pub(crate) fn is_resolved(&self) -> bool {
        self.resolver.is_none()
    }

    pub(crate) fn on_line(&mut self, line: ProtocolLine) {
        if self.is_resolved() {
            return;
        }

        match line {
            ProtocolLine::Diagnostic(message) => self.messages.push(message),
            ProtocolLine::ResultMarker(status) => {
                self.status = Some(status);
                self.try_resolve();
            }
            ProtocolLine::Noise(text) => {
                if self.debug {
                    debug!(line = %text, "unrecognized helper output");
                }
            }
        }
    }

    pub(crate) fn on_exit(&mut self, exit_code: i32) {
        self.exit_code = Some(exit_code);

        if self.status.is_none() {
            self.status = Some(outcome::synthesize_status(exit_code).to_string());
        }

        self.try_resolve();
    }

    /// Resolve immediately with a process-level error
    pub(crate) fn fail(&mut self, error: ValidatorError) {
        match self.resolver.take() {
            Some(resolver) => {
                let _ = resolver.send(Err(error));
            }
            None => debug!(%error, "ignoring error after resolution"),
        }
    }

    fn try_resolve(&mut self) {
        let (Some(status), Some(exit_code)) = (self.status.clone(), self.exit_code) else {
            return;
        };

        if let Some(resolver) = self.resolver.take() {
            let messages = std::mem::take(&mut self.messages);
            let _ = resolver.send(outcome::build(status, exit_code, messages));
        }
    }
}

type SharedState = Arc<Mutex<SessionState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A single helper process validating a single document
#[derive(Debug)]
pub struct ValidationSession {
    java: PathBuf,
    base_dir: PathBuf,
    request: ValidationRequest,
}

impl ValidationSession {
    pub fn new(
        java: impl Into<PathBuf>,
        base_dir: impl Into<PathBuf>,
        request: ValidationRequest,
    ) -> Self {
        Self {
            java: java.into(),
            base_dir: base_dir.into(),
            request,
        }
    }

    /// Helper invocation arguments, in the order the helper expects them
    pub fn args(&self) -> Vec<OsString> {
        let mut classpath = OsString::from(&self.base_dir);
        classpath.push(CLASSPATH_SEPARATOR);
        classpath.push(&self.request.working_dir);

        let mut args: Vec<OsString> = vec![
            "-Dfile.encoding=UTF-8".into(),
            "-classpath".into(),
            classpath,
            HELPER_ENTRY_POINT.into(),
        ];

        if self.request.insecure {
            args.push("-insecure".into());
        }

        match self.request.input.file_path() {
            Some(path) => {
                let mut file_arg = OsString::from("-file=");
                file_arg.push(path);
                args.push(file_arg);
            }
            None => args.push("-stdin".into()),
        }

        let mut schema_arg = OsString::from("-schema=");
        schema_arg.push(&self.request.schema_path);
        args.push(schema_arg);

        args
    }

    /// Spawn the helper and wait for the session to resolve
    pub async fn run(self) -> Result<ValidationOutcome> {
        let args = self.args();

        debug!(
            java = %self.java.display(),
            input = self.request.input.kind(),
            ?args,
            "spawning validation helper"
        );

        let mut child = Command::new(&self.java)
            .args(&args)
            .current_dir(&self.request.working_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ValidatorError::ProcessSpawn {
                program: self.java.clone(),
                source,
            })?;

        let (stdin, stdout, stderr) =
            match (child.stdin.take(), child.stdout.take(), child.stderr.take()) {
                (Some(stdin), Some(stdout), Some(stderr)) => (stdin, stdout, stderr),
                _ => {
                    return Err(ValidatorError::Io(std::io::Error::other(
                        "helper stdio was not captured",
                    )));
                }
            };

        let (resolver, resolved) = oneshot::channel();
        let state: SharedState = Arc::new(Mutex::new(SessionState::new(
            resolver,
            self.request.debug,
        )));

        let output = tokio::spawn(consume_output(stdout, stderr, Arc::clone(&state)));
        tokio::spawn(feed_input(stdin, self.request.input, Arc::clone(&state)));
        tokio::spawn(watch_exit(child, output, state));

        resolved.await.map_err(|_| ValidatorError::SessionClosed)?
    }
}

/// Parse merged stdout/stderr until both close or the session resolves
async fn consume_output(stdout: ChildStdout, stderr: ChildStderr, state: SharedState) {
    let stdout = SplitStream::new(BufReader::new(stdout).split(b'\n'));
    let stderr = SplitStream::new(BufReader::new(stderr).split(b'\n'));
    let mut lines = stdout.merge(stderr);

    while let Some(line) = lines.next().await {
        let mut guard = lock(&state);

        match line {
            Ok(raw) => guard.on_line(ProtocolLine::from_bytes(&raw)),
            Err(e) => {
                guard.fail(ValidatorError::StreamError(e));
                return;
            }
        }

        if guard.is_resolved() {
            return;
        }
    }
}

/// Write the document into the helper's stdin, then close it exactly once
async fn feed_input(mut stdin: ChildStdin, input: XmlInput, state: SharedState) {
    let written = match input {
        XmlInput::Text(text) => stdin.write_all(text.as_bytes()).await,
        XmlInput::Bytes(bytes) => stdin.write_all(&bytes).await,
        XmlInput::Stream(mut reader) => {
            tokio::io::copy(&mut reader, &mut stdin).await.map(|_| ())
        }
        // the helper opens the file itself
        XmlInput::File(_) => Ok(()),
    };

    let closed = match written {
        Ok(()) => stdin.shutdown().await,
        Err(e) => Err(e),
    };
    drop(stdin);

    if let Err(e) = closed {
        lock(&state).fail(ValidatorError::StreamError(e));
    }
}

/// Reap the helper and report its exit code once output had a chance to drain
async fn watch_exit(mut child: Child, output: JoinHandle<()>, state: SharedState) {
    let status = match child.wait().await {
        Ok(status) => status,
        Err(e) => {
            lock(&state).fail(ValidatorError::Io(e));
            return;
        }
    };

    if tokio::time::timeout(EXIT_DRAIN_GRACE, output).await.is_err() {
        warn!("helper output still open after exit, resolving without it");
    }

    // Killed by a signal: no exit code, never a success.
    lock(&state).on_exit(status.code().unwrap_or(-1));
}
