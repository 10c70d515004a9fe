use std::io::{self, ErrorKind, Write};
use std::process::{ChildStdin, Command, Stdio};
use std::thread;

use super::{ExecutionError, QueryEngine, QuerySession};

/// Runs each query through an external program such as `cypher-shell`.
///
/// The query is written to the program's stdin and its stdout is taken as
/// the result text. State lives in whatever database the program talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
    reset_query: Option<String>,
}

impl CommandEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            reset_query: None,
        }
    }

    pub fn with_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Query run when a session opens and again when it closes.
    pub fn with_reset_query(mut self, reset_query: Option<String>) -> Self {
        self.reset_query = reset_query;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, query: &str) -> Result<String, ExecutionError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExecutionError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdin = child.stdin.take();
        // The writer runs beside `wait_with_output` so a child that answers
        // before it has read the whole query cannot fill stdout and stall us.
        let (output, written) = thread::scope(|scope| {
            let writer = scope.spawn(move || write_query(stdin, query));
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("query writer thread panicked")));
            (output, written)
        });
        let output = output?;
        written?;

        if !output.status.success() {
            return Err(ExecutionError::Failed {
                query: query.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Writes the query and a trailing newline, then closes stdin to end it.
///
/// A child that exits without reading its input is not an error.
fn write_query(stdin: Option<ChildStdin>, query: &str) -> io::Result<()> {
    let Some(mut stdin) = stdin else {
        return Ok(());
    };
    match stdin
        .write_all(query.as_bytes())
        .and_then(|()| stdin.write_all(b"\n"))
    {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

impl QueryEngine for CommandEngine {
    type Session = CommandSession;

    fn open(&self) -> Result<CommandSession, ExecutionError> {
        if let Some(reset) = &self.reset_query {
            self.run(reset)?;
        }
        log::info!("Opened query session via '{}'", self.program);
        Ok(CommandSession {
            engine: self.clone(),
        })
    }
}

/// A session over a [`CommandEngine`]. Runs the reset query on drop.
#[derive(Debug)]
pub struct CommandSession {
    engine: CommandEngine,
}

impl QuerySession for CommandSession {
    fn execute(&mut self, query: &str) -> Result<String, ExecutionError> {
        self.engine.run(query)
    }
}

impl Drop for CommandSession {
    fn drop(&mut self) {
        if let Some(reset) = &self.engine.reset_query
            && let Err(e) = self.engine.run(reset)
        {
            log::warn!("Failed to reset database on session close: {e}");
        }
        log::info!("Closed query session via '{}'", self.engine.program);
    }
}
