//! Shared helpers for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::session::{ExecutionError, QueryEngine, QuerySession};

type Handler = Rc<dyn Fn(&[String], &str) -> Result<String, String>>;

/// Builds owned block lines from string literals.
pub fn lines(source: &[&str]) -> Vec<String> {
    source.iter().map(|line| line.to_string()).collect()
}

#[derive(Default)]
struct EngineState {
    executed: Vec<String>,
    opened: usize,
    closed: usize,
}

/// In-memory engine answering from a script.
///
/// Sessions of one engine share the executed-query history, which lets tests
/// observe ordering across blocks. Unscripted queries return an empty result.
#[derive(Default)]
pub struct ScriptedEngine {
    responses: Rc<HashMap<String, Result<String, String>>>,
    handler: Option<Handler>,
    state: Rc<RefCell<EngineState>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, query: &str, result: &str) -> Self {
        self.script(query, Ok(result.to_string()))
    }

    pub fn fail_on(self, query: &str, message: &str) -> Self {
        self.script(query, Err(message.to_string()))
    }

    /// Answers unscripted queries from the history of earlier queries.
    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&[String], &str) -> Result<String, String> + 'static,
    {
        self.handler = Some(Rc::new(handler));
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.state.borrow().executed.clone()
    }

    pub fn sessions_opened(&self) -> usize {
        self.state.borrow().opened
    }

    pub fn sessions_closed(&self) -> usize {
        self.state.borrow().closed
    }

    fn script(mut self, query: &str, response: Result<String, String>) -> Self {
        Rc::make_mut(&mut self.responses).insert(query.to_string(), response);
        self
    }
}

impl QueryEngine for ScriptedEngine {
    type Session = ScriptedSession;

    fn open(&self) -> Result<ScriptedSession, ExecutionError> {
        self.state.borrow_mut().opened += 1;
        Ok(ScriptedSession {
            responses: Rc::clone(&self.responses),
            handler: self.handler.clone(),
            state: Rc::clone(&self.state),
        })
    }
}

pub struct ScriptedSession {
    responses: Rc<HashMap<String, Result<String, String>>>,
    handler: Option<Handler>,
    state: Rc<RefCell<EngineState>>,
}

impl QuerySession for ScriptedSession {
    fn execute(&mut self, query: &str) -> Result<String, ExecutionError> {
        let history = self.state.borrow().executed.clone();
        self.state.borrow_mut().executed.push(query.to_string());

        let response = match (self.responses.get(query), &self.handler) {
            (Some(response), _) => response.clone(),
            (None, Some(handler)) => handler(&history, query),
            (None, None) => Ok(String::new()),
        };
        response.map_err(ExecutionError::Engine)
    }
}

impl Drop for ScriptedSession {
    fn drop(&mut self) {
        self.state.borrow_mut().closed += 1;
    }
}
