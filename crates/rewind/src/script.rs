/// JSON-lines editor scripts and their replay against an edit session.
use anyhow::{Context, Result};
use rewind_history::{EditSession, HistoryConfig};
use serde::Deserialize;
use serde_json::Value;

use crate::workflow::{WorkflowEdge, WorkflowNode, WorkflowSnapshot};

/// One line of a replay script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    AddNode { node: WorkflowNode },
    RemoveNode { id: String },
    AddEdge { edge: WorkflowEdge },
    RemoveEdge { id: String },
    Rename { name: String },
    Describe { description: String },
    /// Edits node settings without recording an undo step.
    Configure { id: String, config: Value },
    /// Records the working workflow as an undo step.
    Snapshot,
    Undo,
    Redo,
    Save,
}

/// Parses a script, skipping blank lines and `#` comments.
///
/// # Errors
///
/// Returns an error naming the 1-based line of the first malformed command.
pub fn parse_script(text: &str) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let command: Command = serde_json::from_str(line)
            .with_context(|| format!("Invalid command on line {}", idx + 1))?;
        commands.push(command);
    }
    Ok(commands)
}

/// Replays commands against a workflow editing session.
///
/// `working` is what the editor shows; it only diverges from the
/// session's current snapshot after a `configure` until the next commit.
#[derive(Debug)]
pub struct Replay {
    session: EditSession<WorkflowSnapshot>,
    working: WorkflowSnapshot,
}

impl Replay {
    /// Starts a replay from an empty workflow.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(config: &HistoryConfig) -> Result<Self> {
        let working = WorkflowSnapshot::default();
        let session = EditSession::new(working.clone(), config)
            .context("Failed to create editing session")?;
        Ok(Self { session, working })
    }

    pub fn run(&mut self, commands: &[Command]) {
        for command in commands {
            self.apply(command);
        }
    }

    /// Applies one command.
    pub fn apply(&mut self, command: &Command) {
        let next = match command {
            Command::AddNode { node } => self.working.with_node(node.clone()),
            Command::RemoveNode { id } => self.working.without_node(id),
            Command::AddEdge { edge } => self.working.with_edge(edge.clone()),
            Command::RemoveEdge { id } => self.working.without_edge(id),
            Command::Rename { name } => self.working.renamed(name),
            Command::Describe { description } => self.working.described(description),
            Command::Configure { id, config } => {
                self.working = self.working.with_node_config(id, config.clone());
                self.session.mark_dirty();
                return;
            }
            Command::Snapshot => self.working.clone(),
            Command::Undo => {
                match self.session.undo() {
                    Some(state) => self.working = state.clone(),
                    None => tracing::info!("Nothing to undo"),
                }
                return;
            }
            Command::Redo => {
                match self.session.redo() {
                    Some(state) => self.working = state.clone(),
                    None => tracing::info!("Nothing to redo"),
                }
                return;
            }
            Command::Save => {
                self.session.commit(self.working.clone());
                self.session.mark_saved();
                return;
            }
        };
        self.working = next;
        if !self.session.commit(self.working.clone()) {
            tracing::debug!("{command:?} left the workflow unchanged");
        }
    }

    pub fn working(&self) -> &WorkflowSnapshot {
        &self.working
    }

    pub fn session(&self) -> &EditSession<WorkflowSnapshot> {
        &self.session
    }

    /// One-line description of the session's history.
    pub fn summary(&self) -> String {
        let history = self.session.history();
        format!(
            "past={} future={} dirty={}",
            history.past_len(),
            history.future_len(),
            self.session.is_dirty()
        )
    }
}
