//! The command mini-language.
//!
//! A command line reads `<selector> <operator>? <argument>?`:
//!
//! | Input     | Meaning                                                  |
//! |-----------|----------------------------------------------------------|
//! | `1 3`     | toggle selection of vertices 1 and 3                     |
//! | `1 2-4`   | connect vertices 1 and 2 to vertex 4                     |
//! | `1 2 3-`  | connect 1–2 and 2–3 (a path through the selector)        |
//! | `c3`      | recolor the current selection with palette slot 3        |
//! | `2d`      | delete vertex 2 and its edges                            |
//!
//! An empty selector means "the current selection". Input is tokenized with
//! winnow, parsed into a typed [`Command`], and executed in two phases:
//! every label is resolved and every argument validated before the store is
//! touched, so a rejected command leaves no trace.

use gt_core::{ColorIndex, EntityRef, GraphError, GraphStore, Label, Result, VertexId};
use smallvec::SmallVec;
use std::fmt;
use winnow::ascii::digit1;
use winnow::error::ContextError;
use winnow::prelude::*;

// ─── Operators ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `-`: create edges.
    Connect,
    /// `c`: set palette color.
    Recolor,
    /// `d`: remove entities.
    Delete,
}

impl Operator {
    pub const ALL: [Operator; 3] = [Operator::Connect, Operator::Recolor, Operator::Delete];

    pub fn symbol(self) -> char {
        match self {
            Operator::Connect => '-',
            Operator::Recolor => 'c',
            Operator::Delete => 'd',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Which operators the interpreter accepts. A disabled operator's character
/// is just an unexpected character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorSet {
    connect: bool,
    recolor: bool,
    delete: bool,
}

impl Default for OperatorSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl OperatorSet {
    pub const ALL: Self = Self {
        connect: true,
        recolor: true,
        delete: true,
    };

    /// Bare selection toggling only.
    pub const NONE: Self = Self {
        connect: false,
        recolor: false,
        delete: false,
    };

    pub fn only(operators: &[Operator]) -> Self {
        operators
            .iter()
            .fold(Self::NONE, |set, op| set.with(*op))
    }

    pub fn with(mut self, op: Operator) -> Self {
        match op {
            Operator::Connect => self.connect = true,
            Operator::Recolor => self.recolor = true,
            Operator::Delete => self.delete = true,
        }
        self
    }

    pub fn contains(&self, op: Operator) -> bool {
        match op {
            Operator::Connect => self.connect,
            Operator::Recolor => self.recolor,
            Operator::Delete => self.delete,
        }
    }

    /// The enabled operator spelled by `c`, if any.
    pub fn operator_for(&self, c: char) -> Option<Operator> {
        Operator::ALL
            .into_iter()
            .find(|op| op.symbol() == c && self.contains(*op))
    }
}

// ─── Tokens ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Number(u32),
    Operator(Operator),
}

/// Split a command line into numbers and operators. Whitespace separates
/// numbers and is otherwise ignored.
pub fn tokenize(input: &str, operators: OperatorSet) -> Result<Vec<Token>> {
    let mut rest = input;
    let mut tokens = Vec::new();

    loop {
        skip_space(&mut rest);
        let Some(c) = rest.chars().next() else {
            break;
        };

        if c.is_ascii_digit() {
            let n = parse_number
                .parse_next(&mut rest)
                .map_err(|_| GraphError::MalformedArgument(format!("number too large in {input:?}")))?;
            tokens.push(Token::Number(n));
        } else if let Some(op) = operators.operator_for(c) {
            rest = &rest[c.len_utf8()..];
            tokens.push(Token::Operator(op));
        } else {
            return Err(GraphError::MalformedArgument(format!(
                "unexpected character {c:?}"
            )));
        }
    }

    Ok(tokens)
}

/// Consume optional whitespace (concrete error type avoids inference issues).
fn skip_space(input: &mut &str) {
    use winnow::ascii::space0;
    let _: Result<&str, winnow::error::ErrMode<ContextError>> = space0.parse_next(input);
}

fn parse_number(input: &mut &str) -> ModalResult<u32> {
    digit1
        .try_map(|digits: &str| digits.parse::<u32>())
        .parse_next(input)
}

// ─── Commands ────────────────────────────────────────────────────────────

/// What an operator does once its argument is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Connect each selected vertex to `target`, or with no target chain
    /// the selected vertices in order.
    Connect { target: Option<Label> },
    Recolor(ColorIndex),
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Labels before the operator. Empty means "current selection".
    pub selector: SmallVec<[Label; 8]>,
    /// `None` for a bare selection toggle.
    pub action: Option<Action>,
}

/// Parse one command line.
pub fn parse_command(input: &str, operators: OperatorSet) -> Result<Command> {
    let mut tokens = tokenize(input, operators)?.into_iter();
    let mut selector = SmallVec::new();
    let mut action = None;

    while let Some(token) = tokens.next() {
        match token {
            Token::Number(n) => selector.push(Label(n)),
            Token::Operator(op) => {
                let args: Vec<Token> = tokens.by_ref().collect();
                action = Some(parse_action(op, &args)?);
            }
        }
    }

    Ok(Command { selector, action })
}

fn parse_action(op: Operator, args: &[Token]) -> Result<Action> {
    let numbers = args
        .iter()
        .map(|t| match t {
            Token::Number(n) => Ok(*n),
            Token::Operator(second) => Err(GraphError::MalformedArgument(format!(
                "second operator '{second}' after '{op}'"
            ))),
        })
        .collect::<Result<SmallVec<[u32; 2]>>>()?;

    match (op, numbers.as_slice()) {
        (Operator::Connect, []) => Ok(Action::Connect { target: None }),
        (Operator::Connect, [n]) => Ok(Action::Connect {
            target: Some(Label(*n)),
        }),
        (Operator::Recolor, [n]) => Ok(Action::Recolor(ColorIndex::new(*n)?)),
        (Operator::Recolor, []) => Err(GraphError::MalformedArgument(
            "'c' needs a color index".to_string(),
        )),
        (Operator::Delete, []) => Ok(Action::Delete),
        (op, extra) => Err(GraphError::MalformedArgument(format!(
            "'{op}' takes {} argument(s), got {}",
            if op == Operator::Delete { 0 } else { 1 },
            extra.len()
        ))),
    }
}

// ─── Execution ───────────────────────────────────────────────────────────

/// What a successful command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Empty input: nothing to do.
    Nothing,
    /// Bare selector: this many entities had their selection flipped.
    Toggled(usize),
    Connected(Vec<gt_core::EdgeId>),
    Recolored(usize),
    Deleted(usize),
}

/// Run a parsed command against the store.
///
/// Validation happens before the first mutation. After any operator
/// succeeds the whole selection is cleared; a bare toggle leaves it as is.
pub fn execute(store: &mut GraphStore, command: &Command) -> Result<Outcome> {
    let targets = effective_selection(store, &command.selector)?;

    let Some(action) = command.action else {
        if command.selector.is_empty() {
            return Ok(Outcome::Nothing);
        }
        for entity in &targets {
            store.toggle_selection(*entity);
        }
        return Ok(Outcome::Toggled(targets.len()));
    };

    let outcome = match action {
        Action::Connect { target } => {
            let pairs = plan_connections(store, &targets, target)?;
            let mut created = Vec::with_capacity(pairs.len());
            for (from, to) in pairs {
                created.push(store.create_edge(from, to)?);
            }
            Outcome::Connected(created)
        }
        Action::Recolor(color) => {
            let n = targets
                .iter()
                .filter(|entity| store.set_color(**entity, color))
                .count();
            Outcome::Recolored(n)
        }
        Action::Delete => {
            // Removing a vertex may already have cascaded to a selected edge;
            // `remove` reports those as no-ops.
            let n = targets.iter().filter(|entity| store.remove(**entity)).count();
            Outcome::Deleted(n)
        }
    };

    store.clear_selection();
    Ok(outcome)
}

/// Parse and execute in one step.
pub fn run(store: &mut GraphStore, input: &str, operators: OperatorSet) -> Result<Outcome> {
    let command = parse_command(input, operators)?;
    execute(store, &command)
}

/// Entities a command acts on. Duplicate labels collapse onto their first
/// occurrence.
fn effective_selection(store: &GraphStore, selector: &[Label]) -> Result<Vec<EntityRef>> {
    if selector.is_empty() {
        return Ok(store.selection().values().to_vec());
    }
    let mut targets: Vec<EntityRef> = Vec::with_capacity(selector.len());
    for label in selector {
        let entity = EntityRef::Vertex(store.resolve_vertex_by_label(*label)?);
        if !targets.contains(&entity) {
            targets.push(entity);
        }
    }
    Ok(targets)
}

/// Endpoint pairs for a connect. Edges in the target list are ignored.
fn plan_connections(
    store: &GraphStore,
    targets: &[EntityRef],
    target: Option<Label>,
) -> Result<Vec<(VertexId, VertexId)>> {
    let vertices: Vec<VertexId> = targets.iter().filter_map(|e| e.as_vertex()).collect();
    match target {
        Some(label) => {
            let to = store.resolve_vertex_by_label(label)?;
            Ok(vertices.into_iter().map(|from| (from, to)).collect())
        }
        None if vertices.len() >= 2 => Ok(vertices.windows(2).map(|w| (w[0], w[1])).collect()),
        None => Err(GraphError::MalformedArgument(
            "'-' needs a target label or at least two vertices".to_string(),
        )),
    }
}
