//! Splits a route token list into explicit runs and placeholder commands.

use std::fmt;

use crate::error::{RouteError, SegmentKind};

/// Placeholder asking for a generated fill between its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Shortest path.
    Auto,
    /// Randomized path.
    Rand,
}

impl Command {
    /// Exact, case-sensitive match: `auto` is an ordinary waypoint name.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "AUTO" => Some(Command::Auto),
            "RAND" => Some(Command::Rand),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Auto => "AUTO",
            Command::Rand => "RAND",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Command> for SegmentKind {
    fn from(command: Command) -> Self {
        match command {
            Command::Auto => SegmentKind::Auto,
            Command::Rand => SegmentKind::Rand,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Command(Command),
    /// One or more consecutive non-command tokens.
    Explicit(Vec<String>),
}

impl Segment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Command(command) => (*command).into(),
            Segment::Explicit(_) => SegmentKind::Explicit,
        }
    }

    pub fn tokens(&self) -> Vec<&str> {
        match self {
            Segment::Command(command) => vec![command.as_str()],
            Segment::Explicit(tokens) => tokens.iter().map(String::as_str).collect(),
        }
    }
}

/// Partition `tokens` into segments.
///
/// Every command token becomes its own segment; runs of other tokens are
/// kept together. Concatenating the segments gives back the input.
pub fn split_segments<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Segment>, RouteError> {
    if tokens.is_empty() {
        return Err(RouteError::EmptyRoute);
    }

    let mut segments = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        match Command::parse(token) {
            Some(command) => {
                if !pending.is_empty() {
                    segments.push(Segment::Explicit(std::mem::take(&mut pending)));
                }
                segments.push(Segment::Command(command));
            }
            None => pending.push(token.to_string()),
        }
    }
    if !pending.is_empty() {
        segments.push(Segment::Explicit(pending));
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explicit(tokens: &[&str]) -> Segment {
        Segment::Explicit(tokens.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn no_commands_yield_single_segment() {
        let segments = split_segments(&["ALPHA", "J1", "ECHOO"]).unwrap();
        assert_eq!(segments, vec![explicit(&["ALPHA", "J1", "ECHOO"])]);
    }

    #[test]
    fn adjacent_commands_are_not_merged() {
        let segments = split_segments(&["A", "B", "AUTO", "RAND", "C"]).unwrap();
        assert_eq!(
            segments,
            vec![
                explicit(&["A", "B"]),
                Segment::Command(Command::Auto),
                Segment::Command(Command::Rand),
                explicit(&["C"]),
            ]
        );
    }

    #[test]
    fn command_recognition_is_exact() {
        let segments = split_segments(&["auto", "Rand", "AUTOX", "RAND"]).unwrap();
        assert_eq!(
            segments,
            vec![
                explicit(&["auto", "Rand", "AUTOX"]),
                Segment::Command(Command::Rand),
            ]
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        let empty: [&str; 0] = [];
        assert_eq!(split_segments(&empty), Err(RouteError::EmptyRoute));
    }
}
