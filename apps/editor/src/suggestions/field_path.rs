use std::fmt;

use serde::{Deserialize, Serialize};

/// Address of one leaf attribute in a resume document.
///
/// Singleton sections use dotted names (`basics.summary`), sequence sections
/// use bracket indexes (`work[0].description`, `skills[2].level`), and list
/// leaves carry a trailing index (`work[0].achievements[1]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSyntaxError {
    Empty,
    UnclosedBracket,
    InvalidIndex(String),
}

impl fmt::Display for PathSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSyntaxError::Empty => write!(f, "empty field path"),
            PathSyntaxError::UnclosedBracket => write!(f, "missing closing bracket"),
            PathSyntaxError::InvalidIndex(raw) => write!(f, "invalid array index '{raw}'"),
        }
    }
}

impl FieldPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the path into keys and indexes.
    ///
    /// `work[0].achievements[1]` → `[Key(work), Index(0), Key(achievements), Index(1)]`.
    pub fn segments(&self) -> Result<Vec<Segment>, PathSyntaxError> {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = self.0.chars();

        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    if !current.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut current)));
                    }
                }
                '[' => {
                    if !current.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut current)));
                    }
                    let mut raw = String::new();
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        if inner == ']' {
                            closed = true;
                            break;
                        }
                        raw.push(inner);
                    }
                    if !closed {
                        return Err(PathSyntaxError::UnclosedBracket);
                    }
                    let index = raw
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| PathSyntaxError::InvalidIndex(raw.clone()))?;
                    segments.push(Segment::Index(index));
                }
                other => current.push(other),
            }
        }

        if !current.is_empty() {
            segments.push(Segment::Key(current));
        }
        if segments.is_empty() {
            return Err(PathSyntaxError::Empty);
        }
        Ok(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FieldPath {
    fn from(value: String) -> Self {
        Self(value)
    }
}
