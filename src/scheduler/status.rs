use itertools::Itertools;
use serde::Serialize;
use strum_macros::{Display, EnumString};

/// Status code surfaced to the host for a single filter invocation.
#[derive(Serialize, Clone, Copy, Debug, Display, EnumString, PartialEq, Eq)]
pub enum Code {
    Success,
    Error,
    /// The node can never satisfy the pod through this plugin without external
    /// remediation, retrying will not help.
    UnschedulableAndUnresolvable,
}

/// Reasons attached to a rejection. Never empty, and each reason appears once, in the order
/// it was first given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reasons(Vec<String>);

impl Reasons {
    /// Returns None when no reasons are given.
    pub fn new<I, S>(reasons: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let reasons: Vec<String> = reasons.into_iter().map(Into::into).unique().collect();
        if reasons.is_empty() {
            return None;
        }
        Some(Reasons(reasons))
    }

    pub fn as_slice(&self) -> &[String] {
        self.0.as_slice()
    }
}

impl From<&str> for Reasons {
    fn from(reason: &str) -> Self {
        Reasons(vec![reason.to_string()])
    }
}

impl From<String> for Reasons {
    fn from(reason: String) -> Self {
        Reasons(vec![reason])
    }
}

/// Outcome of running one filter for one (pod, node) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Admit,
    Reject(Reasons),
    Error(String),
}

impl Verdict {
    pub fn reject(reasons: impl Into<Reasons>) -> Self {
        Verdict::Reject(reasons.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Verdict::Error(message.into())
    }

    pub fn code(&self) -> Code {
        match self {
            Verdict::Admit => Code::Success,
            Verdict::Reject(_) => Code::UnschedulableAndUnresolvable,
            Verdict::Error(_) => Code::Error,
        }
    }

    pub fn is_admit(&self) -> bool {
        matches!(self, Verdict::Admit)
    }

    pub fn reasons(&self) -> &[String] {
        match self {
            Verdict::Reject(reasons) => reasons.as_slice(),
            _ => &[],
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Verdict::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}
