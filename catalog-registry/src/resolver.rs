//! Compatibility resolution between tool records.
//!
//! Rules are evaluated in a fixed order and the first decisive one wins:
//!
//! 1. an explicit veto from either side, by name or by `type:<tag>`, makes
//!    the pair incompatible, even if an allowance also matches;
//! 2. any declared allowance from either side, by name or by `type:<tag>`,
//!    makes the pair compatible;
//! 3. otherwise the pair is incompatible.

use std::fmt::{self, Display, Formatter};

use catalog_primitives::{CompatToken, ToolName};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::record::ToolRecord;

/// One explanation attached to a [`Verdict`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reason {
    /// `declared_by` carries an `incompatible_with` token matching the other
    /// tool.
    Veto {
        /// Tool that declared the veto.
        declared_by: ToolName,
        /// The matching token.
        token: CompatToken,
    },
    /// `declared_by` carries a compatibility token matching the other tool.
    Allowance {
        /// Tool that declared the allowance.
        declared_by: ToolName,
        /// The matching token.
        token: CompatToken,
    },
    /// Neither side declared anything about the other.
    NoDeclaration {
        /// First tool of the pair.
        first: ToolName,
        /// Second tool of the pair.
        second: ToolName,
    },
}

impl Display for Reason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Veto { declared_by, token } => {
                write!(f, "{declared_by} is declared incompatible with {token}")
            }
            Self::Allowance { declared_by, token } => {
                write!(f, "{declared_by} is compatible with {token}")
            }
            Self::NoDeclaration { first, second } => {
                write!(f, "no declared compatibility between {first} and {second}")
            }
        }
    }
}

impl Serialize for Reason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of resolving one pair of tools.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Verdict {
    compatible: bool,
    reasons: Vec<Reason>,
}

impl Verdict {
    fn compatible(reasons: Vec<Reason>) -> Self {
        Self {
            compatible: true,
            reasons,
        }
    }

    fn incompatible(reasons: Vec<Reason>) -> Self {
        Self {
            compatible: false,
            reasons,
        }
    }

    /// Returns true when the pair may share a pipeline.
    #[must_use]
    pub fn is_compatible(&self) -> bool {
        self.compatible
    }

    /// Explanations, ordered with the first tool's declarations first.
    #[must_use]
    pub fn reasons(&self) -> &[Reason] {
        &self.reasons
    }

    /// Returns true when the verdict was decided by a veto.
    #[must_use]
    pub fn is_vetoed(&self) -> bool {
        self.reasons
            .iter()
            .any(|reason| matches!(reason, Reason::Veto { .. }))
    }
}

/// First veto token of `declarer` that selects `other`. A name veto is
/// preferred over a type veto.
fn veto(declarer: &ToolRecord, other: &ToolRecord) -> Option<Reason> {
    let vetoes = declarer.incompatible_with();
    vetoes
        .iter()
        .find(|token| token.names(other.name()))
        .or_else(|| {
            vetoes
                .iter()
                .find(|token| token.matches(other.name(), other.tool_type()))
        })
        .map(|token| Reason::Veto {
            declared_by: declarer.name().clone(),
            token: token.clone(),
        })
}

fn allowances<'a>(
    declarer: &'a ToolRecord,
    other: &'a ToolRecord,
) -> impl Iterator<Item = Reason> + 'a {
    declarer
        .compatibilities()
        .iter()
        .filter(|token| token.matches(other.name(), other.tool_type()))
        .map(|token| Reason::Allowance {
            declared_by: declarer.name().clone(),
            token: token.clone(),
        })
}

/// Resolves whether `a` and `b` can cooperate in a pipeline.
///
/// Unknown names inside either tool's declarations are plain literals and
/// simply never match.
#[must_use]
pub fn resolve(a: &ToolRecord, b: &ToolRecord) -> Verdict {
    let vetoes: Vec<Reason> = veto(a, b).into_iter().chain(veto(b, a)).collect();
    if !vetoes.is_empty() {
        debug!(first = %a.name(), second = %b.name(), "pair vetoed");
        return Verdict::incompatible(vetoes);
    }

    let allowed: Vec<Reason> = allowances(a, b).chain(allowances(b, a)).collect();
    if !allowed.is_empty() {
        debug!(
            first = %a.name(),
            second = %b.name(),
            clauses = allowed.len(),
            "pair allowed"
        );
        return Verdict::compatible(allowed);
    }

    debug!(first = %a.name(), second = %b.name(), "no declaration for pair");
    Verdict::incompatible(vec![Reason::NoDeclaration {
        first: a.name().clone(),
        second: b.name().clone(),
    }])
}

/// Keeps the candidates compatible with `target`, preserving their order.
/// The target itself is never part of the result.
pub fn find_compatible<'a, I>(target: &ToolRecord, candidates: I) -> Vec<&'a ToolRecord>
where
    I: IntoIterator<Item = &'a ToolRecord>,
{
    candidates
        .into_iter()
        .filter(|candidate| candidate.name() != target.name())
        .filter(|candidate| resolve(target, candidate).is_compatible())
        .collect()
}

/// Verdict for one pair inside a [`PipelineVerdict`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PairVerdict {
    first: ToolName,
    second: ToolName,
    #[serde(flatten)]
    verdict: Verdict,
}

impl PairVerdict {
    /// First tool of the pair, in input order.
    #[must_use]
    pub fn first(&self) -> &ToolName {
        &self.first
    }

    /// Second tool of the pair, in input order.
    #[must_use]
    pub fn second(&self) -> &ToolName {
        &self.second
    }

    /// The resolved verdict.
    #[must_use]
    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }
}

/// Outcome of checking a whole set of tools pairwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PipelineVerdict {
    compatible: bool,
    tools: Vec<ToolName>,
    pairs: Vec<PairVerdict>,
}

impl PipelineVerdict {
    /// Returns true when every pair is compatible. Sets of fewer than two
    /// tools are trivially compatible.
    #[must_use]
    pub fn is_compatible(&self) -> bool {
        self.compatible
    }

    /// The checked tools, in input order.
    #[must_use]
    pub fn tools(&self) -> &[ToolName] {
        &self.tools
    }

    /// Every pair's verdict, in input order.
    #[must_use]
    pub fn pairs(&self) -> &[PairVerdict] {
        &self.pairs
    }

    /// Pairs that failed to resolve as compatible.
    pub fn conflicts(&self) -> impl Iterator<Item = &PairVerdict> {
        self.pairs
            .iter()
            .filter(|pair| !pair.verdict.is_compatible())
    }
}

/// Resolves every unordered pair of `records`.
#[must_use]
pub fn check_all(records: &[&ToolRecord]) -> PipelineVerdict {
    let mut pairs = Vec::new();
    for (index, first) in records.iter().enumerate() {
        for second in &records[index + 1..] {
            pairs.push(PairVerdict {
                first: first.name().clone(),
                second: second.name().clone(),
                verdict: resolve(first, second),
            });
        }
    }

    PipelineVerdict {
        compatible: pairs.iter().all(|pair| pair.verdict.is_compatible()),
        tools: records.iter().map(|record| record.name().clone()).collect(),
        pairs,
    }
}
