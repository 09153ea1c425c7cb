//! Append-only roster transaction log.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::history::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionKind {
    Trade,
    Signing,
    Release,
    CallUp,
    Retirement,
    Extension,
}

impl TransactionKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trade => "Trade",
            Self::Signing => "Signing",
            Self::Release => "Release",
            Self::CallUp => "Call-up",
            Self::Retirement => "Retirement",
            Self::Extension => "Extension",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Monotonic sequence number; orders transactions within a year.
    pub seq: u64,
    pub year: u16,
    pub kind: TransactionKind,
    /// Team abbreviation.
    pub team: String,
    #[serde(default)]
    pub player_id: Option<PlayerId>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionLog {
    next_seq: u64,
    entries: Vec<Transaction>,
}

impl TransactionLog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_seq: 0,
            entries: Vec::new(),
        }
    }

    pub fn record(
        &mut self,
        year: u16,
        kind: TransactionKind,
        team: &str,
        player_id: Option<PlayerId>,
        description: &str,
    ) -> Transaction {
        let transaction = Transaction {
            seq: self.next_seq,
            year,
            kind,
            team: team.to_string(),
            player_id,
            description: description.to_string(),
        };
        self.next_seq += 1;
        self.entries.push(transaction.clone());
        transaction
    }

    /// Most recent first, optionally only one team's, at most `limit`.
    #[must_use]
    pub fn query(&self, team: Option<&str>, limit: usize) -> Vec<Transaction> {
        self.entries
            .iter()
            .rev()
            .filter(|tx| team.is_none_or(|abbr| tx.team == abbr))
            .take(limit)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> TransactionLog {
        let mut log = TransactionLog::new();
        log.record(2001, TransactionKind::Signing, "BOS", Some(1), "Signed SS");
        log.record(2001, TransactionKind::Trade, "NYY", Some(2), "Acquired LHP");
        log.record(2002, TransactionKind::CallUp, "BOS", Some(3), "Promoted C");
        log.record(2002, TransactionKind::Release, "BOS", None, "Released 2B");
        log
    }

    #[test]
    fn newest_first_and_bounded() {
        let log = sample_log();
        let seqs: Vec<u64> = log.query(None, 3).iter().map(|tx| tx.seq).collect();
        assert_eq!(seqs, vec![3, 2, 1]);
    }

    #[test]
    fn team_filter_applies_before_limit() {
        let log = sample_log();
        let boston = log.query(Some("BOS"), 10);
        assert_eq!(boston.len(), 3);
        assert!(boston.iter().all(|tx| tx.team == "BOS"));
        assert!(log.query(Some("SEA"), 10).is_empty());
        assert!(log.query(None, 0).is_empty());
    }

    #[test]
    fn kinds_serialize_kebab_case() {
        let json = serde_json::to_string(&TransactionKind::CallUp).unwrap();
        assert_eq!(json, "\"call-up\"");
    }
}
