use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Helpful,
    Unhelpful,
}

impl VoteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteKind::Helpful => "helpful",
            VoteKind::Unhelpful => "unhelpful",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub helpful: u32,
    pub unhelpful: u32,
}

impl VoteTally {
    /// Counts a vote unless the voter already voted on this content, in
    /// either direction. Returns whether the vote was counted.
    pub fn cast(&mut self, already_voted: bool, kind: VoteKind) -> bool {
        if already_voted {
            return false;
        }
        match kind {
            VoteKind::Helpful => self.helpful = self.helpful.saturating_add(1),
            VoteKind::Unhelpful => self.unhelpful = self.unhelpful.saturating_add(1),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_first_vote_counts() {
        let mut tally = VoteTally::default();
        assert!(tally.cast(false, VoteKind::Helpful));
        assert!(tally.cast(false, VoteKind::Unhelpful));
        assert_eq!(tally, VoteTally { helpful: 1, unhelpful: 1 });
    }

    #[test]
    fn test_repeat_voter_is_ignored() {
        let mut tally = VoteTally { helpful: 3, unhelpful: 1 };
        assert!(!tally.cast(true, VoteKind::Helpful));
        assert!(!tally.cast(true, VoteKind::Unhelpful));
        assert_eq!(tally, VoteTally { helpful: 3, unhelpful: 1 });
    }

    #[test]
    fn test_counts_never_exceed_distinct_voters() {
        let mut tally = VoteTally::default();
        let mut voters = HashSet::new();
        let ballots = [
            (1, VoteKind::Helpful),
            (2, VoteKind::Unhelpful),
            (1, VoteKind::Unhelpful),
            (3, VoteKind::Helpful),
            (2, VoteKind::Helpful),
        ];

        for (voter, kind) in ballots {
            let already = voters.contains(&voter);
            if tally.cast(already, kind) {
                voters.insert(voter);
            }
        }

        assert_eq!(voters.len(), 3);
        assert_eq!(tally.helpful + tally.unhelpful, 3);
        assert_eq!(tally, VoteTally { helpful: 2, unhelpful: 1 });
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(
            serde_json::from_str::<VoteKind>("\"unhelpful\"").unwrap(),
            VoteKind::Unhelpful
        );
        assert_eq!(serde_json::to_string(&VoteKind::Helpful).unwrap(), "\"helpful\"");
        assert!(serde_json::from_str::<VoteKind>("\"meh\"").is_err());
    }
}
