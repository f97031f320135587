use crate::{day::DayKey, ledger::Ledger};
use serenity::all::{Member, UserId};
use std::collections::{BTreeSet, HashMap};

/// Snapshot of a guild's members
#[derive(Default)]
pub struct Roster(HashMap<UserId, RosterMember>);

pub struct RosterMember {
    pub is_bot: bool,
    pub display_name: String,
}

impl Roster {
    pub fn insert(&mut self, id: UserId, is_bot: bool, display_name: impl Into<String>) {
        self.0.insert(
            id,
            RosterMember {
                is_bot,
                display_name: display_name.into(),
            },
        );
    }

    /// Members that take part in attendance, i.e. everyone except bots
    pub fn member_ids(&self) -> BTreeSet<UserId> {
        self.0
            .iter()
            .filter(|(_, member)| !member.is_bot)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn display_name(&self, id: UserId) -> Option<&str> {
        self.0.get(&id).map(|member| member.display_name.as_str())
    }
}

impl<'a> FromIterator<&'a Member> for Roster {
    fn from_iter<I: IntoIterator<Item = &'a Member>>(members: I) -> Self {
        let mut roster = Roster::default();
        for member in members {
            roster.insert(member.user.id, member.user.bot, member.display_name());
        }
        roster
    }
}

/// Non-bot members split by whether they submitted.  The halves are disjoint and together cover
/// every non-bot member.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Partition {
    pub submitted: BTreeSet<UserId>,
    pub not_submitted: BTreeSet<UserId>,
}

impl Partition {
    pub fn total(&self) -> usize {
        self.submitted.len() + self.not_submitted.len()
    }
}

/// Ledger entries for people no longer in the roster are dropped.
pub fn partition(ledger: &Ledger, day: &DayKey, roster: &Roster) -> Partition {
    let member_ids = roster.member_ids();
    let submitted: BTreeSet<UserId> = ledger
        .get(day)
        .intersection(&member_ids)
        .copied()
        .collect();
    let not_submitted = member_ids.difference(&submitted).copied().collect();

    Partition {
        submitted,
        not_submitted,
    }
}
