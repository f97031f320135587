//! Human-readable attendance reports

use crate::{day::DayKey, roster::Partition};
use serenity::all::{CreateEmbed, CreateEmbedFooter, CreateMessage, Timestamp, UserId};
use std::collections::BTreeSet;

const GREEN: u32 = 0x00FF00;
const AMBER: u32 = 0xFFAA00;
const BLUE: u32 = 0x3498DB;

/// Either a plain line of text (used for the empty cases) or an embed
#[derive(Debug, PartialEq, Eq)]
pub enum Report {
    Text(String),
    Embed(ReportEmbed),
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReportEmbed {
    pub title: String,
    pub description: String,
    pub colour: u32,
    pub footer: String,
}

impl Report {
    pub fn to_message(&self) -> CreateMessage {
        match self {
            Report::Text(text) => CreateMessage::new().content(text),
            Report::Embed(embed) => CreateMessage::new().embed(
                CreateEmbed::new()
                    .title(&embed.title)
                    .description(&embed.description)
                    .colour(embed.colour)
                    .timestamp(Timestamp::now())
                    .footer(CreateEmbedFooter::new(&embed.footer)),
            ),
        }
    }
}

/// Lines for `ids` in id order.  Unresolved ids fall back to the raw id.
fn lines_with_fallback(
    marker: &str,
    ids: &BTreeSet<UserId>,
    resolve: &impl Fn(UserId) -> Option<String>,
) -> String {
    ids.iter()
        .map(|id| {
            let name = resolve(*id).unwrap_or_else(|| id.to_string());
            format!("{} {}", marker, name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lines for `ids` in id order.  Unresolved ids are left out.
fn lines_resolved_only(
    marker: &str,
    ids: &BTreeSet<UserId>,
    resolve: &impl Fn(UserId) -> Option<String>,
) -> String {
    ids.iter()
        .filter_map(|id| resolve(*id))
        .map(|name| format!("{} {}", marker, name))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn submitted(split: &Partition, resolve: impl Fn(UserId) -> Option<String>) -> Report {
    if split.submitted.is_empty() {
        return Report::Text("❌ No submissions received today.".to_owned());
    }

    Report::Embed(ReportEmbed {
        title: "📊 Submitted Today".to_owned(),
        description: lines_with_fallback("✅", &split.submitted, &resolve),
        colour: GREEN,
        footer: format!("Total submitted: {}", split.submitted.len()),
    })
}

pub fn not_submitted(split: &Partition, resolve: impl Fn(UserId) -> Option<String>) -> Report {
    if split.not_submitted.is_empty() {
        return Report::Text("✅ Everyone has submitted today!".to_owned());
    }

    Report::Embed(ReportEmbed {
        title: "🕒 Not Yet Submitted Today".to_owned(),
        description: lines_with_fallback("❌", &split.not_submitted, &resolve),
        colour: AMBER,
        footer: format!(
            "Pending: {} | Submitted: {}",
            split.not_submitted.len(),
            split.submitted.len()
        ),
    })
}

/// Both halves plus the counts.  Unlike the single-half reports, names that do not resolve are
/// omitted here instead of shown as raw ids.
pub fn daily(day: &DayKey, split: &Partition, resolve: impl Fn(UserId) -> Option<String>) -> Report {
    let mut parts = Vec::new();

    if split.submitted.is_empty() {
        parts.push("No submissions yet.".to_owned());
    } else {
        parts.push(format!(
            "**Submitted:**\n{}",
            lines_resolved_only("✅", &split.submitted, &resolve)
        ));
    }

    if split.not_submitted.is_empty() {
        parts.push("\nEveryone has submitted ✅".to_owned());
    } else {
        parts.push(format!(
            "\n**Not Submitted:**\n{}",
            lines_resolved_only("❌", &split.not_submitted, &resolve)
        ));
    }

    Report::Embed(ReportEmbed {
        title: format!("Daily Report – {}", day),
        description: parts.join("\n"),
        colour: BLUE,
        footer: format!(
            "Submitted: {} | Pending: {} | Total: {}",
            split.submitted.len(),
            split.not_submitted.len(),
            split.total()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(submitted: &[u64], not_submitted: &[u64]) -> Partition {
        Partition {
            submitted: submitted.iter().copied().map(UserId::new).collect(),
            not_submitted: not_submitted.iter().copied().map(UserId::new).collect(),
        }
    }

    fn names(id: UserId) -> Option<String> {
        match id.get() {
            1 => Some("Alice".to_owned()),
            2 => Some("Bob".to_owned()),
            _ => None,
        }
    }

    fn embed(report: Report) -> ReportEmbed {
        match report {
            Report::Embed(embed) => embed,
            Report::Text(text) => panic!("expected an embed, got text {:?}", text),
        }
    }

    #[test]
    fn submitted_lists_names_in_id_order() {
        let report = embed(submitted(&split(&[2, 1], &[]), names));
        assert_eq!(report.description, "✅ Alice\n✅ Bob");
        assert_eq!(report.footer, "Total submitted: 2");
    }

    #[test]
    fn submitted_falls_back_to_raw_id() {
        let report = embed(submitted(&split(&[1, 3], &[]), names));
        assert_eq!(report.description, "✅ Alice\n✅ 3");
    }

    #[test]
    fn nobody_submitted() {
        assert_eq!(
            submitted(&split(&[], &[1]), names),
            Report::Text("❌ No submissions received today.".to_owned())
        );
    }

    #[test]
    fn not_submitted_counts_both_halves() {
        let report = embed(not_submitted(&split(&[1], &[2, 3]), names));
        assert_eq!(report.description, "❌ Bob\n❌ 3");
        assert_eq!(report.footer, "Pending: 2 | Submitted: 1");
    }

    #[test]
    fn everyone_submitted() {
        assert_eq!(
            not_submitted(&split(&[1], &[]), names),
            Report::Text("✅ Everyone has submitted today!".to_owned())
        );
    }

    #[test]
    fn daily_report_drops_unresolved_names() {
        let day = "2024-01-02".parse().unwrap();
        let report = embed(daily(&day, &split(&[1], &[2, 3]), names));

        assert_eq!(report.title, "Daily Report – 2024-01-02");
        assert_eq!(
            report.description,
            "**Submitted:**\n✅ Alice\n\n**Not Submitted:**\n❌ Bob"
        );
        assert_eq!(report.footer, "Submitted: 1 | Pending: 2 | Total: 3");
    }

    #[test]
    fn daily_report_empty_halves() {
        let day = "2024-01-02".parse().unwrap();

        let nobody = embed(daily(&day, &split(&[], &[2]), names));
        assert!(nobody.description.starts_with("No submissions yet.\n"));

        let everyone = embed(daily(&day, &split(&[1], &[]), names));
        assert!(everyone.description.ends_with("\nEveryone has submitted ✅"));
        assert_eq!(everyone.footer, "Submitted: 1 | Pending: 0 | Total: 1");
    }
}
