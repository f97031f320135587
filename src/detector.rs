//! Decides whether a message counts as a spreadsheet submission

use serenity::all::Message;

/// Attachment filename suffixes that count as a spreadsheet.  Matched case-sensitively.
const SPREADSHEET_EXTENSIONS: [&str; 4] = [".xlsx", ".xls", ".csv", ".ods"];

/// Link fragments that count as a shared spreadsheet.  Matched against lowercased content.
const SPREADSHEET_LINKS: [&str; 3] = [
    "docs.google.com/spreadsheets",
    "sheets.google.com",
    "drive.google.com",
];

/// The parts of a message the detector looks at
pub struct Candidate<'a> {
    pub filenames: Vec<&'a str>,
    pub content: &'a str,
}

impl<'a> From<&'a Message> for Candidate<'a> {
    fn from(msg: &'a Message) -> Self {
        Self {
            filenames: msg.attachments.iter().map(|a| a.filename.as_str()).collect(),
            content: &msg.content,
        }
    }
}

/// Why a message was accepted
#[derive(Debug, PartialEq, Eq)]
pub enum Detection<'a> {
    Attachment(&'a str),
    Link(&'static str),
}

/// Attachments are checked before links; the first match wins.
pub fn classify<'a>(candidate: &Candidate<'a>) -> Option<Detection<'a>> {
    if let Some(filename) = candidate.filenames.iter().find(|name| {
        SPREADSHEET_EXTENSIONS
            .iter()
            .any(|extension| name.ends_with(*extension))
    }) {
        return Some(Detection::Attachment(*filename));
    }

    let content = candidate.content.to_lowercase();
    SPREADSHEET_LINKS
        .iter()
        .find(|link| content.contains(**link))
        .map(|link| Detection::Link(*link))
}
