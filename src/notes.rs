//! Smart notes generation: summary, key points, definitions and flashcards
//! from lecture notes.
//!
//! The model is instructed to reply in a fixed marker format
//! (`Summary:` / `Key Points:` / `Definitions:` / `Flashcards:`) rather than
//! JSON, so the decode here is section-based: each marker opens a section
//! that runs to the next marker. Missing sections degrade to a placeholder
//! or an empty list, never an error; only the request itself can fail, and
//! it fails like the other single-turn helpers.

use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ai::{prompts, ChatMessage, CompletionClient};
use crate::error::AiError;

static SUMMARY_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)Summary:\s*(.*?)(?:Key Points:|$)").expect("valid regex"));
static KEY_POINTS_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)Key Points:\s*(.*?)(?:Definitions:|$)").expect("valid regex"));
static DEFINITIONS_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)Definitions:\s*(.*?)(?:Flashcards:|$)").expect("valid regex"));
static FLASHCARDS_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)Flashcards:\s*(.*)$").expect("valid regex"));

pub const SUMMARY_MISSING: &str = "⚠️ Summary not found.";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    pub term: String,
    pub definition: String,
}

/// Structured study notes decoded from one model reply.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct StudyNotes {
    pub summary: String,
    pub key_points: Vec<String>,
    pub definitions: Vec<Definition>,
    pub flashcards: Vec<Flashcard>,
}

/// Turn raw lecture notes into a summary, key points, definitions and
/// flashcards. The caller shows the error and lets the user retry.
pub async fn generate_notes(
    client: &CompletionClient,
    notes_text: &str,
) -> Result<StudyNotes, AiError> {
    info!("📖 Generating smart notes ({} chars)", notes_text.len());
    let prompt = prompts::smart_notes(notes_text);
    let reply = client.complete(&[ChatMessage::user(prompt)]).await?;
    Ok(parse_notes_reply(&reply))
}

/// Decode a marker-formatted reply. Total: anything the markers don't match
/// comes back as a placeholder summary or an empty list.
pub fn parse_notes_reply(reply: &str) -> StudyNotes {
    StudyNotes {
        summary: section(&SUMMARY_SECTION, reply)
            .unwrap_or_else(|| SUMMARY_MISSING.to_string()),
        key_points: section(&KEY_POINTS_SECTION, reply)
            .map(|text| bullet_lines(&text))
            .unwrap_or_default(),
        definitions: section(&DEFINITIONS_SECTION, reply)
            .map(|text| definition_lines(&text))
            .unwrap_or_default(),
        flashcards: section(&FLASHCARDS_SECTION, reply)
            .map(|text| flashcard_pairs(&text))
            .unwrap_or_default(),
    }
}

fn section(marker: &Regex, reply: &str) -> Option<String> {
    marker
        .captures(reply)
        .and_then(|captures| captures.get(1))
        .map(|section| section.as_str().trim().to_string())
        .filter(|section| !section.is_empty())
}

fn bullet_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(|c| c == '-' || c == '•')
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

fn definition_lines(text: &str) -> Vec<Definition> {
    text.lines()
        .filter_map(|line| {
            let (term, definition) = line.split_once(':')?;
            let term = term.trim();
            let definition = definition.trim();
            if term.is_empty() || definition.is_empty() {
                return None;
            }
            Some(Definition {
                term: term.to_string(),
                definition: definition.to_string(),
            })
        })
        .collect()
}

/// Pair consecutive `Q:`/`A:` lines. A question without a following answer
/// is dropped.
fn flashcard_pairs(text: &str) -> Vec<Flashcard> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut cards = Vec::new();
    let mut i = 0;
    while i + 1 < lines.len() {
        match (
            lines[i].strip_prefix("Q:"),
            lines[i + 1].strip_prefix("A:"),
        ) {
            (Some(question), Some(answer)) => {
                cards.push(Flashcard {
                    question: question.trim().to_string(),
                    answer: answer.trim().to_string(),
                });
                i += 2;
            }
            _ => i += 1,
        }
    }
    cards
}
