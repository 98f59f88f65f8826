use crate::model::ids::CardId;

//
// ─── CHALLENGE RECORD ──────────────────────────────────────────────────────────
//

/// Ordered record of per-card answers for one challenge run.
///
/// Keys are unique; insertion order follows traversal order. Re-answering a
/// card overwrites its entry in place instead of appending a duplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengeRecord {
    entries: Vec<(CardId, bool)>,
}

impl ChallengeRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer for a card, inserting or overwriting in place.
    pub fn record(&mut self, card_id: CardId, remembered: bool) {
        match self.entries.iter_mut().find(|(id, _)| *id == card_id) {
            Some((_, answer)) => *answer = remembered,
            None => self.entries.push((card_id, remembered)),
        }
    }

    #[must_use]
    pub fn get(&self, card_id: &CardId) -> Option<bool> {
        self.entries
            .iter()
            .find(|(id, _)| id == card_id)
            .map(|(_, remembered)| *remembered)
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[(CardId, bool)] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to the line-oriented text form: `"<cardId>",true` per line.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|(id, remembered)| format!("\"{}\",{remembered}", id.as_str()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Parse the line-oriented text form.
    ///
    /// Blank lines and lines without an unquoted comma are skipped; a
    /// malformed line never fails the whole parse. The answer token is
    /// matched against `true` ignoring ASCII case; anything else reads as
    /// `false`.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut record = Self::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some((card_id, remembered)) = parse_record_line(line) {
                record.record(card_id, remembered);
            }
        }
        record
    }
}

/// Split one record line at its last unquoted comma.
///
/// Quoted regions are tracked with a toggling double-quote scan so card ids
/// containing commas stay intact.
fn split_record_line(line: &str) -> Option<(&str, &str)> {
    let mut inside_quotes = false;
    let mut last_comma = None;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => inside_quotes = !inside_quotes,
            ',' if !inside_quotes => last_comma = Some(index),
            _ => {}
        }
    }
    let at = last_comma?;
    Some((&line[..at], &line[at + 1..]))
}

fn parse_record_line(line: &str) -> Option<(CardId, bool)> {
    let (name_part, answer_part) = split_record_line(line)?;

    let mut name = name_part.trim();
    if let Some(stripped) = name.strip_prefix('"').and_then(|n| n.strip_suffix('"')) {
        name = stripped;
    }
    let card_id = CardId::new(name).ok()?;
    let remembered = answer_part.trim().eq_ignore_ascii_case("true");
    Some((card_id, remembered))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
