use crate::model::challenge::ChallengeRecord;
use crate::model::ids::CardId;

/// Per-card detail row for the results view.
///
/// Presentation-agnostic: the rendering layer decides how to display a row
/// and must escape the card id before placing it into markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub card_id: CardId,
    pub is_correct: bool,
}

/// Aggregated outcome of one challenge run.
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeReport {
    total_cards: usize,
    correct_count: usize,
    accuracy: f64,
    rows: Vec<ReportRow>,
}

impl ChallengeReport {
    /// Build a report from a parsed challenge record.
    #[must_use]
    pub fn from_record(record: &ChallengeRecord) -> Self {
        let rows: Vec<ReportRow> = record
            .entries()
            .iter()
            .map(|(card_id, remembered)| ReportRow {
                card_id: card_id.clone(),
                is_correct: *remembered,
            })
            .collect();

        let total_cards = rows.len();
        let correct_count = rows.iter().filter(|row| row.is_correct).count();
        let accuracy = if total_cards > 0 {
            round_to_two_decimals(correct_count as f64 / total_cards as f64 * 100.0)
        } else {
            0.0
        };

        Self {
            total_cards,
            correct_count,
            accuracy,
            rows,
        }
    }

    /// Build a report straight from the serialized record text.
    #[must_use]
    pub fn from_record_text(text: &str) -> Self {
        Self::from_record(&ChallengeRecord::parse(text))
    }

    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    /// Percentage of correct answers, rounded to two decimals.
    ///
    /// Zero when the record has no entries.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Per-card rows in record order.
    #[must_use]
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }
}

fn round_to_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Escape text for safe embedding into HTML markup.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
