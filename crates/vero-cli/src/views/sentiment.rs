//! Sentiment tracker view.
//!
//! Pulse readings per cohort and channel on a 0-10 scale. Readings under
//! the configured floor are flagged.

use crate::screen::{Screen, ViewContext, ViewModule, ViewRecord};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use vero_analytics::{FlaggedRecord, Health, ViewSummary, classify_score, mean_by, summarize};
use vero_core::{
    Align, Column, DraftModel, FieldErrors, FieldKind, FieldSpec, Record, RecordId, TableSpec,
    UnknownField, validate,
};

const COHORT_TOKENS: &[&str] = &["players", "parents", "staff", "fans"];
const CHANNEL_TOKENS: &[&str] = &["survey", "social", "meeting"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("cohort", "Cohort", FieldKind::Choice(COHORT_TOKENS)),
    FieldSpec::required("channel", "Channel", FieldKind::Choice(CHANNEL_TOKENS)),
    FieldSpec::required("score", "Score (0-10)", FieldKind::Number),
    FieldSpec::required("recorded", "Recorded on", FieldKind::Date),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cohort {
    Players,
    Parents,
    Staff,
    Fans,
}

impl Cohort {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Players => "players",
            Self::Parents => "parents",
            Self::Staff => "staff",
            Self::Fans => "fans",
        }
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_cohort(raw: &str) -> Result<Cohort, String> {
    match validate::parse_choice(raw, COHORT_TOKENS)? {
        "players" => Ok(Cohort::Players),
        "parents" => Ok(Cohort::Parents),
        "staff" => Ok(Cohort::Staff),
        _ => Ok(Cohort::Fans),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Reading {
    pub id: RecordId,
    pub cohort: Cohort,
    pub channel: &'static str,
    pub score: f64,
    pub recorded: NaiveDate,
}

impl Record for Reading {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReadingDraft {
    cohort: String,
    channel: String,
    score: String,
    recorded: String,
}

pub struct ReadingFields {
    cohort: Cohort,
    channel: &'static str,
    score: f64,
    recorded: NaiveDate,
}

impl DraftModel for ReadingDraft {
    type Output = ReadingFields;

    fn set_field(&mut self, name: &str, raw: &str) -> Result<(), UnknownField> {
        match name {
            "cohort" => self.cohort = raw.to_string(),
            "channel" => self.channel = raw.to_string(),
            "score" => self.score = raw.to_string(),
            "recorded" => self.recorded = raw.to_string(),
            other => return Err(UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "cohort" => Some(self.cohort.clone()),
            "channel" => Some(self.channel.clone()),
            "score" => Some(self.score.clone()),
            "recorded" => Some(self.recorded.clone()),
            _ => None,
        }
    }

    fn validate(&self) -> Result<ReadingFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        let cohort = errors.check("cohort", parse_cohort(&self.cohort), Cohort::Players);
        let channel = errors.check(
            "channel",
            validate::parse_choice(&self.channel, CHANNEL_TOKENS),
            CHANNEL_TOKENS[0],
        );
        let score = errors.check(
            "score",
            validate::parse_number_in_range(&self.score, 0.0, 10.0),
            0.0,
        );
        let recorded = errors.check(
            "recorded",
            validate::parse_date(&self.recorded),
            NaiveDate::default(),
        );
        if errors.is_empty() {
            Ok(ReadingFields {
                cohort,
                channel,
                score,
                recorded,
            })
        } else {
            Err(errors)
        }
    }
}

impl ViewRecord for Reading {
    type Fields = ReadingFields;
    type Draft = ReadingDraft;

    fn from_fields(id: RecordId, fields: ReadingFields) -> Self {
        Self {
            id,
            cohort: fields.cohort,
            channel: fields.channel,
            score: fields.score,
            recorded: fields.recorded,
        }
    }

    fn draft(&self) -> ReadingDraft {
        ReadingDraft {
            cohort: self.cohort.to_string(),
            channel: self.channel.to_string(),
            score: self.score.to_string(),
            recorded: self.recorded.format("%Y-%m-%d").to_string(),
        }
    }
}

fn table() -> TableSpec<Reading> {
    TableSpec::new(vec![
        Column::new("Cohort", 8, Align::Left, |r: &Reading| {
            r.cohort.to_string()
        }),
        Column::new("Channel", 8, Align::Left, |r: &Reading| {
            r.channel.to_string()
        }),
        Column::new("Score", 5, Align::Right, |r: &Reading| {
            format!("{:.1}", r.score)
        }),
        Column::new("Recorded", 10, Align::Left, |r: &Reading| {
            r.recorded.format("%Y-%m-%d").to_string()
        }),
        Column::new("Id", 8, Align::Left, |r: &Reading| r.id.to_string()),
    ])
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn seeds() -> Vec<Reading> {
    let row = |n: u32, cohort: Cohort, channel: &'static str, score: f64, recorded: NaiveDate| {
        Reading {
            id: RecordId::seed(n),
            cohort,
            channel,
            score,
            recorded,
        }
    };
    vec![
        row(1, Cohort::Players, "survey", 7.5, date(2026, 1, 12)),
        row(2, Cohort::Players, "meeting", 6.8, date(2026, 2, 2)),
        row(3, Cohort::Parents, "survey", 4.2, date(2026, 1, 20)),
        row(4, Cohort::Parents, "social", 3.9, date(2026, 2, 14)),
        row(5, Cohort::Staff, "meeting", 8.1, date(2026, 1, 28)),
        row(6, Cohort::Fans, "social", 6.2, date(2026, 2, 21)),
    ]
}

fn summarize_view(records: &[Reading], ctx: &ViewContext) -> ViewSummary {
    let groups = summarize(
        records,
        |r| r.cohort.to_string(),
        Some(&|r: &Reading| r.score),
    );
    let flagged = records
        .iter()
        .filter(|r| {
            classify_score(r.score, ctx.thresholds.sentiment_floor) == Health::AtRisk
        })
        .map(|r| FlaggedRecord {
            id: r.id,
            label: format!("{} via {}", r.cohort, r.channel),
            health: Health::AtRisk,
        })
        .collect();
    ViewSummary {
        total: records.len(),
        groups,
        flagged,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn chart(records: &[Reading], _ctx: &ViewContext) -> Vec<(String, u64)> {
    mean_by(records, |r| r.cohort, |r| r.score)
        .into_iter()
        .map(|(cohort, mean)| (cohort.to_string(), mean.round().max(0.0) as u64))
        .collect()
}

pub fn view() -> Box<dyn ViewModule> {
    let screen = Screen::new(
        "sentiment",
        "Sentiment tracker",
        seeds(),
        table(),
        FIELDS,
        summarize_view,
        chart,
    )
    .expect("sentiment seed ids are unique");
    Box::new(screen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;

    fn ctx() -> ViewContext {
        ViewContext {
            today: date(2026, 3, 10),
            thresholds: Thresholds::default(),
        }
    }

    #[test]
    fn readings_under_the_floor_are_flagged() {
        let summary = summarize_view(&seeds(), &ctx());
        let flagged: Vec<&str> = summary.flagged.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(flagged, ["parents via survey", "parents via social"]);
    }

    #[test]
    fn cohort_means_round_into_the_chart_series() {
        let series = chart(&seeds(), &ctx());
        let players = series
            .iter()
            .find(|(label, _)| label == "players")
            .expect("players bar");
        assert_eq!(players.1, 7);
    }

    #[test]
    fn score_outside_scale_is_rejected() {
        let mut draft = ReadingDraft::default();
        draft.set_field("cohort", "players").expect("known field");
        draft.set_field("channel", "survey").expect("known field");
        draft.set_field("score", "11").expect("known field");
        draft.set_field("recorded", "2026-02-01").expect("known field");
        let errors = draft.validate().expect_err("score out of range");
        assert!(errors.get("score").is_some());
    }
}
