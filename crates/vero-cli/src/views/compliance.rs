//! Compliance log view.
//!
//! Governance requirements with owners and due dates. Open items past due
//! are flagged overdue against the pass's `today`.

use crate::screen::{Screen, ViewContext, ViewModule, ViewRecord};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use vero_analytics::{
    FlaggedRecord, Health, ViewSummary, classify_due, count_by, summarize,
};
use vero_core::{
    Align, Column, DraftModel, FieldErrors, FieldKind, FieldSpec, Record, RecordId, TableSpec,
    UnknownField, validate,
};

const STATUS_TOKENS: &[&str] = &["open", "in-review", "closed"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("requirement", "Requirement", FieldKind::Text),
    FieldSpec::required("owner", "Owner", FieldKind::Text),
    FieldSpec::required("due", "Due date", FieldKind::Date),
    FieldSpec::required("status", "Status", FieldKind::Choice(STATUS_TOKENS)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Open,
    InReview,
    Closed,
}

impl Status {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InReview => "in-review",
            Self::Closed => "closed",
        }
    }

    const fn is_resolved(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_status(raw: &str) -> Result<Status, String> {
    match validate::parse_choice(raw, STATUS_TOKENS)? {
        "open" => Ok(Status::Open),
        "in-review" => Ok(Status::InReview),
        _ => Ok(Status::Closed),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Requirement {
    pub id: RecordId,
    pub requirement: String,
    pub owner: String,
    pub due: NaiveDate,
    pub status: Status,
}

impl Record for Requirement {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequirementDraft {
    requirement: String,
    owner: String,
    due: String,
    status: String,
}

pub struct RequirementFields {
    requirement: String,
    owner: String,
    due: NaiveDate,
    status: Status,
}

impl DraftModel for RequirementDraft {
    type Output = RequirementFields;

    fn set_field(&mut self, name: &str, raw: &str) -> Result<(), UnknownField> {
        match name {
            "requirement" => self.requirement = raw.to_string(),
            "owner" => self.owner = raw.to_string(),
            "due" => self.due = raw.to_string(),
            "status" => self.status = raw.to_string(),
            other => return Err(UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "requirement" => Some(self.requirement.clone()),
            "owner" => Some(self.owner.clone()),
            "due" => Some(self.due.clone()),
            "status" => Some(self.status.clone()),
            _ => None,
        }
    }

    fn validate(&self) -> Result<RequirementFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        let requirement = errors.check(
            "requirement",
            validate::require_text(&self.requirement),
            String::new(),
        );
        let owner = errors.check("owner", validate::require_text(&self.owner), String::new());
        let due = errors.check(
            "due",
            validate::parse_date(&self.due),
            NaiveDate::default(),
        );
        let status = errors.check("status", parse_status(&self.status), Status::Open);
        if errors.is_empty() {
            Ok(RequirementFields {
                requirement,
                owner,
                due,
                status,
            })
        } else {
            Err(errors)
        }
    }
}

impl ViewRecord for Requirement {
    type Fields = RequirementFields;
    type Draft = RequirementDraft;

    fn from_fields(id: RecordId, fields: RequirementFields) -> Self {
        Self {
            id,
            requirement: fields.requirement,
            owner: fields.owner,
            due: fields.due,
            status: fields.status,
        }
    }

    fn draft(&self) -> RequirementDraft {
        RequirementDraft {
            requirement: self.requirement.clone(),
            owner: self.owner.clone(),
            due: self.due.format("%Y-%m-%d").to_string(),
            status: self.status.to_string(),
        }
    }
}

fn table() -> TableSpec<Requirement> {
    TableSpec::new(vec![
        Column::new("Requirement", 24, Align::Left, |r: &Requirement| {
            r.requirement.clone()
        }),
        Column::new("Owner", 14, Align::Left, |r: &Requirement| r.owner.clone()),
        Column::new("Due", 10, Align::Left, |r: &Requirement| {
            r.due.format("%Y-%m-%d").to_string()
        }),
        Column::new("Status", 9, Align::Left, |r: &Requirement| {
            r.status.to_string()
        }),
        Column::new("Id", 8, Align::Left, |r: &Requirement| r.id.to_string()),
    ])
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn seeds() -> Vec<Requirement> {
    let row = |n: u32, requirement: &str, owner: &str, due: NaiveDate, status: Status| {
        Requirement {
            id: RecordId::seed(n),
            requirement: requirement.to_string(),
            owner: owner.to_string(),
            due,
            status,
        }
    };
    vec![
        row(1, "Safeguarding policy renewal", "Club secretary", date(2026, 1, 31), Status::Open),
        row(2, "First-aid certification", "Head coach", date(2026, 6, 30), Status::InReview),
        row(3, "Annual accounts filing", "Treasurer", date(2025, 12, 15), Status::Closed),
        row(4, "Coach background checks", "Club secretary", date(2026, 2, 28), Status::Open),
        row(5, "Facility insurance review", "Facilities lead", date(2026, 9, 1), Status::Open),
        row(6, "GDPR register update", "Data officer", date(2026, 4, 15), Status::InReview),
    ]
}

fn summarize_view(records: &[Requirement], ctx: &ViewContext) -> ViewSummary {
    let groups = summarize(records, |r| r.status.to_string(), None);
    let flagged = records
        .iter()
        .filter(|r| {
            classify_due(r.due, r.status.is_resolved(), ctx.today) == Health::Overdue
        })
        .map(|r| FlaggedRecord {
            id: r.id,
            label: r.requirement.clone(),
            health: Health::Overdue,
        })
        .collect();
    ViewSummary {
        total: records.len(),
        groups,
        flagged,
    }
}

fn chart(records: &[Requirement], _ctx: &ViewContext) -> Vec<(String, u64)> {
    count_by(records, |r| r.status)
        .into_iter()
        .map(|(status, n)| (status.to_string(), u64::try_from(n).unwrap_or(u64::MAX)))
        .collect()
}

pub fn view() -> Box<dyn ViewModule> {
    let screen = Screen::new(
        "compliance",
        "Compliance log",
        seeds(),
        table(),
        FIELDS,
        summarize_view,
        chart,
    )
    .expect("compliance seed ids are unique");
    Box::new(screen)
}
