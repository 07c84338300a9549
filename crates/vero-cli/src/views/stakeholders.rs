//! Stakeholder map view.
//!
//! Who matters to the club, how much weight they carry, and how warm they
//! are. Low-support stakeholders are flagged so the board sees who needs a
//! conversation.

use crate::screen::{Screen, ViewContext, ViewModule, ViewRecord};
use serde::Serialize;
use std::fmt;
use vero_analytics::{FlaggedRecord, Health, ViewSummary, count_by, summarize};
use vero_core::{
    Align, Column, DraftModel, FieldErrors, FieldKind, FieldSpec, Record, RecordId, TableSpec,
    UnknownField, validate,
};

const ROLE_TOKENS: &[&str] = &["board", "staff", "coach", "parent", "sponsor", "community"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", FieldKind::Text),
    FieldSpec::required("role", "Role", FieldKind::Choice(ROLE_TOKENS)),
    FieldSpec::required("influence", "Influence (1-5)", FieldKind::Number),
    FieldSpec::required("support", "Support (1-5)", FieldKind::Number),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Board,
    Staff,
    Coach,
    Parent,
    Sponsor,
    Community,
}

impl Role {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::Staff => "staff",
            Self::Coach => "coach",
            Self::Parent => "parent",
            Self::Sponsor => "sponsor",
            Self::Community => "community",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_role(raw: &str) -> Result<Role, String> {
    match validate::parse_choice(raw, ROLE_TOKENS)? {
        "board" => Ok(Role::Board),
        "staff" => Ok(Role::Staff),
        "coach" => Ok(Role::Coach),
        "parent" => Ok(Role::Parent),
        "sponsor" => Ok(Role::Sponsor),
        _ => Ok(Role::Community),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Stakeholder {
    pub id: RecordId,
    pub name: String,
    pub role: Role,
    pub influence: f64,
    pub support: f64,
}

impl Record for Stakeholder {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct StakeholderDraft {
    name: String,
    role: String,
    influence: String,
    support: String,
}

pub struct StakeholderFields {
    name: String,
    role: Role,
    influence: f64,
    support: f64,
}

#[allow(clippy::cast_precision_loss)]
fn parse_scale(raw: &str) -> Result<f64, String> {
    validate::parse_int_in_range(raw, 1, 5).map(|v| v as f64)
}

impl DraftModel for StakeholderDraft {
    type Output = StakeholderFields;

    fn set_field(&mut self, name: &str, raw: &str) -> Result<(), UnknownField> {
        match name {
            "name" => self.name = raw.to_string(),
            "role" => self.role = raw.to_string(),
            "influence" => self.influence = raw.to_string(),
            "support" => self.support = raw.to_string(),
            other => return Err(UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "role" => Some(self.role.clone()),
            "influence" => Some(self.influence.clone()),
            "support" => Some(self.support.clone()),
            _ => None,
        }
    }

    fn validate(&self) -> Result<StakeholderFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.check("name", validate::require_text(&self.name), String::new());
        let role = errors.check("role", parse_role(&self.role), Role::Community);
        let influence = errors.check("influence", parse_scale(&self.influence), 1.0);
        let support = errors.check("support", parse_scale(&self.support), 1.0);
        if errors.is_empty() {
            Ok(StakeholderFields {
                name,
                role,
                influence,
                support,
            })
        } else {
            Err(errors)
        }
    }
}

impl ViewRecord for Stakeholder {
    type Fields = StakeholderFields;
    type Draft = StakeholderDraft;

    fn from_fields(id: RecordId, fields: StakeholderFields) -> Self {
        Self {
            id,
            name: fields.name,
            role: fields.role,
            influence: fields.influence,
            support: fields.support,
        }
    }

    fn draft(&self) -> StakeholderDraft {
        StakeholderDraft {
            name: self.name.clone(),
            role: self.role.to_string(),
            influence: format!("{:.0}", self.influence),
            support: format!("{:.0}", self.support),
        }
    }
}

fn table() -> TableSpec<Stakeholder> {
    TableSpec::new(vec![
        Column::new("Name", 18, Align::Left, |s: &Stakeholder| s.name.clone()),
        Column::new("Role", 10, Align::Left, |s: &Stakeholder| {
            s.role.to_string()
        }),
        Column::new("Influence", 9, Align::Right, |s: &Stakeholder| {
            format!("{:.0}", s.influence)
        }),
        Column::new("Support", 7, Align::Right, |s: &Stakeholder| {
            format!("{:.0}", s.support)
        }),
        Column::new("Id", 8, Align::Left, |s: &Stakeholder| s.id.to_string()),
    ])
}

fn seeds() -> Vec<Stakeholder> {
    let row = |n: u32, name: &str, role: Role, influence: f64, support: f64| Stakeholder {
        id: RecordId::seed(n),
        name: name.to_string(),
        role,
        influence,
        support,
    };
    vec![
        row(1, "Milan Železnik", Role::Board, 5.0, 4.0),
        row(2, "Petra Dolenc", Role::Board, 4.0, 5.0),
        row(3, "Gregor Mlakar", Role::Coach, 3.0, 4.0),
        row(4, "Alenka Bizjak", Role::Sponsor, 5.0, 2.0),
        row(5, "Parents' council", Role::Parent, 3.0, 3.0),
        row(6, "City sports office", Role::Community, 4.0, 2.0),
        row(7, "Katja Rupnik", Role::Staff, 2.0, 5.0),
    ]
}

fn summarize_view(records: &[Stakeholder], ctx: &ViewContext) -> ViewSummary {
    let groups = summarize(
        records,
        |s| s.role.to_string(),
        Some(&|s: &Stakeholder| s.support),
    );
    let flagged = records
        .iter()
        .filter(|s| s.support <= ctx.thresholds.support_floor)
        .map(|s| FlaggedRecord {
            id: s.id,
            label: s.name.clone(),
            health: Health::AtRisk,
        })
        .collect();
    ViewSummary {
        total: records.len(),
        groups,
        flagged,
    }
}

fn chart(records: &[Stakeholder], _ctx: &ViewContext) -> Vec<(String, u64)> {
    count_by(records, |s| s.role)
        .into_iter()
        .map(|(role, n)| (role.to_string(), u64::try_from(n).unwrap_or(u64::MAX)))
        .collect()
}

pub fn view() -> Box<dyn ViewModule> {
    let screen = Screen::new(
        "stakeholders",
        "Stakeholder map",
        seeds(),
        table(),
        FIELDS,
        summarize_view,
        chart,
    )
    .expect("stakeholder seed ids are unique");
    Box::new(screen)
}
