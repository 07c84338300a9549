//! Athlete development pathway view.
//!
//! Tracks each athlete's position on the club pathway and flags anyone
//! whose progress has fallen under the configured floor.

use crate::screen::{Screen, ViewContext, ViewModule, ViewRecord};
use serde::Serialize;
use std::fmt;
use vero_analytics::{FlaggedRecord, Health, ViewSummary, classify_score, count_by, summarize};
use vero_core::{
    Align, Column, DraftModel, FieldErrors, FieldKind, FieldSpec, Record, RecordId, TableSpec,
    UnknownField, validate,
};

const STAGE_TOKENS: &[&str] = &["foundation", "development", "performance", "elite"];
const AGE_TOKENS: &[&str] = &["u12", "u14", "u16", "u18", "senior"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", FieldKind::Text),
    FieldSpec::required("age_group", "Age group", FieldKind::Choice(AGE_TOKENS)),
    FieldSpec::required("stage", "Stage", FieldKind::Choice(STAGE_TOKENS)),
    FieldSpec::required("progress", "Progress (0-100)", FieldKind::Number),
];

/// Pathway stage, ordered from entry to elite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Foundation,
    Development,
    Performance,
    Elite,
}

impl Stage {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Foundation => "foundation",
            Self::Development => "development",
            Self::Performance => "performance",
            Self::Elite => "elite",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_stage(raw: &str) -> Result<Stage, String> {
    match validate::parse_choice(raw, STAGE_TOKENS)? {
        "foundation" => Ok(Stage::Foundation),
        "development" => Ok(Stage::Development),
        "performance" => Ok(Stage::Performance),
        _ => Ok(Stage::Elite),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Athlete {
    pub id: RecordId,
    pub name: String,
    pub age_group: &'static str,
    pub stage: Stage,
    pub progress: f64,
}

impl Record for Athlete {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct AthleteDraft {
    name: String,
    age_group: String,
    stage: String,
    progress: String,
}

pub struct AthleteFields {
    name: String,
    age_group: &'static str,
    stage: Stage,
    progress: f64,
}

impl DraftModel for AthleteDraft {
    type Output = AthleteFields;

    fn set_field(&mut self, name: &str, raw: &str) -> Result<(), UnknownField> {
        match name {
            "name" => self.name = raw.to_string(),
            "age_group" => self.age_group = raw.to_string(),
            "stage" => self.stage = raw.to_string(),
            "progress" => self.progress = raw.to_string(),
            other => return Err(UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "age_group" => Some(self.age_group.clone()),
            "stage" => Some(self.stage.clone()),
            "progress" => Some(self.progress.clone()),
            _ => None,
        }
    }

    fn validate(&self) -> Result<AthleteFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.check("name", validate::require_text(&self.name), String::new());
        let age_group = errors.check(
            "age_group",
            validate::parse_choice(&self.age_group, AGE_TOKENS),
            AGE_TOKENS[0],
        );
        let stage = errors.check("stage", parse_stage(&self.stage), Stage::Foundation);
        let progress = errors.check(
            "progress",
            validate::parse_number_in_range(&self.progress, 0.0, 100.0),
            0.0,
        );
        if errors.is_empty() {
            Ok(AthleteFields {
                name,
                age_group,
                stage,
                progress,
            })
        } else {
            Err(errors)
        }
    }
}

impl ViewRecord for Athlete {
    type Fields = AthleteFields;
    type Draft = AthleteDraft;

    fn from_fields(id: RecordId, fields: AthleteFields) -> Self {
        Self {
            id,
            name: fields.name,
            age_group: fields.age_group,
            stage: fields.stage,
            progress: fields.progress,
        }
    }

    fn draft(&self) -> AthleteDraft {
        AthleteDraft {
            name: self.name.clone(),
            age_group: self.age_group.to_string(),
            stage: self.stage.to_string(),
            progress: self.progress.to_string(),
        }
    }
}

fn table() -> TableSpec<Athlete> {
    TableSpec::new(vec![
        Column::new("Name", 16, Align::Left, |a: &Athlete| a.name.clone()),
        Column::new("Age", 6, Align::Left, |a: &Athlete| {
            a.age_group.to_string()
        }),
        Column::new("Stage", 12, Align::Left, |a: &Athlete| a.stage.to_string()),
        Column::new("Progress", 8, Align::Right, |a: &Athlete| {
            format!("{:.0}", a.progress)
        }),
        Column::new("Id", 8, Align::Left, |a: &Athlete| a.id.to_string()),
    ])
}

fn seeds() -> Vec<Athlete> {
    let row = |n: u32, name: &str, age_group: &'static str, stage: Stage, progress: f64| Athlete {
        id: RecordId::seed(n),
        name: name.to_string(),
        age_group,
        stage,
        progress,
    };
    vec![
        row(1, "Luka Vidmar", "u14", Stage::Foundation, 52.0),
        row(2, "Ana Kovač", "u16", Stage::Development, 68.0),
        row(3, "Marko Horvat", "u18", Stage::Performance, 74.0),
        row(4, "Iva Novak", "senior", Stage::Elite, 91.0),
        row(5, "Nejc Zupan", "u12", Stage::Foundation, 28.0),
        row(6, "Sara Oblak", "u16", Stage::Development, 61.0),
        row(7, "Tine Kranjc", "u18", Stage::Performance, 33.0),
        row(8, "Maja Petek", "u14", Stage::Foundation, 47.0),
    ]
}

fn summarize_view(records: &[Athlete], ctx: &ViewContext) -> ViewSummary {
    let groups = summarize(
        records,
        |a| a.stage.to_string(),
        Some(&|a: &Athlete| a.progress),
    );
    let flagged = records
        .iter()
        .filter(|a| classify_score(a.progress, ctx.thresholds.progress_floor) == Health::AtRisk)
        .map(|a| FlaggedRecord {
            id: a.id,
            label: a.name.clone(),
            health: Health::AtRisk,
        })
        .collect();
    ViewSummary {
        total: records.len(),
        groups,
        flagged,
    }
}

fn chart(records: &[Athlete], _ctx: &ViewContext) -> Vec<(String, u64)> {
    count_by(records, |a| a.stage)
        .into_iter()
        .map(|(stage, n)| (stage.to_string(), u64::try_from(n).unwrap_or(u64::MAX)))
        .collect()
}

pub fn view() -> Box<dyn ViewModule> {
    let screen = Screen::new(
        "athletes",
        "Athlete pathways",
        seeds(),
        table(),
        FIELDS,
        summarize_view,
        chart,
    )
    .expect("athlete seed ids are unique");
    Box::new(screen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;
    use crate::screen::FormResult;
    use chrono::NaiveDate;

    fn ctx() -> ViewContext {
        ViewContext {
            today: NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date"),
            thresholds: Thresholds::default(),
        }
    }

    fn empty_view() -> Box<dyn ViewModule> {
        let screen = Screen::new(
            "athletes",
            "Athlete pathways",
            Vec::new(),
            table(),
            FIELDS,
            summarize_view,
            chart,
        )
        .expect("no seeds, no duplicates");
        Box::new(screen)
    }

    #[test]
    fn add_then_aggregate_counts_one_for_the_new_stage() {
        let mut view = empty_view();
        let fields = [
            ("name".to_string(), "Luka".to_string()),
            ("age_group".to_string(), "u14".to_string()),
            ("stage".to_string(), "foundation".to_string()),
            ("progress".to_string(), "50".to_string()),
        ];
        let result = view.create(&fields).expect("fields are known");
        assert!(matches!(result, FormResult::Created(_)));

        let summary = view.summary(&ctx());
        assert_eq!(summary.total, 1);
        let foundation = summary
            .groups
            .iter()
            .find(|g| g.key == "foundation")
            .expect("foundation group");
        assert_eq!(foundation.count, 1);
        assert!(!summary.groups.iter().any(|g| g.key == "elite"));
    }

    #[test]
    fn missing_required_field_rejects_without_growing_the_store() {
        let mut view = empty_view();
        let fields = [
            ("stage".to_string(), "foundation".to_string()),
            ("progress".to_string(), "50".to_string()),
        ];
        let result = view.create(&fields).expect("fields are known");
        assert_eq!(result, FormResult::Rejected);
        assert_eq!(view.len(), 0);
        assert!(view.form_errors().get("name").is_some());
    }

    #[test]
    fn progress_floor_drives_at_risk_flags() {
        let view = view();
        let summary = view.summary(&ctx());
        let flagged: Vec<&str> = summary.flagged.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(flagged, ["Nejc Zupan", "Tine Kranjc"]);
    }

    #[test]
    fn stage_tokens_validate_case_insensitively() {
        assert_eq!(parse_stage("Elite"), Ok(Stage::Elite));
        assert!(parse_stage("retired").is_err());
    }
}
