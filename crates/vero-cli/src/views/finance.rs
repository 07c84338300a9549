//! Financial scenario view.
//!
//! Budget lines per category with a variance percentage against plan.
//! Shares are computed over amounts, not row counts, so the summary reads
//! as a budget breakdown.

use crate::screen::{Screen, ViewContext, ViewModule, ViewRecord};
use serde::Serialize;
use std::fmt;
use vero_analytics::{
    FlaggedRecord, GroupSummary, Health, ViewSummary, count_by, mean_by, share_pct, sum_by,
};
use vero_core::{
    Align, Column, DraftModel, FieldErrors, FieldKind, FieldSpec, Record, RecordId, TableSpec,
    UnknownField, validate,
};

const CATEGORY_TOKENS: &[&str] = &["revenue", "operations", "facilities", "development"];

/// Variance below this percentage flags the line.
const VARIANCE_FLOOR: f64 = -10.0;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("item", "Line item", FieldKind::Text),
    FieldSpec::required("category", "Category", FieldKind::Choice(CATEGORY_TOKENS)),
    FieldSpec::required("amount", "Amount (EUR)", FieldKind::Number),
    FieldSpec::required("variance", "Variance vs plan (%)", FieldKind::Number),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Revenue,
    Operations,
    Facilities,
    Development,
}

impl Category {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Operations => "operations",
            Self::Facilities => "facilities",
            Self::Development => "development",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_category(raw: &str) -> Result<Category, String> {
    match validate::parse_choice(raw, CATEGORY_TOKENS)? {
        "revenue" => Ok(Category::Revenue),
        "operations" => Ok(Category::Operations),
        "facilities" => Ok(Category::Facilities),
        _ => Ok(Category::Development),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetLine {
    pub id: RecordId,
    pub item: String,
    pub category: Category,
    pub amount: f64,
    pub variance_pct: f64,
}

impl Record for BudgetLine {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct BudgetDraft {
    item: String,
    category: String,
    amount: String,
    variance: String,
}

pub struct BudgetFields {
    item: String,
    category: Category,
    amount: f64,
    variance_pct: f64,
}

impl DraftModel for BudgetDraft {
    type Output = BudgetFields;

    fn set_field(&mut self, name: &str, raw: &str) -> Result<(), UnknownField> {
        match name {
            "item" => self.item = raw.to_string(),
            "category" => self.category = raw.to_string(),
            "amount" => self.amount = raw.to_string(),
            "variance" => self.variance = raw.to_string(),
            other => return Err(UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "item" => Some(self.item.clone()),
            "category" => Some(self.category.clone()),
            "amount" => Some(self.amount.clone()),
            "variance" => Some(self.variance.clone()),
            _ => None,
        }
    }

    fn validate(&self) -> Result<BudgetFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        let item = errors.check("item", validate::require_text(&self.item), String::new());
        let category = errors.check(
            "category",
            parse_category(&self.category),
            Category::Operations,
        );
        let amount = errors.check(
            "amount",
            validate::parse_number_in_range(&self.amount, 0.0, 5_000_000.0),
            0.0,
        );
        let variance_pct = errors.check(
            "variance",
            validate::parse_number_in_range(&self.variance, -100.0, 100.0),
            0.0,
        );
        if errors.is_empty() {
            Ok(BudgetFields {
                item,
                category,
                amount,
                variance_pct,
            })
        } else {
            Err(errors)
        }
    }
}

impl ViewRecord for BudgetLine {
    type Fields = BudgetFields;
    type Draft = BudgetDraft;

    fn from_fields(id: RecordId, fields: BudgetFields) -> Self {
        Self {
            id,
            item: fields.item,
            category: fields.category,
            amount: fields.amount,
            variance_pct: fields.variance_pct,
        }
    }

    fn draft(&self) -> BudgetDraft {
        BudgetDraft {
            item: self.item.clone(),
            category: self.category.to_string(),
            amount: self.amount.to_string(),
            variance: self.variance_pct.to_string(),
        }
    }
}

fn table() -> TableSpec<BudgetLine> {
    TableSpec::new(vec![
        Column::new("Item", 20, Align::Left, |l: &BudgetLine| l.item.clone()),
        Column::new("Category", 12, Align::Left, |l: &BudgetLine| {
            l.category.to_string()
        }),
        Column::new("Amount", 10, Align::Right, |l: &BudgetLine| {
            format!("{:.0}", l.amount)
        }),
        Column::new("Var %", 6, Align::Right, |l: &BudgetLine| {
            format!("{:+.1}", l.variance_pct)
        }),
        Column::new("Id", 8, Align::Left, |l: &BudgetLine| l.id.to_string()),
    ])
}

fn seeds() -> Vec<BudgetLine> {
    let row = |n: u32, item: &str, category: Category, amount: f64, variance_pct: f64| BudgetLine {
        id: RecordId::seed(n),
        item: item.to_string(),
        category,
        amount,
        variance_pct,
    };
    vec![
        row(1, "Memberships", Category::Revenue, 420_000.0, 4.2),
        row(2, "Sponsorships", Category::Revenue, 310_000.0, -6.5),
        row(3, "Coaching salaries", Category::Operations, 280_000.0, 1.0),
        row(4, "Travel and fixtures", Category::Operations, 95_000.0, -14.0),
        row(5, "Hall rental", Category::Facilities, 120_000.0, 2.3),
        row(6, "Court resurfacing", Category::Facilities, 45_000.0, -18.8),
        row(7, "Youth program", Category::Development, 88_000.0, 0.0),
    ]
}

fn summarize_view(records: &[BudgetLine], _ctx: &ViewContext) -> ViewSummary {
    let sums = sum_by(records, |l| l.category, |l| l.amount);
    let counts = count_by(records, |l| l.category);
    let means = mean_by(records, |l| l.category, |l| l.variance_pct);
    let total: f64 = sums.values().sum();

    let groups = sums
        .iter()
        .map(|(category, sum)| GroupSummary {
            key: category.to_string(),
            count: counts.get(category).copied().unwrap_or(0),
            share_pct: share_pct(*sum, total),
            mean: means.get(category).copied(),
        })
        .collect();

    let flagged = records
        .iter()
        .filter(|l| l.variance_pct < VARIANCE_FLOOR)
        .map(|l| FlaggedRecord {
            id: l.id,
            label: l.item.clone(),
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
fn chart(records: &[BudgetLine], _ctx: &ViewContext) -> Vec<(String, u64)> {
    sum_by(records, |l| l.category, |l| l.amount / 1000.0)
        .into_iter()
        .map(|(category, sum)| (category.to_string(), sum.round().max(0.0) as u64))
        .collect()
}

pub fn view() -> Box<dyn ViewModule> {
    let screen = Screen::new(
        "finance",
        "Financial scenarios",
        seeds(),
        table(),
        FIELDS,
        summarize_view,
        chart,
    )
    .expect("finance seed ids are unique");
    Box::new(screen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;
    use chrono::NaiveDate;

    fn ctx() -> ViewContext {
        ViewContext {
            today: NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date"),
            thresholds: Thresholds::default(),
        }
    }

    #[test]
    fn shares_are_computed_over_amounts_not_row_counts() {
        let records = vec![
            BudgetLine {
                id: RecordId::seed(1),
                item: "A".to_string(),
                category: Category::Revenue,
                amount: 300.0,
                variance_pct: 0.0,
            },
            BudgetLine {
                id: RecordId::seed(2),
                item: "B".to_string(),
                category: Category::Operations,
                amount: 100.0,
                variance_pct: 0.0,
            },
        ];
        let summary = summarize_view(&records, &ctx());
        let revenue = summary
            .groups
            .iter()
            .find(|g| g.key == "revenue")
            .expect("revenue group");
        assert_eq!(revenue.share_pct, 75.0);
        assert_eq!(revenue.count, 1);
    }

    #[test]
    fn deep_negative_variance_is_flagged() {
        let summary = summarize_view(&seeds(), &ctx());
        let flagged: Vec<&str> = summary.flagged.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(flagged, ["Travel and fixtures", "Court resurfacing"]);
    }

    #[test]
    fn empty_view_summarizes_to_zero_without_dividing() {
        let summary = summarize_view(&[], &ctx());
        assert_eq!(summary.total, 0);
        assert!(summary.groups.is_empty());
        assert!(summary.flagged.is_empty());
    }

    #[test]
    fn amount_must_be_non_negative() {
        let mut draft = BudgetDraft::default();
        draft.set_field("item", "Test").expect("known field");
        draft.set_field("category", "revenue").expect("known field");
        draft.set_field("amount", "-50").expect("known field");
        draft.set_field("variance", "0").expect("known field");
        let errors = draft.validate().expect_err("negative amount");
        assert!(errors.get("amount").is_some());
    }
}
