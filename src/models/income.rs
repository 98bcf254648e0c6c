//! Income records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::expense::RecordValidationError;
use super::ids::IncomeId;
use super::money::Money;

/// A single inflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub id: IncomeId,
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    /// Free-form label such as "salary" or "freelance"
    #[serde(default)]
    pub source: String,
}

impl IncomeRecord {
    pub fn from_new(new: NewIncome) -> Self {
        Self {
            id: IncomeId::new(),
            description: new.description,
            amount: new.amount,
            date: new.date,
            source: new.source,
        }
    }

    pub fn apply(&mut self, patch: IncomePatch) {
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(source) = patch.source {
            self.source = source;
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.description.trim().is_empty() {
            return Err(RecordValidationError::EmptyDescription);
        }
        if self.amount.is_negative() {
            return Err(RecordValidationError::NegativeAmount);
        }
        Ok(())
    }
}

/// Income fields supplied by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct NewIncome {
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub source: String,
}

impl NewIncome {
    pub fn new(description: impl Into<String>, amount: Money, date: NaiveDate) -> Self {
        Self {
            description: description.into(),
            amount,
            date,
            source: String::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

/// Partial update for an income record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncomePatch {
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub source: Option<String>,
}

impl IncomePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salary() -> IncomeRecord {
        IncomeRecord::from_new(
            NewIncome::new(
                "Salary",
                Money::from_units(1000),
                NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            )
            .with_source("employer"),
        )
    }

    #[test]
    fn test_from_new() {
        let income = salary();
        assert_eq!(income.amount.cents(), 100000);
        assert_eq!(income.source, "employer");
        assert!(income.validate().is_ok());
    }

    #[test]
    fn test_apply_patch_merges_fields() {
        let mut income = salary();
        let id = income.id;
        income.apply(IncomePatch {
            amount: Some(Money::from_units(1200)),
            ..Default::default()
        });
        assert_eq!(income.id, id);
        assert_eq!(income.amount, Money::from_units(1200));
        assert_eq!(income.description, "Salary");
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut income = salary();
        income.amount = Money::from_cents(-100);
        assert_eq!(income.validate(), Err(RecordValidationError::NegativeAmount));
    }

    #[test]
    fn test_missing_source_defaults_empty() {
        let json = r#"{"id":"550e8400-e29b-41d4-a716-446655440000","description":"Gift","amount":5000,"date":"2025-02-01"}"#;
        let income: IncomeRecord = serde_json::from_str(json).unwrap();
        assert!(income.source.is_empty());
    }
}
