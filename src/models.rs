// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(LedgerError::InvalidType(other.to_string())),
        }
    }
}

/// A single dated money movement.
///
/// Records are replaced whole on edit; `id` never changes once assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate, // serialized as YYYY-MM-DD
    pub r#type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.r#type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.r#type == TransactionType::Expense
    }
}

/// Transaction payload before an id has been assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub r#type: TransactionType,
    pub note: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount(self.amount));
        }
        if self.category.trim().is_empty() {
            return Err(LedgerError::EmptyCategory);
        }
        Ok(())
    }

    pub fn into_transaction(self, id: String) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            category: self.category.trim().to_string(),
            date: self.date,
            r#type: self.r#type,
            note: self
                .note
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        }
    }
}

/// Field-by-field replacement for an existing transaction. `None` keeps the
/// current value; `note: Some(String::new())` clears the note.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub r#type: Option<TransactionType>,
    pub note: Option<String>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self == &TransactionPatch::default()
    }

    /// Returns the merged record; `current` is left untouched.
    pub fn apply(&self, current: &Transaction) -> Transaction {
        let mut next = current.clone();
        if let Some(amount) = self.amount {
            next.amount = amount;
        }
        if let Some(ref category) = self.category {
            next.category = category.trim().to_string();
        }
        if let Some(date) = self.date {
            next.date = date;
        }
        if let Some(t) = self.r#type {
            next.r#type = t;
        }
        if let Some(ref note) = self.note {
            let note = note.trim();
            next.note = if note.is_empty() {
                None
            } else {
                Some(note.to_string())
            };
        }
        next
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub r#type: TransactionType,
}

/// Ids reserved for the built-in categories.
pub const PROTECTED_CATEGORY_IDS: [&str; 10] = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"];

impl Category {
    pub fn is_protected(&self) -> bool {
        PROTECTED_CATEGORY_IDS.contains(&self.id.as_str())
    }
}

const DEFAULT_CATEGORY_SEED: [(&str, &str, TransactionType); 10] = [
    ("1", "Food", TransactionType::Expense),
    ("2", "Travel", TransactionType::Expense),
    ("3", "Rent", TransactionType::Expense),
    ("4", "Shopping", TransactionType::Expense),
    ("5", "Utilities", TransactionType::Expense),
    ("6", "Others", TransactionType::Expense),
    ("7", "Salary", TransactionType::Income),
    ("8", "Freelance", TransactionType::Income),
    ("9", "Investment", TransactionType::Income),
    ("10", "Other Income", TransactionType::Income),
];

pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORY_SEED
        .iter()
        .map(|(id, name, t)| Category {
            id: id.to_string(),
            name: name.to_string(),
            r#type: *t,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub name: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub month: String, // YYYY-MM
    pub income: Decimal,
    pub expenses: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub day_label: String,
    pub income: Decimal,
    pub expenses: Decimal,
}

/// Criteria for the transaction list. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub category: Option<String>,
    pub r#type: Option<TransactionType>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn is_active(&self) -> bool {
        self != &TransactionFilter::default()
    }

    pub fn matches(&self, t: &Transaction) -> bool {
        if let Some(ref category) = self.category {
            if &t.category != category {
                return false;
            }
        }
        if let Some(kind) = self.r#type {
            if t.r#type != kind {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if t.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if t.date > to {
                return false;
            }
        }
        true
    }
}
