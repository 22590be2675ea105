// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, Transaction};
use crate::store;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use std::collections::{HashMap, HashSet};

/// Issue kind and detail, one row per finding.
pub fn check(transactions: &[Transaction], categories: &[Category]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Category text with no matching category of the same type
    let known: HashSet<(&str, _)> = categories
        .iter()
        .map(|c| (c.name.as_str(), c.r#type))
        .collect();
    let mut reported = HashSet::new();
    for t in transactions {
        let key = (t.category.as_str(), t.r#type);
        if !known.contains(&key) && reported.insert(key) {
            rows.push(vec![
                "orphan_category".into(),
                format!("{} ({})", t.category, t.r#type),
            ]);
        }
    }

    // 2) Ids used by more than one transaction
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for t in transactions {
        *seen.entry(t.id.as_str()).or_insert(0) += 1;
    }
    let mut dupes: Vec<_> = seen.into_iter().filter(|(_, n)| *n > 1).collect();
    dupes.sort();
    for (id, n) in dupes {
        rows.push(vec!["duplicate_id".into(), format!("{} x{}", id, n)]);
    }

    rows
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = check(
        &store::load_transactions(conn),
        &store::load_categories(conn),
    );
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        tracing::warn!(issues = rows.len(), "doctor found issues");
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
