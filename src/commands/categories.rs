// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, TransactionType};
use crate::store;
use crate::utils::{maybe_print_json, parse_type, pretty_table};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").context("--name is required")?;
            let kind = parse_type(sub.get_one::<String>("type").context("--type is required")?)?;
            let cat = store::add_category(conn, name, kind, Utc::now())?;
            println!("Added {} category '{}' (id: {})", cat.r#type, cat.name, cat.id);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").context("--id is required")?;
            let cat = store::delete_category(conn, id.trim())?;
            println!("Removed category '{}'", cat.name);
        }
        _ => {}
    }
    Ok(())
}

/// Categories grouped expense first, then income, each in stored order.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Category>> {
    let only = sub
        .get_one::<String>("type")
        .map(|s| parse_type(s))
        .transpose()?;
    let categories = store::load_categories(conn);
    let mut data = Vec::with_capacity(categories.len());
    for kind in [TransactionType::Expense, TransactionType::Income] {
        if only.is_some_and(|o| o != kind) {
            continue;
        }
        data.extend(categories.iter().filter(|c| c.r#type == kind).cloned());
    }
    Ok(data)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|c| {
                vec![
                    c.id.clone(),
                    c.name.clone(),
                    c.r#type.to_string(),
                    if c.is_protected() { "yes" } else { "" }.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["ID", "Category", "Type", "Default"], rows));
    }
    Ok(())
}
