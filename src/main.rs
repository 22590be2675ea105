// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use expense_tracker::{cli, commands, db, logging, store};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    logging::init(matches.get_count("verbose"));

    let db_override = matches.get_one::<PathBuf>("db").map(|p| p.as_path());
    let conn = db::open_or_init(db_override)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            store::seed_defaults(&conn)?;
            println!(
                "Store initialized at {}",
                db::resolve_path(db_override)?.display()
            );
        }
        Some(("tx", sub)) => commands::transactions::handle(&conn, sub)?,
        Some(("category", sub)) => commands::categories::handle(&conn, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
