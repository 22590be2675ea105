// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

use crate::db::DB_ENV;

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn type_arg(required: bool) -> Arg {
    Arg::new("type")
        .long("type")
        .value_name("TYPE")
        .required(required)
        .help("income or expense")
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and browse transactions")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD").required(true))
                .arg(Arg::new("amount").long("amount").value_name("AMOUNT").required(true))
                .arg(Arg::new("category").long("category").value_name("NAME").required(true))
                .arg(type_arg(true))
                .arg(Arg::new("note").long("note").value_name("TEXT")),
        )
        .subcommand(json_args(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(type_arg(false))
                .arg(Arg::new("category").long("category").value_name("NAME"))
                .arg(Arg::new("from").long("from").value_name("YYYY-MM-DD"))
                .arg(Arg::new("to").long("to").value_name("YYYY-MM-DD"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_name("N")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Replace fields of a transaction")
                .arg(Arg::new("id").long("id").value_name("ID").required(true))
                .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
                .arg(Arg::new("amount").long("amount").value_name("AMOUNT"))
                .arg(Arg::new("category").long("category").value_name("NAME"))
                .arg(type_arg(false))
                .arg(
                    Arg::new("note")
                        .long("note")
                        .value_name("TEXT")
                        .help("New note; pass an empty string to clear"),
                ),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(Arg::new("id").long("id").value_name("ID").required(true)),
        )
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage categories")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a category")
                .arg(Arg::new("name").long("name").value_name("NAME").required(true))
                .arg(type_arg(true)),
        )
        .subcommand(json_args(
            Command::new("list")
                .about("List categories")
                .arg(type_arg(false)),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a user-defined category")
                .arg(Arg::new("id").long("id").value_name("ID").required(true)),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Summaries and trends")
        .subcommand_required(true)
        .subcommand(json_args(
            Command::new("summary").about("Total income, expenses and balance"),
        ))
        .subcommand(json_args(
            Command::new("breakdown").about("Expenses per category"),
        ))
        .subcommand(json_args(
            Command::new("monthly").about("Income and expenses per month"),
        ))
        .subcommand(json_args(
            Command::new("recent")
                .about("Most recent transactions")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_name("N")
                        .default_value("5")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(json_args(
            Command::new("weekly")
                .about("Income and expenses for the last seven days")
                .arg(
                    Arg::new("today")
                        .long("today")
                        .value_name("YYYY-MM-DD")
                        .help("Last day of the window (defaults to the local date)"),
                ),
        ))
}

pub fn build_cli() -> Command {
    Command::new("expense-tracker")
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .arg(
            Arg::new("db")
                .long("db")
                .value_name("PATH")
                .env(DB_ENV)
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Store file (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("More log output (-v info, -vv debug)"),
        )
        .subcommand(Command::new("init").about("Create the store and seed default categories"))
        .subcommand(tx_cmd())
        .subcommand(category_cmd())
        .subcommand(report_cmd())
        .subcommand(Command::new("doctor").about("Check the store for inconsistencies"))
}
