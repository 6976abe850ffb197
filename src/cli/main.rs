use std::{path::PathBuf, time::Instant};

use clap::{value_parser, Arg, ArgAction, Command};

use mink_sat::{
    builder,
    config::Config,
    context::{Context, Statistics},
    structures::literal::VariableValue,
    types::{err, gen::Report},
};

fn cli() -> Command {
    Command::new("mink_sat")
        .about("Determines whether a DIMACS CNF formula is satisfiable or unsatisfiable")
        .arg(
            Arg::new("path")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("The formula to solve: a .cnf file, optionally .gz or .xz compressed."),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only print the result line."),
        )
}

fn main() {
    env_logger::init();

    let start_time = Instant::now();
    let matches = cli().get_matches();

    let path = matches
        .get_one::<PathBuf>("path")
        .expect("path is required")
        .clone();
    let quiet = matches.get_flag("quiet");

    let mut context = match builder::context_from_path(&path, Config::default()) {
        Ok(context) => context,
        Err(err::Build::Unsatisfiable) => {
            println!("{}", Report::Unsatisfiable);
            std::process::exit(Report::Unsatisfiable.exit_code());
        }
        Err(err::Build::Parse(parse_error)) => {
            eprintln!("Failed to parse {}: {parse_error:?}", path.display());
            std::process::exit(1);
        }
        Err(err::Build::Io(io_error)) => {
            eprintln!("Failed to read {}: {io_error}", path.display());
            std::process::exit(1);
        }
    };

    if !quiet {
        print_problem_banner(&context, start_time.elapsed().as_secs_f64());
    }

    let report = context.solve();

    if !quiet {
        print_summary(context.statistics(), start_time.elapsed().as_secs_f64());
    }

    print_result(&context, report);
    std::process::exit(report.exit_code());
}

fn print_problem_banner(context: &Context, parse_time: f64) {
    println!("============================[ Problem Statistics ]=============================");
    println!("|                                                                             |");
    println!("|  Number of variables:  {:>12}                                         |", context.variable_count());
    println!("|  Number of clauses:    {:>12}                                         |", context.clause_count());
    println!("|  Parse time:           {:>12.6}                                         |", parse_time);
    println!("|                                                                             |");
}

fn print_summary(statistics: &Statistics, elapsed: f64) {
    println!("============================[      Summary      ]==============================");
    println!("|                                                                             |");
    println!("|  #Restarts:            {:>12}                                         |", statistics.restarts);
    println!("|  #Conflicts:           {:>12} ({:>12.3}/sec)                      |", statistics.conflicts, statistics.conflicts as f64 / elapsed);
    println!("|  #Decisions:           {:>12}                                         |", statistics.decisions);
    println!("|  #Propagations:        {:>12} ({:>12.3}/sec)                      |", statistics.propagations, statistics.propagations as f64 / elapsed);
    println!("|  Total time:           {:>12.6}                                         |", elapsed);
    println!("|                                                                             |");
    println!("===============================================================================");
}

fn print_result(context: &Context, report: Report) {
    match report {
        Report::Satisfiable => {
            print!("{report}");
            for (variable, value) in context.model().iter().enumerate() {
                debug_assert!(!value.is_unset());
                match value {
                    VariableValue::True => print!(" {}", variable + 1),
                    _ => print!(" -{}", variable + 1),
                }
            }
            println!();
        }
        _ => println!("{report}"),
    }
}
