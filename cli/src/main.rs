// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

mod top;

use std::io;
use std::io::BufWriter;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Parser;
use clap::Subcommand;
use env_logger::Env;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "leaderboard", version, about = "Approximate top-K leaderboards over event logs", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (-q)
    #[arg(short = 'q', long, global = true, action = ArgAction::Count)]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank the most active entities of an event log
    Top(top::TopArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Top(args) => {
            let output = Box::new(BufWriter::new(io::stdout().lock()));
            top::run(args, output, top::build_app)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("{err:?}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, quiet: u8) {
    let _ = logger(Env::default(), verbose, quiet).try_init();
}

/// The verbosity flags pick the level unless the environment sets a filter.
fn logger(env: Env<'_>, verbose: u8, quiet: u8) -> env_logger::Builder {
    let level = log_level(verbose, quiet);
    let mut builder = env_logger::Builder::from_env(env.default_filter_or(level.as_str()));
    builder.format_timestamp_millis();
    builder
}

fn log_level(verbose: u8, quiet: u8) -> LevelFilter {
    if quiet > 0 {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
