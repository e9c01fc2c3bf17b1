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

//! The `top` command.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use clap::Args;
use leaderboard::app::App;
use leaderboard::app::Leaderboard;
use leaderboard::config::Config;
use leaderboard::config::DEFAULT_K;
use leaderboard::config::DEFAULT_SEED;
use leaderboard::config::SketchConfig;
use leaderboard::counter::build_counter;
use leaderboard::error::Error;
use leaderboard::error::ErrorKind;

// Multi-word flags also accept their underscore spelling, e.g. `--events_file`.
#[derive(Args, Debug, Clone)]
pub struct TopArgs {
    /// Number of leaderboard participants
    #[arg(long, default_value_t = DEFAULT_K)]
    pub k: usize,

    /// Event types to count, comma separated
    #[arg(long, alias = "event_types", value_delimiter = ',', default_values = ["PushEvent", "PullRequestEvent"])]
    pub event_types: Vec<String>,

    /// Events file column holding the event type
    #[arg(long, alias = "events_event_type_column_index", default_value_t = 1)]
    pub events_event_type_column_index: usize,

    /// Events file column holding the counted entity id
    #[arg(long, alias = "events_entity_column_index", default_value_t = 2)]
    pub events_entity_column_index: usize,

    /// Entity file column holding the entity id
    #[arg(long, alias = "entity_entity_column_index", default_value_t = 0)]
    pub entity_entity_column_index: usize,

    /// Entity file column holding the display name
    #[arg(long, alias = "entity_name_column_index", default_value_t = 1)]
    pub entity_name_column_index: usize,

    /// Events file (CSV)
    #[arg(long, alias = "events_file", default_value = "./data/events.csv")]
    pub events_file: PathBuf,

    /// Entity file mapping ids to names (CSV), e.g. actors.csv or repos.csv
    #[arg(long, alias = "entity_file", default_value = "./data/actors.csv")]
    pub entity_file: PathBuf,

    /// Sketch worker threads; more than one makes rankings vary between runs
    #[arg(long, default_value_t = 1, value_parser = positive)]
    pub workers: usize,

    /// Sketch buckets per row
    #[arg(long, default_value_t = 2048, value_parser = positive)]
    pub width: usize,

    /// Sketch rows
    #[arg(long, default_value_t = 5, value_parser = positive)]
    pub depth: usize,

    /// Sketch decay base, in (0, 1]
    #[arg(long, default_value_t = 0.9, value_parser = decay)]
    pub decay: f64,

    /// Seed of the sketch's decay coin
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

impl TopArgs {
    fn config(&self) -> Config {
        Config {
            k: self.k,
            events_entity_column: self.events_entity_column_index,
            events_event_type_column: self.events_event_type_column_index,
            entity_id_column: self.entity_entity_column_index,
            entity_name_column: self.entity_name_column_index,
            event_types: self.event_types.clone(),
        }
    }

    fn sketch_config(&self) -> SketchConfig {
        SketchConfig {
            workers: self.workers,
            width: self.width,
            depth: self.depth,
            decay: self.decay,
            seed: self.seed,
        }
    }
}

/// Open inputs handed to the application factory.
pub struct Inputs {
    pub events: File,
    pub entities: File,
    pub output: Box<dyn Write>,
}

/// Opens the input files, builds the application with `build` and runs it.
pub fn run<F, A>(args: TopArgs, output: Box<dyn Write>, build: F) -> Result<(), Error>
where
    F: FnOnce(Config, SketchConfig, Inputs) -> A,
    A: App,
{
    let events = open(&args.events_file, "events")?;
    let entities = open(&args.entity_file, "entity")?;
    log::info!(
        "ranking top {} of {} by {:?}",
        args.k,
        args.events_file.display(),
        args.event_types
    );

    let app = build(
        args.config(),
        args.sketch_config(),
        Inputs {
            events,
            entities,
            output,
        },
    );
    app.run()
}

/// Builds the CSV leaderboard backed by a HeavyKeeper counter.
pub fn build_app(config: Config, sketch: SketchConfig, inputs: Inputs) -> impl App {
    let counter = build_counter(config.k, &sketch);
    Leaderboard::from_csv(config, counter, inputs.events, inputs.entities, inputs.output)
}

fn open(path: &Path, what: &str) -> Result<File, Error> {
    File::open(path).map_err(|err| {
        Error::new(
            ErrorKind::Io,
            format!("failed to open {what} file: {err}"),
        )
        .with_context("path", path.display())
        .set_source(err)
    })
}

fn positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(value) => Ok(value),
        Err(err) => Err(err.to_string()),
    }
}

fn decay(s: &str) -> Result<f64, String> {
    let value = s.parse::<f64>().map_err(|err| err.to_string())?;
    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(format!("must be in (0, 1], got {value}"))
    }
}
