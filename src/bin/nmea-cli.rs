/*
Copyright 2021 Timo Saarinen

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! A thin demonstration harness: reads NMEA lines from a file (or stdin) and prints one JSON
//! object per decoded AIS message to stdout.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use clap::Parser;
use nmea_parser::json::{to_json, JsonOptions};
use nmea_parser::stream::StreamDecoder;

#[derive(Parser, Debug)]
#[command(name = "nmea-cli", about = "Decodes AIS messages from an NMEA 0183 feed into JSON")]
struct Args {
    /// Input file to read, or "-" for stdin.
    #[arg(long, default_value = "-")]
    input: String,

    /// Render enum-valued fields (navigation status, EPFD, tx/rx mode) as their integer code
    /// instead of their symbolic name.
    #[arg(long)]
    enum_as_int: bool,

    /// Increase log verbosity; repeat for more detail (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn lines_from(input: &str) -> anyhow::Result<Box<dyn Iterator<Item = String>>> {
    if input == "-" {
        let stdin = io::stdin();
        Ok(Box::new(stdin.lines().map_while(Result::ok)))
    } else {
        let file = File::open(input)?;
        Ok(Box::new(BufReader::new(file).lines().map_while(Result::ok)))
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();

    let opts = JsonOptions {
        enum_as_int: args.enum_as_int,
    };

    let lines = lines_from(&args.input)?;
    let decoder = StreamDecoder::new(lines);
    for msg in decoder {
        let json = to_json(&msg, opts);
        println!("{}", serde_json::to_string(&json)?);
    }
    Ok(())
}
