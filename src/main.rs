#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod analysis;
mod cli;
mod core;
#[cfg(test)]
mod fixtures;
mod graph;
mod prelude;
mod quantity;
mod report;
mod tables;
mod trips;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command},
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();

    match args.command {
        Command::Plan(args) => args.run()?,
        Command::Scout(args) => args.run()?,
        Command::Compare(args) => args.run()?,
        Command::Week(args) => args.run()?,
        Command::Zones(args) => args.run()?,
    }

    info!("done!");
    Ok(())
}
