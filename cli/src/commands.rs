pub mod demo;
pub mod reserve;
pub mod schema;

use clap::{ArgAction, Parser, Subcommand};
use cineos_common::config::{Config, DuplicateLinks};
use cineos_core::model::SeatPosition;

#[derive(Parser)]
#[command(name = "cineos")]
#[command(about = "Cinema bookings on a typed relationship catalog.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Print less: -q hides headers, -qq hides object trees too
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Do not print the start-up banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Record a repeated link between the same pair instead of refusing it
    #[arg(long, global = true)]
    pub allow_duplicate_links: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Seed the sample cinema, book a few seats and print everything
    #[command(alias = "d")]
    Demo,
    /// List the registered associations and their views
    #[command(alias = "s")]
    Schema,
    /// Book seats for a client at one of the sample projections
    #[command(alias = "r")]
    Reserve {
        /// Client e-mail or full name
        #[arg(short, long)]
        client: String,
        /// Projection number, as listed by `demo`
        #[arg(short, long)]
        projection: u64,
        /// Seat positions such as B7
        #[arg(required = true)]
        seats: Vec<SeatPosition>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        let duplicate_links = if self.allow_duplicate_links {
            DuplicateLinks::Count
        } else {
            DuplicateLinks::Reject
        };
        Config {
            no_banner: self.no_banner,
            quiet: self.quiet,
            duplicate_links,
        }
    }
}
