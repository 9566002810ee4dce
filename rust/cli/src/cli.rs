use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "chipstack", version, about = "Hot-seat Texas Hold'em at the terminal")]
pub struct ChipstackCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Seat the players and play until one stack remains or input ends
    Play {
        /// Comma-separated participant names, in seat order
        #[arg(long, value_delimiter = ',', required = true)]
        players: Vec<String>,
        /// Starting chips per player
        #[arg(long)]
        chips: Option<u32>,
        /// Small blind; the big blind is twice this
        #[arg(long)]
        small_blind: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        /// Fold a player who has not acted after this many seconds
        #[arg(long)]
        turn_timeout: Option<u64>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
