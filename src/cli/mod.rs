// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses the command line with clap, hands a TrainConfig to
// the application layer and prints the final score.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::TrainArgs;

#[derive(Parser, Debug)]
#[command(
    name = "netflow-lstm",
    version,
    about = "Train an LSTM classifier on labelled network flow CSVs, then evaluate it on held-out flows."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: TrainArgs,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on '{}'", self.args.file);

        let summary = TrainUseCase::new(self.args.into()).execute()?;

        println!("\nLoss: {}", summary.evaluation.loss);
        println!("Accuracy: {:.2}%", summary.evaluation.accuracy * 100.0);
        Ok(())
    }
}
