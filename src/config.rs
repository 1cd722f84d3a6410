use std::path::PathBuf;

use clap::Parser;

use crate::analysis::AnalysisKind;

/// File name of the published EUNE season 15 export.
pub const DEFAULT_DATA_PATH: &str = "League of Legends Ranked Match Data  Season 15 (EUN).csv";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct DashboardArgs {
    /// Ranked match dataset (.csv, .json or .parquet)
    #[arg(
        short,
        long,
        env = "RANKED_DASHBOARD_DATA",
        default_value = DEFAULT_DATA_PATH
    )]
    pub data: PathBuf,

    /// Analysis shown at start-up
    #[arg(short, long, value_enum, default_value_t = AnalysisKind::WinRateByMastery)]
    pub analysis: AnalysisKind,

    /// Initial window width and height
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], default_values_t = [1200.0, 800.0])]
    pub window_size: Vec<f32>,
}

impl DashboardArgs {
    pub fn window_size(&self) -> [f32; 2] {
        match self.window_size.as_slice() {
            [w, h] => [*w, *h],
            _ => [1200.0, 800.0],
        }
    }
}
