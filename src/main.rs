mod app;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod report;
mod stats;

use std::io;
use std::process::ExitCode;

use app::IrisReport;
use config::ReportConfig;

fn main() -> ExitCode {
    env_logger::init();

    let report = IrisReport::new(ReportConfig::default());
    let result = report.run(&mut io::stdout().lock());

    match result {
        Ok(paths) => {
            log::info!("Report complete, {} charts written", paths.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", e.console_message());
            log::error!("{:#}", anyhow::Error::new(e));
            ExitCode::FAILURE
        }
    }
}
