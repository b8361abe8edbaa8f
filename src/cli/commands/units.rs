use clap::Subcommand;

use crate::cli::config::api_client;
use crate::cli::utils::output_record;
use crate::cli::OutputFormat;
use crate::services::UnitService;

#[derive(Subcommand)]
pub enum UnitsCommands {
    #[command(about = "Show a unit with its sectors")]
    Get {
        #[arg(help = "Unit ID")]
        id: String,
    },
}

pub async fn handle(cmd: UnitsCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let units = UnitService::new(api_client()?);

    match cmd {
        UnitsCommands::Get { id } => {
            let unit = units.find_by_id(&id).await?;
            output_record(&output_format, &unit)?;
            if let OutputFormat::Text = output_format {
                for sector in &unit.sectors {
                    println!("  {} ({} jobs)", sector.name, sector.jobs.len());
                }
            }
            Ok(())
        }
    }
}
