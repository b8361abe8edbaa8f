use std::fs;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::cli::config::api_client;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::models::sync::{
    HierarchyByCompanyCode, SocCompanyApiData, SocJobApiData, SocSectorApiData, SocUnitApiData, SyncResponse,
};
use crate::services::SyncService;

#[derive(Subcommand)]
pub enum SyncCommands {
    #[command(about = "Pull everything from the SOC API")]
    Full,

    #[command(about = "Sync companies from a JSON export")]
    Companies {
        #[arg(help = "JSON file with SOC company records")]
        file: PathBuf,
    },

    #[command(about = "Sync units from a JSON export")]
    Units {
        #[arg(help = "JSON file with SOC unit records")]
        file: PathBuf,
    },

    #[command(about = "Sync sectors from a JSON export")]
    Sectors {
        #[arg(help = "JSON file with SOC sector records")]
        file: PathBuf,
    },

    #[command(about = "Sync jobs from a JSON export")]
    Jobs {
        #[arg(help = "JSON file with SOC job records")]
        file: PathBuf,
    },

    #[command(about = "Process hierarchies grouped by company code")]
    Hierarchies {
        #[arg(help = "JSON object mapping company codes to hierarchy rows")]
        file: PathBuf,
    },
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content =
        fs::read_to_string(path).map_err(|e| anyhow::anyhow!("Cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&content).map_err(|e| anyhow::anyhow!("Invalid JSON in {}: {}", path.display(), e))
}

pub async fn handle(cmd: SyncCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let sync = SyncService::new(api_client()?);

    let response = match cmd {
        SyncCommands::Full => sync.full_from_api().await?,
        SyncCommands::Companies { file } => sync.sync_companies(&read_json::<Vec<SocCompanyApiData>>(&file)?).await?,
        SyncCommands::Units { file } => sync.sync_units(&read_json::<Vec<SocUnitApiData>>(&file)?).await?,
        SyncCommands::Sectors { file } => sync.sync_sectors(&read_json::<Vec<SocSectorApiData>>(&file)?).await?,
        SyncCommands::Jobs { file } => sync.sync_jobs(&read_json::<Vec<SocJobApiData>>(&file)?).await?,
        SyncCommands::Hierarchies { file } => sync.process_hierarchies(&read_json::<HierarchyByCompanyCode>(&file)?).await?,
    };

    report(&output_format, &response)
}

fn report(output_format: &OutputFormat, response: &SyncResponse) -> anyhow::Result<()> {
    if let Some(error) = &response.error {
        anyhow::bail!("{} ({})", response.message, error);
    }
    output_success(output_format, &response.message, Some(json!({ "sync": response })))?;
    if let OutputFormat::Text = output_format {
        let counts = [
            ("companies", response.companies),
            ("units", response.units),
            ("sectors", response.sectors),
            ("jobs", response.jobs),
            ("hierarchy companies", response.hierarchy_companies),
        ];
        for (label, count) in counts {
            if let Some(count) = count {
                println!("  {}: {}", label, count);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_json_reports_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sectors.json");
        fs::write(
            &path,
            r#"[{"CODIGO":"1","CODIGOEMPRESA":"10","NOMESETOR":"Adm","ATIVO":"1"}]"#,
        )
        .unwrap();
        let sectors: Vec<SocSectorApiData> = read_json(&path).unwrap();
        assert_eq!(sectors[0].nomesetor, "Adm");

        fs::write(&path, "not json").unwrap();
        let err = read_json::<Vec<SocSectorApiData>>(&path).unwrap_err();
        assert!(err.to_string().contains("sectors.json"));
    }
}
