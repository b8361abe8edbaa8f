use clap::Subcommand;

use crate::cli::config::api_client;
use crate::cli::utils::{output_page, output_record, print_table};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::services::CompanyService;

use super::query::QueryArgs;

const COMPANY_COLUMNS: &[&str] = &["id", "socCode", "name", "cnpj", "active"];

#[derive(Subcommand)]
pub enum CompaniesCommands {
    #[command(about = "List SOC companies")]
    List {
        #[command(flatten)]
        query: QueryArgs,
    },

    #[command(about = "Show a company with its units, sectors and jobs")]
    Get {
        #[arg(help = "Company ID")]
        id: String,
    },
}

pub async fn handle(cmd: CompaniesCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let companies = CompanyService::new(api_client()?);

    match cmd {
        CompaniesCommands::List { query } => {
            let mut params = query.to_params()?;
            params.page = params.page.or(Some(0));
            params.size = params.size.or(Some(config().query.default_page_size));
            let page = companies.list(&params).await?;
            output_page(&output_format, &page, COMPANY_COLUMNS, "No companies found")
        }
        CompaniesCommands::Get { id } => {
            let company = companies.get(&id).await?;
            output_record(&output_format, &company)?;
            if let OutputFormat::Text = output_format {
                let (units, sectors, jobs) = company.hierarchy_counts();
                println!("\n{} units, {} sectors, {} jobs", units, sectors, jobs);
                let rows: Vec<Vec<String>> = company
                    .units
                    .iter()
                    .map(|u| vec![u.id.clone(), u.soc_code.clone(), u.name.clone(), u.sectors.len().to_string()])
                    .collect();
                if !rows.is_empty() {
                    println!();
                    print_table(&["unit", "socCode", "name", "sectors"], &rows);
                }
            }
            Ok(())
        }
    }
}
