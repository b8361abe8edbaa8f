use serde::{Deserialize, Serialize};

/// Company (empresa), root of the SOC hierarchy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocCompany {
    pub id: String,
    pub soc_code: String,
    pub name: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub cnpj: String,
    #[serde(default)]
    pub caepf: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub cnae: String,
    #[serde(default)]
    pub risk_degree: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub units: Vec<SocUnit>,
}

/// Unit (unidade) of a company
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocUnit {
    pub id: String,
    pub soc_code: String,
    pub soc_company_code: String,
    pub name: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub cnpj: String,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub caepf: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub cnae: String,
    #[serde(default)]
    pub risk_degree: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub sectors: Vec<SocSector>,
}

/// Sector (setor) of a unit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocSector {
    pub id: String,
    pub soc_code: String,
    pub soc_company_code: String,
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub jobs: Vec<SocJob>,
}

/// Job (cargo) within a sector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocJob {
    pub id: String,
    pub soc_code: String,
    pub soc_company_code: String,
    pub name: String,
    #[serde(default)]
    pub detailed_description: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl SocCompany {
    /// Counts of (units, sectors, jobs) below this company.
    pub fn hierarchy_counts(&self) -> (usize, usize, usize) {
        let sectors: usize = self.units.iter().map(|u| u.sectors.len()).sum();
        let jobs: usize = self.units.iter().flat_map(|u| &u.sectors).map(|s| s.jobs.len()).sum();
        (self.units.len(), sectors, jobs)
    }
}
