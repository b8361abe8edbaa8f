use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SyncStatus {
    Pending,
    Running,
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub message: String,
    pub status: SyncStatus,
    pub companies: Option<u64>,
    pub units: Option<u64>,
    pub sectors: Option<u64>,
    pub jobs: Option<u64>,
    pub hierarchy_companies: Option<u64>,
    pub error: Option<String>,
}

// Raw SOC export records keep the upstream upper-case field names.

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct SocCompanyApiData {
    pub codigo: String,
    pub nomeabreviado: String,
    pub razaosocial: String,
    pub cnpj: String,
    pub endereco: String,
    pub numeroendereco: String,
    pub bairro: String,
    pub cidade: String,
    pub uf: String,
    pub cep: String,
    pub ativo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct SocUnitApiData {
    pub codigo: String,
    pub codigoempresa: String,
    pub nomeunidade: String,
    pub razaosocial: String,
    pub cnpj: String,
    pub cpf: String,
    pub caepf: String,
    pub endereco: String,
    pub numeroendereco: String,
    pub bairro: String,
    pub cidade: String,
    pub uf: String,
    pub cep: String,
    pub cnae: String,
    pub graurisco: String,
    pub ativo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct SocSectorApiData {
    pub codigo: String,
    pub codigoempresa: String,
    pub nomesetor: String,
    pub ativo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct SocJobApiData {
    pub codigo: String,
    pub codigoempresa: String,
    pub nomecargo: String,
    pub descricaodetalhadapprapcmso: String,
    pub ativo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct SocHierarchyApiData {
    pub nomeunidade: String,
    pub nomesetor: String,
    pub nomecargo: String,
    pub descricaodetalhadapprapcmso: String,
}

/// Hierarchy rows grouped by company code
pub type HierarchyByCompanyCode = BTreeMap<String, Vec<SocHierarchyApiData>>;
