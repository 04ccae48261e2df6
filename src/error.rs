use thiserror::Error;

pub type Result<T = (), E = BlitzError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlitzError {
    #[error("Product name is required")]
    MissingName,

    #[error("Expiration date is required")]
    MissingExpirationDate,

    #[error("Invalid expiration date: {0}")]
    InvalidExpirationDate(String),

    #[error("Failed to read storage key {key}: {reason}")]
    StorageRead { key: String, reason: String },

    #[error("Failed to write storage key {key}: {reason}")]
    StorageWrite { key: String, reason: String },

    #[error("Failed to encode records: {0}")]
    Encode(String),

    #[error("There is no data to export")]
    NothingToExport,

    #[error("Failed to write export file: {0}")]
    ExportFailed(String),

    #[error("Invalid configuration value for {name}: {value}")]
    InvalidConfig { name: String, value: String },

    #[error("No data directory available on this system")]
    DataDirNotFound,
}

impl BlitzError {
    /// Translate error to Portuguese for UI display
    pub fn to_portuguese(&self) -> String {
        match self {
            Self::MissingName => "Informe o nome do produto.".to_string(),
            Self::MissingExpirationDate => "Informe a data de vencimento.".to_string(),
            Self::InvalidExpirationDate(v) => {
                format!("Data de vencimento inválida: {} (use AAAA-MM-DD ou DD/MM/AAAA)", v)
            }
            Self::StorageRead { reason, .. } => {
                format!("Não foi possível ler os dados salvos: {}", reason)
            }
            Self::StorageWrite { reason, .. } => {
                format!("Não foi possível salvar os dados: {}", reason)
            }
            Self::Encode(e) => format!("Não foi possível codificar os registros: {}", e),
            Self::NothingToExport => "Não há dados para exportar.".to_string(),
            Self::ExportFailed(e) => format!("Não foi possível gerar o arquivo CSV: {}", e),
            Self::InvalidConfig { name, value } => {
                format!("Valor de configuração inválido para {}: {}", name, value)
            }
            Self::DataDirNotFound => {
                "Não foi possível localizar a pasta de dados do sistema.".to_string()
            }
        }
    }
}

impl From<serde_json::Error> for BlitzError {
    fn from(e: serde_json::Error) -> Self {
        BlitzError::Encode(e.to_string())
    }
}
