//! Tipos de erro do tok-core.

use std::path::PathBuf;

use thiserror::Error;

/// Erros possíveis ao anotar um contêiner MMIF.
#[derive(Debug, Error)]
pub enum Error {
    /// JSON inválido ou com formato inesperado para MMIF.
    #[error("mmif inválido: {0}")]
    Mmif(#[from] serde_json::Error),

    /// Falha ao ler o texto de um documento a partir do disco.
    #[error("falha ao ler `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Documento sem texto embutido e sem localização.
    #[error("documento sem texto: {0}")]
    Document(String),

    /// Localização com esquema que o app não sabe buscar.
    #[error("localização não suportada: {0}")]
    UnsupportedLocation(String),

    /// View referenciada não existe no contêiner.
    #[error("view não encontrada: {0}")]
    ViewNotFound(String),

    /// Erro disparado a pedido do chamador (parâmetro `raise_error`).
    #[error("erro solicitado pelo chamador")]
    Requested,
}

/// Resultado das operações do tok-core.
pub type Result<T> = std::result::Result<T, Error>;
