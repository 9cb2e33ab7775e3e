//! # Metadados do App
//!
//! Declaração que o hospedeiro lê para saber quem é o app, quais versões de
//! MMIF/SDK ele fala, o que ele exige na entrada e o que ele produz.

use serde::{Deserialize, Serialize};

use crate::tokenizer::TOOL_VERSION;
use crate::vocabulary::{MMIF_SPEC_VERSION, TEXT_DOCUMENT, TOKEN};

pub const APP_URI: &str = "https://apps.clams.ai/tokenizer";
pub const APP_VERSION: &str = "0.0.2";
pub const MMIF_SDK_VERSION: &str = "0.2.0";
pub const CLAMS_VERSION: &str = "0.1.3";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    pub name: String,
    pub app: String,
    pub app_version: String,
    pub tool_version: String,
    #[serde(rename = "mmif-spec-version")]
    pub mmif_spec_version: String,
    #[serde(rename = "mmif-sdk-version")]
    pub mmif_sdk_version: String,
    #[serde(rename = "clams-version")]
    pub clams_version: String,
    pub description: String,
    pub vendor: String,
    /// Tipos de documento exigidos na entrada.
    pub requires: Vec<String>,
    /// Tipos de anotação produzidos.
    pub produces: Vec<String>,
}

impl AppMetadata {
    /// Metadados do app tokenizador.
    pub fn tokenizer() -> Self {
        Self {
            name: "Tokenizer Wrapper".into(),
            app: APP_URI.into(),
            app_version: APP_VERSION.into(),
            tool_version: TOOL_VERSION.into(),
            mmif_spec_version: MMIF_SPEC_VERSION.into(),
            mmif_sdk_version: MMIF_SDK_VERSION.into(),
            clams_version: CLAMS_VERSION.into(),
            description: "This tool applies simple tokenization to all text documents in an MMIF file."
                .into(),
            vendor: "Team CLAMS".into(),
            requires: vec![TEXT_DOCUMENT.into()],
            produces: vec![TOKEN.into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_keys_are_hyphenated() {
        let value = serde_json::to_value(AppMetadata::tokenizer()).unwrap();
        assert_eq!(value["mmif-spec-version"], "0.2.1");
        assert_eq!(value["mmif-sdk-version"], "0.2.0");
        assert_eq!(value["clams-version"], "0.1.3");
        assert_eq!(value["tool_version"], TOOL_VERSION);
        assert_eq!(value["produces"][0], TOKEN);
        assert!(value.get("mmif_spec_version").is_none());
    }
}
