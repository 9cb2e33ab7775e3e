//! # Vocabulário Compartilhado
//!
//! URIs de tipo usadas para marcar documentos e anotações no contêiner MMIF.
//! Documentos vêm do vocabulário MMIF; tokens, do vocabulário LAPPS.

/// Versão da especificação MMIF produzida pelo app.
pub const MMIF_SPEC_VERSION: &str = "0.2.1";

/// Nome curto do tipo de documento de texto (último segmento da URI).
pub const TEXT_DOCUMENT_NAME: &str = "TextDocument";

/// URI completa do tipo de documento de texto.
pub const TEXT_DOCUMENT: &str = "http://mmif.clams.ai/0.2.1/vocabulary/TextDocument";

/// URI do tipo Token (vocabulário LAPPS).
pub const TOKEN: &str = "http://vocab.lappsgrid.org/Token";

/// Verdadeiro se o tipo for um documento de texto, de qualquer versão do vocabulário.
pub fn is_text_document(at_type: &str) -> bool {
    at_type.rsplit('/').next() == Some(TEXT_DOCUMENT_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_document_matching() {
        assert!(is_text_document(TEXT_DOCUMENT));
        assert!(is_text_document("http://mmif.clams.ai/0.1.0/vocabulary/TextDocument"));
        assert!(is_text_document("TextDocument"));
        assert!(!is_text_document("http://mmif.clams.ai/0.2.1/vocabulary/VideoDocument"));
        assert!(!is_text_document(TOKEN));
    }
}
