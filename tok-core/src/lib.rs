//! # tok-core — Tokenizador Empacotado como App CLAMS
//!
//! Este crate envolve um tokenizador de palavras bem simples para que ele possa
//! ser chamado por um hospedeiro através de um contrato fixo: metadados,
//! `sniff`, `annotate` e um laço que descobre documentos de texto dentro de um
//! contêiner de anotações MMIF.
//!
//! ## Arquitetura
//!
//! 1.  **Entrada**: MMIF em JSON ([`mmif`]).
//! 2.  **Descoberta**: documentos de texto da lista `documents` e, depois, os
//!     que estão dentro de views já existentes.
//! 3.  **Tokenização** ([`tokenizer`]): sequências máximas de `\w`, com offsets
//!     de caractere.
//! 4.  **Anotação** ([`app`]): uma view nova por documento (ou por view de
//!     origem), um `Token` por palavra, ids sequenciais de [`identifiers`].
//! 5.  **Saída**: o mesmo MMIF, serializado com as views novas no fim.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use tok_core::{AnnotateParams, ClamsApp, TokenizerApp};
//!
//! let input = r#"{
//!   "metadata": { "mmif": "http://mmif.clams.ai/0.2.1" },
//!   "documents": [{
//!     "@type": "http://mmif.clams.ai/0.2.1/vocabulary/TextDocument",
//!     "properties": { "id": "m1", "text": { "@value": "The door is open." } }
//!   }]
//! }"#;
//!
//! let app = TokenizerApp::new();
//! let out = app.annotate_str(input, &AnnotateParams::default()).unwrap();
//! assert!(out.contains("\"text\": \"door\""));
//! ```

pub mod app;
pub mod error;
pub mod identifiers;
pub mod metadata;
pub mod mmif;
pub mod tokenizer;
pub mod vocabulary;

pub use app::{AnnotateParams, ClamsApp, TokenizerApp};
pub use error::{Error, Result};
pub use metadata::AppMetadata;
pub use mmif::{Annotation, Document, Mmif, View};
pub use tokenizer::{tokenize, Token};
