//! # App Tokenizador — Contrato do Hospedeiro e Orquestração
//!
//! O hospedeiro conversa com qualquer app através do trait [`ClamsApp`]:
//! lê os metadados, pergunta se o app aceita um MMIF (`sniff`) e pede a
//! anotação (`annotate`). [`TokenizerApp`] implementa esse contrato
//! envolvendo o [`tokenizer`](crate::tokenizer).
//!
//! ## Fluxo do `annotate`
//!
//! 1. Zera o gerador de identificadores (os tokens recomeçam em `t1`).
//! 2. Para cada documento de texto da lista `documents`: cria uma view nova,
//!    declara `contains[Token] = {"document": <id>}` e acrescenta um Token por
//!    palavra com `start`, `end` e `text`.
//! 3. Para cada view que **já existia** e contém documentos de texto: cria uma
//!    view nova e, para cada documento, acrescenta Tokens que apontam de volta
//!    para ele com `document = "<view>:<doc>"`.
//! 4. Devolve o MMIF serializado.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Map;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::identifiers::{self, Identifiers};
use crate::metadata::AppMetadata;
use crate::mmif::{Document, Mmif, View};
use crate::tokenizer::tokenize;
use crate::vocabulary::TOKEN;

/// Prefixo dos identificadores de Token.
const TOKEN_PREFIX: &str = "t";

/// Parâmetros de execução de uma chamada a `annotate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotateParams {
    /// Serializa a saída com indentação.
    pub pretty: bool,
    /// Falha com [`Error::Requested`] sem processar nada. Útil para testar
    /// o tratamento de erros do hospedeiro.
    pub raise_error: bool,
}

impl Default for AnnotateParams {
    fn default() -> Self {
        Self {
            pretty: true,
            raise_error: false,
        }
    }
}

/// Contrato que o hospedeiro espera de um app.
pub trait ClamsApp {
    fn metadata(&self) -> &AppMetadata;

    /// Diz se o app consegue processar este MMIF.
    fn sniff(&self, mmif: &Mmif) -> bool;

    /// Anota o MMIF e devolve o contêiner serializado.
    fn annotate(&self, mmif: Mmif, params: &AnnotateParams) -> Result<String>;

    /// Como [`ClamsApp::annotate`], mas a partir do JSON cru.
    fn annotate_str(&self, input: &str, params: &AnnotateParams) -> Result<String> {
        if params.raise_error {
            return Err(Error::Requested);
        }
        self.annotate(Mmif::from_json(input)?, params)
    }
}

/// O app que aplica o tokenizador a todos os documentos de texto de um MMIF.
#[derive(Debug, Clone)]
pub struct TokenizerApp {
    metadata: AppMetadata,
}

impl TokenizerApp {
    pub fn new() -> Self {
        Self {
            metadata: AppMetadata::tokenizer(),
        }
    }

    /// Cria a view que receberá os Tokens. `document` só é declarado quando
    /// todos os Tokens da view vêm de um único documento de nível superior.
    fn new_token_view<'m>(&self, mmif: &'m mut Mmif, document: Option<&str>) -> &'m mut View {
        let view = mmif.new_view();
        view.metadata.app = self.metadata.app.clone();

        let mut properties = Map::new();
        if let Some(doc_id) = document {
            properties.insert("document".into(), doc_id.into());
        }
        view.new_contain(TOKEN, properties);
        view
    }
}

impl Default for TokenizerApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ClamsApp for TokenizerApp {
    fn metadata(&self) -> &AppMetadata {
        &self.metadata
    }

    fn sniff(&self, _mmif: &Mmif) -> bool {
        true
    }

    fn annotate(&self, mut mmif: Mmif, params: &AnnotateParams) -> Result<String> {
        if params.raise_error {
            return Err(Error::Requested);
        }

        // A guarda fica com esta chamada até o fim: rótulos não se misturam entre requisições
        let mut ids = identifiers::global();
        ids.reset();

        // === Passo 1: documentos da lista `documents` ===
        let documents: Vec<Document> = mmif.text_documents().cloned().collect();
        for doc in &documents {
            let text = read_text(doc)?;
            let view = self.new_token_view(&mut mmif, Some(doc.id()));
            let added = add_tokens(view, &mut ids, &text, None);
            debug!(document = doc.id(), view = %view.id, tokens = added, "documento tokenizado");
        }

        // === Passo 2: documentos dentro das views existentes ===
        // Fotografa os ids antes: as views criadas aqui não devem ser revisitadas
        let view_ids: Vec<String> = mmif.views.iter().map(|v| v.id.clone()).collect();
        for view_id in view_ids {
            let nested = mmif.documents_in_view(&view_id)?;
            if nested.is_empty() {
                continue;
            }

            let texts = nested
                .iter()
                .map(|doc| -> Result<(String, String)> {
                    Ok((format!("{view_id}:{}", doc.id()), read_text(doc)?))
                })
                .collect::<Result<Vec<_>>>()?;

            let view = self.new_token_view(&mut mmif, None);
            for (full_id, text) in &texts {
                let added = add_tokens(view, &mut ids, text, Some(full_id.as_str()));
                debug!(document = %full_id, view = %view.id, tokens = added, "documento aninhado tokenizado");
            }
        }

        info!(
            documents = documents.len(),
            views = mmif.views.len(),
            "annotate concluído"
        );
        mmif.to_json(params.pretty)
    }
}

/// Acrescenta um Token por palavra do texto e devolve quantos foram criados.
///
/// `document` é a referência qualificada (`view:doc`) usada apenas para
/// documentos que vieram de dentro de uma view.
fn add_tokens(view: &mut View, ids: &mut Identifiers, text: &str, document: Option<&str>) -> usize {
    let tokens = tokenize(text);
    for token in &tokens {
        let annotation = view.new_annotation(ids.next(TOKEN_PREFIX), TOKEN);
        if let Some(doc_id) = document {
            annotation.add_property("document", doc_id);
        }
        annotation.add_property("start", token.start);
        annotation.add_property("end", token.end);
        annotation.add_property("text", token.text.as_str());
    }
    tokens.len()
}

/// Lê o texto de um documento: a `location` tem prioridade sobre o texto embutido.
pub fn read_text(doc: &Document) -> Result<String> {
    if let Some(location) = doc.location() {
        let path = location_path(location)?;
        return fs::read_to_string(&path).map_err(|source| Error::Io { path, source });
    }

    doc.text_value()
        .map(str::to_string)
        .ok_or_else(|| Error::Document(doc.id().to_string()))
}

/// Aceita caminhos locais, puros ou como URI `file://`.
///
/// Na URI, a autoridade precisa ser vazia (`file:///abs`) ou `localhost`, e
/// escapes `%XX` do caminho são decodificados.
fn location_path(location: &str) -> Result<PathBuf> {
    let unsupported = || Error::UnsupportedLocation(location.to_string());

    if let Some(rest) = location.strip_prefix("file://") {
        let path = match rest.find('/') {
            Some(0) => rest,
            Some(slash) if rest[..slash].eq_ignore_ascii_case("localhost") => &rest[slash..],
            _ => return Err(unsupported()),
        };
        return percent_decode(path).map(PathBuf::from).ok_or_else(unsupported);
    }
    if location.contains("://") {
        return Err(unsupported());
    }
    Ok(PathBuf::from(location))
}

/// Decodifica `%XX`; `None` se um escape for malformado ou o resultado não for UTF-8.
fn percent_decode(path: &str) -> Option<String> {
    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = path.get(i + 1..i + 3)?;
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
