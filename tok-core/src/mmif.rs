//! # Contêiner MMIF
//!
//! Modelo tipado (e tolerante) do contêiner de anotações trocado com o
//! hospedeiro. Um MMIF é um objeto JSON com:
//!
//! - `metadata`: a versão da especificação (`{"mmif": "..."}`);
//! - `documents`: a lista de documentos de entrada (texto embutido ou localização);
//! - `views`: grupos de resultados, cada um com metadados e anotações.
//!
//! ```json
//! {
//!   "metadata": { "mmif": "http://mmif.clams.ai/0.2.1" },
//!   "documents": [
//!     { "@type": "http://mmif.clams.ai/0.2.1/vocabulary/TextDocument",
//!       "properties": { "id": "m1", "text": { "@value": "The door is open." } } }
//!   ],
//!   "views": []
//! }
//! ```
//!
//! Campos desconhecidos são preservados em todos os níveis (`extra`), então um
//! MMIF lido e reserializado não perde nada produzido por outros apps.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{Error, Result};
use crate::vocabulary::{self, MMIF_SPEC_VERSION};

/// O contêiner completo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mmif {
    #[serde(default)]
    pub metadata: MmifMetadata,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub views: Vec<View>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MmifMetadata {
    #[serde(default)]
    pub mmif: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Um documento: texto embutido em `properties.text` ou uma `location` para buscar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "@type")]
    pub at_type: String,
    pub properties: DocumentProperties,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentProperties {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Valor textual no estilo JSON-LD (`{"@value": ..., "@language": ...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextValue {
    #[serde(rename = "@value")]
    pub value: String,
    #[serde(rename = "@language", default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Um grupo de resultados produzido por um app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub id: String,
    #[serde(default)]
    pub metadata: ViewMetadata,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewMetadata {
    #[serde(default)]
    pub app: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Tipo de anotação → propriedades comuns a todas as anotações daquele tipo.
    #[serde(default)]
    pub contains: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Uma anotação dentro de uma view. As propriedades mantêm a ordem de inserção.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "@type")]
    pub at_type: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Mmif {
    /// Contêiner vazio na versão de especificação atual.
    pub fn new() -> Self {
        Self {
            metadata: MmifMetadata {
                mmif: format!("http://mmif.clams.ai/{MMIF_SPEC_VERSION}"),
                extra: Map::new(),
            },
            ..Default::default()
        }
    }

    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let out = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(out)
    }

    /// Documentos de texto da lista de nível superior, na ordem original.
    pub fn text_documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter().filter(|d| d.is_text())
    }

    pub fn view(&self, id: &str) -> Option<&View> {
        self.views.iter().find(|v| v.id == id)
    }

    /// Documentos de texto que foram produzidos como anotações dentro de uma view.
    pub fn documents_in_view(&self, view_id: &str) -> Result<Vec<Document>> {
        let view = self
            .view(view_id)
            .ok_or_else(|| Error::ViewNotFound(view_id.to_string()))?;
        view.annotations
            .iter()
            .filter(|a| vocabulary::is_text_document(&a.at_type))
            .map(Document::try_from)
            .collect()
    }

    /// Acrescenta uma view vazia com um id ainda não usado (`v_N`) e carimbo de tempo UTC.
    pub fn new_view(&mut self) -> &mut View {
        let mut n = self.views.len();
        while self.view(&format!("v_{n}")).is_some() {
            n += 1;
        }

        self.views.push(View {
            id: format!("v_{n}"),
            metadata: ViewMetadata {
                timestamp: Some(chrono::Utc::now().to_rfc3339()),
                ..Default::default()
            },
            annotations: Vec::new(),
            extra: Map::new(),
        });
        let last = self.views.len() - 1;
        &mut self.views[last]
    }
}

impl Document {
    pub fn id(&self) -> &str {
        &self.properties.id
    }

    pub fn is_text(&self) -> bool {
        vocabulary::is_text_document(&self.at_type)
    }

    /// Texto embutido, se houver.
    pub fn text_value(&self) -> Option<&str> {
        self.properties.text.as_ref().map(|t| t.value.as_str())
    }

    pub fn location(&self) -> Option<&str> {
        self.properties.location.as_deref().filter(|l| !l.is_empty())
    }
}

impl TryFrom<&Annotation> for Document {
    type Error = Error;

    fn try_from(annotation: &Annotation) -> Result<Self> {
        let value = json!({
            "@type": annotation.at_type,
            "properties": annotation.properties,
        });
        Ok(serde_json::from_value(value)?)
    }
}

impl View {
    /// Declara que esta view contém anotações do tipo dado, com propriedades comuns.
    pub fn new_contain(&mut self, at_type: &str, properties: Map<String, Value>) {
        self.metadata
            .contains
            .insert(at_type.to_string(), Value::Object(properties));
    }

    /// Acrescenta uma anotação nova com o id dado e devolve-a para receber propriedades.
    pub fn new_annotation(&mut self, id: String, at_type: &str) -> &mut Annotation {
        let mut properties = Map::new();
        properties.insert("id".to_string(), Value::String(id));
        self.annotations.push(Annotation {
            at_type: at_type.to_string(),
            properties,
            extra: Map::new(),
        });
        let last = self.annotations.len() - 1;
        &mut self.annotations[last]
    }
}

impl Annotation {
    pub fn id(&self) -> Option<&str> {
        self.properties.get("id").and_then(Value::as_str)
    }

    pub fn add_property(&mut self, key: &str, value: impl Into<Value>) {
        self.properties.insert(key.to_string(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::TOKEN;

    fn sample() -> &'static str {
        r#"{
            "metadata": { "mmif": "http://mmif.clams.ai/0.2.1" },
            "documents": [
                { "@type": "http://mmif.clams.ai/0.2.1/vocabulary/TextDocument",
                  "properties": { "id": "m1", "text": { "@value": "Hello world" } } },
                { "@type": "http://mmif.clams.ai/0.2.1/vocabulary/VideoDocument",
                  "properties": { "id": "m2", "location": "/data/video.mp4", "mime": "video/mp4" } }
            ],
            "views": [
                { "id": "v1",
                  "metadata": { "app": "http://apps/ocr", "contains": {} },
                  "annotations": [
                    { "@type": "http://mmif.clams.ai/0.2.1/vocabulary/TextDocument",
                      "properties": { "id": "td1", "text": { "@value": "nested text", "@language": "en" } } },
                    { "@type": "http://vocab.lappsgrid.org/Sentence",
                      "properties": { "id": "s1", "start": 0, "end": 6 } }
                  ] }
            ],
            "x-custom": true
        }"#
    }

    #[test]
    fn test_parse_and_filter_documents() {
        let mmif = Mmif::from_json(sample()).unwrap();
        let texts: Vec<&str> = mmif.text_documents().map(Document::id).collect();
        assert_eq!(texts, vec!["m1"]);
        assert_eq!(mmif.documents[0].text_value(), Some("Hello world"));
        assert_eq!(mmif.documents[1].location(), Some("/data/video.mp4"));
    }

    #[test]
    fn test_documents_in_view() {
        let mmif = Mmif::from_json(sample()).unwrap();
        let docs = mmif.documents_in_view("v1").unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id(), "td1");
        assert_eq!(docs[0].text_value(), Some("nested text"));

        assert!(matches!(mmif.documents_in_view("nope"), Err(Error::ViewNotFound(_))));
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let mmif = Mmif::from_json(sample()).unwrap();
        let out: Value = serde_json::from_str(&mmif.to_json(false).unwrap()).unwrap();
        assert_eq!(out["x-custom"], Value::Bool(true));
        assert_eq!(out["documents"][1]["properties"]["mime"], "video/mp4");
        assert_eq!(out["views"][0]["annotations"][1]["properties"]["end"], 6);
    }

    #[test]
    fn test_new_view_ids_skip_taken() {
        let mut mmif = Mmif::from_json(sample()).unwrap();
        mmif.views[0].id = "v_1".into();
        let id = mmif.new_view().id.clone();
        assert_eq!(id, "v_2");
        assert!(mmif.view("v_2").unwrap().metadata.timestamp.is_some());
        assert_eq!(mmif.new_view().id, "v_3");
    }

    #[test]
    fn test_new_annotation_keeps_property_order() {
        let mut mmif = Mmif::new();
        let view = mmif.new_view();
        view.metadata.app = "http://apps/test".into();
        view.new_contain(TOKEN, Map::new());
        let ann = view.new_annotation("t1".into(), TOKEN);
        ann.add_property("start", 0);
        ann.add_property("end", 5);
        ann.add_property("text", "Hello");

        let keys: Vec<&str> = mmif.views[0].annotations[0]
            .properties
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["id", "start", "end", "text"]);
        assert_eq!(mmif.views[0].annotations[0].id(), Some("t1"));
        assert!(mmif.views[0].metadata.contains.contains_key(TOKEN));
    }

    #[test]
    fn test_invalid_json_is_mmif_error() {
        assert!(matches!(Mmif::from_json("{not json"), Err(Error::Mmif(_))));
        assert!(matches!(Mmif::from_json(r#"{"documents": 3}"#), Err(Error::Mmif(_))));
    }

    #[test]
    fn test_new_uses_current_mmif_version() {
        let mmif = Mmif::new();
        assert!(mmif.metadata.mmif.ends_with(MMIF_SPEC_VERSION));
        assert!(mmif.documents.is_empty());
    }
}
