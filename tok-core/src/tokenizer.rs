//! # Tokenizador de Palavras
//!
//! Divide o texto em tokens usando uma única expressão regular simplista: cada
//! sequência máxima de caracteres de palavra (letras, dígitos e `_`) vira um
//! token. Espaços, pontuação e marcas combinantes soltas nunca fazem parte de
//! um token e são simplesmente pulados.
//!
//! Os offsets são contados em **caracteres** (não em bytes), no intervalo
//! semiaberto `[start, end)`, que é o que o contêiner MMIF espera nas
//! propriedades `start`/`end` das anotações.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use tok_core::tokenizer::spans;
//!
//! assert_eq!(spans("The door is open."), vec![(0, 3), (4, 8), (9, 11), (12, 16)]);
//! ```

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Versão da ferramenta de tokenização embrulhada pelo app.
pub const TOOL_VERSION: &str = "0.1.0";

// Letras e números Unicode (qualquer categoria L/N) mais `_`; nada de \w,
// que também aceita marcas combinantes e outros conectores.
const WORD_PATTERN: &str = r"[\p{L}\p{N}_]+";

/// Um token extraído do texto original.
///
/// `start` e `end` são offsets de caractere; `text` é exatamente o trecho
/// `[start, end)` do texto de entrada.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// Offset de caractere inicial (inclusive).
    pub start: usize,
    /// Offset de caractere final (exclusivo).
    pub end: usize,
    /// O texto do token (ex: "door").
    pub text: String,
}

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(WORD_PATTERN).expect("padrão de palavra é válido"))
}

/// Tokeniza o texto, da esquerda para a direita.
///
/// Cada chamada é independente: não há estado entre invocações.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    // Cursor (byte, caractere) avança monotonicamente junto com os matches
    let mut byte_pos = 0;
    let mut char_pos = 0;

    for m in word_regex().find_iter(text) {
        char_pos += text[byte_pos..m.start()].chars().count();
        let start = char_pos;
        char_pos += m.as_str().chars().count();
        byte_pos = m.end();

        tokens.push(Token {
            start,
            end: char_pos,
            text: m.as_str().to_string(),
        });
    }

    tokens
}

/// Apenas os pares de offsets `(start, end)` de cada token.
pub fn spans(text: &str) -> Vec<(usize, usize)> {
    tokenize(text).into_iter().map(|t| (t.start, t.end)).collect()
}
