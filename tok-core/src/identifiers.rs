//! # Gerador de Identificadores de Anotação
//!
//! Cria identificadores legíveis e sequenciais no formato `prefixo + número`
//! (ex: `t1`, `t2`, ...), com um contador independente por prefixo.
//!
//! Existe um gerador global ao processo ([`global`]) que o app zera no início
//! de cada `annotate`, de forma que os rótulos recomecem em 1. Ele **não**
//! consulta os identificadores já presentes no contêiner: só é seguro para
//! anotações em views novas.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock};

/// Contadores por prefixo.
#[derive(Debug, Default, Clone)]
pub struct Identifiers {
    counters: HashMap<String, u64>,
}

impl Identifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Incrementa o contador do prefixo e devolve o novo identificador.
    pub fn next(&mut self, prefix: &str) -> String {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        *counter += 1;
        format!("{prefix}{counter}")
    }

    /// Zera todos os contadores.
    pub fn reset(&mut self) {
        self.counters.clear();
    }
}

static GLOBAL: OnceLock<Mutex<Identifiers>> = OnceLock::new();

/// Trava o gerador global do processo.
///
/// Quem segura a guarda tem exclusividade sobre a sequência até soltá-la.
/// Um lock envenenado é recuperado: os contadores continuam consistentes.
pub fn global() -> MutexGuard<'static, Identifiers> {
    GLOBAL
        .get_or_init(|| Mutex::new(Identifiers::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
