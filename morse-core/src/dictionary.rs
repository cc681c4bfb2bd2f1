//! # Dicionário de Prefixos (Trie em Arena)
//!
//! Estrutura de prefixos sobre letras maiúsculas usada pelo gerador de
//! candidatos para saber, a cada letra decodificada, se ainda existe alguma
//! palavra que continue o caminho atual.
//!
//! ## Representação
//!
//! Os nós vivem em um único `Vec` (arena) e são referenciados por [`NodeId`].
//! Cada nó guarda seus filhos como pares `(letra, NodeId)` ordenados por letra,
//! o que permite busca binária e uma ordem de travessia determinística.
//! Não há desalocação manual: a árvore inteira é liberada junto com o `Vec`.
//!
//! ```text
//! raiz ─A─► n1 ─N─► n2 (AN) ─T─► n3 (ANT)
//! ```
//!
//! O dicionário é construído uma vez e depois só é lido; pode ser
//! compartilhado via `Arc` entre decodificações concorrentes.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{MorseError, Result};

/// Identificador de um nó na arena do dicionário.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct Node {
    /// Filhos ordenados por letra (no máximo um por letra)
    children: Vec<(char, NodeId)>,
    /// Palavra literal que termina neste nó, se houver
    word: Option<String>,
}

/// Trie de palavras em caixa alta.
#[derive(Debug, Clone)]
pub struct PrefixDictionary {
    nodes: Vec<Node>,
    word_count: usize,
}

impl PrefixDictionary {
    /// Nó raiz (caminho vazio).
    pub const ROOT: NodeId = NodeId(0);

    /// Dicionário vazio (apenas a raiz).
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            word_count: 0,
        }
    }

    /// Constrói o dicionário inserindo todas as palavras na ordem dada.
    ///
    /// As letras são normalizadas para maiúsculas. Se duas palavras de
    /// entrada levam ao mesmo caminho (ex: "Like" e "LIKE"), a última
    /// inserida fica registrada no nó terminal. Palavras vazias são ignoradas.
    pub fn build<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::new();
        for word in words {
            dict.insert(word.as_ref());
        }
        debug!(
            words = dict.word_count,
            nodes = dict.nodes.len(),
            "dicionário de prefixos construído"
        );
        dict
    }

    fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }

        let mut node = Self::ROOT;
        for c in word.chars() {
            let letter = c.to_ascii_uppercase();
            node = match self.child(node, letter) {
                Some(next) => next,
                None => {
                    let next = NodeId(self.nodes.len());
                    self.nodes.push(Node::default());
                    let children = &mut self.nodes[node.0].children;
                    let pos = children.partition_point(|(l, _)| *l < letter);
                    children.insert(pos, (letter, next));
                    next
                }
            };
        }

        let slot = &mut self.nodes[node.0].word;
        if slot.is_none() {
            self.word_count += 1;
        }
        *slot = Some(word.to_string());
    }

    /// Nó raiz.
    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    /// Filho de `node` pela letra `letter` (sem distinção de caixa).
    pub fn child(&self, node: NodeId, letter: char) -> Option<NodeId> {
        let letter = letter.to_ascii_uppercase();
        let children = &self.nodes[node.0].children;
        children
            .binary_search_by_key(&letter, |(l, _)| *l)
            .ok()
            .map(|i| children[i].1)
    }

    /// `true` se o caminho até `node` soletra uma palavra inserida.
    pub fn is_terminal(&self, node: NodeId) -> bool {
        self.nodes[node.0].word.is_some()
    }

    /// Palavra que termina em `node`.
    ///
    /// Retorna [`MorseError::NotTerminal`] se o nó não for terminal.
    pub fn word_at(&self, node: NodeId) -> Result<&str> {
        self.nodes[node.0]
            .word
            .as_deref()
            .ok_or(MorseError::NotTerminal)
    }

    /// Nó alcançado soletrando `prefix` a partir da raiz.
    pub fn find(&self, prefix: &str) -> Option<NodeId> {
        prefix
            .chars()
            .try_fold(Self::ROOT, |node, c| self.child(node, c))
    }

    /// `true` se `word` é uma palavra do dicionário.
    pub fn contains(&self, word: &str) -> bool {
        !word.is_empty() && self.find(word).is_some_and(|n| self.is_terminal(n))
    }

    /// `true` se alguma palavra começa com `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.find(prefix).is_some()
    }

    /// Número de palavras distintas (caminhos terminais).
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Número de nós na arena, incluindo a raiz.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Todas as palavras, em ordem alfabética dos caminhos.
    pub fn words(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.word_count);
        let mut stack = vec![Self::ROOT];
        while let Some(node) = stack.pop() {
            let n = &self.nodes[node.0];
            if let Some(word) = &n.word {
                out.push(word.as_str());
            }
            // Empilha em ordem reversa para visitar a menor letra primeiro
            stack.extend(n.children.iter().rev().map(|(_, id)| *id));
        }
        out
    }
}

impl Default for PrefixDictionary {
    fn default() -> Self {
        Self::new()
    }
}

/// Extrai as palavras de uma lista no formato "uma por linha".
///
/// Remove espaços das bordas e ignora linhas em branco.
pub fn parse_word_list(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Lê um arquivo de lista de palavras (ex: `/usr/share/dict/words`).
pub fn load_word_list(path: impl AsRef<Path>) -> Result<PrefixDictionary> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let dict = PrefixDictionary::build(parse_word_list(&text));
    info!(
        path = %path.display(),
        words = dict.len(),
        nodes = dict.node_count(),
        "lista de palavras carregada"
    );
    Ok(dict)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_walk() {
        let dict = PrefixDictionary::build(["an", "ANT", "t"]);
        assert_eq!(dict.len(), 3);

        let a = dict.child(dict.root(), 'A').unwrap();
        assert!(!dict.is_terminal(a));
        let an = dict.child(a, 'n').unwrap();
        assert!(dict.is_terminal(an));
        assert_eq!(dict.word_at(an).unwrap(), "an");
        assert!(dict.child(an, 'X').is_none());
    }

    #[test]
    fn test_word_at_non_terminal() {
        let dict = PrefixDictionary::build(["ant"]);
        let a = dict.find("A").unwrap();
        assert!(matches!(dict.word_at(a), Err(MorseError::NotTerminal)));
        assert!(matches!(dict.word_at(dict.root()), Err(MorseError::NotTerminal)));
    }

    #[test]
    fn test_last_write_wins() {
        let dict = PrefixDictionary::build(["Like", "LIKE", "like"]);
        assert_eq!(dict.len(), 1);
        let node = dict.find("LIKE").unwrap();
        assert_eq!(dict.word_at(node).unwrap(), "like");
    }

    #[test]
    fn test_contains_and_prefix() {
        let dict = PrefixDictionary::build(["really", "you"]);
        assert!(dict.contains("REALLY"));
        assert!(dict.contains("You"));
        assert!(!dict.contains("REAL"));
        assert!(dict.has_prefix("REAL"));
        assert!(!dict.has_prefix("X"));
        assert!(!dict.contains(""));
    }

    #[test]
    fn test_empty_word_ignored() {
        let dict = PrefixDictionary::build(["", "I"]);
        assert_eq!(dict.len(), 1);
        assert!(!dict.is_terminal(dict.root()));
    }

    #[test]
    fn test_words_in_letter_order() {
        let dict = PrefixDictionary::build(["you", "I", "like", "an", "ant"]);
        assert_eq!(dict.words(), vec!["an", "ant", "I", "like", "you"]);
    }

    #[test]
    fn test_parse_word_list() {
        let words: Vec<&str> = parse_word_list("  I \n\n really\t\n\nlike\n").collect();
        assert_eq!(words, vec!["I", "really", "like"]);
    }

    #[test]
    fn test_load_word_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "I\nreally\n\n  like \nyou\n").unwrap();

        let dict = load_word_list(&path).unwrap();
        assert_eq!(dict.len(), 4);
        assert!(dict.contains("LIKE"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_word_list("/nonexistent/words.txt").unwrap_err();
        assert!(matches!(err, MorseError::Io(_)));
    }
}
