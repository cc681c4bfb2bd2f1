//! # Tokenizador do Corpus de Treinamento
//!
//! Divide documentos de texto em sentenças e palavras para o treinamento do
//! modelo de linguagem.
//!
//! ## Esquema de Tokenização
//!
//! - **Sentenças**: delimitadas por qualquer sequência de `.`, `!`, `?`, `,`
//!   ou tabulação. Quebras de linha NÃO encerram sentenças: uma frase pode
//!   continuar na linha seguinte do arquivo.
//! - **Palavras**: fronteiras de palavra Unicode (UAX #29), o que descarta
//!   aspas e parênteses colados (`"Tom` → `TOM`). Tudo é convertido para
//!   maiúsculas, a mesma normalização do dicionário.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use morse_core::tokenizer::tokenize_document;
//!
//! let sentences = tokenize_document("Tom pried his\nmouth open. \"Hello,\" he said!");
//! assert_eq!(sentences[0], vec!["TOM", "PRIED", "HIS", "MOUTH", "OPEN"]);
//! assert_eq!(sentences[1], vec!["HELLO"]);
//! assert_eq!(sentences[2], vec!["HE", "SAID"]);
//! ```

use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Delimitadores de sentença do corpus
static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?,\t]+").expect("regex de sentença válida"));

/// Divide o texto em sentenças (trechos não vazios entre delimitadores).
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BOUNDARY
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Extrai as palavras de uma sentença, em maiúsculas.
pub fn split_words(sentence: &str) -> Vec<String> {
    sentence
        .unicode_words()
        .map(|w| w.to_uppercase())
        .collect()
}

/// Tokeniza um documento inteiro: lista de sentenças, cada uma uma lista de palavras.
///
/// Sentenças que não contêm nenhuma palavra (ex: apenas aspas) são descartadas.
pub fn tokenize_document(text: &str) -> Vec<Vec<String>> {
    split_sentences(text)
        .into_iter()
        .map(split_words)
        .filter(|words| !words.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        let s = split_sentences("Oh! Yes, it is.  Really?\tNo...");
        assert_eq!(s, vec!["Oh", "Yes", "it is", "Really", "No"]);
    }

    #[test]
    fn test_sentence_spans_lines() {
        let sentences = tokenize_document("Then he went tearing\naround the house again.");
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].len(), 8);
        assert_eq!(sentences[0][3], "TEARING");
        assert_eq!(sentences[0][4], "AROUND");
    }

    #[test]
    fn test_split_words_strips_punctuation() {
        let words = split_words("\"I (really) like you\"");
        assert_eq!(words, vec!["I", "REALLY", "LIKE", "YOU"]);
    }

    #[test]
    fn test_empty_document() {
        assert!(tokenize_document("").is_empty());
        assert!(tokenize_document(" ... !! ,").is_empty());
    }
}
