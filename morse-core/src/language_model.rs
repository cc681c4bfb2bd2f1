//! # Modelo de Linguagem de Bigramas
//!
//! Fornece ao motor de segmentação duas consultas numéricas:
//!
//! 1. **Conexão** `P(w | w_anterior)`: quão provável é `w` seguir a palavra anterior
//!    (ou iniciar a sentença, quando não há anterior).
//! 2. **Frequência** `P(w)`: peso incondicional da palavra no corpus.
//!
//! ## Treinamento
//!
//! O modelo é estimado por contagem sobre um corpus de documentos de texto:
//!
//! ```text
//! frequência(w)      = contagem(w) / total_de_palavras
//! conexão(a, b)      = contagem(a b) / contagem(a)
//! conexão(<início>, w) = inícios(w) / total_de_sentenças
//! ```
//!
//! Nenhuma consulta retorna zero: pares nunca vistos e palavras desconhecidas
//! recebem [`PROBABILITY_FLOOR`], para que todo caminho continue pesquisável.
//!
//! ## Cache em Disco
//!
//! O treinamento pode ser persistido em um formato simples de linhas
//! (índice, palavra, frequência; depois pares de índices e probabilidade).
//! O cabeçalho guarda uma impressão digital (`XxHash64`) do dicionário e do
//! corpus usados; um cache gerado a partir de outra combinação nunca é
//! reaproveitado em silêncio.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::hash::Hasher;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use twox_hash::XxHash64;

use crate::dictionary::PrefixDictionary;
use crate::error::{MorseError, Result};
use crate::tokenizer::tokenize_document;

/// Valor mínimo retornado por qualquer consulta ao modelo.
pub const PROBABILITY_FLOOR: f64 = 1e-6;

const CACHE_MAGIC: &str = "morse-lm";
const CACHE_VERSION: u32 = 1;

/// Índice de uma palavra no vocabulário do modelo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WordId(usize);

/// Chave composta de um bigrama (palavra anterior, palavra seguinte).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct WordPair {
    prev: WordId,
    next: WordId,
}

/// Contagens brutas de um ou mais documentos.
#[derive(Debug, Default)]
struct Counts {
    unigrams: HashMap<String, u64>,
    bigrams: HashMap<(String, String), u64>,
    starts: HashMap<String, u64>,
    sentences: u64,
    total: u64,
}

impl Counts {
    fn from_document(text: &str) -> Self {
        let mut counts = Counts::default();
        for sentence in tokenize_document(text) {
            counts.sentences += 1;
            *counts.starts.entry(sentence[0].clone()).or_insert(0) += 1;

            for word in &sentence {
                counts.total += 1;
                *counts.unigrams.entry(word.clone()).or_insert(0) += 1;
            }
            for pair in sentence.windows(2) {
                *counts
                    .bigrams
                    .entry((pair[0].clone(), pair[1].clone()))
                    .or_insert(0) += 1;
            }
        }
        counts
    }

    fn merge(mut self, other: Counts) -> Counts {
        for (w, c) in other.unigrams {
            *self.unigrams.entry(w).or_insert(0) += c;
        }
        for (p, c) in other.bigrams {
            *self.bigrams.entry(p).or_insert(0) += c;
        }
        for (w, c) in other.starts {
            *self.starts.entry(w).or_insert(0) += c;
        }
        self.sentences += other.sentences;
        self.total += other.total;
        self
    }
}

/// Frequência de uma palavra (para diagnósticos e para a UI).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub frequency: f64,
}

/// Resumo do modelo treinado.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStats {
    pub vocabulary_size: usize,
    pub pair_count: usize,
    pub start_count: usize,
    /// Impressão digital em hexadecimal
    pub fingerprint: String,
    pub top_words: Vec<WordFrequency>,
}

/// Modelo de bigramas somente leitura após a construção.
#[derive(Debug, Clone)]
pub struct LanguageModel {
    fingerprint: u64,
    vocabulary: Vec<String>,
    index: HashMap<String, WordId>,
    frequency: Vec<f64>,
    connection: HashMap<WordPair, f64>,
    start: HashMap<WordId, f64>,
}

impl LanguageModel {
    /// Treina o modelo a partir de documentos de texto puro.
    ///
    /// Cada documento é contado em paralelo e as contagens são somadas.
    /// A impressão digital considera apenas o corpus; use
    /// [`LanguageModel::train_for_dictionary`] para amarrar também o dicionário.
    pub fn train<S: AsRef<str> + Sync>(documents: &[S]) -> Self {
        let fingerprint = model_fingerprint(None, documents);
        Self::train_with_fingerprint(documents, fingerprint)
    }

    /// Treina o modelo e registra a identidade do par (dicionário, corpus).
    pub fn train_for_dictionary<S: AsRef<str> + Sync>(
        dictionary: &PrefixDictionary,
        documents: &[S],
    ) -> Self {
        let fingerprint = model_fingerprint(Some(dictionary), documents);
        Self::train_with_fingerprint(documents, fingerprint)
    }

    fn train_with_fingerprint<S: AsRef<str> + Sync>(documents: &[S], fingerprint: u64) -> Self {
        let counts = documents
            .par_iter()
            .map(|doc| Counts::from_document(doc.as_ref()))
            .reduce(Counts::default, Counts::merge);

        let model = Self::from_counts(counts, fingerprint);
        info!(
            documents = documents.len(),
            vocabulary = model.vocabulary.len(),
            pairs = model.connection.len(),
            "modelo de linguagem treinado"
        );
        model
    }

    fn from_counts(counts: Counts, fingerprint: u64) -> Self {
        // Ordem alfabética garante índices determinísticos
        let mut vocabulary: Vec<String> = counts.unigrams.keys().cloned().collect();
        vocabulary.sort();

        let index: HashMap<String, WordId> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), WordId(i)))
            .collect();

        let total = counts.total.max(1) as f64;
        let frequency: Vec<f64> = vocabulary
            .iter()
            .map(|w| counts.unigrams[w] as f64 / total)
            .collect();

        let mut connection = HashMap::with_capacity(counts.bigrams.len());
        for ((a, b), c) in &counts.bigrams {
            let prev = index[a];
            let next = index[b];
            let prev_count = counts.unigrams[a] as f64;
            connection.insert(WordPair { prev, next }, *c as f64 / prev_count);
        }

        let sentences = counts.sentences.max(1) as f64;
        let start = counts
            .starts
            .iter()
            .map(|(w, c)| (index[w], *c as f64 / sentences))
            .collect();

        Self {
            fingerprint,
            vocabulary,
            index,
            frequency,
            connection,
            start,
        }
    }

    /// Índice de uma palavra (sem distinção de caixa).
    pub fn lookup(&self, word: &str) -> Option<WordId> {
        match self.index.get(word) {
            Some(id) => Some(*id),
            None => self.index.get(&word.to_uppercase()).copied(),
        }
    }

    /// Peso de `word` seguir `prev` (ou iniciar a sentença quando `prev` é `None`).
    pub fn connection_score(&self, prev: Option<&str>, word: &str) -> f64 {
        let next = self.lookup(word);
        match prev {
            None => self.start_score_by_id(next),
            Some(p) => self.connection_score_by_id(self.lookup(p), next),
        }
    }

    /// Peso incondicional de `word`.
    pub fn frequency_score(&self, word: &str) -> f64 {
        self.frequency_score_by_id(self.lookup(word))
    }

    /// [`LanguageModel::connection_score`] sobre índices já resolvidos.
    ///
    /// Um índice `None` representa palavra desconhecida.
    pub fn connection_score_by_id(&self, prev: Option<WordId>, next: Option<WordId>) -> f64 {
        match (prev, next) {
            (Some(prev), Some(next)) => self
                .connection
                .get(&WordPair { prev, next })
                .copied()
                .unwrap_or(PROBABILITY_FLOOR)
                .max(PROBABILITY_FLOOR),
            _ => PROBABILITY_FLOOR,
        }
    }

    /// Peso de uma palavra iniciar a sentença.
    pub fn start_score_by_id(&self, word: Option<WordId>) -> f64 {
        word.and_then(|id| self.start.get(&id).copied())
            .unwrap_or(PROBABILITY_FLOOR)
            .max(PROBABILITY_FLOOR)
    }

    pub fn frequency_score_by_id(&self, word: Option<WordId>) -> f64 {
        word.map(|id| self.frequency[id.0])
            .unwrap_or(PROBABILITY_FLOOR)
            .max(PROBABILITY_FLOOR)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// As `n` palavras mais frequentes, em ordem decrescente.
    pub fn top_words(&self, n: usize) -> Vec<WordFrequency> {
        let mut ranked: Vec<(usize, f64)> = self.frequency.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        ranked
            .into_iter()
            .take(n)
            .map(|(i, frequency)| WordFrequency {
                word: self.vocabulary[i].clone(),
                frequency,
            })
            .collect()
    }

    /// Os `n` bigramas de maior probabilidade de conexão.
    pub fn top_pairs(&self, n: usize) -> Vec<(&str, &str, f64)> {
        let mut ranked: Vec<(&WordPair, &f64)> = self.connection.iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(b.0))
        });
        ranked
            .into_iter()
            .take(n)
            .map(|(pair, p)| {
                (
                    self.vocabulary[pair.prev.0].as_str(),
                    self.vocabulary[pair.next.0].as_str(),
                    *p,
                )
            })
            .collect()
    }

    pub fn stats(&self) -> ModelStats {
        ModelStats {
            vocabulary_size: self.vocabulary.len(),
            pair_count: self.connection.len(),
            start_count: self.start.len(),
            fingerprint: format!("{:016x}", self.fingerprint),
            top_words: self.top_words(10),
        }
    }

    /// Persiste o modelo no formato de linhas.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut out = String::new();
        // Escrever em String nunca falha
        let _ = writeln!(out, "{CACHE_MAGIC} {CACHE_VERSION} {:016x}", self.fingerprint);

        let _ = writeln!(out, "{}", self.vocabulary.len());
        for (i, (word, freq)) in self.vocabulary.iter().zip(&self.frequency).enumerate() {
            let _ = writeln!(out, "{i} {word} {freq}");
        }

        let mut pairs: Vec<(&WordPair, &f64)> = self.connection.iter().collect();
        pairs.sort_by_key(|(pair, _)| **pair);
        let _ = writeln!(out, "{}", pairs.len());
        for (pair, p) in pairs {
            let _ = writeln!(out, "{} {} {p}", pair.prev.0, pair.next.0);
        }

        let mut starts: Vec<(&WordId, &f64)> = self.start.iter().collect();
        starts.sort_by_key(|(id, _)| **id);
        let _ = writeln!(out, "{}", starts.len());
        for (id, p) in starts {
            let _ = writeln!(out, "{} {p}", id.0);
        }

        fs::write(path, out)?;
        info!(path = %path.display(), "modelo de linguagem persistido");
        Ok(())
    }

    /// Restaura um modelo persistido por [`LanguageModel::save`].
    ///
    /// Com `expected = Some(fp)`, um cache de outra impressão digital é
    /// rejeitado com [`MorseError::CacheMismatch`].
    pub fn restore(path: impl AsRef<Path>, expected: Option<u64>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let mut reader = CacheReader::new(&text);

        let (line_no, header) = reader.next_line()?;
        let fields: Vec<&str> = header.split_whitespace().collect();
        if fields.len() != 3 || fields[0] != CACHE_MAGIC {
            return Err(invalid(line_no, "cabeçalho ausente"));
        }
        if fields[1] != CACHE_VERSION.to_string() {
            return Err(invalid(line_no, format!("versão {} não suportada", fields[1])));
        }
        let fingerprint = u64::from_str_radix(fields[2], 16)
            .map_err(|_| invalid(line_no, "impressão digital inválida"))?;
        if let Some(expected) = expected {
            if expected != fingerprint {
                return Err(MorseError::CacheMismatch {
                    expected,
                    found: fingerprint,
                });
            }
        }

        let size = reader.next_count()?;
        let mut vocabulary = vec![String::new(); size];
        let mut frequency = vec![0.0; size];
        let mut filled = vec![false; size];
        for _ in 0..size {
            let (line_no, line) = reader.next_line()?;
            let mut parts = line.split_whitespace();
            let i = parse_index(parts.next(), size, line_no)?;
            if filled[i] {
                return Err(invalid(line_no, "índice repetido"));
            }
            filled[i] = true;
            let word = parts
                .next()
                .ok_or_else(|| invalid(line_no, "palavra ausente"))?;
            let freq = parse_prob(parts.next(), line_no)?;
            vocabulary[i] = word.to_string();
            frequency[i] = freq;
        }

        let index: HashMap<String, WordId> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), WordId(i)))
            .collect();
        if index.len() != size {
            return Err(invalid(reader.line, "vocabulário com palavras repetidas"));
        }

        let pair_count = reader.next_count()?;
        let mut connection = HashMap::with_capacity(pair_count);
        for _ in 0..pair_count {
            let (line_no, line) = reader.next_line()?;
            let mut parts = line.split_whitespace();
            let prev = WordId(parse_index(parts.next(), size, line_no)?);
            let next = WordId(parse_index(parts.next(), size, line_no)?);
            let p = parse_prob(parts.next(), line_no)?;
            connection.insert(WordPair { prev, next }, p);
        }

        let start_count = reader.next_count()?;
        let mut start = HashMap::with_capacity(start_count);
        for _ in 0..start_count {
            let (line_no, line) = reader.next_line()?;
            let mut parts = line.split_whitespace();
            let id = WordId(parse_index(parts.next(), size, line_no)?);
            let p = parse_prob(parts.next(), line_no)?;
            start.insert(id, p);
        }

        debug!(vocabulary = size, pairs = pair_count, "cache do modelo lido");
        Ok(Self {
            fingerprint,
            vocabulary,
            index,
            frequency,
            connection,
            start,
        })
    }

    /// Restaura o modelo do cache quando ele corresponde ao dicionário e ao
    /// corpus; caso contrário treina de novo e sobrescreve o cache.
    pub fn load_or_train<S: AsRef<str> + Sync>(
        cache: Option<&Path>,
        dictionary: &PrefixDictionary,
        documents: &[S],
    ) -> Result<Self> {
        let fingerprint = model_fingerprint(Some(dictionary), documents);

        if let Some(path) = cache.filter(|p| p.exists()) {
            match Self::restore(path, Some(fingerprint)) {
                Ok(model) => {
                    info!(path = %path.display(), "modelo de linguagem restaurado do cache");
                    return Ok(model);
                }
                Err(err @ (MorseError::CacheMismatch { .. } | MorseError::InvalidCache { .. })) => {
                    warn!(path = %path.display(), error = %err, "cache descartado, retreinando");
                }
                Err(err) => return Err(err),
            }
        }

        let model = Self::train_with_fingerprint(documents, fingerprint);
        if let Some(path) = cache {
            model.save(path)?;
        }
        Ok(model)
    }
}

/// Impressão digital da combinação (dicionário, corpus).
pub fn model_fingerprint<S: AsRef<str>>(dictionary: Option<&PrefixDictionary>, documents: &[S]) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    if let Some(dict) = dictionary {
        for word in dict.words() {
            hasher.write(word.as_bytes());
            hasher.write_u8(0);
        }
    }
    hasher.write_u8(0xff);
    for doc in documents {
        hasher.write(doc.as_ref().as_bytes());
        hasher.write_u8(0);
    }
    hasher.finish()
}

fn invalid(line: usize, reason: impl Into<String>) -> MorseError {
    MorseError::InvalidCache {
        line,
        reason: reason.into(),
    }
}

fn parse_index(field: Option<&str>, size: usize, line: usize) -> Result<usize> {
    let i: usize = field
        .and_then(|f| f.parse().ok())
        .ok_or_else(|| invalid(line, "índice inválido"))?;
    if i >= size {
        return Err(invalid(line, format!("índice {i} fora do vocabulário")));
    }
    Ok(i)
}

fn parse_prob(field: Option<&str>, line: usize) -> Result<f64> {
    field
        .and_then(|f| f.parse::<f64>().ok())
        .filter(|p| (0.0..=1.0).contains(p))
        .ok_or_else(|| invalid(line, "probabilidade inválida"))
}

/// Leitor de linhas com numeração (1-based) para mensagens de erro.
struct CacheReader<'a> {
    lines: std::str::Lines<'a>,
    line: usize,
}

impl<'a> CacheReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
        }
    }

    fn next_line(&mut self) -> Result<(usize, &'a str)> {
        self.line += 1;
        self.lines
            .next()
            .map(|l| (self.line, l))
            .ok_or_else(|| invalid(self.line, "fim inesperado do arquivo"))
    }

    fn next_count(&mut self) -> Result<usize> {
        let (line_no, line) = self.next_line()?;
        line.trim()
            .parse()
            .map_err(|_| invalid(line_no, "contagem inválida"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &[&str] = &[
        "I really like you. I like you, really!",
        "You like me? I really do.",
    ];

    #[test]
    fn test_frequency_normalization() {
        let model = LanguageModel::train(CORPUS);
        // 14 palavras: I×3, REALLY×3, LIKE×3, YOU×3, ME×1, DO×1
        assert_eq!(model.vocabulary_size(), 6);
        assert!((model.frequency_score("like") - 3.0 / 14.0).abs() < 1e-12);
        assert!((model.frequency_score("ME") - 1.0 / 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_connection_probability() {
        let model = LanguageModel::train(CORPUS);
        // LIKE aparece 3 vezes e é seguido por YOU 2 vezes
        let p = model.connection_score(Some("LIKE"), "YOU");
        assert!((p - 2.0 / 3.0).abs() < 1e-12);
        // par nunca observado
        assert_eq!(model.connection_score(Some("YOU"), "DO"), PROBABILITY_FLOOR);
    }

    #[test]
    fn test_sentence_start() {
        let model = LanguageModel::train(CORPUS);
        // Sentenças: "I really like you", "I like you", "really", "You like me", "I really do"
        let p = model.connection_score(None, "I");
        assert!((p - 3.0 / 5.0).abs() < 1e-12);
        assert_eq!(model.connection_score(None, "ME"), PROBABILITY_FLOOR);
    }

    #[test]
    fn test_unknown_words_get_floor() {
        let model = LanguageModel::train(CORPUS);
        assert_eq!(model.frequency_score("ZEBRA"), PROBABILITY_FLOOR);
        assert_eq!(model.connection_score(Some("ZEBRA"), "I"), PROBABILITY_FLOOR);
        assert_eq!(model.connection_score(Some("I"), "ZEBRA"), PROBABILITY_FLOOR);
    }

    #[test]
    fn test_empty_corpus() {
        let model = LanguageModel::train::<&str>(&[]);
        assert_eq!(model.vocabulary_size(), 0);
        assert_eq!(model.frequency_score("I"), PROBABILITY_FLOOR);
        assert_eq!(model.connection_score(None, "I"), PROBABILITY_FLOOR);
    }

    #[test]
    fn test_top_words_and_pairs() {
        let model = LanguageModel::train(CORPUS);
        let top = model.top_words(2);
        assert_eq!(top.len(), 2);
        // Empate em 3/14: vence o menor índice (ordem alfabética)
        assert_eq!(top[0].word, "I");
        assert!((top[0].frequency - 3.0 / 14.0).abs() < 1e-12);

        // I→REALLY e LIKE→YOU empatam em 2/3
        let pairs = model.top_pairs(2);
        assert_eq!(pairs[0], ("I", "REALLY", 2.0 / 3.0));
        assert_eq!(pairs[1], ("LIKE", "YOU", 2.0 / 3.0));
    }

    #[test]
    fn test_save_and_restore() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.txt");

        let dict = PrefixDictionary::build(["I", "REALLY", "LIKE", "YOU"]);
        let model = LanguageModel::train_for_dictionary(&dict, CORPUS);
        model.save(&path).unwrap();

        let restored = LanguageModel::restore(&path, Some(model.fingerprint())).unwrap();
        assert_eq!(restored.vocabulary_size(), model.vocabulary_size());
        assert_eq!(restored.frequency_score("LIKE"), model.frequency_score("LIKE"));
        assert_eq!(
            restored.connection_score(Some("LIKE"), "YOU"),
            model.connection_score(Some("LIKE"), "YOU")
        );
        assert_eq!(restored.connection_score(None, "I"), model.connection_score(None, "I"));
    }

    #[test]
    fn test_restore_rejects_other_fingerprint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.txt");

        let dict = PrefixDictionary::build(["I", "LIKE"]);
        let model = LanguageModel::train_for_dictionary(&dict, CORPUS);
        model.save(&path).unwrap();

        let other = PrefixDictionary::build(["I", "LIKE", "YOU"]);
        let expected = model_fingerprint(Some(&other), CORPUS);
        let err = LanguageModel::restore(&path, Some(expected)).unwrap_err();
        assert!(matches!(err, MorseError::CacheMismatch { .. }));
    }

    #[test]
    fn test_restore_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.txt");

        std::fs::write(&path, "morse-lm 1 00000000000000ff\n2\n0 I 0.5\n").unwrap();
        let err = LanguageModel::restore(&path, None).unwrap_err();
        assert!(matches!(err, MorseError::InvalidCache { line: 4, .. }));

        std::fs::write(&path, "not a cache\n").unwrap();
        let err = LanguageModel::restore(&path, None).unwrap_err();
        assert!(matches!(err, MorseError::InvalidCache { line: 1, .. }));

        std::fs::write(&path, "morse-lm 1 ff\n1\n5 I 0.5\n0\n0\n").unwrap();
        let err = LanguageModel::restore(&path, None).unwrap_err();
        assert!(matches!(err, MorseError::InvalidCache { line: 3, .. }));

        // o índice 0 aparece duas vezes e o 1 fica vazio
        std::fs::write(&path, "morse-lm 1 ff\n2\n0 I 0.5\n0 YOU 0.5\n0\n0\n").unwrap();
        let err = LanguageModel::restore(&path, None).unwrap_err();
        assert!(matches!(err, MorseError::InvalidCache { line: 4, .. }));
    }

    #[test]
    fn test_load_or_train_reuses_and_invalidates_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.txt");
        let dict = PrefixDictionary::build(["I", "REALLY", "LIKE", "YOU"]);

        let first = LanguageModel::load_or_train(Some(&path), &dict, CORPUS).unwrap();
        assert!(path.exists());

        let second = LanguageModel::load_or_train(Some(&path), &dict, CORPUS).unwrap();
        assert_eq!(first.fingerprint(), second.fingerprint());

        // Outro corpus: o cache antigo não pode ser reaproveitado
        let other_corpus = ["You really like me."];
        let third = LanguageModel::load_or_train(Some(&path), &dict, &other_corpus).unwrap();
        assert_ne!(third.fingerprint(), first.fingerprint());
        assert_eq!(third.frequency_score("ME"), 0.25);

        let on_disk = LanguageModel::restore(&path, None).unwrap();
        assert_eq!(on_disk.fingerprint(), third.fingerprint());
    }
}
