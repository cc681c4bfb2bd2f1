//! # Busca de Segmentação (Beam Search)
//!
//! Encontra a sequência de palavras de maior score que cobre o código
//! inteiro, usando os candidatos de [`crate::candidates`] e os scores do
//! [`LanguageModel`].
//!
//! ## Algoritmo
//!
//! O problema é um caminho mais "pesado" em um DAG de posições `0..=N`:
//! cada candidato `(i → j, palavra)` é uma aresta. Como toda aresta avança
//! (`j > i`), as posições são processadas em ordem crescente:
//!
//! ```text
//! para cada posição i (crescente):
//!     estados em i ← ordena por (score ↓, nº de palavras ↑), mantém os K melhores
//!     para cada estado retido e cada candidato (j, w) em i:
//!         score' = score + aresta(conexão(w_anterior, w), frequência(w))
//!         insere/atualiza o estado (j, w)
//! estados em N → vencedor → backtracking pelos predecessores
//! ```
//!
//! ## Identidade dos estados
//!
//! Dois estados na mesma posição com a mesma última palavra são
//! indistinguíveis para o modelo de bigramas: todas as expansões futuras
//! recebem os mesmos scores. Por isso a chave de um estado é o par
//! [`StateKey`] `(posição, última palavra)` e só o melhor estado de cada
//! chave sobrevive. Com `K = 1` a busca se reduz à programação dinâmica de
//! um caminho por posição.
//!
//! ## Desempate
//!
//! Score maior vence; depois, menos palavras. Entre segmentações completas,
//! vence ainda a de última palavra mais frequente. Empates restantes seguem
//! a ordem das chaves (alfabética pela última palavra), o que torna o
//! resultado determinístico.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::candidates::CandidateLattice;
use crate::error::{MorseError, Result};
use crate::language_model::{LanguageModel, WordId};

/// Como os scores de conexão e frequência se combinam em cada aresta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// `ln(conexão) + ln(frequência)`: produto das probabilidades em log-space.
    LogProduct,
    /// `conexão + peso × frequência`, somado ao longo do caminho.
    WeightedSum {
        #[serde(default = "default_frequency_weight")]
        frequency_weight: f64,
    },
}

fn default_frequency_weight() -> f64 {
    0.1
}

impl ScoringPolicy {
    /// Score de uma aresta.
    pub fn edge_score(&self, connection: f64, frequency: f64) -> f64 {
        match self {
            ScoringPolicy::LogProduct => connection.ln() + frequency.ln(),
            ScoringPolicy::WeightedSum { frequency_weight } => {
                connection + frequency_weight * frequency
            }
        }
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        ScoringPolicy::LogProduct
    }
}

/// Parâmetros da busca.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Estados mantidos por posição (K)
    pub beam_width: usize,
    /// Limite de arestas avaliadas antes de desistir
    pub max_expansions: usize,
    pub scoring: ScoringPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            beam_width: 8,
            max_expansions: 200_000,
            scoring: ScoringPolicy::default(),
        }
    }
}

/// Chave de identidade de um estado da busca.
///
/// A ordem derivada (posição, depois última palavra) é a ordem em que a
/// fronteira é consumida.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateKey<'a> {
    pub position: usize,
    pub last_word: Option<&'a str>,
}

type StateId = usize;

#[derive(Debug, Clone)]
struct SearchState<'a> {
    position: usize,
    score: f64,
    word_count: usize,
    prev: Option<StateId>,
    word: Option<&'a str>,
    word_id: Option<WordId>,
}

/// Ordem de ranking: score maior primeiro, depois menos palavras.
fn rank_order(a: &SearchState<'_>, b: &SearchState<'_>) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then(a.word_count.cmp(&b.word_count))
}

/// Um estado retido em um passo da busca (para visualização).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamEntry {
    pub rank: usize,
    pub score: f64,
    pub word_count: usize,
    pub last_word: Option<String>,
}

/// Estado do feixe ao processar uma posição.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamStep {
    pub position: usize,
    /// Estados mantidos, em ordem de ranking
    pub retained: Vec<BeamEntry>,
    /// Estados descartados pelo limite do feixe
    pub pruned: usize,
}

/// Resultado da busca.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segmentation {
    /// Palavras na ordem do código
    pub words: Vec<String>,
    /// Score acumulado do caminho vencedor
    pub score: f64,
    /// Arestas avaliadas
    pub expansions: usize,
    /// Passos do feixe, um por posição processada
    pub steps: Vec<BeamStep>,
}

impl Segmentation {
    /// Palavras unidas por espaço.
    pub fn sentence(&self) -> String {
        self.words.join(" ")
    }
}

/// Motor de busca sobre um modelo de linguagem compartilhado.
pub struct SegmentationSearch<'m> {
    model: &'m LanguageModel,
    config: SearchConfig,
}

impl<'m> SegmentationSearch<'m> {
    pub fn new(model: &'m LanguageModel, config: SearchConfig) -> Self {
        Self { model, config }
    }

    /// Executa a busca sobre os candidatos de um código.
    ///
    /// Retorna [`MorseError::NoSegmentationFound`] se nenhuma sequência de
    /// palavras cobre o código ou se o limite de expansões é atingido.
    /// O código vazio produz uma segmentação vazia.
    pub fn run(&self, lattice: &CandidateLattice) -> Result<Segmentation> {
        let n = lattice.code_len();
        let beam_width = self.config.beam_width.max(1);

        let mut arena: Vec<SearchState<'_>> = vec![SearchState {
            position: 0,
            score: 0.0,
            word_count: 0,
            prev: None,
            word: None,
            word_id: None,
        }];
        let mut frontier: BTreeMap<StateKey<'_>, StateId> = BTreeMap::new();
        frontier.insert(
            StateKey {
                position: 0,
                last_word: None,
            },
            0,
        );

        let mut ids: HashMap<&str, Option<WordId>> = HashMap::new();
        let mut steps = Vec::new();
        let mut expansions = 0usize;
        let mut completed: Vec<StateId> = Vec::new();

        while let Some(position) = frontier.first_key_value().map(|(k, _)| k.position) {
            // Retira todos os estados desta posição; inserções só ocorrem em posições maiores
            let mut layer: Vec<StateId> = Vec::new();
            while let Some(entry) = frontier.first_entry() {
                if entry.key().position != position {
                    break;
                }
                layer.push(entry.remove());
            }

            if position == n {
                completed = layer;
                break;
            }

            layer.sort_by(|a, b| rank_order(&arena[*a], &arena[*b]));
            let pruned = layer.len().saturating_sub(beam_width);
            layer.truncate(beam_width);
            steps.push(self.beam_step(position, &layer, pruned, &arena));

            for &sid in &layer {
                let (score, word_count, word, word_id) = {
                    let s = &arena[sid];
                    (s.score, s.word_count, s.word, s.word_id)
                };

                for cand in lattice.at(position) {
                    expansions += 1;
                    if expansions > self.config.max_expansions {
                        warn!(
                            code_len = n,
                            max_expansions = self.config.max_expansions,
                            "limite de expansões atingido"
                        );
                        return Err(MorseError::NoSegmentationFound { code_len: n });
                    }

                    let next_id = *ids
                        .entry(cand.word.as_str())
                        .or_insert_with(|| self.model.lookup(&cand.word));
                    let connection = match word {
                        None => self.model.start_score_by_id(next_id),
                        Some(_) => self.model.connection_score_by_id(word_id, next_id),
                    };
                    let frequency = self.model.frequency_score_by_id(next_id);

                    let candidate_state = SearchState {
                        position: cand.end,
                        score: score + self.config.scoring.edge_score(connection, frequency),
                        word_count: word_count + 1,
                        prev: Some(sid),
                        word: Some(cand.word.as_str()),
                        word_id: next_id,
                    };
                    let key = StateKey {
                        position: cand.end,
                        last_word: Some(cand.word.as_str()),
                    };

                    // Só substitui um estado de mesma chave se for estritamente melhor
                    let better = match frontier.get(&key) {
                        Some(&existing) => {
                            rank_order(&candidate_state, &arena[existing]) == Ordering::Less
                        }
                        None => true,
                    };
                    if better {
                        arena.push(candidate_state);
                        frontier.insert(key, arena.len() - 1);
                    }
                }
            }
        }

        if n == 0 {
            return Ok(Segmentation {
                words: Vec::new(),
                score: 0.0,
                expansions,
                steps,
            });
        }

        // Desempate final: última palavra mais frequente
        completed.sort_by(|a, b| {
            let (sa, sb) = (&arena[*a], &arena[*b]);
            rank_order(sa, sb).then_with(|| {
                let fa = self.model.frequency_score_by_id(sa.word_id);
                let fb = self.model.frequency_score_by_id(sb.word_id);
                fb.partial_cmp(&fa).unwrap_or(Ordering::Equal)
            })
        });

        let Some(&winner) = completed.first() else {
            debug!(code_len = n, expansions, "nenhuma segmentação completa");
            return Err(MorseError::NoSegmentationFound { code_len: n });
        };

        let pruned = completed.len().saturating_sub(beam_width);
        let shown: Vec<StateId> = completed.iter().copied().take(beam_width).collect();
        steps.push(self.beam_step(n, &shown, pruned, &arena));

        let words = backtrack(&arena, winner);
        debug!(
            code_len = n,
            words = words.len(),
            expansions,
            states = arena.len(),
            "segmentação encontrada"
        );
        Ok(Segmentation {
            words,
            score: arena[winner].score,
            expansions,
            steps,
        })
    }

    fn beam_step(
        &self,
        position: usize,
        layer: &[StateId],
        pruned: usize,
        arena: &[SearchState<'_>],
    ) -> BeamStep {
        BeamStep {
            position,
            retained: layer
                .iter()
                .enumerate()
                .map(|(rank, &sid)| {
                    let s = &arena[sid];
                    BeamEntry {
                        rank,
                        score: s.score,
                        word_count: s.word_count,
                        last_word: s.word.map(str::to_string),
                    }
                })
                .collect(),
            pruned,
        }
    }
}

/// Reconstrói a sequência de palavras seguindo os predecessores.
fn backtrack(arena: &[SearchState<'_>], last: StateId) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = Some(last);
    while let Some(sid) = current {
        let state = &arena[sid];
        if let Some(word) = state.word {
            words.push(word.to_string());
        }
        debug_assert!(state.prev.map_or(true, |p| arena[p].position < state.position));
        current = state.prev;
    }
    words.reverse();
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::find_all_candidates;
    use crate::dictionary::PrefixDictionary;
    use crate::morse::{encode_text, encode_words, MAX_TOKEN_LEN};

    fn decode(
        dict_words: &[&str],
        corpus: &[&str],
        code: &str,
        config: SearchConfig,
    ) -> Result<Segmentation> {
        let dict = PrefixDictionary::build(dict_words.iter().copied());
        let model = LanguageModel::train(corpus);
        let lattice = find_all_candidates(code, &dict, MAX_TOKEN_LEN);
        SegmentationSearch::new(&model, config).run(&lattice)
    }

    #[test]
    fn test_i_really_like_you() {
        let code = encode_text("IREALLYLIKEYOU").unwrap();
        let result = decode(
            &["I", "REALLY", "LIKE", "YOU"],
            &["I really like you."],
            &code,
            SearchConfig::default(),
        )
        .unwrap();

        assert_eq!(result.words, vec!["I", "REALLY", "LIKE", "YOU"]);
        assert_eq!(encode_words(&result.words).unwrap(), code);
    }

    #[test]
    fn test_scoring_decides_between_ant_and_an_t() {
        let code = encode_text("ANT").unwrap();
        let dict = ["AN", "ANT", "T"];

        let result = decode(&dict, &["ant ant ant. an."], &code, SearchConfig::default()).unwrap();
        assert_eq!(result.words, vec!["ANT"]);

        let result = decode(&dict, &["an t. an t. ant."], &code, SearchConfig::default()).unwrap();
        assert_eq!(result.words, vec!["AN", "T"]);
    }

    #[test]
    fn test_unsegmentable_code() {
        // I = "..", seguido de um "." (E) que não está no dicionário
        let err = decode(&["I"], &["I."], "...", SearchConfig::default()).unwrap_err();
        assert!(matches!(err, MorseError::NoSegmentationFound { code_len: 3 }));
    }

    #[test]
    fn test_empty_code() {
        let result = decode(&["I"], &["I."], "", SearchConfig::default()).unwrap();
        assert!(result.words.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let code = encode_text("ANT").unwrap();
        let dict = ["AN", "ANT", "T", "A", "N", "E", "TEN", "ATE"];
        let a = decode(&dict, &[], &code, SearchConfig::default()).unwrap();
        for _ in 0..5 {
            let b = decode(&dict, &[], &code, SearchConfig::default()).unwrap();
            assert_eq!(a.words, b.words);
            assert_eq!(a.score, b.score);
        }
    }

    #[test]
    fn test_expansion_limit() {
        let code = encode_text("ANT").unwrap();
        let config = SearchConfig {
            max_expansions: 1,
            ..SearchConfig::default()
        };
        let err = decode(&["AN", "ANT", "T"], &["an t."], &code, config).unwrap_err();
        assert!(matches!(err, MorseError::NoSegmentationFound { .. }));
    }

    #[test]
    fn test_beam_width_one() {
        let code = encode_text("ANT").unwrap();
        let config = SearchConfig {
            beam_width: 1,
            ..SearchConfig::default()
        };
        let result = decode(&["AN", "ANT", "T"], &["an t. an t. ant."], &code, config).unwrap();
        assert_eq!(result.words, vec!["AN", "T"]);
        assert!(result.steps.iter().all(|s| s.retained.len() <= 1));
    }

    #[test]
    fn test_final_tie_break_prefers_frequent_last_word() {
        // ".-" é A ou E+T. Com peso de frequência zero e nenhuma das duas
        // iniciando sentença, os scores empatam e decide a frequência.
        let config = SearchConfig {
            scoring: ScoringPolicy::WeightedSum {
                frequency_weight: 0.0,
            },
            ..SearchConfig::default()
        };
        let result = decode(&["A", "ET"], &["x a et et."], ".-", config).unwrap();
        assert_eq!(result.words, vec!["ET"]);
    }

    #[test]
    fn test_rank_order() {
        let state = |score: f64, word_count: usize| SearchState {
            position: 1,
            score,
            word_count,
            prev: None,
            word: None,
            word_id: None,
        };
        assert_eq!(rank_order(&state(-1.0, 3), &state(-2.0, 1)), Ordering::Less);
        assert_eq!(rank_order(&state(-1.0, 1), &state(-1.0, 2)), Ordering::Less);
        assert_eq!(rank_order(&state(-1.0, 2), &state(-1.0, 2)), Ordering::Equal);
    }

    #[test]
    fn test_steps_are_recorded() {
        let code = encode_text("ANT").unwrap();
        let result = decode(&["AN", "ANT", "T"], &["an t."], &code, SearchConfig::default()).unwrap();
        let positions: Vec<usize> = result.steps.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0, 4, 5]);
        assert_eq!(result.steps[0].retained[0].last_word, None);
        assert_eq!(result.steps[2].retained.len(), 2);
    }

    #[test]
    fn test_edge_score_policies() {
        let p = ScoringPolicy::LogProduct.edge_score(0.5, 0.25);
        assert!((p - (0.5f64.ln() + 0.25f64.ln())).abs() < 1e-12);

        let p = ScoringPolicy::WeightedSum {
            frequency_weight: 0.1,
        }
        .edge_score(0.5, 0.25);
        assert!((p - 0.525).abs() < 1e-12);
    }
}
