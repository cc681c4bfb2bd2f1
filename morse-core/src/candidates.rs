//! # Gerador de Candidatos
//!
//! Para cada posição do código contínuo, enumera todas as palavras do
//! dicionário que podem começar ali, junto com a posição onde terminam.
//!
//! ## Intuição
//!
//! O código `".--.-"` pode ser lido como `.-|-.|-` (A N T), `.-|-.-` (A K),
//! `.--.|-` (P T), `.|--.-` (E Q) ... Em vez de gerar todas as leituras e só
//! depois consultar o dicionário, a busca anda em paralelo no código e na
//! trie: uma leitura só continua enquanto as letras decodificadas formam o
//! prefixo de alguma palavra.
//!
//! ```text
//! estado = (nó da trie, posição no código)
//! para cada comprimento de token 1..=4:
//!     token válido? → letra → filho na trie? → novo estado
//! nó terminal → candidato (posição, palavra)
//! ```
//!
//! Cada estado `(nó, posição)` é expandido uma única vez, pois a exploração
//! a partir dele não depende de como foi alcançado.

use std::collections::{BTreeMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dictionary::{NodeId, PrefixDictionary};
use crate::morse::lookup_token;

/// Uma palavra do dicionário que cobre o trecho `[start, end)` do código.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub start: usize,
    pub end: usize,
    pub word: String,
}

/// Todas as palavras que começam em `start`, ordenadas por `(end, word)`.
///
/// `max_token_len` limita quantos símbolos um token de letra pode ter
/// (4 no alfabeto Morse), o que limita o fator de ramificação por passo.
/// Um resultado vazio é válido: nenhuma palavra começa nesta posição.
pub fn find_candidates_at(
    code: &str,
    start: usize,
    dictionary: &PrefixDictionary,
    max_token_len: usize,
) -> Vec<Candidate> {
    let mut found = Vec::new();
    let mut queue: VecDeque<(NodeId, usize)> = VecDeque::new();
    let mut seen: HashSet<(NodeId, usize)> = HashSet::new();

    queue.push_back((dictionary.root(), start));
    seen.insert((dictionary.root(), start));

    while let Some((node, pos)) = queue.pop_front() {
        if let Ok(word) = dictionary.word_at(node) {
            found.push(Candidate {
                start,
                end: pos,
                word: word.to_string(),
            });
        }
        if pos >= code.len() {
            continue;
        }

        let max_len = max_token_len.min(code.len() - pos);
        for len in 1..=max_len {
            let Some(letter) = code.get(pos..pos + len).and_then(lookup_token) else {
                continue;
            };
            if let Some(next) = dictionary.child(node, letter) {
                if seen.insert((next, pos + len)) {
                    queue.push_back((next, pos + len));
                }
            }
        }
    }

    found.sort_by(|a, b| a.end.cmp(&b.end).then_with(|| a.word.cmp(&b.word)));
    found
}

/// Candidatos de todas as posições alcançáveis a partir do início do código.
#[derive(Debug, Clone, Default)]
pub struct CandidateLattice {
    code_len: usize,
    by_offset: BTreeMap<usize, Vec<Candidate>>,
}

impl CandidateLattice {
    /// Candidatos que começam em `offset` (vazio se a posição não é alcançável).
    pub fn at(&self, offset: usize) -> &[Candidate] {
        self.by_offset.get(&offset).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Posições visitadas, em ordem crescente.
    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.by_offset.keys().copied()
    }

    pub fn code_len(&self) -> usize {
        self.code_len
    }

    /// Total de candidatos em todas as posições.
    pub fn candidate_count(&self) -> usize {
        self.by_offset.values().map(Vec::len).sum()
    }

    /// `true` se algum candidato termina exatamente no fim do código.
    pub fn reaches_end(&self) -> bool {
        self.by_offset
            .values()
            .flatten()
            .any(|c| c.end == self.code_len)
    }
}

/// Calcula os candidatos de cada posição alcançável a partir de 0.
///
/// Uma fila de trabalho é alimentada com as posições finais dos candidatos;
/// cada posição é calculada uma única vez.
pub fn find_all_candidates(
    code: &str,
    dictionary: &PrefixDictionary,
    max_token_len: usize,
) -> CandidateLattice {
    let n = code.len();
    let mut lattice = CandidateLattice {
        code_len: n,
        by_offset: BTreeMap::new(),
    };
    let mut visited = vec![false; n + 1];
    let mut queue = VecDeque::from([0usize]);

    while let Some(offset) = queue.pop_front() {
        if offset >= n || visited[offset] {
            continue;
        }
        visited[offset] = true;

        let candidates = find_candidates_at(code, offset, dictionary, max_token_len);
        queue.extend(candidates.iter().map(|c| c.end));
        lattice.by_offset.insert(offset, candidates);
    }

    debug!(
        code_len = n,
        offsets = lattice.by_offset.len(),
        candidates = lattice.candidate_count(),
        "candidatos calculados"
    );
    lattice
}
