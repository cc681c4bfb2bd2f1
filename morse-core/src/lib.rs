//! # morse-core: Decodificador de Código Morse Contínuo
//!
//! Este crate decodifica código Morse **sem separadores**: nem entre letras,
//! nem entre palavras. O código `".-.-..."` não diz onde cada letra termina,
//! então a mesma sequência de pontos e traços admite muitas leituras. O
//! decodificador escolhe a frase mais plausível combinando um dicionário de
//! palavras com um modelo de linguagem de bigramas.
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui por um pipeline linear:
//!
//! 1.  **Entrada**: código contínuo (`.`/`-`) ou uma frase a ser codificada ([`morse`]).
//! 2.  **Candidatos** ([`candidates`]): a cada posição, as palavras do
//!     [`dictionary`] que podem começar ali, com a posição onde terminam.
//! 3.  **Busca** ([`search`]): feixe sobre as posições do código, pontuado
//!     pelo [`language_model`] treinado em um corpus ([`tokenizer`], [`corpus`]).
//! 4.  **Saída**: a sequência de palavras cuja codificação reproduz o código.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use morse_core::{encode_words, MorseDecoder};
//!
//! // 1. Dicionário e modelo embutidos
//! let decoder = MorseDecoder::builtin();
//!
//! // 2. Codifica e decodifica de volta
//! let code = decoder.encode_sentence("I really like you").unwrap();
//! let result = decoder.decode_code(&code).unwrap();
//!
//! // 3. As palavras encontradas sempre reproduzem o código original
//! assert_eq!(encode_words(&result.words).unwrap(), code);
//! println!("{} (score {:.2})", result.sentence(), result.score);
//! ```
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: orquestrador que conecta todos os estágios e emite eventos.
//! - [`search`]: busca em feixe e política de pontuação.
//! - [`language_model`]: treino, consulta e cache do modelo de bigramas.
//! - [`config`]: parâmetros do decodificador.

pub mod candidates;
pub mod config;
pub mod corpus;
pub mod dictionary;
pub mod error;
pub mod language_model;
pub mod morse;
pub mod pipeline;
pub mod search;
pub mod tokenizer;

pub use candidates::{find_all_candidates, find_candidates_at, Candidate, CandidateLattice};
pub use config::DecoderConfig;
pub use dictionary::{load_word_list, NodeId, PrefixDictionary};
pub use error::{MorseError, Result};
pub use language_model::{LanguageModel, ModelStats, WordFrequency};
pub use morse::{decode_token, encode_letter, encode_text, encode_words};
pub use pipeline::{DecodeEvent, MorseDecoder};
pub use search::{BeamStep, ScoringPolicy, SearchConfig, Segmentation, SegmentationSearch};
