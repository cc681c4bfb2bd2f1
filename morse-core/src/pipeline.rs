//! # Pipeline de Decodificação: Orquestrador com Eventos Observáveis
//!
//! O pipeline coordena os módulos (validação do código, gerador de
//! candidatos, busca em feixe) e emite eventos em cada passo via um canal
//! Rust (`mpsc`), permitindo que o servidor WebSocket transmita o progresso
//! em tempo real para o cliente.
//!
//! ```text
//! código ─▶ CodeReceived ─▶ CandidatesFound (por posição)
//!        ─▶ BeamStep (por posição processada) ─▶ WordPlaced (por palavra) ─▶ Done
//! ```
//!
//! Em caso de falha o último evento é `Error`, e o mesmo erro é retornado.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::candidates::{find_all_candidates, Candidate};
use crate::config::DecoderConfig;
use crate::corpus::{builtin_corpus, builtin_dictionary};
use crate::dictionary::PrefixDictionary;
use crate::error::{MorseError, Result};
use crate::language_model::LanguageModel;
use crate::morse::{encode_text, encode_words, is_code_symbol, remove_whitespace};
use crate::search::{BeamStep, Segmentation, SegmentationSearch};

/// Eventos emitidos pelo pipeline durante a decodificação.
///
/// Permitem que a UI visualize o "raciocínio" da busca passo a passo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DecodeEvent {
    /// **Passo 1**: código validado.
    CodeReceived { code: String, code_len: usize },
    /// **Passo 2**: palavras que começam em uma posição alcançável.
    CandidatesFound {
        offset: usize,
        candidates: Vec<Candidate>,
    },
    /// **Passo 3**: estados retidos pelo feixe em uma posição.
    BeamStep { step: BeamStep },
    /// **Passo 4**: uma palavra da segmentação vencedora e o trecho que cobre.
    WordPlaced {
        index: usize,
        word: String,
        start: usize,
        end: usize,
        code: String,
    },
    /// **Conclusão**: resultado final e estatísticas.
    Done {
        words: Vec<String>,
        sentence: String,
        score: f64,
        expansions: usize,
        code_len: usize,
        processing_ms: u64,
    },
    /// **Falha**: código inválido ou sem segmentação.
    Error { message: String },
}

/// O decodificador de Morse contínuo.
///
/// Dicionário e modelo são compartilhados via `Arc` e nunca modificados,
/// então um mesmo decodificador atende várias requisições em paralelo.
///
/// # Modos de Uso
/// - **Sync**: [`MorseDecoder::decode_code`] / [`MorseDecoder::decode_sentence`].
/// - **Streaming**: [`MorseDecoder::decode_streaming`] para UIs reativas.
#[derive(Clone)]
pub struct MorseDecoder {
    dictionary: Arc<PrefixDictionary>,
    model: Arc<LanguageModel>,
    config: DecoderConfig,
}

impl MorseDecoder {
    pub fn new(dictionary: Arc<PrefixDictionary>, model: Arc<LanguageModel>) -> Self {
        Self {
            dictionary,
            model,
            config: DecoderConfig::default(),
        }
    }

    /// Troca os parâmetros do decodificador; parâmetros inválidos são recusados.
    pub fn with_config(mut self, config: DecoderConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Decodificador com o dicionário e o corpus embutidos.
    pub fn builtin() -> Self {
        let dictionary = builtin_dictionary();
        let model = LanguageModel::train_for_dictionary(&dictionary, builtin_corpus());
        Self::new(Arc::new(dictionary), Arc::new(model))
    }

    pub fn dictionary(&self) -> &PrefixDictionary {
        &self.dictionary
    }

    pub fn model(&self) -> &LanguageModel {
        &self.model
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Codifica uma frase: remove os espaços e concatena os códigos das letras.
    pub fn encode_sentence(&self, text: &str) -> Result<String> {
        encode_text(&remove_whitespace(text))
    }

    /// Decodifica um código contínuo. Espaços no código são ignorados.
    pub fn decode_code(&self, code: &str) -> Result<Segmentation> {
        self.run(code, None)
    }

    /// Codifica a frase, decodifica o código e confere que a codificação
    /// das palavras encontradas reproduz exatamente o mesmo código.
    pub fn decode_sentence(&self, text: &str) -> Result<Segmentation> {
        let code = self.encode_sentence(text)?;
        let segmentation = self.decode_code(&code)?;
        if encode_words(&segmentation.words)? != code {
            return Err(MorseError::NoSegmentationFound {
                code_len: code.len(),
            });
        }
        Ok(segmentation)
    }

    /// Decodifica enviando eventos de progresso pelo canal `tx`.
    ///
    /// O resultado também é retornado; um receptor já descartado não
    /// interrompe a decodificação.
    pub fn decode_streaming(
        &self,
        code: &str,
        tx: &mpsc::Sender<DecodeEvent>,
    ) -> Result<Segmentation> {
        let result = self.run(code, Some(tx));
        if let Err(err) = &result {
            let _ = tx.send(DecodeEvent::Error {
                message: err.to_string(),
            });
        }
        result
    }

    fn run(&self, code: &str, tx: Option<&mpsc::Sender<DecodeEvent>>) -> Result<Segmentation> {
        let start = Instant::now();
        let emit = |event: DecodeEvent| {
            if let Some(tx) = tx {
                let _ = tx.send(event);
            }
        };

        // === Passo 1: Validação ===
        let code = validate_code(code)?;
        emit(DecodeEvent::CodeReceived {
            code: code.clone(),
            code_len: code.len(),
        });

        // === Passo 2: Candidatos ===
        let lattice = find_all_candidates(&code, &self.dictionary, self.config.max_token_len);
        if tx.is_some() {
            for offset in lattice.offsets() {
                emit(DecodeEvent::CandidatesFound {
                    offset,
                    candidates: lattice.at(offset).to_vec(),
                });
            }
        }

        // === Passo 3: Busca ===
        let segmentation =
            SegmentationSearch::new(&self.model, self.config.search_config()).run(&lattice)?;
        if tx.is_some() {
            for step in &segmentation.steps {
                emit(DecodeEvent::BeamStep { step: step.clone() });
            }

            // === Passo 4: Palavras posicionadas no código ===
            let mut offset = 0;
            for (index, word) in segmentation.words.iter().enumerate() {
                let word_code = encode_text(word)?;
                let end = offset + word_code.len();
                emit(DecodeEvent::WordPlaced {
                    index,
                    word: word.clone(),
                    start: offset,
                    end,
                    code: word_code,
                });
                offset = end;
            }
        }

        let processing_ms = start.elapsed().as_millis() as u64;
        info!(
            code_len = code.len(),
            words = segmentation.words.len(),
            expansions = segmentation.expansions,
            processing_ms,
            "código decodificado"
        );
        emit(DecodeEvent::Done {
            words: segmentation.words.clone(),
            sentence: segmentation.sentence(),
            score: segmentation.score,
            expansions: segmentation.expansions,
            code_len: code.len(),
            processing_ms,
        });
        Ok(segmentation)
    }
}

impl Default for MorseDecoder {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Remove espaços e rejeita qualquer símbolo além de `.` e `-`.
///
/// A posição do erro é o índice do caractere no código sem espaços.
fn validate_code(code: &str) -> Result<String> {
    let code = remove_whitespace(code);
    if let Some((position, symbol)) = code.chars().enumerate().find(|(_, c)| !is_code_symbol(*c)) {
        return Err(MorseError::InvalidCode { symbol, position });
    }
    Ok(code)
}
