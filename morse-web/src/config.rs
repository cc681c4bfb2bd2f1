//! Configuração do servidor: argumentos de linha de comando com fallback
//! para variáveis de ambiente `MORSE_*`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use morse_core::corpus::{builtin_corpus, builtin_dictionary, load_documents};
use morse_core::{load_word_list, DecoderConfig, LanguageModel, MorseDecoder};
use tracing::info;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "morse-web")]
#[command(about = "Servidor do decodificador de código Morse contínuo")]
pub struct ServerConfig {
    /// Endereço de escuta
    #[arg(long, env = "MORSE_BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind_addr: String,

    /// Lista de palavras, uma por linha
    #[arg(long, env = "MORSE_DICTIONARY")]
    pub dictionary: Option<PathBuf>,

    /// Documentos de treino separados por vírgula
    #[arg(long, env = "MORSE_CORPUS", value_delimiter = ',')]
    pub corpus: Vec<PathBuf>,

    /// Arquivo de cache do modelo de linguagem
    #[arg(long, env = "MORSE_MODEL_CACHE")]
    pub model_cache: Option<PathBuf>,

    /// Arquivo JSON com um `DecoderConfig`
    #[arg(long, env = "MORSE_DECODER_CONFIG")]
    pub decoder_config: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            dictionary: None,
            corpus: Vec::new(),
            model_cache: None,
            decoder_config: None,
        }
    }
}

impl ServerConfig {
    /// Carrega dicionário, corpus, modelo e parâmetros descritos pela configuração.
    pub fn build_decoder(&self) -> morse_core::Result<MorseDecoder> {
        let dictionary = match &self.dictionary {
            Some(path) => load_word_list(path)?,
            None => builtin_dictionary(),
        };

        let documents: Vec<String> = if self.corpus.is_empty() {
            builtin_corpus().iter().map(|d| d.to_string()).collect()
        } else {
            load_documents(&self.corpus)?
        };

        let model = LanguageModel::load_or_train(self.model_cache.as_deref(), &dictionary, &documents)?;

        let decoder_config = match &self.decoder_config {
            Some(path) => DecoderConfig::from_json_file(path)?,
            None => DecoderConfig::default(),
        };

        info!(
            words = dictionary.len(),
            vocabulary = model.vocabulary_size(),
            beam_width = decoder_config.beam_width,
            "decodificador pronto"
        );
        MorseDecoder::new(Arc::new(dictionary), Arc::new(model)).with_config(decoder_config)
    }
}
