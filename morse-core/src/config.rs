//! # Configuração do Decodificador
//!
//! Parâmetros ajustáveis do pipeline. Todos têm valores padrão; um arquivo
//! JSON pode sobrescrever qualquer subconjunto deles:
//!
//! ```json
//! {
//!   "beam_width": 16,
//!   "scoring": { "policy": "weighted_sum", "frequency_weight": 0.1 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MorseError, Result};
use crate::morse::MAX_TOKEN_LEN;
use crate::search::{ScoringPolicy, SearchConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Estados mantidos por posição na busca (K)
    pub beam_width: usize,
    /// Maior token de letra considerado pelo gerador de candidatos
    pub max_token_len: usize,
    /// Limite de arestas avaliadas por decodificação
    pub max_expansions: usize,
    pub scoring: ScoringPolicy,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        let search = SearchConfig::default();
        Self {
            beam_width: search.beam_width,
            max_token_len: MAX_TOKEN_LEN,
            max_expansions: search.max_expansions,
            scoring: search.scoring,
        }
    }
}

impl DecoderConfig {
    /// Lê e valida uma configuração em JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| MorseError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.beam_width == 0 {
            return Err(MorseError::InvalidConfig("beam_width deve ser maior que zero".into()));
        }
        if !(1..=MAX_TOKEN_LEN).contains(&self.max_token_len) {
            return Err(MorseError::InvalidConfig(format!(
                "max_token_len deve estar entre 1 e {MAX_TOKEN_LEN}"
            )));
        }
        if self.max_expansions == 0 {
            return Err(MorseError::InvalidConfig("max_expansions deve ser maior que zero".into()));
        }
        if let ScoringPolicy::WeightedSum { frequency_weight } = self.scoring {
            if !frequency_weight.is_finite() || frequency_weight < 0.0 {
                return Err(MorseError::InvalidConfig(
                    "frequency_weight deve ser finito e não negativo".into(),
                ));
            }
        }
        Ok(())
    }

    /// Parâmetros repassados à busca.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            beam_width: self.beam_width,
            max_expansions: self.max_expansions,
            scoring: self.scoring,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DecoderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_token_len, 4);
        assert_eq!(config.scoring, ScoringPolicy::LogProduct);
    }

    #[test]
    fn test_partial_json() {
        let config = DecoderConfig::from_json_str(
            r#"{"beam_width": 3, "scoring": {"policy": "weighted_sum", "frequency_weight": 0.25}}"#,
        )
        .unwrap();
        assert_eq!(config.beam_width, 3);
        assert_eq!(config.max_token_len, 4);
        assert_eq!(
            config.scoring,
            ScoringPolicy::WeightedSum {
                frequency_weight: 0.25
            }
        );
        assert_eq!(config.search_config().beam_width, 3);
    }

    #[test]
    fn test_weighted_sum_default_weight() {
        let config = DecoderConfig::from_json_str(r#"{"scoring": {"policy": "weighted_sum"}}"#).unwrap();
        assert_eq!(
            config.scoring,
            ScoringPolicy::WeightedSum {
                frequency_weight: 0.1
            }
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            DecoderConfig::from_json_str(r#"{"beam_width": 0}"#),
            Err(MorseError::InvalidConfig(_))
        ));
        assert!(matches!(
            DecoderConfig::from_json_str(r#"{"max_token_len": 5}"#),
            Err(MorseError::InvalidConfig(_))
        ));
        assert!(matches!(
            DecoderConfig::from_json_str(r#"{"scoring": {"policy": "weighted_sum", "frequency_weight": -1.0}}"#),
            Err(MorseError::InvalidConfig(_))
        ));
        assert!(matches!(
            DecoderConfig::from_json_str("not json"),
            Err(MorseError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decoder.json");
        std::fs::write(&path, r#"{"scoring": {"policy": "log_product"}}"#).unwrap();
        let config = DecoderConfig::from_json_file(&path).unwrap();
        assert_eq!(config, DecoderConfig::default());
    }
}
