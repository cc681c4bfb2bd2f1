//! # Erros do Decodificador Morse
//!
//! Todos os erros são retornados como valores. Nenhuma operação de busca
//! altera o dicionário ou o modelo de linguagem, então um erro nunca deixa
//! estado compartilhado pela metade.

use thiserror::Error;

/// Tipo de erro principal do crate.
#[derive(Debug, Error)]
pub enum MorseError {
    /// Caractere sem código Morse no alfabeto (A–Z, sem distinção de caixa).
    #[error("Símbolo desconhecido para codificação: {symbol:?}")]
    UnknownSymbol { symbol: char },

    /// Sequência de pontos/traços que não corresponde a nenhuma das 26 letras.
    #[error("Token Morse desconhecido: {token:?}")]
    UnknownToken { token: String },

    /// Consulta de palavra em um nó do dicionário que não termina palavra.
    #[error("O nó consultado não termina nenhuma palavra do dicionário")]
    NotTerminal,

    /// Nenhuma sequência de palavras cobre o código inteiro.
    ///
    /// Também é o resultado quando o limite de expansões da busca é atingido.
    #[error("Nenhuma segmentação cobre o código de {code_len} símbolos")]
    NoSegmentationFound { code_len: usize },

    /// O código de entrada contém algo além de `.` e `-`.
    #[error("Código inválido: símbolo {symbol:?} na posição {position}")]
    InvalidCode { symbol: char, position: usize },

    #[error("Erro de I/O: {0}")]
    Io(#[from] std::io::Error),

    /// O arquivo de cache do modelo está mal formado.
    #[error("Cache do modelo inválido (linha {line}): {reason}")]
    InvalidCache { line: usize, reason: String },

    /// O cache foi gerado com outro dicionário ou outro corpus.
    #[error("Cache do modelo incompatível: esperado {expected:016x}, encontrado {found:016x}")]
    CacheMismatch { expected: u64, found: u64 },

    #[error("Configuração inválida: {0}")]
    InvalidConfig(String),
}

impl MorseError {
    /// `true` quando o erro significa "entrada não decodificável".
    ///
    /// Útil para a camada de apresentação distinguir uma falha esperada
    /// (código que não forma frase) de um erro de uso ou de I/O.
    pub fn is_undecodable(&self) -> bool {
        matches!(self, MorseError::NoSegmentationFound { .. })
    }
}

/// Alias de `Result` com [`MorseError`].
pub type Result<T> = std::result::Result<T, MorseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MorseError::UnknownSymbol { symbol: '#' };
        assert!(err.to_string().contains("'#'"));

        let err = MorseError::CacheMismatch { expected: 1, found: 2 };
        assert!(err.to_string().contains("0000000000000001"));
    }

    #[test]
    fn test_is_undecodable() {
        assert!(MorseError::NoSegmentationFound { code_len: 3 }.is_undecodable());
        assert!(!MorseError::NotTerminal.is_undecodable());
    }
}
