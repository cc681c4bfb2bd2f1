//! # Alfabeto Morse: Codificação e Decodificação
//!
//! Tabela fixa e bijetiva entre as 26 letras latinas e seus códigos Morse
//! (1 a 4 símbolos de ponto/traço). A tabela é uma constante do módulo:
//! nunca é alterada e pode ser compartilhada entre threads sem sincronização.
//!
//! ## Exemplo
//!
//! ```rust
//! use morse_core::morse::{decode_token, encode_text};
//!
//! assert_eq!(encode_text("SOS").unwrap(), "...---...");
//! assert_eq!(decode_token("---").unwrap(), 'O');
//! ```

use crate::error::{MorseError, Result};

/// Maior comprimento de código de uma letra (ex: `"-..."` para B).
pub const MAX_TOKEN_LEN: usize = 4;

/// Tabela letra → código, em ordem alfabética.
const MORSE_TABLE: [(char, &str); 26] = [
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
];

/// `true` se `c` é um símbolo válido de código (`.` ou `-`).
pub fn is_code_symbol(c: char) -> bool {
    c == '.' || c == '-'
}

/// Código Morse de uma letra (sem distinção de caixa).
pub fn encode_letter(c: char) -> Result<&'static str> {
    let upper = c.to_ascii_uppercase();
    if !upper.is_ascii_uppercase() {
        return Err(MorseError::UnknownSymbol { symbol: c });
    }
    // A tabela está em ordem alfabética: o índice é o deslocamento a partir de 'A'
    Ok(MORSE_TABLE[(upper as u8 - b'A') as usize].1)
}

/// Letra correspondente a um token exato (ex: `".-"` → `'A'`).
pub fn decode_token(token: &str) -> Result<char> {
    lookup_token(token).ok_or_else(|| MorseError::UnknownToken {
        token: token.to_string(),
    })
}

/// Versão sem erro de [`decode_token`], usada no laço quente do gerador de candidatos.
pub(crate) fn lookup_token(token: &str) -> Option<char> {
    if token.is_empty() || token.len() > MAX_TOKEN_LEN {
        return None;
    }
    MORSE_TABLE
        .iter()
        .find(|(_, code)| *code == token)
        .map(|(letter, _)| *letter)
}

/// Codifica um texto sem espaços, letra por letra, concatenando os códigos.
///
/// Qualquer caractere fora do alfabeto (inclusive espaço) gera
/// [`MorseError::UnknownSymbol`]; use [`remove_whitespace`] antes se necessário.
pub fn encode_text(text: &str) -> Result<String> {
    let mut code = String::with_capacity(text.len() * MAX_TOKEN_LEN);
    for c in text.chars() {
        code.push_str(encode_letter(c)?);
    }
    Ok(code)
}

/// Codifica uma sequência de palavras como um único código contínuo.
pub fn encode_words<S: AsRef<str>>(words: &[S]) -> Result<String> {
    let mut code = String::new();
    for word in words {
        code.push_str(&encode_text(word.as_ref())?);
    }
    Ok(code)
}

/// Remove todo espaço em branco (Unicode) do texto.
pub fn remove_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bijection_all_letters() {
        for c in 'a'..='z' {
            let token = encode_letter(c).unwrap();
            assert_eq!(decode_token(token).unwrap(), c.to_ascii_uppercase());
        }
    }

    #[test]
    fn test_tokens_are_unique() {
        let mut tokens: Vec<&str> = MORSE_TABLE.iter().map(|(_, t)| *t).collect();
        tokens.sort();
        tokens.dedup();
        assert_eq!(tokens.len(), 26);
        assert!(tokens.iter().all(|t| (1..=MAX_TOKEN_LEN).contains(&t.len())));
    }

    #[test]
    fn test_encode_text() {
        assert_eq!(encode_text("SOS").unwrap(), "...---...");
        assert_eq!(encode_text("sos").unwrap(), "...---...");
        assert_eq!(encode_text("").unwrap(), "");
    }

    #[test]
    fn test_unknown_symbol() {
        let err = encode_text("A B").unwrap_err();
        assert!(matches!(err, MorseError::UnknownSymbol { symbol: ' ' }));

        let err = encode_letter('é').unwrap_err();
        assert!(matches!(err, MorseError::UnknownSymbol { symbol: 'é' }));
    }

    #[test]
    fn test_unknown_token() {
        assert!(matches!(decode_token("....."), Err(MorseError::UnknownToken { .. })));
        assert!(matches!(decode_token(""), Err(MorseError::UnknownToken { .. })));
        assert!(matches!(decode_token("---."), Err(MorseError::UnknownToken { .. })));
    }

    #[test]
    fn test_encode_words_and_whitespace() {
        let words = ["I", "really"];
        assert_eq!(encode_words(&words).unwrap(), encode_text("IREALLY").unwrap());
        assert_eq!(remove_whitespace(" I really\tlike\nyou "), "Ireallylikeyou");
    }
}
