//! # Recursos Embutidos: Dicionário, Corpus e Frases de Demonstração
//!
//! Permite usar o decodificador sem nenhum arquivo em disco. O corpus é um
//! pequeno conjunto de textos em inglês escritos para o projeto; o dicionário
//! embutido é a união de uma lista de palavras comuns com o vocabulário do
//! próprio corpus (a estratégia de "dicionário derivado do livro").
//!
//! Para decodificações de qualidade em textos livres, carregue uma lista de
//! palavras maior (ex: `/usr/share/dict/words`) e um corpus de treino real.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::dictionary::PrefixDictionary;
use crate::error::Result;
use crate::tokenizer::tokenize_document;

/// Palavras comuns do inglês (além das que aparecem no corpus).
const BASE_WORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "also", "always", "am", "an", "and", "angry",
    "another", "any", "are", "around", "as", "ask", "assign", "at", "away", "back", "be",
    "because", "been", "before", "being", "best", "better", "big", "book", "both", "boy",
    "but", "by", "call", "came", "can", "cat", "child", "city", "come", "could", "day",
    "did", "do", "does", "dog", "door", "down", "each", "early", "eat", "end", "even",
    "every", "eye", "face", "far", "father", "feel", "few", "find", "first", "for",
    "found", "friend", "from", "gave", "get", "girl", "give", "go", "good", "got",
    "great", "had", "hand", "happy", "has", "have", "he", "head", "hear", "her", "here",
    "him", "himself", "his", "home", "house", "how", "i", "if", "in", "into", "is", "it",
    "its", "just", "keep", "kind", "know", "last", "late", "left", "let", "life", "like",
    "little", "long", "look", "love", "made", "make", "man", "many", "may", "me", "men",
    "might", "mind", "more", "morning", "most", "mother", "mouth", "much", "must", "my",
    "name", "near", "need", "never", "new", "next", "night", "no", "not", "nothing",
    "now", "of", "off", "old", "on", "once", "one", "only", "open", "or", "other", "our",
    "out", "over", "own", "people", "place", "play", "pried", "put", "read", "really",
    "right", "room", "said", "same", "saw", "say", "see", "she", "should", "so", "some",
    "something", "soon", "speak", "still", "stood", "string", "such", "sun", "take",
    "tearing", "tell", "than", "that", "the", "their", "them", "then", "there", "these",
    "they", "thing", "think", "this", "those", "thought", "through", "time", "to",
    "together", "told", "tom", "too", "took", "tree", "true", "turn", "two", "under",
    "up", "us", "very", "walk", "want", "was", "water", "way", "we", "well", "went",
    "were", "what", "when", "where", "which", "while", "who", "why", "will", "with",
    "woman", "word", "work", "world", "would", "year", "yes", "yet", "you", "young",
    "your",
];

/// Textos de treino do modelo de linguagem embutido.
const CORPUS: &[&str] = &[
    "Tom pried his mouth open and looked at the old house. He said to himself that he \
     would not speak again until morning. Then he went tearing around the house again, \
     and his mother called him back to the door.",
    "I really like you. I really like this book. You really like the sea, and I like \
     the sun. She is so angry you have to be away all day. She said you have to go \
     home now.",
    "The boy and the girl walked down to the water. They sat under a big tree and \
     talked about the world. The girl told him a story about a cat and a dog. He \
     thought it was the best story he had ever heard.",
    "I want to assign this to a string. You can assign the name to a string and read \
     it back later. We need to find the right word for each thing.",
    "It was late at night when the man came home. His father was still in the room, \
     reading by the fire. The man did not say a word. He took off his coat and sat \
     down near the door.",
    "Every morning the old woman went out to the city. She would walk through the \
     streets and look at the people. Some of them were happy, and some of them were \
     not. She always came back before the sun went down.",
    "What do you think about it? I think we should go now. There is nothing more to \
     see here, and the day is almost over. Let us go home together.",
    "He had a friend who lived far away. Once a year they would meet and talk about \
     their life. Each time his friend told him something new about the world.",
    "The children played in the house all day long. When their mother came back, \
     she found them asleep on the floor. She was not angry. She put them to bed and \
     sat down to read.",
    "You have to keep your eyes open and your mind clear. If you see something, tell \
     me right away. I will be here, and I will not go anywhere until you come back.",
];

/// Frases de demonstração (decodificáveis com os recursos embutidos).
const DEMO_SENTENCES: &[(&str, &str)] = &[
    ("Clássico", "I really like you"),
    ("Aventura", "Tom pried his mouth open"),
    ("Narrativa", "Then he went tearing around the house again"),
    ("Discurso", "He said to himself that he would not speak"),
    ("Programação", "I want to assign this to a string"),
    ("Emoção", "She is so angry you have to be away"),
    ("Curta", "Let us go home"),
];

/// Documentos do corpus embutido.
pub fn builtin_corpus() -> &'static [&'static str] {
    CORPUS
}

/// Pares (rótulo, frase) para a interface web e para testes.
pub fn demo_sentences() -> &'static [(&'static str, &'static str)] {
    DEMO_SENTENCES
}

/// Vocabulário de um conjunto de documentos: palavras apenas com letras A–Z,
/// em maiúsculas e ordem alfabética.
pub fn corpus_vocabulary<S: AsRef<str>>(documents: &[S]) -> Vec<String> {
    let words: BTreeSet<String> = documents
        .iter()
        .flat_map(|doc| tokenize_document(doc.as_ref()))
        .flatten()
        .filter(|w| w.chars().all(|c| c.is_ascii_uppercase()))
        .collect();
    words.into_iter().collect()
}

/// Dicionário embutido: palavras comuns + vocabulário do corpus embutido.
pub fn builtin_dictionary() -> PrefixDictionary {
    let mut words: Vec<String> = BASE_WORDS.iter().map(|w| w.to_uppercase()).collect();
    words.extend(corpus_vocabulary(CORPUS));
    PrefixDictionary::build(words)
}

/// Lê documentos de texto do disco, na ordem dada.
pub fn load_documents<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<String>> {
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        documents.push(fs::read_to_string(path)?);
        info!(path = %path.display(), "documento do corpus carregado");
    }
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::split_words;

    #[test]
    fn test_builtin_dictionary_covers_demo_sentences() {
        let dict = builtin_dictionary();
        for (_, sentence) in demo_sentences() {
            for word in split_words(sentence) {
                assert!(dict.contains(&word), "palavra ausente: {word}");
            }
        }
    }

    #[test]
    fn test_corpus_vocabulary_is_letters_only() {
        let vocab = corpus_vocabulary(&["Don't stop. Go 2 times!"]);
        assert_eq!(vocab, vec!["GO", "STOP", "TIMES"]);
    }

    #[test]
    fn test_builtin_dictionary_includes_corpus_words() {
        let dict = builtin_dictionary();
        assert!(dict.contains("FIRE"));
        assert!(dict.contains("ASLEEP"));
        assert!(dict.len() > BASE_WORDS.len());
    }

    #[test]
    fn test_load_documents() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, "first").unwrap();
        std::fs::write(&b, "second").unwrap();

        let docs = load_documents(&[&a, &b]).unwrap();
        assert_eq!(docs, vec!["first", "second"]);
        assert!(load_documents(&[dir.path().join("missing.txt")]).is_err());
    }
}
