//! Servidor web Axum com WebSocket para visualizar a decodificação Morse em tempo real

mod config;

use std::sync::mpsc;
use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use clap::Parser;
use morse_core::{corpus::demo_sentences, DecodeEvent, MorseDecoder, MorseError, Segmentation};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// Estado compartilhado da aplicação
struct AppState {
    decoder: MorseDecoder,
}

#[derive(Deserialize)]
struct EncodeRequest {
    text: String,
}

#[derive(Serialize)]
struct EncodeResponse {
    text: String,
    code: String,
    code_len: usize,
}

/// Pedido de decodificação: um código contínuo ou uma frase a ser codificada antes.
#[derive(Debug, Default, Deserialize)]
struct DecodeRequest {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
struct DecodeResponse {
    code: String,
    words: Vec<String>,
    sentence: String,
    score: f64,
    expansions: usize,
    processing_ms: u64,
}

#[derive(Serialize)]
struct DemoSentence {
    label: &'static str,
    text: &'static str,
    code: String,
}

#[derive(Serialize)]
struct PairProbability {
    prev: String,
    next: String,
    probability: f64,
}

#[derive(Serialize)]
struct StatsResponse {
    dictionary_words: usize,
    dictionary_nodes: usize,
    model: morse_core::ModelStats,
    top_pairs: Vec<PairProbability>,
    config: morse_core::DecoderConfig,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    demos: Vec<DemoSentence>,
    dictionary_words: usize,
    vocabulary_size: usize,
    beam_width: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::parse();
    let decoder = tokio::task::spawn_blocking({
        let config = config.clone();
        move || config.build_decoder()
    })
    .await??;
    let state = Arc::new(AppState { decoder });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Servidor Morse iniciado em http://{}", config.bind_addr);
    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/encode", post(encode_handler))
        .route("/decode", post(decode_handler))
        .route("/ws", get(ws_handler))
        .route("/demo-texts", get(demo_texts_handler))
        .route("/stats", get(stats_handler))
        .layer(cors)
        .with_state(state)
}

/// Status HTTP para cada tipo de erro do decodificador.
fn error_response(err: &MorseError) -> Response {
    let status = match err {
        MorseError::NoSegmentationFound { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        MorseError::UnknownSymbol { .. }
        | MorseError::UnknownToken { .. }
        | MorseError::InvalidCode { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

fn demo_list(decoder: &MorseDecoder) -> Vec<DemoSentence> {
    demo_sentences()
        .iter()
        .filter_map(|&(label, text)| {
            let code = decoder.encode_sentence(text).ok()?;
            Some(DemoSentence { label, text, code })
        })
        .collect()
}

/// Retorna a página principal HTML
async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    let page = IndexTemplate {
        demos: demo_list(&state.decoder),
        dictionary_words: state.decoder.dictionary().len(),
        vocabulary_size: state.decoder.model().vocabulary_size(),
        beam_width: state.decoder.config().beam_width,
    };
    match page.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!("falha ao renderizar a página: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn encode_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EncodeRequest>,
) -> Response {
    match state.decoder.encode_sentence(&req.text) {
        Ok(code) => Json(EncodeResponse {
            text: req.text,
            code_len: code.len(),
            code,
        })
        .into_response(),
        Err(err) => error_response(&err),
    }
}

/// Decodificação via HTTP POST (sem streaming)
async fn decode_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DecodeRequest>,
) -> Response {
    let code = match (req.code, req.text) {
        (Some(code), _) => code,
        (None, Some(text)) => match state.decoder.encode_sentence(&text) {
            Ok(code) => code,
            Err(err) => return error_response(&err),
        },
        (None, None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": "Informe `code` ou `text`"})),
            )
                .into_response();
        }
    };

    let start = std::time::Instant::now();
    let decoder_state = Arc::clone(&state);
    let code_for_thread = code.clone();
    let joined = tokio::task::spawn_blocking(move || {
        decoder_state.decoder.decode_code(&code_for_thread)
    })
    .await;

    match joined {
        Ok(Ok(segmentation)) => Json(decode_response(
            code,
            segmentation,
            start.elapsed().as_millis() as u64,
        ))
        .into_response(),
        Ok(Err(err)) => error_response(&err),
        Err(err) => {
            error!("tarefa de decodificação falhou: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn decode_response(code: String, segmentation: Segmentation, processing_ms: u64) -> DecodeResponse {
    DecodeResponse {
        sentence: segmentation.sentence(),
        code: morse_core::morse::remove_whitespace(&code),
        words: segmentation.words,
        score: segmentation.score,
        expansions: segmentation.expansions,
        processing_ms,
    }
}

/// Retorna as frases de demonstração com seus códigos
async fn demo_texts_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(demo_list(&state.decoder))
}

async fn stats_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let decoder = &state.decoder;
    Json(StatsResponse {
        dictionary_words: decoder.dictionary().len(),
        dictionary_nodes: decoder.dictionary().node_count(),
        model: decoder.model().stats(),
        top_pairs: decoder
            .model()
            .top_pairs(10)
            .into_iter()
            .map(|(prev, next, probability)| PairProbability {
                prev: prev.to_string(),
                next: next.to_string(),
                probability,
            })
            .collect(),
        config: decoder.config().clone(),
    })
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Interpreta uma mensagem do cliente: JSON `{code}`/`{text}` ou texto puro.
///
/// Texto puro feito só de `.`, `-` e espaços é tratado como código.
fn parse_ws_request(message: &str) -> DecodeRequest {
    if let Ok(req) = serde_json::from_str::<DecodeRequest>(message) {
        if req.code.is_some() || req.text.is_some() {
            return req;
        }
    }
    let message = message.trim();
    if message
        .chars()
        .all(|c| c == '.' || c == '-' || c.is_whitespace())
    {
        DecodeRequest {
            code: Some(message.to_string()),
            text: None,
        }
    } else {
        DecodeRequest {
            code: None,
            text: Some(message.to_string()),
        }
    }
}

/// Lógica do WebSocket: recebe código ou texto, executa o pipeline e envia os eventos
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let req = parse_ws_request(&text);
                let code = match (req.code, req.text) {
                    (Some(code), _) => Ok(code),
                    (None, Some(text)) => state.decoder.encode_sentence(&text),
                    (None, None) => continue,
                };

                let events = match code {
                    Ok(code) if code.trim().is_empty() => continue,
                    Ok(code) => {
                        info!("Decodificando via WebSocket: {} símbolos", code.len());
                        let (tx, rx) = mpsc::channel::<DecodeEvent>();
                        let decoder_state = Arc::clone(&state);

                        // O pipeline é síncrono: roda fora do runtime
                        let handle = tokio::task::spawn_blocking(move || {
                            let _ = decoder_state.decoder.decode_streaming(&code, &tx);
                        });
                        if let Err(err) = handle.await {
                            warn!("tarefa de decodificação falhou: {err}");
                        }
                        rx.try_iter().collect::<Vec<_>>()
                    }
                    Err(err) => vec![DecodeEvent::Error {
                        message: err.to_string(),
                    }],
                };

                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json.into())).await.is_err() {
                            return; // cliente desconectou
                        }
                        // Pequena pausa para animação visual (passo a passo)
                        tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}
