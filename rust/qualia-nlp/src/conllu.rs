//! CoNLL-U parsing and the HTTP pipeline client.
//!
//! Speaks to a UDPipe-style REST service: the request carries the raw text,
//! the response wraps a CoNLL-U document in JSON. Multi-sentence input
//! concatenates into one [`TokenSequence`] with head indices rebased per
//! sentence, so the extraction engine sees the same flat view a local
//! parser would give it.

use async_trait::async_trait;
use serde::Deserialize;

use crate::pipeline::{LanguagePipeline, PipelineError};
use crate::token::{DepLabel, PosTag, Token, TokenSequence};

/// Parse a CoNLL-U document into a flat token sequence.
///
/// Comment lines and multi-word token ranges are skipped. A head of `0`
/// (the CoNLL-U root marker) becomes a self-loop on the token itself.
pub fn parse_conllu(document: &str) -> Result<TokenSequence, PipelineError> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut sentence: Vec<(Token, usize)> = Vec::new();

    let mut flush = |sentence: &mut Vec<(Token, usize)>, tokens: &mut Vec<Token>| {
        let base = tokens.len();
        for (index, (mut token, head)) in sentence.drain(..).enumerate() {
            token.head = if head == 0 { base + index } else { base + head - 1 };
            tokens.push(token);
        }
    };

    for line in document.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            flush(&mut sentence, &mut tokens);
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 8 {
            return Err(PipelineError::Malformed(format!(
                "expected at least 8 CoNLL-U fields, got {}: {line:?}",
                fields.len()
            )));
        }
        // Multi-word token ranges ("1-2") and empty nodes ("1.1") carry no
        // tree position of their own.
        if fields[0].contains('-') || fields[0].contains('.') {
            continue;
        }

        let head: usize = fields[6]
            .parse()
            .map_err(|_| PipelineError::Malformed(format!("bad head field: {:?}", fields[6])))?;

        sentence.push((
            Token {
                surface: fields[1].to_string(),
                lemma: fields[2].to_string(),
                pos: PosTag::from_upos(fields[3]),
                dep: DepLabel::from_deprel(fields[7]),
                head: 0,
            },
            head,
        ));
    }
    flush(&mut sentence, &mut tokens);

    Ok(TokenSequence::new(tokens))
}

#[derive(Debug, Deserialize)]
struct ProcessResponse {
    result: String,
}

/// A [`LanguagePipeline`] backed by a UDPipe-style REST endpoint.
#[derive(Debug, Clone)]
pub struct HttpPipeline {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPipeline {
    /// `endpoint` is the full `process` URL of the service, e.g.
    /// `http://localhost:8001/process`.
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl LanguagePipeline for HttpPipeline {
    async fn parse(&self, text: &str) -> Result<TokenSequence, PipelineError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[
                ("tokenizer", ""),
                ("tagger", ""),
                ("parser", ""),
                ("data", text),
            ])
            .send()
            .await
            .map_err(|error| PipelineError::Http(error.to_string()))?
            .error_for_status()
            .map_err(|error| PipelineError::Http(error.to_string()))?;

        let body: ProcessResponse = response
            .json()
            .await
            .map_err(|error| PipelineError::Malformed(error.to_string()))?;

        parse_conllu(&body.result)
    }
}
