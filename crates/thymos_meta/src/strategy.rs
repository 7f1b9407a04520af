//! Strategy rewriting: propose a replacement strategy from accumulated
//! insights, parsing generator output into a structured value when possible.
//!
//! Parsing is multi-strategy (direct JSON, markdown code block, outermost
//! balanced braces, common-issue repair) and the cycle must never crash on
//! malformed generator output: anything unparseable becomes an explicit
//! `Strategy::Opaque` wrapper that downstream consumers handle as such.

use crate::memory::ReflectiveMemory;
use std::sync::Arc;
use thymos_core::{Strategy, TextGenerator};

pub struct StrategyRewriter {
    generator: Arc<dyn TextGenerator>,
    memory: Arc<ReflectiveMemory>,
}

impl StrategyRewriter {
    pub fn new(generator: Arc<dyn TextGenerator>, memory: Arc<ReflectiveMemory>) -> Self {
        Self { generator, memory }
    }

    /// Produce a candidate replacement strategy.
    ///
    /// On generation failure the previous strategy is returned unchanged;
    /// on unparseable output the raw text is wrapped as `Opaque`.
    pub async fn rewrite(&self, current: &Strategy) -> Strategy {
        let insights = self.memory.all().await;
        let insight_lines: Vec<String> = insights
            .iter()
            .map(|i| format!("- {}", i.text))
            .collect();

        let prompt = format!(
            "Based on these reflective insights and the current strategy, suggest improvements:\n\n\
             Insights:\n{}\n\n\
             Current strategy: {}\n\n\
             Respond with a JSON object describing the revised strategy.",
            insight_lines.join("\n"),
            serde_json::to_string(current).unwrap_or_default(),
        );

        match self.generator.generate(&prompt).await {
            Ok(response) => parse_strategy(&response),
            Err(e) => {
                tracing::warn!("strategy rewrite generation failed, keeping current: {e}");
                current.clone()
            }
        }
    }
}

/// Parse generated strategy text into a tagged [`Strategy`].
///
/// Strategies (tried in order):
/// 1. Direct JSON object parse
/// 2. Extract JSON from a markdown code block
/// 3. Find the outermost `{...}` and parse (with trailing-comma repair)
/// 4. Graceful fallback: wrap the raw text as `Opaque`
pub fn parse_strategy(text: &str) -> Strategy {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Strategy::opaque("");
    }

    if let Some(strategy) = parse_object(trimmed) {
        return strategy;
    }

    let code_block_re = regex::Regex::new(r"```(?:json)?\s*\n?([\s\S]*?)\n?\s*```").unwrap();
    if let Some(caps) = code_block_re.captures(trimmed) {
        let inner = caps.get(1).map_or("", |m| m.as_str()).trim();
        if let Some(strategy) = parse_object(inner) {
            return strategy;
        }
    }

    if let Some(json_str) = extract_balanced_braces(trimmed) {
        if let Some(strategy) = parse_object(&json_str) {
            return strategy;
        }
        if let Some(strategy) = parse_object(&repair_json(&json_str)) {
            return strategy;
        }
    }

    let preview: String = trimmed.chars().take(120).collect();
    tracing::debug!("could not parse strategy response, wrapping as opaque: {preview}");
    Strategy::opaque(trimmed)
}

fn parse_object(text: &str) -> Option<Strategy> {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::Object(fields)) => Some(Strategy::structured(fields)),
        _ => None,
    }
}

/// Extract the outermost balanced `{...}` substring.
fn extract_balanced_braces(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(text[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

/// Repair common JSON formatting issues in generator output.
fn repair_json(text: &str) -> String {
    let trailing_comma = regex::Regex::new(r",\s*([}\]])").unwrap();
    trailing_comma.replace_all(text, "$1").to_string()
}
