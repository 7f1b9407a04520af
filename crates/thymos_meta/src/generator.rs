//! Mock text generator — deterministic responses for running the
//! meta-governance cycle without an LLM backend.

use async_trait::async_trait;
use std::collections::VecDeque;
use thymos_core::TextGenerator;
use tokio::sync::Mutex;

/// Scripted generator: replays queued responses in order, then falls back to
/// a canned acknowledgement. `failing()` builds one whose every call errors,
/// for exercising the degrade-to-no-change paths.
pub struct MockGenerator {
    responses: Mutex<VecDeque<String>>,
    fail: bool,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fail: false,
        }
    }

    pub fn with_responses(responses: Vec<&str>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(String::from).collect()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fail: true,
        }
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        if self.fail {
            anyhow::bail!("mock generator configured to fail");
        }
        let scripted = self.responses.lock().await.pop_front();
        Ok(scripted.unwrap_or_else(|| {
            format!("(mock) received a {}-char prompt", prompt.len())
        }))
    }

    async fn generate_stream(
        &self,
        prompt: &str,
    ) -> anyhow::Result<tokio::sync::mpsc::Receiver<String>> {
        let full = self.generate(prompt).await?;
        let (tx, rx) = tokio::sync::mpsc::channel(32);
        tokio::spawn(async move {
            // Chunk on whitespace to mimic incremental delivery.
            for word in full.split_inclusive(' ') {
                if tx.send(word.to_string()).await.is_err() {
                    break;
                }
            }
        });
        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_responses_in_order() {
        let gen = MockGenerator::with_responses(vec!["one", "two"]);
        assert_eq!(gen.generate("p").await.unwrap(), "one");
        assert_eq!(gen.generate("p").await.unwrap(), "two");
        // Exhausted script falls back to the canned reply.
        assert!(gen.generate("p").await.unwrap().contains("mock"));
    }

    #[tokio::test]
    async fn test_failing_generator_errors() {
        let gen = MockGenerator::failing();
        assert!(gen.generate("p").await.is_err());
        assert!(gen.generate_stream("p").await.is_err());
    }

    #[tokio::test]
    async fn test_stream_reassembles_to_full_response() {
        let gen = MockGenerator::with_responses(vec!["hello streaming world"]);
        let mut rx = gen.generate_stream("p").await.unwrap();
        let mut assembled = String::new();
        while let Some(chunk) = rx.recv().await {
            assembled.push_str(&chunk);
        }
        assert_eq!(assembled, "hello streaming world");
    }
}
