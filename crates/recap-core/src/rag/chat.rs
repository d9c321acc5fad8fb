//! Conversational wrapper over summary retrieval
//!
//! Keeps an append-only transcript, retrieves context for each user
//! turn, and asks the generation backend to answer from that context.

use chrono::{DateTime, Local};

use crate::rag::{self, SearchResult, SummaryDocument, DEFAULT_SEARCH_LIMIT};
use crate::summarize::TextGenerator;

const NO_RESULTS_REPLY: &str =
    "I couldn't find any relevant information in the summaries for your question.";

const GENERATION_FAILED_REPLY: &str =
    "I'm sorry, I couldn't generate a response due to a technical issue.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn in the transcript
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

/// A chat session grounded in loaded summary documents
pub struct ChatSession<G: TextGenerator> {
    documents: Vec<SummaryDocument>,
    generator: G,
    history: Vec<ChatMessage>,
}

impl<G: TextGenerator> ChatSession<G> {
    pub fn new(documents: Vec<SummaryDocument>, generator: G) -> Self {
        ChatSession {
            documents,
            generator,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Answer one user message, recording both sides of the exchange
    pub fn chat(&mut self, message: &str) -> String {
        self.push(ChatRole::User, message.to_string());

        let results = rag::search(&self.documents, message, DEFAULT_SEARCH_LIMIT);
        let reply = if results.is_empty() {
            NO_RESULTS_REPLY.to_string()
        } else {
            self.generate_reply(message, &results)
        };

        self.push(ChatRole::Assistant, reply.clone());
        reply
    }

    fn generate_reply(&self, query: &str, results: &[SearchResult]) -> String {
        let prompt = format!(
            "You are a helpful assistant that answers questions about journal summaries.\n\n\
             Context from summaries:\n{context}\n\n\
             User question: {query}\n\n\
             Please answer the question based on the context provided. If the information \
             isn't in the context, say so. Be concise and helpful.",
            context = build_context(results),
            query = query,
        );

        match self.generator.generate(&prompt) {
            Ok(response) => response.trim().to_string(),
            Err(e) => {
                tracing::error!(error = %e, "chat generation failed");
                GENERATION_FAILED_REPLY.to_string()
            }
        }
    }

    fn push(&mut self, role: ChatRole, content: String) {
        self.history.push(ChatMessage {
            role,
            content,
            timestamp: Local::now(),
        });
    }
}

fn build_context(results: &[SearchResult]) -> String {
    let parts: Vec<String> = results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let date_str = result
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "Unknown date".to_string());
            format!(
                "Summary {} ({}, #{}):\n{}\n",
                i + 1,
                date_str,
                result.hashtag,
                result.excerpt
            )
        })
        .collect();
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RecapError, Result};
    use std::path::PathBuf;

    struct StubGenerator {
        fail: bool,
    }

    impl TextGenerator for StubGenerator {
        fn model(&self) -> &str {
            "stub:1b"
        }

        fn generate(&self, _prompt: &str) -> Result<String> {
            if self.fail {
                Err(RecapError::Generation {
                    reason: "down".to_string(),
                })
            } else {
                Ok("  The week focused on deployment.  ".to_string())
            }
        }
    }

    fn docs() -> Vec<SummaryDocument> {
        vec![SummaryDocument {
            path: PathBuf::from("Week-2024-01-15-work.md"),
            text: "We finished the deployment and verified the deployment logs.".to_string(),
        }]
    }

    #[test]
    fn test_chat_answers_and_records_history() {
        let mut session = ChatSession::new(docs(), StubGenerator { fail: false });
        let reply = session.chat("how did the deployment go?");

        assert_eq!(reply, "The week focused on deployment.");
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[0].role, ChatRole::User);
        assert_eq!(session.history()[1].role, ChatRole::Assistant);
    }

    #[test]
    fn test_chat_no_results_fixed_reply() {
        let mut session = ChatSession::new(docs(), StubGenerator { fail: false });
        let reply = session.chat("unrelated topic entirely zzz");

        assert_eq!(reply, NO_RESULTS_REPLY);
    }

    #[test]
    fn test_chat_generation_failure_apologizes() {
        let mut session = ChatSession::new(docs(), StubGenerator { fail: true });
        let reply = session.chat("how did the deployment go?");

        assert_eq!(reply, GENERATION_FAILED_REPLY);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_build_context_format() {
        let results = vec![SearchResult {
            path: PathBuf::from("a.md"),
            excerpt: "the deployment".to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 15),
            hashtag: "work".to_string(),
            score: 0.5,
        }];
        let context = build_context(&results);
        assert!(context.starts_with("Summary 1 (2024-01-15, #work):\nthe deployment"));
    }

    #[test]
    fn test_clear_history() {
        let mut session = ChatSession::new(docs(), StubGenerator { fail: false });
        session.chat("deployment status?");
        session.clear_history();
        assert!(session.history().is_empty());
    }
}
