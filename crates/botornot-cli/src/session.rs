//! Conversation with the agent.

use crate::output::source_legend;
use botornot_domain::traits::AgentBackend;
use botornot_domain::{AgentReply, ChatMessage, Source};
use botornot_extractor::{AnswerAnalysis, Extractor};
use tracing::{debug, warn};

/// One answered question
#[derive(Debug, Clone)]
pub struct Turn {
    /// Normalized agent reply, or the error message on failure
    pub reply: AgentReply,

    /// Sources, experts and attributed segments of the reply
    pub analysis: AnswerAnalysis,

    /// Whether the backend call failed
    pub failed: bool,
}

impl Turn {
    /// Source legend: extracted sources, then any expert links segments
    /// were attributed to, in first-use order
    pub fn legend(&self) -> Vec<Source> {
        source_legend(&self.analysis)
    }
}

/// A chat session: message history plus the analysis of every answer
pub struct ChatSession<B> {
    backend: B,
    extractor: Extractor,
    history: Vec<ChatMessage>,
    turns: Vec<Turn>,
}

impl<B: AgentBackend> ChatSession<B> {
    /// Create an empty session
    pub fn new(backend: B, extractor: Extractor) -> Self {
        Self {
            backend,
            extractor,
            history: Vec::new(),
            turns: Vec::new(),
        }
    }

    /// Send `question` with the prior history and analyze the reply
    ///
    /// Blank questions are ignored. A backend failure does not end the
    /// session: the error text is recorded as the assistant's message.
    pub async fn ask(&mut self, question: &str) -> Option<&Turn> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }

        debug!("Sending question with {} prior messages", self.history.len());
        let result = self.backend.chat(question, &self.history).await;
        self.history.push(ChatMessage::user(question));

        let (reply, failed) = match result {
            Ok(reply) => (reply, false),
            Err(e) => {
                warn!("Agent request failed: {}", e);
                let reply = AgentReply {
                    answer: format!("An error occurred: {}", e),
                    ..AgentReply::default()
                };
                (reply, true)
            }
        };
        self.history.push(ChatMessage::assistant(reply.answer.clone()));

        let analysis = self.extractor.analyze(&reply.answer, reply.trace());
        self.turns.push(Turn {
            reply,
            analysis,
            failed,
        });
        self.turns.last()
    }

    /// Messages exchanged so far, oldest first
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Most recent turn
    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Start over with an empty history
    pub fn clear(&mut self) {
        self.history.clear();
        self.turns.clear();
    }

    /// Extractor used for every answer
    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botornot_domain::Role;
    use std::future::Future;
    use std::sync::Mutex;

    /// Backend replying from a script and recording what it was sent
    struct ScriptedBackend {
        replies: Mutex<Vec<Result<AgentReply, String>>>,
        seen: Mutex<Vec<(String, usize)>>,
    }

    impl ScriptedBackend {
        fn new(replies: Vec<Result<AgentReply, String>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl AgentBackend for ScriptedBackend {
        type Error = String;

        fn chat(
            &self,
            message: &str,
            history: &[ChatMessage],
        ) -> impl Future<Output = Result<AgentReply, String>> + Send {
            self.seen.lock().unwrap().push((message.to_string(), history.len()));
            let reply = self.replies.lock().unwrap().remove(0);
            async move { reply }
        }
    }

    fn reply(answer: &str, trace: &str) -> AgentReply {
        AgentReply {
            answer: answer.to_string(),
            trace_url: None,
            trace_text: Some(trace.to_string()),
        }
    }

    #[tokio::test]
    async fn test_history_grows_per_turn() {
        let backend = ScriptedBackend::new(vec![
            Ok(reply("First answer", "https://a.io")),
            Ok(reply("Second answer", "Wikipedia")),
        ]);
        let mut session = ChatSession::new(backend, Extractor::default());

        session.ask("first?").await.unwrap();
        let turn = session.ask("second?").await.unwrap();
        assert_eq!(turn.analysis.sources, vec![Source::tool("Wikipedia")]);

        assert_eq!(session.history().len(), 4);
        assert_eq!(session.history()[2].role, Role::User);
        assert_eq!(session.history()[3].content, "Second answer");
        assert_eq!(
            *session.backend.seen.lock().unwrap(),
            vec![("first?".to_string(), 0), ("second?".to_string(), 2)]
        );
    }

    #[tokio::test]
    async fn test_blank_question_ignored() {
        let backend = ScriptedBackend::new(Vec::new());
        let mut session = ChatSession::new(backend, Extractor::default());
        assert!(session.ask("   ").await.is_none());
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_failure_recorded_as_message() {
        let backend = ScriptedBackend::new(vec![Err("Backend error HTTP 502".to_string())]);
        let mut session = ChatSession::new(backend, Extractor::default());

        let turn = session.ask("question").await.unwrap();
        assert!(turn.failed);
        assert_eq!(turn.reply.answer, "An error occurred: Backend error HTTP 502");
        assert_eq!(turn.analysis.sources, vec![Source::internal_knowledge()]);
        assert_eq!(
            session.history()[1].content,
            "An error occurred: Backend error HTTP 502"
        );
    }

    #[tokio::test]
    async fn test_legend_includes_expert_links() {
        let answer = "1. Dr. Jane Smith\n- Professor at MIT";
        let backend = ScriptedBackend::new(vec![Ok(reply(answer, "https://a.io"))]);
        let mut session = ChatSession::new(backend, Extractor::default());

        let turn = session.ask("who?").await.unwrap();
        assert_eq!(
            turn.legend(),
            vec![Source::new("https://a.io"), Source::new("https://www.mit.edu")]
        );
    }

    #[tokio::test]
    async fn test_clear() {
        let backend = ScriptedBackend::new(vec![Ok(reply("answer", ""))]);
        let mut session = ChatSession::new(backend, Extractor::default());
        session.ask("q").await;
        session.clear();
        assert!(session.history().is_empty());
        assert!(session.last_turn().is_none());
    }
}
