use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use termscope_core::{
    ChunkFilter, CompletionError, CompletionRequest, LanguageModel, Message, PolicyType,
    RetrievedChunk,
};
use termscope_rag::{RagChat, NO_CONTEXT_MESSAGE, NO_DOCUMENT_MESSAGE};
use termscope_retrieval::ChunkRetriever;

#[derive(Clone)]
struct FakeLlm {
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    reply: String,
}

impl FakeLlm {
    fn new(reply: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            reply: reply.to_string(),
        }
    }

    fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for FakeLlm {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        self.calls.lock().unwrap().push(request);
        Ok(self.reply.clone())
    }
}

struct FakeRetriever {
    hits: Vec<RetrievedChunk>,
}

#[async_trait]
impl ChunkRetriever for FakeRetriever {
    async fn retrieve(
        &self,
        _query: &str,
        top_k: usize,
        _filter: Option<&ChunkFilter>,
    ) -> Vec<RetrievedChunk> {
        self.hits.iter().take(top_k).cloned().collect()
    }
}

fn hit(company_id: &str, company_name: &str, policy_type: PolicyType, text: &str) -> RetrievedChunk {
    RetrievedChunk {
        text: text.to_string(),
        company_id: company_id.to_string(),
        company_name: company_name.to_string(),
        policy_type,
        chunk_index: 0,
        score: 0.9,
    }
}

#[tokio::test]
async fn direct_mode_embeds_the_full_document_verbatim() {
    let llm = FakeLlm::new("Here is the answer.");
    let chat = RagChat::new(FakeRetriever { hits: Vec::new() }, llm.clone());
    let document = "Full terms of service text. Users agree to everything. \
                    Clause fifteen covers arbitration in painstaking detail.";

    let result = chat
        .ask_about(
            "acme-1",
            "Acme",
            PolicyType::Terms,
            document,
            "What about arbitration?",
            &[],
        )
        .await
        .unwrap();

    assert_eq!(result.answer, "Here is the answer.");
    assert_eq!(result.sources.len(), 1);
    assert_eq!(result.sources[0].label, "Terms & Conditions");

    let calls = llm.calls();
    assert_eq!(calls.len(), 1);
    let prompt = &calls[0].messages.last().unwrap().content;
    assert!(prompt.contains("[Source 1 - Acme (Terms & Conditions)]:"));
    assert!(prompt.contains(document));
    assert!(prompt.contains("What about arbitration?"));
}

#[tokio::test]
async fn direct_mode_with_no_stored_text_skips_the_model() {
    let llm = FakeLlm::new("unused");
    let chat = RagChat::new(FakeRetriever { hits: Vec::new() }, llm.clone());

    let result = chat
        .ask_about("acme-1", "Acme", PolicyType::Cookie, "   ", "Any cookies?", &[])
        .await
        .unwrap();

    assert_eq!(result.answer, NO_DOCUMENT_MESSAGE);
    assert!(result.sources.is_empty());
    assert!(llm.calls().is_empty());
}

#[tokio::test]
async fn empty_retrieval_skips_the_model() {
    let llm = FakeLlm::new("unused");
    let chat = RagChat::new(FakeRetriever { hits: Vec::new() }, llm.clone());

    let result = chat.ask("What does Acme collect?", &[], None).await.unwrap();

    assert_eq!(result.answer, NO_CONTEXT_MESSAGE);
    assert!(result.sources.is_empty());
    assert!(llm.calls().is_empty());
}

#[tokio::test]
async fn retrieval_mode_answers_with_deduplicated_sources() {
    let llm = FakeLlm::new("Both policies mention tracking.");
    let retriever = FakeRetriever {
        hits: vec![
            hit("a", "Acme", PolicyType::Terms, "tracking clause one"),
            hit("a", "Acme", PolicyType::Terms, "tracking clause two"),
            hit("b", "Beta", PolicyType::Privacy, "profiling clause"),
        ],
    };
    let chat = RagChat::new(retriever, llm.clone());

    let result = chat.ask("Who tracks users?", &[], None).await.unwrap();

    assert_eq!(result.answer, "Both policies mention tracking.");
    assert_eq!(result.sources.len(), 2);
    assert_eq!(result.sources[0].company_name, "Acme");
    assert_eq!(result.sources[1].company_name, "Beta");

    let prompt = llm.calls()[0].messages.last().unwrap().content.clone();
    assert!(prompt.contains("[Source 1 - Acme (Terms & Conditions)]:"));
    assert!(prompt.contains("[Source 3 - Beta (Privacy Policy)]:"));
}

#[tokio::test]
async fn history_is_bounded_to_the_last_six_turns() {
    let llm = FakeLlm::new("ok");
    let retriever = FakeRetriever {
        hits: vec![hit("a", "Acme", PolicyType::Terms, "clause")],
    };
    let chat = RagChat::new(retriever, llm.clone());

    let history: Vec<Message> = (0..10)
        .map(|i| {
            if i % 2 == 0 {
                Message::user(format!("question {i}"))
            } else {
                Message::assistant(format!("answer {i}"))
            }
        })
        .collect();

    chat.ask("latest question", &history, None).await.unwrap();

    let request = llm.calls().remove(0);
    // six history turns plus the final user message
    assert_eq!(request.messages.len(), 7);
    assert_eq!(request.messages[0].content, "question 4");
    assert_eq!(request.messages[5].content, "answer 9");
}

#[tokio::test]
async fn completion_request_uses_fixed_system_prompt_and_moderate_temperature() {
    let llm = FakeLlm::new("ok");
    let retriever = FakeRetriever {
        hits: vec![hit("a", "Acme", PolicyType::Terms, "clause")],
    };
    let chat = RagChat::new(retriever, llm.clone());

    chat.ask("question", &[], None).await.unwrap();

    let request = llm.calls().remove(0);
    let system = request.system.expect("system prompt missing");
    assert!(system.contains("simple, clear language"));
    assert!(system.contains("cite which company and document type"));
    assert!(request.temperature <= 0.5);
    assert_eq!(request.max_tokens, 2048);
}

#[tokio::test]
async fn top_k_bounds_the_retrieved_context() {
    let llm = FakeLlm::new("ok");
    let retriever = FakeRetriever {
        hits: (0..10)
            .map(|i| hit("a", "Acme", PolicyType::Terms, &format!("clause {i}")))
            .collect(),
    };
    let chat = RagChat::new(retriever, llm.clone()).with_top_k(3);

    chat.ask("question", &[], None).await.unwrap();

    let prompt = llm.calls()[0].messages.last().unwrap().content.clone();
    assert!(prompt.contains("[Source 3 - "));
    assert!(!prompt.contains("[Source 4 - "));
}
