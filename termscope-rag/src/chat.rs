use termscope_core::{
    ChunkFilter, CompletionRequest, LanguageModel, Message, PolicyType, RetrievedChunk,
};
use termscope_retrieval::ChunkRetriever;

use crate::{dedup_sources, RagError, SourceRef};

/// How many trailing conversation turns are forwarded to the model.
pub const HISTORY_WINDOW: usize = 6;

const DEFAULT_TOP_K: usize = 5;
const ANSWER_MAX_TOKENS: u32 = 2048;
const ANSWER_TEMPERATURE: f32 = 0.5;

const SYSTEM_PROMPT: &str = "\
You are a helpful assistant that explains Terms and Conditions, Cookie Policies, and Privacy Policies in simple, clear language.
You have access to excerpts from various companies' legal documents including terms of service, cookie policies, and privacy policies.
Always cite which company and document type you're referencing in your answers.
If the retrieved context doesn't contain relevant information, say so honestly.
Be concise but thorough in your explanations.";

/// Returned instead of a model answer when retrieval finds nothing.
pub const NO_CONTEXT_MESSAGE: &str = "I couldn't find any indexed policy documents relevant \
to your question. Add a company's terms, cookie policy or privacy policy first, then ask again.";

/// Returned in direct mode when the named document has no stored text.
pub const NO_DOCUMENT_MESSAGE: &str = "There is no stored text for that document yet, \
so there's nothing to answer from. Add the document's text first.";

/// One labeled excerpt fed into the generation prompt. In retrieval mode
/// this is a retrieved fragment; in direct mode it is the entire document.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextChunk {
    pub text: String,
    pub company_name: String,
    pub policy_type: Option<PolicyType>,
}

impl From<&RetrievedChunk> for ContextChunk {
    fn from(chunk: &RetrievedChunk) -> Self {
        Self {
            text: chunk.text.clone(),
            company_name: chunk.company_name.clone(),
            policy_type: Some(chunk.policy_type),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RagAnswer {
    pub answer: String,
    pub sources: Vec<SourceRef>,
}

impl RagAnswer {
    fn without_sources(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            sources: Vec::new(),
        }
    }
}

/// Assembles retrieved or directly supplied context plus a bounded
/// conversation window into a single generation request.
pub struct RagChat<R, L> {
    retriever: R,
    llm: L,
    top_k: usize,
}

impl<R, L> RagChat<R, L>
where
    R: ChunkRetriever,
    L: LanguageModel,
{
    pub fn new(retriever: R, llm: L) -> Self {
        Self {
            retriever,
            llm,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        if top_k > 0 {
            self.top_k = top_k;
        }
        self
    }

    /// Retrieval mode: answer from the top-k chunks matching `question`.
    /// An empty retrieval result short-circuits to [`NO_CONTEXT_MESSAGE`]
    /// without invoking the model.
    pub async fn ask(
        &self,
        question: &str,
        history: &[Message],
        filter: Option<&ChunkFilter>,
    ) -> Result<RagAnswer, RagError> {
        let hits = self.retriever.retrieve(question, self.top_k, filter).await;
        if hits.is_empty() {
            return Ok(RagAnswer::without_sources(NO_CONTEXT_MESSAGE));
        }

        let sources = dedup_sources(&hits);
        let context: Vec<ContextChunk> = hits.iter().map(ContextChunk::from).collect();
        let answer = self.answer(question, &context, history).await?;
        Ok(RagAnswer { answer, sources })
    }

    /// Direct mode: the caller already knows which document to discuss,
    /// so the entire document text becomes the single context chunk and
    /// retrieval is bypassed. An empty document short-circuits to
    /// [`NO_DOCUMENT_MESSAGE`] without invoking the model.
    pub async fn ask_about(
        &self,
        company_id: &str,
        company_name: &str,
        policy_type: PolicyType,
        document_text: &str,
        question: &str,
        history: &[Message],
    ) -> Result<RagAnswer, RagError> {
        if document_text.trim().is_empty() {
            return Ok(RagAnswer::without_sources(NO_DOCUMENT_MESSAGE));
        }

        let context = vec![ContextChunk {
            text: document_text.to_string(),
            company_name: company_name.to_string(),
            policy_type: Some(policy_type),
        }];
        let answer = self.answer(question, &context, history).await?;
        Ok(RagAnswer {
            answer,
            sources: vec![SourceRef::new(company_id, company_name, policy_type)],
        })
    }

    /// Core prompt assembly: labeled context block, then at most the last
    /// [`HISTORY_WINDOW`] turns, then the question. The completion is
    /// returned verbatim.
    pub async fn answer(
        &self,
        question: &str,
        context_chunks: &[ContextChunk],
        history: &[Message],
    ) -> Result<String, RagError> {
        let context_block = build_context_block(context_chunks);

        let tail = history.len().saturating_sub(HISTORY_WINDOW);
        let mut messages: Vec<Message> = history[tail..].to_vec();
        messages.push(Message::user(format!(
            "Based on the following excerpts from company policies:\n{context_block}\n\
             \nUser question: {question}\n\
             \nPlease provide a clear, helpful answer based on the context above."
        )));

        let request = CompletionRequest {
            system: Some(SYSTEM_PROMPT.to_string()),
            messages,
            max_tokens: ANSWER_MAX_TOKENS,
            temperature: ANSWER_TEMPERATURE,
        };
        Ok(self.llm.complete(request).await?)
    }
}

fn build_context_block(chunks: &[ContextChunk]) -> String {
    let mut block = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let label = chunk.policy_type.unwrap_or(PolicyType::Terms).label();
        block.push_str(&format!(
            "\n[Source {} - {} ({})]:\n{}\n",
            i + 1,
            chunk.company_name,
            label,
            chunk.text
        ));
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_block_labels_sources_in_order() {
        let chunks = vec![
            ContextChunk {
                text: "first excerpt".to_string(),
                company_name: "Acme".to_string(),
                policy_type: Some(PolicyType::Cookie),
            },
            ContextChunk {
                text: "second excerpt".to_string(),
                company_name: "Beta".to_string(),
                policy_type: None,
            },
        ];

        let block = build_context_block(&chunks);
        let first = block.find("[Source 1 - Acme (Cookie Policy)]:\nfirst excerpt").unwrap();
        let second = block
            .find("[Source 2 - Beta (Terms & Conditions)]:\nsecond excerpt")
            .unwrap();
        assert!(first < second);
    }
}
