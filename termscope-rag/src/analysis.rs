use serde::{Deserialize, Serialize};

use termscope_core::{CompletionRequest, LanguageModel, Message, PolicyType, Risk, Severity};

use crate::AnalysisError;

const ANALYSIS_MAX_TOKENS: u32 = 4096;
const ANALYSIS_TEMPERATURE: f32 = 0.3;
const MAX_DOCUMENT_CHARS: usize = 8000;
const FALLBACK_DESCRIPTION_CHARS: usize = 500;

/// Risk profile of one legal document.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Analysis {
    pub summary: String,
    pub risks: Vec<Risk>,
}

/// Summarizes a document's risk profile through the language model,
/// requesting strict JSON and parsing it defensively.
pub struct RiskAnalyzer<L> {
    llm: L,
}

impl<L> RiskAnalyzer<L>
where
    L: LanguageModel,
{
    pub fn new(llm: L) -> Self {
        Self { llm }
    }

    pub async fn analyze(
        &self,
        company_name: &str,
        document_text: &str,
        policy_type: PolicyType,
    ) -> Result<Analysis, AnalysisError> {
        if document_text.trim().is_empty() {
            return Err(AnalysisError::EmptyDocument);
        }

        let excerpt: String = document_text.chars().take(MAX_DOCUMENT_CHARS).collect();
        let prompt = build_prompt(company_name, &excerpt, policy_type);
        let request = CompletionRequest {
            system: None,
            messages: vec![Message::user(prompt)],
            max_tokens: ANALYSIS_MAX_TOKENS,
            temperature: ANALYSIS_TEMPERATURE,
        };

        let raw = self.llm.complete(request).await?;
        Ok(parse_analysis(&raw))
    }
}

fn build_prompt(company_name: &str, excerpt: &str, policy_type: PolicyType) -> String {
    let (analyst, focus) = match policy_type {
        PolicyType::Terms => (
            "You are an expert privacy analyst.",
            "1. Data collection practices\n\
             2. Data sharing with third parties\n\
             3. User tracking and profiling\n\
             4. Content ownership and licensing\n\
             5. Account termination policies\n\
             6. Arbitration clauses\n\
             7. Privacy concerns\n\
             8. Financial implications",
        ),
        PolicyType::Cookie => (
            "You are an expert privacy analyst specializing in cookie policies.",
            "1. Types of cookies used (essential, functional, analytics, advertising)\n\
             2. Third-party cookies and trackers\n\
             3. Cookie duration and persistence\n\
             4. Cross-site tracking capabilities\n\
             5. User consent mechanisms\n\
             6. Opt-out options and their effectiveness\n\
             7. Data collected through cookies\n\
             8. Cookie sharing with third parties",
        ),
        PolicyType::Privacy => (
            "You are an expert privacy analyst specializing in privacy policies.",
            "1. Types of personal data collected (PII, sensitive data, biometrics)\n\
             2. Data retention periods and policies\n\
             3. Third-party data sharing and selling\n\
             4. User rights (access, deletion, portability)\n\
             5. Data security measures mentioned\n\
             6. International data transfers\n\
             7. Children's privacy protections\n\
             8. Automated decision-making and profiling",
        ),
    };
    let label = policy_type.label();

    format!(
        "{analyst} Analyze the following {label} for {company_name}.\n\
         \n\
         Provide your analysis in the following JSON format:\n\
         {{\n\
             \"summary\": \"A brief 2-3 sentence summary of what users agree to\",\n\
             \"risks\": [\n\
                 {{\n\
                     \"title\": \"Risk title\",\n\
                     \"description\": \"Detailed description of the risk\",\n\
                     \"severity\": \"low|medium|high\"\n\
                 }}\n\
             ]\n\
         }}\n\
         \n\
         Focus on:\n\
         {focus}\n\
         \n\
         {label}:\n\
         {excerpt}\n\
         \n\
         Respond ONLY with valid JSON, no additional text."
    )
}

/// Parses the model's analysis response. Strips Markdown code fences,
/// isolates the outermost JSON object, and on any failure falls back to
/// a fixed error analysis instead of raising, so a malformed response
/// never breaks the calling workflow.
pub fn parse_analysis(raw: &str) -> Analysis {
    match try_parse(raw) {
        Some(analysis) => analysis,
        None => {
            tracing::warn!("analysis response was not valid JSON, using fallback");
            Analysis {
                summary: "Unable to parse analysis".to_string(),
                risks: vec![Risk {
                    title: "Analysis Error".to_string(),
                    description: raw.chars().take(FALLBACK_DESCRIPTION_CHARS).collect(),
                    severity: Severity::Medium,
                }],
            }
        }
    }
}

fn try_parse(raw: &str) -> Option<Analysis> {
    let mut cleaned = raw.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    let cleaned = cleaned.trim();

    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&cleaned[start..=end]).ok()
}
