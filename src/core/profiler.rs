//! Trait-delta proposal and character Q&A over an LLM provider.
//!
//! Builds the prompts, issues one blocking chat call per action, and
//! parses responses tolerantly: the first brace-delimited JSON object in
//! the reply is taken as the delta map, anything else yields an empty map.

use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::core::codec::traits_to_text;
use crate::core::llm::{ChatMessage, ChatRequest, LLMProvider, Result};
use crate::core::traits::TraitMap;

static JSON_OBJECT_RE: OnceLock<Regex> = OnceLock::new();

fn json_object_re() -> &'static Regex {
    // Greedy and dot-matches-newline: the widest brace-delimited block wins,
    // which tolerates markdown fences and nested objects.
    JSON_OBJECT_RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("static regex"))
}

/// Extract the first brace-delimited JSON object from free text.
///
/// Returns `None` when no such block exists or the block fails to parse
/// as a JSON object.
pub fn extract_json_object(text: &str) -> Option<serde_json::Map<String, serde_json::Value>> {
    let block = json_object_re().find(text)?.as_str();
    match serde_json::from_str::<serde_json::Value>(block) {
        Ok(serde_json::Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Coerce an extracted object into a delta map, keeping integer values only.
fn delta_map_from(object: serde_json::Map<String, serde_json::Value>) -> TraitMap {
    let mut deltas = TraitMap::new();
    for (name, value) in object {
        if let Some(delta) = value.as_i64() {
            deltas.insert(name, delta.clamp(i32::MIN as i64, i32::MAX as i64) as i32);
        }
    }
    deltas
}

/// LLM-backed trait adviser.
///
/// Thin wrapper over a provider: all domain knowledge lives in the two
/// prompt builders and the tolerant response parsing.
pub struct Profiler {
    provider: Arc<dyn LLMProvider>,
}

impl Profiler {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_id(&self) -> &str {
        self.provider.id()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Propose weight deltas for `name` from a free-text description.
    ///
    /// An unparsable reply is not an error: it degrades to an empty map,
    /// indistinguishable from "no change suggested".
    pub async fn propose_deltas(
        &self,
        description: &str,
        name: &str,
        previous: &TraitMap,
    ) -> Result<TraitMap> {
        let prompt = build_delta_prompt(description, name, previous);
        let response = self.provider.chat(ChatRequest::from_prompt(prompt)).await?;

        match extract_json_object(&response.content) {
            Some(object) => Ok(delta_map_from(object)),
            None => {
                log::warn!(
                    "Delta proposal for {name} had no parsable JSON object; treating as empty"
                );
                Ok(TraitMap::new())
            }
        }
    }

    /// Answer a question about a character's trait profile.
    ///
    /// The conversation history rides along in the prompt; the caller owns
    /// appending the exchange to it after a successful answer.
    pub async fn ask_question(
        &self,
        question: &str,
        name: &str,
        traits: &TraitMap,
        history: &[ChatMessage],
    ) -> Result<String> {
        let prompt = build_question_prompt(question, name, traits, history);
        let response = self.provider.chat(ChatRequest::from_prompt(prompt)).await?;
        Ok(response.content)
    }
}

fn build_delta_prompt(description: &str, name: &str, previous: &TraitMap) -> String {
    let previous_weights = if previous.is_empty() {
        "{empty}".to_string()
    } else {
        traits_to_text(previous)
    };

    format!(
        "\
Generate a JSON object containing adjustments to a fictional character's personality trait weights.
Example format:
{{
    \"focused\": 1,
    \"curious\": 3,
    \"steady\": 2,
    ...
}}

Rules:
- weight_change can be a positive (stronger trait) or negative (weaker trait) integer that ADJUSTS the existing weights or adds a new trait.
- Only make small, reasonable shifts unless the description clearly contradicts a previous trait or emphasizes a new one strongly.
- Your changes will be added to the list to develop a nuanced personality over time.
- Refine existing traits by considering how new information reveals nuances, conditions, or interactions between traits. For example, a character might be 'confident' in public but 'insecure' privately.
- Preserve the shape of the character: treat prior traits as part of a growing, evolving profile.
- Include subtle synonym traits that expand meaning (e.g. both 'skeptical' and 'wary' if they express different sides). Include both emotional and behavioral traits where relevant.
- Keep traits to one or two words.

- Use the following scale for weight_change magnitude:
  - 1 to 2 for implied or subtle traits
  - 3 to 5 for directly stated or strongly implied traits
  - 6 or more ONLY if the trait is central, repeated, or heavily emphasized
  - Negative changes should follow the same logic, capped at -6 max
- Avoid large shifts unless the trait is clearly contradicted or reframed.
- Treat weight changes as minor adjustments to a stable profile, not a reset or redefinition.

Previous weights (for context):
{previous_weights}

New description for {name}:
{description}

Respond ONLY with the JSON object. No text or explanations.
"
    )
}

fn build_question_prompt(
    question: &str,
    name: &str,
    traits: &TraitMap,
    history: &[ChatMessage],
) -> String {
    let traits_text = traits_to_text(traits);

    if history.is_empty() {
        format!(
            "\
You are a creative writing assistant helping analyze a fictional character named {name} based on the following list of weighted personality traits:
{traits_text}

Answer the following question based on the traits.

Question: {question}
"
        )
    } else {
        let history_context = history
            .iter()
            .map(|msg| format!("{}: {}", msg.role, msg.content))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "\
You are a creative writing assistant helping analyze a fictional character named {name} based on the following list of weighted personality traits:
{traits_text}

Conversation History:
{history_context}

Answer this new question in the context of our ongoing conversation.
Question: {question}
"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::llm::{ChatResponse, LLMError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Provider that replays canned responses and records prompts.
    struct ScriptedProvider {
        responses: Mutex<Vec<std::result::Result<String, String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn replying(responses: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(
                    responses.iter().rev().map(|r| Ok(r.to_string())).collect(),
                ),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        fn id(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted-1"
        }

        async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
            self.prompts
                .lock()
                .unwrap()
                .push(request.messages[0].content.clone());
            let next = self
                .responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Ok(String::new()));
            match next {
                Ok(content) => Ok(ChatResponse {
                    content,
                    model: "scripted-1".to_string(),
                    finish_reason: Some("STOP".to_string()),
                    latency_ms: 1,
                }),
                Err(message) => Err(LLMError::ApiError {
                    status: 500,
                    message,
                }),
            }
        }
    }

    fn map(entries: &[(&str, i32)]) -> TraitMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn test_extract_json_object_from_prose() {
        let object =
            extract_json_object("Sure! Here you go:\n{\"curious\": 3,\n \"guarded\": -2}\nDone.")
                .unwrap();
        assert_eq!(object["curious"], 3);
        assert_eq!(object["guarded"], -2);
    }

    #[test]
    fn test_extract_json_object_none_without_braces() {
        assert!(extract_json_object("no json here").is_none());
        assert!(extract_json_object("{broken").is_none());
    }

    #[test]
    fn test_delta_map_skips_non_integer_values() {
        let object = extract_json_object("{\"a\": 2, \"b\": \"lots\", \"c\": 1.5}").unwrap();
        assert_eq!(delta_map_from(object), map(&[("a", 2)]));
    }

    #[tokio::test]
    async fn test_propose_deltas_parses_reply() {
        let provider = ScriptedProvider::replying(&["{\"curious\": 3, \"guarded\": 2}"]);
        let profiler = Profiler::new(provider.clone());

        let deltas = profiler
            .propose_deltas("A cautious scholar.", "Mara", &TraitMap::new())
            .await
            .unwrap();
        assert_eq!(deltas, map(&[("curious", 3), ("guarded", 2)]));

        let prompt = provider.last_prompt();
        assert!(prompt.contains("New description for Mara"));
        assert!(prompt.contains("{empty}"));
    }

    #[tokio::test]
    async fn test_propose_deltas_unparsable_is_empty() {
        let provider = ScriptedProvider::replying(&["I cannot answer that."]);
        let profiler = Profiler::new(provider);

        let deltas = profiler
            .propose_deltas("...", "Mara", &TraitMap::new())
            .await
            .unwrap();
        assert!(deltas.is_empty());
    }

    #[tokio::test]
    async fn test_delta_prompt_includes_previous_weights() {
        let provider = ScriptedProvider::replying(&["{}"]);
        let profiler = Profiler::new(provider.clone());

        let previous = map(&[("curious", 3), ("guarded", 2)]);
        profiler
            .propose_deltas("More reckless now.", "Mara", &previous)
            .await
            .unwrap();

        let prompt = provider.last_prompt();
        assert!(prompt.contains("curious: 3"));
        assert!(prompt.contains("guarded: 2"));
    }

    #[tokio::test]
    async fn test_question_prompt_without_history() {
        let provider = ScriptedProvider::replying(&["An archetype answer."]);
        let profiler = Profiler::new(provider.clone());

        let answer = profiler
            .ask_question("What archetype?", "Mara", &map(&[("curious", 3)]), &[])
            .await
            .unwrap();
        assert_eq!(answer, "An archetype answer.");

        let prompt = provider.last_prompt();
        assert!(prompt.contains("Answer the following question based on the traits."));
        assert!(!prompt.contains("Conversation History:"));
    }

    #[tokio::test]
    async fn test_question_prompt_with_history() {
        let provider = ScriptedProvider::replying(&["A follow-up answer."]);
        let profiler = Profiler::new(provider.clone());

        let history = vec![
            ChatMessage::user("What archetype?"),
            ChatMessage::assistant("The Explorer."),
        ];
        profiler
            .ask_question("And their flaw?", "Mara", &map(&[("curious", 3)]), &history)
            .await
            .unwrap();

        let prompt = provider.last_prompt();
        assert!(prompt.contains("Conversation History:"));
        assert!(prompt.contains("user: What archetype?"));
        assert!(prompt.contains("assistant: The Explorer."));
        assert!(prompt.contains("Question: And their flaw?"));
    }
}
