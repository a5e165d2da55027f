//! UX Genius: long-form UX artifacts from a senior-designer persona.

use craft_genai::{GenerationBackend, GenerationConfig, GenerationRequest, PRO_MODEL};
use tracing::info;

use crate::error::{ChatError, ChatResult};

/// Thinking budget for every UX Genius call.
pub const GENIUS_THINKING_BUDGET: u32 = 32768;

pub const EMPTY_RESPONSE_ERROR: &str =
    "The AI returned an empty or invalid response. Please try again or refine your inputs.";

/// Persona and ground rules for UX Genius.
pub const UX_CRAFT_SYSTEM_INSTRUCTION: &str = r#"You are "UXCraft", an expert UX designer AI agent. Your goal is to help product teams and stakeholders quickly generate high-quality UX artifacts on demand: user stories, acceptance criteria, feature specs, interaction flows, wireframe notes, design ideas, persona summaries, and prioritized backlog items. Apply product thinking, user-centered design, usability heuristics, and pragmatic engineering constraints. Always make deliverables clear, actionable, and ready for handoff to product managers, designers, or engineers.

Persona: Senior UX Designer with 10+ years experience in web and mobile SaaS products; works with PMs and engineers; balances business goals, user needs, and technical constraints.

Tone: Professional, concise, collaborative, and pragmatic. Use plain language; avoid jargon unless defining it; call out trade-offs and risks.

Default output formats: user story (As a... I want... so that...), acceptance criteria (Given/When/Then), feature summary (one-line), key flows (steps), mockup notes (layout, components, copy), priority and effort estimate (High/Medium/Low).

When asked, provide:

Personas (name, goal, tech comfort, context, pain points)

3–5 user stories per feature with clear acceptance criteria

1 prioritized backlog (MVP vs later)

1 simple interaction flow (steps) and edge cases

Mockup / layout notes with suggested components and microcopy

1–3 alternative design ideas with pros/cons and risks

Suggested metrics to measure success (KPI and how to track)

Rough effort estimate (T-shirt sizing) and dependencies

Heuristics to apply: Nielsen’s usability heuristics, accessibility (WCAG AA), mobile-first responsiveness, progressive disclosure, error prevention, clear affordances.

Assumptions: If the user omits context, explicitly state 3 reasonable assumptions you made and why; then proceed with the output.

When to ask follow-up: If critical missing info prevents a useful output (e.g., target platform, user type, legal constraints), ask exactly one focused clarifying question and pause."#;

/// Inputs for a persona summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonaBrief {
    pub name: Option<String>,
    pub goal: String,
    pub tech_comfort: Option<String>,
    pub context: Option<String>,
    pub pain_points: String,
}

/// A validated UX Genius request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeniusPrompt {
    FreeForm(String),
    DesignIdeas(String),
    Persona(PersonaBrief),
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn or_default<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value.as_deref().filter(|v| !blank(v)).unwrap_or(fallback)
}

impl GeniusPrompt {
    pub fn free_form(prompt: impl Into<String>) -> ChatResult<Self> {
        let prompt = prompt.into();
        if blank(&prompt) {
            return Err(ChatError::Input("Please enter a prompt.".to_string()));
        }
        Ok(Self::FreeForm(prompt))
    }

    pub fn design_ideas(problem: impl Into<String>) -> ChatResult<Self> {
        let problem = problem.into();
        if blank(&problem) {
            return Err(ChatError::Input("Please describe the UX problem.".to_string()));
        }
        Ok(Self::DesignIdeas(problem))
    }

    /// Goal and pain points are required; the rest is inferred when missing.
    pub fn persona(brief: PersonaBrief) -> ChatResult<Self> {
        if blank(&brief.goal) || blank(&brief.pain_points) {
            return Err(ChatError::Input(
                "Please provide at least a goal and pain points for the persona.".to_string(),
            ));
        }
        Ok(Self::Persona(brief))
    }

    /// Text sent to the model.
    pub fn render(&self) -> String {
        match self {
            Self::FreeForm(prompt) => prompt.clone(),
            Self::DesignIdeas(problem) => format!(
                "Generate 3-5 distinct design ideas for the following UX problem. For each idea, provide a brief description, a list of pros, and a list of cons. Present the output in a clear, structured format, consistent with the UXCraft persona guidelines.\n\n**UX Problem:** {}",
                problem
            ),
            Self::Persona(brief) => format!(
                "Generate a detailed user persona summary based on the following information. Flesh out the details and present it in a clear, structured format, consistent with the UXCraft persona guidelines.\n\n\
                 - **Name:** {}\n\
                 - **Primary Goal:** {}\n\
                 - **Tech Comfort Level:** {}\n\
                 - **Context/Scenario:** {}\n\
                 - **Key Pain Points:** {}",
                or_default(&brief.name, "(Suggest a name)"),
                brief.goal,
                or_default(&brief.tech_comfort, "(Not specified, please infer)"),
                or_default(&brief.context, "(Not specified, please infer)"),
                brief.pain_points
            ),
        }
    }
}

/// Runs UX Genius prompts against a backend.
pub struct GeniusClient<B> {
    backend: B,
    model: String,
}

impl<B: GenerationBackend> GeniusClient<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            model: PRO_MODEL.to_string(),
        }
    }

    pub fn request(&self, prompt: &GeniusPrompt) -> GenerationRequest {
        GenerationRequest::new(&self.model, prompt.render())
            .system_instruction(UX_CRAFT_SYSTEM_INSTRUCTION)
            .config(GenerationConfig::default().with_thinking_budget(GENIUS_THINKING_BUDGET))
    }

    /// Generate the markdown answer for `prompt`.
    pub async fn generate(&self, prompt: &GeniusPrompt) -> ChatResult<String> {
        info!("Running UX Genius on {}", self.model);
        match self.backend.generate(&self.request(prompt)).await {
            Ok(response) if !blank(&response.text) => Ok(response.text),
            Ok(_) | Err(craft_genai::GenAiError::EmptyResponse) => {
                Err(ChatError::Generation(EMPTY_RESPONSE_ERROR.to_string()))
            }
            Err(e) => Err(ChatError::Generation(format!(
                "API Error: {}. Please check your API key and network connection.",
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use craft_genai::{CapturedRequest, MockBackend};

    #[test]
    fn test_required_fields() {
        assert_eq!(
            GeniusPrompt::free_form(" ").unwrap_err().to_string(),
            "Please enter a prompt."
        );
        assert_eq!(
            GeniusPrompt::design_ideas("").unwrap_err().to_string(),
            "Please describe the UX problem."
        );
        let brief = PersonaBrief {
            goal: "Book a flight".into(),
            ..PersonaBrief::default()
        };
        assert!(GeniusPrompt::persona(brief).unwrap_err().is_input());
    }

    #[test]
    fn test_persona_fills_missing_fields() {
        let prompt = GeniusPrompt::persona(PersonaBrief {
            name: None,
            goal: "Track expenses".into(),
            tech_comfort: Some("High".into()),
            context: Some("  ".into()),
            pain_points: "Too many receipts".into(),
        })
        .unwrap();

        let text = prompt.render();
        assert!(text.contains("- **Name:** (Suggest a name)\n"));
        assert!(text.contains("- **Tech Comfort Level:** High\n"));
        assert!(text.contains("- **Context/Scenario:** (Not specified, please infer)\n"));
        assert!(text.ends_with("- **Key Pain Points:** Too many receipts"));
    }

    #[test]
    fn test_design_ideas_prompt() {
        let text = GeniusPrompt::design_ideas("Checkout drop-off").unwrap().render();
        assert!(text.starts_with("Generate 3-5 distinct design ideas"));
        assert!(text.ends_with("**UX Problem:** Checkout drop-off"));
    }

    #[tokio::test]
    async fn test_request_uses_persona_and_thinking_budget() {
        let backend = MockBackend::new().reply_text("## Ideas");
        let client = GeniusClient::new(backend.clone());

        let answer = client
            .generate(&GeniusPrompt::free_form("user stories for favorites").unwrap())
            .await
            .unwrap();
        assert_eq!(answer, "## Ideas");

        match &backend.requests()[0] {
            CapturedRequest::Generate(request) => {
                assert_eq!(request.model, PRO_MODEL);
                assert_eq!(request.config.thinking_budget, Some(GENIUS_THINKING_BUDGET));
                assert_eq!(
                    request.system_instruction.as_deref(),
                    Some(UX_CRAFT_SYSTEM_INSTRUCTION)
                );
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_and_failed_responses() {
        let client = GeniusClient::new(MockBackend::new().reply_text("").reply_error(401, "bad key"));
        let prompt = GeniusPrompt::free_form("x").unwrap();

        assert_eq!(
            client.generate(&prompt).await.unwrap_err().to_string(),
            EMPTY_RESPONSE_ERROR
        );
        assert_eq!(
            client.generate(&prompt).await.unwrap_err().to_string(),
            "API Error: Generation API error 401: bad key. Please check your API key and network connection."
        );
    }
}
