use crate::Error;
use std::str::FromStr;

pub const SCENE_COMPOSITION: &str = include_str!("../data/prompts/scene_composition.txt");

/// How the user's prompt is turned into the instruction text sent to the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptStyle {
    /// Send the prompt exactly as typed.
    Verbatim,
    /// Embed the prompt in [`SCENE_COMPOSITION`], which asks the model to keep
    /// every subject's facial identity unchanged.
    #[default]
    PreserveIdentity,
}

impl PromptStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptStyle::Verbatim => "verbatim",
            PromptStyle::PreserveIdentity => "preserve-identity",
        }
    }

    pub fn instruction(&self, prompt: &str) -> String {
        match self {
            PromptStyle::Verbatim => prompt.to_string(),
            PromptStyle::PreserveIdentity => render(SCENE_COMPOSITION, &[("prompt", prompt)]),
        }
    }
}

impl FromStr for PromptStyle {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "verbatim" | "raw" => Ok(PromptStyle::Verbatim),
            "preserve-identity" | "preserve_identity" => Ok(PromptStyle::PreserveIdentity),
            other => Err(Error::Configuration(format!(
                "Unknown PROMPT_STYLE '{}'. Expected 'verbatim' or 'preserve-identity'",
                other
            ))),
        }
    }
}

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}
