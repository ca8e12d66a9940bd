use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 識別サービスの実装
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    /// カタログからランダムに選ぶスタブ
    #[default]
    Mock,
    Claude,
    Codex,
    Gemini,
}

impl AiProvider {
    /// 外部CLIのコマンド名（Mockは外部CLIを使わない）
    pub fn command_name(&self) -> Option<&'static str> {
        match self {
            AiProvider::Mock => None,
            AiProvider::Claude => Some("claude"),
            AiProvider::Codex => Some("codex"),
            AiProvider::Gemini => Some("gemini"),
        }
    }

    /// プロンプトを渡すための引数
    pub fn prompt_args(&self, prompt: &str) -> Vec<String> {
        match self {
            AiProvider::Mock => Vec::new(),
            AiProvider::Claude => vec![
                "-p".into(),
                prompt.into(),
                "--output-format".into(),
                "text".into(),
            ],
            AiProvider::Codex => vec!["exec".into(), prompt.into()],
            AiProvider::Gemini => vec!["-p".into(), prompt.into()],
        }
    }
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiProvider::Mock => write!(f, "mock"),
            AiProvider::Claude => write!(f, "claude"),
            AiProvider::Codex => write!(f, "codex"),
            AiProvider::Gemini => write!(f, "gemini"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_name() {
        assert_eq!(AiProvider::Mock.command_name(), None);
        assert_eq!(AiProvider::Claude.command_name(), Some("claude"));
    }

    #[test]
    fn test_prompt_args_contains_prompt() {
        let args = AiProvider::Codex.prompt_args("identify");
        assert_eq!(args, vec!["exec".to_string(), "identify".to_string()]);
        assert!(AiProvider::Claude.prompt_args("x").contains(&"x".to_string()));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&AiProvider::Gemini).unwrap();
        assert_eq!(json, "\"gemini\"");
        let parsed: AiProvider = serde_json::from_str("\"mock\"").unwrap();
        assert_eq!(parsed, AiProvider::Mock);
    }
}
