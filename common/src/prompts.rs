//! プロンプト生成モジュール
//!
//! 外部AI CLIへ渡す識別プロンプト。
//! 出力形式は IdentificationResult と同じ形に固定する。

use crate::types::RARITY_RANGE;

/// 識別プロンプト生成
///
/// # Arguments
/// * `image_path` - AI CLIが読み込む画像ファイルのパス
pub fn build_identify_prompt(image_path: &str) -> String {
    format!(
        r#"Read the image file {image_path} and identify the main real-world object in it.

## Output format (exactly this JSON object)
{{
  "name": "common name of the object",
  "description": "one sentence describing the object",
  "rarity": integer {min}-{max} (1 = everywhere, {max} = extremely rare),
  "points": integer reward, higher for rarer objects,
  "facts": ["short fun fact", "short fun fact", "short fun fact"]
}}

## Notes
- Describe only what is visible, do not guess hidden details
- Output the JSON object only, no explanation"#,
        min = RARITY_RANGE.start(),
        max = RARITY_RANGE.end(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_identify_prompt() {
        let prompt = build_identify_prompt("/tmp/capture.jpg");
        assert!(prompt.contains("/tmp/capture.jpg"));
        assert!(prompt.contains("\"rarity\": integer 1-10"));
        assert!(prompt.contains("JSON object only"));
    }
}
