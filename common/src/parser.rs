//! 識別レスポンスパーサー
//!
//! AI CLIのレスポンスからJSONオブジェクトを抽出し、
//! IdentificationResult としてパース・検証する

use crate::error::{Error, Result};
use crate::types::IdentificationResult;

/// レスポンスからJSONオブジェクト部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. エラー
///
/// # Examples
/// ```
/// use object_finder_common::extract_json_object;
///
/// let response = "Result: {\"name\": \"Lady Bug\"} done";
/// let json = extract_json_object(response).unwrap();
/// assert_eq!(json, "{\"name\": \"Lady Bug\"}");
/// ```
pub fn extract_json_object(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("no JSON object found".into()))
}

/// 識別レスポンスをパース
///
/// rarity が範囲外、name が空などの不正な結果はエラーにする
pub fn parse_identification_response(response: &str) -> Result<IdentificationResult> {
    let json_str = extract_json_object(response)?;
    let result: IdentificationResult = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("identification JSON: {}", e)))?;
    result.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_with_block() {
        let response = r#"Here is what I see:
```json
{"name": "Red Oak Tree", "rarity": 3}
```
Anything else?"#;
        let json = extract_json_object(response).unwrap();
        assert_eq!(json, r#"{"name": "Red Oak Tree", "rarity": 3}"#);
    }

    #[test]
    fn test_extract_json_with_surrounding_text() {
        let response = r#"Sure: {"name": "Lady Bug"} hope that helps"#;
        assert_eq!(extract_json_object(response).unwrap(), r#"{"name": "Lady Bug"}"#);
    }

    #[test]
    fn test_extract_json_error() {
        let result = extract_json_object("I could not identify anything.");
        assert!(matches!(result, Err(Error::Parse(_))));
        assert!(extract_json_object("").is_err());
    }

    #[test]
    fn test_parse_identification_response() {
        let response = r#"```json
{
  "name": "Blue Morpho Butterfly",
  "description": "A tropical butterfly with iridescent blue wings.",
  "rarity": 8,
  "points": 160,
  "facts": ["Native to tropical rainforests of Latin America"]
}
```"#;
        let result = parse_identification_response(response).unwrap();
        assert_eq!(result.name, "Blue Morpho Butterfly");
        assert_eq!(result.rarity, 8);
        assert_eq!(result.points, 160);
        assert_eq!(result.facts.len(), 1);
    }

    #[test]
    fn test_parse_identification_rejects_bad_rarity() {
        let response = r#"{"name": "Dragon", "description": "?", "rarity": 42, "points": 9000}"#;
        let result = parse_identification_response(response);
        assert!(matches!(result, Err(Error::InvalidResult(_))));
    }

    #[test]
    fn test_parse_identification_missing_points() {
        let response = r#"{"name": "Rock", "description": "A rock.", "rarity": 1}"#;
        assert!(matches!(
            parse_identification_response(response),
            Err(Error::Parse(_))
        ));
    }
}
