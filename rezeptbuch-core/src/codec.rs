//! Storage encoding of the ingredient and step lists.
//!
//! Lists live in text columns as JSON arrays of strings. Nothing else in the
//! workspace should touch the encoded form.

use crate::error::CodecError;

pub fn encode_list(items: &[String]) -> Result<String, CodecError> {
    serde_json::to_string(items).map_err(CodecError::Encode)
}

pub fn decode_list(encoded: &str) -> Result<Vec<String>, CodecError> {
    serde_json::from_str(encoded).map_err(CodecError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_as_json_array() {
        let items = vec!["200 g Mehl".to_string(), "2 \"Eier\"".to_string()];
        let encoded = encode_list(&items).unwrap();
        assert_eq!(encoded, r#"["200 g Mehl","2 \"Eier\""]"#);
        assert_eq!(decode_list(&encoded).unwrap(), items);
    }

    #[test]
    fn rejects_non_string_arrays() {
        assert!(decode_list("[1,2]").is_err());
        assert!(decode_list("null").is_err());
        assert!(decode_list("Mehl, Milch").is_err());
    }
}
