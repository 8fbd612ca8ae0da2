//! Bone id token lists
//!
//! Vertex bone references arrive as whitespace-separated integers. Tokens
//! that are not integers, negative ids (unskinned vertices) and ids beyond
//! `u32` are dropped one by one; a noisy token never rejects the list.

use std::collections::BTreeMap;

use crate::core::types::BoneId;

/// Parse a single bone id token
pub fn parse_bone_token(token: &str) -> Option<BoneId> {
    let value: i64 = token.parse().ok()?;
    u32::try_from(value).ok().map(BoneId)
}

/// Count references per bone id in a token list
pub fn count_bone_ids(text: &str) -> BTreeMap<BoneId, u32> {
    let mut counts = BTreeMap::new();
    for bone_id in text.split_whitespace().filter_map(parse_bone_token) {
        *counts.entry(bone_id).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_tokens() {
        assert_eq!(parse_bone_token("0"), Some(BoneId(0)));
        assert_eq!(parse_bone_token("42"), Some(BoneId(42)));
        assert_eq!(parse_bone_token("+7"), Some(BoneId(7)));
    }

    #[test]
    fn test_reject_invalid_tokens() {
        assert_eq!(parse_bone_token("-1"), None);
        assert_eq!(parse_bone_token("1.5"), None);
        assert_eq!(parse_bone_token("abc"), None);
        assert_eq!(parse_bone_token("4294967296"), None);
    }

    #[test]
    fn test_counts_repeats() {
        let counts = count_bone_ids("3 1 3 3 -1 x 1\n\t2");
        assert_eq!(counts.get(&BoneId(3)), Some(&3));
        assert_eq!(counts.get(&BoneId(1)), Some(&2));
        assert_eq!(counts.get(&BoneId(2)), Some(&1));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_blank_text_is_empty() {
        assert!(count_bone_ids("").is_empty());
        assert!(count_bone_ids("   \n ").is_empty());
        assert!(count_bone_ids("-1 -1 -1").is_empty());
    }
}
