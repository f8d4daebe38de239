use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Locates the first balanced `open`..`close` substring in free-form model
/// output. The model may wrap its answer in commentary or code fences, so this
/// scans from the first opening bracket and tracks nesting depth, skipping
/// string literals and escapes.
fn balanced_slice(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(&text[start..start + i + c.len_utf8()]);
            }
        }
    }

    None
}

/// Extracts and parses the first JSON array in `text`. Fails rather than
/// guesses: no balanced array, or one that does not parse, is an error.
pub fn extract_json_array<T: DeserializeOwned>(text: &str) -> Result<T, AppError> {
    let slice = balanced_slice(text, '[', ']').ok_or(AppError::MalformedOutput)?;
    serde_json::from_str(slice).map_err(|_| AppError::MalformedOutput)
}

/// Extracts and parses the first JSON object in `text`.
pub fn extract_json_object<T: DeserializeOwned>(text: &str) -> Result<T, AppError> {
    let slice = balanced_slice(text, '{', '}').ok_or(AppError::MalformedOutput)?;
    serde_json::from_str(slice).map_err(|_| AppError::MalformedOutput)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::generate::model::{ChatMessage, PostContent};

    #[test]
    fn array_is_extracted_from_surrounding_commentary() {
        let text = "Here you go:\n[{\"senderId\":\"me\",\"content\":\"hi\"}]";
        let messages: Vec<ChatMessage> = extract_json_array(text).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender_id, "me");
        assert_eq!(messages[0].content, "hi");
    }

    #[test]
    fn array_is_extracted_from_a_code_fence() {
        let text = "```json\n[{\"senderId\":\"other\",\"content\":\"hey\"}]\n```";
        let messages: Vec<ChatMessage> = extract_json_array(text).unwrap();
        assert_eq!(messages[0].sender_id, "other");
    }

    #[test]
    fn brackets_inside_string_literals_do_not_close_the_scan() {
        let text = "[{\"senderId\":\"me\",\"content\":\"list: [a] done\"}] trailing";
        let messages: Vec<ChatMessage> = extract_json_array(text).unwrap();
        assert_eq!(messages[0].content, "list: [a] done");
    }

    #[test]
    fn object_extraction_handles_nesting_and_prefix() {
        let text = "Sure!\n{\"content\":\"post\",\"hashtags\":[\"a\",\"b\"]}";
        let post: PostContent = extract_json_object(text).unwrap();
        assert_eq!(post.content, "post");
        assert_eq!(post.hashtags.as_deref(), Some(&["a".to_string(), "b".to_string()][..]));
    }

    #[test]
    fn missing_structure_is_an_error_not_a_partial_result() {
        let err = extract_json_array::<Vec<ChatMessage>>("no json here").unwrap_err();
        assert!(matches!(err, AppError::MalformedOutput));

        let err = extract_json_object::<PostContent>("still nothing").unwrap_err();
        assert!(matches!(err, AppError::MalformedOutput));
    }

    #[test]
    fn unparseable_balanced_slice_is_an_error() {
        let err = extract_json_array::<Vec<ChatMessage>>("[not, valid, json]").unwrap_err();
        assert!(matches!(err, AppError::MalformedOutput));
    }

    #[test]
    fn unterminated_array_is_an_error() {
        let err =
            extract_json_array::<Vec<ChatMessage>>("[{\"senderId\":\"me\"").unwrap_err();
        assert!(matches!(err, AppError::MalformedOutput));
    }
}
