//! Stripping `<name>` markers out of content strings.

use tagdoc_config::{MarkerSyntax, is_tag_name_char};

use crate::error::BuildError;
use crate::tags::Tags;

/// Remove tag markers from `input`, returning the remaining text and the
/// char offset of each tag within it.
///
/// An open delimiter that is not followed by a name, or whose name is not
/// followed by the close delimiter, is kept as literal text. A name that runs
/// to the end of the input is an unterminated marker.
pub fn strip_markers(input: &str, syntax: MarkerSyntax) -> Result<(String, Tags), BuildError> {
    let mut text = String::with_capacity(input.len());
    let mut text_chars = 0;
    let mut tags = Tags::new();
    let mut cursor = 0;

    while let Some(found) = input[cursor..].find(syntax.open()) {
        let open_at = cursor + found;
        let plain = &input[cursor..open_at];
        text.push_str(plain);
        text_chars += plain.chars().count();

        let name_start = open_at + syntax.open().len_utf8();
        let after = &input[name_start..];
        let name_len = after
            .find(|c: char| !is_tag_name_char(c))
            .unwrap_or(after.len());
        let name = &after[..name_len];

        match after[name_len..].chars().next() {
            _ if name.is_empty() => {
                text.push(syntax.open());
                text_chars += 1;
                cursor = name_start;
            }
            None => {
                return Err(BuildError::MalformedTag {
                    input: input.to_string(),
                    offset: input[..open_at].chars().count(),
                });
            }
            Some(c) if c == syntax.close() => {
                tags.insert(name, text_chars)?;
                cursor = name_start + name_len + c.len_utf8();
            }
            Some(_) => {
                text.push(syntax.open());
                text_chars += 1;
                cursor = name_start;
            }
        }
    }

    text.push_str(&input[cursor..]);
    Ok((text, tags))
}
