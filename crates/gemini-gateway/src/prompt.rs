//! Prompt construction for both model legs
//!
//! The raw cURL text is embedded verbatim; no local parsing happens before
//! the model sees it.

use crate::types::VolatileInput;

/// Sentinel wording used when the selection is empty
const NO_FILTERING: &str = "no filtering - return the full response";

/// Prompt asking the model to predict response fields and spot volatile
/// inputs in a cURL command
pub fn analysis_prompt(curl_command: &str) -> String {
    format!(
        r#"You are an API expert. Analyze the following cURL command.

1. Predict the field names the JSON response of this API is likely to
   contain. Use dot notation for nested fields (e.g. "owner.login").
   List the most useful fields first.
2. Identify volatile inputs in the request itself: headers, query
   parameters, or body values that are expected to expire or require
   periodic replacement, such as bearer tokens, API keys, session
   cookies, timestamps, and nonces. For each one report its name, the
   literal current value found in the command, whether it lives in a
   header, query parameter, or body field, and a short description of
   what it is. Report an empty list if there are none.

cURL command:
{curl_command}
"#
    )
}

/// Prompt asking the model to produce a Python script for a cURL command,
/// filtered to the selected fields, with volatile inputs hoisted into a
/// configuration block
pub fn conversion_prompt(
    curl_command: &str,
    selected_fields: &[String],
    volatile_inputs: &[VolatileInput],
) -> String {
    let field_section = if selected_fields.is_empty() {
        NO_FILTERING.to_string()
    } else {
        selected_fields.join(", ")
    };

    let volatile_section = if volatile_inputs.is_empty() {
        "none".to_string()
    } else {
        volatile_inputs
            .iter()
            .map(|v| {
                format!(
                    "- {} ({}): currently \"{}\" - {}",
                    v.name,
                    v.kind.as_str(),
                    v.current_value,
                    v.description
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"You are an expert Python developer. Convert the following cURL
command into a standalone Python script using the requests library.

Requirements for the script:
1. Issue the HTTP request described by the cURL command.
2. Handle network failures and non-success status codes gracefully.
3. Extract only the selected fields from the JSON response. Selected
   fields use dot notation for nesting; traverse them null-safely so a
   missing intermediate object does not raise.
4. Hoist every volatile input listed below into a clearly delimited
   configuration block at the top of the script (named constants), and
   reference those constants from the request construction code instead
   of inlining the literals.

Selected fields: {field_section}

Volatile inputs:
{volatile_section}

Also provide a short explanation of what the script does, and a mock JSON
example of the exact filtered response shape the script would print.

cURL command:
{curl_command}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VolatileKind;

    const CURL: &str = r#"curl -X GET "https://api.github.com/users/octocat" -H "accept: application/json""#;

    #[test]
    fn test_analysis_prompt_embeds_command_verbatim() {
        let prompt = analysis_prompt(CURL);
        assert!(prompt.contains(CURL));
        assert!(prompt.contains("dot notation"));
        assert!(prompt.contains("volatile"));
    }

    #[test]
    fn test_conversion_prompt_lists_selected_fields() {
        let fields = vec!["login".to_string(), "company.name".to_string()];
        let prompt = conversion_prompt(CURL, &fields, &[]);

        assert!(prompt.contains("login, company.name"));
        assert!(prompt.contains("Volatile inputs:\nnone"));
        assert!(prompt.contains(CURL));
    }

    #[test]
    fn test_conversion_prompt_empty_selection_uses_sentinel() {
        let prompt = conversion_prompt(CURL, &[], &[]);
        assert!(prompt.contains(NO_FILTERING));
    }

    #[test]
    fn test_conversion_prompt_serializes_volatile_inputs() {
        let inputs = vec![VolatileInput {
            name: "Authorization".to_string(),
            current_value: "Bearer xyz".to_string(),
            kind: VolatileKind::Header,
            description: "expiring OAuth token".to_string(),
        }];

        let prompt = conversion_prompt(CURL, &[], &inputs);
        assert!(prompt.contains("Authorization (header)"));
        assert!(prompt.contains("Bearer xyz"));
        assert!(prompt.contains("expiring OAuth token"));
    }
}
