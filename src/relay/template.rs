//! Callback URL template rendering.
//!
//! # Responsibilities
//! - Substitute literal placeholders (`{ID}`) into callback path templates
//! - Reject templates left with unresolved placeholders
//!
//! # Design Decisions
//! - Plain find-and-replace; the callback paths need no conditionals or loops
//! - A leftover placeholder after substitution is a render failure routed
//!   through the normal error taxonomy

use crate::relay::error::{RelayError, RelayResult};

/// Render a URL template by substituting literal `{KEY}` placeholders.
///
/// `template` is the concatenation of the resolved base URL and the callback
/// path. Fails if any placeholder remains unresolved after substitution.
pub fn render(template: &str, substitutions: &[(&str, &str)]) -> RelayResult<String> {
    let mut rendered = template.to_string();
    for (key, value) in substitutions {
        rendered = rendered.replace(&format!("{{{key}}}"), value);
    }

    if let Some(placeholder) = leftover_placeholder(&rendered) {
        return Err(RelayError::Render(format!(
            "unresolved placeholder '{placeholder}' in template '{template}'"
        )));
    }

    Ok(rendered)
}

/// First `{...}` placeholder still present, if any.
fn leftover_placeholder(rendered: &str) -> Option<&str> {
    let open = rendered.find('{')?;
    let close = rendered[open..].find('}')?;
    Some(&rendered[open..open + close + 1])
}
