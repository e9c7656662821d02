//! Minimal in-process HTML rendering for the form shell.
//!
//! Kept deliberately thin: the handlers hand over exactly the anti-forgery
//! token and zero-or-one pending notice. Submitted field values are never
//! echoed back, and the notice text is escaped before it reaches the
//! markup since the notice cookie is client-writable.

use crate::notice::Notice;

/// Escape text for interpolation into HTML body or attribute positions.
fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Render the lead-capture form with the embedded anti-forgery token and an
/// optional notice banner.
pub fn render_form(csrf_token: &str, notice: Option<&Notice>) -> String {
    let banner = notice
        .map(|n| {
            format!(
                r#"    <p class="notice notice-{}">{}</p>
"#,
                n.severity.as_str(),
                escape_html(&n.message)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Lead Capture</title>
</head>
<body>
  <main>
    <h1>Get in touch</h1>
{banner}    <form method="post" action="/submit">
      <input type="hidden" name="csrf_token" value="{csrf_token}">
      <label for="email">Email</label>
      <input type="text" id="email" name="email">
      <label for="name">Name</label>
      <input type="text" id="name" name="name">
      <label for="company">Company</label>
      <input type="text" id="company" name="company">
      <button type="submit">Submit</button>
    </form>
  </main>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_token_in_hidden_field() {
        let html = render_form("deadbeef", None);
        assert!(html.contains(r#"name="csrf_token" value="deadbeef""#));
        assert!(!html.contains("class=\"notice"));
    }

    #[test]
    fn renders_notice_banner_with_severity() {
        let notice = Notice::success("Lead submitted successfully!");
        let html = render_form("deadbeef", Some(&notice));
        assert!(html.contains("notice-success"));
        assert!(html.contains("Lead submitted successfully!"));
    }

    #[test]
    fn escapes_markup_in_notice_message() {
        let notice = Notice::error(r#"<script>alert(1)</script>"onmouseover=""#);
        let html = render_form("deadbeef", Some(&notice));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&quot;onmouseover=&quot;"));
    }
}
