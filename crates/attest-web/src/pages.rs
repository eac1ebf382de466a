//! HTML rendering for the verification form.
//!
//! The page is assembled with plain string formatting; there is no
//! client-side code beyond the form itself.

use attest_core::record::CertificateRecord;

/// Outcome of a lookup, rendered as the result fragment.
pub enum Lookup {
  Found(CertificateRecord),
  NotFound,
}

/// Minimal HTML escaping for text interpolated into the page.
fn escape(raw: &str) -> String {
  raw
    .replace('&', "&amp;")
    .replace('<', "&lt;")
    .replace('>', "&gt;")
    .replace('"', "&quot;")
}

fn found_fragment(record: &CertificateRecord) -> String {
  format!(
    r#"<div class="result success">
  <strong>Certificate Verified</strong><br><br>
  <strong>Name:</strong> {name}<br>
  <strong>Course:</strong> {course}<br>
  <strong>Issued On:</strong> {issued}<br>
  <strong>Status:</strong> {status}<br><br>
  <a href="{link}" target="_blank">Download Certificate PDF</a>
</div>"#,
    name = escape(&record.name),
    course = escape(&record.course),
    issued = record.issue_date.format("%Y-%m-%d"),
    status = escape(&record.status.to_string()),
    link = escape(&record.document_link),
  )
}

fn not_found_fragment() -> String {
  r#"<div class="result error">
  No certificate found with this ID. Please check again.
</div>"#
    .to_string()
}

/// Render the full page; `result` is present after a lookup.
pub fn page(result: Option<Lookup>) -> String {
  let fragment = match &result {
    None => String::new(),
    Some(Lookup::Found(record)) => found_fragment(record),
    Some(Lookup::NotFound) => not_found_fragment(),
  };

  format!(
    r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Certificate Verification</title>
  <style>
    body {{ font-family: sans-serif; max-width: 36rem; margin: 4rem auto; padding: 0 1rem; }}
    form {{ display: flex; gap: 0.5rem; }}
    input[name="cert_id"] {{ flex: 1; padding: 0.5rem; }}
    .result {{ margin-top: 2rem; padding: 1rem; border-radius: 4px; }}
    .result.success {{ background: #e8f5e9; }}
    .result.error {{ background: #fdecea; }}
  </style>
</head>
<body>
  <h1>Certificate Verification</h1>
  <form method="post" action="/verify">
    <input name="cert_id" placeholder="Certificate ID" required>
    <button type="submit">Verify</button>
  </form>
  {fragment}
</body>
</html>
"#
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn escape_neutralises_markup() {
    assert_eq!(escape(r#"<b>&"x""#), "&lt;b&gt;&amp;&quot;x&quot;");
  }
}
