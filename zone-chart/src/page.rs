//! HTML pages served by the visualizer.
//!
//! Templates are plain constants with `__PLACEHOLDER__` markers filled by
//! `str::replace`, so CSS braces never clash with format strings.

const INDEX_TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Heart Rate Zones</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 32px; color: #222; }
  form { display: flex; gap: 8px; align-items: center; }
  input { padding: 6px 8px; border: 1px solid #ccc; border-radius: 6px; }
  button { padding: 6px 12px; }
</style>
</head>
<body>
<h1>Heart Rate Zones</h1>
<form action="/visualize" method="post">
  <label for="activity_id">Activity ID</label>
  <input id="activity_id" name="activity_id" required>
  <button type="submit">Visualize</button>
</form>
</body>
</html>
"#;

const VISUALIZE_TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Heart Rate Zones for Activity __ACTIVITY_ID__</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 32px; color: #222; }
  img { border: 1px solid #eee; border-radius: 8px; max-width: 100%; }
</style>
</head>
<body>
<h1>Heart Rate Zones for Activity __ACTIVITY_ID__</h1>
<img src="data:image/png;base64,__PLOT_IMAGE__" alt="Heart rate zones for activity __ACTIVITY_ID__">
<p><a href="/">Visualize another activity</a></p>
</body>
</html>
"#;

pub fn index_page() -> &'static str {
    INDEX_TEMPLATE
}

/// Page embedding a base64 PNG chart for one activity.
pub fn visualize_page(activity_id: &str, plot_image: &str) -> String {
    VISUALIZE_TEMPLATE
        .replace("__PLOT_IMAGE__", plot_image)
        .replace("__ACTIVITY_ID__", &escape_html(activity_id))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
