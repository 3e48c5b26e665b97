//! Shared page chrome and HTML helpers

const STYLE: &str = r#"
        body {
            font-family: system-ui, -apple-system, sans-serif;
            max-width: 900px;
            margin: 40px auto;
            padding: 20px;
            line-height: 1.6;
        }
        h1 {
            color: #333;
            border-bottom: 2px solid #0066cc;
            padding-bottom: 10px;
        }
        nav a {
            margin-right: 15px;
            color: #0066cc;
            text-decoration: none;
        }
        .muted { color: #777; }
        .segment {
            background: #f5f5f5;
            padding: 10px 20px;
            border-radius: 4px;
            margin: 15px 0;
        }
        form.search input[type=text] { width: 60%; padding: 6px; }
"#;

/// Wrap `body` in the site layout
pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Dude Perfect Fan Archive</title>
    <style>{style}</style>
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/videos">Videos</a>
        <a href="/videos/categories">Categories</a>
        <a href="/songs">Songs</a>
        <a href="/artists">Artists</a>
        <a href="/contact">Contact</a>
    </nav>
{body}
    <p><small class="muted">dpfa-web v{version}</small></p>
</body>
</html>
"#,
        title = escape_html(title),
        style = STYLE,
        body = body,
        version = env!("CARGO_PKG_VERSION"),
    )
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Search box posting `q` back to `action`
pub fn search_form(action: &str, placeholder: &str, query: Option<&str>) -> String {
    format!(
        r#"<form class="search" method="get" action="{action}">
    <input type="text" name="q" maxlength="100" placeholder="{placeholder}" value="{value}">
    <button type="submit">Search</button>
</form>"#,
        action = action,
        placeholder = escape_html(placeholder),
        value = escape_html(query.unwrap_or_default()),
    )
}

/// `<ul>` of pre-rendered items, or a muted note when empty
pub fn list_or<I>(items: I, empty: &str) -> String
where
    I: IntoIterator<Item = String>,
{
    let items: Vec<String> = items.into_iter().map(|item| format!("  <li>{}</li>", item)).collect();
    if items.is_empty() {
        format!("<p class=\"muted\">{}</p>", escape_html(empty))
    } else {
        format!("<ul>\n{}\n</ul>", items.join("\n"))
    }
}

pub fn link(href: &str, text: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape_html(href), escape_html(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_search_form_escapes_query() {
        let form = search_form("/songs", "Song title", Some("\"><script>"));
        assert!(form.contains("value=\"&quot;&gt;&lt;script&gt;\""));
    }

    #[test]
    fn test_list_or_empty() {
        assert!(list_or(Vec::new(), "No songs").contains("No songs"));
        assert!(list_or(vec!["a".to_string()], "No songs").contains("<li>a</li>"));
    }
}
