//! HTML pages for browsing and watching media

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const PLAYER_TEMPLATE: &str = include_str!("../templates/player.html");

/// Render the library listing with its search form
///
/// # Arguments
/// * `entries` - Relative media paths to link to
/// * `query` - Current search text, echoed back into the form
pub fn render_index(entries: &[String], query: &str) -> String {
    let items = if entries.is_empty() {
        r#"        <li class="empty">No movies found.</li>"#.to_string()
    } else {
        entries
            .iter()
            .map(|entry| {
                format!(
                    r#"        <li><a href="/watch/{}">{}</a></li>"#,
                    encode_path(entry),
                    escape_html(entry)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    INDEX_TEMPLATE
        .replace("{{ query }}", &escape_html(query))
        .replace("{{ entries }}", &items)
}

/// Render the player page for one media file
pub fn render_player(filename: &str) -> String {
    let mime_type = mime_guess::from_path(filename).first_or_octet_stream();

    PLAYER_TEMPLATE
        .replace("{{ filename }}", &escape_html(filename))
        .replace("{{ stream_url }}", &format!("/stream/{}", encode_path(filename)))
        .replace("{{ mime_type }}", mime_type.essence_str())
}

/// Percent-encode each segment of a forward slash separated path
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

/// Escape text for HTML bodies and attribute values
///
/// Braces are escaped too so that text can never form a template
/// placeholder.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '{' => escaped.push_str("&#123;"),
            '}' => escaped.push_str("&#125;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
