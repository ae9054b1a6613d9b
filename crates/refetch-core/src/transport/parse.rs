//! Parse collected response header lines into status text and headers.

/// Status line and headers of the final response in a header stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ParsedHead {
    pub status_text: String,
    pub headers: Vec<(String, String)>,
}

/// Parse raw header lines as delivered by libcurl's header callback.
///
/// When redirects are followed, libcurl reports the headers of every hop, so
/// each status line starts a fresh block and only the last block is kept.
pub(crate) fn parse_head(lines: &[String]) -> ParsedHead {
    let mut head = ParsedHead::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            head = ParsedHead {
                status_text: reason_phrase(line),
                headers: Vec::new(),
            };
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            head.headers
                .push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    head
}

/// "HTTP/1.1 503 Service Unavailable" -> "Service Unavailable".
fn reason_phrase(status_line: &str) -> String {
    let mut parts = status_line.splitn(3, ' ');
    let _version = parts.next();
    let _code = parts.next();
    parts.next().unwrap_or("").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn status_text_and_headers() {
        let h = parse_head(&lines(&[
            "HTTP/1.1 200 OK",
            "Content-Type: application/json",
            "Content-Length: 12",
            "",
        ]));
        assert_eq!(h.status_text, "OK");
        assert_eq!(h.headers.len(), 2);
        assert_eq!(h.headers[0], ("Content-Type".into(), "application/json".into()));
    }

    #[test]
    fn multi_word_reason_phrase() {
        let h = parse_head(&lines(&["HTTP/1.1 503 Service Unavailable"]));
        assert_eq!(h.status_text, "Service Unavailable");
    }

    #[test]
    fn http2_has_no_reason_phrase() {
        let h = parse_head(&lines(&["HTTP/2 404", "server: nginx"]));
        assert_eq!(h.status_text, "");
        assert_eq!(h.headers, vec![("server".into(), "nginx".into())]);
    }

    #[test]
    fn redirect_keeps_last_block_only() {
        let h = parse_head(&lines(&[
            "HTTP/1.1 302 Found",
            "Location: /elsewhere",
            "",
            "HTTP/1.1 200 OK",
            "ETag: \"abc\"",
        ]));
        assert_eq!(h.status_text, "OK");
        assert_eq!(h.headers, vec![("ETag".into(), "\"abc\"".into())]);
    }
}
