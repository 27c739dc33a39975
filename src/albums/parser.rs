/// Album file parser
///
/// An album is a Markdown file with front-matter metadata followed by one
/// image link per line:
///
/// ```text
/// ---
/// name: Summer 2024
/// date: 2024-07-01
/// description: Two weeks on the coast
/// coverImage: https://example.com/cover.jpg
/// ---
/// [Sunset](https://example.com/1.jpg)
/// [](https://example.com/2.jpg)
/// ```
///
/// Metadata is best-effort: missing or unparseable fields become empty
/// strings, and body lines that are not image links are dropped. Parsing
/// never fails on content.

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::state::data::{Album, ImageItem};

/// Markdown link pattern: `[title](url)`
static IMAGE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("image line pattern is valid"));

/// Parse one album file's contents
///
/// `id` is the file stem; it is carried through untouched.
pub fn parse_album(id: &str, contents: &str) -> Album {
    let (front_matter, body) = split_front_matter(contents);

    let mut name = String::new();
    let mut date = String::new();
    let mut description = String::new();
    let mut cover_image = String::new();

    for line in front_matter.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = unquote(value.trim());

        match key.trim() {
            "name" => name = value.to_string(),
            "date" => date = normalize_date(value),
            "description" => description = value.to_string(),
            "coverImage" => cover_image = value.to_string(),
            _ => {}
        }
    }

    let images = parse_images(body);

    Album {
        id: id.to_string(),
        name,
        date,
        description,
        cover_image,
        images,
    }
}

/// Split a file into its front-matter block and body
///
/// The front matter is delimited by a leading `---` line and the next
/// `---` line. A file without the fences is all body.
fn split_front_matter(contents: &str) -> (&str, &str) {
    let rest = match contents.strip_prefix("---") {
        Some(rest) => rest,
        None => return ("", contents),
    };
    // The opening fence must be the whole first line
    let rest = match rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n")) {
        Some(rest) => rest,
        None => return ("", contents),
    };

    for (offset, line) in line_spans(rest) {
        let trimmed = line.strip_suffix('\n').unwrap_or(line).trim_end_matches('\r');
        if trimmed == "---" {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (front, body);
        }
    }

    // Unterminated front matter: treat everything as metadata
    (rest, "")
}

/// Byte offset and text of every line, including its trailing content
fn line_spans(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n').map(move |line| {
        let span = (offset, line);
        offset += line.len();
        span
    })
}

/// Extract the ordered image list from an album body
///
/// Lines that do not match `[title](url)`, or that match with an empty
/// URL, are excluded. An empty title is fine as long as the URL is there.
pub fn parse_images(body: &str) -> Vec<ImageItem> {
    body.lines()
        .filter_map(|line| {
            let captures = IMAGE_LINE.captures(line)?;
            let url = captures[2].trim().to_string();
            if url.is_empty() {
                return None;
            }
            Some(ImageItem {
                title: captures[1].to_string(),
                url,
            })
        })
        .collect()
}

/// Normalize a front-matter date to ISO `YYYY-MM-DD`
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, and RFC 3339 timestamps; anything
/// else normalizes to the empty string.
fn normalize_date(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()));

    match parsed {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => String::new(),
    }
}

/// Strip one layer of matching quotes from a front-matter value
fn unquote(value: &str) -> &str {
    let stripped = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')));
    stripped.unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_album_file() {
        let contents = "---\n\
                        name: Summer 2024\n\
                        date: 2024-07-01\n\
                        description: Two weeks on the coast\n\
                        coverImage: http://a/cover.jpg\n\
                        ---\n\
                        [Sunset](http://a/1.jpg)\n\
                        [Harbor](http://a/2.jpg)\n";

        let album = parse_album("2024-summer", contents);
        assert_eq!(album.id, "2024-summer");
        assert_eq!(album.name, "Summer 2024");
        assert_eq!(album.date, "2024-07-01");
        assert_eq!(album.description, "Two weeks on the coast");
        assert_eq!(album.cover_image, "http://a/cover.jpg");
        assert_eq!(album.images.len(), 2);
        assert_eq!(album.images[0].title, "Sunset");
        assert_eq!(album.images[1].url, "http://a/2.jpg");
    }

    #[test]
    fn test_missing_metadata_defaults_to_empty() {
        let album = parse_album("bare", "---\n---\n[One](http://a/1.jpg)\n");
        assert_eq!(album.name, "");
        assert_eq!(album.date, "");
        assert_eq!(album.description, "");
        assert_eq!(album.cover_image, "");
        assert_eq!(album.images.len(), 1);
    }

    #[test]
    fn test_no_front_matter_at_all() {
        let album = parse_album("plain", "[One](http://a/1.jpg)\n");
        assert_eq!(album.name, "");
        assert_eq!(album.images.len(), 1);
    }

    #[test]
    fn test_body_line_filtering() {
        // Non-matching lines are dropped; an empty title is kept as long
        // as the URL is present; an empty URL drops the line.
        let body = "[Sunset](http://a/1.jpg)\n\
                    no match here\n\
                    [](http://a/2.jpg)\n\
                    [no url]()\n\
                    [Noon](http://a/3.jpg)";

        let images = parse_images(body);
        assert_eq!(
            images,
            vec![
                ImageItem {
                    title: "Sunset".into(),
                    url: "http://a/1.jpg".into()
                },
                ImageItem {
                    title: "".into(),
                    url: "http://a/2.jpg".into()
                },
                ImageItem {
                    title: "Noon".into(),
                    url: "http://a/3.jpg".into()
                },
            ]
        );
    }

    #[test]
    fn test_date_normalization() {
        assert_eq!(normalize_date("2024-07-01"), "2024-07-01");
        assert_eq!(normalize_date("2024/07/01"), "2024-07-01");
        assert_eq!(normalize_date("2024-07-01T12:30:00Z"), "2024-07-01");
        assert_eq!(normalize_date("yesterday"), "");
        assert_eq!(normalize_date(""), "");
    }

    #[test]
    fn test_quoted_values() {
        let album = parse_album("q", "---\nname: \"Quoted Name\"\n---\n");
        assert_eq!(album.name, "Quoted Name");
    }

    #[test]
    fn test_unterminated_front_matter_has_no_images() {
        let album = parse_album("broken", "---\nname: Oops\n[X](http://a/1.jpg)\n");
        assert_eq!(album.name, "Oops");
        assert!(album.images.is_empty());
    }
}
