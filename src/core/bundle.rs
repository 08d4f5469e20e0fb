// Act 3 bundle manifest: pull stylesheet and module-script references out of
// the bundle's index.html and re-home asset paths under the mount prefix.

use smallvec::SmallVec;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BundleError {
    #[error("bundle index has no module script")]
    MissingModuleScript,
    #[error("fetch {path} returned status {status}")]
    Status { path: String, status: u16 },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BundleManifest {
    pub stylesheets: SmallVec<[String; 4]>,
    pub module_script: Option<String>,
}

impl BundleManifest {
    pub fn parse(html: &str) -> Self {
        let mut manifest = Self::default();
        for tag in Tags::new(html) {
            match tag.name.as_str() {
                "link" => {
                    let is_sheet = tag
                        .attr("rel")
                        .map(|rel| {
                            rel.split_whitespace()
                                .any(|r| r.eq_ignore_ascii_case("stylesheet"))
                        })
                        .unwrap_or(false);
                    if let (true, Some(href)) = (is_sheet, tag.attr("href")) {
                        if !href.is_empty() {
                            manifest.stylesheets.push(href.to_string());
                        }
                    }
                }
                "script" if manifest.module_script.is_none() => {
                    let is_module = tag
                        .attr("type")
                        .map(|t| t.eq_ignore_ascii_case("module"))
                        .unwrap_or(false);
                    if let (true, Some(src)) = (is_module, tag.attr("src")) {
                        if !src.is_empty() {
                            manifest.module_script = Some(src.to_string());
                        }
                    }
                }
                _ => {}
            }
        }
        manifest
    }

    pub fn require_script(&self) -> Result<&str, BundleError> {
        self.module_script
            .as_deref()
            .ok_or(BundleError::MissingModuleScript)
    }
}

/// `/x.css` -> `{prefix}/x.css`; `./x.css` or `x.css` -> `{prefix}/x.css`.
pub fn resolve_asset_path(reference: &str, prefix: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if reference.starts_with('/') {
        format!("{prefix}{reference}")
    } else {
        format!("{prefix}/{}", reference.strip_prefix("./").unwrap_or(reference))
    }
}

/// Rewrite every root-relative `/assets/` reference to `{prefix}/assets/`.
pub fn rewrite_asset_urls(text: &str, prefix: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    text.replace("/assets/", &format!("{prefix}/assets/"))
}

// ---------------- minimal tag scanner ----------------

struct Tag {
    name: String,
    attrs: Vec<(String, String)>,
}

impl Tag {
    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Iterates start tags. Comments are skipped; text content is ignored.
struct Tags<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tags<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }
}

impl<'a> Iterator for Tags<'a> {
    type Item = Tag;

    fn next(&mut self) -> Option<Tag> {
        loop {
            let rest = &self.src[self.pos..];
            let lt = rest.find('<')?;
            let start = self.pos + lt;
            let after = &self.src[start + 1..];
            if after.starts_with("!--") {
                let end = after.find("-->").map(|i| start + 1 + i + 3)?;
                self.pos = end;
                continue;
            }
            let close = find_tag_end(after).map(|i| start + 1 + i)?;
            self.pos = close + 1;
            let body = &self.src[start + 1..close];
            if body.starts_with('/') || body.starts_with('!') || body.starts_with('?') {
                continue;
            }
            if let Some(tag) = parse_tag(body) {
                return Some(tag);
            }
        }
    }
}

/// Index of the `>` closing the tag, honoring quoted attribute values.
fn find_tag_end(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            _ => {}
        }
    }
    None
}

fn parse_tag(body: &str) -> Option<Tag> {
    let body = body.trim();
    let name_end = body
        .find(|c: char| c.is_whitespace() || c == '/')
        .unwrap_or(body.len());
    let name = body[..name_end].to_ascii_lowercase();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }
    let mut attrs = Vec::new();
    let mut chars = body[name_end..].chars().peekable();
    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace() || *c == '/') {
            chars.next();
        }
        let mut key = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() || c == '=' || c == '/' {
                break;
            }
            key.push(c);
            chars.next();
        }
        if key.is_empty() {
            break;
        }
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        let mut value = String::new();
        if chars.peek() == Some(&'=') {
            chars.next();
            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }
            match chars.peek().copied() {
                Some(q @ ('"' | '\'')) => {
                    chars.next();
                    for c in chars.by_ref() {
                        if c == q {
                            break;
                        }
                        value.push(c);
                    }
                }
                _ => {
                    while let Some(&c) = chars.peek() {
                        if c.is_whitespace() {
                            break;
                        }
                        value.push(c);
                        chars.next();
                    }
                }
            }
        }
        attrs.push((key.to_ascii_lowercase(), value));
    }
    Some(Tag { name, attrs })
}
