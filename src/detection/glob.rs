//! Workspace glob patterns.
//!
//! Patterns are matched against `/`-separated paths relative to the
//! workspace root:
//!
//! - `**` matches zero or more whole path segments
//! - `*` matches any run of characters inside one segment
//! - `?` matches exactly one character inside a segment
//!
//! Everything else is literal.

use std::path::Path;

/// A compiled glob pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glob {
    pattern: String,
    segments: Vec<String>,
}

impl Glob {
    /// Compile a pattern. Leading `./` and `/` are ignored.
    pub fn new(pattern: &str) -> Self {
        let normalized = normalize(pattern);
        let segments = normalized
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            pattern: pattern.to_string(),
            segments,
        }
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Whether a relative path string matches.
    pub fn matches(&self, relative: &str) -> bool {
        let normalized = normalize(relative);
        let path: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
        match_segments(&self.segments, &path)
    }

    /// Whether a relative path matches.
    pub fn matches_path(&self, relative: &Path) -> bool {
        self.matches(&relative.to_string_lossy())
    }

    /// Whether everything beneath a directory matches.
    ///
    /// Only patterns ending in `/**` exclude whole directories, so
    /// `**/node_modules/**` prunes every `node_modules` directory.
    pub fn covers_dir(&self, relative: &Path) -> bool {
        let Some((last, prefix)) = self.segments.split_last() else {
            return false;
        };
        if last != "**" {
            return false;
        }
        let normalized = normalize(&relative.to_string_lossy());
        let path: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
        !path.is_empty() && match_segments(prefix, &path)
    }
}

fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    let trimmed = path.strip_prefix("./").unwrap_or(&path);
    trimmed.trim_start_matches('/').to_string()
}

fn match_segments(pattern: &[String], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((first, rest)) if first == "**" => {
            match_segments(rest, path)
                || (!path.is_empty() && match_segments(pattern, &path[1..]))
        }
        Some((first, rest)) => match path.split_first() {
            Some((segment, path_rest)) => {
                match_segment(first, segment) && match_segments(rest, path_rest)
            }
            None => false,
        },
    }
}

/// Single-segment match with `*` and `?`.
fn match_segment(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, t));
            p += 1;
        } else if let Some((star_p, star_t)) = star {
            // Let the last star swallow one more character
            p = star_p + 1;
            t = star_t + 1;
            star = Some((star_p, star_t + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}
