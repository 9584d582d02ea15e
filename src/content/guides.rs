use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum GuideError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} does not start with a frontmatter block", path.display())]
    MissingFrontmatter { path: PathBuf },

    #[error("invalid frontmatter in {}: {source}", path.display())]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidePerson {
    pub name: String,
    pub slug: String,
    pub credentials: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideFrontmatter {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub published: bool,
    pub published_date: NaiveDate,
    pub updated_date: NaiveDate,
    pub author: GuidePerson,
    pub reviewer: GuidePerson,
    #[serde(default)]
    pub reading_time: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Guide {
    pub frontmatter: GuideFrontmatter,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub text: String,
    pub id: String,
}

impl Guide {
    pub fn parse(path: &Path, source: &str) -> Result<Self, GuideError> {
        let (yaml, body) = split_frontmatter(source).ok_or_else(|| {
            GuideError::MissingFrontmatter {
                path: path.to_path_buf(),
            }
        })?;
        let frontmatter = serde_yaml::from_str(yaml).map_err(|source| GuideError::Frontmatter {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            frontmatter,
            content: body.to_string(),
        })
    }

    /// Level-2 headings as in-page links. Guides with fewer than three get no
    /// table of contents.
    pub fn table_of_contents(&self) -> Vec<TocEntry> {
        let entries: Vec<TocEntry> = self
            .content
            .lines()
            .filter_map(|line| line.strip_prefix("## "))
            .filter(|text| !text.is_empty())
            .map(|text| TocEntry {
                text: text.to_string(),
                id: heading_anchor(text),
            })
            .collect();
        if entries.len() < 3 { Vec::new() } else { entries }
    }

    /// Markdown body as HTML, with anchor ids on level-2 headings.
    pub fn render_html(&self) -> String {
        let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
        let mut events: Vec<Event<'_>> = Parser::new_ext(&self.content, options).collect();

        let mut i = 0;
        while i < events.len() {
            let is_bare_h2 = matches!(
                &events[i],
                Event::Start(Tag::Heading {
                    level: HeadingLevel::H2,
                    id: None,
                    ..
                })
            );
            if is_bare_h2 {
                let mut text = String::new();
                let mut j = i + 1;
                while j < events.len() {
                    match &events[j] {
                        Event::End(TagEnd::Heading(_)) => break,
                        Event::Text(t) | Event::Code(t) => text.push_str(t),
                        _ => {}
                    }
                    j += 1;
                }
                if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                    *id = Some(CowStr::from(heading_anchor(&text)));
                }
                i = j;
            }
            i += 1;
        }

        let mut out = String::with_capacity(self.content.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }
}

/// Lowercase, runs of anything but `[a-z0-9]` collapsed to `-`, no leading
/// or trailing dash.
pub fn heading_anchor(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else {
            pending_dash = true;
        }
    }
    out
}

fn split_frontmatter(source: &str) -> Option<(&str, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let rest = source.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Published flag set and publish date reached.
pub fn is_guide_published(frontmatter: &GuideFrontmatter, today: NaiveDate) -> bool {
    frontmatter.published && frontmatter.published_date <= today
}

#[derive(Debug, Clone, Default)]
pub struct GuideRepository {
    guides: Vec<Guide>,
}

impl GuideRepository {
    /// Loads every `.mdx`/`.md` file in `dir`. A missing directory is an empty
    /// repository; unparseable files are skipped.
    pub fn load(dir: &Path) -> Result<Self, GuideError> {
        if !dir.is_dir() {
            info!(dir = %dir.display(), "guides directory not found, serving no guides");
            return Ok(Self::default());
        }

        let entries = fs::read_dir(dir).map_err(|source| GuideError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| GuideError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            let is_guide = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == "mdx" || ext == "md");
            if is_guide && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut guides = Vec::with_capacity(paths.len());
        for path in paths {
            let source = fs::read_to_string(&path).map_err(|source| GuideError::Io {
                path: path.clone(),
                source,
            })?;
            match Guide::parse(&path, &source) {
                Ok(guide) => {
                    debug!(slug = %guide.frontmatter.slug, "loaded guide");
                    guides.push(guide);
                }
                Err(err) => warn!(error = %err, "skipping guide"),
            }
        }

        let repository = Self::from_guides(guides);
        info!(count = repository.guides.len(), dir = %dir.display(), "guides loaded");
        Ok(repository)
    }

    /// Keeps the first guide for each slug.
    pub fn from_guides(guides: Vec<Guide>) -> Self {
        let mut seen = HashSet::new();
        let guides = guides
            .into_iter()
            .filter(|guide| {
                let fresh = seen.insert(guide.frontmatter.slug.clone());
                if !fresh {
                    warn!(slug = %guide.frontmatter.slug, "duplicate guide slug ignored");
                }
                fresh
            })
            .collect();
        Self { guides }
    }

    pub fn all(&self) -> &[Guide] {
        &self.guides
    }

    /// Published guides, most recently updated first.
    pub fn published(&self, today: NaiveDate) -> Vec<&Guide> {
        let mut guides: Vec<&Guide> = self
            .guides
            .iter()
            .filter(|guide| is_guide_published(&guide.frontmatter, today))
            .collect();
        guides.sort_by(|a, b| b.frontmatter.updated_date.cmp(&a.frontmatter.updated_date));
        guides
    }

    pub fn by_slug(&self, slug: &str) -> Option<&Guide> {
        self.guides
            .iter()
            .find(|guide| guide.frontmatter.slug == slug)
    }

    pub fn published_by_slug(&self, slug: &str, today: NaiveDate) -> Option<&Guide> {
        self.by_slug(slug)
            .filter(|guide| is_guide_published(&guide.frontmatter, today))
    }

    pub fn published_slugs(&self, today: NaiveDate) -> Vec<&str> {
        self.published(today)
            .into_iter()
            .map(|guide| guide.frontmatter.slug.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
    }

    fn source(slug: &str, published: bool, published_date: &str, updated_date: &str) -> String {
        format!(
            "---\n\
title: Guide {slug}\n\
description: About {slug}\n\
slug: {slug}\n\
published: {published}\n\
publishedDate: {published_date}\n\
updatedDate: {updated_date}\n\
author:\n  name: James Carter\n  slug: james-carter\n  credentials: CFA\n\
reviewer:\n  name: Sarah Mitchell\n  slug: sarah-mitchell\n  credentials: CFP\n\
faqs:\n  - question: Is it free?\n    answer: Yes.\n\
---\n\
Intro paragraph.\n\n## First Part\n\nText.\n\n## Second: Part!\n\n### Detail\n\n## Third & Last\n"
        )
    }

    fn guide(slug: &str, published: bool, published_date: &str, updated_date: &str) -> Guide {
        Guide::parse(
            Path::new("test.mdx"),
            &source(slug, published, published_date, updated_date),
        )
        .expect("guide parses")
    }

    #[test]
    fn parses_frontmatter_and_body() {
        let guide = guide("apr-explained", true, "2025-01-10", "2025-02-01");
        assert_eq!(guide.frontmatter.slug, "apr-explained");
        assert_eq!(guide.frontmatter.author.slug, "james-carter");
        assert_eq!(guide.frontmatter.faqs.len(), 1);
        assert!(guide.frontmatter.tags.is_empty());
        assert!(guide.content.starts_with("Intro paragraph."));
    }

    #[test]
    fn rejects_missing_or_broken_frontmatter() {
        let err = Guide::parse(Path::new("x.mdx"), "# no frontmatter").expect_err("missing");
        assert!(matches!(err, GuideError::MissingFrontmatter { .. }));

        let err = Guide::parse(Path::new("x.mdx"), "---\ntitle: [unclosed\n---\nbody")
            .expect_err("broken yaml");
        assert!(matches!(err, GuideError::Frontmatter { .. }));

        let err = Guide::parse(Path::new("x.mdx"), "---\ntitle: only\n").expect_err("unclosed");
        assert!(matches!(err, GuideError::MissingFrontmatter { .. }));
    }

    #[test]
    fn publish_requires_flag_and_reached_date() {
        let today = date("2025-03-01");
        assert!(is_guide_published(&guide("a", true, "2025-03-01", "2025-03-01").frontmatter, today));
        assert!(!is_guide_published(&guide("b", true, "2025-03-02", "2025-03-02").frontmatter, today));
        assert!(!is_guide_published(&guide("c", false, "2025-01-01", "2025-01-01").frontmatter, today));
    }

    #[test]
    fn published_guides_sort_by_update_date_descending() {
        let repo = GuideRepository::from_guides(vec![
            guide("old", true, "2025-01-01", "2025-01-05"),
            guide("new", true, "2025-01-01", "2025-02-20"),
            guide("draft", false, "2025-01-01", "2025-03-01"),
            guide("future", true, "2026-01-01", "2026-01-01"),
        ]);
        let today = date("2025-06-01");
        assert_eq!(repo.published_slugs(today), vec!["new", "old"]);
        assert!(repo.by_slug("draft").is_some());
        assert!(repo.published_by_slug("draft", today).is_none());
        assert!(repo.published_by_slug("future", today).is_none());
        assert!(repo.published_by_slug("future", date("2026-01-01")).is_some());
    }

    #[test]
    fn duplicate_slugs_keep_first() {
        let repo = GuideRepository::from_guides(vec![
            guide("same", true, "2025-01-01", "2025-01-05"),
            guide("same", true, "2025-01-01", "2025-02-05"),
        ]);
        assert_eq!(repo.all().len(), 1);
        assert_eq!(repo.all()[0].frontmatter.updated_date, date("2025-01-05"));
    }

    #[test]
    fn table_of_contents_needs_three_headings() {
        let toc = guide("t", true, "2025-01-01", "2025-01-01").table_of_contents();
        assert_eq!(
            toc,
            vec![
                TocEntry { text: "First Part".into(), id: "first-part".into() },
                TocEntry { text: "Second: Part!".into(), id: "second-part".into() },
                TocEntry { text: "Third & Last".into(), id: "third-last".into() },
            ]
        );

        let short = Guide {
            content: "## One\n\n## Two\n".to_string(),
            ..guide("s", true, "2025-01-01", "2025-01-01")
        };
        assert!(short.table_of_contents().is_empty());
    }

    #[test]
    fn rendered_h2_headings_carry_anchor_ids() {
        let html = guide("r", true, "2025-01-01", "2025-01-01").render_html();
        assert!(html.contains(r#"<h2 id="first-part">First Part</h2>"#), "{html}");
        assert!(html.contains(r#"<h2 id="third-last">"#), "{html}");
        assert!(html.contains("<h3>Detail</h3>"), "{html}");
    }

    #[test]
    fn anchors_collapse_punctuation() {
        assert_eq!(heading_anchor("  What Is APR?  "), "what-is-apr");
        assert_eq!(heading_anchor("Step 1 -- Apply"), "step-1-apply");
        assert_eq!(heading_anchor("!!!"), "");
    }

    #[test]
    fn missing_directory_is_empty() {
        let repo = GuideRepository::load(Path::new("/definitely/not/here")).expect("empty repo");
        assert!(repo.all().is_empty());
    }
}
