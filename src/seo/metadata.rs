use chrono::NaiveDate;

use crate::config::SiteConfig;
use crate::markup::escape_html;

#[derive(Debug, Clone, PartialEq)]
pub enum PageKind {
    Website,
    Article {
        published: NaiveDate,
        modified: NaiveDate,
        author_name: String,
    },
}

/// Title, description and indexing hints for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub path: String,
    pub kind: PageKind,
    pub no_index: bool,
}

impl PageMeta {
    pub fn website(
        title: impl Into<String>,
        description: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            path: path.into(),
            kind: PageKind::Website,
            no_index: false,
        }
    }

    pub fn article(
        title: impl Into<String>,
        description: impl Into<String>,
        path: impl Into<String>,
        published: NaiveDate,
        modified: NaiveDate,
        author_name: impl Into<String>,
    ) -> Self {
        Self {
            kind: PageKind::Article {
                published,
                modified,
                author_name: author_name.into(),
            },
            ..Self::website(title, description, path)
        }
    }

    pub fn no_index(mut self) -> Self {
        self.no_index = true;
        self
    }

    pub fn full_title(&self, config: &SiteConfig) -> String {
        format!("{} | {}", self.title, config.site_name)
    }

    /// `<head>` tags: title, description, canonical link, Open Graph, Twitter
    /// card and robots.
    pub fn render_head(&self, config: &SiteConfig) -> String {
        let title = escape_html(&self.full_title(config));
        let description = escape_html(&self.description);
        let url = escape_html(&config.url(&self.path));
        let site_name = escape_html(&config.site_name);

        let mut head = format!(
            "<title>{title}</title>\n\
<meta name=\"description\" content=\"{description}\">\n\
<link rel=\"canonical\" href=\"{url}\">\n\
<meta property=\"og:title\" content=\"{title}\">\n\
<meta property=\"og:description\" content=\"{description}\">\n\
<meta property=\"og:url\" content=\"{url}\">\n\
<meta property=\"og:site_name\" content=\"{site_name}\">\n"
        );

        match &self.kind {
            PageKind::Website => {
                head.push_str("<meta property=\"og:type\" content=\"website\">\n");
            }
            PageKind::Article {
                published,
                modified,
                author_name,
            } => {
                head.push_str("<meta property=\"og:type\" content=\"article\">\n");
                head.push_str(&format!(
                    "<meta property=\"article:published_time\" content=\"{published}\">\n\
<meta property=\"article:modified_time\" content=\"{modified}\">\n\
<meta property=\"article:author\" content=\"{}\">\n",
                    escape_html(author_name)
                ));
            }
        }

        head.push_str(&format!(
            "<meta name=\"twitter:card\" content=\"summary_large_image\">\n\
<meta name=\"twitter:title\" content=\"{title}\">\n\
<meta name=\"twitter:description\" content=\"{description}\">\n"
        ));

        if self.no_index {
            head.push_str("<meta name=\"robots\" content=\"noindex, nofollow\">\n");
        }
        head
    }
}
