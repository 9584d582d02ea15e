use chrono::NaiveDate;

use crate::config::SiteConfig;
use crate::content::{AUTHORS, GuideRepository, LOAN_TYPES, LoanCatalog, StateCatalog};
use crate::markup::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub last_modified: NaiveDate,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Hand-written pages with fixed sitemap weight.
pub const STATIC_PAGES: [(&str, ChangeFrequency, f32); 13] = [
    ("", ChangeFrequency::Weekly, 1.0),
    ("/borrow", ChangeFrequency::Weekly, 0.9),
    ("/loans", ChangeFrequency::Weekly, 0.9),
    ("/states", ChangeFrequency::Monthly, 0.8),
    ("/guides", ChangeFrequency::Weekly, 0.8),
    ("/calculator", ChangeFrequency::Monthly, 0.7),
    ("/how-it-works", ChangeFrequency::Monthly, 0.7),
    ("/about", ChangeFrequency::Monthly, 0.5),
    ("/contact", ChangeFrequency::Monthly, 0.5),
    ("/advertiser-disclosure", ChangeFrequency::Monthly, 0.3),
    ("/editorial-guidelines", ChangeFrequency::Monthly, 0.3),
    ("/privacy-policy", ChangeFrequency::Monthly, 0.3),
    ("/terms-of-service", ChangeFrequency::Monthly, 0.3),
];

/// Every indexable URL. Amount pages and amount/state pages only cover
/// published records; state hubs cover every state except DC.
pub fn build_sitemap(
    config: &SiteConfig,
    loans: &LoanCatalog,
    states: &StateCatalog,
    guides: &GuideRepository,
    today: NaiveDate,
) -> Vec<SitemapEntry> {
    let entry = |path: &str, change_frequency, priority| SitemapEntry {
        loc: config.url(path),
        last_modified: today,
        change_frequency,
        priority,
    };

    let mut entries: Vec<SitemapEntry> = STATIC_PAGES
        .iter()
        .map(|&(path, frequency, priority)| entry(path, frequency, priority))
        .collect();

    entries.extend(LOAN_TYPES.iter().map(|loan_type| {
        entry(
            &format!("/loans/{}", loan_type.slug),
            ChangeFrequency::Weekly,
            0.9,
        )
    }));

    entries.extend(AUTHORS.iter().map(|author| {
        entry(
            &format!("/authors/{}", author.slug),
            ChangeFrequency::Monthly,
            0.4,
        )
    }));

    entries.extend(loans.published().map(|loan| {
        entry(
            &format!("/borrow/{}", loan.slug),
            ChangeFrequency::Weekly,
            0.9,
        )
    }));

    for loan in loans.published() {
        entries.extend(states.published().map(|state| {
            entry(
                &format!("/borrow/{}/{}", loan.slug, state.slug),
                ChangeFrequency::Monthly,
                0.7,
            )
        }));
    }

    entries.extend(
        states
            .all()
            .iter()
            .filter(|state| state.abbreviation != "DC")
            .map(|state| {
                entry(
                    &format!("/states/{}", state.slug),
                    ChangeFrequency::Monthly,
                    0.6,
                )
            }),
    );

    entries.extend(guides.published(today).into_iter().map(|guide| SitemapEntry {
        loc: config.url(&format!("/guides/{}", guide.frontmatter.slug)),
        last_modified: guide.frontmatter.updated_date,
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.8,
    }));

    entries
}

pub fn render_sitemap_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str(&format!(
            "<url><loc>{}</loc><lastmod>{}</lastmod><changefreq>{}</changefreq><priority>{:.1}</priority></url>\n",
            escape_html(&entry.loc),
            entry.last_modified,
            entry.change_frequency.as_str(),
            entry.priority
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}

pub fn render_robots_txt(config: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /apply\nDisallow: /api/\n\nSitemap: {}\n",
        config.url("/sitemap.xml")
    )
}
