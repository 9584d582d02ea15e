//! schema.org structured data.

use serde_json::{Value, json};

use crate::config::SiteConfig;
use crate::content::guides::{Faq, Guide};
use crate::content::{Author, LoanAmount};

/// One breadcrumb trail step; `href` is a site path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub name: String,
    pub href: String,
}

impl Crumb {
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: href.into(),
        }
    }
}

pub fn organization(config: &SiteConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": config.site_name,
        "url": config.url(""),
        "logo": config.url("/images/logo.png"),
        "description": config.site_description,
        "contactPoint": {
            "@type": "ContactPoint",
            "contactType": "customer service",
            "url": config.url("/contact"),
        },
        "sameAs": [],
    })
}

/// LoanOrCredit offer for an amount page. `max_apr` is passed separately so
/// state pages can apply their cap; `state` adds `areaServed`.
pub fn loan_or_credit(
    config: &SiteConfig,
    loan: &LoanAmount,
    max_apr: f64,
    state: Option<&str>,
) -> Value {
    let mut data = json!({
        "@context": "https://schema.org",
        "@type": "LoanOrCredit",
        "name": format!("{} Personal Loan", loan.display_amount),
        "amount": {
            "@type": "MonetaryAmount",
            "value": loan.amount,
            "currency": "USD",
        },
        "annualPercentageRate": {
            "@type": "QuantitativeValue",
            "minValue": loan.min_apr,
            "maxValue": max_apr,
        },
        "loanTerm": {
            "@type": "QuantitativeValue",
            "minValue": loan.min_term_months,
            "maxValue": loan.max_term_months,
            "unitCode": "MON",
        },
        "provider": {
            "@type": "Organization",
            "name": config.site_name,
            "url": config.url(""),
        },
    });
    if let (Some(state), Some(object)) = (state, data.as_object_mut()) {
        object.insert(
            "areaServed".to_string(),
            json!({ "@type": "State", "name": state }),
        );
    }
    data
}

pub fn faq_page(faqs: &[Faq]) -> Value {
    let questions: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": faq.answer,
                },
            })
        })
        .collect();
    json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": questions,
    })
}

/// Trail always starts at Home.
pub fn breadcrumb_list(config: &SiteConfig, crumbs: &[Crumb]) -> Value {
    let home = Crumb::new("Home", "/");
    let items: Vec<Value> = std::iter::once(&home)
        .chain(crumbs)
        .enumerate()
        .map(|(index, crumb)| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": crumb.name,
                "item": config.url(&crumb.href),
            })
        })
        .collect();
    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}

pub fn article(config: &SiteConfig, guide: &Guide) -> Value {
    let fm = &guide.frontmatter;
    json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": fm.title,
        "description": fm.description,
        "datePublished": fm.published_date.to_string(),
        "dateModified": fm.updated_date.to_string(),
        "url": config.url(&format!("/guides/{}", fm.slug)),
        "author": {
            "@type": "Person",
            "name": fm.author.name,
            "url": config.url(&format!("/authors/{}", fm.author.slug)),
            "jobTitle": fm.author.credentials,
        },
        "reviewer": {
            "@type": "Person",
            "name": fm.reviewer.name,
            "url": config.url(&format!("/authors/{}", fm.reviewer.slug)),
            "jobTitle": fm.reviewer.credentials,
        },
        "publisher": {
            "@type": "Organization",
            "name": config.site_name,
            "url": config.url(""),
        },
    })
}

pub fn person(config: &SiteConfig, author: &Author) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Person",
        "name": author.name,
        "jobTitle": author.title,
        "description": author.bio,
        "url": config.url(&format!("/authors/{}", author.slug)),
        "knowsAbout": author.expertise,
        "alumniOf": author.education,
        "worksFor": {
            "@type": "Organization",
            "name": config.site_name,
        },
    })
}
