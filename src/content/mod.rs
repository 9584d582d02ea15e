//! Read-only site content: bundled catalogs and the guide repository.

pub mod authors;
pub mod format;
pub mod guides;
pub mod loan_amounts;
pub mod loan_types;
pub mod states;

use std::collections::HashSet;

use thiserror::Error;

pub use authors::{AUTHORS, Author, author_by_slug};
pub use guides::{Guide, GuideError, GuideFrontmatter, GuideRepository, is_guide_published};
pub use loan_amounts::{LoanAmount, LoanCatalog, RepaymentExample};
pub use loan_types::{LOAN_TYPES, LoanTypeInfo, loan_type_by_slug};
pub use states::{StateCatalog, StateInfo};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to parse bundled {catalog} catalog: {source}")]
    Parse {
        catalog: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate slug {slug:?} in {catalog} catalog")]
    DuplicateSlug { catalog: &'static str, slug: String },
}

fn ensure_unique_slugs<'a>(
    catalog: &'static str,
    slugs: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for slug in slugs {
        if !seen.insert(slug) {
            return Err(CatalogError::DuplicateSlug {
                catalog,
                slug: slug.to_string(),
            });
        }
    }
    Ok(())
}
