mod metadata;
pub mod schema;
mod sitemap;

pub use metadata::{PageKind, PageMeta};
pub use schema::Crumb;
pub use sitemap::{
    ChangeFrequency, STATIC_PAGES, SitemapEntry, build_sitemap, render_robots_txt,
    render_sitemap_xml,
};
