use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Args;

pub const DEFAULT_SITE_NAME: &str = "FundingZest";
pub const DEFAULT_SITE_URL: &str = "https://fundingzest.com";
pub const DEFAULT_SITE_DESCRIPTION: &str = "Compare personal loan and payday loan options from FundingZest's network of lenders. Bad credit considered. Apply in minutes, funds as soon as same day.";

/// Everything page rendering needs to know about the deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub site_name: String,
    pub site_url: String,
    pub site_description: String,
    pub guides_dir: PathBuf,
    pub lead_form_script: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: DEFAULT_SITE_NAME.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            site_description: DEFAULT_SITE_DESCRIPTION.to_string(),
            guides_dir: PathBuf::from("content/guides"),
            lead_form_script: None,
        }
    }
}

impl SiteConfig {
    /// Absolute URL for a site path such as `/borrow`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.site_url.trim_end_matches('/'))
    }
}

#[derive(Args, Debug, Clone)]
pub struct SiteArgs {
    #[arg(long, env = "FUNDINGZEST_SITE_NAME", default_value = DEFAULT_SITE_NAME)]
    pub site_name: String,
    #[arg(
        long,
        env = "FUNDINGZEST_SITE_URL",
        default_value = DEFAULT_SITE_URL,
        help = "Public origin used for canonical URLs, JSON-LD and the sitemap"
    )]
    pub site_url: String,
    #[arg(
        long,
        env = "FUNDINGZEST_GUIDES_DIR",
        default_value = "content/guides",
        help = "Directory of Markdown guides with YAML frontmatter"
    )]
    pub guides_dir: PathBuf,
}

impl SiteArgs {
    pub fn into_config(self, lead_form_script: Option<String>) -> SiteConfig {
        SiteConfig {
            site_name: self.site_name,
            site_url: self.site_url,
            guides_dir: self.guides_dir,
            lead_form_script,
            ..SiteConfig::default()
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, env = "FUNDINGZEST_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,
    #[arg(
        long,
        env = "FUNDINGZEST_LEAD_FORM_SCRIPT",
        help = "Script URL of the third-party lead-capture widget embedded on /apply"
    )]
    pub lead_form_script: Option<String>,
    #[command(flatten)]
    pub site: SiteArgs,
}
