//! Server-rendered HTML for every page family.
//!
//! Every interpolated value goes through [`escape_html`]; the only raw HTML
//! inserted is the Markdown rendering of guide bodies.

use chrono::{Datelike, NaiveDate};
use serde_json::Value;

use crate::config::SiteConfig;
use crate::content::format::{
    format_apr, format_limit, format_rate, format_usd, format_whole_dollars,
};
use crate::content::guides::Faq;
use crate::content::{
    AUTHORS, Author, Guide, LOAN_TYPES, LoanAmount, LoanCatalog, LoanTypeInfo, RepaymentExample,
    StateCatalog, StateInfo,
};
use crate::core::{
    APR_BOUNDS, InputBounds, InvalidInputError, PRINCIPAL_BOUNDS, RepaymentResult, TERM_BOUNDS,
    calculate_repayment,
};
use crate::markup::{escape_html, json_ld_script};
use crate::seo::{Crumb, PageMeta, schema};

pub(crate) const ESTIMATE_UNAVAILABLE: &str = "Repayment estimate unavailable";

/// One rendered page before it is wrapped in the site layout.
pub(crate) struct Page {
    meta: PageMeta,
    crumbs: Vec<Crumb>,
    json_ld: Vec<Value>,
    scripts: Vec<String>,
    body: String,
}

impl Page {
    fn new(meta: PageMeta, body: String) -> Self {
        Self {
            meta,
            crumbs: Vec::new(),
            json_ld: Vec::new(),
            scripts: Vec::new(),
            body,
        }
    }

    fn with_crumbs(mut self, crumbs: Vec<Crumb>) -> Self {
        self.crumbs = crumbs;
        self
    }

    fn with_json_ld(mut self, value: Value) -> Self {
        self.json_ld.push(value);
        self
    }

    fn with_script(mut self, src: impl Into<String>) -> Self {
        self.scripts.push(src.into());
        self
    }

    pub(crate) fn render(&self, config: &SiteConfig, today: NaiveDate) -> String {
        let mut structured = vec![schema::organization(config)];
        if !self.crumbs.is_empty() {
            structured.push(schema::breadcrumb_list(config, &self.crumbs));
        }
        structured.extend(self.json_ld.iter().cloned());
        let json_ld = structured
            .iter()
            .map(json_ld_script)
            .collect::<Vec<_>>()
            .join("\n");

        let breadcrumbs = if self.crumbs.is_empty() {
            String::new()
        } else {
            breadcrumb_nav(&self.crumbs)
        };
        let scripts: String = self
            .scripts
            .iter()
            .map(|src| format!("<script src=\"{}\" defer></script>\n", escape_html(src)))
            .collect();

        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
{head}<link rel=\"stylesheet\" href=\"/styles.css\">\n{json_ld}\n</head>\n<body>\n\
{header}<main>\n{breadcrumbs}{body}</main>\n{footer}{scripts}</body>\n</html>\n",
            head = self.meta.render_head(config),
            header = site_header(config),
            body = self.body,
            footer = site_footer(config, today),
        )
    }
}

fn site_header(config: &SiteConfig) -> String {
    format!(
        "<header class=\"site-header\">\n<a class=\"brand\" href=\"/\">{}</a>\n<nav>\n\
<a href=\"/borrow\">Borrow</a>\n<a href=\"/loans\">Loan Types</a>\n\
<a href=\"/states\">States</a>\n<a href=\"/guides\">Guides</a>\n\
<a href=\"/calculator\">Calculator</a>\n<a class=\"button\" href=\"/apply\">Apply Now</a>\n\
</nav>\n</header>\n",
        escape_html(&config.site_name)
    )
}

fn site_footer(config: &SiteConfig, today: NaiveDate) -> String {
    let loan_links: String = LOAN_TYPES
        .iter()
        .map(|loan_type| {
            format!(
                "<li>{}</li>\n",
                link(&format!("/loans/{}", loan_type.slug), loan_type.name)
            )
        })
        .collect();
    let info_links: String = InfoPage::ALL
        .iter()
        .map(|page| format!("<li>{}</li>\n", link(page.path(), page.title())))
        .collect();
    let site = escape_html(&config.site_name);
    format!(
        "<footer class=\"site-footer\">\n<div class=\"columns\">\n\
<ul>\n{loan_links}</ul>\n<ul>\n{info_links}</ul>\n</div>\n\
<p class=\"fine-print\">{site} is not a lender and does not make credit decisions. \
We connect borrowers with lenders in our network, who may compensate us. \
Loan amounts, rates and terms vary by lender and state.</p>\n\
<p class=\"fine-print\">&copy; {} {site}</p>\n</footer>\n",
        today.year()
    )
}

fn link(href: &str, text: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape_html(href), escape_html(text))
}

fn breadcrumb_nav(crumbs: &[Crumb]) -> String {
    let mut nav = String::from(
        "<nav class=\"breadcrumbs\" aria-label=\"Breadcrumb\">\n<ol>\n<li><a href=\"/\">Home</a></li>\n",
    );
    let last = crumbs.len().saturating_sub(1);
    for (index, crumb) in crumbs.iter().enumerate() {
        if index == last {
            nav.push_str(&format!(
                "<li aria-current=\"page\">{}</li>\n",
                escape_html(&crumb.name)
            ));
        } else {
            nav.push_str(&format!("<li>{}</li>\n", link(&crumb.href, &crumb.name)));
        }
    }
    nav.push_str("</ol>\n</nav>\n");
    nav
}

fn repayment_cells(result: &Result<RepaymentResult, InvalidInputError>) -> String {
    match result {
        Ok(result) => format!(
            "<td>{}</td><td>{}</td><td>{}</td>",
            format_usd(result.monthly_payment),
            format_usd(result.total_cost),
            format_usd(result.total_interest)
        ),
        Err(_) => format!("<td colspan=\"3\">{ESTIMATE_UNAVAILABLE}</td>"),
    }
}

fn repayment_table(examples: &[RepaymentExample]) -> String {
    let mut table = String::from(
        "<table class=\"repayment-table\">\n<thead><tr><th>Example</th><th>APR</th><th>Term</th>\
<th>Monthly Payment</th><th>Total Cost</th><th>Total Interest</th></tr></thead>\n<tbody>\n",
    );
    for example in examples {
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td>{}</tr>\n",
            escape_html(example.label),
            format_rate(example.apr),
            months(example.term_months),
            repayment_cells(&example.result)
        ));
    }
    table.push_str(
        "</tbody>\n</table>\n<p class=\"fine-print\">Representative examples only. \
Actual rates and terms depend on your credit profile, income and the lender's criteria.</p>\n",
    );
    table
}

fn months(term: u32) -> String {
    if term == 1 {
        "1 month".to_string()
    } else {
        format!("{term} months")
    }
}

fn faq_section(faqs: &[Faq]) -> String {
    if faqs.is_empty() {
        return String::new();
    }
    let mut section = String::from(
        "<section class=\"faqs\">\n<h2>Frequently Asked Questions</h2>\n",
    );
    for faq in faqs {
        section.push_str(&format!(
            "<details>\n<summary>{}</summary>\n<p>{}</p>\n</details>\n",
            escape_html(&faq.question),
            escape_html(&faq.answer)
        ));
    }
    section.push_str("</section>\n");
    section
}

/// `/apply` link carrying the amount and state the visitor was looking at.
pub(crate) fn apply_href(amount: Option<&str>, state: Option<&str>) -> String {
    let params: Vec<String> = [("amount", amount), ("state", state)]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| format!("{key}={value}")))
        .collect();
    if params.is_empty() {
        "/apply".to_string()
    } else {
        format!("/apply?{}", params.join("&"))
    }
}

fn quick_apply(amount: Option<&str>, state: Option<&str>) -> String {
    format!(
        "<aside class=\"quick-apply\">\n<h3>Ready to Apply?</h3>\n\
<p>Check your options in minutes. No impact on your credit score to get started.</p>\n\
<a class=\"button\" href=\"{}\">See My Options</a>\n</aside>\n",
        escape_html(&apply_href(amount, state))
    )
}

fn affiliate_disclosure(config: &SiteConfig) -> String {
    format!(
        "<p class=\"disclosure\">{} may receive compensation from lenders in our network. \
This does not affect the offers you see. <a href=\"/advertiser-disclosure\">Advertiser disclosure</a>.</p>\n",
        escape_html(&config.site_name)
    )
}

fn person_link(name: &str, slug: &str, credentials: &str) -> String {
    link(&format!("/authors/{slug}"), &format!("{name}, {credentials}"))
}

fn byline(author: &Author, reviewer: &Author) -> String {
    format!(
        "<p class=\"byline\">Written by {}. Reviewed by {}.</p>\n",
        person_link(author.name, author.slug, author.credentials),
        person_link(reviewer.name, reviewer.slug, reviewer.credentials)
    )
}

fn estimate_sentence(example: &RepaymentExample, display_amount: &str) -> String {
    match &example.result {
        Ok(result) => format!(
            "For example, a {display_amount} loan at {} APR over {} would cost about {} in total ({} per month).",
            format_rate(example.apr),
            months(example.term_months),
            format_usd(result.total_cost),
            format_usd(result.monthly_payment)
        ),
        Err(_) => format!("{ESTIMATE_UNAVAILABLE}."),
    }
}

pub(crate) fn home(
    config: &SiteConfig,
    loans: &LoanCatalog,
    states: &StateCatalog,
    guides: &[&Guide],
) -> Page {
    let amounts: String = loans
        .published()
        .map(|loan| {
            format!(
                "<li>{}</li>\n",
                link(&format!("/borrow/{}", loan.slug), &format!("{} Loans", loan.display_amount))
            )
        })
        .collect();
    let loan_types: String = LOAN_TYPES
        .iter()
        .map(|loan_type| {
            format!(
                "<li>{}<p>{}</p></li>\n",
                link(&format!("/loans/{}", loan_type.slug), loan_type.name),
                escape_html(loan_type.description)
            )
        })
        .collect();
    let state_links: String = states
        .published()
        .map(|state| {
            format!(
                "<li>{}</li>\n",
                link(&format!("/states/{}", state.slug), &state.name)
            )
        })
        .collect();
    let latest: String = guides
        .iter()
        .take(3)
        .map(|guide| {
            format!(
                "<li>{}<p>{}</p></li>\n",
                link(&format!("/guides/{}", guide.frontmatter.slug), &guide.frontmatter.title),
                escape_html(&guide.frontmatter.description)
            )
        })
        .collect();

    let mut body = format!(
        "<section class=\"hero\">\n<h1>Compare Personal Loans from {site}'s Lender Network</h1>\n\
<p>{description}</p>\n<a class=\"button\" href=\"/apply\">Check Your Options</a>\n</section>\n\
<section>\n<h2>Borrow by Amount</h2>\n<ul class=\"link-grid\">\n{amounts}</ul>\n</section>\n\
<section>\n<h2>Loan Types</h2>\n<ul class=\"cards\">\n{loan_types}</ul>\n</section>\n\
<section>\n<h2>Loans by State</h2>\n<ul class=\"link-grid\">\n{state_links}</ul>\n\
<p><a href=\"/states\">See all states</a></p>\n</section>\n\
<section>\n<h2>Estimate Your Payments</h2>\n<p>See what a loan could cost before you apply.</p>\n\
<a href=\"/calculator\">Open the loan calculator</a>\n</section>\n",
        site = escape_html(&config.site_name),
        description = escape_html(&config.site_description),
    );
    if !latest.is_empty() {
        body.push_str(&format!(
            "<section>\n<h2>Latest Guides</h2>\n<ul class=\"cards\">\n{latest}</ul>\n</section>\n"
        ));
    }
    body.push_str(&affiliate_disclosure(config));

    Page::new(
        PageMeta::website(
            "Personal Loans and Payday Loan Options",
            config.site_description.clone(),
            "/",
        ),
        body,
    )
}

pub(crate) fn borrow_index(config: &SiteConfig, loans: &LoanCatalog) -> Page {
    let rows: String = loans
        .published()
        .map(|loan| {
            format!(
                "<tr><td>{}</td><td>{} - {}</td><td>{} - {}</td></tr>\n",
                link(&format!("/borrow/{}", loan.slug), &format!("{} Loan", loan.display_amount)),
                format_rate(loan.min_apr),
                format_rate(loan.max_apr),
                months(loan.min_term_months),
                months(loan.max_term_months)
            )
        })
        .collect();
    let body = format!(
        "<h1>How Much Do You Need to Borrow?</h1>\n\
<p>Choose an amount to compare typical rates, terms and repayment costs.</p>\n\
<table>\n<thead><tr><th>Amount</th><th>APR Range</th><th>Term Range</th></tr></thead>\n\
<tbody>\n{rows}</tbody>\n</table>\n{}{}",
        quick_apply(None, None),
        affiliate_disclosure(config)
    );
    Page::new(
        PageMeta::website(
            "Borrow Money Online - Compare Loan Amounts",
            format!(
                "Compare loan amounts from $100 to $35,000 with {}. See typical APRs, terms and repayment examples.",
                config.site_name
            ),
            "/borrow",
        ),
        body,
    )
    .with_crumbs(vec![Crumb::new("Borrow", "/borrow")])
}

fn amount_faqs(config: &SiteConfig, loan: &LoanAmount, mid: &RepaymentExample) -> Vec<Faq> {
    let amount = &loan.display_amount;
    let site = &config.site_name;
    vec![
        Faq {
            question: format!("Can I get a {amount} loan with bad credit?"),
            answer: format!(
                "Yes, many lenders in {site}'s network consider applicants with bad credit or no credit history for {amount} loans. Approval also depends on income and employment, and APRs may be higher for lower credit scores."
            ),
        },
        Faq {
            question: format!("How fast can I get a {amount} loan?"),
            answer: "Many lenders make approval decisions within minutes. If approved, funds are typically deposited as soon as the next business day.".to_string(),
        },
        Faq {
            question: format!("What are the requirements for a {amount} loan?"),
            answer: "Requirements vary by lender but usually include being at least 18, having a regular income, an active bank account and US citizenship or permanent residency.".to_string(),
        },
        Faq {
            question: format!("How much does a {amount} loan cost?"),
            answer: format!(
                "The total cost depends on the APR and repayment term. {} Always review the full terms before accepting an offer.",
                estimate_sentence(mid, amount)
            ),
        },
        Faq {
            question: format!("What can I use a {amount} loan for?"),
            answer: "Almost anything, including emergency expenses, medical bills, car repairs or utility payments. Lenders typically do not restrict how the funds are used.".to_string(),
        },
    ]
}

pub(crate) fn amount_page(config: &SiteConfig, loan: &LoanAmount, states: &StateCatalog) -> Page {
    let examples = loan.representative_examples();
    let faqs = amount_faqs(config, loan, &examples[1]);
    let state_links: String = states
        .published()
        .map(|state| {
            format!(
                "<li>{}</li>\n",
                link(
                    &format!("/borrow/{}/{}", loan.slug, state.slug),
                    &format!("{} loans in {}", loan.display_amount, state.name)
                )
            )
        })
        .collect();
    let amount = escape_html(&loan.display_amount);

    let body = format!(
        "<h1>{amount} Loans: Compare Options and Apply Online</h1>\n\
<p class=\"summary\">APRs from {min_apr} to {max_apr}. Terms from {min_term} to {max_term}. \
Bad credit considered, with funds as soon as the next business day.</p>\n{byline}\
<section>\n<h2>{amount} Loan Costs and Fees</h2>\n{table}</section>\n\
<section>\n<h2>{amount} Loans by State</h2>\n<ul class=\"link-grid\">\n{state_links}</ul>\n</section>\n\
{faqs}{apply}{disclosure}",
        min_apr = format_rate(loan.min_apr),
        max_apr = format_rate(loan.max_apr),
        min_term = months(loan.min_term_months),
        max_term = months(loan.max_term_months),
        byline = byline(&AUTHORS[0], &AUTHORS[1]),
        table = repayment_table(&examples),
        faqs = faq_section(&faqs),
        apply = quick_apply(Some(loan.amount.to_string().as_str()), None),
        disclosure = affiliate_disclosure(config),
    );

    Page::new(
        PageMeta::website(
            format!("{} Loans - Apply Online Today", loan.display_amount),
            format!(
                "Compare {} loan options from multiple lenders. APRs from {} to {}. Bad credit OK. Apply in minutes.",
                loan.display_amount,
                format_rate(loan.min_apr),
                format_rate(loan.max_apr)
            ),
            format!("/borrow/{}", loan.slug),
        ),
        body,
    )
    .with_crumbs(vec![
        Crumb::new("Borrow", "/borrow"),
        Crumb::new(format!("{} Loan", loan.display_amount), format!("/borrow/{}", loan.slug)),
    ])
    .with_json_ld(schema::loan_or_credit(config, loan, loan.max_apr, None))
    .with_json_ld(schema::faq_page(&faqs))
}

fn state_faqs(config: &SiteConfig, loan: &LoanAmount, state: &StateInfo) -> Vec<Faq> {
    let amount = &loan.display_amount;
    let name = &state.name;
    let legality = if state.payday_legal {
        let mut answer = format!(
            "Yes, short-term lending is legal in {name}. The state regulates these loans through the {}.",
            state.regulator_name
        );
        if let Some(max) = state.max_loan_amount {
            answer.push_str(&format!(
                " The maximum loan amount is {}.",
                format_whole_dollars(max)
            ));
        }
        if let Some(apr) = state.max_apr {
            answer.push_str(&format!(" The maximum APR is {}.", format_rate(apr)));
        }
        answer
    } else {
        format!(
            "Payday lending is prohibited in {name}. You may still qualify for personal installment loans from licensed lenders, which typically have lower APRs and longer terms."
        )
    };
    let apr_answer = match (state.max_apr, state.payday_legal) {
        (Some(apr), _) => {
            let mut answer = format!(
                "{name} caps the APR on short-term loans at {}.",
                format_rate(apr)
            );
            if let Some(fee) = state.max_fee_per_hundred {
                answer.push_str(&format!(
                    " The maximum fee is {} per $100 borrowed.",
                    format_usd(fee)
                ));
            }
            answer
        }
        (None, true) => format!(
            "{name} does not set an APR cap on short-term loans, so rates vary widely between lenders. Compare several offers before you accept one."
        ),
        (None, false) => format!(
            "Because payday lending is prohibited in {name}, the applicable limit depends on the loan type and the state's usury laws."
        ),
    };
    let mut repay_answer =
        "Contact your lender right away if you cannot make a payment. Many lenders offer payment plans or extensions.".to_string();
    match state.rollover_allowed {
        Some(true) => repay_answer.push_str(&format!(
            " {name} allows rollovers, though they increase the total cost of borrowing."
        )),
        Some(false) => repay_answer.push_str(&format!(" {name} does not allow rollovers.")),
        None => {}
    }
    if let Some(period) = &state.cooling_off_period {
        repay_answer.push_str(&format!(
            " {name} requires a cooling-off period of {period} between loans."
        ));
    }

    vec![
        Faq {
            question: format!("Is a {amount} loan legal in {name}?"),
            answer: legality,
        },
        Faq {
            question: format!("What is the maximum APR for a {amount} loan in {name}?"),
            answer: apr_answer,
        },
        Faq {
            question: format!("Can I get a {amount} loan in {name} with bad credit?"),
            answer: format!(
                "Yes, many lenders in {}'s network consider {name} applicants with bad credit or no credit history.",
                config.site_name
            ),
        },
        Faq {
            question: format!("Where can I file a complaint about a lender in {name}?"),
            answer: format!(
                "Contact the {}. You can also file a complaint with the Consumer Financial Protection Bureau at consumerfinance.gov.",
                state.regulator_name
            ),
        },
        Faq {
            question: format!("What happens if I can't repay a {amount} loan in {name}?"),
            answer: repay_answer,
        },
    ]
}

pub(crate) fn amount_state_page(config: &SiteConfig, loan: &LoanAmount, state: &StateInfo) -> Page {
    let max_apr = state.effective_max_apr(loan);
    let examples = state.capped_examples(loan);
    let faqs = state_faqs(config, loan, state);
    let amount = escape_html(&loan.display_amount);
    let name = escape_html(&state.name);

    let mut notices = String::new();
    if !state.payday_legal {
        notices.push_str(&format!(
            "<div class=\"callout warning\">\n<p><strong>Payday Lending Not Available in {name}</strong></p>\n\
<p>{name} prohibits payday lending. Residents may still qualify for personal installment loans \
from licensed online lenders.</p>\n</div>\n"
        ));
    } else if state.exceeds_state_max(loan) {
        notices.push_str(&format!(
            "<div class=\"callout warning\">\n<p><strong>Amount Exceeds {name} Payday Loan Limit</strong></p>\n\
<p>{name} limits payday loans to {}. A {amount} loan may be offered as an installment loan instead.</p>\n</div>\n",
            format_limit(state.max_loan_amount)
        ));
    }

    let body = format!(
        "<h1>{amount} Loans in {name} ({abbr})</h1>\n\
<p class=\"summary\">APRs from {min_apr} to {max_apr} for {name} residents. Terms from {min_term} to {max_term}.</p>\n\
{notices}{byline}\
<section>\n<h2>{name} Lending Rules</h2>\n{rules}\
<p>Regulator: <a href=\"{regulator_url}\" rel=\"nofollow\">{regulator}</a></p>\n</section>\n\
<section>\n<h2>{amount} Loan Costs in {name}</h2>\n{table}</section>\n\
{faqs}{apply}{disclosure}",
        abbr = escape_html(&state.abbreviation),
        min_apr = format_rate(loan.min_apr.min(max_apr)),
        max_apr = format_rate(max_apr),
        min_term = months(loan.min_term_months),
        max_term = months(loan.max_term_months),
        byline = byline(&AUTHORS[0], &AUTHORS[2]),
        rules = regulation_table(state),
        regulator_url = escape_html(&state.regulator_url),
        regulator = escape_html(&state.regulator_name),
        table = repayment_table(&examples),
        faqs = faq_section(&faqs),
        apply = quick_apply(
            Some(loan.amount.to_string().as_str()),
            Some(state.abbreviation.as_str()),
        ),
        disclosure = affiliate_disclosure(config),
    );

    let status = if state.payday_legal {
        format!("Max APR: {}.", format_apr(state.max_apr))
    } else {
        "Payday lending is prohibited.".to_string()
    };
    Page::new(
        PageMeta::website(
            format!(
                "{} Loans in {} - Rates, Rules and How to Apply",
                loan.display_amount, state.name
            ),
            format!(
                "Compare {} loan options in {}. {status} See {} regulations, eligibility, and apply online.",
                loan.display_amount, state.name, state.name
            ),
            format!("/borrow/{}/{}", loan.slug, state.slug),
        ),
        body,
    )
    .with_crumbs(vec![
        Crumb::new("Borrow", "/borrow"),
        Crumb::new(format!("{} Loan", loan.display_amount), format!("/borrow/{}", loan.slug)),
        Crumb::new(state.name.clone(), format!("/borrow/{}/{}", loan.slug, state.slug)),
    ])
    .with_json_ld(schema::loan_or_credit(config, loan, max_apr, Some(&state.name)))
    .with_json_ld(schema::faq_page(&faqs))
}

fn regulation_table(state: &StateInfo) -> String {
    let days = |value: Option<u32>| value.map_or_else(|| "Not set".to_string(), |d| format!("{d} days"));
    let rollover = match state.rollover_allowed {
        Some(true) => "Allowed",
        Some(false) => "Not allowed",
        None => "Not specified",
    };
    let fee = state
        .max_fee_per_hundred
        .map_or_else(|| "No limit".to_string(), format_usd);
    format!(
        "<table class=\"regulations\">\n<tbody>\n\
<tr><th>Payday loans</th><td>{legal}</td></tr>\n\
<tr><th>Maximum loan amount</th><td>{max_amount}</td></tr>\n\
<tr><th>Maximum APR</th><td>{max_apr}</td></tr>\n\
<tr><th>Maximum fee per $100</th><td>{fee}</td></tr>\n\
<tr><th>Minimum term</th><td>{min_term}</td></tr>\n\
<tr><th>Maximum term</th><td>{max_term}</td></tr>\n\
<tr><th>Cooling-off period</th><td>{cooling_off}</td></tr>\n\
<tr><th>Rollovers</th><td>{rollover}</td></tr>\n\
</tbody>\n</table>\n",
        legal = if state.payday_legal { "Legal" } else { "Prohibited" },
        max_amount = format_limit(state.max_loan_amount),
        max_apr = format_apr(state.max_apr),
        min_term = days(state.min_term_days),
        max_term = days(state.max_term_days),
        cooling_off = escape_html(state.cooling_off_period.as_deref().unwrap_or("None")),
    )
}

pub(crate) fn states_index(config: &SiteConfig, states: &StateCatalog) -> Page {
    let rows: String = states
        .all()
        .iter()
        .filter(|state| state.abbreviation != "DC")
        .map(|state| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                link(&format!("/states/{}", state.slug), &state.name),
                if state.payday_legal { "Legal" } else { "Prohibited" },
                format_apr(state.max_apr),
                format_limit(state.max_loan_amount)
            )
        })
        .collect();
    let body = format!(
        "<h1>Loan Laws by State</h1>\n\
<p>Short-term lending rules differ from state to state. Pick your state to see its limits.</p>\n\
<table>\n<thead><tr><th>State</th><th>Payday Loans</th><th>Max APR</th><th>Max Amount</th></tr></thead>\n\
<tbody>\n{rows}</tbody>\n</table>\n{}",
        affiliate_disclosure(config)
    );
    Page::new(
        PageMeta::website(
            "Payday and Personal Loan Laws by State",
            "Compare short-term loan regulations by state: APR caps, loan limits, terms and rollover rules.",
            "/states",
        ),
        body,
    )
    .with_crumbs(vec![Crumb::new("States", "/states")])
}

pub(crate) fn state_hub(config: &SiteConfig, state: &StateInfo, loans: &LoanCatalog) -> Page {
    let name = escape_html(&state.name);
    let amount_links: String = loans
        .published()
        .map(|loan| {
            let href = if state.published {
                format!("/borrow/{}/{}", loan.slug, state.slug)
            } else {
                format!("/borrow/{}", loan.slug)
            };
            format!(
                "<li>{}</li>\n",
                link(&href, &format!("{} Loans", loan.display_amount))
            )
        })
        .collect();
    let status = if state.payday_legal {
        format!("Payday loans are legal in {name} and regulated by the {}.", escape_html(&state.regulator_name))
    } else {
        format!("Payday loans are prohibited in {name}. Installment loans from licensed lenders may still be available.")
    };

    let body = format!(
        "<h1>{name} Loan Laws and Options</h1>\n<p class=\"summary\">{status}</p>\n\
<section>\n<h2>{name} Lending Rules</h2>\n{rules}\
<p>Regulator: <a href=\"{regulator_url}\" rel=\"nofollow\">{regulator}</a></p>\n</section>\n\
<section>\n<h2>Cost of Living in {name}</h2>\n\
<p>Median household income: {income}. Cost of living index: {index:.1} (US average 100).</p>\n</section>\n\
<section>\n<h2>Borrow in {name}</h2>\n<ul class=\"link-grid\">\n{amount_links}</ul>\n</section>\n\
{apply}{disclosure}",
        rules = regulation_table(state),
        regulator_url = escape_html(&state.regulator_url),
        regulator = escape_html(&state.regulator_name),
        income = format_whole_dollars(state.median_income),
        index = state.cost_of_living_index,
        apply = quick_apply(None, Some(state.abbreviation.as_str())),
        disclosure = affiliate_disclosure(config),
    );

    Page::new(
        PageMeta::website(
            format!("{} Loan Laws - Payday and Personal Loan Rules", state.name),
            format!(
                "{} short-term loan regulations: max APR {}, max loan {}. Compare loan options for {} residents.",
                state.name,
                format_apr(state.max_apr),
                format_limit(state.max_loan_amount),
                state.name
            ),
            format!("/states/{}", state.slug),
        ),
        body,
    )
    .with_crumbs(vec![
        Crumb::new("States", "/states"),
        Crumb::new(state.name.clone(), format!("/states/{}", state.slug)),
    ])
}

pub(crate) fn loan_types_index(config: &SiteConfig) -> Page {
    let rows: String = LOAN_TYPES
        .iter()
        .map(|loan_type| {
            format!(
                "<tr><td>{}</td><td>{} - {}</td><td>{} - {}</td><td>{}</td></tr>\n",
                link(&format!("/loans/{}", loan_type.slug), loan_type.name),
                format_whole_dollars(f64::from(loan_type.min_amount)),
                format_whole_dollars(f64::from(loan_type.max_amount)),
                format_rate(loan_type.min_apr),
                format_rate(loan_type.max_apr),
                escape_html(loan_type.term_label)
            )
        })
        .collect();
    let body = format!(
        "<h1>Types of Loans</h1>\n<p>Compare the loan products available through our lender network.</p>\n\
<table>\n<thead><tr><th>Loan Type</th><th>Amount</th><th>APR</th><th>Term</th></tr></thead>\n\
<tbody>\n{rows}</tbody>\n</table>\n{}{}",
        quick_apply(None, None),
        affiliate_disclosure(config)
    );
    Page::new(
        PageMeta::website(
            "Loan Types - Compare Payday, Installment and Bad Credit Loans",
            "Compare payday, installment, bad credit, same-day, emergency and no credit check loans side by side.",
            "/loans",
        ),
        body,
    )
    .with_crumbs(vec![Crumb::new("Loan Types", "/loans")])
}

pub(crate) fn loan_type_page(
    config: &SiteConfig,
    loan_type: &LoanTypeInfo,
    loans: &LoanCatalog,
) -> Page {
    let example = loan_type.example();
    let amount_links: String = loans
        .published()
        .filter(|loan| (loan_type.min_amount..=loan_type.max_amount).contains(&loan.amount))
        .map(|loan| {
            format!(
                "<li>{}</li>\n",
                link(&format!("/borrow/{}", loan.slug), &format!("{} Loans", loan.display_amount))
            )
        })
        .collect();
    let name = escape_html(loan_type.name);

    let body = format!(
        "<h1>{name}</h1>\n<p class=\"summary\">{description}</p>\n\
<dl class=\"facts\">\n<dt>Amounts</dt><dd>{min_amount} - {max_amount}</dd>\n\
<dt>APR</dt><dd>{min_apr} - {max_apr}</dd>\n<dt>Term</dt><dd>{term}</dd>\n</dl>\n\
<section>\n<h2>What {name} Cost</h2>\n{table}</section>\n\
<section>\n<h2>Popular Amounts</h2>\n<ul class=\"link-grid\">\n{amount_links}</ul>\n</section>\n\
{apply}{disclosure}",
        description = escape_html(loan_type.description),
        min_amount = format_whole_dollars(f64::from(loan_type.min_amount)),
        max_amount = format_whole_dollars(f64::from(loan_type.max_amount)),
        min_apr = format_rate(loan_type.min_apr),
        max_apr = format_rate(loan_type.max_apr),
        term = escape_html(loan_type.term_label),
        table = repayment_table(std::slice::from_ref(&example)),
        apply = quick_apply(Some(loan_type.example_amount.to_string().as_str()), None),
        disclosure = affiliate_disclosure(config),
    );

    Page::new(
        PageMeta::website(
            format!("{} - Compare Rates and Apply Online", loan_type.name),
            loan_type.description,
            format!("/loans/{}", loan_type.slug),
        ),
        body,
    )
    .with_crumbs(vec![
        Crumb::new("Loan Types", "/loans"),
        Crumb::new(loan_type.name, format!("/loans/{}", loan_type.slug)),
    ])
}

pub(crate) fn guides_index(config: &SiteConfig, guides: &[&Guide]) -> Page {
    let items: String = guides
        .iter()
        .map(|guide| {
            let fm = &guide.frontmatter;
            format!(
                "<li>\n{}\n<p>{}</p>\n<p class=\"meta\">{} &middot; {} &middot; Updated {}</p>\n</li>\n",
                link(&format!("/guides/{}", fm.slug), &fm.title),
                escape_html(&fm.description),
                escape_html(&fm.category),
                escape_html(&fm.reading_time),
                fm.updated_date.format("%B %-d, %Y")
            )
        })
        .collect();
    let listing = if items.is_empty() {
        "<p>New guides are on the way.</p>\n".to_string()
    } else {
        format!("<ul class=\"cards\">\n{items}</ul>\n")
    };
    let body = format!(
        "<h1>Borrowing Guides</h1>\n<p>Plain-language guides written and reviewed by financial professionals.</p>\n{listing}{}",
        affiliate_disclosure(config)
    );
    Page::new(
        PageMeta::website(
            "Loan Guides - Borrowing Advice from Financial Experts",
            "Expert-reviewed guides on payday loans, APR, credit and borrowing responsibly.",
            "/guides",
        ),
        body,
    )
    .with_crumbs(vec![Crumb::new("Guides", "/guides")])
}

pub(crate) fn guide_page(config: &SiteConfig, guide: &Guide) -> Page {
    let fm = &guide.frontmatter;
    let toc = guide.table_of_contents();
    let toc_html = if toc.is_empty() {
        String::new()
    } else {
        let entries: String = toc
            .iter()
            .map(|entry| format!("<li>{}</li>\n", link(&format!("#{}", entry.id), &entry.text)))
            .collect();
        format!("<nav class=\"toc\">\n<h2>In This Guide</h2>\n<ol>\n{entries}</ol>\n</nav>\n")
    };
    let tags: String = fm
        .tags
        .iter()
        .map(|tag| format!("<li>{}</li>", escape_html(tag)))
        .collect();

    let body = format!(
        "<article>\n<h1>{title}</h1>\n<p class=\"summary\">{description}</p>\n\
<p class=\"byline\">Written by {author}. Reviewed by {reviewer}.</p>\n\
<p class=\"meta\">Published {published} &middot; Updated {updated} &middot; {reading_time}</p>\n\
{toc_html}<div class=\"prose\">\n{content}</div>\n{faqs}<ul class=\"tags\">{tags}</ul>\n</article>\n\
{apply}{disclosure}",
        title = escape_html(&fm.title),
        description = escape_html(&fm.description),
        author = person_link(&fm.author.name, &fm.author.slug, &fm.author.credentials),
        reviewer = person_link(&fm.reviewer.name, &fm.reviewer.slug, &fm.reviewer.credentials),
        published = fm.published_date.format("%B %-d, %Y"),
        updated = fm.updated_date.format("%B %-d, %Y"),
        reading_time = escape_html(&fm.reading_time),
        content = guide.render_html(),
        faqs = faq_section(&fm.faqs),
        apply = quick_apply(None, None),
        disclosure = affiliate_disclosure(config),
    );

    let mut page = Page::new(
        PageMeta::article(
            fm.title.clone(),
            fm.description.clone(),
            format!("/guides/{}", fm.slug),
            fm.published_date,
            fm.updated_date,
            fm.author.name.clone(),
        ),
        body,
    )
    .with_crumbs(vec![
        Crumb::new("Guides", "/guides"),
        Crumb::new(fm.title.clone(), format!("/guides/{}", fm.slug)),
    ])
    .with_json_ld(schema::article(config, guide));
    if !fm.faqs.is_empty() {
        page = page.with_json_ld(schema::faq_page(&fm.faqs));
    }
    page
}

pub(crate) fn author_page(config: &SiteConfig, author: &Author, guides: &[&Guide]) -> Page {
    let expertise: String = author
        .expertise
        .iter()
        .map(|area| format!("<li>{}</li>\n", escape_html(area)))
        .collect();
    let contributed: String = guides
        .iter()
        .filter(|guide| {
            guide.frontmatter.author.slug == author.slug
                || guide.frontmatter.reviewer.slug == author.slug
        })
        .map(|guide| {
            format!(
                "<li>{}</li>\n",
                link(&format!("/guides/{}", guide.frontmatter.slug), &guide.frontmatter.title)
            )
        })
        .collect();
    let name = escape_html(author.name);
    let mut body = format!(
        "<div class=\"author\">\n<span class=\"avatar\" aria-hidden=\"true\">{initials}</span>\n\
<h1>{name}, {credentials}</h1>\n<p class=\"meta\">{title}</p>\n</div>\n<p>{bio}</p>\n\
<section>\n<h2>Areas of Expertise</h2>\n<ul>\n{expertise}</ul>\n</section>\n\
<section>\n<h2>Education</h2>\n<p>{education}</p>\n</section>\n",
        initials = escape_html(&author.initials()),
        credentials = escape_html(author.credentials),
        title = escape_html(author.title),
        bio = escape_html(author.bio),
        education = escape_html(author.education),
    );
    if !contributed.is_empty() {
        body.push_str(&format!(
            "<section>\n<h2>Guides by {name}</h2>\n<ul>\n{contributed}</ul>\n</section>\n"
        ));
    }
    body.push_str(&format!(
        "<p>Read our <a href=\"/editorial-guidelines\">editorial guidelines</a> to learn how {} content is written and reviewed.</p>\n",
        escape_html(&config.site_name)
    ));

    Page::new(
        PageMeta::website(
            format!("{}, {} - {}", author.name, author.credentials, author.title),
            author.bio,
            format!("/authors/{}", author.slug),
        ),
        body,
    )
    .with_crumbs(vec![Crumb::new(author.name, format!("/authors/{}", author.slug))])
    .with_json_ld(schema::person(config, author))
}

fn slider(id: &str, label: &str, bounds: InputBounds, value: f64) -> String {
    format!(
        "<label for=\"{id}\">{label}</label>\n\
<input type=\"range\" id=\"{id}\" name=\"{id}\" min=\"{}\" max=\"{}\" step=\"{}\" value=\"{value}\">\n\
<output for=\"{id}\" id=\"{id}-value\">{value}</output>\n",
        bounds.min, bounds.max, bounds.step
    )
}

/// Calculator with a server-side result for `principal`/`apr`/`term`; the
/// script refreshes the result through `/api/repayment`.
pub(crate) fn calculator(config: &SiteConfig, principal: f64, apr: f64, term: u32) -> Page {
    let result = calculate_repayment(principal, apr, term);
    let (monthly, total, interest) = match &result {
        Ok(result) => (
            format_usd(result.monthly_payment),
            format_usd(result.total_cost),
            format_usd(result.total_interest),
        ),
        Err(_) => (
            ESTIMATE_UNAVAILABLE.to_string(),
            String::new(),
            String::new(),
        ),
    };

    let body = format!(
        "<h1>Loan Repayment Calculator</h1>\n\
<p>Estimate your monthly payment and total cost. Adjust the amount, APR and term to compare scenarios.</p>\n\
<form id=\"loan-calculator\" class=\"calculator\" method=\"get\" action=\"/calculator\">\n\
{principal_input}{apr_input}{term_input}\
<noscript><button type=\"submit\">Calculate</button></noscript>\n</form>\n\
<dl class=\"calculator-results\" aria-live=\"polite\">\n\
<dt>Monthly payment</dt><dd id=\"monthly-payment\">{monthly}</dd>\n\
<dt>Total cost</dt><dd id=\"total-cost\">{total}</dd>\n\
<dt>Total interest</dt><dd id=\"total-interest\">{interest}</dd>\n</dl>\n\
<p class=\"fine-print\">Estimates use standard fixed-rate amortization and exclude lender fees.</p>\n\
{apply}{disclosure}",
        principal_input = slider("principal", "Loan amount ($)", PRINCIPAL_BOUNDS, principal),
        apr_input = slider("apr", "APR (%)", APR_BOUNDS, apr),
        term_input = slider("termMonths", "Term (months)", TERM_BOUNDS, f64::from(term)),
        apply = quick_apply(None, None),
        disclosure = affiliate_disclosure(config),
    );

    Page::new(
        PageMeta::website(
            "Loan Calculator - Estimate Monthly Payments",
            "Free loan calculator: estimate monthly payments, total cost and interest for any amount, APR and term.",
            "/calculator",
        ),
        body,
    )
    .with_crumbs(vec![Crumb::new("Calculator", "/calculator")])
    .with_script("/calculator.js")
}

pub(crate) fn apply(
    config: &SiteConfig,
    loan: Option<&LoanAmount>,
    state: Option<&StateInfo>,
) -> Page {
    let mut intro = String::from(
        "Complete the form below to check your loan options. You'll receive offers from lenders in our network based on your information.",
    );
    if let Some(loan) = loan {
        intro.push_str(&format!(" Requested amount: {}.", loan.display_amount));
    }
    if let Some(state) = state {
        intro.push_str(&format!(" State: {}.", state.name));
    }

    let amount_attr = loan.map(|loan| loan.amount.to_string()).unwrap_or_default();
    let state_attr = state
        .map(|state| state.abbreviation.clone())
        .unwrap_or_default();
    let form = if config.lead_form_script.is_some() {
        format!(
            "<div id=\"lead-form\" data-amount=\"{}\" data-state=\"{}\"></div>\n",
            escape_html(&amount_attr),
            escape_html(&state_attr)
        )
    } else {
        "<div id=\"lead-form\" class=\"placeholder\">\n<p>Online applications are temporarily unavailable. Please check back shortly.</p>\n</div>\n".to_string()
    };

    let body = format!(
        "<h1>Apply for a Loan</h1>\n<p>{}</p>\n{form}\
<p class=\"fine-print\">By submitting this form, you agree to our <a href=\"/terms-of-service\">Terms of Service</a> \
and <a href=\"/privacy-policy\">Privacy Policy</a>. You consent to being contacted by lenders or their \
representatives regarding your inquiry.</p>\n",
        escape_html(&intro)
    );

    let mut page = Page::new(
        PageMeta::website(
            "Apply for a Loan",
            format!(
                "Apply for a personal loan through {}. Compare offers from multiple lenders in our network. Bad credit considered.",
                config.site_name
            ),
            "/apply",
        )
        .no_index(),
        body,
    )
    .with_crumbs(vec![Crumb::new("Apply", "/apply")]);
    if let Some(src) = &config.lead_form_script {
        page = page.with_script(src.clone());
    }
    page
}

/// Static informational pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InfoPage {
    About,
    HowItWorks,
    Contact,
    AdvertiserDisclosure,
    EditorialGuidelines,
    PrivacyPolicy,
    TermsOfService,
}

impl InfoPage {
    pub(crate) const ALL: [InfoPage; 7] = [
        InfoPage::About,
        InfoPage::HowItWorks,
        InfoPage::Contact,
        InfoPage::AdvertiserDisclosure,
        InfoPage::EditorialGuidelines,
        InfoPage::PrivacyPolicy,
        InfoPage::TermsOfService,
    ];

    pub(crate) fn path(self) -> &'static str {
        match self {
            InfoPage::About => "/about",
            InfoPage::HowItWorks => "/how-it-works",
            InfoPage::Contact => "/contact",
            InfoPage::AdvertiserDisclosure => "/advertiser-disclosure",
            InfoPage::EditorialGuidelines => "/editorial-guidelines",
            InfoPage::PrivacyPolicy => "/privacy-policy",
            InfoPage::TermsOfService => "/terms-of-service",
        }
    }

    fn title(self) -> &'static str {
        match self {
            InfoPage::About => "About Us",
            InfoPage::HowItWorks => "How It Works",
            InfoPage::Contact => "Contact Us",
            InfoPage::AdvertiserDisclosure => "Advertiser Disclosure",
            InfoPage::EditorialGuidelines => "Editorial Guidelines",
            InfoPage::PrivacyPolicy => "Privacy Policy",
            InfoPage::TermsOfService => "Terms of Service",
        }
    }

    fn paragraphs(self) -> &'static [&'static str] {
        match self {
            InfoPage::About => &[
                "We help borrowers compare short-term and personal loan options from a network of licensed lenders.",
                "Our content is written and reviewed by credentialed financial professionals so you can borrow with clear expectations.",
            ],
            InfoPage::HowItWorks => &[
                "Submit one short form with basic details about yourself and your finances.",
                "Lenders in our network review your information and may present offers tailored to your profile.",
                "Compare the rates, terms and fees, then accept the offer that fits your budget. Funds typically arrive as soon as the next business day.",
            ],
            InfoPage::Contact => &[
                "Questions about our service or a page on this site? Reach our support team through the form on this page and we will respond within two business days.",
                "For questions about a loan offer, contact the lender directly using the details in your loan agreement.",
            ],
            InfoPage::AdvertiserDisclosure => &[
                "We are not a lender. We receive compensation from lenders and partners when you are matched with or accept an offer.",
                "Compensation may influence which offers appear and in what order, but it does not change our editorial content.",
            ],
            InfoPage::EditorialGuidelines => &[
                "Every guide is written by a subject-matter expert and reviewed by a second credentialed professional before publication.",
                "We cite regulators and primary sources, update pages when laws change, and correct errors promptly.",
            ],
            InfoPage::PrivacyPolicy => &[
                "We collect the information you provide in the application form and share it with lenders in our network to obtain offers for you.",
                "We use encryption to protect your data in transit and do not sell your information to third parties without your consent.",
            ],
            InfoPage::TermsOfService => &[
                "By using this site you agree to these terms. The site provides information and a matching service; it does not make loans or credit decisions.",
                "Loan offers, rates and terms are set by lenders and are subject to their approval and applicable state law.",
            ],
        }
    }
}

pub(crate) fn info_page(config: &SiteConfig, page: InfoPage) -> Page {
    let paragraphs: String = page
        .paragraphs()
        .iter()
        .map(|text| format!("<p>{}</p>\n", escape_html(text)))
        .collect();
    let body = format!(
        "<h1>{}</h1>\n{paragraphs}{}",
        escape_html(page.title()),
        affiliate_disclosure(config)
    );
    Page::new(
        PageMeta::website(
            page.title(),
            format!("{} - {}", page.title(), config.site_name),
            page.path(),
        ),
        body,
    )
    .with_crumbs(vec![Crumb::new(page.title(), page.path())])
}

pub(crate) fn not_found(config: &SiteConfig) -> Page {
    let body = "<h1>Page Not Found</h1>\n\
<p>The page you are looking for does not exist or has moved.</p>\n\
<ul>\n<li><a href=\"/\">Home</a></li>\n<li><a href=\"/borrow\">Compare loan amounts</a></li>\n\
<li><a href=\"/guides\">Read our guides</a></li>\n</ul>\n"
        .to_string();
    Page::new(
        PageMeta::website(
            "Page Not Found",
            format!("This page could not be found on {}.", config.site_name),
            "/404",
        )
        .no_index(),
        body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
    }

    fn loans() -> LoanCatalog {
        LoanCatalog::bundled("FundingZest").expect("bundled loan amounts parse")
    }

    #[test]
    fn layout_wraps_body_with_head_and_organization_schema() {
        let config = SiteConfig::default();
        let html = info_page(&config, InfoPage::About).render(&config, today());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>About Us | FundingZest</title>"));
        assert!(html.contains("\"@type\":\"Organization\""));
        assert!(html.contains("\"@type\":\"BreadcrumbList\""));
        assert!(html.contains("&copy; 2025 FundingZest"));
    }

    #[test]
    fn failed_estimates_render_unavailable_message() {
        let examples = [RepaymentExample::new("Broken", 500, -1.0, 6)];
        let table = repayment_table(&examples);
        assert!(table.contains(ESTIMATE_UNAVAILABLE));
        assert!(!table.contains("$NaN"));
    }

    #[test]
    fn amount_page_shows_examples_and_schemas() {
        let config = SiteConfig::default();
        let loans = loans();
        let states = StateCatalog::bundled().expect("bundled states parse");
        let loan = loans.by_slug("500-dollar-loan").expect("known loan");

        let html = amount_page(&config, loan, &states).render(&config, today());
        assert!(html.contains("<h1>$500 Loans: Compare Options and Apply Online</h1>"));
        assert!(html.contains("\"@type\":\"LoanOrCredit\""));
        assert!(html.contains("\"@type\":\"FAQPage\""));
        assert!(html.contains("/borrow/500-dollar-loan/texas"));
        assert!(html.contains("href=\"/apply?amount=500\""));
    }

    #[test]
    fn state_page_warns_when_amount_exceeds_limit() {
        let config = SiteConfig::default();
        let loans = loans();
        let states = StateCatalog::bundled().expect("bundled states parse");
        let loan = loans.by_slug("1000-dollar-loan").expect("known loan");

        let california = states.by_slug("california").expect("known state");
        let html = amount_state_page(&config, loan, california).render(&config, today());
        assert!(html.contains("Amount Exceeds California Payday Loan Limit"));
        assert!(html.contains("\"maxValue\":460.0"));

        let new_york = states.by_slug("new-york").expect("known state");
        let html = amount_state_page(&config, loan, new_york).render(&config, today());
        assert!(html.contains("Payday Lending Not Available in New York"));
    }

    #[test]
    fn apply_page_is_noindex_and_embeds_configured_widget() {
        let config = SiteConfig {
            lead_form_script: Some("https://forms.example.net/widget.js".to_string()),
            ..SiteConfig::default()
        };
        let loans = loans();
        let loan = loans.by_slug("500-dollar-loan");
        let html = apply(&config, loan, None).render(&config, today());

        assert!(html.contains("noindex, nofollow"));
        assert!(html.contains("<script src=\"https://forms.example.net/widget.js\" defer>"));
        assert!(html.contains("data-amount=\"500\""));

        let html = apply(&SiteConfig::default(), None, None).render(&config, today());
        assert!(html.contains("temporarily unavailable"));
    }

    #[test]
    fn apply_href_keeps_only_present_params() {
        assert_eq!(apply_href(None, None), "/apply");
        assert_eq!(apply_href(Some("500"), None), "/apply?amount=500");
        assert_eq!(apply_href(Some("500"), Some("TX")), "/apply?amount=500&state=TX");
    }

    #[test]
    fn calculator_prerenders_default_quote() {
        let config = SiteConfig::default();
        let html = calculator(&config, 500.0, 200.0, 6).render(&config, today());
        assert!(html.contains("<dd id=\"monthly-payment\">$138.10</dd>"));
        assert!(html.contains("<dd id=\"total-cost\">$828.60</dd>"));
        assert!(html.contains("<script src=\"/calculator.js\" defer>"));
    }

    #[test]
    fn info_pages_have_distinct_paths() {
        let mut paths: Vec<&str> = InfoPage::ALL.iter().map(|page| page.path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), InfoPage::ALL.len());
    }
}
