#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Author {
    pub slug: &'static str,
    pub name: &'static str,
    pub credentials: &'static str,
    pub title: &'static str,
    pub bio: &'static str,
    pub expertise: &'static [&'static str],
    pub education: &'static str,
}

impl Author {
    /// "Sarah Mitchell" -> "SM".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

pub static AUTHORS: [Author; 3] = [
    Author {
        slug: "sarah-mitchell",
        name: "Sarah Mitchell",
        credentials: "CFP",
        title: "Certified Financial Planner",
        bio: "Sarah Mitchell is a Certified Financial Planner with over 10 years of experience in personal finance and consumer lending. She reviews financial content for accuracy, regulatory compliance, and consumer protection.",
        expertise: &[
            "Personal finance and budgeting",
            "Consumer lending and credit products",
            "State lending regulations",
            "Financial literacy education",
        ],
        education: "B.S. Finance, University of Michigan",
    },
    Author {
        slug: "james-carter",
        name: "James Carter",
        credentials: "CFA",
        title: "Chartered Financial Analyst",
        bio: "James Carter is a Chartered Financial Analyst with 8 years of experience in consumer credit markets, risk assessment, and financial product analysis. He writes analyses of loan products, APR calculations, and market trends.",
        expertise: &[
            "Consumer credit analysis",
            "APR and fee structure analysis",
            "Financial product comparison",
            "Risk assessment",
        ],
        education: "M.B.A. Finance, NYU Stern School of Business",
    },
    Author {
        slug: "maria-gonzalez",
        name: "Maria Gonzalez",
        credentials: "AFC",
        title: "Accredited Financial Counselor",
        bio: "Maria Gonzalez is an Accredited Financial Counselor focused on consumer advocacy and financial education, with 7 years of experience counseling individuals on borrowing decisions and debt management.",
        expertise: &[
            "Consumer financial counseling",
            "Debt management and repayment strategies",
            "Consumer protection regulations",
        ],
        education: "M.A. Financial Planning, Kansas State University",
    },
];

pub fn author_by_slug(slug: &str) -> Option<&'static Author> {
    AUTHORS.iter().find(|author| author.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_authors_by_slug() {
        let author = author_by_slug("james-carter").expect("known author");
        assert_eq!(author.credentials, "CFA");
        assert_eq!(author.initials(), "JC");
        assert!(author_by_slug("nobody").is_none());
    }
}
