//! Content filter applied to fetched detail pages.

use regex::Regex;

use crate::error::{AppError, Result};
use crate::services::FetchedPage;

/// Keeps a page only if its body matches every configured pattern.
#[derive(Debug, Clone, Default)]
pub struct ResultFilter {
    patterns: Vec<Regex>,
}

impl ResultFilter {
    /// Compile the given patterns. An empty list accepts every page.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p).map_err(|e| AppError::pattern(p, e)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Whether `page` satisfies all patterns. A missing page never matches.
    pub fn matches(&self, page: Option<&FetchedPage>) -> bool {
        page.is_some_and(|page| self.patterns.iter().all(|re| re.is_match(&page.body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> FetchedPage {
        FetchedPage {
            url: "http://x/1".to_string(),
            status: 200,
            body: body.to_string(),
        }
    }

    fn filter(patterns: &[&str]) -> ResultFilter {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        ResultFilter::new(&patterns).unwrap()
    }

    #[test]
    fn test_missing_page_never_matches() {
        assert!(!filter(&[]).matches(None));
        assert!(!filter(&["x"]).matches(None));
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let f = filter(&[]);
        assert!(f.matches(Some(&page(""))));
        assert!(f.matches(Some(&page("anything"))));
    }

    #[test]
    fn test_all_patterns_required() {
        let f = filter(&["CON_CORP", r"Tax Term:.*FULLTIME"]);

        assert!(f.matches(Some(&page("Tax Term: CON_CORP FULLTIME"))));
        assert!(!f.matches(Some(&page("Tax Term: CON_CORP"))));
        assert!(!f.matches(Some(&page("Tax Term: FULLTIME"))));
    }

    #[test]
    fn test_dropping_a_pattern_never_shrinks_matches() {
        let bodies = ["CON_CORP only", "FULLTIME only", "CON_CORP and FULLTIME", "neither"];
        let both = filter(&["CON_CORP", "FULLTIME"]);
        let without_fulltime = filter(&["CON_CORP"]);
        let without_corp = filter(&["FULLTIME"]);

        for body in bodies {
            let p = page(body);
            if both.matches(Some(&p)) {
                assert!(without_fulltime.matches(Some(&p)), "{body}");
                assert!(without_corp.matches(Some(&p)), "{body}");
            }
        }
    }

    #[test]
    fn test_matching_is_case_sensitive_by_default() {
        assert!(!filter(&["CON_CORP"]).matches(Some(&page("con_corp"))));
        assert!(filter(&["(?i)CON_CORP"]).matches(Some(&page("con_corp"))));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = ResultFilter::new(&["[unclosed".to_string()]).unwrap_err();
        assert!(matches!(err, AppError::Pattern { .. }));
    }
}
