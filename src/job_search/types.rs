// src/job_search/types.rs
use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::types::response::RawJobItem;
use crate::utils::collapse_whitespace;

#[derive(Debug, Clone, Deserialize)]
pub struct JobSearchQuery {
    pub keywords: String,
    pub location: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub salary: Option<String>,
    pub description: String,
}

const DESCRIPTION_MAX_CHARS: usize = 600;

/// Reshape a raw scraped item into a posting. Returns None for items with
/// neither title nor company, which the scraper emits for ads and dead
/// listings.
pub fn reshape_item(item: &RawJobItem) -> Option<JobPosting> {
    let title = clean_field(item.title.as_deref());
    let company = clean_field(item.company.as_deref())
        .or_else(|| clean_field(item.company_name.as_deref()));

    if title.is_none() && company.is_none() {
        return None;
    }

    let description_source = item
        .description_html
        .as_deref()
        .map(strip_html)
        .or_else(|| item.description.clone())
        .unwrap_or_default();
    let description =
        crate::utils::truncate_text(&collapse_whitespace(&description_source), DESCRIPTION_MAX_CHARS);

    let salary = item
        .salary
        .as_deref()
        .and_then(clean_salary)
        .or_else(|| extract_salary(&description));

    Some(JobPosting {
        title: title.unwrap_or_else(|| "Unknown position".to_string()),
        company: company.unwrap_or_else(|| "Unknown company".to_string()),
        location: clean_field(item.location.as_deref()).unwrap_or_else(|| "Remote".to_string()),
        url: item
            .url
            .clone()
            .or_else(|| item.link.clone())
            .unwrap_or_default(),
        salary,
        description,
    })
}

fn clean_field(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(collapse_whitespace(trimmed))
    }
}

fn clean_salary(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.chars().any(|c| c.is_ascii_digit()) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Strip tags from a scraped HTML description.
fn strip_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment.root_element().text().collect::<Vec<_>>().join(" ")
}

/// Heuristic salary extraction: first `$`-prefixed token carrying digits,
/// extended over range syntax like "$90,000 - $120,000".
fn extract_salary(text: &str) -> Option<String> {
    let start = text.find('$')?;
    let tail = &text[start..];

    let mut end = 0;
    let mut seen_digit = false;
    for (i, c) in tail.char_indices() {
        match c {
            '$' | ',' | '.' | '-' | ' ' | 'k' | 'K' => end = i + c.len_utf8(),
            c if c.is_ascii_digit() => {
                seen_digit = true;
                end = i + 1;
            }
            _ => break,
        }
    }

    if !seen_digit {
        return None;
    }

    let candidate = tail[..end].trim_end_matches([' ', '-', ',', '.']);
    Some(candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: Option<&str>, company: Option<&str>) -> RawJobItem {
        RawJobItem {
            title: title.map(String::from),
            company: company.map(String::from),
            ..RawJobItem::default()
        }
    }

    #[test]
    fn test_reshape_drops_empty_items() {
        assert!(reshape_item(&raw(None, None)).is_none());
        assert!(reshape_item(&raw(Some("  "), Some(""))).is_none());
        assert!(reshape_item(&raw(Some("Engineer"), None)).is_some());
    }

    #[test]
    fn test_reshape_strips_html_description() {
        let mut item = raw(Some("Engineer"), Some("Acme"));
        item.description_html =
            Some("<div><p>Build <b>great</b> software.</p><ul><li>Rust</li></ul></div>".to_string());

        let posting = reshape_item(&item).unwrap();
        assert_eq!(posting.description, "Build great software. Rust");
    }

    #[test]
    fn test_reshape_fills_defaults() {
        let posting = reshape_item(&raw(Some("Engineer"), None)).unwrap();
        assert_eq!(posting.company, "Unknown company");
        assert_eq!(posting.location, "Remote");
        assert_eq!(posting.url, "");
    }

    #[test]
    fn test_company_name_alias_is_used() {
        let mut item = raw(Some("Engineer"), None);
        item.company_name = Some("Acme Corp".to_string());
        assert_eq!(reshape_item(&item).unwrap().company, "Acme Corp");
    }

    #[test]
    fn test_salary_extracted_from_description() {
        let mut item = raw(Some("Engineer"), Some("Acme"));
        item.description = Some("Great role. Pay: $90,000 - $120,000 per year plus equity".to_string());

        let posting = reshape_item(&item).unwrap();
        assert_eq!(posting.salary.as_deref(), Some("$90,000 - $120,000"));
    }

    #[test]
    fn test_explicit_salary_field_wins() {
        let mut item = raw(Some("Engineer"), Some("Acme"));
        item.salary = Some("$150k".to_string());
        item.description = Some("Pay: $90,000".to_string());
        assert_eq!(reshape_item(&item).unwrap().salary.as_deref(), Some("$150k"));
    }

    #[test]
    fn test_non_numeric_salary_field_is_ignored() {
        let mut item = raw(Some("Engineer"), Some("Acme"));
        item.salary = Some("Competitive".to_string());
        assert_eq!(reshape_item(&item).unwrap().salary, None);
    }

    #[test]
    fn test_extract_salary_needs_digits() {
        assert_eq!(extract_salary("costs $ nothing"), None);
        assert_eq!(extract_salary("no money mentioned"), None);
        assert_eq!(extract_salary("earn $85k here"), Some("$85k".to_string()));
    }
}
