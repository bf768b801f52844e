//! LinkedIn connections CSV → categorized `Profile`s.
//!
//! LinkedIn exports often carry a few lines of notes before the real header,
//! so the header is searched for rather than assumed to be line one.

use std::collections::BTreeMap;

use tracing::debug;

use crate::import::classifier::TitleClassifier;
use crate::import::ImportError;
use crate::models::profile::{Profile, ProfileCategory};

/// How many leading lines may precede the header row.
const HEADER_SCAN_LINES: usize = 5;

const GRADIENTS: [&str; 16] = [
    "from-blue-500 to-cyan-500",
    "from-violet-500 to-purple-500",
    "from-pink-500 to-rose-500",
    "from-emerald-500 to-teal-500",
    "from-amber-500 to-orange-500",
    "from-sky-500 to-blue-500",
    "from-indigo-500 to-violet-500",
    "from-rose-500 to-pink-500",
    "from-green-500 to-emerald-500",
    "from-cyan-500 to-sky-500",
    "from-purple-500 to-indigo-500",
    "from-teal-500 to-cyan-500",
    "from-red-500 to-rose-500",
    "from-fuchsia-500 to-pink-500",
    "from-orange-500 to-red-500",
    "from-lime-500 to-green-500",
];

/// One raw row of the export. Only lives for the duration of a parse.
#[derive(Debug, Clone, Default)]
struct ContactRecord {
    first_name: String,
    last_name: String,
    url: String,
    company: String,
    position: String,
}

/// Resolved column positions within the header row.
#[derive(Debug)]
struct Columns {
    first_name: usize,
    last_name: usize,
    url: Option<usize>,
    company: Option<usize>,
    position: Option<usize>,
}

impl Columns {
    fn resolve(headers: &[String]) -> Result<Self, ImportError> {
        let first_name = find_column(headers, |h| h.contains("first name"));
        let last_name = find_column(headers, |h| h.contains("last name"));

        let (Some(first_name), Some(last_name)) = (first_name, last_name) else {
            return Err(ImportError::MissingColumns);
        };

        Ok(Columns {
            first_name,
            last_name,
            url: find_column(headers, |h| h == "url" || h.contains("profile")),
            company: find_column(headers, |h| h.contains("company")),
            position: find_column(headers, |h| h.contains("position")),
        })
    }

    fn read(&self, fields: &[String]) -> ContactRecord {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| fields.get(i))
                .cloned()
                .unwrap_or_default()
        };

        ContactRecord {
            first_name: cell(Some(self.first_name)),
            last_name: cell(Some(self.last_name)),
            url: cell(self.url),
            company: cell(self.company),
            position: cell(self.position),
        }
    }
}

fn find_column(headers: &[String], pred: impl Fn(&str) -> bool) -> Option<usize> {
    headers.iter().position(|h| pred(h.as_str()))
}

/// Splits one CSV line on commas, honouring double-quoted fields.
///
/// Quotes toggle the in-quotes flag and are dropped; there is no escape for
/// an embedded quote. Every field is trimmed.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// Parses a connections export and returns every row that classifies into a category.
///
/// An empty result is not an error: it means no row matched any category.
pub fn parse_connections_csv(
    csv_text: &str,
    classifier: &dyn TitleClassifier,
) -> Result<Vec<Profile>, ImportError> {
    let lines: Vec<&str> = csv_text.lines().filter(|l| !l.trim().is_empty()).collect();

    let header_index = lines
        .iter()
        .take(HEADER_SCAN_LINES)
        .position(|l| l.to_lowercase().contains("first name"))
        .ok_or(ImportError::HeaderNotFound)?;

    let headers: Vec<String> = split_csv_line(lines[header_index])
        .into_iter()
        .map(|h| h.to_lowercase())
        .collect();
    let columns = Columns::resolve(&headers)?;

    let mut profiles = Vec::new();
    let mut skipped = 0usize;

    for line in &lines[header_index + 1..] {
        let fields = split_csv_line(line);
        if fields.len() <= 1 {
            skipped += 1;
            continue;
        }

        let record = columns.read(&fields);
        if record.first_name.is_empty() || record.position.is_empty() {
            skipped += 1;
            continue;
        }

        let Some(category) = classifier.classify(&record.position) else {
            skipped += 1;
            continue;
        };

        let position = profiles.len();
        profiles.push(build_profile(record, category, position));
    }

    debug!(
        "Parsed connections CSV: {} profiles kept, {} rows skipped",
        profiles.len(),
        skipped
    );

    Ok(profiles)
}

fn build_profile(record: ContactRecord, category: ProfileCategory, position: usize) -> Profile {
    let headline = if record.company.is_empty() {
        record.position.clone()
    } else {
        format!("{} at {}", record.position, record.company)
    };

    let linkedin_url = if record.url.is_empty() {
        format!(
            "https://linkedin.com/in/{}-{}",
            record.first_name.to_lowercase(),
            record.last_name.to_lowercase()
        )
    } else {
        record.url.clone()
    };

    Profile {
        id: format!("csv-{position}"),
        name: format!("{} {}", record.first_name, record.last_name)
            .trim()
            .to_string(),
        initials: initials(&record.first_name, &record.last_name),
        summary: format!("{headline}. Connected on LinkedIn."),
        headline,
        title: record.position,
        company: record.company,
        location: String::new(),
        category,
        mutual_connections: 0,
        connection_degree: 2,
        avatar_gradient: GRADIENTS[position % GRADIENTS.len()].to_string(),
        linkedin_url,
    }
}

fn initials(first: &str, last: &str) -> String {
    first
        .chars()
        .take(1)
        .chain(last.chars().take(1))
        .flat_map(char::to_uppercase)
        .collect()
}

/// Number of parsed profiles per category, for the import summary.
pub fn category_counts(profiles: &[Profile]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for profile in profiles {
        *counts.entry(profile.category.as_str()).or_insert(0) += 1;
    }
    counts
}
