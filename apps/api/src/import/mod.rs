// Contact import: LinkedIn connections CSV, title classification,
// and the user's own profile via the enrichment API.

pub mod classifier;
pub mod csv_parser;
pub mod handlers;
pub mod linkedin;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Could not find header row. Make sure this is a LinkedIn Connections CSV file.")]
    HeaderNotFound,

    #[error("CSV is missing required columns (First Name, Last Name).")]
    MissingColumns,

    #[error("Please provide a valid LinkedIn profile URL (e.g., https://linkedin.com/in/yourname)")]
    InvalidProfileUrl,

    #[error("Profile import is not configured. Please enter your details manually.")]
    NotConfigured,

    #[error("Failed to fetch LinkedIn profile. Please try again or enter your details manually.")]
    Upstream { status: Option<u16> },
}
