// Helper functions for safe logging and response shaping

use chrono::{NaiveDate, Utc};

/// Timestamp in the same format SQLite's `datetime('now')` produces
pub fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Current UTC calendar date
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Lowercased `%term%` pattern for `LIKE ? ESCAPE '\'` with wildcards in `term` escaped
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.trim().to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Masks email addresses for safe logging
/// Prevents sensitive data exposure while preserving debugging utility
///
/// # Example
/// ```
/// let masked = safe_email_log("user@example.com");
/// // Returns: "u***@example.com"
/// ```
pub fn safe_email_log(email: &str) -> String {
    if email.len() > 3 {
        let parts: Vec<&str> = email.split('@').collect();
        if parts.len() == 2 && !parts[0].is_empty() {
            let first: String = parts[0].chars().take(1).collect();
            format!("{}***@{}", first, parts[1])
        } else {
            "***@***.***".to_string()
        }
    } else {
        "***@***.***".to_string()
    }
}

/// Masks tokens for safe logging
/// Shows only first and last 4 characters
pub fn safe_token_log(token: &str) -> String {
    if token.len() > 8 && token.is_ascii() {
        format!("{}...{}", &token[..4], &token[token.len() - 4..])
    } else {
        "***".to_string()
    }
}

/// Display name derived from the local part of an email address
pub fn display_name(email: &str) -> String {
    email.split('@').next().unwrap_or_default().to_string()
}

/// Formats a byte count the way limits are reported to clients ("10.0 MB")
pub fn format_bytes(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    if bytes < UNIT {
        return format!("{} B", bytes);
    }
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    let suffix = ['K', 'M', 'G', 'T', 'P', 'E'][exp];
    format!("{:.1} {}B", bytes as f64 / div as f64, suffix)
}
