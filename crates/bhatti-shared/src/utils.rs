//! Utility functions

use std::sync::OnceLock;

use regex::Regex;

use crate::constants::WHATSAPP_COUNTRY_CODE;

fn non_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9]").expect("static regex"))
}

/// Strip everything but digits and prefix the Nepal country code when missing.
pub fn normalize_phone_number(raw: &str) -> String {
    let digits = non_digits().replace_all(raw, "").into_owned();
    if digits.starts_with(WHATSAPP_COUNTRY_CODE) {
        return digits;
    }
    let local = digits.trim_start_matches('0');
    if local.starts_with(WHATSAPP_COUNTRY_CODE) {
        return local.to_string();
    }
    format!("{}{}", WHATSAPP_COUNTRY_CODE, local)
}

/// Money rendered the way receipts and messages show it.
pub fn format_rupees(amount: f64) -> String {
    format!("Rs. {:.2}", amount)
}
