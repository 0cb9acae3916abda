//! Application-wide constants

pub const DEFAULT_TOKEN_EXPIRY: i64 = 3600;
pub const DEFAULT_PRINTER_PORT: u16 = 9100;
pub const DEFAULT_WHATSAPP_NUMBER: &str = "9864320552";
pub const WHATSAPP_COUNTRY_CODE: &str = "977";
pub const POLL_INTERVAL_SECS: u64 = 15;
pub const ADMIN_POLL_LIMIT: usize = 5;
pub const MAX_ADMIN_ORDER_LIMIT: usize = 100;
pub const USER_METRICS_ORDER_WINDOW: usize = 200;
pub const DEFAULT_MENU_RATING: f64 = 4.5;
pub const DEFAULT_ADDRESS_LABEL: &str = "Saved address";
pub const GUEST_NAME: &str = "Guest";
pub const RESTAURANT_NAME: &str = "Urban Bhatti";
