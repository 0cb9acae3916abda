//! Sales and customer analytics derived from order history

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::order::{Order, OrderStatus};

const DAILY_WINDOW: i64 = 7;
const WEEKLY_WINDOW: i64 = 6;
const DASHBOARD_TOP_ITEMS: usize = 5;
const INSIGHTS_TOP_ITEMS: usize = 10;
const HOURLY_BUCKETS: usize = 12;
const RECENT_ORDERS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopItem {
    pub title: String,
    pub revenue: f64,
    pub orders: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSeries {
    pub labels: Vec<String>,
    pub totals: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderMetrics {
    pub total_sales: f64,
    pub pending: u32,
    pub in_kitchen: u32,
    pub in_transit: u32,
    pub delivered: u32,
    pub top_items: Vec<TopItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesMetrics {
    pub daily: SalesSeries,
    pub weekly: SalesSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub order_metrics: OrderMetrics,
    pub sales: SalesMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyBucket {
    pub label: String,
    pub count: u32,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrder {
    pub user: String,
    pub total: f64,
    pub items: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInsights {
    pub active_customers24h: usize,
    pub total_visits: u64,
    pub avg_items_per_order: f64,
    pub repeat_customer_rate: f64,
    pub hourly_orders: Vec<HourlyBucket>,
    pub recent_orders: Vec<RecentOrder>,
    pub top_items: Vec<TopItem>,
}

/// Revenue per dish title. Each order counts at most once per title.
#[derive(Default)]
struct ItemLedger {
    entries: Vec<TopItem>,
    index: HashMap<String, usize>,
}

impl ItemLedger {
    fn record(&mut self, order: &Order) {
        let mut seen = HashSet::new();
        for line in &order.items {
            let title = line.menu_item.title.clone();
            let slot = match self.index.get(&title) {
                Some(&i) => i,
                None => {
                    self.entries.push(TopItem { title: title.clone(), revenue: 0.0, orders: 0 });
                    self.index.insert(title.clone(), self.entries.len() - 1);
                    self.entries.len() - 1
                }
            };
            let entry = &mut self.entries[slot];
            entry.revenue += line.line_total();
            if seen.insert(title) {
                entry.orders += 1;
            }
        }
    }

    /// Highest revenue first; ties keep first-seen order.
    fn top(mut self, n: usize) -> Vec<TopItem> {
        self.entries
            .sort_by(|a, b| b.revenue.partial_cmp(&a.revenue).unwrap_or(std::cmp::Ordering::Equal));
        self.entries.truncate(n);
        self.entries
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn short_date(date: NaiveDate) -> String {
    date.format("%-d %b").to_string()
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Admin dashboard over every order.
pub fn dashboard(orders: &[Order], now: DateTime<Utc>) -> DashboardMetrics {
    let mut daily: HashMap<NaiveDate, f64> = HashMap::new();
    let mut weekly: HashMap<NaiveDate, f64> = HashMap::new();
    let mut ledger = ItemLedger::default();
    let mut metrics = OrderMetrics {
        total_sales: 0.0,
        pending: 0,
        in_kitchen: 0,
        in_transit: 0,
        delivered: 0,
        top_items: Vec::new(),
    };

    for order in orders {
        metrics.total_sales += order.total;
        match order.status {
            OrderStatus::Pending => metrics.pending += 1,
            OrderStatus::InKitchen => metrics.in_kitchen += 1,
            OrderStatus::InTransit => metrics.in_transit += 1,
            OrderStatus::Delivered => metrics.delivered += 1,
        }

        let day = order.created_at.date_naive();
        *daily.entry(day).or_default() += order.total;
        *weekly.entry(week_start(day)).or_default() += order.total;
        ledger.record(order);
    }
    metrics.top_items = ledger.top(DASHBOARD_TOP_ITEMS);

    let today = now.date_naive();
    let daily_days: Vec<NaiveDate> = (0..DAILY_WINDOW)
        .rev()
        .map(|i| today - Duration::days(i))
        .collect();
    let week_days: Vec<NaiveDate> = (0..WEEKLY_WINDOW)
        .rev()
        .map(|i| week_start(today - Duration::days(i * 7)))
        .collect();

    DashboardMetrics {
        order_metrics: metrics,
        sales: SalesMetrics {
            daily: SalesSeries {
                labels: daily_days.iter().map(|d| short_date(*d)).collect(),
                totals: daily_days.iter().map(|d| daily.get(d).copied().unwrap_or(0.0)).collect(),
            },
            weekly: SalesSeries {
                labels: week_days
                    .iter()
                    .map(|d| format!("Week of {}", short_date(*d)))
                    .collect(),
                totals: week_days.iter().map(|d| weekly.get(d).copied().unwrap_or(0.0)).collect(),
            },
        },
    }
}

/// Customer activity over a window of orders, newest first.
pub fn user_insights(orders: &[Order], total_visits: u64, now: DateTime<Utc>) -> UserInsights {
    let cutoff = now - Duration::hours(24);
    let mut hourly: BTreeMap<String, HourlyBucket> = BTreeMap::new();
    let mut per_user: HashMap<&str, u32> = HashMap::new();
    let mut active: HashSet<&str> = HashSet::new();
    let mut recent = Vec::new();
    let mut ledger = ItemLedger::default();
    let mut total_items: u64 = 0;

    for order in orders {
        let item_count = order.item_count();
        total_items += u64::from(item_count);
        ledger.record(order);

        let user = order.user_id.as_str();
        *per_user.entry(user).or_default() += 1;
        if order.created_at >= cutoff {
            active.insert(user);
        }

        let bucket = hourly
            .entry(order.created_at.format("%Y-%m-%dT%H").to_string())
            .or_insert_with(|| HourlyBucket {
                label: order.created_at.format("%-I %p").to_string(),
                count: 0,
                total: 0.0,
            });
        bucket.count += 1;
        bucket.total += order.total;

        if recent.len() < RECENT_ORDERS {
            recent.push(RecentOrder {
                user: order.user_name.clone(),
                total: order.total,
                items: item_count,
                created_at: order.created_at,
            });
        }
    }

    let avg_items_per_order = if orders.is_empty() {
        0.0
    } else {
        round_to(total_items as f64 / orders.len() as f64, 2)
    };

    let repeat = per_user.values().filter(|count| **count > 1).count();
    let repeat_customer_rate = if per_user.is_empty() {
        0.0
    } else {
        round_to(repeat as f64 / per_user.len() as f64 * 100.0, 1)
    };

    let buckets: Vec<HourlyBucket> = hourly.into_values().collect();
    let skip = buckets.len().saturating_sub(HOURLY_BUCKETS);

    UserInsights {
        active_customers24h: active.len(),
        total_visits,
        avg_items_per_order,
        repeat_customer_rate,
        hourly_orders: buckets.into_iter().skip(skip).collect(),
        recent_orders: recent,
        top_items: ledger.top(INSIGHTS_TOP_ITEMS),
    }
}
