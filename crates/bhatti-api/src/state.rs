use std::num::NonZeroU32;
use std::sync::Arc;

use axum::extract::FromRef;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};

use bhatti_core::events::EventBus;
use bhatti_core::repositories::{
    MenuRepository, MetricsRepository, OfferRepository, OrderRepository, ProfileRepository,
};
use bhatti_core::services::{
    CleanupService, MenuService, MetricsService, OfferService, OrderService, ProfileService,
};
use bhatti_security::JwtService;

/// Storage adapters behind every service
#[derive(Clone)]
pub struct Repositories {
    pub menu: Arc<dyn MenuRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub offers: Arc<dyn OfferRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub metrics: Arc<dyn MetricsRepository>,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub menu_service: Arc<MenuService>,
    pub order_service: Arc<OrderService>,
    pub offer_service: Arc<OfferService>,
    pub profile_service: Arc<ProfileService>,
    pub metrics_service: Arc<MetricsService>,
    pub cleanup_service: Arc<CleanupService>,
    pub jwt: Arc<JwtService>,
    pub event_bus: Arc<EventBus>,
    pub visit_limiter: Arc<DefaultDirectRateLimiter>,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        event_bus: Arc<EventBus>,
        jwt: Arc<JwtService>,
        admin_uids: Vec<String>,
        visit_per_second: u32,
    ) -> Self {
        let quota = Quota::per_second(NonZeroU32::new(visit_per_second).unwrap_or(NonZeroU32::MIN));

        Self {
            menu_service: Arc::new(MenuService::new(repos.menu.clone())),
            order_service: Arc::new(OrderService::new(
                repos.orders.clone(),
                repos.menu.clone(),
                repos.profiles.clone(),
                event_bus.clone(),
            )),
            offer_service: Arc::new(OfferService::new(repos.offers.clone())),
            profile_service: Arc::new(ProfileService::new(repos.profiles.clone())),
            metrics_service: Arc::new(MetricsService::new(repos.orders.clone(), repos.metrics.clone())),
            cleanup_service: Arc::new(CleanupService::new(
                repos.orders,
                repos.menu,
                repos.offers,
                repos.metrics,
                repos.profiles,
                admin_uids,
            )),
            jwt,
            event_bus,
            visit_limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }
}

impl FromRef<AppState> for Arc<JwtService> {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
