//! Domain entities

pub mod cart;
pub mod menu_item;
pub mod metrics;
pub mod offer;
pub mod order;
pub mod principal;
pub mod seed;
pub mod user_profile;

pub use cart::{Cart, CartLine};
pub use menu_item::{MenuFilter, MenuItem, MenuItemPatch, NewMenuItem};
pub use metrics::{DashboardMetrics, HourlyBucket, RecentOrder, TopItem, UserInsights};
pub use offer::{parse_offer_instant, NewOffer, Offer, OfferPatch};
pub use order::{
    format_order_number, AdminOrderView, CustomerOrderView, GeoPoint, MenuSnapshot, Order,
    OrderItemRequest, OrderLine, OrderStatus, PlaceOrder,
};
pub use principal::{Principal, Role};
pub use user_profile::{
    AddressBookView, AddressPatch, NewAddress, ProfileUpdate, ProfileView, SavedAddress,
    UserProfile,
};
