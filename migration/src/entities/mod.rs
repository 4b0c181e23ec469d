pub mod product;
pub mod product_analytics;
pub mod user;
pub mod web_analytics;

pub use product::Entity as ProductEntity;
pub use product_analytics::Entity as ProductAnalyticsEntity;
pub use user::Entity as UserEntity;
pub use web_analytics::Entity as WebAnalyticsEntity;
