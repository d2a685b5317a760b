pub mod category;
pub mod session;
pub mod short_url;
pub mod url_category;
pub mod user;

pub use category::Entity as CategoryEntity;
pub use session::Entity as SessionEntity;
pub use short_url::Entity as ShortUrlEntity;
pub use url_category::Entity as UrlCategoryEntity;
pub use user::Entity as UserEntity;
