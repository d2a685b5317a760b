use crate::storage::models::{Category, Session, ShortUrl, User};
use migration::entities::{category, session, short_url, user};

/// 将 Sea-ORM Model 转换为 ShortUrl
pub fn model_to_short_url(model: short_url::Model) -> ShortUrl {
    ShortUrl {
        id: model.id,
        short_code: model.short_code,
        target_url: model.target_url,
        click_count: model.click_count.max(0) as u64,
        last_clicked_at: model.last_clicked_at,
        created_at: model.created_at,
    }
}

pub fn model_to_category(model: category::Model) -> Category {
    Category {
        id: model.id,
        name: model.name,
        click_count: model.click_count.max(0) as u64,
        created_at: model.created_at,
    }
}

pub fn model_to_user(model: user::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        name: model.name,
        avatar_url: model.avatar_url,
    }
}

pub fn model_to_session(model: session::Model) -> Session {
    Session {
        token: model.token,
        user_id: model.user_id,
        expires_at: model.expires_at,
        created_at: model.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_model_to_short_url() {
        let now = Utc::now();
        let model = short_url::Model {
            id: 7,
            short_code: "docs".to_string(),
            target_url: "https://example.com/docs".to_string(),
            click_count: 42,
            last_clicked_at: Some(now),
            created_at: now,
        };

        let url = model_to_short_url(model);
        assert_eq!(url.id, 7);
        assert_eq!(url.short_code, "docs");
        assert_eq!(url.click_count, 42);
        assert_eq!(url.last_clicked_at, Some(now));
    }

    #[test]
    fn test_negative_click_count_clamped() {
        let model = category::Model {
            id: 1,
            name: "broken".to_string(),
            click_count: -3,
            created_at: Utc::now(),
        };
        assert_eq!(model_to_category(model).click_count, 0);
    }
}
