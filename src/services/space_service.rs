use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::SubscriptionService;
use rand::Rng;
use regex::Regex;
use sqlx::PgPool;

const SPACE_COLUMNS: &str = "id, agency_id, name, slug, created_at, updated_at";

#[derive(Clone)]
pub struct SpaceService {
    pool: PgPool,
    subscription_service: SubscriptionService,
}

impl SpaceService {
    pub fn new(pool: PgPool, subscription_service: SubscriptionService) -> Self {
        Self {
            pool,
            subscription_service,
        }
    }

    pub async fn create(&self, agency_id: i64, req: CreateSpaceRequest) -> AppResult<SpaceResponse> {
        if req.name.trim().is_empty() {
            return Err(AppError::ValidationError("Space name is required".into()));
        }

        self.subscription_service
            .ensure_can_create_space(agency_id)
            .await?;

        let mut slug = match &req.slug {
            Some(s) => {
                validate_slug(s)?;
                s.clone()
            }
            None => {
                let derived = slugify(&req.name);
                if derived.is_empty() {
                    return Err(AppError::ValidationError(
                        "Could not derive a slug from the space name".into(),
                    ));
                }
                derived
            }
        };

        let taken: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM spaces WHERE slug = $1)")
            .bind(&slug)
            .fetch_one(&self.pool)
            .await?;
        if taken {
            let suffix: u16 = rand::thread_rng().gen_range(1000..=9999);
            slug = format!("{slug}-{suffix}");
        }

        let space = sqlx::query_as::<_, Space>(&format!(
            "INSERT INTO spaces (agency_id, name, slug) VALUES ($1, $2, $3) RETURNING {SPACE_COLUMNS}"
        ))
        .bind(agency_id)
        .bind(req.name.trim())
        .bind(&slug)
        .fetch_one(&self.pool)
        .await?;

        Ok(SpaceResponse::from(space))
    }

    pub async fn list(&self, agency_id: i64) -> AppResult<Vec<SpaceResponse>> {
        let spaces = sqlx::query_as::<_, Space>(&format!(
            "SELECT {SPACE_COLUMNS} FROM spaces WHERE agency_id = $1 ORDER BY created_at"
        ))
        .bind(agency_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(spaces.into_iter().map(SpaceResponse::from).collect())
    }
}

fn validate_slug(slug: &str) -> AppResult<()> {
    let slug_regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    if !slug_regex.is_match(slug) {
        return Err(AppError::ValidationError(
            "Slug may contain only lowercase letters, digits and dashes".into(),
        ));
    }

    Ok(())
}

fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_dash = true; // swallow leading dashes
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            out.push('-');
            prev_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("downtown-showroom").is_ok());
        assert!(validate_slug("unit42").is_ok());
        assert!(validate_slug("Downtown").is_err());
        assert!(validate_slug("double--dash").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Downtown Showroom"), "downtown-showroom");
        assert_eq!(slugify("  Unit #42 — East  "), "unit-42-east");
        assert_eq!(slugify("***"), "");
    }
}
