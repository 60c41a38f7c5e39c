//! Submission and resolution of short links.

use axum::http::HeaderValue;
use chrono::{DateTime, FixedOffset, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::application::services::RateLimiter;
use crate::domain::entities::ShortLink;
use crate::domain::repositories::{LinkRepository, QuotaRepository};
use crate::error::AppError;
use crate::utils::id_codec::generate_id;

/// A stored link together with its absolute short URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedLink {
    pub link: ShortLink,
    pub short_url: String,
}

/// Orchestrates the submit and resolve flows.
///
/// Submission order is fixed: parse expiry, reject past expiry, check quota,
/// store mapping, record the submission. A request rejected
/// at any step leaves no trace in the backend, and a failure while recording
/// leaves the already stored mapping in place.
pub struct ShortenService<L: LinkRepository, Q: QuotaRepository> {
    links: Arc<L>,
    rate_limiter: RateLimiter<Q>,
    base_url: String,
}

impl<L: LinkRepository, Q: QuotaRepository> ShortenService<L, Q> {
    pub fn new(links: Arc<L>, rate_limiter: RateLimiter<Q>, base_url: impl Into<String>) -> Self {
        Self {
            links,
            rate_limiter,
            base_url: base_url.into(),
        }
    }

    /// Shortens `target_url` until `expire_at_raw` on behalf of `client_ip`.
    ///
    /// `expire_at_raw` must be an RFC 3339 timestamp with an explicit offset.
    /// The identifier is derived from the raw text, so two spellings of the
    /// same instant yield different identifiers.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] (malformed) if the expiry does not parse
    /// - [`AppError::InvalidInput`] (rejected) if the URL cannot be sent as a
    ///   `Location` header, e.g. it contains control characters
    /// - [`AppError::InvalidInput`] (expired) if the expiry is not in the future
    /// - [`AppError::RateLimited`] if the client used up its daily quota
    /// - [`AppError::Storage`] on any backend failure
    pub async fn submit(
        &self,
        target_url: &str,
        expire_at_raw: &str,
        client_ip: &str,
    ) -> Result<ShortenedLink, AppError> {
        self.submit_at(target_url, expire_at_raw, client_ip, Utc::now())
            .await
    }

    pub(crate) async fn submit_at(
        &self,
        target_url: &str,
        expire_at_raw: &str,
        client_ip: &str,
        now: DateTime<Utc>,
    ) -> Result<ShortenedLink, AppError> {
        let expire_at = parse_expire_at(expire_at_raw)?;
        ensure_redirectable(target_url)?;
        let link = ShortLink::new(
            generate_id(target_url, expire_at_raw),
            target_url.to_string(),
            expire_at,
        );

        if link.is_expired_at(now) {
            return Err(AppError::expired_input(
                "Expiration time must be in the future",
                json!({ "expireAt": expire_at_raw }),
            ));
        }

        if !self.rate_limiter.check(client_ip).await? {
            warn!(client_ip, "Daily submission limit reached");
            return Err(AppError::rate_limited(
                "Daily submission limit reached",
                json!({ "limit": self.rate_limiter.limit() }),
            ));
        }

        self.links.save(&link).await?;

        let quota = self.rate_limiter.record_at(client_ip, now).await?;
        debug!(client_ip, count = quota.count, "Recorded submission");

        let short_url = self.short_url(&link.id);
        info!(id = %link.id, client_ip, "Created short link");

        Ok(ShortenedLink { link, short_url })
    }

    /// Looks up the target URL for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no live mapping exists. Backend
    /// failures are logged and reported the same way.
    pub async fn resolve(&self, id: &str) -> Result<String, AppError> {
        match self.links.find_target(id).await {
            Ok(Some(target)) if is_redirectable(&target) => Ok(target),
            Ok(Some(_)) => {
                warn!(id, "Stored target is not a valid Location value");
                Err(not_found(id))
            }
            Ok(None) => Err(not_found(id)),
            Err(e) => {
                warn!(id, error = %e, "Lookup failed, reporting as not found");
                Err(not_found(id))
            }
        }
    }

    /// Absolute short URL for `id` under the configured base URL.
    pub fn short_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), id)
    }
}

fn parse_expire_at(raw: &str) -> Result<DateTime<FixedOffset>, AppError> {
    DateTime::parse_from_rfc3339(raw).map_err(|e| {
        AppError::malformed_input(
            "Invalid expiration time",
            json!({ "expireAt": raw, "reason": e.to_string() }),
        )
    })
}

fn is_redirectable(target_url: &str) -> bool {
    HeaderValue::from_str(target_url).is_ok()
}

/// Targets must be usable verbatim as a `Location` header.
fn ensure_redirectable(target_url: &str) -> Result<(), AppError> {
    if is_redirectable(target_url) {
        return Ok(());
    }

    Err(AppError::rejected_input(
        "URL contains characters not allowed in a redirect",
        json!({ "url": target_url }),
    ))
}

fn not_found(id: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "id": id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ClientQuota;
    use crate::domain::repositories::{MockLinkRepository, MockQuotaRepository};
    use crate::error::InvalidInputKind;
    use chrono::{Duration, TimeZone};
    use mockall::Sequence;

    const BASE_URL: &str = "http://localhost:8080";

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 7, 1, 0, 0, 0).unwrap()
    }

    fn service(
        links: MockLinkRepository,
        quotas: MockQuotaRepository,
    ) -> ShortenService<MockLinkRepository, MockQuotaRepository> {
        ShortenService::new(
            Arc::new(links),
            RateLimiter::new(Arc::new(quotas), 100),
            BASE_URL,
        )
    }

    #[tokio::test]
    async fn test_submit_success_order() {
        let mut links = MockLinkRepository::new();
        let mut quotas = MockQuotaRepository::new();
        let mut seq = Sequence::new();

        quotas
            .expect_current_count()
            .withf(|ip| ip == "1.2.3.4")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(0));

        links
            .expect_save()
            .withf(|link| {
                link.id == "aHR0c6MDA="
                    && link.target_url == "https://www.google.com"
                    && link.expire_at_utc().timestamp() == 1_626_598_710
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let window_end = fixed_now() + Duration::hours(24);
        quotas
            .expect_increment()
            .withf(move |ip, at| ip == "1.2.3.4" && *at == window_end)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|ip, at| Ok(ClientQuota::new(ip.to_string(), 1, at)));

        let svc = service(links, quotas);

        let created = svc
            .submit_at(
                "https://www.google.com",
                "2021-07-18T16:58:30+08:00",
                "1.2.3.4",
                fixed_now(),
            )
            .await
            .unwrap();

        assert_eq!(created.link.id, "aHR0c6MDA=");
        assert_eq!(created.short_url, "http://localhost:8080/aHR0c6MDA=");
    }

    #[tokio::test]
    async fn test_submit_past_expiry_touches_nothing() {
        let mut links = MockLinkRepository::new();
        let mut quotas = MockQuotaRepository::new();
        links.expect_save().times(0);
        quotas.expect_current_count().times(0);
        quotas.expect_increment().times(0);

        let svc = service(links, quotas);

        let result = svc
            .submit_at(
                "https://www.google.com",
                "2020-01-01T00:00:00Z",
                "1.2.3.4",
                fixed_now(),
            )
            .await;

        assert!(matches!(
            result,
            Err(AppError::InvalidInput {
                kind: InvalidInputKind::Expired,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_submit_expiry_equal_to_now_is_rejected() {
        let mut quotas = MockQuotaRepository::new();
        quotas.expect_current_count().times(0);

        let svc = service(MockLinkRepository::new(), quotas);

        let result = svc
            .submit_at("https://a.io", "2021-07-01T00:00:00Z", "", fixed_now())
            .await;

        assert!(matches!(
            result,
            Err(AppError::InvalidInput {
                kind: InvalidInputKind::Expired,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_submit_malformed_expiry() {
        let mut links = MockLinkRepository::new();
        let mut quotas = MockQuotaRepository::new();
        links.expect_save().times(0);
        quotas.expect_current_count().times(0);

        let svc = service(links, quotas);

        for raw in ["tomorrow", "2021-07-18 16:58:30", "2021-07-18T16:58:30", ""] {
            let result = svc
                .submit_at("https://www.google.com", raw, "1.2.3.4", fixed_now())
                .await;

            assert!(
                matches!(
                    result,
                    Err(AppError::InvalidInput {
                        kind: InvalidInputKind::Malformed,
                        ..
                    })
                ),
                "{:?} should be malformed",
                raw
            );
        }
    }

    #[tokio::test]
    async fn test_submit_rate_limited_skips_save() {
        let mut links = MockLinkRepository::new();
        let mut quotas = MockQuotaRepository::new();
        quotas.expect_current_count().times(1).returning(|_| Ok(100));
        quotas.expect_increment().times(0);
        links.expect_save().times(0);

        let svc = service(links, quotas);

        let result = svc
            .submit_at(
                "https://www.google.com",
                "2021-07-18T16:58:30+08:00",
                "1.2.3.4",
                fixed_now(),
            )
            .await;

        assert!(matches!(result, Err(AppError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn test_submit_save_failure_skips_record() {
        let mut links = MockLinkRepository::new();
        let mut quotas = MockQuotaRepository::new();
        quotas.expect_current_count().returning(|_| Ok(0));
        quotas.expect_increment().times(0);
        links
            .expect_save()
            .times(1)
            .returning(|_| Err(AppError::storage("down", json!({}))));

        let svc = service(links, quotas);

        let result = svc
            .submit_at(
                "https://www.google.com",
                "2021-07-18T16:58:30+08:00",
                "1.2.3.4",
                fixed_now(),
            )
            .await;

        assert!(matches!(result, Err(AppError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_submit_record_failure_after_save() {
        let mut links = MockLinkRepository::new();
        let mut quotas = MockQuotaRepository::new();
        quotas.expect_current_count().returning(|_| Ok(0));
        links.expect_save().times(1).returning(|_| Ok(()));
        quotas
            .expect_increment()
            .times(1)
            .returning(|_, _| Err(AppError::storage("down", json!({}))));

        let svc = service(links, quotas);

        let result = svc
            .submit_at(
                "https://www.google.com",
                "2021-07-18T16:58:30+08:00",
                "1.2.3.4",
                fixed_now(),
            )
            .await;

        assert!(matches!(result, Err(AppError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_submit_same_input_same_id() {
        let mut links = MockLinkRepository::new();
        let mut quotas = MockQuotaRepository::new();
        quotas.expect_current_count().times(2).returning(|_| Ok(0));
        links.expect_save().times(2).returning(|_| Ok(()));
        quotas
            .expect_increment()
            .times(2)
            .returning(|ip, at| Ok(ClientQuota::new(ip.to_string(), 1, at)));

        let svc = service(links, quotas);

        let first = svc
            .submit_at("https://a.io/x", "2030-01-01T00:00:00Z", "", fixed_now())
            .await
            .unwrap();
        let second = svc
            .submit_at("https://a.io/x", "2030-01-01T00:00:00Z", "", fixed_now())
            .await
            .unwrap();

        assert_eq!(first.link.id, second.link.id);
        assert_eq!(first.short_url, second.short_url);
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find_target()
            .withf(|id| id == "aHR0c6MDA=")
            .times(1)
            .returning(|_| Ok(Some("https://www.google.com".to_string())));

        let svc = service(links, MockQuotaRepository::new());

        assert_eq!(
            svc.resolve("aHR0c6MDA=").await.unwrap(),
            "https://www.google.com"
        );
    }

    #[tokio::test]
    async fn test_resolve_missing_and_failing_are_not_found() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find_target()
            .withf(|id| id == "missing")
            .returning(|_| Ok(None));
        links
            .expect_find_target()
            .withf(|id| id == "broken")
            .returning(|_| Err(AppError::storage("down", json!({}))));

        let svc = service(links, MockQuotaRepository::new());

        assert!(matches!(
            svc.resolve("missing").await,
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            svc.resolve("broken").await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_submit_rejects_target_unusable_as_location() {
        let mut links = MockLinkRepository::new();
        let mut quotas = MockQuotaRepository::new();
        links.expect_save().times(0);
        quotas.expect_current_count().times(0);
        quotas.expect_increment().times(0);

        let svc = service(links, quotas);

        for target in ["https://a.io/\nx", "https://a.io/\r\nSet-Cookie: x=1", "a\u{7f}b"] {
            let result = svc
                .submit_at(target, "2099-01-01T00:00:00Z", "1.2.3.4", fixed_now())
                .await;

            assert!(
                matches!(
                    result,
                    Err(AppError::InvalidInput {
                        kind: InvalidInputKind::Rejected,
                        ..
                    })
                ),
                "{:?} should be rejected",
                target
            );
        }
    }

    #[tokio::test]
    async fn test_resolve_unusable_stored_target_is_not_found() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find_target()
            .times(1)
            .returning(|_| Ok(Some("https://a.io/\nx".to_string())));

        let svc = service(links, MockQuotaRepository::new());

        assert!(matches!(
            svc.resolve("legacy").await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_subsecond_expiry_resolves_until_it_passes() {
        use crate::infrastructure::kv::MemoryStore;
        use crate::infrastructure::persistence::{KvLinkRepository, KvQuotaRepository};

        let store = Arc::new(MemoryStore::new());
        let svc = ShortenService::new(
            Arc::new(KvLinkRepository::new(store.clone())),
            RateLimiter::new(Arc::new(KvQuotaRepository::new(store)), 100),
            BASE_URL,
        );

        let expire_at = (Utc::now() + Duration::milliseconds(900))
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let created = svc
            .submit("https://a.io/soon", &expire_at, "1.2.3.4")
            .await
            .unwrap();

        assert_eq!(
            svc.resolve(&created.link.id).await.unwrap(),
            "https://a.io/soon"
        );
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let svc = ShortenService::new(
            Arc::new(MockLinkRepository::new()),
            RateLimiter::new(Arc::new(MockQuotaRepository::new()), 100),
            "https://sho.rt/",
        );

        assert_eq!(svc.short_url("abc"), "https://sho.rt/abc");
    }
}
