//! Identity resolution: bearer tokens and guest bootstrap.

use confessly_common::{AppError, AppResult, IdGenerator};
use confessly_db::repositories::{GuestUserRepository, UserRepository};
use uuid::Uuid;

use crate::principal::Principal;
use crate::services::credential::CredentialService;

/// Result of resolving a guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestResolution {
    pub principal: Principal,
    /// Set when a new guest was minted and its cookie must be sent back.
    pub issued: Option<Uuid>,
}

/// Identity service.
#[derive(Clone)]
pub struct IdentityService {
    credentials: CredentialService,
    user_repo: UserRepository,
    guest_repo: GuestUserRepository,
    id_gen: IdGenerator,
}

impl IdentityService {
    /// Create a new identity service.
    #[must_use]
    pub const fn new(
        credentials: CredentialService,
        user_repo: UserRepository,
        guest_repo: GuestUserRepository,
    ) -> Self {
        Self {
            credentials,
            user_repo,
            guest_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Resolve a bearer token to an authenticated principal.
    ///
    /// The user is reloaded on every call so bans apply to tokens issued
    /// before the ban.
    pub async fn resolve_token(&self, token: &str) -> AppResult<Principal> {
        let claims = self.credentials.verify_token(token)?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if user.banned {
            return Err(AppError::UserBanned);
        }

        Ok(Principal::Authenticated {
            id: claims.sub,
            username: claims.username,
            role: claims.role,
        })
    }

    /// Resolve the guest identified by `cookie`, minting a new one when the
    /// cookie is absent, unparsable or unknown.
    pub async fn resolve_guest(&self, cookie: Option<&str>) -> AppResult<GuestResolution> {
        if let Some(id) = cookie.and_then(|v| Uuid::parse_str(v).ok()) {
            if let Some(guest) = self.guest_repo.find_by_id(id).await? {
                if guest.banned {
                    return Err(AppError::GuestBanned);
                }
                return Ok(GuestResolution {
                    principal: Principal::Guest { id },
                    issued: None,
                });
            }
        }

        let id = self.id_gen.generate_guest_id();
        self.guest_repo.create(id).await?;
        tracing::debug!(guest_id = %id, "Created guest identity");

        Ok(GuestResolution {
            principal: Principal::Guest { id },
            issued: Some(id),
        })
    }

    /// Best-effort resolution for public routes.
    ///
    /// A token that verifies is handled exactly like the strict path. A
    /// missing or unverifiable token falls through to guest resolution.
    pub async fn resolve_best_effort(
        &self,
        token: Option<&str>,
        guest_cookie: Option<&str>,
    ) -> AppResult<GuestResolution> {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            match self.resolve_token(token).await {
                Ok(principal) => {
                    return Ok(GuestResolution {
                        principal,
                        issued: None,
                    });
                }
                Err(AppError::InvalidToken(_)) => {}
                Err(e) => return Err(e),
            }
        }

        self.resolve_guest(guest_cookie).await
    }
}
