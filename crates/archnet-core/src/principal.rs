//! Request identity. Built from validated JWT claims at the server boundary;
//! core logic and storage never read raw tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ArchError;
use crate::types::Role;

#[derive(Debug, Clone)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

impl Principal {
    /// Construct from validated JWT claims. The server middleware calls this
    /// after signature verification.
    pub fn from_jwt_claims(claims: &JwtClaims) -> Result<Self, ArchError> {
        let id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| ArchError::Unauthorized("malformed sub claim".into()))?;
        Ok(Self {
            id,
            username: claims.username.clone(),
            role: Role::from_str_or_default(&claims.role),
        })
    }

    /// Construct explicitly for tests and in-process callers.
    pub fn local(id: Uuid, username: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self) -> Result<(), ArchError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ArchError::Forbidden(format!(
                "{} is not an admin",
                self.username
            )))
        }
    }

    /// Owner-or-admin rule used by every content mutation.
    pub fn require_owner_or_admin(&self, owner_id: Uuid) -> Result<(), ArchError> {
        if self.id == owner_id || self.is_admin() {
            Ok(())
        } else {
            Err(ArchError::Forbidden(format!(
                "{} does not own this resource",
                self.username
            )))
        }
    }

    /// Professional-content gate: projects require engineer, firm or admin.
    pub fn can_publish_projects(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Firm | Role::Engineer)
    }

    /// Jobs, competitions and news/events are published by firms and admins.
    pub fn can_publish_listings(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Firm)
    }
}

/// JWT claims shape issued at login and expected by the middleware.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// User id.
    pub sub: String,
    pub username: String,
    pub role: String,
    /// Expiry, seconds since epoch.
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, role: &str) -> JwtClaims {
        JwtClaims {
            sub: sub.into(),
            username: "dana".into(),
            role: role.into(),
            exp: 4_102_444_800,
        }
    }

    #[test]
    fn from_jwt_claims_happy_path() {
        let id = Uuid::new_v4();
        let p = Principal::from_jwt_claims(&claims(&id.to_string(), "engineer")).unwrap();
        assert_eq!(p.id, id);
        assert_eq!(p.username, "dana");
        assert_eq!(p.role, Role::Engineer);
    }

    #[test]
    fn from_jwt_claims_bad_sub() {
        let err = Principal::from_jwt_claims(&claims("not-a-uuid", "student")).unwrap_err();
        assert!(matches!(err, ArchError::Unauthorized(_)));
    }

    #[test]
    fn unknown_role_claim_demotes_to_student() {
        let p = Principal::from_jwt_claims(&claims(&Uuid::new_v4().to_string(), "root")).unwrap();
        assert_eq!(p.role, Role::Student);
    }

    #[test]
    fn require_admin_enforced() {
        let admin = Principal::local(Uuid::new_v4(), "a", Role::Admin);
        let student = Principal::local(Uuid::new_v4(), "s", Role::Student);
        assert!(admin.require_admin().is_ok());
        assert!(matches!(
            student.require_admin().unwrap_err(),
            ArchError::Forbidden(_)
        ));
    }

    #[test]
    fn owner_or_admin_rule() {
        let owner = Uuid::new_v4();
        let p = Principal::local(owner, "o", Role::Student);
        assert!(p.require_owner_or_admin(owner).is_ok());
        assert!(p.require_owner_or_admin(Uuid::new_v4()).is_err());

        let admin = Principal::local(Uuid::new_v4(), "a", Role::Admin);
        assert!(admin.require_owner_or_admin(owner).is_ok());
    }

    #[test]
    fn project_gate_excludes_students() {
        assert!(Principal::local(Uuid::new_v4(), "e", Role::Engineer).can_publish_projects());
        assert!(Principal::local(Uuid::new_v4(), "f", Role::Firm).can_publish_projects());
        assert!(!Principal::local(Uuid::new_v4(), "s", Role::Student).can_publish_projects());
    }

    #[test]
    fn listing_gate_is_firm_or_admin() {
        assert!(Principal::local(Uuid::new_v4(), "f", Role::Firm).can_publish_listings());
        assert!(!Principal::local(Uuid::new_v4(), "e", Role::Engineer).can_publish_listings());
    }
}
