//! Authorization guards.
//!
//! Guards run after authentication and only ever see an immutable [`Auth`].
//! A [`Pipeline`] always evaluates the role guard before the ownership guard, so
//! a caller with the wrong role never causes a database read. Owners only get
//! through the ownership guard once an admin has approved their restaurant.

use super::middleware::Auth;
use crate::modules::{restaurant, user::repository::Role};
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Denial {
    RoleNotAllowed,
    NotOwner,
    RestaurantNotApproved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const fn of(roles: &[Role]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < roles.len() {
            bits |= 1 << (roles[i] as u8);
            i += 1;
        }
        Self(bits)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0 & (1 << (role as u8)) != 0
    }
}

pub const ADMINS: RoleSet = RoleSet::of(&[Role::Admin]);
pub const RESTAURANT_OWNERS: RoleSet = RoleSet::of(&[Role::RestaurantOwner]);

#[async_trait]
pub trait Guard: Send + Sync {
    async fn check(&self, auth: &Auth) -> Result<(), Denial>;
}

pub struct RoleGuard {
    allowed: RoleSet,
}

impl RoleGuard {
    pub const fn new(allowed: RoleSet) -> Self {
        Self { allowed }
    }
}

#[async_trait]
impl Guard for RoleGuard {
    async fn check(&self, auth: &Auth) -> Result<(), Denial> {
        match self.allowed.contains(auth.role) {
            true => Ok(()),
            false => Err(Denial::RoleNotAllowed),
        }
    }
}

#[derive(Debug)]
pub struct LookupError;

#[derive(Debug, Clone, PartialEq)]
pub struct Ownership {
    pub owner_id: String,
    pub is_approved: bool,
}

/// Resolves who owns a restaurant and whether it has been approved.
#[async_trait]
pub trait OwnerLookup: Send + Sync {
    async fn owner_of(&self, restaurant_id: &str) -> Result<Option<Ownership>, LookupError>;
}

#[async_trait]
impl OwnerLookup for PgPool {
    async fn owner_of(&self, restaurant_id: &str) -> Result<Option<Ownership>, LookupError> {
        restaurant::repository::find_by_id(self, restaurant_id.to_string())
            .await
            .map(|restaurant| {
                restaurant.map(|restaurant| Ownership {
                    owner_id: restaurant.owner_id,
                    is_approved: restaurant.is_approved,
                })
            })
            .map_err(|_| LookupError)
    }
}

pub struct OwnershipGuard<'a> {
    lookup: &'a dyn OwnerLookup,
    restaurant_id: Option<String>,
}

impl<'a> OwnershipGuard<'a> {
    pub fn new(lookup: &'a dyn OwnerLookup, restaurant_id: Option<String>) -> Self {
        Self {
            lookup,
            restaurant_id,
        }
    }

    /// Targets the restaurant linked to the caller's token.
    pub fn of_token_restaurant(lookup: &'a dyn OwnerLookup, auth: &Auth) -> Self {
        Self::new(lookup, auth.restaurant_id.clone())
    }
}

#[async_trait]
impl<'a> Guard for OwnershipGuard<'a> {
    async fn check(&self, auth: &Auth) -> Result<(), Denial> {
        let Some(restaurant_id) = self.restaurant_id.as_deref() else {
            return Err(Denial::NotOwner);
        };

        match self.lookup.owner_of(restaurant_id).await {
            Ok(Some(ownership)) if ownership.owner_id != auth.user_id => Err(Denial::NotOwner),
            Ok(Some(ownership)) if !ownership.is_approved => Err(Denial::RestaurantNotApproved),
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(Denial::NotOwner),
            Err(_) => {
                tracing::error!(
                    "Failed to look up the owner of restaurant {}, denying access",
                    restaurant_id
                );
                Err(Denial::NotOwner)
            }
        }
    }
}

pub struct Pipeline<'a> {
    role: RoleGuard,
    ownership: Option<OwnershipGuard<'a>>,
}

impl<'a> Pipeline<'a> {
    pub fn new(roles: RoleSet) -> Self {
        Self {
            role: RoleGuard::new(roles),
            ownership: None,
        }
    }

    pub fn then_ownership(mut self, guard: OwnershipGuard<'a>) -> Self {
        self.ownership = Some(guard);
        self
    }

    pub async fn run(&self, auth: Auth) -> Result<Auth, Denial> {
        let guards: [Option<&dyn Guard>; 2] = [
            Some(&self.role),
            self.ownership.as_ref().map(|guard| guard as &dyn Guard),
        ];

        for guard in guards.into_iter().flatten() {
            if let Err(denial) = guard.check(&auth).await {
                tracing::warn!(
                    "Denied {} ({}) with {:?}",
                    auth.user_id,
                    auth.role,
                    denial
                );
                return Err(denial);
            }
        }

        Ok(auth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        collections::HashMap,
        sync::atomic::{AtomicUsize, Ordering},
    };

    #[derive(Default)]
    struct FakeLookup {
        owners: HashMap<String, Ownership>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl FakeLookup {
        fn owning(restaurant_id: &str, owner_id: &str) -> Self {
            Self::with(restaurant_id, owner_id, true)
        }

        fn with(restaurant_id: &str, owner_id: &str, is_approved: bool) -> Self {
            Self {
                owners: HashMap::from([(
                    restaurant_id.to_string(),
                    Ownership {
                        owner_id: owner_id.to_string(),
                        is_approved,
                    },
                )]),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl OwnerLookup for FakeLookup {
        async fn owner_of(&self, restaurant_id: &str) -> Result<Option<Ownership>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.fail {
                true => Err(LookupError),
                false => Ok(self.owners.get(restaurant_id).cloned()),
            }
        }
    }

    fn auth(role: Role, restaurant_id: Option<&str>) -> Auth {
        Auth {
            user_id: "owner-1".to_string(),
            email: "owner@example.com".to_string(),
            role,
            restaurant_id: restaurant_id.map(str::to_string),
        }
    }

    #[test]
    fn role_sets_contain_exactly_their_members() {
        let set = RoleSet::of(&[Role::Admin, Role::DeliveryAgent]);
        assert!(set.contains(Role::Admin));
        assert!(set.contains(Role::DeliveryAgent));
        assert!(!set.contains(Role::User));
        assert!(!set.contains(Role::RestaurantOwner));
        assert!(!RoleSet::of(&[]).contains(Role::Admin));
    }

    #[tokio::test]
    async fn role_guard_denies_roles_outside_the_set() {
        let pipeline = Pipeline::new(ADMINS);

        assert_eq!(
            pipeline.run(auth(Role::User, None)).await.unwrap_err(),
            Denial::RoleNotAllowed
        );
        assert!(pipeline.run(auth(Role::Admin, None)).await.is_ok());
    }

    #[tokio::test]
    async fn owner_of_the_token_restaurant_passes() {
        let lookup = FakeLookup::owning("resto-1", "owner-1");
        let caller = auth(Role::RestaurantOwner, Some("resto-1"));
        let pipeline = Pipeline::new(RESTAURANT_OWNERS)
            .then_ownership(OwnershipGuard::of_token_restaurant(&lookup, &caller));

        let passed = pipeline.run(caller).await.unwrap();

        assert_eq!(passed.restaurant_id.as_deref(), Some("resto-1"));
    }

    #[tokio::test]
    async fn owner_without_a_restaurant_is_forbidden_without_a_lookup() {
        let lookup = FakeLookup::owning("resto-1", "owner-1");
        let caller = auth(Role::RestaurantOwner, None);
        let pipeline = Pipeline::new(RESTAURANT_OWNERS)
            .then_ownership(OwnershipGuard::of_token_restaurant(&lookup, &caller));

        assert_eq!(pipeline.run(caller).await.unwrap_err(), Denial::NotOwner);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn someone_elses_restaurant_is_forbidden() {
        let lookup = FakeLookup::owning("resto-1", "owner-2");
        let caller = auth(Role::RestaurantOwner, Some("resto-1"));
        let pipeline = Pipeline::new(RESTAURANT_OWNERS)
            .then_ownership(OwnershipGuard::of_token_restaurant(&lookup, &caller));

        assert_eq!(pipeline.run(caller).await.unwrap_err(), Denial::NotOwner);
    }

    #[tokio::test]
    async fn unapproved_restaurant_is_forbidden_to_its_owner() {
        let lookup = FakeLookup::with("resto-1", "owner-1", false);
        let caller = auth(Role::RestaurantOwner, Some("resto-1"));
        let pipeline = Pipeline::new(RESTAURANT_OWNERS)
            .then_ownership(OwnershipGuard::of_token_restaurant(&lookup, &caller));

        assert_eq!(
            pipeline.run(caller).await.unwrap_err(),
            Denial::RestaurantNotApproved
        );
    }

    #[tokio::test]
    async fn unapproved_restaurant_of_someone_else_is_not_owned() {
        let lookup = FakeLookup::with("resto-1", "owner-2", false);
        let caller = auth(Role::RestaurantOwner, Some("resto-1"));
        let pipeline = Pipeline::new(RESTAURANT_OWNERS)
            .then_ownership(OwnershipGuard::of_token_restaurant(&lookup, &caller));

        assert_eq!(pipeline.run(caller).await.unwrap_err(), Denial::NotOwner);
    }

    #[tokio::test]
    async fn missing_restaurant_is_forbidden() {
        let lookup = FakeLookup::default();
        let caller = auth(Role::RestaurantOwner, Some("deleted"));
        let pipeline = Pipeline::new(RESTAURANT_OWNERS)
            .then_ownership(OwnershipGuard::of_token_restaurant(&lookup, &caller));

        assert_eq!(pipeline.run(caller).await.unwrap_err(), Denial::NotOwner);
    }

    #[tokio::test]
    async fn lookup_failures_deny_instead_of_erroring() {
        let lookup = FakeLookup {
            fail: true,
            ..FakeLookup::owning("resto-1", "owner-1")
        };
        let caller = auth(Role::RestaurantOwner, Some("resto-1"));
        let pipeline = Pipeline::new(RESTAURANT_OWNERS)
            .then_ownership(OwnershipGuard::of_token_restaurant(&lookup, &caller));

        assert_eq!(pipeline.run(caller).await.unwrap_err(), Denial::NotOwner);
    }

    #[tokio::test]
    async fn role_is_checked_before_ownership() {
        let lookup = FakeLookup::owning("resto-1", "owner-1");
        let caller = auth(Role::DeliveryAgent, Some("resto-1"));
        let pipeline = Pipeline::new(RESTAURANT_OWNERS)
            .then_ownership(OwnershipGuard::of_token_restaurant(&lookup, &caller));

        assert_eq!(
            pipeline.run(caller).await.unwrap_err(),
            Denial::RoleNotAllowed
        );
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }
}
