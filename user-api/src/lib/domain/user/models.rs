use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use auth::Authority;
use auth::Identity;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::DisplayNameError;
use crate::user::errors::EmailError;
use crate::user::errors::PageRequestError;
use crate::user::errors::PasswordError;
use crate::user::errors::RoleError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a registered account. The email address is the login
/// identifier and the subject of every access token issued for the account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: DisplayName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub roles: Roles,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Credential view of this user for the authentication core.
    pub fn identity(&self) -> Identity {
        Identity::new(
            self.email.as_str(),
            self.password_hash.as_str(),
            self.roles.iter().map(String::as_str),
        )
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID (UUID v4).
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Human-readable account name.
///
/// Not blank and 2-100 characters long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 100;

    /// # Errors
    /// * `Blank` - Empty or whitespace only
    /// * `InvalidLength` - Outside 2-100 characters
    pub fn new(name: String) -> Result<Self, DisplayNameError> {
        if name.trim().is_empty() {
            return Err(DisplayNameError::Blank);
        }

        let length = name.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(DisplayNameError::InvalidLength {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password on its way to the hasher.
///
/// `Debug` does not print the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// # Errors
    /// * `Blank` - Empty or whitespace only
    pub fn new(password: String) -> Result<Self, PasswordError> {
        if password.trim().is_empty() {
            return Err(PasswordError::Blank);
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Non-empty set of role tags assigned to a user.
///
/// Tags are opaque strings here; only the authentication core maps the ones
/// it knows to authorities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roles(BTreeSet<String>);

impl Roles {
    /// # Errors
    /// * `Empty` - No roles given
    /// * `Blank` - A role name is empty or whitespace only
    pub fn new<I>(roles: I) -> Result<Self, RoleError>
    where
        I: IntoIterator<Item = String>,
    {
        let roles: BTreeSet<String> = roles.into_iter().collect();

        if roles.is_empty() {
            return Err(RoleError::Empty);
        }
        if roles.iter().any(|role| role.trim().is_empty()) {
            return Err(RoleError::Blank);
        }

        Ok(Self(roles))
    }

    /// Roles given to self-registered and default accounts.
    pub fn default_user() -> Self {
        Self(BTreeSet::from([Authority::USER_ROLE.to_string()]))
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.contains(role)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

/// Command for self-registration: roles are always the default user roles.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub password: Password,
}

/// Command to create a user with explicit roles (bulk creation).
#[derive(Debug)]
pub struct CreateUserCommand {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub password: Password,
    pub roles: Roles,
}

/// Command to replace a user's details.
///
/// `password` and `roles` are optional: when absent the stored hash and
/// roles are kept.
#[derive(Debug)]
pub struct UpdateUserCommand {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub password: Option<Password>,
    pub roles: Option<Roles>,
}

/// Column a user page can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Email,
    CreatedAt,
    UpdatedAt,
}

impl FromStr for SortField {
    type Err = PageRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "email" => Ok(SortField::Email),
            "created_at" | "createdAt" => Ok(SortField::CreatedAt),
            "updated_at" | "updatedAt" => Ok(SortField::UpdatedAt),
            other => Err(PageRequestError::UnknownSortField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = PageRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            _ => Err(PageRequestError::UnknownSortDirection(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl UserSort {
    /// Parse `field` or `field,direction` (e.g. `name,desc`).
    pub fn parse(sort: &str) -> Result<Self, PageRequestError> {
        let (field, direction) = match sort.split_once(',') {
            Some((field, direction)) => (field.trim(), direction.trim().parse()?),
            None => (sort.trim(), SortDirection::Ascending),
        };

        Ok(Self {
            field: field.parse()?,
            direction,
        })
    }
}

impl Default for UserSort {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Ascending,
        }
    }
}

/// Zero-based page of users to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: UserSort,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u32 = 20;
    pub const MAX_SIZE: u32 = 2000;

    /// # Errors
    /// * `InvalidSize` - `size` is 0 or above [`Self::MAX_SIZE`]
    pub fn new(page: u32, size: u32, sort: UserSort) -> Result<Self, PageRequestError> {
        if size == 0 || size > Self::MAX_SIZE {
            return Err(PageRequestError::InvalidSize {
                max: Self::MAX_SIZE,
                actual: size,
            });
        }
        Ok(Self { page, size, sort })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> UserSort {
        self.sort
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: Self::DEFAULT_SIZE,
            sort: UserSort::default(),
        }
    }
}

/// One page of results plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_items: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        self.total_items.div_ceil(u64::from(self.size.max(1)))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_items: self.total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_bounds() {
        assert!(DisplayName::new("Jo".to_string()).is_ok());
        assert!(DisplayName::new("a".repeat(100)).is_ok());
        assert_eq!(
            DisplayName::new("J".to_string()),
            Err(DisplayNameError::InvalidLength {
                min: 2,
                max: 100,
                actual: 1
            })
        );
        assert!(matches!(
            DisplayName::new("a".repeat(101)),
            Err(DisplayNameError::InvalidLength { actual: 101, .. })
        ));
        assert_eq!(
            DisplayName::new("   ".to_string()),
            Err(DisplayNameError::Blank)
        );
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("john.doe@example.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("hunter22".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("hunter22"));
        assert_eq!(Password::new(" ".to_string()), Err(PasswordError::Blank));
    }

    #[test]
    fn test_roles_validation() {
        assert_eq!(Roles::new(Vec::new()), Err(RoleError::Empty));
        assert_eq!(
            Roles::new(vec!["ROLE_USER".to_string(), "".to_string()]),
            Err(RoleError::Blank)
        );

        let roles = Roles::new(vec!["ROLE_ADMIN".to_string(), "ROLE_ADMIN".to_string()]).unwrap();
        assert_eq!(roles.to_vec(), vec!["ROLE_ADMIN".to_string()]);
        assert!(Roles::default_user().contains("ROLE_USER"));
    }

    #[test]
    fn test_user_identity() {
        let user = User {
            id: UserId::new(),
            name: DisplayName::new("Jane Smith".to_string()).unwrap(),
            email: EmailAddress::new("jane.smith@example.com".to_string()).unwrap(),
            password_hash: "$argon2id$hash".to_string(),
            roles: Roles::new(vec!["ROLE_ADMIN".to_string()]).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let identity = user.identity();
        assert_eq!(identity.identifier(), "jane.smith@example.com");
        assert_eq!(identity.password_hash(), "$argon2id$hash");
        assert!(identity.authorities().contains(&Authority::Admin));
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!(
            UserSort::parse("name,desc"),
            Ok(UserSort {
                field: SortField::Name,
                direction: SortDirection::Descending
            })
        );
        assert_eq!(
            UserSort::parse("email"),
            Ok(UserSort {
                field: SortField::Email,
                direction: SortDirection::Ascending
            })
        );
        assert_eq!(
            UserSort::parse("password_hash,asc"),
            Err(PageRequestError::UnknownSortField(
                "password_hash".to_string()
            ))
        );
        assert_eq!(
            UserSort::parse("name,sideways"),
            Err(PageRequestError::UnknownSortDirection(
                "sideways".to_string()
            ))
        );
    }

    #[test]
    fn test_page_request() {
        let request = PageRequest::new(2, 10, UserSort::default()).unwrap();
        assert_eq!(request.offset(), 20);

        assert!(PageRequest::new(0, 0, UserSort::default()).is_err());
        assert!(PageRequest::new(0, 2001, UserSort::default()).is_err());
    }

    #[test]
    fn test_total_pages() {
        let page: Page<u8> = Page {
            items: vec![],
            page: 0,
            size: 10,
            total_items: 27,
        };
        assert_eq!(page.total_pages(), 3);

        let empty: Page<u8> = Page {
            items: vec![],
            page: 0,
            size: 10,
            total_items: 0,
        };
        assert_eq!(empty.total_pages(), 0);
    }
}
