//! Authentication payloads: login credentials and registration requests.
//!
//! Raw form input is validated here before a session operation talks to the
//! API, so a rejected form never produces a network call.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "Email is required"),
            Self::EmptyPassword => write!(f, "Password is required"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials sent to `POST /auth/login`.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use status_client::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ops@example.com ", "secret").unwrap();
/// assert_eq!(creds.email(), "ops@example.com");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email address identifying the account.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Which registration flow the form was filled in for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegistrationModeKind {
    /// Spin up a new organization owned by the registering user.
    #[default]
    CreateOrganization,
    /// Join an existing organization with an invite token.
    JoinOrganization,
}

/// Raw registration form input, exactly as typed by the user.
///
/// Only the fields belonging to `mode` are considered; the others are dropped
/// during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    /// Selected flow.
    pub mode: RegistrationModeKind,
    /// Display name of the new user.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Kept verbatim.
    pub password: String,
    /// Read when creating an organization.
    pub organization_name: String,
    /// Read when joining an organization.
    pub organization_id: String,
    /// Read when joining an organization.
    pub invite_token: String,
}

/// Domain error returned when a registration form is incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Name was blank.
    EmptyName,
    /// Email was blank.
    EmptyEmail,
    /// Password was empty.
    EmptyPassword,
    /// Create mode without an organization name.
    MissingOrganizationName,
    /// Join mode without both an organization id and an invite token.
    MissingInviteDetails,
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name is required"),
            Self::EmptyEmail => write!(f, "Email is required"),
            Self::EmptyPassword => write!(f, "Password is required"),
            Self::MissingOrganizationName => write!(f, "Organization name is required"),
            Self::MissingInviteDetails => {
                write!(f, "Organization ID and invite token are required")
            }
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// The validated half of the form that decides which organization the new
/// account belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationMode {
    /// Register and create a new organization.
    CreateOrganization {
        /// Trimmed organization name.
        organization_name: String,
    },
    /// Register into an existing organization.
    JoinOrganization {
        /// Trimmed organization id.
        organization_id: String,
        /// Trimmed invite token.
        invite_token: Zeroizing<String>,
    },
}

/// Validated registration payload sent to `POST /auth/register`.
///
/// ## Invariants
/// - `name`, `email` and `organization_name`/`organization_id`/`invite_token`
///   are trimmed and non-empty.
/// - `password` is non-empty and kept verbatim.
/// - Exactly one [`RegistrationMode`] is carried.
///
/// # Examples
/// ```
/// use status_client::domain::{RegistrationForm, RegistrationModeKind, RegistrationRequest};
///
/// let form = RegistrationForm {
///     mode: RegistrationModeKind::JoinOrganization,
///     name: "Ada".into(),
///     email: "ada@example.com".into(),
///     password: "pw".into(),
///     organization_id: "org-1".into(),
///     invite_token: "".into(),
///     ..RegistrationForm::default()
/// };
/// let err = RegistrationRequest::try_from_form(&form).unwrap_err();
/// assert_eq!(err.to_string(), "Organization ID and invite token are required");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    name: String,
    email: String,
    password: Zeroizing<String>,
    mode: RegistrationMode,
}

impl RegistrationRequest {
    /// Validate raw form input for the selected mode.
    pub fn try_from_form(form: &RegistrationForm) -> Result<Self, RegistrationValidationError> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(RegistrationValidationError::EmptyName);
        }
        let email = form.email.trim();
        if email.is_empty() {
            return Err(RegistrationValidationError::EmptyEmail);
        }
        if form.password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }

        let mode = match form.mode {
            RegistrationModeKind::CreateOrganization => {
                let organization_name = form.organization_name.trim();
                if organization_name.is_empty() {
                    return Err(RegistrationValidationError::MissingOrganizationName);
                }
                RegistrationMode::CreateOrganization {
                    organization_name: organization_name.to_owned(),
                }
            }
            RegistrationModeKind::JoinOrganization => {
                let organization_id = form.organization_id.trim();
                let invite_token = form.invite_token.trim();
                if organization_id.is_empty() || invite_token.is_empty() {
                    return Err(RegistrationValidationError::MissingInviteDetails);
                }
                RegistrationMode::JoinOrganization {
                    organization_id: organization_id.to_owned(),
                    invite_token: Zeroizing::new(invite_token.to_owned()),
                }
            }
        };

        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            password: Zeroizing::new(form.password.clone()),
            mode,
        })
    }

    /// Trimmed display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Trimmed email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password as typed.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Organization half of the request.
    pub fn mode(&self) -> &RegistrationMode {
        &self.mode
    }
}
