//! Password or token authentication against the v3 API.

use serde::Serialize;

use super::{AuthParameters, AuthPlugin, TokenRequest, unset};
use crate::error::{ClientError, Result};
use keystone_config::constants::V3_TOKENS_PATH;

#[derive(Serialize)]
struct Request<'a> {
    auth: Auth<'a>,
}

#[derive(Serialize)]
struct Auth<'a> {
    identity: Identity<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<Scope<'a>>,
}

#[derive(Serialize)]
struct Identity<'a> {
    methods: [&'static str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<PasswordMethod<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<TokenMethod<'a>>,
}

#[derive(Serialize)]
struct PasswordMethod<'a> {
    user: User<'a>,
}

#[derive(Serialize)]
struct User<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<Named<'a>>,
    password: &'a str,
}

#[derive(Serialize)]
struct TokenMethod<'a> {
    id: &'a str,
}

/// `{"id": ...}` or `{"name": ...}` reference; id preferred.
#[derive(Serialize)]
struct Named<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl<'a> Named<'a> {
    fn pick(id: Option<&'a str>, name: Option<&'a str>) -> Option<Self> {
        match (id, name) {
            (Some(id), _) => Some(Self {
                id: Some(id),
                name: None,
            }),
            (None, Some(name)) => Some(Self {
                id: None,
                name: Some(name),
            }),
            (None, None) => None,
        }
    }
}

#[derive(Serialize)]
struct Project<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<Named<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Scope<'a> {
    Project(Project<'a>),
    Domain(Named<'a>),
}

/// Authenticates with `POST {auth_url}/auth/tokens`.
///
/// Uses the `token` method when a token is present and the `password` method
/// otherwise. Requesting both a project and a domain scope is rejected.
#[derive(Debug, Clone)]
pub struct PasswordV3Plugin {
    params: AuthParameters,
}

impl PasswordV3Plugin {
    pub fn new(params: AuthParameters) -> Self {
        Self { params }
    }

    fn missing(&self) -> Vec<&'static str> {
        let p = &self.params;
        let mut missing = unset(&[("auth_url", p.auth_url())]);

        if p.token().is_none() {
            if p.password().is_none() {
                missing.extend(["password", "token"]);
            }
            if p.user_id().is_none() {
                if p.username().is_none() {
                    missing.extend(["user_id", "username"]);
                } else if p.user_domain_id().is_none() && p.user_domain_name().is_none() {
                    missing.extend(["user_domain_id", "user_domain_name"]);
                }
            }
        }

        if p.project_id().is_none()
            && p.project_name().is_some()
            && p.project_domain_id().is_none()
            && p.project_domain_name().is_none()
        {
            missing.extend(["project_domain_id", "project_domain_name"]);
        }

        missing
    }

    fn scope(&self) -> Result<Option<Scope<'_>>> {
        let p = &self.params;
        let project = match (p.project_id(), p.project_name()) {
            (Some(id), _) => Some(Project {
                id: Some(id),
                name: None,
                domain: None,
            }),
            (None, Some(name)) => Some(Project {
                id: None,
                name: Some(name),
                domain: Named::pick(p.project_domain_id(), p.project_domain_name()),
            }),
            (None, None) => None,
        };
        let domain = Named::pick(p.domain_id(), p.domain_name());

        match (project, domain) {
            (Some(_), Some(_)) => Err(ClientError::InvalidParameters(
                "a token can be scoped to a project or a domain, not both".to_string(),
            )),
            (Some(project), None) => Ok(Some(Scope::Project(project))),
            (None, Some(domain)) => Ok(Some(Scope::Domain(domain))),
            (None, None) => Ok(None),
        }
    }

    fn request_body(&self) -> Result<serde_json::Value> {
        let p = &self.params;
        let identity = match (p.token(), p.password()) {
            (Some(id), _) => Identity {
                methods: ["token"],
                password: None,
                token: Some(TokenMethod { id }),
            },
            (None, Some(password)) => {
                let user = match p.user_id() {
                    Some(id) => User {
                        id: Some(id),
                        name: None,
                        domain: None,
                        password,
                    },
                    None => User {
                        id: None,
                        name: p.username(),
                        domain: Named::pick(p.user_domain_id(), p.user_domain_name()),
                        password,
                    },
                };
                Identity {
                    methods: ["password"],
                    password: Some(PasswordMethod { user }),
                    token: None,
                }
            }
            (None, None) => {
                return Err(ClientError::InsufficientCredentials {
                    missing: self.missing(),
                });
            }
        };

        let request = Request {
            auth: Auth {
                identity,
                scope: self.scope()?,
            },
        };

        serde_json::to_value(request)
            .map_err(|e| ClientError::InvalidParameters(format!("cannot encode request: {e}")))
    }
}

impl AuthPlugin for PasswordV3Plugin {
    fn auth_system(&self) -> &'static str {
        super::PASSWORD_V3
    }

    fn params(&self) -> &AuthParameters {
        &self.params
    }

    fn params_mut(&mut self) -> &mut AuthParameters {
        &mut self.params
    }

    fn sufficient_options(&self) -> Result<()> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ClientError::InsufficientCredentials { missing })
        }
    }

    fn token_request(&self) -> Result<Option<TokenRequest>> {
        let auth_url = self
            .params
            .auth_url()
            .ok_or_else(|| ClientError::InsufficientCredentials {
                missing: self.missing(),
            })?;
        Ok(Some(TokenRequest {
            url: format!("{auth_url}{V3_TOKENS_PATH}"),
            body: self.request_body()?,
            auth_token: self.params.token().map(str::to_string),
        }))
    }
}
