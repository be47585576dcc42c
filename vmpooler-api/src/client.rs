use serde_json::{json, Value};
use tracing::{debug, info};
use url::Url;

use crate::error::{ApiError, Result};
use crate::transport::{ApiRequest, ApiResponse, Auth, HttpTransport, Method, Transport};
use crate::types::{TokenInfo, VmInfo};

const CONNECT_CONTEXT: &str = "Could not connect to vmpooler";
const CREATE_TOKEN_CONTEXT: &str = "Failed to create authorization token";

/// Operations offered by the pooling service.
pub trait PoolerApi {
    /// Create an auth token from user credentials.
    fn create_token(&self, username: &str, password: &str) -> Result<String>;

    fn token_info(&self, token: &str) -> Result<TokenInfo>;

    fn revoke_token(&self, username: &str, password: &str, token: &str) -> Result<()>;

    /// Names of the templates the pool offers.
    fn list_templates(&self, auth_token: &str) -> Result<Vec<String>>;

    /// Check out a VM of `template`, returning its hostname.
    fn acquire_vm(&self, template: &str, auth_token: &str) -> Result<String>;

    fn vm_info(&self, hostname: &str, auth_token: &str) -> Result<VmInfo>;

    /// Hand a VM back to the pool.
    fn destroy_vm(&self, hostname: &str, auth_token: &str) -> Result<()>;

    fn set_lifetime(&self, hostname: &str, hours: u32, auth_token: &str) -> Result<()>;
}

/// [`PoolerApi`] over a [`Transport`].
#[derive(Debug, Clone)]
pub struct PoolerClient<T = HttpTransport> {
    transport: T,
}

impl PoolerClient<HttpTransport> {
    /// Client for the service at `address`.
    pub fn connect(address: &str) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(address)?))
    }
}

impl<T: Transport> PoolerClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let response = self.transport.send(&request)?;
        debug!(
            method = ?request.method,
            path = %request.path,
            status = response.status,
            "vmpooler responded"
        );
        Ok(response)
    }
}

/// `/{collection}/{name}`, with `name` escaped so it always addresses one
/// resource.
fn resource(collection: &str, name: &str) -> Result<String> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(ApiError::InvalidName(name.to_string()));
    }
    let mut url = Url::parse("http://vmpooler.invalid/")
        .map_err(|_| ApiError::InvalidName(name.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| ApiError::InvalidName(name.to_string()))?
        .clear()
        .push(collection)
        .push(name);
    Ok(url.path().to_string())
}

fn basic(username: &str, password: &str) -> Auth {
    Auth::Basic {
        username: username.to_string(),
        password: password.to_string(),
    }
}

fn token(auth_token: &str) -> Auth {
    Auth::Token(auth_token.to_string())
}

fn unexpected(context: &'static str, response: &ApiResponse) -> ApiError {
    ApiError::UnexpectedStatus {
        context,
        status: response.status,
        reason: response.reason.clone(),
    }
}

fn require_ok(response: &ApiResponse) -> Result<()> {
    if response.status == 200 {
        Ok(())
    } else {
        Err(unexpected(CONNECT_CONTEXT, response))
    }
}

fn json_body(response: &ApiResponse) -> Result<Value> {
    Ok(serde_json::from_str(&response.body)?)
}

/// The `ok` flag most mutating endpoints report.
fn reported_ok(body: &Value) -> bool {
    body.get("ok").and_then(Value::as_bool).unwrap_or(false)
}

fn field<'a>(body: &'a Value, key: &str) -> Result<&'a Value> {
    body.get(key)
        .ok_or_else(|| ApiError::MalformedResponse(format!("missing \"{key}\" in response")))
}

impl<T: Transport> PoolerApi for PoolerClient<T> {
    fn create_token(&self, username: &str, password: &str) -> Result<String> {
        let response =
            self.send(ApiRequest::new(Method::Post, "/token").auth(basic(username, password)))?;
        match response.status {
            200 => {}
            401 => {
                return Err(ApiError::Rejected(
                    "Failed to create authorization token because the provided credentials are not authorized!",
                ))
            }
            _ => return Err(unexpected(CREATE_TOKEN_CONTEXT, &response)),
        }

        let body = json_body(&response)?;
        let created = field(&body, "token")?
            .as_str()
            .ok_or_else(|| ApiError::MalformedResponse("\"token\" is not a string".to_string()))?;
        info!("created auth token");
        Ok(created.to_string())
    }

    fn token_info(&self, auth_token: &str) -> Result<TokenInfo> {
        let response = self.send(ApiRequest::new(Method::Get, resource("token", auth_token)?))?;
        if response.status == 404 {
            return Err(ApiError::Rejected(
                "Token already revoked or invalid token specified!",
            ));
        }
        require_ok(&response)?;

        let body = json_body(&response)?;
        Ok(serde_json::from_value(field(&body, auth_token)?.clone())?)
    }

    fn revoke_token(&self, username: &str, password: &str, auth_token: &str) -> Result<()> {
        let response = self.send(
            ApiRequest::new(Method::Delete, resource("token", auth_token)?)
                .auth(basic(username, password)),
        )?;
        if response.status != 200 {
            return Err(ApiError::Rejected(
                "Token already revoked, invalid credentials provided or invalid token specified!",
            ));
        }
        info!("revoked auth token");
        Ok(())
    }

    fn list_templates(&self, auth_token: &str) -> Result<Vec<String>> {
        let response = self.send(ApiRequest::new(Method::Get, "/vm").auth(token(auth_token)))?;
        require_ok(&response)?;

        let templates: Vec<String> = serde_json::from_str(&response.body)?;
        if templates.is_empty() {
            return Err(ApiError::Rejected("Could not retrieve list of templates!"));
        }
        Ok(templates)
    }

    fn acquire_vm(&self, template: &str, auth_token: &str) -> Result<String> {
        let response = self.send(
            ApiRequest::new(Method::Post, resource("vm", template)?).auth(token(auth_token)),
        )?;
        if response.status == 404 {
            return Err(ApiError::Rejected(
                "Could not retrieve template! Invalid template name provided!",
            ));
        }
        require_ok(&response)?;

        let body = json_body(&response)?;
        if !reported_ok(&body) {
            return Err(ApiError::Rejected(
                "Could not retrieve template! The pool is drained for template!",
            ));
        }
        let hostname = field(field(&body, template)?, "hostname")?
            .as_str()
            .ok_or_else(|| ApiError::MalformedResponse("\"hostname\" is not a string".to_string()))?;
        info!(template, hostname, "acquired vm");
        Ok(hostname.to_string())
    }

    fn vm_info(&self, hostname: &str, auth_token: &str) -> Result<VmInfo> {
        let response = self.send(
            ApiRequest::new(Method::Get, resource("vm", hostname)?).auth(token(auth_token)),
        )?;
        if response.status == 404 {
            return Err(ApiError::Rejected(
                "Could not find VM! Check the VM name and try again!",
            ));
        }
        require_ok(&response)?;

        let body = json_body(&response)?;
        Ok(serde_json::from_value(field(&body, hostname)?.clone())?)
    }

    fn destroy_vm(&self, hostname: &str, auth_token: &str) -> Result<()> {
        let response = self.send(
            ApiRequest::new(Method::Delete, resource("vm", hostname)?).auth(token(auth_token)),
        )?;
        if response.status == 404 {
            return Err(ApiError::Rejected(
                "The VM is already destroyed or wrong VM name provided!",
            ));
        }
        require_ok(&response)?;
        info!(hostname, "destroyed vm");
        Ok(())
    }

    fn set_lifetime(&self, hostname: &str, hours: u32, auth_token: &str) -> Result<()> {
        let payload = json!({ "lifetime": hours.to_string() }).to_string();
        let response = self.send(
            ApiRequest::new(Method::Put, resource("vm", hostname)?)
                .auth(token(auth_token))
                .body(payload),
        )?;
        require_ok(&response)?;

        if !reported_ok(&json_body(&response)?) {
            return Err(ApiError::Rejected("Invalid credentials provided!"));
        }
        info!(hostname, hours, "set vm lifetime");
        Ok(())
    }
}
