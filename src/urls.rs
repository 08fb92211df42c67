//! Endpoint names and URL building.
//!
//! Templates never hard-code paths; they call `url_for("blog.update", id=3)`
//! and this module turns the endpoint name back into a path.

pub const INDEX: &str = "/";
pub const HEALTH: &str = "/health";
pub const REGISTER: &str = "/auth/register";
pub const LOGIN: &str = "/auth/login";
pub const LOGOUT: &str = "/auth/logout";
pub const CREATE: &str = "/create";
pub const UPDATE: &str = "/{id}/update";
pub const DELETE: &str = "/{id}/delete";
pub const STATIC: &str = "/static";

/// Arguments an endpoint may need to build its path.
#[derive(Debug, Default, Clone)]
pub struct UrlArgs {
    pub id: Option<i64>,
    pub filename: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("unknown endpoint '{0}'")]
    UnknownEndpoint(String),

    #[error("endpoint '{endpoint}' requires the '{arg}' argument")]
    MissingArgument {
        endpoint: &'static str,
        arg: &'static str,
    },
}

/// Build the path for a named endpoint.
pub fn url_for(endpoint: &str, args: &UrlArgs) -> Result<String, UrlError> {
    let path = match endpoint {
        "index" => INDEX.to_string(),
        "health" => HEALTH.to_string(),
        "auth.register" => REGISTER.to_string(),
        "auth.login" => LOGIN.to_string(),
        "auth.logout" => LOGOUT.to_string(),
        "blog.create" => CREATE.to_string(),
        "blog.update" => post_path(args, "blog.update", "update")?,
        "blog.delete" => post_path(args, "blog.delete", "delete")?,
        "static" => {
            let filename = args.filename.as_deref().ok_or(UrlError::MissingArgument {
                endpoint: "static",
                arg: "filename",
            })?;
            format!("{}/{}", STATIC, filename.trim_start_matches('/'))
        }
        other => return Err(UrlError::UnknownEndpoint(other.to_string())),
    };

    Ok(path)
}

fn post_path(args: &UrlArgs, endpoint: &'static str, action: &str) -> Result<String, UrlError> {
    let id = args
        .id
        .ok_or(UrlError::MissingArgument { endpoint, arg: "id" })?;
    Ok(format!("/{}/{}", id, action))
}
