//! # HTML Templates
//!
//! All templates are compiled into the binary with `include_str!` and loaded
//! into a single minijinja `Environment` at startup. Auto-escaping is on for
//! every `.html` template.
//!
//! ## Template globals
//! - `markdown` filter: renders a post body to (safe) HTML
//! - `url_for(endpoint, **kwargs)`: builds a path from an endpoint name
//!
//! ## Page context
//! Every page is rendered with `user` (the logged-in user or none) and
//! `messages` (flashed messages consumed by this render), plus whatever the
//! view passes in.

use crate::db::models::User;
use crate::error::AppResult;
use crate::markdown;
use crate::urls::{self, UrlArgs};
use axum::response::Html;
use minijinja::value::Kwargs;
use minijinja::{context, Environment, Error, ErrorKind, Value};
use std::sync::Arc;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("auth/register.html", include_str!("../templates/auth/register.html")),
    ("auth/login.html", include_str!("../templates/auth/login.html")),
    ("blog/index.html", include_str!("../templates/blog/index.html")),
    ("blog/create.html", include_str!("../templates/blog/create.html")),
    ("blog/update.html", include_str!("../templates/blog/update.html")),
    ("error/404.html", include_str!("../templates/error/404.html")),
    ("error/500.html", include_str!("../templates/error/500.html")),
];

/// Shared template environment.
///
/// Cloning only bumps the `Arc`, so the environment can live in `AppState`.
#[derive(Clone)]
pub struct Templates {
    env: Arc<Environment<'static>>,
}

impl Templates {
    /// Build the environment and compile every template.
    ///
    /// Fails on the first template with a syntax error, so a broken template
    /// stops the server at startup rather than on first request.
    pub fn new() -> Result<Self, Error> {
        let mut env = Environment::new();

        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }

        env.add_filter("markdown", markdown_filter);
        env.add_function("url_for", url_for_function);

        Ok(Self { env: Arc::new(env) })
    }

    /// Render a page with the standard `user` / `messages` context.
    pub fn render_page(
        &self,
        name: &str,
        user: Option<&User>,
        messages: Vec<String>,
        extra: Value,
    ) -> AppResult<Html<String>> {
        let ctx = context! {
            user => user,
            messages => messages,
            ..extra
        };

        let html = self.env.get_template(name)?.render(ctx)?;
        Ok(Html(html))
    }
}

fn markdown_filter(text: &str) -> Value {
    Value::from_safe_string(markdown::to_html(text))
}

// Paths are built from integer ids and template-supplied filenames only, so
// the result is marked safe and `/` is not entity-escaped inside attributes.
fn url_for_function(endpoint: &str, kwargs: Kwargs) -> Result<Value, Error> {
    let args = UrlArgs {
        id: kwargs.get::<Option<i64>>("id")?,
        filename: kwargs.get::<Option<String>>("filename")?,
    };
    kwargs.assert_all_used()?;

    urls::url_for(endpoint, &args)
        .map(Value::from_safe_string)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))
}
