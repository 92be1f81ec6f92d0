//! HTML rendering with Tera. Templates are compiled into the binary.

use chrono::FixedOffset;
use tera::{Context, Tera};

use quill_core::domain::{BODY_MAX_CHARS, Post, TITLE_MAX_CHARS};
use quill_shared::ErrorResponse;
use quill_shared::dto::PostView;

use crate::flash::Flash;
use crate::middleware::error::AppResult;

const TEMPLATES: [(&str, &str); 8] = [
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("readmore.html", include_str!("../templates/readmore.html")),
    ("admin.html", include_str!("../templates/admin.html")),
    ("create.html", include_str!("../templates/create.html")),
    ("update.html", include_str!("../templates/update.html")),
    ("signup.html", include_str!("../templates/signup.html")),
    ("login.html", include_str!("../templates/login.html")),
];

const ERROR_TEMPLATE: &str = include_str!("../templates/error.html");

/// Convert a post for display, dating it in `offset`.
pub fn post_view(post: Post, offset: FixedOffset) -> PostView {
    let local = post.created_at.with_timezone(&offset);
    PostView {
        id: post.id,
        title: post.title,
        body: post.body,
        img_name: post.img_name,
        created_on: local.format("%Y-%m-%d").to_string(),
        created_at: local.to_rfc3339(),
    }
}

/// Page renderer.
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    fn render(&self, name: &str, ctx: &Context) -> AppResult<String> {
        Ok(self.tera.render(name, ctx)?)
    }

    pub fn index(&self, posts: &[PostView]) -> AppResult<String> {
        let mut ctx = Context::new();
        ctx.insert("posts", posts);
        self.render("index.html", &ctx)
    }

    pub fn readmore(&self, post: &PostView) -> AppResult<String> {
        let mut ctx = Context::new();
        ctx.insert("post", post);
        self.render("readmore.html", &ctx)
    }

    pub fn admin(&self, username: &str, posts: &[PostView]) -> AppResult<String> {
        let mut ctx = Context::new();
        ctx.insert("username", username);
        ctx.insert("posts", posts);
        self.render("admin.html", &ctx)
    }

    pub fn create_form(&self, allowed_extensions: &[&str]) -> AppResult<String> {
        let mut ctx = limits();
        ctx.insert("accept", &accept_attribute(allowed_extensions));
        self.render("create.html", &ctx)
    }

    pub fn update_form(&self, post: &PostView) -> AppResult<String> {
        let mut ctx = limits();
        ctx.insert("post", post);
        self.render("update.html", &ctx)
    }

    pub fn signup(&self, flash: Option<Flash>) -> AppResult<String> {
        self.render("signup.html", &flash_context(flash))
    }

    pub fn login(&self, flash: Option<Flash>) -> AppResult<String> {
        self.render("login.html", &flash_context(flash))
    }
}

fn limits() -> Context {
    let mut ctx = Context::new();
    ctx.insert("title_max", &TITLE_MAX_CHARS);
    ctx.insert("body_max", &BODY_MAX_CHARS);
    ctx
}

fn accept_attribute(extensions: &[&str]) -> String {
    extensions
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn flash_context(flash: Option<Flash>) -> Context {
    let mut ctx = Context::new();
    ctx.insert("flash", &flash.map(Flash::message));
    ctx.insert("flash_is_error", &flash.is_some_and(Flash::is_error));
    ctx
}

/// Render an error page. Needs no state, so `ResponseError` can call it.
pub fn render_error_page(error: &ErrorResponse) -> String {
    let rendered = Context::from_serialize(error)
        .and_then(|ctx| Tera::one_off(ERROR_TEMPLATE, &ctx, true));

    match rendered {
        Ok(html) => html,
        Err(e) => {
            tracing::error!("Error page failed to render: {:?}", e);
            format!("<h1>{} {}</h1>", error.status, error.title)
        }
    }
}
